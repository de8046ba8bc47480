//! Identity and locale profiles used to shape outbound requests
//!
//! An identity profile selects the User-Agent; a locale profile selects the
//! Accept-Language and X-Forwarded-For headers that simulate a visitor from a
//! given region. Unknown profile keys fall back to the default profile.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Synthetic client identity (browser or bot) used when fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IdentityProfile {
    #[default]
    AlyzeDesktop,
    AlyzeMobile,
    ChromeWindows,
    ChromeAndroid,
    SafariMacos,
    EdgeWindows,
    Googlebot,
    GooglebotMobile,
    Bingbot,
    Mediapartners,
}

impl IdentityProfile {
    pub const ALL: [Self; 10] = [
        Self::AlyzeDesktop,
        Self::AlyzeMobile,
        Self::ChromeWindows,
        Self::ChromeAndroid,
        Self::SafariMacos,
        Self::EdgeWindows,
        Self::Googlebot,
        Self::GooglebotMobile,
        Self::Bingbot,
        Self::Mediapartners,
    ];

    /// Stable key used in options and configuration files
    pub fn key(&self) -> &'static str {
        match self {
            Self::AlyzeDesktop => "alyze-desktop",
            Self::AlyzeMobile => "alyze-mobile",
            Self::ChromeWindows => "chrome-windows",
            Self::ChromeAndroid => "chrome-android",
            Self::SafariMacos => "safari-macos",
            Self::EdgeWindows => "edge-windows",
            Self::Googlebot => "googlebot",
            Self::GooglebotMobile => "googlebot-mobile",
            Self::Bingbot => "bingbot",
            Self::Mediapartners => "mediapartners",
        }
    }

    /// The User-Agent header sent with this identity
    pub fn user_agent(&self) -> &'static str {
        match self {
            Self::AlyzeDesktop => "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Alyze/1.0 Desktop",
            Self::AlyzeMobile => "Mozilla/5.0 (iPhone; CPU iPhone OS 15_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Alyze/1.0 Mobile",
            Self::ChromeWindows => "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            Self::ChromeAndroid => "Mozilla/5.0 (Linux; Android 13; SM-G991B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36",
            Self::SafariMacos => "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
            Self::EdgeWindows => "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0",
            Self::Googlebot => "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
            Self::GooglebotMobile => "Mozilla/5.0 (Linux; Android 6.0.1; Nexus 5X Build/MMB29P) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
            Self::Bingbot => "Mozilla/5.0 (compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)",
            Self::Mediapartners => "Mediapartners-Google",
        }
    }

    /// Looks up a profile by key
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|profile| profile.key() == key)
    }

    /// Looks up a profile by key, falling back to the default profile
    pub fn from_key_or_default(key: &str) -> Self {
        Self::from_key(key).unwrap_or_else(|| {
            tracing::debug!("Unknown identity profile '{}', using default", key);
            Self::default()
        })
    }
}

impl fmt::Display for IdentityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl From<String> for IdentityProfile {
    fn from(key: String) -> Self {
        Self::from_key_or_default(&key)
    }
}

impl From<IdentityProfile> for String {
    fn from(profile: IdentityProfile) -> Self {
        profile.key().to_string()
    }
}

/// Simulated visitor location, expressed through request headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LocaleProfile {
    #[default]
    FranceParis,
    FranceNice,
    UsaWashington,
}

impl LocaleProfile {
    pub const ALL: [Self; 3] = [Self::FranceParis, Self::FranceNice, Self::UsaWashington];

    pub fn key(&self) -> &'static str {
        match self {
            Self::FranceParis => "france-paris",
            Self::FranceNice => "france-nice",
            Self::UsaWashington => "usa-washington",
        }
    }

    pub fn accept_language(&self) -> &'static str {
        match self {
            Self::FranceParis | Self::FranceNice => "fr-FR,fr;q=0.9,en;q=0.8",
            Self::UsaWashington => "en-US,en;q=0.9",
        }
    }

    pub fn forwarded_for(&self) -> &'static str {
        match self {
            Self::FranceParis => "185.24.184.1",
            Self::FranceNice => "89.158.128.1",
            Self::UsaWashington => "23.239.5.1",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|profile| profile.key() == key)
    }

    pub fn from_key_or_default(key: &str) -> Self {
        Self::from_key(key).unwrap_or_else(|| {
            tracing::debug!("Unknown locale profile '{}', using default", key);
            Self::default()
        })
    }
}

impl fmt::Display for LocaleProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl From<String> for LocaleProfile {
    fn from(key: String) -> Self {
        Self::from_key_or_default(&key)
    }
}

impl From<LocaleProfile> for String {
    fn from(profile: LocaleProfile) -> Self {
        profile.key().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_keys_round_trip() {
        for profile in IdentityProfile::ALL {
            assert_eq!(IdentityProfile::from_key(profile.key()), Some(profile));
        }
    }

    #[test]
    fn test_unknown_identity_falls_back() {
        assert_eq!(
            IdentityProfile::from_key_or_default("netscape-3"),
            IdentityProfile::AlyzeDesktop
        );
    }

    #[test]
    fn test_identity_key_case_insensitive() {
        assert_eq!(
            IdentityProfile::from_key("GoogleBot"),
            Some(IdentityProfile::Googlebot)
        );
    }

    #[test]
    fn test_bot_user_agents() {
        assert!(IdentityProfile::Googlebot.user_agent().contains("Googlebot"));
        assert!(IdentityProfile::Bingbot.user_agent().contains("bingbot"));
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        assert_eq!(
            LocaleProfile::from_key_or_default("mars-olympus"),
            LocaleProfile::FranceParis
        );
    }

    #[test]
    fn test_locale_headers() {
        assert_eq!(LocaleProfile::UsaWashington.accept_language(), "en-US,en;q=0.9");
        assert_eq!(LocaleProfile::FranceNice.forwarded_for(), "89.158.128.1");
    }
}
