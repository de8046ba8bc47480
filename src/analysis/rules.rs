//! Data tables behind the detectors and scorers
//!
//! Each table is plain data so rules can be added without touching the
//! scoring code.

/// Where a technology signature is looked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    /// Substring of a `<script src>` value
    ScriptSrc(&'static str),
    /// Substring of a `<link href>` value
    LinkHref(&'static str),
}

impl Signature {
    /// CSS selector matching elements that carry this signature
    pub fn selector(&self) -> String {
        match self {
            Self::ScriptSrc(needle) => format!(r#"script[src*="{}"]"#, needle),
            Self::LinkHref(needle) => format!(r#"link[href*="{}"]"#, needle),
        }
    }
}

/// A front-end technology and the markup that reveals it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TechnologyRule {
    pub name: &'static str,
    /// Any one match is enough
    pub signatures: &'static [Signature],
}

pub const TECHNOLOGY_RULES: &[TechnologyRule] = &[
    TechnologyRule {
        name: "jQuery",
        signatures: &[Signature::ScriptSrc("jquery")],
    },
    TechnologyRule {
        name: "Bootstrap",
        signatures: &[
            Signature::ScriptSrc("bootstrap"),
            Signature::LinkHref("bootstrap"),
        ],
    },
    TechnologyRule {
        name: "React",
        signatures: &[Signature::ScriptSrc("react")],
    },
    TechnologyRule {
        name: "Vue.js",
        signatures: &[Signature::ScriptSrc("vue")],
    },
    TechnologyRule {
        name: "Angular",
        signatures: &[Signature::ScriptSrc("angular")],
    },
];

/// Inline `color` values considered low contrast on a light background
///
/// Compared against the normalized (trimmed, lowercase) declaration value.
pub const LOW_CONTRAST_COLORS: &[&str] = &[
    "gray",
    "grey",
    "lightgray",
    "lightgrey",
    "silver",
    "gainsboro",
    "#999",
    "#999999",
    "#aaa",
    "#aaaaaa",
    "#bbb",
    "#bbbbbb",
    "#ccc",
    "#cccccc",
    "#ddd",
    "#dddddd",
];

/// A security header checked by the security scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityHeaderRule {
    /// Lowercase header name
    pub name: &'static str,
    /// What the header protects against
    pub description: &'static str,
}

pub const SECURITY_HEADERS: &[SecurityHeaderRule] = &[
    SecurityHeaderRule {
        name: "strict-transport-security",
        description: "HSTS (forces HTTPS)",
    },
    SecurityHeaderRule {
        name: "content-security-policy",
        description: "CSP (mitigates XSS attacks)",
    },
    SecurityHeaderRule {
        name: "x-content-type-options",
        description: "MIME sniffing protection",
    },
    SecurityHeaderRule {
        name: "x-frame-options",
        description: "Clickjacking protection",
    },
    SecurityHeaderRule {
        name: "x-xss-protection",
        description: "Basic XSS protection",
    },
    SecurityHeaderRule {
        name: "referrer-policy",
        description: "Referrer information control",
    },
];

/// Top-level domains commonly abused for throwaway sites
pub const SUSPICIOUS_TLDS: &[&str] = &[".tk", ".ml", ".ga", ".cf", ".bit", ".pw", ".top"];

/// Headers whose absence counts towards the suspicious-site score, with display labels
pub const SUSPICIOUS_CORE_HEADERS: &[(&str, &str)] = &[
    ("strict-transport-security", "HSTS"),
    ("content-security-policy", "CSP"),
    ("x-content-type-options", "X-Content-Type-Options"),
];

/// Stop words used by the body-text language heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageHint {
    pub code: &'static str,
    pub words: &'static [&'static str],
}

/// A language wins only with strictly more matching words than every other one
pub const LANGUAGE_HINTS: &[LanguageHint] = &[
    LanguageHint {
        code: "en",
        words: &["the", "and", "to", "of", "a", "in", "is", "it", "you", "that"],
    },
    LanguageHint {
        code: "fr",
        words: &["le", "la", "les", "de", "et", "à", "un", "une", "du", "des"],
    },
    LanguageHint {
        code: "es",
        words: &["el", "la", "de", "que", "y", "a", "en", "un", "es", "se"],
    },
];

/// Language returned when the heuristic has no clear winner
pub const FALLBACK_LANGUAGE: &str = "en";

/// Display names of the supported language codes
pub const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("auto", "Automatic detection"),
    ("fr", "French"),
    ("en", "English"),
    ("es", "Spanish"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("de", "German"),
    ("nl", "Dutch"),
];

/// Name of a language code, None if the code is not supported
pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGE_NAMES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_selector() {
        assert_eq!(
            Signature::ScriptSrc("jquery").selector(),
            r#"script[src*="jquery"]"#
        );
        assert_eq!(
            Signature::LinkHref("bootstrap").selector(),
            r#"link[href*="bootstrap"]"#
        );
    }

    #[test]
    fn test_security_headers_are_lowercase() {
        assert_eq!(SECURITY_HEADERS.len(), 6);
        for rule in SECURITY_HEADERS {
            assert_eq!(rule.name, rule.name.to_ascii_lowercase());
        }
    }

    #[test]
    fn test_language_name() {
        assert_eq!(language_name("fr"), Some("French"));
        assert_eq!(language_name("NL"), Some("Dutch"));
        assert_eq!(language_name("ja"), None);
    }
}
