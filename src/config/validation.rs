use crate::analysis::AnalysisOptions;
use crate::config::types::{CacheConfig, Config, FetchConfig};
use crate::ConfigError;

/// Upper bound for the fetch timeout (seconds)
const MAX_TIMEOUT_SECS: u64 = 300;

/// Upper bound for redirect hops
const MAX_REDIRECT_HOPS: usize = 50;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_cache_config(&config.cache)?;
    validate_default_options(&config.defaults)?;
    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be between 1 and timeout-secs ({}), got {}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    if config.max_redirects > MAX_REDIRECT_HOPS {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be <= {}, got {}",
            MAX_REDIRECT_HOPS, config.max_redirects
        )));
    }

    Ok(())
}

/// Validates cache configuration
fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.max_entries < 1 {
        return Err(ConfigError::Validation(format!(
            "max-entries must be >= 1, got {}",
            config.max_entries
        )));
    }

    if config.eviction_batch < 1 || config.eviction_batch > config.max_entries {
        return Err(ConfigError::Validation(format!(
            "eviction-batch must be between 1 and max-entries ({}), got {}",
            config.max_entries, config.eviction_batch
        )));
    }

    if config.sweep_interval_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "sweep-interval-secs must be >= 1, got {}",
            config.sweep_interval_secs
        )));
    }

    if config.max_age_secs < config.freshness_secs {
        return Err(ConfigError::Validation(format!(
            "max-age-secs ({}) must be >= freshness-secs ({})",
            config.max_age_secs, config.freshness_secs
        )));
    }

    Ok(())
}

/// Validates the default analysis options
fn validate_default_options(options: &AnalysisOptions) -> Result<(), ConfigError> {
    let language = options.language.trim();
    if language.is_empty() {
        return Err(ConfigError::Validation(
            "defaults.language cannot be empty".to_string(),
        ));
    }

    if !language.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "defaults.language must be 'auto' or a language code, got '{}'",
            options.language
        )));
    }

    Ok(())
}
