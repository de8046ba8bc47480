//! Configuration module for Alyze
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so `Config::default()` is
//! what runs when no file is given.
//!
//! # Example
//!
//! ```no_run
//! use alyze::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("alyze.toml")).unwrap();
//! println!("Cache freshness: {}s", config.cache.freshness_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CacheConfig, Config, FetchConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
