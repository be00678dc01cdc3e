//! Configuration utility functions
//!
//! This module provides helper functions for working with
//! environment variables and configuration values.

use std::path::PathBuf;

/// Get a string value from an environment variable, ignoring empty values
pub fn get_env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get a path value from an environment variable or use the default
pub fn get_env_path(key: &str, default: PathBuf) -> PathBuf {
    get_env_string(key).map(PathBuf::from).unwrap_or(default)
}

/// Get a u64 value from an environment variable, if present and parseable
pub fn get_env_u64(key: &str) -> Option<u64> {
    match std::env::var(key) {
        Ok(val) => match val.trim().parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                log::warn!("Ignoring {}={:?}: not a whole number", key, val);
                None
            }
        },
        Err(_) => None,
    }
}
