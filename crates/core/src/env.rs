//! Environment variable helpers shared by the binaries' config loaders.

use std::str::FromStr;

use crate::error::CoreError;

/// Read a required variable. Empty values count as missing.
pub fn require(key: &str) -> Result<String, CoreError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CoreError::Config(format!("{key} environment variable is required"))),
    }
}

/// Read an optional string variable, falling back to `default`.
pub fn string_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Read and parse an optional variable.
///
/// A present but unparseable value is an error rather than a silent default.
pub fn parse_or<T: FromStr>(key: &str, default: T) -> Result<T, CoreError> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse().map_err(|_| {
            CoreError::Config(format!("{key} has an invalid value '{raw}'"))
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable name; the process environment is shared.

    #[test]
    fn require_missing_is_config_error() {
        let err = require("SENSORWATCH_TEST_SURELY_UNSET").unwrap_err();
        assert!(err.to_string().contains("SENSORWATCH_TEST_SURELY_UNSET"));
    }

    #[test]
    fn string_or_uses_default_when_unset() {
        assert_eq!(string_or("SENSORWATCH_TEST_UNSET_STRING", "fallback"), "fallback");
    }

    #[test]
    fn parse_or_uses_default_when_unset() {
        assert_eq!(parse_or("SENSORWATCH_TEST_UNSET_NUMBER", 10u64).unwrap(), 10);
    }

    #[test]
    fn parse_or_rejects_garbage() {
        std::env::set_var("SENSORWATCH_TEST_BAD_NUMBER", "ten");
        assert!(parse_or("SENSORWATCH_TEST_BAD_NUMBER", 10u64).is_err());
    }

    #[test]
    fn parse_or_reads_value() {
        std::env::set_var("SENSORWATCH_TEST_GOOD_NUMBER", " 3 ");
        assert_eq!(parse_or("SENSORWATCH_TEST_GOOD_NUMBER", 10u64).unwrap(), 3);
    }
}
