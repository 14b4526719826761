//! Prefix configuration for token syntax.
//!
//! The configuration is an explicit value owned by the
//! [`Console`](crate::Console) and threaded into every resolution call; there
//! is no process-global state to snapshot around a `run` invocation.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Prefix strings introducing arguments and options.
///
/// Defaults to `-` for arguments and `--` for options. Prefixes must be
/// non-empty and distinct; prefix-free tokens are reserved for subcommand
/// names.
///
/// # Examples
///
/// ```
/// use console_args_core::{Configuration, ConfigurationError};
///
/// let config = Configuration::default();
/// assert_eq!(config.argument_prefix(), "-");
/// assert_eq!(config.option_prefix(), "--");
///
/// let custom = Configuration::new("/", "//").unwrap();
/// assert_eq!(custom.argument_prefix(), "/");
///
/// assert_eq!(
///     Configuration::new("-", "-"),
///     Err(ConfigurationError::SamePrefix)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    argument_prefix: String,
    option_prefix: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            argument_prefix: "-".to_string(),
            option_prefix: "--".to_string(),
        }
    }
}

impl Configuration {
    /// Creates a configuration, validating both prefixes.
    pub fn new(
        argument_prefix: impl Into<String>,
        option_prefix: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let argument_prefix = argument_prefix.into();
        let option_prefix = option_prefix.into();

        if argument_prefix == option_prefix {
            return Err(ConfigurationError::SamePrefix);
        }
        if argument_prefix.is_empty() {
            return Err(ConfigurationError::EmptyArgumentPrefix);
        }
        if option_prefix.is_empty() {
            return Err(ConfigurationError::EmptyOptionPrefix);
        }

        Ok(Self {
            argument_prefix,
            option_prefix,
        })
    }

    /// Prefix introducing arguments (default `-`).
    pub fn argument_prefix(&self) -> &str {
        &self.argument_prefix
    }

    /// Prefix introducing options (default `--`).
    pub fn option_prefix(&self) -> &str {
        &self.option_prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_prefixes() {
        assert_eq!(
            Configuration::new("--", "--"),
            Err(ConfigurationError::SamePrefix)
        );
        assert_eq!(
            Configuration::new("", "--"),
            Err(ConfigurationError::EmptyArgumentPrefix)
        );
        assert_eq!(
            Configuration::new("-", ""),
            Err(ConfigurationError::EmptyOptionPrefix)
        );
    }

    #[test]
    fn test_custom_prefixes() {
        let config = Configuration::new("+", "++").unwrap();
        assert_eq!(config.argument_prefix(), "+");
        assert_eq!(config.option_prefix(), "++");
    }
}
