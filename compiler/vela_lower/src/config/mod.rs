//! Lowering configuration.

use thiserror::Error;
use vela_diagnostic::DiagnosticConfig;

use crate::abi::RUNTIME_ABI;

/// Environment variable overriding the diagnostic error limit.
pub const ERROR_LIMIT_VAR: &str = "VELA_ERROR_LIMIT";

/// Invalid lowering configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported runtime ABI {}.{}; this backend emits {}.{}", found.0, found.1, expected.0, expected.1)]
    UnsupportedAbi {
        found: (u16, u16),
        expected: (u16, u16),
    },

    #[error("invalid value `{value}` for {var}: expected a non-negative integer")]
    InvalidErrorLimit { var: &'static str, value: String },
}

/// Settings for one compilation's lowering.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LowerConfig {
    /// Runtime ABI the output links against.
    pub abi: (u16, u16),
    /// Lower `Integer` and `Float` to their small primitives by default.
    pub small_integers: bool,
    pub diagnostics: DiagnosticConfig,
}

impl Default for LowerConfig {
    fn default() -> Self {
        LowerConfig {
            abi: RUNTIME_ABI,
            small_integers: false,
            diagnostics: DiagnosticConfig::default(),
        }
    }
}

impl LowerConfig {
    /// Default settings with every diagnostic kept.
    pub fn for_tests() -> Self {
        LowerConfig {
            diagnostics: DiagnosticConfig::unlimited(),
            ..Self::default()
        }
    }

    /// Default settings, with the error limit taken from `VELA_ERROR_LIMIT`
    /// when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_error_limit(std::env::var(ERROR_LIMIT_VAR).ok().as_deref())
    }

    /// Apply an error limit given as text; `None` keeps the current limit.
    pub fn with_error_limit(mut self, limit: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(raw) = limit {
            let parsed = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidErrorLimit {
                    var: ERROR_LIMIT_VAR,
                    value: raw.to_string(),
                })?;
            self.diagnostics.error_limit = parsed;
        }
        Ok(self)
    }

    /// Check the settings against what this backend supports.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.abi != RUNTIME_ABI {
            return Err(ConfigError::UnsupportedAbi {
                found: self.abi,
                expected: RUNTIME_ABI,
            });
        }
        Ok(())
    }
}
