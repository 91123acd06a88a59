//! Error types for Ember

use thiserror::Error;

/// The main error type for Ember operations
#[derive(Debug, Error)]
pub enum EmberError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid field type: expected {expected}, got {got}")]
    InvalidFieldType { expected: String, got: String },

    #[error("Invalid enum value: {value} is not one of {allowed:?}")]
    InvalidEnumValue {
        value: String,
        allowed: Vec<String>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Surface error: {0}")]
    SurfaceError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

/// Result type alias for Ember operations
pub type Result<T> = std::result::Result<T, EmberError>;

impl From<toml::de::Error> for EmberError {
    fn from(err: toml::de::Error) -> Self {
        EmberError::TomlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_errors_convert() {
        let err: EmberError = toml::from_str::<toml::Value>("a = ").unwrap_err().into();
        assert!(matches!(err, EmberError::TomlParseError(_)));
    }

    #[test]
    fn enum_error_lists_allowed_values() {
        let err = EmberError::InvalidEnumValue {
            value: "spiral".into(),
            allowed: vec!["random".into(), "radial".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("spiral"));
        assert!(msg.contains("radial"));
    }
}
