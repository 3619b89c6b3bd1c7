//! Error types for tradeweb-config

use std::fmt;
use thiserror::Error;

/// Stable identifier for each kind of configuration failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorCode {
    FileNotFound,
    ReadFailed,
    InvalidYaml,
    MissingField,
    InvalidValue,
}

impl ConfigErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ConfigErrorCode::ReadFailed => "READ_FAILED",
            ConfigErrorCode::InvalidYaml => "INVALID_YAML",
            ConfigErrorCode::MissingField => "MISSING_FIELD",
            ConfigErrorCode::InvalidValue => "INVALID_VALUE",
        }
    }
}

impl fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Could not read {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Invalid YAML: {message}")]
    InvalidYaml { message: String },

    #[error("Missing value for {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    pub fn code(&self) -> ConfigErrorCode {
        match self {
            ConfigError::FileNotFound { .. } => ConfigErrorCode::FileNotFound,
            ConfigError::ReadFailed { .. } => ConfigErrorCode::ReadFailed,
            ConfigError::InvalidYaml { .. } => ConfigErrorCode::InvalidYaml,
            ConfigError::MissingField { .. } => ConfigErrorCode::MissingField,
            ConfigError::InvalidValue { .. } => ConfigErrorCode::InvalidValue,
        }
    }

    /// Dotted config key the error is about, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::MissingField { field } | ConfigError::InvalidValue { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }

    /// What the operator can do about it
    pub fn hints(&self) -> Vec<String> {
        match self {
            ConfigError::FileNotFound { .. } => vec![
                "Pass --config with the path of your config file.".to_string(),
                "Run with --print-default-config to get a starting file.".to_string(),
            ],
            ConfigError::ReadFailed { .. } => {
                vec!["Check that the path is a readable file.".to_string()]
            }
            ConfigError::InvalidYaml { .. } => {
                vec!["Compare the file against --print-default-config.".to_string()]
            }
            ConfigError::MissingField { field } => {
                vec![format!("Set '{}' to a non-empty value.", field)]
            }
            ConfigError::InvalidValue { .. } => vec![],
        }
    }

    /// Everything printed when startup fails
    pub fn to_details(&self) -> ConfigErrorDetails {
        ConfigErrorDetails {
            code: self.code(),
            message: self.to_string(),
            field: self.field().map(str::to_string),
            hints: self.hints(),
        }
    }
}

/// Startup report for a configuration failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigErrorDetails {
    pub code: ConfigErrorCode,
    pub message: String,
    pub field: Option<String>,
    pub hints: Vec<String>,
}

impl fmt::Display for ConfigErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(field) = &self.field {
            write!(f, "\n  key: {}", field)?;
        }
        for hint in &self.hints {
            write!(f, "\n  hint: {}", hint)?;
        }
        Ok(())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
