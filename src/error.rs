//! Error types and handling for the AQI dashboard

use thiserror::Error;

/// Main error type for the AQI dashboard
#[derive(Error, Debug)]
pub enum AqiError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Model artifact could not be read or is malformed
    #[error("Model load error: {message}")]
    ModelLoad { message: String },

    /// Model artifact expects a different input schema than the record assembler produces
    #[error("Schema mismatch: model expects {model:?}, record provides {record:?}")]
    SchemaMismatch {
        record: Vec<String>,
        model: Vec<String>,
    },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Model produced an unusable prediction
    #[error("Prediction error: {message}")]
    Prediction { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl AqiError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new model load error
    pub fn model_load<S: Into<String>>(message: S) -> Self {
        Self::ModelLoad {
            message: message.into(),
        }
    }

    /// Create a new schema mismatch error
    pub fn schema_mismatch<R, M>(record: R, model: M) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Self::SchemaMismatch {
            record: record.into_iter().map(Into::into).collect(),
            model: model.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new prediction error
    pub fn prediction<S: Into<String>>(message: S) -> Self {
        Self::Prediction {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AqiError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            AqiError::ModelLoad { .. } => {
                "The prediction model could not be loaded. Please check the model path.".to_string()
            }
            AqiError::SchemaMismatch { .. } => {
                "The prediction model was trained on a different set of inputs.".to_string()
            }
            AqiError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            AqiError::Prediction { .. } => {
                "The model could not produce a prediction for these inputs.".to_string()
            }
            AqiError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
