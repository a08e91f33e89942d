use thiserror::Error;

/// Failures raised by the availability and fee engine.
///
/// Every engine function is pure, so none of these are transient: the caller
/// either fixes its input or surfaces the error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("Invalid input: {0}")]
    InputValidation(String),
    #[error("Unavailable: {0}")]
    Unavailable(String),
}

impl EngineError {
    pub fn config(msg: impl Into<String>) -> Self {
        EngineError::Configuration(msg.into())
    }

    pub fn input(msg: impl Into<String>) -> Self {
        EngineError::InputValidation(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        EngineError::Unavailable(msg.into())
    }
}
