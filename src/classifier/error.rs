use ort::Error as OrtError;
use std::fmt;

/// Represents the different types of errors that can occur in the calorie classifier.
#[derive(Debug)]
pub enum ClassifierError {
    /// The vocabulary is unusable (e.g. missing OOV entry); raised at load time, fatal
    ConfigurationError(String),
    /// The model returned a malformed confidence batch; raised per classification call
    ModelInvocationError(String),
    /// Error occurred during the build phase
    BuildError(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            Self::ModelInvocationError(msg) => write!(f, "Model invocation error: {}", msg),
            Self::BuildError(msg) => write!(f, "Build error: {}", msg),
        }
    }
}

impl std::error::Error for ClassifierError {}

impl From<OrtError> for ClassifierError {
    fn from(err: OrtError) -> Self {
        ClassifierError::BuildError(err.to_string())
    }
}
