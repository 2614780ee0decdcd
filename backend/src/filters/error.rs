/// Broad category of a failure, independent of any transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Decode,
    Parameter,
    Processing,
}

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Processing error: {0}")]
    Processing(String),
}

impl FilterError {
    pub fn invalid(name: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        FilterError::InvalidParameter {
            name,
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::InvalidParameter { .. } => ErrorKind::Parameter,
            FilterError::Processing(_) => ErrorKind::Processing,
        }
    }
}
