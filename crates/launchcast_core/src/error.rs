use std::fmt;

/// Errors raised while validating or evaluating a launch scenario
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// A scenario field is malformed or outside its contract
    InvalidParameter { field: &'static str, reason: String },
}

impl ScenarioError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ScenarioError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ScenarioError::InvalidParameter { field, .. } => field,
        }
    }
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::InvalidParameter { field, reason } => {
                write!(f, "invalid parameter `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ScenarioError {}

pub type Result<T> = std::result::Result<T, ScenarioError>;
