use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FinanceError {
    #[error("Please enter a valid number in every field (got {raw:?}).")]
    InvalidNumber { raw: String },

    #[error("{value} is out of range {}.", Bounds(*min, *max))]
    OutOfRange {
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },

    #[error("Invalid calculation request: {0}")]
    Domain(String),

    #[error("Missing input field: {0}")]
    MissingField(String),

    #[error("Date error: {0}")]
    InvalidDate(String),
}

impl FinanceError {
    /// True for failures the user can fix by correcting a field.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FinanceError::InvalidNumber { .. }
                | FinanceError::OutOfRange { .. }
                | FinanceError::MissingField(_)
        )
    }
}

struct Bounds(Option<f64>, Option<f64>);

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.0, self.1) {
            (Some(min), Some(max)) => write!(f, "[{}, {}]", min, max),
            (Some(min), None) => write!(f, "(must not be less than {})", min),
            (None, Some(max)) => write!(f, "(must not be greater than {})", max),
            (None, None) => write!(f, "(unbounded)"),
        }
    }
}

pub type Result<T> = std::result::Result<T, FinanceError>;
