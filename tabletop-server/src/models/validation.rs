//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `sort_by` is not one of the sortable review columns
    SortColumn { value: String },

    /// `order` is neither `ASC` nor `DESC`
    SortOrder { value: String },

    /// A required field was absent or null
    MissingField { field: &'static str },

    /// Value could not be parsed into the expected shape (e.g. a non-numeric id)
    Malformed { field: &'static str, reason: &'static str },
}

impl ValidationError {
    /// Message shown to API clients.
    ///
    /// Deliberately fixed per variant: the offending value is logged, never echoed.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::SortColumn { .. } => "Cannot sort by that column",
            Self::SortOrder { .. } => "Cannot sort in that order",
            Self::MissingField { .. } => "Missing an essential element of comment",
            Self::Malformed { .. } => "Bad Request",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SortColumn { value } => write!(f, "cannot sort by column '{}'", value),
            Self::SortOrder { value } => write!(f, "cannot sort in order '{}'", value),
            Self::MissingField { field } => write!(f, "{} is required", field),
            Self::Malformed { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}
