use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

/// One rejected form field with the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("invalid payload for dataset `{dataset}`: {reason}")]
    InvalidPayload { dataset: String, reason: String },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid form input: {}", format_field_errors(.errors))]
    InvalidForm { errors: Vec<FieldError> },
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
