use shared::{
    domain::{ControlId, ViewId},
    error::{ApiError, ErrorCode},
};
use thiserror::Error;

/// Rejected control change. The session state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("control '{0}' is not registered")]
    Unregistered(ControlId),
    #[error("control '{control}' expects a {expected} value, got {actual}")]
    WrongKind {
        control: ControlId,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("'{value}' is not an option of control '{control}'")]
    NotAnOption { control: ControlId, value: String },
    #[error("range ({start}, {end}) of control '{control}' must satisfy {min} <= start <= end <= {max}")]
    OutOfRange {
        control: ControlId,
        start: i32,
        end: i32,
        min: i32,
        max: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("view '{0}' is not registered")]
    UnknownView(ViewId),
    #[error("control '{0}' has no value of the expected kind")]
    MissingControl(ControlId),
    #[error("no billionaires match the current selection")]
    EmptySelection,
}

impl From<ControlError> for ApiError {
    fn from(value: ControlError) -> Self {
        ApiError::new(ErrorCode::Validation, value.to_string())
    }
}

impl From<ViewError> for ApiError {
    fn from(value: ViewError) -> Self {
        ApiError::new(ErrorCode::RenderFailed, value.to_string())
    }
}
