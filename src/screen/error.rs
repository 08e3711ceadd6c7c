use crate::validation::ValidationError;
use thiserror::Error;

/// Why a screen refused a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenError {
    /// The record failed client-side validation; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// A call is already in flight.
    #[error("busy")]
    Busy,

    /// The record being edited has never been saved.
    #[error("missing id")]
    MissingId,

    #[error("no form is open")]
    NoForm,

    #[error("no delete is awaiting confirmation")]
    NothingToConfirm,

    /// The screen task has stopped.
    #[error("screen closed")]
    Closed,
}
