use serde::{Deserialize, Serialize};

/// Coarse classification shared by every error the core can return.
///
/// Callers use this to decide how loudly to report a failure: validation
/// errors are shown to the user as an error notification, while `NotFound`
/// errors are harmless no-ops (for example, removing a line that is already
/// gone).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// User input does not satisfy a precondition.
    Validation,
    /// A lookup missed.
    NotFound,
    /// An external sink refused the hand-off.
    Unavailable,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not-found",
            Self::Unavailable => "unavailable",
        }
    }
}
