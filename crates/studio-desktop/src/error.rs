//! Error types for the desktop workspace engine
//!
//! Every fallible engine operation reports one of these. None of them is
//! fatal: the failing operation leaves the item list untouched and all
//! other state valid.

use crate::types::ItemId;

/// Errors that can occur in desktop workspace operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopError {
    /// Item with the given ID was not found
    ItemNotFound(ItemId),

    /// Item exists but is not the kind of container the operation needs
    NotAContainer(ItemId),

    /// Input did not satisfy the operation (e.g. fewer than two images)
    Validation {
        /// The operation that was attempted
        op: &'static str,
        /// Why the input was rejected
        reason: &'static str,
    },

    /// Operation is not allowed in the current engine state
    Precondition {
        /// The operation that was attempted
        op: &'static str,
        /// Why the operation was refused
        reason: &'static str,
    },

    /// Another invocation of the same async operation is still running
    Busy {
        /// The operation class that is in flight
        op: &'static str,
    },

    /// An external collaborator reported a failure
    External {
        /// The operation that delegated to the collaborator
        op: &'static str,
        /// Collaborator message, verbatim
        message: String,
    },

    /// JSON serialization or deserialization failed
    SerializationError(String),
}

impl DesktopError {
    /// Whether the failure should be surfaced to the user as a notice
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            Self::Precondition { .. } | Self::External { .. } | Self::Busy { .. }
        )
    }
}

impl std::fmt::Display for DesktopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemNotFound(id) => write!(f, "item not found: {}", id),
            Self::NotAContainer(id) => write!(f, "item is not a container: {}", id),
            Self::Validation { op, reason } => {
                write!(f, "invalid input for '{}': {}", op, reason)
            }
            Self::Precondition { op, reason } => {
                write!(f, "cannot {} now: {}", op, reason)
            }
            Self::Busy { op } => write!(f, "{} already in progress", op),
            Self::External { op, message } => write!(f, "{} failed: {}", op, message),
            Self::SerializationError(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for DesktopError {}

/// Result type alias for desktop operations
pub type DesktopResult<T> = Result<T, DesktopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DesktopError::ItemNotFound("abc".to_string());
        assert_eq!(err.to_string(), "item not found: abc");

        let err = DesktopError::Validation {
            op: "create_stack",
            reason: "select at least two images",
        };
        assert_eq!(
            err.to_string(),
            "invalid input for 'create_stack': select at least two images"
        );

        let err = DesktopError::Precondition {
            op: "reorganize layout",
            reason: "close the open folder first",
        };
        assert_eq!(
            err.to_string(),
            "cannot reorganize layout now: close the open folder first"
        );

        let err = DesktopError::External {
            op: "merge images",
            message: "backend offline".to_string(),
        };
        assert_eq!(err.to_string(), "merge images failed: backend offline");
    }

    #[test]
    fn test_error_visibility() {
        assert!(!DesktopError::Validation { op: "paste", reason: "clipboard is empty" }
            .is_user_visible());
        assert!(DesktopError::Busy { op: "merge images" }.is_user_visible());
        assert!(!DesktopError::ItemNotFound("x".to_string()).is_user_visible());
    }

    #[test]
    fn test_error_equality() {
        let err1 = DesktopError::ItemNotFound("a".to_string());
        let err2 = DesktopError::ItemNotFound("a".to_string());
        let err3 = DesktopError::ItemNotFound("b".to_string());

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }
}
