//! Error types for unigrid-layout.

use thiserror::Error;

/// Errors raised at the boundary between a host and the layout.
///
/// The layout arithmetic itself cannot fail; these cover configuration
/// arriving in signed form and the shared-container lock.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A gap or inset was negative.
    #[error("{field} must not be negative (got {value})")]
    Negative {
        /// Name of the offending setting
        field: &'static str,
        /// The rejected value
        value: i64,
    },

    /// Another thread panicked while holding the container lock.
    #[error("container tree lock poisoned")]
    TreeLockPoisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_error_display() {
        let err = LayoutError::Negative {
            field: "left",
            value: -3,
        };
        assert_eq!(err.to_string(), "left must not be negative (got -3)");
        assert_eq!(
            LayoutError::TreeLockPoisoned.to_string(),
            "container tree lock poisoned"
        );
    }
}
