//! Error type shared by every fallible operation in the crate.

/// Failure raised by buffer growth or token lookup.
///
/// Only resource conditions and contract violations live here. Input that
/// the scanner cannot classify is reported in-band as an
/// [`Invalid`](crate::TokenKind::Invalid) token instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// Backing storage could not be obtained or grown.
    #[error("failed to allocate storage for {requested} elements")]
    AllocationFailure { requested: usize },

    /// The requested capacity is not representable for the element type.
    #[error("capacity {requested} exceeds the maximum of {max} elements")]
    CapacityOverflow { requested: usize, max: usize },

    /// A token index past the end of the stream.
    #[error("token index {index} out of range for stream of {len} tokens")]
    IndexOutOfRange { index: usize, len: usize },
}

impl LexError {
    /// Returns `true` for the conditions that mean "cannot proceed":
    /// allocation failure and capacity overflow.
    pub fn is_resource_exhaustion(&self) -> bool {
        matches!(
            self,
            LexError::AllocationFailure { .. } | LexError::CapacityOverflow { .. }
        )
    }
}
