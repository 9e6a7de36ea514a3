//! Error type for big-integer operations.

use apint_memory::AllocError;

/// Error type for `ApInt` construction, lifecycle, and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApIntError {
    /// The backing allocator could not satisfy a request, or a zero-limb
    /// buffer was asked for. The destination of the failed operation is
    /// left in its prior state.
    #[error("out of memory: {0}")]
    OutOfMemory(#[from] AllocError),

    /// An operand holds no value: it was never written, or was already
    /// released.
    #[error("operand is uninitialized")]
    Uninitialized,

    /// `grow` was asked for a capacity that does not exceed the current one.
    #[error("grow to {requested} limbs does not exceed current capacity {current}")]
    InvalidGrow {
        /// Capacity the value already has.
        current: usize,
        /// Capacity that was requested.
        requested: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApIntError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = ApIntError::OutOfMemory(AllocError::new(8));
        assert_eq!(err.to_string(), "out of memory: allocation of 8 limbs failed");

        let err = ApIntError::InvalidGrow {
            current: 4,
            requested: 4,
        };
        assert_eq!(
            err.to_string(),
            "grow to 4 limbs does not exceed current capacity 4"
        );
    }
}
