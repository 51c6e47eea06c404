use thiserror::Error;

/// Result type alias for operations of the engine.
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors raised on misuse of the engine.
///
/// An infeasible placement is never an error: it is reported as `None` by
/// [`Layout::check_placement`](crate::entities::Layout::check_placement) or as a zero bit in a
/// [`FeasibilityMask`](crate::mask::FeasibilityMask).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    /// Non-positive or mutually inconsistent dimensions.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A container, box or rotation index outside of its collection.
    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    /// Rotation code outside `0..=5`.
    #[error("invalid rotation code: {0}")]
    InvalidRotation(u8),

    /// The mask search budget was saturated, the mask may under-report feasible placements.
    #[error("mask search budget of {limit} set bits exhausted")]
    BudgetExceeded { limit: usize },
}

impl PackError {
    pub(crate) fn out_of_range(kind: &'static str, index: usize, len: usize) -> Self {
        PackError::IndexOutOfRange { kind, index, len }
    }
}
