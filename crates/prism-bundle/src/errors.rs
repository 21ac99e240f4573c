//! Error types for PRISM path-bundle coloring.

use thiserror::Error;

/// Unified error type for all bundle coloring operations.
///
/// Construction errors are irrecoverable: no partial coloring is returned.
#[derive(Error, Debug)]
pub enum BundleError {
    /// The base fiber has no vertices.
    #[error("Fiber graph cannot be empty.")]
    EmptyFiberGraph,

    /// Fewer than `n` palette colors remain for the join between two fibers.
    #[error(
        "Insufficient colors for join edges between F_{} and F_{}: {available} available, {required} required",
        .fiber_index.saturating_sub(1),
        .fiber_index
    )]
    InsufficientJoinColors {
        /// Index `i` of the lower fiber in the failing pair `(i-1, i)`
        fiber_index: usize,
        /// Colors left in the global palette after removing boundary vertex colors
        available: usize,
        /// Colors needed (one per perfect matching)
        required: usize,
    },

    /// Malformed graph or coloring input
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// I/O errors while reading input files
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl BundleError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        BundleError::ValidationError(message.into())
    }

    /// Creates an insufficient-join-colors error for the pair `(fiber_index - 1, fiber_index)`.
    pub fn insufficient_join_colors(fiber_index: usize, available: usize, required: usize) -> Self {
        BundleError::InsufficientJoinColors {
            fiber_index,
            available,
            required,
        }
    }

    /// Returns a user-friendly error message with actionable guidance.
    pub fn user_message(&self) -> String {
        match self {
            BundleError::EmptyFiberGraph => format!(
                "{}\n\
                 → The fiber graph must declare at least one vertex.",
                self
            ),
            BundleError::InsufficientJoinColors { .. } => format!(
                "{}\n\
                 → Check that the coloring belongs to the given fiber graph.\n\
                 → A coloring with many distinct vertex colors can exhaust the Δ(G)+1 palette.",
                self
            ),
            BundleError::ValidationError(msg) => format!(
                "Validation error: {}\n\
                 → Verify the DIMACS graph and coloring file formats (vertices are 1-indexed).",
                msg
            ),
            _ => self.to_string(),
        }
    }
}

/// Result type alias for bundle operations.
pub type Result<T> = std::result::Result<T, BundleError>;
