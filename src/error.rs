use thiserror::Error;

/// Errors reported by the simulation core.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimError {
    /// A cell coordinate fell outside the `size x size` grid.
    #[error("cell ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfRange { row: usize, col: usize, size: usize },

    /// A setting or command parameter was rejected before being applied.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
