//! GUI errors. Every variant is raised before any state is touched.

use std::fmt;

use thiserror::Error;

/// Where an out-of-range access landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPosition {
    /// A `(row, col)` cell of a `width × height` component.
    Cell {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
    /// A flat index into `size` slots.
    Index { index: i64, size: usize },
}

impl fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotPosition::Cell {
                row,
                col,
                width,
                height,
            } => write!(f, "slot ({row}, {col}) is outside a {width}x{height} component"),
            SlotPosition::Index { index, size } => write!(f, "index {index} is outside 0..{size}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuiError {
    #[error("{0}")]
    OutOfBounds(SlotPosition),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Raised by an adapter when the host refuses an operation.
    #[error("adapter error: {0}")]
    Adapter(String),
}

impl GuiError {
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, GuiError::OutOfBounds(_))
    }
}
