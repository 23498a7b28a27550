//! Error types reported by the tiling solvers.

use std::fmt;

/// Errors that stop a tiling solve before or during the search.
///
/// An exhausted search is not an error: the solvers return `Ok(None)` when no
/// tiling exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TilingError {
    /// The board area is zero or not a multiple of the shape family's cell
    /// area, so no exact tiling can exist.
    InvalidDimensions {
        /// Board width in cells.
        width: usize,
        /// Board height in cells.
        height: usize,
        /// Cell area shared by every shape in the catalog.
        cell_area: usize,
    },
    /// An instance names a shape the catalog does not know.
    UnknownShape(char),
    /// The configured step limit was reached. All search state was unwound
    /// before returning.
    StepLimitExceeded {
        /// Number of steps taken when the limit tripped.
        steps: u64,
    },
}

impl fmt::Display for TilingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions {
                width,
                height,
                cell_area,
            } => match width.checked_mul(*height) {
                Some(cells) => write!(
                    f,
                    "Board {width}x{height} has {cells} cells, which is not a positive multiple of {cell_area}"
                ),
                None => write!(f, "Board {width}x{height} has more cells than can be counted"),
            },
            Self::UnknownShape(shape) => write!(f, "Unknown shape [{shape}]"),
            Self::StepLimitExceeded { steps } => {
                write!(f, "Search stopped after reaching the step limit of {steps}")
            }
        }
    }
}

impl std::error::Error for TilingError {}

/// Reasons a placement was rejected by [`Board::place`].
///
/// The search treats both as ordinary control flow: the candidate is skipped
/// and the next one is tried.
///
/// [`Board::place`]: crate::board::Board::place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    /// Some cell of the footprint falls outside the board.
    OutOfBounds,
    /// A footprint cell is already owned by another shape.
    Overlap {
        /// Row of the first conflicting cell.
        row: usize,
        /// Column of the first conflicting cell.
        column: usize,
    },
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "Placement extends past the board edge"),
            Self::Overlap { row, column } => {
                write!(f, "Placement overlaps an occupied cell at [{row},{column}]")
            }
        }
    }
}

impl std::error::Error for PlaceError {}
