//! Grid error types.

use thiserror::Error;

/// Coarse classification of a [`GridError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Coordinates outside a grid's current capacity
    OutOfBounds,
    /// Coordinates inside capacity but transparent; an expected state
    NotRendered,
    /// Malformed constructor or operation input
    InvalidArgument,
    /// A layer handle that the compositor does not hold
    LayerNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid does not contain coordinates {x}, {y}")]
    OutOfBounds { x: i32, y: i32 },
    #[error("grid is not rendered at {x}, {y}")]
    NotRendered { x: i32, y: i32 },
    #[error("row {row} has length {found}, expected {expected}")]
    NonUniformRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("mask source contains `{ch}` at position {position}; only '0' and '1' are allowed")]
    InvalidMaskChar { ch: char, position: usize },
    #[error("source has {found} cells, expected at least {expected}")]
    SourceTooShort { expected: usize, found: usize },
    #[error("required {0} argument is missing")]
    MissingArgument(&'static str),
    #[error("{0:#06b} is not a merge mode")]
    UnknownMergeMode(u8),
    #[error("frame {index} is outside the {count} frames held")]
    FrameOutOfRange { index: i32, count: usize },
    #[error("current frame {current} is greater than the number of frames ({count})")]
    InvalidCurrentFrame { current: usize, count: usize },
    #[error("layer index {index} is greater than the layer list size ({len})")]
    LayerIndexOutOfRange { index: usize, len: usize },
    #[error("layer list does not contain this layer")]
    LayerNotFound,
}

impl GridError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GridError::OutOfBounds { .. }
            | GridError::FrameOutOfRange { .. }
            | GridError::LayerIndexOutOfRange { .. } => ErrorKind::OutOfBounds,
            GridError::NotRendered { .. } => ErrorKind::NotRendered,
            GridError::NonUniformRows { .. }
            | GridError::InvalidMaskChar { .. }
            | GridError::SourceTooShort { .. }
            | GridError::MissingArgument(_)
            | GridError::UnknownMergeMode(_)
            | GridError::InvalidCurrentFrame { .. } => ErrorKind::InvalidArgument,
            GridError::LayerNotFound => ErrorKind::LayerNotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_group_variants() {
        assert_eq!(GridError::OutOfBounds { x: 1, y: 2 }.kind(), ErrorKind::OutOfBounds);
        assert_eq!(
            GridError::FrameOutOfRange { index: 4, count: 2 }.kind(),
            ErrorKind::OutOfBounds
        );
        assert_eq!(GridError::NotRendered { x: 0, y: 0 }.kind(), ErrorKind::NotRendered);
        assert_eq!(GridError::UnknownMergeMode(3).kind(), ErrorKind::InvalidArgument);
        assert_eq!(GridError::MissingArgument("alpha").kind(), ErrorKind::InvalidArgument);
        assert_eq!(GridError::LayerNotFound.kind(), ErrorKind::LayerNotFound);
    }

    #[test]
    fn messages_name_coordinates() {
        let err = GridError::OutOfBounds { x: -1, y: 7 };
        assert_eq!(err.to_string(), "grid does not contain coordinates -1, 7");
        assert_eq!(
            GridError::UnknownMergeMode(0b0101).to_string(),
            "0b0101 is not a merge mode"
        );
    }
}
