//! Grid algebra module - pure, allocation-light, and testable
//!
//! This crate contains the grid primitives every other part of the workspace
//! builds on. It has **no** dependency on terminals, timing or input, making it:
//!
//! - **Deterministic**: every operation is a synchronous pass over in-memory cells
//! - **Testable**: each invariant is covered by unit and integration tests
//! - **Portable**: usable headless, inside a terminal host, or in benchmarks
//!
//! # Module Structure
//!
//! - [`mask`]: offset boolean grids with six merge modes and overlap computation
//! - [`char_grid`]: character grids with an independently offset alpha mask
//! - [`renderable`]: the capability compositors and hosts read grids through
//! - [`error`]: [`GridError`] and its coarse [`ErrorKind`]
//!
//! # Storage Semantics
//!
//! Grids are deliberately not `Clone`. Callers state intent:
//!
//! - `adopt(&source)` shares storage, so later cell writes alias
//! - `copy_from(&source)` / `duplicate()` copy storage, so grids stay independent
//!
//! # Example
//!
//! ```
//! use tui_charmap_core::{CharGrid, ErrorKind, MaskGrid};
//!
//! let alpha = MaskGrid::from_bits(3, 1, "101").unwrap();
//! let grid = CharGrid::from_text_with_alpha(3, 1, Some("abc"), Some(alpha)).unwrap();
//!
//! assert_eq!(grid.get(0, 0), Ok('a'));
//! assert_eq!(grid.get(1, 0).unwrap_err().kind(), ErrorKind::NotRendered);
//! assert_eq!(grid.get(5, 0).unwrap_err().kind(), ErrorKind::OutOfBounds);
//! assert_eq!(grid.dump_rendered(None), "a c");
//! ```

pub mod char_grid;
pub mod error;
pub mod mask;
pub mod renderable;
mod storage;

pub use tui_charmap_types as types;

// Re-export commonly used types for convenience
pub use char_grid::CharGrid;
pub use error::{ErrorKind, GridError};
pub use mask::MaskGrid;
pub use renderable::{layer, LayerRef, Renderable};
