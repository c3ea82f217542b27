//! Hex grid: axial coordinates, their cartesian layout, and square extents.
//!
//! # Invariants
//! - Every integer `(q, r)` pair is a valid coordinate; conversion is total.
//! - Adjacent cells map to centers exactly one cell spacing apart.
//! - Extents enumerate each cell exactly once, row-major.

mod extent;
mod hex;
mod layout;

pub use extent::{MAX_WIDTH, SquareExtent};
pub use hex::{HexCoord, HexDirection};
pub use layout::{HexLayout, HexOrientation, LayoutError};

pub fn crate_info() -> &'static str {
    "hexworld-grid v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("grid"));
    }
}
