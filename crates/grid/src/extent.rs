use crate::hex::HexCoord;
use serde::{Deserialize, Serialize};

/// Widest supported extent; larger widths are clamped so coordinates stay in
/// `i32` range and `len` matches what `cells` yields.
pub const MAX_WIDTH: u32 = 1 << 15;

/// A `width × width` block of axial coordinates centered on the origin.
///
/// Both axes run over `i - width / 2` for `i in 0..width`, so an even width
/// extends one cell further on the negative side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareExtent {
    width: u32,
}

impl SquareExtent {
    pub fn new(width: u32) -> Self {
        Self {
            width: width.min(MAX_WIDTH),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of cells in the extent.
    pub fn len(&self) -> usize {
        let w = self.width as usize;
        w * w
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0
    }

    /// Smallest coordinate on either axis.
    pub fn min(&self) -> i32 {
        -((self.width / 2) as i32)
    }

    /// Largest coordinate on either axis. Meaningless for an empty extent.
    pub fn max(&self) -> i32 {
        self.min() + self.width as i32 - 1
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        !self.is_empty()
            && (self.min()..=self.max()).contains(&coord.q)
            && (self.min()..=self.max()).contains(&coord.r)
    }

    /// Every cell, `q` outer and `r` inner.
    pub fn cells(&self) -> impl Iterator<Item = HexCoord> + use<> {
        let min = self.min();
        let width = self.width as i32;
        (0..width).flat_map(move |i| (0..width).map(move |j| HexCoord::new(min + i, min + j)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn visits_every_cell_once() {
        for n in [0u32, 1, 2, 7, 10] {
            let extent = SquareExtent::new(n);
            let cells: Vec<_> = extent.cells().collect();
            let unique: HashSet<_> = cells.iter().copied().collect();
            assert_eq!(cells.len(), (n * n) as usize);
            assert_eq!(unique.len(), cells.len());
            assert_eq!(extent.len(), cells.len());
            assert!(cells.iter().all(|c| extent.contains(*c)));
        }
    }

    #[test]
    fn centered_bounds() {
        let even = SquareExtent::new(100);
        assert_eq!((even.min(), even.max()), (-50, 49));
        let odd = SquareExtent::new(3);
        assert_eq!((odd.min(), odd.max()), (-1, 1));
    }

    #[test]
    fn row_major_order() {
        let cells: Vec<_> = SquareExtent::new(2).cells().collect();
        assert_eq!(
            cells,
            vec![
                HexCoord::new(-1, -1),
                HexCoord::new(-1, 0),
                HexCoord::new(0, -1),
                HexCoord::new(0, 0),
            ]
        );
    }

    #[test]
    fn oversized_width_is_clamped() {
        let extent = SquareExtent::new(u32::MAX);
        assert_eq!(extent.width(), MAX_WIDTH);
        assert_eq!(extent.len(), (MAX_WIDTH as usize).pow(2));
        assert!(extent.min() < 0 && extent.max() > 0);
        assert_eq!(extent.cells().next(), Some(HexCoord::new(extent.min(), extent.min())));
    }

    #[test]
    fn empty_extent_contains_nothing() {
        let extent = SquareExtent::new(0);
        assert!(extent.is_empty());
        assert!(!extent.contains(HexCoord::ORIGIN));
        assert_eq!(extent.cells().count(), 0);
    }
}
