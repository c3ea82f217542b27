use crate::hex::HexCoord;
use glam::Vec2;
use serde::{Deserialize, Serialize};

const SQRT_3: f32 = 1.732_050_8;

/// Which way the hexagons point along the layout's `y` axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HexOrientation {
    /// Rows of cells run along `x`; `q` steps straight along `x`.
    #[default]
    PointyTop,
    /// Columns of cells run along `y`; `r` steps straight along `y`.
    FlatTop,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("cell spacing must be finite and positive, got {0}")]
    InvalidSpacing(f32),
}

/// Projection of axial coordinates onto the 2D plane.
///
/// `spacing` is the distance between the centers of adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HexLayout {
    orientation: HexOrientation,
    spacing: f32,
}

impl Default for HexLayout {
    fn default() -> Self {
        Self {
            orientation: HexOrientation::PointyTop,
            spacing: 1.0,
        }
    }
}

impl HexLayout {
    pub fn new(orientation: HexOrientation, spacing: f32) -> Result<Self, LayoutError> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(LayoutError::InvalidSpacing(spacing));
        }
        Ok(Self {
            orientation,
            spacing,
        })
    }

    pub fn orientation(&self) -> HexOrientation {
        self.orientation
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Circumradius of a hexagon that exactly fills one cell.
    pub fn cell_radius(&self) -> f32 {
        self.spacing / SQRT_3
    }

    /// Center of the cell in layout space.
    pub fn to_cartesian(&self, coord: HexCoord) -> Vec2 {
        let q = coord.q as f32;
        let r = coord.r as f32;
        let s = self.spacing;
        match self.orientation {
            HexOrientation::PointyTop => Vec2::new(s * (q + r * 0.5), s * (SQRT_3 * 0.5) * r),
            HexOrientation::FlatTop => Vec2::new(s * (SQRT_3 * 0.5) * q, s * (q * 0.5 + r)),
        }
    }

    /// The cell whose hexagon contains `point`.
    pub fn cell_at(&self, point: Vec2) -> HexCoord {
        let p = point / self.spacing;
        let (q, r) = match self.orientation {
            HexOrientation::PointyTop => {
                let r = p.y / (SQRT_3 * 0.5);
                (p.x - r * 0.5, r)
            }
            HexOrientation::FlatTop => {
                let q = p.x / (SQRT_3 * 0.5);
                (q, p.y - q * 0.5)
            }
        };
        round_axial(q, r)
    }
}

fn round_axial(q: f32, r: f32) -> HexCoord {
    let s = -q - r;
    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();
    let dq = (rq - q).abs();
    let dr = (rr - r).abs();
    let ds = (rs - s).abs();
    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }
    HexCoord::new(rq as i32, rr as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_neighbors_at_spacing(layout: HexLayout) {
        for q in -6..=6 {
            for r in -6..=6 {
                let c = HexCoord::new(q, r);
                let p = layout.to_cartesian(c);
                for n in c.neighbors() {
                    let d = p.distance(layout.to_cartesian(n));
                    assert!(
                        (d - layout.spacing()).abs() < 1e-4,
                        "{c} -> {n}: distance {d}"
                    );
                }
            }
        }
    }

    #[test]
    fn pointy_top_neighbors_are_one_spacing_apart() {
        assert_neighbors_at_spacing(HexLayout::default());
        assert_neighbors_at_spacing(HexLayout::new(HexOrientation::PointyTop, 2.5).unwrap());
    }

    #[test]
    fn flat_top_neighbors_are_one_spacing_apart() {
        assert_neighbors_at_spacing(HexLayout::new(HexOrientation::FlatTop, 1.0).unwrap());
        assert_neighbors_at_spacing(HexLayout::new(HexOrientation::FlatTop, 0.3).unwrap());
    }

    #[test]
    fn origin_maps_to_origin() {
        let layout = HexLayout::default();
        assert_eq!(layout.to_cartesian(HexCoord::ORIGIN), Vec2::ZERO);
    }

    #[test]
    fn non_neighbors_are_farther_than_spacing() {
        let layout = HexLayout::default();
        let a = layout.to_cartesian(HexCoord::new(0, 0));
        let b = layout.to_cartesian(HexCoord::new(2, -1));
        assert!(a.distance(b) > layout.spacing() + 0.1);
    }

    #[test]
    fn cell_at_recovers_centers() {
        for orientation in [HexOrientation::PointyTop, HexOrientation::FlatTop] {
            let layout = HexLayout::new(orientation, 1.5).unwrap();
            for q in -5..=5 {
                for r in -5..=5 {
                    let c = HexCoord::new(q, r);
                    let nudged = layout.to_cartesian(c) + Vec2::new(0.1, -0.1);
                    assert_eq!(layout.cell_at(nudged), c);
                }
            }
        }
    }

    #[test]
    fn rejects_bad_spacing() {
        assert!(HexLayout::new(HexOrientation::PointyTop, 0.0).is_err());
        assert!(HexLayout::new(HexOrientation::PointyTop, -1.0).is_err());
        assert!(HexLayout::new(HexOrientation::FlatTop, f32::NAN).is_err());
    }

    #[test]
    fn cell_radius_matches_spacing() {
        let layout = HexLayout::default();
        // Two inradii span one spacing.
        let inradius = layout.cell_radius() * SQRT_3 * 0.5;
        assert!((2.0 * inradius - layout.spacing()).abs() < 1e-6);
    }
}
