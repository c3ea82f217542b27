use glam::Vec3;

use crate::mesh::{MeshData, MeshError};

pub const GROUND_HALF_SIZE: f32 = 100.0;
pub const GROUND_LEVEL: f32 = -2.0;
pub const GROUND_COLOUR: Vec3 = Vec3::ONE;
pub const PRISM_COLOUR: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// A white square at [`GROUND_LEVEL`], facing up.
pub fn ground_plane() -> Result<MeshData, MeshError> {
    let h = GROUND_HALF_SIZE;
    let positions = vec![
        Vec3::new(-h, GROUND_LEVEL, -h),
        Vec3::new(-h, GROUND_LEVEL, h),
        Vec3::new(h, GROUND_LEVEL, -h),
        Vec3::new(h, GROUND_LEVEL, h),
    ];
    let count = positions.len();
    MeshData::new(
        "ground-plane",
        positions,
        vec![GROUND_COLOUR; count],
        vec![Vec3::Y; count],
        vec![0, 1, 2, 1, 3, 2],
    )
}

/// A hexagonal column whose top face sits at `y = 0` and extends `depth` down.
///
/// Corners lie at `radius` from the axis, one of them on `+x`. The ring runs
/// clockwise seen from above so faces wind counter-clockwise from outside.
pub fn hex_prism(radius: f32, depth: f32, colour: Vec3) -> Result<MeshData, MeshError> {
    // 0: top centre, 1..=6: top ring, 7: bottom centre, 8..=13: bottom ring.
    let mut positions = Vec::with_capacity(14);
    for y in [0.0, -depth] {
        positions.push(Vec3::new(0.0, y, 0.0));
        for k in 0..6 {
            let angle = (60.0 - 60.0 * k as f32).to_radians();
            positions.push(Vec3::new(radius * angle.cos(), y, radius * angle.sin()));
        }
    }

    let top = |k: u32| 1 + k % 6;
    let bottom = |k: u32| 8 + k % 6;
    let mut indices = Vec::with_capacity(24 * 3);
    for k in 0..6 {
        indices.extend_from_slice(&[0, top(k), top(k + 1)]);
    }
    for k in 0..6 {
        indices.extend_from_slice(&[top(k + 1), top(k), bottom(k)]);
        indices.extend_from_slice(&[top(k + 1), bottom(k), bottom(k + 1)]);
    }
    for k in 0..6 {
        indices.extend_from_slice(&[bottom(k + 1), bottom(k), 7]);
    }

    MeshData::flat_shaded("hex-prism", &positions, &indices, colour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_plane_faces_up() {
        let plane = ground_plane().unwrap();
        assert_eq!(plane.vertex_count(), 4);
        assert_eq!(plane.triangle_count(), 2);
        for [a, b, c] in plane.triangles() {
            let n = crate::mesh::face_normal(a, b, c);
            assert!((n - Vec3::Y).length() < 1e-6);
        }
        assert!(plane.positions().iter().all(|p| p.y == GROUND_LEVEL));
    }

    #[test]
    fn prism_has_top_sides_and_bottom() {
        let prism = hex_prism(1.0, 100.0, PRISM_COLOUR).unwrap();
        assert_eq!(prism.triangle_count(), 24);
        let normals = prism.normals();
        let ups = normals.iter().filter(|n| (**n - Vec3::Y).length() < 1e-5).count();
        let downs = normals.iter().filter(|n| (**n + Vec3::Y).length() < 1e-5).count();
        let sides = normals.iter().filter(|n| n.y.abs() < 1e-5).count();
        assert_eq!(ups, 6 * 3);
        assert_eq!(downs, 6 * 3);
        assert_eq!(sides, 12 * 3);
    }

    #[test]
    fn prism_side_normals_point_outward() {
        let prism = hex_prism(0.5, 3.0, PRISM_COLOUR).unwrap();
        for (tri, normals) in prism.triangles().zip(prism.normals().chunks_exact(3)) {
            let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
            let n = normals[0];
            if n.y.abs() < 1e-5 {
                let outward = Vec3::new(centroid.x, 0.0, centroid.z);
                assert!(n.dot(outward) > 0.0, "inward side normal {n}");
            }
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn prism_spans_requested_depth_and_radius() {
        let prism = hex_prism(2.0, 7.5, PRISM_COLOUR).unwrap();
        let min_y = prism.positions().iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = prism.positions().iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(max_y, 0.0);
        assert_eq!(min_y, -7.5);
        let max_r = prism
            .positions()
            .iter()
            .map(|p| Vec3::new(p.x, 0.0, p.z).length())
            .fold(0.0, f32::max);
        assert!((max_r - 2.0).abs() < 1e-5);
        assert!(prism.colours().iter().all(|c| *c == PRISM_COLOUR));
    }
}
