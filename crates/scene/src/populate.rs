use hexworld_common::{ObjectId, Transform};
use hexworld_grid::{HexCoord, HexLayout, HexOrientation, SquareExtent};
use hexworld_terrain::HeightField;
use tracing::debug;

use crate::error::SceneError;
use crate::resources::{MaterialHandle, MeshHandle};
use crate::scene::Scene;

/// A grid cell and the object standing on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexCell {
    pub coord: HexCoord,
    pub object: ObjectId,
}

/// Rotation about world-up that lines a prism's flat sides up with its
/// neighbors. Prisms are built with a corner on `+x`.
pub fn prism_rotation_degrees(orientation: HexOrientation) -> f32 {
    match orientation {
        HexOrientation::PointyTop => 90.0,
        HexOrientation::FlatTop => 0.0,
    }
}

/// Add one object per cell of `extent`, placed at the cell's center and
/// lifted to the height field's elevation.
///
/// Layout `(x, y)` maps to world `(x, height, y)`.
pub fn populate_hex_world<H: HeightField + ?Sized>(
    scene: &mut Scene,
    extent: SquareExtent,
    layout: &HexLayout,
    heights: &H,
    mesh: MeshHandle,
    material: MaterialHandle,
) -> Result<Vec<HexCell>, SceneError> {
    let rotation = prism_rotation_degrees(layout.orientation());
    let mut cells = Vec::with_capacity(extent.len());
    for coord in extent.cells() {
        let p = layout.to_cartesian(coord);
        let position = glam::Vec3::new(p.x, heights.height(coord), p.y);
        let object = scene.add_object(mesh, material, Transform::new(position, rotation))?;
        cells.push(HexCell { coord, object });
    }
    debug!(
        width = extent.width(),
        cells = cells.len(),
        "populated hex world"
    );
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry;
    use crate::resources::Material;
    use glam::Vec3;
    use hexworld_terrain::{FlatHeightField, NoiseHeightField, TerrainConfig};
    use std::collections::HashSet;

    fn prepared_scene() -> (Scene, MeshHandle, MaterialHandle) {
        let mut scene = Scene::new();
        let mesh = scene
            .resources_mut()
            .add_mesh(geometry::hex_prism(0.5, 1.0, geometry::PRISM_COLOUR).unwrap());
        let material = scene
            .resources_mut()
            .add_material(Material::base_colour("base"));
        (scene, mesh, material)
    }

    #[test]
    fn n_by_n_extent_yields_n_squared_distinct_cells() {
        for n in [0u32, 1, 5, 16] {
            let (mut scene, mesh, material) = prepared_scene();
            let cells = populate_hex_world(
                &mut scene,
                SquareExtent::new(n),
                &HexLayout::default(),
                &FlatHeightField(0.0),
                mesh,
                material,
            )
            .unwrap();
            let coords: HashSet<_> = cells.iter().map(|c| c.coord).collect();
            let objects: HashSet<_> = cells.iter().map(|c| c.object).collect();
            assert_eq!(cells.len(), (n * n) as usize);
            assert_eq!(coords.len(), cells.len());
            assert_eq!(objects.len(), cells.len());
            assert_eq!(scene.object_count(), cells.len());
        }
    }

    #[test]
    fn objects_sit_on_cell_centers_at_terrain_height() {
        let (mut scene, mesh, material) = prepared_scene();
        let layout = HexLayout::default();
        let heights = NoiseHeightField::new(layout, &TerrainConfig::default()).unwrap();
        let cells = populate_hex_world(
            &mut scene,
            SquareExtent::new(6),
            &layout,
            &heights,
            mesh,
            material,
        )
        .unwrap();
        for cell in cells {
            let t = scene.object(cell.object).unwrap().transform;
            let p = layout.to_cartesian(cell.coord);
            assert_eq!(t.position, Vec3::new(p.x, heights.height(cell.coord), p.y));
            assert_eq!(t.rotation_degrees, 90.0);
        }
    }

    #[test]
    fn flat_top_prisms_are_not_rotated() {
        assert_eq!(prism_rotation_degrees(HexOrientation::FlatTop), 0.0);
    }

    #[test]
    fn unknown_mesh_aborts_population() {
        let (mut scene, _mesh, material) = prepared_scene();
        let result = populate_hex_world(
            &mut scene,
            SquareExtent::new(2),
            &HexLayout::default(),
            &FlatHeightField(0.0),
            MeshHandle(42),
            material,
        );
        assert!(matches!(result, Err(SceneError::UnknownMesh(_))));
    }
}
