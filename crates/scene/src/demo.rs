use glam::Vec3;
use hexworld_common::{ObjectId, Transform};
use hexworld_grid::{HexLayout, HexOrientation, LayoutError, SquareExtent};
use hexworld_terrain::HeightField;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::camera::Camera;
use crate::error::SceneError;
use crate::geometry;
use crate::lighting::LightingSetup;
use crate::populate::{HexCell, populate_hex_world};
use crate::resources::Material;
use crate::scene::Scene;

pub const GROUND_OFFSET: Vec3 = Vec3::new(-2.0, 0.0, 0.0);

/// Largest grid side `build_demo_scene` accepts.
pub const MAX_EXTENT: u32 = 1024;

/// Shape of the tiled hex world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexWorldSettings {
    /// Cells per side of the square extent.
    pub extent: u32,
    pub spacing: f32,
    pub orientation: HexOrientation,
    /// Prism circumradius; defaults to the radius that tiles without gaps.
    pub prism_radius: Option<f32>,
    pub prism_depth: f32,
}

impl Default for HexWorldSettings {
    fn default() -> Self {
        Self {
            extent: 100,
            spacing: 1.0,
            orientation: HexOrientation::PointyTop,
            prism_radius: None,
            prism_depth: 100.0,
        }
    }
}

impl HexWorldSettings {
    pub fn layout(&self) -> Result<HexLayout, LayoutError> {
        HexLayout::new(self.orientation, self.spacing)
    }

    pub fn square_extent(&self) -> SquareExtent {
        SquareExtent::new(self.extent)
    }
}

/// The assembled demo: ground plane first, then one prism per cell.
#[derive(Debug)]
pub struct DemoScene {
    pub scene: Scene,
    pub layout: HexLayout,
    pub ground: ObjectId,
    pub cells: Vec<HexCell>,
}

pub fn build_demo_scene<H: HeightField + ?Sized>(
    settings: &HexWorldSettings,
    heights: &H,
    camera: Camera,
    lighting: &LightingSetup,
) -> Result<DemoScene, SceneError> {
    if settings.extent > MAX_EXTENT {
        return Err(SceneError::ExtentTooLarge {
            extent: settings.extent,
            max: MAX_EXTENT,
        });
    }
    let layout = settings.layout()?;
    let mut scene = Scene::with_camera(camera);

    let material = scene
        .resources_mut()
        .add_material(Material::base_colour("base-colour"));
    let plane_mesh = scene.resources_mut().add_mesh(geometry::ground_plane()?);
    let radius = settings.prism_radius.unwrap_or_else(|| layout.cell_radius());
    let prism_mesh = scene.resources_mut().add_mesh(geometry::hex_prism(
        radius,
        settings.prism_depth,
        geometry::PRISM_COLOUR,
    )?);

    let ground = scene.add_object(plane_mesh, material, Transform::new(GROUND_OFFSET, 0.0))?;
    let cells = populate_hex_world(
        &mut scene,
        settings.square_extent(),
        &layout,
        heights,
        prism_mesh,
        material,
    )?;
    scene.setup_lighting(lighting)?;

    info!(
        objects = scene.object_count(),
        meshes = scene.resources().mesh_count(),
        extent = settings.extent,
        "demo scene assembled"
    );
    Ok(DemoScene {
        scene,
        layout,
        ground,
        cells,
    })
}
