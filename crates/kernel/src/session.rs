use hexworld_grid::HexLayout;
use hexworld_input::{CursorAction, Key, KeyboardState, MouseButton, MouseState, local_direction};
use hexworld_scene::{Camera, DemoScene, HexCell, Scene, SceneError, build_demo_scene};
use hexworld_terrain::{FlatHeightField, HeightField, NoiseHeightField, TerrainError};
use tracing::{info, trace, warn};

use crate::config::{CameraSettings, ConfigError, DemoConfig, HeightSource};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Terrain(#[from] TerrainError),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// The running demo: scene, input collaborators and movement settings.
///
/// Window code only forwards events here; all state changes happen in
/// [`Session::frame`] / [`Session::tick`].
pub struct Session {
    demo: DemoScene,
    keyboard: KeyboardState,
    mouse: MouseState,
    movement: CameraSettings,
    frame: u64,
}

impl Session {
    pub fn new(config: &DemoConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let layout = config.grid.layout().map_err(ConfigError::from)?;
        let heights = height_field(config, layout)?;
        let camera = Camera::new(config.camera.eye, config.camera.look);
        let demo = build_demo_scene(&config.grid, &heights, camera, &config.lighting)?;
        info!(
            objects = demo.scene.object_count(),
            height_source = ?config.height_source,
            "session ready"
        );
        Ok(Self {
            demo,
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(config.camera.look_button),
            movement: config.camera.clone(),
            frame: 0,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.demo.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.demo.scene
    }

    pub fn layout(&self) -> &HexLayout {
        &self.demo.layout
    }

    pub fn cells(&self) -> &[HexCell] {
        &self.demo.cells
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    /// Escape leaves look mode.
    pub fn key(&mut self, key: Key, pressed: bool) -> CursorAction {
        self.keyboard.set(key, pressed);
        if key == Key::Escape && pressed {
            self.mouse.cancel_look()
        } else {
            CursorAction::None
        }
    }

    pub fn mouse_button_down(&mut self, button: MouseButton) -> CursorAction {
        self.mouse.press(button)
    }

    pub fn mouse_button_up(&mut self, button: MouseButton) -> CursorAction {
        self.mouse.release(button)
    }

    pub fn mouse_motion(&mut self, dx: f32, dy: f32) {
        self.mouse.accumulate_delta(dx, dy);
    }

    /// Window lost focus: forget held keys and leave look mode.
    pub fn focus_lost(&mut self) -> CursorAction {
        self.keyboard.clear();
        self.mouse.cancel_look()
    }

    pub fn is_looking(&self) -> bool {
        self.mouse.is_looking()
    }

    pub fn cursor_locked(&self) -> bool {
        self.mouse.cursor_locked()
    }

    /// One frame: `ui` gets the scene first, then input moves the camera.
    pub fn frame<F: FnOnce(&mut Scene)>(&mut self, dt: f32, ui: F) {
        ui(&mut self.demo.scene);
        self.tick(dt);
    }

    /// Camera/input integration for `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!(dt, "ignoring invalid frame time");
            0.0
        };
        let settings = &self.movement;
        let camera = self.demo.scene.camera_mut();

        let (dx, dy) = self.mouse.take_look_delta();
        if dx != 0.0 || dy != 0.0 {
            camera.rotate_look(dx, dy, settings.sensitivity);
        }

        let mut local = local_direction(&self.keyboard, &settings.bindings);
        if settings.normalize_diagonal {
            local = local.normalize_or_zero();
        }
        camera.advance(local, settings.speed, dt);

        self.frame += 1;
        trace!(frame = self.frame, eye = ?camera.eye, look = ?camera.look, "tick");
    }
}

fn height_field(
    config: &DemoConfig,
    layout: HexLayout,
) -> Result<Box<dyn HeightField>, TerrainError> {
    Ok(match config.height_source {
        HeightSource::Noise => Box::new(NoiseHeightField::new(layout, &config.terrain)?),
        HeightSource::Flat => Box::new(FlatHeightField(config.terrain.base_height)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use hexworld_common::ObjectId;

    fn small_config() -> DemoConfig {
        let mut config = DemoConfig::default();
        config.grid.extent = 6;
        config
    }

    fn session() -> Session {
        Session::new(&small_config()).unwrap()
    }

    #[test]
    fn builds_ground_plus_grid() {
        let s = session();
        assert_eq!(s.scene().object_count(), 1 + 36);
        assert_eq!(s.cells().len(), 36);
        assert!(s.scene().lighting_initialized());
    }

    #[test]
    fn idle_ticks_do_not_move_the_eye() {
        let mut s = session();
        let eye = s.scene().camera().eye;
        for dt in [0.016, 0.5, 3.0] {
            s.tick(dt);
        }
        assert_eq!(s.scene().camera().eye, eye);
        assert_eq!(s.frame_count(), 3);
    }

    #[test]
    fn motion_without_look_mode_is_ignored() {
        let mut s = session();
        let look = s.scene().camera().look;
        s.mouse_motion(300.0, 120.0);
        s.tick(0.016);
        assert_eq!(s.scene().camera().look, look);
    }

    fn displacement(keys: &[Key], normalize: bool) -> f32 {
        let mut config = small_config();
        config.camera.normalize_diagonal = normalize;
        let mut s = Session::new(&config).unwrap();
        let start = s.scene().camera().eye;
        for k in keys {
            s.key(*k, true);
        }
        s.tick(0.25);
        (s.scene().camera().eye - start).length()
    }

    #[test]
    fn forward_moves_at_configured_speed() {
        assert!((displacement(&[Key::W], false) - 5.0 * 0.25).abs() < 1e-4);
    }

    #[test]
    fn forward_left_is_root_two_faster() {
        let ratio = displacement(&[Key::W, Key::A], false) / displacement(&[Key::W], false);
        assert!((ratio - 2.0_f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn normalized_diagonal_matches_axis_speed() {
        let ratio = displacement(&[Key::W, Key::A], true) / displacement(&[Key::W], true);
        assert!((ratio - 1.0).abs() < 1e-4);
    }

    #[test]
    fn look_gesture_rotates_then_unlocks() {
        let mut s = session();
        let before = s.scene().camera().look;

        assert_eq!(s.mouse_button_down(MouseButton::Secondary), CursorAction::Lock);
        assert!(s.cursor_locked());
        s.mouse_motion(25.0, -10.0);
        s.tick(0.016);
        assert_eq!(s.mouse_button_up(MouseButton::Secondary), CursorAction::Unlock);

        assert!(!s.cursor_locked());
        assert!(!s.is_looking());
        assert!((s.scene().camera().look - before).length() > 1e-4);
    }

    #[test]
    fn quick_drag_within_one_frame_still_rotates() {
        let mut s = session();
        let before = s.scene().camera().look;
        s.mouse_button_down(MouseButton::Secondary);
        s.mouse_motion(200.0, 0.0);
        assert_eq!(s.mouse_button_up(MouseButton::Secondary), CursorAction::Unlock);
        s.tick(0.016);
        assert!(!s.cursor_locked());
        assert_ne!(s.scene().camera().look, before);
    }

    #[test]
    fn primary_button_does_not_lock() {
        let mut s = session();
        assert_eq!(s.mouse_button_down(MouseButton::Primary), CursorAction::None);
        assert!(!s.cursor_locked());
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut s = session();
        s.key(Key::W, true);
        s.mouse_button_down(MouseButton::Secondary);
        assert_eq!(s.focus_lost(), CursorAction::Unlock);
        let eye = s.scene().camera().eye;
        s.tick(1.0);
        assert_eq!(s.scene().camera().eye, eye);
    }

    #[test]
    fn escape_leaves_look_mode() {
        let mut s = session();
        assert_eq!(s.key(Key::Escape, true), CursorAction::None);
        s.mouse_button_down(MouseButton::Secondary);
        assert_eq!(s.key(Key::Escape, true), CursorAction::Unlock);
        assert!(!s.is_looking());
        assert_eq!(s.key(Key::Escape, false), CursorAction::None);
    }

    #[test]
    fn ui_runs_before_camera_integration() {
        let mut s = session();
        s.key(Key::W, true);
        let eye_before = s.scene().camera().eye;
        let mut seen = None;
        s.frame(0.1, |scene| {
            seen = Some(scene.camera().eye);
            scene.object_mut(ObjectId(0)).unwrap().transform.position.y = 3.0;
        });
        assert_eq!(seen, Some(eye_before));
        assert_ne!(s.scene().camera().eye, eye_before);
        assert_eq!(
            s.scene().object(ObjectId(0)).unwrap().transform.position.y,
            3.0
        );
    }

    #[test]
    fn invalid_dt_is_treated_as_zero() {
        let mut s = session();
        s.key(Key::W, true);
        let eye = s.scene().camera().eye;
        s.tick(f32::NAN);
        s.tick(-1.0);
        assert_eq!(s.scene().camera().eye, eye);
    }

    #[test]
    fn flat_height_source_levels_the_grid() {
        let mut config = small_config();
        config.height_source = HeightSource::Flat;
        config.terrain.base_height = 2.0;
        let s = Session::new(&config).unwrap();
        for cell in s.cells() {
            let t = s.scene().object(cell.object).unwrap().transform;
            assert_eq!(t.position.y, 2.0);
        }
        assert_eq!(
            s.scene().object(ObjectId(0)).unwrap().transform.position,
            Vec3::new(-2.0, 0.0, 0.0)
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = small_config();
        config.grid.spacing = -1.0;
        assert!(matches!(
            Session::new(&config),
            Err(SessionError::Config(_))
        ));
    }
}
