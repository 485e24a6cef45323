// src/viewer/camera.rs

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

/// Orbit camera around the displayed candidate.
///
/// Left drag orbits, right drag pans, the scroll wheel zooms. Distances are
/// in mesh units, so the limits are reset each time a new mesh is framed.
#[derive(Component, Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Horizontal angle (radians).
    pub azimuth: f32,
    /// Vertical angle (radians), clamped short of the poles.
    pub elevation: f32,
    pub orbit_speed: f32,
    /// Pan speed as a fraction of `distance` per pixel.
    pub pan_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_elevation: f32,
    pub max_elevation: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 5.0,
            azimuth: 0.8,
            elevation: 0.5,
            orbit_speed: 0.005,
            pan_speed: 0.0015,
            zoom_speed: 0.1,
            min_distance: 0.05,
            max_distance: 100.0,
            min_elevation: -1.4,
            max_elevation: 1.4,
        }
    }
}

impl OrbitCamera {
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.azimuth.cos() * self.elevation.cos();
        let y = self.distance * self.elevation.sin();
        let z = self.distance * self.azimuth.sin() * self.elevation.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn orbit(&mut self, delta: Vec2) {
        self.azimuth -= delta.x * self.orbit_speed;
        self.elevation = (self.elevation + delta.y * self.orbit_speed)
            .clamp(self.min_elevation, self.max_elevation);
    }

    pub fn pan(&mut self, delta: Vec2) {
        let forward = (self.target - self.position()).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        self.target += right * (-delta.x * self.pan_speed * self.distance)
            + up * (delta.y * self.pan_speed * self.distance);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta * self.zoom_speed))
            .clamp(self.min_distance, self.max_distance);
    }

    /// Re-targets the origin and backs off far enough to see a mesh of the given diagonal.
    pub fn frame(&mut self, diagonal: f32) {
        let size = diagonal.max(1e-3);
        self.target = Vec3::ZERO;
        self.min_distance = size * 0.05;
        self.max_distance = size * 20.0;
        self.distance = size * 1.5;
    }

    /// Near and far planes that keep the framed mesh visible over the whole zoom range.
    pub fn fit_clip_planes(&self, projection: &mut PerspectiveProjection) {
        projection.near = self.min_distance * 0.02;
        projection.far = self.max_distance * 2.5;
    }

    pub fn apply_to_transform(&self, transform: &mut Transform) {
        transform.translation = self.position();
        transform.look_at(self.target, Vec3::Y);
    }
}

pub(crate) fn orbit_camera_input(
    mut cameras: Query<&mut OrbitCamera>,
    mut contexts: EguiContexts,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
) {
    // Clicks on the button panel must not spin the view.
    if let Some(ctx) = contexts.try_ctx_mut() {
        if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
            return;
        }
    }

    let delta = mouse_motion.delta;
    let scroll = mouse_scroll.delta.y;
    for mut camera in &mut cameras {
        if mouse_button.pressed(MouseButton::Left) {
            camera.orbit(delta);
        }
        if mouse_button.pressed(MouseButton::Right) {
            camera.pan(delta);
        }
        if scroll.abs() > 0.001 {
            camera.zoom(scroll);
        }
    }
}

pub(crate) fn update_orbit_camera(mut cameras: Query<(&OrbitCamera, &mut Transform)>) {
    for (camera, mut transform) in &mut cameras {
        camera.apply_to_transform(&mut transform);
    }
}
