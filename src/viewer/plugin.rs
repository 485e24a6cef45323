// src/viewer/plugin.rs

use bevy::prelude::*;

use super::camera::{orbit_camera_input, update_orbit_camera, OrbitCamera};
use crate::classifier::events::{ClearDisplayEvent, DisplayMeshEvent};

/// Marks the entity holding the candidate currently on screen.
#[derive(Component, Debug)]
pub struct DisplayedCandidate {
    pub label: String,
}

/// 3D view of the current candidate: one mesh, one orbit camera, fixed lights.
pub struct ViewerPlugin;

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.12, 0.12, 0.14)))
            .insert_resource(AmbientLight {
                color: Color::WHITE,
                brightness: 400.0,
                ..default()
            })
            .add_systems(Startup, spawn_viewer_scene)
            .add_systems(
                Update,
                (
                    clear_displayed_mesh_system,
                    display_loaded_mesh_system,
                    orbit_camera_input,
                    update_orbit_camera,
                )
                    .chain(),
            );
    }
}

fn spawn_viewer_scene(mut commands: Commands) {
    let camera = OrbitCamera::default();
    let mut transform = Transform::default();
    camera.apply_to_transform(&mut transform);
    let mut projection = PerspectiveProjection::default();
    camera.fit_clip_planes(&mut projection);
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(projection),
        camera,
        transform,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 6_000.0,
            ..default()
        },
        Transform::from_xyz(1.0, 2.0, 1.5).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn clear_displayed_mesh_system(
    mut commands: Commands,
    mut events: EventReader<ClearDisplayEvent>,
    displayed: Query<(Entity, &DisplayedCandidate)>,
) {
    if events.read().next().is_none() {
        return;
    }
    events.clear();
    for (entity, shown) in &displayed {
        debug!("Viewer: Clearing {} after rescan", shown.label);
        commands.entity(entity).despawn();
    }
}

/// Swaps the displayed geometry for the newest loaded candidate and reframes the camera.
fn display_loaded_mesh_system(
    mut commands: Commands,
    mut events: EventReader<DisplayMeshEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    displayed: Query<(Entity, &DisplayedCandidate)>,
    mut cameras: Query<(&mut OrbitCamera, &mut Projection)>,
) {
    // Several advances in one frame: only the last one is worth drawing.
    let Some(event) = events.read().last() else {
        return;
    };

    for (entity, shown) in &displayed {
        debug!("Viewer: Clearing {}", shown.label);
        commands.entity(entity).despawn();
    }

    let mesh_handle = meshes.add(event.mesh.to_bevy_mesh());
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.8,
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    commands.spawn((
        Mesh3d(mesh_handle),
        MeshMaterial3d(material),
        Transform::default(),
        DisplayedCandidate {
            label: event.label.clone(),
        },
    ));

    for (mut camera, mut projection) in &mut cameras {
        camera.frame(event.mesh.diagonal());
        if let Projection::Perspective(perspective) = projection.as_mut() {
            camera.fit_clip_planes(perspective);
        }
    }
    info!(
        "Viewer: Showing {} ({} vertices, {} triangles)",
        event.label,
        event.mesh.positions.len(),
        event.mesh.triangle_count()
    );
}
