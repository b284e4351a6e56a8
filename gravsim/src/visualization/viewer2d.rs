//! Bevy 2D window for both demos (`viewer` feature).
//!
//! Physics runs in `FixedUpdate` at the scene's tick interval; rendering and
//! input run every frame. Bevy's 2D camera is centered with +y up, so world
//! positions are shifted by the viewport center and scaled.

use std::collections::HashSet;

use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};

use crate::simulation::objects::ObjectHandle;
use crate::simulation::scenario::{BallScene, GravityScene};

#[derive(Component)]
struct BodyMarker(ObjectHandle);

#[derive(Component)]
struct BallMarker;

fn window_plugin(title: &str, size: bevy::math::UVec2) -> WindowPlugin {
    WindowPlugin {
        primary_window: Some(Window {
            title: title.to_string(),
            resolution: (size.x as f32, size.y as f32).into(),
            ..default()
        }),
        ..default()
    }
}

pub fn run_gravity_2d(scene: GravityScene) {
    info!("run_gravity_2d: starting Bevy 2D viewer with {} bodies", scene.gravity.len());

    let size = scene.viewport.screen_size();
    let dt = scene.parameters.delta_time;

    App::new()
        .insert_resource(Time::<Fixed>::from_seconds(dt))
        .insert_resource(scene)
        .add_plugins(DefaultPlugins.set(window_plugin(
            "Gravity Simulation",
            bevy::math::UVec2::new(size.x, size.y),
        )))
        .add_systems(Startup, setup_camera_system)
        .add_systems(FixedUpdate, gravity_step_system)
        .add_systems(Update, (spawn_input_system, sync_bodies_system).chain())
        .run();
}

fn setup_camera_system(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

fn gravity_step_system(mut scene: ResMut<GravityScene>) {
    if let Err(e) = scene.step() {
        error!("gravity step failed: {e}");
    }
}

fn spawn_input_system(keys: Res<ButtonInput<KeyCode>>, mut scene: ResMut<GravityScene>) {
    if keys.just_pressed(KeyCode::ArrowUp) {
        if let Err(e) = scene.spawn_planet() {
            error!("spawn failed: {e}");
        }
    }
}

/// Move meshes to their bodies, create meshes for new bodies and drop the
/// ones whose body is gone
fn sync_bodies_system(
    mut commands: Commands,
    scene: Res<GravityScene>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(Entity, &BodyMarker, &mut Transform)>,
) {
    let scale = scene.viewport.scale() as f32;
    let mut drawn = HashSet::new();

    for (entity, BodyMarker(handle), mut transform) in &mut query {
        match scene.objects.get(*handle) {
            Some(object) => {
                let p = object.position();
                transform.translation.x = p.x as f32 * scale;
                transform.translation.y = p.y as f32 * scale;
                drawn.insert(*handle);
            }
            None => commands.entity(entity).despawn(),
        }
    }

    scene.collisions.for_each_collider(&scene.objects, |handle, object| {
        if drawn.contains(&handle) {
            return;
        }
        let p = object.position();
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(object.radius() as f32 * scale))),
                material: materials.add(ColorMaterial::from(Color::WHITE)),
                transform: Transform::from_xyz(p.x as f32 * scale, p.y as f32 * scale, 0.0),
                ..default()
            },
            BodyMarker(handle),
        ));
    });
}

pub fn run_ball_2d(scene: BallScene) {
    info!("run_ball_2d: starting Bevy 2D viewer");

    let size = scene.viewport.screen_size();
    let dt = scene.delta_time;

    App::new()
        .insert_resource(Time::<Fixed>::from_seconds(dt))
        .insert_resource(scene)
        .add_plugins(DefaultPlugins.set(window_plugin(
            "Bouncy Ball Example",
            bevy::math::UVec2::new(size.x, size.y),
        )))
        .add_systems(Startup, setup_ball_system)
        .add_systems(FixedUpdate, ball_step_system)
        .add_systems(Update, draw_ball_system)
        .run();
}

fn setup_ball_system(
    mut commands: Commands,
    scene: Res<BallScene>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2dBundle::default());

    let scale = scene.viewport.scale() as f32;
    commands.spawn((
        MaterialMesh2dBundle {
            mesh: Mesh2dHandle(meshes.add(Circle::new(scene.ball.radius as f32 * scale))),
            material: materials.add(ColorMaterial::from(Color::WHITE)),
            ..default()
        },
        BallMarker,
    ));
}

fn ball_step_system(mut scene: ResMut<BallScene>) {
    if let Err(e) = scene.step() {
        error!("ball step failed: {e}");
    }
}

fn draw_ball_system(scene: Res<BallScene>, mut gizmos: Gizmos, mut query: Query<&mut Transform, With<BallMarker>>) {
    let scale = scene.viewport.scale() as f32;
    let center = scene.viewport.center();
    let to_screen = |x: f64, y: f64| Vec2::new((x - center.x) as f32 * scale, (y - center.y) as f32 * scale);

    let path = scene.trajectory.sample(scene.trajectory_points()).into_iter().map(|p| to_screen(p.x, p.y));
    gizmos.linestrip_2d(path, Color::srgb(1.0, 1.0, 0.0));

    let width = scene.viewport.world_size().x;
    gizmos.line_2d(
        to_screen(0.0, scene.floor),
        to_screen(width, scene.floor),
        Color::WHITE,
    );

    for mut transform in &mut query {
        let p = to_screen(scene.ball.position.x, scene.ball.position.y);
        transform.translation.x = p.x;
        transform.translation.y = p.y;
    }
}
