//! Bevy side of the simulation: owns the session, draws boxes as sprites, and drives the
//! fixed-rate frame loop.

use crate::input::{InputAction, PointerPressed, capture_pointer};
use bevy::{ecs::system::SystemParam, prelude::*};
use leafwing_input_manager::prelude::ActionState;
use shared::{
    Appearance, EntityId, FRAME_RATE_HZ, FrameReport, Pose, Scene, Simulation, WorldConfig,
};

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(Time::<Fixed>::from_hz(f64::from(FRAME_RATE_HZ)));
    app.init_resource::<LastFrame>();

    app.add_systems(Startup, start_session);
    app.add_systems(
        Update,
        (launch_on_press.after(capture_pointer), reset_on_key).run_if(resource_exists::<Session>),
    );
    app.add_systems(FixedUpdate, advance.run_if(resource_exists::<Session>));
}

/// The running simulation. Visuals are sprite entities.
#[derive(Resource)]
pub struct Session(pub Simulation<Entity>);

/// Logical size of the window in pixels.
#[derive(Resource, Clone, Copy, Debug)]
pub struct Viewport {
    pub size: Vec2,
}

/// Report of the most recent fixed frame.
#[derive(Resource, Default, Debug)]
pub struct LastFrame {
    pub report: FrameReport,
    pub total_splits: usize,
}

/// Sprite of one simulated box.
#[derive(Component, Debug)]
pub struct BoxSprite(pub EntityId);

/// Map screen pixels (top-left origin, +Y down) to world space of a centered 2D camera.
pub fn screen_to_world(viewport: Vec2, screen: Vec2) -> Vec2 {
    Vec2::new(screen.x - viewport.x * 0.5, viewport.y * 0.5 - screen.y)
}

fn pose_transform(viewport: Vec2, pose: Pose) -> Transform {
    let position = screen_to_world(viewport, Vec2::new(pose.position_px.x, pose.position_px.y));
    // Flipping Y mirrors the rotation direction.
    let rotation = Quat::from_rotation_z(-pose.angle);
    Transform::from_translation(position.extend(0.0)).with_rotation(rotation)
}

/// [`Scene`] backed by bevy sprites.
#[derive(SystemParam)]
pub struct SpriteScene<'w, 's> {
    commands: Commands<'w, 's>,
    transforms: Query<'w, 's, &'static mut Transform, With<BoxSprite>>,
    viewport: Res<'w, Viewport>,
}

impl Scene for SpriteScene<'_, '_> {
    type Visual = Entity;

    fn create_rect(&mut self, owner: EntityId, appearance: &Appearance, pose: Pose) -> Entity {
        let [r, g, b] = appearance.color.srgb_u8();
        let size = Vec2::new(appearance.size_px.x, appearance.size_px.y);
        self.commands
            .spawn((
                BoxSprite(owner),
                Sprite::from_color(Color::srgb_u8(r, g, b), size),
                pose_transform(self.viewport.size, pose),
            ))
            .id()
    }

    fn sync(&mut self, visual: &Entity, pose: Pose) {
        let transform = pose_transform(self.viewport.size, pose);
        match self.transforms.get_mut(*visual) {
            Ok(mut current) => *current = transform,
            // Spawned earlier this frame; its commands have not been applied yet.
            Err(_) => {
                self.commands.entity(*visual).insert(transform);
            }
        }
    }

    fn destroy(&mut self, visual: Entity) {
        self.commands.entity(visual).despawn();
    }
}

pub(super) fn start_session(
    mut commands: Commands,
    viewport: Res<Viewport>,
    mut exit: MessageWriter<AppExit>,
) {
    let config = WorldConfig {
        viewport_px: shared::Vec2::new(viewport.size.x, viewport.size.y),
        ..WorldConfig::default()
    };

    match Simulation::new(config) {
        Ok(simulation) => {
            info!(
                "session started: {}x{} px at {} px/m",
                viewport.size.x,
                viewport.size.y,
                simulation.config().pixels_per_meter
            );
            commands.insert_resource(Session(simulation));
        }
        Err(err) => {
            error!("cannot start simulation: {err}");
            exit.write(AppExit::error());
        }
    }
}

fn advance(mut session: ResMut<Session>, mut last: ResMut<LastFrame>, mut scene: SpriteScene) {
    let report = session.0.update(&mut scene);
    if report.split > 0 || report.culled > 0 {
        debug!("frame {}: {report:?}", session.0.frame());
    }
    last.total_splits += report.split;
    last.report = report;
}

fn launch_on_press(
    mut presses: MessageReader<PointerPressed>,
    mut session: ResMut<Session>,
    mut scene: SpriteScene,
) {
    for press in presses.read() {
        let id = session.0.launch(&mut scene, press.position.x);
        debug!("pointer at {} launched {id}", press.position);
    }
}

fn reset_on_key(
    actions: Res<ActionState<InputAction>>,
    mut session: ResMut<Session>,
    mut scene: SpriteScene,
) {
    if actions.just_pressed(&InputAction::Reset) {
        let removed = session.0.clear(&mut scene);
        info!("reset: removed {removed} boxes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn pose(x: f32, y: f32) -> Pose {
        Pose {
            position_px: shared::Vec2::new(x, y),
            angle: 0.0,
        }
    }

    fn sprite_world() -> World {
        let mut world = World::new();
        world.insert_resource(Viewport {
            size: Vec2::new(200.0, 100.0),
        });
        world
    }

    fn appearance() -> Appearance {
        Appearance {
            size_px: shared::Vec2::new(10.0, 10.0),
            color: shared::BoxColor::RoyalBlue,
        }
    }

    #[test]
    fn screen_corners_map_to_centered_world() {
        let viewport = Vec2::new(1280.0, 720.0);
        assert_eq!(
            screen_to_world(viewport, Vec2::ZERO),
            Vec2::new(-640.0, 360.0)
        );
        assert_eq!(
            screen_to_world(viewport, Vec2::new(1280.0, 720.0)),
            Vec2::new(640.0, -360.0)
        );
        assert_eq!(
            screen_to_world(viewport, Vec2::new(640.0, 360.0)),
            Vec2::ZERO
        );
    }

    #[test]
    fn pose_rotation_is_mirrored_for_y_up() {
        let viewport = Vec2::new(100.0, 100.0);
        let pose = Pose {
            position_px: shared::Vec2::new(50.0, 0.0),
            angle: 0.5,
        };
        let transform = pose_transform(viewport, pose);
        assert_eq!(transform.translation, Vec3::new(0.0, 50.0, 0.0));
        let (axis, angle) = transform.rotation.to_axis_angle();
        assert!((axis.z * angle + 0.5).abs() < 1.0e-5);
    }

    #[test]
    fn sync_in_the_spawning_frame_wins_over_spawn_pose() {
        let mut world = sprite_world();
        world
            .run_system_once(|mut scene: SpriteScene| {
                let visual = scene.create_rect(EntityId(1), &appearance(), pose(0.0, 0.0));
                scene.sync(&visual, pose(150.0, 50.0));
            })
            .unwrap();

        let mut sprites = world.query::<(&BoxSprite, &Transform)>();
        let transforms: Vec<_> = sprites.iter(&world).map(|(_, t)| t.translation).collect();
        assert_eq!(transforms, vec![Vec3::new(50.0, 0.0, 0.0)]);
    }

    #[test]
    fn sync_moves_existing_sprites() {
        let mut world = sprite_world();
        let visual = world
            .run_system_once(|mut scene: SpriteScene| {
                scene.create_rect(EntityId(2), &appearance(), pose(100.0, 50.0))
            })
            .unwrap();
        world
            .run_system_once(move |mut scene: SpriteScene| scene.sync(&visual, pose(0.0, 0.0)))
            .unwrap();

        let transform = world.get::<Transform>(visual).unwrap();
        assert_eq!(transform.translation, Vec3::new(-100.0, 50.0, 0.0));
    }
}
