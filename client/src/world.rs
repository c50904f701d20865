use crate::session::{Session, Viewport, screen_to_world, start_session};
use bevy::prelude::*;

/// Marker for the ledge sprite.
#[derive(Component, Debug)]
pub struct Ground;

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(ClearColor(Color::srgb(0.95, 0.95, 0.92)));
    app.add_systems(Startup, spawn_ground.after(start_session));
}

fn spawn_ground(mut commands: Commands, session: Option<Res<Session>>, viewport: Res<Viewport>) {
    let Some(session) = session else {
        return;
    };
    let config = session.0.config();
    let Some(ground) = config.ground else {
        info!("no ground configured");
        return;
    };

    let center = config.to_pixels(ground.center);
    let size = config.to_pixels(ground.half_extents * 2.0);
    let position = screen_to_world(viewport.size, Vec2::new(center.x, center.y));

    commands.spawn((
        Ground,
        Sprite::from_color(Color::linear_rgb(0.2, 0.3, 0.25), Vec2::new(size.x, size.y)),
        // Behind the boxes.
        Transform::from_translation(position.extend(-1.0)),
    ));
}
