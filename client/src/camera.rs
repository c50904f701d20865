use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, add_camera);
}

/// Orthographic camera centered on the viewport: one world unit is one logical pixel.
fn add_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
