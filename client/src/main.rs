// Support configuring Bevy lints within code.
#![cfg_attr(bevy_lint, feature(register_tool), register_tool(bevy))]
// Disable console on Windows for non-dev builds.
#![cfg_attr(not(feature = "dev"), windows_subsystem = "windows")]

#[cfg(feature = "dev_native")]
mod debug_tools;

mod camera;
mod input;
mod session;
mod world;

use bevy::{prelude::*, window::WindowResolution};
use session::Viewport;
use shared::{VIEWPORT_HEIGHT_PX, VIEWPORT_WIDTH_PX};

fn main() -> AppExit {
    App::new().add_plugins(AppPlugin).run()
}

pub struct AppPlugin;
impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        // The simulation maps screen pixels to meters 1:1 with the viewport, so the window keeps
        // a fixed logical size.
        let (width, height) = (VIEWPORT_WIDTH_PX as u32, VIEWPORT_HEIGHT_PX as u32);
        let resolution = WindowResolution::new(width, height).with_scale_factor_override(1.0);
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Window {
                title: "Box Burst".to_string(),
                resolution,
                resizable: false,
                fit_canvas_to_parent: true,
                ..default()
            }
            .into(),
            ..default()
        }));

        app.insert_resource(Viewport {
            size: Vec2::new(VIEWPORT_WIDTH_PX, VIEWPORT_HEIGHT_PX),
        });

        app.add_plugins((
            camera::plugin,
            input::plugin,
            session::plugin,
            world::plugin,
        ));

        #[cfg(feature = "dev_native")]
        app.add_plugins(debug_tools::plugin);
    }
}
