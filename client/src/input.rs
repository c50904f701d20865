use bevy::{prelude::*, window::PrimaryWindow};
use leafwing_input_manager::prelude::*;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    Launch,
    Reset,
}

/// A pointer went down at `position`: window pixels, origin top-left, +Y down.
#[derive(Message, Clone, Copy, Debug)]
pub struct PointerPressed {
    pub position: Vec2,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();
    app.add_message::<PointerPressed>();

    let mut input_map = InputMap::<InputAction>::default();
    input_map.insert(InputAction::Launch, MouseButton::Left);
    input_map.insert(InputAction::Reset, KeyCode::KeyR);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<InputAction>::default());

    app.add_systems(Update, capture_pointer);
}

/// Turn clicks and new touches into `PointerPressed` messages, one per press.
pub(super) fn capture_pointer(
    actions: Res<ActionState<InputAction>>,
    window: Single<&Window, With<PrimaryWindow>>,
    touches: Res<Touches>,
    mut presses: MessageWriter<PointerPressed>,
) {
    if actions.just_pressed(&InputAction::Launch) {
        if let Some(position) = window.cursor_position() {
            presses.write(PointerPressed { position });
        }
    }

    for touch in touches.iter_just_pressed() {
        presses.write(PointerPressed {
            position: touch.position(),
        });
    }
}
