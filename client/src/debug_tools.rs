//! Debug/performance tooling for native dev builds.
//!
//! Compiled only with `dev_native`: perf overlay plus a periodic summary of the
//! simulation in the log.

use crate::session::{LastFrame, Session};
use bevy::diagnostic::{EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use iyes_perf_ui::prelude::*;

const SUMMARY_INTERVAL_SECS: f32 = 5.0;

#[derive(Resource)]
struct SummaryTimer(Timer);

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        PerfUiPlugin,
    ));

    app.insert_resource(SummaryTimer(Timer::from_seconds(
        SUMMARY_INTERVAL_SECS,
        TimerMode::Repeating,
    )));
    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(Update, log_summary.run_if(resource_exists::<Session>));
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

fn log_summary(
    time: Res<Time>,
    mut timer: ResMut<SummaryTimer>,
    session: Res<Session>,
    last: Res<LastFrame>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    info!(
        "frame {}: {} boxes, {} bodies, {} splits so far",
        session.0.frame(),
        session.0.box_count(),
        session.0.body_count(),
        last.total_splits
    );
}
