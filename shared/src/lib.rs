pub mod config;
pub mod constants;
pub mod contact;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod lifecycle;
pub mod rapier;
pub mod rapier_world;
pub mod registry;
pub mod scene;
pub mod simulation;
pub mod split;

pub use config::{GroundDef, Material, WorldConfig};
pub use constants::{
    FRAME_RATE_HZ, LAUNCH_IMPULSE, MIN_SPLIT_SIZE_M, OFFSCREEN_MARGIN_PX, PIXELS_PER_METER,
    VIEWPORT_HEIGHT_PX, VIEWPORT_WIDTH_PX,
};
pub use contact::{ContactBuffer, ContactEvent};
pub use entity::EntityId;
pub use error::ConfigError;
pub use geometry::Vec2;
pub use lifecycle::BoxParams;
pub use rapier_world::PhysicsWorld;
pub use registry::{BoxEntity, BoxRegistry};
pub use scene::{Appearance, BoxColor, HeadlessScene, HeadlessVisual, Pose, Scene};
pub use simulation::{BodyState, FrameReport, Simulation};
pub use split::{ResolveReport, SplitOutcome};
