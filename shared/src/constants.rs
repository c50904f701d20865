/// Gravity magnitude in meters per second squared (positive value).
///
/// The world uses screen orientation (+Y points down), so gravity is applied as `(0, +g)`.
pub const GRAVITY_MPS2: f32 = 9.8;

/// Conversion factor between physics meters and visual pixels.
pub const PIXELS_PER_METER: f32 = 50.0;

/// Let bodies at rest drop out of the solver until something disturbs them.
pub const SLEEP_ENABLED: bool = true;

/// Default viewport width in logical pixels.
pub const VIEWPORT_WIDTH_PX: f32 = 1280.0;

/// Default viewport height in logical pixels.
pub const VIEWPORT_HEIGHT_PX: f32 = 720.0;

/// How far below the bottom edge (pixels) a box may fall before it is removed.
pub const OFFSCREEN_MARGIN_PX: f32 = 100.0;

/// Fixed simulation rate. One `step` advances the world by `1 / FRAME_RATE_HZ` seconds.
pub const FRAME_RATE_HZ: f32 = 30.0;

/// Each split halves the parent along both axes.
pub const SPLIT_FACTOR: f32 = 0.5;

/// Smallest child edge (meters) a split may produce.
///
/// A box whose children would be smaller than this is left alone. This bounds the
/// recursion: 1.0 -> 0.5 -> 0.25 -> 0.125 and then no further.
pub const MIN_SPLIT_SIZE_M: f32 = 0.1;

/// Edge length (meters) of a box launched by a pointer press.
pub const LAUNCH_SIZE_M: f32 = 1.0;

/// Upward impulse (N·s) given to a freshly launched box.
pub const LAUNCH_IMPULSE: f32 = 13.0;

/// Multiplier on the diagonal step used as the scatter impulse of split children.
pub const SCATTER_IMPULSE: f32 = 1.0;

/// Box material defaults.
pub const BOX_DENSITY: f32 = 1.0;
pub const BOX_FRICTION: f32 = 0.5;
pub const BOX_RESTITUTION: f32 = 0.3;
