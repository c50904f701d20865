//! Session-wide world configuration.
//!
//! Built once when the session starts and never mutated afterwards. All positions and
//! sizes inside the simulation are meters; pixels only appear at the rendering boundary.

use crate::{
    constants::{
        BOX_DENSITY, BOX_FRICTION, BOX_RESTITUTION, FRAME_RATE_HZ, GRAVITY_MPS2,
        OFFSCREEN_MARGIN_PX, PIXELS_PER_METER, SLEEP_ENABLED, VIEWPORT_HEIGHT_PX,
        VIEWPORT_WIDTH_PX,
    },
    error::ConfigError,
    geometry::{Vec2, meters_to_pixels, pixels_to_meters},
};

/// Surface properties of a collider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            density: BOX_DENSITY,
            friction: BOX_FRICTION,
            restitution: BOX_RESTITUTION,
        }
    }
}

impl Material {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(ConfigError::InvalidMaterial {
                name: "density",
                expected: "positive and finite",
                value: self.density,
            });
        }
        if !(self.friction.is_finite() && self.friction >= 0.0) {
            return Err(ConfigError::InvalidMaterial {
                name: "friction",
                expected: "non-negative and finite",
                value: self.friction,
            });
        }
        if !(self.restitution.is_finite() && self.restitution >= 0.0) {
            return Err(ConfigError::InvalidMaterial {
                name: "restitution",
                expected: "non-negative and finite",
                value: self.restitution,
            });
        }
        Ok(())
    }
}

/// Static slab the boxes can land on (meters).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundDef {
    /// World-space center.
    pub center: Vec2,
    /// Half width and half height.
    pub half_extents: Vec2,
}

impl Default for GroundDef {
    /// A ledge across the middle of the default viewport, low enough that a launched box
    /// reaches it from below.
    fn default() -> Self {
        Self {
            center: Vec2::new(VIEWPORT_WIDTH_PX * 0.5 / PIXELS_PER_METER, 7.0),
            half_extents: Vec2::new(4.0, 0.25),
        }
    }
}

/// Immutable configuration of a simulation session.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    /// Gravity acceleration (m/s²). +Y is down.
    pub gravity: Vec2,
    pub pixels_per_meter: f32,
    /// Allow resting bodies to sleep.
    pub sleep: bool,
    /// Visible area in logical pixels.
    pub viewport_px: Vec2,
    /// Extra distance below the viewport before a box is culled (pixels).
    pub offscreen_margin_px: f32,
    pub frame_rate_hz: f32,
    pub ground: Option<GroundDef>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, GRAVITY_MPS2),
            pixels_per_meter: PIXELS_PER_METER,
            sleep: SLEEP_ENABLED,
            viewport_px: Vec2::new(VIEWPORT_WIDTH_PX, VIEWPORT_HEIGHT_PX),
            offscreen_margin_px: OFFSCREEN_MARGIN_PX,
            frame_rate_hz: FRAME_RATE_HZ,
            ground: Some(GroundDef::default()),
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pixels_per_meter.is_finite() && self.pixels_per_meter > 0.0) {
            return Err(ConfigError::InvalidScale(self.pixels_per_meter));
        }
        let (width, height) = (self.viewport_px.x, self.viewport_px.y);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidViewport { width, height });
        }
        if !(self.offscreen_margin_px.is_finite() && self.offscreen_margin_px >= 0.0) {
            return Err(ConfigError::InvalidMargin(self.offscreen_margin_px));
        }
        if !(self.frame_rate_hz.is_finite() && self.frame_rate_hz > 0.0) {
            return Err(ConfigError::InvalidFrameRate(self.frame_rate_hz));
        }
        if !(self.gravity.x.is_finite() && self.gravity.y.is_finite()) {
            return Err(ConfigError::InvalidGravity {
                x: self.gravity.x,
                y: self.gravity.y,
            });
        }
        if let Some(ground) = &self.ground {
            let (hx, hy) = (ground.half_extents.x, ground.half_extents.y);
            if !(hx.is_finite() && hy.is_finite() && hx > 0.0 && hy > 0.0)
                || !(ground.center.x.is_finite() && ground.center.y.is_finite())
            {
                return Err(ConfigError::InvalidSize {
                    what: "ground",
                    width: hx * 2.0,
                    height: hy * 2.0,
                });
            }
        }
        Ok(())
    }

    /// Seconds advanced by one `step`.
    #[inline]
    pub fn frame_dt(&self) -> f32 {
        self.frame_rate_hz.recip()
    }

    /// Vertical position (meters) past which a box is considered gone.
    #[inline]
    pub fn offscreen_limit_m(&self) -> f32 {
        (self.viewport_px.y + self.offscreen_margin_px) / self.pixels_per_meter
    }

    #[inline]
    pub fn to_pixels(&self, meters: Vec2) -> Vec2 {
        meters_to_pixels(meters, self.pixels_per_meter)
    }

    #[inline]
    pub fn to_meters(&self, pixels: Vec2) -> Vec2 {
        pixels_to_meters(pixels, self.pixels_per_meter)
    }
}
