use thiserror::Error;

/// Rejected world or box parameters.
///
/// These are checked once, before anything is handed to the physics engine. A session
/// that fails validation must not start.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Pixel-per-meter scale is zero, negative or not finite.
    #[error("pixels per meter must be positive and finite, got {0}")]
    InvalidScale(f32),
    /// Viewport has a non-positive or non-finite extent.
    #[error("viewport must be positive and finite, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
    /// Offscreen margin is negative or not finite.
    #[error("offscreen margin must be non-negative and finite, got {0}")]
    InvalidMargin(f32),
    /// Frame rate is zero, negative or not finite.
    #[error("frame rate must be positive and finite, got {0}")]
    InvalidFrameRate(f32),
    /// Gravity has a non-finite component.
    #[error("gravity must be finite, got ({x}, {y})")]
    InvalidGravity { x: f32, y: f32 },
    /// Box or ground extent is non-positive or not finite.
    #[error("{what} size must be positive and finite, got {width}x{height}")]
    InvalidSize {
        what: &'static str,
        width: f32,
        height: f32,
    },
    /// Material coefficient out of range.
    #[error("{name} must be {expected}, got {value}")]
    InvalidMaterial {
        name: &'static str,
        expected: &'static str,
        value: f32,
    },
}
