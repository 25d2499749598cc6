//! The value every Vista animation produces.

use crate::animation::Interpolate;
use crate::geometry::Transform;

/// Visual state of an animated element.
///
/// `x` and `y` are pixel offsets; `x_percent` is a horizontal offset in
/// percent of the container width, used by slide transitions that must not
/// depend on layout. `rotate` is in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionState {
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub x_percent: f32,
    pub scale: f32,
    pub rotate: f32,
}

impl Default for MotionState {
    fn default() -> Self {
        Self::VISIBLE
    }
}

impl MotionState {
    /// Fully opaque, untransformed.
    pub const VISIBLE: MotionState = MotionState {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        x_percent: 0.0,
        scale: 1.0,
        rotate: 0.0,
    };

    pub const HIDDEN: MotionState = MotionState {
        opacity: 0.0,
        ..MotionState::VISIBLE
    };

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }
    pub fn with_x_percent(mut self, percent: f32) -> Self {
        self.x_percent = percent;
        self
    }
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
    pub fn with_rotate(mut self, degrees: f32) -> Self {
        self.rotate = degrees;
        self
    }

    /// Resolves to a render transform for a container `width` px wide.
    pub fn resolve(&self, width: f32) -> Transform {
        Transform {
            translate_x: self.x + self.x_percent / 100.0 * width,
            translate_y: self.y,
            scale_x: self.scale,
            scale_y: self.scale,
            rotate: self.rotate.to_radians(),
        }
    }
}

impl Interpolate for MotionState {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        MotionState {
            // Springs overshoot; opacity must not.
            opacity: self.opacity.interpolate(&other.opacity, t).clamp(0.0, 1.0),
            x: self.x.interpolate(&other.x, t),
            y: self.y.interpolate(&other.y, t),
            x_percent: self.x_percent.interpolate(&other.x_percent, t),
            scale: self.scale.interpolate(&other.scale, t),
            rotate: self.rotate.interpolate(&other.rotate, t),
        }
    }
}
