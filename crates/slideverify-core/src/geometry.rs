//! Track geometry: clamping, progress and the success threshold.
//!
//! All values are logical pixels. Geometry is never cached by the verifier;
//! a fresh [`TrackGeometry`] is read from the surface whenever an operation
//! needs it, so host-driven resizes between gestures are honored.

/// Margin by which a release may fall short of the track end and still count.
pub const DEFAULT_SUCCESS_TOLERANCE: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TrackGeometry {
    pub track_width: f32,
    pub handle_width: f32,
}

impl TrackGeometry {
    pub const fn new(track_width: f32, handle_width: f32) -> Self {
        Self {
            track_width,
            handle_width,
        }
    }

    /// Largest offset the handle's leading edge may take.
    ///
    /// Floored at zero so a handle wider than its track never produces an
    /// inverted clamp range.
    pub fn max_offset(&self) -> f32 {
        (self.track_width - self.handle_width).max(0.0)
    }

    pub fn clamp_offset(&self, proposed: f32) -> f32 {
        if proposed.is_nan() {
            return 0.0;
        }
        proposed.clamp(0.0, self.max_offset())
    }

    /// Width of the progress fill for a handle at `handle_left`.
    ///
    /// The fill extends to the handle's center, not its leading edge.
    pub fn progress_width(&self, handle_left: f32) -> f32 {
        handle_left + self.handle_width / 2.0
    }

    pub fn passes_threshold(&self, handle_left: f32, tolerance: f32) -> bool {
        handle_left > self.track_width - self.handle_width - tolerance
    }

    /// True when the surface reported widths that make the threshold
    /// meaningless (zero, negative, non-finite, or a handle that fills the
    /// whole track).
    pub fn is_degenerate(&self) -> bool {
        !self.track_width.is_finite()
            || !self.handle_width.is_finite()
            || self.track_width <= 0.0
            || self.handle_width <= 0.0
            || self.handle_width >= self.track_width
    }
}
