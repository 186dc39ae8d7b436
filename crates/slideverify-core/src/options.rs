//! Construction-time configuration for a verifier.

use crate::geometry::DEFAULT_SUCCESS_TOLERANCE;
use std::fmt;

/// Error a fallible success callback may report.
pub type CallbackError = Box<dyn std::error::Error + 'static>;

pub type SuccessCallback = Box<dyn FnMut() -> Result<(), CallbackError>>;

pub const DEFAULT_SUCCESS_TEXT: &str = "验证通过";
pub const DEFAULT_TEXT: &str = "请向右滑动验证";

/// What a new gesture does on a widget that has already succeeded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RearmPolicy {
    /// Gestures are ignored until the host calls `reset()`.
    #[default]
    Locked,
    /// Gestures are processed again: a release past the threshold fires the
    /// success callback again, anything short of it resets to idle.
    Rearm,
}

/// Configuration for a slide-to-verify widget.
pub struct VerifierOptions {
    /// Label shown once the handle has been released at the end of the track.
    pub success_text: String,
    /// Label shown while idle or dragging.
    pub default_text: String,
    /// How far short of the track end a release may land and still succeed.
    pub success_tolerance: f32,
    pub rearm: RearmPolicy,
    on_success: Option<SuccessCallback>,
}

impl Default for VerifierOptions {
    fn default() -> Self {
        Self {
            success_text: DEFAULT_SUCCESS_TEXT.into(),
            default_text: DEFAULT_TEXT.into(),
            success_tolerance: DEFAULT_SUCCESS_TOLERANCE,
            rearm: RearmPolicy::default(),
            on_success: None,
        }
    }
}

impl fmt::Debug for VerifierOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifierOptions")
            .field("success_text", &self.success_text)
            .field("default_text", &self.default_text)
            .field("success_tolerance", &self.success_tolerance)
            .field("rearm", &self.rearm)
            .field(
                "on_success",
                &if self.on_success.is_some() {
                    "provided"
                } else {
                    "none"
                },
            )
            .finish()
    }
}

impl VerifierOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_success_text(mut self, text: impl Into<String>) -> Self {
        self.success_text = text.into();
        self
    }

    pub fn with_default_text(mut self, text: impl Into<String>) -> Self {
        self.default_text = text.into();
        self
    }

    pub fn with_success_tolerance(mut self, tolerance: f32) -> Self {
        self.success_tolerance = tolerance.max(0.0);
        self
    }

    pub fn with_rearm(mut self, rearm: RearmPolicy) -> Self {
        self.rearm = rearm;
        self
    }

    /// Invoked once for every gesture released past the threshold.
    pub fn on_success(self, mut callback: impl FnMut() + 'static) -> Self {
        self.on_success_fallible(move || {
            callback();
            Ok(())
        })
    }

    /// Like [`on_success`](Self::on_success), but the callback's error is
    /// returned to whoever dispatched the releasing event.
    pub fn on_success_fallible(
        mut self,
        callback: impl FnMut() -> Result<(), CallbackError> + 'static,
    ) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    pub fn has_success_callback(&self) -> bool {
        self.on_success.is_some()
    }

    pub(crate) fn notify_success(&mut self) -> Result<(), CallbackError> {
        match self.on_success.as_mut() {
            Some(callback) => callback(),
            None => Ok(()),
        }
    }
}
