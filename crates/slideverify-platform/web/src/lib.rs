//! Browser adapter for slideverify.
//!
//! Renders the widget into real DOM elements through `web-sys`, feeds mouse
//! and touch events to the drag state machine, and owns the listener
//! closures so they can be removed when the host unmounts the widget.

mod platform;
mod surface;
mod verifier;

pub use platform::WebPlatform;
pub use surface::WebSurface;
pub use verifier::WebVerifier;
