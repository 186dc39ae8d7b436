//! Demo host for the slide-to-verify widget.
//!
//! On native targets [`script`] drives a widget mounted on the in-memory
//! document through a few scripted gestures. With the `web` feature on
//! wasm32 the same widget is mounted into the page's `#captcha` element.

/// Element id both hosts mount the widget into.
pub const MOUNT_ID: &str = "captcha";

#[cfg(not(target_arch = "wasm32"))]
pub mod script;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;
