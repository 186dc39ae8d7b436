//! In-memory DOM rendering surface for slideverify.
//!
//! Provides a small element tree with class and inline-style hooks, a
//! listener registry with bubbling dispatch, and [`mount`] which renders a
//! [`DragVerifier`](slideverify_core::DragVerifier) into it. Used headless
//! by tests and the demo; the browser adapter lives in
//! `slideverify-platform-web`.

pub mod document;
pub mod error;
pub mod events;
pub mod mount;

pub use document::{parse_px, Document, ElementId};
pub use error::{DispatchError, DomError};
pub use events::{DomEvent, EventHandler, EventTarget, ListenerError, ListenerId};
pub use mount::{mount, mount_by_id, DomSurface, ListenerSet, MountedVerifier};
