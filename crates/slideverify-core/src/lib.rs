//! Drag state machine and track geometry for the slide-to-verify widget.
//!
//! This crate is host-agnostic: a host renders the widget through a
//! [`VerifierSurface`], normalizes its native input with
//! [`PointerNormalizer`], and feeds the resulting events to a
//! [`DragVerifier`].
//!
//! The widget is a client-side gesture check only and must not be treated
//! as a security boundary.

pub mod error;
pub mod geometry;
pub mod input;
pub mod options;
pub mod state;
pub mod surface;
pub mod verifier;

pub use error::VerifierError;
pub use geometry::{TrackGeometry, DEFAULT_SUCCESS_TOLERANCE};
pub use input::{
    EventOrigin, EventType, PointerEvent, PointerEventKind, PointerNormalizer, PointerSource,
    RawPointerInput, TouchList, TouchPoint,
};
pub use options::{
    CallbackError, RearmPolicy, SuccessCallback, VerifierOptions, DEFAULT_SUCCESS_TEXT,
    DEFAULT_TEXT,
};
pub use state::{DragAnchor, SnapshotCell, VerifierSnapshot, VerifierState};
pub use surface::{
    css_px, HandleIcon, VerifierSurface, CONTAINER_CLASS, HANDLE_CLASS, PROGRESS_CLASS,
    SUCCESS_CLASS, TEXT_CLASS, TRACK_CLASS,
};
pub use verifier::{DragOutcome, DragVerifier};

pub mod prelude {
    pub use crate::input::{EventOrigin, EventType, PointerEvent, PointerEventKind};
    pub use crate::options::{RearmPolicy, VerifierOptions};
    pub use crate::surface::{HandleIcon, VerifierSurface};
    pub use crate::verifier::{DragOutcome, DragVerifier};
    pub use crate::VerifierError;
}
