//! The drag-to-verify state machine.
//!
//! ```text
//! Idle --begin--> Dragging --move--> Dragging
//! Dragging --end, past threshold--> Success
//! Dragging --end, short of threshold / cancel--> Idle
//! ```
//!
//! Every geometric decision reads a fresh [`TrackGeometry`] from the surface
//! since the host may relayout between events.

use crate::error::VerifierError;
use crate::geometry::TrackGeometry;
use crate::input::{EventOrigin, PointerEvent, PointerEventKind};
use crate::options::{RearmPolicy, VerifierOptions};
use crate::state::{DragAnchor, SnapshotCell, VerifierSnapshot, VerifierState};
use crate::surface::{HandleIcon, VerifierSurface};
use std::time::Duration;

/// Result of routing one event through the verifier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragOutcome {
    /// Nothing changed: no active drag, or a locked succeeded widget.
    Ignored,
    Started,
    Moved { handle_left: f32 },
    /// The gesture ended short of the threshold (or was cancelled).
    Reset,
    Verified { elapsed: Duration },
}

pub struct DragVerifier<S: VerifierSurface> {
    surface: S,
    options: VerifierOptions,
    state: VerifierState,
    handle_left: f32,
    progress_width: f32,
    published: SnapshotCell,
}

impl<S: VerifierSurface> DragVerifier<S> {
    /// Wraps a freshly rendered surface and paints the idle state into it.
    pub fn new(surface: S, options: VerifierOptions) -> Self {
        let mut verifier = Self {
            surface,
            options,
            state: VerifierState::Idle,
            handle_left: 0.0,
            progress_width: 0.0,
            published: SnapshotCell::default(),
        };
        verifier.paint_idle();
        verifier
    }

    pub fn state(&self) -> VerifierState {
        self.state
    }

    pub fn handle_left(&self) -> f32 {
        self.handle_left
    }

    pub fn progress_width(&self) -> f32 {
        self.progress_width
    }

    pub fn snapshot(&self) -> VerifierSnapshot {
        VerifierSnapshot {
            state: self.state,
            handle_left: self.handle_left,
            progress_width: self.progress_width,
        }
    }

    /// Handle that keeps tracking this verifier's published snapshot.
    pub fn snapshot_cell(&self) -> SnapshotCell {
        self.published.clone()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn is_verified(&self) -> bool {
        self.state.is_success()
    }

    pub fn options(&self) -> &VerifierOptions {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Routes a normalized event to the matching operation.
    ///
    /// Presses only count when observed on the handle; moves, releases and
    /// cancels are honored from anywhere.
    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        origin: EventOrigin,
    ) -> Result<DragOutcome, VerifierError> {
        match event.kind {
            PointerEventKind::Down => match origin {
                EventOrigin::Handle => Ok(self.begin_drag(event)),
                EventOrigin::Document => Ok(DragOutcome::Ignored),
            },
            PointerEventKind::Move => Ok(self.continue_drag(event)),
            PointerEventKind::Up => self.end_drag(),
            PointerEventKind::Cancel => Ok(self.cancel_drag()),
        }
    }

    pub fn begin_drag(&mut self, event: &PointerEvent) -> DragOutcome {
        if self.state.is_success() && self.options.rearm == RearmPolicy::Locked {
            log::debug!("ignoring press on verified slider");
            return DragOutcome::Ignored;
        }

        event.prevent_default();
        if self.state.is_dragging() {
            log::debug!("press while dragging; drag anchor replaced");
        }
        self.state = VerifierState::Dragging(DragAnchor::new(event.x, self.handle_left));
        self.publish();
        log::debug!(
            "drag started at x={} (handle at {})",
            event.x,
            self.handle_left
        );
        DragOutcome::Started
    }

    pub fn continue_drag(&mut self, event: &PointerEvent) -> DragOutcome {
        let Some(anchor) = self.state.anchor() else {
            return DragOutcome::Ignored;
        };

        let geometry = self.surface.geometry();
        let delta_x = event.x - anchor.pointer_x;
        let left = geometry.clamp_offset(anchor.handle_left + delta_x);
        self.move_handle(left, &geometry);
        log::trace!("drag moved to x={} -> handle {}", event.x, left);
        DragOutcome::Moved { handle_left: left }
    }

    /// Ends the active drag and decides whether it verified.
    ///
    /// On success the callback runs after the visual transition; its error
    /// is returned as [`VerifierError::Callback`].
    pub fn end_drag(&mut self) -> Result<DragOutcome, VerifierError> {
        let Some(anchor) = self.state.anchor() else {
            return Ok(DragOutcome::Ignored);
        };

        let geometry = self.surface.geometry();
        if geometry.is_degenerate() {
            log::warn!(
                "degenerate slider geometry (track {}, handle {}); resetting",
                geometry.track_width,
                geometry.handle_width
            );
            self.reset();
            return Ok(DragOutcome::Reset);
        }

        if geometry.passes_threshold(self.handle_left, self.options.success_tolerance) {
            let elapsed = anchor.started_at.elapsed();
            self.succeed(&geometry)?;
            Ok(DragOutcome::Verified { elapsed })
        } else {
            log::debug!("released at {} short of threshold", self.handle_left);
            self.reset();
            Ok(DragOutcome::Reset)
        }
    }

    /// Abandons an active drag as if it had been released short.
    pub fn cancel_drag(&mut self) -> DragOutcome {
        if !self.state.is_dragging() {
            return DragOutcome::Ignored;
        }
        log::debug!("drag cancelled");
        self.reset();
        DragOutcome::Reset
    }

    /// Returns the widget to idle: default label and icon, handle and
    /// progress at zero. Also the explicit re-arm for a succeeded widget.
    pub fn reset(&mut self) {
        if self.state.is_success() {
            log::debug!("re-arming verified slider");
        }
        self.state = VerifierState::Idle;
        self.paint_idle();
    }

    fn succeed(&mut self, geometry: &TrackGeometry) -> Result<(), VerifierError> {
        self.state = VerifierState::Success;
        self.surface.set_succeeded(true);
        self.surface.set_label(&self.options.success_text);
        self.surface.set_handle_icon(HandleIcon::Check);
        self.move_handle(geometry.max_offset(), geometry);
        log::debug!("slider verified");
        self.options
            .notify_success()
            .map_err(VerifierError::Callback)
    }

    fn paint_idle(&mut self) {
        self.handle_left = 0.0;
        self.progress_width = 0.0;
        self.surface.set_succeeded(false);
        self.surface.set_label(&self.options.default_text);
        self.surface.set_handle_icon(HandleIcon::Arrows);
        self.surface.set_handle_offset(0.0);
        self.surface.set_progress_width(0.0);
        self.publish();
    }

    fn move_handle(&mut self, left: f32, geometry: &TrackGeometry) {
        self.handle_left = left;
        self.progress_width = geometry.progress_width(left);
        self.surface.set_handle_offset(left);
        self.surface.set_progress_width(self.progress_width);
        self.publish();
    }

    fn publish(&self) {
        self.published.set(self.snapshot());
    }
}
