use std::cell::Cell;
use std::rc::Rc;
use web_time::Instant;

/// Drag references captured at begin-drag. Overwritten, never accumulated,
/// by every new begin-drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragAnchor {
    pub pointer_x: f32,
    pub handle_left: f32,
    pub started_at: Instant,
}

impl DragAnchor {
    pub fn new(pointer_x: f32, handle_left: f32) -> Self {
        Self {
            pointer_x,
            handle_left,
            started_at: Instant::now(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum VerifierState {
    #[default]
    Idle,
    Dragging(DragAnchor),
    Success,
}

impl VerifierState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, VerifierState::Dragging(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, VerifierState::Success)
    }

    pub fn anchor(&self) -> Option<DragAnchor> {
        match self {
            VerifierState::Dragging(anchor) => Some(*anchor),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VerifierState::Idle => "idle",
            VerifierState::Dragging(_) => "dragging",
            VerifierState::Success => "success",
        }
    }
}

/// State and positions as of the verifier's last transition or move.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VerifierSnapshot {
    pub state: VerifierState,
    pub handle_left: f32,
    pub progress_width: f32,
}

/// Shared handle to the snapshot a verifier publishes.
///
/// Readable while the verifier itself is mutably borrowed, e.g. from inside
/// its own success callback. Published before that callback runs.
#[derive(Clone, Debug, Default)]
pub struct SnapshotCell(Rc<Cell<VerifierSnapshot>>);

impl SnapshotCell {
    pub fn get(&self) -> VerifierSnapshot {
        self.0.get()
    }

    pub(crate) fn set(&self, snapshot: VerifierSnapshot) {
        self.0.set(snapshot);
    }
}
