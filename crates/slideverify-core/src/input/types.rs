use smallvec::SmallVec;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Device family that produced an event. Informational only; the drag state
/// machine never branches on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// Where the host observed an event.
///
/// Press events only start a drag when they land on the handle, while move
/// and release events are subscribed document-wide so a drag keeps tracking
/// after the pointer leaves the handle's bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOrigin {
    Handle,
    Document,
}

/// Host event names the widget subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

impl EventType {
    pub const ALL: [EventType; 7] = [
        EventType::MouseDown,
        EventType::MouseMove,
        EventType::MouseUp,
        EventType::TouchStart,
        EventType::TouchMove,
        EventType::TouchEnd,
        EventType::TouchCancel,
    ];

    /// Events subscribed on the handle itself.
    pub const HANDLE: [EventType; 2] = [EventType::MouseDown, EventType::TouchStart];

    /// Events subscribed on the whole document.
    pub const DOCUMENT: [EventType; 5] = [
        EventType::MouseMove,
        EventType::MouseUp,
        EventType::TouchMove,
        EventType::TouchEnd,
        EventType::TouchCancel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EventType::MouseDown => "mousedown",
            EventType::MouseMove => "mousemove",
            EventType::MouseUp => "mouseup",
            EventType::TouchStart => "touchstart",
            EventType::TouchMove => "touchmove",
            EventType::TouchEnd => "touchend",
            EventType::TouchCancel => "touchcancel",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }

    pub fn kind(self) -> PointerEventKind {
        match self {
            EventType::MouseDown | EventType::TouchStart => PointerEventKind::Down,
            EventType::MouseMove | EventType::TouchMove => PointerEventKind::Move,
            EventType::MouseUp | EventType::TouchEnd => PointerEventKind::Up,
            EventType::TouchCancel => PointerEventKind::Cancel,
        }
    }

    pub fn source(self) -> PointerSource {
        match self {
            EventType::MouseDown | EventType::MouseMove | EventType::MouseUp => {
                PointerSource::Mouse
            }
            _ => PointerSource::Touch,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub identifier: i32,
    pub client_x: f32,
}

impl TouchPoint {
    pub const fn new(identifier: i32, client_x: f32) -> Self {
        Self {
            identifier,
            client_x,
        }
    }
}

pub type TouchList = SmallVec<[TouchPoint; 2]>;

/// Input as the host delivers it, before normalization.
///
/// Mouse events carry the coordinate directly; touch events nest it inside
/// the active and changed touch-point lists.
#[derive(Clone, Debug, PartialEq)]
pub enum RawPointerInput {
    Mouse {
        event_type: EventType,
        client_x: f32,
    },
    Touch {
        event_type: EventType,
        touches: TouchList,
        changed_touches: TouchList,
    },
}

impl RawPointerInput {
    pub fn mouse(event_type: EventType, client_x: f32) -> Self {
        RawPointerInput::Mouse {
            event_type,
            client_x,
        }
    }

    pub fn touch(
        event_type: EventType,
        touches: impl IntoIterator<Item = TouchPoint>,
        changed_touches: impl IntoIterator<Item = TouchPoint>,
    ) -> Self {
        RawPointerInput::Touch {
            event_type,
            touches: touches.into_iter().collect(),
            changed_touches: changed_touches.into_iter().collect(),
        }
    }

    pub fn event_type(&self) -> EventType {
        match self {
            RawPointerInput::Mouse { event_type, .. }
            | RawPointerInput::Touch { event_type, .. } => *event_type,
        }
    }
}

/// Canonical pointer event consumed by the drag state machine.
///
/// Default-action suppression is shared via `Rc<Cell>` so a host that keeps
/// a copy can see whether a handler asked for it after dispatch.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub source: PointerSource,
    pub x: f32,
    default_prevented: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, source: PointerSource, x: f32) -> Self {
        Self {
            kind,
            source,
            x,
            default_prevented: Rc::new(Cell::new(false)),
        }
    }

    pub fn mouse(kind: PointerEventKind, x: f32) -> Self {
        Self::new(kind, PointerSource::Mouse, x)
    }

    pub fn touch(kind: PointerEventKind, x: f32) -> Self {
        Self::new(kind, PointerSource::Touch, x)
    }

    /// Suppress the host's default action (text selection, page scroll).
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}
