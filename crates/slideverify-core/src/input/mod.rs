pub mod normalize;
pub mod types;

pub use normalize::PointerNormalizer;
pub use types::{
    EventOrigin, EventType, PointerEvent, PointerEventKind, PointerSource, RawPointerInput,
    TouchList, TouchPoint,
};
