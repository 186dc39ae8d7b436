//! Capability-normalizing adapter at the input boundary.
//!
//! Converts host-shaped mouse and touch input into a single canonical
//! [`PointerEvent`] so nothing past this point reads coordinates differently
//! per input modality.

use super::types::{PointerEvent, PointerEventKind, PointerSource, RawPointerInput};

#[derive(Debug, Default)]
pub struct PointerNormalizer {
    last_x: Option<f32>,
}

impl PointerNormalizer {
    pub fn new() -> Self {
        Self { last_x: None }
    }

    /// Coordinate of the most recent normalized event, if any.
    pub fn last_x(&self) -> Option<f32> {
        self.last_x
    }

    /// Returns `None` for press or move input that carries no coordinate at
    /// all (a touch event with empty touch lists).
    ///
    /// Releases never need a coordinate; when a touch-end has no touch points
    /// the last seen coordinate is reused.
    pub fn normalize(&mut self, raw: &RawPointerInput) -> Option<PointerEvent> {
        let kind = raw.event_type().kind();
        let (source, x) = match raw {
            RawPointerInput::Mouse { client_x, .. } => (PointerSource::Mouse, Some(*client_x)),
            RawPointerInput::Touch {
                touches,
                changed_touches,
                ..
            } => (
                PointerSource::Touch,
                touches
                    .first()
                    .or_else(|| changed_touches.first())
                    .map(|point| point.client_x),
            ),
        };

        let x = match (x, kind) {
            (Some(x), _) => x,
            (None, PointerEventKind::Up | PointerEventKind::Cancel) => self.last_x.unwrap_or(0.0),
            (None, _) => {
                log::trace!("dropping {} without a touch point", raw.event_type().name());
                return None;
            }
        };

        self.last_x = Some(x);
        Some(PointerEvent::new(kind, source, x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{EventType, TouchPoint};

    #[test]
    fn mouse_coordinate_read_directly() {
        let mut normalizer = PointerNormalizer::new();
        let event = normalizer
            .normalize(&RawPointerInput::mouse(EventType::MouseDown, 42.0))
            .expect("mouse down normalizes");

        assert_eq!(event.kind, PointerEventKind::Down);
        assert_eq!(event.source, PointerSource::Mouse);
        assert_eq!(event.x, 42.0);
    }

    #[test]
    fn touch_coordinate_read_from_first_touch() {
        let mut normalizer = PointerNormalizer::new();
        let raw = RawPointerInput::touch(
            EventType::TouchMove,
            [TouchPoint::new(3, 120.0), TouchPoint::new(4, 300.0)],
            [],
        );
        let event = normalizer.normalize(&raw).expect("touch move normalizes");

        assert_eq!(event.kind, PointerEventKind::Move);
        assert_eq!(event.source, PointerSource::Touch);
        assert_eq!(event.x, 120.0);
    }

    #[test]
    fn touch_end_falls_back_to_changed_touches() {
        let mut normalizer = PointerNormalizer::new();
        let raw = RawPointerInput::touch(EventType::TouchEnd, [], [TouchPoint::new(0, 77.0)]);
        let event = normalizer.normalize(&raw).expect("touch end normalizes");

        assert_eq!(event.kind, PointerEventKind::Up);
        assert_eq!(event.x, 77.0);
    }

    #[test]
    fn touch_end_without_points_reuses_last_coordinate() {
        let mut normalizer = PointerNormalizer::new();
        normalizer.normalize(&RawPointerInput::touch(
            EventType::TouchMove,
            [TouchPoint::new(0, 64.0)],
            [],
        ));

        let event = normalizer
            .normalize(&RawPointerInput::touch(EventType::TouchEnd, [], []))
            .expect("release always normalizes");

        assert_eq!(event.x, 64.0);
        assert_eq!(normalizer.last_x(), Some(64.0));
    }

    #[test]
    fn touch_move_without_points_is_dropped() {
        let mut normalizer = PointerNormalizer::new();
        let raw = RawPointerInput::touch(EventType::TouchMove, [], []);

        assert!(normalizer.normalize(&raw).is_none());
        assert_eq!(normalizer.last_x(), None);
    }

    #[test]
    fn event_names_round_trip() {
        for ty in EventType::ALL {
            assert_eq!(EventType::from_name(ty.name()), Some(ty));
        }
        assert_eq!(EventType::from_name("pointerdown"), None);
        assert_eq!(EventType::TouchCancel.kind(), PointerEventKind::Cancel);
    }

    #[test]
    fn prevent_default_shared_across_copies() {
        let event = PointerEvent::mouse(PointerEventKind::Down, 0.0);
        let copy = event.clone();
        copy.prevent_default();
        assert!(event.is_default_prevented());
    }
}
