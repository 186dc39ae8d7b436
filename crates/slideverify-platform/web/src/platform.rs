use slideverify_core::{
    EventType, PointerEvent, PointerNormalizer, RawPointerInput, TouchList, TouchPoint,
};
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, TouchEvent};

/// Converts browser mouse and touch events into canonical pointer events.
#[derive(Debug, Default)]
pub struct WebPlatform {
    normalizer: PointerNormalizer,
}

impl WebPlatform {
    pub fn new() -> Self {
        Self {
            normalizer: PointerNormalizer::new(),
        }
    }

    /// Reads the host-shaped input out of a DOM event.
    ///
    /// `clientX` is already in CSS pixels, the same space `offsetWidth` and
    /// `style.left` use, so no scale factor is applied.
    pub fn raw_input(event: &Event) -> Option<RawPointerInput> {
        let event_type = EventType::from_name(&event.type_())?;
        if let Some(touch) = event.dyn_ref::<TouchEvent>() {
            return Some(RawPointerInput::touch(
                event_type,
                touch_points(&touch.touches()),
                touch_points(&touch.changed_touches()),
            ));
        }
        event
            .dyn_ref::<MouseEvent>()
            .map(|mouse| RawPointerInput::mouse(event_type, mouse.client_x() as f32))
    }

    pub fn pointer_event(&mut self, event: &Event) -> Option<PointerEvent> {
        let raw = Self::raw_input(event)?;
        self.normalizer.normalize(&raw)
    }
}

fn touch_points(list: &web_sys::TouchList) -> TouchList {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .map(|touch| TouchPoint::new(touch.identifier(), touch.client_x() as f32))
        .collect()
}
