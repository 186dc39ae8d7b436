use slideverify_core::{
    css_px, HandleIcon, VerifierSurface, CONTAINER_CLASS, HANDLE_CLASS, PROGRESS_CLASS,
    SUCCESS_CLASS, TEXT_CLASS, TRACK_CLASS,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

/// [`VerifierSurface`] over real browser elements.
#[derive(Clone, Debug)]
pub struct WebSurface {
    container: HtmlElement,
    track: HtmlElement,
    progress: HtmlElement,
    text: HtmlElement,
    handle: HtmlElement,
}

fn div(document: &Document, class: &str) -> Result<HtmlElement, JsValue> {
    let element = document.create_element("div")?;
    element.set_class_name(class);
    element.dyn_into::<HtmlElement>().map_err(JsValue::from)
}

impl WebSurface {
    /// Creates the widget subtree and appends it to `mount_target`.
    pub fn render(document: &Document, mount_target: &Element) -> Result<Self, JsValue> {
        let container = div(document, CONTAINER_CLASS)?;
        let track = div(document, TRACK_CLASS)?;
        let progress = div(document, PROGRESS_CLASS)?;
        let text = div(document, TEXT_CLASS)?;
        let handle = div(document, HANDLE_CLASS)?;

        track.append_child(&progress)?;
        track.append_child(&text)?;
        container.append_child(&track)?;
        container.append_child(&handle)?;
        mount_target.append_child(&container)?;

        Ok(Self {
            container,
            track,
            progress,
            text,
            handle,
        })
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    pub fn track(&self) -> &HtmlElement {
        &self.track
    }

    pub fn handle(&self) -> &HtmlElement {
        &self.handle
    }

    fn apply<T>(what: &str, result: Result<T, JsValue>) {
        if let Err(err) = result {
            log::warn!("failed to update slider {}: {:?}", what, err);
        }
    }
}

impl VerifierSurface for WebSurface {
    fn track_width(&self) -> f32 {
        self.container.offset_width() as f32
    }

    fn handle_width(&self) -> f32 {
        self.handle.offset_width() as f32
    }

    fn set_handle_offset(&mut self, left: f32) {
        Self::apply(
            "handle offset",
            self.handle.style().set_property("left", &css_px(left)),
        );
    }

    fn set_progress_width(&mut self, width: f32) {
        Self::apply(
            "progress",
            self.progress.style().set_property("width", &css_px(width)),
        );
    }

    fn set_label(&mut self, text: &str) {
        self.text.set_text_content(Some(text));
    }

    fn set_handle_icon(&mut self, icon: HandleIcon) {
        self.handle.set_inner_html(icon.markup());
    }

    fn set_succeeded(&mut self, succeeded: bool) {
        Self::apply(
            "success class",
            self.container
                .class_list()
                .toggle_with_force(SUCCESS_CLASS, succeeded),
        );
    }
}
