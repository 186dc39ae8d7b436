//! Contract between the verifier and the host's rendering surface.
//!
//! The surface owns the rendered subtree
//! (container → {track background → [progress, text], handle}) and reports
//! live layout widths; the verifier only ever writes through this trait.

use crate::geometry::TrackGeometry;

pub const CONTAINER_CLASS: &str = "slider-container";
pub const SUCCESS_CLASS: &str = "slider-success";
pub const TRACK_CLASS: &str = "slider-bg";
pub const PROGRESS_CLASS: &str = "slider-progress";
pub const TEXT_CLASS: &str = "slider-text";
pub const HANDLE_CLASS: &str = "slider-btn";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HandleIcon {
    #[default]
    Arrows,
    Check,
}

impl HandleIcon {
    pub fn markup(self) -> &'static str {
        match self {
            HandleIcon::Arrows => r#"<i class="fas fa-arrows-alt-h"></i>"#,
            HandleIcon::Check => r#"<i class="fas fa-check"></i>"#,
        }
    }
}

/// Formats a length as a CSS pixel value.
pub fn css_px(value: f32) -> String {
    format!("{}px", value)
}

pub trait VerifierSurface {
    /// Current rendered width of the sliding track.
    fn track_width(&self) -> f32;

    /// Current rendered width of the handle.
    fn handle_width(&self) -> f32;

    fn geometry(&self) -> TrackGeometry {
        TrackGeometry::new(self.track_width(), self.handle_width())
    }

    fn set_handle_offset(&mut self, left: f32);

    fn set_progress_width(&mut self, width: f32);

    fn set_label(&mut self, text: &str);

    fn set_handle_icon(&mut self, icon: HandleIcon);

    /// Toggles the `slider-success` style hook on the container.
    fn set_succeeded(&mut self, succeeded: bool);
}

impl<S: VerifierSurface + ?Sized> VerifierSurface for Box<S> {
    fn track_width(&self) -> f32 {
        (**self).track_width()
    }

    fn handle_width(&self) -> f32 {
        (**self).handle_width()
    }

    fn set_handle_offset(&mut self, left: f32) {
        (**self).set_handle_offset(left)
    }

    fn set_progress_width(&mut self, width: f32) {
        (**self).set_progress_width(width)
    }

    fn set_label(&mut self, text: &str) {
        (**self).set_label(text)
    }

    fn set_handle_icon(&mut self, icon: HandleIcon) {
        (**self).set_handle_icon(icon)
    }

    fn set_succeeded(&mut self, succeeded: bool) {
        (**self).set_succeeded(succeeded)
    }
}
