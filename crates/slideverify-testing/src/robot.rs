//! Robot-style harness for driving a mounted verifier.
//!
//! Mounts a verifier into a fresh in-memory document with chosen track and
//! handle widths, then simulates mouse and touch gestures through the real
//! listener/dispatch path.
//!
//! # Example
//!
//! ```
//! use slideverify_testing::VerifierRobot;
//!
//! let mut robot = VerifierRobot::builder()
//!     .track_width(300.0)
//!     .handle_width(40.0)
//!     .build()
//!     .expect("mount succeeds");
//!
//! robot.drag(10.0, 290.0).expect("dispatch succeeds");
//! assert!(robot.is_succeeded());
//! assert_eq!(robot.success_count(), 1);
//! ```

use slideverify_core::{
    EventType, RawPointerInput, TouchPoint, VerifierError, VerifierOptions, VerifierState,
    SUCCESS_CLASS,
};
use slideverify_dom::{
    mount, parse_px, DispatchError, Document, DomEvent, ElementId, EventTarget, MountedVerifier,
};
use std::cell::Cell;
use std::rc::Rc;

const PRIMARY_TOUCH: i32 = 0;

pub struct RobotBuilder {
    track_width: f32,
    handle_width: f32,
    options: VerifierOptions,
    failure: Option<String>,
}

impl Default for RobotBuilder {
    fn default() -> Self {
        Self {
            track_width: 300.0,
            handle_width: 40.0,
            options: VerifierOptions::default(),
            failure: None,
        }
    }
}

impl RobotBuilder {
    pub fn track_width(mut self, width: f32) -> Self {
        self.track_width = width;
        self
    }

    pub fn handle_width(mut self, width: f32) -> Self {
        self.handle_width = width;
        self
    }

    /// Options for the mounted verifier. Any success callback is replaced by
    /// the robot's own counter.
    pub fn options(mut self, options: VerifierOptions) -> Self {
        self.options = options;
        self
    }

    /// Make the success callback fail with `message` after counting.
    pub fn failing_callback(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn build(self) -> Result<VerifierRobot, VerifierError> {
        let document = Document::new();
        let mount_target = document.create_element("div");
        document
            .append_child(document.body(), mount_target)
            .map_err(|err| VerifierError::MountTargetMissing(err.to_string()))?;

        let successes = Rc::new(Cell::new(0));
        let counter = successes.clone();
        let failure = self.failure;
        let options = self.options.on_success_fallible(move || {
            counter.set(counter.get() + 1);
            match &failure {
                Some(message) => Err(message.clone().into()),
                None => Ok(()),
            }
        });

        let mounted = mount(&document, mount_target, options)?;
        let robot = VerifierRobot {
            document,
            mount_target,
            mounted,
            successes,
            last_x: 0.0,
        };
        robot.resize_track(self.track_width);
        robot.resize_handle(self.handle_width);
        Ok(robot)
    }
}

/// Programmatic control over one mounted verifier.
pub struct VerifierRobot {
    document: Document,
    mount_target: ElementId,
    mounted: MountedVerifier,
    successes: Rc<Cell<usize>>,
    last_x: f32,
}

impl VerifierRobot {
    pub fn builder() -> RobotBuilder {
        RobotBuilder::default()
    }

    /// Robot with a 300px track, 40px handle and the given options.
    pub fn new(options: VerifierOptions) -> Result<Self, VerifierError> {
        Self::builder().options(options).build()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn mount_target(&self) -> ElementId {
        self.mount_target
    }

    pub fn mounted(&self) -> &MountedVerifier {
        &self.mounted
    }

    pub fn mounted_mut(&mut self) -> &mut MountedVerifier {
        &mut self.mounted
    }

    /// Simulates the host relaying out the track.
    pub fn resize_track(&self, width: f32) {
        let container = self.mounted.surface().container();
        if let Err(err) = self.document.set_layout_width(container, width) {
            log::warn!("robot could not resize track: {}", err);
        }
    }

    pub fn resize_handle(&self, width: f32) {
        let handle = self.mounted.surface().handle();
        if let Err(err) = self.document.set_layout_width(handle, width) {
            log::warn!("robot could not resize handle: {}", err);
        }
    }

    fn dispatch(
        &mut self,
        target: EventTarget,
        input: RawPointerInput,
    ) -> Result<DomEvent, DispatchError> {
        self.document.dispatch_event(target, input)
    }

    fn handle_target(&self) -> EventTarget {
        EventTarget::Element(self.mounted.surface().handle())
    }

    /// Mouse press on the handle.
    pub fn press(&mut self, x: f32) -> Result<DomEvent, DispatchError> {
        self.last_x = x;
        let target = self.handle_target();
        self.dispatch(target, RawPointerInput::mouse(EventType::MouseDown, x))
    }

    /// Mouse press somewhere on the track, off the handle.
    pub fn press_track(&mut self, x: f32) -> Result<DomEvent, DispatchError> {
        self.last_x = x;
        let target = EventTarget::Element(self.mounted.surface().track());
        self.dispatch(target, RawPointerInput::mouse(EventType::MouseDown, x))
    }

    /// Mouse move delivered at document level.
    pub fn move_to(&mut self, x: f32) -> Result<DomEvent, DispatchError> {
        self.last_x = x;
        self.dispatch(
            EventTarget::Document,
            RawPointerInput::mouse(EventType::MouseMove, x),
        )
    }

    /// Mouse release at the last pointer position.
    pub fn release(&mut self) -> Result<DomEvent, DispatchError> {
        let x = self.last_x;
        self.dispatch(
            EventTarget::Document,
            RawPointerInput::mouse(EventType::MouseUp, x),
        )
    }

    pub fn touch_start(&mut self, x: f32) -> Result<DomEvent, DispatchError> {
        self.last_x = x;
        let target = self.handle_target();
        let point = TouchPoint::new(PRIMARY_TOUCH, x);
        self.dispatch(
            target,
            RawPointerInput::touch(EventType::TouchStart, [point], [point]),
        )
    }

    pub fn touch_move(&mut self, x: f32) -> Result<DomEvent, DispatchError> {
        self.last_x = x;
        let point = TouchPoint::new(PRIMARY_TOUCH, x);
        self.dispatch(
            EventTarget::Document,
            RawPointerInput::touch(EventType::TouchMove, [point], [point]),
        )
    }

    /// Lifts the finger: no active touches remain.
    pub fn touch_end(&mut self) -> Result<DomEvent, DispatchError> {
        let point = TouchPoint::new(PRIMARY_TOUCH, self.last_x);
        self.dispatch(
            EventTarget::Document,
            RawPointerInput::touch(EventType::TouchEnd, [], [point]),
        )
    }

    pub fn touch_cancel(&mut self) -> Result<DomEvent, DispatchError> {
        let point = TouchPoint::new(PRIMARY_TOUCH, self.last_x);
        self.dispatch(
            EventTarget::Document,
            RawPointerInput::touch(EventType::TouchCancel, [], [point]),
        )
    }

    /// Perform a mouse drag from one point to another.
    ///
    /// Presses on the handle, moves in steps to simulate a smooth drag,
    /// then releases.
    pub fn drag(&mut self, from_x: f32, to_x: f32) -> Result<(), DispatchError> {
        self.press(from_x)?;
        let steps = 10;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.move_to(from_x + (to_x - from_x) * t)?;
        }
        self.release()?;
        Ok(())
    }

    /// Same as [`drag`](Self::drag) with touch input.
    pub fn swipe(&mut self, from_x: f32, to_x: f32) -> Result<(), DispatchError> {
        self.touch_start(from_x)?;
        let steps = 10;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.touch_move(from_x + (to_x - from_x) * t)?;
        }
        self.touch_end()?;
        Ok(())
    }

    pub fn state(&self) -> VerifierState {
        self.mounted.state()
    }

    pub fn handle_left(&self) -> f32 {
        self.mounted.handle_left()
    }

    pub fn progress_width(&self) -> f32 {
        self.mounted.progress_width()
    }

    /// Handle offset as written to the rendered `left` style.
    pub fn rendered_handle_left(&self) -> Option<f32> {
        self.document
            .style(self.mounted.surface().handle(), "left")
            .and_then(|value| parse_px(&value))
    }

    /// Progress width as written to the rendered `width` style.
    pub fn rendered_progress_width(&self) -> Option<f32> {
        self.document
            .style(self.mounted.surface().progress(), "width")
            .and_then(|value| parse_px(&value))
    }

    pub fn label(&self) -> String {
        self.document.text_content(self.mounted.surface().text())
    }

    pub fn handle_icon_markup(&self) -> String {
        self.document.inner_html(self.mounted.surface().handle())
    }

    /// Whether the container carries the success style hook.
    pub fn is_succeeded(&self) -> bool {
        self.document
            .has_class(self.mounted.surface().container(), SUCCESS_CLASS)
    }

    pub fn success_count(&self) -> usize {
        self.successes.get()
    }

    pub fn markup(&self) -> String {
        self.document.outer_html(self.mount_target)
    }

    pub fn revision(&self) -> u64 {
        self.document.revision()
    }

    pub fn reset(&self) {
        self.mounted.reset();
    }

    pub fn teardown(&mut self) -> usize {
        self.mounted.teardown()
    }
}
