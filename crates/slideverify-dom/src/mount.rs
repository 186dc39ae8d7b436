//! Mounting a verifier into a [`Document`].
//!
//! The rendered subtree is
//! `div.slider-container > [div.slider-bg > [div.slider-progress, div.slider-text], div.slider-btn]`.
//! Presses are subscribed on the handle; moves, releases and cancels on the
//! whole document so a drag keeps tracking once the pointer leaves the handle.

use crate::document::{Document, ElementId};
use crate::error::DomError;
use crate::events::{DomEvent, EventHandler, EventTarget, ListenerError, ListenerId};
use slideverify_core::{
    css_px, DragVerifier, EventOrigin, EventType, HandleIcon, PointerNormalizer, SnapshotCell,
    VerifierError, VerifierOptions, VerifierSnapshot, VerifierState, VerifierSurface,
    CONTAINER_CLASS, HANDLE_CLASS, PROGRESS_CLASS, SUCCESS_CLASS, TEXT_CLASS, TRACK_CLASS,
};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// [`VerifierSurface`] backed by elements of an in-memory [`Document`].
#[derive(Debug, Clone)]
pub struct DomSurface {
    document: Document,
    container: ElementId,
    track: ElementId,
    progress: ElementId,
    text: ElementId,
    handle: ElementId,
}

impl DomSurface {
    /// Builds the widget subtree and appends it to `mount_target`.
    pub fn render(document: &Document, mount_target: ElementId) -> Result<Self, DomError> {
        let container = document.create_element("div");
        document.add_class(container, CONTAINER_CLASS)?;

        let track = document.create_element("div");
        document.add_class(track, TRACK_CLASS)?;

        let progress = document.create_element("div");
        document.add_class(progress, PROGRESS_CLASS)?;
        document.append_child(track, progress)?;

        let text = document.create_element("div");
        document.add_class(text, TEXT_CLASS)?;
        document.append_child(track, text)?;

        let handle = document.create_element("div");
        document.add_class(handle, HANDLE_CLASS)?;

        document.append_child(container, track)?;
        document.append_child(container, handle)?;
        document.append_child(mount_target, container)?;

        Ok(Self {
            document: document.clone(),
            container,
            track,
            progress,
            text,
            handle,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    pub fn track(&self) -> ElementId {
        self.track
    }

    pub fn progress(&self) -> ElementId {
        self.progress
    }

    pub fn text(&self) -> ElementId {
        self.text
    }

    pub fn handle(&self) -> ElementId {
        self.handle
    }

    fn apply(&self, what: &str, result: Result<(), DomError>) {
        if let Err(err) = result {
            log::warn!("failed to update slider {}: {}", what, err);
        }
    }
}

impl VerifierSurface for DomSurface {
    fn track_width(&self) -> f32 {
        self.document.offset_width(self.container)
    }

    fn handle_width(&self) -> f32 {
        self.document.offset_width(self.handle)
    }

    fn set_handle_offset(&mut self, left: f32) {
        self.apply(
            "handle offset",
            self.document.set_style(self.handle, "left", &css_px(left)),
        );
    }

    fn set_progress_width(&mut self, width: f32) {
        self.apply(
            "progress",
            self.document
                .set_style(self.progress, "width", &css_px(width)),
        );
    }

    fn set_label(&mut self, text: &str) {
        self.apply("label", self.document.set_text_content(self.text, text));
    }

    fn set_handle_icon(&mut self, icon: HandleIcon) {
        self.apply(
            "icon",
            self.document.set_inner_html(self.handle, icon.markup()),
        );
    }

    fn set_succeeded(&mut self, succeeded: bool) {
        self.apply(
            "success class",
            self.document
                .toggle_class(self.container, SUCCESS_CLASS, succeeded),
        );
    }
}

struct Binding {
    verifier: DragVerifier<DomSurface>,
    normalizer: PointerNormalizer,
    /// Set by a `reset()` that arrived while this binding was dispatching.
    pending_reset: Rc<Cell<bool>>,
}

/// Listener ids registered on a document, removed when released or dropped.
pub struct ListenerSet {
    document: Document,
    ids: Vec<ListenerId>,
}

impl ListenerSet {
    pub fn new(document: &Document) -> Self {
        Self {
            document: document.clone(),
            ids: Vec::new(),
        }
    }

    pub fn add(&mut self, target: EventTarget, event_type: EventType, handler: EventHandler) {
        let id = self
            .document
            .add_event_listener(target, event_type, handler);
        self.ids.push(id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Removes every listener; returns how many were still registered.
    pub fn release(&mut self) -> usize {
        self.ids
            .drain(..)
            .filter(|id| self.document.remove_event_listener(*id))
            .count()
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.release();
    }
}

/// A verifier rendered into a document together with its subscriptions.
///
/// Dropping it tears the subscriptions down; the rendered markup stays in
/// the document.
///
/// The accessors read the verifier's published snapshot, so they are safe to
/// call from inside its own success callback.
pub struct MountedVerifier {
    binding: Rc<RefCell<Binding>>,
    snapshot: SnapshotCell,
    pending_reset: Rc<Cell<bool>>,
    surface: DomSurface,
    listeners: ListenerSet,
}

fn render_failed(target: ElementId, err: DomError) -> VerifierError {
    VerifierError::Render {
        target: target.to_string(),
        reason: err.to_string(),
    }
}

/// Renders a verifier into `target` and subscribes its input listeners.
pub fn mount(
    document: &Document,
    target: ElementId,
    options: VerifierOptions,
) -> Result<MountedVerifier, VerifierError> {
    if !document.contains(target) {
        return Err(VerifierError::MountTargetMissing(target.to_string()));
    }
    let occupied = document
        .children(target)
        .into_iter()
        .any(|child| document.has_class(child, CONTAINER_CLASS));
    if occupied {
        log::warn!("{} already hosts a slider; mount rejected", target);
        return Err(VerifierError::AlreadyMounted(target.to_string()));
    }

    let surface =
        DomSurface::render(document, target).map_err(|err| render_failed(target, err))?;
    let verifier = DragVerifier::new(surface.clone(), options);
    let snapshot = verifier.snapshot_cell();
    let pending_reset = Rc::new(Cell::new(false));
    let binding = Rc::new(RefCell::new(Binding {
        verifier,
        normalizer: PointerNormalizer::new(),
        pending_reset: pending_reset.clone(),
    }));

    let mut listeners = ListenerSet::new(document);
    let weak = Rc::downgrade(&binding);
    for event_type in EventType::HANDLE {
        listeners.add(
            EventTarget::Element(surface.handle()),
            event_type,
            input_listener(weak.clone(), EventOrigin::Handle),
        );
    }
    for event_type in EventType::DOCUMENT {
        listeners.add(
            EventTarget::Document,
            event_type,
            input_listener(weak.clone(), EventOrigin::Document),
        );
    }

    log::debug!(
        "slider mounted into {} with {} listeners",
        target,
        listeners.len()
    );
    Ok(MountedVerifier {
        binding,
        snapshot,
        pending_reset,
        surface,
        listeners,
    })
}

/// Like [`mount`], resolving the target by its `id` attribute.
pub fn mount_by_id(
    document: &Document,
    id: &str,
    options: VerifierOptions,
) -> Result<MountedVerifier, VerifierError> {
    let target = document
        .get_element_by_id(id)
        .ok_or_else(|| VerifierError::MountTargetMissing(id.to_string()))?;
    mount(document, target, options)
}

fn input_listener(binding: Weak<RefCell<Binding>>, origin: EventOrigin) -> EventHandler {
    Rc::new(move |event: &DomEvent| -> Result<(), ListenerError> {
        let Some(binding) = binding.upgrade() else {
            return Ok(());
        };
        let Ok(mut guard) = binding.try_borrow_mut() else {
            log::warn!(
                "{} dispatched re-entrantly into a slider; ignored",
                event.event_type().name()
            );
            return Ok(());
        };
        let binding = &mut *guard;
        let Some(pointer) = binding.normalizer.normalize(event.input()) else {
            return Ok(());
        };
        let outcome = binding.verifier.handle_event(&pointer, origin);
        if pointer.is_default_prevented() {
            event.prevent_default();
        }
        if binding.pending_reset.take() {
            log::debug!("applying reset requested during dispatch");
            binding.verifier.reset();
        }
        outcome?;
        Ok(())
    })
}

impl MountedVerifier {
    pub fn surface(&self) -> &DomSurface {
        &self.surface
    }

    pub fn document(&self) -> &Document {
        self.surface.document()
    }

    pub fn snapshot(&self) -> VerifierSnapshot {
        self.snapshot.get()
    }

    pub fn state(&self) -> VerifierState {
        self.snapshot.get().state
    }

    pub fn handle_left(&self) -> f32 {
        self.snapshot.get().handle_left
    }

    pub fn progress_width(&self) -> f32 {
        self.snapshot.get().progress_width
    }

    pub fn is_verified(&self) -> bool {
        self.state().is_success()
    }

    /// Returns the widget to idle, re-arming it after a success.
    ///
    /// Called while one of this widget's events is being dispatched (for
    /// example from `onSuccess`), the reset is applied once that dispatch
    /// finishes.
    pub fn reset(&self) {
        match self.binding.try_borrow_mut() {
            Ok(mut binding) => binding.verifier.reset(),
            Err(_) => {
                log::debug!("reset requested during dispatch; deferred");
                self.pending_reset.set(true);
            }
        }
    }

    /// Runs `f` with the underlying state machine, or returns `None` while
    /// one of this widget's events is being dispatched.
    pub fn with_verifier<R>(
        &self,
        f: impl FnOnce(&mut DragVerifier<DomSurface>) -> R,
    ) -> Option<R> {
        let mut binding = self.binding.try_borrow_mut().ok()?;
        Some(f(&mut binding.verifier))
    }

    pub fn is_subscribed(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Unsubscribes every listener this verifier registered. Idempotent.
    pub fn teardown(&mut self) -> usize {
        let removed = self.listeners.release();
        if removed > 0 {
            log::debug!("slider torn down; {} listeners removed", removed);
        }
        removed
    }
}
