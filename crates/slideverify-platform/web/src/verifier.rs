//! Mounting a verifier into the browser DOM.
//!
//! Listener closures are retained by the [`WebVerifier`] and removed again
//! in [`WebVerifier::teardown`] or on drop, so unmounting a widget releases
//! its document-wide subscriptions.

use crate::platform::WebPlatform;
use crate::surface::WebSurface;
use slideverify_core::{
    DragVerifier, EventOrigin, EventType, SnapshotCell, VerifierError, VerifierOptions,
    VerifierSnapshot, VerifierState, CONTAINER_CLASS,
};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, Event, EventTarget};

type Handler = Closure<dyn FnMut(Event) -> Result<(), JsValue>>;

struct Binding {
    verifier: DragVerifier<WebSurface>,
    platform: WebPlatform,
    pending_reset: Rc<Cell<bool>>,
}

struct Subscription {
    target: EventTarget,
    event_type: EventType,
    handler: Handler,
}

/// Browser listeners owned by one widget; removed when released or dropped.
#[derive(Default)]
struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    fn subscribe(
        &mut self,
        target: &EventTarget,
        event_type: EventType,
        handler: Handler,
    ) -> Result<(), JsValue> {
        // Touch listeners must not be passive or preventDefault is ignored.
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event_type.name(),
            handler.as_ref().unchecked_ref(),
            &options,
        )?;
        self.subscriptions.push(Subscription {
            target: target.clone(),
            event_type,
            handler,
        });
        Ok(())
    }

    fn release(&mut self) -> usize {
        let mut removed = 0;
        for subscription in self.subscriptions.drain(..) {
            let result = subscription.target.remove_event_listener_with_callback(
                subscription.event_type.name(),
                subscription.handler.as_ref().unchecked_ref(),
            );
            match result {
                Ok(()) => removed += 1,
                Err(err) => log::warn!(
                    "failed to remove {} listener: {:?}",
                    subscription.event_type.name(),
                    err
                ),
            }
        }
        removed
    }
}

impl Drop for SubscriptionSet {
    fn drop(&mut self) {
        self.release();
    }
}

/// A verifier mounted into the browser DOM.
///
/// The accessors read the verifier's published snapshot, so they are safe to
/// call from inside its own success callback.
pub struct WebVerifier {
    binding: Rc<RefCell<Binding>>,
    snapshot: SnapshotCell,
    pending_reset: Rc<Cell<bool>>,
    surface: WebSurface,
    subscriptions: SubscriptionSet,
}

fn verifier_error(err: VerifierError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Runs `undo` on drop unless disarmed.
struct Rollback<F: FnOnce()> {
    undo: Option<F>,
}

impl<F: FnOnce()> Rollback<F> {
    fn new(undo: F) -> Self {
        Self { undo: Some(undo) }
    }

    fn disarm(mut self) {
        self.undo = None;
    }
}

impl<F: FnOnce()> Drop for Rollback<F> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            undo();
        }
    }
}

fn input_handler(binding: Weak<RefCell<Binding>>, origin: EventOrigin) -> Handler {
    Closure::wrap(Box::new(move |event: Event| -> Result<(), JsValue> {
        let Some(binding) = binding.upgrade() else {
            return Ok(());
        };
        let Ok(mut guard) = binding.try_borrow_mut() else {
            log::warn!(
                "{} dispatched re-entrantly into a slider; ignored",
                event.type_()
            );
            return Ok(());
        };
        let binding = &mut *guard;
        let Some(pointer) = binding.platform.pointer_event(&event) else {
            return Ok(());
        };
        let outcome = binding.verifier.handle_event(&pointer, origin);
        if binding.pending_reset.take() {
            log::debug!("applying reset requested during dispatch");
            binding.verifier.reset();
        }
        if pointer.is_default_prevented() {
            event.prevent_default();
        }
        match outcome {
            Ok(_) => Ok(()),
            Err(err) => {
                log::error!("slider success callback failed: {}", err);
                Err(verifier_error(err))
            }
        }
    }) as Box<dyn FnMut(Event) -> Result<(), JsValue>>)
}

impl WebVerifier {
    /// Renders a verifier into `mount_target` and subscribes its listeners.
    ///
    /// If any subscription fails, the ones already registered are removed and
    /// the rendered container is detached before the error is returned.
    pub fn mount(mount_target: &Element, options: VerifierOptions) -> Result<Self, JsValue> {
        let document = mount_target
            .owner_document()
            .ok_or_else(|| verifier_error(VerifierError::MountTargetMissing(mount_target.id())))?;
        let selector = format!(":scope > .{}", CONTAINER_CLASS);
        if mount_target.query_selector(&selector)?.is_some() {
            log::warn!(
                "#{} already hosts a slider; mount rejected",
                mount_target.id()
            );
            return Err(verifier_error(VerifierError::AlreadyMounted(
                mount_target.id(),
            )));
        }

        let surface = WebSurface::render(&document, mount_target)?;
        let rendered = Rollback::new(|| surface.container().remove());
        let verifier = DragVerifier::new(surface.clone(), options);
        let snapshot = verifier.snapshot_cell();
        let pending_reset = Rc::new(Cell::new(false));
        let binding = Rc::new(RefCell::new(Binding {
            verifier,
            platform: WebPlatform::new(),
            pending_reset: pending_reset.clone(),
        }));

        let mut subscriptions = SubscriptionSet::default();
        let weak = Rc::downgrade(&binding);
        for event_type in EventType::HANDLE {
            subscriptions.subscribe(
                surface.handle(),
                event_type,
                input_handler(weak.clone(), EventOrigin::Handle),
            )?;
        }
        for event_type in EventType::DOCUMENT {
            subscriptions.subscribe(
                &document,
                event_type,
                input_handler(weak.clone(), EventOrigin::Document),
            )?;
        }

        log::debug!(
            "slider mounted into #{} with {} listeners",
            mount_target.id(),
            subscriptions.subscriptions.len()
        );
        rendered.disarm();
        Ok(Self {
            binding,
            snapshot,
            pending_reset,
            surface,
            subscriptions,
        })
    }

    /// Like [`mount`](Self::mount), resolving the target by element id.
    pub fn mount_by_id(id: &str, options: VerifierOptions) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or("no document on window")?;
        let target = document
            .get_element_by_id(id)
            .ok_or_else(|| verifier_error(VerifierError::MountTargetMissing(id.to_string())))?;
        Self::mount(&target, options)
    }

    pub fn surface(&self) -> &WebSurface {
        &self.surface
    }

    pub fn snapshot(&self) -> VerifierSnapshot {
        self.snapshot.get()
    }

    pub fn state(&self) -> VerifierState {
        self.snapshot.get().state
    }

    pub fn is_verified(&self) -> bool {
        self.state().is_success()
    }

    /// Returns the widget to idle, re-arming it after a success.
    ///
    /// Called from inside one of this widget's own listeners, the reset is
    /// applied once that event has been handled.
    pub fn reset(&self) {
        match self.binding.try_borrow_mut() {
            Ok(mut binding) => binding.verifier.reset(),
            Err(_) => {
                log::debug!("reset requested during dispatch; deferred");
                self.pending_reset.set(true);
            }
        }
    }

    /// Removes every listener this widget registered. Idempotent.
    pub fn teardown(&mut self) -> usize {
        let removed = self.subscriptions.release();
        if removed > 0 {
            log::debug!("slider torn down; {} listeners removed", removed);
        }
        removed
    }
}
