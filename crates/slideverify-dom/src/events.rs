//! Listener registry and bubbling dispatch.
//!
//! Dispatch snapshots the matching handlers along the propagation path
//! (target element, its ancestors, then the document) and calls them with
//! no borrow of the document held, so handlers are free to mutate the tree.
//! A listener removed mid-dispatch is skipped, matching browser semantics.

use crate::document::{Document, ElementId};
use crate::error::DispatchError;
use indexmap::IndexMap;
use slideverify_core::{EventType, RawPointerInput};
use std::cell::Cell;
use std::rc::Rc;

pub type ListenerError = Box<dyn std::error::Error + 'static>;

pub type EventHandler = Rc<dyn Fn(&DomEvent) -> Result<(), ListenerError>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Document,
    Element(ElementId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct Listener {
    target: EventTarget,
    event_type: EventType,
    handler: EventHandler,
}

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: IndexMap<ListenerId, Listener>,
    next_id: u64,
}

impl ListenerRegistry {
    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    fn insert(
        &mut self,
        target: EventTarget,
        event_type: EventType,
        handler: EventHandler,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.insert(
            id,
            Listener {
                target,
                event_type,
                handler,
            },
        );
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        self.listeners.shift_remove(&id).is_some()
    }

    fn matching(
        &self,
        target: EventTarget,
        event_type: EventType,
    ) -> Vec<(ListenerId, EventHandler)> {
        self.listeners
            .iter()
            .filter(|(_, listener)| listener.target == target && listener.event_type == event_type)
            .map(|(id, listener)| (*id, listener.handler.clone()))
            .collect()
    }
}

/// An input event travelling through the document.
#[derive(Debug)]
pub struct DomEvent {
    input: RawPointerInput,
    target: EventTarget,
    current_target: Cell<EventTarget>,
    default_prevented: Cell<bool>,
}

impl DomEvent {
    pub fn new(target: EventTarget, input: RawPointerInput) -> Self {
        Self {
            input,
            target,
            current_target: Cell::new(target),
            default_prevented: Cell::new(false),
        }
    }

    pub fn event_type(&self) -> EventType {
        self.input.event_type()
    }

    pub fn input(&self) -> &RawPointerInput {
        &self.input
    }

    pub fn target(&self) -> EventTarget {
        self.target
    }

    /// The node whose listener is currently running.
    pub fn current_target(&self) -> EventTarget {
        self.current_target.get()
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

impl Document {
    pub fn add_event_listener(
        &self,
        target: EventTarget,
        event_type: EventType,
        handler: EventHandler,
    ) -> ListenerId {
        let id = self
            .inner
            .borrow_mut()
            .listeners
            .insert(target, event_type, handler);
        log::trace!(
            "listener {:?} added for {} on {:?}",
            id,
            event_type.name(),
            target
        );
        id
    }

    /// Returns false when the listener was already removed.
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.inner.borrow_mut().listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn is_listening(&self, id: ListenerId) -> bool {
        self.inner.borrow().listeners.listeners.contains_key(&id)
    }

    fn propagation_path(&self, target: EventTarget) -> Vec<EventTarget> {
        let mut path = Vec::new();
        if let EventTarget::Element(id) = target {
            let tree = self.inner.borrow();
            let mut current = Some(id);
            while let Some(element) = current {
                path.push(EventTarget::Element(element));
                current = tree.parent_of(element);
            }
        }
        path.push(EventTarget::Document);
        path
    }

    /// Dispatches `input` at `target` and bubbles it up to the document.
    ///
    /// Returns the event so callers can inspect `is_default_prevented`.
    pub fn dispatch_event(
        &self,
        target: EventTarget,
        input: RawPointerInput,
    ) -> Result<DomEvent, DispatchError> {
        let event = DomEvent::new(target, input);
        let event_type = event.event_type();

        for node in self.propagation_path(target) {
            let handlers = self.inner.borrow().listeners.matching(node, event_type);
            event.current_target.set(node);
            for (id, handler) in handlers {
                if !self.is_listening(id) {
                    continue;
                }
                handler(&event).map_err(|source| DispatchError {
                    listener: id,
                    event: event_type.name(),
                    source,
                })?;
            }
        }
        Ok(event)
    }
}
