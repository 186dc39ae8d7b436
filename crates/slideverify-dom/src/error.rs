use crate::document::ElementId;
use crate::events::{ListenerError, ListenerId};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    UnknownElement(ElementId),
    /// Appending would make an element its own ancestor.
    CycleDetected {
        parent: ElementId,
        child: ElementId,
    },
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::UnknownElement(id) => write!(f, "unknown element {}", id),
            DomError::CycleDetected { parent, child } => {
                write!(f, "appending {} to {} would create a cycle", child, parent)
            }
        }
    }
}

impl std::error::Error for DomError {}

/// A listener failed while an event was being dispatched.
///
/// Dispatch stops at the first failing listener.
#[derive(Debug)]
pub struct DispatchError {
    pub listener: ListenerId,
    pub event: &'static str,
    pub source: ListenerError,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "listener {:?} failed handling {}: {}",
            self.listener, self.event, self.source
        )
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}
