//! Scripted gestures against an in-memory document.

use crate::MOUNT_ID;
use anyhow::{anyhow, Context as _, Result};
use slideverify_core::{EventType, RawPointerInput, TouchPoint, VerifierOptions};
use slideverify_dom::{mount_by_id, Document, EventTarget, MountedVerifier};
use std::cell::Cell;
use std::fmt::Display;
use std::io::Write;
use std::rc::Rc;

pub const TRACK_WIDTH: f32 = 300.0;
pub const HANDLE_WIDTH: f32 = 40.0;

/// What a finished script observed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptSummary {
    pub successes: usize,
    pub final_state: &'static str,
}

// Widget errors carry non-Send callback payloads, so they are flattened to
// their message before crossing into anyhow.
fn flatten(err: impl Display) -> anyhow::Error {
    anyhow!("{}", err)
}

struct Session {
    document: Document,
    verifier: MountedVerifier,
}

impl Session {
    fn mount(options: VerifierOptions) -> Result<Self> {
        let document = Document::new();
        let host = document.create_element("div");
        document.set_id(host, MOUNT_ID)?;
        document.append_child(document.body(), host)?;

        let verifier = mount_by_id(&document, MOUNT_ID, options).map_err(flatten)?;
        let surface = verifier.surface();
        document.set_layout_width(surface.container(), TRACK_WIDTH)?;
        document.set_layout_width(surface.handle(), HANDLE_WIDTH)?;
        Ok(Self { document, verifier })
    }

    fn send(&self, target: EventTarget, input: RawPointerInput) -> Result<()> {
        let event_type = input.event_type();
        self.document
            .dispatch_event(target, input)
            .map_err(flatten)
            .with_context(|| format!("dispatching {}", event_type.name()))?;
        Ok(())
    }

    fn handle(&self) -> EventTarget {
        EventTarget::Element(self.verifier.surface().handle())
    }

    fn mouse_drag(&self, from: f32, to: f32) -> Result<()> {
        self.send(
            self.handle(),
            RawPointerInput::mouse(EventType::MouseDown, from),
        )?;
        self.send(
            EventTarget::Document,
            RawPointerInput::mouse(EventType::MouseMove, to),
        )?;
        self.send(
            EventTarget::Document,
            RawPointerInput::mouse(EventType::MouseUp, to),
        )
    }

    fn touch_swipe(&self, from: f32, to: f32) -> Result<()> {
        let point = |x| [TouchPoint::new(0, x)];
        self.send(
            self.handle(),
            RawPointerInput::touch(EventType::TouchStart, point(from), point(from)),
        )?;
        let step = (to - from) / 4.0;
        for i in 1..=4 {
            let x = from + step * i as f32;
            self.send(
                EventTarget::Document,
                RawPointerInput::touch(EventType::TouchMove, point(x), point(x)),
            )?;
        }
        self.send(
            EventTarget::Document,
            RawPointerInput::touch(EventType::TouchEnd, Vec::new(), point(to)),
        )
    }

    fn report(&self, out: &mut impl Write, step: &str) -> Result<()> {
        writeln!(
            out,
            "{:<28} state={:<8} handle={:>6.1}px progress={:>6.1}px",
            step,
            self.verifier.state().name(),
            self.verifier.handle_left(),
            self.verifier.progress_width(),
        )?;
        Ok(())
    }
}

/// Mounts a widget, slides it short, verifies it by touch, resets it and
/// unmounts it, writing one line per step to `out`.
pub fn run(out: &mut impl Write) -> Result<ScriptSummary> {
    let successes = Rc::new(Cell::new(0));
    let counter = Rc::clone(&successes);
    let options = VerifierOptions::new().on_success(move || {
        counter.set(counter.get() + 1);
        log::info!("verification succeeded");
    });

    let mut session = Session::mount(options)?;
    let container = session.verifier.surface().container();
    writeln!(out, "{}", session.document.outer_html(container))?;
    session.report(out, "mounted")?;

    session.mouse_drag(10.0, 150.0)?;
    session.report(out, "mouse release short of 255px")?;

    session.touch_swipe(10.0, 400.0)?;
    session.report(out, "touch swipe past the end")?;

    // Locked after success: this gesture is ignored.
    session.mouse_drag(10.0, 100.0)?;
    session.report(out, "press while verified")?;

    writeln!(out, "{}", session.document.outer_html(container))?;

    session.verifier.reset();
    session.report(out, "host reset")?;

    let removed = session.verifier.teardown();
    writeln!(out, "unmounted; {} listeners removed", removed)?;

    Ok(ScriptSummary {
        successes: successes.get(),
        final_state: session.verifier.state().name(),
    })
}
