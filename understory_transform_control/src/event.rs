// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform events and the sinks that receive them.
//!
//! Actions never know who is listening. The event layer of a
//! [`ControlChain`](crate::ControlChain) emits a [`TransformEvent`] into
//! whatever [`EventSink`] the caller supplied, once per step that changed the
//! target. Emission is synchronous and fire-and-forget.

use alloc::vec::Vec;

use kurbo::Point;
use ui_events::keyboard::Modifiers;

use crate::session::TransformSession;

/// The pointer sample that drives one step of a gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    /// Pointer position in canvas coordinates.
    pub position: Point,
    /// Keyboard modifiers held during the sample.
    pub modifiers: Modifiers,
}

impl PointerInput {
    /// A sample at `position` with no modifiers held.
    #[must_use]
    pub fn new(position: impl Into<Point>) -> Self {
        Self {
            position: position.into(),
            modifiers: Modifiers::empty(),
        }
    }

    /// Returns a copy with `modifiers` held.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns `true` if the alt (option) key is held.
    #[must_use]
    pub fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }
}

/// What kind of change an event reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformEventKind {
    /// The target moved.
    Moving,
    /// The target was scaled.
    Scaling,
    /// The target was rotated.
    Rotating,
    /// The target was skewed.
    Skewing,
}

impl TransformEventKind {
    /// Conventional event name (`"moving"`, `"scaling"`, …).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Moving => "moving",
            Self::Scaling => "scaling",
            Self::Rotating => "rotating",
            Self::Skewing => "skewing",
        }
    }
}

/// A change notification emitted by the event layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformEvent<'a> {
    /// What changed.
    pub kind: TransformEventKind,
    /// The pointer sample that caused the change.
    pub input: &'a PointerInput,
    /// The session as seen by the layer that emitted the event.
    pub session: &'a TransformSession,
}

impl TransformEvent<'_> {
    /// Pointer position of the sample that caused the change.
    #[must_use]
    pub fn pointer(&self) -> Point {
        self.input.position
    }
}

/// Receiver of [`TransformEvent`]s.
pub trait EventSink {
    /// Delivers one event. Must not fail.
    fn emit(&mut self, event: TransformEvent<'_>);
}

impl EventSink for () {
    fn emit(&mut self, _event: TransformEvent<'_>) {}
}

impl<F> EventSink for F
where
    F: FnMut(TransformEvent<'_>),
{
    fn emit(&mut self, event: TransformEvent<'_>) {
        self(event);
    }
}

/// An owned copy of an emitted event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecordedEvent {
    /// What changed.
    pub kind: TransformEventKind,
    /// Pointer sample that caused the change.
    pub input: PointerInput,
    /// Session seen by the emitting layer.
    pub session: TransformSession,
}

/// A sink that records every event it receives.
///
/// Handy for tests and for hosts that dispatch events after the pointer
/// callback returns.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<RecordedEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of recorded events of `kind`.
    #[must_use]
    pub fn count(&self, kind: TransformEventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    /// Removes and returns all recorded events.
    pub fn drain(&mut self) -> Vec<RecordedEvent> {
        core::mem::take(&mut self.events)
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: TransformEvent<'_>) {
        self.events.push(RecordedEvent {
            kind: event.kind,
            input: *event.input,
            session: *event.session,
        });
    }
}
