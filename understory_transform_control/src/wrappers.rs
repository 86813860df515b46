// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layered action wrappers.
//!
//! A raw action only knows geometry: it reads the pointer and mutates the
//! target. The cross-cutting parts of an interaction are separate layers that
//! wrap it. Each layer is a free function with the same shape, so it can be
//! used and tested on its own:
//!
//! - [`disable_when_locked`] short-circuits when a lock flag is set.
//! - [`adapt_transform`] replaces the session with an adapted copy.
//! - [`fixed_anchor`] pins the session origin to its pre-action position.
//! - [`fire_event`] emits an event when the inner call reports a change.
//!
//! [`ControlChain`] stores an ordered list of [`Layer`]s, outermost first,
//! and runs them around its action.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_transform_control::{
//!     ActionContext, ActionKind, CanvasObject, ControlChain, EventLog, Layer, LockFlags,
//!     PointerInput, TransformEventKind, TransformSession, Transformable,
//! };
//!
//! fn nudge(cx: &mut ActionContext<'_, CanvasObject>, _: &TransformSession, _: Point) -> bool {
//!     let angle = cx.target.angle();
//!     cx.target.set_angle(angle + 1.0);
//!     true
//! }
//!
//! let chain = ControlChain::new(nudge)
//!     .with_layer(Layer::DisableWhenLocked(LockFlags::ROTATION))
//!     .with_layer(Layer::FireEvent(TransformEventKind::Rotating));
//!
//! let mut obj = CanvasObject::new(Rect::new(0.0, 0.0, 10.0, 10.0));
//! let input = PointerInput::new((5.0, 5.0));
//! let session = TransformSession::new(&obj, ActionKind::Rotate, None, input.position);
//! let mut log = EventLog::new();
//!
//! let mut cx = ActionContext::new(&mut obj, &mut log, &input);
//! assert!(chain.run(&mut cx, &session, input.position));
//! assert_eq!(log.count(TransformEventKind::Rotating), 1);
//! ```

use core::fmt;

use kurbo::Point;
use smallvec::SmallVec;

use crate::event::{EventSink, PointerInput, TransformEvent, TransformEventKind};
use crate::session::TransformSession;
use crate::target::{LockFlags, Transformable};

/// Everything an action may touch during one step.
pub struct ActionContext<'a, T: ?Sized> {
    /// The object being transformed.
    pub target: &'a mut T,
    /// Receiver for events emitted by the chain.
    pub events: &'a mut dyn EventSink,
    /// The pointer sample driving this step.
    pub input: &'a PointerInput,
}

impl<'a, T: ?Sized> ActionContext<'a, T> {
    /// Bundles a target, an event sink and the current pointer sample.
    pub fn new(target: &'a mut T, events: &'a mut dyn EventSink, input: &'a PointerInput) -> Self {
        Self {
            target,
            events,
            input,
        }
    }
}

impl<T: ?Sized> fmt::Debug for ActionContext<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionContext")
            .field("input", &self.input)
            .finish_non_exhaustive()
    }
}

/// A raw or wrapped control action.
///
/// Returns `true` if the target changed.
pub type ActionHandler<T> = fn(&mut ActionContext<'_, T>, &TransformSession, Point) -> bool;

/// Computes the session that downstream layers should see.
pub type Adaptor<T> = fn(&T, &TransformSession, Point) -> TransformSession;

/// Returns `false` without delegating when any of `flags` is locked on the
/// target.
pub fn disable_when_locked<T, N>(
    flags: LockFlags,
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
    next: N,
) -> bool
where
    T: Transformable + ?Sized,
    N: FnOnce(&mut ActionContext<'_, T>, &TransformSession, Point) -> bool,
{
    if cx.target.is_locked(flags) {
        #[cfg(feature = "tracing")]
        tracing::debug!(action = ?session.action, ?flags, "action disabled by lock");
        return false;
    }
    next(cx, session, pointer)
}

/// Delegates with the session returned by `adaptor`.
///
/// The caller's session is left untouched. Only the layers below this one
/// see the adapted copy.
pub fn adapt_transform<T, N>(
    adaptor: Adaptor<T>,
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
    next: N,
) -> bool
where
    T: Transformable + ?Sized,
    N: FnOnce(&mut ActionContext<'_, T>, &TransformSession, Point) -> bool,
{
    let adapted = adaptor(&*cx.target, session, pointer);
    next(cx, &adapted, pointer)
}

/// Keeps the session origin point where it was before the inner action ran.
///
/// The anchor is measured in canvas space before delegating. If the inner
/// action reported a change, the target is moved so the same origin lands on
/// it again. An unchanged target is not touched.
pub fn fixed_anchor<T, N>(
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
    next: N,
) -> bool
where
    T: Transformable + ?Sized,
    N: FnOnce(&mut ActionContext<'_, T>, &TransformSession, Point) -> bool,
{
    let (origin_x, origin_y) = (session.origin_x, session.origin_y);
    let anchor = cx.target.origin_point(origin_x, origin_y);
    let changed = next(cx, session, pointer);
    if changed {
        cx.target.set_position_by_origin(anchor, origin_x, origin_y);
    }
    changed
}

/// Emits a `kind` event after the inner action reports a change.
pub fn fire_event<T, N>(
    kind: TransformEventKind,
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
    next: N,
) -> bool
where
    T: ?Sized,
    N: FnOnce(&mut ActionContext<'_, T>, &TransformSession, Point) -> bool,
{
    let changed = next(cx, session, pointer);
    if changed {
        cx.events.emit(TransformEvent {
            kind,
            input: cx.input,
            session,
        });
    }
    changed
}

/// One wrapper in a [`ControlChain`].
pub enum Layer<T: ?Sized> {
    /// See [`disable_when_locked`].
    DisableWhenLocked(LockFlags),
    /// See [`adapt_transform`].
    Adapt(Adaptor<T>),
    /// See [`fire_event`].
    FireEvent(TransformEventKind),
    /// See [`fixed_anchor`].
    FixedAnchor,
}

impl<T: ?Sized> Clone for Layer<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Layer<T> {}

impl<T: ?Sized> fmt::Debug for Layer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DisableWhenLocked(flags) => {
                f.debug_tuple("DisableWhenLocked").field(flags).finish()
            }
            Self::Adapt(_) => f.write_str("Adapt(..)"),
            Self::FireEvent(kind) => f.debug_tuple("FireEvent").field(kind).finish(),
            Self::FixedAnchor => f.write_str("FixedAnchor"),
        }
    }
}

/// An action wrapped in an ordered list of [`Layer`]s.
///
/// Layers are stored outermost first. [`ControlChain::with_layer`] appends a
/// layer directly around the action, inside every layer added before it.
pub struct ControlChain<T: ?Sized> {
    layers: SmallVec<[Layer<T>; 4]>,
    action: ActionHandler<T>,
}

impl<T: ?Sized> Clone for ControlChain<T> {
    fn clone(&self) -> Self {
        Self {
            layers: self.layers.clone(),
            action: self.action,
        }
    }
}

impl<T: ?Sized> fmt::Debug for ControlChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlChain")
            .field("layers", &self.layers)
            .finish_non_exhaustive()
    }
}

impl<T: Transformable + ?Sized> ControlChain<T> {
    /// A chain with no layers around `action`.
    #[must_use]
    pub fn new(action: ActionHandler<T>) -> Self {
        Self {
            layers: SmallVec::new(),
            action,
        }
    }

    /// Adds `layer` inside all existing layers.
    #[must_use]
    pub fn with_layer(mut self, layer: Layer<T>) -> Self {
        self.layers.push(layer);
        self
    }

    /// Layers, outermost first.
    #[must_use]
    pub fn layers(&self) -> &[Layer<T>] {
        &self.layers
    }

    /// Runs the layers and the action. Returns `true` if the target changed.
    pub fn run(
        &self,
        cx: &mut ActionContext<'_, T>,
        session: &TransformSession,
        pointer: Point,
    ) -> bool {
        run_layers(&self.layers, self.action, cx, session, pointer)
    }
}

fn run_layers<T: Transformable + ?Sized>(
    layers: &[Layer<T>],
    action: ActionHandler<T>,
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    let Some((layer, rest)) = layers.split_first() else {
        return action(cx, session, pointer);
    };
    let next = |cx: &mut ActionContext<'_, T>, session: &TransformSession, pointer: Point| {
        run_layers(rest, action, cx, session, pointer)
    };
    match *layer {
        Layer::DisableWhenLocked(flags) => disable_when_locked(flags, cx, session, pointer, next),
        Layer::Adapt(adaptor) => adapt_transform(adaptor, cx, session, pointer, next),
        Layer::FireEvent(kind) => fire_event(kind, cx, session, pointer, next),
        Layer::FixedAnchor => fixed_anchor(cx, session, pointer, next),
    }
}
