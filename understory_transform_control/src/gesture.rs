// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag gestures.
//!
//! A [`TransformGesture`] ties a [`TransformSession`] to the action of the
//! control it started on. The host calls [`TransformGesture::drag_to`] on
//! every pointer move and [`TransformGesture::end`] on release.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_transform_control::{
//!     Axis, CanvasObject, ControlKey, Controls, EventLog, PointerInput, TransformGesture,
//!     Transformable,
//! };
//!
//! let mut obj = CanvasObject::new(Rect::new(0.0, 0.0, 100.0, 100.0));
//! let controls = Controls::default();
//! let mut log = EventLog::new();
//!
//! let press = PointerInput::new((100.0, 50.0));
//! let mut gesture =
//!     TransformGesture::begin(&obj, &controls, Some(ControlKey::MiddleRight), &press);
//! assert!(gesture.drag_to(&mut obj, &mut log, &PointerInput::new((150.0, 50.0))));
//! gesture.end();
//!
//! assert!((obj.scale(Axis::X) - 1.5).abs() < 1e-9);
//! assert!((obj.position() - Point::ORIGIN).hypot() < 1e-9);
//! ```

use core::fmt;

use crate::control::Controls;
use crate::drag::drag_handler;
use crate::event::{EventSink, PointerInput};
use crate::session::{ActionKind, ControlKey, TransformSession};
use crate::target::Transformable;
use crate::wrappers::{ActionContext, ActionHandler};

/// An in-progress drag on a target.
pub struct TransformGesture<T: ?Sized> {
    session: TransformSession,
    action: ActionHandler<T>,
}

impl<T: ?Sized> fmt::Debug for TransformGesture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformGesture")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<T: Transformable + ?Sized> TransformGesture<T> {
    /// Begins a gesture on `target` at `input`.
    ///
    /// `corner` is the grabbed control, usually from [`Controls::find`].
    /// With no corner, or a key missing from `controls`, the gesture moves
    /// the object.
    #[must_use]
    pub fn begin(
        target: &T,
        controls: &Controls<T>,
        corner: Option<ControlKey>,
        input: &PointerInput,
    ) -> Self {
        let control = corner.and_then(|key| controls.get(key).map(|c| (key, c)));
        let (corner, action, kind): (_, ActionHandler<T>, _) = match control {
            Some((key, c)) => (Some(key), c.action, c.action_kind(input)),
            None => (None, drag_handler, ActionKind::Drag),
        };
        let session = TransformSession::new(target, kind, corner, input.position);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            corner = corner.map(ControlKey::as_str),
            action = ?kind,
            "gesture started"
        );
        Self { session, action }
    }

    /// Anchors scaling at the object center, as when a modifier asks for
    /// symmetric resizing. Other actions are unaffected.
    #[must_use]
    pub fn with_centered_origin(mut self) -> Self {
        if matches!(
            self.session.action,
            ActionKind::Scale | ActionKind::ScaleX | ActionKind::ScaleY
        ) {
            self.session = self.session.centered();
        }
        self
    }

    /// The session state.
    #[must_use]
    pub fn session(&self) -> &TransformSession {
        &self.session
    }

    /// What the gesture does.
    #[must_use]
    pub fn action_kind(&self) -> ActionKind {
        self.session.action
    }

    /// Runs the action for a pointer move to `input`.
    ///
    /// Returns `true` if the target changed.
    pub fn drag_to(
        &mut self,
        target: &mut T,
        events: &mut dyn EventSink,
        input: &PointerInput,
    ) -> bool {
        let changed = {
            let mut cx = ActionContext::new(&mut *target, events, input);
            (self.action)(&mut cx, &self.session, input.position)
        };
        self.session.update(input.position);

        #[cfg(feature = "tracing")]
        if changed && let Err(problem) = crate::diagnostics::check_target(&*target) {
            tracing::warn!(%problem, "transform left the target degenerate");
        }
        changed
    }

    /// Ends the gesture, returning its final session.
    pub fn end(self) -> TransformSession {
        #[cfg(feature = "tracing")]
        tracing::debug!(action = ?self.session.action, "gesture ended");
        self.session
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};
    use ui_events::keyboard::Modifiers;

    use super::*;
    use crate::axis::Axis;
    use crate::event::{EventLog, TransformEventKind};
    use crate::origin::Origin;
    use crate::target::{CanvasObject, LockFlags};

    fn object() -> CanvasObject {
        CanvasObject::new(Rect::new(0.0, 0.0, 100.0, 100.0))
    }

    #[test]
    fn body_drag_moves_object() {
        let mut obj = object();
        let controls = Controls::default();
        let mut log = EventLog::new();
        let press = PointerInput::new((10.0, 10.0));
        let mut g = TransformGesture::begin(&obj, &controls, None, &press);
        assert_eq!(g.action_kind(), ActionKind::Drag);
        assert!(g.drag_to(&mut obj, &mut log, &PointerInput::new((30.0, 15.0))));
        assert!(g.drag_to(&mut obj, &mut log, &PointerInput::new((40.0, 15.0))));
        assert_eq!(obj.position(), Point::new(30.0, 5.0));
        assert_eq!(log.count(TransformEventKind::Moving), 2);
        assert_eq!(g.end().last, Point::new(40.0, 15.0));
    }

    #[test]
    fn missing_control_falls_back_to_drag() {
        let obj = object();
        let mut controls = Controls::default();
        controls.remove(ControlKey::Rotation);
        let g = TransformGesture::begin(
            &obj,
            &controls,
            Some(ControlKey::Rotation),
            &PointerInput::new((50.0, -40.0)),
        );
        assert_eq!(g.action_kind(), ActionKind::Drag);
        assert_eq!(g.session().corner, None);
    }

    #[test]
    fn alt_on_edge_starts_a_skew() {
        let mut obj = object().with_origin(Origin::Center, Origin::Center);
        let controls = Controls::default();
        let mut log = EventLog::new();
        let press = PointerInput::new((100.0, 50.0)).with_modifiers(Modifiers::ALT);
        let mut g = TransformGesture::begin(&obj, &controls, Some(ControlKey::MiddleRight), &press);
        assert_eq!(g.action_kind(), ActionKind::SkewY);
        let to = PointerInput::new((100.0, 70.0)).with_modifiers(Modifiers::ALT);
        assert!(g.drag_to(&mut obj, &mut log, &to));
        assert!(obj.skew(Axis::Y) > 0.0);
        assert!(obj.skew(Axis::X).abs() < 1e-9);
        // The same position again is a zero delta.
        assert!(!g.drag_to(&mut obj, &mut log, &to));
        assert_eq!(log.count(TransformEventKind::Skewing), 1);
    }

    #[test]
    fn centered_origin_only_applies_to_scaling() {
        let obj = object();
        let controls = Controls::default();
        let press = PointerInput::new((100.0, 50.0));
        let g = TransformGesture::begin(&obj, &controls, Some(ControlKey::MiddleRight), &press)
            .with_centered_origin();
        assert_eq!(g.session().origin_x, Origin::Center);

        let drag = TransformGesture::begin(&obj, &controls, None, &press).with_centered_origin();
        assert_eq!(drag.session().origin_x, Origin::LEFT);
    }

    #[test]
    fn locked_target_reports_no_change() {
        let mut obj = object().with_locks(LockFlags::ROTATION);
        let controls = Controls::default();
        let mut log = EventLog::new();
        let press = PointerInput::new((50.0, -40.0));
        let mut g = TransformGesture::begin(&obj, &controls, Some(ControlKey::Rotation), &press);
        assert_eq!(g.action_kind(), ActionKind::Rotate);
        assert!(!g.drag_to(&mut obj, &mut log, &PointerInput::new((150.0, 50.0))));
        assert_eq!(obj.angle(), 0.0);
        assert!(log.is_empty());
    }
}
