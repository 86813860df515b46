// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_transform_control --heading-base-level=0

//! Understory Transform Control: interactive affine transform handles for 2D
//! canvas objects.
//!
//! This crate implements the geometry and plumbing behind the handles drawn
//! around a selected object on a canvas: drag an edge to scale it, drag it
//! with <kbd>Alt</kbd> held to skew it, drag the handle above it to rotate it,
//! or drag the body to move it.
//!
//! - [`Transformable`] is the trait your objects implement. Its state is a
//!   size, a center, an angle, per-axis scale, skew and flip, an origin and a
//!   set of [`LockFlags`]. [`CanvasObject`] is a ready-made implementation.
//! - [`Controls`] holds the handles. Each [`Control`] carries an action, an
//!   [`ActionKind`] resolver and a [`Cursor`] resolver.
//! - [`TransformGesture`] runs one drag: it builds a [`TransformSession`]
//!   when the pointer goes down and feeds pointer moves to the action.
//! - Actions are plain functions wrapped in a [`ControlChain`] of
//!   [`Layer`]s that check locks, adapt the session, emit events through an
//!   [`EventSink`] and keep the anchor point fixed.
//!
//! The crate does not draw anything and does not route input. Callers
//! hit-test with [`Controls::find`], translate their own pointer events into
//! [`PointerInput`] and render handles at [`Control::position`].
//!
//! ## Skewing
//!
//! Skewing is done in the object's own frame so that it composes with the
//! existing scale, skew and rotation. The pointer delta is divided by the
//! scale, turned into a change of shear tangent and multiplied onto the own
//! matrix, which is then decomposed back into properties. Width and height
//! never change.
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_transform_control::{
//!     ActionContext, ActionKind, Axis, CanvasObject, ControlKey, EventLog, Origin, PointerInput,
//!     TransformEventKind, TransformSession, Transformable, skew_handler_y,
//! };
//!
//! let mut obj = CanvasObject::new(Rect::new(0.0, 0.0, 100.0, 100.0))
//!     .with_origin(Origin::Center, Origin::Center);
//! let session = TransformSession::new(
//!     &obj,
//!     ActionKind::SkewY,
//!     Some(ControlKey::MiddleRight),
//!     (50.0, 50.0).into(),
//! );
//!
//! let input = PointerInput::new((50.0, 70.0));
//! let mut log = EventLog::new();
//! let mut cx = ActionContext::new(&mut obj, &mut log, &input);
//! assert!(skew_handler_y(&mut cx, &session, input.position));
//!
//! assert!(obj.skew(Axis::Y) > 0.0);
//! assert!(obj.skew(Axis::X).abs() < 1e-9);
//! assert_eq!((obj.size().width, obj.size().height), (100.0, 100.0));
//! assert_eq!(log.count(TransformEventKind::Skewing), 1);
//! ```
//!
//! ## Features
//!
//! - `std` (default): use the standard library for float math.
//! - `libm`: use `libm` for float math in `no_std` builds.
//! - `tracing`: emit `tracing` events for applied transforms, lock
//!   short-circuits, gesture start and end, and targets left degenerate.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod axis;
pub mod control;
pub mod cursor;
pub mod diagnostics;
pub mod drag;
pub mod event;
pub mod gesture;
pub mod math;
pub mod origin;
pub mod rotate;
pub mod scale;
pub mod session;
pub mod skew;
pub mod target;
pub mod wrappers;

pub use axis::{Axis, AxisKeys};
pub use control::{ActionKindResolver, Control, Controls, ROTATION_HANDLE_OFFSET};
pub use cursor::{Cursor, CursorHandler};
pub use diagnostics::{TransformDiagnostic, check_target};
pub use drag::drag_handler;
pub use event::{
    EventLog, EventSink, PointerInput, RecordedEvent, TransformEvent, TransformEventKind,
};
pub use gesture::TransformGesture;
pub use math::TransformParts;
pub use origin::Origin;
pub use rotate::rotation_with_snapping;
pub use scale::{
    scaling_equally, scaling_x, scaling_x_or_skewing_y, scaling_y, scaling_y_or_skewing_x,
};
pub use session::{ActionKind, ControlKey, OriginalState, SkewingSide, TransformSession};
pub use skew::{skew_handler_x, skew_handler_y, skewing_transform};
pub use target::{AngleSnap, CanvasObject, LockFlags, Transformable};
pub use wrappers::{ActionContext, ActionHandler, Adaptor, ControlChain, Layer};
