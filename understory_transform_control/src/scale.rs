// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale actions.
//!
//! The pointer is projected into the object's rotated frame relative to the
//! session origin. The new scale makes the scaled extent reach the pointer.
//! Scaling never flips the object: the distance is taken unsigned.

use kurbo::Point;

use crate::axis::Axis;
use crate::event::TransformEventKind;
use crate::session::TransformSession;
use crate::skew::{skew_handler_x, skew_handler_y};
use crate::target::{LockFlags, Transformable};
use crate::wrappers::{ActionContext, ActionHandler, ControlChain, Layer};

/// Computes and applies a new scale. `by` limits it to one axis.
fn scale_object<T: Transformable + ?Sized>(
    by: Option<Axis>,
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    let target = &mut *cx.target;
    let dims = target.transformed_dimensions();
    let (scale_x, scale_y) = (target.scale(Axis::X), target.scale(Axis::Y));
    if !(dims.width > 0.0 && dims.height > 0.0 && scale_x > 0.0 && scale_y > 0.0) {
        return false;
    }
    let local = target.to_local_point(pointer, session.origin_x, session.origin_y);

    let (mut new_x, mut new_y) = match by {
        None => {
            let original = &session.original;
            let distance = local.x.abs() + local.y.abs();
            let original_distance = (dims.width * original.scale_x / scale_x).abs()
                + (dims.height * original.scale_y / scale_y).abs();
            let mut factor = distance / original_distance;
            if session.origin_x.is_center() && session.origin_y.is_center() {
                factor *= 2.0;
            }
            (original.scale_x * factor, original.scale_y * factor)
        }
        Some(_) => (
            (local.x * scale_x / dims.width).abs(),
            (local.y * scale_y / dims.height).abs(),
        ),
    };
    if by.is_some() {
        if session.origin_x.is_center() {
            new_x *= 2.0;
        }
        if session.origin_y.is_center() {
            new_y *= 2.0;
        }
    }

    let apply_x = by != Some(Axis::Y) && !target.is_locked(LockFlags::SCALING_X);
    let apply_y = by != Some(Axis::X) && !target.is_locked(LockFlags::SCALING_Y);
    if apply_x {
        target.set_scale(Axis::X, new_x);
    }
    if apply_y {
        target.set_scale(Axis::Y, new_y);
    }
    let changed = target.scale(Axis::X) != scale_x || target.scale(Axis::Y) != scale_y;

    #[cfg(feature = "tracing")]
    tracing::trace!(
        ?by,
        scale_x = target.scale(Axis::X),
        scale_y = target.scale(Axis::Y),
        changed,
        "scale applied"
    );
    changed
}

fn scale_object_equally<T: Transformable + ?Sized>(
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    scale_object(None, cx, session, pointer)
}

fn scale_object_x<T: Transformable + ?Sized>(
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    scale_object(Some(Axis::X), cx, session, pointer)
}

fn scale_object_y<T: Transformable + ?Sized>(
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    scale_object(Some(Axis::Y), cx, session, pointer)
}

fn scale_chain<T: Transformable + ?Sized>(
    action: ActionHandler<T>,
    locks: LockFlags,
) -> ControlChain<T> {
    ControlChain::new(action)
        .with_layer(Layer::DisableWhenLocked(locks))
        .with_layer(Layer::FireEvent(TransformEventKind::Scaling))
        .with_layer(Layer::FixedAnchor)
}

/// Scales both axes proportionally, keeping the session origin fixed.
///
/// Locking either axis disables it.
pub fn scaling_equally<T: Transformable + ?Sized>(
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    scale_chain(
        scale_object_equally,
        LockFlags::SCALING_X | LockFlags::SCALING_Y,
    )
    .run(cx, session, pointer)
}

/// Scales horizontally, keeping the session origin fixed.
pub fn scaling_x<T: Transformable + ?Sized>(
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    scale_chain(scale_object_x, LockFlags::SCALING_X).run(cx, session, pointer)
}

/// Scales vertically, keeping the session origin fixed.
pub fn scaling_y<T: Transformable + ?Sized>(
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    scale_chain(scale_object_y, LockFlags::SCALING_Y).run(cx, session, pointer)
}

/// Skews along y while alt is held, otherwise scales horizontally.
pub fn scaling_x_or_skewing_y<T: Transformable + ?Sized>(
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    if cx.input.alt() {
        skew_handler_y(cx, session, pointer)
    } else {
        scaling_x(cx, session, pointer)
    }
}

/// Skews along x while alt is held, otherwise scales vertically.
pub fn scaling_y_or_skewing_x<T: Transformable + ?Sized>(
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    if cx.input.alt() {
        skew_handler_x(cx, session, pointer)
    } else {
        scaling_y(cx, session, pointer)
    }
}
