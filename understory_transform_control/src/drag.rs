// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Move action.

use kurbo::Point;

use crate::axis::Axis;
use crate::event::TransformEventKind;
use crate::session::TransformSession;
use crate::target::Transformable;
use crate::wrappers::{ActionContext, ControlChain, Layer};

fn move_object<T: Transformable + ?Sized>(
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    let target = &mut *cx.target;
    let (origin_x, origin_y) = (session.original.origin_x, session.original.origin_y);
    let current = target.origin_point(origin_x, origin_y);
    let wanted = pointer - session.offset;

    let mut next = current;
    let mut moved = false;
    for axis in Axis::ALL {
        let (now, then) = (axis.of_point(current), axis.of_point(wanted));
        if target.is_locked(axis.keys().lock_movement) || now == then {
            continue;
        }
        match axis {
            Axis::X => next.x = then,
            Axis::Y => next.y = then,
        }
        moved = true;
    }
    if moved {
        target.set_position_by_origin(next, origin_x, origin_y);
    }
    moved
}

/// Moves the target so its own origin point follows the pointer.
///
/// The grab offset recorded when the gesture began is kept. Each axis moves
/// only if its movement lock is clear. Emits a
/// [`Moving`](TransformEventKind::Moving) event when anything moved.
pub fn drag_handler<T: Transformable + ?Sized>(
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    ControlChain::new(move_object)
        .with_layer(Layer::FireEvent(TransformEventKind::Moving))
        .run(cx, session, pointer)
}
