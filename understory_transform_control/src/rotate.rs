// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotate action.

use kurbo::Point;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::event::TransformEventKind;
use crate::math::normalize_degrees;
use crate::session::TransformSession;
use crate::target::{AngleSnap, LockFlags, Transformable};
use crate::wrappers::{ActionContext, ControlChain, Layer};

/// Snaps `degrees` to the nearest multiple of `snap.angle` that lies
/// strictly within `snap.threshold`. The lower multiple wins ties.
#[must_use]
pub fn snap_angle(degrees: f64, snap: AngleSnap) -> f64 {
    if snap.angle.is_nan() || snap.angle <= 0.0 {
        return degrees;
    }
    let lower = (degrees / snap.angle).floor() * snap.angle;
    let upper = (degrees / snap.angle).ceil() * snap.angle;
    if (degrees - lower).abs() < snap.threshold {
        lower
    } else if (degrees - upper).abs() < snap.threshold {
        upper
    } else {
        degrees
    }
}

fn rotate_object<T: Transformable + ?Sized>(
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    let target = &mut *cx.target;
    let pivot = target.origin_point(session.origin_x, session.origin_y);
    let start = session.start - pivot;
    let current = pointer - pivot;
    let swept = current.y.atan2(current.x) - start.y.atan2(start.x);
    let mut angle = session.original.angle + swept.to_degrees();
    if let Some(snap) = target.snap() {
        angle = snap_angle(angle, snap);
    }
    let angle = normalize_degrees(angle);
    let changed = target.angle() != angle;
    target.set_angle(angle);

    #[cfg(feature = "tracing")]
    tracing::trace!(angle, changed, "rotation applied");
    changed
}

/// Rotates around the session origin, following the pointer's angle around
/// it since the gesture began.
///
/// Honours the target's [`AngleSnap`]. The resulting angle is in
/// `[0, 360)`.
pub fn rotation_with_snapping<T: Transformable + ?Sized>(
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    ControlChain::new(rotate_object)
        .with_layer(Layer::DisableWhenLocked(LockFlags::ROTATION))
        .with_layer(Layer::FireEvent(TransformEventKind::Rotating))
        .with_layer(Layer::FixedAnchor)
        .run(cx, session, pointer)
}
