// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Skew actions.
//!
//! Skewing has three parts:
//!
//! - [`skewing_transform`] is the adaptor. It decides which side of the
//!   object the drag moves and which edge stays pinned.
//! - [`skew_object`] is the geometry engine. It turns a pointer delta into a
//!   shear in the object's own frame and commits it.
//! - [`skew_handler_x`] and [`skew_handler_y`] wrap the engine in the
//!   standard [`ControlChain`] and are what controls use.
//!
//! The shear is computed before scale is applied. Skew and scale do not
//! commute, so the pointer delta is first divided by the scale.

use kurbo::{Affine, Point, Size, Vec2};

use crate::axis::Axis;
use crate::event::TransformEventKind;
use crate::math::{MATRIX_EPSILON, change_of_basis, matrices_equal, skew_angle, skew_tangent};
use crate::origin::Origin;
use crate::session::{SkewingSide, TransformSession};
use crate::target::Transformable;
use crate::wrappers::{ActionContext, ActionHandler, Adaptor, ControlChain, Layer};

/// Resolves the skewing side and the pinned origin for a skew along `axis`.
///
/// The side depends on where the counter-axis origin sits. Skewing pivots
/// around that anchor, so dragging the edge on the far side of it moves the
/// shear the other way. Flips mirror both the anchor and the side.
///
/// The direction is the sign of the current skew. With no skew yet, it is
/// the side of the object center the pointer is on. Only the pointer counts
/// here: the grabbed handle's position, including any control offset, is not
/// consulted. The origin of this axis is set to the edge opposite that
/// direction.
///
/// The result differs from `session` only in that origin and in
/// [`TransformSession::skewing_side`]. The target is not modified.
#[must_use]
pub fn skewing_transform<T: Transformable + ?Sized>(
    axis: Axis,
    target: &T,
    session: &TransformSession,
    pointer: Point,
) -> TransformSession {
    let counter = axis.counter();
    let mut counter_factor = session.origin(counter).resolve();
    if target.flip(counter) {
        counter_factor = -counter_factor;
    }
    let flip_sign = if target.flip(axis) { -1.0 } else { 1.0 };
    // A centered counter origin has no sign. Treat it as the negative side
    // of the anchor, which makes the skewing side positive.
    let side = (if counter_factor > 0.0 { -1.0 } else { 1.0 }) * flip_sign;

    let skew = target.skew(axis);
    let local = target.to_local_point(pointer, Origin::Center, Origin::Center);
    let positive = (skew == 0.0 && axis.of_point(local) > 0.0) || skew > 0.0;
    let direction = (if positive { 1.0 } else { -1.0 }) * side;

    session
        .with_origin(axis, Origin::Fraction(-direction * 0.5 + 0.5))
        .with_skewing_side(SkewingSide::from_sign(side))
}

/// [`skewing_transform`] along x, as an [`Adaptor`].
#[must_use]
pub fn skewing_transform_x<T: Transformable + ?Sized>(
    target: &T,
    session: &TransformSession,
    pointer: Point,
) -> TransformSession {
    skewing_transform(Axis::X, target, session, pointer)
}

/// [`skewing_transform`] along y, as an [`Adaptor`].
#[must_use]
pub fn skewing_transform_y<T: Transformable + ?Sized>(
    target: &T,
    session: &TransformSession,
    pointer: Point,
) -> TransformSession {
    skewing_transform(Axis::Y, target, session, pointer)
}

/// Basis vectors of the intrinsic rectangle after `Kx(tan_x) · Ky(tan_y)`.
fn skew_basis(tan_x: f64, tan_y: f64, size: Size) -> [Vec2; 2] {
    [
        Vec2::new((1.0 + tan_x * tan_y) * size.width, tan_y * size.width),
        Vec2::new(tan_x * size.height, size.height),
    ]
}

/// The linear map that re-shears the intrinsic rectangle from the
/// `from = [tan_x, tan_y]` tangents to the `to` tangents, expressed in the
/// object's own normalized frame.
fn shearing_change(size: Size, from: [f64; 2], to: [f64; 2]) -> Affine {
    let dims = Affine::scale_non_uniform(size.width, size.height);
    let change = change_of_basis(
        skew_basis(from[0], from[1], size),
        skew_basis(to[0], to[1], size),
    );
    dims * change * dims.inverse()
}

/// Applies the shear for a drag from `session.last` to `pointer` along
/// `axis`.
///
/// The pointer delta is taken into the scale-less plane. It advances the
/// shear tangent of `axis` by `2 · delta · side / extent`, where `extent`
/// is the intrinsic size on the counter axis. The counter-axis tangent is
/// held. The shearing change is composed onto the own matrix and committed
/// with [`Transformable::apply_own_matrix`].
///
/// Returns `true` iff the own matrix changed. A zero delta, a zero or
/// negative size or a zero scale is a no-op that returns `false`. Width and
/// height are never modified.
pub fn skew_object<T: Transformable + ?Sized>(
    axis: Axis,
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    let target = &mut *cx.target;
    let size = target.size();
    let scale = Vec2::new(target.scale(Axis::X).abs(), target.scale(Axis::Y).abs());
    if !(size.width > 0.0 && size.height > 0.0 && scale.x > 0.0 && scale.y > 0.0) {
        return false;
    }

    let before = target.own_matrix();
    let delta = session.delta(pointer);
    let delta = Vec2::new(delta.x / scale.x, delta.y / scale.y);
    let side = session.skewing_side.value();

    let from = [
        skew_tangent(target.skew(Axis::X)),
        skew_tangent(target.skew(Axis::Y)),
    ];
    let mut to = from;
    match axis {
        Axis::X => to[0] += 2.0 * delta.x * side / size.height,
        Axis::Y => to[1] += 2.0 * delta.y * side / size.width,
    }

    let change = shearing_change(size, from, to);
    if matrices_equal(change, Affine::IDENTITY, MATRIX_EPSILON) {
        return false;
    }
    target.apply_own_matrix(before * change, skew_angle(to[1]));
    let changed = !matrices_equal(before, target.own_matrix(), MATRIX_EPSILON);

    #[cfg(feature = "tracing")]
    tracing::trace!(
        ?axis,
        skew_x = target.skew(Axis::X),
        skew_y = target.skew(Axis::Y),
        changed,
        "skew applied"
    );
    changed
}

fn skew_object_x<T: Transformable + ?Sized>(
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    skew_object(Axis::X, cx, session, pointer)
}

fn skew_object_y<T: Transformable + ?Sized>(
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    skew_object(Axis::Y, cx, session, pointer)
}

/// The standard skew chain for `axis`.
///
/// From the outside in: the skewing lock of `axis`, the
/// [`skewing_transform`] adaptor, a [`Skewing`](TransformEventKind::Skewing)
/// event and the fixed anchor, around [`skew_object`].
#[must_use]
pub fn skew_chain<T: Transformable + ?Sized>(axis: Axis) -> ControlChain<T> {
    let (action, adaptor): (ActionHandler<T>, Adaptor<T>) = match axis {
        Axis::X => (skew_object_x, skewing_transform_x),
        Axis::Y => (skew_object_y, skewing_transform_y),
    };
    ControlChain::new(action)
        .with_layer(Layer::DisableWhenLocked(axis.keys().lock_skewing))
        .with_layer(Layer::Adapt(adaptor))
        .with_layer(Layer::FireEvent(TransformEventKind::Skewing))
        .with_layer(Layer::FixedAnchor)
}

/// Skews along x, keeping the resolved anchor fixed.
///
/// Returns `false` without touching the target when x skewing is locked.
pub fn skew_handler_x<T: Transformable + ?Sized>(
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    skew_chain(Axis::X).run(cx, session, pointer)
}

/// Skews along y, keeping the resolved anchor fixed.
///
/// Returns `false` without touching the target when y skewing is locked.
pub fn skew_handler_y<T: Transformable + ?Sized>(
    cx: &mut ActionContext<'_, T>,
    session: &TransformSession,
    pointer: Point,
) -> bool {
    skew_chain(Axis::Y).run(cx, session, pointer)
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;
    use crate::event::{EventLog, PointerInput};
    use crate::session::{ActionKind, ControlKey};
    use crate::target::CanvasObject;

    fn centered() -> CanvasObject {
        CanvasObject::new(Rect::new(0.0, 0.0, 100.0, 100.0))
            .with_origin(Origin::Center, Origin::Center)
    }

    fn session_at(obj: &CanvasObject, action: ActionKind, start: Point) -> TransformSession {
        TransformSession::new(obj, action, None, start)
    }

    #[test]
    fn shearing_change_is_a_pure_y_shear_for_y_drags() {
        let size = Size::new(100.0, 50.0);
        let change = shearing_change(size, [0.3, 0.0], [0.3, 0.4]);
        let expected = Affine::skew(0.0, 0.4);
        assert!(matrices_equal(change, expected, 1e-12), "{change:?}");
    }

    #[test]
    fn shearing_change_for_x_drags_conjugates_by_held_y_shear() {
        let size = Size::new(80.0, 60.0);
        let (tx, ty, tx2) = (0.1, 0.25, 0.6);
        let change = shearing_change(size, [tx, ty], [tx2, ty]);
        let expected = Affine::skew(0.0, -ty) * Affine::skew(tx2 - tx, 0.0) * Affine::skew(0.0, ty);
        assert!(matrices_equal(change, expected, 1e-12), "{change:?}");
    }

    #[test]
    fn adaptor_centered_counter_origin_is_positive_side() {
        let obj = centered();
        let s = session_at(&obj, ActionKind::SkewY, Point::new(50.0, 50.0));
        let adapted = skewing_transform(Axis::Y, &obj, &s, Point::new(50.0, 70.0));
        assert_eq!(adapted.skewing_side, SkewingSide::Positive);
        // Pointer below the center: positive direction pins the top edge.
        assert_eq!(adapted.origin_y, Origin::Fraction(0.0));
        assert_eq!(adapted.origin_x, s.origin_x);
    }

    #[test]
    fn adaptor_uses_existing_skew_sign() {
        let obj = centered().with_skew(0.0, -10.0);
        let s = session_at(&obj, ActionKind::SkewY, Point::new(50.0, 50.0));
        // Pointer below center, but the existing negative skew wins.
        let adapted = skewing_transform(Axis::Y, &obj, &s, Point::new(50.0, 90.0));
        assert_eq!(adapted.origin_y, Origin::Fraction(1.0));
    }

    #[test]
    fn adaptor_counter_origin_and_flip_pick_side() {
        let obj = centered();
        let s =
            session_at(&obj, ActionKind::SkewX, Point::ORIGIN).with_origin(Axis::Y, Origin::End);
        let adapted = skewing_transform(Axis::X, &obj, &s, Point::new(90.0, 50.0));
        assert_eq!(adapted.skewing_side, SkewingSide::Negative);

        let flipped = centered().with_flip(false, true);
        let adapted = skewing_transform(Axis::X, &flipped, &s, Point::new(90.0, 50.0));
        // The counter flip mirrors the anchor back to the start side.
        assert_eq!(adapted.skewing_side, SkewingSide::Positive);
    }

    #[test]
    fn adaptor_exact_center_takes_negative_direction() {
        let obj = centered();
        let s = session_at(&obj, ActionKind::SkewY, Point::new(50.0, 50.0));
        let adapted = skewing_transform(Axis::Y, &obj, &s, Point::new(50.0, 50.0));
        // Zero local offset fails the strict comparison.
        assert_eq!(adapted.origin_y, Origin::Fraction(1.0));
    }

    #[test]
    fn adaptor_direction_follows_the_pointer_not_the_handle() {
        let obj = centered();
        let s = TransformSession::new(
            &obj,
            ActionKind::SkewY,
            Some(ControlKey::MiddleRight),
            Point::new(100.0, 80.0),
        );
        // Grabbed below the center, but the pointer has moved above it.
        let above = skewing_transform(Axis::Y, &obj, &s, Point::new(100.0, 30.0));
        assert_eq!(above.skewing_side, SkewingSide::Positive);
        assert_eq!(above.origin_y, Origin::Fraction(1.0));
        let below = skewing_transform(Axis::Y, &obj, &s, Point::new(100.0, 70.0));
        assert_eq!(below.origin_y, Origin::Fraction(0.0));
    }

    #[test]
    fn engine_advances_tangent_and_holds_counter_axis() {
        let mut obj = centered().with_skew(10.0, 0.0);
        let s = session_at(&obj, ActionKind::SkewY, Point::new(50.0, 50.0));
        let input = PointerInput::new((50.0, 60.0));
        let mut events = EventLog::new();
        let mut cx = ActionContext::new(&mut obj, &mut events, &input);
        assert!(skew_object(Axis::Y, &mut cx, &s, input.position));
        assert!((skew_tangent(obj.skew(Axis::Y)) - 0.2).abs() < 1e-9);
        assert!((obj.skew(Axis::X) - 10.0).abs() < 1e-9);
        assert!((obj.scale(Axis::X) - 1.0).abs() < 1e-9);
        assert_eq!(obj.size(), Size::new(100.0, 100.0));
    }

    #[test]
    fn engine_divides_delta_by_scale() {
        let mut obj = centered().with_scale(2.0, 4.0);
        let s = session_at(&obj, ActionKind::SkewX, Point::ORIGIN);
        let input = PointerInput::new((20.0, 0.0));
        let mut events = EventLog::new();
        let mut cx = ActionContext::new(&mut obj, &mut events, &input);
        assert!(skew_object(Axis::X, &mut cx, &s, input.position));
        // 20 px at scale 2 is 10 intrinsic px: tan = 2 * 10 / 100.
        assert!((skew_tangent(obj.skew(Axis::X)) - 0.2).abs() < 1e-9);
        assert!((obj.scale(Axis::X) - 2.0).abs() < 1e-9);
        assert!((obj.scale(Axis::Y) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn engine_ignores_degenerate_targets() {
        let mut obj = CanvasObject::new(Rect::new(0.0, 0.0, 0.0, 100.0));
        let s = session_at(&obj, ActionKind::SkewY, Point::ORIGIN);
        let input = PointerInput::new((0.0, 30.0));
        let mut events = EventLog::new();
        let mut cx = ActionContext::new(&mut obj, &mut events, &input);
        assert!(!skew_object(Axis::Y, &mut cx, &s, input.position));
        assert_eq!(obj.skew(Axis::Y), 0.0);

        let mut flat = centered().with_scale(0.0, 1.0);
        let mut events = EventLog::new();
        let mut cx = ActionContext::new(&mut flat, &mut events, &input);
        assert!(!skew_object(Axis::Y, &mut cx, &s, input.position));
    }

    #[test]
    fn engine_perpendicular_delta_is_ignored() {
        let mut obj = centered();
        let s = session_at(&obj, ActionKind::SkewY, Point::new(50.0, 50.0));
        let input = PointerInput::new((80.0, 50.0));
        let mut events = EventLog::new();
        let mut cx = ActionContext::new(&mut obj, &mut events, &input);
        assert!(!skew_object(Axis::Y, &mut cx, &s, input.position));
        assert_eq!(obj, centered());
    }

    #[test]
    fn chain_layers_are_in_order() {
        let chain = skew_chain::<CanvasObject>(Axis::Y);
        let layers = chain.layers();
        assert_eq!(layers.len(), 4);
        assert!(matches!(
            layers[0],
            Layer::DisableWhenLocked(flags) if flags == crate::LockFlags::SKEWING_Y
        ));
        assert!(matches!(layers[1], Layer::Adapt(_)));
        assert!(matches!(
            layers[2],
            Layer::FireEvent(TransformEventKind::Skewing)
        ));
        assert!(matches!(layers[3], Layer::FixedAnchor));
    }
}
