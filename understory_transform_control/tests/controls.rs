// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the default controls driven through `TransformGesture`.
//!
//! Each test hit-tests a handle the way a host would, starts a gesture on it
//! and feeds pointer moves.

use kurbo::{Point, Rect};
use ui_events::keyboard::Modifiers;
use understory_transform_control::{
    ActionKind, AngleSnap, Axis, CanvasObject, ControlKey, Controls, Cursor, EventLog, LockFlags,
    PointerInput, TransformEvent, TransformEventKind, TransformGesture, Transformable,
};

const HIT: f64 = 10.0;

fn object() -> CanvasObject {
    CanvasObject::new(Rect::new(0.0, 0.0, 100.0, 50.0))
}

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

/// Hit-tests `at` and begins a gesture there.
fn press(
    obj: &CanvasObject,
    controls: &Controls<CanvasObject>,
    at: PointerInput,
) -> TransformGesture<CanvasObject> {
    let key = controls.find(obj, at.position, HIT);
    TransformGesture::begin(obj, controls, key, &at)
}

#[test]
fn right_edge_scales_from_the_left_edge() {
    let mut obj = object();
    let controls = Controls::default();
    let mut log = EventLog::new();

    let mut gesture = press(&obj, &controls, PointerInput::new((100.0, 25.0)));
    assert_eq!(gesture.action_kind(), ActionKind::ScaleX);
    assert_eq!(gesture.session().corner, Some(ControlKey::MiddleRight));

    assert!(gesture.drag_to(&mut obj, &mut log, &PointerInput::new((200.0, 25.0))));
    assert!((obj.scale(Axis::X) - 2.0).abs() < 1e-9);
    assert!((obj.scale(Axis::Y) - 1.0).abs() < 1e-9);
    assert!(close(obj.position(), Point::ORIGIN));
    gesture.end();
    assert_eq!(log.count(TransformEventKind::Scaling), 1);
}

#[test]
fn corner_scales_uniformly() {
    let mut obj = object();
    let controls = Controls::default();
    let mut log = EventLog::new();

    let mut gesture = press(&obj, &controls, PointerInput::new((100.0, 50.0)));
    assert_eq!(gesture.action_kind(), ActionKind::Scale);
    assert!(gesture.drag_to(&mut obj, &mut log, &PointerInput::new((200.0, 100.0))));
    assert!((obj.scale(Axis::X) - 2.0).abs() < 1e-9);
    assert!((obj.scale(Axis::Y) - 2.0).abs() < 1e-9);
    assert!(close(obj.position(), Point::ORIGIN));
}

#[test]
fn rotation_handle_turns_about_the_center() {
    let mut obj = object();
    let controls = Controls::default();
    let mut log = EventLog::new();

    // The rotation handle sits 40 px above the top edge.
    let mut gesture = press(&obj, &controls, PointerInput::new((50.0, -40.0)));
    assert_eq!(gesture.action_kind(), ActionKind::Rotate);
    assert!(gesture.drag_to(&mut obj, &mut log, &PointerInput::new((150.0, 25.0))));
    assert!((obj.angle() - 90.0).abs() < 1e-9);
    assert!(close(obj.center(), Point::new(50.0, 25.0)));
    assert_eq!(log.count(TransformEventKind::Rotating), 1);
}

#[test]
fn rotation_snaps_and_respects_lock() {
    let controls = Controls::default();
    let mut log = EventLog::new();

    let mut obj = object().with_snap(AngleSnap::new(45.0).with_threshold(10.0));
    let mut gesture = press(&obj, &controls, PointerInput::new((50.0, -40.0)));
    // About 40 degrees clockwise from straight up.
    let to = Point::new(50.0 + 65.0 * 0.642_787_6, 25.0 - 65.0 * 0.766_044_4);
    assert!(gesture.drag_to(&mut obj, &mut log, &PointerInput::new(to)));
    assert_eq!(obj.angle(), 45.0);

    let mut locked = object().with_locks(LockFlags::ROTATION);
    let mut gesture = press(&locked, &controls, PointerInput::new((50.0, -40.0)));
    assert!(!gesture.drag_to(&mut locked, &mut log, &PointerInput::new((150.0, 25.0))));
    assert_eq!(locked.angle(), 0.0);
}

#[test]
fn body_drag_honours_movement_locks() {
    let controls = Controls::default();
    let mut log = EventLog::new();

    let mut obj = object().with_locks(LockFlags::MOVEMENT_X);
    let mut gesture = press(&obj, &controls, PointerInput::new((40.0, 20.0)));
    assert_eq!(gesture.action_kind(), ActionKind::Drag);
    assert!(gesture.drag_to(&mut obj, &mut log, &PointerInput::new((90.0, 60.0))));
    assert!(close(obj.position(), Point::new(0.0, 40.0)));
    assert_eq!(log.count(TransformEventKind::Moving), 1);
}

#[test]
fn events_fire_once_per_changed_step() {
    let mut obj = object();
    let controls = Controls::default();
    let mut kinds = Vec::new();
    let mut changes = 0;
    {
        let mut sink = |event: TransformEvent<'_>| kinds.push(event.kind);
        let alt = |p: (f64, f64)| PointerInput::new(p).with_modifiers(Modifiers::ALT);
        let mut gesture = press(&obj, &controls, alt((100.0, 25.0)));
        assert_eq!(gesture.action_kind(), ActionKind::SkewY);

        for p in [(100.0, 35.0), (100.0, 35.0), (100.0, 45.0), (110.0, 45.0), (100.0, 30.0)] {
            if gesture.drag_to(&mut obj, &mut sink, &alt(p)) {
                changes += 1;
            }
        }
    }
    // The repeated sample and the purely horizontal one change nothing.
    assert_eq!(changes, 3);
    assert_eq!(kinds, [TransformEventKind::Skewing; 3]);
}

#[test]
fn cursors_turn_with_the_object() {
    let controls = Controls::default();
    let plain = PointerInput::new((0.0, 0.0));
    let alt = plain.with_modifiers(Modifiers::ALT);
    let cursor = |obj: &CanvasObject, key, input: &PointerInput| {
        controls
            .get(key)
            .map(|control| control.cursor(input, obj))
    };

    let upright = object();
    assert_eq!(cursor(&upright, ControlKey::MiddleRight, &plain), Some(Cursor::EResize));
    assert_eq!(cursor(&upright, ControlKey::MiddleRight, &alt), Some(Cursor::NsResize));
    assert_eq!(cursor(&upright, ControlKey::MiddleTop, &alt), Some(Cursor::EwResize));
    assert_eq!(cursor(&upright, ControlKey::Rotation, &plain), Some(Cursor::Crosshair));

    let turned = object().with_angle(90.0);
    assert_eq!(cursor(&turned, ControlKey::MiddleRight, &plain), Some(Cursor::SResize));
    assert_eq!(cursor(&turned, ControlKey::MiddleRight, &alt), Some(Cursor::EwResize));
    assert_eq!(cursor(&turned, ControlKey::MiddleTop, &alt), Some(Cursor::NsResize));

    let locked = object().with_locks(LockFlags::SKEWING_Y | LockFlags::SCALING_X);
    assert_eq!(cursor(&locked, ControlKey::MiddleRight, &alt), Some(Cursor::NotAllowed));
    assert_eq!(cursor(&locked, ControlKey::MiddleRight, &plain), Some(Cursor::NotAllowed));
    assert_eq!(cursor(&locked, ControlKey::MiddleTop, &plain), Some(Cursor::NResize));
}

#[test]
fn hit_testing_follows_rotation() {
    let obj = object().with_angle(90.0);
    let controls = Controls::default();
    // Rotated a quarter turn about (50, 25), the right edge midpoint moves
    // below the center.
    assert_eq!(
        controls.find(&obj, Point::new(50.0, 75.0), HIT),
        Some(ControlKey::MiddleRight)
    );
    assert_eq!(controls.find(&obj, Point::new(100.0, 25.0), HIT), None);
}
