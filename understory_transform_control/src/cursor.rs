// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor resolution for controls.
//!
//! Resize cursors are rotation-aware. A handle's direction from the object
//! center is combined with the object angle and quantized to 45° steps; see
//! [`corner_quadrant`]. The step indexes a cyclic cursor table. Locked
//! actions resolve to [`Cursor::NotAllowed`].

use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::axis::Axis;
use crate::control::Control;
use crate::event::PointerInput;
use crate::math::normalize_degrees;
use crate::target::{LockFlags, Transformable};

/// A pointer cursor, named after its CSS keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Platform default arrow.
    Default,
    /// The action is unavailable.
    NotAllowed,
    /// Precise pointing, used for rotation.
    Crosshair,
    /// Move cursor.
    Move,
    /// Vertical resize.
    NsResize,
    /// Diagonal resize, top-right to bottom-left.
    NeswResize,
    /// Horizontal resize.
    EwResize,
    /// Diagonal resize, top-left to bottom-right.
    NwseResize,
    /// Resize towards the east.
    EResize,
    /// Resize towards the south-east.
    SeResize,
    /// Resize towards the south.
    SResize,
    /// Resize towards the south-west.
    SwResize,
    /// Resize towards the west.
    WResize,
    /// Resize towards the north-west.
    NwResize,
    /// Resize towards the north.
    NResize,
    /// Resize towards the north-east.
    NeResize,
}

impl Cursor {
    /// The CSS cursor keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::NotAllowed => "not-allowed",
            Self::Crosshair => "crosshair",
            Self::Move => "move",
            Self::NsResize => "ns-resize",
            Self::NeswResize => "nesw-resize",
            Self::EwResize => "ew-resize",
            Self::NwseResize => "nwse-resize",
            Self::EResize => "e-resize",
            Self::SeResize => "se-resize",
            Self::SResize => "s-resize",
            Self::SwResize => "sw-resize",
            Self::WResize => "w-resize",
            Self::NwResize => "nw-resize",
            Self::NResize => "n-resize",
            Self::NeResize => "ne-resize",
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skew cursors, indexed by quadrant modulo 4.
pub const SKEW_CURSORS: [Cursor; 4] = [
    Cursor::NsResize,
    Cursor::NeswResize,
    Cursor::EwResize,
    Cursor::NwseResize,
];

/// Scale cursors, indexed by quadrant modulo 8, clockwise from east.
pub const SCALE_CURSORS: [Cursor; 8] = [
    Cursor::EResize,
    Cursor::SeResize,
    Cursor::SResize,
    Cursor::SwResize,
    Cursor::WResize,
    Cursor::NwResize,
    Cursor::NResize,
    Cursor::NeResize,
];

/// Resolves the cursor for a control on a target.
pub type CursorHandler<T> = fn(&PointerInput, &Control<T>, &T) -> Cursor;

/// The 45° step, in `0..=8`, of the direction from the object center to
/// `control`, rotated by the object angle.
///
/// Flipped axes mirror the control position first. Step 0 points east and
/// steps advance clockwise (y grows downwards).
#[must_use]
pub fn corner_quadrant<T: Transformable + ?Sized>(target: &T, control: &Control<T>) -> usize {
    let x = if target.flip(Axis::X) { -control.x } else { control.x };
    let y = if target.flip(Axis::Y) { -control.y } else { control.y };
    let corner_angle = normalize_degrees(target.angle() + y.atan2(x).to_degrees());
    quadrant_index(corner_angle)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "the rounded value is in 0..=8"
)]
fn quadrant_index(degrees: f64) -> usize {
    (degrees / 45.0).round() as usize
}

/// The skew cursor for a quadrant.
#[must_use]
pub fn skew_cursor_for_quadrant(quadrant: usize) -> Cursor {
    SKEW_CURSORS[quadrant % SKEW_CURSORS.len()]
}

/// The scale cursor for a quadrant.
#[must_use]
pub fn scale_cursor_for_quadrant(quadrant: usize) -> Cursor {
    SCALE_CURSORS[quadrant % SCALE_CURSORS.len()]
}

/// Cursor for a skew control.
///
/// A control on a vertical edge (`x != 0`) skews along y, so it consults the
/// y skewing lock. A control on a horizontal edge consults the x lock.
#[must_use]
pub fn skew_cursor_style<T: Transformable + ?Sized>(
    _input: &PointerInput,
    control: &Control<T>,
    target: &T,
) -> Cursor {
    if control.x != 0.0 && target.is_locked(LockFlags::SKEWING_Y) {
        return Cursor::NotAllowed;
    }
    if control.y != 0.0 && target.is_locked(LockFlags::SKEWING_X) {
        return Cursor::NotAllowed;
    }
    skew_cursor_for_quadrant(corner_quadrant(target, control))
}

/// Cursor for a scale control.
///
/// Edge controls are blocked by the lock of their own axis. Corner controls
/// scale proportionally and are blocked by either lock.
#[must_use]
pub fn scale_cursor_style<T: Transformable + ?Sized>(
    _input: &PointerInput,
    control: &Control<T>,
    target: &T,
) -> Cursor {
    let mut needed = LockFlags::empty();
    if control.x != 0.0 {
        needed |= LockFlags::SCALING_X;
    }
    if control.y != 0.0 {
        needed |= LockFlags::SCALING_Y;
    }
    let locks = target.locks();
    if locks.contains(LockFlags::SCALING_X | LockFlags::SCALING_Y) || locks.intersects(needed) {
        return Cursor::NotAllowed;
    }
    scale_cursor_for_quadrant(corner_quadrant(target, control))
}

/// Skew cursor while alt is held, scale cursor otherwise.
#[must_use]
pub fn scale_skew_cursor_style<T: Transformable + ?Sized>(
    input: &PointerInput,
    control: &Control<T>,
    target: &T,
) -> Cursor {
    if input.alt() {
        skew_cursor_style(input, control, target)
    } else {
        scale_cursor_style(input, control, target)
    }
}

/// Cursor for the rotation control.
#[must_use]
pub fn rotation_cursor_style<T: Transformable + ?Sized>(
    _input: &PointerInput,
    _control: &Control<T>,
    target: &T,
) -> Cursor {
    if target.is_locked(LockFlags::ROTATION) {
        Cursor::NotAllowed
    } else {
        Cursor::Crosshair
    }
}
