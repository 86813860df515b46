// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

use crate::target::LockFlags;

/// One of the two orthogonal directions an object is transformed along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

/// Static description of what an [`Axis`] governs on a target.
///
/// Property access itself goes through [`Transformable`](crate::Transformable)
/// methods that take an [`Axis`]. This table carries the pieces that differ by
/// axis but are not properties: the counter-axis, the lock bits, and names
/// for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisKeys {
    /// The axis this entry describes.
    pub axis: Axis,
    /// The perpendicular axis.
    pub counter_axis: Axis,
    /// Lock bit that forbids skewing along this axis.
    pub lock_skewing: LockFlags,
    /// Lock bit that forbids scaling along this axis.
    pub lock_scaling: LockFlags,
    /// Lock bit that forbids moving along this axis.
    pub lock_movement: LockFlags,
    /// Property name of the scale on this axis.
    pub scale: &'static str,
    /// Property name of the skew on this axis.
    pub skew: &'static str,
    /// Property name of the origin on this axis.
    pub origin: &'static str,
    /// Property name of the flip on this axis.
    pub flip: &'static str,
}

static X_KEYS: AxisKeys = AxisKeys {
    axis: Axis::X,
    counter_axis: Axis::Y,
    lock_skewing: LockFlags::SKEWING_X,
    lock_scaling: LockFlags::SCALING_X,
    lock_movement: LockFlags::MOVEMENT_X,
    scale: "scale_x",
    skew: "skew_x",
    origin: "origin_x",
    flip: "flip_x",
};

static Y_KEYS: AxisKeys = AxisKeys {
    axis: Axis::Y,
    counter_axis: Axis::X,
    lock_skewing: LockFlags::SKEWING_Y,
    lock_scaling: LockFlags::SCALING_Y,
    lock_movement: LockFlags::MOVEMENT_Y,
    scale: "scale_y",
    skew: "skew_y",
    origin: "origin_y",
    flip: "flip_y",
};

impl Axis {
    /// Both axes, x first.
    pub const ALL: [Self; 2] = [Self::X, Self::Y];

    /// The static descriptor for this axis.
    #[must_use]
    pub fn keys(self) -> &'static AxisKeys {
        match self {
            Self::X => &X_KEYS,
            Self::Y => &Y_KEYS,
        }
    }

    /// The perpendicular axis.
    #[must_use]
    pub const fn counter(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// The component of `v` along this axis.
    #[must_use]
    #[inline]
    pub fn of(self, v: Vec2) -> f64 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
        }
    }

    /// The coordinate of `p` along this axis.
    #[must_use]
    #[inline]
    pub fn of_point(self, p: Point) -> f64 {
        self.of(p.to_vec2())
    }
}
