// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-gesture transform state.
//!
//! A [`TransformSession`] is created when a drag begins on a target. The
//! drag may start on a control or on the body. The session is updated after
//! every pointer move and discarded when the drag ends. It never holds the
//! target itself. Actions receive the target separately, through
//! [`ActionContext`](crate::ActionContext).

use kurbo::{Point, Vec2};

use crate::axis::Axis;
use crate::math::create_vector;
use crate::origin::Origin;
use crate::target::Transformable;

/// Identifies one of the default control handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlKey {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
    /// Middle of the left edge.
    MiddleLeft,
    /// Middle of the right edge.
    MiddleRight,
    /// Middle of the top edge.
    MiddleTop,
    /// Middle of the bottom edge.
    MiddleBottom,
    /// Rotation handle above the top edge.
    Rotation,
}

impl ControlKey {
    /// Short conventional name (`"tl"`, `"mr"`, `"mtr"`, …).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "tl",
            Self::TopRight => "tr",
            Self::BottomLeft => "bl",
            Self::BottomRight => "br",
            Self::MiddleLeft => "ml",
            Self::MiddleRight => "mr",
            Self::MiddleTop => "mt",
            Self::MiddleBottom => "mb",
            Self::Rotation => "mtr",
        }
    }

    /// The origin a transform started from this handle anchors to.
    ///
    /// Each axis anchors to the edge opposite the handle. When the handle
    /// sits in the middle of that axis, the `fallback` origin is kept.
    #[must_use]
    pub fn opposite_origin(self, fallback_x: Origin, fallback_y: Origin) -> (Origin, Origin) {
        let x = match self {
            Self::MiddleLeft | Self::TopLeft | Self::BottomLeft => Origin::LEFT.opposite(),
            Self::MiddleRight | Self::TopRight | Self::BottomRight => Origin::RIGHT.opposite(),
            _ => fallback_x,
        };
        let y = match self {
            Self::TopLeft | Self::MiddleTop | Self::TopRight => Origin::TOP.opposite(),
            Self::BottomLeft | Self::MiddleBottom | Self::BottomRight => Origin::BOTTOM.opposite(),
            _ => fallback_y,
        };
        (x, y)
    }
}

/// The transform an in-progress gesture performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Move the object.
    Drag,
    /// Scale both axes proportionally.
    Scale,
    /// Scale horizontally.
    ScaleX,
    /// Scale vertically.
    ScaleY,
    /// Skew horizontally.
    SkewX,
    /// Skew vertically.
    SkewY,
    /// Rotate.
    Rotate,
}

/// Which physical side of the object a skew drag moves, as a sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SkewingSide {
    /// The side whose motion matches the pointer motion.
    #[default]
    Positive,
    /// The side whose motion opposes the pointer motion.
    Negative,
}

impl SkewingSide {
    /// `Negative` when `sign` is strictly negative, otherwise `Positive`.
    #[must_use]
    pub fn from_sign(sign: f64) -> Self {
        if sign < 0.0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// `1.0` or `-1.0`.
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// Target properties captured when the gesture began.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OriginalState {
    /// Center at gesture start.
    pub center: Point,
    /// Rotation at gesture start, in degrees.
    pub angle: f64,
    /// Horizontal scale at gesture start.
    pub scale_x: f64,
    /// Vertical scale at gesture start.
    pub scale_y: f64,
    /// Horizontal skew at gesture start, in degrees.
    pub skew_x: f64,
    /// Vertical skew at gesture start, in degrees.
    pub skew_y: f64,
    /// The target's own origin along x.
    pub origin_x: Origin,
    /// The target's own origin along y.
    pub origin_y: Origin,
}

impl OriginalState {
    /// Snapshots the transform properties of `target`.
    #[must_use]
    pub fn capture<T: Transformable + ?Sized>(target: &T) -> Self {
        Self {
            center: target.center(),
            angle: target.angle(),
            scale_x: target.scale(Axis::X),
            scale_y: target.scale(Axis::Y),
            skew_x: target.skew(Axis::X),
            skew_y: target.skew(Axis::Y),
            origin_x: target.origin(Axis::X),
            origin_y: target.origin(Axis::Y),
        }
    }

    /// The captured scale along `axis`.
    #[must_use]
    pub fn scale(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.scale_x,
            Axis::Y => self.scale_y,
        }
    }
}

/// Ephemeral state of one drag gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformSession {
    /// What the gesture does.
    pub action: ActionKind,
    /// The grabbed control, or `None` for a body drag.
    pub corner: Option<ControlKey>,
    /// Horizontal origin the transform keeps fixed.
    pub origin_x: Origin,
    /// Vertical origin the transform keeps fixed.
    pub origin_y: Origin,
    /// Pointer position when the gesture began.
    pub start: Point,
    /// Pointer position at the previous move.
    pub last: Point,
    /// Pointer position minus the target position at gesture start.
    pub offset: Vec2,
    /// Side being skewed. Skew adaptors set it on every step.
    pub skewing_side: SkewingSide,
    /// Target state at gesture start.
    pub original: OriginalState,
}

impl TransformSession {
    /// Begins a session for `action` on `target` with the pointer at `pointer`.
    ///
    /// The session origin is the target's own origin. When a control was
    /// grabbed, each axis with a handle edge anchors to the opposite edge.
    /// Rotation always pivots around the center.
    #[must_use]
    pub fn new<T: Transformable + ?Sized>(
        target: &T,
        action: ActionKind,
        corner: Option<ControlKey>,
        pointer: Point,
    ) -> Self {
        let original = OriginalState::capture(target);
        let (origin_x, origin_y) = match (action, corner) {
            (ActionKind::Rotate, _) => (Origin::Center, Origin::Center),
            (_, Some(key)) => key.opposite_origin(original.origin_x, original.origin_y),
            (_, None) => (original.origin_x, original.origin_y),
        };
        let position = target.origin_point(original.origin_x, original.origin_y);
        Self {
            action,
            corner,
            origin_x,
            origin_y,
            start: pointer,
            last: pointer,
            offset: pointer - position,
            skewing_side: SkewingSide::default(),
            original,
        }
    }

    /// Anchors the transform at the object center on both axes.
    #[must_use]
    pub fn centered(mut self) -> Self {
        self.origin_x = Origin::Center;
        self.origin_y = Origin::Center;
        self
    }

    /// The session origin along `axis`.
    #[must_use]
    pub fn origin(&self, axis: Axis) -> Origin {
        match axis {
            Axis::X => self.origin_x,
            Axis::Y => self.origin_y,
        }
    }

    /// Returns a copy with the origin along `axis` replaced.
    #[must_use]
    pub fn with_origin(mut self, axis: Axis, origin: Origin) -> Self {
        match axis {
            Axis::X => self.origin_x = origin,
            Axis::Y => self.origin_y = origin,
        }
        self
    }

    /// Returns a copy with the skewing side replaced.
    #[must_use]
    pub fn with_skewing_side(mut self, side: SkewingSide) -> Self {
        self.skewing_side = side;
        self
    }

    /// Records `pointer` as the last seen position.
    pub fn update(&mut self, pointer: Point) {
        self.last = pointer;
    }

    /// Pointer movement since the previous update.
    #[must_use]
    pub fn delta(&self, pointer: Point) -> Vec2 {
        create_vector(self.last, pointer)
    }
}
