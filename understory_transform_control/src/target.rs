// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transformable targets.
//!
//! Control actions operate on anything implementing [`Transformable`]. The
//! trait asks for a handful of property accessors. In return it provides the
//! own-matrix computation, matrix application, origin translation and
//! local-point projection that every action relies on.
//!
//! [`CanvasObject`] is a plain implementation. It is good enough to drive a
//! canvas directly or to mirror properties stored elsewhere.

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::axis::Axis;
use crate::math::{TransformParts, compose_matrix, decompose_matrix};
use crate::origin::Origin;

bitflags::bitflags! {
    /// Per-object locks that disable individual control actions.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct LockFlags: u8 {
        /// Forbid horizontal movement.
        const MOVEMENT_X = 0b0000_0001;
        /// Forbid vertical movement.
        const MOVEMENT_Y = 0b0000_0010;
        /// Forbid horizontal scaling.
        const SCALING_X  = 0b0000_0100;
        /// Forbid vertical scaling.
        const SCALING_Y  = 0b0000_1000;
        /// Forbid horizontal skewing.
        const SKEWING_X  = 0b0001_0000;
        /// Forbid vertical skewing.
        const SKEWING_Y  = 0b0010_0000;
        /// Forbid rotation.
        const ROTATION   = 0b0100_0000;
    }
}

/// Angle snapping configuration for rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleSnap {
    /// Snap step in degrees.
    pub angle: f64,
    /// Distance in degrees within which the angle snaps to a step.
    pub threshold: f64,
}

impl AngleSnap {
    /// Snaps to multiples of `angle` with the threshold equal to the step.
    #[must_use]
    pub fn new(angle: f64) -> Self {
        Self {
            angle,
            threshold: angle,
        }
    }

    /// Replaces the snap threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Capability of an object whose affine transform can be manipulated by
/// controls.
///
/// Implementors expose intrinsic size and transform properties. Everything
/// else is derived. Angles are in degrees, positions are in the parent
/// (canvas) coordinate space, and `center` is the translation of the own
/// matrix.
pub trait Transformable {
    /// Intrinsic, unscaled size.
    fn size(&self) -> Size;
    /// Object center in parent coordinates.
    fn center(&self) -> Point;
    /// Moves the object so its center is at `center`.
    fn set_center(&mut self, center: Point);
    /// Rotation in degrees.
    fn angle(&self) -> f64;
    /// Sets the rotation in degrees.
    fn set_angle(&mut self, degrees: f64);
    /// Scale along `axis`, without the flip sign.
    fn scale(&self, axis: Axis) -> f64;
    /// Sets the scale along `axis`.
    fn set_scale(&mut self, axis: Axis, scale: f64);
    /// Skew along `axis` in degrees.
    fn skew(&self, axis: Axis) -> f64;
    /// Sets the skew along `axis` in degrees.
    fn set_skew(&mut self, axis: Axis, degrees: f64);
    /// Whether the object is mirrored along `axis`.
    fn flip(&self, axis: Axis) -> bool;
    /// The object's own origin along `axis`, used for its reported position.
    fn origin(&self, axis: Axis) -> Origin;
    /// Active locks.
    fn locks(&self) -> LockFlags;

    /// Rotation snapping, if any.
    fn snap(&self) -> Option<AngleSnap> {
        None
    }

    /// Returns `true` if any of `flags` is locked.
    fn is_locked(&self, flags: LockFlags) -> bool {
        self.locks().intersects(flags)
    }

    /// Current properties as [`TransformParts`].
    fn transform_parts(&self) -> TransformParts {
        TransformParts {
            translation: self.center().to_vec2(),
            angle: self.angle(),
            scale_x: self.scale(Axis::X),
            scale_y: self.scale(Axis::Y),
            skew_x: self.skew(Axis::X),
            skew_y: self.skew(Axis::Y),
            flip_x: self.flip(Axis::X),
            flip_y: self.flip(Axis::Y),
        }
    }

    /// The local transform, excluding any parent transform.
    ///
    /// Local coordinates have the object center at the origin and span
    /// `[-w/2, w/2] × [-h/2, h/2]`.
    fn own_matrix(&self) -> Affine {
        compose_matrix(&self.transform_parts())
    }

    /// Commits `matrix` as the new own matrix.
    ///
    /// `skew_y` is the trailing y-shear, in degrees, that `matrix` was
    /// composed with. Angle, scale, x-skew and center are recovered from the
    /// rest. Flips are kept. Size is never touched.
    fn apply_own_matrix(&mut self, matrix: Affine, skew_y: f64) {
        let parts = decompose_matrix(matrix, skew_y, self.flip(Axis::X), self.flip(Axis::Y));
        self.set_angle(parts.angle);
        self.set_scale(Axis::X, parts.scale_x);
        self.set_scale(Axis::Y, parts.scale_y);
        self.set_skew(Axis::X, parts.skew_x);
        self.set_skew(Axis::Y, parts.skew_y);
        self.set_center(parts.translation.to_point());
    }

    /// Offset from the center to the point addressed by `(origin_x, origin_y)`,
    /// in parent coordinates.
    fn origin_offset(&self, origin_x: Origin, origin_y: Origin) -> Vec2 {
        let size = self.size();
        let local = Point::new(
            origin_x.resolve() * size.width,
            origin_y.resolve() * size.height,
        );
        (self.own_matrix().with_translation(Vec2::ZERO) * local).to_vec2()
    }

    /// Position of the origin point when the object is centered at `center`.
    fn translate_to_origin_point(
        &self,
        center: Point,
        origin_x: Origin,
        origin_y: Origin,
    ) -> Point {
        center + self.origin_offset(origin_x, origin_y)
    }

    /// Center position that puts the origin point at `point`.
    fn translate_to_center_point(&self, point: Point, origin_x: Origin, origin_y: Origin) -> Point {
        point - self.origin_offset(origin_x, origin_y)
    }

    /// Current position of the origin point.
    fn origin_point(&self, origin_x: Origin, origin_y: Origin) -> Point {
        self.translate_to_origin_point(self.center(), origin_x, origin_y)
    }

    /// Moves the object so the origin point lands on `position`.
    fn set_position_by_origin(&mut self, position: Point, origin_x: Origin, origin_y: Origin) {
        let center = self.translate_to_center_point(position, origin_x, origin_y);
        self.set_center(center);
    }

    /// Projects a parent-space point into the object's rotated frame,
    /// relative to the origin point.
    ///
    /// Only rotation is undone. Scale and skew still apply, so distances
    /// are comparable with [`Transformable::transformed_dimensions`].
    fn to_local_point(&self, point: Point, origin_x: Origin, origin_y: Origin) -> Point {
        let relative = point - self.origin_point(origin_x, origin_y);
        Affine::rotate(-self.angle().to_radians()) * relative.to_point()
    }

    /// Size of the scaled and skewed object, before rotation.
    fn transformed_dimensions(&self) -> Size {
        let parts = TransformParts {
            translation: Vec2::ZERO,
            angle: 0.0,
            ..self.transform_parts()
        };
        let size = self.size();
        let half = Rect::from_center_size(Point::ORIGIN, size);
        compose_matrix(&parts).transform_rect_bbox(half).size()
    }
}

/// A transformable canvas object.
///
/// Stores the properties [`Transformable`] needs. Its reported
/// [`position`](CanvasObject::position) is the point addressed by its own
/// origin, which defaults to the top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasObject {
    size: Size,
    center: Point,
    angle: f64,
    scale: Vec2,
    skew: Vec2,
    flip_x: bool,
    flip_y: bool,
    origin_x: Origin,
    origin_y: Origin,
    locks: LockFlags,
    snap: Option<AngleSnap>,
}

impl CanvasObject {
    /// Creates an untransformed object covering `rect`.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self {
            size: rect.size(),
            center: rect.center(),
            angle: 0.0,
            scale: Vec2::new(1.0, 1.0),
            skew: Vec2::ZERO,
            flip_x: false,
            flip_y: false,
            origin_x: Origin::LEFT,
            origin_y: Origin::TOP,
            locks: LockFlags::empty(),
            snap: None,
        }
    }

    /// Sets the object's own origin.
    #[must_use]
    pub fn with_origin(mut self, origin_x: Origin, origin_y: Origin) -> Self {
        self.origin_x = origin_x;
        self.origin_y = origin_y;
        self
    }

    /// Sets the rotation in degrees, keeping the center.
    #[must_use]
    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.angle = degrees;
        self
    }

    /// Sets both scales, keeping the center.
    #[must_use]
    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale = Vec2::new(scale_x, scale_y);
        self
    }

    /// Sets both skews in degrees, keeping the center.
    #[must_use]
    pub fn with_skew(mut self, skew_x: f64, skew_y: f64) -> Self {
        self.skew = Vec2::new(skew_x, skew_y);
        self
    }

    /// Sets both flips, keeping the center.
    #[must_use]
    pub fn with_flip(mut self, flip_x: bool, flip_y: bool) -> Self {
        self.flip_x = flip_x;
        self.flip_y = flip_y;
        self
    }

    /// Replaces the locks.
    #[must_use]
    pub fn with_locks(mut self, locks: LockFlags) -> Self {
        self.locks = locks;
        self
    }

    /// Enables rotation snapping.
    #[must_use]
    pub fn with_snap(mut self, snap: AngleSnap) -> Self {
        self.snap = Some(snap);
        self
    }

    /// Replaces the locks in place.
    pub fn set_locks(&mut self, locks: LockFlags) {
        self.locks = locks;
    }

    /// Replaces the size. The center stays put.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Position of the object's own origin point.
    #[must_use]
    pub fn position(&self) -> Point {
        self.origin_point(self.origin_x, self.origin_y)
    }

    /// Moves the object so its own origin point is at `position`.
    pub fn set_position(&mut self, position: Point) {
        self.set_position_by_origin(position, self.origin_x, self.origin_y);
    }

    /// Corners of the transformed object in parent coordinates, clockwise
    /// from the top-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        let m = self.own_matrix();
        let (hw, hh) = (self.size.width / 2.0, self.size.height / 2.0);
        [
            m * Point::new(-hw, -hh),
            m * Point::new(hw, -hh),
            m * Point::new(hw, hh),
            m * Point::new(-hw, hh),
        ]
    }
}

impl Transformable for CanvasObject {
    fn size(&self) -> Size {
        self.size
    }

    fn center(&self) -> Point {
        self.center
    }

    fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    fn angle(&self) -> f64 {
        self.angle
    }

    fn set_angle(&mut self, degrees: f64) {
        self.angle = degrees;
    }

    fn scale(&self, axis: Axis) -> f64 {
        axis.of(self.scale)
    }

    fn set_scale(&mut self, axis: Axis, scale: f64) {
        match axis {
            Axis::X => self.scale.x = scale,
            Axis::Y => self.scale.y = scale,
        }
    }

    fn skew(&self, axis: Axis) -> f64 {
        axis.of(self.skew)
    }

    fn set_skew(&mut self, axis: Axis, degrees: f64) {
        match axis {
            Axis::X => self.skew.x = degrees,
            Axis::Y => self.skew.y = degrees,
        }
    }

    fn flip(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.flip_x,
            Axis::Y => self.flip_y,
        }
    }

    fn origin(&self, axis: Axis) -> Origin {
        match axis {
            Axis::X => self.origin_x,
            Axis::Y => self.origin_y,
        }
    }

    fn locks(&self) -> LockFlags {
        self.locks
    }

    fn snap(&self) -> Option<AngleSnap> {
        self.snap
    }
}
