// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control handles.
//!
//! A [`Control`] is a handle placed relative to an object's bounding box.
//! It carries the action a drag on it performs and the cursor it shows.
//! [`Controls`] is an ordered set of handles keyed by [`ControlKey`].
//! Its [`Default`] is the usual eight resize handles plus a rotation handle
//! above the top edge.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Affine, Point, Rect, Size};

use crate::cursor::{
    Cursor, CursorHandler, rotation_cursor_style, scale_cursor_style, scale_skew_cursor_style,
};
use crate::event::PointerInput;
use crate::rotate::rotation_with_snapping;
use crate::scale::{scaling_equally, scaling_x_or_skewing_y, scaling_y_or_skewing_x};
use crate::session::{ActionKind, ControlKey};
use crate::target::Transformable;
use crate::wrappers::ActionHandler;

/// Decides which [`ActionKind`] a drag starting with `input` performs.
pub type ActionKindResolver = fn(&PointerInput) -> ActionKind;

/// A handle on an object's bounding box.
pub struct Control<T: ?Sized> {
    /// Horizontal position as a fraction of the width, `-0.5` to `0.5`
    /// from the center.
    pub x: f64,
    /// Vertical position as a fraction of the height, `-0.5` to `0.5`
    /// from the center.
    pub y: f64,
    /// Extra horizontal offset in canvas pixels, in the rotated frame.
    pub offset_x: f64,
    /// Extra vertical offset in canvas pixels, in the rotated frame.
    pub offset_y: f64,
    /// Action run on every pointer move of a drag on this control.
    pub action: ActionHandler<T>,
    /// The action kind reported for a drag on this control.
    pub action_kind: ActionKindResolver,
    /// Cursor shown while hovering this control.
    pub cursor: CursorHandler<T>,
}

impl<T: ?Sized> Clone for Control<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Control<T> {}

impl<T: ?Sized> fmt::Debug for Control<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("offset_x", &self.offset_x)
            .field("offset_y", &self.offset_y)
            .finish_non_exhaustive()
    }
}

impl<T: Transformable + ?Sized> Control<T> {
    /// A control at `(x, y)` with no offset.
    #[must_use]
    pub fn new(
        x: f64,
        y: f64,
        action: ActionHandler<T>,
        action_kind: ActionKindResolver,
        cursor: CursorHandler<T>,
    ) -> Self {
        Self {
            x,
            y,
            offset_x: 0.0,
            offset_y: 0.0,
            action,
            action_kind,
            cursor,
        }
    }

    /// Returns a copy with a pixel offset.
    #[must_use]
    pub fn with_offset(mut self, offset_x: f64, offset_y: f64) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    /// Canvas position of the handle on `target`.
    ///
    /// The handle sits on the scaled and skewed bounding box, rotated with
    /// the object. Offsets are not scaled.
    #[must_use]
    pub fn position(&self, target: &T) -> Point {
        let dims = target.transformed_dimensions();
        let local = Point::new(
            self.x * dims.width + self.offset_x,
            self.y * dims.height + self.offset_y,
        );
        let frame = Affine::translate(target.center().to_vec2())
            * Affine::rotate(target.angle().to_radians());
        frame * local
    }

    /// The action kind a drag starting with `input` performs.
    #[must_use]
    pub fn action_kind(&self, input: &PointerInput) -> ActionKind {
        (self.action_kind)(input)
    }

    /// The cursor to show for `input` over this control.
    #[must_use]
    pub fn cursor(&self, input: &PointerInput, target: &T) -> Cursor {
        (self.cursor)(input, self, target)
    }
}

fn scale_kind(_: &PointerInput) -> ActionKind {
    ActionKind::Scale
}

fn scale_x_or_skew_y_kind(input: &PointerInput) -> ActionKind {
    if input.alt() {
        ActionKind::SkewY
    } else {
        ActionKind::ScaleX
    }
}

fn scale_y_or_skew_x_kind(input: &PointerInput) -> ActionKind {
    if input.alt() {
        ActionKind::SkewX
    } else {
        ActionKind::ScaleY
    }
}

fn rotate_kind(_: &PointerInput) -> ActionKind {
    ActionKind::Rotate
}

/// Distance of the default rotation handle above the top edge, in pixels.
pub const ROTATION_HANDLE_OFFSET: f64 = 40.0;

/// An ordered set of controls.
pub struct Controls<T: ?Sized> {
    entries: Vec<(ControlKey, Control<T>)>,
}

impl<T: ?Sized> Clone for Controls<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Controls<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, c)| (k.as_str(), c)))
            .finish()
    }
}

impl<T: Transformable + ?Sized> Default for Controls<T> {
    fn default() -> Self {
        let edge_x = |x: f64| {
            Control::<T>::new(
                x,
                0.0,
                scaling_x_or_skewing_y,
                scale_x_or_skew_y_kind,
                scale_skew_cursor_style,
            )
        };
        let edge_y = |y: f64| {
            Control::<T>::new(
                0.0,
                y,
                scaling_y_or_skewing_x,
                scale_y_or_skew_x_kind,
                scale_skew_cursor_style,
            )
        };
        let corner = |x: f64, y: f64| {
            Control::<T>::new(x, y, scaling_equally, scale_kind, scale_cursor_style)
        };
        let rotation = Control::<T>::new(
            0.0,
            -0.5,
            rotation_with_snapping,
            rotate_kind,
            rotation_cursor_style,
        )
        .with_offset(0.0, -ROTATION_HANDLE_OFFSET);

        let entries = [
            (ControlKey::MiddleLeft, edge_x(-0.5)),
            (ControlKey::MiddleRight, edge_x(0.5)),
            (ControlKey::MiddleBottom, edge_y(0.5)),
            (ControlKey::MiddleTop, edge_y(-0.5)),
            (ControlKey::TopLeft, corner(-0.5, -0.5)),
            (ControlKey::TopRight, corner(0.5, -0.5)),
            (ControlKey::BottomLeft, corner(-0.5, 0.5)),
            (ControlKey::BottomRight, corner(0.5, 0.5)),
            (ControlKey::Rotation, rotation),
        ];
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

impl<T: Transformable + ?Sized> Controls<T> {
    /// An empty control set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The control for `key`, if present.
    #[must_use]
    pub fn get(&self, key: ControlKey) -> Option<&Control<T>> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, c)| c)
    }

    /// Inserts or replaces the control for `key`.
    ///
    /// A replaced control keeps its place in the hit-testing order. New
    /// controls are tested last.
    pub fn insert(&mut self, key: ControlKey, control: Control<T>) -> Option<Control<T>> {
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(core::mem::replace(slot, control));
        }
        self.entries.push((key, control));
        None
    }

    /// Removes the control for `key`.
    pub fn remove(&mut self, key: ControlKey) -> Option<Control<T>> {
        let index = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Controls in hit-testing order.
    pub fn iter(&self) -> impl Iterator<Item = (ControlKey, &Control<T>)> + '_ {
        self.entries.iter().map(|(k, c)| (*k, c))
    }

    /// Number of controls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no controls.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first control whose `hit_size` square, centered on its position,
    /// contains `pointer`.
    #[must_use]
    pub fn find(&self, target: &T, pointer: Point, hit_size: f64) -> Option<ControlKey> {
        let size = Size::new(hit_size, hit_size);
        self.iter()
            .find(|(_, control)| {
                let hit = Rect::from_center_size(control.position(target), size);
                hit.contains(pointer)
            })
            .map(|(key, _)| key)
    }
}
