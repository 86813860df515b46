// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target sanity checks.
//!
//! Control actions never fail. Degenerate input produces a no-op or
//! propagates NaN into the target, so a single bad pointer sample cannot
//! interrupt a frame. [`check_target`] is a separate diagnostic pass that
//! reports why a target will not transform sensibly. Nothing in the action
//! path depends on it.

use core::fmt;

use crate::axis::Axis;
use crate::math::MATRIX_EPSILON;
use crate::target::Transformable;

/// A reason a target cannot be transformed sensibly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformDiagnostic {
    /// Width or height is not strictly positive.
    DegenerateSize {
        /// Intrinsic width.
        width: f64,
        /// Intrinsic height.
        height: f64,
    },
    /// A transform property is NaN or infinite.
    NonFiniteProperty {
        /// Name of the offending property.
        name: &'static str,
    },
    /// The own matrix cannot be inverted.
    SingularMatrix,
}

impl fmt::Display for TransformDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateSize { width, height } => {
                write!(f, "degenerate size {width}x{height}")
            }
            Self::NonFiniteProperty { name } => write!(f, "property `{name}` is not finite"),
            Self::SingularMatrix => f.write_str("own matrix is singular"),
        }
    }
}

impl core::error::Error for TransformDiagnostic {}

/// Checks that `target` has finite properties, a positive size and an
/// invertible own matrix.
///
/// The first problem found is returned.
pub fn check_target<T: Transformable + ?Sized>(target: &T) -> Result<(), TransformDiagnostic> {
    let size = target.size();
    let center = target.center();
    let (x, y) = (Axis::X.keys(), Axis::Y.keys());
    let properties = [
        ("width", size.width),
        ("height", size.height),
        ("center_x", center.x),
        ("center_y", center.y),
        ("angle", target.angle()),
        (x.scale, target.scale(Axis::X)),
        (y.scale, target.scale(Axis::Y)),
        (x.skew, target.skew(Axis::X)),
        (y.skew, target.skew(Axis::Y)),
    ];
    if let Some(&(name, _)) = properties.iter().find(|(_, v)| !v.is_finite()) {
        return Err(TransformDiagnostic::NonFiniteProperty { name });
    }
    if size.width <= 0.0 || size.height <= 0.0 {
        return Err(TransformDiagnostic::DegenerateSize {
            width: size.width,
            height: size.height,
        });
    }
    let det = target.own_matrix().determinant();
    if !det.is_finite() || det.abs() < MATRIX_EPSILON {
        return Err(TransformDiagnostic::SingularMatrix);
    }
    Ok(())
}
