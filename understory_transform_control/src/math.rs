// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Affine helpers used by the control actions.
//!
//! Matrices are [`kurbo::Affine`] values. Columns are basis vectors, so
//! `a * b` applies `b` first. The object model composes its own matrix as
//!
//! ```text
//! T(center) · R(angle) · S(scale · flip) · Kx(skew_x) · Ky(skew_y)
//! ```
//!
//! and [`decompose_matrix`] is the inverse of [`compose_matrix`] for any
//! matrix of that shape once the trailing `skew_y` is known.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Vec2};

/// Tolerance used when comparing matrices for "did anything change".
pub const MATRIX_EPSILON: f64 = 1e-9;

/// Vector pointing from `from` to `to`.
#[must_use]
#[inline]
pub fn create_vector(from: Point, to: Point) -> Vec2 {
    to - from
}

/// Linear matrix whose columns are the basis vectors `x` and `y`.
#[must_use]
pub fn basis_matrix(x: Vec2, y: Vec2) -> Affine {
    Affine::new([x.x, x.y, y.x, y.y, 0.0, 0.0])
}

/// Returns the linear map `C` such that `basis(from) · C == basis(to)`.
///
/// Both bases are given as `[x, y]` column vectors. A degenerate `from`
/// basis yields non-finite coefficients.
#[must_use]
pub fn change_of_basis(from: [Vec2; 2], to: [Vec2; 2]) -> Affine {
    basis_matrix(from[0], from[1]).inverse() * basis_matrix(to[0], to[1])
}

/// Multiplies matrices left to right: `[a, b, c]` yields `a · b · c`.
#[must_use]
pub fn multiply_chain<I>(matrices: I) -> Affine
where
    I: IntoIterator<Item = Affine>,
{
    matrices
        .into_iter()
        .fold(Affine::IDENTITY, |acc, matrix| acc * matrix)
}

/// Coefficient-wise comparison within `epsilon`.
///
/// Any NaN coefficient makes the matrices unequal.
#[must_use]
pub fn matrices_equal(a: Affine, b: Affine, epsilon: f64) -> bool {
    a.as_coeffs()
        .iter()
        .zip(b.as_coeffs())
        .all(|(lhs, rhs)| (lhs - rhs).abs() <= epsilon)
}

/// Tangent of a skew angle given in degrees.
#[must_use]
#[inline]
pub fn skew_tangent(degrees: f64) -> f64 {
    degrees.to_radians().tan()
}

/// Skew angle in degrees for a shear tangent.
#[must_use]
#[inline]
pub fn skew_angle(tangent: f64) -> f64 {
    tangent.atan2(1.0).to_degrees()
}

/// Wraps an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// The decomposed transform properties of an object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformParts {
    /// Translation, i.e. the object center in parent coordinates.
    pub translation: Vec2,
    /// Rotation in degrees.
    pub angle: f64,
    /// Horizontal scale, without the flip sign.
    pub scale_x: f64,
    /// Vertical scale, without the flip sign.
    pub scale_y: f64,
    /// Horizontal skew in degrees.
    pub skew_x: f64,
    /// Vertical skew in degrees.
    pub skew_y: f64,
    /// Mirror along the x axis.
    pub flip_x: bool,
    /// Mirror along the y axis.
    pub flip_y: bool,
}

/// Builds `T · R · S · Kx · Ky` from decomposed parts.
#[must_use]
pub fn compose_matrix(parts: &TransformParts) -> Affine {
    let scale_x = if parts.flip_x {
        -parts.scale_x
    } else {
        parts.scale_x
    };
    let scale_y = if parts.flip_y {
        -parts.scale_y
    } else {
        parts.scale_y
    };
    multiply_chain([
        Affine::translate(parts.translation),
        Affine::rotate(parts.angle.to_radians()),
        Affine::scale_non_uniform(scale_x, scale_y),
        Affine::skew(skew_tangent(parts.skew_x), 0.0),
        Affine::skew(0.0, skew_tangent(parts.skew_y)),
    ])
}

/// Splits `matrix` into [`TransformParts`], given its trailing `skew_y`.
///
/// The matrix is right-multiplied by the inverse y-shear. The result is then
/// QR-decomposed into rotation, scale and x-shear. The flip flags pick the
/// signs of the scale diagonal. The rotation absorbs the rest.
#[must_use]
pub fn decompose_matrix(matrix: Affine, skew_y: f64, flip_x: bool, flip_y: bool) -> TransformParts {
    let unsheared = matrix * Affine::skew(0.0, -skew_tangent(skew_y));
    let [a, b, c, d, e, f] = unsheared.as_coeffs();
    let r = a.hypot(b);
    let mut radians = b.atan2(a);
    let mut u00 = r;
    let mut u01 = (a * c + b * d) / r;
    let mut u11 = (a * d - b * c) / r;
    if flip_x {
        radians += core::f64::consts::PI;
        u00 = -u00;
        u01 = -u01;
        u11 = -u11;
    }
    let mut angle = normalize_degrees(radians.to_degrees());
    // A half-turn correction can land a hair below a full turn.
    if 360.0 - angle < MATRIX_EPSILON {
        angle = 0.0;
    }
    TransformParts {
        translation: Vec2::new(e, f),
        angle,
        scale_x: u00.abs(),
        scale_y: if flip_y { -u11 } else { u11 },
        skew_x: skew_angle(u01 / u00),
        skew_y,
        flip_x,
        flip_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_parts_close(a: &TransformParts, b: &TransformParts) {
        let close = |x: f64, y: f64| (x - y).abs() < 1e-9;
        assert!(close(a.translation.x, b.translation.x), "{a:?} vs {b:?}");
        assert!(close(a.translation.y, b.translation.y), "{a:?} vs {b:?}");
        assert!(close(a.angle, b.angle), "{a:?} vs {b:?}");
        assert!(close(a.scale_x, b.scale_x), "{a:?} vs {b:?}");
        assert!(close(a.scale_y, b.scale_y), "{a:?} vs {b:?}");
        assert!(close(a.skew_x, b.skew_x), "{a:?} vs {b:?}");
        assert!(close(a.skew_y, b.skew_y), "{a:?} vs {b:?}");
    }

    #[test]
    fn change_of_basis_maps_from_onto_to() {
        let from = [Vec2::new(100.0, 0.0), Vec2::new(0.0, 50.0)];
        let to = [Vec2::new(100.0, 20.0), Vec2::new(10.0, 50.0)];
        let change = change_of_basis(from, to);
        let mapped = basis_matrix(from[0], from[1]) * change;
        assert!(matrices_equal(mapped, basis_matrix(to[0], to[1]), 1e-12));
    }

    #[test]
    fn identical_bases_give_identity() {
        let basis = [Vec2::new(3.0, 1.0), Vec2::new(-2.0, 4.0)];
        assert!(matrices_equal(
            change_of_basis(basis, basis),
            Affine::IDENTITY,
            1e-12
        ));
    }

    #[test]
    fn multiply_chain_is_left_to_right() {
        let t = Affine::translate((10.0, 0.0));
        let s = Affine::scale(2.0);
        let chained = multiply_chain([t, s]);
        assert_eq!(chained * Point::new(1.0, 1.0), Point::new(12.0, 2.0));
        assert_eq!(multiply_chain(core::iter::empty()), Affine::IDENTITY);
    }

    #[test]
    fn matrices_equal_respects_epsilon_and_nan() {
        let a = Affine::translate((1.0, 1.0));
        let b = Affine::translate((1.0 + 1e-12, 1.0));
        assert!(matrices_equal(a, b, MATRIX_EPSILON));
        assert!(!matrices_equal(a, Affine::translate((1.1, 1.0)), MATRIX_EPSILON));
        let nan = Affine::new([f64::NAN, 0.0, 0.0, 1.0, 0.0, 0.0]);
        assert!(!matrices_equal(nan, nan, MATRIX_EPSILON));
    }

    #[test]
    fn skew_angle_inverts_skew_tangent() {
        for deg in [-60.0, -12.5, 0.0, 30.0, 45.0, 80.0] {
            assert!((skew_angle(skew_tangent(deg)) - deg).abs() < 1e-9);
        }
    }

    #[test]
    fn normalize_degrees_wraps_into_range() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
    }

    #[test]
    fn decompose_inverts_compose() {
        let parts = TransformParts {
            translation: Vec2::new(40.0, -12.0),
            angle: 33.0,
            scale_x: 1.5,
            scale_y: 0.75,
            skew_x: 20.0,
            skew_y: -15.0,
            flip_x: false,
            flip_y: false,
        };
        let back = decompose_matrix(compose_matrix(&parts), parts.skew_y, false, false);
        assert_parts_close(&back, &parts);
    }

    #[test]
    fn decompose_preserves_flips() {
        for (flip_x, flip_y) in [(true, false), (false, true), (true, true)] {
            let parts = TransformParts {
                translation: Vec2::new(5.0, 6.0),
                angle: 120.0,
                scale_x: 2.0,
                scale_y: 3.0,
                skew_x: -10.0,
                skew_y: 25.0,
                flip_x,
                flip_y,
            };
            let back = decompose_matrix(compose_matrix(&parts), parts.skew_y, flip_x, flip_y);
            assert_parts_close(&back, &parts);
        }
    }
}
