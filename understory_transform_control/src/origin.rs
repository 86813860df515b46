// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Alignment of an anchor point along one axis of an object.
///
/// Origins resolve to an offset factor relative to the object center:
/// `Start` is `-0.5`, `Center` is `0.0`, `End` is `0.5`. `Fraction(f)` is a
/// normalized position in `[0, 1]` and resolves to `f - 0.5`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Origin {
    /// Left or top edge.
    Start,
    /// Middle of the object.
    Center,
    /// Right or bottom edge.
    End,
    /// Normalized position, `0.0` at the start edge and `1.0` at the end edge.
    Fraction(f64),
}

impl Origin {
    /// Alias of [`Origin::Start`] for the x axis.
    pub const LEFT: Self = Self::Start;
    /// Alias of [`Origin::End`] for the x axis.
    pub const RIGHT: Self = Self::End;
    /// Alias of [`Origin::Start`] for the y axis.
    pub const TOP: Self = Self::Start;
    /// Alias of [`Origin::End`] for the y axis.
    pub const BOTTOM: Self = Self::End;

    /// Offset factor in `[-0.5, 0.5]` for in-range origins.
    ///
    /// Fractions outside `[0, 1]` pass through unchanged, so they address
    /// points outside the object.
    #[must_use]
    pub fn resolve(self) -> f64 {
        match self {
            Self::Start => -0.5,
            Self::Center => 0.0,
            Self::End => 0.5,
            Self::Fraction(f) => f - 0.5,
        }
    }

    /// The origin mirrored through the center.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::Center => Self::Center,
            Self::End => Self::Start,
            Self::Fraction(f) => Self::Fraction(1.0 - f),
        }
    }

    /// Returns `true` if this origin resolves to the object center.
    #[must_use]
    pub fn is_center(self) -> bool {
        self.resolve() == 0.0
    }
}
