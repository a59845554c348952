//! The `Numeric` trait: the common arithmetic surface shared by every
//! scalar type the engine can be instantiated with (pressure, velocity,
//! velocity-flow).
//!
//! `f32` and `f64` implement it directly (binary32/binary64). The
//! fixed-point families live in [`crate::fixed`] and the runtime-tagged
//! value used by the dispatcher lives in [`crate::dynamic`].

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Uniform arithmetic and comparison semantics across float, double, and
/// fixed-point representations. Mixed-type expressions are never formed
/// directly against this trait: callers bridge between two `Numeric`
/// implementors explicitly via [`Numeric::to_f64`] / [`Numeric::from_f64`].
pub trait Numeric:
    Copy
    + Clone
    + fmt::Debug
    + fmt::Display
    + Default
    + PartialOrd
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + Send
    + Sync
    + 'static
{
    /// Construct from an integer literal (`i` becomes the value `i`, not a
    /// raw representation).
    fn from_i64(v: i64) -> Self;

    /// Construct from a 64-bit float, rounding/truncating as the concrete
    /// representation requires.
    fn from_f64(v: f64) -> Self;

    /// Widen to `f64` for display, checkpointing, or bridging to another
    /// `Numeric` implementor.
    fn to_f64(self) -> f64;

    /// Absolute value.
    fn abs(self) -> Self;

    fn zero() -> Self {
        Self::from_i64(0)
    }

    fn one() -> Self {
        Self::from_i64(1)
    }

    fn is_positive(self) -> bool {
        self > Self::zero()
    }

    fn is_negative(self) -> bool {
        self < Self::zero()
    }

    fn min(self, other: Self) -> Self {
        if self < other { self } else { other }
    }

    /// Construct an integer-valued instance "of the same kind" as `self`.
    /// For statically-typed implementors the kind is fixed by the type, so
    /// this is just [`Numeric::from_i64`]; [`crate::dynamic::Num`] overrides
    /// it to preserve its runtime-chosen variant instead of guessing one.
    fn from_i64_like(&self, v: i64) -> Self {
        Self::from_i64(v)
    }

    /// Same as [`Numeric::from_i64_like`] but for a float literal.
    fn from_f64_like(&self, v: f64) -> Self {
        Self::from_f64(v)
    }

    fn zero_like(&self) -> Self {
        self.from_i64_like(0)
    }
}

impl Numeric for f32 {
    fn from_i64(v: i64) -> Self {
        v as f32
    }

    fn from_f64(v: f64) -> Self {
        v as f32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn abs(self) -> Self {
        f32::abs(self)
    }
}

impl Numeric for f64 {
    fn from_i64(v: i64) -> Self {
        v as f64
    }

    fn from_f64(v: f64) -> Self {
        v
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn abs(self) -> Self {
        f64::abs(self)
    }
}
