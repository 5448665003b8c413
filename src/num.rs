//! Numeric types.

use rand_core::RngCore;
use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A floating point type usable by the hull and its distributions.
///
/// Implemented for `f32` and `f64`. The trait is sealed: it exists to give the
/// hull and the reference distributions a single generic numeric parameter
/// rather than to let downstream crates plug in arbitrary numeric types.
pub trait Float:
    private::Sealed
    + Copy
    + Clone
    + Default
    + Debug
    + Display
    + PartialOrd
    + From<f32>
    + Into<f64>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    #[doc(hidden)]
    const SIGNIFICAND_BITS: u32;
    #[doc(hidden)]
    const ZERO: Self;
    #[doc(hidden)]
    const ONE: Self;
    #[doc(hidden)]
    const TWO: Self;
    #[doc(hidden)]
    const INFINITY: Self;
    #[doc(hidden)]
    const NEG_INFINITY: Self;

    #[doc(hidden)]
    fn min(self, other: Self) -> Self;
    #[doc(hidden)]
    fn max(self, other: Self) -> Self;
    #[doc(hidden)]
    fn abs(self) -> Self;
    #[doc(hidden)]
    fn sqrt(self) -> Self;
    #[doc(hidden)]
    fn ln(self) -> Self;
    #[doc(hidden)]
    fn ln_1p(self) -> Self;
    #[doc(hidden)]
    fn exp(self) -> Self;
    #[doc(hidden)]
    fn powf(self, exponent: Self) -> Self;
    #[doc(hidden)]
    fn powi(self, exponent: i32) -> Self;
    #[doc(hidden)]
    fn is_finite(self) -> bool;
    #[doc(hidden)]
    fn is_nan(self) -> bool;

    /// Draws a single variate uniformly distributed on `[0, 1)`.
    ///
    /// Mirrors the significand-extraction trick used throughout the crate's
    /// ancestor ETF library: a full-width integer is drawn from `rng` and
    /// scaled down to `[0, 1)` by dividing by `2^(SIGNIFICAND_BITS + 1)`,
    /// which never rounds up to exactly `1.0`.
    #[doc(hidden)]
    fn uniform01<R: RngCore + ?Sized>(rng: &mut R) -> Self;
}

impl Float for f32 {
    #[doc(hidden)]
    const SIGNIFICAND_BITS: u32 = 23;
    #[doc(hidden)]
    const ZERO: Self = 0f32;
    #[doc(hidden)]
    const ONE: Self = 1f32;
    #[doc(hidden)]
    const TWO: Self = 2f32;
    #[doc(hidden)]
    const INFINITY: Self = std::f32::INFINITY;
    #[doc(hidden)]
    const NEG_INFINITY: Self = std::f32::NEG_INFINITY;

    #[doc(hidden)]
    #[inline]
    fn min(self, other: Self) -> Self {
        self.min(other)
    }
    #[doc(hidden)]
    #[inline]
    fn max(self, other: Self) -> Self {
        self.max(other)
    }
    #[doc(hidden)]
    #[inline]
    fn abs(self) -> Self {
        self.abs()
    }
    #[doc(hidden)]
    #[inline]
    fn sqrt(self) -> Self {
        self.sqrt()
    }
    #[doc(hidden)]
    #[inline]
    fn ln(self) -> Self {
        self.ln()
    }
    #[doc(hidden)]
    #[inline]
    fn ln_1p(self) -> Self {
        self.ln_1p()
    }
    #[doc(hidden)]
    #[inline]
    fn exp(self) -> Self {
        self.exp()
    }
    #[doc(hidden)]
    #[inline]
    fn powf(self, exponent: Self) -> Self {
        self.powf(exponent)
    }
    #[doc(hidden)]
    #[inline]
    fn powi(self, exponent: i32) -> Self {
        self.powi(exponent)
    }
    #[doc(hidden)]
    #[inline]
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
    #[doc(hidden)]
    #[inline]
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }
    #[doc(hidden)]
    #[inline]
    fn uniform01<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        const SCALE: f32 = 1.0 / (1u64 << (f32::SIGNIFICAND_BITS + 1)) as f32;
        let r = rng.next_u32() >> (32 - f32::SIGNIFICAND_BITS - 1);
        SCALE * r as f32
    }
}

impl Float for f64 {
    #[doc(hidden)]
    const SIGNIFICAND_BITS: u32 = 52;
    #[doc(hidden)]
    const ZERO: Self = 0f64;
    #[doc(hidden)]
    const ONE: Self = 1f64;
    #[doc(hidden)]
    const TWO: Self = 2f64;
    #[doc(hidden)]
    const INFINITY: Self = std::f64::INFINITY;
    #[doc(hidden)]
    const NEG_INFINITY: Self = std::f64::NEG_INFINITY;

    #[doc(hidden)]
    #[inline]
    fn min(self, other: Self) -> Self {
        self.min(other)
    }
    #[doc(hidden)]
    #[inline]
    fn max(self, other: Self) -> Self {
        self.max(other)
    }
    #[doc(hidden)]
    #[inline]
    fn abs(self) -> Self {
        self.abs()
    }
    #[doc(hidden)]
    #[inline]
    fn sqrt(self) -> Self {
        self.sqrt()
    }
    #[doc(hidden)]
    #[inline]
    fn ln(self) -> Self {
        self.ln()
    }
    #[doc(hidden)]
    #[inline]
    fn ln_1p(self) -> Self {
        self.ln_1p()
    }
    #[doc(hidden)]
    #[inline]
    fn exp(self) -> Self {
        self.exp()
    }
    #[doc(hidden)]
    #[inline]
    fn powf(self, exponent: Self) -> Self {
        self.powf(exponent)
    }
    #[doc(hidden)]
    #[inline]
    fn powi(self, exponent: i32) -> Self {
        self.powi(exponent)
    }
    #[doc(hidden)]
    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
    #[doc(hidden)]
    #[inline]
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }
    #[doc(hidden)]
    #[inline]
    fn uniform01<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        const SCALE: f64 = 1.0 / (1u64 << (f64::SIGNIFICAND_BITS + 1)) as f64;
        let r = rng.next_u64() >> (64 - f64::SIGNIFICAND_BITS - 1);
        SCALE * r as f64
    }
}

/// Prevent implementation of public traits to leave open the possibility to
/// extend these traits in the future.
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
