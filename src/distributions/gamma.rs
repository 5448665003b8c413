//! The gamma distribution, `Gamma(shape, rate)` with density proportional
//! to `x^(shape - 1) * exp(-rate * x)` on `(0, infinity)`.

use std::cell::RefCell;

use rand::distributions::Distribution;
use rand::Rng;
use thiserror::Error;

use crate::density::LogDensity;
use crate::error::HullError;
use crate::hull::Hull;
use crate::num::Float;

/// Errors returned when constructing a [`Gamma`] distribution.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GammaError {
    /// The shape parameter was not strictly greater than one.
    ///
    /// The hull's initialization walk relies on `h'(x) -> +infinity` as
    /// `x -> 0` and a single interior mode; shapes `<= 1` make `h` either
    /// monotone decreasing or singular at the origin, which this crate does
    /// not attempt to support.
    #[error("gamma shape parameter must be greater than 1, got {0}")]
    BadShape(f64),
    /// The rate parameter was not strictly positive.
    #[error("gamma rate parameter must be positive, got {0}")]
    BadRate(f64),
    /// The envelope could not be initialized for this parameterization.
    #[error(transparent)]
    Envelope(#[from] HullError),
}

#[derive(Clone, Copy)]
struct GammaLogDensity<T> {
    shape: T,
    rate: T,
}

impl<T: Float> LogDensity<T> for GammaLogDensity<T> {
    fn log_pdf(&self, x: T) -> T {
        (self.shape - T::ONE) * x.ln() - self.rate * x
    }

    fn log_pdf_deriv(&self, x: T) -> T {
        (self.shape - T::ONE) / x - self.rate
    }

    fn init_points(&self) -> (T, T) {
        let mode = (self.shape - T::ONE) / self.rate;
        let scale = self.shape.sqrt() / self.rate;
        // Wilson-Hilferty-style switch: for small shapes the mode sits
        // close to the origin and `mode - scale` can go non-positive.
        if self.shape <= T::from(5.83f32) {
            (mode / T::TWO, mode + scale)
        } else {
            (mode - scale, mode + scale)
        }
    }
}

/// A gamma distribution sampled by adaptive rejection sampling.
///
/// Shares a single [`Hull`] across calls via interior mutability: every
/// call to [`Distribution::sample`] borrows it mutably for the duration of
/// one draw, refining the envelope in place. Not `Sync`; give each thread
/// its own `Gamma`.
pub struct Gamma<T: Float> {
    hull: RefCell<Hull<T, GammaLogDensity<T>>>,
}

impl<T: Float> Gamma<T> {
    /// Builds a gamma distribution with the given shape and rate.
    ///
    /// Requires `shape > 1` and `rate > 0`.
    pub fn new(shape: T, rate: T) -> Result<Self, GammaError> {
        if !(shape > T::ONE) {
            return Err(GammaError::BadShape(shape.into()));
        }
        if !(rate > T::ZERO) {
            return Err(GammaError::BadRate(rate.into()));
        }
        let dist = GammaLogDensity { shape, rate };
        let hull = Hull::new(dist)?;
        Ok(Self {
            hull: RefCell::new(hull),
        })
    }
}

impl<T: Float> Distribution<T> for Gamma<T> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.hull
            .borrow_mut()
            .draw_sample(rng)
            .expect("gamma sampler exhausted its trial budget")
    }
}
