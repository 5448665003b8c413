//! The Weibull distribution, `Weibull(scale, shape)` with density
//! proportional to `x^(shape - 1) * exp(-(x / scale)^shape)` on
//! `(0, infinity)`.

use std::cell::RefCell;

use rand::distributions::Distribution;
use rand::Rng;
use thiserror::Error;

use crate::density::LogDensity;
use crate::error::HullError;
use crate::hull::Hull;
use crate::num::Float;

/// Errors returned when constructing a [`Weibull`] distribution.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum WeibullError {
    /// The shape parameter was not strictly greater than one.
    #[error("weibull shape parameter must be greater than 1, got {0}")]
    BadShape(f64),
    /// The scale parameter was not strictly positive.
    #[error("weibull scale parameter must be positive, got {0}")]
    BadScale(f64),
    /// The envelope could not be initialized for this parameterization.
    #[error(transparent)]
    Envelope(#[from] HullError),
}

#[derive(Clone, Copy)]
struct WeibullLogDensity<T> {
    scale: T,
    shape: T,
}

impl<T: Float> LogDensity<T> for WeibullLogDensity<T> {
    fn log_pdf(&self, x: T) -> T {
        (self.shape - T::ONE) * x.ln() - (x / self.scale).powf(self.shape)
    }

    fn log_pdf_deriv(&self, x: T) -> T {
        (self.shape - T::ONE) / x
            - (self.shape / self.scale) * (x / self.scale).powf(self.shape - T::ONE)
    }

    fn init_points(&self) -> (T, T) {
        let mode = self.scale * ((self.shape - T::ONE) / self.shape).powf(T::ONE / self.shape);
        (mode / T::TWO, mode + self.scale)
    }
}

/// A Weibull distribution sampled by adaptive rejection sampling.
///
/// Shares a single [`Hull`] across calls via interior mutability, the same
/// way [`Gamma`](crate::distributions::Gamma) does. Not `Sync`.
pub struct Weibull<T: Float> {
    hull: RefCell<Hull<T, WeibullLogDensity<T>>>,
}

impl<T: Float> Weibull<T> {
    /// Builds a Weibull distribution with the given scale and shape.
    ///
    /// Requires `shape > 1` and `scale > 0`.
    pub fn new(scale: T, shape: T) -> Result<Self, WeibullError> {
        if !(shape > T::ONE) {
            return Err(WeibullError::BadShape(shape.into()));
        }
        if !(scale > T::ZERO) {
            return Err(WeibullError::BadScale(scale.into()));
        }
        let dist = WeibullLogDensity { scale, shape };
        let hull = Hull::new(dist)?;
        Ok(Self {
            hull: RefCell::new(hull),
        })
    }
}

impl<T: Float> Distribution<T> for Weibull<T> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.hull
            .borrow_mut()
            .draw_sample(rng)
            .expect("weibull sampler exhausted its trial budget")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_shape() {
        assert!(matches!(
            Weibull::<f64>::new(1.0, 1.0),
            Err(WeibullError::BadShape(_))
        ));
    }

    #[test]
    fn rejects_non_positive_scale() {
        assert!(matches!(
            Weibull::<f64>::new(0.0, 2.0),
            Err(WeibullError::BadScale(_))
        ));
    }

    #[test]
    fn builds_for_typical_parameters() {
        assert!(Weibull::<f64>::new(1.0, 2.0).is_ok());
        assert!(Weibull::<f64>::new(3.5, 1.2).is_ok());
    }
}
