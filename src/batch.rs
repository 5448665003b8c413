//! Thin host-facing batch entrypoints.
//!
//! These are the functions a call-in layer (FFI, a Python/R binding, a CLI)
//! would reach for: build one distribution, draw `n` variates from it with
//! a thread-local RNG, return them as a `Vec`. The adaptive envelope is
//! amortized across the whole batch, so later draws tend to be cheaper than
//! earlier ones.

use rand::distributions::Distribution;

use crate::distributions::{Gamma, GammaError, Weibull, WeibullError};
use crate::num::Float;

/// Draws `n` variates uniform on `[0, 1)`.
pub fn get_uniform<T: Float>(n: usize) -> Vec<T> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| T::uniform01(&mut rng)).collect()
}

/// Draws `n` variates from `Gamma(shape, rate)`.
pub fn get_gamma<T: Float>(shape: T, rate: T, n: usize) -> Result<Vec<T>, GammaError> {
    let dist = Gamma::new(shape, rate)?;
    let mut rng = rand::thread_rng();
    Ok((0..n).map(|_| dist.sample(&mut rng)).collect())
}

/// Draws `n` variates from `Weibull(scale, shape)`.
pub fn get_weibull<T: Float>(scale: T, shape: T, n: usize) -> Result<Vec<T>, WeibullError> {
    let dist = Weibull::new(scale, shape)?;
    let mut rng = rand::thread_rng();
    Ok((0..n).map(|_| dist.sample(&mut rng)).collect())
}
