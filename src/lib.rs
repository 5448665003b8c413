//! Adaptive rejection sampling for univariate log-concave distributions.
//!
//! The core type is [`Hull`]: a piecewise-exponential envelope over a
//! log-concave density, built from a [`LogDensity`] and refined on every
//! rejected proposal. [`distributions::Gamma`] and [`distributions::Weibull`]
//! each wrap a `Hull` for the two reference distributions this crate ships;
//! [`batch`] exposes thin `Vec`-returning entrypoints over those for callers
//! that just want `n` variates and don't want to hold on to the envelope
//! themselves.

mod density;
mod error;
mod hull;
mod num;

pub mod batch;
pub mod distributions;

pub use density::LogDensity;
pub use error::HullError;
pub use hull::{Hull, HullSegment, HULL_CAPACITY, MAX_TRIALS};
pub use num::Float;

pub use batch::{get_gamma, get_uniform, get_weibull};
pub use distributions::{Gamma, GammaError, Weibull, WeibullError};
