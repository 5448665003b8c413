//! Error types for hull construction and sampling.

use thiserror::Error;

/// Error type for hull construction and sampling failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HullError {
    /// Doubling the right initial abscissa produced a non-finite value
    /// before the log-density derivative turned negative.
    #[error("right initial point became non-finite while searching for a negative slope")]
    InitializationFailure,
    /// `MAX_TRIALS` proposals were rejected in a single `draw_sample` call.
    ///
    /// Because every rejection tightens the envelope, this can only happen if
    /// the log-density (or its derivative) returned a non-finite value, or if
    /// the target is not actually log-concave.
    #[error("sampler exhausted {0} trials without an accepted draw")]
    SamplerExhausted(u32),
}
