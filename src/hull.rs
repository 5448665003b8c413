//! The piecewise-exponential upper envelope (the "hull") and the
//! rejection/squeeze sampling loop built on top of it.

use crate::density::LogDensity;
use crate::error::HullError;
use crate::num::Float;

use rand_core::RngCore;

/// Maximum number of support points a [`Hull`] can hold.
///
/// This is a hard, compile-time ceiling, not a growable bound: segments are
/// stored inline rather than in a `Vec`, so no allocation occurs on the
/// sampling path after construction. Once reached, further insertions are a
/// silent no-op (see [`Hull::insert_segment`]) — the envelope is already
/// tight enough that the sampler keeps making progress.
pub const HULL_CAPACITY: usize = 500;

/// Maximum number of proposal/squeeze-test trials a single
/// [`Hull::draw_sample`] call will attempt before giving up.
pub const MAX_TRIALS: u32 = 1000;

/// One piece of the piecewise envelope: a tangent line to the log-density
/// and the interval of abscissae over which it is the active upper bound.
#[derive(Copy, Clone, Debug)]
pub struct HullSegment<T> {
    /// The support abscissa `x_j` at which the tangent is taken.
    pub left_x: T,
    /// `h(x_j)`, unshifted.
    pub h_x: T,
    /// `h'(x_j)`.
    pub hprime_x: T,
    /// The right-hand intersection abscissa with the next segment's
    /// tangent. `+infinity` for the last segment.
    pub z: T,
    /// Log of the integral of `exp(h_upper(x) - M)` over this segment's
    /// interval, where `M` is [`Hull::upper_hull_max`].
    pub raw_integral: T,
    /// Log of the cumulative integral up to and including this segment.
    pub raw_cumulative_integral: T,
    /// Log of this segment's normalized probability.
    pub prob: T,
    /// Log of the cumulative normalized probability up to and including
    /// this segment.
    pub cum_prob: T,
}

impl<T: Float> Default for HullSegment<T> {
    fn default() -> Self {
        Self {
            left_x: T::ZERO,
            h_x: T::ZERO,
            hprime_x: T::ZERO,
            z: T::ZERO,
            raw_integral: T::NEG_INFINITY,
            raw_cumulative_integral: T::NEG_INFINITY,
            prob: T::NEG_INFINITY,
            cum_prob: T::NEG_INFINITY,
        }
    }
}

/// The outcome of a squeeze/full acceptance test (§4.7).
enum Squeeze<T> {
    Accept,
    Reject(T),
}

/// Adaptive rejection sampling envelope over a log-concave density.
///
/// Owns the [`LogDensity`] it was built from by value (see the design
/// discussion in `SPEC_FULL.md` §4.8) and a fixed-capacity inline array of
/// up to [`HULL_CAPACITY`] segments. A `Hull` is not safe to share across
/// threads: each thread sampling from a distribution should own its own
/// `Hull` and its own RNG.
#[derive(Clone)]
pub struct Hull<T: Float, D> {
    dist: D,
    segments: [HullSegment<T>; HULL_CAPACITY],
    num_segments: usize,
    /// The numerical shift `M`: the maximum value of the upper envelope
    /// over its support, fixed at initialization and never refreshed.
    /// Insertions can only lower the upper envelope pointwise (by
    /// log-concavity), so `M` remains a valid bound for the life of the
    /// hull even though it may no longer be the tightest one.
    upper_hull_max: T,
}

impl<T: Float, D: LogDensity<T>> Hull<T, D> {
    /// Builds and initializes a hull over `dist`.
    pub fn new(dist: D) -> Result<Self, HullError> {
        let mut hull = Self {
            dist,
            segments: [HullSegment::default(); HULL_CAPACITY],
            num_segments: 2,
            upper_hull_max: T::NEG_INFINITY,
        };
        hull.initialize()?;
        hull.debug_check_invariants();
        Ok(hull)
    }

    /// Number of support points currently in the hull.
    pub fn num_segments(&self) -> usize {
        self.num_segments
    }

    /// The segments currently making up the envelope.
    pub fn segments(&self) -> &[HullSegment<T>] {
        &self.segments[..self.num_segments]
    }

    /// The fixed numerical shift `M` (§4.2).
    pub fn upper_hull_max(&self) -> T {
        self.upper_hull_max
    }

    /// Picks the initial two abscissae from the log-density, extends the
    /// right one to the right until its derivative is negative, and
    /// normalizes the resulting two-segment envelope.
    pub fn initialize(&mut self) -> Result<(), HullError> {
        let (x0, x1) = self.dist.init_points();

        self.segments[0].left_x = x0;
        self.segments[0].h_x = self.dist.log_pdf(x0);
        self.segments[0].hprime_x = self.dist.log_pdf_deriv(x0);

        let mut x1 = x1;
        let mut hp1 = self.dist.log_pdf_deriv(x1);
        while hp1 >= T::ZERO {
            x1 = x1 * T::TWO;
            if !x1.is_finite() {
                return Err(HullError::InitializationFailure);
            }
            hp1 = self.dist.log_pdf_deriv(x1);
        }
        self.segments[1].left_x = x1;
        self.segments[1].hprime_x = hp1;
        self.segments[1].h_x = self.dist.log_pdf(x1);

        self.num_segments = 2;
        let z0 = tangent_intersection(
            self.segments[0].left_x,
            self.segments[0].h_x,
            self.segments[0].hprime_x,
            self.segments[1].left_x,
            self.segments[1].h_x,
            self.segments[1].hprime_x,
        );
        self.segments[0].z = z0;
        self.segments[1].z = T::INFINITY;

        self.initialize_hull_max();
        self.normalize_hull();
        Ok(())
    }

    /// Drops the hull back to its freshly initialized two-segment state.
    pub fn reset(&mut self) -> Result<(), HullError> {
        self.num_segments = 2;
        self.upper_hull_max = T::NEG_INFINITY;
        self.initialize()
    }

    /// Sets [`Hull::upper_hull_max`] from segment 0 only (§4.2).
    fn initialize_hull_max(&mut self) {
        let x0 = self.segments[0].left_x;
        let h0 = self.segments[0].h_x;
        let hp0 = self.segments[0].hprime_x;
        let z0 = self.segments[0].z;

        self.upper_hull_max = if hp0 > T::ZERO {
            h0 + (z0 - x0) * hp0
        } else {
            h0 - x0 * hp0
        };
    }

    /// Log of `integral_{z_prev}^{seg.z} exp(h_upper(x) - M) dx` (§4.2).
    fn integrate_segment(&self, seg: &HullSegment<T>, z_prev: T) -> T {
        let xj = seg.left_x;
        let hxj = seg.h_x - self.upper_hull_max;
        let hpxj = seg.hprime_x;
        let zj = seg.z;

        if hpxj == T::ZERO {
            return (zj - z_prev).ln() + hxj;
        }

        if hpxj > T::ZERO {
            let pre_factor = hxj + (zj - xj) * hpxj - hpxj.ln();
            let int_factor = (-(hpxj * (z_prev - zj)).exp()).ln_1p();
            pre_factor + int_factor
        } else {
            let pre_factor = hxj + (z_prev - xj) * hpxj - hpxj.abs().ln();
            let int_factor = (-(hpxj * (zj - z_prev)).exp()).ln_1p();
            pre_factor + int_factor
        }
    }

    /// Full normalization pass (§4.3).
    fn normalize_hull(&mut self) {
        let mut cumulative = T::NEG_INFINITY;
        let mut z_prev = T::ZERO;
        for i in 0..self.num_segments {
            let segment_integral = self.integrate_segment(&self.segments[i], z_prev);
            cumulative = logspace_add(segment_integral, cumulative);
            self.segments[i].raw_integral = segment_integral;
            self.segments[i].raw_cumulative_integral = cumulative;
            z_prev = self.segments[i].z;
        }
        for i in 0..self.num_segments {
            self.segments[i].prob = self.segments[i].raw_integral - cumulative;
            self.segments[i].cum_prob = self.segments[i].raw_cumulative_integral - cumulative;
        }
    }

    /// Incremental normalization pass after an insertion at `insert_idx` (§4.3).
    fn renormalize_hull(&mut self, insert_idx: usize) {
        let idx_min = if insert_idx == 0 { 0 } else { insert_idx - 1 };
        let idx_max = if insert_idx < self.num_segments - 1 {
            insert_idx + 1
        } else {
            self.num_segments - 1
        };

        let mut cumulative = T::NEG_INFINITY;
        let mut z_prev = T::ZERO;
        if idx_min > 0 {
            z_prev = self.segments[idx_min - 1].z;
            cumulative = self.segments[idx_min - 1].raw_cumulative_integral;
        }

        for k in idx_min..self.num_segments {
            if k >= idx_min && k <= idx_max {
                let integral = self.integrate_segment(&self.segments[k], z_prev);
                self.segments[k].raw_integral = integral;
            }
            let segment_integral = self.segments[k].raw_integral;
            cumulative = logspace_add(segment_integral, cumulative);
            self.segments[k].raw_cumulative_integral = cumulative;
            z_prev = self.segments[k].z;
        }

        for k in 0..self.num_segments {
            self.segments[k].prob = self.segments[k].raw_integral - cumulative;
            self.segments[k].cum_prob = self.segments[k].raw_cumulative_integral - cumulative;
        }
    }

    /// Recomputes `z` for the segment(s) adjacent to an insertion at `idx` (§4.5).
    fn update_z(&mut self, idx: usize) {
        if idx == 0 {
            let z = self.tangent_z(0, 1);
            self.segments[0].z = z;
        } else if idx == self.num_segments - 1 {
            let z = self.tangent_z(idx - 1, idx);
            self.segments[idx - 1].z = z;
            self.segments[idx].z = T::INFINITY;
        } else {
            let z_left = self.tangent_z(idx - 1, idx);
            let z_right = self.tangent_z(idx, idx + 1);
            self.segments[idx - 1].z = z_left;
            self.segments[idx].z = z_right;
        }
    }

    fn tangent_z(&self, left: usize, right: usize) -> T {
        tangent_intersection(
            self.segments[left].left_x,
            self.segments[left].h_x,
            self.segments[left].hprime_x,
            self.segments[right].left_x,
            self.segments[right].h_x,
            self.segments[right].hprime_x,
        )
    }

    /// Inserts a new support point discovered at `x_new` (with log-density
    /// `h_xnew`, already evaluated by the caller) next to `origin_idx`. A
    /// no-op once [`HULL_CAPACITY`] is reached (§4.5).
    pub fn insert_segment(&mut self, x_new: T, h_xnew: T, origin_idx: usize) {
        if self.num_segments == HULL_CAPACITY {
            return;
        }
        let hp_xnew = self.dist.log_pdf_deriv(x_new);

        let old_num = self.num_segments;
        for k in (origin_idx + 1..=old_num).rev() {
            self.segments[k] = self.segments[k - 1];
        }
        self.num_segments = old_num + 1;

        let insert_idx = if x_new > self.segments[origin_idx].left_x {
            origin_idx + 1
        } else {
            origin_idx
        };
        self.segments[insert_idx].left_x = x_new;
        self.segments[insert_idx].h_x = h_xnew;
        self.segments[insert_idx].hprime_x = hp_xnew;

        self.update_z(insert_idx);
        self.renormalize_hull(insert_idx);
        self.debug_check_invariants();
    }

    /// The smallest index `j` such that `log_u < cum_prob[j]`, searched
    /// iteratively between `lower` and `upper` (§4.4).
    fn arg_binary_search(&self, log_u: T, lower: usize, upper: usize) -> usize {
        let mut lower = lower;
        let mut upper = upper;
        loop {
            let mid = (lower + upper) / 2;
            if mid == lower {
                return if log_u < self.segments[lower].cum_prob {
                    lower
                } else {
                    upper
                };
            }
            if log_u < self.segments[mid].cum_prob {
                upper = mid;
            } else {
                lower = mid;
            }
        }
    }

    /// The abscissa `x*` such that `P(X <= x*) = p` under the hull
    /// distribution, together with the segment index it falls in (§4.4).
    pub fn inverse_cdf(&self, p: T) -> (T, usize) {
        let seg_idx = self.arg_binary_search(p.ln(), 0, self.num_segments - 1);

        let x_seg = self.segments[seg_idx].left_x;
        let h_seg = self.segments[seg_idx].h_x;
        let hp_seg = self.segments[seg_idx].hprime_x;

        let (z_prev, cdf_prev) = if seg_idx == 0 {
            (T::ZERO, T::ZERO)
        } else {
            (
                self.segments[seg_idx - 1].z,
                self.segments[seg_idx - 1].cum_prob.exp(),
            )
        };
        let total = self.segments[self.num_segments - 1].raw_cumulative_integral;
        let p_rem = p - cdf_prev;

        let x_star = if hp_seg == T::ZERO {
            p_rem / (h_seg - self.upper_hull_max - total).exp() + z_prev
        } else {
            let inner = p_rem * total.exp() * hp_seg
                + ((z_prev - x_seg) * hp_seg + h_seg - self.upper_hull_max).exp();
            (inner.ln() + x_seg * hp_seg - h_seg + self.upper_hull_max) / hp_seg
        };

        (x_star, seg_idx)
    }

    /// Evaluates the hull's own CDF at `x` (diagnostic / testing entry
    /// point; not used on the sampling hot path).
    pub fn cdf(&self, x: T) -> T {
        let mut seg_idx = 0;
        while x > self.segments[seg_idx].z {
            seg_idx += 1;
        }

        let xj = self.segments[seg_idx].left_x;
        let hxj = self.segments[seg_idx].h_x - self.upper_hull_max;
        let hpxj = self.segments[seg_idx].hprime_x;

        let (mut integral_tot, z_lower) = if seg_idx > 0 {
            (
                self.segments[seg_idx - 1].raw_cumulative_integral,
                self.segments[seg_idx - 1].z,
            )
        } else {
            (T::NEG_INFINITY, T::ZERO)
        };

        let segment_integral = if hpxj == T::ZERO {
            hxj + (x - z_lower).ln()
        } else {
            hxj - xj * hpxj + (((hpxj * x).exp() - (hpxj * z_lower).exp()) / hpxj).ln()
        };

        integral_tot = logspace_add(integral_tot, segment_integral);
        (integral_tot - self.segments[self.num_segments - 1].raw_cumulative_integral).exp()
    }

    /// Squeeze test followed, if necessary, by a full acceptance test (§4.7).
    fn squeeze_test<R: RngCore + ?Sized>(&self, rng: &mut R, x_trial: T, seg_idx: usize) -> Squeeze<T> {
        let w = T::uniform01(rng).ln();

        let x = self.segments[seg_idx].left_x;
        let h_x = self.segments[seg_idx].h_x;
        let hp_x = self.segments[seg_idx].hprime_x;
        let upper_val = h_x + (x_trial - x) * hp_x;

        let lower_val = if x_trial <= x && seg_idx > 0 {
            let x_lo = self.segments[seg_idx - 1].left_x;
            let h_lo = self.segments[seg_idx - 1].h_x;
            ((x - x_trial) * h_lo + (x_trial - x_lo) * h_x) / (x - x_lo)
        } else if x_trial >= x && seg_idx < self.num_segments - 1 {
            let x_hi = self.segments[seg_idx + 1].left_x;
            let h_hi = self.segments[seg_idx + 1].h_x;
            ((x_hi - x_trial) * h_x + (x_trial - x) * h_hi) / (x_hi - x)
        } else {
            T::NEG_INFINITY
        };

        if w <= lower_val - upper_val {
            return Squeeze::Accept;
        }

        let h_trial = self.dist.log_pdf(x_trial);
        if w <= h_trial - upper_val {
            Squeeze::Accept
        } else {
            Squeeze::Reject(h_trial)
        }
    }

    /// Draws one exact sample from the target density, refining the
    /// envelope on every rejection (§4.6).
    pub fn draw_sample<R: RngCore + ?Sized>(&mut self, rng: &mut R) -> Result<T, HullError> {
        for _ in 0..MAX_TRIALS {
            let u = T::uniform01(rng);
            let (x_trial, seg_idx) = self.inverse_cdf(u);

            match self.squeeze_test(rng, x_trial, seg_idx) {
                Squeeze::Accept => return Ok(x_trial),
                Squeeze::Reject(h_trial) => {
                    self.insert_segment(x_trial, h_trial, seg_idx);
                }
            }
        }
        Err(HullError::SamplerExhausted(MAX_TRIALS))
    }

    #[cfg(debug_assertions)]
    fn debug_check_invariants(&self) {
        debug_assert!(self.num_segments >= 2 && self.num_segments <= HULL_CAPACITY);
        for i in 0..self.num_segments - 1 {
            debug_assert!(self.segments[i].left_x < self.segments[i + 1].left_x);
        }
        debug_assert!(self.segments[self.num_segments - 1].z == T::INFINITY);
        let tolerance: T = T::from(1.0e-4f32);
        let total = self.segments[self.num_segments - 1].cum_prob.exp();
        debug_assert!((total - T::ONE).abs() < tolerance);
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn debug_check_invariants(&self) {}
}

/// Tangent-intersection rule `set_z(left, right)` (§4.1).
fn tangent_intersection<T: Float>(
    x_l: T,
    h_l: T,
    hp_l: T,
    x_r: T,
    h_r: T,
    hp_r: T,
) -> T {
    let s = hp_l - hp_r;
    if s > T::ZERO {
        (h_r - h_l - x_r * hp_r + x_l * hp_l) / s
    } else {
        (h_l + h_r) / T::TWO
    }
}

/// Numerically stable `log(exp(a) + exp(b))`, with `-infinity` absorbing.
pub(crate) fn logspace_add<T: Float>(a: T, b: T) -> T {
    if a == T::NEG_INFINITY {
        return b;
    }
    if b == T::NEG_INFINITY {
        return a;
    }
    let m = a.max(b);
    let diff = (a - b).abs();
    m + (-diff).exp().ln_1p()
}
