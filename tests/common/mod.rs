//! Shared test support: a fixed-seed RNG and reference CDFs for the
//! distributional tests.

/// A small, fast, deterministic RNG for tests that need reproducible
/// sequences rather than cryptographic strength.
pub fn test_rng(seed: u64) -> rand_xoshiro::Xoshiro256PlusPlus {
    use rand::SeedableRng;
    rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(seed)
}

/// An alternate deterministic RNG, used by a handful of tests to confirm
/// the sampler is generic over any `RngCore` and not accidentally tied to
/// `Xoshiro256PlusPlus`'s bit patterns.
pub fn test_rng_pcg() -> rand_pcg::Lcg128Xsl64 {
    rand_pcg::Lcg128Xsl64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96)
}

/// Regularized lower incomplete gamma function `P(a, x)`, used to compute
/// the gamma distribution's CDF for the Kolmogorov-Smirnov tests. Uses the
/// series expansion for `x < a + 1` and the continued-fraction expansion
/// for the complement otherwise (Numerical Recipes §6.2).
pub fn regularized_lower_incomplete_gamma(a: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x < a + 1.0 {
        gamma_series(a, x)
    } else {
        1.0 - gamma_continued_fraction(a, x)
    }
}

fn ln_gamma(x: f64) -> f64 {
    // Lanczos approximation, g = 7, n = 9.
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_93,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_13,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];
    const G: f64 = 7.0;

    if x < 0.5 {
        return (std::f64::consts::PI / (std::f64::consts::PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }
    let x = x - 1.0;
    let mut acc = COEFFS[0];
    for (i, c) in COEFFS.iter().enumerate().skip(1) {
        acc += c / (x + i as f64);
    }
    let t = x + G + 0.5;
    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + acc.ln()
}

fn gamma_series(a: f64, x: f64) -> f64 {
    let mut sum = 1.0 / a;
    let mut term = sum;
    let mut n = a;
    for _ in 0..500 {
        n += 1.0;
        term *= x / n;
        sum += term;
        if term.abs() < sum.abs() * 1e-15 {
            break;
        }
    }
    (sum * (-x + a * x.ln() - ln_gamma(a)).exp()).max(0.0)
}

fn gamma_continued_fraction(a: f64, x: f64) -> f64 {
    const TINY: f64 = 1e-300;
    let mut b = x + 1.0 - a;
    let mut c = 1.0 / TINY;
    let mut d = 1.0 / b;
    let mut h = d;
    for i in 1..500 {
        let an = -(i as f64) * (i as f64 - a);
        b += 2.0;
        d = an * d + b;
        if d.abs() < TINY {
            d = TINY;
        }
        c = b + an / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;
        if (delta - 1.0).abs() < 1e-15 {
            break;
        }
    }
    (-x + a * x.ln() - ln_gamma(a)).exp() * h
}

/// Gamma CDF `P(X <= x)` for `X ~ Gamma(shape, rate)`.
pub fn gamma_cdf(x: f64, shape: f64, rate: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    regularized_lower_incomplete_gamma(shape, rate * x)
}

/// Weibull CDF `P(X <= x)` for `X ~ Weibull(scale, shape)`.
pub fn weibull_cdf(x: f64, scale: f64, shape: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    1.0 - (-(x / scale).powf(shape)).exp()
}

/// One-sample Kolmogorov-Smirnov statistic `D_n = sup_x |F_n(x) - F(x)|`
/// against a reference CDF.
pub fn ks_statistic(samples: &[f64], cdf: impl Fn(f64) -> f64) -> f64 {
    let n = samples.len();
    let mut sorted: Vec<f64> = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let mut d_max = 0.0f64;
    for (i, &x) in sorted.iter().enumerate() {
        let f = cdf(x);
        let f_upper = (i as f64 + 1.0) / n as f64;
        let f_lower = i as f64 / n as f64;
        d_max = d_max.max((f_upper - f).abs()).max((f - f_lower).abs());
    }
    d_max
}

/// Critical value for the KS test at the given significance level,
/// asymptotic approximation `c(alpha) / sqrt(n)`.
pub fn ks_critical_value(alpha: f64, n: usize) -> f64 {
    let c_alpha = (-0.5 * (alpha / 2.0).ln()).sqrt();
    c_alpha / (n as f64).sqrt()
}
