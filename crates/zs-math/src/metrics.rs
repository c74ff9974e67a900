// ─────────────────────────────────────────────────────────────────────
// ZS-Spectra — Vector Metrics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Accuracy metrics used by validation tests and diagnostics.

use num_complex::Complex64;

/// Relative l1 error of `approx` against `exact`.
///
/// Returns the absolute l1 error when `exact` is identically zero.
pub fn rel_err_l1(exact: &[Complex64], approx: &[Complex64]) -> f64 {
    debug_assert_eq!(exact.len(), approx.len());
    let mut num = 0.0;
    let mut den = 0.0;
    for (e, a) in exact.iter().zip(approx.iter()) {
        num += (e - a).norm();
        den += e.norm();
    }
    if den == 0.0 {
        num
    } else {
        num / den
    }
}

/// Symmetric Hausdorff distance between two finite point sets.
///
/// Infinite when exactly one of the sets is empty, zero when both are.
pub fn hausdorff_distance(a: &[Complex64], b: &[Complex64]) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 0.0,
        (true, false) | (false, true) => return f64::INFINITY,
        _ => {}
    }
    directed_hausdorff(a, b).max(directed_hausdorff(b, a))
}

fn directed_hausdorff(from: &[Complex64], to: &[Complex64]) -> f64 {
    from.iter()
        .map(|p| {
            to.iter()
                .map(|q| (p - q).norm())
                .fold(f64::INFINITY, f64::min)
        })
        .fold(0.0, f64::max)
}

/// Hyperbolic secant, computed through cosh.
pub fn sech(x: f64) -> f64 {
    1.0 / x.cosh()
}

/// Squared l2 norm of a uniformly sampled signal via the trapezoid rule.
pub fn l2norm2(samples: &[Complex64], step: f64) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let mut acc = 0.5 * (samples[0].norm_sqr() + samples[samples.len() - 1].norm_sqr());
    for s in &samples[1..samples.len() - 1] {
        acc += s.norm_sqr();
    }
    acc * step
}
