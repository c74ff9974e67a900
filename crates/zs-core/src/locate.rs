// ─────────────────────────────────────────────────────────────────────
// ZS-Spectra — Root Localizer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Candidate bound-state localization under three strategies.
//!
//! FAST_EIGENVALUE roots the assembled a-polynomial globally through the
//! companion matrix. NEWTON refines caller-supplied guesses against the
//! exact O(D) propagation. SUBSAMPLE_AND_REFINE roots a subsampled
//! assembly, filters the cheap candidates, then Newton-refines them at
//! full resolution; it amortizes the global search and is the default.

use num_complex::Complex64;
use zs_math::eig::polynomial_roots;
use zs_types::config::{BoundStateLocalization, SpectrumConfig};
use zs_types::error::{SpectrumError, SpectrumResult};
use zs_types::signal::Signal;
use zs_types::spectrum::ScatterPoly;

use crate::discretization::propagate_with_derivative;
use crate::filter::apply_level;
use crate::scatter::fast_scatter;

/// Relative Newton-step size below which iteration stops early.
const NEWTON_STEP_TOL: f64 = 100.0 * f64::EPSILON;

/// Maps a root of the z-polynomial to the spectral plane,
/// lambda = m/(2 eps) (arg z - i ln |z|). Roots inside the unit circle
/// land in the upper half-plane.
pub fn z_to_lambda(z: Complex64, eps: f64, degree: usize) -> Complex64 {
    let factor = degree as f64 / (2.0 * eps);
    factor * Complex64::new(z.arg(), -z.norm().ln())
}

/// Global rooting of the assembled P11 entry.
///
/// Trailing-zero coefficients (roots at z = 0, i.e. lambda at infinity)
/// are deflated away inside the rootfinder and never reported. An empty
/// or constant polynomial yields an empty candidate set.
pub fn fast_eigenvalue(
    poly: &ScatterPoly,
    eps: f64,
    degree: usize,
) -> SpectrumResult<Vec<Complex64>> {
    let roots = polynomial_roots(&poly.m11)?;
    Ok(roots
        .into_iter()
        .map(|z| z_to_lambda(z, eps, degree))
        .collect())
}

/// Newton refinement of each guess independently.
///
/// Iterates lambda <- lambda - a/a' with a evaluated by exact per-sample
/// propagation. A guess whose next iterate is non-finite stops at its
/// last finite iterate; implausible survivors are left for the filter.
pub fn newton_refine(
    signal: &Signal,
    kappa: f64,
    guesses: &[Complex64],
    niter: usize,
) -> Vec<Complex64> {
    let eps = signal.step();
    let t_total = signal.len() as f64 * eps;
    let i = Complex64::i();

    guesses
        .iter()
        .map(|&guess| {
            let mut lam = guess;
            for _ in 0..niter {
                let st = propagate_with_derivative(signal.samples(), eps, kappa, lam);
                let a = st.m[0];
                let da = st.dm[0] + i * t_total * st.m[0];
                let step = a / da;
                let next = lam - step;
                if !next.re.is_finite() || !next.im.is_finite() {
                    break;
                }
                lam = next;
                if step.norm() < NEWTON_STEP_TOL * (1.0 + lam.norm()) {
                    break;
                }
            }
            lam
        })
        .collect()
}

/// Dispatches the configured localization strategy.
///
/// `guesses` is required by NEWTON and ignored by the other strategies.
pub fn locate_bound_states(
    signal: &Signal,
    kappa: f64,
    config: &SpectrumConfig,
    guesses: Option<&[Complex64]>,
) -> SpectrumResult<Vec<Complex64>> {
    let degree = config.discretization.degree();
    match config.bound_state_localization {
        BoundStateLocalization::FastEigenvalue => {
            let poly = fast_scatter(signal, kappa, config.discretization, config.normalization);
            fast_eigenvalue(&poly, signal.step(), degree)
        }
        BoundStateLocalization::Newton => {
            let guesses = guesses.ok_or_else(|| {
                SpectrumError::ConfigError(
                    "newton localization requires initial guesses".to_string(),
                )
            })?;
            Ok(newton_refine(signal, kappa, guesses, config.niter))
        }
        BoundStateLocalization::SubsampleAndRefine => {
            let (sub, _factor) = signal.subsample();
            let poly = fast_scatter(&sub, kappa, config.discretization, config.normalization);
            let mut coarse = fast_eigenvalue(&poly, sub.step(), degree)?;
            apply_level(&mut coarse, None, config, sub.step());
            Ok(newton_refine(signal, kappa, &coarse, config.niter))
        }
    }
}
