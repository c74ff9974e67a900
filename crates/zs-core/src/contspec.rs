// ─────────────────────────────────────────────────────────────────────
// ZS-Spectra — Continuous Spectrum
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Continuous-spectrum evaluation on a uniform real grid.
//!
//! Consumes the same assembled polynomial as the discrete-spectrum
//! path: a(xi) = 2^W P11(z(xi)) and b(xi) = 2^W P21(z(xi))
//! exp(-i xi (eps D + t0 + t1)), z(xi) = exp(2 i xi eps / m). Output
//! layout follows the configured spectrum type: the reflection
//! coefficient b/a, the pair (a, b) in two consecutive blocks, or all
//! three blocks (rho, a, b).

use num_complex::Complex64;
use zs_math::poly::polyval;
use zs_types::config::{ContinuousSpectrumType, SpectrumConfig};
use zs_types::error::{SpectrumError, SpectrumResult};
use zs_types::signal::Signal;

use crate::scatter::fast_scatter;

/// Evaluates the continuous spectrum on `n` points spanning
/// [xi0, xi1].
///
/// kappa must be +1 (focusing) or -1 (defocusing). For n = 1 only xi0
/// is evaluated. Block layout per the configured type; each block has
/// `n` entries.
pub fn continuous_spectrum(
    signal: &Signal,
    kappa: f64,
    config: &SpectrumConfig,
    xi0: f64,
    xi1: f64,
    n: usize,
) -> SpectrumResult<Vec<Complex64>> {
    if kappa != 1.0 && kappa != -1.0 {
        return Err(SpectrumError::InvalidInput(format!(
            "kappa must be +1 or -1, got {kappa}"
        )));
    }
    config.validate()?;
    if n == 0 {
        return Err(SpectrumError::InvalidInput(
            "continuous-spectrum grid needs at least one point".to_string(),
        ));
    }
    if !xi0.is_finite() || !xi1.is_finite() || (n > 1 && xi1 <= xi0) {
        return Err(SpectrumError::InvalidInput(format!(
            "continuous-spectrum grid must be finite with xi1 > xi0, got [{xi0}, {xi1}]"
        )));
    }

    let poly = fast_scatter(signal, kappa, config.discretization, config.normalization);
    let scale = poly.scale();
    let eps = signal.step();
    let m = config.discretization.degree() as f64;
    let (t0, t1) = signal.t_span();
    let phase_rate = eps * signal.len() as f64 + t0 + t1;
    let dxi = if n > 1 { (xi1 - xi0) / (n - 1) as f64 } else { 0.0 };
    let i = Complex64::i();

    let mut a_vals = Vec::with_capacity(n);
    let mut b_vals = Vec::with_capacity(n);
    for k in 0..n {
        let xi = xi0 + k as f64 * dxi;
        let z = (i * (2.0 * xi * eps / m)).exp();
        let a = polyval(&poly.m11, z) * scale;
        let b = polyval(&poly.m21, z) * scale * (-i * xi * phase_rate).exp();
        a_vals.push(a);
        b_vals.push(b);
    }

    let mut out = Vec::new();
    match config.contspec_type {
        ContinuousSpectrumType::ReflectionCoefficient => {
            out.extend(a_vals.iter().zip(b_vals.iter()).map(|(a, b)| b / a));
        }
        ContinuousSpectrumType::Ab => {
            out.extend_from_slice(&a_vals);
            out.extend_from_slice(&b_vals);
        }
        ContinuousSpectrumType::Both => {
            out.extend(a_vals.iter().zip(b_vals.iter()).map(|(a, b)| b / a));
            out.extend_from_slice(&a_vals);
            out.extend_from_slice(&b_vals);
        }
    }
    Ok(out)
}
