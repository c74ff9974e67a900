// ─────────────────────────────────────────────────────────────────────
// ZS-Spectra — Discretization
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-sample transfer matrices of the Zakharov-Shabat system.
//!
//! Two views of the same medium, both treating sample n as the midpoint
//! value of a cell of width eps:
//!
//! - Elementary polynomial matrices in z = exp(2 i lambda eps / m) for
//!   the fast scattering assembler, where m is the per-sample degree of
//!   the chosen exponential splitting. With this convention the scalar
//!   prefactor exp(-i lambda eps) per cell cancels against the Jost
//!   normalization and a(lambda) = 2^W P11(z) exactly.
//! - Exact closed-form propagation of the transfer matrix together with
//!   its lambda-derivative, used by Newton refinement and the amplitude
//!   evaluator. O(D) per spectral point.
//!
//! Throughout, r = -kappa conj(q) with kappa = +1 focusing, -1
//! defocusing.

use num_complex::Complex64;
use zs_types::config::Discretization;
use zs_types::spectrum::ScatterPoly;

/// Relative size of eps^2 k^2 below which the sinh(eps k)/k series is
/// used instead of the closed form.
const SERIES_THRESHOLD: f64 = 1e-4;

/// Running transfer matrix and its lambda-derivative.
///
/// True values equal the stored entries times 2^scale_exp; the same
/// exponent applies to `m` and `dm`, so derivative ratios are exact.
/// Layout: [m11, m12, m21, m22].
#[derive(Debug, Clone, PartialEq)]
pub struct TransferState {
    pub m: [Complex64; 4],
    pub dm: [Complex64; 4],
    pub scale_exp: i32,
}

fn mat_mul(a: &[Complex64; 4], b: &[Complex64; 4]) -> [Complex64; 4] {
    [
        a[0] * b[0] + a[1] * b[2],
        a[0] * b[1] + a[1] * b[3],
        a[2] * b[0] + a[3] * b[2],
        a[2] * b[1] + a[3] * b[3],
    ]
}

fn mat_add(a: &[Complex64; 4], b: &[Complex64; 4]) -> [Complex64; 4] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3]]
}

/// cosh(eps k) and sinh(eps k)/k for k^2 = ksq, with the small-k series
/// kicking in when eps^2 ksq is tiny.
fn cosh_sinc(ksq: Complex64, eps: f64) -> (Complex64, Complex64) {
    let x = eps * eps * ksq;
    if x.norm() < SERIES_THRESHOLD {
        let one = Complex64::new(1.0, 0.0);
        let ch = one + x * (0.5 + x * (1.0 / 24.0));
        let s = eps * (one + x * (1.0 / 6.0 + x * (1.0 / 120.0)));
        (ch, s)
    } else {
        let k = ksq.sqrt();
        let ek = eps * k;
        (ek.cosh(), ek.sinh() / k)
    }
}

/// Elementary polynomial transfer matrices for every sample.
///
/// Entries are ascending coefficients in z, padded to degree
/// `scheme.degree()`:
/// - Split2A (Lie, m = 1):    [[ch, q s], [r s z, ch z]]
/// - Split2B (Strang, m = 2): [[ch, q s z], [r s z, ch z^2]]
pub fn elementary_matrices(
    samples: &[Complex64],
    eps: f64,
    kappa: f64,
    scheme: Discretization,
) -> Vec<ScatterPoly> {
    let zero = Complex64::new(0.0, 0.0);
    samples
        .iter()
        .map(|&q| {
            let r = -kappa * q.conj();
            let (ch, s) = cosh_sinc(q * r, eps);
            match scheme {
                Discretization::Split2A => ScatterPoly {
                    deg: 1,
                    m11: vec![ch, zero],
                    m12: vec![q * s, zero],
                    m21: vec![zero, r * s],
                    m22: vec![zero, ch],
                    scale_exp: 0,
                },
                Discretization::Split2B => ScatterPoly {
                    deg: 2,
                    m11: vec![ch, zero, zero],
                    m12: vec![zero, q * s, zero],
                    m21: vec![zero, r * s, zero],
                    m22: vec![zero, zero, ch],
                    scale_exp: 0,
                },
            }
        })
        .collect()
}

/// Exact transfer-matrix propagation at a single spectral point.
///
/// Per cell T = cosh(k eps) I + sinh(k eps)/k [[-i lambda, q], [r,
/// i lambda]], k = sqrt(q r - lambda^2), propagated left-to-right
/// together with dT/dlambda via the product rule. The running product is
/// rescaled by powers of two; the exponent is returned in the state.
pub fn propagate_with_derivative(
    samples: &[Complex64],
    eps: f64,
    kappa: f64,
    lambda: Complex64,
) -> TransferState {
    let i = Complex64::i();
    let zero = Complex64::new(0.0, 0.0);
    let one = Complex64::new(1.0, 0.0);
    let mut m = [one, zero, zero, one];
    let mut dm = [zero; 4];
    let mut scale_exp = 0i32;

    for &q in samples {
        let r = -kappa * q.conj();
        let ksq = q * r - lambda * lambda;
        let (ch, s) = cosh_sinc(ksq, eps);
        let dch = -lambda * eps * s;
        let x = eps * eps * ksq;
        let ds = if x.norm() < SERIES_THRESHOLD {
            -lambda * eps.powi(3) * (1.0 / 3.0 + x * (1.0 / 30.0))
        } else {
            -lambda * (eps * ch - s) / ksq
        };

        let t = [ch - i * lambda * s, q * s, r * s, ch + i * lambda * s];
        let dt = [
            dch - i * s - i * lambda * ds,
            q * ds,
            r * ds,
            dch + i * s + i * lambda * ds,
        ];

        dm = mat_add(&mat_mul(&dt, &m), &mat_mul(&t, &dm));
        m = mat_mul(&t, &m);

        let max = m.iter().map(|v| v.norm()).fold(0.0_f64, f64::max);
        if max > 0.0 && max.is_finite() {
            let e = max.log2().round() as i32;
            if e != 0 {
                let f = (-e as f64).exp2();
                for v in m.iter_mut() {
                    *v *= f;
                }
                for v in dm.iter_mut() {
                    *v *= f;
                }
                scale_exp += e;
            }
        }
    }

    TransferState { m, dm, scale_exp }
}
