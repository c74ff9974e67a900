// ─────────────────────────────────────────────────────────────────────
// ZS-Spectra — Amplitude Evaluator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Norming constants and residues at validated bound states.
//!
//! One exact propagation per bound state supplies everything: the
//! norming constant b_k = 2^W S21 exp(-i lambda_k (t0 + t1)) and the
//! residue b_k / a'(lambda_k), with a' = (S11' + i D eps S11)
//! exp(i lambda D eps). The scale exponents cancel in the residue
//! ratio. A numerically vanishing derivative poisons only the one
//! entry: it becomes a NaN sentinel paired with a SingularDerivative
//! diagnostic, and the remaining bound states are evaluated normally.

use num_complex::Complex64;
use zs_types::config::DiscreteSpectrumType;
use zs_types::error::Diagnostic;
use zs_types::signal::Signal;

use crate::discretization::propagate_with_derivative;

/// True-scale derivative magnitude below which a residue division is
/// treated as singular.
pub const SINGULAR_DERIVATIVE_TOL: f64 = 1e-12;

/// Evaluates the requested amplitudes, index-paired with `bound_states`.
///
/// Returns `(norming_constants, residues)`; each is `Some` exactly when
/// the spectrum type requests it, and always has the same length as
/// `bound_states`.
pub fn evaluate(
    signal: &Signal,
    kappa: f64,
    bound_states: &[Complex64],
    which: DiscreteSpectrumType,
    diagnostics: &mut Vec<Diagnostic>,
) -> (Option<Vec<Complex64>>, Option<Vec<Complex64>>) {
    let want_norming = matches!(
        which,
        DiscreteSpectrumType::NormingConstants | DiscreteSpectrumType::Both
    );
    let want_residues = matches!(
        which,
        DiscreteSpectrumType::Residues | DiscreteSpectrumType::Both
    );

    let (t0, t1) = signal.t_span();
    let eps = signal.step();
    let t_total = signal.len() as f64 * eps;
    let i = Complex64::i();

    let mut norming = want_norming.then(|| Vec::with_capacity(bound_states.len()));
    let mut residues = want_residues.then(|| Vec::with_capacity(bound_states.len()));

    for (index, &lam) in bound_states.iter().enumerate() {
        let st = propagate_with_derivative(signal.samples(), eps, kappa, lam);
        let scale = (st.scale_exp as f64).exp2();
        let phase_b = (-i * lam * (t0 + t1)).exp();
        let b = st.m[2] * phase_b;

        if let Some(out) = norming.as_mut() {
            out.push(b * scale);
        }
        if let Some(out) = residues.as_mut() {
            let aprime = st.dm[0] + i * t_total * st.m[0];
            if aprime.norm() * scale < SINGULAR_DERIVATIVE_TOL {
                out.push(Complex64::new(f64::NAN, f64::NAN));
                diagnostics.push(Diagnostic::SingularDerivative {
                    index,
                    bound_state: lam,
                });
            } else {
                let phase_a = (i * lam * t_total).exp();
                out.push(b / (aprime * phase_a));
            }
        }
    }

    (norming, residues)
}
