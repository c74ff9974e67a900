// ─────────────────────────────────────────────────────────────────────
// ZS-Spectra — Spectrum Data Model
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Assembled transfer polynomial and discrete-spectrum results.

use crate::error::Diagnostic;
use num_complex::Complex64;

/// Combined scattering transfer matrix as four polynomials in z.
///
/// Coefficients are stored in ascending powers (index i multiplies z^i),
/// each entry has deg + 1 coefficients. The true matrix equals the stored
/// coefficients times 2^scale_exp; the power-of-two exponent accumulates
/// the per-merge rescaling that keeps long products inside the f64 range.
/// Read-only once assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoly {
    pub deg: usize,
    pub m11: Vec<Complex64>,
    pub m12: Vec<Complex64>,
    pub m21: Vec<Complex64>,
    pub m22: Vec<Complex64>,
    pub scale_exp: i32,
}

impl ScatterPoly {
    /// Multiplicative identity (degree 0), the merge neutral element.
    pub fn identity() -> Self {
        ScatterPoly {
            deg: 0,
            m11: vec![Complex64::new(1.0, 0.0)],
            m12: vec![Complex64::new(0.0, 0.0)],
            m21: vec![Complex64::new(0.0, 0.0)],
            m22: vec![Complex64::new(1.0, 0.0)],
            scale_exp: 0,
        }
    }

    /// Linear scale factor 2^scale_exp.
    pub fn scale(&self) -> f64 {
        (self.scale_exp as f64).exp2()
    }
}

/// Validated bound states with their index-paired amplitudes.
///
/// `norming_constants` and `residues` (when requested) always have the
/// same length as `bound_states`; a NaN entry marks a per-entry
/// singular-derivative failure reported in `diagnostics`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteSpectrum {
    pub bound_states: Vec<Complex64>,
    pub norming_constants: Option<Vec<Complex64>>,
    pub residues: Option<Vec<Complex64>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DiscreteSpectrum {
    pub fn len(&self) -> usize {
        self.bound_states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound_states.is_empty()
    }

    pub fn truncated(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::CapacityExceeded { .. }))
    }
}
