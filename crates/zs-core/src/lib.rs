// ─────────────────────────────────────────────────────────────────────
// ZS-Spectra — Discrete Spectrum Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Discrete-spectrum extraction for the Zakharov-Shabat scattering
//! problem.
//!
//! Pipeline: per-sample elementary transfer matrices -> fast polynomial
//! scattering assembly -> root localization (three strategies) ->
//! filtering -> amplitude (norming constant / residue) evaluation. A
//! continuous-spectrum grid evaluator consumes the same assembled
//! polynomial.

pub mod amplitude;
pub mod contspec;
pub mod discretization;
pub mod engine;
pub mod filter;
pub mod locate;
pub mod scatter;

pub use contspec::continuous_spectrum;
pub use engine::{discrete_spectrum, discrete_spectrum_into, max_bound_states};
