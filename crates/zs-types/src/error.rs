// ─────────────────────────────────────────────────────────────────────
// ZS-Spectra — Error Taxonomy
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use num_complex::Complex64;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpectrumError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported discretization: {0}")]
    UnsupportedDiscretization(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Eigenvalue iteration did not converge for matrix order {order}: {message}")]
    NonConvergence { order: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SpectrumResult<T> = Result<T, SpectrumError>;

/// Non-fatal conditions reported alongside partial or per-entry results.
///
/// These are explicit values carried through the return path; the engine
/// has no ambient diagnostic channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// More bound states were found than the caller-provided storage can
    /// hold; results were truncated to `capacity`.
    CapacityExceeded { found: usize, capacity: usize },
    /// The derivative of a(lambda) was numerically zero while computing a
    /// residue; the corresponding amplitude entry is a NaN sentinel.
    SingularDerivative { index: usize, bound_state: Complex64 },
}
