// ─────────────────────────────────────────────────────────────────────
// ZS-Spectra — Math Primitives
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Numeric primitives for ZS-Spectra.
//!
//! Polynomial evaluation and fast convolution, companion-matrix
//! eigenvalues via shifted Hessenberg QR, and vector metrics.

pub mod eig;
pub mod metrics;
pub mod poly;
