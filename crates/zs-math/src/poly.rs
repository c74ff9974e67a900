// ─────────────────────────────────────────────────────────────────────
// ZS-Spectra — Polynomial Arithmetic
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Dense complex polynomials in ascending coefficient order.
//!
//! Coefficient index i multiplies z^i throughout. Products switch from
//! direct summation to FFT-based fast convolution once both operands
//! exceed a fixed crossover length; the direct path has the better
//! constant factor for the short per-sample polynomials.

use num_complex::Complex64;
use rustfft::FftPlanner;

/// Below this operand length the direct O(n*m) product is used.
const FAST_CONV_CROSSOVER: usize = 64;

/// Horner evaluation of p(z), ascending coefficients.
pub fn polyval(coeffs: &[Complex64], z: Complex64) -> Complex64 {
    let mut acc = Complex64::new(0.0, 0.0);
    for &c in coeffs.iter().rev() {
        acc = acc * z + c;
    }
    acc
}

/// Simultaneous Horner evaluation of p(z) and p'(z).
pub fn polyval_with_derivative(coeffs: &[Complex64], z: Complex64) -> (Complex64, Complex64) {
    let mut p = Complex64::new(0.0, 0.0);
    let mut dp = Complex64::new(0.0, 0.0);
    for &c in coeffs.iter().rev() {
        dp = dp * z + p;
        p = p * z + c;
    }
    (p, dp)
}

/// Strips numerically-zero leading and trailing coefficients.
///
/// Returns the non-degenerate core slice together with the number of
/// stripped low-order coefficients, i.e. the multiplicity of the root at
/// the origin. The zero polynomial yields an empty slice. Thresholding
/// is relative to the largest coefficient magnitude.
pub fn deflate(coeffs: &[Complex64]) -> (&[Complex64], usize) {
    let max_norm = coeffs.iter().map(|c| c.norm()).fold(0.0_f64, f64::max);
    if max_norm == 0.0 || !max_norm.is_finite() {
        return (&coeffs[..0], 0);
    }
    let tol = max_norm * f64::EPSILON * coeffs.len() as f64;

    let lo = coeffs
        .iter()
        .position(|c| c.norm() > tol)
        .unwrap_or(coeffs.len());
    let hi = coeffs
        .iter()
        .rposition(|c| c.norm() > tol)
        .map(|i| i + 1)
        .unwrap_or(0);
    if lo >= hi {
        return (&coeffs[..0], 0);
    }
    (&coeffs[lo..hi], lo)
}

/// Polynomial product / linear convolution.
pub fn conv(a: &[Complex64], b: &[Complex64]) -> Vec<Complex64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    if a.len().min(b.len()) < FAST_CONV_CROSSOVER {
        conv_direct(a, b)
    } else {
        conv_fft(a, b)
    }
}

fn conv_direct(a: &[Complex64], b: &[Complex64]) -> Vec<Complex64> {
    let mut out = vec![Complex64::new(0.0, 0.0); a.len() + b.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            out[i + j] += ai * bj;
        }
    }
    out
}

/// Transform-based product: pad to a power of two, pointwise multiply,
/// inverse transform with 1/n normalization (rustfft is unnormalized).
fn conv_fft(a: &[Complex64], b: &[Complex64]) -> Vec<Complex64> {
    let out_len = a.len() + b.len() - 1;
    let n = out_len.next_power_of_two();
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    let ifft = planner.plan_fft_inverse(n);

    let mut fa = vec![Complex64::new(0.0, 0.0); n];
    fa[..a.len()].copy_from_slice(a);
    let mut fb = vec![Complex64::new(0.0, 0.0); n];
    fb[..b.len()].copy_from_slice(b);

    fft.process(&mut fa);
    fft.process(&mut fb);
    for (x, y) in fa.iter_mut().zip(fb.iter()) {
        *x *= y;
    }
    ifft.process(&mut fa);

    let norm = 1.0 / n as f64;
    fa.truncate(out_len);
    for x in fa.iter_mut() {
        *x *= norm;
    }
    fa
}
