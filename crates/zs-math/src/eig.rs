// ─────────────────────────────────────────────────────────────────────
// ZS-Spectra — Companion Eigenvalues
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Global polynomial rootfinding via the companion matrix.
//!
//! The first-row companion form is already upper Hessenberg, so roots
//! are computed by shifted QR with complex Givens rotations directly on
//! that form: Wilkinson shift from the trailing 2x2 block, one
//! implicit-Q sweep per iteration, deflation from the bottom. Each
//! sweep costs O(n^2) on the Hessenberg structure.

use ndarray::Array2;
use num_complex::Complex64;
use zs_types::error::{SpectrumError, SpectrumResult};

use crate::poly::deflate;

/// QR sweeps allowed per matrix order before giving up.
const SWEEPS_PER_ORDER: usize = 100;

/// Stagnant sweeps before an exceptional shift breaks symmetry cycles
/// (e.g. companion matrices of z^n - c, where the Wilkinson shift
/// vanishes identically).
const EXCEPTIONAL_SHIFT_PERIOD: usize = 10;

/// All finite non-zero roots of a polynomial in ascending coefficient
/// order.
///
/// Leading and trailing zero coefficients are deflated first; roots at
/// the origin (trailing zeros) are discarded, never fed to the
/// eigenvalue solve. Widely-ranged coefficients are balanced by the
/// power-of-two substitution z = s*w before the companion solve; the
/// roots are mapped back exactly. A constant, empty, or identically-zero
/// polynomial has an empty root set, which is not an error. A failed
/// eigenvalue iteration is fatal and yields no partial results.
pub fn polynomial_roots(coeffs: &[Complex64]) -> SpectrumResult<Vec<Complex64>> {
    let (core, _origin_roots) = deflate(coeffs);
    match core.len() {
        0 | 1 => Ok(Vec::new()),
        2 => Ok(vec![-core[0] / core[1]]),
        3 => Ok(quadratic_roots(core[2], core[1], core[0]).to_vec()),
        _ => {
            let (scaled, s) = scale_coefficients(core);
            let h = companion_matrix(&scaled);
            let mut roots = hessenberg_qr_eigenvalues(h)?;
            if s != 1.0 {
                for r in roots.iter_mut() {
                    *r *= s;
                }
            }
            Ok(roots)
        }
    }
}

/// Power-of-two variable substitution z = s*w that equalizes the extreme
/// coefficient magnitudes: s = 2^round(log2(|c0|/|cn|)/n), so the scaled
/// polynomial has |q0| ~ |qn| and the companion first row stays within
/// f64 range for geometrically growing or shrinking coefficients.
/// Returns the scaled coefficients and s; s = 1 leaves them untouched.
fn scale_coefficients(coeffs: &[Complex64]) -> (Vec<Complex64>, f64) {
    let n = coeffs.len() - 1;
    let c0 = coeffs[0].norm();
    let cn = coeffs[n].norm();
    if !c0.is_finite() || !cn.is_finite() || c0 == 0.0 || cn == 0.0 {
        return (coeffs.to_vec(), 1.0);
    }
    let e = ((c0 / cn).log2() / n as f64).round();
    if e == 0.0 || !e.is_finite() {
        return (coeffs.to_vec(), 1.0);
    }
    let s = e.exp2();
    let mut power = 1.0_f64;
    let scaled = coeffs
        .iter()
        .map(|&c| {
            let q = c * power;
            power *= s;
            q
        })
        .collect();
    (scaled, s)
}

/// Stable roots of a z^2 + b z + c = 0, a != 0.
pub fn quadratic_roots(a: Complex64, b: Complex64, c: Complex64) -> [Complex64; 2] {
    let disc = b * b - 4.0 * a * c;
    let s = disc.sqrt();
    // Pick the sign that avoids cancellation in b +/- s.
    let q = if (b + s).norm() >= (b - s).norm() {
        -0.5 * (b + s)
    } else {
        -0.5 * (b - s)
    };
    if q.norm() == 0.0 {
        // b = c = 0: double root at the origin.
        return [Complex64::new(0.0, 0.0); 2];
    }
    [q / a, c / q]
}

/// First-row companion matrix of a monic-normalized polynomial with
/// ascending coefficients (leading coefficient last, non-zero).
fn companion_matrix(coeffs: &[Complex64]) -> Array2<Complex64> {
    let n = coeffs.len() - 1; // polynomial degree = matrix order
    let lead = coeffs[n];
    let mut h = Array2::from_elem((n, n), Complex64::new(0.0, 0.0));
    for j in 0..n {
        h[[0, j]] = -coeffs[n - 1 - j] / lead;
    }
    for i in 1..n {
        h[[i, i - 1]] = Complex64::new(1.0, 0.0);
    }
    h
}

/// Complex Givens rotation G = [[c, conj(s)], [-s, c]] with real c >= 0
/// such that G * (a, b)^T has zero second component.
fn givens(a: Complex64, b: Complex64) -> (f64, Complex64) {
    let abs_a = a.norm();
    let abs_b = b.norm();
    if abs_b == 0.0 {
        return (1.0, Complex64::new(0.0, 0.0));
    }
    if abs_a == 0.0 {
        return (0.0, b / abs_b);
    }
    let n = (abs_a * abs_a + abs_b * abs_b).sqrt();
    let c = abs_a / n;
    let s = (a.conj() / abs_a) * b / n;
    (c, s)
}

/// Eigenvalue of the trailing 2x2 block closest to its bottom-right
/// entry.
fn wilkinson_shift(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Complex64 {
    let trace = a + d;
    let det = a * d - b * c;
    let s = (trace * trace - 4.0 * det).sqrt();
    let e1 = 0.5 * (trace + s);
    let e2 = 0.5 * (trace - s);
    if (e1 - d).norm() < (e2 - d).norm() {
        e1
    } else {
        e2
    }
}

/// Shifted QR iteration on an upper Hessenberg matrix.
fn hessenberg_qr_eigenvalues(mut h: Array2<Complex64>) -> SpectrumResult<Vec<Complex64>> {
    let n = h.nrows();
    let mut eigenvalues = Vec::with_capacity(n);
    let mut size = n;
    let max_sweeps = SWEEPS_PER_ORDER * n.max(1);
    let mut sweeps = 0usize;

    let mut cs = vec![0.0_f64; n];
    let mut sn = vec![Complex64::new(0.0, 0.0); n];
    let mut stagnant = 0usize;

    while size > 1 {
        // Deflate a converged bottom subdiagonal entry.
        let sub = h[[size - 1, size - 2]].norm();
        let local = h[[size - 2, size - 2]].norm() + h[[size - 1, size - 1]].norm();
        if sub <= f64::EPSILON * local.max(f64::MIN_POSITIVE) {
            eigenvalues.push(h[[size - 1, size - 1]]);
            size -= 1;
            stagnant = 0;
            continue;
        }

        sweeps += 1;
        stagnant += 1;
        if sweeps > max_sweeps {
            return Err(SpectrumError::NonConvergence {
                order: n,
                message: format!("QR sweep budget exhausted with {size} eigenvalues pending"),
            });
        }

        let shift = if stagnant % EXCEPTIONAL_SHIFT_PERIOD == 0 {
            h[[size - 1, size - 1]] + Complex64::new(0.75 * sub, 0.0)
        } else {
            wilkinson_shift(
                h[[size - 2, size - 2]],
                h[[size - 2, size - 1]],
                h[[size - 1, size - 2]],
                h[[size - 1, size - 1]],
            )
        };
        for i in 0..size {
            h[[i, i]] -= shift;
        }

        // QR factorization sweep: zero the subdiagonal with rotations.
        for i in 0..size - 1 {
            let (c, s) = givens(h[[i, i]], h[[i + 1, i]]);
            cs[i] = c;
            sn[i] = s;
            for j in i..size {
                let t1 = h[[i, j]];
                let t2 = h[[i + 1, j]];
                h[[i, j]] = c * t1 + s.conj() * t2;
                h[[i + 1, j]] = c * t2 - s * t1;
            }
        }

        // RQ recombination restores the Hessenberg form.
        for i in 0..size - 1 {
            let c = cs[i];
            let s = sn[i];
            let rows = (i + 2).min(size);
            for j in 0..rows {
                let t1 = h[[j, i]];
                let t2 = h[[j, i + 1]];
                h[[j, i]] = c * t1 + s * t2;
                h[[j, i + 1]] = c * t2 - s.conj() * t1;
            }
        }

        for i in 0..size {
            h[[i, i]] += shift;
        }
    }

    if size == 1 {
        eigenvalues.push(h[[0, 0]]);
    }
    Ok(eigenvalues)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn assert_root_set(mut roots: Vec<Complex64>, mut expected: Vec<Complex64>, tol: f64) {
        assert_eq!(roots.len(), expected.len(), "root count mismatch: {roots:?}");
        // Greedy matching; fine for well-separated test roots.
        for e in expected.drain(..) {
            let (idx, _) = roots
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    (*a - e).norm().partial_cmp(&(*b - e).norm()).unwrap()
                })
                .expect("non-empty");
            let got = roots.swap_remove(idx);
            assert!(
                (got - e).norm() < tol,
                "expected root {e}, closest found {got}"
            );
        }
    }

    #[test]
    fn test_linear_and_quadratic() {
        // 2z - 4 = 0
        let r = polynomial_roots(&[c(-4.0, 0.0), c(2.0, 0.0)]).unwrap();
        assert_root_set(r, vec![c(2.0, 0.0)], 1e-14);
        // z^2 + 1 = 0
        let r = polynomial_roots(&[c(1.0, 0.0), c(0.0, 0.0), c(1.0, 0.0)]).unwrap();
        assert_root_set(r, vec![c(0.0, 1.0), c(0.0, -1.0)], 1e-14);
    }

    #[test]
    fn test_cubic_real_roots() {
        // (z-1)(z-2)(z-3) = z^3 - 6z^2 + 11z - 6
        let p = [c(-6.0, 0.0), c(11.0, 0.0), c(-6.0, 0.0), c(1.0, 0.0)];
        let r = polynomial_roots(&p).unwrap();
        assert_root_set(
            r,
            vec![c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0)],
            1e-8,
        );
    }

    #[test]
    fn test_roots_of_unity() {
        // z^8 - 1
        let mut p = vec![c(0.0, 0.0); 9];
        p[0] = c(-1.0, 0.0);
        p[8] = c(1.0, 0.0);
        let r = polynomial_roots(&p).unwrap();
        let expected: Vec<Complex64> = (0..8)
            .map(|k| Complex64::from_polar(1.0, 2.0 * std::f64::consts::PI * k as f64 / 8.0))
            .collect();
        assert_root_set(r, expected, 1e-8);
    }

    #[test]
    fn test_origin_roots_are_discarded() {
        // z^2 (z - 5): ascending [0, 0, -5, 1]
        let p = [c(0.0, 0.0), c(0.0, 0.0), c(-5.0, 0.0), c(1.0, 0.0)];
        let r = polynomial_roots(&p).unwrap();
        assert_root_set(r, vec![c(5.0, 0.0)], 1e-12);
    }

    #[test]
    fn test_degenerate_polynomials_yield_empty_set() {
        assert!(polynomial_roots(&[]).unwrap().is_empty());
        assert!(polynomial_roots(&[c(3.0, 1.0)]).unwrap().is_empty());
        assert!(polynomial_roots(&[c(0.0, 0.0); 4]).unwrap().is_empty());
    }

    #[test]
    fn test_complex_coefficients() {
        // (z - (1+i)) (z - (-2+0.5i))
        let r1 = c(1.0, 1.0);
        let r2 = c(-2.0, 0.5);
        let p = [r1 * r2, -(r1 + r2), c(1.0, 0.0)];
        let r = polynomial_roots(&p).unwrap();
        assert_root_set(r, vec![r1, r2], 1e-12);
    }

    #[test]
    fn test_widely_scaled_large_roots() {
        // (z - 1000)(z - 2000)(z - 4000): unbalanced, the constant term
        // is 12 orders above the leading one.
        let p = [
            c(-8.0e9, 0.0),
            c(1.4e7, 0.0),
            c(-7.0e3, 0.0),
            c(1.0, 0.0),
        ];
        let r = polynomial_roots(&p).unwrap();
        assert_root_set(
            r,
            vec![c(1000.0, 0.0), c(2000.0, 0.0), c(4000.0, 0.0)],
            1e-4,
        );
    }

    #[test]
    fn test_widely_scaled_small_roots() {
        // (z - 1e-3)(z - 2e-3)(z - 4e-3)
        let p = [
            c(-8.0e-9, 0.0),
            c(1.4e-5, 0.0),
            c(-7.0e-3, 0.0),
            c(1.0, 0.0),
        ];
        let r = polynomial_roots(&p).unwrap();
        assert_root_set(
            r,
            vec![c(1e-3, 0.0), c(2e-3, 0.0), c(4e-3, 0.0)],
            1e-10,
        );
    }

    #[test]
    fn test_scaling_is_exact_on_balanced_input() {
        // Unit-magnitude extremes pick s = 1 and leave coefficients
        // untouched.
        let p = [c(-1.0, 0.0), c(0.5, 0.5), c(1.0, 0.0)];
        let (scaled, s) = scale_coefficients(&p);
        assert_eq!(s, 1.0);
        assert_eq!(scaled, p.to_vec());
    }

    #[test]
    fn test_clustered_roots_resolved() {
        // (z - 1)^2 (z + 1): repeated root handled to sqrt-eps accuracy
        let p = [c(1.0, 0.0), c(-1.0, 0.0), c(-1.0, 0.0), c(1.0, 0.0)];
        let r = polynomial_roots(&p).unwrap();
        assert_eq!(r.len(), 3);
        let near_one = r.iter().filter(|z| (**z - c(1.0, 0.0)).norm() < 1e-6).count();
        let near_neg = r.iter().filter(|z| (**z + c(1.0, 0.0)).norm() < 1e-8).count();
        assert_eq!(near_one, 2);
        assert_eq!(near_neg, 1);
    }
}
