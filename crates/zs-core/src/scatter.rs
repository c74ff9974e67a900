// ─────────────────────────────────────────────────────────────────────
// ZS-Spectra — Fast Scattering Assembler
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Divide-and-conquer assembly of the combined transfer polynomial.
//!
//! The D elementary matrices are merged pairwise by recursive halving;
//! each merge is a 2x2 polynomial matrix product (8 convolutions, 4
//! additions). Polynomial lengths double per level, so with the FFT
//! convolution in zs-math the total cost is O(D log^2 D). Halves may
//! have unequal length, so any D >= 1 terminates. Each recursive call
//! owns its scratch; sibling branches share no mutable state.

use num_complex::Complex64;
use zs_math::poly::conv;
use zs_types::config::Discretization;
use zs_types::signal::Signal;
use zs_types::spectrum::ScatterPoly;

use crate::discretization::elementary_matrices;

/// Assembles the combined transfer polynomial of a sampled signal.
///
/// The true matrix equals the returned coefficients times
/// 2^scale_exp. With `normalization` the coefficients are rescaled to
/// unit magnitude after every merge, protecting long products against
/// overflow at a small constant cost.
pub fn fast_scatter(
    signal: &Signal,
    kappa: f64,
    scheme: Discretization,
    normalization: bool,
) -> ScatterPoly {
    let mats = elementary_matrices(signal.samples(), signal.step(), kappa, scheme);
    assemble(&mats, normalization)
}

/// Recursive halving merge over a slice of transfer polynomials,
/// spectral order (index 0 is applied first).
pub fn assemble(mats: &[ScatterPoly], normalization: bool) -> ScatterPoly {
    match mats.len() {
        0 => ScatterPoly::identity(),
        1 => mats[0].clone(),
        n => {
            let mid = n / 2;
            let left = assemble(&mats[..mid], normalization);
            let right = assemble(&mats[mid..], normalization);
            multiply(&right, &left, normalization)
        }
    }
}

/// Polynomial matrix product a * b (b is applied first).
///
/// Exponents add; with `normalization` the product is rescaled by a
/// power of two chosen so the largest coefficient magnitude is near one.
pub fn multiply(a: &ScatterPoly, b: &ScatterPoly, normalization: bool) -> ScatterPoly {
    let m11 = add(&conv(&a.m11, &b.m11), &conv(&a.m12, &b.m21));
    let m12 = add(&conv(&a.m11, &b.m12), &conv(&a.m12, &b.m22));
    let m21 = add(&conv(&a.m21, &b.m11), &conv(&a.m22, &b.m21));
    let m22 = add(&conv(&a.m21, &b.m12), &conv(&a.m22, &b.m22));
    let mut out = ScatterPoly {
        deg: a.deg + b.deg,
        m11,
        m12,
        m21,
        m22,
        scale_exp: a.scale_exp + b.scale_exp,
    };
    if normalization {
        renormalize(&mut out);
    }
    out
}

fn add(a: &[Complex64], b: &[Complex64]) -> Vec<Complex64> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(x, y)| x + y).collect()
}

fn renormalize(p: &mut ScatterPoly) {
    let max = p
        .m11
        .iter()
        .chain(&p.m12)
        .chain(&p.m21)
        .chain(&p.m22)
        .map(|c| c.norm())
        .fold(0.0_f64, f64::max);
    if max <= 0.0 || !max.is_finite() {
        return;
    }
    let e = max.log2().round() as i32;
    if e == 0 {
        return;
    }
    let f = (-e as f64).exp2();
    for entry in [&mut p.m11, &mut p.m12, &mut p.m21, &mut p.m22] {
        for c in entry.iter_mut() {
            *c *= f;
        }
    }
    p.scale_exp += e;
}

#[cfg(test)]
mod tests {
    use super::*;
    use zs_math::poly::polyval;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn test_signal(d: usize) -> Signal {
        let samples: Vec<Complex64> = (0..d)
            .map(|n| {
                let t = n as f64;
                c(0.8 * (0.3 * t).sin(), 0.4 * (0.7 * t).cos())
            })
            .collect();
        Signal::new(samples, -1.0, 1.0).unwrap()
    }

    fn assert_poly_eq(a: &ScatterPoly, b: &ScatterPoly, tol: f64) {
        assert_eq!(a.deg, b.deg);
        let sa = a.scale();
        let sb = b.scale();
        for (ea, eb) in [
            (&a.m11, &b.m11),
            (&a.m12, &b.m12),
            (&a.m21, &b.m21),
            (&a.m22, &b.m22),
        ] {
            let max: f64 = ea.iter().map(|v| (*v * sa).norm()).fold(1e-30, f64::max);
            for (&x, &y) in ea.iter().zip(eb.iter()) {
                assert!(
                    (x * sa - y * sb).norm() < tol * max,
                    "coefficient mismatch: {} vs {}",
                    x * sa,
                    y * sb
                );
            }
        }
    }

    #[test]
    fn test_zero_signal_gives_unit_a() {
        let signal = Signal::new(vec![c(0.0, 0.0); 16], -2.0, 2.0).unwrap();
        let p = fast_scatter(&signal, 1.0, Discretization::Split2A, true);
        assert_eq!(p.deg, 16);
        let z = c(0.3, 0.4);
        assert!((polyval(&p.m11, z) * p.scale() - c(1.0, 0.0)).norm() < 1e-13);
        assert!((polyval(&p.m21, z) * p.scale()).norm() < 1e-13);
        assert!((polyval(&p.m12, z) * p.scale()).norm() < 1e-13);
    }

    #[test]
    fn test_composition_matches_sequential_product() {
        for &d in &[6usize, 7, 13] {
            let signal = test_signal(d);
            let mats =
                elementary_matrices(signal.samples(), signal.step(), 1.0, Discretization::Split2A);
            let fast = assemble(&mats, true);
            let mut seq = ScatterPoly::identity();
            for m in &mats {
                seq = multiply(m, &seq, false);
            }
            assert_poly_eq(&fast, &seq, 1e-11);
        }
    }

    #[test]
    fn test_composition_law_unequal_split() {
        let signal = test_signal(11);
        let mats =
            elementary_matrices(signal.samples(), signal.step(), -1.0, Discretization::Split2B);
        let full = assemble(&mats, true);
        // Split 7 / 4: right half applied after left half.
        let left = assemble(&mats[..7], true);
        let right = assemble(&mats[7..], true);
        let combined = multiply(&right, &left, true);
        assert_poly_eq(&full, &combined, 1e-11);
    }

    #[test]
    fn test_degree_and_lengths() {
        let signal = test_signal(9);
        for (scheme, m) in [(Discretization::Split2A, 1), (Discretization::Split2B, 2)] {
            let p = fast_scatter(&signal, 1.0, scheme, true);
            assert_eq!(p.deg, 9 * m);
            assert_eq!(p.m11.len(), p.deg + 1);
            assert_eq!(p.m21.len(), p.deg + 1);
        }
    }

    #[test]
    fn test_normalization_keeps_coefficients_bounded() {
        // Defocusing with large samples grows like cosh^D without
        // rescaling.
        let samples = vec![c(40.0, 0.0); 64];
        let signal = Signal::new(samples, -1.0, 1.0).unwrap();
        let p = fast_scatter(&signal, -1.0, Discretization::Split2A, true);
        let max = p
            .m11
            .iter()
            .chain(&p.m21)
            .map(|v| v.norm())
            .fold(0.0_f64, f64::max);
        assert!(max.is_finite());
        assert!(max <= 2.0);
        assert!(p.scale_exp > 0);
    }

    #[test]
    fn test_empty_sequence_is_identity() {
        let p = assemble(&[], true);
        assert_eq!(p, ScatterPoly::identity());
    }
}
