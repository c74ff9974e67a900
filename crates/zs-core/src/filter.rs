// ─────────────────────────────────────────────────────────────────────
// ZS-Spectra — Spectrum Filter
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Candidate-root filtering.
//!
//! All filters compact survivors to a contiguous prefix in place and
//! return the surviving count. An optional companion array (initial
//! guess provenance) is permuted identically, preserving the index
//! pairing. The merge filter uses a first-seen-wins tie-break: the
//! earliest candidate of a cluster is its representative, which makes
//! repeated application with the same tolerance a no-op.

use num_complex::Complex64;
use zs_types::config::{BoundStateFiltering, SpectrumConfig};

/// Closed axis-aligned admissibility rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub re_min: f64,
    pub re_max: f64,
    pub im_min: f64,
    pub im_max: f64,
}

impl BoundingBox {
    /// NaN coordinates are never contained.
    pub fn contains(&self, z: Complex64) -> bool {
        z.re >= self.re_min && z.re <= self.re_max && z.im >= self.im_min && z.im <= self.im_max
    }
}

/// Half-width of the principal spectral window, pi m / (2 eps).
///
/// Roots map one-to-one to lambda only for |Re lambda| inside this
/// window; beyond it the spectral variable z wraps around.
pub fn principal_window(eps: f64, degree: usize) -> f64 {
    std::f64::consts::PI * degree as f64 / (2.0 * eps)
}

fn compact_by<F>(
    candidates: &mut Vec<Complex64>,
    mut companions: Option<&mut Vec<Complex64>>,
    mut keep: F,
) -> usize
where
    F: FnMut(&[Complex64], Complex64) -> bool,
{
    let mut w = 0;
    for i in 0..candidates.len() {
        let z = candidates[i];
        if keep(&candidates[..w], z) {
            candidates[w] = z;
            if let Some(comp) = companions.as_deref_mut() {
                comp[w] = comp[i];
            }
            w += 1;
        }
    }
    candidates.truncate(w);
    if let Some(comp) = companions {
        comp.truncate(w);
    }
    w
}

/// Keeps candidates inside the box, or outside it when `invert` is set.
pub fn retain_in_box(
    candidates: &mut Vec<Complex64>,
    companions: Option<&mut Vec<Complex64>>,
    bbox: &BoundingBox,
    invert: bool,
) -> usize {
    compact_by(candidates, companions, |_, z| bbox.contains(z) != invert)
}

/// Rejects candidates with |Im| below the tolerance. These are
/// perturbations of the continuous spectrum, not bound states.
pub fn reject_near_real(
    candidates: &mut Vec<Complex64>,
    companions: Option<&mut Vec<Complex64>>,
    tol: f64,
) -> usize {
    compact_by(candidates, companions, |_, z| z.im.abs() >= tol)
}

/// Collapses clusters of mutually close candidates to their earliest
/// member.
pub fn merge_close(
    candidates: &mut Vec<Complex64>,
    companions: Option<&mut Vec<Complex64>>,
    tol: f64,
) -> usize {
    compact_by(candidates, companions, |kept, z| {
        kept.iter().all(|k| (k - z).norm() > tol)
    })
}

/// Applies the configured filtering level.
///
/// NONE keeps everything. BASIC keeps the upper half of the principal
/// spectral window and merges near-duplicates. FULL shrinks the window
/// to the configured fraction, enforces the configured imaginary bounds,
/// and additionally rejects near-real candidates.
pub fn apply_level(
    candidates: &mut Vec<Complex64>,
    mut companions: Option<&mut Vec<Complex64>>,
    config: &SpectrumConfig,
    eps: f64,
) -> usize {
    let degree = config.discretization.degree();
    match config.bound_state_filtering {
        BoundStateFiltering::None => candidates.len(),
        BoundStateFiltering::Basic => {
            let half = principal_window(eps, degree);
            let bbox = BoundingBox {
                re_min: -half,
                re_max: half,
                im_min: 0.0,
                im_max: f64::INFINITY,
            };
            retain_in_box(candidates, companions.as_deref_mut(), &bbox, false);
            merge_close(candidates, companions, config.merge_tolerance)
        }
        BoundStateFiltering::Full => {
            let region = &config.full_filter;
            let half = principal_window(eps, degree) * region.re_fraction;
            let bbox = BoundingBox {
                re_min: -half,
                re_max: half,
                im_min: 0.0,
                im_max: region.im_max.unwrap_or(f64::INFINITY),
            };
            retain_in_box(candidates, companions.as_deref_mut(), &bbox, false);
            reject_near_real(candidates, companions.as_deref_mut(), region.im_min);
            merge_close(candidates, companions, config.merge_tolerance)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    const UNIT_BOX: BoundingBox = BoundingBox {
        re_min: -1.0,
        re_max: 1.0,
        im_min: 0.0,
        im_max: 1.0,
    };

    #[test]
    fn test_box_keeps_inside_members() {
        let mut cands = vec![c(0.5, 0.5), c(2.0, 0.5), c(-0.5, 0.9), c(0.0, -0.1)];
        let n = retain_in_box(&mut cands, None, &UNIT_BOX, false);
        assert_eq!(n, 2);
        assert_eq!(cands, vec![c(0.5, 0.5), c(-0.5, 0.9)]);
    }

    #[test]
    fn test_box_inverted_keeps_outside_members() {
        let mut cands = vec![c(0.5, 0.5), c(2.0, 0.5), c(0.0, -0.1)];
        let n = retain_in_box(&mut cands, None, &UNIT_BOX, true);
        assert_eq!(n, 2);
        assert_eq!(cands, vec![c(2.0, 0.5), c(0.0, -0.1)]);
    }

    #[test]
    fn test_box_rejects_nan() {
        let mut cands = vec![c(f64::NAN, 0.5), c(0.0, 0.5)];
        assert_eq!(retain_in_box(&mut cands, None, &UNIT_BOX, false), 1);
        assert_eq!(cands, vec![c(0.0, 0.5)]);
    }

    #[test]
    fn test_companion_permutation_follows_candidates() {
        let mut cands = vec![c(0.5, 0.5), c(2.0, 0.5), c(-0.5, 0.9)];
        let mut provenance = vec![c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0)];
        retain_in_box(&mut cands, Some(&mut provenance), &UNIT_BOX, false);
        assert_eq!(provenance, vec![c(1.0, 0.0), c(3.0, 0.0)]);
    }

    #[test]
    fn test_merge_first_seen_wins() {
        let mut cands = vec![c(1.0, 1.0), c(3.0, 0.0), c(1.0 + 1e-9, 1.0)];
        let n = merge_close(&mut cands, None, 1e-6);
        assert_eq!(n, 2);
        assert_eq!(cands[0], c(1.0, 1.0));
        assert_eq!(cands[1], c(3.0, 0.0));
    }

    #[test]
    fn test_merge_idempotent() {
        let mut cands = vec![
            c(0.0, 0.0),
            c(0.05, 0.0),
            c(0.5, 0.5),
            c(0.52, 0.5),
            c(2.0, 0.0),
        ];
        merge_close(&mut cands, None, 0.1);
        let once = cands.clone();
        merge_close(&mut cands, None, 0.1);
        assert_eq!(cands, once);
    }

    #[test]
    fn test_reject_near_real() {
        let mut cands = vec![c(1.0, 1e-9), c(1.0, 0.5), c(1.0, -1e-8), c(1.0, -0.5)];
        let n = reject_near_real(&mut cands, None, 1e-6);
        assert_eq!(n, 2);
        assert_eq!(cands, vec![c(1.0, 0.5), c(1.0, -0.5)]);
    }

    #[test]
    fn test_apply_level_none_keeps_everything() {
        let cfg = SpectrumConfig {
            bound_state_filtering: BoundStateFiltering::None,
            ..Default::default()
        };
        let mut cands = vec![c(1e9, -1e9), c(0.0, 0.0), c(f64::NAN, 0.0)];
        assert_eq!(apply_level(&mut cands, None, &cfg, 0.1), 3);
    }

    #[test]
    fn test_apply_level_basic_restricts_to_upper_window() {
        let cfg = SpectrumConfig {
            bound_state_filtering: BoundStateFiltering::Basic,
            ..Default::default()
        };
        let eps = 0.1;
        let half = principal_window(eps, cfg.discretization.degree());
        let mut cands = vec![
            c(0.0, 1.0),
            c(0.0, -1.0),
            c(half * 1.5, 1.0),
            c(-half * 0.5, 2.0),
        ];
        let n = apply_level(&mut cands, None, &cfg, eps);
        assert_eq!(n, 2);
        assert_eq!(cands, vec![c(0.0, 1.0), c(-half * 0.5, 2.0)]);
    }

    #[test]
    fn test_apply_level_full_rejects_near_real_and_window_edge() {
        let mut cfg = SpectrumConfig::default();
        cfg.full_filter.im_min = 1e-3;
        let eps = 0.1;
        let half = principal_window(eps, cfg.discretization.degree());
        let mut cands = vec![
            c(0.0, 1.0),
            c(0.0, 1e-5),         // near-real noise
            c(half * 0.95, 1.0),  // window edge, outside 0.9 fraction
            c(half * 0.5, 0.5),
        ];
        let n = apply_level(&mut cands, None, &cfg, eps);
        assert_eq!(n, 2);
        assert_eq!(cands, vec![c(0.0, 1.0), c(half * 0.5, 0.5)]);
    }
}
