// ─────────────────────────────────────────────────────────────────────
// ZS-Spectra — Signal
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Sampled input signal with a uniform time grid.
//!
//! Samples q(t_n) with t_n = t0 + n*eps, eps = (t1-t0)/(D-1). Each sample
//! is treated as the midpoint value of a cell of width eps, so the
//! scattering medium extends from t0 - eps/2 to t1 + eps/2.

use crate::error::{SpectrumError, SpectrumResult};
use num_complex::Complex64;

#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<Complex64>,
    t0: f64,
    t1: f64,
}

impl Signal {
    /// Validated constructor: D >= 2 samples, finite monotonic span.
    pub fn new(samples: Vec<Complex64>, t0: f64, t1: f64) -> SpectrumResult<Self> {
        if samples.len() < 2 {
            return Err(SpectrumError::InvalidInput(format!(
                "signal needs at least 2 samples, got {}",
                samples.len()
            )));
        }
        if !t0.is_finite() || !t1.is_finite() || t1 <= t0 {
            return Err(SpectrumError::InvalidInput(format!(
                "time span must be finite with t1 > t0, got [{t0}, {t1}]"
            )));
        }
        Ok(Signal { samples, t0, t1 })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Complex64] {
        &self.samples
    }

    pub fn t_span(&self) -> (f64, f64) {
        (self.t0, self.t1)
    }

    /// Uniform step size eps = (t1-t0)/(D-1).
    pub fn step(&self) -> f64 {
        (self.t1 - self.t0) / (self.samples.len() - 1) as f64
    }

    /// Every-s-th-sample copy used by the SUBSAMPLE_AND_REFINE strategy.
    ///
    /// The factor s is chosen so the subsampled length is about
    /// sqrt(D log2(D)^2), keeping the global eigenvalue search at
    /// O(D log^2 D) overall. Returns the subsampled signal and s.
    pub fn subsample(&self) -> (Signal, usize) {
        let d = self.samples.len();
        let log2_d = (d as f64).log2();
        let target = (d as f64 * log2_d * log2_d).sqrt().ceil().max(2.0);
        let mut factor = ((d as f64 / target).floor() as usize).max(1);
        // Keep at least two samples after subsampling.
        while factor > 1 && (d + factor - 1) / factor < 2 {
            factor -= 1;
        }
        if factor == 1 {
            return (self.clone(), 1);
        }

        let sub: Vec<Complex64> = self.samples.iter().step_by(factor).copied().collect();
        let step_sub = self.step() * factor as f64;
        let t1_sub = self.t0 + (sub.len() - 1) as f64 * step_sub;
        let signal = Signal {
            samples: sub,
            t0: self.t0,
            t1: t1_sub,
        };
        (signal, factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(d: usize) -> Vec<Complex64> {
        (0..d).map(|i| Complex64::new(i as f64, 0.0)).collect()
    }

    #[test]
    fn test_new_rejects_short_and_bad_span() {
        assert!(Signal::new(ramp(1), 0.0, 1.0).is_err());
        assert!(Signal::new(ramp(8), 1.0, 1.0).is_err());
        assert!(Signal::new(ramp(8), 0.0, f64::INFINITY).is_err());
        assert!(Signal::new(ramp(8), 0.0, 1.0).is_ok());
    }

    #[test]
    fn test_step() {
        let s = Signal::new(ramp(5), -1.0, 1.0).unwrap();
        assert!((s.step() - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_subsample_keeps_grid_alignment() {
        let s = Signal::new(ramp(1024), -10.0, 10.0).unwrap();
        let (sub, factor) = s.subsample();
        assert!(factor >= 2, "large signals should actually subsample");
        assert!(sub.len() >= 2);
        assert!((sub.step() - s.step() * factor as f64).abs() < 1e-12);
        // Subsampled values are the original every-factor-th samples.
        for (i, v) in sub.samples().iter().enumerate() {
            assert_eq!(*v, s.samples()[i * factor]);
        }
    }

    #[test]
    fn test_subsample_small_signal_is_identity() {
        let s = Signal::new(ramp(4), 0.0, 3.0).unwrap();
        let (sub, factor) = s.subsample();
        assert_eq!(factor, 1);
        assert_eq!(sub, s);
    }
}
