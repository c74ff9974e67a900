// ─────────────────────────────────────────────────────────────────────
// ZS-Spectra — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Engine configuration.
//!
//! Defaults: FULL filtering, subsample-and-refine localization, 10
//! Newton iterations, norming constants, intermediate normalization
//! enabled.

use crate::error::{SpectrumError, SpectrumResult};
use serde::{Deserialize, Serialize};

/// How numerically found roots of a(lambda) are filtered before they are
/// accepted as bound states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundStateFiltering {
    /// All detected roots are returned.
    None,
    /// Only roots in the admissible half-plane are kept; near-duplicates
    /// are merged.
    Basic,
    /// Additionally rejects roots in physically implausible regions, see
    /// [`FullFilterRegion`].
    #[default]
    Full,
}

/// Strategy used to localize the roots of a(lambda).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundStateLocalization {
    /// Global companion-matrix eigenvalue rooting. Reliable, no initial
    /// guesses required, slowest.
    FastEigenvalue,
    /// Newton refinement of caller-supplied initial guesses.
    Newton,
    /// Fast eigenvalue rooting on a subsampled signal, filtered, then
    /// Newton-refined at full resolution. Recommended default.
    #[default]
    SubsampleAndRefine,
}

/// Which discrete-spectrum amplitudes are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscreteSpectrumType {
    #[default]
    NormingConstants,
    Residues,
    /// Norming constants followed by residues; doubles the required
    /// amplitude output length.
    Both,
}

/// Which continuous-spectrum values are computed on the user grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuousSpectrumType {
    #[default]
    ReflectionCoefficient,
    /// a(xi) followed by b(xi); doubles the required output length.
    Ab,
    /// Reflection coefficient, then a, then b (triple length).
    Both,
}

/// Registered exponential-splitting discretizations of the
/// Zakharov-Shabat problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discretization {
    /// Lie splitting, per-sample polynomial degree 1.
    #[default]
    Split2A,
    /// Symmetric Strang splitting, per-sample polynomial degree 2.
    Split2B,
}

impl Discretization {
    /// Fixed per-sample polynomial degree of the elementary transfer
    /// matrix entries.
    pub fn degree(self) -> usize {
        match self {
            Discretization::Split2A => 1,
            Discretization::Split2B => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Discretization::Split2A => "split2a",
            Discretization::Split2B => "split2b",
        }
    }

    /// Resolve a scheme identifier. Unknown identifiers are reported as
    /// `UnsupportedDiscretization`.
    pub fn from_name(name: &str) -> SpectrumResult<Self> {
        match name {
            "split2a" => Ok(Discretization::Split2A),
            "split2b" => Ok(Discretization::Split2B),
            other => Err(SpectrumError::UnsupportedDiscretization(other.to_string())),
        }
    }
}

/// Region rejected by FULL filtering, in units of the principal spectral
/// window of the chosen discretization.
///
/// The exact boundary between "plausible" and "implausible" is scheme-
/// and application-specific, so it is a parameter rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FullFilterRegion {
    /// Fraction of the principal real-axis window that is retained
    /// (default: 0.9). Roots closer to the window boundary are rejected
    /// as dominated by discretization error.
    #[serde(default = "default_re_fraction")]
    pub re_fraction: f64,
    /// Minimum admissible imaginary part (default: 1e-6). Roots below it
    /// are treated as numerical perturbations of the continuous spectrum.
    #[serde(default = "default_im_min")]
    pub im_min: f64,
    /// Optional upper bound on the imaginary part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub im_max: Option<f64>,
}

fn default_re_fraction() -> f64 {
    0.9
}
fn default_im_min() -> f64 {
    1e-6
}
fn default_merge_tolerance() -> f64 {
    1.4901161193847656e-8 // sqrt(f64::EPSILON)
}
fn default_niter() -> usize {
    10
}
fn default_normalization() -> bool {
    true
}

impl Default for FullFilterRegion {
    fn default() -> Self {
        FullFilterRegion {
            re_fraction: default_re_fraction(),
            im_min: default_im_min(),
            im_max: None,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumConfig {
    #[serde(default)]
    pub bound_state_filtering: BoundStateFiltering,
    #[serde(default)]
    pub bound_state_localization: BoundStateLocalization,
    /// Newton iteration count for the NEWTON and SUBSAMPLE_AND_REFINE
    /// strategies.
    #[serde(default = "default_niter")]
    pub niter: usize,
    #[serde(default)]
    pub discspec_type: DiscreteSpectrumType,
    #[serde(default)]
    pub contspec_type: ContinuousSpectrumType,
    /// Rescale intermediate results during fast scattering. Slightly
    /// slower, protects long products against overflow.
    #[serde(default = "default_normalization")]
    pub normalization: bool,
    #[serde(default)]
    pub discretization: Discretization,
    /// Candidates closer than this are collapsed to a single bound state.
    #[serde(default = "default_merge_tolerance")]
    pub merge_tolerance: f64,
    #[serde(default)]
    pub full_filter: FullFilterRegion,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        SpectrumConfig {
            bound_state_filtering: BoundStateFiltering::default(),
            bound_state_localization: BoundStateLocalization::default(),
            niter: default_niter(),
            discspec_type: DiscreteSpectrumType::default(),
            contspec_type: ContinuousSpectrumType::default(),
            normalization: default_normalization(),
            discretization: Discretization::default(),
            merge_tolerance: default_merge_tolerance(),
            full_filter: FullFilterRegion::default(),
        }
    }
}

impl SpectrumConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> SpectrumResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SpectrumResult<()> {
        if self.niter == 0 {
            return Err(SpectrumError::ConfigError(
                "niter must be >= 1".to_string(),
            ));
        }
        if !self.merge_tolerance.is_finite() || self.merge_tolerance <= 0.0 {
            return Err(SpectrumError::ConfigError(
                "merge_tolerance must be finite and > 0".to_string(),
            ));
        }
        let region = &self.full_filter;
        if !region.re_fraction.is_finite()
            || region.re_fraction <= 0.0
            || region.re_fraction > 1.0
        {
            return Err(SpectrumError::ConfigError(
                "full_filter.re_fraction must be in (0, 1]".to_string(),
            ));
        }
        if !region.im_min.is_finite() || region.im_min < 0.0 {
            return Err(SpectrumError::ConfigError(
                "full_filter.im_min must be finite and >= 0".to_string(),
            ));
        }
        if let Some(im_max) = region.im_max {
            if !im_max.is_finite() || im_max <= region.im_min {
                return Err(SpectrumError::ConfigError(
                    "full_filter.im_max must be finite and > im_min".to_string(),
                ));
            }
        }
        Ok(())
    }
}
