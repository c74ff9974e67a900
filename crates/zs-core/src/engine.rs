// ─────────────────────────────────────────────────────────────────────
// ZS-Spectra — Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Top-level discrete-spectrum pipeline.
//!
//! validate -> localize -> filter -> truncate to caller capacity ->
//! amplitudes. The slice-based entry point never allocates the result
//! buffers; the convenience wrapper owns them for callers that do not
//! care.

use num_complex::Complex64;
use zs_types::config::{DiscreteSpectrumType, Discretization, SpectrumConfig};
use zs_types::error::{Diagnostic, SpectrumError, SpectrumResult};
use zs_types::signal::Signal;
use zs_types::spectrum::DiscreteSpectrum;

use crate::amplitude;
use crate::filter::apply_level;
use crate::locate::locate_bound_states;

fn amplitude_blocks(which: DiscreteSpectrumType) -> usize {
    match which {
        DiscreteSpectrumType::NormingConstants | DiscreteSpectrumType::Residues => 1,
        DiscreteSpectrumType::Both => 2,
    }
}

/// Maximum number of bound states the chosen discretization can produce
/// for this signal: the degree of the assembled transfer polynomial,
/// D times the per-sample degree. Sizing `bound_states_out` to this
/// value guarantees [`discrete_spectrum_into`] never truncates.
pub fn max_bound_states(signal: &Signal, discretization: Discretization) -> usize {
    signal.len() * discretization.degree()
}

/// Computes the discrete spectrum into caller-supplied storage.
///
/// `bound_states_out` fixes the capacity; `amplitudes_out` must hold one
/// amplitude per bound-state slot, or two for `Both` (norming constants
/// in the first `capacity` entries, residues starting at `capacity`).
/// When more bound states are found than fit, the result is truncated
/// and a `CapacityExceeded` diagnostic is emitted; nothing is dropped
/// silently. Returns the number of bound states written and the
/// diagnostics collected along the way.
pub fn discrete_spectrum_into(
    signal: &Signal,
    kappa: f64,
    config: &SpectrumConfig,
    guesses: Option<&[Complex64]>,
    bound_states_out: &mut [Complex64],
    amplitudes_out: &mut [Complex64],
) -> SpectrumResult<(usize, Vec<Diagnostic>)> {
    if kappa != 1.0 && kappa != -1.0 {
        return Err(SpectrumError::InvalidInput(format!(
            "kappa must be +1 or -1, got {kappa}"
        )));
    }
    config.validate()?;
    let capacity = bound_states_out.len();
    let required = amplitude_blocks(config.discspec_type) * capacity;
    if amplitudes_out.len() < required {
        return Err(SpectrumError::InvalidInput(format!(
            "amplitude storage holds {} entries, {} required for capacity {}",
            amplitudes_out.len(),
            required,
            capacity
        )));
    }

    let mut candidates = locate_bound_states(signal, kappa, config, guesses)?;
    apply_level(&mut candidates, None, config, signal.step());

    let found = candidates.len();
    let mut diagnostics = Vec::new();
    if found > capacity {
        diagnostics.push(Diagnostic::CapacityExceeded { found, capacity });
        candidates.truncate(capacity);
    }
    let count = candidates.len();
    bound_states_out[..count].copy_from_slice(&candidates);

    let (norming, residues) = amplitude::evaluate(
        signal,
        kappa,
        &candidates,
        config.discspec_type,
        &mut diagnostics,
    );
    match config.discspec_type {
        DiscreteSpectrumType::NormingConstants => {
            if let Some(nc) = norming {
                amplitudes_out[..count].copy_from_slice(&nc);
            }
        }
        DiscreteSpectrumType::Residues => {
            if let Some(res) = residues {
                amplitudes_out[..count].copy_from_slice(&res);
            }
        }
        DiscreteSpectrumType::Both => {
            if let Some(nc) = norming {
                amplitudes_out[..count].copy_from_slice(&nc);
            }
            if let Some(res) = residues {
                amplitudes_out[capacity..capacity + count].copy_from_slice(&res);
            }
        }
    }

    Ok((count, diagnostics))
}

/// Owning wrapper around [`discrete_spectrum_into`] with an explicit
/// capacity.
pub fn discrete_spectrum(
    signal: &Signal,
    kappa: f64,
    config: &SpectrumConfig,
    guesses: Option<&[Complex64]>,
    capacity: usize,
) -> SpectrumResult<DiscreteSpectrum> {
    let zero = Complex64::new(0.0, 0.0);
    let mut states = vec![zero; capacity];
    let mut amps = vec![zero; amplitude_blocks(config.discspec_type) * capacity];
    let (count, diagnostics) =
        discrete_spectrum_into(signal, kappa, config, guesses, &mut states, &mut amps)?;

    states.truncate(count);
    let (norming_constants, residues) = match config.discspec_type {
        DiscreteSpectrumType::NormingConstants => (Some(amps[..count].to_vec()), None),
        DiscreteSpectrumType::Residues => (None, Some(amps[..count].to_vec())),
        DiscreteSpectrumType::Both => (
            Some(amps[..count].to_vec()),
            Some(amps[capacity..capacity + count].to_vec()),
        ),
    };
    Ok(DiscreteSpectrum {
        bound_states: states,
        norming_constants,
        residues,
        diagnostics,
    })
}
