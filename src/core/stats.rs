//! Diagnostics over particle state: energy, momentum, temperature and speed histograms.
//!
//! These are read-only views intended for the external layer that plots the speed
//! distribution of each species; nothing here feeds back into the engine.

use crate::core::geometry::{Vec2, DIM};
use crate::core::Particle;
use crate::error::{Error, Result};

/// Total kinetic energy of `particles`.
pub fn kinetic_energy(particles: &[Particle]) -> f64 {
    particles.iter().map(Particle::kinetic_energy).sum()
}

/// Total linear momentum of `particles`.
pub fn momentum(particles: &[Particle]) -> Vec2 {
    let mut total = [0.0_f64; DIM];
    for p in particles {
        for (t, pk) in total.iter_mut().zip(p.momentum()) {
            *t += pk;
        }
    }
    total
}

/// Kinetic temperature in 2D with k_B = 1: mean kinetic energy per particle.
///
/// Errors: `Error::InsufficientSamples` for an empty slice.
pub fn temperature(particles: &[Particle]) -> Result<f64> {
    if particles.is_empty() {
        return Err(Error::InsufficientSamples(
            "temperature needs at least one particle".into(),
        ));
    }
    Ok(kinetic_energy(particles) / particles.len() as f64)
}

/// Speeds grouped by species, in the order of `species`.
///
/// Species with no particles yield an empty list; particles of unlisted species are
/// ignored.
pub fn speeds_by_species(species: &[String], particles: &[Particle]) -> Vec<(String, Vec<f64>)> {
    species
        .iter()
        .map(|name| {
            let speeds = particles
                .iter()
                .filter(|p| p.type_name() == name)
                .map(Particle::speed)
                .collect();
            (name.clone(), speeds)
        })
        .collect()
}

/// Equal-width histogram of scalar samples (typically speeds).
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedHistogram {
    /// Bin edges, `bins + 1` entries.
    pub edges: Vec<f64>,
    /// Sample count per bin.
    pub counts: Vec<f64>,
}

impl SpeedHistogram {
    /// Bin `values` into `bins` equal-width bins over `range`, or over the data's
    /// min..max when `range` is `None`.
    ///
    /// Values equal to the upper edge land in the last bin. With an explicit range,
    /// values outside it are dropped. If every sample is identical the single value
    /// fills the first bin of a unit-width range.
    ///
    /// Errors:
    /// - `Error::InvalidParam` for `bins == 0` or a non-finite/inverted range
    /// - `Error::InsufficientSamples` for empty `values`
    pub fn from_values(values: &[f64], bins: usize, range: Option<(f64, f64)>) -> Result<Self> {
        if bins == 0 {
            return Err(Error::InvalidParam("bins must be >= 1".into()));
        }
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Err(Error::InsufficientSamples(
                "histogram needs at least one finite value".into(),
            ));
        }

        let (lo, hi) = match range {
            Some((lo, hi)) => {
                if !lo.is_finite() || !hi.is_finite() || hi <= lo {
                    return Err(Error::InvalidParam(format!(
                        "histogram range ({lo}, {hi}) must be finite with min < max"
                    )));
                }
                (lo, hi)
            }
            None => {
                let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
                let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                if hi > lo {
                    (lo, hi)
                } else {
                    (lo, lo + 1.0)
                }
            }
        };

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|k| lo + width * k as f64).collect();
        let mut counts = vec![0.0_f64; bins];
        for v in finite {
            if v < lo || v > hi {
                continue;
            }
            let bin = (((v - lo) / width) as usize).min(bins - 1);
            counts[bin] += 1.0;
        }
        Ok(Self { edges, counts })
    }

    #[inline]
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Number of samples that were binned.
    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }

    /// Counts divided by the tallest bin, so the peak is 1. All-zero stays all-zero.
    pub fn normalized(&self) -> Vec<f64> {
        let peak = self.counts.iter().copied().fold(0.0_f64, f64::max);
        if peak <= 0.0 {
            return vec![0.0; self.counts.len()];
        }
        self.counts.iter().map(|c| c / peak).collect()
    }
}
