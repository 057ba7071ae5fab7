//! Configuration types for loading an arena and its particle populations from JSON.
//!
//! ```json
//! {
//!   "container": { "width": 600, "height": 500, "time_step": 1.0,
//!                  "neighbor_window": 10, "max_radius": 100.0 },
//!   "histogram": { "bin_count": 10 },
//!   "particles": [
//!     { "name": "Helium", "count": 100,
//!       "min_velocity": 0.5, "max_velocity": 2.0,
//!       "min_mass": 1.0, "max_mass": 2.0,
//!       "min_radius": 2.0, "max_radius": 4.0,
//!       "color": "0xFF8800" }
//!   ]
//! }
//! ```
//!
//! Everything except `container.width`/`container.height` and the population ranges has
//! a default. Validation happens before any particle is generated, so a bad population
//! never leaves a half-filled container behind.

use crate::core::{Particle, ParticleContainer, Tint, DEFAULT_NEIGHBOR_WINDOW, DEFAULT_TIME_STEP};
use crate::error::{Error, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::path::Path;

/// Largest particle radius accepted unless the configuration overrides it.
pub const DEFAULT_MAX_RADIUS: f64 = 100.0;

/// Default number of histogram bins per species.
pub const DEFAULT_BIN_COUNT: usize = 10;

fn default_time_step() -> f64 {
    DEFAULT_TIME_STEP
}

fn default_neighbor_window() -> usize {
    DEFAULT_NEIGHBOR_WINDOW
}

fn default_max_radius() -> f64 {
    DEFAULT_MAX_RADIUS
}

fn default_bin_count() -> usize {
    DEFAULT_BIN_COUNT
}

fn default_color() -> String {
    "0xFFFFFF".to_string()
}

/// Arena geometry and engine tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerConfig {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_time_step")]
    pub time_step: f64,
    /// Broad-phase look-ahead: x-sorted successors tested per particle.
    #[serde(default = "default_neighbor_window")]
    pub neighbor_window: usize,
    /// Upper bound on any population's `max_radius`.
    #[serde(default = "default_max_radius")]
    pub max_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramConfig {
    #[serde(default = "default_bin_count")]
    pub bin_count: usize,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            bin_count: DEFAULT_BIN_COUNT,
        }
    }
}

/// One species and the ranges its particles are sampled from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    pub name: String,
    pub count: usize,
    pub min_velocity: f64,
    pub max_velocity: f64,
    pub min_mass: f64,
    pub max_mass: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Initial tint as `0xRRGGBB`.
    #[serde(default = "default_color")]
    pub color: String,
}

impl PopulationConfig {
    /// Check ranges, the radius limit and that the arena can hold the largest particle.
    ///
    /// Errors:
    /// - `Error::RadiusTooLarge` if `max_radius` exceeds `radius_limit`
    /// - `Error::InvalidParam` for empty names, inverted or non-positive ranges,
    ///   unparsable colors, or an arena narrower than the largest diameter
    pub fn validate(&self, radius_limit: f64, width: u32, height: u32) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidParam("population name must not be empty".into()));
        }
        if self.max_radius > radius_limit {
            return Err(Error::RadiusTooLarge {
                radius: self.max_radius,
                limit: radius_limit,
            });
        }
        check_range(&self.name, "velocity", self.min_velocity, self.max_velocity, true)?;
        check_range(&self.name, "mass", self.min_mass, self.max_mass, false)?;
        check_range(&self.name, "radius", self.min_radius, self.max_radius, false)?;
        let smaller_side = f64::from(width.min(height));
        if 2.0 * self.max_radius > smaller_side {
            return Err(Error::InvalidParam(format!(
                "population '{}': diameter {} does not fit a {}x{} arena",
                self.name,
                2.0 * self.max_radius,
                width,
                height
            )));
        }
        Tint::from_hex(&self.color)?;
        Ok(())
    }

    /// Sample `count` particles inside a `width` x `height` arena.
    ///
    /// Mass, radius and speed are uniform over their ranges; the direction of motion is
    /// uniform on the circle and the center is uniform over the positions that keep the
    /// whole particle inside the walls. Call [`validate`](Self::validate) first.
    pub fn generate<R: Rng>(&self, width: u32, height: u32, rng: &mut R) -> Result<Vec<Particle>> {
        let tint = Tint::from_hex(&self.color)?;
        let (w, h) = (f64::from(width), f64::from(height));
        (0..self.count)
            .map(|_| {
                let mass = rng.random_range(self.min_mass..=self.max_mass);
                let radius = rng.random_range(self.min_radius..=self.max_radius);
                let speed = rng.random_range(self.min_velocity..=self.max_velocity);
                let angle = rng.random_range(0.0..TAU);
                let position = [
                    rng.random_range(radius..=w - radius),
                    rng.random_range(radius..=h - radius),
                ];
                let velocity = [speed * angle.cos(), speed * angle.sin()];
                Particle::new(self.name.as_str(), position, velocity, mass, radius)
                    .map(|p| p.with_tint(tint))
            })
            .collect()
    }
}

fn check_range(name: &str, what: &str, lo: f64, hi: f64, allow_zero: bool) -> Result<()> {
    if !lo.is_finite() || !hi.is_finite() {
        return Err(Error::InvalidParam(format!(
            "population '{name}': {what} range must be finite"
        )));
    }
    let lo_ok = if allow_zero { lo >= 0.0 } else { lo > 0.0 };
    if !lo_ok {
        return Err(Error::InvalidParam(format!(
            "population '{name}': min {what} must be {}",
            if allow_zero { ">= 0" } else { "> 0" }
        )));
    }
    if hi < lo {
        return Err(Error::InvalidParam(format!(
            "population '{name}': max {what} ({hi}) is below min {what} ({lo})"
        )));
    }
    Ok(())
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub container: ContainerConfig,
    #[serde(default)]
    pub histogram: HistogramConfig,
    #[serde(default)]
    pub particles: Vec<PopulationConfig>,
}

impl SimulationConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        let c = &self.container;
        if c.width == 0 || c.height == 0 {
            return Err(Error::InvalidParam(
                "container width and height must be > 0".into(),
            ));
        }
        if !c.time_step.is_finite() || c.time_step <= 0.0 {
            return Err(Error::InvalidParam(
                "container time_step must be finite and > 0".into(),
            ));
        }
        if c.neighbor_window == 0 {
            return Err(Error::InvalidParam(
                "container neighbor_window must be >= 1".into(),
            ));
        }
        if !c.max_radius.is_finite() || c.max_radius <= 0.0 {
            return Err(Error::InvalidParam(
                "container max_radius must be finite and > 0".into(),
            ));
        }
        if self.histogram.bin_count == 0 {
            return Err(Error::InvalidParam("histogram bin_count must be >= 1".into()));
        }
        for pop in &self.particles {
            pop.validate(c.max_radius, c.width, c.height)?;
        }
        Ok(())
    }

    /// Build a container and fill it with every population.
    ///
    /// `seed` makes population sampling reproducible; `None` seeds from the thread RNG.
    pub fn build_container(&self, seed: Option<u64>) -> Result<ParticleContainer> {
        self.validate()?;
        let c = &self.container;
        let mut container = ParticleContainer::new(c.width, c.height)?
            .with_time_step(c.time_step)?
            .with_neighbor_window(c.neighbor_window)?;

        let mut rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rand::rng().random()),
        };
        for pop in &self.particles {
            container.add_population(pop, c.max_radius, &mut rng)?;
        }
        Ok(container)
    }
}
