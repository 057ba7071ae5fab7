//! Discrete-step 2D ideal gas.
//!
//! A [`ParticleContainer`] holds circular particles inside a rectangular arena and
//! advances them one tick at a time with [`ParticleContainer::increment`]: elastic
//! particle-particle collisions first, then wall reflections and integration.
//!
//! ```
//! use idealgas::{Particle, ParticleContainer};
//!
//! # fn main() -> idealgas::error::Result<()> {
//! let mut gas = ParticleContainer::new(100, 100)?;
//! gas.add_particle(Particle::new("Helium", [2.0, 1.0], [0.0, -1.0], 1.0, 1.0)?);
//! gas.increment();
//! assert_eq!(gas.particles()[0].velocity(), [0.0, 1.0]);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;

#[cfg(feature = "python")]
mod python;

pub use crate::config::{PopulationConfig, SimulationConfig};
pub use crate::core::{Particle, ParticleContainer, SpeedHistogram, TickSummary, Tint};
