use crate::config::PopulationConfig;
use crate::core::collision::{TickSummary, Wall};
use crate::core::geometry::{add_scaled, dot, norm_sq, sub, Vec2};
use crate::core::particle::{Particle, Tint};
use crate::core::stats;
use crate::error::{Error, Result};
use ordered_float::OrderedFloat;
use rand::Rng;

/// Default number of x-sorted successors checked for each particle.
pub const DEFAULT_NEIGHBOR_WINDOW: usize = 10;

/// Default integration step multiplier.
pub const DEFAULT_TIME_STEP: f64 = 1.0;

/// Squared center distance below which a pair has no usable contact normal.
const EPS_DIST_SQ: f64 = 1e-12;

/// Rectangular arena owning every particle of the gas.
///
/// Walls sit at x = 0, x = `width`, y = 0 and y = `height`. The particle sequence is
/// reordered by position at the start of every tick, so indices into [`particles`]
/// are only meaningful until the next call to [`increment`].
///
/// [`particles`]: ParticleContainer::particles
/// [`increment`]: ParticleContainer::increment
#[derive(Debug, Clone)]
pub struct ParticleContainer {
    width: u32,
    height: u32,
    time_step: f64,
    neighbor_window: usize,
    particles: Vec<Particle>,
    species: Vec<String>,
}

impl ParticleContainer {
    /// Create an empty arena of the given size with the default time step and window.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidParam(
                "arena width and height must be > 0".into(),
            ));
        }
        Ok(Self {
            width,
            height,
            time_step: DEFAULT_TIME_STEP,
            neighbor_window: DEFAULT_NEIGHBOR_WINDOW,
            particles: Vec::new(),
            species: Vec::new(),
        })
    }

    pub fn with_time_step(mut self, time_step: f64) -> Result<Self> {
        self.set_time_step(time_step)?;
        Ok(self)
    }

    pub fn with_neighbor_window(mut self, window: usize) -> Result<Self> {
        self.set_neighbor_window(window)?;
        Ok(self)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Set the velocity multiplier used during integration (finite, > 0).
    pub fn set_time_step(&mut self, time_step: f64) -> Result<()> {
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(Error::InvalidParam(
                "time_step must be finite and > 0".into(),
            ));
        }
        self.time_step = time_step;
        Ok(())
    }

    #[inline]
    pub fn neighbor_window(&self) -> usize {
        self.neighbor_window
    }

    /// Set how many x-sorted successors each particle is tested against (>= 1).
    pub fn set_neighbor_window(&mut self, window: usize) -> Result<()> {
        if window == 0 {
            return Err(Error::InvalidParam("neighbor_window must be >= 1".into()));
        }
        self.neighbor_window = window;
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Read-only view of the particles in their current (last sorted) order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Owned copy of the current state, for readers that outlive the next tick.
    pub fn snapshot(&self) -> Vec<Particle> {
        self.particles.clone()
    }

    /// Species names in first-insertion order.
    #[inline]
    pub fn species(&self) -> &[String] {
        &self.species
    }

    pub fn add_particle(&mut self, particle: Particle) {
        self.register_species(particle.type_name());
        self.particles.push(particle);
    }

    /// Add every particle from `particles`; returns how many were added.
    pub fn add_particles<I>(&mut self, particles: I) -> usize
    where
        I: IntoIterator<Item = Particle>,
    {
        let before = self.particles.len();
        for p in particles {
            self.add_particle(p);
        }
        self.particles.len() - before
    }

    /// Validate `population` against `max_radius`, then sample and add its particles.
    ///
    /// Nothing is added when validation fails.
    pub fn add_population<R: Rng>(
        &mut self,
        population: &PopulationConfig,
        max_radius: f64,
        rng: &mut R,
    ) -> Result<usize> {
        population.validate(max_radius, self.width, self.height)?;
        let generated = population.generate(self.width, self.height, rng)?;
        // An empty population still names a species.
        self.register_species(&population.name);
        let added = self.add_particles(generated);
        log::info!(
            "added {} '{}' particles ({} total)",
            added,
            population.name,
            self.particles.len()
        );
        Ok(added)
    }

    /// Replace the whole particle sequence. Species seen before are kept.
    pub fn set_particles(&mut self, particles: Vec<Particle>) {
        self.particles.clear();
        self.add_particles(particles);
    }

    /// Total kinetic energy of the gas.
    pub fn kinetic_energy(&self) -> f64 {
        stats::kinetic_energy(&self.particles)
    }

    /// Total linear momentum of the gas.
    pub fn momentum(&self) -> Vec2 {
        stats::momentum(&self.particles)
    }

    /// Advance the simulation by exactly one tick.
    ///
    /// Particle-particle collisions are resolved first, on pre-step positions; wall
    /// reflections and integration follow. An empty arena is a no-op.
    pub fn increment(&mut self) -> TickSummary {
        if self.particles.is_empty() {
            return TickSummary::default();
        }
        let mut summary = self.resolve_particle_collisions();
        summary.wall_reflections = self.resolve_walls_and_integrate();
        log::debug!(
            "tick: {} particle collisions, {} wall reflections, {} degenerate pairs",
            summary.particle_collisions,
            summary.wall_reflections,
            summary.degenerate_pairs
        );
        summary
    }

    /// Advance `ticks` ticks and return the accumulated summary.
    pub fn run(&mut self, ticks: usize) -> TickSummary {
        let mut total = TickSummary::default();
        for _ in 0..ticks {
            total += self.increment();
        }
        total
    }

    // ============ Internal helpers ============

    fn register_species(&mut self, name: &str) {
        if !self.species.iter().any(|s| s == name) {
            self.species.push(name.to_owned());
        }
    }

    /// Phase A: approximate broad phase over the x-sorted sequence.
    ///
    /// Pairs further apart than `neighbor_window` positions in x order are never tested,
    /// even if they overlap.
    fn resolve_particle_collisions(&mut self) -> TickSummary {
        self.particles.sort_by_key(|p| {
            let [x, y] = p.position();
            (OrderedFloat(x), OrderedFloat(y))
        });

        let mut summary = TickSummary::default();
        let n = self.particles.len();
        for i in 0..n {
            let last = i.saturating_add(self.neighbor_window).min(n - 1);
            for j in (i + 1)..=last {
                let (head, tail) = self.particles.split_at_mut(j);
                match resolve_pair(&mut head[i], &mut tail[0]) {
                    Ok(true) => summary.particle_collisions += 1,
                    Ok(false) => {}
                    Err(e) => {
                        log::trace!("skipping pair ({i}, {j}): {e}");
                        summary.degenerate_pairs += 1;
                    }
                }
            }
        }
        summary
    }

    /// Phase B: reflect off walls, then integrate every particle.
    fn resolve_walls_and_integrate(&mut self) -> usize {
        let bounds = [f64::from(self.width), f64::from(self.height)];
        let dt = self.time_step;
        let mut reflections = 0usize;
        for p in &mut self.particles {
            let hits = reflect_off_walls(p, &bounds);
            if hits > 0 {
                p.mark(Tint::WALL_HIT);
                reflections += hits;
            }
            let next = add_scaled(&p.position(), dt, &p.velocity());
            p.set_position(next);
        }
        reflections
    }
}

/// Apply the elastic collision response to `a` and `b` if they overlap and approach.
///
/// Returns `Ok(true)` when velocities changed and `Ok(false)` when the pair is not in
/// contact or is already separating. Positions are never modified.
///
/// Errors:
/// - `Error::DegenerateGeometry` if the centers coincide within tolerance.
pub(crate) fn resolve_pair(a: &mut Particle, b: &mut Particle) -> Result<bool> {
    let dx = sub(&a.position(), &b.position());
    let dist_sq = norm_sq(&dx);
    let r_sum = a.radius() + b.radius();
    if dist_sq > r_sum * r_sum {
        return Ok(false);
    }
    if dist_sq <= EPS_DIST_SQ {
        return Err(Error::DegenerateGeometry(format!(
            "centers {:?} and {:?} coincide",
            a.position(),
            b.position()
        )));
    }

    let (va, vb) = (a.velocity(), b.velocity());
    let approach = dot(&sub(&va, &vb), &dx);
    if approach >= 0.0 {
        // Touching but separating
        return Ok(false);
    }

    let (ma, mb) = (a.mass(), b.mass());
    let f = approach / dist_sq;
    let fa = 2.0 * mb / (ma + mb) * f;
    let fb = 2.0 * ma / (ma + mb) * f;
    a.set_velocity(add_scaled(&va, -fa, &dx));
    b.set_velocity(add_scaled(&vb, fb, &dx));
    a.mark(Tint::PARTICLE_HIT);
    b.mark(Tint::PARTICLE_HIT);
    Ok(true)
}

/// Negate each wall-normal velocity component whose wall the particle is touching and
/// approaching. Every test uses the velocity from before this call. Returns the number
/// of components flipped.
fn reflect_off_walls(p: &mut Particle, bounds: &Vec2) -> usize {
    let (x, v0, radius) = (p.position(), p.velocity(), p.radius());
    let mut v = v0;
    let mut hits = 0usize;
    for wall in Wall::ALL {
        let axis = wall.axis();
        let limit = if wall.is_max() { bounds[axis] } else { 0.0 };
        if wall.is_hit(x[axis], v0[axis], radius, limit) {
            v[axis] = -v0[axis];
            hits += 1;
        }
    }
    if hits > 0 {
        p.set_velocity(v);
    }
    hits
}
