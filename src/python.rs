use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{stats, Particle, ParticleContainer, SpeedHistogram, DIM};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn to_vec2(values: Vec<f64>, what: &str) -> PyResult<[f64; DIM]> {
    <[f64; DIM]>::try_from(values)
        .map_err(|_| py_err(format!("{what} must have length {DIM}")))
}

/// IdealGas Python-facing wrapper around the Rust particle container.
///
/// API:
/// - __new__(width, height, time_step=1.0, neighbor_window=10)
/// - add_particle(type_name, position, velocity, mass, radius)
/// - increment() -> (particle_collisions, wall_reflections, degenerate_pairs)
/// - get_positions() / get_velocities() -> np.ndarray, shape (N, 2)
#[pyclass]
pub struct IdealGas {
    container: ParticleContainer,
}

#[pymethods]
impl IdealGas {
    /// Create an empty arena.
    ///
    /// Errors: raises ValueError on a zero-sized arena, a non-positive time step or a
    /// zero neighbor window.
    #[new]
    #[pyo3(signature = (width, height, time_step=1.0, neighbor_window=10))]
    fn new(width: u32, height: u32, time_step: f64, neighbor_window: usize) -> PyResult<Self> {
        let container = ParticleContainer::new(width, height)
            .and_then(|c| c.with_time_step(time_step))
            .and_then(|c| c.with_neighbor_window(neighbor_window))
            .map_err(py_err)?;
        Ok(Self { container })
    }

    /// Add one particle. `position` and `velocity` are length-2 sequences.
    fn add_particle(
        &mut self,
        type_name: String,
        position: Vec<f64>,
        velocity: Vec<f64>,
        mass: f64,
        radius: f64,
    ) -> PyResult<()> {
        let position = to_vec2(position, "position")?;
        let velocity = to_vec2(velocity, "velocity")?;
        let particle = Particle::new(type_name, position, velocity, mass, radius).map_err(py_err)?;
        self.container.add_particle(particle);
        Ok(())
    }

    /// Advance one tick (releases the GIL during computation).
    fn increment(&mut self, py: Python<'_>) -> (usize, usize, usize) {
        let s = py.detach(|| self.container.increment());
        (s.particle_collisions, s.wall_reflections, s.degenerate_pairs)
    }

    /// Advance `ticks` ticks and return the accumulated counts.
    fn run(&mut self, py: Python<'_>, ticks: usize) -> (usize, usize, usize) {
        let s = py.detach(|| self.container.run(ticks));
        (s.particle_collisions, s.wall_reflections, s.degenerate_pairs)
    }

    fn set_time_step(&mut self, time_step: f64) -> PyResult<()> {
        self.container.set_time_step(time_step).map_err(py_err)
    }

    fn get_time_step(&self) -> f64 {
        self.container.time_step()
    }

    fn __len__(&self) -> usize {
        self.container.len()
    }

    /// Return positions as a NumPy array of shape (N, 2), dtype=float64.
    ///
    /// Row order follows the container's last sort and changes on every tick.
    fn get_positions<'py>(&self, py: Python<'py>) -> Py<PyArray2<f64>> {
        self.state_array(py, Particle::position)
    }

    /// Return velocities as a NumPy array of shape (N, 2), dtype=float64.
    fn get_velocities<'py>(&self, py: Python<'py>) -> Py<PyArray2<f64>> {
        self.state_array(py, Particle::velocity)
    }

    /// Species name per row, matching `get_positions` order.
    fn get_type_names(&self) -> Vec<String> {
        self.container
            .particles()
            .iter()
            .map(|p| p.type_name().to_owned())
            .collect()
    }

    fn get_kinetic_energy(&self) -> f64 {
        self.container.kinetic_energy()
    }

    /// Speed histogram for one species (or all particles when `type_name` is None).
    ///
    /// Returns: (edges, counts) as NumPy arrays of length bins+1 and bins.
    #[pyo3(signature = (bins=10, type_name=None, range=None))]
    fn get_speed_histogram<'py>(
        &self,
        py: Python<'py>,
        bins: usize,
        type_name: Option<String>,
        range: Option<(f64, f64)>,
    ) -> PyResult<(Py<PyArray1<f64>>, Py<PyArray1<f64>>)> {
        let speeds: Vec<f64> = match type_name {
            Some(name) => stats::speeds_by_species(&[name], self.container.particles())
                .into_iter()
                .flat_map(|(_, s)| s)
                .collect(),
            None => self.container.particles().iter().map(Particle::speed).collect(),
        };
        let hist = SpeedHistogram::from_values(&speeds, bins, range).map_err(py_err)?;
        Ok((
            hist.edges.into_pyarray(py).unbind(),
            hist.counts.into_pyarray(py).unbind(),
        ))
    }
}

impl IdealGas {
    fn state_array(&self, py: Python<'_>, field: fn(&Particle) -> [f64; DIM]) -> Py<PyArray2<f64>> {
        let particles = self.container.particles();
        let mut arr = Array2::<f64>::zeros((particles.len(), DIM));
        for (i, p) in particles.iter().enumerate() {
            for (k, value) in field(p).into_iter().enumerate() {
                arr[[i, k]] = value;
            }
        }
        arr.into_pyarray(py).unbind()
    }
}

/// The idealgas Python module entry point.
#[pymodule]
fn idealgas(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<IdealGas>()?;
    Ok(())
}
