//! A framework for simulating 1-dimensional electromagnetic pulse propagation
//! through layered dielectrics with the finite-difference time-domain method.
//!
//! To get started, refer to the `demos` directory in the main repository.

mod simulation;

pub mod fdtd;
pub mod medium;
pub mod prelude;
pub mod probe;
pub mod spectrum;

pub use simulation::{
    DisplaySettings, FieldSnapshot, Phase, RunDescriptor, Simulation, SimulationDescriptor,
    SimulationParameters, SimulationState,
};

/// Speed of light in vacuum [m / s].
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
/// Wave impedance of free space used by the update equations [Ω].
pub const FREE_SPACE_IMPEDANCE: f64 = 120.0 * std::f64::consts::PI;

/// Represents an error in the simulation.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Init {array_name} array does not have expected length \
        ( {array_name} array length: {input_length}, \
        expected length: {expected_length} )")]
    BadInit {
        array_name: String,
        input_length: usize,
        expected_length: usize,
    },
    #[error("{array_name} must be positive everywhere ( value {value} at index {index} )")]
    NonPositiveMaterial {
        array_name: String,
        index: usize,
        value: f64,
    },
    #[error("{array_name} layers must tile the grid without gaps or overlaps \
        ( expected boundary at {expected}, found {found} )")]
    LayerTiling {
        array_name: String,
        expected: usize,
        found: usize,
    },
    #[error("Courant number must lie in (0, 1], got {0}")]
    InvalidCourant(f64),
    #[error("Invalid {name}: {value}")]
    InvalidParameter { name: String, value: f64 },
    #[error("Source position {position} must lie in [1, {max}]")]
    SourceOutOfRange { position: usize, max: usize },
    #[error("Probe position {position} must be less than {limit}")]
    ProbeOutOfRange { position: usize, limit: usize },
    #[error("Loss layer start {start} must lie in [1, {max}]")]
    LossLayerOutOfRange { start: usize, max: usize },
    #[error("Probe at {position} is full ( capacity: {capacity} )")]
    ProbeFull { position: usize, capacity: usize },
    #[error("Simulation already completed all {max_time} time steps")]
    SimulationCompleted { max_time: usize },
    #[error("Signal of length {length} does not fit a transform of size {size}")]
    SignalTooLong { length: usize, size: usize },
    #[error("Spectra are not aligned ( sizes {left} and {right}, or differing resolution )")]
    MismatchedSpectra { left: usize, right: usize },
    #[error("No frequency bins between {f_min} Hz and {f_max} Hz")]
    EmptyBand { f_min: f64, f_max: f64 },
}

/// Advances the fields on the grid by one time step.
pub trait Solver {
    /// Applies the full update for time index `q` to `ez` and `hy` in place.
    fn step(
        &mut self,
        q: usize,
        ez: ndarray::ArrayViewMut1<f64>,
        hy: ndarray::ArrayViewMut1<f64>,
    );

    /// Called once with the starting fields before the first step.
    fn prime(&mut self, _state: &SimulationState) {}

    fn npoints(&self) -> usize;

    fn sim_params(&self) -> &SimulationParameters;
}
