pub mod components;

mod coefficients;
mod fdtd_solver;

pub use coefficients::{LossProfile, UpdateCoefficients};
pub use fdtd_solver::{
    FdtdSolver, FdtdSolverDescriptor, INJECTION_SPACE_OFFSET, INJECTION_TIME_OFFSET,
};

use crate::Error;
use crate::medium::Medium;
use crate::SimulationParameters;

/// Generates the excitation injected into the grid as a soft source.
pub trait Source {
    /// Excitation at fractional cell offset `space_offset` from the source
    /// cell and at (possibly fractional) time index `time`.
    fn value(&self, space_offset: f64, time: f64) -> f64;
}

/// Handles the treatment of the two ends of the grid.
pub trait Boundary {
    /// Loss to blend into the update coefficients, if the boundary absorbs
    /// through a lossy region rather than an edge formula.
    fn loss_profile(&self, _npoints: usize) -> Result<Option<LossProfile>, Error> {
        Ok(None)
    }

    /// Prepares any edge state from the material next to the edges.
    fn init(&mut self, _medium: &Medium, _sim_params: &SimulationParameters) {}

    /// Captures edge state from the starting electric field.
    fn prime(&mut self, _ez: ndarray::ArrayView1<f64>) {}

    /// Corrects `ez[0]` and `ez[n-1]` after the interior electric update.
    fn apply(&mut self, ez: ndarray::ArrayViewMut1<f64>);
}
