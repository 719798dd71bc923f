//! Includes commonly used library components.

pub use crate::{
    DisplaySettings,
    Error,
    FieldSnapshot,
    Phase,
    RunDescriptor,
    Simulation,
    SimulationDescriptor,
    SimulationParameters,
    SimulationState,
    Solver,
};
pub use crate::fdtd::{Boundary, Source};
pub use crate::medium::{Layer, Medium, MediumDescriptor};
pub use crate::probe::Probe;
pub use crate::spectrum::{Spectrum, SpectrumDescriptor};
