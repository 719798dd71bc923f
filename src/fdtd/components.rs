//! Sources and boundaries.

mod gaussian;
mod graded_absorber;
mod mur;

pub use gaussian::{
    GaussianPulse, GaussianPulseDescriptor, ModulatedGaussianPulse,
    ModulatedGaussianPulseDescriptor,
};
pub use graded_absorber::GradedAbsorber;
pub use mur::MurBoundary;
