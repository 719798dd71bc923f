use crate::Error;
use crate::fdtd::{Boundary, LossProfile};

/// Absorbs through a lossy layer reaching from `start` to the right edge.
///
/// Only the right side is damped. The left edge is left untouched and acts
/// as a perfect conductor, so pulses reaching it come back inverted.
#[derive(Clone, Debug)]
pub struct GradedAbsorber {
    pub start: usize,
    pub loss: f64,
}

impl GradedAbsorber {
    #[inline]
    pub fn new(start: usize, loss: f64) -> Self {
        Self { start, loss }
    }
}

impl Boundary for GradedAbsorber {
    fn loss_profile(&self, npoints: usize) -> Result<Option<LossProfile>, Error> {
        LossProfile::step(npoints, self.start, self.loss).map(Some)
    }

    // the loss is already in the update coefficients
    #[inline]
    fn apply(&mut self, _ez: ndarray::ArrayViewMut1<f64>) {}
}
