use crate::{Error, SimulationParameters, SimulationState, Solver, FREE_SPACE_IMPEDANCE};
use crate::fdtd::{Boundary, Source, UpdateCoefficients};
use crate::medium::Medium;

/// Cell offset of the electric field correction, relative to the source cell.
pub const INJECTION_SPACE_OFFSET: f64 = -0.5;
/// Time offset of the electric field correction, relative to the step index.
pub const INJECTION_TIME_OFFSET: f64 = 0.5;

/// Describes the composition of an `FdtdSolver`.
pub struct FdtdSolverDescriptor {
    pub medium: Medium,
    pub sim_params: SimulationParameters,
    pub source: Box<dyn Source>,
    /// Electric node the source is injected into.
    pub source_position: usize,
    pub boundary: Box<dyn Boundary>,
}

/// Does single threaded leapfrog updates on the CPU.
pub struct FdtdSolver {
    medium: Medium,
    sim_params: SimulationParameters,
    coeffs: UpdateCoefficients,
    source: Box<dyn Source>,
    source_position: usize,
    h_injection: f64,
    e_injection: f64,
    boundary: Box<dyn Boundary>,
}

impl FdtdSolver {
    pub fn new(desc: FdtdSolverDescriptor) -> Result<Self, Error> {
        let FdtdSolverDescriptor {
            medium,
            sim_params,
            source,
            source_position,
            mut boundary,
        } = desc;
        let npoints = medium.npoints();

        if source_position < 1 || source_position + 2 > npoints {
            return Err(Error::SourceOutOfRange {
                position: source_position,
                max: npoints.saturating_sub(2),
            });
        }

        let courant = sim_params.courant;
        let stability_limit = medium.min_refractive_index();
        log::debug!(
            "refractive index ranges from {} to {}",
            stability_limit,
            medium.max_refractive_index(),
        );
        if courant > stability_limit {
            log::warn!(
                "Courant number {} exceeds the stability limit {} of this medium",
                courant,
                stability_limit,
            );
        }

        let loss = boundary.loss_profile(npoints)?;
        let coeffs = UpdateCoefficients::new(&medium, courant, loss.as_ref())?;
        boundary.init(&medium, &sim_params);

        let eps = medium.permittivity();
        let mu = medium.permeability();
        let h_injection = courant / (FREE_SPACE_IMPEDANCE * mu[source_position - 1]);
        let e_injection = courant / f64::sqrt(eps[source_position] * mu[source_position]);
        log::debug!(
            "source at node {} ( H injection {:e}, E injection {} )",
            source_position,
            h_injection,
            e_injection,
        );

        Ok(Self {
            medium,
            sim_params,
            coeffs,
            source,
            source_position,
            h_injection,
            e_injection,
            boundary,
        })
    }

}

impl Solver for FdtdSolver {
    fn step(
        &mut self,
        q: usize,
        mut ez: ndarray::ArrayViewMut1<f64>,
        mut hy: ndarray::ArrayViewMut1<f64>,
    ) {
        let t = q as f64;

        // magnetic field at every half-node
        ndarray::Zip::from(&mut hy)
            .and(ez.windows(2))
            .and(&self.coeffs.chyh)
            .and(&self.coeffs.chye)
            .for_each(|h, e, &chyh, &chye| {
                *h = chyh * *h + chye * (e[1] - e[0]);
            });

        // total-field / scattered-field correction on either side of the source
        let src = self.source_position;
        hy[src - 1] -= self.h_injection * self.source.value(0.0, t);
        ez[src] += self.e_injection
            * self.source.value(INJECTION_SPACE_OFFSET, t + INJECTION_TIME_OFFSET);

        // electric field at interior nodes
        let npoints = ez.len();
        ndarray::Zip::from(ez.slice_mut(ndarray::s![1..npoints - 1]))
            .and(hy.windows(2))
            .and(self.coeffs.ceze.slice(ndarray::s![1..npoints - 1]))
            .and(self.coeffs.cezh.slice(ndarray::s![1..npoints - 1]))
            .for_each(|e, h, &ceze, &cezh| {
                *e = ceze * *e + cezh * (h[1] - h[0]);
            });

        self.boundary.apply(ez);
    }

    fn prime(&mut self, state: &SimulationState) {
        self.boundary.prime(state.ez.view());
    }

    #[inline]
    fn npoints(&self) -> usize {
        self.medium.npoints()
    }

    #[inline]
    fn sim_params(&self) -> &SimulationParameters {
        &self.sim_params
    }
}
