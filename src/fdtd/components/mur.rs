use crate::SimulationParameters;
use crate::fdtd::Boundary;
use crate::medium::Medium;

/// First-order analytic absorbing boundary at both ends of the grid.
///
/// Each edge is extrapolated from its inner neighbour one step earlier,
/// `Ez[0] = Ez_old[1] + K*(Ez[1] - Ez[0])`, with
/// `K = (Sc/n - 1) / (Sc/n + 1)` for the refractive index `n` at that edge.
#[derive(Clone, Debug, Default)]
pub struct MurBoundary {
    k_left: f64,
    k_right: f64,
    old_left: f64,
    old_right: f64,
}

impl MurBoundary {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reflection coefficients at the left and right edges.
    #[inline]
    pub fn coefficients(&self) -> (f64, f64) {
        (self.k_left, self.k_right)
    }
}

fn edge_coefficient(courant: f64, eps: f64, mu: f64) -> f64 {
    let ratio = courant / f64::sqrt(eps * mu);
    (ratio - 1.0) / (ratio + 1.0)
}

impl Boundary for MurBoundary {
    fn init(&mut self, medium: &Medium, sim_params: &SimulationParameters) {
        let eps = medium.permittivity();
        let mu = medium.permeability();
        let courant = sim_params.courant;

        self.k_left = edge_coefficient(courant, eps[0], mu[0]);
        self.k_right = edge_coefficient(courant, eps[eps.len() - 1], mu[mu.len() - 1]);
        self.old_left = 0.0;
        self.old_right = 0.0;
        log::debug!("Mur boundary coefficients: left {}, right {}", self.k_left, self.k_right);
    }

    fn prime(&mut self, ez: ndarray::ArrayView1<f64>) {
        let last = ez.len() - 1;
        self.old_left = ez[1];
        self.old_right = ez[last - 1];
    }

    fn apply(&mut self, mut ez: ndarray::ArrayViewMut1<f64>) {
        let last = ez.len() - 1;
        let (first, inner_left) = (ez[0], ez[1]);
        let (end, inner_right) = (ez[last], ez[last - 1]);

        ez[0] = self.old_left + self.k_left * (inner_left - first);
        self.old_left = inner_left;
        ez[last] = self.old_right + self.k_right * (inner_right - end);
        self.old_right = inner_right;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::medium::{Layer, MediumDescriptor};
    use approx::assert_relative_eq;

    fn boundary(eps_right: f64, courant: f64) -> MurBoundary {
        let medium = Medium::new(MediumDescriptor {
            npoints: 6,
            permittivity: vec![Layer::new(0, 3, 1.0), Layer::new(3, 6, eps_right)],
            permeability: vec![Layer::new(0, 5, 1.0)],
        })
        .unwrap();
        let mut boundary = MurBoundary::new();
        boundary.init(&medium, &SimulationParameters::new(0.01, courant).unwrap());
        boundary
    }

    #[test]
    fn coefficients_from_edge_material() {
        let boundary = boundary(4.0, 1.0);
        let (k_left, k_right) = boundary.coefficients();
        assert_eq!(k_left, 0.0);
        assert_relative_eq!(k_right, (0.5 - 1.0) / (0.5 + 1.0));
    }

    #[test]
    fn matched_vacuum_edge_copies_previous_neighbour() {
        let mut boundary = boundary(1.0, 1.0);
        let mut ez = ndarray::arr1(&[0.0, 0.3, 0.0, 0.0, 0.7, 0.0]);

        boundary.apply(ez.view_mut());
        // previous neighbours were zero
        assert_eq!(ez[0], 0.0);
        assert_eq!(ez[5], 0.0);

        ez[1] = 0.1;
        ez[4] = 0.2;
        boundary.apply(ez.view_mut());
        assert_eq!(ez[0], 0.3);
        assert_eq!(ez[5], 0.7);
    }

    #[test]
    fn primed_edges_start_from_initial_neighbours() {
        let mut boundary = boundary(1.0, 1.0);
        let mut ez = ndarray::arr1(&[0.0, 1.0, 0.0, 0.0, -2.0, 0.0]);
        boundary.prime(ez.view());

        boundary.apply(ez.view_mut());
        assert_eq!(ez[0], 1.0);
        assert_eq!(ez[5], -2.0);
    }

    #[test]
    fn edges_read_before_either_write() {
        let mut boundary = boundary(4.0, 1.0);
        let k = (0.5 - 1.0) / (0.5 + 1.0);
        let mut ez = ndarray::arr1(&[1.0, 2.0, 0.0, 0.0, 3.0, 4.0]);

        boundary.apply(ez.view_mut());
        assert_relative_eq!(ez[0], 0.0);
        assert_relative_eq!(ez[5], k * (3.0 - 4.0));

        boundary.apply(ez.view_mut());
        assert_relative_eq!(ez[0], 2.0);
        assert_relative_eq!(ez[5], 3.0 + k * (3.0 - k * (3.0 - 4.0)));
    }
}
