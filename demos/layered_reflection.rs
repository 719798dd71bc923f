use fdtd1d::prelude::*;
use fdtd1d::fdtd::*;
use fdtd1d::spectrum::{gate_cutoff, time_gate};

fn main() {
    let courant = 1.0;
    let sim_params = SimulationParameters::new(0.00025, courant).unwrap(); // [m]
    let npoints = sim_params.npoints_for(0.5); // [m]
    let max_time = 6000;

    // dielectric layers
    let d1 = sim_params.npoints_for(0.04); // [m]
    let d2 = sim_params.npoints_for(0.08); // [m]
    let layer_start = npoints / 2;
    let layer_1 = layer_start + d1;
    let layer_2 = layer_1 + d2;

    let medium = Medium::new(MediumDescriptor {
        npoints,
        permittivity: vec![
            Layer::new(0, layer_start, 1.0),
            Layer::new(layer_start, layer_1, 1.5),
            Layer::new(layer_1, layer_2, 5.9),
            Layer::new(layer_2, npoints, 2.6),
        ],
        permeability: vec![Layer::new(0, npoints - 1, 1.0)],
    })
    .unwrap();

    let half_width = 60; // [steps]
    let period = 120.0; // [steps]
    let source_position = 50;
    let source = components::ModulatedGaussianPulse::new(
        components::ModulatedGaussianPulseDescriptor {
            delay: (2 * half_width + 20) as f64,
            width: half_width as f64,
            period,
            amplitude: 1.0,
            courant,
            eps: medium.permittivity()[source_position],
            mu: medium.permeability()[source_position],
        },
    )
    .unwrap();

    let mut simulation = Simulation::new(SimulationDescriptor {
        solver: FdtdSolver::new(FdtdSolverDescriptor {
            medium,
            sim_params,
            source: Box::new(source),
            source_position,
            boundary: Box::new(components::MurBoundary::new()),
        })
        .unwrap(),
        max_time,
        probes: vec![25, 75],
        init_state: None,
    })
    .unwrap();

    simulation.run(RunDescriptor {
        verbose: true,
        display: None,
    })
    .unwrap();

    let probes = simulation.into_probes();
    let reflected = probes[0].e().to_owned();
    let mut incident = probes[1].e().to_owned();

    // keep only the pulse and its travel time to the first layer
    time_gate(incident.view_mut(), gate_cutoff(half_width, layer_start, &sim_params));

    let reflected = Spectrum::of(reflected.view(), sim_params.delta_t).unwrap();
    let incident = Spectrum::of(incident.view(), sim_params.delta_t).unwrap();

    let f_min = 5e9; // [Hz]
    let f_max = 15e9; // [Hz]
    let reference = incident.max();
    let incident_norm = incident.normalized_to(reference);
    let reflected_norm = reflected.normalized_to(reference);

    println!("\n-- Spectra ( relative to incident maximum ) --");
    for k in incident.band(0.0, 30e9).unwrap().step_by(32) {
        println!(
            "{:>9.3e} Hz  incident {:.4}  reflected {:.4}",
            incident.frequencies()[k],
            incident_norm[k],
            reflected_norm[k],
        );
    }

    let gamma = Spectrum::reflection_coefficient(&reflected, &incident, f_min, f_max).unwrap();
    println!("\n-- |Γ| from {:.0e} Hz to {:.0e} Hz --", f_min, f_max);
    for (f, g) in gamma.frequencies.iter().zip(gamma.magnitudes.iter()).step_by(16) {
        println!("{:>9.3e} Hz  {:.4}", f, g);
    }
}
