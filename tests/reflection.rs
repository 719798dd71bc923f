use fdtd1d::prelude::*;
use fdtd1d::fdtd::*;
use fdtd1d::spectrum::{gate_cutoff, time_gate};

const HALF_WIDTH: usize = 60;
const PERIOD: f64 = 120.0;

/// Vacuum, then layers of eps 1.5 and 5.9 on an eps 2.6 half-space.
fn layered_run() -> (Simulation<FdtdSolver>, usize) {
    let sim_params = SimulationParameters::new(0.00025, 1.0).unwrap();
    let npoints = 2000;
    let interface = npoints / 2;
    let first = interface + 160;
    let second = first + 320;

    let medium = Medium::new(MediumDescriptor {
        npoints,
        permittivity: vec![
            Layer::new(0, interface, 1.0),
            Layer::new(interface, first, 1.5),
            Layer::new(first, second, 5.9),
            Layer::new(second, npoints, 2.6),
        ],
        permeability: vec![Layer::new(0, npoints - 1, 1.0)],
    })
    .unwrap();

    let source_position = 50;
    let source = components::ModulatedGaussianPulse::new(
        components::ModulatedGaussianPulseDescriptor {
            delay: (2 * HALF_WIDTH + 20) as f64,
            width: HALF_WIDTH as f64,
            period: PERIOD,
            amplitude: 1.0,
            courant: sim_params.courant,
            eps: medium.permittivity()[source_position],
            mu: medium.permeability()[source_position],
        },
    )
    .unwrap();

    let solver = FdtdSolver::new(FdtdSolverDescriptor {
        medium,
        sim_params,
        source: Box::new(source),
        source_position,
        boundary: Box::new(components::MurBoundary::new()),
    })
    .unwrap();

    let mut simulation = Simulation::new(SimulationDescriptor {
        solver,
        max_time: 6000,
        probes: vec![25, 75],
        init_state: None,
    })
    .unwrap();
    simulation.run(RunDescriptor::default()).unwrap();

    (simulation, interface)
}

#[test]
fn reflection_coefficient_is_bounded() {
    let (simulation, interface) = layered_run();
    let sim_params = *simulation.sim_params();
    let probes = simulation.into_probes();

    let reflected = probes[0].e().to_owned();
    let mut incident = probes[1].e().to_owned();
    let cutoff = gate_cutoff(HALF_WIDTH, interface, &sim_params);
    assert_eq!(cutoff, 1060);
    time_gate(incident.view_mut(), cutoff);

    let reflected = Spectrum::of(reflected.view(), sim_params.delta_t).unwrap();
    let incident = Spectrum::of(incident.view(), sim_params.delta_t).unwrap();

    // the carrier sits at one period of 120 steps
    let carrier = 1.0 / (PERIOD * sim_params.delta_t);
    assert!((incident.peak_frequency() - carrier).abs() < 0.05 * carrier);

    let gamma = Spectrum::reflection_coefficient(&reflected, &incident, 5e9, 15e9).unwrap();
    assert!(gamma.magnitudes.len() > 100);
    for (&f, &g) in gamma.frequencies.iter().zip(gamma.magnitudes.iter()) {
        assert!((5e9..=15e9).contains(&f));
        assert!((0.0..=1.0).contains(&g), "|Γ| = {} at {} Hz", g, f);
    }
}

#[test]
fn incident_side_stays_quiet_until_reflection_returns() {
    let (simulation, _) = layered_run();
    let reflected = simulation.probes()[0].e();
    let incident = simulation.probes()[1].e();

    let leak = reflected.slice(ndarray::s![..1500]).fold(0.0f64, |a, &b| a.max(b.abs()));
    let peak = incident.fold(0.0f64, |a, &b| a.max(b.abs()));
    assert!(peak > 0.9, "incident peak {}", peak);
    assert!(leak < 0.05 * peak, "leak {}", leak);
}
