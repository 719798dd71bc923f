use fdtd1d::prelude::*;
use fdtd1d::fdtd::*;

fn main() {
    let eps = 3.5;
    let courant = 1.0;
    let sim_params = SimulationParameters::new(0.01, courant).unwrap(); // [m]
    let npoints = sim_params.npoints_for(5.5); // [m]
    let max_time = 800;

    let source_position = npoints / 2;
    let probe_position = npoints * 3 / 4;

    let solver = FdtdSolver::new(FdtdSolverDescriptor {
        medium: Medium::uniform(npoints, eps, 1.0).unwrap(),
        sim_params,
        source: Box::new(components::GaussianPulse::new(components::GaussianPulseDescriptor {
            delay: 45.0,
            width: 20.0,
            amplitude: 1.0,
            courant,
            eps,
            mu: 1.0,
        }).unwrap()),
        source_position,
        // a lossy layer over the last 100 cells
        boundary: Box::new(components::GradedAbsorber::new(npoints - 100, 0.02)),
    })
    .unwrap();

    let mut simulation = Simulation::new(SimulationDescriptor {
        solver,
        max_time,
        probes: vec![probe_position],
        init_state: None,
    })
    .unwrap();

    println!(
        "\n-- General Simulation Info --\n\
        # of points:  {}\n\
        Δx:           {:<9.2e} m\n\
        Δt:           {:<9.2e} s\n",
        npoints,
        sim_params.delta_x,
        sim_params.delta_t,
    );

    let mut peaks = Vec::new();
    let mut observer = |snapshot: FieldSnapshot| {
        peaks.push((snapshot.time, snapshot.ez.fold(0.0f64, |a, &b| a.max(b.abs()))));
    };
    simulation.run(RunDescriptor {
        verbose: true,
        display: Some(DisplaySettings {
            every: 100,
            observer: &mut observer,
        }),
    })
    .unwrap();

    println!("\n-- Field Maximum --");
    for (time, peak) in peaks {
        println!("q = {:<5} max |Ez| = {:.4}", time, peak);
    }

    let probe = &simulation.probes()[0];
    let spectrum = Spectrum::of(probe.e(), sim_params.delta_t).unwrap();
    let normalized = spectrum.normalized();

    println!("\n-- Normalized Spectrum at x = {} --", probe.position());
    let f_max = 3e9; // [Hz]
    let band = spectrum.band(0.0, f_max).unwrap();
    for k in band.step_by(64) {
        println!("{:>9.3e} Hz  {:.4}", spectrum.frequencies()[k], normalized[k]);
    }
}
