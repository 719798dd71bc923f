use crate::{Error, Solver, SPEED_OF_LIGHT};
use crate::probe::Probe;

/// Simulation specific parameters.
#[derive(Copy, Clone, Debug)]
pub struct SimulationParameters {
    /// The physical size of each spacial step.
    pub delta_x: f64,
    /// The length of each temperal step in the simulation.
    pub delta_t: f64,
    /// The Courant number tying `delta_t` to `delta_x`.
    pub courant: f64,
}

impl SimulationParameters {
    /// Derives the time step `Sc * dx / c0`.
    pub fn new(delta_x: f64, courant: f64) -> Result<Self, Error> {
        if !(delta_x > 0.0) || !delta_x.is_finite() {
            return Err(Error::InvalidParameter {
                name: "cell size".to_string(),
                value: delta_x,
            });
        }
        if !(courant > 0.0 && courant <= 1.0) {
            return Err(Error::InvalidCourant(courant));
        }

        Ok(Self {
            delta_x,
            delta_t: courant * delta_x / SPEED_OF_LIGHT,
            courant,
        })
    }

    /// Number of cells needed to cover a physical `extent`.
    #[inline]
    pub fn npoints_for(&self, extent: f64) -> usize {
        (extent / self.delta_x).round() as usize
    }

    /// Physical times of the first `nsteps` time indices.
    pub fn time_axis(&self, nsteps: usize) -> ndarray::Array1<f64> {
        ndarray::Array1::from_shape_fn(nsteps, |k| k as f64 * self.delta_t)
    }
}

/// Describes the field state at the current time step.
#[derive(Clone, Debug)]
pub struct SimulationState {
    /// The index of the last time step applied.
    pub time: usize,
    /// The electric field at every integer node.
    pub ez: ndarray::Array1<f64>,
    /// The magnetic field at every half-node.
    pub hy: ndarray::Array1<f64>,
}

/// Lifecycle of a `Simulation`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    /// No step has been taken yet.
    Initialized,
    /// Some but not all steps have been taken.
    Running,
    /// Every step has been taken; the fields no longer change.
    Completed,
}

/// Describes a simulation.
pub struct SimulationDescriptor<S: Solver> {
    /// The `Solver` for the simulation.
    pub solver: S,
    /// Number of time indices to record, including the initial state.
    pub max_time: usize,
    /// Grid positions to record the fields at.
    pub probes: Vec<usize>,
    /// The state that the simulation starts in.
    pub init_state: Option<SimulationState>,
}

/// A read-only view of the fields, valid until the next step.
pub struct FieldSnapshot<'a> {
    pub time: usize,
    pub ez: ndarray::ArrayView1<'a, f64>,
    pub hy: ndarray::ArrayView1<'a, f64>,
}

/// Hands field snapshots to an outside observer during a run.
pub struct DisplaySettings<'a> {
    /// Number of steps between snapshots.
    pub every: usize,
    pub observer: &'a mut dyn FnMut(FieldSnapshot),
}

/// Describes a simulation run.
#[derive(Default)]
pub struct RunDescriptor<'a> {
    /// Whether or not to print information to the console.
    pub verbose: bool,
    /// Where, if anywhere, to send periodic field snapshots.
    pub display: Option<DisplaySettings<'a>>,
}

/// The main `struct` of the framework.
pub struct Simulation<S: Solver> {
    solver: S,
    state: SimulationState,
    probes: Vec<Probe>,
    start_time: usize,
    max_time: usize,
}

impl<S: Solver> Simulation<S> {
    /// Creates a new `Simulation` and records the starting fields.
    pub fn new(desc: SimulationDescriptor<S>) -> Result<Self, Error> {
        let npoints = desc.solver.npoints();

        // the initial state plus at least one step
        if desc.max_time < 2 {
            return Err(Error::InvalidParameter {
                name: "step count".to_string(),
                value: desc.max_time as f64,
            });
        }

        // create arrays for initial data
        let state = desc.init_state.unwrap_or(SimulationState {
            time: 0,
            ez: ndarray::Array1::<f64>::zeros(npoints),
            hy: ndarray::Array1::<f64>::zeros(npoints - 1),
        });
        if state.ez.len() != npoints {
            return Err(Error::BadInit {
                array_name: "Electric field".to_string(),
                input_length: state.ez.len(),
                expected_length: npoints,
            });
        }
        if state.hy.len() != npoints - 1 {
            return Err(Error::BadInit {
                array_name: "Magnetic field".to_string(),
                input_length: state.hy.len(),
                expected_length: npoints - 1,
            });
        }
        if state.time + 1 >= desc.max_time {
            return Err(Error::SimulationCompleted {
                max_time: desc.max_time,
            });
        }

        let mut probes = Vec::with_capacity(desc.probes.len());
        for position in desc.probes {
            if position >= npoints - 1 {
                return Err(Error::ProbeOutOfRange {
                    position,
                    limit: npoints - 1,
                });
            }
            let mut probe = Probe::new(position, desc.max_time - state.time);
            probe.add_sample(state.ez.view(), state.hy.view())?;
            probes.push(probe);
        }

        let mut solver = desc.solver;
        solver.prime(&state);

        Ok(Self {
            solver,
            start_time: state.time,
            state,
            probes,
            max_time: desc.max_time,
        })
    }

    pub fn phase(&self) -> Phase {
        if self.state.time + 1 >= self.max_time {
            Phase::Completed
        } else if self.state.time == self.start_time {
            Phase::Initialized
        } else {
            Phase::Running
        }
    }

    /// Advances the fields by one time step and records every probe.
    pub fn step(&mut self) -> Result<(), Error> {
        if self.phase() == Phase::Completed {
            return Err(Error::SimulationCompleted {
                max_time: self.max_time,
            });
        }

        let q = self.state.time + 1;
        self.solver.step(q, self.state.ez.view_mut(), self.state.hy.view_mut());
        self.state.time = q;

        for probe in self.probes.iter_mut() {
            probe.add_sample(self.state.ez.view(), self.state.hy.view())?;
        }

        Ok(())
    }

    /// Takes every remaining time step.
    pub fn run(&mut self, desc: RunDescriptor) -> Result<(), Error> {
        if self.phase() == Phase::Completed {
            return Err(Error::SimulationCompleted {
                max_time: self.max_time,
            });
        }

        let nsteps = self.max_time - 1 - self.state.time;
        let sim_params = *self.solver.sim_params();
        log::info!(
            "running {} time steps on {} nodes ( dt = {:e} s )",
            nsteps,
            self.solver.npoints(),
            sim_params.delta_t,
        );

        // setup output if verbose
        let bar = if desc.verbose {
            println!("# of time steps: {}", nsteps);
            Some(indicatif::ProgressBar::new(nsteps as u64))
        } else {
            None
        };

        let mut display = desc.display;
        while self.phase() != Phase::Completed {
            self.step()?;

            if let Some(display) = display.as_mut() {
                if display.every > 0 && self.state.time % display.every == 0 {
                    (display.observer)(FieldSnapshot {
                        time: self.state.time,
                        ez: self.state.ez.view(),
                        hy: self.state.hy.view(),
                    });
                }
            }

            if let Some(ref bar) = bar {
                bar.inc(1)
            }
        }

        if let Some(ref bar) = bar {
            bar.finish();
        }
        log::info!("finished at time step {}", self.state.time);

        Ok(())
    }

    #[inline]
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    #[inline]
    pub fn solver(&self) -> &S {
        &self.solver
    }

    #[inline]
    pub fn sim_params(&self) -> &SimulationParameters {
        self.solver.sim_params()
    }

    #[inline]
    pub fn max_time(&self) -> usize {
        self.max_time
    }

    #[inline]
    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    /// Hands over the recorded probes.
    #[inline]
    pub fn into_probes(self) -> Vec<Probe> {
        self.probes
    }
}
