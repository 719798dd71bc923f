use std::f64::consts::PI;

use crate::Error;
use crate::fdtd::Source;

pub struct GaussianPulseDescriptor {
    /// Time index of the pulse peak at the source cell.
    pub delay: f64,
    /// Half-width of the pulse, in time steps.
    pub width: f64,
    pub amplitude: f64,
    pub courant: f64,
    /// Relative permittivity at the source cell.
    pub eps: f64,
    /// Relative permeability at the source cell.
    pub mu: f64,
}

/// A Gaussian plane wave pulse.
#[derive(Clone, Debug)]
pub struct GaussianPulse {
    delay: f64,
    width: f64,
    amplitude: f64,
    /// Time steps needed to cross one cell.
    slowness: f64,
}

impl GaussianPulse {
    pub fn new(desc: GaussianPulseDescriptor) -> Result<Self, Error> {
        check_positive("pulse width", desc.width)?;
        check_positive("Courant number", desc.courant)?;
        check_positive("source permittivity", desc.eps)?;
        check_positive("source permeability", desc.mu)?;

        Ok(Self {
            delay: desc.delay,
            width: desc.width,
            amplitude: desc.amplitude,
            slowness: f64::sqrt(desc.eps * desc.mu) / desc.courant,
        })
    }

    #[inline]
    fn envelope(&self, space_offset: f64, time: f64) -> f64 {
        let retarded = time - space_offset * self.slowness;
        self.amplitude * f64::exp(-((retarded - self.delay) / self.width).powi(2))
    }
}

impl Source for GaussianPulse {
    #[inline]
    fn value(&self, space_offset: f64, time: f64) -> f64 {
        self.envelope(space_offset, time)
    }
}

pub struct ModulatedGaussianPulseDescriptor {
    pub delay: f64,
    pub width: f64,
    /// Period of the sinusoidal carrier, in time steps.
    pub period: f64,
    pub amplitude: f64,
    pub courant: f64,
    pub eps: f64,
    pub mu: f64,
}

/// A Gaussian envelope on a sinusoidal carrier.
#[derive(Clone, Debug)]
pub struct ModulatedGaussianPulse {
    envelope: GaussianPulse,
    period: f64,
}

impl ModulatedGaussianPulse {
    pub fn new(desc: ModulatedGaussianPulseDescriptor) -> Result<Self, Error> {
        check_positive("carrier period", desc.period)?;

        Ok(Self {
            envelope: GaussianPulse::new(GaussianPulseDescriptor {
                delay: desc.delay,
                width: desc.width,
                amplitude: desc.amplitude,
                courant: desc.courant,
                eps: desc.eps,
                mu: desc.mu,
            })?,
            period: desc.period,
        })
    }
}

impl Source for ModulatedGaussianPulse {
    // the carrier follows the time index only, the envelope is retarded
    #[inline]
    fn value(&self, space_offset: f64, time: f64) -> f64 {
        f64::sin(2.0 * PI * time / self.period) * self.envelope.envelope(space_offset, time)
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), Error> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name: name.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gaussian(eps: f64, courant: f64) -> GaussianPulse {
        GaussianPulse::new(GaussianPulseDescriptor {
            delay: 45.0,
            width: 20.0,
            amplitude: 1.0,
            courant,
            eps,
            mu: 1.0,
        })
        .unwrap()
    }

    #[test]
    fn peaks_at_delay() {
        let pulse = gaussian(1.0, 1.0);
        assert_relative_eq!(pulse.value(0.0, 45.0), 1.0);
        assert_relative_eq!(pulse.value(0.0, 65.0), f64::exp(-1.0));
        assert_relative_eq!(pulse.value(0.0, 25.0), f64::exp(-1.0));
    }

    #[test]
    fn space_offset_retards_by_local_slowness() {
        // eps = 4 and Sc = 0.5 give four steps per cell
        let pulse = gaussian(4.0, 0.5);
        assert_relative_eq!(pulse.value(-0.5, 43.0), pulse.value(0.0, 45.0));
        assert_relative_eq!(pulse.value(1.0, 49.0), 1.0);
    }

    #[test]
    fn carrier_modulates_envelope() {
        let pulse = ModulatedGaussianPulse::new(ModulatedGaussianPulseDescriptor {
            delay: 140.0,
            width: 60.0,
            period: 120.0,
            amplitude: 1.0,
            courant: 1.0,
            eps: 1.0,
            mu: 1.0,
        })
        .unwrap();

        assert_relative_eq!(pulse.value(0.0, 120.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(
            pulse.value(0.0, 150.0),
            f64::exp(-(10.0f64 / 60.0).powi(2)),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            pulse.value(-0.5, 150.0),
            f64::exp(-(10.5f64 / 60.0).powi(2)),
            epsilon = 1e-12
        );
    }

    #[test]
    fn invalid_parameters_fail() {
        let zero_width = GaussianPulse::new(GaussianPulseDescriptor {
            delay: 0.0,
            width: 0.0,
            amplitude: 1.0,
            courant: 1.0,
            eps: 1.0,
            mu: 1.0,
        });
        assert!(matches!(zero_width, Err(Error::InvalidParameter { .. })));

        let zero_period = ModulatedGaussianPulse::new(ModulatedGaussianPulseDescriptor {
            delay: 0.0,
            width: 1.0,
            period: -1.0,
            amplitude: 1.0,
            courant: 1.0,
            eps: 1.0,
            mu: 1.0,
        });
        assert!(matches!(zero_period, Err(Error::InvalidParameter { .. })));
    }
}
