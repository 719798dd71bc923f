//! Frequency-domain post-processing of recorded probe signals.

use std::ops::Range;

use rustfft::num_complex::Complex;

use crate::{Error, SimulationParameters, SPEED_OF_LIGHT};

/// Padded transform size used when none is given.
pub const DEFAULT_TRANSFORM_SIZE: usize = 1 << 15;

/// Describes how a `Spectrum` is computed.
pub struct SpectrumDescriptor<'a> {
    /// The recorded time signal.
    pub signal: ndarray::ArrayView1<'a, f64>,
    /// Sampling interval of `signal`.
    pub delta_t: f64,
    /// Length the signal is zero-padded to before transforming.
    pub size: usize,
}

/// Magnitude of the discrete Fourier transform of a zero-padded signal,
/// centred on zero frequency.
///
/// Index `k` of the magnitudes corresponds to the frequency
/// `(k - size/2) * df`, with `df = 1 / (size * dt)`.
#[derive(Clone, Debug)]
pub struct Spectrum {
    delta_f: f64,
    frequencies: ndarray::Array1<f64>,
    magnitudes: ndarray::Array1<f64>,
}

/// Magnitude of a reflection coefficient over a band of frequencies.
#[derive(Clone, Debug)]
pub struct ReflectionCoefficient {
    pub frequencies: ndarray::Array1<f64>,
    pub magnitudes: ndarray::Array1<f64>,
}

impl Spectrum {
    pub fn new(desc: SpectrumDescriptor) -> Result<Self, Error> {
        let size = desc.size;
        if size < 2 || size % 2 != 0 {
            return Err(Error::InvalidParameter {
                name: "transform size".to_string(),
                value: size as f64,
            });
        }
        if !(desc.delta_t > 0.0) || !desc.delta_t.is_finite() {
            return Err(Error::InvalidParameter {
                name: "time step".to_string(),
                value: desc.delta_t,
            });
        }
        if desc.signal.len() > size {
            return Err(Error::SignalTooLong {
                length: desc.signal.len(),
                size,
            });
        }

        let mut buffer = vec![Complex::new(0.0, 0.0); size];
        for (b, &s) in buffer.iter_mut().zip(desc.signal.iter()) {
            b.re = s;
        }
        let mut planner = rustfft::FftPlanner::<f64>::new();
        planner.plan_fft_forward(size).process(&mut buffer);

        // move the negative half in front of the positive half
        let half = size / 2;
        let magnitudes = ndarray::Array1::from_shape_fn(size, |k| buffer[(k + half) % size].norm());

        let delta_f = 1.0 / (size as f64 * desc.delta_t);
        let frequencies =
            ndarray::Array1::from_shape_fn(size, |k| (k as f64 - half as f64) * delta_f);

        Ok(Self {
            delta_f,
            frequencies,
            magnitudes,
        })
    }

    /// Transforms a signal with the default padded size.
    pub fn of(signal: ndarray::ArrayView1<f64>, delta_t: f64) -> Result<Self, Error> {
        Self::new(SpectrumDescriptor {
            signal,
            delta_t,
            size: DEFAULT_TRANSFORM_SIZE,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Frequency resolution.
    #[inline]
    pub fn delta_f(&self) -> f64 {
        self.delta_f
    }

    #[inline]
    pub fn frequencies(&self) -> ndarray::ArrayView1<f64> {
        self.frequencies.view()
    }

    #[inline]
    pub fn magnitudes(&self) -> ndarray::ArrayView1<f64> {
        self.magnitudes.view()
    }

    pub fn max(&self) -> f64 {
        self.magnitudes.fold(0.0f64, |a, &b| a.max(b))
    }

    /// Magnitudes relative to their own maximum. A zero spectrum stays zero.
    pub fn normalized(&self) -> ndarray::Array1<f64> {
        let max = self.max();
        if max > 0.0 {
            self.normalized_to(max)
        } else {
            self.magnitudes.clone()
        }
    }

    /// Magnitudes relative to an outside reference, such as the maximum of
    /// the incident spectrum.
    pub fn normalized_to(&self, reference: f64) -> ndarray::Array1<f64> {
        self.magnitudes.mapv(|m| m / reference)
    }

    /// Index of the bin closest to frequency `f`, clamped to the axis.
    pub fn bin_of(&self, f: f64) -> usize {
        let half = (self.len() / 2) as f64;
        let k = (f / self.delta_f + half).round();
        k.max(0.0).min((self.len() - 1) as f64) as usize
    }

    /// Bins whose frequency lies in `f_min..=f_max`.
    pub fn band(&self, f_min: f64, f_max: f64) -> Result<Range<usize>, Error> {
        let start = self.frequencies.iter().position(|&f| f >= f_min);
        let end = self.frequencies.iter().rposition(|&f| f <= f_max);
        match (start, end) {
            (Some(start), Some(end)) if start <= end => Ok(start..end + 1),
            _ => Err(Error::EmptyBand { f_min, f_max }),
        }
    }

    /// Frequency of the largest magnitude at or above zero frequency.
    pub fn peak_frequency(&self) -> f64 {
        let half = self.len() / 2;
        let (k, _) = self.magnitudes
            .slice(ndarray::s![half..])
            .indexed_iter()
            .fold((0, f64::NEG_INFINITY), |(kmax, max), (k, &m)| {
                if m > max { (k, m) } else { (kmax, max) }
            });
        self.frequencies[half + k]
    }

    /// Elementwise `self / denominator`; bins where the denominator is
    /// exactly zero come out as `NaN`.
    pub fn ratio(&self, denominator: &Spectrum) -> Result<ndarray::Array1<f64>, Error> {
        self.check_aligned(denominator)?;

        Ok(ndarray::Zip::from(&self.magnitudes)
            .and(&denominator.magnitudes)
            .map_collect(|&n, &d| if d == 0.0 { f64::NAN } else { n / d }))
    }

    /// Magnitude of the reflection coefficient `|R(f)| / |I(f)|` between
    /// `f_min` and `f_max`.
    ///
    /// The reflected signal should be recorded where the incident pulse
    /// never passes, and the incident signal must be time gated beforehand
    /// (see [`time_gate`]) so it holds no reflections.
    pub fn reflection_coefficient(
        reflected: &Spectrum,
        incident: &Spectrum,
        f_min: f64,
        f_max: f64,
    ) -> Result<ReflectionCoefficient, Error> {
        let ratio = reflected.ratio(incident)?;
        let band = reflected.band(f_min, f_max)?;

        Ok(ReflectionCoefficient {
            frequencies: reflected.frequencies.slice(ndarray::s![band.clone()]).to_owned(),
            magnitudes: ratio.slice(ndarray::s![band]).to_owned(),
        })
    }

    fn check_aligned(&self, other: &Spectrum) -> Result<(), Error> {
        if self.len() != other.len() || self.delta_f != other.delta_f {
            return Err(Error::MismatchedSpectra {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(())
    }
}

/// Zeroes every sample from `cutoff` onwards.
pub fn time_gate(mut signal: ndarray::ArrayViewMut1<f64>, cutoff: usize) {
    let cutoff = cutoff.min(signal.len());
    signal.slice_mut(ndarray::s![cutoff..]).fill(0.0);
}

/// Sample index after which a probe only sees secondary reflections: the
/// pulse half-width plus the vacuum travel time over `distance` cells.
pub fn gate_cutoff(half_width: usize, distance: usize, sim_params: &SimulationParameters) -> usize {
    let travel = distance as f64 * sim_params.delta_x / (SPEED_OF_LIGHT * sim_params.delta_t);
    half_width + travel.round() as usize
}
