use crate::Error;

/// Records both field components at one grid position for every time step.
#[derive(Clone, Debug)]
pub struct Probe {
    position: usize,
    e: ndarray::Array1<f64>,
    h: ndarray::Array1<f64>,
    cursor: usize,
}

impl Probe {
    /// Creates an empty probe able to hold `capacity` samples.
    #[inline]
    pub fn new(position: usize, capacity: usize) -> Self {
        Self {
            position,
            e: ndarray::Array1::<f64>::zeros(capacity),
            h: ndarray::Array1::<f64>::zeros(capacity),
            cursor: 0,
        }
    }

    /// Appends `ez[position]` and `hy[position]` to the recorded signals.
    pub fn add_sample(
        &mut self,
        ez: ndarray::ArrayView1<f64>,
        hy: ndarray::ArrayView1<f64>,
    ) -> Result<(), Error> {
        if self.cursor >= self.capacity() {
            return Err(Error::ProbeFull {
                position: self.position,
                capacity: self.capacity(),
            });
        }
        if self.position >= hy.len() {
            return Err(Error::ProbeOutOfRange {
                position: self.position,
                limit: hy.len(),
            });
        }

        self.e[self.cursor] = ez[self.position];
        self.h[self.cursor] = hy[self.position];
        self.cursor += 1;

        Ok(())
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.e.len()
    }

    /// Number of samples recorded so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.cursor == self.capacity()
    }

    /// Recorded electric field signal, zero past the write cursor.
    #[inline]
    pub fn e(&self) -> ndarray::ArrayView1<f64> {
        self.e.view()
    }

    /// Recorded magnetic field signal, zero past the write cursor.
    #[inline]
    pub fn h(&self) -> ndarray::ArrayView1<f64> {
        self.h.view()
    }

    /// Sample times for a time step of `delta_t`.
    pub fn times(&self, delta_t: f64) -> ndarray::Array1<f64> {
        ndarray::Array1::from_shape_fn(self.capacity(), |k| k as f64 * delta_t)
    }
}
