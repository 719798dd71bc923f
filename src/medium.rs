//! Piecewise-homogeneous material layout of the grid.

use crate::Error;

/// A homogeneous region covering the half-open index range `start..end`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layer {
    pub start: usize,
    pub end: usize,
    pub value: f64,
}

impl Layer {
    #[inline]
    pub fn new(start: usize, end: usize, value: f64) -> Self {
        Self { start, end, value }
    }
}

/// Describes the layered composition of a `Medium`.
pub struct MediumDescriptor {
    /// Number of electric field nodes.
    pub npoints: usize,
    /// Relative permittivity layers, tiling `0..npoints`.
    pub permittivity: Vec<Layer>,
    /// Relative permeability layers, tiling `0..npoints-1`.
    pub permeability: Vec<Layer>,
}

/// Relative permittivity at every electric node and relative permeability at
/// every magnetic half-node.
#[derive(Clone, Debug)]
pub struct Medium {
    eps: ndarray::Array1<f64>,
    mu: ndarray::Array1<f64>,
}

impl Medium {
    pub fn new(desc: MediumDescriptor) -> Result<Self, Error> {
        if desc.npoints < 2 {
            return Err(Error::InvalidParameter {
                name: "node count".to_string(),
                value: desc.npoints as f64,
            });
        }

        let eps = fill_layers("Permittivity", desc.npoints, &desc.permittivity)?;
        let mu = fill_layers("Permeability", desc.npoints - 1, &desc.permeability)?;

        Ok(Self { eps, mu })
    }

    /// A single homogeneous region over the whole grid.
    pub fn uniform(npoints: usize, eps: f64, mu: f64) -> Result<Self, Error> {
        Self::new(MediumDescriptor {
            npoints,
            permittivity: vec![Layer::new(0, npoints, eps)],
            permeability: vec![Layer::new(0, npoints.saturating_sub(1), mu)],
        })
    }

    #[inline]
    pub fn npoints(&self) -> usize {
        self.eps.len()
    }

    #[inline]
    pub fn permittivity(&self) -> ndarray::ArrayView1<f64> {
        self.eps.view()
    }

    #[inline]
    pub fn permeability(&self) -> ndarray::ArrayView1<f64> {
        self.mu.view()
    }

    /// Largest `sqrt(eps * mu)` the grid can contain.
    pub fn max_refractive_index(&self) -> f64 {
        f64::sqrt(
            self.eps.fold(0.0f64, |a, &b| a.max(b))
                * self.mu.fold(0.0f64, |a, &b| a.max(b)),
        )
    }

    /// Smallest `sqrt(eps * mu)` the grid can contain.
    pub fn min_refractive_index(&self) -> f64 {
        f64::sqrt(
            self.eps.fold(f64::INFINITY, |a, &b| a.min(b))
                * self.mu.fold(f64::INFINITY, |a, &b| a.min(b)),
        )
    }
}

fn fill_layers(
    array_name: &str,
    len: usize,
    layers: &[Layer],
) -> Result<ndarray::Array1<f64>, Error> {
    let mut values = ndarray::Array1::<f64>::zeros(len);

    let mut cursor = 0;
    for layer in layers {
        if layer.start != cursor || layer.end <= layer.start || layer.end > len {
            return Err(Error::LayerTiling {
                array_name: array_name.to_string(),
                expected: cursor,
                found: if layer.start != cursor { layer.start } else { layer.end },
            });
        }
        if !(layer.value > 0.0) {
            return Err(Error::NonPositiveMaterial {
                array_name: array_name.to_string(),
                index: layer.start,
                value: layer.value,
            });
        }
        values.slice_mut(ndarray::s![layer.start..layer.end]).fill(layer.value);
        cursor = layer.end;
    }
    if cursor != len {
        return Err(Error::LayerTiling {
            array_name: array_name.to_string(),
            expected: len,
            found: cursor,
        });
    }

    Ok(values)
}
