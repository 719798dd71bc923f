use crate::{Error, FREE_SPACE_IMPEDANCE};
use crate::medium::Medium;

/// Per-node damping with a constant value from `start` to the end of the grid.
#[derive(Clone, Debug)]
pub struct LossProfile {
    pub start: usize,
    pub loss: ndarray::Array1<f64>,
}

impl LossProfile {
    /// Zero loss before `start`, `loss` from `start` onwards.
    pub fn step(npoints: usize, start: usize, loss: f64) -> Result<Self, Error> {
        if npoints < 3 || start < 1 || start > npoints - 2 {
            return Err(Error::LossLayerOutOfRange {
                start,
                max: npoints.saturating_sub(2),
            });
        }
        if !(loss >= 0.0) || !loss.is_finite() {
            return Err(Error::InvalidParameter {
                name: "loss".to_string(),
                value: loss,
            });
        }

        let mut profile = ndarray::Array1::<f64>::zeros(npoints);
        profile.slice_mut(ndarray::s![start..]).fill(loss);

        Ok(Self { start, loss: profile })
    }
}

/// Update coefficients for the leapfrog scheme.
///
/// The electric update is `Ez = ceze*Ez + cezh*(Hy[i] - Hy[i-1])` and the
/// magnetic update is `Hy = chyh*Hy + chye*(Ez[i+1] - Ez[i])`. Without loss,
/// `ceze` and `chyh` are one and `cezh`, `chye` reduce to `Sc*W0/eps` and
/// `Sc/(W0*mu)`.
#[derive(Clone, Debug)]
pub struct UpdateCoefficients {
    pub ceze: ndarray::Array1<f64>,
    pub cezh: ndarray::Array1<f64>,
    pub chyh: ndarray::Array1<f64>,
    pub chye: ndarray::Array1<f64>,
}

impl UpdateCoefficients {
    pub fn new(medium: &Medium, courant: f64, loss: Option<&LossProfile>) -> Result<Self, Error> {
        let npoints = medium.npoints();
        let eps = medium.permittivity();
        let mu = medium.permeability();

        let loss = match loss {
            Some(profile) => {
                if profile.loss.len() != npoints {
                    return Err(Error::BadInit {
                        array_name: "Loss".to_string(),
                        input_length: profile.loss.len(),
                        expected_length: npoints,
                    });
                }
                Some(profile)
            }
            None => None,
        };

        let zero = ndarray::Array1::<f64>::zeros(npoints);
        let l = loss.map(|p| p.loss.view()).unwrap_or_else(|| zero.view());
        let lh = l.slice(ndarray::s![..-1]);

        let mut ceze = l.mapv(|l| (1.0 - l) / (1.0 + l));
        let mut cezh = ndarray::Zip::from(&eps)
            .and(&l)
            .map_collect(|&eps, &l| courant * FREE_SPACE_IMPEDANCE / (eps * (1.0 + l)));
        let chyh = lh.mapv(|l| (1.0 - l) / (1.0 + l));
        let chye = ndarray::Zip::from(&mu)
            .and(&lh)
            .map_collect(|&mu, &l| courant / (FREE_SPACE_IMPEDANCE * mu * (1.0 + l)));

        // smooth the step in the electric coefficients where the loss begins
        if let Some(profile) = loss {
            let s = profile.start;
            ceze[s] = (ceze[s - 1] + ceze[s + 1]) / 2.0;
            cezh[s] = (cezh[s - 1] + cezh[s + 1]) / 2.0;
            log::debug!("loss layer starts at node {} ( ceze {}, cezh {} )", s, ceze[s], cezh[s]);
        }

        Ok(Self { ceze, cezh, chyh, chye })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::medium::{Layer, MediumDescriptor};
    use approx::assert_relative_eq;

    fn layered() -> Medium {
        Medium::new(MediumDescriptor {
            npoints: 6,
            permittivity: vec![Layer::new(0, 3, 1.0), Layer::new(3, 6, 4.0)],
            permeability: vec![Layer::new(0, 2, 1.0), Layer::new(2, 5, 2.0)],
        })
        .unwrap()
    }

    #[test]
    fn lossless_reduces_to_scalar_form() {
        let medium = layered();
        let sc = 0.5;
        let coeffs = UpdateCoefficients::new(&medium, sc, None).unwrap();

        assert_eq!(coeffs.ceze.len(), 6);
        assert_eq!(coeffs.chye.len(), 5);
        for i in 0..6 {
            assert_eq!(coeffs.ceze[i], 1.0);
            assert_relative_eq!(
                coeffs.cezh[i],
                sc * FREE_SPACE_IMPEDANCE / medium.permittivity()[i]
            );
        }
        for i in 0..5 {
            assert_eq!(coeffs.chyh[i], 1.0);
            assert_relative_eq!(
                coeffs.chye[i],
                sc / (FREE_SPACE_IMPEDANCE * medium.permeability()[i])
            );
        }
    }

    #[test]
    fn lossy_coefficients() {
        let medium = Medium::uniform(10, 3.5, 1.0).unwrap();
        let profile = LossProfile::step(10, 6, 0.02).unwrap();
        let coeffs = UpdateCoefficients::new(&medium, 1.0, Some(&profile)).unwrap();

        let damp = (1.0 - 0.02) / (1.0 + 0.02);
        assert_eq!(coeffs.ceze[5], 1.0);
        assert_relative_eq!(coeffs.ceze[7], damp);
        assert_relative_eq!(coeffs.cezh[7], FREE_SPACE_IMPEDANCE / (3.5 * 1.02), max_relative = 1e-12);
        assert_relative_eq!(coeffs.chyh[8], damp);
        assert_relative_eq!(coeffs.chye[8], 1.0 / (FREE_SPACE_IMPEDANCE * 1.02), max_relative = 1e-12);
        assert_eq!(coeffs.chyh[5], 1.0);

        // the first lossy node is the mean of its neighbours
        assert_relative_eq!(coeffs.ceze[6], (1.0 + damp) / 2.0);
        assert_relative_eq!(coeffs.cezh[6], (coeffs.cezh[5] + coeffs.cezh[7]) / 2.0);
    }

    #[test]
    fn loss_layer_bounds() {
        assert!(matches!(
            LossProfile::step(10, 0, 0.1),
            Err(Error::LossLayerOutOfRange { .. }),
        ));
        assert!(matches!(
            LossProfile::step(10, 9, 0.1),
            Err(Error::LossLayerOutOfRange { start: 9, max: 8 }),
        ));
        assert!(matches!(
            LossProfile::step(10, 5, -0.1),
            Err(Error::InvalidParameter { .. }),
        ));
    }
}
