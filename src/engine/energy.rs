use nalgebra::Vector3;
use serde::Serialize;

use crate::core::domain::Interactions;
use crate::core::error::{SimError, SimResult};
use crate::core::lattice::BondAxis;
use crate::core::spins::{Spin, SpinField};

/// DMI chirality reference for bonds along x.
pub const DMI_AXIS_X: Vector3<f64> = Vector3::new(0.0, 1.0, 0.0);
/// DMI chirality reference for bonds along y.
pub const DMI_AXIS_Y: Vector3<f64> = Vector3::new(1.0, 0.0, 0.0);

#[inline]
fn dmi_reference(axis: BondAxis) -> Vector3<f64> {
    match axis {
        BondAxis::X => DMI_AXIS_X,
        BondAxis::Y => DMI_AXIS_Y,
    }
}

/// Breakdown of the total energy into its four terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyTerms {
    pub zeeman: f64,
    pub anisotropy: f64,
    pub exchange: f64,
    pub dmi: f64,
}

impl EnergyTerms {
    pub fn total(&self) -> f64 {
        self.zeeman + self.anisotropy + self.exchange + self.dmi
    }
}

/// Energy functional over a borrowed spin field.
///
/// `E = Σ -(s·B) + Σ -K (s·u)² - J Σ_<ab> s_a·s_b - D Σ_<ab> (s_a × s_b)·r_ab`
///
/// Bonds are open-boundary nearest neighbours; `r_ab` is `(0,1,0)` along x and
/// `(1,0,0)` along y.
pub struct EnergyModel<'a> {
    field: &'a mut SpinField,
    interactions: Interactions,
    axis: Vector3<f64>,
}

impl<'a> EnergyModel<'a> {
    /// Fails only if the anisotropy axis has zero length. Coupling signs are
    /// checked when the corresponding term is evaluated.
    pub fn new(field: &'a mut SpinField, interactions: Interactions) -> SimResult<Self> {
        let axis = interactions
            .u
            .try_normalize(0.0)
            .ok_or(SimError::DegenerateAxis)?;
        Ok(Self {
            field,
            interactions,
            axis,
        })
    }

    pub fn field(&self) -> &SpinField {
        &*self.field
    }

    pub fn field_mut(&mut self) -> &mut SpinField {
        &mut *self.field
    }

    pub fn interactions(&self) -> &Interactions {
        &self.interactions
    }

    /// The unit anisotropy axis.
    pub fn axis(&self) -> Vector3<f64> {
        self.axis
    }

    fn check_exchange(&self) -> SimResult<()> {
        if self.interactions.j < 0.0 {
            return Err(SimError::Domain {
                term: "exchange",
                constant: "J",
                value: self.interactions.j,
            });
        }
        Ok(())
    }

    fn check_dmi(&self) -> SimResult<()> {
        if self.interactions.d < 0.0 {
            return Err(SimError::Domain {
                term: "dmi",
                constant: "D",
                value: self.interactions.d,
            });
        }
        Ok(())
    }

    pub fn zeeman(&self) -> f64 {
        let b = &self.interactions.b;
        self.field.spins().iter().map(|s| -s.dot(b)).sum()
    }

    pub fn anisotropy(&self) -> f64 {
        let k = self.interactions.k;
        self.field
            .spins()
            .iter()
            .map(|s| {
                let proj = s.dot(&self.axis);
                -k * proj * proj
            })
            .sum()
    }

    pub fn exchange(&self) -> SimResult<f64> {
        self.check_exchange()?;
        let spins = self.field.spins();
        let coupling: f64 = self
            .field
            .geometry()
            .bonds()
            .map(|b| spins[b.first].dot(&spins[b.second]))
            .sum();
        Ok(-self.interactions.j * coupling)
    }

    pub fn dmi(&self) -> SimResult<f64> {
        self.check_dmi()?;
        let spins = self.field.spins();
        let chirality: f64 = self
            .field
            .geometry()
            .bonds()
            .map(|b| spins[b.first].cross(&spins[b.second]).dot(&dmi_reference(b.axis)))
            .sum();
        Ok(-self.interactions.d * chirality)
    }

    /// Total energy, recomputed over the whole lattice.
    pub fn energy(&self) -> SimResult<f64> {
        Ok(self.zeeman() + self.anisotropy() + self.exchange()? + self.dmi()?)
    }

    pub fn terms(&self) -> SimResult<EnergyTerms> {
        Ok(EnergyTerms {
            zeeman: self.zeeman(),
            anisotropy: self.anisotropy(),
            exchange: self.exchange()?,
            dmi: self.dmi()?,
        })
    }

    /// Every energy contribution that involves site `(i, j)` holding `spin`:
    /// its on-site terms plus its bonds to the current neighbours.
    fn local_energy(&self, i: usize, j: usize, spin: &Spin) -> f64 {
        let Interactions { b, k, j: exch, d, .. } = &self.interactions;
        let proj = spin.dot(&self.axis);
        let mut e = -spin.dot(b) - k * proj * proj;

        let spins = self.field.spins();
        for n in self.field.geometry().neighbors(i, j).iter().flatten() {
            let other = &spins[n.index];
            let cross = if n.site_is_first {
                spin.cross(other)
            } else {
                other.cross(spin)
            };
            e -= exch * spin.dot(other);
            e -= d * cross.dot(&dmi_reference(n.axis));
        }
        e
    }

    /// Total energy change if site `(i, j)` were replaced by `trial`, without
    /// touching the field. O(1): only the site and its neighbours contribute.
    pub fn delta_energy(&self, i: usize, j: usize, trial: &Spin) -> SimResult<f64> {
        self.check_exchange()?;
        self.check_dmi()?;
        let current = self.field.get(i, j);
        Ok(self.local_energy(i, j, trial) - self.local_energy(i, j, &current))
    }
}
