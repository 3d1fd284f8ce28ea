use nalgebra::Vector3;
use rand::Rng;
use serde::Serialize;

use crate::core::error::{SimError, SimResult};
use crate::core::lattice::LatticeGeometry;

/// A single magnetic moment. Stored spins are unit vectors.
pub type Spin = Vector3<f64>;

/// Default initial value: every spin along +z.
pub const SPIN_UP: [f64; 3] = [0.0, 0.0, 1.0];

/// Field of unit spins on a two-dimensional `nx * ny` lattice.
///
/// Storage is a flat `Vec<Spin>` indexed by [`LatticeGeometry::index`], which is
/// logically the `(nx, ny, 3)` array of spin components.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinField {
    #[serde(flatten)]
    geometry: LatticeGeometry,
    spins: Vec<Spin>,
}

impl SpinField {
    /// Builds a lattice of dimensions `dims = [nx, ny]` with every site set to `value`,
    /// scaled to unit length.
    pub fn new(dims: &[usize], value: &[f64]) -> SimResult<Self> {
        if dims.len() != 2 {
            return Err(SimError::InvalidDimensions(format!(
                "expected 2 dimensions (nx, ny), got {}",
                dims.len()
            )));
        }
        if dims.iter().any(|&n| n == 0) {
            return Err(SimError::InvalidDimensions(format!(
                "dimensions must be positive integers, got {:?}",
                dims
            )));
        }
        if value.len() != 3 {
            return Err(SimError::InvalidValue(format!(
                "expected 3 components, got {}",
                value.len()
            )));
        }
        if value.iter().any(|c| !c.is_finite()) {
            return Err(SimError::InvalidValue(format!(
                "components must be finite real numbers, got {:?}",
                value
            )));
        }

        let spin = Spin::new(value[0], value[1], value[2]);
        let norm_sq = spin.norm_squared();
        if norm_sq == 0.0 {
            return Err(SimError::InvalidValue(
                "zero vector cannot be normalized".to_string(),
            ));
        }

        let geometry = LatticeGeometry::new(dims[0], dims[1]);
        let mut field = Self {
            geometry,
            spins: vec![spin; geometry.n_sites()],
        };
        field.normalize();
        Ok(field)
    }

    /// `nx * ny` lattice with every spin along +z.
    pub fn uniform(nx: usize, ny: usize) -> SimResult<Self> {
        Self::new(&[nx, ny], &SPIN_UP)
    }

    pub fn dims(&self) -> (usize, usize) {
        self.geometry.dims()
    }

    pub fn geometry(&self) -> &LatticeGeometry {
        &self.geometry
    }

    pub fn len(&self) -> usize {
        self.spins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spins.is_empty()
    }

    pub fn spins(&self) -> &[Spin] {
        &self.spins
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Spin {
        self.spins[self.geometry.index(i, j)]
    }

    #[inline]
    pub fn at(&self, index: usize) -> Spin {
        self.spins[index]
    }

    /// Overwrites site `(i, j)` with `spin` scaled to unit length.
    /// `spin` must be non-zero.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, spin: Spin) {
        self.write(i, j, spin / spin.norm());
    }

    /// Raw store; `spin` is already a unit vector.
    #[inline]
    pub(crate) fn write(&mut self, i: usize, j: usize, spin: Spin) {
        let idx = self.geometry.index(i, j);
        self.spins[idx] = spin;
    }

    /// Component-wise mean over all sites. Not renormalized.
    pub fn mean(&self) -> Vector3<f64> {
        let sum = self.spins.iter().fold(Vector3::zeros(), |acc, s| acc + s);
        sum / self.spins.len() as f64
    }

    /// Euclidean norm of every site, logically shaped `(nx, ny, 1)`.
    pub fn magnitudes(&self) -> Vec<f64> {
        self.spins.iter().map(|s| s.norm()).collect()
    }

    /// Scales every site to unit length by its own magnitude.
    ///
    /// A site of exactly zero magnitude becomes NaN; callers never store one.
    pub fn normalize(&mut self) {
        for s in &mut self.spins {
            *s /= s.norm();
        }
    }

    /// Draws every component uniformly from `[-1, 1)` and projects each site onto
    /// the unit sphere. The projected distribution is biased toward the cube's
    /// corners, not uniform on the sphere.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for s in &mut self.spins {
            *s = Spin::new(
                2.0 * rng.gen::<f64>() - 1.0,
                2.0 * rng.gen::<f64>() - 1.0,
                2.0 * rng.gen::<f64>() - 1.0,
            );
        }
        self.normalize();
    }
}
