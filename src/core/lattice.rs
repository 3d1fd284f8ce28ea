use serde::{Deserialize, Serialize};

/// Lattice direction of a nearest-neighbour bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BondAxis {
    X,
    Y,
}

/// An ordered nearest-neighbour pair. `first` is always the lower-coordinate site,
/// which fixes the sign of chiral (cross-product) terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub first: usize,
    pub second: usize,
    pub axis: BondAxis,
}

/// A bond seen from one of its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub index: usize,
    pub axis: BondAxis,
    /// True when the queried site is the `first` endpoint of the bond.
    pub site_is_first: bool,
}

/// Index arithmetic for an `nx * ny` grid with open boundaries.
/// Flat storage is row-major in `i`: `index = i * ny + j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatticeGeometry {
    nx: usize,
    ny: usize,
}

impl LatticeGeometry {
    pub fn new(nx: usize, ny: usize) -> Self {
        Self { nx, ny }
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    pub fn n_sites(&self) -> usize {
        self.nx * self.ny
    }

    #[inline(always)]
    pub fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.nx && j < self.ny);
        i * self.ny + j
    }

    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.ny, index % self.ny)
    }

    /// Number of open-boundary nearest-neighbour pairs.
    pub fn n_bonds(&self) -> usize {
        self.nx.saturating_sub(1) * self.ny + self.nx * self.ny.saturating_sub(1)
    }

    /// Every unordered nearest-neighbour pair exactly once, x-bonds first.
    pub fn bonds(&self) -> impl Iterator<Item = Bond> + '_ {
        let x_bonds = (0..self.nx.saturating_sub(1)).flat_map(move |i| {
            (0..self.ny).map(move |j| Bond {
                first: self.index(i, j),
                second: self.index(i + 1, j),
                axis: BondAxis::X,
            })
        });
        let y_bonds = (0..self.nx).flat_map(move |i| {
            (0..self.ny.saturating_sub(1)).map(move |j| Bond {
                first: self.index(i, j),
                second: self.index(i, j + 1),
                axis: BondAxis::Y,
            })
        });
        x_bonds.chain(y_bonds)
    }

    /// The up-to-four neighbours of `(i, j)`. Missing entries lie outside the lattice.
    pub fn neighbors(&self, i: usize, j: usize) -> [Option<Neighbor>; 4] {
        let lower_x = (i > 0).then(|| Neighbor {
            index: self.index(i - 1, j),
            axis: BondAxis::X,
            site_is_first: false,
        });
        let upper_x = (i + 1 < self.nx).then(|| Neighbor {
            index: self.index(i + 1, j),
            axis: BondAxis::X,
            site_is_first: true,
        });
        let lower_y = (j > 0).then(|| Neighbor {
            index: self.index(i, j - 1),
            axis: BondAxis::Y,
            site_is_first: false,
        });
        let upper_y = (j + 1 < self.ny).then(|| Neighbor {
            index: self.index(i, j + 1),
            axis: BondAxis::Y,
            site_is_first: true,
        });
        [lower_x, upper_x, lower_y, upper_y]
    }
}
