//! Two-dimensional spin-lattice relaxation: a unit-spin field, a Zeeman +
//! anisotropy + exchange + DMI energy functional, and a single-site Monte Carlo
//! driver with pluggable acceptance.

pub mod core {
    pub mod domain;
    pub mod error;
    pub mod lattice;
    pub mod spins;
}

pub mod engine {
    pub mod energy;
}

pub mod interface {
    pub mod output;
}

pub mod solvers;
