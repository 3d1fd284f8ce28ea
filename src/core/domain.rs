use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::core::spins::SPIN_UP;

// --- Physics Types ---

/// Physical constants of the energy functional (dimensionless units).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interactions {
    /// External field B.
    pub b: Vector3<f64>,
    /// Uniaxial anisotropy constant K, any sign.
    pub k: f64,
    /// Anisotropy axis u, normalized when the energy model is built.
    pub u: Vector3<f64>,
    /// Exchange constant J, must be >= 0.
    pub j: f64,
    /// Dzyaloshinskii-Moriya constant D, must be >= 0.
    pub d: f64,
}

impl Default for Interactions {
    fn default() -> Self {
        Self {
            b: Vector3::new(0.0, 0.0, 0.1),
            k: 0.1,
            u: Vector3::new(0.0, 0.0, 1.0),
            j: 1.0,
            d: 0.5,
        }
    }
}

// --- Configuration Types ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AcceptanceType {
    /// Keep a trial only if it strictly lowers the energy.
    Greedy,
    /// Boltzmann acceptance at `RunConfig::temperature`.
    Metropolis,
}

/// How the driver obtains the energy change of a trial move.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnergyStrategy {
    /// Recompute the whole lattice before and after every trial.
    Full,
    /// Only the trial site and its neighbours.
    #[default]
    Incremental,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub nx: usize,
    pub ny: usize,
    pub initial: [f64; 3],
    /// Replace the uniform initial state with random spins.
    pub randomize: bool,
    pub interactions: Interactions,

    // Relaxation
    pub iterations: usize,
    pub alpha: f64,
    pub acceptance: AcceptanceType,
    pub temperature: f64,
    pub strategy: EnergyStrategy,

    /// 0 draws a fresh seed from entropy.
    pub seed: u64,
    /// Progress event cadence, in iterations.
    pub report_every: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            nx: 20,
            ny: 20,
            initial: SPIN_UP,
            randomize: true,
            interactions: Interactions::default(),
            iterations: 100_000,
            alpha: 0.1,
            acceptance: AcceptanceType::Greedy,
            temperature: 0.0,
            strategy: EnergyStrategy::Incremental,
            seed: 0,
            report_every: 1000,
        }
    }
}
