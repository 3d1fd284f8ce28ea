use rand::{Rng, RngCore};

use crate::core::domain::{AcceptanceType, RunConfig};
use crate::core::error::{SimError, SimResult};

/// Decides whether a trial move with energy change `delta_e` is kept.
///
/// Implementations may draw from `rng`; any draw happens after the driver's
/// site and perturbation draws for the same iteration.
pub trait AcceptancePolicy: Send + Sync {
    fn accept(&self, delta_e: f64, rng: &mut dyn RngCore) -> bool;

    fn name(&self) -> &str;
}

/// Zero-temperature quench: only strictly improving moves are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAcceptance;

impl AcceptancePolicy for GreedyAcceptance {
    fn accept(&self, delta_e: f64, _rng: &mut dyn RngCore) -> bool {
        delta_e < 0.0
    }

    fn name(&self) -> &str {
        "greedy"
    }
}

/// Boltzmann acceptance, `min(1, exp(-ΔE / T))`, with `T` in energy units.
#[derive(Debug, Clone, Copy)]
pub struct MetropolisAcceptance {
    temperature: f64,
}

impl MetropolisAcceptance {
    pub fn new(temperature: f64) -> SimResult<Self> {
        if !temperature.is_finite() || temperature < 0.0 {
            return Err(SimError::InvalidTemperature(temperature));
        }
        Ok(Self { temperature })
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl AcceptancePolicy for MetropolisAcceptance {
    fn accept(&self, delta_e: f64, rng: &mut dyn RngCore) -> bool {
        if delta_e <= 0.0 {
            return true;
        }
        if self.temperature <= 1e-12 {
            return false;
        }
        let prob = (-delta_e / self.temperature).exp();
        rng.gen::<f64>() < prob
    }

    fn name(&self) -> &str {
        "metropolis"
    }
}

/// Builds the policy selected by a run configuration.
pub fn from_config(config: &RunConfig) -> SimResult<Box<dyn AcceptancePolicy>> {
    match config.acceptance {
        AcceptanceType::Greedy => Ok(Box::new(GreedyAcceptance)),
        AcceptanceType::Metropolis => Ok(Box::new(MetropolisAcceptance::new(config.temperature)?)),
    }
}
