use std::time::Instant;

use crossbeam_channel::Sender;
use log::{debug, info, warn};
use rand::Rng;
use serde::Serialize;

use crate::core::domain::{EnergyStrategy, RunConfig};
use crate::core::error::SimResult;
use crate::core::spins::Spin;
use crate::engine::energy::EnergyModel;
use crate::solvers::acceptance::{self, AcceptancePolicy, GreedyAcceptance};
use crate::solvers::{SolverEvent, StepStats};

/// Proposes a new unit spin near `s0`: `normalize(s0 + alpha * u)` with the
/// components of `u` drawn independently from `[-1, 1)` in x, y, z order.
pub fn perturb_spin<R: Rng + ?Sized>(s0: &Spin, alpha: f64, rng: &mut R) -> Spin {
    let delta = Spin::new(
        2.0 * rng.gen::<f64>() - 1.0,
        2.0 * rng.gen::<f64>() - 1.0,
        2.0 * rng.gen::<f64>() - 1.0,
    ) * alpha;
    let s1 = s0 + delta;
    s1 / s1.norm()
}

/// Outcome of one `drive` call.
#[derive(Debug, Clone, Serialize)]
pub struct RelaxationReport {
    pub policy: String,
    pub iterations: usize,
    pub accepted: usize,
    /// `trace[0]` is the starting energy, `trace[k]` the energy after iteration `k`.
    pub trace: Vec<f64>,
    pub final_energy: f64,
}

impl RelaxationReport {
    pub fn acceptance_ratio(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.accepted as f64 / self.iterations as f64
        }
    }
}

/// Single-site Monte Carlo relaxation.
///
/// Each iteration picks a site uniformly (row, then column), proposes a
/// perturbed spin via [`perturb_spin`] and lets the acceptance policy keep or
/// revert it. Holds no state between runs.
pub struct RelaxationDriver {
    policy: Box<dyn AcceptancePolicy>,
    strategy: EnergyStrategy,
    report_every: usize,
}

impl Default for RelaxationDriver {
    fn default() -> Self {
        Self::new(Box::new(GreedyAcceptance))
    }
}

impl RelaxationDriver {
    pub fn new(policy: Box<dyn AcceptancePolicy>) -> Self {
        Self {
            policy,
            strategy: EnergyStrategy::default(),
            report_every: 1000,
        }
    }

    pub fn from_config(config: &RunConfig) -> SimResult<Self> {
        Ok(Self::new(acceptance::from_config(config)?)
            .strategy(config.strategy)
            .report_every(config.report_every))
    }

    pub fn strategy(mut self, strategy: EnergyStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn report_every(mut self, every: usize) -> Self {
        self.report_every = every.max(1);
        self
    }

    pub fn policy(&self) -> &dyn AcceptancePolicy {
        self.policy.as_ref()
    }

    /// Runs `n` trial moves of step size `alpha` against `model`.
    ///
    /// Fails before touching the field if a coupling constant is out of domain.
    pub fn drive<R: Rng>(
        &self,
        model: &mut EnergyModel<'_>,
        n: usize,
        alpha: f64,
        rng: &mut R,
    ) -> SimResult<RelaxationReport> {
        self.run(model, n, alpha, rng, None)
    }

    /// Same as [`drive`](Self::drive), streaming progress over `tx`.
    pub fn drive_with_events<R: Rng>(
        &self,
        model: &mut EnergyModel<'_>,
        n: usize,
        alpha: f64,
        rng: &mut R,
        tx: &Sender<SolverEvent>,
    ) -> SimResult<RelaxationReport> {
        let result = self.run(model, n, alpha, rng, Some(tx));
        if let Err(e) = &result {
            let _ = tx.send(SolverEvent::Log(format!("Relaxation failed: {}", e)));
        }
        let _ = tx.send(SolverEvent::Finished);
        result
    }

    fn run<R: Rng>(
        &self,
        model: &mut EnergyModel<'_>,
        n: usize,
        alpha: f64,
        rng: &mut R,
        tx: Option<&Sender<SolverEvent>>,
    ) -> SimResult<RelaxationReport> {
        let (nx, ny) = model.field().dims();
        if alpha <= 0.0 {
            warn!("alpha = {} does not perturb spins; trials only renormalize", alpha);
        }

        // Validates J and D before any mutation.
        let mut energy = model.energy()?;
        let mut trace = Vec::with_capacity(n + 1);
        trace.push(energy);

        info!(
            "Relaxing {}x{} lattice: {} iterations, alpha = {}, policy = {}, strategy = {:?}, E0 = {:.6}",
            nx,
            ny,
            n,
            alpha,
            self.policy.name(),
            self.strategy,
            energy
        );

        let start_time = Instant::now();
        let mut accepted_count = 0;

        for iter in 1..=n {
            let i = rng.gen_range(0..nx);
            let j = rng.gen_range(0..ny);
            let s0 = model.field().get(i, j);
            let s1 = perturb_spin(&s0, alpha, rng);

            let accepted = match self.strategy {
                EnergyStrategy::Full => {
                    let e0 = model.energy()?;
                    model.field_mut().write(i, j, s1);
                    let e1 = model.energy()?;
                    if self.policy.accept(e1 - e0, rng) {
                        energy = e1;
                        true
                    } else {
                        model.field_mut().write(i, j, s0);
                        energy = e0;
                        false
                    }
                }
                EnergyStrategy::Incremental => {
                    let delta = model.delta_energy(i, j, &s1)?;
                    if self.policy.accept(delta, rng) {
                        model.field_mut().write(i, j, s1);
                        energy += delta;
                        true
                    } else {
                        false
                    }
                }
            };

            if accepted {
                accepted_count += 1;
            }
            trace.push(energy);

            if iter % self.report_every == 0 || iter == n {
                let stats = StepStats {
                    iteration: iter,
                    energy,
                    accepted: accepted_count,
                    acceptance_rate: accepted_count as f64 / iter as f64,
                };
                debug!(
                    "iter {}: E = {:.6}, accepted {}/{}",
                    iter, energy, accepted_count, iter
                );
                if let Some(tx) = tx {
                    let _ = tx.send(SolverEvent::Progress(stats));
                }
            }
        }

        let duration = start_time.elapsed().as_secs_f64();
        let rate = if duration > 0.0 { n as f64 / duration } else { 0.0 };
        info!(
            "Relaxation finished. Acceptance: {}/{}, E = {:.6}, {:.0} trials/s",
            accepted_count, n, energy, rate
        );
        if let Some(tx) = tx {
            let _ = tx.send(SolverEvent::Log(format!(
                "Finished. Acceptance: {}/{}",
                accepted_count, n
            )));
        }

        Ok(RelaxationReport {
            policy: self.policy.name().to_string(),
            iterations: n,
            accepted: accepted_count,
            trace,
            final_energy: energy,
        })
    }
}
