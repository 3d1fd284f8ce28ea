/// Snapshot of the relaxation after a given iteration.
/// Used for telemetry and progress logging.
#[derive(Debug, Clone, Default)]
pub struct StepStats {
    pub iteration: usize,
    pub energy: f64,
    pub accepted: usize,
    /// Accepted / attempted so far, 0.0 to 1.0.
    pub acceptance_rate: f64,
}

/// Events emitted by solvers to the main thread.
#[derive(Debug, Clone)]
pub enum SolverEvent {
    /// Diagnostic log message.
    Log(String),

    /// Periodic progress report.
    Progress(StepStats),

    /// Solver has finished its run.
    Finished,
}

pub mod acceptance;
pub mod relax;
