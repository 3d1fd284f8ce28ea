use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::domain::RunConfig;
use crate::core::spins::SpinField;
use crate::engine::energy::EnergyTerms;
use crate::solvers::relax::RelaxationReport;

/// Final state handed to external viewers. Read-only view of the run.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub created: String,
    pub seed: u64,
    pub config: &'a RunConfig,
    pub terms: EnergyTerms,
    pub iterations: usize,
    pub accepted: usize,
    pub final_energy: f64,
    pub field: &'a SpinField,
}

impl<'a> Snapshot<'a> {
    pub fn new(
        config: &'a RunConfig,
        seed: u64,
        terms: EnergyTerms,
        report: &RelaxationReport,
        field: &'a SpinField,
    ) -> Self {
        Self {
            created: chrono::Local::now().to_rfc3339(),
            seed,
            config,
            terms,
            iterations: report.iterations,
            accepted: report.accepted,
            final_energy: report.final_energy,
            field,
        }
    }
}

/// Writes the energy trace as `iteration,energy` rows.
pub fn write_trace_csv(path: &Path, trace: &[f64]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create trace file {}", path.display()))?;
    wtr.write_record(["iteration", "energy"])?;
    for (iteration, energy) in trace.iter().enumerate() {
        wtr.write_record([iteration.to_string(), format!("{:.12e}", energy)])?;
    }
    wtr.flush().context("Failed to flush trace file")?;
    Ok(())
}

pub fn write_snapshot(path: &Path, snapshot: &Snapshot<'_>) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create snapshot file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), snapshot)
        .context("Failed to serialize snapshot")?;
    Ok(())
}

pub fn load_config(path: &Path) -> Result<RunConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open config file {}", path.display()))?;
    let config = serde_json::from_reader(file)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(config)
}
