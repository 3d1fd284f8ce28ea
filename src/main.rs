use std::path::PathBuf;
use std::thread;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossbeam_channel::unbounded;
use log::{error, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use mcsim::core::domain::{AcceptanceType, EnergyStrategy, RunConfig};
use mcsim::core::spins::SpinField;
use mcsim::engine::energy::EnergyModel;
use mcsim::interface::output::{self, Snapshot};
use mcsim::solvers::relax::RelaxationDriver;
use mcsim::solvers::SolverEvent;

// --- CLI Definitions ---

#[derive(Parser, Debug)]
#[command(author, version, about = "Monte Carlo relaxation of 2D spin lattices", long_about = None)]
struct Args {
    /// JSON run configuration; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lattice size along x
    #[arg(long)]
    nx: Option<usize>,

    /// Lattice size along y
    #[arg(long)]
    ny: Option<usize>,

    /// Number of trial moves
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Perturbation step size
    #[arg(short, long)]
    alpha: Option<f64>,

    /// RNG seed (0 = random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Acceptance policy (greedy, metropolis)
    #[arg(long)]
    acceptance: Option<String>,

    /// Metropolis temperature, in energy units
    #[arg(short, long)]
    temperature: Option<f64>,

    /// Energy evaluation (incremental, full)
    #[arg(long)]
    strategy: Option<String>,

    /// Write the energy trace here (CSV)
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Write the final lattice here (JSON)
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

// --- Initialization Helpers ---

fn build_config(args: &Args) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => output::load_config(path)?,
        None => RunConfig::default(),
    };

    if let Some(nx) = args.nx {
        config.nx = nx;
    }
    if let Some(ny) = args.ny {
        config.ny = ny;
    }
    if let Some(n) = args.iterations {
        config.iterations = n;
    }
    if let Some(alpha) = args.alpha {
        config.alpha = alpha;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(t) = args.temperature {
        config.temperature = t;
    }

    if let Some(name) = &args.acceptance {
        config.acceptance = match name.to_lowercase().as_str() {
            "greedy" => AcceptanceType::Greedy,
            "metropolis" | "mc" => AcceptanceType::Metropolis,
            other => return Err(anyhow!("Unknown acceptance policy '{}'", other)),
        };
    }
    if let Some(name) = &args.strategy {
        config.strategy = match name.to_lowercase().as_str() {
            "full" => EnergyStrategy::Full,
            "incremental" | "local" => EnergyStrategy::Incremental,
            other => return Err(anyhow!("Unknown energy strategy '{}'", other)),
        };
    }

    if config.seed == 0 {
        config.seed = rand::thread_rng().gen_range(1..u64::MAX);
    }
    Ok(config)
}

// --- Main ---

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // 1. Configuration
    let config = build_config(&args)?;
    info!("Seed: {} (replay with --seed {})", config.seed, config.seed);

    // 2. Initial State
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut field = SpinField::new(&[config.nx, config.ny], &config.initial)
        .context("Failed to build spin lattice")?;
    if config.randomize {
        field.randomize(&mut rng);
    }
    let driver = RelaxationDriver::from_config(&config)?;

    // 3. Spawn Solver Thread
    let (tx, rx) = unbounded();
    let worker_config = config.clone();

    let worker = thread::Builder::new()
        .name("Relaxation-Worker".to_string())
        .spawn(move || -> Result<_> {
            let report = {
                let mut model = EnergyModel::new(&mut field, worker_config.interactions.clone())?;
                driver.drive_with_events(
                    &mut model,
                    worker_config.iterations,
                    worker_config.alpha,
                    &mut rng,
                    &tx,
                )?
            };
            Ok((field, report))
        })?;

    // 4. Event Loop
    for event in rx {
        match event {
            SolverEvent::Log(msg) => info!("{}", msg),
            SolverEvent::Progress(stats) => info!(
                "[{:>8}] E = {:.6}  acceptance {:.3}",
                stats.iteration, stats.energy, stats.acceptance_rate
            ),
            SolverEvent::Finished => break,
        }
    }

    let (mut field, report) = worker
        .join()
        .map_err(|_| anyhow!("Relaxation worker panicked"))?
        .map_err(|e| {
            error!("{:#}", e);
            e
        })?;

    // 5. Results
    let model = EnergyModel::new(&mut field, config.interactions.clone())?;
    let terms = model.terms()?;
    info!(
        "Final energy {:.6} (zeeman {:.6}, anisotropy {:.6}, exchange {:.6}, dmi {:.6}), mean spin {:?}",
        terms.total(),
        terms.zeeman,
        terms.anisotropy,
        terms.exchange,
        terms.dmi,
        model.field().mean().as_slice()
    );
    drop(model);

    if let Some(path) = &args.trace {
        output::write_trace_csv(path, &report.trace)?;
        info!("Energy trace written to {}", path.display());
    }
    if let Some(path) = &args.snapshot {
        let snapshot = Snapshot::new(&config, config.seed, terms, &report, &field);
        output::write_snapshot(path, &snapshot)?;
        info!("Snapshot written to {}", path.display());
    }

    Ok(())
}
