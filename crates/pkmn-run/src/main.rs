//! Run seeded Gen I battles and dump their traces.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use pkmn_rng::Seed;
use pkmn_run::{
    BatchSummary, BattleReport, EngineKind, PolicyKind, RunConfig, Teams, TeamsFile,
    derive_seeds, run_batch, write_traces,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "pkmn-run")]
#[command(author, version, about = "Run seeded battles through libpkmn", long_about = None)]
struct Args {
    /// Number of battles
    #[arg(short = 'n', long)]
    battles: Option<u32>,

    /// Master seed (decimal, 0x-hex, or four comma-separated words)
    #[arg(short, long)]
    seed: Option<Seed>,

    /// Team file (JSON)
    #[arg(short, long)]
    teams: Option<PathBuf>,

    /// Run configuration (JSON); flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for per-battle traces
    #[arg(short = 'o', long)]
    trace_out: Option<PathBuf>,

    /// Worker threads (0 = one per core)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Engine: stub or native
    #[arg(long)]
    engine: Option<EngineKind>,

    /// Choice policy: first or random
    #[arg(long)]
    policy: Option<PolicyKind>,

    /// Turn limit per battle
    #[arg(long)]
    max_turns: Option<u16>,

    /// Keep the engine's protocol log in the traces
    #[arg(long)]
    protocol: bool,

    /// Debug logging (RUST_LOG still wins when set)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(self, config: &mut RunConfig) {
        if let Some(battles) = self.battles {
            config.battles = battles;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.teams.is_some() {
            config.teams = self.teams;
        }
        if self.trace_out.is_some() {
            config.trace_out = self.trace_out;
        }
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
        if let Some(engine) = self.engine {
            config.engine = engine;
        }
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        if let Some(max_turns) = self.max_turns {
            config.driver.max_turns = max_turns;
        }
        if self.protocol {
            config.driver.protocol_log = true;
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(config: &RunConfig, teams: &Teams, seed: Seed) -> anyhow::Result<Vec<BattleReport>> {
    let seeds = derive_seeds(seed, config.battles);
    match config.engine {
        EngineKind::Stub => run_batch(
            pkmn_engine::StubEngine::new,
            &seeds,
            teams,
            config.policy,
            &config.driver,
            config.jobs,
        ),
        #[cfg(feature = "native")]
        EngineKind::Native => run_batch(
            pkmn_engine::NativeEngine::new,
            &seeds,
            teams,
            config.policy,
            &config.driver,
            config.jobs,
        ),
        #[cfg(not(feature = "native"))]
        EngineKind::Native => bail!("built without the `native` feature"),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    args.apply(&mut config);

    let teams = match &config.teams {
        Some(path) => TeamsFile::load(path)
            .with_context(|| format!("loading teams from {}", path.display()))?,
        None => TeamsFile::default(),
    }
    .build()?;
    if config.battles == 0 {
        bail!("nothing to run: --battles is 0");
    }

    let seed = config.seed.unwrap_or_else(Seed::from_entropy);
    info!(%seed, battles = config.battles, engine = %config.engine, policy = %config.policy, "starting");

    let reports = run(&config, &teams, seed)?;
    if let Some(dir) = &config.trace_out {
        write_traces(dir, &reports)?;
    }

    let summary = BatchSummary::from_reports(&reports);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
