//! Batch battle runner.
//!
//! Every battle gets its own driver, buffer and RNG stream; battles share
//! nothing but the read-only teams, so they run on a rayon pool. Seeds are
//! drawn up front from the master PSRNG, which keeps a run reproducible
//! regardless of scheduling.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use pkmn_core::Outcome;
use pkmn_driver::{
    BattleDriver, ChoicePolicy, DriverConfig, FirstChoice, RandomChoice, TraceEntry, trace,
};
use pkmn_engine::BattleEngine;
use pkmn_rng::{Psrng, Seed};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::PolicyKind;
use crate::teams::Teams;

/// Seeds for one battle: the battle PSRNG and each side's policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSeeds {
    pub battle: Seed,
    pub p1: Seed,
    pub p2: Seed,
}

fn draw_seed(rng: &mut Psrng) -> Seed {
    let hi = rng.next() as u64;
    let lo = rng.next() as u64;
    Seed::new(hi << 32 | lo)
}

/// Derive `count` battle seed sets from the master seed.
pub fn derive_seeds(master: Seed, count: u32) -> Vec<BattleSeeds> {
    let mut rng = Psrng::new(master);
    (0..count)
        .map(|_| BattleSeeds {
            battle: draw_seed(&mut rng),
            p1: draw_seed(&mut rng),
            p2: draw_seed(&mut rng),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleReport {
    pub index: u32,
    pub seeds: BattleSeeds,
    pub outcome: Outcome,
    pub turns: u16,
    pub steps: u64,
    pub error: Option<String>,
    #[serde(skip)]
    pub trace: Vec<TraceEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub battles: u32,
    pub p1_wins: u32,
    pub p2_wins: u32,
    pub ties: u32,
    pub errors: u32,
    /// Stopped at the turn limit.
    pub unfinished: u32,
}

impl BatchSummary {
    pub fn from_reports(reports: &[BattleReport]) -> Self {
        let mut summary = Self {
            battles: reports.len() as u32,
            ..Self::default()
        };
        for report in reports {
            match report.outcome {
                Outcome::P1Win => summary.p1_wins += 1,
                Outcome::P2Win => summary.p2_wins += 1,
                Outcome::Tie => summary.ties += 1,
                Outcome::Error => summary.errors += 1,
                Outcome::Ongoing => summary.unfinished += 1,
            }
        }
        summary
    }
}

fn policy(kind: PolicyKind, seed: Seed) -> Box<dyn ChoicePolicy> {
    match kind {
        PolicyKind::First => Box::new(FirstChoice),
        PolicyKind::Random => Box::new(RandomChoice::new(seed)),
    }
}

/// Play one battle to the end (or the turn limit).
pub fn run_battle<E: BattleEngine>(
    engine: E,
    index: u32,
    seeds: BattleSeeds,
    teams: &Teams,
    policy_kind: PolicyKind,
    config: &DriverConfig,
) -> BattleReport {
    let mut report = BattleReport {
        index,
        seeds,
        outcome: Outcome::Error,
        turns: 0,
        steps: 0,
        error: None,
        trace: Vec::new(),
    };
    let mut driver = match BattleDriver::from_teams(
        engine,
        teams.p1.clone(),
        teams.p2.clone(),
        seeds.battle,
        config.clone(),
    ) {
        Ok(driver) => driver,
        Err(err) => {
            warn!(index, error = %err, "cannot set up battle");
            report.error = Some(err.to_string());
            return report;
        }
    };

    let result = driver.run(policy(policy_kind, seeds.p1), policy(policy_kind, seeds.p2));
    report.outcome = driver.outcome();
    report.turns = driver.state().turn;
    report.steps = driver.steps();
    report.error = result.err().map(|err| err.to_string());
    report.trace = driver.take_trace();
    debug!(index, outcome = %report.outcome, turns = report.turns, "battle finished");
    report
}

/// Run every battle, in parallel on up to `jobs` threads (0 = rayon default).
pub fn run_batch<E, F>(
    make_engine: F,
    seeds: &[BattleSeeds],
    teams: &Teams,
    policy_kind: PolicyKind,
    config: &DriverConfig,
    jobs: usize,
) -> anyhow::Result<Vec<BattleReport>>
where
    E: BattleEngine,
    F: Fn() -> E + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("building worker pool")?;
    info!(battles = seeds.len(), threads = pool.current_num_threads(), "running battles");

    let reports: Vec<BattleReport> = pool.install(|| {
        seeds
            .par_iter()
            .enumerate()
            .map(|(i, s)| run_battle(make_engine(), i as u32, *s, teams, policy_kind, config))
            .collect()
    });
    Ok(reports)
}

#[derive(Serialize)]
struct SummaryFile<'a> {
    summary: BatchSummary,
    battles: &'a [BattleReport],
}

/// One `battle-NNNN.json` trace per battle plus `summary.json`.
pub fn write_traces(dir: &Path, reports: &[BattleReport]) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    for report in reports {
        let path = dir.join(format!("battle-{:04}.json", report.index));
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        trace::write_json(BufWriter::new(file), &report.trace)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    let path = dir.join("summary.json");
    let summary = SummaryFile {
        summary: BatchSummary::from_reports(reports),
        battles: reports,
    };
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &summary)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(dir = %dir.display(), files = reports.len() + 1, "wrote traces");
    Ok(())
}
