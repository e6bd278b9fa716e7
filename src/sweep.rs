//! Batch Monte Carlo over independent runs
//!
//! Runs the same strategy many times in parallel using Rayon. Every run owns
//! its own seeded generator, so a sweep with a base seed is reproducible no
//! matter how the work is scheduled.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

use crate::simulation::{run_simulation, RngSource};
use crate::types::{SimulationConfig, SimulationResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Number of independent runs
    pub runs: usize,

    /// Run `i` is seeded with `base_seed + i`; `None` draws fresh entropy
    pub base_seed: Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            runs: 10_000,
            base_seed: None,
        }
    }
}

/// The per-run figures a sweep keeps once the run is done
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub final_capital: f64,
    pub max_drawdown_pct: f64,
    pub longest_loss_streak: usize,
}

impl From<&SimulationResult> for RunOutcome {
    fn from(result: &SimulationResult) -> Self {
        Self {
            final_capital: result.final_capital(),
            max_drawdown_pct: result.max_drawdown_pct,
            longest_loss_streak: result.longest_loss_streak,
        }
    }
}

/// Aggregate statistics over every run of a sweep
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub runs: usize,
    pub mean_final_capital: f64,
    pub median_final_capital: f64,
    pub min_final_capital: f64,
    pub max_final_capital: f64,
    /// Share of runs that ended above the starting capital
    pub prob_profit: f64,
    /// Share of runs that lost more than half the starting capital
    pub prob_half_ruin: f64,
    pub mean_max_drawdown_pct: f64,
    pub worst_max_drawdown_pct: f64,
    pub mean_longest_loss_streak: f64,
    pub worst_longest_loss_streak: usize,
}

impl SweepSummary {
    pub fn from_runs(initial_capital: f64, runs: &[RunOutcome]) -> Self {
        if runs.is_empty() {
            return Self::default();
        }

        let n = runs.len() as f64;
        let mut finals: Vec<f64> = runs.iter().map(|r| r.final_capital).collect();
        finals.sort_by(|a, b| a.total_cmp(b));

        let median = if finals.len() % 2 == 0 {
            (finals[finals.len() / 2 - 1] + finals[finals.len() / 2]) / 2.0
        } else {
            finals[finals.len() / 2]
        };

        let profitable = finals.iter().filter(|&&c| c > initial_capital).count();
        let half_ruined = finals.iter().filter(|&&c| c < initial_capital * 0.5).count();

        Self {
            runs: runs.len(),
            mean_final_capital: finals.iter().sum::<f64>() / n,
            median_final_capital: median,
            min_final_capital: finals[0],
            max_final_capital: finals[finals.len() - 1],
            prob_profit: profitable as f64 / n,
            prob_half_ruin: half_ruined as f64 / n,
            mean_max_drawdown_pct: runs.iter().map(|r| r.max_drawdown_pct).sum::<f64>() / n,
            worst_max_drawdown_pct: runs.iter().map(|r| r.max_drawdown_pct).fold(0.0, f64::max),
            mean_longest_loss_streak: runs
                .iter()
                .map(|r| r.longest_loss_streak as f64)
                .sum::<f64>()
                / n,
            worst_longest_loss_streak: runs
                .iter()
                .map(|r| r.longest_loss_streak)
                .max()
                .unwrap_or(0),
        }
    }
}

/// Run `sweep.runs` independent simulations of `config` in parallel
pub fn run_sweep(config: &SimulationConfig, sweep: &SweepConfig) -> SweepSummary {
    let start = Instant::now();
    info!("Running sweep of {} simulations...", sweep.runs);

    // Trajectories are dropped inside the worker; only the scalars are kept
    let runs: Vec<RunOutcome> = (0..sweep.runs)
        .into_par_iter()
        .map(|i| {
            let mut source = match sweep.base_seed {
                Some(seed) => RngSource::seeded(seed.wrapping_add(i as u64)),
                None => RngSource::from_entropy(),
            };
            RunOutcome::from(&run_simulation(config, &mut source))
        })
        .collect();

    let summary = SweepSummary::from_runs(config.initial_capital, &runs);
    info!(
        "Sweep complete in {:.2}s: {:.2}% of runs profitable",
        start.elapsed().as_secs_f64(),
        summary.prob_profit * 100.0
    );
    summary
}

/// Print a sweep summary in the same style as the single-run report
pub fn print_summary(config: &SimulationConfig, summary: &SweepSummary) {
    println!("\n{}", "=".repeat(60));
    println!("MONTE CARLO SWEEP ({} runs)", summary.runs);
    println!("{}", "=".repeat(60));
    println!(
        "Win Rate: {:.1}% | R:R {:.2} | Risk {:.2}% | {} trades",
        config.win_rate_pct, config.risk_reward_ratio, config.risk_per_trade_pct, config.trade_count
    );
    println!("{}", "-".repeat(40));
    println!("  Mean final capital:   ${:.2}", summary.mean_final_capital);
    println!("  Median final capital: ${:.2}", summary.median_final_capital);
    println!(
        "  Range:                ${:.2} .. ${:.2}",
        summary.min_final_capital, summary.max_final_capital
    );
    println!("  Profitable runs:      {:.2}%", summary.prob_profit * 100.0);
    println!("  Lost over half:       {:.2}%", summary.prob_half_ruin * 100.0);
    println!(
        "  Max drawdown:         {:.2}% avg, {:.2}% worst",
        summary.mean_max_drawdown_pct, summary.worst_max_drawdown_pct
    );
    println!(
        "  Longest loss streak:  {:.1} avg, {} worst",
        summary.mean_longest_loss_streak, summary.worst_longest_loss_streak
    );
}
