//! Trade loop

use tracing::{debug, info};

use super::observer::TradeObserver;
use super::source::UniformSource;
use super::stats::RunningStats;
use crate::config::MAX_TRADES;
use crate::types::{Outcome, SimulationConfig, SimulationResult, TradeEvent};

/// Draw one trade outcome; wins when the draw is `<= win_rate_fraction`
pub fn simulate_trade<S: UniformSource + ?Sized>(win_rate_fraction: f64, source: &mut S) -> Outcome {
    if source.next_uniform() <= win_rate_fraction {
        Outcome::Win
    } else {
        Outcome::Loss
    }
}

/// Dollar risk for the next trade, always taken from current capital
///
/// Zero or negative capital gives a zero or negative risk amount.
pub fn size_risk(risk_per_trade_pct: f64, current_capital: f64) -> f64 {
    risk_per_trade_pct / 100.0 * current_capital
}

/// Capital change for a resolved trade
pub fn apply_outcome(outcome: Outcome, risk_amount: f64, risk_reward_ratio: f64) -> f64 {
    match outcome {
        Outcome::Win => risk_amount * risk_reward_ratio,
        Outcome::Loss => -risk_amount,
    }
}

/// Up-front allocation for the trajectory; unvalidated counts grow on demand
fn trajectory_capacity(trade_count: usize) -> usize {
    trade_count.min(MAX_TRADES).saturating_add(1)
}

/// Run the full trade sequence
pub fn run_simulation<S: UniformSource + ?Sized>(
    config: &SimulationConfig,
    source: &mut S,
) -> SimulationResult {
    run_simulation_with_observer(config, source, &mut ())
}

/// Run the full trade sequence, reporting every trade to `observer`
///
/// Capital is not floored: once it reaches zero every later trade risks
/// nothing and the run continues to the configured trade count.
pub fn run_simulation_with_observer<S, O>(
    config: &SimulationConfig,
    source: &mut S,
    observer: &mut O,
) -> SimulationResult
where
    S: UniformSource + ?Sized,
    O: TradeObserver + ?Sized,
{
    let win_rate = config.win_rate_fraction();
    let mut capital = config.initial_capital;
    let mut stats = RunningStats::new(capital);
    let mut trajectory = Vec::with_capacity(trajectory_capacity(config.trade_count));
    trajectory.push(capital);

    for trade_index in 0..config.trade_count {
        let risk_amount = size_risk(config.risk_per_trade_pct, capital);
        let outcome = simulate_trade(win_rate, source);
        let capital_delta = apply_outcome(outcome, risk_amount, config.risk_reward_ratio);

        capital += capital_delta;
        trajectory.push(capital);
        stats.record(outcome, capital);

        debug!(
            "Trade {}: {} risk=${:.2} delta={:+.2} capital=${:.2}",
            trade_index + 1,
            outcome,
            risk_amount,
            capital_delta,
            capital
        );

        observer.on_trade(&TradeEvent {
            trade_index,
            risk_amount,
            outcome,
            capital_delta,
            capital,
        });
    }

    info!(
        "Simulated {} trades: {} wins, {} losses, final capital ${:.2}",
        config.trade_count, stats.win_count, stats.loss_count, capital
    );

    stats.into_result(trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::FixedDraws;

    fn scenario_config(win_rate_pct: f64) -> SimulationConfig {
        SimulationConfig {
            trade_count: 5,
            initial_capital: 1000.0,
            win_rate_pct,
            risk_reward_ratio: 2.0,
            risk_per_trade_pct: 10.0,
        }
    }

    #[test]
    fn test_simulate_trade_boundary() {
        // Draw equal to the win rate is a win
        assert_eq!(simulate_trade(0.5, &mut FixedDraws::constant(0.5)), Outcome::Win);
        assert_eq!(simulate_trade(0.5, &mut FixedDraws::constant(0.51)), Outcome::Loss);
        assert_eq!(simulate_trade(0.0, &mut FixedDraws::constant(0.3)), Outcome::Loss);
        assert_eq!(simulate_trade(1.0, &mut FixedDraws::constant(0.999)), Outcome::Win);
    }

    #[test]
    fn test_size_risk_and_apply_outcome() {
        assert_eq!(size_risk(10.0, 1000.0), 100.0);
        assert_eq!(size_risk(10.0, 0.0), 0.0);
        assert_eq!(size_risk(0.0, 1000.0), 0.0);

        assert_eq!(apply_outcome(Outcome::Win, 100.0, 2.0), 200.0);
        assert_eq!(apply_outcome(Outcome::Loss, 100.0, 2.0), -100.0);
        // Pure: repeat calls give the same answer
        assert_eq!(apply_outcome(Outcome::Win, 100.0, 2.0), 200.0);
    }

    #[test]
    fn test_trajectory_capacity_never_overflows() {
        assert_eq!(trajectory_capacity(0), 1);
        assert_eq!(trajectory_capacity(5), 6);
        assert_eq!(trajectory_capacity(usize::MAX), MAX_TRADES + 1);
    }

    #[test]
    fn test_always_win() {
        let config = scenario_config(100.0);
        let result = run_simulation(&config, &mut FixedDraws::new(vec![0.0, 0.42, 0.99]).unwrap());

        assert_eq!(result.win_count, 5);
        assert_eq!(result.loss_count, 0);
        assert_eq!(result.longest_win_streak, 5);
        assert_eq!(result.longest_loss_streak, 0);
        assert!(result.final_capital() > 1000.0);
        assert_eq!(result.max_drawdown_pct, 0.0);
        // Compounding: 1000 * 1.2^5
        assert!((result.final_capital() - 1000.0 * 1.2f64.powi(5)).abs() < 1e-6);
    }

    #[test]
    fn test_always_lose() {
        let config = scenario_config(0.0);
        let result = run_simulation(&config, &mut FixedDraws::constant(0.5));

        assert_eq!(result.loss_count, 5);
        assert_eq!(result.win_count, 0);
        assert_eq!(result.longest_loss_streak, 5);
        assert_eq!(result.max_runup_pct, 0.0);
        for pair in result.capital_trajectory.windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn test_zero_trades() {
        let config = SimulationConfig {
            trade_count: 0,
            ..scenario_config(50.0)
        };
        let result = run_simulation(&config, &mut FixedDraws::constant(0.1));

        assert_eq!(result.capital_trajectory, vec![1000.0]);
        assert_eq!(result.win_count, 0);
        assert_eq!(result.loss_count, 0);
        assert_eq!(result.longest_win_streak, 0);
        assert_eq!(result.longest_loss_streak, 0);
        assert_eq!(result.max_drawdown_pct, 0.0);
        assert_eq!(result.max_runup_pct, 0.0);
    }

    #[test]
    fn test_capital_wiped_out() {
        let config = SimulationConfig {
            risk_per_trade_pct: 100.0,
            ..scenario_config(0.0)
        };
        let result = run_simulation(&config, &mut FixedDraws::constant(0.5));

        assert_eq!(result.capital_trajectory, vec![1000.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(result.max_drawdown_pct, 100.0);
        assert_eq!(result.max_runup_pct, 0.0);
        assert_eq!(result.loss_count, 5);
    }

    #[test]
    fn test_observer_sees_every_trade() {
        let config = scenario_config(50.0);
        let mut events = Vec::new();
        let result = run_simulation_with_observer(
            &config,
            &mut FixedDraws::new(vec![0.1, 0.9]).unwrap(),
            &mut |event: &TradeEvent| events.push(*event),
        );

        assert_eq!(events.len(), 5);
        assert_eq!(events[0].trade_index, 0);
        assert_eq!(events[0].outcome, Outcome::Win);
        assert_eq!(events[0].risk_amount, 100.0);
        assert_eq!(events[0].capital_delta, 200.0);
        assert_eq!(events[1].outcome, Outcome::Loss);
        // Second trade risks 10% of 1200
        assert!((events[1].risk_amount - 120.0).abs() < 1e-9);
        for (i, event) in events.iter().enumerate() {
            assert_eq!(event.capital, result.capital_trajectory[i + 1]);
        }
    }
}
