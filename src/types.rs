// Shared types for the simulator - used by the engine, the binary and the reporting modules

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a single simulated trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win => write!(f, "win"),
            Self::Loss => write!(f, "loss"),
        }
    }
}

/// Strategy parameters for one run
///
/// Percentages are on the 0-100 scale. The engine assumes the config has been
/// checked with `SimulationConfig::validate` by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of trades to simulate
    pub trade_count: usize,

    /// Starting capital in dollars
    pub initial_capital: f64,

    /// Probability that a trade wins, in percent
    pub win_rate_pct: f64,

    /// Reward multiple paid on the risked amount when a trade wins
    pub risk_reward_ratio: f64,

    /// Percent of *current* capital risked on every trade
    pub risk_per_trade_pct: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trade_count: 100,
            initial_capital: 10_000.0,
            win_rate_pct: 40.0,
            risk_reward_ratio: 2.0,
            risk_per_trade_pct: 1.0,
        }
    }
}

impl SimulationConfig {
    pub fn win_rate_fraction(&self) -> f64 {
        self.win_rate_pct / 100.0
    }
}

/// One trade as seen by observers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeEvent {
    /// Zero-based trade index
    pub trade_index: usize,
    pub risk_amount: f64,
    pub outcome: Outcome,
    pub capital_delta: f64,
    /// Capital after this trade was applied
    pub capital: f64,
}

/// Final outcome of a run: trajectory plus summary statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Capital after each trade, index 0 is the starting capital
    pub capital_trajectory: Vec<f64>,
    pub win_count: usize,
    pub loss_count: usize,
    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,
    pub max_drawdown_pct: f64,
    pub max_runup_pct: f64,
}

/// How a run ended relative to the starting capital
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Net profit in dollars
    Profit(f64),
    BrokeEven,
    /// Net loss in dollars (positive)
    Loss(f64),
}

impl SimulationResult {
    pub fn initial_capital(&self) -> f64 {
        self.capital_trajectory.first().copied().unwrap_or_default()
    }

    pub fn final_capital(&self) -> f64 {
        self.capital_trajectory.last().copied().unwrap_or_default()
    }

    pub fn trade_count(&self) -> usize {
        self.capital_trajectory.len().saturating_sub(1)
    }

    pub fn net_profit(&self) -> f64 {
        self.final_capital() - self.initial_capital()
    }

    /// Return on investment as a fraction (0.25 = +25%)
    ///
    /// Zero when the starting capital is zero.
    pub fn return_on_investment(&self) -> f64 {
        let initial = self.initial_capital();
        if initial == 0.0 {
            return 0.0;
        }
        self.net_profit() / initial
    }

    pub fn verdict(&self) -> Verdict {
        let final_capital = self.final_capital();
        let initial = self.initial_capital();
        if final_capital == initial {
            Verdict::BrokeEven
        } else if final_capital > initial {
            Verdict::Profit(final_capital - initial)
        } else {
            Verdict::Loss(initial - final_capital)
        }
    }
}
