//! Running statistics for a single simulation run

use crate::types::{Outcome, SimulationResult};

/// Mutable state updated after every trade
///
/// Peak and trough include the starting capital. Drawdown and run-up are
/// percentages and only ever grow.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningStats {
    pub win_count: usize,
    pub loss_count: usize,
    pub current_win_streak: usize,
    pub current_loss_streak: usize,
    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,
    pub peak_capital: f64,
    pub trough_capital: f64,
    pub max_drawdown_pct: f64,
    pub max_runup_pct: f64,
}

impl RunningStats {
    pub fn new(initial_capital: f64) -> Self {
        Self {
            win_count: 0,
            loss_count: 0,
            current_win_streak: 0,
            current_loss_streak: 0,
            longest_win_streak: 0,
            longest_loss_streak: 0,
            peak_capital: initial_capital,
            trough_capital: initial_capital,
            max_drawdown_pct: 0.0,
            max_runup_pct: 0.0,
        }
    }

    /// Fold one trade into the running state
    pub fn record(&mut self, outcome: Outcome, capital: f64) {
        match outcome {
            Outcome::Win => {
                self.win_count += 1;
                self.current_win_streak += 1;
                self.current_loss_streak = 0;
                self.longest_win_streak = self.longest_win_streak.max(self.current_win_streak);
            }
            Outcome::Loss => {
                self.loss_count += 1;
                self.current_loss_streak += 1;
                self.current_win_streak = 0;
                self.longest_loss_streak = self.longest_loss_streak.max(self.current_loss_streak);
            }
        }

        if capital > self.peak_capital {
            self.peak_capital = capital;
        }
        if capital < self.trough_capital {
            self.trough_capital = capital;
        }

        self.max_drawdown_pct = self.max_drawdown_pct.max(self.drawdown_pct(capital));
        self.max_runup_pct = self.max_runup_pct.max(self.runup_pct(capital));
    }

    /// Retracement from peak, 0 when the peak is not positive
    pub fn drawdown_pct(&self, capital: f64) -> f64 {
        if self.peak_capital <= 0.0 {
            return 0.0;
        }
        (self.peak_capital - capital) / self.peak_capital * 100.0
    }

    /// Advance from trough, 0 when the trough is not positive
    pub fn runup_pct(&self, capital: f64) -> f64 {
        if self.trough_capital <= 0.0 {
            return 0.0;
        }
        (capital - self.trough_capital) / self.trough_capital * 100.0
    }

    pub fn into_result(self, capital_trajectory: Vec<f64>) -> SimulationResult {
        SimulationResult {
            capital_trajectory,
            win_count: self.win_count,
            loss_count: self.loss_count,
            longest_win_streak: self.longest_win_streak,
            longest_loss_streak: self.longest_loss_streak,
            max_drawdown_pct: self.max_drawdown_pct,
            max_runup_pct: self.max_runup_pct,
        }
    }
}
