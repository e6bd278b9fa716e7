//! Validation for simulation parameters
//!
//! The engine trusts its input, so every entry point (prompt, CLI flags,
//! sweeps) runs [`SimulationConfig::validate`] before simulating.

use thiserror::Error;

use crate::types::SimulationConfig;

/// Largest trade count a single run accepts
///
/// The trajectory holds one `f64` per trade, so this caps a run at ~80 MB.
pub const MAX_TRADES: usize = 10_000_000;

/// Rejected simulation parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Trade count must be greater than zero")]
    NoTrades,

    #[error("Trade count must be at most {max}, got {0}", max = MAX_TRADES)]
    TooManyTrades(usize),

    #[error("Initial capital must be a positive amount, got {0}")]
    InitialCapital(f64),

    #[error("Win rate must be between 0 and 100%, got {0}")]
    WinRate(f64),

    #[error("Risk reward ratio must be zero or positive, got {0}")]
    RiskReward(f64),

    #[error("Risk per trade must be between 0 and 100%, got {0}")]
    RiskPerTrade(f64),
}

fn in_percent_range(value: f64) -> bool {
    (0.0..=100.0).contains(&value)
}

impl SimulationConfig {
    /// Check every field, reporting the first invalid one
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trade_count == 0 {
            return Err(ConfigError::NoTrades);
        }
        if self.trade_count > MAX_TRADES {
            return Err(ConfigError::TooManyTrades(self.trade_count));
        }
        if !self.initial_capital.is_finite() || self.initial_capital <= 0.0 {
            return Err(ConfigError::InitialCapital(self.initial_capital));
        }
        if !in_percent_range(self.win_rate_pct) {
            return Err(ConfigError::WinRate(self.win_rate_pct));
        }
        if !self.risk_reward_ratio.is_finite() || self.risk_reward_ratio < 0.0 {
            return Err(ConfigError::RiskReward(self.risk_reward_ratio));
        }
        if !in_percent_range(self.risk_per_trade_pct) {
            return Err(ConfigError::RiskPerTrade(self.risk_per_trade_pct));
        }
        Ok(())
    }
}
