//! Simulation engine
//!
//! Runs a fixed-length sequence of independent win/loss trades, sizing risk
//! from current capital on every trade, and folds the running statistics
//! into an immutable [`SimulationResult`](crate::types::SimulationResult).

mod engine;
mod observer;
mod source;
mod stats;

pub use engine::{apply_outcome, run_simulation, run_simulation_with_observer, simulate_trade, size_risk};
pub use observer::TradeObserver;
pub use source::{FixedDraws, RngSource, UniformSource};
pub use stats::RunningStats;
