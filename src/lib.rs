// Library crate - exports the simulation engine and its collaborators

pub mod types;
pub mod config;
pub mod simulation;
pub mod report;
pub mod narration;
pub mod run_log;
pub mod trajectory;
pub mod prompt;
pub mod sweep;

// Re-export commonly used types
pub use types::*;
pub use config::ConfigError;
pub use simulation::{run_simulation, run_simulation_with_observer, FixedDraws, RngSource, TradeObserver, UniformSource};
