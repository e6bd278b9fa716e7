//! Append-only text log of finished runs

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::report::{format_currency, format_grouped, verdict_lines};
use crate::types::{SimulationConfig, SimulationResult};

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "log.txt";

/// One finished run, ready to be written
#[derive(Debug, Clone)]
pub struct RunRecord<'a> {
    pub config: &'a SimulationConfig,
    pub result: &'a SimulationResult,
    pub timestamp: DateTime<Local>,
}

impl<'a> RunRecord<'a> {
    pub fn new(config: &'a SimulationConfig, result: &'a SimulationResult) -> Self {
        Self {
            config,
            result,
            timestamp: Local::now(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn render(&self) -> String {
        let result = self.result;
        let mut lines = vec![
            String::new(),
            String::new(),
            format!("Date and time = {}", self.timestamp.format("%d/%m/%Y %H:%M:%S")),
            "------------SIMULATION RESULTS------------".to_string(),
            format!("You simulated {} trades", self.config.trade_count),
            format!("Your strategy win rate was {:.2}%", self.config.win_rate_pct),
            format!("Your R:R was {:?}", self.config.risk_reward_ratio),
            format!("Your risk per trade was {:.2}%", self.config.risk_per_trade_pct),
            format!("Your initial capital is ${}", format_grouped(self.config.initial_capital, 0)),
            format!("You won {} trades", result.win_count),
            format!("You lost {} trades", result.loss_count),
            format!("Longest win streak: {} trades", result.longest_win_streak),
            format!("Longest loss streak: {} trades", result.longest_loss_streak),
            format!("Max run-up: {:.2}%", result.max_runup_pct),
            format!("Max drawdown: {:.2}%", result.max_drawdown_pct),
            format!("Your final capital is {}", format_currency(result.final_capital())),
        ];
        lines.extend(verdict_lines(result));
        lines.push("-".repeat(42));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Storage handle for run records
pub struct RunLog<W: Write> {
    writer: W,
}

impl RunLog<File> {
    /// Open `path` for appending, creating it if needed
    pub fn append_to(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open run log {:?}", path))?;
        Ok(Self::new(file))
    }
}

impl<W: Write> RunLog<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write(&mut self, record: &RunRecord<'_>) -> Result<()> {
        self.writer
            .write_all(record.render().as_bytes())
            .context("Failed to write run record")?;
        self.writer.flush().context("Failed to flush run log")?;
        info!("Logged run of {} trades", record.config.trade_count);
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> (SimulationConfig, SimulationResult) {
        let config = SimulationConfig {
            trade_count: 2,
            initial_capital: 10_000.0,
            win_rate_pct: 50.0,
            risk_reward_ratio: 1.5,
            risk_per_trade_pct: 2.0,
        };
        let result = SimulationResult {
            capital_trajectory: vec![10_000.0, 10_300.0, 10_094.0],
            win_count: 1,
            loss_count: 1,
            longest_win_streak: 1,
            longest_loss_streak: 1,
            max_drawdown_pct: 2.0,
            max_runup_pct: 3.0,
        };
        (config, result)
    }

    #[test]
    fn test_render_record() {
        let (config, result) = sample();
        let timestamp = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let text = RunRecord::new(&config, &result).with_timestamp(timestamp).render();

        assert!(text.starts_with("\n\nDate and time = 09/03/2024 14:05:07\n"));
        assert!(text.contains("You simulated 2 trades"));
        assert!(text.contains("Your strategy win rate was 50.00%"));
        assert!(text.contains("Your R:R was 1.5\n"));
        assert!(text.contains("Your initial capital is $10,000"));
        assert!(text.contains("Your final capital is $10,094.00"));
        assert!(text.contains("You made a profit of $94.00"));
        assert!(text.contains("Your ROI is 0.94%"));
        assert!(text.ends_with("------------------------------------------\n"));
    }

    #[test]
    fn test_whole_risk_reward_keeps_decimal() {
        let (mut config, result) = sample();
        config.risk_reward_ratio = 2.0;
        let text = RunRecord::new(&config, &result).render();
        assert!(text.contains("Your R:R was 2.0\n"));
    }

    #[test]
    fn test_write_to_buffer() {
        let (config, result) = sample();
        let mut log = RunLog::new(Vec::new());
        log.write(&RunRecord::new(&config, &result)).unwrap();
        log.write(&RunRecord::new(&config, &result)).unwrap();

        let text = String::from_utf8(log.into_inner()).unwrap();
        assert_eq!(text.matches("SIMULATION RESULTS").count(), 2);
    }

    #[test]
    fn test_append_to_file() {
        let (config, result) = sample();
        let path = std::env::temp_dir().join(format!("risk-sim-{}.log", uuid::Uuid::new_v4()));

        RunLog::append_to(&path).unwrap().write(&RunRecord::new(&config, &result)).unwrap();
        RunLog::append_to(&path).unwrap().write(&RunRecord::new(&config, &result)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("Date and time = ").count(), 2);
        std::fs::remove_file(&path).unwrap();
    }
}
