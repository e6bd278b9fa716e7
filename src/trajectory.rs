//! Capital trajectory export
//!
//! Produces the capital / percent-change-from-start series per trade, as a
//! CSV file for external charting or as a one-line terminal sparkline.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::types::SimulationResult;

const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    pub trade: usize,
    pub capital: f64,
    /// Change from starting capital, in percent
    pub pct_change: f64,
}

pub fn trajectory_points(result: &SimulationResult) -> Vec<TrajectoryPoint> {
    let initial = result.initial_capital();
    result
        .capital_trajectory
        .iter()
        .enumerate()
        .map(|(trade, &capital)| TrajectoryPoint {
            trade,
            capital,
            pct_change: if initial == 0.0 {
                0.0
            } else {
                (capital - initial) / initial * 100.0
            },
        })
        .collect()
}

pub fn write_csv<W: Write>(points: &[TrajectoryPoint], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for point in points {
        wtr.serialize(point)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_csv(result: &SimulationResult, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create trajectory file {:?}", path))?;
    let points = trajectory_points(result);
    write_csv(&points, file)?;
    info!("Wrote {} trajectory points to {:?}", points.len(), path);
    Ok(())
}

/// Render `values` as block characters, at most `width` columns wide
///
/// Longer series are bucketed and each column shows the bucket's last value.
pub fn sparkline(values: &[f64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }

    let columns: Vec<f64> = if values.len() <= width {
        values.to_vec()
    } else {
        (1..=width)
            .map(|col| values[col * values.len() / width - 1])
            .collect()
    };

    let min = columns.iter().copied().fold(f64::INFINITY, f64::min);
    let max = columns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    let top = (SPARK_CHARS.len() - 1) as f64;

    columns
        .iter()
        .map(|&v| {
            if !range.is_finite() || range <= 0.0 {
                SPARK_CHARS[0]
            } else {
                SPARK_CHARS[((v - min) / range * top).round() as usize]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(trajectory: Vec<f64>) -> SimulationResult {
        SimulationResult {
            capital_trajectory: trajectory,
            win_count: 0,
            loss_count: 0,
            longest_win_streak: 0,
            longest_loss_streak: 0,
            max_drawdown_pct: 0.0,
            max_runup_pct: 0.0,
        }
    }

    #[test]
    fn test_pct_change_from_initial() {
        let points = trajectory_points(&result(vec![1000.0, 1100.0, 900.0]));
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].pct_change, 0.0);
        assert!((points[1].pct_change - 10.0).abs() < 1e-9);
        assert!((points[2].pct_change + 10.0).abs() < 1e-9);
        assert_eq!(points[2].trade, 2);
    }

    #[test]
    fn test_csv_rows() {
        let points = trajectory_points(&result(vec![1000.0, 1200.0, 1080.0]));
        let mut buf = Vec::new();
        write_csv(&points, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "trade,capital,pct_change");
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("1,1200"));
    }

    #[test]
    fn test_export_csv_file() {
        let path = std::env::temp_dir().join(format!("risk-sim-{}.csv", uuid::Uuid::new_v4()));
        export_csv(&result(vec![500.0, 550.0]), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_sparkline() {
        assert_eq!(sparkline(&[], 10), "");
        assert_eq!(sparkline(&[1.0, 2.0, 3.0], 0), "");
        assert_eq!(sparkline(&[5.0, 5.0], 10), "▁▁");

        let line = sparkline(&[0.0, 7.0], 10);
        assert_eq!(line, "▁█");

        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let line = sparkline(&values, 20);
        assert_eq!(line.chars().count(), 20);
        assert_eq!(line.chars().last(), Some('█'));
    }
}
