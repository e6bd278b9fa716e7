//! Console summary for a finished run

use crate::types::{SimulationResult, Verdict};

/// Default width of the summary block
pub const SUMMARY_WIDTH: usize = 50;

/// Format with thousands separators and a fixed number of decimals
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let digits = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(digits.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }

    // "-0.00" would be noise
    let is_zero = !digits.chars().any(|c| c.is_ascii_digit() && c != '0');
    if value < 0.0 && !is_zero {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// `$1,234.56`, negative amounts as `-$1,234.56`
pub fn format_currency(value: f64) -> String {
    let grouped = format_grouped(value, 2);
    match grouped.strip_prefix('-') {
        Some(abs) => format!("-${}", abs),
        None => format!("${}", grouped),
    }
}

/// Fraction rendered as a percentage, `0.1234` -> `12.34%`
pub fn format_fraction_pct(fraction: f64) -> String {
    format!("{}%", format_grouped(fraction * 100.0, 2))
}

/// Profit / break-even / loss lines shared by the summary and the run log
pub fn verdict_lines(result: &SimulationResult) -> Vec<String> {
    let roi = format_fraction_pct(result.return_on_investment());
    match result.verdict() {
        Verdict::BrokeEven => vec!["You broke even".to_string()],
        Verdict::Profit(amount) => vec![
            format!("You made a profit of {}", format_currency(amount)),
            format!("Your ROI is {}", roi),
        ],
        Verdict::Loss(amount) => vec![
            format!("You lost {}", format_currency(amount)),
            format!("Your ROI is {}", roi),
        ],
    }
}

/// Render the centred results block
pub fn render_summary(result: &SimulationResult, width: usize) -> String {
    let rule = "-".repeat(width);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        "SIMULATION RESULTS".to_string(),
        rule.clone(),
        format!("You won {} trades", result.win_count),
        format!("You lost {} trades", result.loss_count),
        String::new(),
        format!("Longest win streak: {} trades", result.longest_win_streak),
        format!("Longest loss streak: {} trades", result.longest_loss_streak),
        format!("Max run-up: {:.2}%", result.max_runup_pct),
        format!("Max drawdown: {:.2}%", result.max_drawdown_pct),
        String::new(),
        format!("Your final capital is {}", format_currency(result.final_capital())),
    ];
    lines.extend(verdict_lines(result));

    let mut out = String::new();
    for line in lines {
        if line.is_empty() || line == rule {
            out.push_str(&line);
        } else {
            out.push_str(&format!("{:^width$}", line, width = width));
        }
        out.push('\n');
    }
    out.push_str(&rule);
    out.push('\n');
    out
}
