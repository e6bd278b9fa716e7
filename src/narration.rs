//! Per-trade console narration

use std::io::Write;
use tracing::warn;

use crate::report::format_currency;
use crate::simulation::TradeObserver;
use crate::types::{Outcome, TradeEvent};

/// Writes a short block for every trade
pub struct TradeNarrator<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> TradeNarrator<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_event(&mut self, event: &TradeEvent) -> std::io::Result<()> {
        let change = match event.outcome {
            Outcome::Win => format!("+{}", format_currency(event.capital_delta)),
            Outcome::Loss => format!("-{}", format_currency(event.capital_delta.abs())),
        };

        writeln!(self.out)?;
        writeln!(self.out, "----------Trade no. {}----------", event.trade_index + 1)?;
        writeln!(self.out, "Current risk per trade: {}", format_currency(event.risk_amount))?;
        writeln!(self.out, "Trade result:    {}", event.outcome)?;
        writeln!(self.out, "Capital change: {}", change)?;
        writeln!(self.out, "Current capital: {}", format_currency(event.capital))?;
        Ok(())
    }
}

impl<W: Write> TradeObserver for TradeNarrator<W> {
    fn on_trade(&mut self, event: &TradeEvent) {
        if self.failed {
            return;
        }
        if let Err(e) = self.write_event(event) {
            // Warn once, then go quiet for the rest of the run
            warn!("Trade narration disabled: {}", e);
            self.failed = true;
        }
    }
}
