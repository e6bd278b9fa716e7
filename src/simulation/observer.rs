//! Per-trade observer hook

use crate::types::TradeEvent;

/// Receives every trade as it is applied
///
/// Observers cannot influence or fail the run.
pub trait TradeObserver {
    fn on_trade(&mut self, event: &TradeEvent);
}

/// No-op observer
impl TradeObserver for () {
    fn on_trade(&mut self, _event: &TradeEvent) {}
}

impl<F: FnMut(&TradeEvent)> TradeObserver for F {
    fn on_trade(&mut self, event: &TradeEvent) {
        self(event)
    }
}
