//! Match sinks: where completed executions go.

use crate::types::{price, Match};

/// Receiver for match events.
///
/// The engine calls `on_match` once per execution, in execution order:
/// best price first, FIFO within a level. The sink has no access back
/// into the book; by the time an event arrives, the book already reflects
/// the fill.
pub trait MatchSink {
    fn on_match(&mut self, event: &Match);
}

/// Prints one line per match to stdout.
///
/// Line format, with two-decimal prices:
///
/// ```text
/// [MATCH] 80 @ 101.00 (Buy Order #9 <-> Sell Order #5)
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl MatchSink for StdoutSink {
    fn on_match(&mut self, event: &Match) {
        println!(
            "[MATCH] {} @ {} (Buy Order #{} <-> Sell Order #{})",
            event.quantity,
            price::display_price(event.price),
            event.buy_order_id,
            event.sell_order_id,
        );
    }
}

/// Collects every match in memory, in emission order.
///
/// Useful for tests and embedders that post-process executions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<Match>,
}

impl RecordingSink {
    /// Events recorded so far, oldest first.
    pub fn events(&self) -> &[Match] {
        &self.events
    }

    /// Drain the recorded events.
    pub fn take(&mut self) -> Vec<Match> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl MatchSink for RecordingSink {
    fn on_match(&mut self, event: &Match) {
        self.events.push(event.clone());
    }
}
