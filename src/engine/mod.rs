//! Matching engine.
//!
//! ## Matching rules
//!
//! - Matching runs after every admission, never after a cancel or an
//!   in-place quantity amend
//! - Best price first, FIFO within a level
//! - The execution price is the price of the order admitted first (the
//!   resting order in every normal case)
//! - Partial fills rest on the book; fully filled orders are destroyed
//!   inside the loop
//!
//! Completed matches are published to a [`MatchSink`] supplied by the
//! caller; [`StdoutSink`] prints one human-readable line per match and
//! [`RecordingSink`] collects events in memory.

pub mod matcher;
pub mod sink;

pub use matcher::MatchingEngine;
pub use sink::{MatchSink, RecordingSink, StdoutSink};
