//! # lobcore
//!
//! Single-symbol, in-memory continuous limit order book with an embedded
//! matching engine.
//!
//! ## Architecture
//!
//! - **Types**: core data values (`Order`, `Match`, fixed-point prices, errors)
//! - **Clock**: nanosecond timestamp source behind a trait seam
//! - **OrderBook**: slab-pooled book with price-time priority on both sides
//! - **Engine**: the matching engine driving add/cancel/amend/snapshot
//!
//! ## Design principles
//!
//! 1. **No floating point**: prices are fixed-point `u64` scaled by 10^8
//! 2. **Pooled allocation**: a fixed-capacity slab owns every order record;
//!    exhaustion is a first-class error, never a reallocation
//! 3. **Synchronous execution**: no async in the hot path; callers serialize
//!    access
//! 4. **Price-time priority**: best price first, FIFO within a level, across
//!    every mutation
//!
//! ## Example
//!
//! ```
//! use lobcore::{ManualClock, MatchingEngine, Order, RecordingSink, Side};
//!
//! let mut engine = MatchingEngine::with_parts(
//!     1_000,
//!     ManualClock::new(1),
//!     RecordingSink::default(),
//! );
//!
//! // A resting ask, then a buy that crosses it.
//! engine.add(Order::new(1, Side::Sell, 10_050_000_000, 100, 0)).unwrap();
//! engine.add(Order::new(2, Side::Buy, 10_050_000_000, 40, 0)).unwrap();
//!
//! assert_eq!(engine.sink().events().len(), 1);
//! assert_eq!(engine.sink().events()[0].quantity, 40);
//! ```

/// Core data values: orders, match events, prices, errors.
pub mod types;

/// Nanosecond clock seam.
pub mod clock;

/// The book: pooled storage, price levels, both sides, snapshots.
pub mod orderbook;

/// Matching engine and match sinks.
pub mod engine;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{MatchSink, MatchingEngine, RecordingSink, StdoutSink};
pub use orderbook::{OrderBook, OrderPool, PooledOrder, PriceLevel, PriceLevelView, Snapshot};
pub use types::{BookError, Match, Order, Side};
