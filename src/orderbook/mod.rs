//! The order book: pooled storage and per-price price-time queues.
//!
//! ## Architecture
//!
//! - [`OrderPool`]: fixed-capacity slab owning every order record
//! - [`PooledOrder`]: an order plus its `earlier`/`later` queue links
//! - [`PriceLevel`]: a non-empty level record with its queue endpoints
//! - [`OrderBook`]: `BTreeMap` per side (bids descending via `Reverse`,
//!   asks ascending) plus a `HashMap` id index; the book splices the
//!   queue links itself on admission, cancel, and fill
//!
//! ## Complexity
//!
//! | Operation | Cost |
//! |-----------|------|
//! | Insert at a price | O(log L) |
//! | Remove by slab key | O(1) |
//! | Cancel by order id | O(1) + level cleanup |
//! | Best bid/ask | O(1) amortized |
//! | Snapshot depth d | O(d) |
//!
//! L is the number of distinct active price levels.

pub mod book;
pub mod pool;

pub use book::{OrderBook, PriceLevel, PriceLevelView, Snapshot};
pub use pool::{OrderPool, PooledOrder};
