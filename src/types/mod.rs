//! Core data types for the order book.
//!
//! All wire-facing types implement SSZ serialization for deterministic
//! encoding. Prices use fixed-point representation (scaled by 10^8);
//! quantities are plain integer units.
//!
//! ## Types
//!
//! - [`Order`]: a limit order in the book
//! - [`Side`]: Buy or Sell
//! - [`Match`]: an executed trade between a bid and an ask
//! - [`BookError`]: the failure taxonomy of the mutating operations

mod error;
mod match_event;
mod order;
pub mod price;

pub use error::BookError;
pub use match_event::Match;
pub use order::{Order, Side};
