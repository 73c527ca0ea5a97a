//! Match event: one executed trade between a resting order and an
//! aggressor.

use ssz_rs::prelude::*;

/// A single execution between a bid and an ask.
///
/// The execution price is the price of the order that was admitted first,
/// which is the resting order's price in every normal case. `timestamp_ns`
/// is the engine-assigned moment of execution.
///
/// ## Example
///
/// ```
/// use lobcore::Match;
///
/// let event = Match::new(10_050_000_000, 80, 9, 5, 1_000);
/// assert_eq!(event.buy_order_id, 9);
/// assert_eq!(event.sell_order_id, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Match {
    /// Execution price, fixed-point scaled by 10^8.
    pub price: u64,

    /// Executed quantity in integer units.
    pub quantity: u64,

    /// Identifier of the buy-side order.
    pub buy_order_id: u64,

    /// Identifier of the sell-side order.
    pub sell_order_id: u64,

    /// Execution timestamp in nanoseconds.
    pub timestamp_ns: u64,
}

impl Match {
    /// Create a new match event.
    pub fn new(
        price: u64,
        quantity: u64,
        buy_order_id: u64,
        sell_order_id: u64,
        timestamp_ns: u64,
    ) -> Self {
        Self {
            price,
            quantity,
            buy_order_id,
            sell_order_id,
            timestamp_ns,
        }
    }

    /// Raw notional value: `price * quantity`, still carrying the 10^8
    /// price scale. Divide by the price scale to obtain units of quote
    /// currency.
    pub fn notional_raw(&self) -> u128 {
        (self.price as u128) * (self.quantity as u128)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
