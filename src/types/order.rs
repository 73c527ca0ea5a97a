//! Order side and order record.
//!
//! ## Fixed-point representation
//!
//! Prices are stored as `u64` scaled by 10^8 (see [`crate::types::price`]).
//! Quantities are plain integer units of the traded instrument.
//!
//! ## SSZ serialization
//!
//! `Order` derives `SimpleSerialize` so the book can be hashed into a
//! deterministic state digest. The side is stored as a raw `u8` for SSZ
//! compatibility, with a typed accessor.

use ssz_rs::prelude::*;

// ============================================================================
// Side enum
// ============================================================================

/// Order side.
///
/// Raw representation for serialization: Buy = 0, Sell = 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Bid: wants to purchase the instrument.
    #[default]
    Buy,
    /// Ask: wants to sell the instrument.
    Sell,
}

impl Side {
    /// Convert to the raw byte used in serialized orders.
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from a raw byte; `None` for anything but 0 or 1.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// The side this side trades against.
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order.
///
/// `quantity` is the admitted size; `remaining` is the unfilled size that
/// matching drains. A resident order always has `remaining > 0`.
///
/// ## Example
///
/// ```
/// use lobcore::{Order, Side};
///
/// // Buy 100 units at 100.50.
/// let order = Order::new(1, Side::Buy, 10_050_000_000, 100, 0);
/// assert_eq!(order.side(), Side::Buy);
/// assert_eq!(order.remaining, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Order {
    /// Unique order identifier, assigned by the caller.
    pub id: u64,

    /// Order side as a raw byte (0 = Buy, 1 = Sell).
    pub side_raw: u8,

    /// Limit price, fixed-point scaled by 10^8.
    pub price: u64,

    /// Admitted quantity in integer units.
    pub quantity: u64,

    /// Unfilled quantity. Decremented as the order matches.
    pub remaining: u64,

    /// Admission timestamp in nanoseconds. Zero on submission means
    /// "assign from the engine clock".
    pub timestamp_ns: u64,
}

impl Order {
    /// Create a new limit order with nothing filled yet.
    pub fn new(id: u64, side: Side, price: u64, quantity: u64, timestamp_ns: u64) -> Self {
        Self {
            id,
            side_raw: side.to_u8(),
            price,
            quantity,
            remaining: quantity,
            timestamp_ns,
        }
    }

    /// The typed order side.
    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or(Side::Buy)
    }

    /// True once the order has no unfilled quantity left.
    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Quantity executed so far.
    pub fn filled_quantity(&self) -> u64 {
        self.quantity.saturating_sub(self.remaining)
    }

    /// Drain up to `fill_qty` from the unfilled quantity.
    ///
    /// Returns the quantity actually drained, which is capped at
    /// `remaining`.
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let drained = fill_qty.min(self.remaining);
        self.remaining -= drained;
        drained
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_raw_roundtrip() {
        assert_eq!(Side::from_u8(Side::Buy.to_u8()), Some(Side::Buy));
        assert_eq!(Side::from_u8(Side::Sell.to_u8()), Some(Side::Sell));
        assert_eq!(Side::from_u8(7), None);
    }

    #[test]
    fn side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn new_order_is_unfilled() {
        let order = Order::new(42, Side::Sell, 10_100_000_000, 250, 9);

        assert_eq!(order.id, 42);
        assert_eq!(order.side(), Side::Sell);
        assert_eq!(order.price, 10_100_000_000);
        assert_eq!(order.quantity, 250);
        assert_eq!(order.remaining, 250);
        assert_eq!(order.timestamp_ns, 9);
        assert_eq!(order.filled_quantity(), 0);
        assert!(!order.is_filled());
    }

    #[test]
    fn partial_then_full_fill() {
        let mut order = Order::new(1, Side::Buy, 10_050_000_000, 100, 0);

        assert_eq!(order.fill(30), 30);
        assert_eq!(order.remaining, 70);
        assert_eq!(order.filled_quantity(), 30);

        assert_eq!(order.fill(70), 70);
        assert!(order.is_filled());
    }

    #[test]
    fn fill_caps_at_remaining() {
        let mut order = Order::new(1, Side::Buy, 10_050_000_000, 100, 0);

        assert_eq!(order.fill(500), 100);
        assert_eq!(order.remaining, 0);
    }

    #[test]
    fn ssz_roundtrip() {
        let order = Order::new(7, Side::Sell, 10_075_000_000, 80, 123_456_789);

        let bytes = ssz_rs::serialize(&order).expect("serialize");
        let back: Order = ssz_rs::deserialize(&bytes).expect("deserialize");

        assert_eq!(order, back);
    }

    #[test]
    fn ssz_encoding_is_fixed_size() {
        let order = Order::new(1, Side::Buy, 10_050_000_000, 100, 0);
        let bytes = ssz_rs::serialize(&order).expect("serialize");

        // id + side_raw + price + quantity + remaining + timestamp_ns
        assert_eq!(bytes.len(), 8 + 1 + 8 + 8 + 8 + 8);
    }
}
