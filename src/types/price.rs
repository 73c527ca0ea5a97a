//! Fixed-point price boundary.
//!
//! Prices are `u64` values scaled by 10^8, giving 8 decimal places without
//! floating-point error: two prices are equal iff their integers are equal.
//! Decimal strings cross the boundary through `rust_decimal`, which parses
//! and formats exactly.
//!
//! ```
//! use lobcore::types::price::{from_fixed, to_fixed};
//!
//! let price = to_fixed("100.50").unwrap();
//! assert_eq!(price, 10_050_000_000);
//! assert_eq!(from_fixed(price), "100.50000000");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point prices: 10^8.
pub const SCALE: u64 = 100_000_000;

/// Largest representable unscaled price, `u64::MAX / SCALE`.
pub const MAX_PRICE: u64 = u64::MAX / SCALE;

// ============================================================================
// Conversions
// ============================================================================

/// Parse a decimal string into a fixed-point price.
///
/// Returns `None` for unparseable input, negative values, or values that
/// overflow the fixed-point range.
///
/// ```
/// use lobcore::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1"), Some(100_000_000));
/// assert_eq!(to_fixed("99.75"), Some(9_975_000_000));
/// assert_eq!(to_fixed("-1"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a `Decimal` into a fixed-point price. `None` when negative or
/// out of range.
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }
    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.round_dp(0).to_u64()
}

/// Convert a fixed-point price back into an exact `Decimal`.
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Render a fixed-point price with the full 8 decimal places.
pub fn from_fixed(value: u64) -> String {
    format!("{:.8}", fixed_to_decimal(value))
}

/// Render a fixed-point price with two decimal places, the format used by
/// the stdout match sink and the demo book printer.
///
/// ```
/// use lobcore::types::price::display_price;
///
/// assert_eq!(display_price(10_050_000_000), "100.50");
/// assert_eq!(display_price(9_900_000_000), "99.00");
/// ```
pub fn display_price(value: u64) -> String {
    format!("{:.2}", fixed_to_decimal(value))
}

// ============================================================================
// Unit Tests
// ============================================================================
