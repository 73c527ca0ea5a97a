//! Failure taxonomy of the mutating book operations.

use thiserror::Error;

/// Errors surfaced by `add` and `amend`.
///
/// A missing order id is not an error: `cancel` and `amend` report
/// residency through their boolean result instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// Every pool slot is outstanding; the book is unchanged.
    #[error("order pool exhausted")]
    PoolExhausted,

    /// The submitted id is already resident; the book is unchanged.
    #[error("duplicate order id {order_id}")]
    DuplicateOrderId { order_id: u64 },

    /// The order fails admission checks (zero quantity or zero price).
    #[error("invalid order: {reason}")]
    InvalidOrder { reason: &'static str },
}
