//! The matching engine: admission, cancellation, amendment, matching.
//!
//! Every mutation enters here. Admission acquires pool storage, stamps a
//! timestamp when the caller left it zero, links the order into the book,
//! then runs the matching loop. Either an operation commits with every
//! invariant holding, or the book is left exactly as it was.

use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::engine::sink::{MatchSink, StdoutSink};
use crate::orderbook::{OrderBook, Snapshot};
use crate::types::{BookError, Match, Order};

/// Continuous price-time matching engine over a pooled order book.
///
/// Generic over the clock and the match sink so tests can freeze time and
/// capture events; the defaults are the wall clock and the stdout printer.
///
/// ## Example
///
/// ```
/// use lobcore::{ManualClock, MatchingEngine, Order, RecordingSink, Side};
///
/// let mut engine = MatchingEngine::with_parts(
///     16,
///     ManualClock::new(1),
///     RecordingSink::default(),
/// );
///
/// engine.add(Order::new(5, Side::Sell, 10_100_000_000, 100, 0)).unwrap();
/// engine.add(Order::new(9, Side::Buy, 10_150_000_000, 80, 0)).unwrap();
///
/// let events = engine.sink().events();
/// assert_eq!(events.len(), 1);
/// // Executes at the resting ask's price.
/// assert_eq!(events[0].price, 10_100_000_000);
/// assert_eq!(events[0].quantity, 80);
/// ```
#[derive(Debug)]
pub struct MatchingEngine<C = SystemClock, S = StdoutSink> {
    book: OrderBook,
    clock: C,
    sink: S,
    last_assigned_ns: u64,
}

impl MatchingEngine {
    /// Engine with the wall clock and the stdout match printer.
    pub fn new(pool_capacity: usize) -> Self {
        Self::with_parts(pool_capacity, SystemClock, StdoutSink)
    }
}

impl<C: Clock, S: MatchSink> MatchingEngine<C, S> {
    /// Engine over a caller-supplied clock and sink.
    pub fn with_parts(pool_capacity: usize, clock: C, sink: S) -> Self {
        Self {
            book: OrderBook::with_capacity(pool_capacity),
            clock,
            sink,
            last_assigned_ns: 0,
        }
    }

    /// Read access to the book.
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Aggregated depth of the top `depth` levels per side.
    pub fn snapshot(&self, depth: usize) -> Snapshot {
        self.book.snapshot(depth)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Admit an order and run matching.
    ///
    /// A zero `timestamp_ns` is replaced with an engine-assigned stamp
    /// that is strictly greater than every previously assigned one;
    /// non-zero caller stamps are accepted verbatim. Fails with
    /// [`BookError::PoolExhausted`], [`BookError::DuplicateOrderId`], or
    /// [`BookError::InvalidOrder`], leaving the book unchanged.
    pub fn add(&mut self, mut order: Order) -> Result<(), BookError> {
        validate(&order)?;

        if self.book.free_slots() == 0 {
            return Err(BookError::PoolExhausted);
        }
        if self.book.contains_order(order.id) {
            return Err(BookError::DuplicateOrderId { order_id: order.id });
        }

        if order.timestamp_ns == 0 {
            order.timestamp_ns = next_timestamp(&self.clock, &mut self.last_assigned_ns);
        }
        let (order_id, side, price, quantity, timestamp_ns) = (
            order.id,
            order.side(),
            order.price,
            order.remaining,
            order.timestamp_ns,
        );

        self.book.insert(order)?;
        debug!(order_id, ?side, price, quantity, timestamp_ns, "order admitted");

        self.run_matching();
        Ok(())
    }

    /// Cancel a resident order. Returns `false` when the id is unknown;
    /// cancelling never triggers matching.
    pub fn cancel(&mut self, order_id: u64) -> bool {
        match self.book.cancel(order_id) {
            Some(order) => {
                debug!(order_id, remaining = order.remaining, "order cancelled");
                true
            }
            None => false,
        }
    }

    /// Amend a resident order.
    ///
    /// Same price: the remaining quantity is replaced in place and time
    /// priority is kept, for decreases and increases alike; matching does
    /// not run because no new crossing can arise. Different price: the
    /// order is cancelled and re-admitted with a fresh timestamp, so it
    /// queues behind everything already resting at the new price, and
    /// matching runs.
    ///
    /// Returns `Ok(false)` when the id is not resident.
    pub fn amend(
        &mut self,
        order_id: u64,
        new_price: u64,
        new_quantity: u64,
    ) -> Result<bool, BookError> {
        if new_quantity == 0 {
            return Err(BookError::InvalidOrder {
                reason: "quantity must be positive",
            });
        }
        if new_price == 0 {
            return Err(BookError::InvalidOrder {
                reason: "price must be positive",
            });
        }

        let Some(resident) = self.book.order(order_id) else {
            return Ok(false);
        };
        let (current_price, side) = (resident.price, resident.side());

        if new_price == current_price {
            self.book.amend_quantity(order_id, new_quantity);
            debug!(order_id, new_quantity, "order amended in place");
            return Ok(true);
        }

        self.book.cancel(order_id);
        debug!(order_id, new_price, new_quantity, "order re-priced");
        // The cancel freed a slot, so this admission cannot exhaust the
        // pool, and the id cannot collide with itself.
        self.add(Order::new(order_id, side, new_price, new_quantity, 0))?;
        Ok(true)
    }

    // ========================================================================
    // Matching loop
    // ========================================================================

    fn run_matching(&mut self) {
        loop {
            let (bid_key, bid_price, buy_id, buy_ts, buy_remaining) =
                match self.book.best_bid_order() {
                    Some((key, order)) => {
                        (key, order.price, order.id, order.timestamp_ns, order.remaining)
                    }
                    None => break,
                };
            let (ask_key, ask_price, sell_id, sell_ts, sell_remaining) =
                match self.book.best_ask_order() {
                    Some((key, order)) => {
                        (key, order.price, order.id, order.timestamp_ns, order.remaining)
                    }
                    None => break,
                };
            if bid_price < ask_price {
                break;
            }

            // Execute at the price of the order admitted first.
            let exec_price = if buy_ts < sell_ts { bid_price } else { ask_price };
            let quantity = buy_remaining.min(sell_remaining);
            let timestamp_ns = next_timestamp(&self.clock, &mut self.last_assigned_ns);

            let event = Match::new(exec_price, quantity, buy_id, sell_id, timestamp_ns);
            trace!(
                price = exec_price,
                quantity,
                buy_id,
                sell_id,
                "orders matched"
            );

            // apply_fill unlinks and unindexes a drained order before its
            // slot returns to the free list.
            self.book.apply_fill(bid_key, quantity);
            self.book.apply_fill(ask_key, quantity);
            self.sink.on_match(&event);
        }
    }
}

/// Next engine-assigned timestamp: the clock, bumped past the previous
/// assignment so assigned stamps are strictly increasing even under a
/// coarse or stalled clock.
fn next_timestamp<C: Clock>(clock: &C, last_assigned_ns: &mut u64) -> u64 {
    let ts = clock.now_ns().max(*last_assigned_ns + 1);
    *last_assigned_ns = ts;
    ts
}

fn validate(order: &Order) -> Result<(), BookError> {
    if order.quantity == 0 || order.remaining == 0 {
        return Err(BookError::InvalidOrder {
            reason: "quantity must be positive",
        });
    }
    if order.price == 0 {
        return Err(BookError::InvalidOrder {
            reason: "price must be positive",
        });
    }
    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================
