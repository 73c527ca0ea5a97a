//! The order book proper.
//!
//! ## Structure
//!
//! - **OrderPool**: fixed-capacity slab owning every order record
//! - **Bid side**: `BTreeMap<Reverse<u64>, PriceLevel>` so the first entry
//!   is the highest price
//! - **Ask side**: `BTreeMap<u64, PriceLevel>` so the first entry is the
//!   lowest price
//! - **Order index**: `HashMap<u64, usize>` from order id to slab key for
//!   O(1) cancel and amend
//!
//! ## Queue discipline
//!
//! The orders at one price form a price-time queue threaded through the
//! pool: each [`PooledOrder`] carries `earlier`/`later` neighbor keys, and
//! the level records its `front` (earliest admitted, matched first) and
//! `back` (latest admitted). The book splices these links itself on every
//! admission and removal; there is no separate queue type.
//!
//! A level only exists while it has members: it is created around its
//! first order and removed together with its last, so its endpoints are
//! always valid keys and `best_*` never observes an empty level. On every
//! destructive path the record is unlinked and unindexed before its slot
//! returns to the free list.
//!
//! The book is pure data structure: admission policy, timestamps, and
//! matching live in [`crate::engine::MatchingEngine`].

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use sha2::{Digest, Sha256};

use crate::orderbook::{OrderPool, PooledOrder};
use crate::types::{BookError, Order, Side};

/// One aggregated price level as exported by snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLevelView {
    /// Level price, fixed-point scaled by 10^8.
    pub price: u64,
    /// Sum of the remaining quantity resting at this price.
    pub total_quantity: u64,
}

/// Owned depth snapshot: top levels of both sides, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub bids: Vec<PriceLevelView>,
    pub asks: Vec<PriceLevelView>,
}

/// The orders resting at one price, as a non-empty price-time queue.
///
/// A level comes into existence around its first member and is dropped
/// with its last, so `front` and `back` always name resident orders. The
/// queue links themselves live on the pooled records; the book does the
/// splicing.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price shared by every member, fixed-point scaled by 10^8.
    pub price: u64,

    /// Cached sum of members' remaining quantity.
    pub total_quantity: u64,

    /// Number of members.
    pub order_count: usize,

    front: usize,
    back: usize,
}

impl PriceLevel {
    /// Level brought into existence by its first member.
    fn opened_by(price: u64, key: usize, quantity: u64) -> Self {
        Self {
            price,
            total_quantity: quantity,
            order_count: 1,
            front: key,
            back: key,
        }
    }

    /// Earliest-admitted member, the next to match at this price.
    #[inline]
    pub fn front(&self) -> usize {
        self.front
    }

    /// Latest-admitted member; arrivals queue behind it.
    #[inline]
    pub fn back(&self) -> usize {
        self.back
    }
}

/// Single-symbol limit order book with pooled storage.
#[derive(Debug)]
pub struct OrderBook {
    pool: OrderPool,
    bids: BTreeMap<Reverse<u64>, PriceLevel>,
    asks: BTreeMap<u64, PriceLevel>,
    order_index: HashMap<u64, usize>,
    bid_count: usize,
    ask_count: usize,
}

impl OrderBook {
    /// Book whose pool holds at most `pool_capacity` resident orders.
    pub fn with_capacity(pool_capacity: usize) -> Self {
        Self {
            pool: OrderPool::with_capacity(pool_capacity),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            order_index: HashMap::with_capacity(pool_capacity),
            bid_count: 0,
            ask_count: 0,
        }
    }

    // ========================================================================
    // Size and stats
    // ========================================================================

    /// Pool capacity fixed at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Free pool slots.
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.pool.free_slots()
    }

    /// Total resident orders.
    #[inline]
    pub fn order_count(&self) -> usize {
        self.pool.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bid_count
    }

    #[inline]
    pub fn ask_count(&self) -> usize {
        self.ask_count
    }

    /// Distinct active bid prices.
    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    /// Distinct active ask prices.
    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    #[inline]
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.order_index.contains_key(&order_id)
    }

    /// Slab key of a resident order.
    #[inline]
    pub fn key_of(&self, order_id: u64) -> Option<usize> {
        self.order_index.get(&order_id).copied()
    }

    /// Resident order by id.
    pub fn order(&self, order_id: u64) -> Option<&Order> {
        self.key_of(order_id)
            .and_then(|key| self.pool.get(key))
            .map(|slot| &slot.order)
    }

    /// Resident record by slab key, with its queue links.
    #[inline]
    pub fn resident(&self, key: usize) -> Option<&PooledOrder> {
        self.pool.get(key)
    }

    /// Bid levels, best (highest) first.
    #[inline]
    pub fn bids(&self) -> &BTreeMap<Reverse<u64>, PriceLevel> {
        &self.bids
    }

    /// Ask levels, best (lowest) first.
    #[inline]
    pub fn asks(&self) -> &BTreeMap<u64, PriceLevel> {
        &self.asks
    }

    // ========================================================================
    // Best prices
    // ========================================================================

    /// Highest bid price, if any bids rest.
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.keys().next().map(|r| r.0)
    }

    /// Lowest ask price, if any asks rest.
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.keys().next().copied()
    }

    /// `best_ask - best_bid`; `None` when either side is empty.
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    /// The next buy to match: the best bid level's front order, with its
    /// slab key.
    pub fn best_bid_order(&self) -> Option<(usize, &Order)> {
        let level = self.bids.values().next()?;
        let slot = self.pool.get(level.front)?;
        Some((level.front, &slot.order))
    }

    /// The next sell to match: the best ask level's front order, with its
    /// slab key.
    pub fn best_ask_order(&self) -> Option<(usize, &Order)> {
        let level = self.asks.values().next()?;
        let slot = self.pool.get(level.front)?;
        Some((level.front, &slot.order))
    }

    // ========================================================================
    // Mutation (driven by the engine)
    // ========================================================================

    /// Admit an order: store it in the pool, index it, and queue it at the
    /// back of its price level, creating the level around it when it is
    /// the first at that price.
    ///
    /// Fails with [`BookError::PoolExhausted`] when the pool is full,
    /// leaving the book unchanged. No matching happens here.
    pub fn insert(&mut self, order: Order) -> Result<usize, BookError> {
        let (order_id, side, price, quantity) =
            (order.id, order.side(), order.price, order.remaining);
        let key = self.pool.acquire(order)?;
        self.order_index.insert(order_id, key);

        match side {
            Side::Buy => {
                match self.bids.get_mut(&Reverse(price)) {
                    Some(level) => {
                        Self::join_queue(level, key, &mut self.pool);
                        level.total_quantity = level.total_quantity.saturating_add(quantity);
                    }
                    None => {
                        self.bids
                            .insert(Reverse(price), PriceLevel::opened_by(price, key, quantity));
                    }
                }
                self.bid_count += 1;
            }
            Side::Sell => {
                match self.asks.get_mut(&price) {
                    Some(level) => {
                        Self::join_queue(level, key, &mut self.pool);
                        level.total_quantity = level.total_quantity.saturating_add(quantity);
                    }
                    None => {
                        self.asks
                            .insert(price, PriceLevel::opened_by(price, key, quantity));
                    }
                }
                self.ask_count += 1;
            }
        }

        Ok(key)
    }

    /// Remove a resident order by slab key: unlink it from its level
    /// (dropping the level with its last member), unindex it, and release
    /// its slot. `None` when the key is not outstanding.
    pub fn remove_order(&mut self, key: usize) -> Option<Order> {
        let (order_id, price, side, earlier, later, remaining) = {
            let slot = self.pool.get(key)?;
            (
                slot.order.id,
                slot.order.price,
                slot.order.side(),
                slot.earlier,
                slot.later,
                slot.order.remaining,
            )
        };

        match side {
            Side::Buy => {
                if let Some(level) = self.bids.get_mut(&Reverse(price)) {
                    if Self::leave_queue(level, earlier, later, &mut self.pool) {
                        self.bids.remove(&Reverse(price));
                    } else {
                        level.total_quantity = level.total_quantity.saturating_sub(remaining);
                    }
                }
                self.bid_count -= 1;
            }
            Side::Sell => {
                if let Some(level) = self.asks.get_mut(&price) {
                    if Self::leave_queue(level, earlier, later, &mut self.pool) {
                        self.asks.remove(&price);
                    } else {
                        level.total_quantity = level.total_quantity.saturating_sub(remaining);
                    }
                }
                self.ask_count -= 1;
            }
        }

        self.order_index.remove(&order_id);
        self.pool.release(key)
    }

    /// Cancel by order id. Returns the removed order, or `None` when the
    /// id is not resident.
    pub fn cancel(&mut self, order_id: u64) -> Option<Order> {
        let key = self.key_of(order_id)?;
        self.remove_order(key)
    }

    /// Drain `quantity` from the resident order at `key` and from its
    /// level's cached total. A fully drained order is unlinked, unindexed,
    /// and its slot released, in that order; the level dies with its last
    /// member.
    ///
    /// Returns `true` when the order was fully filled and destroyed;
    /// `false` for a partial fill or a vacant key.
    pub fn apply_fill(&mut self, key: usize, quantity: u64) -> bool {
        let (order_id, price, side, earlier, later, filled) = {
            let Some(slot) = self.pool.get_mut(key) else {
                return false;
            };
            slot.order.fill(quantity);
            (
                slot.order.id,
                slot.order.price,
                slot.order.side(),
                slot.earlier,
                slot.later,
                slot.order.is_filled(),
            )
        };

        match side {
            Side::Buy => {
                if let Some(level) = self.bids.get_mut(&Reverse(price)) {
                    if filled && Self::leave_queue(level, earlier, later, &mut self.pool) {
                        self.bids.remove(&Reverse(price));
                    } else {
                        level.total_quantity = level.total_quantity.saturating_sub(quantity);
                    }
                }
                if filled {
                    self.bid_count -= 1;
                }
            }
            Side::Sell => {
                if let Some(level) = self.asks.get_mut(&price) {
                    if filled && Self::leave_queue(level, earlier, later, &mut self.pool) {
                        self.asks.remove(&price);
                    } else {
                        level.total_quantity = level.total_quantity.saturating_sub(quantity);
                    }
                }
                if filled {
                    self.ask_count -= 1;
                }
            }
        }

        if filled {
            self.order_index.remove(&order_id);
            self.pool.release(key);
        }
        filled
    }

    /// Replace the remaining quantity of a resident order, keeping its
    /// queue position. The level's cached total moves by the delta.
    ///
    /// Returns `false` when the id is not resident.
    pub fn amend_quantity(&mut self, order_id: u64, new_quantity: u64) -> bool {
        let Some(key) = self.key_of(order_id) else {
            return false;
        };
        let (price, side, old_remaining) = {
            let Some(slot) = self.pool.get_mut(key) else {
                return false;
            };
            let old_remaining = slot.order.remaining;
            let already_filled = slot.order.filled_quantity();
            slot.order.remaining = new_quantity;
            slot.order.quantity = already_filled.saturating_add(new_quantity);
            (slot.order.price, slot.order.side(), old_remaining)
        };

        if let Some(level) = Self::side_level_mut(&mut self.bids, &mut self.asks, side, price) {
            if new_quantity >= old_remaining {
                level.total_quantity = level
                    .total_quantity
                    .saturating_add(new_quantity - old_remaining);
            } else {
                level.total_quantity = level
                    .total_quantity
                    .saturating_sub(old_remaining - new_quantity);
            }
        }
        true
    }

    /// Drop every order, level, and index entry.
    pub fn clear(&mut self) {
        self.pool.clear();
        self.bids.clear();
        self.asks.clear();
        self.order_index.clear();
        self.bid_count = 0;
        self.ask_count = 0;
    }

    // ========================================================================
    // Queue splicing
    // ========================================================================

    /// Queue the detached record at `key` behind the level's back.
    /// The caller adjusts the level total.
    fn join_queue(level: &mut PriceLevel, key: usize, pool: &mut OrderPool) {
        let back = level.back;
        if let Some(slot) = pool.get_mut(back) {
            slot.later = Some(key);
        }
        if let Some(slot) = pool.get_mut(key) {
            slot.earlier = Some(back);
        }
        level.back = key;
        level.order_count += 1;
    }

    /// Unlink a member with the given neighbors from the level queue.
    ///
    /// Returns `true` when it was the last member, in which case the
    /// caller drops the level itself. Otherwise the neighbors are spliced
    /// together, the endpoints retreat past the departed member, and the
    /// caller adjusts the level total.
    fn leave_queue(
        level: &mut PriceLevel,
        earlier: Option<usize>,
        later: Option<usize>,
        pool: &mut OrderPool,
    ) -> bool {
        if level.order_count <= 1 {
            return true;
        }

        match earlier {
            Some(e) => {
                if let Some(slot) = pool.get_mut(e) {
                    slot.later = later;
                }
            }
            // Departing member was the front; its successor takes over.
            None => {
                if let Some(l) = later {
                    level.front = l;
                }
            }
        }
        match later {
            Some(l) => {
                if let Some(slot) = pool.get_mut(l) {
                    slot.earlier = earlier;
                }
            }
            // Departing member was the back.
            None => {
                if let Some(e) = earlier {
                    level.back = e;
                }
            }
        }

        level.order_count -= 1;
        false
    }

    fn side_level_mut<'a>(
        bids: &'a mut BTreeMap<Reverse<u64>, PriceLevel>,
        asks: &'a mut BTreeMap<u64, PriceLevel>,
        side: Side,
        price: u64,
    ) -> Option<&'a mut PriceLevel> {
        match side {
            Side::Buy => bids.get_mut(&Reverse(price)),
            Side::Sell => asks.get_mut(&price),
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Aggregate the top `depth` levels of each side, best first.
    ///
    /// The result is an owned copy; it never aliases live book state.
    pub fn snapshot(&self, depth: usize) -> Snapshot {
        let view = |level: &PriceLevel| PriceLevelView {
            price: level.price,
            total_quantity: level.total_quantity,
        };
        Snapshot {
            bids: self.bids.values().take(depth).map(view).collect(),
            asks: self.asks.values().take(depth).map(view).collect(),
        }
    }

    /// SHA-256 digest over every resident order in deterministic book
    /// order: bids best-first then asks best-first, front-to-back within
    /// each level, each order SSZ-encoded.
    ///
    /// Two books with identical resident state produce identical digests.
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for level in self.bids.values() {
            self.hash_level(level, &mut hasher);
        }
        for level in self.asks.values() {
            self.hash_level(level, &mut hasher);
        }
        hasher.finalize().into()
    }

    fn hash_level(&self, level: &PriceLevel, hasher: &mut Sha256) {
        let mut cursor = Some(level.front);
        while let Some(key) = cursor {
            let Some(slot) = self.pool.get(key) else {
                break;
            };
            hasher.update(ssz_rs::serialize(&slot.order).unwrap_or_default());
            cursor = slot.later;
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
