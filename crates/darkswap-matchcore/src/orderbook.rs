//! The order book: an insertion-ordered sequence of open orders.
//!
//! Submission order is the tie-break (first submitted, first matched), so
//! the book is a plain `Vec` — removal shifts later entries without
//! disturbing their relative order. Two orders from the same user for the
//! same pair may coexist.

use darkswap_types::{Amount, Order};

/// All currently open orders, oldest first.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Append an order at the end (youngest position).
    pub fn insert(&mut self, order: Order) {
        self.orders.push(order);
    }

    /// Remove and return the order at `index`; later entries shift down
    /// one position, relative order preserved.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> Order {
        self.orders.remove(index)
    }

    /// Replace the amounts of the order at `index` in place. The order's
    /// user and assets are immutable once created — only amounts shrink.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn set_amounts(&mut self, index: usize, give_amount: Amount, take_amount: Amount) {
        let order = &mut self.orders[index];
        order.give_amount = give_amount;
        order.take_amount = take_amount;
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Order> {
        self.orders.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// The open orders, oldest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.orders.iter()
    }
}

impl<'a> IntoIterator for &'a OrderBook {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}
