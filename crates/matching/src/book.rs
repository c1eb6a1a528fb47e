// Copyright 2025 bourse contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::{HashMap, VecDeque};

use bourse_sdk::{Price, Qty, Side};

use crate::ladder::{AskPriority, BidPriority, PriceLadder, PricePriority};
use crate::registry::OrderRegistry;
use crate::types::{Order, OrderId};

/// Price level in the order book
///
/// Holds the ids of all resting orders at one price, in time priority
/// order (first in, first out). The records themselves live in the
/// registry; a level never outlives its last order.
#[derive(Debug, Default)]
pub struct PriceLevel {
	orders: VecDeque<OrderId>,
}

impl PriceLevel {
	fn new() -> Self {
		Self {
			orders: VecDeque::new(),
		}
	}

	fn push_back(&mut self, id: OrderId) {
		self.orders.push_back(id);
	}

	/// The next order to trade at this price.
	pub fn front(&self) -> Option<OrderId> {
		self.orders.front().copied()
	}

	fn pop_front(&mut self) -> Option<OrderId> {
		self.orders.pop_front()
	}

	/// Remove an arbitrary order from the queue, preserving the order of
	/// the rest.
	fn remove(&mut self, id: OrderId) -> bool {
		if let Some(pos) = self.orders.iter().position(|&o| o == id) {
			self.orders.remove(pos);
			true
		} else {
			false
		}
	}

	pub fn is_empty(&self) -> bool {
		self.orders.is_empty()
	}

	pub fn order_count(&self) -> usize {
		self.orders.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = OrderId> + '_ {
		self.orders.iter().copied()
	}
}

/// One side of the order book
///
/// Composes a best-first price ladder with a price-keyed map of FIFO
/// levels. The two structures agree exactly on their key set: a price is
/// in the ladder if and only if its level exists and is non-empty.
pub struct BookSide<P: PricePriority> {
	side: Side,
	ladder: PriceLadder<P>,
	levels: HashMap<Price, PriceLevel>,
}

/// Ask side: best price is the lowest.
pub type AskSide = BookSide<AskPriority>;
/// Bid side: best price is the highest.
pub type BidSide = BookSide<BidPriority>;

impl AskSide {
	pub fn asks() -> Self {
		BookSide::new(Side::Ask)
	}
}

impl BidSide {
	pub fn bids() -> Self {
		BookSide::new(Side::Bid)
	}
}

impl<P: PricePriority> BookSide<P> {
	fn new(side: Side) -> Self {
		Self {
			side,
			ladder: PriceLadder::new(),
			levels: HashMap::new(),
		}
	}

	pub fn side(&self) -> Side {
		self.side
	}

	/// Append an order at its working price, creating the level (and the
	/// ladder entry) on first use.
	pub fn insert(&mut self, order: &Order) {
		debug_assert_eq!(order.side, self.side);
		let level = self.levels.entry(order.price).or_insert_with(|| {
			self.ladder.insert(order.price);
			PriceLevel::new()
		});
		level.push_back(order.id);
	}

	/// The best price with a live level, if any.
	pub fn best_price(&self) -> Option<Price> {
		self.ladder.best()
	}

	/// The head of the best level: the next order to trade on this side.
	///
	/// Returns `None` when the side is empty, or when the ladder and the
	/// level map disagree (the match loop treats that as an exit signal,
	/// not an error).
	pub fn head(&self) -> Option<(Price, OrderId)> {
		let price = self.ladder.best()?;
		let id = self.levels.get(&price)?.front()?;
		Some((price, id))
	}

	/// Drop the head of the best level; tear the level down if it empties.
	pub fn advance_head(&mut self) -> Option<OrderId> {
		let price = self.ladder.best()?;
		let level = self.levels.get_mut(&price)?;
		let id = level.pop_front();
		if level.is_empty() {
			self.levels.remove(&price);
			self.ladder.pop_best();
		}
		id
	}

	/// Remove a specific order (the cancel path). The caller supplies the
	/// working price recorded on the order.
	pub fn remove(&mut self, id: OrderId, price: Price) -> bool {
		let Some(level) = self.levels.get_mut(&price) else {
			return false;
		};
		let removed = level.remove(id);
		if removed && level.is_empty() {
			self.levels.remove(&price);
			self.ladder.remove(price);
		}
		removed
	}

	pub fn is_empty(&self) -> bool {
		self.ladder.is_empty()
	}

	pub fn level_count(&self) -> usize {
		self.ladder.len()
	}

	pub fn order_count(&self) -> usize {
		self.levels.values().map(PriceLevel::order_count).sum()
	}

	/// Top-of-book snapshot: up to `depth` levels, best first, with the
	/// aggregate resting quantity of each level.
	pub fn depth(&self, registry: &OrderRegistry, depth: usize) -> Vec<(Price, Qty)> {
		self.ladder
			.iter()
			.take(depth)
			.map(|price| {
				let total: Qty = self.levels[&price]
					.iter()
					.filter_map(|id| registry.get(id))
					.map(|order| order.remaining_size)
					.sum();
				(price, total)
			})
			.collect()
	}

	/// Walk every resting order id, best level first, FIFO within a level.
	pub fn iter_resting(&self) -> impl Iterator<Item = (Price, OrderId)> + '_ {
		self.ladder
			.iter()
			.flat_map(move |price| self.levels[&price].iter().map(move |id| (price, id)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bourse_sdk::OrderType;
	use rust_decimal::Decimal;

	fn order(id: OrderId, side: Side, price: u64, size: u64) -> Order {
		Order::new(
			id,
			side,
			OrderType::Limit,
			Decimal::from(price),
			Decimal::from(size),
			1000 + id,
		)
	}

	#[test]
	fn test_insert_creates_level_once() {
		let mut asks = AskSide::asks();
		asks.insert(&order(1, Side::Ask, 100, 5));
		asks.insert(&order(2, Side::Ask, 100, 7));

		assert_eq!(asks.level_count(), 1);
		assert_eq!(asks.order_count(), 2);
		assert_eq!(asks.head(), Some((Decimal::from(100), 1)));
	}

	#[test]
	fn test_best_price_per_side() {
		let mut asks = AskSide::asks();
		asks.insert(&order(1, Side::Ask, 101, 1));
		asks.insert(&order(2, Side::Ask, 99, 1));
		assert_eq!(asks.best_price(), Some(Decimal::from(99)));

		let mut bids = BidSide::bids();
		bids.insert(&order(3, Side::Bid, 99, 1));
		bids.insert(&order(4, Side::Bid, 101, 1));
		assert_eq!(bids.best_price(), Some(Decimal::from(101)));
	}

	#[test]
	fn test_advance_head_tears_down_empty_level() {
		let mut asks = AskSide::asks();
		asks.insert(&order(1, Side::Ask, 99, 1));
		asks.insert(&order(2, Side::Ask, 100, 1));

		assert_eq!(asks.advance_head(), Some(1));
		assert_eq!(asks.level_count(), 1);
		assert_eq!(asks.head(), Some((Decimal::from(100), 2)));

		assert_eq!(asks.advance_head(), Some(2));
		assert!(asks.is_empty());
		assert_eq!(asks.head(), None);
	}

	#[test]
	fn test_remove_preserves_fifo_of_rest() {
		let mut bids = BidSide::bids();
		bids.insert(&order(1, Side::Bid, 100, 1));
		bids.insert(&order(2, Side::Bid, 100, 1));
		bids.insert(&order(3, Side::Bid, 100, 1));

		assert!(bids.remove(2, Decimal::from(100)));
		let ids: Vec<OrderId> = bids.iter_resting().map(|(_, id)| id).collect();
		assert_eq!(ids, vec![1, 3]);
	}

	#[test]
	fn test_remove_last_order_drops_level_from_ladder() {
		let mut bids = BidSide::bids();
		bids.insert(&order(1, Side::Bid, 100, 1));
		bids.insert(&order(2, Side::Bid, 101, 1));

		assert!(bids.remove(2, Decimal::from(101)));
		assert_eq!(bids.best_price(), Some(Decimal::from(100)));
		assert_eq!(bids.level_count(), 1);
	}

	#[test]
	fn test_remove_unknown_is_noop() {
		let mut asks = AskSide::asks();
		asks.insert(&order(1, Side::Ask, 100, 1));

		assert!(!asks.remove(9, Decimal::from(100)));
		assert!(!asks.remove(1, Decimal::from(101)));
		assert_eq!(asks.order_count(), 1);
	}

	#[test]
	fn test_iter_resting_is_price_then_time_ordered() {
		let mut asks = AskSide::asks();
		asks.insert(&order(1, Side::Ask, 100, 1));
		asks.insert(&order(2, Side::Ask, 99, 1));
		asks.insert(&order(3, Side::Ask, 100, 1));

		let ids: Vec<OrderId> = asks.iter_resting().map(|(_, id)| id).collect();
		assert_eq!(ids, vec![2, 1, 3]);
	}
}
