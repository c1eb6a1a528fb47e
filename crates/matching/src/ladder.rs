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

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::marker::PhantomData;

use bourse_sdk::Price;

/// Priority policy for one side of the book
///
/// Maps a price to an ordered key so that the minimum key is always the
/// best price for that side. Asks use the price itself (best = lowest),
/// bids wrap it in [`Reverse`] (best = highest). The policy is fixed at
/// construction through the type parameter; it cannot change at runtime.
pub trait PricePriority {
	type Key: Ord + Copy;

	fn key(price: Price) -> Self::Key;
	fn price(key: Self::Key) -> Price;
}

/// Ask-side priority: best price is the minimum.
#[derive(Debug, Clone, Copy)]
pub struct AskPriority;

impl PricePriority for AskPriority {
	type Key = Price;

	fn key(price: Price) -> Price {
		price
	}

	fn price(key: Price) -> Price {
		key
	}
}

/// Bid-side priority: best price is the maximum.
#[derive(Debug, Clone, Copy)]
pub struct BidPriority;

impl PricePriority for BidPriority {
	type Key = Reverse<Price>;

	fn key(price: Price) -> Reverse<Price> {
		Reverse(price)
	}

	fn price(key: Reverse<Price>) -> Price {
		key.0
	}
}

/// Best-first structure over the distinct live prices of one book side.
///
/// Prices are unique within a ladder, so no tie-break is needed. Membership
/// must mirror the side's level map exactly: a price is inserted when its
/// level is created and removed when the level empties.
pub struct PriceLadder<P: PricePriority> {
	prices: BTreeSet<P::Key>,
	_priority: PhantomData<P>,
}

impl<P: PricePriority> PriceLadder<P> {
	pub fn new() -> Self {
		Self {
			prices: BTreeSet::new(),
			_priority: PhantomData,
		}
	}

	/// Add a price. The caller guarantees it is not already present.
	pub fn insert(&mut self, price: Price) {
		let inserted = self.prices.insert(P::key(price));
		debug_assert!(inserted, "price already present in ladder");
	}

	/// The best price, without removing it.
	pub fn best(&self) -> Option<Price> {
		self.prices.first().map(|key| P::price(*key))
	}

	/// Remove and return the best price.
	pub fn pop_best(&mut self) -> Option<Price> {
		self.prices.pop_first().map(P::price)
	}

	/// Remove an arbitrary price known to be present.
	pub fn remove(&mut self, price: Price) -> bool {
		self.prices.remove(&P::key(price))
	}

	pub fn len(&self) -> usize {
		self.prices.len()
	}

	pub fn is_empty(&self) -> bool {
		self.prices.is_empty()
	}

	/// Live prices, best first.
	pub fn iter(&self) -> impl Iterator<Item = Price> + '_ {
		self.prices.iter().map(|key| P::price(*key))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rust_decimal::Decimal;

	fn price(value: u64) -> Price {
		Decimal::from(value)
	}

	#[test]
	fn test_ask_ladder_best_is_minimum() {
		let mut ladder = PriceLadder::<AskPriority>::new();
		ladder.insert(price(101));
		ladder.insert(price(99));
		ladder.insert(price(100));

		assert_eq!(ladder.best(), Some(price(99)));
		assert_eq!(ladder.pop_best(), Some(price(99)));
		assert_eq!(ladder.best(), Some(price(100)));
		assert_eq!(ladder.len(), 2);
	}

	#[test]
	fn test_bid_ladder_best_is_maximum() {
		let mut ladder = PriceLadder::<BidPriority>::new();
		ladder.insert(price(101));
		ladder.insert(price(99));
		ladder.insert(price(100));

		assert_eq!(ladder.best(), Some(price(101)));
		assert_eq!(ladder.pop_best(), Some(price(101)));
		assert_eq!(ladder.best(), Some(price(100)));
	}

	#[test]
	fn test_remove_arbitrary_price() {
		let mut ladder = PriceLadder::<AskPriority>::new();
		ladder.insert(price(99));
		ladder.insert(price(100));
		ladder.insert(price(101));

		assert!(ladder.remove(price(100)));
		assert!(!ladder.remove(price(100)));
		assert_eq!(ladder.best(), Some(price(99)));
		assert_eq!(ladder.len(), 2);
	}

	#[test]
	fn test_iter_is_best_first() {
		let mut ladder = PriceLadder::<BidPriority>::new();
		ladder.insert(price(99));
		ladder.insert(price(101));
		ladder.insert(price(100));

		let prices: Vec<Price> = ladder.iter().collect();
		assert_eq!(prices, vec![price(101), price(100), price(99)]);
	}

	#[test]
	fn test_empty_ladder() {
		let mut ladder = PriceLadder::<AskPriority>::new();
		assert!(ladder.is_empty());
		assert_eq!(ladder.best(), None);
		assert_eq!(ladder.pop_best(), None);
	}
}
