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

use std::collections::BTreeMap;

use bourse_sdk::OrderStatus;

use crate::types::{Order, OrderId, NO_ORDER};

/// Canonical order store and id allocator
///
/// Every order ever admitted by the engine lives here, keyed by its id.
/// Ids are handed out from a monotone counter starting at 1 (0 is the
/// reserved "no order" value), so map iteration order is admission order.
/// Records are never removed; lifecycle transitions mutate them in place.
pub struct OrderRegistry {
	orders: BTreeMap<OrderId, Order>,
	next_id: OrderId,
}

impl OrderRegistry {
	pub fn new() -> Self {
		Self {
			orders: BTreeMap::new(),
			next_id: NO_ORDER + 1,
		}
	}

	/// Take the next id. Ids are unique for the lifetime of the engine.
	pub fn allocate_id(&mut self) -> OrderId {
		let id = self.next_id;
		self.next_id += 1;
		id
	}

	/// Install a freshly built record under its id.
	pub fn admit(&mut self, order: Order) {
		let previous = self.orders.insert(order.id, order);
		debug_assert!(previous.is_none(), "order id admitted twice");
	}

	pub fn get(&self, id: OrderId) -> Option<&Order> {
		self.orders.get(&id)
	}

	pub fn get_mut(&mut self, id: OrderId) -> Option<&mut Order> {
		self.orders.get_mut(&id)
	}

	pub fn contains(&self, id: OrderId) -> bool {
		self.orders.contains_key(&id)
	}

	pub fn len(&self) -> usize {
		self.orders.len()
	}

	pub fn is_empty(&self) -> bool {
		self.orders.is_empty()
	}

	/// All records with the given status, in admission order.
	pub fn by_status(&self, status: OrderStatus) -> Vec<Order> {
		self.orders
			.values()
			.filter(|order| order.status == status)
			.cloned()
			.collect()
	}
}

impl Default for OrderRegistry {
	fn default() -> Self {
		Self::new()
	}
}
