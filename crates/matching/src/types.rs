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

use bourse_sdk::{OrderStatus, OrderType, Price, Qty, Side};
use serde::{Deserialize, Serialize};

/// Engine-local order identifier.
///
/// Allocated from a per-engine monotone counter starting at 1.
pub type OrderId = u64;

/// Reserved id meaning "no order". Never allocated.
pub const NO_ORDER: OrderId = 0;

/// Canonical order record
///
/// One record per admitted order, owned by the registry for the lifetime
/// of the engine. Book levels refer to records by id only. The identity
/// fields (`id`, `side`, `order_type`, `timestamp`, `size`) never change
/// after admission; `price`, `remaining_size` and `status` are mutated by
/// the matching worker and the cancel path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
	/// Engine-assigned id
	pub id: OrderId,
	/// Order side
	pub side: Side,
	/// Order type
	pub order_type: OrderType,
	/// Working price: the resting price for limit orders; for market
	/// orders, the opposite best at intake time
	pub price: Price,
	/// Original size, preserved for event reporting
	pub size: Qty,
	/// Unfilled remainder
	pub remaining_size: Qty,
	/// Arrival timestamp (unix seconds), the time-priority key
	pub timestamp: u64,
	/// Lifecycle status
	pub status: OrderStatus,
}

impl Order {
	pub fn new(
		id: OrderId,
		side: Side,
		order_type: OrderType,
		price: Price,
		size: Qty,
		timestamp: u64,
	) -> Self {
		Self {
			id,
			side,
			order_type,
			price,
			size,
			remaining_size: size,
			timestamp,
			status: OrderStatus::Open,
		}
	}

	pub fn is_filled(&self) -> bool {
		self.remaining_size.is_zero()
	}
}
