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
use rust_decimal::Decimal;
use tracing::debug;

use super::EngineError;
use crate::book::{AskSide, BidSide};
use crate::event::{EngineEvent, EventKind, EventSink};
use crate::registry::OrderRegistry;
use crate::types::{Order, OrderId, NO_ORDER};

/// Handoff state between clients and the matching worker
///
/// Clients move `Idle -> Pending`; the worker moves
/// `Pending -> Draining -> Idle`. Clients only mutate the book while
/// `Idle`, so every submission sees a quiescent book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
	Idle,
	Pending,
	Draining,
}

/// The engine's complete mutable state, guarded by one mutex
///
/// Both book sides, the registry, the aggressor-of-record and the handoff
/// flags live together so a single lock acquisition makes the whole core
/// consistent.
pub(crate) struct BookState {
	pub symbol: String,
	pub bids: BidSide,
	pub asks: AskSide,
	pub registry: OrderRegistry,
	/// The order whose arrival the next drain reconciles
	pub aggressor: OrderId,
	pub phase: Phase,
	pub running: bool,
}

impl BookState {
	pub(crate) fn new(symbol: String) -> Self {
		Self {
			symbol,
			bids: BidSide::bids(),
			asks: AskSide::asks(),
			registry: OrderRegistry::new(),
			aggressor: NO_ORDER,
			phase: Phase::Idle,
			running: true,
		}
	}

	/// Admit one order: validate, derive the working price, install in the
	/// registry and its side, emit OPEN, and record it as the aggressor.
	///
	/// Limit prices are clamped against the opposite best so a marketable
	/// limit sweeps the opposing top rather than trading through it.
	/// Market orders take the opposite best as their working price and are
	/// admitted to their own side exactly like a marketable limit; the
	/// drain consumes them immediately.
	pub(crate) fn place(
		&mut self,
		side: Side,
		order_type: OrderType,
		qty: Qty,
		price: Price,
		timestamp: u64,
		sink: &dyn EventSink,
	) -> Result<OrderId, EngineError> {
		let id = self.registry.allocate_id();

		if qty <= Decimal::ZERO {
			self.reject(id, side, order_type, qty, price, timestamp, sink);
			return Err(EngineError::InvalidQuantity(qty));
		}

		let opposite_best = match side {
			Side::Bid => self.asks.best_price(),
			Side::Ask => self.bids.best_price(),
		};

		let working_price = match order_type {
			OrderType::Limit => match (side, opposite_best) {
				(Side::Bid, Some(best_ask)) => price.min(best_ask),
				(Side::Ask, Some(best_bid)) => price.max(best_bid),
				(_, None) => price,
			},
			OrderType::Market => match opposite_best {
				Some(best) => best,
				None => {
					self.reject(id, side, order_type, qty, Decimal::ZERO, timestamp, sink);
					return Err(EngineError::NoOppositeLiquidity(side.opposite()));
				}
			},
		};

		let order = Order::new(id, side, order_type, working_price, qty, timestamp);
		match side {
			Side::Bid => self.bids.insert(&order),
			Side::Ask => self.asks.insert(&order),
		}
		self.registry.admit(order);

		sink.emit(EngineEvent {
			kind: EventKind::Open,
			order_id: id,
			side,
			order_type,
			qty,
			price: working_price,
			timestamp,
		});

		self.aggressor = id;
		Ok(id)
	}

	/// Record a refused submission and report it on the event stream.
	/// Rejected orders reach the registry but never the book.
	#[allow(clippy::too_many_arguments)]
	fn reject(
		&mut self,
		id: OrderId,
		side: Side,
		order_type: OrderType,
		qty: Qty,
		price: Price,
		timestamp: u64,
		sink: &dyn EventSink,
	) {
		let mut order = Order::new(id, side, order_type, price, qty, timestamp);
		order.status = OrderStatus::Rejected;
		self.registry.admit(order);

		sink.emit(EngineEvent {
			kind: EventKind::Reject,
			order_id: id,
			side,
			order_type,
			qty,
			price,
			timestamp,
		});
	}

	/// Remove an open limit order from its level and mark it cancelled.
	pub(crate) fn cancel(
		&mut self,
		id: OrderId,
		timestamp: u64,
		sink: &dyn EventSink,
	) -> Result<(), EngineError> {
		let Some(order) = self.registry.get(id) else {
			return Err(EngineError::UnknownOrder(id));
		};
		if order.status != OrderStatus::Open {
			return Err(EngineError::NotOpen(id));
		}
		if order.order_type == OrderType::Market {
			return Err(EngineError::MarketNotCancellable(id));
		}

		let (side, price, remaining, order_type) = (
			order.side,
			order.price,
			order.remaining_size,
			order.order_type,
		);

		let removed = match side {
			Side::Bid => self.bids.remove(id, price),
			Side::Ask => self.asks.remove(id, price),
		};
		if !removed {
			// An open limit order must rest on its side.
			panic!("open order {id} missing from its price level");
		}

		self.registry
			.get_mut(id)
			.expect("cancelled order vanished from registry")
			.status = OrderStatus::Cancelled;

		sink.emit(EngineEvent {
			kind: EventKind::Cancel,
			order_id: id,
			side,
			order_type,
			qty: remaining,
			price,
			timestamp,
		});

		Ok(())
	}

	/// Reconcile the aggressor-of-record against the opposite side.
	///
	/// Runs until the aggressor is gone or exhausted, a side empties, or
	/// the books stop crossing. Each pass fills `min` of the two head
	/// quantities, emits one fill event per side at that order's own
	/// working price, and pops heads that reach zero. Missing records or
	/// levels end the drain silently; the book is left consistent.
	pub(crate) fn drain_matches(&mut self, timestamp: u64, sink: &dyn EventSink, verbose: bool) {
		loop {
			let Some(aggressor) = self.registry.get(self.aggressor) else {
				break;
			};
			if aggressor.status != OrderStatus::Open || aggressor.remaining_size.is_zero() {
				break;
			}

			let (Some((ask_price, ask_id)), Some((bid_price, bid_id))) =
				(self.asks.head(), self.bids.head())
			else {
				break;
			};

			if bid_price < ask_price {
				break;
			}

			let ask_remaining = self
				.registry
				.get(ask_id)
				.expect("ask level references unknown order")
				.remaining_size;
			let bid_remaining = self
				.registry
				.get(bid_id)
				.expect("bid level references unknown order")
				.remaining_size;
			let fill_qty = ask_remaining.min(bid_remaining);

			for id in [ask_id, bid_id] {
				let record = self
					.registry
					.get_mut(id)
					.expect("matched order vanished from registry");
				record.remaining_size -= fill_qty;
				let kind = if record.remaining_size.is_zero() {
					EventKind::Fill
				} else {
					EventKind::PartialFill
				};
				sink.emit(EngineEvent {
					kind,
					order_id: id,
					side: record.side,
					order_type: record.order_type,
					qty: fill_qty,
					price: record.price,
					timestamp,
				});
			}

			if verbose {
				debug!(
					target: "engine",
					symbol = %self.symbol,
					ask_id,
					bid_id,
					qty = %fill_qty,
					ask_price = %ask_price,
					bid_price = %bid_price,
					"Matched"
				);
			}

			if ask_remaining == fill_qty {
				self.asks.advance_head();
				self.registry
					.get_mut(ask_id)
					.expect("filled order vanished from registry")
					.status = OrderStatus::Filled;
			}
			if bid_remaining == fill_qty {
				self.bids.advance_head();
				self.registry
					.get_mut(bid_id)
					.expect("filled order vanished from registry")
					.status = OrderStatus::Filled;
			}
		}
	}
}
