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

mod state;

use std::{
	sync::{Arc, Condvar, Mutex, MutexGuard},
	thread::{self, JoinHandle},
	time::SystemTime,
};

use bourse_sdk::{OrderStatus, OrderType, Price, Qty, Side};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::event::EventSink;
use crate::types::{Order, OrderId};
use state::{BookState, Phase};

/// Error types for matching engine operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
	#[error("order quantity must be positive, got {0}")]
	InvalidQuantity(Qty),
	#[error("market order needs liquidity on the {0} side")]
	NoOppositeLiquidity(Side),
	#[error("order {0} does not exist")]
	UnknownOrder(OrderId),
	#[error("order {0} is not open")]
	NotOpen(OrderId),
	#[error("market order {0} cannot be cancelled")]
	MarketNotCancellable(OrderId),
	#[error("engine is shut down")]
	Shutdown,
}

/// State shared between client threads and the matching worker.
struct EngineShared {
	state: Mutex<BookState>,
	work: Condvar,
	sink: Arc<dyn EventSink>,
	verbose: bool,
}

/// Single-instrument matching engine
///
/// Owns both book sides, the order registry and a dedicated matching
/// worker. All public calls are safe from any thread: one mutex guards
/// the whole core, and a condition variable hands work to the worker.
///
/// Protocol (one aggressor in flight at a time):
/// 1. A client waits for the `Idle` phase, so it sees a quiescent book.
/// 2. It mutates resting state, records the aggressor, sets `Pending`,
///    wakes the worker, and waits.
/// 3. The worker drains the match loop with the lock held, emits fill
///    events, returns the phase to `Idle` and wakes the client.
///
/// Dropping the engine signals the worker and joins it before the state
/// is released.
pub struct MatchingCore {
	shared: Arc<EngineShared>,
	config: EngineConfig,
	worker: Option<JoinHandle<()>>,
}

impl MatchingCore {
	/// Start an engine and its matching worker.
	pub fn start(config: EngineConfig, sink: Arc<dyn EventSink>) -> Self {
		let shared = Arc::new(EngineShared {
			state: Mutex::new(BookState::new(config.symbol.clone())),
			work: Condvar::new(),
			sink,
			verbose: config.verbose_logging,
		});
		let shared_clone = shared.clone();
		let symbol = config.symbol.clone();

		let worker = thread::Builder::new()
			.name(format!("match-{}", config.symbol))
			.spawn(move || {
				info!(target: "engine", symbol = %symbol, "Matching worker started");
				Self::run_worker(&shared_clone);
				info!(target: "engine", symbol = %symbol, "Matching worker stopped");
			})
			.expect("Failed to spawn matching worker thread");

		Self {
			shared,
			config,
			worker: Some(worker),
		}
	}

	/// The matching worker: wait for pending work, drain, acknowledge.
	fn run_worker(shared: &EngineShared) {
		loop {
			let mut state = shared.state.lock().unwrap();
			while state.phase != Phase::Pending && state.running {
				state = shared.work.wait(state).unwrap();
			}
			if !state.running {
				// Acknowledge so pending clients can return, then exit.
				state.phase = Phase::Idle;
				shared.work.notify_all();
				break;
			}

			state.phase = Phase::Draining;
			state.drain_matches(unix_now(), shared.sink.as_ref(), shared.verbose);
			state.phase = Phase::Idle;
			shared.work.notify_all();
		}
	}

	/// Block until the book is quiescent (no work in flight).
	fn quiescent(&self) -> MutexGuard<'_, BookState> {
		let mut state = self.shared.state.lock().unwrap();
		while state.phase != Phase::Idle && state.running {
			state = self.shared.work.wait(state).unwrap();
		}
		state
	}

	/// Hand the current book over to the worker and wait for it to finish.
	fn hand_off(&self, mut state: MutexGuard<'_, BookState>) {
		state.phase = Phase::Pending;
		self.shared.work.notify_all();
		while state.phase != Phase::Idle && state.running {
			state = self.shared.work.wait(state).unwrap();
		}
	}

	/// Submit an order.
	///
	/// Returns once the matching worker has fully reconciled the order
	/// against the opposite side; the id is valid whether the order is
	/// still resting, already filled, or was admitted as rejected.
	pub fn place_order(
		&self,
		side: Side,
		order_type: OrderType,
		qty: Qty,
		price: Price,
	) -> Result<OrderId, EngineError> {
		let mut state = self.quiescent();
		if !state.running {
			return Err(EngineError::Shutdown);
		}

		let id = state.place(
			side,
			order_type,
			qty,
			price,
			unix_now(),
			self.shared.sink.as_ref(),
		)?;
		if self.config.verbose_logging {
			debug!(
				target: "engine",
				symbol = %self.config.symbol,
				order_id = id,
				%side,
				order_type = %order_type,
				qty = %qty,
				"Order admitted"
			);
		}

		self.hand_off(state);
		Ok(id)
	}

	/// Cancel an open limit order.
	///
	/// The worker is woken afterwards because the book changed shape; the
	/// call returns once it has acknowledged.
	pub fn cancel_order(&self, id: OrderId) -> Result<(), EngineError> {
		let mut state = self.quiescent();
		if !state.running {
			return Err(EngineError::Shutdown);
		}

		state.cancel(id, unix_now(), self.shared.sink.as_ref())?;
		self.hand_off(state);
		Ok(())
	}

	/// Replace an order: cancel, then place afresh.
	///
	/// The replacement is a limit order and joins the back of its level's
	/// queue; time priority is deliberately forfeited.
	pub fn edit_order(
		&self,
		id: OrderId,
		side: Side,
		qty: Qty,
		price: Price,
	) -> Result<OrderId, EngineError> {
		self.cancel_order(id)?;
		self.place_order(side, OrderType::Limit, qty, price)
	}

	/// Look up any order ever admitted.
	pub fn order(&self, id: OrderId) -> Option<Order> {
		self.quiescent().registry.get(id).cloned()
	}

	/// Highest bid price with a live level.
	pub fn best_bid(&self) -> Option<Price> {
		self.quiescent().bids.best_price()
	}

	/// Lowest ask price with a live level.
	pub fn best_ask(&self) -> Option<Price> {
		self.quiescent().asks.best_price()
	}

	/// Mid price when both sides quote, otherwise the seeded start price.
	pub fn price(&self) -> Price {
		let state = self.quiescent();
		match (state.bids.best_price(), state.asks.best_price()) {
			(Some(best_bid), Some(best_ask)) => (best_bid + best_ask) / Decimal::TWO,
			_ => self.config.starting_price,
		}
	}

	/// All orders with the given status, in admission order.
	pub fn orders_by_status(&self, status: OrderStatus) -> Vec<Order> {
		self.quiescent().registry.by_status(status)
	}

	/// Aggregate resting quantity of the top `levels` levels on one side.
	pub fn depth(&self, side: Side, levels: usize) -> Vec<(Price, Qty)> {
		let state = self.quiescent();
		match side {
			Side::Bid => state.bids.depth(&state.registry, levels),
			Side::Ask => state.asks.depth(&state.registry, levels),
		}
	}

	pub fn symbol(&self) -> &str {
		&self.config.symbol
	}

	/// Stop the worker and join it. Equivalent to dropping the engine.
	pub fn shutdown(self) {
		info!(
			target: "engine",
			symbol = %self.config.symbol,
			"Shutting down matching engine"
		);
	}
}

impl Drop for MatchingCore {
	fn drop(&mut self) {
		{
			let mut state = self.shared.state.lock().unwrap();
			state.running = false;
			self.shared.work.notify_all();
		}
		if let Some(handle) = self.worker.take() {
			let _ = handle.join();
		}
	}
}

fn unix_now() -> u64 {
	SystemTime::now()
		.duration_since(SystemTime::UNIX_EPOCH)
		.expect("system clock before unix epoch")
		.as_secs()
}
