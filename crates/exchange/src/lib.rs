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

//! Bourse Exchange
//!
//! The multi-instrument layer: one matching engine per listed ticker,
//! created on first listing, with every client operation forwarded to the
//! engine that owns the symbol. Engines are fully independent; there is
//! no cross-ticker locking and no ordering between tickers.
//!
//! This crate also carries the synthetic flow driver ([`sim`]) and the
//! simulator binary built on it.

pub mod config;
pub mod logging;
pub mod sim;

use std::sync::Arc;

use dashmap::DashMap;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use bourse_matching::{
	EngineConfig, EngineError, EventSink, LogSink, MatchingCore, Order, OrderId,
};
use bourse_sdk::{OrderStatus, OrderType, Price, Qty, Side};

/// Error types for exchange operations
#[derive(Debug, Error)]
pub enum ExchangeError {
	#[error("ticker is not listed: {0}")]
	NotListed(String),
	#[error(transparent)]
	Engine(#[from] EngineError),
}

/// Ticker-to-engine multiplexer
///
/// Holds one [`MatchingCore`] per listed symbol in a concurrent map.
/// All engines share one event sink; the simulator runs a single tape
/// for the whole exchange.
pub struct Exchange {
	engines: DashMap<String, Arc<MatchingCore>>,
	sink: Arc<dyn EventSink>,
	verbose_engines: bool,
}

impl Default for Exchange {
	/// An exchange whose event tape goes to the log.
	fn default() -> Self {
		Self::new(Arc::new(LogSink))
	}
}

impl Exchange {
	pub fn new(sink: Arc<dyn EventSink>) -> Self {
		Self {
			engines: DashMap::new(),
			sink,
			verbose_engines: false,
		}
	}

	/// Enable per-match debug logging on engines created after this call.
	pub fn with_verbose_engines(mut self, verbose: bool) -> Self {
		self.verbose_engines = verbose;
		self
	}

	/// List a ticker: create its engine on first call and float the IPO
	/// quantity as an initial resting ask at the IPO price. Listing an
	/// already-listed ticker is a no-op.
	pub fn list(&self, ticker: &str, ipo_price: Price, ipo_qty: Qty) -> Result<(), ExchangeError> {
		let engine = match self.engines.entry(ticker.to_string()) {
			dashmap::mapref::entry::Entry::Occupied(_) => return Ok(()),
			dashmap::mapref::entry::Entry::Vacant(vacant) => {
				let engine = Arc::new(MatchingCore::start(
					EngineConfig {
						symbol: ticker.to_string(),
						starting_price: ipo_price,
						verbose_logging: self.verbose_engines,
					},
					self.sink.clone(),
				));
				vacant.insert(engine.clone());
				engine
			}
		};

		if ipo_qty > Decimal::ZERO {
			engine.place_order(Side::Ask, OrderType::Limit, ipo_qty, ipo_price)?;
		}

		info!(
			target: "exchange",
			ticker,
			ipo_price = %ipo_price,
			ipo_qty = %ipo_qty,
			"Listed ticker"
		);
		Ok(())
	}

	/// The engine owning a symbol.
	pub fn engine(&self, ticker: &str) -> Result<Arc<MatchingCore>, ExchangeError> {
		self.engines
			.get(ticker)
			.map(|entry| entry.value().clone())
			.ok_or_else(|| ExchangeError::NotListed(ticker.to_string()))
	}

	pub fn is_listed(&self, ticker: &str) -> bool {
		self.engines.contains_key(ticker)
	}

	pub fn tickers(&self) -> Vec<String> {
		self.engines.iter().map(|e| e.key().clone()).collect()
	}

	pub fn place_order(
		&self,
		ticker: &str,
		side: Side,
		order_type: OrderType,
		qty: Qty,
		price: Price,
	) -> Result<OrderId, ExchangeError> {
		Ok(self.engine(ticker)?.place_order(side, order_type, qty, price)?)
	}

	pub fn cancel_order(&self, ticker: &str, id: OrderId) -> Result<(), ExchangeError> {
		Ok(self.engine(ticker)?.cancel_order(id)?)
	}

	pub fn edit_order(
		&self,
		ticker: &str,
		id: OrderId,
		side: Side,
		qty: Qty,
		price: Price,
	) -> Result<OrderId, ExchangeError> {
		Ok(self.engine(ticker)?.edit_order(id, side, qty, price)?)
	}

	pub fn order(&self, ticker: &str, id: OrderId) -> Result<Option<Order>, ExchangeError> {
		Ok(self.engine(ticker)?.order(id))
	}

	pub fn best_bid(&self, ticker: &str) -> Result<Option<Price>, ExchangeError> {
		Ok(self.engine(ticker)?.best_bid())
	}

	pub fn best_ask(&self, ticker: &str) -> Result<Option<Price>, ExchangeError> {
		Ok(self.engine(ticker)?.best_ask())
	}

	/// Mid price when the ticker's book quotes both sides, otherwise its
	/// seeded starting price.
	pub fn price(&self, ticker: &str) -> Result<Price, ExchangeError> {
		Ok(self.engine(ticker)?.price())
	}

	pub fn orders_by_status(
		&self,
		ticker: &str,
		status: OrderStatus,
	) -> Result<Vec<Order>, ExchangeError> {
		Ok(self.engine(ticker)?.orders_by_status(status))
	}

	pub fn depth(
		&self,
		ticker: &str,
		side: Side,
		levels: usize,
	) -> Result<Vec<(Price, Qty)>, ExchangeError> {
		Ok(self.engine(ticker)?.depth(side, levels))
	}
}
