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

//! Exchange simulator entry point
//!
//! Lists the configured tickers and drives each one with a seeded
//! synthetic order flow on its own thread, then reports per-ticker
//! statistics. The event tape is rendered by a background printer.

use std::{sync::Arc, thread};

use anyhow::Result;
use tracing::{error, info};

use bourse_exchange::{config::SimConfig, logging, sim, Exchange};
use bourse_matching::{ChannelSink, EventPrinter};
use bourse_sdk::OrderStatus;

const EVENT_BUFFER_CAPACITY: usize = 65_536;

fn main() -> Result<()> {
	logging::init_logging()?;

	let config = match SimConfig::from_env() {
		Ok(config) => config,
		Err(err) => {
			info!(target: "server", "No environment configuration ({err}), using defaults");
			SimConfig::default()
		}
	};
	info!(
		target: "server",
		tickers = ?config.tickers,
		orders_per_ticker = config.orders_per_ticker,
		seed = config.seed,
		"Starting bourse simulator"
	);

	let (sink, receiver) = ChannelSink::new(EVENT_BUFFER_CAPACITY);
	let printer = EventPrinter::start(receiver);
	let exchange =
		Arc::new(Exchange::new(Arc::new(sink)).with_verbose_engines(config.verbose_logging));

	let mut handles = Vec::new();
	for (index, ticker) in config.tickers.iter().enumerate() {
		let exchange = exchange.clone();
		let ticker = ticker.clone();
		let flow = config.flow();
		let seed = config.seed.wrapping_add(index as u64);

		let handle = thread::Builder::new()
			.name(format!("flow-{ticker}"))
			.spawn(move || {
				let result = sim::run_flow(&exchange, &ticker, &flow, seed);
				(ticker, result)
			})?;
		handles.push(handle);
	}

	for handle in handles {
		match handle.join() {
			Ok((ticker, Ok(stats))) => {
				info!(
					target: "sim",
					ticker,
					placed = stats.placed,
					rejected = stats.rejected,
					cancelled = stats.cancelled,
					"Flow finished"
				);
			}
			Ok((ticker, Err(err))) => {
				error!(target: "sim", ticker, error = %err, "Flow failed");
			}
			Err(_) => error!(target: "sim", "Flow thread panicked"),
		}
	}

	for ticker in exchange.tickers() {
		report(&exchange, &ticker);
	}

	printer.shutdown();
	Ok(())
}

/// Per-ticker closing report, the simulator's equivalent of a closing
/// bell summary.
fn report(exchange: &Exchange, ticker: &str) {
	let Ok(price) = exchange.price(ticker) else {
		return;
	};
	let count = |status| {
		exchange
			.orders_by_status(ticker, status)
			.map(|orders| orders.len())
			.unwrap_or(0)
	};

	info!(
		target: "report",
		ticker,
		price = %price,
		open = count(OrderStatus::Open),
		filled = count(OrderStatus::Filled),
		cancelled = count(OrderStatus::Cancelled),
		rejected = count(OrderStatus::Rejected),
		best_bid = ?exchange.best_bid(ticker).ok().flatten(),
		best_ask = ?exchange.best_ask(ticker).ok().flatten(),
		"Closing stats"
	);
}
