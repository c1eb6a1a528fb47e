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

//! Synthetic order flow
//!
//! Drives one ticker with a seeded stream of random orders: prices drift
//! around the engine's last reported price with a configurable skew and
//! jitter, quantities are uniform, sides and types are coin flips, and a
//! fraction of placed orders is cancelled immediately. The same seed
//! reproduces the same flow.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use bourse_sdk::{OrderType, Price, Qty, Side};

use crate::{Exchange, ExchangeError};

/// Prices never drift below one cent.
const MIN_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Shape of one ticker's synthetic flow
#[derive(Debug, Clone)]
pub struct FlowConfig {
	/// Orders to submit
	pub orders: usize,
	/// Listing price, also the first reference price
	pub ipo_price: Price,
	/// Quantity floated as the initial resting ask
	pub ipo_qty: Qty,
	/// Scale of the random per-order price drift
	pub volatility: f64,
	/// Directional bias added to every drift step
	pub skew: f64,
	/// Half-width of the uniform per-order price jitter
	pub jitter: f64,
	/// Probability that a placed order is cancelled right away
	pub cancel_probability: f64,
}

impl Default for FlowConfig {
	fn default() -> Self {
		Self {
			orders: 10_000,
			ipo_price: Decimal::from(100),
			ipo_qty: Decimal::from(10_000),
			volatility: 0.5,
			skew: 0.05,
			jitter: 5.0,
			cancel_probability: 0.05,
		}
	}
}

/// Outcome counters of one flow run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowStats {
	/// Orders the engine admitted
	pub placed: u64,
	/// Submissions the engine refused
	pub rejected: u64,
	/// Cancels attempted against placed orders
	pub cancel_requests: u64,
	/// Cancels the engine accepted
	pub cancelled: u64,
}

/// Run one ticker's flow to completion.
///
/// Lists the ticker first (a no-op if it already trades). Placement
/// rejections are expected output of the flow (market orders against an
/// emptied side, for instance) and are counted, not propagated; only a
/// missing listing is an error.
pub fn run_flow(
	exchange: &Exchange,
	ticker: &str,
	config: &FlowConfig,
	seed: u64,
) -> Result<FlowStats, ExchangeError> {
	exchange.list(ticker, config.ipo_price, config.ipo_qty)?;

	let mut rng = ChaCha8Rng::seed_from_u64(seed);
	let mut stats = FlowStats::default();

	for _ in 0..config.orders {
		let side = if rng.gen_bool(0.5) { Side::Bid } else { Side::Ask };
		let order_type = if rng.gen_bool(0.5) {
			OrderType::Limit
		} else {
			OrderType::Market
		};
		let qty = Decimal::from_f64(rng.gen_range(1.0..1000.0))
			.unwrap_or(Decimal::ONE)
			.round_dp(2);

		let reference = exchange.price(ticker)?;
		let drift = config.skew + config.volatility * rng.gen_range(-1.0..=1.0);
		let jitter = rng.gen_range(-config.jitter..=config.jitter);
		let price = (reference + Decimal::from_f64(drift + jitter).unwrap_or_default())
			.round_dp(2)
			.max(MIN_PRICE);

		let result = match order_type {
			OrderType::Limit => exchange.place_order(ticker, side, order_type, qty, price),
			OrderType::Market => {
				exchange.place_order(ticker, side, order_type, qty, Decimal::ZERO)
			}
		};

		match result {
			Ok(id) => {
				stats.placed += 1;
				if rng.gen_bool(config.cancel_probability) {
					stats.cancel_requests += 1;
					// The order may already be filled; a refused cancel
					// is part of normal flow.
					if exchange.cancel_order(ticker, id).is_ok() {
						stats.cancelled += 1;
					}
				}
			}
			Err(ExchangeError::Engine(err)) => {
				debug!(target: "sim", ticker, error = %err, "Submission rejected");
				stats.rejected += 1;
			}
			Err(err) => return Err(err),
		}
	}

	Ok(stats)
}
