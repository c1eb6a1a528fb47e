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

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bourse_sdk::{Price, Qty};

use crate::sim::FlowConfig;

/// Component name used for the log directory and file prefix
pub const LOG_COMPONENT_NAME: &str = "exchange";
/// Log level applied when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Console output default (file output is always on)
pub const DEFAULT_LOG_TO_CONSOLE: bool = true;

/// Simulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
	/// Symbols to list and drive
	pub tickers: Vec<String>,
	/// Orders submitted per ticker
	pub orders_per_ticker: usize,
	/// Listing price for every ticker
	pub ipo_price: Price,
	/// Initial float per ticker
	pub ipo_qty: Qty,
	/// Random drift scale
	pub volatility: f64,
	/// Directional drift bias
	pub skew: f64,
	/// Probability of cancelling a placed order
	pub cancel_probability: f64,
	/// Base RNG seed; each ticker offsets it by its index
	pub seed: u64,
	/// Per-match debug logging in the engines
	pub verbose_logging: bool,
}

impl Default for SimConfig {
	fn default() -> Self {
		Self {
			tickers: vec![
				"AAPL".to_string(),
				"TSLA".to_string(),
				"AMZN".to_string(),
				"NVDA".to_string(),
			],
			orders_per_ticker: 10_000,
			ipo_price: Decimal::from(100),
			ipo_qty: Decimal::from(10_000),
			volatility: 0.5,
			skew: 0.05,
			cancel_probability: 0.05,
			seed: 1,
			verbose_logging: false,
		}
	}
}

impl SimConfig {
	/// Load configuration from `BOURSE_`-prefixed environment variables.
	pub fn from_env() -> Result<Self, config::ConfigError> {
		let cfg = config::Config::builder()
			.add_source(config::Environment::with_prefix("BOURSE"))
			.build()?;

		cfg.try_deserialize()
	}

	/// Load configuration from a file, with the environment layered on top.
	pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
		let cfg = config::Config::builder()
			.add_source(config::File::with_name(path))
			.add_source(config::Environment::with_prefix("BOURSE"))
			.build()?;

		cfg.try_deserialize()
	}

	/// The per-ticker flow this configuration describes.
	pub fn flow(&self) -> FlowConfig {
		FlowConfig {
			orders: self.orders_per_ticker,
			ipo_price: self.ipo_price,
			ipo_qty: self.ipo_qty,
			volatility: self.volatility,
			skew: self.skew,
			cancel_probability: self.cancel_probability,
			..FlowConfig::default()
		}
	}
}
