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

use bourse_sdk::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Configuration for one matching engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
	/// Instrument symbol, used for thread naming and log fields
	pub symbol: String,
	/// Price reported while the book cannot produce a mid
	pub starting_price: Price,
	/// Emit per-match debug logs
	pub verbose_logging: bool,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			symbol: "ACME".to_string(),
			starting_price: Decimal::from(100),
			verbose_logging: false,
		}
	}
}
