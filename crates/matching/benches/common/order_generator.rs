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

use bourse_sdk::{Price, Qty, Side};
use rust_decimal::Decimal;

#[derive(Clone, Copy)]
pub enum Scenario {
	/// Bids and asks far apart: pure book maintenance, no trades.
	NoCross,
	/// Every second order crosses at one price: match-loop heavy.
	CrossHeavy,
}

/// Deterministic order stream for benchmarks. No RNG, so every run
/// exercises the same sequence.
pub struct OrderGenerator {
	counter: u64,
	scenario: Scenario,
}

impl OrderGenerator {
	pub fn new(scenario: Scenario) -> Self {
		Self {
			counter: 0,
			scenario,
		}
	}

	pub fn next_order(&mut self) -> (Side, Qty, Price) {
		self.counter += 1;

		match self.scenario {
			Scenario::NoCross => {
				if self.counter % 2 == 0 {
					(
						Side::Bid,
						Decimal::ONE,
						Decimal::from(4_400 + (self.counter % 100)),
					)
				} else {
					(
						Side::Ask,
						Decimal::ONE,
						Decimal::from(5_600 + (self.counter % 100)),
					)
				}
			}
			Scenario::CrossHeavy => {
				let side = if self.counter % 2 == 0 {
					Side::Bid
				} else {
					Side::Ask
				};
				(side, Decimal::TEN, Decimal::from(5_000))
			}
		}
	}
}
