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

use std::fmt;

use serde::{Deserialize, Serialize};

/// Price scalar.
///
/// Real-valued with exact equality and total ordering, so raw prices can
/// key book levels directly: two submissions land on the same level if and
/// only if they carry the same decimal value.
pub type Price = rust_decimal::Decimal;

/// Quantity scalar. Shares the representation of [`Price`].
pub type Qty = rust_decimal::Decimal;

/// Order side (bid or ask)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
	Bid,
	Ask,
}

impl Side {
	/// The side an incoming order trades against.
	pub fn opposite(self) -> Side {
		match self {
			Side::Bid => Side::Ask,
			Side::Ask => Side::Bid,
		}
	}
}

impl fmt::Display for Side {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Side::Bid => write!(f, "BID"),
			Side::Ask => write!(f, "ASK"),
		}
	}
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
	Limit,
	Market,
}

impl fmt::Display for OrderType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderType::Limit => write!(f, "LIMIT"),
			OrderType::Market => write!(f, "MARKET"),
		}
	}
}

/// Order lifecycle status
///
/// `Open` orders are resting on the book (or about to be matched);
/// every other status is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
	Open,
	Filled,
	Cancelled,
	Rejected,
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderStatus::Open => write!(f, "OPEN"),
			OrderStatus::Filled => write!(f, "FILLED"),
			OrderStatus::Cancelled => write!(f, "CANCELLED"),
			OrderStatus::Rejected => write!(f, "REJECTED"),
		}
	}
}
