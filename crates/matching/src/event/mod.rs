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

mod printer;
mod sink;

use std::fmt;

use bourse_sdk::{OrderType, Price, Qty, Side};
use serde::{Deserialize, Serialize};

use crate::types::OrderId;

pub use printer::EventPrinter;
pub use sink::{ChannelSink, EventReceiver, LogSink, MemorySink, NullSink, SinkError};

/// What happened to an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
	/// Order admitted and visible to the matcher
	Open,
	/// Order traded but retains unfilled quantity
	PartialFill,
	/// Order traded to zero remaining quantity
	Fill,
	/// Order removed from the book by its owner
	Cancel,
	/// Order refused at admission; it never touched the book
	Reject,
}

impl fmt::Display for EventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EventKind::Open => write!(f, "OPEN"),
			EventKind::PartialFill => write!(f, "PARTIAL_FILL"),
			EventKind::Fill => write!(f, "FILL"),
			EventKind::Cancel => write!(f, "CANCEL"),
			EventKind::Reject => write!(f, "REJECT"),
		}
	}
}

/// One record on the engine's event stream
///
/// Events are produced by the matching worker (and the admission/cancel
/// paths) in a total order per engine. The quantity is contextual: the
/// original size for `Open`/`Reject`, the executed quantity for fills,
/// and the unfilled remainder for `Cancel`. The price is always the
/// order's own working price at the time of the event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineEvent {
	pub kind: EventKind,
	pub order_id: OrderId,
	pub side: Side,
	pub order_type: OrderType,
	pub qty: Qty,
	pub price: Price,
	pub timestamp: u64,
}

impl EngineEvent {
	/// Render the event as a tape line.
	pub fn render(&self) -> String {
		format!(
			"[{}] | ID: {} | SIDE: {} | TYPE: {} | QTY: {} | PRICE: {} | TIME: {}",
			self.kind,
			self.order_id,
			self.side,
			self.order_type,
			self.qty,
			self.price,
			self.timestamp
		)
	}

	/// True for events that end an order's lifecycle.
	pub fn is_terminal(&self) -> bool {
		matches!(
			self.kind,
			EventKind::Fill | EventKind::Cancel | EventKind::Reject
		)
	}
}

/// Consumer hook for the engine's event stream
///
/// Implementations receive events in emission order, while the engine
/// lock is held. They must return promptly (no blocking I/O, no waiting
/// on other threads) and must never call back into the engine.
pub trait EventSink: Send + Sync {
	fn emit(&self, event: EngineEvent);
}
