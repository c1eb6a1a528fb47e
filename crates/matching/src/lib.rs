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

//! Bourse Matching Engine
//!
//! This crate provides a single-instrument limit order book matching
//! engine. It maintains dual best-first books, applies strict price-time
//! priority, and emits a structured event stream for every order state
//! change.
//!
//! Architecture:
//! - Dual price ladders (min-first asks, max-first bids) over FIFO levels
//! - A single registry owning every order record, addressed by id
//! - A dedicated matching worker per engine; client calls hand off one
//!   aggressor at a time through a mutex/condvar protocol and block until
//!   the worker acknowledges
//! - Events are emitted under the engine lock to non-blocking sinks

pub mod book;
pub mod config;
pub mod engine;
pub mod event;
pub mod ladder;
pub mod registry;
pub mod types;

pub use config::EngineConfig;
pub use engine::{EngineError, MatchingCore};
pub use event::{
	ChannelSink, EngineEvent, EventKind, EventPrinter, EventReceiver, EventSink, LogSink,
	MemorySink, NullSink,
};
pub use ladder::{AskPriority, BidPriority, PriceLadder};
pub use registry::OrderRegistry;
pub use types::{Order, OrderId, NO_ORDER};
