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

use std::sync::Mutex;

use crossbeam::channel::{bounded, Receiver, TryRecvError, TrySendError};
use tracing::{info, warn};

use super::{EngineEvent, EventSink};

/// Errors surfaced by channel-backed event delivery
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
	#[error("event buffer is full")]
	Full,
	#[error("event buffer is empty")]
	Empty,
	#[error("event buffer disconnected")]
	Disconnected,
}

/// Default sink: renders every event through `tracing`.
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
	fn emit(&self, event: EngineEvent) {
		info!(target: "events", "{}", event.render());
	}
}

/// Sink that discards every event. Useful for benchmarks.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
	fn emit(&self, _event: EngineEvent) {}
}

/// Sink backed by a bounded channel
///
/// Decouples event consumption from the matching thread: the engine side
/// never blocks. A full buffer drops the event with a warning instead of
/// stalling the matcher, so consumers must size the buffer for their
/// drain rate.
pub struct ChannelSink {
	sender: crossbeam::channel::Sender<EngineEvent>,
}

impl ChannelSink {
	/// Create a sink and its consumer end with the given capacity.
	pub fn new(capacity: usize) -> (Self, EventReceiver) {
		let (sender, receiver) = bounded(capacity);
		(Self { sender }, EventReceiver { receiver })
	}
}

impl EventSink for ChannelSink {
	fn emit(&self, event: EngineEvent) {
		if let Err(TrySendError::Full(event)) = self.sender.try_send(event) {
			warn!(
				target: "events",
				order_id = event.order_id,
				kind = %event.kind,
				"event buffer full, dropping event"
			);
		}
	}
}

/// Consumer end of a [`ChannelSink`]
pub struct EventReceiver {
	receiver: Receiver<EngineEvent>,
}

impl EventReceiver {
	/// Receive one event (blocking).
	pub fn recv(&self) -> Result<EngineEvent, SinkError> {
		self.receiver.recv().map_err(|_| SinkError::Disconnected)
	}

	/// Receive one event without blocking.
	pub fn try_recv(&self) -> Result<EngineEvent, SinkError> {
		self.receiver.try_recv().map_err(|e| match e {
			TryRecvError::Empty => SinkError::Empty,
			TryRecvError::Disconnected => SinkError::Disconnected,
		})
	}

	/// Drain up to `max_count` events without blocking.
	pub fn drain(&self, max_count: usize) -> Vec<EngineEvent> {
		let mut events = Vec::with_capacity(max_count);
		for _ in 0..max_count {
			match self.try_recv() {
				Ok(event) => events.push(event),
				Err(_) => break,
			}
		}
		events
	}
}

/// Sink that captures events in memory, for tests.
#[derive(Default)]
pub struct MemorySink {
	events: Mutex<Vec<EngineEvent>>,
}

impl MemorySink {
	pub fn new() -> Self {
		Self::default()
	}

	/// Copy of everything captured so far, in emission order.
	pub fn snapshot(&self) -> Vec<EngineEvent> {
		self.events.lock().unwrap().clone()
	}

	/// Remove and return everything captured so far.
	pub fn take(&self) -> Vec<EngineEvent> {
		std::mem::take(&mut *self.events.lock().unwrap())
	}

	pub fn len(&self) -> usize {
		self.events.lock().unwrap().len()
	}

	pub fn is_empty(&self) -> bool {
		self.events.lock().unwrap().is_empty()
	}
}

impl EventSink for MemorySink {
	fn emit(&self, event: EngineEvent) {
		self.events.lock().unwrap().push(event);
	}
}
