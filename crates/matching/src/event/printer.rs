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

use std::{
	sync::{
		atomic::{AtomicBool, Ordering},
		Arc,
	},
	thread::{self, JoinHandle},
	time::Duration,
};

use tracing::info;

use super::sink::EventReceiver;

const DRAIN_BATCH: usize = 256;
const IDLE_SLEEP: Duration = Duration::from_millis(10);

/// Background tape printer
///
/// Consumes events from a [`ChannelSink`](super::ChannelSink) receiver on
/// its own thread and renders each one through `tracing`, keeping the
/// rendering cost off the matching thread. Remaining buffered events are
/// flushed on shutdown; the thread is joined on drop.
pub struct EventPrinter {
	thread_handle: Option<JoinHandle<()>>,
	shutdown: Arc<AtomicBool>,
}

impl EventPrinter {
	pub fn start(receiver: EventReceiver) -> Self {
		let shutdown = Arc::new(AtomicBool::new(false));
		let shutdown_clone = shutdown.clone();

		let thread_handle = thread::Builder::new()
			.name("event-printer".to_string())
			.spawn(move || {
				info!(target: "tape", "Event printer started");
				Self::run_printer_loop(&receiver, &shutdown_clone);
				info!(target: "tape", "Event printer stopped");
			})
			.expect("Failed to spawn event printer thread");

		Self {
			thread_handle: Some(thread_handle),
			shutdown,
		}
	}

	fn run_printer_loop(receiver: &EventReceiver, shutdown: &Arc<AtomicBool>) {
		loop {
			let events = receiver.drain(DRAIN_BATCH);
			for event in &events {
				info!(target: "tape", "{}", event.render());
			}

			if shutdown.load(Ordering::Relaxed) {
				// Keep draining so events emitted just before shutdown
				// still reach the tape.
				loop {
					let remaining = receiver.drain(DRAIN_BATCH);
					if remaining.is_empty() {
						break;
					}
					for event in &remaining {
						info!(target: "tape", "{}", event.render());
					}
				}
				break;
			}

			if events.is_empty() {
				thread::sleep(IDLE_SLEEP);
			}
		}
	}

	/// Stop the printer, flushing anything still buffered.
	pub fn shutdown(mut self) {
		self.shutdown.store(true, Ordering::Relaxed);
		if let Some(handle) = self.thread_handle.take() {
			let _ = handle.join();
		}
	}
}

impl Drop for EventPrinter {
	fn drop(&mut self) {
		self.shutdown.store(true, Ordering::Relaxed);
		if let Some(handle) = self.thread_handle.take() {
			let _ = handle.join();
		}
	}
}
