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

//! Integration tests for the exchange layer
//!
//! These tests verify ticker listing and forwarding, cross-ticker
//! independence under concurrent flows, and the synthetic flow driver
//! end to end.

use std::sync::Arc;
use std::thread;

use bourse_exchange::sim::{run_flow, FlowConfig};
use bourse_exchange::{Exchange, ExchangeError};
use bourse_matching::{EventKind, MemorySink};
use bourse_sdk::{OrderStatus, OrderType, Qty, Side};
use rust_decimal::Decimal;

fn dec(value: i64) -> Decimal {
	Decimal::from(value)
}

#[test]
fn test_forwarding_reaches_the_right_engine() {
	let exchange = Exchange::new(Arc::new(MemorySink::new()));
	exchange.list("AAA", dec(100), dec(0)).unwrap();
	exchange.list("BBB", dec(50), dec(0)).unwrap();

	let id = exchange
		.place_order("AAA", Side::Ask, OrderType::Limit, dec(2), dec(105))
		.unwrap();

	assert_eq!(exchange.best_ask("AAA").unwrap(), Some(dec(105)));
	assert_eq!(exchange.best_ask("BBB").unwrap(), None);

	// The id only resolves on the engine that issued it.
	assert!(exchange.order("AAA", id).unwrap().is_some());
	assert!(exchange.order("BBB", id).unwrap().is_none());

	exchange.cancel_order("AAA", id).unwrap();
	assert_eq!(exchange.best_ask("AAA").unwrap(), None);
}

#[test]
fn test_operations_on_unlisted_ticker_fail() {
	let exchange = Exchange::new(Arc::new(MemorySink::new()));

	assert!(matches!(
		exchange.best_bid("NOPE"),
		Err(ExchangeError::NotListed(_))
	));
	assert!(matches!(
		exchange.cancel_order("NOPE", 1),
		Err(ExchangeError::NotListed(_))
	));
}

#[test]
fn test_edit_forwards_and_returns_new_id() {
	let exchange = Exchange::new(Arc::new(MemorySink::new()));
	exchange.list("ACME", dec(100), dec(0)).unwrap();

	let original = exchange
		.place_order("ACME", Side::Bid, OrderType::Limit, dec(5), dec(98))
		.unwrap();
	let replacement = exchange
		.edit_order("ACME", original, Side::Bid, dec(7), dec(97))
		.unwrap();

	assert_ne!(original, replacement);
	let order = exchange.order("ACME", replacement).unwrap().unwrap();
	assert_eq!(order.remaining_size, dec(7));
	assert_eq!(order.price, dec(97));
	assert_eq!(
		exchange.order("ACME", original).unwrap().unwrap().status,
		OrderStatus::Cancelled
	);
}

#[test]
fn test_event_stream_covers_placed_orders() {
	let sink = Arc::new(MemorySink::new());
	let exchange = Exchange::new(sink.clone());
	let config = FlowConfig {
		orders: 300,
		ipo_qty: dec(1_000),
		..FlowConfig::default()
	};

	let stats = run_flow(&exchange, "SIM", &config, 11).unwrap();

	let events = sink.snapshot();
	let opens = events.iter().filter(|e| e.kind == EventKind::Open).count() as u64;
	let rejects = events.iter().filter(|e| e.kind == EventKind::Reject).count() as u64;

	// One OPEN per admitted order, plus the IPO float; one REJECT per
	// refused submission.
	assert_eq!(opens, stats.placed + 1);
	assert_eq!(rejects, stats.rejected);
}

#[test]
fn test_concurrent_flows_stay_isolated() {
	let exchange = Arc::new(Exchange::new(Arc::new(MemorySink::new())));
	let tickers = ["AAA", "BBB", "CCC"];
	let config = FlowConfig {
		orders: 400,
		ipo_qty: dec(5_000),
		..FlowConfig::default()
	};

	let mut handles = Vec::new();
	for (index, ticker) in tickers.iter().enumerate() {
		let exchange = exchange.clone();
		let config = config.clone();
		let ticker = ticker.to_string();
		handles.push(thread::spawn(move || {
			run_flow(&exchange, &ticker, &config, index as u64).unwrap()
		}));
	}
	for handle in handles {
		let stats = handle.join().unwrap();
		assert_eq!(stats.placed + stats.rejected, config.orders as u64);
	}

	for ticker in tickers {
		// Each book is internally consistent after its flow.
		if let (Some(best_bid), Some(best_ask)) = (
			exchange.best_bid(ticker).unwrap(),
			exchange.best_ask(ticker).unwrap(),
		) {
			assert!(best_bid < best_ask);
		}

		let open_volume: Qty = exchange
			.orders_by_status(ticker, OrderStatus::Open)
			.unwrap()
			.iter()
			.map(|order| order.remaining_size)
			.sum();
		let resting_volume: Qty = exchange
			.depth(ticker, Side::Bid, usize::MAX)
			.unwrap()
			.iter()
			.chain(exchange.depth(ticker, Side::Ask, usize::MAX).unwrap().iter())
			.map(|(_, qty)| *qty)
			.sum();
		assert_eq!(open_volume, resting_volume);
	}
}
