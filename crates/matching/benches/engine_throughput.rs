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

use std::sync::Arc;
use std::time::{Duration, Instant};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use bourse_matching::{EngineConfig, MatchingCore, NullSink};
use bourse_sdk::OrderType;
use rust_decimal::Decimal;

mod common;
use common::order_generator::{OrderGenerator, Scenario};

const BATCH_SIZES: &[u64] = &[1_000, 10_000];

fn benchmark_scenario(c: &mut Criterion, scenario_name: &str, scenario: Scenario) {
	let mut group = c.benchmark_group(scenario_name);
	group.sample_size(10);

	for &batch in BATCH_SIZES {
		group.bench_with_input(
			BenchmarkId::from_parameter(format!("{batch}_orders")),
			&batch,
			|b, &batch| {
				b.iter_custom(|iters| {
					let mut total = Duration::ZERO;
					for _ in 0..iters {
						total += run_batch(batch, scenario);
					}
					total
				});
			},
		);
	}

	group.finish();
}

fn run_batch(orders: u64, scenario: Scenario) -> Duration {
	let config = EngineConfig {
		symbol: "BENCH".to_string(),
		starting_price: Decimal::from(5_000),
		verbose_logging: false,
	};
	let engine = MatchingCore::start(config, Arc::new(NullSink));
	let mut generator = OrderGenerator::new(scenario);

	let start = Instant::now();
	for _ in 0..orders {
		let (side, qty, price) = generator.next_order();
		let _ = engine.place_order(side, OrderType::Limit, qty, price);
	}
	let elapsed = start.elapsed();

	engine.shutdown();
	elapsed
}

fn bench_no_cross(c: &mut Criterion) {
	benchmark_scenario(c, "no_cross", Scenario::NoCross);
}

fn bench_cross_heavy(c: &mut Criterion) {
	benchmark_scenario(c, "cross_heavy", Scenario::CrossHeavy);
}

criterion_group!(benches, bench_no_cross, bench_cross_heavy);
criterion_main!(benches);
