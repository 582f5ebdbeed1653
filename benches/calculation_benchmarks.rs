//! Performance benchmarks for the Instructor Payment Engine.
//!
//! This benchmark suite verifies that the calculation engine meets performance targets:
//! - Single class tariff resolution: < 10μs mean
//! - Single instructor, 20 classes: < 1ms mean
//! - Batch of 100 instructors: < 100ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use studio_pay_engine::calculation::{resolve_tariff, CalculationRequest, PaymentEngine};
use studio_pay_engine::catalog::{MemoryCatalog, MemorySink};
use studio_pay_engine::config::ConfigLoader;
use studio_pay_engine::models::{
    ClassSession, FormulaDefinition, Instructor, InstructorCategory, PaymentParameters, Period,
    TariffTier,
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn bench_params() -> PaymentParameters {
    PaymentParameters {
        tiers: vec![
            TariffTier {
                reservation_threshold: 20,
                rate: dec("2.00"),
            },
            TariffTier {
                reservation_threshold: 35,
                rate: dec("2.50"),
            },
        ],
        full_house_rate: dec("3.00"),
        minimum_guaranteed: dec("30.00"),
        maximum: Decimal::ZERO,
        fixed_quota: None,
        per_reservation_bonus: Some(dec("0.50")),
    }
}

fn bench_formula() -> FormulaDefinition {
    FormulaDefinition {
        discipline_id: "cycling".to_string(),
        period_id: "2026-01".to_string(),
        parameters: HashMap::from([(InstructorCategory::Base, bench_params())]),
        requirements: HashMap::new(),
    }
}

fn bench_period() -> Period {
    Period {
        id: "2026-01".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 1, 28).unwrap(),
        weeks: 4,
    }
}

fn bench_class(id: &str, instructor_id: &str, day: u32, reservations: u32) -> ClassSession {
    ClassSession {
        id: id.to_string(),
        instructor_id: instructor_id.to_string(),
        discipline_id: "cycling".to_string(),
        period_id: "2026-01".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
        start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
        studio: "Reforma".to_string(),
        capacity: 40,
        total_reservations: reservations,
        waitlist: 0,
        courtesies: 0,
        paid_reservations: reservations,
        is_versus: false,
        versus_count: 0,
        full_house_override: false,
        notes: String::new(),
    }
}

fn bench_instructor(id: &str, class_count: usize) -> Instructor {
    Instructor {
        id: id.to_string(),
        name: format!("Instructor {id}"),
        classes: (0..class_count)
            .map(|i| {
                bench_class(
                    &format!("{id}_cls_{i:03}"),
                    id,
                    1 + (i as u32 % 28),
                    10 + (i as u32 % 30),
                )
            })
            .collect(),
        penalties: Vec::new(),
        category_overrides: Vec::new(),
    }
}

fn bench_engine(instructor_count: usize) -> PaymentEngine {
    let config = ConfigLoader::load("./config/studio")
        .expect("Failed to load config")
        .config()
        .clone();
    let mut catalog = MemoryCatalog::new()
        .with_period(bench_period())
        .with_formula(bench_formula());
    for i in 0..instructor_count {
        catalog = catalog.with_instructor(bench_instructor(&format!("ins_{i:04}"), 20));
    }
    PaymentEngine::new(config, Arc::new(catalog), Arc::new(MemorySink::new()))
}

/// Benchmark: single class tariff resolution.
///
/// Target: < 10μs mean
fn bench_single_tariff(c: &mut Criterion) {
    let params = bench_params();

    c.bench_function("single_tariff", |b| {
        b.iter(|| {
            let outcome = resolve_tariff(
                black_box(30),
                black_box(40),
                &params,
                studio_pay_engine::config::BonusPolicy::Separate,
            )
            .unwrap();
            black_box(outcome)
        })
    });
}

/// Benchmark: one instructor with 20 classes, end to end.
///
/// Target: < 1ms mean
fn bench_single_instructor(c: &mut Criterion) {
    let engine = bench_engine(1);
    let request = CalculationRequest::new("ins_0000", "2026-01");

    c.bench_function("instructor_20_classes", |b| {
        b.iter(|| {
            let outcome = engine.calculate(black_box(&request)).unwrap();
            black_box(outcome)
        })
    });
}

/// Benchmark: batch calculation over a whole period.
///
/// Target: < 100ms mean for 100 instructors
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    for instructor_count in [10usize, 100] {
        let engine = bench_engine(instructor_count);
        group.throughput(Throughput::Elements(instructor_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(instructor_count),
            &instructor_count,
            |b, _| {
                b.iter(|| {
                    let summary = engine.calculate_period(black_box("2026-01")).unwrap();
                    black_box(summary)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_single_tariff,
    bench_single_instructor,
    bench_batch
);
criterion_main!(benches);
