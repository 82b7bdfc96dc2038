// ABOUTME: Criterion benchmarks for the analytics engine
// ABOUTME: Measures formulas, bucket aggregation, training load, and the full analysis pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

//! Criterion benchmarks for the analytics engine.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

mod common;

use common::fixtures::{anchor, generate_activities, ActivityBatchSize};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pacelab::analysis::run_comprehensive_analysis;
use pacelab::intelligence::aggregation::{aggregate_by_bucket, partition_records, Granularity};
use pacelab::intelligence::algorithms::{compute_hr_tss, compute_maf, compute_tss, compute_vdot};
use pacelab::intelligence::training_load::{
    summarize_training_load, summarize_training_load_with, LoadThresholds,
};
use pacelab::models::{ActivitySample, HealthCategory, UserProfile};

/// Benchmark the closed-form formulas
fn bench_formulas(c: &mut Criterion) {
    let mut group = c.benchmark_group("formulas");

    group.bench_function("compute_vdot", |b| {
        b.iter(|| compute_vdot(black_box(10.0), black_box(3000.0)));
    });
    group.bench_function("compute_maf", |b| {
        b.iter(|| compute_maf(black_box(42), black_box(HealthCategory::Healthy)));
    });
    group.bench_function("compute_tss", |b| {
        b.iter(|| compute_tss(black_box(60.0), black_box(300.0), black_box(270.0)));
    });
    group.bench_function("compute_hr_tss", |b| {
        b.iter(|| compute_hr_tss(black_box(60.0), black_box(150.0), black_box(165.0)));
    });

    group.finish();
}

/// Benchmark bucket aggregation across granularities and dataset sizes
#[allow(clippy::cast_possible_truncation)]
fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    for size in [
        ActivityBatchSize::Small,
        ActivityBatchSize::Medium,
        ActivityBatchSize::Large,
    ] {
        let activities = generate_activities(size);
        group.throughput(Throughput::Elements(size.count() as u64));
        for granularity in [Granularity::Week, Granularity::Month] {
            group.bench_with_input(
                BenchmarkId::new(granularity.as_str(), size.count()),
                &activities,
                |b, activities| {
                    b.iter(|| {
                        aggregate_by_bucket(
                            black_box(activities),
                            granularity,
                            None,
                            Some(270.0),
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark rolling-window training load
#[allow(clippy::cast_possible_truncation)]
fn bench_training_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("training_load");

    let activities = generate_activities(ActivityBatchSize::Large);
    let (valid, _) = partition_records(&activities);
    let samples: Vec<ActivitySample> = valid.iter().map(|activity| activity.sample).collect();

    group.throughput(Throughput::Elements(samples.len() as u64));
    group.bench_function("threshold_pace", |b| {
        b.iter(|| summarize_training_load(black_box(&samples), Some(270.0), anchor()));
    });
    group.bench_function("pace_band_estimate", |b| {
        b.iter(|| summarize_training_load(black_box(&samples), None, anchor()));
    });
    let heart_rate = LoadThresholds {
        pace_seconds: None,
        heart_rate: Some(165),
    };
    group.bench_function("threshold_heart_rate", |b| {
        b.iter(|| summarize_training_load_with(black_box(&samples), heart_rate, anchor()));
    });

    group.finish();
}

/// Benchmark the complete analysis pipeline
fn bench_comprehensive_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("comprehensive_analysis");
    group.sample_size(50);

    let activities = generate_activities(ActivityBatchSize::Medium);
    let profile = UserProfile {
        age: Some(42),
        resting_heart_rate: Some(52),
        five_k_pace: Some("4:40".to_owned()),
        lactate_threshold_pace: Some("5:05".to_owned()),
        ..UserProfile::default()
    };

    group.bench_function("with_profile", |b| {
        b.iter(|| run_comprehensive_analysis(black_box(&activities), Some(&profile), anchor()));
    });
    group.bench_function("without_profile", |b| {
        b.iter(|| run_comprehensive_analysis(black_box(&activities), None, anchor()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_formulas,
    bench_aggregation,
    bench_training_load,
    bench_comprehensive_analysis
);
criterion_main!(benches);
