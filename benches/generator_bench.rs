//! Benchmarks for batch generation and a full in-memory seed run.
//!
//! Tests:
//! - Prospect batch generation at increasing sizes
//! - Message fanout across campaigns
//! - End-to-end pipeline against the in-memory store

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use demo_data_gen::{EntityKind, GenerationContext, Generator, Inserted, RecordId};
use prospect_seed::config::SeedPlan;
use prospect_seed::seed::SeedOrchestrator;
use prospect_seed::store::MemoryStore;
use std::hint::black_box;

/// Parents with synthetic ids, as if they had been inserted
fn context(generator: &mut Generator, prospects: usize, campaigns: usize) -> GenerationContext {
    let prospects = generator
        .prospects(prospects)
        .into_iter()
        .enumerate()
        .map(|(i, p)| Inserted::new(RecordId::new(i.to_string()), p))
        .collect();
    let campaigns = generator
        .campaigns(campaigns)
        .into_iter()
        .enumerate()
        .map(|(i, c)| Inserted::new(RecordId::new(format!("c{i}")), c))
        .collect();
    GenerationContext::default()
        .with_prospects(prospects)
        .with_campaigns(campaigns)
}

fn bench_prospects(c: &mut Criterion) {
    let mut group = c.benchmark_group("prospects");
    for count in [50usize, 500, 5_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut generator = Generator::new(7);
            let ctx = GenerationContext::default();
            b.iter(|| {
                black_box(
                    generator
                        .generate(EntityKind::Prospect, count, &ctx)
                        .unwrap(),
                )
            });
        });
    }
    group.finish();
}

fn bench_messages(c: &mut Criterion) {
    let mut group = c.benchmark_group("messages");
    for campaigns in [5usize, 50] {
        group.bench_with_input(
            BenchmarkId::from_parameter(campaigns),
            &campaigns,
            |b, &campaigns| {
                let mut generator = Generator::new(11);
                let ctx = context(&mut generator, 200, campaigns);
                b.iter(|| {
                    black_box(
                        generator
                            .generate(EntityKind::Message, campaigns, &ctx)
                            .unwrap(),
                    )
                });
            },
        );
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    c.bench_function("pipeline_default_plan", |b| {
        b.iter(|| {
            let mut store = MemoryStore::new();
            let report = SeedOrchestrator::new(&mut store, SeedPlan::default(), 42)
                .run(false)
                .unwrap();
            black_box(report.total())
        });
    });
}

criterion_group!(benches, bench_prospects, bench_messages, bench_pipeline);
criterion_main!(benches);
