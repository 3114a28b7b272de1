use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tokio::runtime::Runtime;

use fanout::{limits, pipeline, task};

const NUM_TASKS: usize = 10_000;

fn bench_queued_unbounded(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let depth = limits::compute_queue_depth(limits::compute_workers());
    c.bench_function("queued_unbounded", |b| {
        b.to_async(&rt).iter(|| async {
            pipeline::run(pipeline::queued_unbounded(NUM_TASKS, depth), task::process)
                .await
                .unwrap()
        })
    });
}

fn bench_direct_unbounded(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    c.bench_function("direct_unbounded", |b| {
        b.to_async(&rt).iter(|| async {
            pipeline::run(pipeline::direct_unbounded(NUM_TASKS), task::process)
                .await
                .unwrap()
        })
    });
}

fn bench_queued_bounded(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let workers = limits::compute_workers();
    let depth = limits::compute_queue_depth(workers);
    c.bench_function("queued_bounded", |b| {
        b.to_async(&rt).iter(|| async {
            pipeline::run(
                pipeline::queued_bounded(NUM_TASKS, depth, workers),
                task::process,
            )
            .await
            .unwrap()
        })
    });
}

fn bench_direct_bounded(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let workers = limits::compute_workers();
    c.bench_function("direct_bounded", |b| {
        b.to_async(&rt).iter(|| async {
            pipeline::run(pipeline::direct_bounded(NUM_TASKS, workers), task::process)
                .await
                .unwrap()
        })
    });
}

fn bench_queued_bounded_workers(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("queued_bounded_workers");
    for &workers in &[1usize, 2, 4, 8, 16] {
        let depth = limits::compute_queue_depth(workers);
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &w| {
            b.to_async(&rt).iter(|| async move {
                pipeline::run(pipeline::queued_bounded(NUM_TASKS, depth, w), task::process)
                    .await
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_direct_bounded_workers(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("direct_bounded_workers");
    for &workers in &[1usize, 2, 4, 8, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &w| {
            b.to_async(&rt).iter(|| async move {
                pipeline::run(pipeline::direct_bounded(NUM_TASKS, w), task::process)
                    .await
                    .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_queued_unbounded,
    bench_direct_unbounded,
    bench_queued_bounded,
    bench_direct_bounded,
    bench_queued_bounded_workers,
    bench_direct_bounded_workers,
);
criterion_main!(benches);
