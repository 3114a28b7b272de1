use std::error::Error;
use std::time::Duration;

use comfy_table::Table;
use tokio::time::Instant;
use tracing_subscriber::EnvFilter;

use fanout::{limits, pipeline, task};

mod cli;

const NUM_TASKS: usize = 10_000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .compact()
        .init();

    let args = cli::parse_args();
    let workers = args.workers.unwrap_or_else(limits::compute_workers);
    let queue_depth = limits::compute_queue_depth(workers);

    println!("CPUs: {}", num_cpus::get());
    println!("Tasks: {}\n", NUM_TASKS);

    let variants: Vec<(String, pipeline::Config)> = vec![
        (
            "queued, unbounded".to_string(),
            pipeline::queued_unbounded(NUM_TASKS, queue_depth),
        ),
        (
            "direct, unbounded".to_string(),
            pipeline::direct_unbounded(NUM_TASKS),
        ),
        (
            format!("queued, {workers} workers"),
            pipeline::queued_bounded(NUM_TASKS, queue_depth, workers),
        ),
        (
            format!("direct, {workers} workers"),
            pipeline::direct_bounded(NUM_TASKS, workers),
        ),
    ];

    let console = cli::console(variants.len() as u64);
    let mut results: Vec<(String, Duration)> = Vec::new();
    for (label, config) in variants {
        let now = Instant::now();
        pipeline::run(config, task::process).await?;
        results.push((label, now.elapsed()));
        cli::progress(&console);
    }
    cli::finish(&console);

    print_results(results);
    Ok(())
}

fn print_results(results: Vec<(String, Duration)>) {
    let mut table = Table::new();
    table.set_header(vec!["variant", "elapsed"]);
    for (label, elapsed) in results {
        table.add_row(vec![label, format!("{:?}", elapsed)]);
    }
    println!("{table}");
}
