use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Compare queued vs direct task fan-out, bounded and unbounded
#[derive(Parser, Debug)]
#[command(name = "fanout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Concurrency cap for the bounded variants (default: CPU count)
    #[arg(short, long)]
    pub workers: Option<usize>,
}

pub struct Console {
    bar: ProgressBar,
}

pub fn console(total: u64) -> Console {
    let bar = ProgressBar::new(total);
    let style = ProgressStyle::with_template("{prefix} [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap()
        .progress_chars("##-");
    bar.set_style(style);
    bar.set_prefix("variants".to_string());

    Console { bar }
}

pub fn progress(console: &Console) {
    console.bar.inc(1);
}

pub fn finish(console: &Console) {
    console.bar.finish();
}
