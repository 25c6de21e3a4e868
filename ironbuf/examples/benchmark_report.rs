//! Access strategy benchmark report generator.
//!
//! Runs the harness across every storage/access strategy and prints a
//! formatted comparison table.
//!
//! Run with: cargo run --example benchmark_report --release
//!
//! For accurate results, run in release mode with CPU isolation if possible.

use ironbuf_bench::strategy::{
    AbsoluteWindow, AccessStrategy, ByteArray, CodecRoundTrip, CursorWindow, RawAddress,
};
use ironbuf_bench::{BenchmarkResult, Harness, StrategyRun};
use ironbuf_core::ByteOrder;

const WARM_UP_ITERATIONS: u64 = 100_000;
const ITERATIONS: u64 = 10_000_000;
const CODEC_ITERATIONS: u64 = 1_000_000;

fn format_latency(ns: f64) -> String {
    if ns >= 1000.0 {
        format!("{:.1} μs", ns / 1000.0)
    } else {
        format!("{:.1} ns", ns)
    }
}

fn format_throughput(ops: f64) -> String {
    if ops >= 1_000_000.0 {
        format!("{:.1}M ops/sec", ops / 1_000_000.0)
    } else if ops >= 1_000.0 {
        format!("{:.0}K ops/sec", ops / 1_000.0)
    } else {
        format!("{:.0} ops/sec", ops)
    }
}

fn print_row(result: &BenchmarkResult) {
    println!(
        "| {:<26} | {:>12} | {:>15} |",
        result.strategy,
        format_latency(result.avg_latency_nanos()),
        format_throughput(result.ops_per_second())
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                  IronBuf Access Strategy Report               ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  - Warm-up: {WARM_UP_ITERATIONS} iterations");
    println!("  - Timed:   {ITERATIONS} iterations per strategy");
    #[cfg(target_endian = "little")]
    println!("  - Native order: little-endian");
    #[cfg(target_endian = "big")]
    println!("  - Native order: big-endian");
    println!();
    println!("Running benchmarks...");

    let harness = Harness::new(WARM_UP_ITERATIONS, ITERATIONS);
    let mut strategies: Vec<Box<dyn AccessStrategy>> = vec![
        Box::new(ByteArray::new()),
        Box::new(CursorWindow::heap().expect("heap window")),
        Box::new(CursorWindow::off_heap().expect("off-heap window")),
        Box::new(RawAddress::new().expect("raw address")),
        Box::new(AbsoluteWindow::optimized().expect("optimized window")),
        Box::new(
            AbsoluteWindow::with_order(ByteOrder::native().swapped()).expect("swapped window"),
        ),
    ];
    let mut runs = harness.run_all(&mut strategies);

    // The codec round trip does far more work per iteration; give it its
    // own iteration budget.
    let codec_harness = Harness::new(WARM_UP_ITERATIONS, CODEC_ITERATIONS);
    let mut codec: Vec<Box<dyn AccessStrategy>> =
        vec![Box::new(CodecRoundTrip::new().expect("codec strategy"))];
    runs.extend(codec_harness.run_all(&mut codec));

    println!();
    println!("┌────────────────────────────┬──────────────┬─────────────────┐");
    println!("│ Strategy                   │ Latency (ns) │ Throughput      │");
    println!("├────────────────────────────┼──────────────┼─────────────────┤");
    for StrategyRun { name, outcome } in &runs {
        match outcome {
            Ok(result) => print_row(result),
            Err(error) => println!("| {:<26} | {:>30} |", name, format!("failed: {error}")),
        }
    }
    println!("└────────────────────────────┴──────────────┴─────────────────┘");
    println!();

    // Markdown format for README
    println!("## Markdown format for README:");
    println!();
    println!("| Strategy | Avg latency | Throughput |");
    println!("|----------|-------------|------------|");
    for StrategyRun { outcome, .. } in &runs {
        if let Ok(result) = outcome {
            println!(
                "| {} | {} | {} |",
                result.strategy,
                format_latency(result.avg_latency_nanos()),
                format_throughput(result.ops_per_second())
            );
        }
    }
    println!();
}
