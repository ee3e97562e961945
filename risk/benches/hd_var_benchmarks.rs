//! Benchmarks for HD VaR estimation and decomposition
//!
//! Run with: cargo bench

use hdvar_risk::*;
use rand::SeedableRng;
use rand_distr::{Distribution, StudentT};

fn main() {
    println!("=== HD VaR Performance Benchmarks ===\n");

    benchmark_weights();
    benchmark_estimation();
    benchmark_decomposition();
}

fn sample_pnl(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let dist = StudentT::new(4.0).unwrap();
    (0..n).map(|_| dist.sample(&mut rng) * 10_000.0).collect()
}

fn benchmark_weights() {
    println!("## HD Weights");

    for n in [250, 1_000, 5_000] {
        let start = std::time::Instant::now();
        for _ in 0..100 {
            let _ = hd_weights(n, 0.99);
        }
        let elapsed = start.elapsed();
        println!("  N = {} (100 iterations): {:?}", n, elapsed);
        println!("  Average: {:?}", elapsed / 100);
    }

    println!();
}

fn benchmark_estimation() {
    println!("## HD VaR");

    let pnl = sample_pnl(1_000, 7);

    let start = std::time::Instant::now();
    for _ in 0..100 {
        let _ = hd_var(&pnl, 0.95);
    }
    let elapsed = start.elapsed();
    println!("  hd_var, N = 1000 (100 iterations): {:?}", elapsed);
    println!("  Average: {:?}", elapsed / 100);

    let start = std::time::Instant::now();
    for _ in 0..100 {
        let _ = annualized_dollar_var(&pnl, 5_000_000.0, 0.95, DEFAULT_ANNUALIZATION_FACTOR);
    }
    let elapsed = start.elapsed();
    println!("  annualized_dollar_var, N = 1000 (100 iterations): {:?}", elapsed);
    println!("  Average: {:?}", elapsed / 100);

    println!();
}

fn benchmark_decomposition() {
    println!("## Decomposition");

    let engine = HdVarEngine::new(HdVarConfig::default()).unwrap();
    let positions: Vec<(String, Vec<f64>)> = (0..50)
        .map(|i| (format!("POS{:02}", i), sample_pnl(500, 100 + i as u64)))
        .collect();
    let portfolio: Vec<f64> = (0..500)
        .map(|t| positions.iter().map(|(_, pnl)| pnl[t]).sum())
        .collect();

    let start = std::time::Instant::now();
    let _ = engine.contribution_report(&portfolio, &positions);
    let elapsed = start.elapsed();
    println!("  Contribution report (50 positions, N = 500): {:?}", elapsed);

    let start = std::time::Instant::now();
    for (_, pnl) in positions.iter().take(10) {
        let _ = engine.incremental(&portfolio, 50_000_000.0, pnl, 1_000_000.0, -1.0);
    }
    let elapsed = start.elapsed();
    println!("  Incremental VaR (10 positions, N = 500): {:?}", elapsed);
    println!("  Average: {:?}", elapsed / 10);

    println!();
}
