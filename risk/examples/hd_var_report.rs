//! HD VaR report example
//!
//! Builds quarter-end FX PnL for a two-leg CAD book, then reports HD VaR,
//! annualized VaR, contributions and the incremental effect of selling
//! each leg.
//!
//! Run with: RUST_LOG=debug cargo run --example hd_var_report

use hdvar_risk::market_data::{quarter_end_rates, rate_series, FxRateSource, InMemoryFxRates};
use hdvar_risk::HdVarEngine;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== HD Value at Risk Report ===\n");

    // 1. Load configuration and market data
    let config_path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.yaml");
    let engine = HdVarEngine::from_yaml(&std::fs::read_to_string(config_path)?)?;

    let rates_path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/fx_rates.json");
    let source = InMemoryFxRates::from_json(&std::fs::read_to_string(rates_path)?)?;
    let rates = quarter_end_rates(&source.fx_rates()?);

    let usd_rates = rate_series(&rates, "USD", "CAD")?;
    let eur_rates = rate_series(&rates, "EUR", "CAD")?;
    let (usd_moves, eur_moves) = usd_rates.differences().align(&eur_rates.differences());

    // 2. Position PnL in CAD for 1M USD and 0.5M EUR notionals
    let usd_notional = 1_000_000.0;
    let eur_notional = 500_000.0;
    let usd_pnl: Vec<f64> = usd_moves.iter().map(|m| m * usd_notional).collect();
    let eur_pnl: Vec<f64> = eur_moves.iter().map(|m| m * eur_notional).collect();
    let book_pnl: Vec<f64> = usd_pnl.iter().zip(eur_pnl.iter()).map(|(u, e)| u + e).collect();

    let usd_pv = usd_notional * usd_rates.values().last().copied().unwrap_or(1.0);
    let eur_pv = eur_notional * eur_rates.values().last().copied().unwrap_or(1.0);
    let book_pv = usd_pv + eur_pv;

    println!("Confidence Level: {}%", engine.confidence_level() * 100.0);
    println!("Annualization factor: {:.4}", engine.factor());
    println!("Scenarios: {}", book_pnl.len());
    println!();

    // 3. Book VaR
    println!("--- Book VaR ---");
    let result = engine.calculate(&book_pnl, book_pv)?;
    println!("HD VaR: {:.2} CAD", result.var_amount);
    println!("VaR / PV: {:.4}%", result.var_pct * 100.0);
    println!("Annualized VaR: {:.4}%", result.annualized_var * 100.0);
    println!();

    // 4. Contributions
    println!("--- Contributions ---");
    let report = engine.contribution_report(
        &book_pnl,
        &[("USD".to_string(), usd_pnl.clone()), ("EUR".to_string(), eur_pnl.clone())],
    )?;
    for line in &report {
        println!("  {}: {:.2}%", line.position_id, line.contribution * 100.0);
    }
    println!();

    // 5. Incremental VaR of selling each leg
    println!("--- Incremental VaR (sell) ---");
    for (name, pnl, pv) in [("USD", &usd_pnl, usd_pv), ("EUR", &eur_pnl, eur_pv)] {
        let inc = engine.incremental(&book_pnl, book_pv, pnl, pv, -1.0)?;
        println!(
            "  {}: {:+.4}% (before {:.4}%, after {:.4}%)",
            name,
            inc.incremental_var * 100.0,
            inc.before_annualized * 100.0,
            inc.after_annualized * 100.0
        );
    }

    Ok(())
}
