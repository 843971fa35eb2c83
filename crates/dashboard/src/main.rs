//! dashboard: Fetch stock data, print key metrics, and run price-change
//! rules over simulated prices, emailing recipients on a breach.
//!
//! Usage:
//!   cargo run -p dashboard -- --symbol AAPL --period 1y
//!   cargo run -p dashboard -- --symbol AAPL --rule AAPL:5.0 --rule GOOGL:-3.0 \
//!       --email me@example.com --simulate AAPL=180.50 --simulate GOOGL=150.00
//!
//! Email transport is configured via SMTP_HOST, SMTP_PORT, SMTP_USERNAME,
//! SMTP_PASSWORD (a .env file is honored).

use alert_core::{simulate_entry, SessionState, SimulationEntry};
use anyhow::{anyhow, Context, Result};
use market_data::{key_metrics, MarketDataService, Period, PriceHistory, StockData, StockInfo};
use notification_service::Notifier;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard=info,market_data=warn,notification_service=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let symbol = flag_value(&args, "--symbol")
        .unwrap_or_else(|| "AAPL".to_string())
        .to_uppercase();
    let period: Period = flag_value(&args, "--period")
        .unwrap_or_else(|| "1y".to_string())
        .parse()
        .map_err(|e| anyhow!("{}", e))?;

    let mut session = SessionState::new();

    for raw in flag_values(&args, "--rule") {
        let (rule_symbol, threshold) = parse_rule(&raw)?;
        session
            .rules
            .add(&rule_symbol, threshold)
            .with_context(|| format!("rejected rule {:?}", raw))?;
    }

    for address in flag_values(&args, "--email") {
        session
            .recipients
            .add(&address)
            .with_context(|| format!("rejected email {:?}", address))?;
    }

    for raw in flag_values(&args, "--simulate") {
        let (sim_symbol, price) = parse_simulation(&raw)?;
        let entry = SimulationEntry::new(&sim_symbol, price)
            .with_context(|| format!("rejected simulation entry {:?}", raw))?;
        session.simulation_entries.push(entry);
    }

    tracing::info!(
        "Session: {} rule(s), {} recipient(s), {} simulation entries",
        session.rules.len(),
        session.recipients.len(),
        session.simulation_entries.len()
    );

    let service = MarketDataService::new();

    match service.get_stock_data(&symbol, period).await {
        StockData::Available { history, info } => print_overview(&symbol, &history, &info),
        StockData::Unavailable => {
            println!(
                "Error: Could not fetch data for symbol {}. Please check if the symbol is correct.",
                symbol
            );
        }
    }

    if !session.simulation_entries.is_empty() {
        run_simulation(&service, &session).await;
    }

    Ok(())
}

fn print_overview(symbol: &str, history: &PriceHistory, info: &StockInfo) {
    let name = info.long_name.as_deref().unwrap_or(symbol);
    println!("\n{} ({})", name, symbol);
    println!("{}", "=".repeat(name.len() + symbol.len() + 3));

    if let Some(price) = history.latest_close() {
        match history.latest_change() {
            Some((diff, pct)) => {
                println!("Current Price: ${:.2}  {:+.2} ({:+.2}%)", price, diff, pct)
            }
            None => println!("Current Price: ${:.2}", price),
        }
    }

    println!("\nKey Metrics");
    for metric in key_metrics(info) {
        println!("  {:<16} {}", metric.label, metric.value);
    }
}

/// Evaluate every simulation entry against live market prices, then notify
/// the recipient list about accumulated breaches.
async fn run_simulation(service: &MarketDataService, session: &SessionState) {
    println!("\nSimulation Results");
    println!("==================");

    let mut breaches = Vec::new();

    for entry in &session.simulation_entries {
        let data = service.get_stock_data(&entry.symbol, Period::default()).await;
        let market_price = match &data {
            StockData::Available { history, .. } => history.latest_close(),
            StockData::Unavailable => None,
        };

        let market_price = match market_price {
            Some(price) if price > 0.0 => price,
            _ => {
                println!(
                    "\n{}: could not fetch market data, entry skipped",
                    entry.symbol
                );
                continue;
            }
        };

        let outcome = simulate_entry(entry, market_price, session.rules.rules());
        println!("\n{}", outcome.symbol);
        println!("  Market Price:    ${:.2}", outcome.market_price);
        println!("  Simulated Price: ${:.2}", outcome.simulated_price);
        println!(
            "  Difference:      ${:+.2} ({:+.2}%)",
            outcome.price_diff, outcome.change_percent
        );

        match outcome.breach {
            Some(breach) => {
                println!(
                    "  Rule triggered at threshold {:+.2}%",
                    breach.threshold_percent
                );
                breaches.push(breach);
            }
            None => println!("  No rules triggered."),
        }
    }

    if !breaches.is_empty() {
        Notifier::new()
            .notify(session.recipients.as_slice(), &breaches)
            .await;
    }
}

/// Value of the argument following `flag`, if present.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// Values following every occurrence of `flag`.
fn flag_values(args: &[String], flag: &str) -> Vec<String> {
    args.iter()
        .enumerate()
        .filter(|(_, a)| a.as_str() == flag)
        .filter_map(|(i, _)| args.get(i + 1))
        .cloned()
        .collect()
}

/// Parse "SYMBOL:PCT", e.g. "AAPL:5.0" or "GOOGL:-3.0".
fn parse_rule(raw: &str) -> Result<(String, f64)> {
    let (symbol, threshold) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("expected SYMBOL:PCT, got {:?}", raw))?;
    let threshold: f64 = threshold
        .parse()
        .with_context(|| format!("bad threshold in {:?}", raw))?;
    Ok((symbol.to_string(), threshold))
}

/// Parse "SYMBOL=PRICE", e.g. "AAPL=180.50".
fn parse_simulation(raw: &str) -> Result<(String, f64)> {
    let (symbol, price) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected SYMBOL=PRICE, got {:?}", raw))?;
    let price: f64 = price
        .parse()
        .with_context(|| format!("bad price in {:?}", raw))?;
    Ok((symbol.to_string(), price))
}
