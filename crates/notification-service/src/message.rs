//! Breach alert message composition.

use alert_core::Breach;

/// Subject line: the breached symbols, comma-separated, in breach order.
pub fn subject(breaches: &[Breach]) -> String {
    let symbols: Vec<&str> = breaches.iter().map(|b| b.symbol.as_str()).collect();
    format!("Stock Price Alert: {}", symbols.join(", "))
}

/// Plain-text body: a header line, then one line per breach with the signed
/// observed change and the signed threshold, two decimals each.
pub fn body(breaches: &[Breach]) -> String {
    let mut lines = vec![
        "The following stock price rules were triggered:".to_string(),
        String::new(),
    ];
    for breach in breaches {
        lines.push(format!(
            "- {}: {:+.2}% (Threshold: {:+.2}%)",
            breach.symbol, breach.change_percent, breach.threshold_percent
        ));
    }
    lines.join("\n")
}
