//! Key-metric extraction and human formatting.

use crate::types::StockInfo;

/// A labeled, display-ready metric value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMetric {
    pub label: &'static str,
    pub value: String,
}

/// Format a number with K/M/B suffixes, two decimals; None becomes "N/A".
pub fn format_number(number: Option<f64>) -> String {
    let number = match number {
        Some(n) => n,
        None => return "N/A".to_string(),
    };

    if number >= 1e9 {
        format!("{:.2}B", number / 1e9)
    } else if number >= 1e6 {
        format!("{:.2}M", number / 1e6)
    } else if number >= 1e3 {
        format!("{:.2}K", number / 1e3)
    } else {
        format!("{:.2}", number)
    }
}

/// The key-metrics table shown for a symbol. Dividend yield is reported by
/// Yahoo as a fraction and is scaled to percent here.
pub fn key_metrics(info: &StockInfo) -> Vec<KeyMetric> {
    let dividend_yield_pct = info.dividend_yield.map(|y| y * 100.0);

    vec![
        KeyMetric {
            label: "Market Cap",
            value: format_number(info.market_cap),
        },
        KeyMetric {
            label: "PE Ratio",
            value: format_number(info.trailing_pe),
        },
        KeyMetric {
            label: "52 Week High",
            value: format_number(info.fifty_two_week_high),
        },
        KeyMetric {
            label: "52 Week Low",
            value: format_number(info.fifty_two_week_low),
        },
        KeyMetric {
            label: "Volume",
            value: format_number(info.volume.map(|v| v as f64)),
        },
        KeyMetric {
            label: "Avg Volume",
            value: format_number(info.average_volume.map(|v| v as f64)),
        },
        KeyMetric {
            label: "Dividend Yield",
            value: format_number(dividend_yield_pct),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_suffixes() {
        assert_eq!(format_number(Some(3.21e12)), "3210.00B");
        assert_eq!(format_number(Some(2.5e9)), "2.50B");
        assert_eq!(format_number(Some(1.25e6)), "1.25M");
        assert_eq!(format_number(Some(12_500.0)), "12.50K");
        assert_eq!(format_number(Some(29.456)), "29.46");
        assert_eq!(format_number(None), "N/A");
    }

    #[test]
    fn test_key_metrics_labels_and_order() {
        let labels: Vec<&str> = key_metrics(&StockInfo::default())
            .iter()
            .map(|m| m.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "Market Cap",
                "PE Ratio",
                "52 Week High",
                "52 Week Low",
                "Volume",
                "Avg Volume",
                "Dividend Yield"
            ]
        );
    }

    #[test]
    fn test_missing_values_become_na() {
        let metrics = key_metrics(&StockInfo::default());
        assert!(metrics.iter().all(|m| m.value == "N/A"));
    }

    #[test]
    fn test_dividend_yield_is_scaled_to_percent() {
        let info = StockInfo {
            dividend_yield: Some(0.0055),
            ..StockInfo::default()
        };
        let metrics = key_metrics(&info);
        let dividend = metrics
            .iter()
            .find(|m| m.label == "Dividend Yield")
            .unwrap();
        assert_eq!(dividend.value, "0.55");
    }
}
