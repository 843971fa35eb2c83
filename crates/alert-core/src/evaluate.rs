//! Rule evaluation.
//!
//! A rule triggers when the observed change and the rule threshold meet or
//! cross in absolute magnitude: `|change| >= |threshold|`. Signs are carried
//! through for display only.

use serde::{Deserialize, Serialize};

use crate::rules::StockRule;

/// A triggered rule, produced by evaluation and consumed by the notifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breach {
    pub symbol: String,
    /// Signed observed change, percent.
    pub change_percent: f64,
    /// Signed threshold of the rule that triggered.
    pub threshold_percent: f64,
}

/// Check `change_percent` for `symbol` against the rules in stored order and
/// return the signed threshold of the first rule that triggers.
///
/// Symbols are compared exactly; callers normalize to uppercase. When several
/// rules exist for the same symbol, stored order decides which threshold is
/// reported, so the first match must win.
pub fn check_rule(symbol: &str, change_percent: f64, rules: &[StockRule]) -> Option<f64> {
    rules
        .iter()
        .filter(|rule| rule.symbol == symbol)
        .find(|rule| change_percent.abs() >= rule.threshold_percent.abs())
        .map(|rule| rule.threshold_percent)
}

/// Like [`check_rule`], but packages the result for the notifier.
pub fn evaluate_breach(symbol: &str, change_percent: f64, rules: &[StockRule]) -> Option<Breach> {
    check_rule(symbol, change_percent, rules).map(|threshold_percent| Breach {
        symbol: symbol.to_string(),
        change_percent,
        threshold_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleStore;

    fn sample_rules() -> RuleStore {
        let mut store = RuleStore::new();
        store.add("AAPL", 5.0).unwrap();
        store.add("GOOGL", -3.0).unwrap();
        store
    }

    #[test]
    fn test_positive_threshold_triggers() {
        let store = sample_rules();
        assert_eq!(check_rule("AAPL", 6.0, store.rules()), Some(5.0));
    }

    #[test]
    fn test_negative_threshold_triggers() {
        let store = sample_rules();
        assert_eq!(check_rule("GOOGL", -4.0, store.rules()), Some(-3.0));
    }

    #[test]
    fn test_below_threshold_does_not_trigger() {
        let store = sample_rules();
        assert_eq!(check_rule("AAPL", 2.0, store.rules()), None);
    }

    #[test]
    fn test_unknown_symbol_does_not_trigger() {
        let store = sample_rules();
        assert_eq!(check_rule("MSFT", 50.0, store.rules()), None);
    }

    #[test]
    fn test_comparison_is_by_magnitude() {
        let store = sample_rules();
        // A drop breaches a positive threshold, and a rise breaches a
        // negative one.
        assert_eq!(check_rule("AAPL", -6.0, store.rules()), Some(5.0));
        assert_eq!(check_rule("GOOGL", 3.5, store.rules()), Some(-3.0));
    }

    #[test]
    fn test_exact_threshold_triggers() {
        let store = sample_rules();
        assert_eq!(check_rule("AAPL", 5.0, store.rules()), Some(5.0));
        assert_eq!(check_rule("AAPL", -5.0, store.rules()), Some(5.0));
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let mut store = RuleStore::new();
        store.add("AAPL", 5.0).unwrap();
        store.add("AAPL", 2.0).unwrap();

        // Both rules match a 6% move; the first stored one is reported.
        assert_eq!(check_rule("AAPL", 6.0, store.rules()), Some(5.0));

        // Only the second rule matches a 3% move.
        assert_eq!(check_rule("AAPL", 3.0, store.rules()), Some(2.0));
    }

    #[test]
    fn test_first_match_skips_non_matching_rules() {
        let mut store = RuleStore::new();
        store.add("AAPL", 10.0).unwrap();
        store.add("AAPL", 2.0).unwrap();
        store.add("AAPL", 1.0).unwrap();

        assert_eq!(check_rule("AAPL", 3.0, store.rules()), Some(2.0));
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let store = sample_rules();
        let first = check_rule("AAPL", 6.0, store.rules());
        let second = check_rule("AAPL", 6.0, store.rules());
        assert_eq!(first, second);
    }

    #[test]
    fn test_evaluate_breach_carries_signed_values() {
        let store = sample_rules();
        let breach = evaluate_breach("GOOGL", -4.0, store.rules()).unwrap();

        assert_eq!(breach.symbol, "GOOGL");
        assert_eq!(breach.change_percent, -4.0);
        assert_eq!(breach.threshold_percent, -3.0);

        assert_eq!(evaluate_breach("AAPL", 2.0, store.rules()), None);
    }

    #[test]
    fn test_symbol_comparison_is_case_sensitive() {
        let store = sample_rules();
        assert_eq!(check_rule("aapl", 6.0, store.rules()), None);
    }
}
