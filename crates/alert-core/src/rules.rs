//! Ordered store of user-defined price-change rules.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AlertError;

/// A stored alert condition: notify when the observed percentage change for
/// `symbol` reaches `threshold_percent` in magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRule {
    /// Assigned at creation, never reused.
    pub id: Uuid,
    /// Uppercase ticker symbol.
    pub symbol: String,
    /// Signed threshold in [-100, 100]. The sign is kept for display; the
    /// trigger decision compares absolute magnitudes.
    pub threshold_percent: f64,
}

/// Rules in insertion order. Insertion order is observable: when several
/// rules exist for one symbol, the evaluator triggers on the first match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleStore {
    rules: Vec<StockRule>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a rule, returning the stored copy with its fresh id.
    pub fn add(&mut self, symbol: &str, threshold_percent: f64) -> Result<StockRule, AlertError> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(AlertError::EmptySymbol);
        }
        if !(-100.0..=100.0).contains(&threshold_percent) {
            return Err(AlertError::ThresholdOutOfRange(threshold_percent));
        }

        let rule = StockRule {
            id: Uuid::new_v4(),
            symbol,
            threshold_percent,
        };
        self.rules.push(rule.clone());
        Ok(rule)
    }

    /// Remove the rule with the given id. Returns false if absent.
    pub fn remove(&mut self, id: Uuid) -> bool {
        match self.rules.iter().position(|r| r.id == id) {
            Some(idx) => {
                self.rules.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove the rule at `index` in stored order. Returns false if out of range.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index < self.rules.len() {
            self.rules.remove(index);
            true
        } else {
            false
        }
    }

    /// Rules in stored (insertion) order.
    pub fn rules(&self) -> &[StockRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
