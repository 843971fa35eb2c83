//! Per-session mutable state, passed explicitly to whatever layer drives the
//! evaluator and notifier. Lives only as long as the process.

use serde::{Deserialize, Serialize};

use crate::recipients::RecipientList;
use crate::rules::RuleStore;
use crate::simulation::SimulationEntry;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub rules: RuleStore,
    pub recipients: RecipientList,
    pub simulation_entries: Vec<SimulationEntry>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_empty() {
        let session = SessionState::new();
        assert!(session.rules.is_empty());
        assert!(session.recipients.is_empty());
        assert!(session.simulation_entries.is_empty());
    }

    #[test]
    fn test_session_roundtrips_through_json() {
        let mut session = SessionState::new();
        session.rules.add("AAPL", 5.0).unwrap();
        session.recipients.add("a@example.com").unwrap();
        session
            .simulation_entries
            .push(SimulationEntry::new("AAPL", 150.0).unwrap());

        let json = serde_json::to_string(&session).unwrap();
        let restored: SessionState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.rules.len(), 1);
        assert_eq!(restored.rules.rules()[0].symbol, "AAPL");
        assert_eq!(restored.recipients.as_slice(), ["a@example.com"]);
        assert_eq!(restored.simulation_entries.len(), 1);
    }
}
