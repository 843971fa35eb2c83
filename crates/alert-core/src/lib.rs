//! Core alerting logic: user-defined percentage-change rules, the rule
//! evaluator, the notification recipient list, and the price simulation
//! arithmetic. No I/O lives here.

pub mod error;
pub mod evaluate;
pub mod recipients;
pub mod rules;
pub mod session;
pub mod simulation;

pub use error::AlertError;
pub use evaluate::{check_rule, evaluate_breach, Breach};
pub use recipients::RecipientList;
pub use rules::{RuleStore, StockRule};
pub use session::SessionState;
pub use simulation::{simulate_entry, SimulationEntry, SimulationOutcome};
