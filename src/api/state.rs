//! Application state for the attendance and payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::clock::Clock;
use crate::config::ReferenceData;
use crate::ledger::AttendanceLedger;
use crate::payroll::PayrollEngine;
use crate::store::MemoryStore;

/// Shared application state.
///
/// The ledger and the payroll engine share one store and one copy of the
/// reference data. Handlers take "now" from the clock, never from the
/// request.
#[derive(Clone)]
pub struct AppState {
    ledger: AttendanceLedger<MemoryStore>,
    payroll: PayrollEngine<MemoryStore>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates the state over a store, the loaded reference data and a clock.
    pub fn new(store: Arc<MemoryStore>, reference: ReferenceData, clock: Arc<dyn Clock>) -> Self {
        let reference = Arc::new(reference);
        Self {
            ledger: AttendanceLedger::new(Arc::clone(&store), Arc::clone(&reference)),
            payroll: PayrollEngine::new(store, reference),
            clock,
        }
    }

    /// The attendance ledger.
    pub fn ledger(&self) -> &AttendanceLedger<MemoryStore> {
        &self.ledger
    }

    /// The payroll engine.
    pub fn payroll(&self) -> &PayrollEngine<MemoryStore> {
        &self.payroll
    }

    /// Current local date and time.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::ConfigLoader;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_now_comes_from_clock() {
        let reference = ConfigLoader::load("./config/reference").unwrap();
        let now = NaiveDateTime::parse_from_str("2026-01-14 08:05:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            reference,
            Arc::new(FixedClock::new(now)),
        );
        assert_eq!(state.now(), now);
    }
}
