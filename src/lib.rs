#![doc(test(attr(deny(warnings))))]

//! Expense Tracker records personal expenses, filters them by category and
//! date, summarises spending per category, and exports the filtered view as CSV.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod presenter;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Tracker tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
