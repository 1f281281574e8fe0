#![doc(test(attr(deny(warnings))))]

//! Studio Core offers the membership lifecycle, freeze, and payment
//! scheduling primitives that power a dance-school back office.
//!
//! Every due/overdue computation takes its reference date as an explicit
//! parameter, so the whole engine can run against a simulated "today".

pub mod clock;
pub mod core;
pub mod errors;
pub mod roster;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Studio Core tracing initialized.");
    });
}
