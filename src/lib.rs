#![doc(test(attr(deny(warnings))))]

//! Waterlog offers the entry store, date-bucketing, and weekly summary
//! primitives behind a daily water intake log.

pub mod cli;
pub mod core;
pub mod errors;
pub mod journal;
pub mod services;
pub mod settings;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Waterlog tracing initialized.");
    });
}
