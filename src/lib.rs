#![doc(test(attr(deny(warnings))))]

//! Limpia Core provides the billing primitives for a cleaning-services
//! business: per-property rate plans, service records, invoice aggregation,
//! and the reporting and persistence plumbing around them.

pub mod access;
pub mod billing;
pub mod cli;
pub mod config;
pub mod dates;
pub mod domain;
pub mod errors;
pub mod format;
pub mod invoice;
pub mod registry;
pub mod services;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Limpia Core tracing initialized.");
    });
}
