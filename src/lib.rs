//! Clinibase: embedded records engine for a small-clinic dashboard.
//!
//! The crate owns the clinic's relational store (patients, doctors,
//! appointments, clinical records, communications, finance entries) and
//! the referential-integrity rules that guard it: document-number
//! validation, natural-key uniqueness, and the dependency checks that
//! gate hard deletion. A UI shell calls in synchronously per user
//! action and renders whatever structured result comes back; nothing
//! here knows about presentation.

pub mod config;
pub mod models;
pub mod db;
pub mod integrity;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for a host binary.
///
/// Library consumers that install their own subscriber should skip this.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
