//! Fluent builder API for seeding runs.
//!
//! The [`ScenarioBuilder`] resolves the fixture set for a run, connects to
//! the store through an injected connector, and seeds it.

mod scenario;

pub use scenario::{ScenarioBuilder, ScenarioMetrics, ScenarioResult, connect_firestore};
