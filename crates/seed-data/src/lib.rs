//! Fixture seeding for the church media app.
//!
//! This crate writes a small, fixed set of documents to Firestore (or its
//! local emulator) so the mobile client has something to show during
//! development: a user profile, today's programs, a reel, the live stream
//! pointer, and notifications for the seeded user.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let result = ScenarioBuilder::run(|key| std::env::var(key).ok(), connect_firestore).await?;
//! ```
//!
//! Re-running overwrites the user, programs, reels and live stream in place
//! and appends two more notifications.

pub mod builders;
pub mod clock;
pub mod config;
pub mod db;
pub mod generators;
pub mod models;
pub mod store;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{ScenarioBuilder, ScenarioMetrics, ScenarioResult, connect_firestore};
    pub use crate::clock::DayWindow;
    pub use crate::config::{ConfigError, ConnectionMode, SeedConfig};
    pub use crate::db::{SeedError, SeedReport, Seeder};
    pub use crate::generators::{
        FixtureContext, Fixtures, LiveStreamGenerator, NotificationGenerator, ProgramGenerator,
        ReelGenerator, UserGenerator,
    };
    pub use crate::models::{LiveStream, Notification, Program, Reel, UserProfile};
    pub use crate::store::{DocumentStore, FirestoreClient, MemoryStore, StoreError};
}
