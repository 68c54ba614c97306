//! Fixture generators for seed data.
//!
//! This module provides generators for each record family the app reads:
//! - [`UserGenerator`]: Seeded user profile with preferences and stats
//! - [`ProgramGenerator`]: Today's program schedule
//! - [`ReelGenerator`]: Short videos authored by the seeded user
//! - [`LiveStreamGenerator`]: The `main` live stream pointer
//! - [`NotificationGenerator`]: Notifications addressed to the seeded user

pub mod live_stream;
pub mod notification;
pub mod program;
pub mod reel;
pub mod user;

use chrono::{DateTime, TimeZone, Utc};

use crate::clock::{self, DayWindow};
use crate::models::{LiveStream, Notification, Program, Reel, UserProfile};

pub use live_stream::LiveStreamGenerator;
pub use notification::{NotificationGenerator, NotificationSpec};
pub use program::{ProgramGenerator, ProgramSpec};
pub use reel::{ReelGenerator, ReelSpec};
pub use user::{UserGenConfig, UserGenerator};

/// Inputs shared by every generator for one run.
#[derive(Debug, Clone)]
pub struct FixtureContext {
    /// Seeded user's document id.
    pub user_id: String,
    /// Instant the run started.
    pub now: DateTime<Utc>,
    /// Local day containing `now`.
    pub today: DayWindow,
}

impl FixtureContext {
    /// Builds the context for a run starting at `now`.
    ///
    /// `now` keeps its time zone until the day window is computed, so the
    /// schedule follows the caller's local calendar.
    pub fn new<Tz: TimeZone>(user_id: impl Into<String>, now: &DateTime<Tz>) -> Self {
        Self {
            user_id: user_id.into(),
            now: now.with_timezone(&Utc),
            today: DayWindow::containing(now),
        }
    }

    /// `now` in document timestamp format.
    pub fn timestamp(&self) -> String {
        clock::iso8601(&self.now)
    }
}

/// Every record written by one seeding run.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub user_id: String,
    pub user: UserProfile,
    pub programs: Vec<Program>,
    pub reels: Vec<Reel>,
    pub live_stream: LiveStream,
    pub notifications: Vec<Notification>,
}

impl Fixtures {
    /// Builds the default fixture set.
    pub fn build(ctx: &FixtureContext) -> Self {
        Self {
            user_id: ctx.user_id.clone(),
            user: UserGenerator::new().generate(ctx),
            programs: ProgramGenerator::new().generate(ctx),
            reels: ReelGenerator::new().generate(ctx),
            live_stream: LiveStreamGenerator::new().generate(ctx),
            notifications: NotificationGenerator::new().generate(ctx),
        }
    }

    /// Number of documents a seeding run writes.
    pub fn document_count(&self) -> usize {
        2 + self.programs.len() + self.reels.len() + self.notifications.len()
    }
}
