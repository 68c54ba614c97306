//! Seeded user profile.

use crate::generators::FixtureContext;
use crate::models::{NotificationToggles, UserPreferences, UserProfile, UserStats};

/// Configuration for user generation.
#[derive(Debug, Clone)]
pub struct UserGenConfig {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub city: String,
    /// Preferred UI language (ISO 639-1).
    pub language: String,
    pub dark_mode: bool,
    pub notifications: NotificationToggles,
}

impl Default for UserGenConfig {
    fn default() -> Self {
        Self {
            first_name: "Jean".to_string(),
            last_name: "Dupont".to_string(),
            email: "jean@example.com".to_string(),
            city: "Paris".to_string(),
            language: "fr".to_string(),
            dark_mode: false,
            notifications: NotificationToggles {
                live_services: true,
                new_sermons: true,
                events: true,
                prayer_meetings: true,
                testimonies: false,
            },
        }
    }
}

impl UserGenConfig {
    /// Display name used where the user appears as an author.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Generates the seeded user's profile document.
pub struct UserGenerator {
    config: UserGenConfig,
}

impl UserGenerator {
    /// Creates a new user generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: UserGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: UserGenConfig) -> Self {
        Self { config }
    }

    /// Generates a fresh profile: joined now, nothing watched or liked yet.
    pub fn generate(&self, ctx: &FixtureContext) -> UserProfile {
        let now = ctx.timestamp();

        UserProfile {
            first_name: self.config.first_name.clone(),
            last_name: self.config.last_name.clone(),
            email: self.config.email.clone(),
            city: self.config.city.clone(),
            join_date: now.clone(),
            preferences: UserPreferences {
                language: self.config.language.clone(),
                dark_mode: self.config.dark_mode,
                notifications: self.config.notifications.clone(),
            },
            stats: UserStats {
                watched_programs: Vec::new(),
                liked_reels: Vec::new(),
                total_watch_time: 0,
                streak_days: 0,
            },
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new()
    }
}
