//! Document shapes for the app's Firestore collections.
//!
//! Field names are camelCase to match what the mobile client reads.
//! Timestamps are ISO-8601 UTC strings (see [`crate::clock::iso8601`]).

use serde::{Deserialize, Serialize};

/// Collection names.
pub mod collections {
    pub const USERS: &str = "users";
    pub const PROGRAMS: &str = "programs";
    pub const REELS: &str = "reels";
    pub const LIVE_STREAMS: &str = "liveStreams";
    pub const NOTIFICATIONS: &str = "notifications";
}

/// Id of the singleton live stream document.
pub const MAIN_LIVE_STREAM_ID: &str = "main";

/// User profile stored at `users/{userId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub city: String,
    pub join_date: String,
    pub preferences: UserPreferences,
    pub stats: UserStats,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub language: String,
    pub dark_mode: bool,
    pub notifications: NotificationToggles,
}

/// Per-category push notification switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationToggles {
    pub live_services: bool,
    pub new_sermons: bool,
    pub events: bool,
    pub prayer_meetings: bool,
    pub testimonies: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub watched_programs: Vec<String>,
    pub liked_reels: Vec<String>,
    /// Seconds.
    pub total_watch_time: u64,
    pub streak_days: u32,
}

/// Scheduled program stored at `programs/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_stream_url: Option<String>,
    pub is_live: bool,
    pub is_recurring: bool,
    pub tags: Vec<String>,
    pub host: ProgramHost,
    pub metadata: ProgramMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramHost {
    pub id: String,
    pub name: String,
    pub title: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramMetadata {
    pub view_count: u64,
    pub like_count: u64,
    pub rating: f64,
    /// User ids that asked to be reminded.
    pub reminders: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Short video stored at `reels/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reel {
    pub id: String,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    /// Informal reference to `users/{authorId}`.
    pub author_id: String,
    pub author_name: String,
    pub author_avatar: String,
    pub likes: Vec<String>,
    pub like_count: u64,
    pub comments: Vec<String>,
    pub comment_count: u64,
    pub shares: u64,
    pub views: u64,
    /// Seconds.
    pub duration: u32,
    pub tags: Vec<String>,
    pub created_at: String,
}

/// Current stream pointer stored at `liveStreams/main`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStream {
    pub stream_url: String,
    pub backup_url: String,
    pub is_active: bool,
    pub quality: String,
    /// Kbps.
    pub bitrate: u32,
    pub viewers: u64,
    pub started_at: String,
}

/// Per-user notification stored at `notifications/{auto-id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    LiveService,
    NewSermon,
    PrayerMeeting,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::LiveService => "live_service",
            NotificationKind::NewSermon => "new_sermon",
            NotificationKind::PrayerMeeting => "prayer_meeting",
        }
    }
}
