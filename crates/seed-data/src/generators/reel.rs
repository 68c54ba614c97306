//! Short video reels authored by the seeded user.

use crate::generators::{FixtureContext, UserGenConfig};
use crate::models::Reel;

#[derive(Debug, Clone)]
pub struct ReelSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub video_url: &'static str,
    pub thumbnail_url: &'static str,
    pub author_avatar: &'static str,
    /// Seconds.
    pub duration: u32,
    pub tags: &'static [&'static str],
}

pub const DEFAULT_REELS: &[ReelSpec] = &[ReelSpec {
    id: "test-reel-1",
    title: "Témoignage",
    description: "Un témoignage puissant",
    video_url: "https://storage.googleapis.com/your-bucket/reels/video1.mp4",
    thumbnail_url: "",
    author_avatar: "https://placehold.co/100x100",
    duration: 30,
    tags: &["témoignage"],
}];

/// Generates reels with zeroed engagement counters.
pub struct ReelGenerator {
    reels: Vec<ReelSpec>,
    author_name: String,
}

impl ReelGenerator {
    pub fn new() -> Self {
        Self {
            reels: DEFAULT_REELS.to_vec(),
            author_name: UserGenConfig::default().display_name(),
        }
    }

    pub fn with_reels(reels: Vec<ReelSpec>, author_name: impl Into<String>) -> Self {
        Self {
            reels,
            author_name: author_name.into(),
        }
    }

    pub fn generate(&self, ctx: &FixtureContext) -> Vec<Reel> {
        let now = ctx.timestamp();

        self.reels
            .iter()
            .map(|spec| Reel {
                id: spec.id.to_string(),
                title: spec.title.to_string(),
                description: spec.description.to_string(),
                video_url: spec.video_url.to_string(),
                thumbnail_url: spec.thumbnail_url.to_string(),
                author_id: ctx.user_id.clone(),
                author_name: self.author_name.clone(),
                author_avatar: spec.author_avatar.to_string(),
                likes: Vec::new(),
                like_count: 0,
                comments: Vec::new(),
                comment_count: 0,
                shares: 0,
                views: 0,
                duration: spec.duration,
                tags: spec.tags.iter().map(|t| t.to_string()).collect(),
                created_at: now.clone(),
            })
            .collect()
    }
}

impl Default for ReelGenerator {
    fn default() -> Self {
        Self::new()
    }
}
