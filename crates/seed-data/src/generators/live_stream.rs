//! The singleton live stream pointer.

use crate::generators::FixtureContext;
use crate::models::LiveStream;

pub struct LiveStreamGenerator {
    stream_url: String,
    quality: String,
    bitrate: u32,
}

impl LiveStreamGenerator {
    pub fn new() -> Self {
        Self {
            stream_url: "https://example.com/live.m3u8".to_string(),
            quality: "1080p".to_string(),
            bitrate: 5000,
        }
    }

    /// An active stream that started at the beginning of the run.
    pub fn generate(&self, ctx: &FixtureContext) -> LiveStream {
        LiveStream {
            stream_url: self.stream_url.clone(),
            backup_url: String::new(),
            is_active: true,
            quality: self.quality.clone(),
            bitrate: self.bitrate,
            viewers: 0,
            started_at: ctx.timestamp(),
        }
    }
}

impl Default for LiveStreamGenerator {
    fn default() -> Self {
        Self::new()
    }
}
