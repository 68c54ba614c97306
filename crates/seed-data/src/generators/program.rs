//! Program schedule for the run date.

use crate::clock;
use crate::generators::FixtureContext;
use crate::models::{Program, ProgramHost, ProgramMetadata};

/// Specification for one scheduled program.
#[derive(Debug, Clone)]
pub struct ProgramSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    /// Hours after local midnight.
    pub start_hour: i64,
    pub duration_hours: i64,
    /// `Some("")` writes an empty field; `None` omits it.
    pub thumbnail_url: Option<&'static str>,
    pub live_stream_url: Option<&'static str>,
    pub is_live: bool,
    pub is_recurring: bool,
    pub tags: &'static [&'static str],
    pub host: HostSpec,
}

#[derive(Debug, Clone)]
pub struct HostSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub avatar_url: &'static str,
}

/// Default schedule: a live morning service and an evening youth meeting.
pub const DEFAULT_SCHEDULE: &[ProgramSpec] = &[
    ProgramSpec {
        id: "morning-service",
        title: "Culte du Matin",
        description: "Moment de louange et d'adoration",
        category: "culte",
        start_hour: 0,
        duration_hours: 2,
        thumbnail_url: Some(""),
        live_stream_url: Some(""),
        is_live: true,
        is_recurring: true,
        tags: &["culte", "louange"],
        host: HostSpec {
            id: "host1",
            name: "Pasteur Martin",
            title: "Pasteur Principal",
            avatar_url: "",
        },
    },
    ProgramSpec {
        id: "youth-meeting",
        title: "Jeunesse en Action",
        description: "Rencontre des jeunes",
        category: "jeunesse",
        start_hour: 5,
        duration_hours: 1,
        thumbnail_url: None,
        live_stream_url: None,
        is_live: false,
        is_recurring: false,
        tags: &["jeunesse"],
        host: HostSpec {
            id: "host2",
            name: "Soeur Marie",
            title: "Leader Jeunesse",
            avatar_url: "",
        },
    },
];

/// Generates program documents positioned within today's window.
pub struct ProgramGenerator {
    schedule: Vec<ProgramSpec>,
}

impl ProgramGenerator {
    pub fn new() -> Self {
        Self {
            schedule: DEFAULT_SCHEDULE.to_vec(),
        }
    }

    pub fn with_schedule(schedule: Vec<ProgramSpec>) -> Self {
        Self { schedule }
    }

    /// Generates every program in schedule order.
    pub fn generate(&self, ctx: &FixtureContext) -> Vec<Program> {
        self.schedule
            .iter()
            .map(|spec| Self::generate_one(spec, ctx))
            .collect()
    }

    fn generate_one(spec: &ProgramSpec, ctx: &FixtureContext) -> Program {
        let now = ctx.timestamp();
        let start = ctx.today.at_hour(spec.start_hour);
        let end = ctx.today.at_hour(spec.start_hour + spec.duration_hours);

        Program {
            id: spec.id.to_string(),
            title: spec.title.to_string(),
            description: spec.description.to_string(),
            category: spec.category.to_string(),
            start_time: clock::iso8601(&start),
            end_time: clock::iso8601(&end),
            thumbnail_url: spec.thumbnail_url.map(str::to_string),
            live_stream_url: spec.live_stream_url.map(str::to_string),
            is_live: spec.is_live,
            is_recurring: spec.is_recurring,
            tags: spec.tags.iter().map(|t| t.to_string()).collect(),
            host: ProgramHost {
                id: spec.host.id.to_string(),
                name: spec.host.name.to_string(),
                title: spec.host.title.to_string(),
                avatar_url: spec.host.avatar_url.to_string(),
            },
            metadata: ProgramMetadata {
                view_count: 0,
                like_count: 0,
                rating: 0.0,
                reminders: Vec::new(),
                created_at: now.clone(),
                updated_at: now,
            },
        }
    }
}

impl Default for ProgramGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn ctx() -> FixtureContext {
        let now = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 16, 14, 45, 0)
            .unwrap();
        FixtureContext::new("test-user", &now)
    }

    #[test]
    fn test_morning_service_timing() {
        let programs = ProgramGenerator::new().generate(&ctx());
        let morning = programs.iter().find(|p| p.id == "morning-service").unwrap();

        // Local midnight in UTC+2 is 22:00 the previous day.
        assert_eq!(morning.start_time, "2026-10-15T22:00:00.000Z");
        assert_eq!(morning.end_time, "2026-10-16T00:00:00.000Z");
        assert!(morning.is_live);
        assert!(morning.is_recurring);
        assert_eq!(morning.tags, vec!["culte", "louange"]);
        assert_eq!(morning.thumbnail_url.as_deref(), Some(""));
    }

    #[test]
    fn test_schedule_order_and_ids() {
        let programs = ProgramGenerator::new().generate(&ctx());
        let ids: Vec<&str> = programs.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["morning-service", "youth-meeting"]);

        let youth = &programs[1];
        assert_eq!(youth.start_time, "2026-10-16T03:00:00.000Z");
        assert_eq!(youth.end_time, "2026-10-16T04:00:00.000Z");
        assert!(!youth.is_live);
        assert!(youth.live_stream_url.is_none());
        assert_eq!(youth.host.name, "Soeur Marie");
    }

    #[test]
    fn test_metadata_starts_empty() {
        let ctx = ctx();
        let programs = ProgramGenerator::new().generate(&ctx);
        for program in &programs {
            assert_eq!(program.metadata.view_count, 0);
            assert!(program.metadata.reminders.is_empty());
            assert_eq!(program.metadata.created_at, ctx.timestamp());
        }
    }
}
