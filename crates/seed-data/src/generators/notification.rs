//! Notifications addressed to the seeded user.

use crate::generators::FixtureContext;
use crate::models::{Notification, NotificationKind};

#[derive(Debug, Clone)]
pub struct NotificationSpec {
    pub title: &'static str,
    pub message: &'static str,
    pub kind: NotificationKind,
}

pub const DEFAULT_NOTIFICATIONS: &[NotificationSpec] = &[
    NotificationSpec {
        title: "Service en direct",
        message: "Le culte commence maintenant",
        kind: NotificationKind::LiveService,
    },
    NotificationSpec {
        title: "Nouveau sermon",
        message: "Un nouveau sermon est disponible",
        kind: NotificationKind::NewSermon,
    },
];

pub struct NotificationGenerator {
    notifications: Vec<NotificationSpec>,
}

impl NotificationGenerator {
    pub fn new() -> Self {
        Self {
            notifications: DEFAULT_NOTIFICATIONS.to_vec(),
        }
    }

    pub fn with_notifications(notifications: Vec<NotificationSpec>) -> Self {
        Self { notifications }
    }

    /// Generates unread notifications stamped with the run's user id.
    pub fn generate(&self, ctx: &FixtureContext) -> Vec<Notification> {
        let now = ctx.timestamp();

        self.notifications
            .iter()
            .map(|spec| Notification {
                user_id: ctx.user_id.clone(),
                title: spec.title.to_string(),
                message: spec.message.to_string(),
                kind: spec.kind,
                read: false,
                created_at: now.clone(),
            })
            .collect()
    }
}

impl Default for NotificationGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_generate_notifications() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 7, 0, 0).unwrap();
        let ctx = FixtureContext::new("test-user", &now);
        let notifications = NotificationGenerator::new().generate(&ctx);

        assert_eq!(notifications.len(), 2);
        assert!(notifications.iter().all(|n| n.user_id == "test-user" && !n.read));
        assert_eq!(notifications[0].kind, NotificationKind::LiveService);
        assert_eq!(notifications[1].kind, NotificationKind::NewSermon);
    }
}
