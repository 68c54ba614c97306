//! Database seeding utilities.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ConfigError;
use crate::generators::Fixtures;
use crate::models::{
    LiveStream, MAIN_LIVE_STREAM_ID, Notification, Program, Reel, UserProfile, collections,
};
use crate::store::{DocumentStore, StoreError, to_fields};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("{0}")]
    Configuration(#[from] ConfigError),
    #[error("Failed to initialize Firestore: {0}")]
    Initialization(#[source] StoreError),
    #[error("Failed to write {collection}/{id}: {source}")]
    Write {
        collection: &'static str,
        id: String,
        source: StoreError,
    },
}

impl SeedError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            SeedError::Configuration(_) => 1,
            SeedError::Initialization(_) => 1,
            SeedError::Write { .. } => 1,
        }
    }
}

/// What a completed run wrote.
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    /// `collection/id` of every document written, in write order.
    pub written: Vec<String>,
    /// Ids generated for inserted notifications.
    pub notification_ids: Vec<String>,
}

impl SeedReport {
    fn record(&mut self, collection: &str, id: &str) {
        self.written.push(format!("{collection}/{id}"));
    }

    /// Documents written to one collection.
    pub fn count(&self, collection: &str) -> usize {
        let prefix = format!("{collection}/");
        self.written.iter().filter(|p| p.starts_with(&prefix)).count()
    }
}

/// Seeder for writing fixtures to a document store.
pub struct Seeder {
    store: Arc<dyn DocumentStore>,
}

impl Seeder {
    /// Creates a new seeder over the given store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Writes every fixture in order: user, programs, reels, live stream,
    /// notifications.
    ///
    /// The first failed write aborts the run. Documents already written stay.
    pub async fn seed(&self, fixtures: &Fixtures) -> Result<SeedReport, SeedError> {
        let mut report = SeedReport::default();

        self.seed_user(&fixtures.user_id, &fixtures.user, &mut report)
            .await?;
        self.seed_programs(&fixtures.programs, &mut report).await?;
        self.seed_reels(&fixtures.reels, &mut report).await?;
        self.seed_live_stream(&fixtures.live_stream, &mut report)
            .await?;
        self.seed_notifications(&fixtures.notifications, &mut report)
            .await?;

        Ok(report)
    }

    /// Seeds the user profile at `users/{user_id}`.
    pub async fn seed_user(
        &self,
        user_id: &str,
        user: &UserProfile,
        report: &mut SeedReport,
    ) -> Result<(), SeedError> {
        self.set(collections::USERS, user_id, user, report).await?;
        info!("Seeded user {}", user_id);
        Ok(())
    }

    /// Seeds programs in list order.
    pub async fn seed_programs(
        &self,
        programs: &[Program],
        report: &mut SeedReport,
    ) -> Result<(), SeedError> {
        info!("Seeding {} programs...", programs.len());

        for program in programs {
            self.set(collections::PROGRAMS, &program.id, program, report)
                .await?;
        }

        info!("Seeded {} programs", programs.len());
        Ok(())
    }

    /// Seeds reels.
    pub async fn seed_reels(&self, reels: &[Reel], report: &mut SeedReport) -> Result<(), SeedError> {
        info!("Seeding {} reels...", reels.len());

        for reel in reels {
            self.set(collections::REELS, &reel.id, reel, report).await?;
        }

        info!("Seeded {} reels", reels.len());
        Ok(())
    }

    /// Seeds the singleton live stream at `liveStreams/main`.
    pub async fn seed_live_stream(
        &self,
        live_stream: &LiveStream,
        report: &mut SeedReport,
    ) -> Result<(), SeedError> {
        self.set(
            collections::LIVE_STREAMS,
            MAIN_LIVE_STREAM_ID,
            live_stream,
            report,
        )
        .await?;
        info!("Seeded live stream {}", MAIN_LIVE_STREAM_ID);
        Ok(())
    }

    /// Inserts notifications; every call adds new documents.
    pub async fn seed_notifications(
        &self,
        notifications: &[Notification],
        report: &mut SeedReport,
    ) -> Result<(), SeedError> {
        info!("Seeding {} notifications...", notifications.len());

        for notification in notifications {
            let write_error = |source| SeedError::Write {
                collection: collections::NOTIFICATIONS,
                id: "(auto)".to_string(),
                source,
            };

            let fields = to_fields(notification).map_err(write_error)?;
            let id = self
                .store
                .add(collections::NOTIFICATIONS, &fields)
                .await
                .map_err(write_error)?;

            debug!("Inserted notification {} for {}", id, notification.user_id);
            report.record(collections::NOTIFICATIONS, &id);
            report.notification_ids.push(id);
        }

        info!("Seeded {} notifications", notifications.len());
        Ok(())
    }

    /// Full-overwrite write of one document.
    async fn set<T: Serialize + Sync>(
        &self,
        collection: &'static str,
        id: &str,
        document: &T,
        report: &mut SeedReport,
    ) -> Result<(), SeedError> {
        let write_error = |source| SeedError::Write {
            collection,
            id: id.to_string(),
            source,
        };

        let fields = to_fields(document).map_err(write_error)?;
        self.store
            .set(collection, id, &fields)
            .await
            .map_err(write_error)?;

        debug!("Wrote {}/{}", collection, id);
        report.record(collection, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::FixtureContext;
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn fixtures(user_id: &str) -> Fixtures {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        Fixtures::build(&FixtureContext::new(user_id, &now))
    }

    #[tokio::test]
    async fn test_seed_writes_in_order() {
        let store = MemoryStore::new();
        let seeder = Seeder::new(Arc::new(store.clone()));

        let report = seeder.seed(&fixtures("test-user")).await.unwrap();

        assert_eq!(
            &report.written[..5],
            &[
                "users/test-user",
                "programs/morning-service",
                "programs/youth-meeting",
                "reels/test-reel-1",
                "liveStreams/main",
            ]
        );
        assert_eq!(report.count(collections::NOTIFICATIONS), 2);
        assert_eq!(report.notification_ids.len(), 2);
        assert_eq!(store.total(), 7);
    }

    #[tokio::test]
    async fn test_notification_failure_reports_collection() {
        let store = MemoryStore::new();
        store.fail_on(collections::NOTIFICATIONS, "*");
        let seeder = Seeder::new(Arc::new(store.clone()));

        let err = seeder.seed(&fixtures("test-user")).await.unwrap_err();

        assert!(matches!(
            err,
            SeedError::Write { collection: "notifications", .. }
        ));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(store.count(collections::LIVE_STREAMS), 1);
        assert_eq!(store.count(collections::NOTIFICATIONS), 0);
    }

    #[test]
    fn test_error_messages() {
        let err = SeedError::from(ConfigError::MissingCredentials);
        assert_eq!(
            err.to_string(),
            "Missing credentials. Set GOOGLE_APPLICATION_CREDENTIALS or FIRESTORE_EMULATOR_HOST."
        );

        let err = SeedError::Write {
            collection: collections::REELS,
            id: "test-reel-1".to_string(),
            source: StoreError::Rejected("reels/test-reel-1".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Failed to write reels/test-reel-1: Write rejected for reels/test-reel-1"
        );
    }
}
