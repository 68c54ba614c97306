//! Fluent builder for seeding runs.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Local, TimeZone, Utc};
use tracing::{debug, info};

use crate::clock::DayWindow;
use crate::config::{ConnectionMode, DEFAULT_USER_ID, SeedConfig};
use crate::db::{SeedError, SeedReport, Seeder};
use crate::generators::{
    FixtureContext, Fixtures, LiveStreamGenerator, NotificationGenerator, NotificationSpec,
    ProgramGenerator, ProgramSpec, ReelGenerator, ReelSpec, UserGenConfig, UserGenerator,
    notification::DEFAULT_NOTIFICATIONS, program::DEFAULT_SCHEDULE, reel::DEFAULT_REELS,
};
use crate::store::{DocumentStore, FirestoreClient, StoreError};

/// Result of building and seeding a scenario.
#[derive(Debug)]
pub struct ScenarioResult {
    pub fixtures: Fixtures,
    pub report: SeedReport,
    /// Populated if metrics tracking is enabled.
    pub metrics: Option<ScenarioMetrics>,
}

/// Timing for a seeding run.
#[derive(Debug, Clone)]
pub struct ScenarioMetrics {
    /// Time spent building fixtures (milliseconds).
    pub generation_time_ms: u64,
    /// Time spent writing to the store (milliseconds).
    pub seeding_time_ms: u64,
    /// Documents written.
    pub document_count: usize,
}

/// Builder for a complete seeding run.
///
/// # Example
///
/// ```rust,ignore
/// let result = ScenarioBuilder::new()
///     .with_user_id("abc123")
///     .at(&Local::now())
///     .seed(store)
///     .await?;
/// ```
pub struct ScenarioBuilder {
    user_id: String,
    /// Run instant and its local day; `Local::now()` when unset.
    clock: Option<(DateTime<Utc>, DayWindow)>,

    user_config: UserGenConfig,
    schedule: Vec<ProgramSpec>,
    reels: Vec<ReelSpec>,
    notifications: Vec<NotificationSpec>,

    track_metrics: bool,
}

impl ScenarioBuilder {
    /// Creates a builder with the default fixture set.
    pub fn new() -> Self {
        Self {
            user_id: DEFAULT_USER_ID.to_string(),
            clock: None,
            user_config: UserGenConfig::default(),
            schedule: DEFAULT_SCHEDULE.to_vec(),
            reels: DEFAULT_REELS.to_vec(),
            notifications: DEFAULT_NOTIFICATIONS.to_vec(),
            track_metrics: false,
        }
    }

    /// Creates a builder for the resolved configuration.
    pub fn from_config(config: &SeedConfig) -> Self {
        Self::new().with_user_id(config.user_id.clone())
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Pins the run instant. The program schedule follows `now`'s local day.
    pub fn at<Tz: TimeZone>(mut self, now: &DateTime<Tz>) -> Self {
        self.clock = Some((now.with_timezone(&Utc), DayWindow::containing(now)));
        self
    }

    pub fn with_user_config(mut self, config: UserGenConfig) -> Self {
        self.user_config = config;
        self
    }

    pub fn with_schedule(mut self, schedule: Vec<ProgramSpec>) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_reels(mut self, reels: Vec<ReelSpec>) -> Self {
        self.reels = reels;
        self
    }

    pub fn with_notifications(mut self, notifications: Vec<NotificationSpec>) -> Self {
        self.notifications = notifications;
        self
    }

    /// Enables timing metrics on the result.
    pub fn with_metrics(mut self) -> Self {
        self.track_metrics = true;
        self
    }

    fn context(&self) -> FixtureContext {
        match self.clock {
            Some((now, today)) => FixtureContext {
                user_id: self.user_id.clone(),
                now,
                today,
            },
            None => FixtureContext::new(self.user_id.clone(), &Local::now()),
        }
    }

    /// Builds the fixture set without writing anything.
    pub fn build_fixtures(&self) -> Fixtures {
        let ctx = self.context();
        let author_name = self.user_config.display_name();

        Fixtures {
            user_id: ctx.user_id.clone(),
            user: UserGenerator::with_config(self.user_config.clone()).generate(&ctx),
            programs: ProgramGenerator::with_schedule(self.schedule.clone()).generate(&ctx),
            reels: ReelGenerator::with_reels(self.reels.clone(), author_name).generate(&ctx),
            live_stream: LiveStreamGenerator::new().generate(&ctx),
            notifications: NotificationGenerator::with_notifications(self.notifications.clone())
                .generate(&ctx),
        }
    }

    /// Builds the fixtures and writes them to `store`.
    pub async fn seed(self, store: Arc<dyn DocumentStore>) -> Result<ScenarioResult, SeedError> {
        let start = Instant::now();
        let fixtures = self.build_fixtures();
        let generation_time_ms = start.elapsed().as_millis() as u64;

        let seed_start = Instant::now();
        let report = Seeder::new(store).seed(&fixtures).await?;
        let seeding_time_ms = seed_start.elapsed().as_millis() as u64;

        info!("Seeding completed.");

        let metrics = self.track_metrics.then(|| ScenarioMetrics {
            generation_time_ms,
            seeding_time_ms,
            document_count: report.written.len(),
        });

        Ok(ScenarioResult {
            fixtures,
            report,
            metrics,
        })
    }

    /// Runs a full seeding pass: resolve configuration, connect, write.
    ///
    /// `connect` is only invoked once configuration resolves, so a missing
    /// credential setting never reaches the store.
    pub async fn run<F, C, Fut>(lookup: F, connect: C) -> Result<ScenarioResult, SeedError>
    where
        F: Fn(&str) -> Option<String>,
        C: FnOnce(ConnectionMode) -> Fut,
        Fut: Future<Output = Result<Arc<dyn DocumentStore>, StoreError>>,
    {
        let config = SeedConfig::from_lookup(lookup)?;
        debug!(
            "Resolved configuration: {}",
            serde_json::to_string(&config).unwrap_or_default()
        );
        info!(
            "Seeding as user {} ({})",
            config.user_id,
            config.connection.as_str()
        );

        let store = connect(config.connection.clone())
            .await
            .map_err(SeedError::Initialization)?;

        Self::from_config(&config).seed(store).await
    }
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Connector for [`ScenarioBuilder::run`] backed by Firestore.
pub async fn connect_firestore(
    mode: ConnectionMode,
) -> Result<Arc<dyn DocumentStore>, StoreError> {
    let client = FirestoreClient::connect(&mode).await?;
    Ok(Arc::new(client))
}
