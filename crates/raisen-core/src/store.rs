//! Dashboard store with parking_lot::RwLock
//!
//! Holds the current [`Snapshot`] behind an `Arc` so readers clone the
//! pointer and compute without holding the lock. Every mutation swaps in a
//! new snapshot and publishes a [`DataEvent`].

use crate::analytics::{AnalyticsData, DashboardData};
use crate::config::AnalyticsConfig;
use crate::error::{AiConfigError, CoreError, DegradedState, LoadReport};
use crate::event::{DataEvent, EventBus};
use crate::models::{AiConfig, Client, Post, SocialAccount};
use crate::parsers::{Collection, SnapshotParser};
use crate::snapshot::Snapshot;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Central data store for raisen
pub struct DashboardStore {
    /// Snapshot directory
    data_dir: PathBuf,

    /// Tenant filter applied to every collection
    organization_id: Option<String>,

    snapshot: RwLock<Arc<Snapshot>>,

    /// Event bus for notifying subscribers
    event_bus: EventBus,

    /// Current degraded state
    degraded_state: RwLock<DegradedState>,
}

impl DashboardStore {
    pub fn new(data_dir: PathBuf, organization_id: Option<String>) -> Self {
        Self {
            data_dir,
            organization_id,
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
            event_bus: EventBus::default_capacity(),
            degraded_state: RwLock::new(DegradedState::Healthy),
        }
    }

    /// Store over an in-memory snapshot, no directory attached
    pub fn from_snapshot(snapshot: Snapshot, organization_id: Option<String>) -> Self {
        let store = Self::new(PathBuf::new(), organization_id);
        store.swap(|current| *current = snapshot);
        store
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the event bus for subscribing to updates
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Get current degraded state
    pub fn degraded_state(&self) -> DegradedState {
        self.degraded_state.read().clone()
    }

    /// Load every collection from the snapshot directory
    ///
    /// Never fails: problems are recorded in the returned report and the
    /// store keeps whatever could be read.
    pub async fn initial_load(&self) -> LoadReport {
        let mut report = LoadReport::new();

        info!(data_dir = %self.data_dir.display(), "Starting snapshot load");

        let loaded = SnapshotParser::new()
            .load_dir(&self.data_dir, &mut report)
            .await;
        self.swap(|current| *current = loaded);

        self.update_degraded_state(&report);
        self.event_bus.publish(DataEvent::LoadCompleted);

        info!(
            clients_loaded = report.clients_loaded,
            accounts_loaded = report.accounts_loaded,
            posts_loaded = report.posts_loaded,
            rows_loaded = report.rows_loaded,
            rows_skipped = report.rows_skipped,
            errors = report.errors.len(),
            "Snapshot load complete"
        );

        report
    }

    /// Update degraded state based on load report
    fn update_degraded_state(&self, report: &LoadReport) {
        let mut missing = Vec::new();

        if !report.clients_loaded {
            missing.push("clients".to_string());
        }
        if !report.accounts_loaded {
            missing.push("social_accounts".to_string());
        }
        if !report.posts_loaded {
            missing.push("posts".to_string());
        }
        if !report.ai_configs_loaded {
            missing.push("ai_configs".to_string());
        }
        if report.rows_skipped > 0 {
            missing.push(format!("{} rows", report.rows_skipped));
        }

        let mut state = self.degraded_state.write();
        *state = if missing.is_empty() {
            DegradedState::Healthy
        } else {
            DegradedState::PartialData {
                reason: format!("Missing: {}", missing.join(", ")),
                missing,
            }
        };
    }

    /// Apply `change` to a private copy and publish it, rescoped to the tenant
    fn swap(&self, change: impl FnOnce(&mut Snapshot)) {
        let mut guard = self.snapshot.write();
        let mut next = Snapshot::clone(&guard);
        change(&mut next);
        *guard = self.scoped(next);
    }

    fn scoped(&self, next: Snapshot) -> Arc<Snapshot> {
        match &self.organization_id {
            Some(org) => Arc::new(next.for_organization(org)),
            None => Arc::new(next),
        }
    }

    // ===================
    // Read accessors
    // ===================

    /// Current snapshot; cheap to clone and safe to hold across recomputes
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().clone()
    }

    pub fn dashboard(&self, activity_limit: usize) -> DashboardData {
        DashboardData::compute(&self.snapshot(), activity_limit)
    }

    pub fn analytics(&self, config: &AnalyticsConfig, end_date: NaiveDate) -> AnalyticsData {
        AnalyticsData::compute(&self.snapshot(), config, end_date)
    }

    pub fn ai_config(&self, client_id: &str) -> AiConfig {
        self.snapshot().ai_config_for(client_id)
    }

    // ===================
    // Mutations
    // ===================

    pub fn replace_clients(&self, clients: Vec<Client>) {
        debug!(count = clients.len(), "Replacing clients");
        self.swap(|s| s.clients = clients);
        self.event_bus.publish(DataEvent::ClientsUpdated);
    }

    pub fn replace_accounts(&self, accounts: Vec<SocialAccount>) {
        debug!(count = accounts.len(), "Replacing social accounts");
        self.swap(|s| s.accounts = accounts);
        self.event_bus.publish(DataEvent::AccountsUpdated);
    }

    pub fn replace_posts(&self, posts: Vec<Post>) {
        debug!(count = posts.len(), "Replacing posts");
        self.swap(|s| s.posts = posts);
        self.event_bus.publish(DataEvent::PostsUpdated);
    }

    /// Edit one client's AI configuration
    ///
    /// Read, edit, validation and store happen under the write lock, so
    /// concurrent edits of the same client apply one after the other. `edit`
    /// must not call back into the store. When it returns an error nothing
    /// is stored and no event is published.
    pub fn update_ai_config<F>(&self, client_id: &str, edit: F) -> Result<AiConfig, AiConfigError>
    where
        F: FnOnce(&mut AiConfig) -> Result<(), AiConfigError>,
    {
        let config = {
            let mut guard = self.snapshot.write();
            let mut config = guard.ai_config_for(client_id);
            edit(&mut config)?;
            config.validate()?;

            let mut next = Snapshot::clone(&guard);
            next.ai_configs.retain(|c| c.client_id != config.client_id);
            next.ai_configs.push(config.clone());
            *guard = self.scoped(next);
            config
        };

        debug!(client_id, providers = ?config.active_providers, "AI config updated");
        self.event_bus
            .publish(DataEvent::AiConfigUpdated(client_id.to_string()));

        Ok(config)
    }

    /// Write the current AI configurations back to the snapshot directory
    ///
    /// Rows already on disk for clients outside this store (other tenants,
    /// rows skipped at load) are kept; rows of known clients are replaced in
    /// place and new ones appended.
    pub async fn save_ai_configs(&self) -> Result<PathBuf, CoreError> {
        let path = self.data_dir.join(Collection::AiConfigs.file_name());
        let snapshot = self.snapshot();

        let mut rows: Vec<serde_json::Value> = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| CoreError::JsonParse {
                path: path.clone(),
                message: e.to_string(),
                source: e,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(CoreError::FileRead {
                    path: path.clone(),
                    source: e,
                })
            }
        };

        for config in &snapshot.ai_configs {
            let value = serde_json::to_value(config).map_err(|e| CoreError::JsonSerialize {
                what: "AI configs".to_string(),
                source: e,
            })?;
            let existing = rows.iter_mut().find(|row| {
                row.get("client_id").and_then(|id| id.as_str()) == Some(config.client_id.as_str())
            });
            match existing {
                Some(row) => *row = value,
                None => rows.push(value),
            }
        }

        let json = serde_json::to_string_pretty(&rows).map_err(|e| CoreError::JsonSerialize {
            what: "AI configs".to_string(),
            source: e,
        })?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| CoreError::FileWrite {
                path: path.clone(),
                source: e,
            })?;

        info!(
            path = %path.display(),
            updated = snapshot.ai_configs.len(),
            total = rows.len(),
            "AI configs saved"
        );
        Ok(path)
    }
}
