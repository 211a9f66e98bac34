//! Snapshot directory parser
//!
//! Each collection is a JSON array of table rows in its own file. A row that
//! fails to deserialize is skipped; the rest of the file still loads.

use crate::error::{CoreError, LoadError, LoadReport};
use crate::models::{AiConfig, Client, Post, SocialAccount};
use crate::snapshot::Snapshot;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// One file of the snapshot directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Clients,
    Accounts,
    Posts,
    AiConfigs,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Clients,
        Collection::Accounts,
        Collection::Posts,
        Collection::AiConfigs,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Clients => "clients.json",
            Collection::Accounts => "social_accounts.json",
            Collection::Posts => "posts.json",
            Collection::AiConfigs => "ai_configs.json",
        }
    }

    /// Source name used in load reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Clients => "clients",
            Collection::Accounts => "social_accounts",
            Collection::Posts => "posts",
            Collection::AiConfigs => "ai_configs",
        }
    }
}

/// Rows of one file that survived deserialization
#[derive(Debug)]
pub struct ParsedRows<T> {
    pub rows: Vec<T>,
    /// (row index, reason) for every skipped row
    pub skipped: Vec<(usize, String)>,
}

/// Parser for a snapshot directory
pub struct SnapshotParser {
    /// Maximum retry attempts
    max_retries: u32,
    /// Delay between retries
    retry_delay: Duration,
}

impl Default for SnapshotParser {
    fn default() -> Self {
        Self {
            max_retries: 2,
            retry_delay: Duration::from_millis(100),
        }
    }
}

impl SnapshotParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retries(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    /// Parse one collection file with retry logic
    ///
    /// Retries on malformed JSON as the exporter may still be writing the
    /// file. Missing files are not retried.
    pub async fn parse_rows<T: DeserializeOwned>(
        &self,
        path: &Path,
    ) -> Result<ParsedRows<T>, CoreError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                debug!(attempt, path = %path.display(), "Retrying snapshot parse after delay");
                sleep(self.retry_delay).await;
            }

            match self.try_parse(path).await {
                Ok(rows) => return Ok(rows),
                Err(e @ CoreError::FileNotFound { .. }) => return Err(e),
                Err(e) => {
                    warn!(attempt, error = %e, "Snapshot parse attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CoreError::FileNotFound {
            path: path.to_path_buf(),
        }))
    }

    /// Single parse attempt
    async fn try_parse<T: DeserializeOwned>(&self, path: &Path) -> Result<ParsedRows<T>, CoreError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CoreError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CoreError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| CoreError::JsonParse {
                path: path.to_path_buf(),
                message: e.to_string(),
                source: e,
            })?;

        let serde_json::Value::Array(items) = value else {
            return Err(CoreError::NotAnArray {
                path: path.to_path_buf(),
            });
        };

        let mut parsed = ParsedRows {
            rows: Vec::with_capacity(items.len()),
            skipped: Vec::new(),
        };
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<T>(item) {
                Ok(row) => parsed.rows.push(row),
                Err(e) => parsed.skipped.push((index, e.to_string())),
            }
        }

        Ok(parsed)
    }

    /// Parse one collection with graceful degradation, recording errors in LoadReport
    ///
    /// Always yields a collection: empty when the file is missing or unusable.
    pub async fn parse_graceful<T: DeserializeOwned>(
        &self,
        dir: &Path,
        collection: Collection,
        report: &mut LoadReport,
    ) -> Vec<T> {
        let path = dir.join(collection.file_name());
        match self.parse_rows::<T>(&path).await {
            Ok(parsed) => {
                for (index, reason) in &parsed.skipped {
                    warn!(collection = collection.as_str(), index, reason = %reason, "Skipping invalid row");
                    report.add_warning(
                        collection.as_str(),
                        format!("Row {} skipped: {}", index, reason),
                    );
                }
                report.rows_loaded += parsed.rows.len();
                report.rows_skipped += parsed.skipped.len();
                match collection {
                    Collection::Clients => report.clients_loaded = true,
                    Collection::Accounts => report.accounts_loaded = true,
                    Collection::Posts => report.posts_loaded = true,
                    Collection::AiConfigs => report.ai_configs_loaded = true,
                }
                debug!(
                    collection = collection.as_str(),
                    rows = parsed.rows.len(),
                    skipped = parsed.skipped.len(),
                    "Collection loaded"
                );
                parsed.rows
            }
            Err(CoreError::FileNotFound { .. }) => {
                report.add_warning(
                    collection.as_str(),
                    format!("File not found: {}", path.display()),
                );
                Vec::new()
            }
            Err(e) => {
                report.add_error(LoadError::from_core_error(collection.as_str(), &e));
                Vec::new()
            }
        }
    }

    /// Load every collection of a snapshot directory
    pub async fn load_dir(&self, dir: &Path, report: &mut LoadReport) -> Snapshot {
        if !dir.is_dir() {
            report.add_error(LoadError::from_core_error(
                "snapshot",
                &CoreError::DirectoryNotFound {
                    path: dir.to_path_buf(),
                },
            ));
            return Snapshot::default();
        }

        let clients: Vec<Client> = self.parse_graceful(dir, Collection::Clients, report).await;
        let accounts: Vec<SocialAccount> =
            self.parse_graceful(dir, Collection::Accounts, report).await;
        let posts: Vec<Post> = self.parse_graceful(dir, Collection::Posts, report).await;
        let ai_configs: Vec<AiConfig> =
            self.parse_graceful(dir, Collection::AiConfigs, report).await;

        Snapshot {
            clients,
            accounts,
            posts,
            ai_configs: ai_configs.into_iter().map(AiConfig::normalized).collect(),
        }
    }
}
