//! Error types for raisen-core
//!
//! The aggregator itself never fails; these errors come from the layers
//! around it (snapshot loading, configuration, calendar input, AI rules).

use std::path::PathBuf;
use thiserror::Error;

use crate::models::PlanTier;

/// Core error type for raisen operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    // ===================
    // Parse Errors
    // ===================
    #[error("Failed to parse JSON in {path}: {message}")]
    JsonParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize {what} to JSON")]
    JsonSerialize {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a JSON array of rows in {path}")]
    NotAnArray { path: PathBuf },

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ===================
    // Input Errors
    // ===================
    #[error("Invalid date: {message}")]
    InvalidDate { message: String },
}

/// Violations of the per-client AI configuration rules
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AiConfigError {
    #[error("At least one AI provider must stay active")]
    LastProvider,

    #[error("The {tier} package allows at most {max} active provider(s)")]
    ProviderLimit { tier: PlanTier, max: usize },

    #[error("Invalid budget: {message}")]
    InvalidBudget { message: String },
}

/// Severity level for errors during load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Non-critical, can continue with degraded functionality
    Warning,
    /// Significant but not fatal
    Error,
    /// Cannot continue
    Fatal,
}

/// Individual error entry in load report
#[derive(Debug, Clone)]
pub struct LoadError {
    pub source: String,
    pub message: String,
    pub severity: ErrorSeverity,
    /// Actionable suggestion for user (optional)
    pub suggestion: Option<String>,
}

impl LoadError {
    pub fn warning(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Warning,
            suggestion: None,
        }
    }

    /// Create user-friendly error from CoreError with context-aware suggestions
    ///
    /// A missing snapshot directory is fatal: no collection can be read.
    pub fn from_core_error(source: impl Into<String>, error: &CoreError) -> Self {
        let source = source.into();
        let severity = match error {
            CoreError::DirectoryNotFound { .. } => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Error,
        };
        let (message, suggestion) = match error {
            CoreError::FileRead { path, .. } => (
                format!("Cannot read file: {}", path.display()),
                Some(format!("Check permissions: chmod +r {}", path.display())),
            ),
            CoreError::DirectoryNotFound { path } => (
                format!("Snapshot directory not found: {}", path.display()),
                Some("Pass --data-dir or set RAISEN_DATA_DIR".to_string()),
            ),
            CoreError::JsonParse { path, message, .. } => (
                format!("Invalid JSON in {}: {}", path.display(), message),
                Some("Validate JSON syntax with: jq . <file>".to_string()),
            ),
            CoreError::NotAnArray { path } => (
                error.to_string(),
                Some(format!(
                    "Re-export {} as a JSON array of table rows",
                    path.display()
                )),
            ),
            _ => (error.to_string(), None),
        };

        Self {
            source,
            message,
            severity,
            suggestion,
        }
    }
}

/// Report of errors encountered during snapshot loading
///
/// Tracks partial failures instead of failing on the first bad file or row.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub errors: Vec<LoadError>,
    pub clients_loaded: bool,
    pub accounts_loaded: bool,
    pub posts_loaded: bool,
    pub ai_configs_loaded: bool,
    pub rows_loaded: usize,
    pub rows_skipped: usize,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: LoadError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.errors.push(LoadError::warning(source, message));
    }

    /// Returns true if there are any fatal errors
    pub fn has_fatal_errors(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.severity == ErrorSeverity::Fatal)
    }

    /// Returns true if there are any errors (including warnings)
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns count by severity
    pub fn error_count(&self) -> (usize, usize, usize) {
        let count = |severity| self.errors.iter().filter(|e| e.severity == severity).count();
        (
            count(ErrorSeverity::Warning),
            count(ErrorSeverity::Error),
            count(ErrorSeverity::Fatal),
        )
    }
}

/// Degraded state indicator for the dashboard store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradedState {
    /// Everything loaded successfully
    Healthy,
    /// Some collections missing or rows skipped, still usable
    PartialData {
        missing: Vec<String>,
        reason: String,
    },
}

impl DegradedState {
    pub fn is_healthy(&self) -> bool {
        matches!(self, DegradedState::Healthy)
    }

    pub fn is_degraded(&self) -> bool {
        !self.is_healthy()
    }
}
