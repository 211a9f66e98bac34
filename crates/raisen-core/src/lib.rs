//! raisen-core - Core library for raisen
//!
//! Provides models, snapshot loading, the metrics aggregator and the
//! dashboard store for a social media agency dashboard.

pub mod analytics;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod models;
pub mod parsers;
pub mod snapshot;
pub mod store;

pub use config::Config;
pub use error::{AiConfigError, CoreError, DegradedState, LoadReport};
pub use event::{DataEvent, EventBus};
pub use export::{
    export_activity_to_csv, export_analytics_to_json, export_dashboard_to_csv,
    export_dashboard_to_json, export_dashboard_to_markdown,
};
pub use snapshot::Snapshot;
pub use store::DashboardStore;
