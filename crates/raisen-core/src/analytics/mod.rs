//! Metrics aggregation for the dashboard
//!
//! Pure functions from entity collections to summary cards, per-platform
//! breakdowns, feeds, filtered client lists, leaderboards, heatmaps and
//! calendar grids. Nothing here performs I/O or keeps state: the same input
//! always gives the same output, so callers may drop a stale result and
//! recompute at will.
//!
//! Missing optional fields were already defaulted at deserialization, so no
//! function in this module returns an error except calendar construction for
//! an invalid month.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::config::AnalyticsConfig;
use crate::snapshot::Snapshot;

pub mod activity;
pub mod calendar;
pub mod clients;
pub mod content;
pub mod heatmap;
pub mod platforms;
pub mod ranking;
pub mod simulated;
pub mod summary;

#[cfg(test)]
mod tests;

pub use activity::{recent_activity, ActivityItem, ActivityKind, DEFAULT_ACTIVITY_LIMIT};
pub use calendar::{calendar_month, posts_on_day, CalendarDay, CalendarMonth};
pub use clients::{filter_clients, plan_counts, ClientFilter, PlanCount};
pub use content::{filter_by_status, status_counts, StatusCounts, StatusFilter};
pub use heatmap::{
    bucket_heatmap, posting_heatmap, simulated_engagement_heatmap, HeatLevel, HeatmapGrid,
    HeatmapWeights, WEEKDAY_LABELS,
};
pub use platforms::{breakdown_by_platform, PlatformBreakdown};
pub use ranking::{top_n, top_n_by_f64};
pub use simulated::{
    average_engagement_rate, engagement_by_platform, growth_series, simulate_post_performance,
    top_posts, GrowthPoint, PlatformEngagement, PostPerformance, Simulated, MAX_GROWTH_DAYS,
};
pub use summary::{summarize, DashboardSummary};

/// Everything the dashboard home page shows, all measured
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub summary: DashboardSummary,
    pub platforms: Vec<PlatformBreakdown>,
    pub recent_activity: Vec<ActivityItem>,
    pub post_status: StatusCounts,
    /// Timestamp of computation
    pub computed_at: DateTime<Utc>,
}

impl DashboardData {
    pub fn compute(snapshot: &Snapshot, activity_limit: usize) -> Self {
        Self {
            summary: summarize(&snapshot.clients, &snapshot.accounts),
            platforms: breakdown_by_platform(&snapshot.accounts),
            recent_activity: recent_activity(
                &snapshot.clients,
                &snapshot.accounts,
                activity_limit,
            ),
            post_status: status_counts(&snapshot.posts),
            computed_at: Utc::now(),
        }
    }
}

/// Analytics page: measured posting heatmap plus simulated series
///
/// Simulated fields are typed [`Simulated`] so they cannot be passed off as
/// measured values.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsData {
    pub total_followers: i64,
    pub posting_heatmap: HeatmapGrid,
    pub growth: Simulated<Vec<GrowthPoint>>,
    pub engagement: Simulated<Vec<PlatformEngagement>>,
    pub average_engagement: Simulated<f64>,
    pub engagement_heatmap: Simulated<HeatmapGrid>,
    pub top_posts: Simulated<Vec<PostPerformance>>,
    /// Timestamp of computation
    pub computed_at: DateTime<Utc>,
}

impl AnalyticsData {
    /// Compute the analytics page with the growth curve ending on `end_date`
    ///
    /// Each simulated series derives its own seed from `config.seed` so
    /// adding a series never shifts the others.
    pub fn compute(snapshot: &Snapshot, config: &AnalyticsConfig, end_date: NaiveDate) -> Self {
        let seed = config.seed;
        let tz = config.timezone();
        let summary = summarize(&snapshot.clients, &snapshot.accounts);
        let platforms = breakdown_by_platform(&snapshot.accounts);

        let engagement = engagement_by_platform(&platforms, seed.wrapping_add(1));
        let average_engagement = Simulated::new(
            average_engagement_rate(&engagement.value, summary.total_followers),
            engagement.seed,
        );
        let leaderboard = simulate_post_performance(&snapshot.posts, seed.wrapping_add(3))
            .map(|performance| top_posts(&performance, config.top_posts));

        tracing::debug!(
            posts = snapshot.posts.len(),
            accounts = snapshot.accounts.len(),
            seed,
            "Analytics computed"
        );

        Self {
            total_followers: summary.total_followers,
            posting_heatmap: posting_heatmap(&snapshot.posts, &tz),
            growth: growth_series(summary.total_followers, config.growth_days, end_date, seed),
            engagement,
            average_engagement,
            engagement_heatmap: simulated_engagement_heatmap(seed.wrapping_add(2)),
            top_posts: leaderboard,
            computed_at: Utc::now(),
        }
    }
}
