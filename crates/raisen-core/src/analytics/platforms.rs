//! Per-platform breakdown of social accounts

use serde::{Deserialize, Serialize};

use crate::models::{Platform, SocialAccount};

/// Aggregates for one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformBreakdown {
    pub platform: Platform,
    /// Number of accounts on the platform
    pub count: usize,
    /// Summed follower count
    pub followers: i64,
    /// Accounts currently connected
    pub connected: usize,
}

impl PlatformBreakdown {
    fn empty(platform: Platform) -> Self {
        Self {
            platform,
            count: 0,
            followers: 0,
            connected: 0,
        }
    }

    /// Rows with no accounts render as "no data" rather than being dropped
    pub fn has_data(&self) -> bool {
        self.count > 0
    }
}

/// Break accounts down by platform
///
/// Always returns one row per entry of [`Platform::ALL`], in that order,
/// including zero rows. Accounts on unknown platforms belong to no row, so the
/// rows' follower sum matches `summarize` only when every platform is known.
pub fn breakdown_by_platform(accounts: &[SocialAccount]) -> Vec<PlatformBreakdown> {
    let mut rows: Vec<PlatformBreakdown> = Platform::ALL
        .iter()
        .cloned()
        .map(PlatformBreakdown::empty)
        .collect();

    for account in accounts {
        let Some(idx) = account.platform.index() else {
            tracing::debug!(
                account_id = %account.id,
                platform = %account.platform,
                "Account on unknown platform left out of breakdown"
            );
            continue;
        };

        let row = &mut rows[idx];
        row.count += 1;
        row.followers = row.followers.saturating_add(account.followers_count);
        if account.connected {
            row.connected += 1;
        }
    }

    rows
}
