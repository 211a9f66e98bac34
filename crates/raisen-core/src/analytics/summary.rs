//! Headline counters for the dashboard cards

use serde::{Deserialize, Serialize};

use crate::models::{Client, SocialAccount};

/// Summary card values
///
/// Counts are never negative. `total_followers` is a plain sum, so negative
/// follower counts from malformed rows lower it instead of being rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub active_client_count: usize,
    pub total_followers: i64,
    pub connected_account_count: usize,
    pub total_account_count: usize,
}

/// Compute the summary cards from clients and accounts
///
/// Followers are summed across every account regardless of client or
/// platform. Empty inputs give an all-zero summary.
pub fn summarize(clients: &[Client], accounts: &[SocialAccount]) -> DashboardSummary {
    DashboardSummary {
        active_client_count: clients.iter().filter(|c| c.active).count(),
        total_followers: accounts
            .iter()
            .fold(0i64, |sum, a| sum.saturating_add(a.followers_count)),
        connected_account_count: accounts.iter().filter(|a| a.connected).count(),
        total_account_count: accounts.len(),
    }
}
