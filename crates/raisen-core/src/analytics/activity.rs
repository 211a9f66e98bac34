//! Recent activity feed merged from clients and accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Client, SocialAccount};

/// Feed length used by the dashboard
pub const DEFAULT_ACTIVITY_LIMIT: usize = 8;

/// Source collection of a feed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Client,
    Account,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Client => "client",
            ActivityKind::Account => "account",
        }
    }
}

/// One line of the activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: String,
    pub kind: ActivityKind,
    pub title: String,
    pub subtitle: String,
    pub timestamp: DateTime<Utc>,
}

impl ActivityItem {
    fn from_client(client: &Client) -> Self {
        Self {
            id: client.id.clone(),
            kind: ActivityKind::Client,
            title: client.name.clone(),
            subtitle: client.company_label().to_string(),
            timestamp: client.created_at,
        }
    }

    fn from_account(account: &SocialAccount) -> Self {
        Self {
            id: account.id.clone(),
            kind: ActivityKind::Account,
            title: format!("{} {}", account.platform.emoji(), account.account_name),
            subtitle: format!(
                "{} • {}",
                account.platform.label(),
                account.connection_label()
            ),
            timestamp: account.created_at,
        }
    }
}

/// Newest clients and accounts, most recent first
///
/// Ties on `created_at` keep input order with clients ahead of accounts.
pub fn recent_activity(
    clients: &[Client],
    accounts: &[SocialAccount],
    limit: usize,
) -> Vec<ActivityItem> {
    let mut items: Vec<ActivityItem> = clients
        .iter()
        .map(ActivityItem::from_client)
        .chain(accounts.iter().map(ActivityItem::from_account))
        .collect();

    // sort_by is stable
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    items.truncate(limit);
    items
}
