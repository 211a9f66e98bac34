//! Social account model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de::null_as_default;
use super::Platform;

/// One client account on a social network
///
/// `followers_count` is signed: malformed negative counts from upstream are
/// carried as-is and summed arithmetically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialAccount {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub client_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub organization_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub platform: Platform,

    #[serde(default, deserialize_with = "null_as_default")]
    pub account_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub followers_count: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub connected: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: DateTime<Utc>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: DateTime<Utc>,
}

impl SocialAccount {
    pub fn connection_label(&self) -> &'static str {
        if self.connected {
            "Connected"
        } else {
            "Pending"
        }
    }
}
