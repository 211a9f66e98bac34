//! Immutable set of entity collections read from the backend

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::{AiConfig, Client, Post, SocialAccount};

/// One consistent read of every collection the dashboard needs
///
/// May be stale or incomplete; consumers recompute when a newer one arrives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub accounts: Vec<SocialAccount>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub ai_configs: Vec<AiConfig>,
}

impl Snapshot {
    pub fn new(clients: Vec<Client>, accounts: Vec<SocialAccount>, posts: Vec<Post>) -> Self {
        Self {
            clients,
            accounts,
            posts,
            ai_configs: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
            && self.accounts.is_empty()
            && self.posts.is_empty()
            && self.ai_configs.is_empty()
    }

    /// Rows belonging to one tenant
    ///
    /// AI configs are kept when either their own organization matches or they
    /// belong to one of the tenant's clients (older rows lack the column).
    pub fn for_organization(&self, organization_id: &str) -> Snapshot {
        let clients: Vec<Client> = self
            .clients
            .iter()
            .filter(|c| c.organization_id == organization_id)
            .cloned()
            .collect();
        let client_ids: HashSet<&str> = clients.iter().map(|c| c.id.as_str()).collect();

        let ai_configs = self
            .ai_configs
            .iter()
            .filter(|cfg| {
                cfg.organization_id == organization_id
                    || client_ids.contains(cfg.client_id.as_str())
            })
            .cloned()
            .collect();

        Snapshot {
            accounts: self
                .accounts
                .iter()
                .filter(|a| a.organization_id == organization_id)
                .cloned()
                .collect(),
            posts: self
                .posts
                .iter()
                .filter(|p| p.organization_id == organization_id)
                .cloned()
                .collect(),
            ai_configs,
            clients,
        }
    }

    /// Accounts owned by one client
    pub fn accounts_for_client<'a>(
        &'a self,
        client_id: &'a str,
    ) -> impl Iterator<Item = &'a SocialAccount> + 'a {
        self.accounts.iter().filter(move |a| a.client_id == client_id)
    }

    /// AI configuration of a client, normalized; a fresh one when none is stored
    pub fn ai_config_for(&self, client_id: &str) -> AiConfig {
        match self.ai_configs.iter().find(|c| c.client_id == client_id) {
            Some(config) => config.clone().normalized(),
            None => {
                let organization_id = self
                    .clients
                    .iter()
                    .find(|c| c.id == client_id)
                    .map(|c| c.organization_id.clone())
                    .unwrap_or_default();
                AiConfig::for_client(client_id, organization_id)
            }
        }
    }
}
