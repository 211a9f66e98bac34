//! Client list search and plan filter

use serde::Serialize;

use crate::models::{Client, PlanTier};

/// Search box and plan selector of the client list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    /// Case-insensitive substring of name, company or email
    pub search: Option<String>,
    pub plan: Option<PlanTier>,
}

impl ClientFilter {
    pub fn matches(&self, client: &Client) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                [
                    Some(client.name.as_str()),
                    client.company.as_deref(),
                    client.email.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
            }
        };

        search_ok && self.plan.map_or(true, |plan| client.plan == plan)
    }
}

/// Clients passing the filter, in input order
pub fn filter_clients<'a>(clients: &'a [Client], filter: &ClientFilter) -> Vec<&'a Client> {
    clients.iter().filter(|c| filter.matches(c)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanCount {
    pub plan: PlanTier,
    pub count: usize,
}

/// Clients per plan, one entry per tier in tier order
pub fn plan_counts<'a>(clients: impl IntoIterator<Item = &'a Client>) -> Vec<PlanCount> {
    let mut counts: Vec<PlanCount> = PlanTier::ALL
        .iter()
        .map(|&plan| PlanCount { plan, count: 0 })
        .collect();
    for client in clients {
        if let Some(entry) = counts.iter_mut().find(|c| c.plan == client.plan) {
            entry.count += 1;
        }
    }
    counts
}
