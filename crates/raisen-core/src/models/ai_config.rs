//! Per-client AI provider configuration
//!
//! The package tier caps how many providers can be active at once. Budget
//! usage is informational: nothing here blocks spending past the budget.

use serde::{Deserialize, Serialize};

use super::de::null_as_default;
use super::PlanTier;
use crate::error::AiConfigError;

/// Provider every client starts with
pub const DEFAULT_PROVIDER: &str = "lovable";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub client_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub organization_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub package: PlanTier,

    #[serde(default, deserialize_with = "null_as_default")]
    pub active_providers: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub monthly_budget: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub budget_used: f64,
}

impl AiConfig {
    /// Fresh configuration for a client: basic package, default provider
    pub fn for_client(client_id: impl Into<String>, organization_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            organization_id: organization_id.into(),
            active_providers: vec![DEFAULT_PROVIDER.to_string()],
            ..Default::default()
        }
    }

    /// Fill in the default provider when a stored row has none
    pub fn normalized(mut self) -> Self {
        if self.active_providers.is_empty() {
            self.active_providers.push(DEFAULT_PROVIDER.to_string());
        }
        self
    }

    pub fn is_active(&self, slug: &str) -> bool {
        self.active_providers.iter().any(|p| p == slug)
    }

    /// Activate or deactivate a provider
    ///
    /// The last active provider cannot be removed, and activation fails once
    /// the package cap is reached.
    pub fn toggle_provider(&mut self, slug: &str) -> Result<(), AiConfigError> {
        if let Some(pos) = self.active_providers.iter().position(|p| p == slug) {
            if self.active_providers.len() <= 1 {
                return Err(AiConfigError::LastProvider);
            }
            self.active_providers.remove(pos);
            return Ok(());
        }

        if let Some(max) = self.package.max_providers() {
            if self.active_providers.len() >= max {
                return Err(AiConfigError::ProviderLimit {
                    tier: self.package,
                    max,
                });
            }
        }

        self.active_providers.push(slug.to_string());
        Ok(())
    }

    /// Switch package; moving to a smaller cap keeps the earliest providers
    pub fn set_package(&mut self, tier: PlanTier) {
        self.package = tier;
        if let Some(max) = tier.max_providers() {
            self.active_providers.truncate(max);
        }
    }

    pub fn validate(&self) -> Result<(), AiConfigError> {
        if self.active_providers.is_empty() {
            return Err(AiConfigError::LastProvider);
        }
        if let Some(max) = self.package.max_providers() {
            if self.active_providers.len() > max {
                return Err(AiConfigError::ProviderLimit {
                    tier: self.package,
                    max,
                });
            }
        }
        for (name, value) in [
            ("monthly_budget", self.monthly_budget),
            ("budget_used", self.budget_used),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AiConfigError::InvalidBudget {
                    message: format!("{} must be a non-negative amount, got {}", name, value),
                });
            }
        }
        Ok(())
    }

    /// Budget left this month; negative when overspent
    pub fn budget_remaining(&self) -> f64 {
        self.monthly_budget - self.budget_used
    }

    /// Fraction of the budget used, 0 when no budget is set
    pub fn budget_usage_ratio(&self) -> f64 {
        if self.monthly_budget > 0.0 {
            self.budget_used / self.monthly_budget
        } else {
            0.0
        }
    }

    /// "2/3" style counter, "∞" for unbounded packages
    pub fn provider_usage_label(&self) -> String {
        match self.package.max_providers() {
            Some(max) => format!("{}/{}", self.active_providers.len(), max),
            None => format!("{}/∞", self.active_providers.len()),
        }
    }
}
