//! Data models for raisen
//!
//! Rows as exported by the hosted backend. Absent or `null` columns take
//! their default value rather than rejecting the row.

pub mod ai_config;
pub mod client;
mod de;
pub mod platform;
pub mod post;
pub mod social_account;

pub use ai_config::{AiConfig, DEFAULT_PROVIDER};
pub use client::{Client, PlanTier};
pub use platform::Platform;
pub use post::{Post, PostStatus};
pub use social_account::SocialAccount;
