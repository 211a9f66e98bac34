//! Content list tallies and status filtering

use serde::{Deserialize, Serialize};

use crate::models::{Post, PostStatus};

/// Number of posts in each status; the fields sum to the input length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub draft: usize,
    pub scheduled: usize,
    pub published: usize,
    pub failed: usize,
}

impl StatusCounts {
    pub fn get(&self, status: PostStatus) -> usize {
        match status {
            PostStatus::Draft => self.draft,
            PostStatus::Scheduled => self.scheduled,
            PostStatus::Published => self.published,
            PostStatus::Failed => self.failed,
        }
    }

    pub fn total(&self) -> usize {
        self.draft + self.scheduled + self.published + self.failed
    }
}

pub fn status_counts(posts: &[Post]) -> StatusCounts {
    posts.iter().fold(StatusCounts::default(), |mut counts, post| {
        match post.status {
            PostStatus::Draft => counts.draft += 1,
            PostStatus::Scheduled => counts.scheduled += 1,
            PostStatus::Published => counts.published += 1,
            PostStatus::Failed => counts.failed += 1,
        }
        counts
    })
}

/// Tab selection on the content list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(PostStatus),
}

impl StatusFilter {
    /// "all" or a status key; unknown keys fall back to drafts
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("all") {
            StatusFilter::All
        } else {
            StatusFilter::Only(PostStatus::parse(value))
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => post.status == *status,
        }
    }
}

/// Posts passing the filter, in input order
pub fn filter_by_status(posts: &[Post], filter: StatusFilter) -> Vec<&Post> {
    posts.iter().filter(|p| filter.matches(p)).collect()
}
