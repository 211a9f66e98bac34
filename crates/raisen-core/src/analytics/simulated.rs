//! Placeholder analytics series
//!
//! The backend stores no engagement metrics yet, so growth curves and
//! per-post performance are generated. Everything produced here comes back
//! wrapped in [`Simulated`] and is reproducible from its seed, so it can never
//! be mistaken for measured data.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::platforms::PlatformBreakdown;
use super::ranking::top_n_by_f64;
use crate::models::{Platform, Post};

/// A generated value together with the seed that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulated<T> {
    pub value: T,
    pub seed: u64,
}

impl<T> Simulated<T> {
    pub fn new(value: T, seed: u64) -> Self {
        Self { value, seed }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Simulated<U> {
        Simulated {
            value: f(self.value),
            seed: self.seed,
        }
    }

    /// Always `true`; lets renderers branch on provenance generically
    pub fn is_simulated(&self) -> bool {
        true
    }
}

/// One point of the follower growth curve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub date: NaiveDate,
    pub followers: i64,
}

/// Longest growth history generated, about ten years
pub const MAX_GROWTH_DAYS: u32 = 3_650;

/// Follower curve ending at today's real total
///
/// `days + 1` points from `end_date - days` to `end_date`, with `days` capped
/// at [`MAX_GROWTH_DAYS`]. Dates before the start of the calendar are
/// dropped. Starts at `max(0.85 × total, 10)`, climbs linearly to `total` and
/// adds up to 2 % of `total` as noise.
pub fn growth_series(
    total_followers: i64,
    days: u32,
    end_date: NaiveDate,
    seed: u64,
) -> Simulated<Vec<GrowthPoint>> {
    let days = days.min(MAX_GROWTH_DAYS);
    let mut rng = StdRng::seed_from_u64(seed);
    let total = total_followers as f64;
    let base = (total * 0.85).max(10.0);
    let noise_span = (total * 0.02).max(0.0);
    let span = days.max(1) as f64;

    let points = (0..=days)
        .rev()
        .filter_map(|days_back| {
            let date = end_date.checked_sub_signed(Duration::days(i64::from(days_back)))?;
            let elapsed = (days - days_back) as f64;
            let noise = if noise_span > 0.0 {
                rng.gen_range(0.0..noise_span)
            } else {
                0.0
            };
            let followers = base + (total - base) * elapsed / span + noise;
            Some(GrowthPoint {
                date,
                followers: followers.round() as i64,
            })
        })
        .collect();

    Simulated::new(points, seed)
}

/// Interactions per platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEngagement {
    pub platform: Platform,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
}

impl PlatformEngagement {
    pub fn interactions(&self) -> i64 {
        self.likes + self.comments + self.shares
    }
}

/// Engagement for every platform that has followers
///
/// Likes are 2-7 %, comments 0.5-1.5 % and shares 0.2-1 % of followers.
pub fn engagement_by_platform(
    breakdown: &[PlatformBreakdown],
    seed: u64,
) -> Simulated<Vec<PlatformEngagement>> {
    let mut rng = StdRng::seed_from_u64(seed);

    let rows = breakdown
        .iter()
        .filter(|row| row.followers > 0)
        .map(|row| {
            let followers = row.followers as f64;
            PlatformEngagement {
                platform: row.platform.clone(),
                likes: (followers * (0.02 + rng.gen_range(0.0..0.05))).round() as i64,
                comments: (followers * (0.005 + rng.gen_range(0.0..0.01))).round() as i64,
                shares: (followers * (0.002 + rng.gen_range(0.0..0.008))).round() as i64,
            }
        })
        .collect();

    Simulated::new(rows, seed)
}

/// Mean interactions per platform as a percentage of total followers
///
/// Rounded to two decimals; 0 when there is no engagement data.
pub fn average_engagement_rate(engagement: &[PlatformEngagement], total_followers: i64) -> f64 {
    if engagement.is_empty() {
        return 0.0;
    }
    let interactions: i64 = engagement.iter().map(PlatformEngagement::interactions).sum();
    let mean = interactions as f64 / engagement.len() as f64;
    let rate = mean / total_followers.max(1) as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

/// Generated performance numbers for one post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPerformance {
    pub post_id: String,
    pub title: String,
    pub platform: Platform,
    pub likes: u32,
    pub comments: u32,
    pub shares: u32,
    /// Engagement rate in percent, one decimal
    pub engagement: f64,
}

/// Performance numbers for each post, in input order
pub fn simulate_post_performance(posts: &[Post], seed: u64) -> Simulated<Vec<PostPerformance>> {
    let mut rng = StdRng::seed_from_u64(seed);

    let rows = posts
        .iter()
        .map(|post| PostPerformance {
            post_id: post.id.clone(),
            title: post.title.clone(),
            platform: post.platform.clone(),
            likes: rng.gen_range(500..=5000),
            comments: rng.gen_range(20..=320),
            shares: rng.gen_range(10..=210),
            engagement: (rng.gen_range(2.0..10.0f64) * 10.0).round() / 10.0,
        })
        .collect();

    Simulated::new(rows, seed)
}

/// Leaderboard of the best performing posts by engagement rate
pub fn top_posts(performance: &[PostPerformance], n: usize) -> Vec<PostPerformance> {
    top_n_by_f64(performance, n, |p| p.engagement)
        .into_iter()
        .cloned()
        .collect()
}
