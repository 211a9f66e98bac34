//! Weekday × hour heatmaps
//!
//! Rows are weekdays (0 = Monday, 6 = Sunday), columns are hours (0-23).
//! Cell values are percentages in [0, 100] meant for density shading.

use chrono::{Datelike, TimeZone, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::simulated::Simulated;
use crate::models::Post;

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Raw per-cell weights before scaling
pub type HeatmapWeights = [[f64; 24]; 7];

/// 7×24 grid of values in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    pub cells: [[u8; 24]; 7],
}

impl Default for HeatmapGrid {
    fn default() -> Self {
        Self {
            cells: [[0; 24]; 7],
        }
    }
}

impl HeatmapGrid {
    /// Take weights that are already percentages, clamped to [0, 100]
    pub fn from_percentages(values: &HeatmapWeights) -> Self {
        let mut grid = Self::default();
        for (day, row) in values.iter().enumerate() {
            for (hour, &value) in row.iter().enumerate() {
                grid.cells[day][hour] = clamp_percent(value);
            }
        }
        grid
    }

    pub fn get(&self, weekday: usize, hour: usize) -> u8 {
        self.cells
            .get(weekday)
            .and_then(|row| row.get(hour))
            .copied()
            .unwrap_or(0)
    }

    pub fn max(&self) -> u8 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.max() == 0
    }

    /// (weekday, hour, value) of the hottest cell, earliest on ties
    pub fn peak(&self) -> Option<(usize, usize, u8)> {
        let mut best: Option<(usize, usize, u8)> = None;
        for (day, row) in self.cells.iter().enumerate() {
            for (hour, &value) in row.iter().enumerate() {
                if value > 0 && best.map_or(true, |(_, _, v)| value > v) {
                    best = Some((day, hour, value));
                }
            }
        }
        best
    }
}

fn clamp_percent(value: f64) -> u8 {
    if value.is_finite() {
        value.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

/// Shading bucket for a heatmap cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatLevel {
    None,
    Low,
    Medium,
    High,
    Peak,
}

impl HeatLevel {
    pub fn from_value(value: u8) -> Self {
        match value {
            80.. => HeatLevel::Peak,
            60..=79 => HeatLevel::High,
            40..=59 => HeatLevel::Medium,
            20..=39 => HeatLevel::Low,
            _ => HeatLevel::None,
        }
    }

    /// Single-character glyph for terminal rendering
    pub fn glyph(&self) -> char {
        match self {
            HeatLevel::None => '·',
            HeatLevel::Low => '░',
            HeatLevel::Medium => '▒',
            HeatLevel::High => '▓',
            HeatLevel::Peak => '█',
        }
    }
}

/// Scale raw weights so the largest maps to 100
///
/// Negative and non-finite weights count as 0. An all-zero input yields an
/// all-zero grid. Deterministic for a given input.
pub fn bucket_heatmap(weights: &HeatmapWeights) -> HeatmapGrid {
    let sanitize = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };

    let max = weights
        .iter()
        .flatten()
        .copied()
        .map(sanitize)
        .fold(0.0f64, f64::max);

    if max <= 0.0 {
        return HeatmapGrid::default();
    }

    let mut grid = HeatmapGrid::default();
    for (day, row) in weights.iter().enumerate() {
        for (hour, &weight) in row.iter().enumerate() {
            grid.cells[day][hour] = clamp_percent(sanitize(weight) / max * 100.0);
        }
    }
    grid
}

/// Measured heatmap: how many posts go out per weekday and hour
///
/// Uses each post's effective time (published, else scheduled, else created)
/// in the caller's timezone.
pub fn posting_heatmap<Tz: TimeZone>(posts: &[Post], tz: &Tz) -> HeatmapGrid {
    let mut weights: HeatmapWeights = [[0.0; 24]; 7];
    for post in posts {
        let local = post.effective_time().with_timezone(tz);
        let day = local.weekday().num_days_from_monday() as usize;
        let hour = local.hour() as usize;
        weights[day][hour] += 1.0;
    }
    bucket_heatmap(&weights)
}

/// First hour shown on the engagement heatmap
pub const ENGAGEMENT_FIRST_HOUR: usize = 6;

fn is_peak_hour(hour: usize) -> bool {
    matches!(hour, 9..=11 | 13..=14 | 19..=21)
}

/// Illustrative "best time to post" grid
///
/// Not measured. Hours 06-23 get a base of 60 at peak hours (9-11, 13-14,
/// 19-21) and 20 otherwise, plus up to 40 of seeded noise; weekends are
/// scaled by 0.7. Hours before 06 stay at 0.
pub fn simulated_engagement_heatmap(seed: u64) -> Simulated<HeatmapGrid> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut values: HeatmapWeights = [[0.0; 24]; 7];

    for (day, row) in values.iter_mut().enumerate() {
        let modifier = if day >= 5 { 0.7 } else { 1.0 };
        for (hour, cell) in row.iter_mut().enumerate().skip(ENGAGEMENT_FIRST_HOUR) {
            let base = if is_peak_hour(hour) { 60.0 } else { 20.0 };
            *cell = (base + rng.gen_range(0.0..40.0)) * modifier;
        }
    }

    Simulated::new(HeatmapGrid::from_percentages(&values), seed)
}
