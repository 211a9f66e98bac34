//! Content calendar placement
//!
//! Posts sit on the local date of their schedule, or of their creation when
//! unscheduled. Months are laid out in whole Monday-first weeks.

use chrono::{Datelike, Duration, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::Post;

/// One cell of the month grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for leading/trailing days borrowed from adjacent months
    pub in_month: bool,
    pub posts: Vec<Post>,
}

/// Month view: rows of seven days, Monday first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<[CalendarDay; 7]>,
}

impl CalendarMonth {
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flatten()
    }

    /// Posts placed inside the month itself
    pub fn post_count(&self) -> usize {
        self.days()
            .filter(|d| d.in_month)
            .map(|d| d.posts.len())
            .sum()
    }
}

fn local_date<Tz: TimeZone>(post: &Post, tz: &Tz) -> NaiveDate {
    post.placement_time().with_timezone(tz).date_naive()
}

/// Posts placed on `date`, ordered by placement time
pub fn posts_on_day<'a, Tz: TimeZone>(posts: &'a [Post], date: NaiveDate, tz: &Tz) -> Vec<&'a Post> {
    let mut day: Vec<&Post> = posts.iter().filter(|p| local_date(p, tz) == date).collect();
    day.sort_by_key(|p| p.placement_time());
    day
}

/// Build the month grid for `year`/`month` (1-12)
pub fn calendar_month<Tz: TimeZone>(
    posts: &[Post],
    year: i32,
    month: u32,
    tz: &Tz,
) -> Result<CalendarMonth, CoreError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| CoreError::InvalidDate {
        message: format!("{}-{:02} is not a valid month", year, month),
    })?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| CoreError::InvalidDate {
        message: format!("{}-{:02} is out of range", year, month),
    })?;
    let last = next_month - Duration::days(1);

    let grid_start = first - Duration::days(i64::from(first.weekday().num_days_from_monday()));
    let grid_end = last + Duration::days(i64::from(6 - last.weekday().num_days_from_monday()));

    let mut placed: Vec<(NaiveDate, &Post)> = posts
        .iter()
        .map(|p| (local_date(p, tz), p))
        .filter(|(date, _)| *date >= grid_start && *date <= grid_end)
        .collect();
    placed.sort_by_key(|(_, p)| p.placement_time());

    let mut weeks = Vec::new();
    let mut week_start = grid_start;
    while week_start <= grid_end {
        let week: [CalendarDay; 7] = std::array::from_fn(|offset| {
            let date = week_start + Duration::days(offset as i64);
            CalendarDay {
                date,
                in_month: date.month() == month && date.year() == year,
                posts: placed
                    .iter()
                    .filter(|(d, _)| *d == date)
                    .map(|(_, p)| (*p).clone())
                    .collect(),
            }
        });
        weeks.push(week);
        week_start = week_start + Duration::days(7);
    }

    Ok(CalendarMonth { year, month, weeks })
}
