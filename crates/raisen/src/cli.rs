//! Terminal rendering for raisen commands
//!
//! Every formatter returns a `String`; handlers in `main.rs` decide where it
//! goes. Simulated figures are always labelled with their seed.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use raisen_core::analytics::{
    ActivityItem, AnalyticsData, CalendarMonth, DashboardData, HeatLevel, HeatmapGrid,
    PlanCount, PlatformBreakdown, Simulated, StatusCounts, WEEKDAY_LABELS,
};
use raisen_core::models::{AiConfig, Client, Post, PostStatus, SocialAccount};
use raisen_core::Snapshot;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug)]
pub enum CliError {
    UnknownClient { id: String, known: usize },
    UnsupportedExport { target: String, format: String },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::UnknownClient { id, known } => {
                write!(f, "No client with id '{}' ({} clients loaded)", id, known)
            }
            CliError::UnsupportedExport { target, format } => {
                write!(f, "Cannot export {} as {}", target, format)
            }
        }
    }
}

impl std::error::Error for CliError {}

// ============================================================================
// Parsing
// ============================================================================

/// Parse "YYYY-MM" into (year, month)
pub fn parse_month(s: &str) -> Result<(i32, u32)> {
    let (year, month) = s
        .trim()
        .split_once('-')
        .context("Invalid month format (expected: YYYY-MM)")?;
    let year = year.parse::<i32>().context("Invalid year")?;
    let month = month.parse::<u32>().context("Invalid month")?;
    if !(1..=12).contains(&month) {
        bail!("Month must be between 01 and 12, got {:02}", month);
    }
    Ok((year, month))
}

// ============================================================================
// Formatters
// ============================================================================

fn header_row(names: &[&str], no_color: bool) -> Vec<Cell> {
    names
        .iter()
        .map(|name| {
            if no_color {
                Cell::new(name)
            } else {
                Cell::new(name).fg(Color::Cyan)
            }
        })
        .collect()
}

fn new_table(headers: &[&str], no_color: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header_row(headers, no_color));
    table
}

pub fn simulated_label<T>(value: &Simulated<T>) -> String {
    format!("simulated, seed {}", value.seed)
}

/// Summary cards plus post status tallies
pub fn format_summary(data: &DashboardData) -> String {
    let summary = &data.summary;
    let mut lines = vec![];
    lines.push("raisen - Dashboard".to_string());
    lines.push("==================".to_string());
    lines.push(String::new());
    lines.push(format!(
        "Active clients:     {}",
        summary.active_client_count
    ));
    lines.push(format!(
        "Total followers:    {}",
        format_number(summary.total_followers)
    ));
    lines.push(format!(
        "Connected accounts: {} / {}",
        summary.connected_account_count, summary.total_account_count
    ));
    lines.push(String::new());
    lines.push(format_status_counts(&data.post_status));
    lines.join("\n")
}

pub fn format_status_counts(counts: &StatusCounts) -> String {
    let parts: Vec<String> = PostStatus::ALL
        .iter()
        .map(|status| format!("{}: {}", status.label(), counts.get(*status)))
        .collect();
    format!("Posts ({}): {}", counts.total(), parts.join(", "))
}

pub fn format_platform_table(rows: &[PlatformBreakdown], no_color: bool) -> String {
    let mut table = new_table(&["Platform", "Accounts", "Followers", "Connected"], no_color);

    for row in rows {
        let name = format!("{} {}", row.platform.emoji(), row.platform.label());
        let cells = vec![
            Cell::new(name),
            Cell::new(row.count),
            Cell::new(format_number(row.followers)),
            Cell::new(format!("{}/{}", row.connected, row.count)),
        ];
        if no_color || row.has_data() {
            table.add_row(Row::from(cells));
        } else {
            table.add_row(Row::from(
                cells.into_iter().map(|c| c.fg(Color::DarkGrey)).collect::<Vec<_>>(),
            ));
        }
    }

    table.to_string()
}

pub fn format_activity_table(items: &[ActivityItem], no_color: bool) -> String {
    if items.is_empty() {
        return "No recent activity.".to_string();
    }

    let mut table = new_table(&["When", "Kind", "Title", "Details"], no_color);
    for item in items {
        table.add_row(Row::from(vec![
            item.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            item.kind.as_str().to_string(),
            truncate(&item.title, 40),
            truncate(&item.subtitle, 40),
        ]));
    }
    table.to_string()
}

/// Client list with the number of accounts each one owns
pub fn format_client_table(clients: &[&Client], snapshot: &Snapshot, no_color: bool) -> String {
    if clients.is_empty() {
        return "No clients found.".to_string();
    }

    let mut table = new_table(
        &["Name", "Company", "Email", "Plan", "Active", "Accounts"],
        no_color,
    );
    for client in clients {
        table.add_row(Row::from(vec![
            truncate(&client.name, 30),
            truncate(client.company_label(), 30),
            truncate(client.email.as_deref().unwrap_or_default(), 30),
            client.plan.label().to_string(),
            if client.active { "yes" } else { "no" }.to_string(),
            snapshot.accounts_for_client(&client.id).count().to_string(),
        ]));
    }
    table.to_string()
}

pub fn format_plan_counts(counts: &[PlanCount]) -> String {
    let total: usize = counts.iter().map(|c| c.count).sum();
    let parts: Vec<String> = counts
        .iter()
        .map(|c| format!("{}: {}", c.plan.label(), c.count))
        .collect();
    format!("Clients ({}): {}", total, parts.join(", "))
}

pub fn format_client_accounts(accounts: &[&SocialAccount], no_color: bool) -> String {
    if accounts.is_empty() {
        return "No social accounts.".to_string();
    }

    let mut table = new_table(&["Platform", "Account", "Followers", "Connected"], no_color);
    for account in accounts {
        table.add_row(Row::from(vec![
            format!("{} {}", account.platform.emoji(), account.platform.label()),
            truncate(&account.account_name, 30),
            format_number(account.followers_count),
            if account.connected { "yes" } else { "no" }.to_string(),
        ]));
    }
    table.to_string()
}

pub fn format_post_table(posts: &[&Post], no_color: bool) -> String {
    if posts.is_empty() {
        return "No posts found.".to_string();
    }

    let mut table = new_table(&["Date", "Status", "Platform", "Title"], no_color);
    for post in posts {
        let status = if no_color {
            Cell::new(post.status.label())
        } else {
            Cell::new(post.status.label()).fg(status_color(post.status))
        };
        table.add_row(Row::from(vec![
            Cell::new(post.placement_time().format("%Y-%m-%d %H:%M")),
            status,
            Cell::new(post.platform.label()),
            Cell::new(truncate(&post.title, 50)),
        ]));
    }
    table.to_string()
}

fn status_color(status: PostStatus) -> Color {
    match status {
        PostStatus::Draft => Color::Grey,
        PostStatus::Scheduled => Color::Blue,
        PostStatus::Published => Color::Green,
        PostStatus::Failed => Color::Red,
    }
}

/// Month grid, one column per weekday
pub fn format_calendar(month: &CalendarMonth, no_color: bool) -> String {
    let mut table = new_table(&WEEKDAY_LABELS, no_color);

    for week in &month.weeks {
        let cells: Vec<Cell> = week
            .iter()
            .map(|day| {
                let mut text = day.date.format("%d").to_string();
                for post in day.posts.iter().take(3) {
                    text.push('\n');
                    text.push_str(&truncate(&post.title, 14));
                }
                if day.posts.len() > 3 {
                    text.push_str(&format!("\n+{} more", day.posts.len() - 3));
                }
                if day.in_month || no_color {
                    Cell::new(text)
                } else {
                    Cell::new(text).fg(Color::DarkGrey)
                }
            })
            .collect();
        table.add_row(Row::from(cells));
    }

    format!(
        "{}\n{}\n{} posts this month",
        month_title(month.year, month.month),
        table,
        month.post_count()
    )
}

fn month_title(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", year, month))
}

/// Weekday rows, one glyph per hour
pub fn format_heatmap(grid: &HeatmapGrid) -> String {
    let mut lines = vec![];
    let hours: String = (0..24)
        .map(|h| if h % 6 == 0 { format!("{:<6}", h) } else { String::new() })
        .collect();
    lines.push(format!("     {}", hours.trim_end()));

    for (day, label) in WEEKDAY_LABELS.iter().enumerate() {
        let row: String = (0..24)
            .map(|hour| HeatLevel::from_value(grid.get(day, hour)).glyph())
            .collect();
        lines.push(format!("{:<4} {}", label, row));
    }

    match grid.peak() {
        Some((day, hour, value)) if value > 0 => lines.push(format!(
            "Peak: {} {:02}:00 ({}%)",
            WEEKDAY_LABELS[day], hour, value
        )),
        _ => lines.push("No activity".to_string()),
    }

    lines.join("\n")
}

pub fn format_analytics(data: &AnalyticsData, no_color: bool) -> String {
    let mut lines = vec![];
    lines.push(format!(
        "Total followers: {}",
        format_number(data.total_followers)
    ));

    if let (Some(first), Some(last)) = (data.growth.value.first(), data.growth.value.last()) {
        lines.push(format!(
            "Growth {} → {}: {} → {} ({})",
            first.date,
            last.date,
            format_number(first.followers),
            format_number(last.followers),
            simulated_label(&data.growth)
        ));
    }
    lines.push(format!(
        "Average engagement: {:.2}% ({})",
        data.average_engagement.value,
        simulated_label(&data.average_engagement)
    ));
    lines.push(String::new());

    lines.push(format!("Engagement by platform ({})", simulated_label(&data.engagement)));
    let mut engagement = new_table(&["Platform", "Likes", "Comments", "Shares"], no_color);
    for row in &data.engagement.value {
        engagement.add_row(Row::from(vec![
            row.platform.label().to_string(),
            format_number(row.likes),
            format_number(row.comments),
            format_number(row.shares),
        ]));
    }
    lines.push(engagement.to_string());
    lines.push(String::new());

    lines.push(format!("Top posts ({})", simulated_label(&data.top_posts)));
    if data.top_posts.value.is_empty() {
        lines.push("No posts yet.".to_string());
    } else {
        let mut top = new_table(
            &["Title", "Platform", "Likes", "Comments", "Shares", "Engagement"],
            no_color,
        );
        for post in &data.top_posts.value {
            top.add_row(Row::from(vec![
                truncate(&post.title, 40),
                post.platform.label().to_string(),
                post.likes.to_string(),
                post.comments.to_string(),
                post.shares.to_string(),
                format!("{:.1}%", post.engagement),
            ]));
        }
        lines.push(top.to_string());
    }

    lines.join("\n")
}

pub fn format_ai_config(client: &Client, config: &AiConfig) -> String {
    let mut lines = vec![];
    lines.push(format!("Client:     {} ({})", client.name, client.company_label()));
    lines.push(format!("Package:    {}", config.package.label()));
    lines.push(format!(
        "Providers:  {} [{}]",
        config.active_providers.join(", "),
        config.provider_usage_label()
    ));
    lines.push(format!(
        "Budget:     ${:.2} of ${:.2} used ({:.0}%)",
        config.budget_used,
        config.monthly_budget,
        config.budget_usage_ratio() * 100.0
    ));
    lines.push(format!("Remaining:  ${:.2}", config.budget_remaining()));
    lines.join("\n")
}

// ============================================================================
// Utilities
// ============================================================================

/// Format a count with K/M/B suffix for readability
pub fn format_number(n: i64) -> String {
    let abs = n.unsigned_abs() as f64;
    let sign = if n < 0 { "-" } else { "" };
    if abs >= 1_000_000_000.0 {
        format!("{}{:.2}B", sign, abs / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{}{:.2}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}{:.2}K", sign, abs / 1_000.0)
    } else {
        n.to_string()
    }
}

fn truncate(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        // Char-based so multi-byte characters never split
        s.chars().take(max.saturating_sub(1)).collect::<String>() + "…"
    }
}

// ============================================================================
// Tests
// ============================================================================
