//! Export of dashboard views to CSV, JSON and Markdown
//!
//! Every exporter creates missing parent directories and overwrites the
//! destination file.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analytics::{ActivityItem, AnalyticsData, DashboardData};

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

/// Quote a CSV field, doubling embedded quotes
fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Escape pipes so a value stays inside its Markdown table cell
fn md_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

/// Export the per-platform breakdown to CSV
///
/// CSV columns: Platform, Accounts, Followers, Connected
/// One row per platform in canonical order, then a Total row.
///
/// # Examples
///
/// ```no_run
/// use raisen_core::analytics::DashboardData;
/// use raisen_core::export::export_dashboard_to_csv;
/// use raisen_core::Snapshot;
/// use std::path::Path;
///
/// let data = DashboardData::compute(&Snapshot::default(), 8);
/// export_dashboard_to_csv(&data, Path::new("dashboard.csv")).unwrap();
/// ```
pub fn export_dashboard_to_csv(data: &DashboardData, path: &Path) -> Result<()> {
    create_parent_dir(path)?;

    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "Platform,Accounts,Followers,Connected")
        .context("Failed to write CSV header")?;

    for row in &data.platforms {
        writeln!(
            writer,
            "{},{},{},{}",
            csv_field(row.platform.label()),
            row.count,
            row.followers,
            row.connected
        )
        .with_context(|| format!("Failed to write row for platform {}", row.platform))?;
    }

    writeln!(
        writer,
        "\"Total\",{},{},{}",
        data.summary.total_account_count,
        data.summary.total_followers,
        data.summary.connected_account_count
    )
    .context("Failed to write CSV total row")?;

    writer.flush().context("Failed to flush CSV writer")?;

    Ok(())
}

/// Export the full dashboard bundle to pretty JSON
pub fn export_dashboard_to_json(data: &DashboardData, path: &Path) -> Result<()> {
    create_parent_dir(path)?;

    let json =
        serde_json::to_string_pretty(data).context("Failed to serialize dashboard to JSON")?;

    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON file: {}", path.display()))?;

    Ok(())
}

/// Export the analytics bundle to pretty JSON
///
/// Simulated series serialize with their seed, so consumers can tell them
/// apart from measured values.
pub fn export_analytics_to_json(data: &AnalyticsData, path: &Path) -> Result<()> {
    create_parent_dir(path)?;

    let json =
        serde_json::to_string_pretty(data).context("Failed to serialize analytics to JSON")?;

    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON file: {}", path.display()))?;

    Ok(())
}

/// Export the dashboard to a Markdown report
///
/// Sections: summary cards, platform table, recent activity.
pub fn export_dashboard_to_markdown(data: &DashboardData, path: &Path) -> Result<()> {
    create_parent_dir(path)?;

    let file = File::create(path)
        .with_context(|| format!("Failed to create Markdown file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# Dashboard Report")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "**Generated**: {}",
        data.computed_at.format("%Y-%m-%d %H:%M UTC")
    )?;
    writeln!(writer)?;

    writeln!(writer, "## Summary")?;
    writeln!(writer)?;
    writeln!(writer, "| Metric | Value |")?;
    writeln!(writer, "|--------|-------|")?;
    writeln!(
        writer,
        "| Active Clients | {} |",
        data.summary.active_client_count
    )?;
    writeln!(
        writer,
        "| Total Followers | {} |",
        data.summary.total_followers
    )?;
    writeln!(
        writer,
        "| Connected Accounts | {} / {} |",
        data.summary.connected_account_count, data.summary.total_account_count
    )?;
    writeln!(writer, "| Posts | {} |", data.post_status.total())?;
    writeln!(writer)?;

    writeln!(writer, "## Platforms")?;
    writeln!(writer)?;
    writeln!(writer, "| Platform | Accounts | Followers | Connected |")?;
    writeln!(writer, "|----------|----------|-----------|-----------|")?;
    for row in &data.platforms {
        writeln!(
            writer,
            "| {} {} | {} | {} | {} |",
            row.platform.emoji(),
            md_cell(row.platform.label()),
            row.count,
            row.followers,
            row.connected
        )
        .with_context(|| format!("Failed to write row for platform {}", row.platform))?;
    }
    writeln!(writer)?;

    if !data.recent_activity.is_empty() {
        writeln!(writer, "## Recent Activity")?;
        writeln!(writer)?;
        for item in &data.recent_activity {
            writeln!(
                writer,
                "- {} **{}** {}",
                item.timestamp.format("%Y-%m-%d %H:%M"),
                item.title,
                item.subtitle
            )?;
        }
        writeln!(writer)?;
    }

    writer.flush().context("Failed to flush Markdown writer")?;

    Ok(())
}

/// Export the recent activity feed to CSV
///
/// CSV columns: Timestamp, Kind, Title, Subtitle (feed order, newest first)
pub fn export_activity_to_csv(items: &[ActivityItem], path: &Path) -> Result<()> {
    create_parent_dir(path)?;

    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "Timestamp,Kind,Title,Subtitle").context("Failed to write CSV header")?;

    for item in items {
        writeln!(
            writer,
            "{},{},{},{}",
            item.timestamp.to_rfc3339(),
            item.kind.as_str(),
            csv_field(&item.title),
            csv_field(&item.subtitle)
        )
        .with_context(|| format!("Failed to write row for {}", item.id))?;
    }

    writer.flush().context("Failed to flush CSV writer")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, Platform, SocialAccount};
    use crate::snapshot::Snapshot;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample() -> DashboardData {
        let created = Utc.with_ymd_and_hms(2026, 2, 3, 10, 0, 0).unwrap();
        let snapshot = Snapshot::new(
            vec![Client {
                id: "c1".into(),
                name: "Acme \"Bakery\"".into(),
                active: true,
                created_at: created,
                ..Default::default()
            }],
            vec![
                SocialAccount {
                    id: "a1".into(),
                    platform: Platform::Instagram,
                    account_name: "acme".into(),
                    followers_count: 100,
                    connected: true,
                    created_at: created,
                    ..Default::default()
                },
                SocialAccount {
                    id: "a2".into(),
                    platform: Platform::Twitter,
                    account_name: "acme_x".into(),
                    followers_count: 50,
                    created_at: created,
                    ..Default::default()
                },
            ],
            Vec::new(),
        );
        DashboardData::compute(&snapshot, 8)
    }

    #[test]
    fn test_dashboard_csv() {
        let temp_dir = TempDir::new().unwrap();
        let csv_path = temp_dir.path().join("dashboard.csv");

        export_dashboard_to_csv(&sample(), &csv_path).unwrap();

        let contents = std::fs::read_to_string(&csv_path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(lines.len(), 8); // Header + 6 platforms + total
        assert_eq!(lines[0], "Platform,Accounts,Followers,Connected");
        assert_eq!(lines[1], "\"Instagram\",1,100,1");
        assert_eq!(lines[4], "\"X / Twitter\",1,50,0");
        assert_eq!(lines[7], "\"Total\",2,150,1");
    }

    #[test]
    fn test_dashboard_json_round_trips_summary() {
        let temp_dir = TempDir::new().unwrap();
        let json_path = temp_dir.path().join("dashboard.json");

        export_dashboard_to_json(&sample(), &json_path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(value["summary"]["total_followers"], 150);
        assert_eq!(value["platforms"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_dashboard_markdown_sections() {
        let temp_dir = TempDir::new().unwrap();
        let md_path = temp_dir.path().join("dashboard.md");

        export_dashboard_to_markdown(&sample(), &md_path).unwrap();

        let contents = std::fs::read_to_string(&md_path).unwrap();
        assert!(contents.starts_with("# Dashboard Report"));
        assert!(contents.contains("| Total Followers | 150 |"));
        assert!(contents.contains("| Connected Accounts | 1 / 2 |"));
        assert!(contents.contains("## Recent Activity"));
    }

    #[test]
    fn test_activity_csv_escapes_quotes() {
        let data = sample();
        let temp_dir = TempDir::new().unwrap();
        let csv_path = temp_dir.path().join("activity.csv");

        export_activity_to_csv(&data.recent_activity, &csv_path).unwrap();

        let contents = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(contents.lines().count(), 4);
        assert!(contents.contains("\"Acme \"\"Bakery\"\"\""));
    }

    #[test]
    fn test_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("exports/nested/activity.csv");

        export_activity_to_csv(&[], &nested_path).unwrap();

        let contents = std::fs::read_to_string(&nested_path).unwrap();
        assert_eq!(contents, "Timestamp,Kind,Title,Subtitle\n");
    }
}
