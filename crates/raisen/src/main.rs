//! raisen - Social media agency dashboard in the terminal

mod cli;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use raisen_core::analytics::{
    calendar_month, filter_by_status, filter_clients, plan_counts, posting_heatmap,
    simulated_engagement_heatmap, ClientFilter, StatusFilter,
};
use raisen_core::config::Config;
use raisen_core::models::{AiConfig, Client, PlanTier, SocialAccount};
use raisen_core::error::ErrorSeverity;
use raisen_core::{export, DashboardStore, LoadReport};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "raisen",
    version,
    about = "Social media agency dashboard in the terminal",
    long_about = "Reads a snapshot of clients, social accounts, posts and AI settings\n\
                  exported from the backend and prints dashboard views.\n\
                  \n\
                  Examples:\n\
                    raisen                           # Summary cards (default)\n\
                    raisen platforms                 # Per-platform breakdown\n\
                    raisen activity --limit 20       # Recent activity feed\n\
                    raisen clients --search acme     # Client list\n\
                    raisen calendar --month 2026-03  # Content calendar\n\
                    raisen heatmap --simulated       # Engagement heatmap\n\
                    raisen export --format md -o report.md\n\
                  \n\
                  Figures marked \"simulated\" come from a seeded generator, not from\n\
                  measured engagement.\n\
                  \n\
                  Environment Variables:\n\
                    RAISEN_DATA_DIR                  # Snapshot directory\n\
                    RAISEN_CONFIG                    # Config file path\n\
                    RAISEN_ORG                       # Organization filter\n\
                    RAISEN_NO_COLOR                  # Disable ANSI colors\n\
                    RUST_LOG                         # Log filter (overrides config)"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Snapshot directory (default: from config, else the user data dir)
    #[arg(long, global = true, env = "RAISEN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/raisen/config.toml)
    #[arg(long, global = true, env = "RAISEN_CONFIG")]
    config: Option<PathBuf>,

    /// Only show rows of this organization
    #[arg(long, global = true, env = "RAISEN_ORG")]
    org: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, global = true, env = "RAISEN_NO_COLOR")]
    no_color: bool,
}

#[derive(Subcommand)]
enum Mode {
    /// Summary cards (default)
    Summary,
    /// Accounts, followers and connections per platform
    Platforms,
    /// Newest clients and accounts
    Activity {
        /// Max items (default: from config)
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
    /// Client list with search and plan filter
    Clients {
        /// Substring of name, company or email (case-insensitive)
        #[arg(long, short = 's')]
        search: Option<String>,
        /// Only clients on this plan
        #[arg(long, value_parser = ["basic", "pro", "enterprise"])]
        plan: Option<String>,
    },
    /// Content list filtered by status
    Posts {
        /// Status tab to show
        #[arg(
            long,
            short = 's',
            default_value = "all",
            value_parser = ["all", "draft", "scheduled", "published", "failed"]
        )]
        status: String,
    },
    /// Month grid of scheduled and draft posts
    Calendar {
        /// Month as YYYY-MM (default: current month)
        #[arg(long, short = 'm')]
        month: Option<String>,
    },
    /// Weekday × hour heatmap of post placement
    Heatmap {
        /// Show the simulated engagement heatmap instead
        #[arg(long)]
        simulated: bool,
    },
    /// Growth, engagement and top posts
    Analytics,
    /// Show a client's accounts and AI configuration, optionally editing it
    AiConfig {
        /// Client ID
        client_id: String,
        /// Activate or deactivate a provider
        #[arg(long)]
        toggle: Option<String>,
        /// Switch package
        #[arg(long, value_parser = ["basic", "pro", "enterprise"])]
        package: Option<String>,
    },
    /// Write a report file
    Export {
        /// Output format
        #[arg(long, short = 'f', value_parser = ["csv", "json", "md"])]
        format: String,
        /// Destination file
        #[arg(long, short = 'o')]
        output: PathBuf,
        /// What to export
        #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "activity", "analytics"])]
        target: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };

    init_logging(&config.logging.level, cli.no_color);

    let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.data_dir());
    let org = cli
        .org
        .clone()
        .or_else(|| config.dashboard.organization_id.clone());

    let store = DashboardStore::new(data_dir, org);
    let report = store.initial_load().await;

    if report.has_fatal_errors() {
        print_load_errors(&report);
        anyhow::bail!("No snapshot loaded from {}", store.data_dir().display());
    }
    if !cli.json && report.has_errors() {
        print_load_errors(&report);
        let (warnings, errors, _) = report.error_count();
        eprintln!("{} warning(s), {} error(s) while loading\n", warnings, errors);
    }

    let out = Output {
        json: cli.json,
        no_color: cli.no_color,
    };

    match cli.mode.unwrap_or(Mode::Summary) {
        Mode::Summary => run_summary(&store, &config, out),
        Mode::Platforms => run_platforms(&store, &config, out),
        Mode::Activity { limit } => {
            run_activity(&store, limit.unwrap_or(config.dashboard.activity_limit), out)
        }
        Mode::Clients { search, plan } => run_clients(&store, search, plan, out),
        Mode::Posts { status } => run_posts(&store, &status, out),
        Mode::Calendar { month } => run_calendar(&store, &config, month, out),
        Mode::Heatmap { simulated } => run_heatmap(&store, &config, simulated, out),
        Mode::Analytics => run_analytics(&store, &config, out),
        Mode::AiConfig {
            client_id,
            toggle,
            package,
        } => run_ai_config(&store, &client_id, toggle, package, out).await,
        Mode::Export {
            format,
            output,
            target,
        } => run_export(&store, &config, &target, &format, &output),
    }
}

/// RUST_LOG wins over the configured level; logs go to stderr
fn init_logging(level: &str, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .try_init();
}

fn print_load_errors(report: &LoadReport) {
    for error in &report.errors {
        let label = match error.severity {
            ErrorSeverity::Warning => "warning",
            ErrorSeverity::Error => "error",
            ErrorSeverity::Fatal => "fatal",
        };
        eprintln!("{}: {}: {}", label, error.source, error.message);
        if let Some(suggestion) = &error.suggestion {
            eprintln!("         {}", suggestion);
        }
    }
}

#[derive(Clone, Copy)]
struct Output {
    json: bool,
    no_color: bool,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

fn today(config: &Config) -> NaiveDate {
    Utc::now()
        .with_timezone(&config.analytics.timezone())
        .date_naive()
}

// ============================================================================
// Command Handlers
// ============================================================================

fn run_summary(store: &DashboardStore, config: &Config, out: Output) -> Result<()> {
    let data = store.dashboard(config.dashboard.activity_limit);
    if out.json {
        return print_json(&data);
    }
    println!("{}", cli::format_summary(&data));
    Ok(())
}

fn run_platforms(store: &DashboardStore, config: &Config, out: Output) -> Result<()> {
    let data = store.dashboard(config.dashboard.activity_limit);
    if out.json {
        return print_json(&data.platforms);
    }
    println!("{}", cli::format_platform_table(&data.platforms, out.no_color));
    Ok(())
}

fn run_activity(store: &DashboardStore, limit: usize, out: Output) -> Result<()> {
    let data = store.dashboard(limit);
    if out.json {
        return print_json(&data.recent_activity);
    }
    println!(
        "{}",
        cli::format_activity_table(&data.recent_activity, out.no_color)
    );
    Ok(())
}

fn run_clients(
    store: &DashboardStore,
    search: Option<String>,
    plan: Option<String>,
    out: Output,
) -> Result<()> {
    let snapshot = store.snapshot();
    let filter = ClientFilter {
        search,
        plan: plan.as_deref().map(PlanTier::parse),
    };
    let clients = filter_clients(&snapshot.clients, &filter);

    if out.json {
        return print_json(&clients);
    }
    println!(
        "{}",
        cli::format_client_table(&clients, &snapshot, out.no_color)
    );
    println!();
    println!(
        "{}",
        cli::format_plan_counts(&plan_counts(snapshot.clients.iter()))
    );
    Ok(())
}

fn run_posts(store: &DashboardStore, status: &str, out: Output) -> Result<()> {
    let snapshot = store.snapshot();
    let filter = StatusFilter::parse(status);
    let mut posts = filter_by_status(&snapshot.posts, filter);
    posts.sort_by(|a, b| b.placement_time().cmp(&a.placement_time()));

    if out.json {
        return print_json(&posts);
    }
    println!("{}", cli::format_post_table(&posts, out.no_color));
    println!();
    println!(
        "{}",
        cli::format_status_counts(&raisen_core::analytics::status_counts(&snapshot.posts))
    );
    Ok(())
}

fn run_calendar(
    store: &DashboardStore,
    config: &Config,
    month: Option<String>,
    out: Output,
) -> Result<()> {
    let (year, month) = match month {
        Some(s) => cli::parse_month(&s)?,
        None => {
            let now = today(config);
            (now.year(), now.month())
        }
    };

    let snapshot = store.snapshot();
    let grid = calendar_month(&snapshot.posts, year, month, &config.analytics.timezone())
        .context("Failed to build calendar")?;

    if out.json {
        return print_json(&grid);
    }
    println!("{}", cli::format_calendar(&grid, out.no_color));
    Ok(())
}

fn run_heatmap(store: &DashboardStore, config: &Config, simulated: bool, out: Output) -> Result<()> {
    if simulated {
        let grid = simulated_engagement_heatmap(config.analytics.seed.wrapping_add(2));
        if out.json {
            return print_json(&grid);
        }
        println!("Engagement heatmap ({})", cli::simulated_label(&grid));
        println!("{}", cli::format_heatmap(&grid.value));
        return Ok(());
    }

    let snapshot = store.snapshot();
    let grid = posting_heatmap(&snapshot.posts, &config.analytics.timezone());
    if out.json {
        return print_json(&grid);
    }
    println!("Posting heatmap ({} posts)", snapshot.posts.len());
    println!("{}", cli::format_heatmap(&grid));
    Ok(())
}

fn run_analytics(store: &DashboardStore, config: &Config, out: Output) -> Result<()> {
    let data = store.analytics(&config.analytics, today(config));
    if out.json {
        return print_json(&data);
    }
    println!("{}", cli::format_analytics(&data, out.no_color));
    Ok(())
}

async fn run_ai_config(
    store: &DashboardStore,
    client_id: &str,
    toggle: Option<String>,
    package: Option<String>,
    out: Output,
) -> Result<()> {
    let snapshot = store.snapshot();
    let client = snapshot
        .clients
        .iter()
        .find(|c| c.id == client_id)
        .ok_or_else(|| cli::CliError::UnknownClient {
            id: client_id.to_string(),
            known: snapshot.clients.len(),
        })?;

    let config = if toggle.is_some() || package.is_some() {
        let updated = store.update_ai_config(client_id, |cfg| {
            if let Some(tier) = package.as_deref() {
                cfg.set_package(PlanTier::parse(tier));
            }
            match toggle.as_deref() {
                Some(slug) => cfg.toggle_provider(slug),
                None => Ok(()),
            }
        })?;
        let path = store.save_ai_configs().await?;
        if !out.json {
            eprintln!("Saved {}", path.display());
        }
        updated
    } else {
        store.ai_config(client_id)
    };

    let accounts: Vec<&SocialAccount> = snapshot.accounts_for_client(client_id).collect();

    if out.json {
        return print_json(&ClientDetail {
            client,
            ai_config: &config,
            accounts,
        });
    }
    println!("{}", cli::format_ai_config(client, &config));
    println!();
    println!("{}", cli::format_client_accounts(&accounts, out.no_color));
    Ok(())
}

#[derive(Serialize)]
struct ClientDetail<'a> {
    client: &'a Client,
    ai_config: &'a AiConfig,
    accounts: Vec<&'a SocialAccount>,
}

fn run_export(
    store: &DashboardStore,
    config: &Config,
    target: &str,
    format: &str,
    output: &std::path::Path,
) -> Result<()> {
    let unsupported = || cli::CliError::UnsupportedExport {
        target: target.to_string(),
        format: format.to_string(),
    };

    match target {
        "dashboard" => {
            let data = store.dashboard(config.dashboard.activity_limit);
            match format {
                "csv" => export::export_dashboard_to_csv(&data, output)?,
                "json" => export::export_dashboard_to_json(&data, output)?,
                "md" => export::export_dashboard_to_markdown(&data, output)?,
                _ => return Err(unsupported().into()),
            }
        }
        "activity" => {
            if format != "csv" {
                return Err(unsupported().into());
            }
            let data = store.dashboard(config.dashboard.activity_limit);
            export::export_activity_to_csv(&data.recent_activity, output)?;
        }
        "analytics" => {
            if format != "json" {
                return Err(unsupported().into());
            }
            let data = store.analytics(&config.analytics, today(config));
            export::export_analytics_to_json(&data, output)?;
        }
        _ => return Err(unsupported().into()),
    }

    eprintln!("Exported {} to {}", target, output.display());
    Ok(())
}
