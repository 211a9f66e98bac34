//! Unit tests for analytics module

use super::*;
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::models::{Client, PlanTier, Platform, Post, PostStatus, SocialAccount};

fn ts(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, day, hour, 0, 0).unwrap()
}

fn client(id: &str, active: bool, created_at: DateTime<Utc>) -> Client {
    Client {
        id: id.to_string(),
        name: format!("Client {}", id),
        active,
        created_at,
        ..Default::default()
    }
}

fn account(platform: &str, followers: i64, connected: bool) -> SocialAccount {
    SocialAccount {
        id: format!("{}-{}", platform, followers),
        platform: Platform::parse(platform),
        account_name: format!("@{}", platform),
        followers_count: followers,
        connected,
        ..Default::default()
    }
}

fn post(id: &str, status: PostStatus, created_at: DateTime<Utc>) -> Post {
    Post {
        id: id.to_string(),
        title: format!("Post {}", id),
        status,
        created_at,
        ..Default::default()
    }
}

/// Mixed accounts across every platform for aggregate tests
fn generate_test_accounts(count: usize) -> Vec<SocialAccount> {
    (0..count)
        .map(|i| {
            let platform = Platform::ALL[i % Platform::ALL.len()].clone();
            let mut a = account(platform.as_str(), (i as i64) * 37, i % 3 != 0);
            a.id = format!("account-{}", i);
            a.created_at = ts(1, 0) + Duration::minutes(i as i64);
            a
        })
        .collect()
}

// ============================================================================
// Summary Tests
// ============================================================================

#[test]
fn test_summarize_empty() {
    let summary = summarize(&[], &[]);
    assert_eq!(
        summary,
        DashboardSummary {
            active_client_count: 0,
            total_followers: 0,
            connected_account_count: 0,
            total_account_count: 0,
        }
    );
}

#[test]
fn test_summarize_counts() {
    let clients = vec![
        client("a", true, ts(1, 9)),
        client("b", false, ts(2, 9)),
        client("c", true, ts(3, 9)),
    ];
    let accounts = vec![
        account("instagram", 100, true),
        account("tiktok", 250, false),
        account("youtube", 0, true),
    ];

    let summary = summarize(&clients, &accounts);
    assert_eq!(summary.active_client_count, 2);
    assert_eq!(summary.total_followers, 350);
    assert_eq!(summary.connected_account_count, 2);
    assert_eq!(summary.total_account_count, 3);
}

#[test]
fn test_summarize_negative_followers_pass_through() {
    let accounts = vec![account("instagram", 100, true), account("facebook", -30, true)];
    assert_eq!(summarize(&[], &accounts).total_followers, 70);
}

#[test]
fn test_summarize_missing_followers_count_as_zero() {
    let accounts: Vec<SocialAccount> = serde_json::from_str(
        r#"[{"id": "a", "platform": "instagram", "followers_count": null, "connected": true},
            {"id": "b", "platform": "facebook", "followers_count": 40}]"#,
    )
    .unwrap();

    let summary = summarize(&[], &accounts);
    assert_eq!(summary.total_followers, 40);
    assert_eq!(summary.connected_account_count, 1);
}

// ============================================================================
// Platform Breakdown Tests
// ============================================================================

#[test]
fn test_breakdown_always_six_rows() {
    assert_eq!(breakdown_by_platform(&[]).len(), 6);
    assert_eq!(breakdown_by_platform(&generate_test_accounts(50)).len(), 6);
    assert_eq!(
        breakdown_by_platform(&[account("mastodon", 10, true)]).len(),
        6
    );
}

#[test]
fn test_breakdown_instagram_example() {
    let accounts = vec![
        account("instagram", 100, true),
        account("instagram", 50, false),
    ];

    let rows = breakdown_by_platform(&accounts);
    assert_eq!(rows[0].platform, Platform::Instagram);
    assert_eq!((rows[0].count, rows[0].followers, rows[0].connected), (2, 150, 1));

    for row in &rows[1..] {
        assert_eq!((row.count, row.followers, row.connected), (0, 0, 0));
        assert!(!row.has_data());
    }
}

#[test]
fn test_breakdown_canonical_order() {
    let rows = breakdown_by_platform(&[account("youtube", 1, true), account("facebook", 1, true)]);
    let order: Vec<Platform> = rows.iter().map(|r| r.platform.clone()).collect();
    assert_eq!(order, Platform::ALL.to_vec());
}

#[test]
fn test_breakdown_followers_match_summary() {
    let accounts = generate_test_accounts(40);
    let summary = summarize(&[], &accounts);
    let rows = breakdown_by_platform(&accounts);

    let followers: i64 = rows.iter().map(|r| r.followers).sum();
    let count: usize = rows.iter().map(|r| r.count).sum();
    let connected: usize = rows.iter().map(|r| r.connected).sum();

    assert_eq!(followers, summary.total_followers);
    assert_eq!(count, summary.total_account_count);
    assert_eq!(connected, summary.connected_account_count);
}

#[test]
fn test_breakdown_skips_unknown_platform() {
    let accounts = vec![account("instagram", 10, true), account("mastodon", 99, true)];
    let rows = breakdown_by_platform(&accounts);
    let followers: i64 = rows.iter().map(|r| r.followers).sum();

    assert_eq!(followers, 10);
    assert_eq!(summarize(&[], &accounts).total_followers, 109);
}

// ============================================================================
// Activity Feed Tests
// ============================================================================

#[test]
fn test_activity_empty() {
    assert!(recent_activity(&[], &[], DEFAULT_ACTIVITY_LIMIT).is_empty());
}

#[test]
fn test_activity_sorted_and_truncated() {
    let clients: Vec<Client> = (1..=6)
        .map(|d| client(&format!("c{}", d), true, ts(d, 10)))
        .collect();
    let accounts: Vec<SocialAccount> = (1..=6)
        .map(|d| {
            let mut a = account("instagram", 10, true);
            a.id = format!("a{}", d);
            a.created_at = ts(d, 12);
            a
        })
        .collect();

    let feed = recent_activity(&clients, &accounts, DEFAULT_ACTIVITY_LIMIT);
    assert_eq!(feed.len(), 8);
    assert!(feed.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    assert_eq!(feed[0].id, "a6");
    assert_eq!(feed[0].kind, ActivityKind::Account);
    assert_eq!(feed[1].id, "c6");
    assert_eq!(feed[1].kind, ActivityKind::Client);
}

#[test]
fn test_activity_ties_keep_input_order() {
    let same = ts(5, 8);
    let clients = vec![client("c1", true, same), client("c2", true, same)];
    let mut acc = account("tiktok", 5, false);
    acc.id = "a1".to_string();
    acc.created_at = same;

    let feed = recent_activity(&clients, &[acc], 10);
    let ids: Vec<&str> = feed.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["c1", "c2", "a1"]);
}

#[test]
fn test_activity_labels() {
    let mut c = client("c1", true, ts(1, 0));
    c.company = Some("Acme".to_string());
    let mut a = account("twitter", 5, false);
    a.account_name = "acme_hq".to_string();

    let feed = recent_activity(&[c], &[a], 10);
    let client_item = feed.iter().find(|i| i.kind == ActivityKind::Client).unwrap();
    let account_item = feed.iter().find(|i| i.kind == ActivityKind::Account).unwrap();

    assert_eq!(client_item.subtitle, "Acme");
    assert_eq!(account_item.title, "🐦 acme_hq");
    assert_eq!(account_item.subtitle, "X / Twitter • Pending");
}

#[test]
fn test_activity_zero_limit() {
    let clients = vec![client("c1", true, ts(1, 0))];
    assert!(recent_activity(&clients, &[], 0).is_empty());
}

// ============================================================================
// Ranking Tests
// ============================================================================

#[test]
fn test_top_n_descending_and_stable() {
    let items = vec![("a", 3), ("b", 5), ("c", 3), ("d", 1), ("e", 5)];
    let top: Vec<&str> = top_n(&items, 4, |i| i.1).iter().map(|i| i.0).collect();
    assert_eq!(top, ["b", "e", "a", "c"]);
}

#[test]
fn test_top_n_idempotent() {
    let items: Vec<(usize, u32)> = (0..50).map(|i| (i, (i as u32 * 7) % 5)).collect();
    let first = top_n(&items, 10, |i| i.1);
    let second = top_n(&items, 10, |i| i.1);
    assert_eq!(first, second);
}

#[test]
fn test_top_n_larger_than_input() {
    let items = vec![1, 2];
    assert_eq!(top_n(&items, 10, |i| *i).len(), 2);
    assert!(top_n::<i32, i32, _>(&[], 3, |i| *i).is_empty());
}

#[test]
fn test_top_n_by_f64_nan_ranks_last() {
    let items = vec![("x", f64::NAN), ("y", 2.5), ("z", 7.0), ("w", 2.5)];
    let top: Vec<&str> = top_n_by_f64(&items, 4, |i| i.1).iter().map(|i| i.0).collect();
    assert_eq!(top, ["z", "y", "w", "x"]);
}

// ============================================================================
// Heatmap Tests
// ============================================================================

#[test]
fn test_bucket_heatmap_scales_to_hundred() {
    let mut weights: HeatmapWeights = [[0.0; 24]; 7];
    weights[0][9] = 4.0;
    weights[2][13] = 2.0;
    weights[6][20] = 1.0;
    weights[3][3] = -5.0;
    weights[4][4] = f64::NAN;

    let grid = bucket_heatmap(&weights);
    assert_eq!(grid.get(0, 9), 100);
    assert_eq!(grid.get(2, 13), 50);
    assert_eq!(grid.get(6, 20), 25);
    assert_eq!(grid.get(3, 3), 0);
    assert_eq!(grid.get(4, 4), 0);
    assert_eq!(grid.max(), 100);
    assert_eq!(grid.peak(), Some((0, 9, 100)));
}

#[test]
fn test_bucket_heatmap_all_zero() {
    let grid = bucket_heatmap(&[[0.0; 24]; 7]);
    assert!(grid.is_empty());
    assert_eq!(grid.peak(), None);
    assert_eq!(grid.get(10, 40), 0);
}

#[test]
fn test_posting_heatmap_uses_timezone() {
    // 2026-06-01 is a Monday
    let mut p = post("p1", PostStatus::Published, ts(1, 23));
    p.published_at = Some(ts(1, 23));
    let utc_grid = posting_heatmap(std::slice::from_ref(&p), &Utc);
    assert_eq!(utc_grid.get(0, 23), 100);

    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
    let local_grid = posting_heatmap(&[p], &plus_two);
    assert_eq!(local_grid.get(1, 1), 100);
    assert_eq!(local_grid.get(0, 23), 0);
}

#[test]
fn test_simulated_heatmap_deterministic() {
    let a = simulated_engagement_heatmap(7);
    let b = simulated_engagement_heatmap(7);
    assert_eq!(a, b);
    assert!(a.is_simulated());
    assert_eq!(a.seed, 7);

    let grid = a.value;
    for day in 0..7 {
        for hour in 0..6 {
            assert_eq!(grid.get(day, hour), 0, "hours before 06 stay empty");
        }
        for hour in 6..24 {
            let value = grid.get(day, hour);
            assert!(value <= 100);
            assert!(value >= 14, "base weight never drops below 20 * 0.7");
        }
    }
}

#[test]
fn test_simulated_heatmap_peaks_beat_off_hours_on_weekdays() {
    let grid = simulated_engagement_heatmap(99).value;
    for day in 0..5 {
        assert!(grid.get(day, 10) >= 60);
        assert!(grid.get(day, 7) <= 60);
    }
}

#[test]
fn test_heat_levels() {
    assert_eq!(HeatLevel::from_value(100), HeatLevel::Peak);
    assert_eq!(HeatLevel::from_value(80), HeatLevel::Peak);
    assert_eq!(HeatLevel::from_value(79), HeatLevel::High);
    assert_eq!(HeatLevel::from_value(40), HeatLevel::Medium);
    assert_eq!(HeatLevel::from_value(20), HeatLevel::Low);
    assert_eq!(HeatLevel::from_value(19), HeatLevel::None);
}

// ============================================================================
// Calendar Tests
// ============================================================================

#[test]
fn test_calendar_month_layout() {
    // June 2026 starts on a Monday and ends on a Tuesday
    let month = calendar_month(&[], 2026, 6, &Utc).unwrap();
    assert_eq!(month.weeks.len(), 5);
    assert_eq!(month.weeks[0][0].date, NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
    assert_eq!(
        month.weeks[4][6].date,
        NaiveDate::from_ymd_opt(2026, 7, 5).unwrap()
    );
    assert!(month.weeks[4][6].date.weekday() == chrono::Weekday::Sun);
    assert_eq!(month.days().filter(|d| d.in_month).count(), 30);
}

#[test]
fn test_calendar_leading_days_from_previous_month() {
    // February 2026 starts on a Sunday
    let month = calendar_month(&[], 2026, 2, &Utc).unwrap();
    let first_week = &month.weeks[0];
    assert_eq!(first_week[0].date, NaiveDate::from_ymd_opt(2026, 1, 26).unwrap());
    assert!(!first_week[0].in_month);
    assert!(first_week[6].in_month);
}

#[test]
fn test_calendar_places_by_schedule_then_creation() {
    let mut scheduled = post("s", PostStatus::Scheduled, ts(2, 9));
    scheduled.scheduled_at = Some(ts(10, 18));
    let draft = post("d", PostStatus::Draft, ts(10, 8));
    let failed = post("f", PostStatus::Failed, ts(3, 8));

    let month = calendar_month(&[scheduled, draft, failed], 2026, 6, &Utc).unwrap();
    let tenth = month
        .days()
        .find(|d| d.date == NaiveDate::from_ymd_opt(2026, 6, 10).unwrap())
        .unwrap();
    let ids: Vec<&str> = tenth.posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["d", "s"]);
    assert_eq!(month.post_count(), 3);
}

#[test]
fn test_calendar_invalid_month() {
    assert!(calendar_month(&[], 2026, 13, &Utc).is_err());
    assert!(calendar_month(&[], 2026, 0, &Utc).is_err());
}

#[test]
fn test_posts_on_day() {
    let posts = vec![
        post("late", PostStatus::Draft, ts(4, 20)),
        post("early", PostStatus::Draft, ts(4, 7)),
        post("other", PostStatus::Draft, ts(5, 7)),
    ];
    let day = posts_on_day(&posts, NaiveDate::from_ymd_opt(2026, 6, 4).unwrap(), &Utc);
    let ids: Vec<&str> = day.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["early", "late"]);
}

// ============================================================================
// Content Status Tests
// ============================================================================

#[test]
fn test_status_counts_sum_to_input() {
    let posts: Vec<Post> = PostStatus::ALL
        .iter()
        .cycle()
        .take(10)
        .enumerate()
        .map(|(i, s)| post(&i.to_string(), *s, ts(1, 0)))
        .collect();

    let counts = status_counts(&posts);
    assert_eq!(counts.total(), posts.len());
    assert_eq!(counts.draft, 3);
    assert_eq!(counts.scheduled, 3);
    assert_eq!(counts.published, 2);
    assert_eq!(counts.get(PostStatus::Failed), 2);
    assert_eq!(status_counts(&[]), StatusCounts::default());
}

#[test]
fn test_filter_by_status() {
    let posts = vec![
        post("1", PostStatus::Draft, ts(1, 0)),
        post("2", PostStatus::Published, ts(1, 0)),
        post("3", PostStatus::Published, ts(1, 0)),
    ];
    assert_eq!(filter_by_status(&posts, StatusFilter::All).len(), 3);

    let published = filter_by_status(&posts, StatusFilter::parse("published"));
    let ids: Vec<&str> = published.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["2", "3"]);
    assert_eq!(StatusFilter::parse("ALL"), StatusFilter::All);
}

// ============================================================================
// Simulated Series Tests
// ============================================================================

#[test]
fn test_growth_series_shape() {
    let end = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
    let growth = growth_series(10_000, 30, end, 1);

    assert_eq!(growth.value.len(), 31);
    assert_eq!(growth.value[0].date, end - Duration::days(30));
    assert_eq!(growth.value[30].date, end);

    let first = growth.value[0].followers;
    let last = growth.value[30].followers;
    assert!((8_500..=8_700).contains(&first), "starts near 85%: {}", first);
    assert!((10_000..=10_200).contains(&last), "ends near total: {}", last);
    assert_eq!(growth, growth_series(10_000, 30, end, 1));
}

#[test]
fn test_growth_series_small_totals() {
    let end = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
    let growth = growth_series(0, 5, end, 3);
    assert_eq!(growth.value.len(), 6);
    assert_eq!(growth.value[0].followers, 10);
    assert_eq!(growth.value[5].followers, 0);
}

#[test]
fn test_growth_series_caps_history() {
    let end = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
    let growth = growth_series(1_000, u32::MAX, end, 5);
    assert_eq!(growth.value.len(), MAX_GROWTH_DAYS as usize + 1);
    assert_eq!(growth.value.last().unwrap().date, end);
}

#[test]
fn test_growth_series_near_calendar_start() {
    let end = NaiveDate::MIN + Duration::days(3);
    let growth = growth_series(1_000, 10, end, 5);
    assert_eq!(growth.value.len(), 4);
    assert_eq!(growth.value[0].date, NaiveDate::MIN);
    assert_eq!(growth.value[3].date, end);
}

#[test]
fn test_engagement_only_platforms_with_followers() {
    let rows = breakdown_by_platform(&[
        account("instagram", 1_000, true),
        account("linkedin", 500, true),
    ]);
    let engagement = engagement_by_platform(&rows, 11);

    assert_eq!(engagement.value.len(), 2);
    let ig = &engagement.value[0];
    assert_eq!(ig.platform, Platform::Instagram);
    assert!((20..=70).contains(&ig.likes));
    assert!((5..=15).contains(&ig.comments));
    assert!((2..=10).contains(&ig.shares));
    assert_eq!(engagement, engagement_by_platform(&rows, 11));
}

#[test]
fn test_average_engagement_rate() {
    assert_eq!(average_engagement_rate(&[], 1_000), 0.0);

    let rows = vec![
        PlatformEngagement {
            platform: Platform::Instagram,
            likes: 50,
            comments: 10,
            shares: 5,
        },
        PlatformEngagement {
            platform: Platform::TikTok,
            likes: 25,
            comments: 5,
            shares: 5,
        },
    ];
    // mean 50 interactions / 1000 followers
    assert_eq!(average_engagement_rate(&rows, 1_000), 5.0);
    // zero followers divides by one
    assert_eq!(average_engagement_rate(&rows, 0), 5000.0);
}

#[test]
fn test_top_posts_ranked_by_engagement() {
    let posts: Vec<Post> = (0..12)
        .map(|i| post(&format!("p{}", i), PostStatus::Published, ts(1, 0)))
        .collect();
    let performance = simulate_post_performance(&posts, 5);
    assert_eq!(performance.value.len(), 12);

    for row in &performance.value {
        assert!((500..=5000).contains(&row.likes));
        assert!((2.0..=10.0).contains(&row.engagement));
    }

    let top = top_posts(&performance.value, 5);
    assert_eq!(top.len(), 5);
    assert!(top.windows(2).all(|w| w[0].engagement >= w[1].engagement));
    assert_eq!(top, top_posts(&performance.value, 5));
}

// ============================================================================
// Bundle Tests
// ============================================================================

#[test]
fn test_dashboard_data_compute() {
    let snapshot = crate::Snapshot::new(
        vec![client("c1", true, ts(1, 0))],
        generate_test_accounts(12),
        vec![post("p1", PostStatus::Scheduled, ts(2, 0))],
    );

    let data = DashboardData::compute(&snapshot, 5);
    assert_eq!(data.summary.total_account_count, 12);
    assert_eq!(data.platforms.len(), 6);
    assert_eq!(data.recent_activity.len(), 5);
    assert_eq!(data.post_status.scheduled, 1);
}

#[test]
fn test_analytics_data_deterministic_for_seed() {
    let snapshot = crate::Snapshot::new(
        Vec::new(),
        generate_test_accounts(12),
        (0..8)
            .map(|i| post(&i.to_string(), PostStatus::Published, ts(i + 1, 10)))
            .collect(),
    );
    let config = crate::config::AnalyticsConfig::default();
    let end = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();

    let a = AnalyticsData::compute(&snapshot, &config, end);
    let b = AnalyticsData::compute(&snapshot, &config, end);

    assert_eq!(a.growth, b.growth);
    assert_eq!(a.engagement, b.engagement);
    assert_eq!(a.top_posts, b.top_posts);
    assert_eq!(a.engagement_heatmap, b.engagement_heatmap);
    assert_eq!(a.top_posts.value.len(), config.top_posts);
    assert_eq!(a.posting_heatmap.max(), 100);
}

// ============================================================================
// Client list
// ============================================================================

fn listed_client(name: &str, company: Option<&str>, email: Option<&str>, plan: PlanTier) -> Client {
    Client {
        id: name.to_lowercase(),
        name: name.to_string(),
        company: company.map(str::to_string),
        email: email.map(str::to_string),
        plan,
        ..Default::default()
    }
}

fn client_list() -> Vec<Client> {
    vec![
        listed_client("Acme", Some("Acme SA"), Some("hola@acme.es"), PlanTier::Pro),
        listed_client("Bistro", None, Some("chef@bistro.com"), PlanTier::Basic),
        listed_client("Clinic", Some("Salud Norte"), None, PlanTier::Enterprise),
        listed_client("Dental", Some("Acme Group"), None, PlanTier::Basic),
    ]
}

#[test]
fn test_client_search_matches_name_company_or_email() {
    let clients = client_list();
    let names = |filter: &ClientFilter| -> Vec<String> {
        filter_clients(&clients, filter)
            .iter()
            .map(|c| c.name.clone())
            .collect()
    };

    let by_search = |search: &str| ClientFilter {
        search: Some(search.to_string()),
        plan: None,
    };

    assert_eq!(names(&by_search("ACME")), vec!["Acme", "Dental"]);
    assert_eq!(names(&by_search("bistro.com")), vec!["Bistro"]);
    assert_eq!(names(&by_search("norte")), vec!["Clinic"]);
    assert!(names(&by_search("nobody")).is_empty());
    assert_eq!(names(&by_search("  ")).len(), 4);
    assert_eq!(names(&ClientFilter::default()).len(), 4);
}

#[test]
fn test_client_search_combines_with_plan() {
    let clients = client_list();
    let filter = ClientFilter {
        search: Some("acme".to_string()),
        plan: Some(PlanTier::Basic),
    };

    let matched = filter_clients(&clients, &filter);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "Dental");
}

#[test]
fn test_plan_counts_cover_every_tier() {
    let counts = plan_counts(&client_list());
    let pairs: Vec<(PlanTier, usize)> = counts.iter().map(|c| (c.plan, c.count)).collect();
    assert_eq!(
        pairs,
        vec![
            (PlanTier::Basic, 2),
            (PlanTier::Pro, 1),
            (PlanTier::Enterprise, 1)
        ]
    );

    assert!(plan_counts(&Vec::<Client>::new()).iter().all(|c| c.count == 0));
}
