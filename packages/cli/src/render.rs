//! Plain-text tables for terminal output.

use chrono::NaiveDateTime;
use scs_conecta_community::Comment;
use scs_conecta_district_models::{
    Business, ChannelMetrics, DistrictDataset, Event, Post, SafetyAlert, VacantProperty,
};
use scs_conecta_engine_models::{
    ChannelStats, DashboardStats, DistrictSnapshot, LabelCount, Recommendation, RouteStop,
    SafetyStats, ShareContent, TimeStatus, VacancyStats, ZoneCount, ZoneRisk,
};

fn percent(rate: Option<f64>) -> String {
    rate.map_or_else(|| "n/a".to_string(), |rate| format!("{rate:.1}%"))
}

fn rule(width: usize) -> String {
    "-".repeat(width)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

fn zone_counts(
    lines: &mut Vec<String>,
    heading: &str,
    counts: &[ZoneCount],
    dataset: &DistrictDataset,
) {
    lines.push(format!("{heading}:"));
    for row in counts {
        lines.push(format!("  {:<20} {}", dataset.zone_name(&row.zone), row.count));
    }
}

fn label_counts(lines: &mut Vec<String>, heading: &str, counts: &[LabelCount]) {
    lines.push(format!("{heading}:"));
    if counts.is_empty() {
        lines.push("  (none)".to_string());
    }
    for row in counts {
        lines.push(format!("  {:<20} {}", row.label, row.count));
    }
}

pub fn dashboard(stats: &DashboardStats, dataset: &DistrictDataset) -> String {
    let mut lines = vec![
        "SCS Conecta dashboard".to_string(),
        rule(40),
        format!("Events:            {}", stats.event_count),
        format!(
            "Occupancy:         {} ({} active, {} vacant)",
            percent(stats.occupancy.rate),
            stats.occupancy.active,
            stats.occupancy.vacant
        ),
        format!("Safety alerts:     {}", stats.alert_count),
        format!("QR scans:          {}", stats.total_qr_scans),
        String::new(),
    ];
    zone_counts(&mut lines, "Events by zone", &stats.events_by_zone, dataset);
    label_counts(&mut lines, "Alerts by kind", &stats.alerts_by_kind);

    lines.push(String::new());
    lines.push(format!(
        "{:<10} {:<36} {:>7} {:>6} {:>6}",
        "EVENT", "TITLE", "VIEWS", "QR", "RSVP"
    ));
    for row in &stats.engagement {
        lines.push(format!(
            "{:<10} {:<36} {:>7} {:>6} {:>6}",
            row.event_id,
            truncate(&row.title, 36),
            row.views,
            row.qr_scans,
            row.confirmations
        ));
    }
    lines.join("\n")
}

pub fn events(rows: &[(&Event, TimeStatus)], dataset: &DistrictDataset) -> String {
    if rows.is_empty() {
        return "No events found.".to_string();
    }

    let mut lines = vec![
        format!(
            "{:<9} {:<34} {:<14} {:<10} {:<11} {}",
            "ID", "TITLE", "ZONE", "DATE", "TIME", "WHEN"
        ),
        rule(96),
    ];
    for (event, status) in rows {
        lines.push(format!(
            "{:<9} {:<34} {:<14} {:<10} {:<11} {}",
            event.id,
            truncate(&event.title, 34),
            dataset.zone_name(&event.zone),
            event.date.format("%d/%m/%Y"),
            format!("{}-{}", event.start_time, event.end_time),
            status.label()
        ));
    }
    lines.push(format!("\n{} event(s)", rows.len()));
    lines.join("\n")
}

pub fn businesses(
    businesses: &[&Business],
    dataset: &DistrictDataset,
    now: NaiveDateTime,
) -> String {
    if businesses.is_empty() {
        return "No businesses found.".to_string();
    }

    let mut lines = vec![
        format!(
            "{:<9} {:<30} {:<14} {:<13} {:<7} {}",
            "ID", "NAME", "ZONE", "KIND", "STATUS", "NOW"
        ),
        rule(86),
    ];
    for business in businesses {
        let open = if business.hours.is_open_at(now) { "open" } else { "closed" };
        lines.push(format!(
            "{:<9} {:<30} {:<14} {:<13} {:<7} {}",
            business.id,
            truncate(&business.name, 30),
            dataset.zone_name(&business.zone),
            business.kind,
            business.status,
            open
        ));
    }
    lines.push(format!("\n{} business(es)", businesses.len()));
    lines.join("\n")
}

pub fn alerts(alerts: &[&SafetyAlert], dataset: &DistrictDataset) -> String {
    if alerts.is_empty() {
        return "No alerts found.".to_string();
    }

    let mut lines = vec![
        format!(
            "{:<9} {:<20} {:<14} {:<17} {:<12} {}",
            "ID", "KIND", "ZONE", "REPORTED", "STATUS", "VERIFIED"
        ),
        rule(84),
    ];
    for alert in alerts {
        lines.push(format!(
            "{:<9} {:<20} {:<14} {:<17} {:<12} {}",
            alert.id,
            alert.kind,
            dataset.zone_name(&alert.zone),
            alert.timestamp.format("%d/%m/%Y %H:%M"),
            alert.status,
            if alert.verified { "yes" } else { "no" }
        ));
    }
    lines.join("\n")
}

pub fn safety(stats: &SafetyStats, dataset: &DistrictDataset) -> String {
    let index = stats
        .safety_index
        .map_or_else(|| "n/a".to_string(), |index| index.to_string());
    let mut lines = vec![
        "Safety".to_string(),
        rule(40),
        format!("Alerts:            {}", stats.total),
        format!("Last 7 days:       {}", stats.recent),
        format!("Last 30 days:      {}", stats.monthly),
        format!("Active:            {}", stats.active),
        format!("Resolved:          {}", stats.resolved),
        format!("Verified:          {}", stats.verified),
        format!("Resolution rate:   {}", percent(stats.resolution_rate)),
        format!("Safety index:      {index}"),
        String::new(),
    ];
    label_counts(&mut lines, "By kind", &stats.by_kind);
    zone_counts(&mut lines, "By zone", &stats.by_zone, dataset);
    label_counts(&mut lines, "By hour band", &stats.by_hour_band);
    lines.join("\n")
}

pub fn vacancy(
    stats: &VacancyStats,
    properties: &[&VacantProperty],
    dataset: &DistrictDataset,
) -> String {
    let months = stats
        .average_months_vacant
        .map_or_else(|| "n/a".to_string(), |months| format!("{months:.1}"));
    let mut lines = vec![
        "Vacancy".to_string(),
        rule(40),
        format!("Vacant properties: {}", stats.vacant_count),
        format!("Public spaces:     {}", stats.public_space_count),
        format!("Rent lost / month: R$ {:.2}", stats.monthly_rent_lost),
        format!("Avg months vacant: {months}"),
        format!("High potential:    {}", stats.high_potential),
        format!("Medium potential:  {}", stats.medium_potential),
    ];

    if !properties.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "{:<11} {:<28} {:<14} {:>7} {:<10} {}",
            "ID", "NAME", "ZONE", "M2", "POTENTIAL", "USES"
        ));
        for property in properties {
            let uses: Vec<&str> = property.suggested_uses.iter().map(String::as_str).collect();
            lines.push(format!(
                "{:<11} {:<28} {:<14} {:>7.0} {:<10} {}",
                property.id,
                truncate(&property.name, 28),
                dataset.zone_name(&property.zone),
                property.area_m2,
                property.reactivation_potential,
                uses.join(", ")
            ));
        }
    }
    lines.join("\n")
}

pub fn risk(risks: &[ZoneRisk], dataset: &DistrictDataset) -> String {
    if risks.is_empty() {
        return "No risk profiles.".to_string();
    }

    let mut lines = vec![
        format!(
            "{:<14} {:>5} {:>7} {:>7} {:<13} {}",
            "ZONE", "SCORE", "EVENTS", "ALERTS", "WINDOWS", "NOW CRITICAL"
        ),
        rule(64),
    ];
    for risk in risks {
        let windows: Vec<String> = risk.critical_windows.iter().map(ToString::to_string).collect();
        lines.push(format!(
            "{:<14} {:>5.2} {:>7} {:>7} {:<13} {}",
            dataset.zone_name(&risk.zone),
            risk.score,
            risk.active_events,
            risk.open_alerts,
            if windows.is_empty() { "-".to_string() } else { windows.join(",") },
            if risk.in_critical_window { "yes" } else { "no" }
        ));
    }
    lines.join("\n")
}

pub fn recommendations(recs: &[Recommendation], dataset: &DistrictDataset) -> String {
    if recs.is_empty() {
        return "No recommendations.".to_string();
    }

    recs.iter()
        .map(|rec| {
            let zone = rec
                .zone
                .as_ref()
                .map_or_else(String::new, |zone| format!(" ({})", dataset.zone_name(zone)));
            format!("[{}] {}{zone}: {}", rec.priority, rec.category, rec.message)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn share(content: &ShareContent) -> String {
    [
        "Instagram caption".to_string(),
        rule(40),
        content.instagram_caption.clone(),
        String::new(),
        "Instagram story".to_string(),
        rule(40),
        content.instagram_story.clone(),
        String::new(),
        format!("WhatsApp: {}", content.whatsapp_url),
        format!("Telegram: {}", content.telegram_url),
    ]
    .join("\n")
}

pub fn route(stops: &[RouteStop]) -> String {
    stops
        .iter()
        .map(|stop| format!("{:>4} min  {:<5}  {}", stop.minute, stop.kind, stop.name))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn snapshot(snap: &DistrictSnapshot, dataset: &DistrictDataset) -> String {
    let place = snap.zone.as_ref().map_or("SCS", |zone| dataset.zone_name(zone));
    [
        format!("{place} at {}: {}", snap.at, snap.status),
        rule(40),
        format!("Active events:     {}", snap.active_events),
        format!("Open businesses:   {}", snap.open_businesses),
        format!("Recent alerts:     {}", snap.recent_alerts),
        format!(
            "Movement:          {} (~{} people)",
            snap.movement, snap.estimated_people
        ),
        format!("Security:          {}", snap.security),
        format!("Lighting:          {}", snap.lighting),
        format!("Urban life score:  {:.2}", snap.urban_life_score),
        String::new(),
        snap.recommendation.clone(),
    ]
    .join("\n")
}

pub fn forum(rows: &[(&Post, i64)]) -> String {
    if rows.is_empty() {
        return "No posts found.".to_string();
    }

    let mut lines = vec![
        format!(
            "{:<9} {:>5} {:<11} {:<44} {}",
            "ID", "SCORE", "CATEGORY", "TITLE", "COMMENTS"
        ),
        rule(80),
    ];
    for (post, score) in rows {
        let title = if post.pinned {
            format!("[pinned] {}", post.title)
        } else {
            post.title.clone()
        };
        lines.push(format!(
            "{:<9} {:>5} {:<11} {:<44} {}",
            post.id,
            score,
            post.category,
            truncate(&title, 44),
            post.comment_count
        ));
    }
    lines.join("\n")
}

pub fn channels(stats: &[ChannelStats], metrics: &[ChannelMetrics]) -> String {
    let mut lines = vec![
        format!(
            "{:<10} {:>5} {:>8} {:>8} {:>7} {:>7} {:>9} {}",
            "CHANNEL", "POSTS", "REACH", "ENGAGE", "CLICKS", "RATE", "AUDIENCE", "BEST TIME"
        ),
        rule(82),
    ];
    for row in stats {
        let metric = metrics.iter().find(|m| m.channel == row.channel);
        let audience = metric.map_or_else(|| "-".to_string(), |m| m.audience.to_string());
        let best = metric
            .map(|m| {
                let window = m.best_window.as_ref().map(ToString::to_string);
                let day = m.best_day.as_ref().map(ToString::to_string);
                [day, window].into_iter().flatten().collect::<Vec<_>>().join(" ")
            })
            .filter(|best| !best.is_empty())
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "{:<10} {:>5} {:>8} {:>8} {:>7} {:>7} {:>9} {}",
            row.channel,
            row.publications,
            row.reach,
            row.engagement,
            row.clicks,
            percent(row.engagement_rate),
            audience,
            best
        ));
    }
    lines.join("\n")
}

pub fn comments(thread: &str, comments: &[Comment]) -> String {
    let mut lines = vec![format!("Comments on {thread} ({})", comments.len()), rule(40)];
    if comments.is_empty() {
        lines.push("(no comments yet)".to_string());
    }
    for comment in comments {
        lines.push(format!(
            "{} {} [{} like(s)] {}",
            comment.timestamp.format("%d/%m/%Y %H:%M"),
            comment.author,
            comment.likes,
            comment.id
        ));
        lines.push(format!("  {}", comment.text));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use scs_conecta_engine::{DistrictDataEngine, EngineConfig};
    use scs_conecta_engine_models::{BusinessFilter, RouteRequest};
    use scs_conecta_fixtures::{DistrictRepository as _, StaticRepository};

    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn truncates_long_text_on_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Café com música ao vivo", 10), "Café co...");
    }

    #[test]
    fn undefined_rates_render_as_na() {
        assert_eq!(percent(None), "n/a");
        assert_eq!(percent(Some(83.3)), "83.3%");
    }

    #[test]
    fn dashboard_names_zones() {
        let repo = StaticRepository::bundled();
        let config = EngineConfig::default();
        let engine = DistrictDataEngine::new(repo.dataset(), &config);

        let text = dashboard(&engine.dashboard(), repo.dataset());
        assert!(text.contains("Occupancy:         83.3% (5 active, 1 vacant)"));
        assert!(text.contains("SCS Quadra 1"));
    }

    #[test]
    fn businesses_show_open_state() {
        let repo = StaticRepository::bundled();
        let config = EngineConfig::default();
        let engine = DistrictDataEngine::new(repo.dataset(), &config);

        let list = engine.businesses(&BusinessFilter::default());
        let text = businesses(&list, repo.dataset(), at("2025-12-20T12:00:00"));
        assert!(text.ends_with("6 business(es)"));
        assert!(text.contains("open") || text.contains("closed"));
    }

    #[test]
    fn route_lists_minutes() {
        let repo = StaticRepository::bundled();
        let config = EngineConfig::default();
        let engine = DistrictDataEngine::new(repo.dataset(), &config);

        let request = RouteRequest {
            interests: vec!["coffee".to_string()],
            minutes_available: 60,
            ..RouteRequest::default()
        };
        let text = route(&engine.plan_route(&request).unwrap());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("15 min"));
        assert!(lines[2].contains("Return to start"));
    }

    #[test]
    fn empty_lists_say_so() {
        let dataset = DistrictDataset::default();
        assert_eq!(events(&[], &dataset), "No events found.");
        assert_eq!(forum(&[]), "No posts found.");
        assert_eq!(recommendations(&[], &dataset), "No recommendations.");
    }
}
