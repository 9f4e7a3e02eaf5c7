//! Counting, summing and rate calculations over district collections.
//!
//! Grouped counts are returned as ordered `Vec`s rather than maps so display
//! surfaces get a stable order. Rates are `None` whenever their denominator
//! is zero.

use std::fmt::Display;

use chrono::{Datelike as _, Duration, NaiveDate, NaiveDateTime, Timelike as _};
use scs_conecta_district_models::{
    AlertStatus, Business, BusinessStatus, Channel, DistrictDataset, Event, Post, Publication,
    PublicSpace, ReactivationPotential, SafetyAlert, VacantProperty, ZoneId, Zoned,
};
use scs_conecta_engine_models::{
    ChannelStats, CommunityStats, DashboardStats, EngagementMetric, EventEngagementRow,
    LabelCount, OccupancySummary, SafetyStats, VacancyStats, ZoneCount, ZoneRisk,
};

use crate::EngineConfig;

/// Width of the hour bands used to bucket alerts by time of day.
pub const HOUR_BAND_WIDTH: u32 = 4;

/// Rounds `value` to `decimals` decimal places.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: u64, whole: u64, decimals: i32) -> Option<f64> {
    if whole == 0 {
        return None;
    }
    Some(round_to(part as f64 / whole as f64 * 100.0, decimals))
}

/// Counts items per zone.
///
/// Every zone in `driving_zones` appears first, in that order, even with a
/// zero count. Zones that only appear in `items` follow in first-appearance
/// order. Items without a zone are not counted.
pub fn count_by_zone<'a, T: Zoned + 'a>(
    items: impl IntoIterator<Item = &'a T>,
    driving_zones: &[ZoneId],
) -> Vec<ZoneCount> {
    let mut counts: Vec<ZoneCount> = driving_zones
        .iter()
        .map(|zone| ZoneCount {
            zone: zone.clone(),
            count: 0,
        })
        .collect();

    for zone in items.into_iter().filter_map(|item| item.zone()) {
        if let Some(entry) = counts.iter_mut().find(|c| &c.zone == zone) {
            entry.count += 1;
        } else {
            counts.push(ZoneCount {
                zone: zone.clone(),
                count: 1,
            });
        }
    }

    counts
}

/// Counts items per key, in first-appearance order of the keys.
pub fn count_by_key<'a, T: 'a, K: Display>(
    items: impl IntoIterator<Item = &'a T>,
    key: impl Fn(&T) -> K,
) -> Vec<LabelCount> {
    let mut counts: Vec<LabelCount> = Vec::new();

    for item in items {
        let label = key(item).to_string();
        if let Some(entry) = counts.iter_mut().find(|c| c.label == label) {
            entry.count += 1;
        } else {
            counts.push(LabelCount { label, count: 1 });
        }
    }

    counts
}

/// `active / (active + vacant) * 100`, one decimal. `None` when both are
/// zero.
#[must_use]
pub fn occupancy_rate(active: u64, vacant: u64) -> Option<f64> {
    percentage(active, active + vacant, 1)
}

/// Active and vacant unit counts plus the occupancy rate.
#[must_use]
pub fn occupancy(businesses: &[Business]) -> OccupancySummary {
    let active = businesses
        .iter()
        .filter(|b| b.status == BusinessStatus::Active)
        .count() as u64;
    let vacant = businesses
        .iter()
        .filter(|b| b.status == BusinessStatus::Vacant)
        .count() as u64;

    OccupancySummary {
        active,
        vacant,
        rate: occupancy_rate(active, vacant),
    }
}

/// Sums an arbitrary counter over `items`.
pub fn total_by<'a, T: 'a>(items: impl IntoIterator<Item = &'a T>, f: impl Fn(&T) -> u64) -> u64 {
    items.into_iter().map(f).sum()
}

/// Sums one engagement counter over `events`.
pub fn total_engagement<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    metric: EngagementMetric,
) -> u64 {
    total_by(events, |event| match metric {
        EngagementMetric::Views => event.engagement.views,
        EngagementMetric::QrScans => event.engagement.qr_scans,
        EngagementMetric::Confirmations => event.engagement.confirmations,
    })
}

/// `engagement / reach * 100`, two decimals. `None` for zero reach.
#[must_use]
pub fn engagement_rate(engagement: u64, reach: u64) -> Option<f64> {
    percentage(engagement, reach, 2)
}

/// Figures for the management dashboard.
#[must_use]
pub fn dashboard(dataset: &DistrictDataset) -> DashboardStats {
    let zones = dataset.zone_ids();

    DashboardStats {
        event_count: dataset.events.len() as u64,
        events_by_zone: count_by_zone(&dataset.events, &zones),
        occupancy: occupancy(&dataset.businesses),
        alert_count: dataset.alerts.len() as u64,
        alerts_by_kind: count_by_key(&dataset.alerts, |a| a.kind),
        total_qr_scans: total_engagement(&dataset.events, EngagementMetric::QrScans),
        engagement: dataset
            .events
            .iter()
            .map(|e| EventEngagementRow {
                event_id: e.id.clone(),
                title: e.title.clone(),
                views: e.engagement.views,
                qr_scans: e.engagement.qr_scans,
                confirmations: e.engagement.confirmations,
            })
            .collect(),
    }
}

fn within_days(at: NaiveDateTime, now: NaiveDateTime, days: u32) -> bool {
    at <= now && at >= now - Duration::days(i64::from(days))
}

fn hour_band_label(start: u32) -> String {
    format!("{start}-{}h", start + HOUR_BAND_WIDTH)
}

/// Figures for the safety panel.
///
/// `risks` supplies the per-zone scores behind the safety index; pass the
/// output of [`crate::risk::zone_risks`].
#[must_use]
pub fn safety_stats(
    alerts: &[SafetyAlert],
    risks: &[ZoneRisk],
    zones: &[ZoneId],
    now: NaiveDateTime,
    config: &EngineConfig,
) -> SafetyStats {
    let total = alerts.len() as u64;
    let resolved = alerts
        .iter()
        .filter(|a| a.status == AlertStatus::Resolved)
        .count() as u64;

    let mut bands: Vec<u32> = alerts
        .iter()
        .map(|a| a.timestamp.hour() / HOUR_BAND_WIDTH * HOUR_BAND_WIDTH)
        .collect();
    bands.sort_unstable();
    let by_hour_band = count_by_key(&bands, |start| hour_band_label(*start));

    SafetyStats {
        total,
        recent: alerts
            .iter()
            .filter(|a| within_days(a.timestamp, now, config.recent_alert_days))
            .count() as u64,
        monthly: alerts
            .iter()
            .filter(|a| within_days(a.timestamp, now, config.monthly_alert_days))
            .count() as u64,
        resolved,
        active: alerts.iter().filter(|a| a.status.is_open()).count() as u64,
        verified: alerts.iter().filter(|a| a.verified).count() as u64,
        resolution_rate: percentage(resolved, total, 1),
        safety_index: safety_index(risks),
        by_kind: count_by_key(alerts, |a| a.kind),
        by_zone: count_by_zone(alerts, zones),
        by_hour_band,
    }
}

/// `round((1 - mean risk) * 100)`. `None` without scores.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn safety_index(risks: &[ZoneRisk]) -> Option<u8> {
    if risks.is_empty() {
        return None;
    }
    let mean = risks.iter().map(|r| r.score).sum::<f64>() / risks.len() as f64;
    Some(((1.0 - mean) * 100.0).round().clamp(0.0, 100.0) as u8)
}

/// Whole months from `since` to `today`, zero when `since` is later.
#[must_use]
pub fn months_between(since: NaiveDate, today: NaiveDate) -> u32 {
    let mut months =
        (today.year() - since.year()) * 12 + i32::try_from(today.month()).unwrap_or(0)
            - i32::try_from(since.month()).unwrap_or(0);
    if today.day() < since.day() {
        months -= 1;
    }
    u32::try_from(months).unwrap_or(0)
}

/// Figures for the vacancy panel.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn vacancy_stats(
    properties: &[VacantProperty],
    public_spaces: &[PublicSpace],
    today: NaiveDate,
) -> VacancyStats {
    let average_months_vacant = if properties.is_empty() {
        None
    } else {
        let months: u64 = properties
            .iter()
            .map(|p| u64::from(months_between(p.vacant_since, today)))
            .sum();
        Some(round_to(months as f64 / properties.len() as f64, 1))
    };

    VacancyStats {
        vacant_count: properties.len() as u64,
        public_space_count: public_spaces.len() as u64,
        total_vacant_area_m2: properties.iter().map(|p| p.area_m2).sum(),
        monthly_rent_lost: properties.iter().filter_map(|p| p.monthly_rent).sum(),
        average_months_vacant,
        high_potential: properties
            .iter()
            .filter(|p| p.reactivation_potential >= ReactivationPotential::High)
            .count() as u64,
        medium_potential: properties
            .iter()
            .filter(|p| p.reactivation_potential == ReactivationPotential::Medium)
            .count() as u64,
    }
}

/// Publication totals per channel, in [`Channel::all`] order.
#[must_use]
pub fn channel_stats(publications: &[Publication]) -> Vec<ChannelStats> {
    Channel::all()
        .iter()
        .map(|&channel| {
            let on_channel: Vec<&Publication> = publications
                .iter()
                .filter(|p| p.channel == channel)
                .collect();
            let reach = total_by(on_channel.iter().copied(), |p| p.reach);
            let engagement = total_by(on_channel.iter().copied(), |p| p.engagement);

            ChannelStats {
                channel,
                publications: on_channel.len() as u64,
                reach,
                engagement,
                clicks: total_by(on_channel.iter().copied(), |p| p.clicks),
                engagement_rate: engagement_rate(engagement, reach),
            }
        })
        .collect()
}

/// Forum totals.
#[must_use]
pub fn community_stats(posts: &[Post]) -> CommunityStats {
    let mut authors: Vec<&str> = posts.iter().map(|p| p.author.name.as_str()).collect();
    authors.sort_unstable();
    authors.dedup();

    CommunityStats {
        posts: posts.len() as u64,
        upvotes: total_by(posts, |p| u64::from(p.upvotes)),
        comments: total_by(posts, |p| u64::from(p.comment_count)),
        authors: authors.len() as u64,
    }
}

#[cfg(test)]
mod tests {
    use scs_conecta_district_models::{AlertKind, BusinessKind, EventCategory};

    use super::*;
    use crate::testdata::{alert, business, date, datetime, event, post, property, zones};

    fn zone_ids(count: usize) -> Vec<ZoneId> {
        zones(count).into_iter().map(|z| z.id).collect()
    }

    #[test]
    fn zone_counts_include_empty_driving_zones() {
        let events = vec![
            event("e-1", "scs-2", "2025-12-20", "10:00", "11:00"),
            event("e-2", "scs-2", "2025-12-20", "10:00", "11:00"),
            event("e-3", "scs-9", "2025-12-20", "10:00", "11:00"),
        ];
        let counts = count_by_zone(&events, &zone_ids(3));
        let pairs: Vec<_> = counts.iter().map(|c| (c.zone.as_str(), c.count)).collect();
        assert_eq!(
            pairs,
            vec![("scs-1", 0), ("scs-2", 2), ("scs-3", 0), ("scs-9", 1)]
        );
    }

    #[test]
    fn zone_counts_sum_to_item_count() {
        let events: Vec<_> = (0..7)
            .map(|i| {
                event(
                    &format!("e-{i}"),
                    &format!("scs-{}", i % 4 + 1),
                    "2025-12-20",
                    "10:00",
                    "11:00",
                )
            })
            .collect();
        let counts = count_by_zone(&events, &zone_ids(6));
        assert_eq!(counts.iter().map(|c| c.count).sum::<u64>(), 7);
        assert_eq!(counts.len(), 6);
    }

    #[test]
    fn count_by_key_keeps_first_appearance_order() {
        let mut events = vec![
            event("e-1", "scs-1", "2025-12-20", "10:00", "11:00"),
            event("e-2", "scs-1", "2025-12-20", "10:00", "11:00"),
            event("e-3", "scs-1", "2025-12-20", "10:00", "11:00"),
        ];
        events[0].category = EventCategory::Show;
        events[2].category = EventCategory::Show;
        let counts = count_by_key(&events, |e| e.category);
        assert_eq!(counts[0].label, "show");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].label, "cultural");
    }

    #[test]
    fn occupancy_rate_rounds_to_one_decimal() {
        assert_eq!(occupancy_rate(2, 1), Some(66.7));
        assert_eq!(occupancy_rate(3, 0), Some(100.0));
        assert_eq!(occupancy_rate(0, 4), Some(0.0));
        assert_eq!(occupancy_rate(0, 0), None);
    }

    #[test]
    fn occupancy_summary_counts_statuses() {
        let businesses = vec![
            business("b-1", "scs-1", BusinessKind::Bar, BusinessStatus::Active),
            business("b-2", "scs-1", BusinessKind::Vacant, BusinessStatus::Vacant),
            business("b-3", "scs-2", BusinessKind::Service, BusinessStatus::Active),
        ];
        let summary = occupancy(&businesses);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.vacant, 1);
        assert_eq!(summary.rate, Some(66.7));
        assert_eq!(occupancy(&[]).rate, None);
    }

    #[test]
    fn engagement_totals_and_rates() {
        let mut a = event("e-1", "scs-1", "2025-12-20", "10:00", "11:00");
        a.engagement.qr_scans = 40;
        a.engagement.views = 100;
        let mut b = event("e-2", "scs-1", "2025-12-20", "10:00", "11:00");
        b.engagement.qr_scans = 2;
        let events = vec![a, b];

        assert_eq!(total_engagement(&events, EngagementMetric::QrScans), 42);
        assert_eq!(total_engagement(&events, EngagementMetric::Views), 100);
        assert_eq!(total_engagement(&[], EngagementMetric::Confirmations), 0);
        assert_eq!(engagement_rate(1, 3), Some(33.33));
        assert_eq!(engagement_rate(5, 0), None);
    }

    #[test]
    fn safety_stats_windows_and_bands() {
        let now = datetime("2025-12-20T20:00:00");
        let mut verified = alert("a-1", "scs-1", "2025-12-19T22:30:00", AlertStatus::Resolved);
        verified.verified = true;
        let mut threat = alert("a-3", "scs-1", "2025-11-01T01:15:00", AlertStatus::InProgress);
        threat.kind = AlertKind::Threat;
        let alerts = vec![
            verified,
            alert("a-2", "scs-2", "2025-12-01T23:00:00", AlertStatus::Reported),
            threat,
        ];

        let stats = safety_stats(
            &alerts,
            &[],
            &zone_ids(2),
            now,
            &EngineConfig::default(),
        );
        assert_eq!(stats.total, 3);
        assert_eq!(stats.recent, 1);
        assert_eq!(stats.monthly, 2);
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.verified, 1);
        assert_eq!(stats.resolution_rate, Some(33.3));
        assert_eq!(stats.safety_index, None);
        let bands: Vec<_> = stats
            .by_hour_band
            .iter()
            .map(|b| (b.label.as_str(), b.count))
            .collect();
        assert_eq!(bands, vec![("0-4h", 1), ("20-24h", 2)]);
        assert_eq!(stats.by_zone[0].count, 2);
    }

    #[test]
    fn safety_index_from_mean_risk() {
        let risk = |score| ZoneRisk {
            zone: ZoneId::from("scs-1"),
            score,
            active_events: 0,
            open_alerts: 0,
            critical_windows: Vec::new(),
            in_critical_window: false,
            correlation: 0.0,
        };
        assert_eq!(safety_index(&[risk(0.6), risk(0.3)]), Some(55));
        assert_eq!(safety_index(&[]), None);
    }

    #[test]
    fn months_between_counts_whole_months() {
        assert_eq!(months_between(date("2025-01-15"), date("2025-12-20")), 11);
        assert_eq!(months_between(date("2025-01-25"), date("2025-12-20")), 10);
        assert_eq!(months_between(date("2026-01-01"), date("2025-12-20")), 0);
    }

    #[test]
    fn vacancy_stats_sum_area_and_rent() {
        let mut a = property("v-1", "scs-1", ReactivationPotential::VeryHigh);
        a.monthly_rent = Some(5000.0);
        a.vacant_since = date("2025-06-20");
        let mut b = property("v-2", "scs-2", ReactivationPotential::Medium);
        b.area_m2 = 50.0;
        b.vacant_since = date("2025-09-20");
        let stats = vacancy_stats(&[a, b], &[], date("2025-12-20"));

        assert_eq!(stats.vacant_count, 2);
        assert!((stats.total_vacant_area_m2 - 150.0).abs() < f64::EPSILON);
        assert!((stats.monthly_rent_lost - 5000.0).abs() < f64::EPSILON);
        assert_eq!(stats.average_months_vacant, Some(4.5));
        assert_eq!(stats.high_potential, 1);
        assert_eq!(stats.medium_potential, 1);
        assert_eq!(vacancy_stats(&[], &[], date("2025-12-20")).average_months_vacant, None);
    }

    #[test]
    fn channel_stats_cover_every_channel() {
        let publications = vec![Publication {
            id: "pub-1".to_string(),
            event_id: "evt-001".to_string(),
            channel: Channel::Instagram,
            timestamp: datetime("2025-12-18T18:30:00"),
            reach: 1200,
            engagement: 96,
            clicks: 30,
        }];
        let stats = channel_stats(&publications);
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].engagement_rate, Some(8.0));
        assert_eq!(stats[1].publications, 0);
        assert_eq!(stats[1].engagement_rate, None);
    }

    #[test]
    fn community_stats_count_distinct_authors() {
        let mut a = post("p-1", false, 3, 0, "2025-12-19T10:00:00");
        a.comment_count = 2;
        let mut b = post("p-2", false, 4, 1, "2025-12-19T10:00:00");
        b.author = a.author.clone();
        let c = post("p-3", false, 0, 0, "2025-12-19T10:00:00");
        let stats = community_stats(&[a, b, c]);
        assert_eq!(stats.posts, 3);
        assert_eq!(stats.upvotes, 7);
        assert_eq!(stats.comments, 2);
        assert_eq!(stats.authors, 2);
    }
}
