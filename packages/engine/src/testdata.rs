//! Builders for small in-memory datasets used by the unit tests.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use scs_conecta_district_models::{
    AlertCorrelation, AlertKind, AlertStatus, Author, Business, BusinessKind, BusinessStatus,
    Engagement, Event, EventCategory, HighlightLevel, Post, PostCategory, PropertyKind,
    ReactivationPotential, RiskLevel, SafetyAlert, VacantProperty, WeeklyHours, Zone, ZoneId,
    ZoneRiskProfile,
};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
}

pub fn tags(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

pub fn zones(count: usize) -> Vec<Zone> {
    (1..=count)
        .map(|n| Zone {
            id: ZoneId::new(format!("scs-{n}")),
            name: format!("SCS Quadra {n}"),
        })
        .collect()
}

pub fn event(id: &str, zone: &str, day: &str, start: &str, end: &str) -> Event {
    Event {
        id: id.to_string(),
        title: format!("Event {id}"),
        description: String::new(),
        zone: ZoneId::from(zone),
        date: date(day),
        start_time: start.parse().unwrap(),
        end_time: end.parse().unwrap(),
        category: EventCategory::Cultural,
        audience: BTreeSet::new(),
        support_needs: BTreeSet::new(),
        highlight: HighlightLevel::Medium,
        engagement: Engagement::default(),
        link: None,
    }
}

pub fn business(id: &str, zone: &str, kind: BusinessKind, status: BusinessStatus) -> Business {
    Business {
        id: id.to_string(),
        name: format!("Business {id}"),
        kind,
        zone: ZoneId::from(zone),
        open_at_night: false,
        hours: WeeklyHours::default(),
        status,
        address: None,
        description: None,
        phone: None,
    }
}

/// A business open every day within `window` (e.g. `"08:00-18:00"`).
pub fn open_business(id: &str, zone: &str, window: &str) -> Business {
    let hours: WeeklyHours = toml::from_str(&format!(
        r#"
        monday = "{window}"
        tuesday = "{window}"
        wednesday = "{window}"
        thursday = "{window}"
        friday = "{window}"
        saturday = "{window}"
        sunday = "{window}"
        "#
    ))
    .unwrap();
    Business {
        hours,
        ..business(id, zone, BusinessKind::Bar, BusinessStatus::Active)
    }
}

pub fn alert(id: &str, zone: &str, at: &str, status: AlertStatus) -> SafetyAlert {
    SafetyAlert {
        id: id.to_string(),
        kind: AlertKind::SuspiciousActivity,
        zone: ZoneId::from(zone),
        timestamp: datetime(at),
        status,
        description: String::new(),
        anonymous: true,
        verified: false,
        correlation: AlertCorrelation::default(),
    }
}

pub fn profile(zone: &str, level: RiskLevel) -> ZoneRiskProfile {
    ZoneRiskProfile {
        zone: ZoneId::from(zone),
        nighttime_risk: level,
        critical_windows: Vec::new(),
        event_correlation: 0.5,
    }
}

pub fn post(id: &str, pinned: bool, upvotes: u32, downvotes: u32, at: &str) -> Post {
    Post {
        id: id.to_string(),
        title: format!("Post {id}"),
        content: String::new(),
        author: Author {
            name: format!("author-{id}"),
            verified: false,
            role: "citizen".to_string(),
        },
        category: PostCategory::Discussion,
        zone: None,
        pinned,
        upvotes,
        downvotes,
        comment_count: 0,
        timestamp: datetime(at),
        tags: BTreeSet::new(),
    }
}

pub fn property(id: &str, zone: &str, potential: ReactivationPotential) -> VacantProperty {
    VacantProperty {
        id: id.to_string(),
        name: format!("Property {id}"),
        kind: PropertyKind::Commercial,
        zone: ZoneId::from(zone),
        area_m2: 100.0,
        vacant_since: date("2025-01-01"),
        monthly_rent: None,
        reactivation_potential: potential,
        suggested_uses: BTreeSet::new(),
        security_risk: RiskLevel::Low,
    }
}
