//! The "right now in the district" snapshot.

use chrono::{Duration, NaiveDateTime, Timelike as _};
use scs_conecta_district_models::{ClockTime, DistrictDataset, ZoneId};
use scs_conecta_engine_models::{
    DistrictSnapshot, LightingLevel, Liveliness, MovementLevel, SecurityPresence,
};

use crate::EngineConfig;
use crate::timing::is_active_at;

// Scores below are in hundredths.
const EVENT_MOVEMENT: u64 = 20;
const CHECK_IN_MOVEMENT: u64 = 5;
const CHECK_IN_MOVEMENT_CAP: u64 = 40;
const LIVELY_THRESHOLD: u64 = 60;
const MODERATE_THRESHOLD: u64 = 30;
const EVENT_LIFE_BONUS: u64 = 20;
const BUSINESS_LIFE_BONUS: u64 = 10;

/// More open businesses than this earn the urban-life bonus.
const BUSY_BUSINESS_COUNT: u64 = 5;

/// More recent alerts than this call for reinforced security.
const REINFORCED_ALERT_COUNT: u64 = 2;

/// Counts the inputs the snapshot is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveCounts {
    /// Events running now.
    pub active_events: u64,
    /// Businesses open now.
    pub open_businesses: u64,
    /// Unresolved alerts in the lookback window.
    pub recent_alerts: u64,
    /// Caller-supplied check-ins.
    pub check_ins: u64,
}

impl LiveCounts {
    /// Gathers counts for `zone` (all zones when `None`) at `now`.
    #[must_use]
    pub fn gather(
        dataset: &DistrictDataset,
        zone: Option<&ZoneId>,
        now: NaiveDateTime,
        check_ins: u64,
        config: &EngineConfig,
    ) -> Self {
        let in_zone = |candidate: &ZoneId| zone.is_none_or(|z| z == candidate);
        let lookback = now - Duration::hours(i64::from(config.snapshot_alert_hours));

        Self {
            active_events: dataset
                .events
                .iter()
                .filter(|e| in_zone(&e.zone) && is_active_at(e, now))
                .count() as u64,
            open_businesses: dataset
                .businesses
                .iter()
                .filter(|b| in_zone(&b.zone) && b.hours.is_open_at(now))
                .count() as u64,
            recent_alerts: dataset
                .alerts
                .iter()
                .filter(|a| {
                    in_zone(&a.zone)
                        && a.status.is_open()
                        && a.timestamp >= lookback
                        && a.timestamp <= now
                })
                .count() as u64,
            check_ins,
        }
    }

    /// Movement score in hundredths.
    #[must_use]
    pub fn movement_hundredths(&self) -> u64 {
        self.active_events
            .saturating_mul(EVENT_MOVEMENT)
            .saturating_add(
                self.check_ins
                    .saturating_mul(CHECK_IN_MOVEMENT)
                    .min(CHECK_IN_MOVEMENT_CAP),
            )
    }
}

/// Describes `zone` (or the whole district) at `now`.
#[must_use]
pub fn snapshot(
    dataset: &DistrictDataset,
    zone: Option<&ZoneId>,
    now: NaiveDateTime,
    check_ins: u64,
    config: &EngineConfig,
) -> DistrictSnapshot {
    let counts = LiveCounts::gather(dataset, zone, now, check_ins, config);
    let place = zone.map_or("SCS", |z| dataset.zone_name(z)).to_string();
    describe(zone.cloned(), &place, now, counts, config)
}

/// Derives the snapshot fields from raw counts.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn describe(
    zone: Option<ZoneId>,
    place: &str,
    now: NaiveDateTime,
    counts: LiveCounts,
    config: &EngineConfig,
) -> DistrictSnapshot {
    let movement = counts.movement_hundredths();
    let events = counts.active_events;

    let (status, movement_level, estimated_people) = if movement >= LIVELY_THRESHOLD {
        (Liveliness::Lively, MovementLevel::High, events.saturating_mul(20).saturating_add(50))
    } else if movement >= MODERATE_THRESHOLD {
        (Liveliness::Moderate, MovementLevel::Medium, events.saturating_mul(10).saturating_add(20))
    } else {
        (Liveliness::Quiet, MovementLevel::Low, 5)
    };

    let security = if counts.recent_alerts > REINFORCED_ALERT_COUNT {
        SecurityPresence::Reinforced
    } else if counts.recent_alerts > 0 || events > 0 {
        SecurityPresence::Present
    } else {
        SecurityPresence::Absent
    };

    let after_dark = now.hour() >= u32::from(config.nighttime_start_hour);
    let lighting = if after_dark && events > 0 {
        LightingLevel::Reinforced
    } else {
        LightingLevel::Adequate
    };

    let mut life = movement;
    if events > 0 {
        life = life.saturating_add(EVENT_LIFE_BONUS);
    }
    if counts.open_businesses > BUSY_BUSINESS_COUNT {
        life = life.saturating_add(BUSINESS_LIFE_BONUS);
    }
    let urban_life_score = life.min(100) as f64 / 100.0;

    let recommendation = match status {
        Liveliness::Lively => {
            format!("Great time to visit! {events} active event(s) in {place}")
        }
        Liveliness::Moderate => format!(
            "Moderate movement. {} open business(es) available",
            counts.open_businesses
        ),
        Liveliness::Quiet => {
            "Quiet area. Good for a daytime walk or scheduled events".to_string()
        }
    };

    DistrictSnapshot {
        zone,
        at: ClockTime::from(now.time()),
        status,
        active_events: events,
        open_businesses: counts.open_businesses,
        recent_alerts: counts.recent_alerts,
        movement: movement_level,
        estimated_people,
        security,
        lighting,
        urban_life_score,
        recommendation,
    }
}
