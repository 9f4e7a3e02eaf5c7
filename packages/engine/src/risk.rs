//! Heuristic nighttime risk per zone.

use chrono::NaiveDateTime;
use scs_conecta_district_models::{ClockTime, Event, RiskLevel, SafetyAlert, ZoneRiskProfile};
use scs_conecta_engine_models::ZoneRisk;

use crate::timing::is_active_at;

/// Base score in hundredths for each nighttime risk level.
const fn base_hundredths(level: RiskLevel) -> i32 {
    match level {
        RiskLevel::High => 70,
        RiskLevel::Medium => 40,
        RiskLevel::Low => 20,
    }
}

/// Adjustment in hundredths applied when a zone does or does not host an
/// active event.
const EVENT_ADJUSTMENT: i32 = 10;

/// Predicted risk in `[0, 1]` for a zone with `level` nighttime risk and
/// `active_events` events running.
///
/// The base (`0.7` / `0.4` / `0.2`) moves up `0.1` when any event is active
/// and down `0.1` when none is. Computed in hundredths so results are exact
/// two-decimal values.
#[must_use]
pub fn risk_score(level: RiskLevel, active_events: u64) -> f64 {
    let adjustment = if active_events > 0 {
        EVENT_ADJUSTMENT
    } else {
        -EVENT_ADJUSTMENT
    };
    let hundredths = (base_hundredths(level) + adjustment).clamp(0, 100);
    f64::from(hundredths) / 100.0
}

/// One [`ZoneRisk`] per profile, in profile order.
///
/// Open alerts are counted and reported but do not change the score.
#[must_use]
pub fn zone_risks(
    profiles: &[ZoneRiskProfile],
    events: &[Event],
    alerts: &[SafetyAlert],
    now: NaiveDateTime,
) -> Vec<ZoneRisk> {
    let time = ClockTime::from(now.time());

    profiles
        .iter()
        .map(|profile| {
            let active_events = events
                .iter()
                .filter(|e| e.zone == profile.zone && is_active_at(e, now))
                .count() as u64;
            let open_alerts = alerts
                .iter()
                .filter(|a| a.zone == profile.zone && a.status.is_open())
                .count() as u64;

            ZoneRisk {
                zone: profile.zone.clone(),
                score: risk_score(profile.nighttime_risk, active_events),
                active_events,
                open_alerts,
                critical_windows: profile.critical_windows.clone(),
                in_critical_window: profile.critical_windows.iter().any(|w| w.contains(time)),
                correlation: profile.event_correlation,
            }
        })
        .collect()
}
