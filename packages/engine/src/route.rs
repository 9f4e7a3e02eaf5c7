//! Walking route suggestions through the district's zones.

use scs_conecta_district_models::Zone;
use scs_conecta_engine_models::{RouteRequest, RouteStop, StopKind};

use crate::EngineError;

/// Minutes between consecutive stops.
pub const MINUTES_PER_STOP: u32 = 15;

/// Stops used when the request only carries a free-text description, as
/// `(name, zone index)`.
const DEFAULT_STOPS: &[(&str, usize)] = &[
    ("Vintage clothing store", 1),
    ("Alternative café", 2),
    ("Art gallery", 4),
];

/// Plans a route starting and ending in the first zone.
///
/// Interest `i` becomes a stop in zone `i % zones.len()` at
/// `(i + 1) * 15` minutes. Without interests, a non-empty description yields
/// the default stops.
///
/// # Errors
///
/// * [`EngineError::EmptyRouteRequest`] if the request has neither
///   interests nor a description
/// * [`EngineError::NoZones`] if `zones` is empty
pub fn plan_route(request: &RouteRequest, zones: &[Zone]) -> Result<Vec<RouteStop>, EngineError> {
    let interests: Vec<&str> = request
        .interests
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .collect();
    let has_description = request
        .description
        .as_deref()
        .is_some_and(|d| !d.trim().is_empty());

    if interests.is_empty() && !has_description {
        return Err(EngineError::EmptyRouteRequest);
    }
    let first = zones.first().ok_or(EngineError::NoZones)?;

    let start_name = request
        .start
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("Starting point");

    let mut stops = vec![RouteStop {
        name: start_name.to_string(),
        zone: first.id.clone(),
        minute: 0,
        kind: StopKind::Start,
    }];

    let middle: Vec<(String, usize)> = if interests.is_empty() {
        DEFAULT_STOPS
            .iter()
            .map(|(name, zone)| ((*name).to_string(), *zone))
            .collect()
    } else {
        interests
            .iter()
            .enumerate()
            .map(|(index, interest)| ((*interest).to_string(), index))
            .collect()
    };

    for (position, (label, zone_index)) in (1_u32..).zip(middle) {
        let zone = &zones[zone_index % zones.len()];
        stops.push(RouteStop {
            name: format!("{label} - {}", zone.name),
            zone: zone.id.clone(),
            minute: position * MINUTES_PER_STOP,
            kind: StopKind::Stop,
        });
    }

    stops.push(RouteStop {
        name: "Return to start".to_string(),
        zone: first.id.clone(),
        minute: request.minutes_available,
        kind: StopKind::End,
    });

    log::debug!("Planned route with {} stop(s)", stops.len());
    Ok(stops)
}
