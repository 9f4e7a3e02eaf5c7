//! Consistency checks applied to every loaded dataset.

use std::collections::BTreeSet;

use scs_conecta_district_models::{DistrictDataset, ZoneId};

use crate::FixtureError;

fn invalid(message: String) -> FixtureError {
    FixtureError::Invalid { message }
}

/// Ids must be non-empty and unique within one collection.
fn check_ids<'a>(kind: &str, ids: impl IntoIterator<Item = &'a str>) -> Result<(), FixtureError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(invalid(format!("{kind} with an empty id")));
        }
        if !seen.insert(id) {
            return Err(invalid(format!("Duplicate {kind} id '{id}'")));
        }
    }
    Ok(())
}

/// Zone references must name a zone from the registry.
fn check_zones<'a>(
    kind: &str,
    known: &BTreeSet<&ZoneId>,
    refs: impl IntoIterator<Item = (&'a str, &'a ZoneId)>,
) -> Result<(), FixtureError> {
    for (id, zone) in refs {
        if !known.contains(zone) {
            return Err(invalid(format!("{kind} '{id}' references unknown zone '{zone}'")));
        }
    }
    Ok(())
}

/// Checks ids, zone references and numeric ranges across `dataset`.
///
/// # Errors
///
/// Returns [`FixtureError::Invalid`] describing the first problem found.
pub fn validate(dataset: &DistrictDataset) -> Result<(), FixtureError> {
    check_ids("Zone", dataset.zones.iter().map(|z| z.id.as_str()))?;
    if let Some(zone) = dataset.zones.iter().find(|z| z.name.trim().is_empty()) {
        return Err(invalid(format!("Zone '{}' has no name", zone.id)));
    }
    let known: BTreeSet<&ZoneId> = dataset.zones.iter().map(|z| &z.id).collect();

    check_ids("Event", dataset.events.iter().map(|e| e.id.as_str()))?;
    check_ids("Business", dataset.businesses.iter().map(|b| b.id.as_str()))?;
    check_ids("Alert", dataset.alerts.iter().map(|a| a.id.as_str()))?;
    check_ids("Property", dataset.vacant_properties.iter().map(|p| p.id.as_str()))?;
    check_ids("Public space", dataset.public_spaces.iter().map(|s| s.id.as_str()))?;
    check_ids("Post", dataset.posts.iter().map(|p| p.id.as_str()))?;
    check_ids("Publication", dataset.publications.iter().map(|p| p.id.as_str()))?;
    check_ids(
        "Risk profile",
        dataset.risk_profiles.iter().map(|p| p.zone.as_str()),
    )?;

    check_zones(
        "Event",
        &known,
        dataset.events.iter().map(|e| (e.id.as_str(), &e.zone)),
    )?;
    check_zones(
        "Business",
        &known,
        dataset.businesses.iter().map(|b| (b.id.as_str(), &b.zone)),
    )?;
    check_zones(
        "Alert",
        &known,
        dataset.alerts.iter().map(|a| (a.id.as_str(), &a.zone)),
    )?;
    check_zones(
        "Property",
        &known,
        dataset
            .vacant_properties
            .iter()
            .map(|p| (p.id.as_str(), &p.zone)),
    )?;
    check_zones(
        "Public space",
        &known,
        dataset.public_spaces.iter().map(|s| (s.id.as_str(), &s.zone)),
    )?;
    check_zones(
        "Post",
        &known,
        dataset
            .posts
            .iter()
            .filter_map(|p| p.zone.as_ref().map(|zone| (p.id.as_str(), zone))),
    )?;
    check_zones(
        "Risk profile",
        &known,
        dataset.risk_profiles.iter().map(|p| (p.zone.as_str(), &p.zone)),
    )?;

    for profile in &dataset.risk_profiles {
        if !(0.0..=1.0).contains(&profile.event_correlation) {
            return Err(invalid(format!(
                "Risk profile '{}' has correlation {} outside [0, 1]",
                profile.zone, profile.event_correlation
            )));
        }
    }

    for property in &dataset.vacant_properties {
        if !property.area_m2.is_finite() || property.area_m2 < 0.0 {
            return Err(invalid(format!(
                "Property '{}' has invalid area {}",
                property.id, property.area_m2
            )));
        }
    }

    let event_ids: BTreeSet<&str> = dataset.events.iter().map(|e| e.id.as_str()).collect();
    if let Some(publication) = dataset
        .publications
        .iter()
        .find(|p| !event_ids.contains(p.event_id.as_str()))
    {
        log::warn!(
            "Publication '{}' references unlisted event '{}'",
            publication.id,
            publication.event_id
        );
    }

    log::trace!("Validated dataset with {} zones", dataset.zones.len());
    Ok(())
}
