//! Compile-time registry of the bundled district fixtures.
//!
//! Each entry is a `(file_name, toml_content)` pair embedded via
//! `include_str!`. A fixture file may hold any of the dataset's collections
//! as arrays of tables (`[[events]]`, `[[zones]]`, ...); every file's
//! collections are appended to the dataset in registry order.

use std::path::Path;

use scs_conecta_district_models::{
    Business, ChannelMetrics, DistrictDataset, Event, Post, Publication, PublicSpace,
    SafetyAlert, VacantProperty, Zone, ZoneRiskProfile,
};
use serde::Deserialize;

use crate::FixtureError;
use crate::validate::validate;

/// Number of registered fixture files. Enforced by a test.
#[cfg(test)]
const EXPECTED_FIXTURE_COUNT: usize = 8;

/// Embedded fixture files, in load order.
pub const FIXTURE_TOMLS: &[(&str, &str)] = &[
    ("zones.toml", include_str!("../data/zones.toml")),
    ("events.toml", include_str!("../data/events.toml")),
    ("businesses.toml", include_str!("../data/businesses.toml")),
    ("alerts.toml", include_str!("../data/alerts.toml")),
    ("risk_profiles.toml", include_str!("../data/risk_profiles.toml")),
    ("vacancy.toml", include_str!("../data/vacancy.toml")),
    ("community.toml", include_str!("../data/community.toml")),
    ("communication.toml", include_str!("../data/communication.toml")),
];

/// The collections one fixture file may contribute.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FixtureFile {
    zones: Vec<Zone>,
    events: Vec<Event>,
    businesses: Vec<Business>,
    alerts: Vec<SafetyAlert>,
    risk_profiles: Vec<ZoneRiskProfile>,
    vacant_properties: Vec<VacantProperty>,
    public_spaces: Vec<PublicSpace>,
    posts: Vec<Post>,
    publications: Vec<Publication>,
    channel_metrics: Vec<ChannelMetrics>,
}

impl FixtureFile {
    fn append_to(self, dataset: &mut DistrictDataset) {
        dataset.zones.extend(self.zones);
        dataset.events.extend(self.events);
        dataset.businesses.extend(self.businesses);
        dataset.alerts.extend(self.alerts);
        dataset.risk_profiles.extend(self.risk_profiles);
        dataset.vacant_properties.extend(self.vacant_properties);
        dataset.public_spaces.extend(self.public_spaces);
        dataset.posts.extend(self.posts);
        dataset.publications.extend(self.publications);
        dataset.channel_metrics.extend(self.channel_metrics);
    }
}

/// Parses one fixture document and appends its collections to `dataset`.
///
/// # Errors
///
/// Returns [`FixtureError::Parse`] if the document is not valid fixture TOML.
pub fn append_fixture(
    file: &str,
    contents: &str,
    dataset: &mut DistrictDataset,
) -> Result<(), FixtureError> {
    let parsed: FixtureFile =
        toml::de::from_str(contents).map_err(|source| FixtureError::Parse {
            file: file.to_string(),
            source,
        })?;
    parsed.append_to(dataset);
    Ok(())
}

/// Parses and validates the embedded fixtures.
///
/// # Errors
///
/// Returns [`FixtureError`] if any embedded file fails to parse or the
/// combined data fails validation.
pub fn embedded_dataset() -> Result<DistrictDataset, FixtureError> {
    let mut dataset = DistrictDataset::default();
    for (file, contents) in FIXTURE_TOMLS {
        append_fixture(file, contents, &mut dataset)?;
    }
    validate(&dataset)?;
    Ok(dataset)
}

/// Returns the bundled district dataset.
///
/// # Panics
///
/// Panics if the embedded fixtures fail to parse or validate. Since these are
/// compile-time constants, failures indicate a development error and are
/// caught by this crate's tests.
#[must_use]
pub fn bundled_dataset() -> DistrictDataset {
    embedded_dataset().unwrap_or_else(|e| panic!("Bundled fixtures are invalid: {e}"))
}

/// Loads fixtures from `dir`, one file per registry entry.
///
/// Files missing from `dir` fall back to the bundled copy. The combined data
/// is validated before it is returned.
///
/// # Errors
///
/// * [`FixtureError::Io`] if a present file cannot be read
/// * [`FixtureError::Parse`] if a file is not valid fixture TOML
/// * [`FixtureError::Invalid`] if the combined data fails validation
pub fn load_dataset_from_dir(dir: &Path) -> Result<DistrictDataset, FixtureError> {
    let mut dataset = DistrictDataset::default();

    for (file, bundled) in FIXTURE_TOMLS {
        let path = dir.join(file);
        if path.is_file() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|source| FixtureError::Io { path: path.clone(), source })?;
            log::debug!("Loading fixture {}", path.display());
            append_fixture(file, &contents, &mut dataset)?;
        } else {
            log::warn!(
                "Fixture {} not found, using the bundled {file}",
                path.display()
            );
            append_fixture(file, bundled, &mut dataset)?;
        }
    }

    validate(&dataset)?;
    log::info!(
        "Loaded fixtures from {}: {} zones, {} events, {} businesses, {} alerts",
        dir.display(),
        dataset.zones.len(),
        dataset.events.len(),
        dataset.businesses.len(),
        dataset.alerts.len()
    );
    Ok(dataset)
}
