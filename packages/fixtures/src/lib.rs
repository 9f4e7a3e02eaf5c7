#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Bundled SCS Conecta district fixtures.
//!
//! The district's data ships as TOML files embedded at compile time (see
//! [`registry`]). [`StaticRepository`] exposes them through the
//! [`DistrictRepository`] trait, which is the seam a future persistent
//! backend would implement. A fixtures directory can override any embedded
//! file at runtime.

pub mod registry;
pub mod validate;

use std::path::{Path, PathBuf};

use scs_conecta_district_models::{
    Business, ChannelMetrics, DistrictDataset, Event, Post, Publication, PublicSpace,
    SafetyAlert, VacantProperty, Zone, ZoneRiskProfile,
};
use thiserror::Error;

/// Errors from loading or validating fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// A fixture file could not be read.
    #[error("Failed to read fixture {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A fixture file is not valid fixture TOML.
    #[error("Failed to parse fixture {file}: {source}")]
    Parse {
        /// Registry name of the file.
        file: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// The combined data is inconsistent.
    #[error("Invalid fixture data: {message}")]
    Invalid {
        /// Description of the first problem found.
        message: String,
    },
}

/// Read access to the district's collections.
pub trait DistrictRepository {
    /// The full dataset.
    fn dataset(&self) -> &DistrictDataset;

    /// Zone registry.
    fn zones(&self) -> &[Zone] {
        &self.dataset().zones
    }

    /// Scheduled events.
    fn events(&self) -> &[Event] {
        &self.dataset().events
    }

    /// Tracked businesses.
    fn businesses(&self) -> &[Business] {
        &self.dataset().businesses
    }

    /// Safety alerts.
    fn alerts(&self) -> &[SafetyAlert] {
        &self.dataset().alerts
    }

    /// Zone risk profiles.
    fn risk_profiles(&self) -> &[ZoneRiskProfile] {
        &self.dataset().risk_profiles
    }

    /// Vacant properties.
    fn vacant_properties(&self) -> &[VacantProperty] {
        &self.dataset().vacant_properties
    }

    /// Public spaces.
    fn public_spaces(&self) -> &[PublicSpace] {
        &self.dataset().public_spaces
    }

    /// Forum posts.
    fn posts(&self) -> &[Post] {
        &self.dataset().posts
    }

    /// Publication history.
    fn publications(&self) -> &[Publication] {
        &self.dataset().publications
    }

    /// Channel audience metrics.
    fn channel_metrics(&self) -> &[ChannelMetrics] {
        &self.dataset().channel_metrics
    }

    /// Event with id `id`, if any.
    fn event(&self, id: &str) -> Option<&Event> {
        self.events().iter().find(|e| e.id == id)
    }
}

/// Repository over an in-memory dataset loaded once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticRepository {
    dataset: DistrictDataset,
}

impl StaticRepository {
    /// Repository over the embedded fixtures.
    ///
    /// # Panics
    ///
    /// Panics if the embedded fixtures are invalid, see
    /// [`registry::bundled_dataset`].
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            dataset: registry::bundled_dataset(),
        }
    }

    /// Repository over the fixtures in `dir`, falling back to the embedded
    /// copy for missing files.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] if a file cannot be read, parsed or validated.
    pub fn from_dir(dir: &Path) -> Result<Self, FixtureError> {
        Ok(Self {
            dataset: registry::load_dataset_from_dir(dir)?,
        })
    }

    /// Repository over an already-built dataset.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Invalid`] if the dataset fails validation.
    pub fn from_dataset(dataset: DistrictDataset) -> Result<Self, FixtureError> {
        validate::validate(&dataset)?;
        Ok(Self { dataset })
    }

    /// Consumes the repository, returning its dataset.
    #[must_use]
    pub fn into_dataset(self) -> DistrictDataset {
        self.dataset
    }
}

impl DistrictRepository for StaticRepository {
    fn dataset(&self) -> &DistrictDataset {
        &self.dataset
    }
}
