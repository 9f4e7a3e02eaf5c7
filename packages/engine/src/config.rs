//! Engine thresholds and communication settings.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration.

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Tunable thresholds used by aggregation, recommendation and snapshot
/// operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Occupancy percentage below which an occupancy recommendation fires.
    pub occupancy_target_pct: f64,
    /// First hour (24h clock) counted as nighttime.
    pub nighttime_start_hour: u8,
    /// Size of the short "recent alerts" window in days.
    pub recent_alert_days: u32,
    /// Size of the long "recent alerts" window in days.
    pub monthly_alert_days: u32,
    /// How far back the live snapshot looks for alerts, in hours.
    pub snapshot_alert_hours: u32,
    /// Suggested polling interval for live display surfaces.
    pub refresh_interval_secs: u64,
    /// Hashtags appended to generated social-media captions.
    pub hashtags: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            occupancy_target_pct: 70.0,
            nighttime_start_hour: 18,
            recent_alert_days: 7,
            monthly_alert_days: 30,
            snapshot_alert_hours: 24,
            refresh_interval_secs: 30,
            hashtags: [
                "#SCSConecta",
                "#SetorComercialSul",
                "#Brasilia",
                "#EventosDF",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl EngineConfig {
    /// Parses a TOML document and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the document does not parse
    /// or fails [`Self::validate`].
    pub fn from_toml_str(contents: &str) -> Result<Self, EngineError> {
        let config: Self = toml::from_str(contents).map_err(|e| EngineError::InvalidConfig {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every threshold is in range.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(0.0..=100.0).contains(&self.occupancy_target_pct) {
            return Err(invalid(format!(
                "occupancy_target_pct must be within 0..=100, got {}",
                self.occupancy_target_pct
            )));
        }
        if self.nighttime_start_hour > 23 {
            return Err(invalid(format!(
                "nighttime_start_hour must be within 0..=23, got {}",
                self.nighttime_start_hour
            )));
        }
        if self.recent_alert_days == 0 || self.monthly_alert_days == 0 {
            return Err(invalid("alert windows must be at least one day".to_string()));
        }
        if self.recent_alert_days > self.monthly_alert_days {
            return Err(invalid(format!(
                "recent_alert_days ({}) exceeds monthly_alert_days ({})",
                self.recent_alert_days, self.monthly_alert_days
            )));
        }
        if self.snapshot_alert_hours == 0 {
            return Err(invalid(
                "snapshot_alert_hours must be at least one hour".to_string(),
            ));
        }
        if self.refresh_interval_secs == 0 {
            return Err(invalid(
                "refresh_interval_secs must be at least one second".to_string(),
            ));
        }
        if let Some(tag) = self.hashtags.iter().find(|tag| !tag.starts_with('#')) {
            return Err(invalid(format!("hashtag '{tag}' must start with '#'")));
        }
        Ok(())
    }
}

const fn invalid(message: String) -> EngineError {
    EngineError::InvalidConfig { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!((config.occupancy_target_pct - 70.0).abs() < f64::EPSILON);
        assert_eq!(config.nighttime_start_hour, 18);
        assert_eq!(config.refresh_interval_secs, 30);
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config = EngineConfig::from_toml_str(
            r##"
            occupancy_target_pct = 80.0
            hashtags = ["#Quadra1"]
            "##,
        )
        .unwrap();
        assert!((config.occupancy_target_pct - 80.0).abs() < f64::EPSILON);
        assert_eq!(config.hashtags, vec!["#Quadra1".to_string()]);
        assert_eq!(config.recent_alert_days, 7);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            EngineConfig::from_toml_str("nighttime_start_hour = 24"),
            Err(EngineError::InvalidConfig { .. })
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("occupancy_target_pct = 120.0"),
            Err(EngineError::InvalidConfig { .. })
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("recent_alert_days = 40"),
            Err(EngineError::InvalidConfig { .. })
        ));
        assert!(matches!(
            EngineConfig::from_toml_str(r#"hashtags = ["SCS"]"#),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            EngineConfig::from_toml_str("occupancy_target_pct = \"high\""),
            Err(EngineError::InvalidConfig { .. })
        ));
    }
}
