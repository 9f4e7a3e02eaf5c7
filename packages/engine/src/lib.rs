#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pure query operations over SCS Conecta district data.
//!
//! [`DistrictDataEngine`] borrows a loaded [`DistrictDataset`] and an
//! [`EngineConfig`] and answers every question the display surfaces ask:
//! filtered lists, relative-time labels, dashboard aggregates, per-zone risk,
//! recommendations, share content, route plans and the live snapshot. It
//! performs no I/O and holds no mutable state; "now" is always an argument.

pub mod aggregate;
pub mod config;
pub mod filter;
pub mod live;
pub mod recommend;
pub mod risk;
pub mod route;
pub mod share;
pub mod timing;

#[cfg(test)]
mod testdata;

use chrono::NaiveDateTime;
use scs_conecta_district_models::{
    Business, DistrictDataset, Event, Post, SafetyAlert, VacantProperty, ZoneId,
};
use scs_conecta_engine_models::{
    AlertFilter, BusinessFilter, ChannelStats, CommunityStats, DashboardStats, DistrictSnapshot,
    EventFilter, PostQuery, PropertyFilter, Recommendation, RouteRequest, RouteStop, SafetyStats,
    ShareContent, TimeStatus, VacancyStats, ZoneRisk,
};
use thiserror::Error;

pub use config::EngineConfig;

/// Errors returned by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The event has no public link to share.
    #[error("Event '{event_id}' has no link to share")]
    MissingLink {
        /// Event that was requested.
        event_id: String,
    },

    /// A route request carried neither interests nor a description.
    #[error("Route request needs at least one interest or a description")]
    EmptyRouteRequest,

    /// The dataset has no zones to plan through.
    #[error("No zones available")]
    NoZones,

    /// No event with the requested id exists.
    #[error("Unknown event '{event_id}'")]
    UnknownEvent {
        /// Event that was requested.
        event_id: String,
    },

    /// Configuration failed to parse or validate.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what went wrong.
        message: String,
    },
}

/// Read-only query facade over one dataset.
#[derive(Debug, Clone, Copy)]
pub struct DistrictDataEngine<'a> {
    dataset: &'a DistrictDataset,
    config: &'a EngineConfig,
}

impl<'a> DistrictDataEngine<'a> {
    /// Creates an engine over `dataset`.
    #[must_use]
    pub const fn new(dataset: &'a DistrictDataset, config: &'a EngineConfig) -> Self {
        Self { dataset, config }
    }

    /// The dataset being queried.
    #[must_use]
    pub const fn dataset(&self) -> &'a DistrictDataset {
        self.dataset
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &'a EngineConfig {
        self.config
    }

    /// Events matching `filter`, in dataset order.
    #[must_use]
    pub fn events(&self, filter: &EventFilter) -> Vec<&'a Event> {
        filter::select(&self.dataset.events, filter)
    }

    /// Businesses matching `filter`, in dataset order.
    #[must_use]
    pub fn businesses(&self, filter: &BusinessFilter) -> Vec<&'a Business> {
        filter::select(&self.dataset.businesses, filter)
    }

    /// Safety alerts matching `filter`, in dataset order.
    #[must_use]
    pub fn alerts(&self, filter: &AlertFilter) -> Vec<&'a SafetyAlert> {
        filter::select(&self.dataset.alerts, filter)
    }

    /// Vacant properties matching `filter`, in dataset order.
    #[must_use]
    pub fn properties(&self, filter: &PropertyFilter) -> Vec<&'a VacantProperty> {
        filter::select(&self.dataset.vacant_properties, filter)
    }

    /// Forum posts matching `query`, in the requested order.
    #[must_use]
    pub fn posts(&self, query: &PostQuery) -> Vec<&'a Post> {
        filter::query_posts(&self.dataset.posts, query)
    }

    /// Looks up an event by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownEvent`] if no event has that id.
    pub fn event(&self, event_id: &str) -> Result<&'a Event, EngineError> {
        self.dataset
            .events
            .iter()
            .find(|e| e.id == event_id)
            .ok_or_else(|| EngineError::UnknownEvent {
                event_id: event_id.to_string(),
            })
    }

    /// Relative-time status of `event`.
    #[must_use]
    pub fn classify_event(&self, event: &Event, now: NaiveDateTime) -> TimeStatus {
        timing::classify(event, now)
    }

    /// Management dashboard figures.
    #[must_use]
    pub fn dashboard(&self) -> DashboardStats {
        aggregate::dashboard(self.dataset)
    }

    /// Safety panel figures at `now`.
    #[must_use]
    pub fn safety(&self, now: NaiveDateTime) -> SafetyStats {
        let risks = self.zone_risks(now);
        aggregate::safety_stats(
            &self.dataset.alerts,
            &risks,
            &self.dataset.zone_ids(),
            now,
            self.config,
        )
    }

    /// Vacancy panel figures as of `now`.
    #[must_use]
    pub fn vacancy(&self, now: NaiveDateTime) -> VacancyStats {
        aggregate::vacancy_stats(
            &self.dataset.vacant_properties,
            &self.dataset.public_spaces,
            now.date(),
        )
    }

    /// Publication totals per channel.
    #[must_use]
    pub fn channel_stats(&self) -> Vec<ChannelStats> {
        aggregate::channel_stats(&self.dataset.publications)
    }

    /// Forum totals.
    #[must_use]
    pub fn community_stats(&self) -> CommunityStats {
        aggregate::community_stats(&self.dataset.posts)
    }

    /// Predicted risk per profiled zone at `now`.
    #[must_use]
    pub fn zone_risks(&self, now: NaiveDateTime) -> Vec<ZoneRisk> {
        risk::zone_risks(
            &self.dataset.risk_profiles,
            &self.dataset.events,
            &self.dataset.alerts,
            now,
        )
    }

    /// Management recommendations for the whole dataset.
    #[must_use]
    pub fn recommendations(&self) -> Vec<Recommendation> {
        recommend::recommendations(
            &self.dataset.risk_profiles,
            aggregate::occupancy(&self.dataset.businesses).rate,
            &self.dataset.events,
            self.config,
        )
    }

    /// Share content for the event with id `event_id`.
    ///
    /// # Errors
    ///
    /// * [`EngineError::UnknownEvent`] if no event has that id
    /// * [`EngineError::MissingLink`] if the event has no link
    pub fn share_event(&self, event_id: &str) -> Result<ShareContent, EngineError> {
        let event = self.event(event_id)?;
        share::share_content(
            event,
            self.dataset.zone_name(&event.zone),
            &self.config.hashtags,
        )
    }

    /// Plans a route through the dataset's zones.
    ///
    /// # Errors
    ///
    /// * [`EngineError::EmptyRouteRequest`] if the request is empty
    /// * [`EngineError::NoZones`] if the dataset has no zones
    pub fn plan_route(&self, request: &RouteRequest) -> Result<Vec<RouteStop>, EngineError> {
        route::plan_route(request, &self.dataset.zones)
    }

    /// The live snapshot for `zone` (the whole district when `None`).
    #[must_use]
    pub fn snapshot(
        &self,
        zone: Option<&ZoneId>,
        now: NaiveDateTime,
        check_ins: u64,
    ) -> DistrictSnapshot {
        live::snapshot(self.dataset, zone, now, check_ins, self.config)
    }
}

#[cfg(test)]
mod tests {
    use scs_conecta_district_models::{
        AlertStatus, BusinessKind, BusinessStatus, HighlightLevel, RiskLevel,
    };
    use scs_conecta_engine_models::{FilterValue, RecommendationCategory};

    use super::*;
    use crate::testdata::{alert, business, datetime, event, profile, zones};

    fn dataset() -> DistrictDataset {
        let mut featured = event("evt-001", "scs-1", "2025-12-20", "19:00", "23:00");
        featured.highlight = HighlightLevel::High;
        featured.link = Some("https://scsconecta.df.gov.br/evento/evt-001".to_string());
        featured.engagement.qr_scans = 12;

        DistrictDataset {
            zones: zones(3),
            events: vec![
                featured,
                event("evt-002", "scs-2", "2025-12-22", "10:00", "14:00"),
            ],
            businesses: vec![
                business("b-1", "scs-1", BusinessKind::Bar, BusinessStatus::Active),
                business("b-2", "scs-2", BusinessKind::Vacant, BusinessStatus::Vacant),
            ],
            alerts: vec![alert(
                "a-1",
                "scs-1",
                "2025-12-19T22:00:00",
                AlertStatus::Reported,
            )],
            risk_profiles: vec![
                profile("scs-1", RiskLevel::High),
                profile("scs-2", RiskLevel::Low),
            ],
            ..DistrictDataset::default()
        }
    }

    #[test]
    fn facade_filters_by_zone() {
        let dataset = dataset();
        let config = EngineConfig::default();
        let engine = DistrictDataEngine::new(&dataset, &config);

        let filter = EventFilter {
            zone: FilterValue::Only(ZoneId::from("scs-2")),
            ..EventFilter::default()
        };
        let events = engine.events(&filter);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "evt-002");
        assert_eq!(engine.businesses(&BusinessFilter::default()).len(), 2);
        assert_eq!(engine.alerts(&AlertFilter::default()).len(), 1);
    }

    #[test]
    fn facade_aggregates_and_scores() {
        let dataset = dataset();
        let config = EngineConfig::default();
        let engine = DistrictDataEngine::new(&dataset, &config);
        let now = datetime("2025-12-20T20:00:00");

        let dashboard = engine.dashboard();
        assert_eq!(dashboard.event_count, 2);
        assert_eq!(dashboard.events_by_zone.len(), 3);
        assert_eq!(dashboard.occupancy.rate, Some(50.0));
        assert_eq!(dashboard.total_qr_scans, 12);

        let risks = engine.zone_risks(now);
        assert!((risks[0].score - 0.8).abs() < f64::EPSILON);
        assert!((risks[1].score - 0.1).abs() < f64::EPSILON);
        assert_eq!(engine.safety(now).safety_index, Some(55));

        let recs = engine.recommendations();
        let categories: Vec<_> = recs.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                RecommendationCategory::Security,
                RecommendationCategory::Occupancy,
                RecommendationCategory::Events,
            ]
        );

        assert_eq!(
            engine.classify_event(&dataset.events[0], now),
            TimeStatus::InProgress
        );
        assert_eq!(engine.snapshot(None, now, 0).active_events, 1);
    }

    #[test]
    fn facade_share_and_route() {
        let dataset = dataset();
        let config = EngineConfig::default();
        let engine = DistrictDataEngine::new(&dataset, &config);

        let content = engine.share_event("evt-001").unwrap();
        assert!(content.instagram_caption.contains("SCS Quadra 1"));
        assert!(matches!(
            engine.share_event("evt-002"),
            Err(EngineError::MissingLink { .. })
        ));
        assert!(matches!(
            engine.share_event("evt-404"),
            Err(EngineError::UnknownEvent { .. })
        ));

        let request = RouteRequest {
            interests: vec!["coffee".to_string()],
            minutes_available: 60,
            ..RouteRequest::default()
        };
        assert_eq!(engine.plan_route(&request).unwrap().len(), 3);
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DistrictDataEngine<'static>>();
    }
}
