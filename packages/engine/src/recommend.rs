//! Rule-based recommendations for district managers.

use scs_conecta_district_models::{Event, RiskLevel, ZoneRiskProfile};
use scs_conecta_engine_models::{Priority, Recommendation, RecommendationCategory};

use crate::EngineConfig;

const SECURITY_MESSAGE: &str = "Police reinforcement recommended during nighttime events";
const OCCUPANCY_MESSAGE: &str =
    "Occupancy rate below target. Encourage cultural events in underused zones";

/// Evaluates the recommendation rules in order: security per high-risk
/// zone, occupancy below target, nighttime events needing a lighting check.
///
/// An undefined occupancy rate (`None`) never triggers the occupancy rule.
#[must_use]
pub fn recommendations(
    profiles: &[ZoneRiskProfile],
    occupancy_rate: Option<f64>,
    events: &[Event],
    config: &EngineConfig,
) -> Vec<Recommendation> {
    let mut out: Vec<Recommendation> = profiles
        .iter()
        .filter(|p| p.nighttime_risk == RiskLevel::High)
        .map(|p| Recommendation {
            category: RecommendationCategory::Security,
            message: SECURITY_MESSAGE.to_string(),
            priority: Priority::High,
            zone: Some(p.zone.clone()),
        })
        .collect();

    if let Some(rate) = occupancy_rate
        && rate < config.occupancy_target_pct
    {
        out.push(Recommendation {
            category: RecommendationCategory::Occupancy,
            message: OCCUPANCY_MESSAGE.to_string(),
            priority: Priority::Medium,
            zone: None,
        });
    }

    let nighttime = events
        .iter()
        .filter(|e| e.start_hour() >= config.nighttime_start_hour)
        .count();
    if nighttime > 0 {
        out.push(Recommendation {
            category: RecommendationCategory::Events,
            message: format!(
                "{nighttime} nighttime event(s) scheduled. Check need for additional lighting"
            ),
            priority: Priority::Medium,
            zone: None,
        });
    }

    log::debug!("Generated {} recommendation(s)", out.len());
    out
}
