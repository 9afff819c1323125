//! Pump sizing from zone results.
//!
//! Total flow is the sum of every valid zone's requested flow, never the
//! velocity-capped flow. Required head is set by the worst zone.

use crate::zone::ZoneResult;
use hs_core::units::constants::GPM_FT_PER_HP;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PumpSizing {
    /// Σ valid zone flow [GPM]
    pub zone_flow_gpm: f64,
    /// Zone flow with the flow safety factor applied [GPM]
    pub total_flow_gpm: f64,
    /// Largest valid zone head loss [ft]
    pub max_zone_head_ft: f64,
    /// Max head with the head safety factor applied [ft]
    pub required_head_ft: f64,
    /// Zone setting the required head
    pub critical_zone: Option<String>,
    /// GPM × head × SG / 3960 [hp]
    pub water_horsepower: f64,
    pub valid_zones: usize,
}

/// Reduce zone results to one pump operating point.
///
/// Safety factors are percentages. On a tie for worst head the first zone
/// wins.
pub fn size_pump(
    zones: &[ZoneResult],
    flow_safety_factor_pct: f64,
    head_safety_factor_pct: f64,
    specific_gravity: f64,
) -> PumpSizing {
    let valid: Vec<&ZoneResult> = zones.iter().filter(|z| z.valid).collect();

    let zone_flow: f64 = valid.iter().filter_map(|z| z.flow_gpm()).sum();

    let mut critical: Option<(&ZoneResult, f64)> = None;
    for zone in &valid {
        if let Some(h) = zone.head_loss_ft() {
            if critical.is_none_or(|(_, best)| h > best) {
                critical = Some((zone, h));
            }
        }
    }
    let max_head = critical.map_or(0.0, |(_, h)| h);

    let total_flow = zone_flow * (1.0 + flow_safety_factor_pct / 100.0);
    let required_head = max_head * (1.0 + head_safety_factor_pct / 100.0);

    PumpSizing {
        zone_flow_gpm: zone_flow,
        total_flow_gpm: total_flow,
        max_zone_head_ft: max_head,
        required_head_ft: required_head,
        critical_zone: critical.map(|(z, _)| z.id.clone()),
        water_horsepower: total_flow * required_head * specific_gravity / GPM_FT_PER_HP,
        valid_zones: valid.len(),
    }
}
