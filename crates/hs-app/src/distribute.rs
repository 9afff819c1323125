//! Zone weights and system load distribution.
//!
//! A zone's weight is its effective pipe length: straight length plus the
//! equivalent length of every fitting on it. Zones without a manual load
//! share whatever the manual zones leave of the system load, in proportion
//! to weight, or evenly when every such zone weighs nothing.

use crate::error::AppResult;
use hs_catalog::Catalog;
use hs_project::ZoneDef;
use serde::Serialize;

/// Effective length of a zone's piping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneGeometry {
    pub straight_length_ft: f64,
    /// Σ count × equivalent length [ft]
    pub fitting_length_ft: f64,
    /// Distribution weight [ft]
    pub weight_ft: f64,
}

/// Look up fitting lengths for a zone and compute its weight.
///
/// Fails only when a fitting in use has no catalog entry.
pub fn zone_geometry(zone: &ZoneDef, catalog: &Catalog) -> AppResult<ZoneGeometry> {
    let mut fitting_length = 0.0;
    for (&kind, &count) in &zone.fittings {
        if count == 0 {
            continue;
        }
        let each = catalog.fitting_length(kind, zone.pipe.material, zone.pipe.size)?;
        fitting_length += f64::from(count) * each;
    }

    let straight = zone.straight_length_ft;
    let usable_straight = if straight.is_finite() && straight > 0.0 {
        straight
    } else {
        0.0
    };

    Ok(ZoneGeometry {
        straight_length_ft: straight,
        fitting_length_ft: fitting_length,
        weight_ft: usable_straight + fitting_length,
    })
}

/// Split `total` in proportion to `weights`.
///
/// Non-finite or negative weights count as zero. If nothing weighs
/// anything, the split is even.
pub fn split_load(total: f64, weights: &[f64]) -> Vec<f64> {
    if weights.is_empty() {
        return Vec::new();
    }
    let clean: Vec<f64> = weights
        .iter()
        .map(|&w| if w.is_finite() && w > 0.0 { w } else { 0.0 })
        .collect();
    let sum: f64 = clean.iter().sum();

    if sum > 0.0 {
        clean.iter().map(|w| total * w / sum).collect()
    } else {
        let share = total / clean.len() as f64;
        vec![share; clean.len()]
    }
}

/// Loads assigned to each zone, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadDistribution {
    /// `None` when a zone has no manual load and no system load exists
    pub loads: Vec<Option<f64>>,
    pub auto: Vec<bool>,
    pub manual_total_btu_hr: f64,
    /// System load left for auto zones after manual loads
    pub distributable_btu_hr: f64,
    /// Manual loads add up to more than the system load
    pub over_assigned: bool,
}

/// Assign zone loads from optional manual loads and the system load.
pub fn distribute_loads(
    system_load_btu_hr: Option<f64>,
    manual: &[Option<f64>],
    weights: &[f64],
) -> LoadDistribution {
    let manual_total: f64 = manual
        .iter()
        .flatten()
        .filter(|l| l.is_finite() && **l >= 0.0)
        .sum();
    let auto: Vec<bool> = manual.iter().map(Option::is_none).collect();

    let system_load = system_load_btu_hr.filter(|l| l.is_finite() && *l >= 0.0);
    let over_assigned = system_load.is_some_and(|s| manual_total > s);
    let distributable = system_load.map_or(0.0, |s| (s - manual_total).max(0.0));

    let auto_weights: Vec<f64> = weights
        .iter()
        .zip(&auto)
        .filter(|(_, is_auto)| **is_auto)
        .map(|(w, _)| *w)
        .collect();
    let mut shares = split_load(distributable, &auto_weights).into_iter();

    let loads = manual
        .iter()
        .map(|m| match m {
            Some(load) => Some(*load),
            None if system_load.is_some() => shares.next(),
            None => None,
        })
        .collect();

    LoadDistribution {
        loads,
        auto,
        manual_total_btu_hr: manual_total,
        distributable_btu_hr: distributable,
        over_assigned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_catalog::{FittingKind, NominalSize, PipeMaterial};
    use hs_project::PipeDef;

    fn zone(length: f64, elbows: u32) -> ZoneDef {
        let mut fittings = std::collections::BTreeMap::new();
        fittings.insert(FittingKind::Elbow90, elbows);
        ZoneDef {
            id: "z".into(),
            name: "Z".into(),
            heat_load_btu_hr: None,
            design_delta_t_f: None,
            pipe: PipeDef {
                material: PipeMaterial::Copper,
                size: NominalSize::ThreeQuarter,
            },
            straight_length_ft: length,
            fittings,
            emitter: None,
        }
    }

    #[test]
    fn geometry_adds_fittings() {
        let catalog = Catalog::builtin().unwrap();
        let g = zone_geometry(&zone(50.0, 5), &catalog).unwrap();
        // ¾" copper 90° elbow = 2.0 ft
        assert!((g.fitting_length_ft - 10.0).abs() < 1e-9);
        assert!((g.weight_ft - 60.0).abs() < 1e-9);
    }

    #[test]
    fn geometry_ignores_bad_straight_length_for_weight() {
        let catalog = Catalog::builtin().unwrap();
        let g = zone_geometry(&zone(-10.0, 0), &catalog).unwrap();
        assert_eq!(g.weight_ft, 0.0);
        assert_eq!(g.straight_length_ft, -10.0);
    }

    #[test]
    fn split_is_proportional() {
        let shares = split_load(30_000.0, &[100.0, 50.0, 150.0]);
        assert_eq!(shares, vec![10_000.0, 5_000.0, 15_000.0]);
    }

    #[test]
    fn zero_weights_split_evenly() {
        let shares = split_load(30_000.0, &[0.0, 0.0, f64::NAN]);
        assert_eq!(shares, vec![10_000.0; 3]);
    }

    #[test]
    fn manual_zones_take_their_share_first() {
        let d = distribute_loads(
            Some(50_000.0),
            &[Some(20_000.0), None, None],
            &[999.0, 100.0, 200.0],
        );
        assert_eq!(d.manual_total_btu_hr, 20_000.0);
        assert_eq!(d.distributable_btu_hr, 30_000.0);
        assert_eq!(
            d.loads,
            vec![Some(20_000.0), Some(10_000.0), Some(20_000.0)]
        );
        assert_eq!(d.auto, vec![false, true, true]);
        assert!(!d.over_assigned);
    }

    #[test]
    fn over_assigned_leaves_nothing_to_distribute() {
        let d = distribute_loads(Some(10_000.0), &[Some(15_000.0), None], &[10.0, 10.0]);
        assert!(d.over_assigned);
        assert_eq!(d.distributable_btu_hr, 0.0);
        assert_eq!(d.loads[1], Some(0.0));
    }

    #[test]
    fn no_system_load_leaves_auto_zones_unassigned() {
        let d = distribute_loads(None, &[Some(5_000.0), None], &[10.0, 10.0]);
        assert_eq!(d.loads, vec![Some(5_000.0), None]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn split_conserves_total(
            total in 0.0_f64..1_000_000.0,
            weights in prop::collection::vec(prop_oneof![Just(0.0), 0.0_f64..500.0], 1..12),
        ) {
            let shares = split_load(total, &weights);
            let sum: f64 = shares.iter().sum();
            prop_assert!((sum - total).abs() <= 100.0);
            prop_assert!((sum - total).abs() <= 1e-6 * total.max(1.0));
            prop_assert!(shares.iter().all(|s| *s >= 0.0));
        }

        #[test]
        fn distribution_conserves_system_load(
            system in 10_000.0_f64..500_000.0,
            weights in prop::collection::vec(0.0_f64..300.0, 1..10),
        ) {
            let manual = vec![None; weights.len()];
            let d = distribute_loads(Some(system), &manual, &weights);
            let sum: f64 = d.loads.iter().flatten().sum();
            prop_assert!((sum - system).abs() <= 100.0);
        }
    }
}
