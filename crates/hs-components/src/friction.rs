//! Friction (head) loss in a straight run plus fittings.
//!
//! Two correlations are available:
//! - Darcy-Weisbach: `h = f · (L/D) · v²/2g`, with `f = 64/Re` below the
//!   transition Reynolds number and a Colebrook fixed point above it
//! - Hazen-Williams: `h = 10.44 · L · Q^1.852 / (C^1.852 · d^4.8655)` in
//!   feet, GPM and inches; empirical and only valid for water

use crate::advisory::{Advisory, AdvisoryCode};
use crate::common::{EPSILON_FLOW, check_finite, check_non_negative};
use crate::error::{ComponentError, ComponentResult};
use hs_catalog::PipeSpec;
use hs_core::iteration::{FixedPointConfig, solve_fixed_point};
use hs_core::units::constants::G_FT_S2;
use hs_core::units::{Velocity, gpm};
use hs_fluids::{FluidKind, FluidProperties};
use serde::{Deserialize, Serialize};
use std::fmt;
use uom::si::area::square_foot;
use uom::si::f64::Area;
use uom::si::velocity::foot_per_second;

/// Reynolds number below which flow is treated as laminar.
pub const TRANSITION_REYNOLDS: f64 = 2300.0;

const HW_COEFFICIENT: f64 = 10.44;
const HW_FLOW_EXPONENT: f64 = 1.852;
const HW_DIAMETER_EXPONENT: f64 = 4.8655;

/// Head loss calculation method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrictionMethod {
    #[default]
    DarcyWeisbach,
    HazenWilliams,
}

impl fmt::Display for FrictionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrictionMethod::DarcyWeisbach => f.write_str("Darcy-Weisbach"),
            FrictionMethod::HazenWilliams => f.write_str("Hazen-Williams"),
        }
    }
}

/// Optional replacements for the catalog roughness and C-value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrictionOverrides {
    /// Absolute roughness [ft]
    #[serde(default)]
    pub roughness_ft: Option<f64>,
    #[serde(default)]
    pub hazen_williams_c: Option<f64>,
}

/// Flow conditions shared by both correlations.
#[derive(Debug, Clone, Copy)]
pub struct FlowState {
    pub flow_gpm: f64,
    pub velocity_fps: f64,
    pub reynolds: f64,
    pub diameter_ft: f64,
    pub diameter_in: f64,
}

/// Outcome of one correlation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionOutcome {
    pub head_loss_ft: f64,
    /// Darcy friction factor, when the correlation has one
    pub friction_factor: Option<f64>,
    pub converged: bool,
}

/// A head-loss correlation.
pub trait FrictionCorrelation {
    fn method(&self) -> FrictionMethod;

    /// Head loss [ft] over `length_ft` of pipe at the given flow state.
    fn head_loss(&self, state: &FlowState, length_ft: f64) -> ComponentResult<FrictionOutcome>;
}

/// Darcy-Weisbach with a Colebrook friction factor.
#[derive(Debug, Clone, Copy)]
pub struct DarcyWeisbach {
    pub roughness_ft: f64,
    pub colebrook: FixedPointConfig,
}

impl DarcyWeisbach {
    pub fn new(roughness_ft: f64) -> Self {
        Self {
            roughness_ft,
            colebrook: FixedPointConfig::default(),
        }
    }

    /// Darcy friction factor and whether the Colebrook iteration converged.
    pub fn friction_factor(&self, reynolds: f64, diameter_ft: f64) -> ComponentResult<(f64, bool)> {
        check_finite(reynolds, "Reynolds number")?;
        if reynolds <= 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "Reynolds number must be positive",
            });
        }
        if reynolds < TRANSITION_REYNOLDS {
            return Ok((64.0 / reynolds, true));
        }

        let rel = self.roughness_ft / diameter_ft;

        // Swamee-Jain seeds the iteration on x = 1/sqrt(f)
        let f0 = 0.25 / (rel / 3.7 + 5.74 / reynolds.powf(0.9)).log10().powi(2);
        let x0 = 1.0 / f0.sqrt();

        let solution = solve_fixed_point(
            x0,
            &self.colebrook,
            |x| {
                let proposal = -2.0 * (rel / 3.7 + 2.51 * x / reynolds).log10();
                Ok((proposal, proposal - x))
            },
            |x| x.clamp(0.5, 50.0),
        )?;

        let f = 1.0 / (solution.value * solution.value);
        check_finite(f, "friction factor")?;
        Ok((f, solution.converged))
    }
}

impl FrictionCorrelation for DarcyWeisbach {
    fn method(&self) -> FrictionMethod {
        FrictionMethod::DarcyWeisbach
    }

    fn head_loss(&self, state: &FlowState, length_ft: f64) -> ComponentResult<FrictionOutcome> {
        if state.flow_gpm < EPSILON_FLOW {
            return Ok(FrictionOutcome {
                head_loss_ft: 0.0,
                friction_factor: None,
                converged: true,
            });
        }

        let (f, converged) = self.friction_factor(state.reynolds, state.diameter_ft)?;
        let v = state.velocity_fps;
        let head = f * (length_ft / state.diameter_ft) * v * v / (2.0 * G_FT_S2);
        check_finite(head, "head loss")?;

        Ok(FrictionOutcome {
            head_loss_ft: head,
            friction_factor: Some(f),
            converged,
        })
    }
}

/// Hazen-Williams empirical correlation.
#[derive(Debug, Clone, Copy)]
pub struct HazenWilliams {
    pub c: f64,
}

impl FrictionCorrelation for HazenWilliams {
    fn method(&self) -> FrictionMethod {
        FrictionMethod::HazenWilliams
    }

    fn head_loss(&self, state: &FlowState, length_ft: f64) -> ComponentResult<FrictionOutcome> {
        if state.flow_gpm < EPSILON_FLOW {
            return Ok(FrictionOutcome {
                head_loss_ft: 0.0,
                friction_factor: None,
                converged: true,
            });
        }

        let head = HW_COEFFICIENT * length_ft * state.flow_gpm.powf(HW_FLOW_EXPONENT)
            / (self.c.powf(HW_FLOW_EXPONENT) * state.diameter_in.powf(HW_DIAMETER_EXPONENT));
        check_finite(head, "head loss")?;

        Ok(FrictionOutcome {
            head_loss_ft: head,
            friction_factor: None,
            converged: true,
        })
    }
}

/// Everything needed to compute head loss for one pipe run.
#[derive(Debug, Clone, Copy)]
pub struct HeadLossInput<'a> {
    pub flow_gpm: f64,
    pub pipe: &'a PipeSpec,
    pub straight_length_ft: f64,
    /// Sum of fitting equivalent lengths [ft]
    pub fitting_length_ft: f64,
    pub fluid: &'a FluidProperties,
    pub fluid_kind: FluidKind,
    pub method: FrictionMethod,
    pub overrides: FrictionOverrides,
}

/// Hydraulic result for one pipe run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadLoss {
    pub method: FrictionMethod,
    pub velocity_fps: f64,
    pub reynolds: f64,
    /// Darcy friction factor (Darcy-Weisbach only)
    pub friction_factor: Option<f64>,
    pub head_loss_ft: f64,
    /// Straight plus fitting-equivalent length [ft]
    pub total_length_ft: f64,
    /// False when the Colebrook iteration stopped at its ceiling
    pub converged: bool,
    pub advisories: Vec<Advisory>,
}

/// Mean velocity [ft/s] of `flow_gpm` through `pipe`.
pub fn velocity_fps(flow_gpm: f64, pipe: &PipeSpec) -> f64 {
    let area = Area::new::<square_foot>(pipe.flow_area_ft2());
    let v: Velocity = gpm(flow_gpm) / area;
    v.get::<foot_per_second>()
}

/// Velocity, Reynolds number and head loss for one pipe run.
pub fn head_loss(input: &HeadLossInput<'_>) -> ComponentResult<HeadLoss> {
    check_non_negative(input.flow_gpm, "flow")?;
    check_non_negative(input.straight_length_ft, "straight length")?;
    check_non_negative(input.fitting_length_ft, "fitting length")?;
    check_finite(input.fluid.kinematic_viscosity_ft2_s, "kinematic viscosity")?;

    let pipe = input.pipe;
    if !(pipe.inner_diameter_in.is_finite() && pipe.inner_diameter_in > 0.0) {
        return Err(ComponentError::NonPhysical {
            what: "pipe inner diameter",
        });
    }

    let diameter_ft = pipe.inner_diameter_ft();
    let velocity = velocity_fps(input.flow_gpm, pipe);
    let reynolds = velocity * diameter_ft / input.fluid.kinematic_viscosity_ft2_s;
    check_finite(reynolds, "Reynolds number")?;

    let state = FlowState {
        flow_gpm: input.flow_gpm,
        velocity_fps: velocity,
        reynolds,
        diameter_ft,
        diameter_in: pipe.inner_diameter_in,
    };
    let total_length = input.straight_length_ft + input.fitting_length_ft;

    let mut advisories = Vec::new();
    let outcome = match input.method {
        FrictionMethod::DarcyWeisbach => {
            let roughness = input.overrides.roughness_ft.unwrap_or(pipe.roughness_ft);
            if !(roughness.is_finite() && roughness >= 0.0) {
                return Err(ComponentError::InvalidArg {
                    what: "roughness must be non-negative",
                });
            }
            DarcyWeisbach::new(roughness).head_loss(&state, total_length)?
        }
        FrictionMethod::HazenWilliams => {
            let c = input.overrides.hazen_williams_c.unwrap_or(pipe.hazen_williams_c);
            if !(c.is_finite() && c > 0.0) {
                return Err(ComponentError::InvalidArg {
                    what: "Hazen-Williams C must be positive",
                });
            }
            if !input.fluid_kind.is_water() {
                advisories.push(
                    Advisory::new(
                        AdvisoryCode::HazenWilliamsNonWater,
                        format!(
                            "Hazen-Williams is only valid for water, not {}",
                            input.fluid_kind.display_name()
                        ),
                    )
                    .with_suggestion("switch to Darcy-Weisbach"),
                );
            }
            HazenWilliams { c }.head_loss(&state, total_length)?
        }
    };

    if !outcome.converged {
        advisories.push(Advisory::new(
            AdvisoryCode::NotConverged,
            "friction factor iteration stopped before converging",
        ));
    }

    Ok(HeadLoss {
        method: input.method,
        velocity_fps: velocity,
        reynolds,
        friction_factor: outcome.friction_factor,
        head_loss_ft: outcome.head_loss_ft,
        total_length_ft: total_length,
        converged: outcome.converged,
        advisories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_catalog::{NominalSize, PipeMaterial};
    use hs_fluids::FluidSelection;

    fn copper_three_quarter() -> PipeSpec {
        PipeSpec {
            material: PipeMaterial::Copper,
            size: NominalSize::ThreeQuarter,
            inner_diameter_in: 0.785,
            roughness_ft: 0.000_005,
            hazen_williams_c: 150.0,
        }
    }

    fn input<'a>(
        flow: f64,
        pipe: &'a PipeSpec,
        fluid: &'a FluidProperties,
        method: FrictionMethod,
    ) -> HeadLossInput<'a> {
        HeadLossInput {
            flow_gpm: flow,
            pipe,
            straight_length_ft: 100.0,
            fitting_length_ft: 0.0,
            fluid,
            fluid_kind: FluidKind::Water,
            method,
            overrides: FrictionOverrides::default(),
        }
    }

    #[test]
    fn laminar_friction_factor() {
        let dw = DarcyWeisbach::new(0.000_005);
        let (f, converged) = dw.friction_factor(1000.0, 0.05).unwrap();
        assert!((f - 0.064).abs() < 1e-12);
        assert!(converged);
    }

    #[test]
    fn colebrook_smooth_pipe() {
        // Smooth pipe at Re 1e5: f ≈ 0.0180
        let dw = DarcyWeisbach::new(0.0);
        let (f, converged) = dw.friction_factor(1e5, 0.1).unwrap();
        assert!(converged);
        assert!((f - 0.0180).abs() < 2e-4, "f = {f}");
    }

    #[test]
    fn colebrook_rough_pipe_is_higher() {
        let smooth = DarcyWeisbach::new(0.0).friction_factor(1e5, 0.1).unwrap().0;
        let rough = DarcyWeisbach::new(0.001).friction_factor(1e5, 0.1).unwrap().0;
        assert!(rough > smooth);
    }

    #[test]
    fn reference_case_darcy_weisbach() {
        let pipe = copper_three_quarter();
        let props = FluidSelection::new(FluidKind::Water).properties(140.0);
        let r = head_loss(&input(10.0, &pipe, &props, FrictionMethod::DarcyWeisbach)).unwrap();

        assert!((r.velocity_fps - 6.63).abs() < 0.01);
        assert!(r.reynolds > 80_000.0 && r.reynolds < 90_000.0);
        let f = r.friction_factor.unwrap();
        assert!((f - 0.019).abs() < 0.001);
        assert!(r.head_loss_ft > 18.0 && r.head_loss_ft < 22.0);
        assert!(r.converged);
        assert!(r.advisories.is_empty());
    }

    #[test]
    fn laminar_run_uses_sixty_four_over_re() {
        let pipe = PipeSpec {
            material: PipeMaterial::Pex,
            size: NominalSize::Half,
            inner_diameter_in: 0.475,
            roughness_ft: 0.000_023,
            hazen_williams_c: 150.0,
        };
        let props = FluidSelection::new(FluidKind::Water).properties(140.0);
        let r = head_loss(&input(0.1, &pipe, &props, FrictionMethod::DarcyWeisbach)).unwrap();
        assert!(r.reynolds < TRANSITION_REYNOLDS);
        assert!((r.friction_factor.unwrap() - 64.0 / r.reynolds).abs() < 1e-12);
    }

    #[test]
    fn hazen_williams_has_no_friction_factor() {
        let pipe = copper_three_quarter();
        let props = FluidSelection::new(FluidKind::Water).properties(140.0);
        let r = head_loss(&input(10.0, &pipe, &props, FrictionMethod::HazenWilliams)).unwrap();
        assert!(r.friction_factor.is_none());
        assert!((r.head_loss_ft - 22.5).abs() < 0.1);
        assert!(r.advisories.is_empty());
    }

    #[test]
    fn hazen_williams_with_glycol_is_advisory() {
        let pipe = copper_three_quarter();
        let fluid = FluidSelection::new(FluidKind::PropyleneGlycol30);
        let props = fluid.properties(140.0);
        let mut inp = input(10.0, &pipe, &props, FrictionMethod::HazenWilliams);
        inp.fluid_kind = fluid.kind;

        let r = head_loss(&inp).unwrap();
        assert!(r.head_loss_ft > 0.0);
        assert_eq!(r.advisories.len(), 1);
        assert_eq!(r.advisories[0].code, AdvisoryCode::HazenWilliamsNonWater);
        assert!(r.advisories[0].suggestion.is_some());
    }

    #[test]
    fn overrides_replace_catalog_values() {
        let pipe = copper_three_quarter();
        let props = FluidSelection::new(FluidKind::Water).properties(140.0);

        let base = head_loss(&input(10.0, &pipe, &props, FrictionMethod::HazenWilliams)).unwrap();
        let mut inp = input(10.0, &pipe, &props, FrictionMethod::HazenWilliams);
        inp.overrides.hazen_williams_c = Some(100.0);
        let low_c = head_loss(&inp).unwrap();
        assert!(low_c.head_loss_ft > base.head_loss_ft);

        let mut inp = input(10.0, &pipe, &props, FrictionMethod::DarcyWeisbach);
        inp.overrides.roughness_ft = Some(0.0005);
        let rough = head_loss(&inp).unwrap();
        let smooth = head_loss(&input(10.0, &pipe, &props, FrictionMethod::DarcyWeisbach)).unwrap();
        assert!(rough.head_loss_ft > smooth.head_loss_ft);
    }

    #[test]
    fn fittings_add_length() {
        let pipe = copper_three_quarter();
        let props = FluidSelection::new(FluidKind::Water).properties(140.0);
        let plain = head_loss(&input(5.0, &pipe, &props, FrictionMethod::DarcyWeisbach)).unwrap();

        let mut inp = input(5.0, &pipe, &props, FrictionMethod::DarcyWeisbach);
        inp.fitting_length_ft = 20.0;
        let with_fittings = head_loss(&inp).unwrap();

        assert_eq!(with_fittings.total_length_ft, 120.0);
        assert!((with_fittings.head_loss_ft / plain.head_loss_ft - 1.2).abs() < 1e-9);
    }

    #[test]
    fn zero_flow_is_zero_loss() {
        let pipe = copper_three_quarter();
        let props = FluidSelection::new(FluidKind::Water).properties(140.0);
        let r = head_loss(&input(0.0, &pipe, &props, FrictionMethod::DarcyWeisbach)).unwrap();
        assert_eq!(r.head_loss_ft, 0.0);
        assert_eq!(r.velocity_fps, 0.0);
        assert!(r.friction_factor.is_none());
    }

    #[test]
    fn negative_inputs_are_rejected() {
        let pipe = copper_three_quarter();
        let props = FluidSelection::new(FluidKind::Water).properties(140.0);
        assert!(head_loss(&input(-1.0, &pipe, &props, FrictionMethod::DarcyWeisbach)).is_err());

        let mut inp = input(1.0, &pipe, &props, FrictionMethod::DarcyWeisbach);
        inp.straight_length_ft = f64::NAN;
        assert!(head_loss(&inp).is_err());
    }
}
