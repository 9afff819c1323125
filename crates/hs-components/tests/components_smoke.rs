//! Integration tests for hs-components against the built-in catalog.

use hs_catalog::{Catalog, EmitterKind, NominalSize, PipeMaterial};
use hs_components::{
    EmitterCurve, FrictionMethod, FrictionOverrides, GenericCurve, HeadLossInput,
    ManufacturerCurve, OutputSource, check_capacity, head_loss,
};
use hs_fluids::{FluidKind, FluidSelection};

fn reference_head(method: FrictionMethod) -> f64 {
    let catalog = Catalog::builtin().unwrap();
    let pipe = catalog
        .pipe(PipeMaterial::Copper, NominalSize::ThreeQuarter)
        .unwrap();
    let props = FluidSelection::new(FluidKind::Water).properties(140.0);
    head_loss(&HeadLossInput {
        flow_gpm: 10.0,
        pipe,
        straight_length_ft: 100.0,
        fitting_length_ft: 0.0,
        fluid: &props,
        fluid_kind: FluidKind::Water,
        method,
        overrides: FrictionOverrides::default(),
    })
    .unwrap()
    .head_loss_ft
}

#[test]
fn darcy_weisbach_and_hazen_williams_agree() {
    let dw = reference_head(FrictionMethod::DarcyWeisbach);
    let hw = reference_head(FrictionMethod::HazenWilliams);

    assert!(dw > 15.0 && dw < 25.0, "dw = {dw}");
    assert!(hw > 15.0 && hw < 25.0, "hw = {hw}");
    assert!((dw - hw).abs() / dw.max(hw) < 0.20, "dw = {dw}, hw = {hw}");
}

#[test]
fn head_loss_positive_for_every_catalog_pipe_and_fluid() {
    let catalog = Catalog::builtin().unwrap();
    let fluids = [
        FluidSelection::new(FluidKind::Water),
        FluidSelection::new(FluidKind::PropyleneGlycol30),
        FluidSelection::new(FluidKind::PropyleneGlycol50),
        FluidSelection::custom(64.0, 2.0),
    ];
    for pipe in &catalog.pipes {
        for fluid in &fluids {
            let props = fluid.properties(140.0);
            let mut last = 0.0;
            for flow in [0.5, 1.0, 2.0, 4.0, 8.0] {
                let r = head_loss(&HeadLossInput {
                    flow_gpm: flow,
                    pipe,
                    straight_length_ft: 50.0,
                    fitting_length_ft: 10.0,
                    fluid: &props,
                    fluid_kind: fluid.kind,
                    method: FrictionMethod::DarcyWeisbach,
                    overrides: FrictionOverrides::default(),
                })
                .unwrap();
                assert!(r.head_loss_ft > last, "{} {}", pipe.size, pipe.material);
                last = r.head_loss_ft;
            }
        }
    }
}

#[test]
fn glycol_loses_more_head_than_water() {
    let catalog = Catalog::builtin().unwrap();
    let pipe = catalog.pipe(PipeMaterial::Pex, NominalSize::One).unwrap();
    let run = |kind: FluidKind| {
        let props = FluidSelection::new(kind).properties(140.0);
        head_loss(&HeadLossInput {
            flow_gpm: 4.0,
            pipe,
            straight_length_ft: 100.0,
            fitting_length_ft: 0.0,
            fluid: &props,
            fluid_kind: kind,
            method: FrictionMethod::DarcyWeisbach,
            overrides: FrictionOverrides::default(),
        })
        .unwrap()
    };
    let water = run(FluidKind::Water);
    let glycol = run(FluidKind::PropyleneGlycol50);
    assert!(glycol.reynolds < water.reynolds);
    assert!(glycol.head_loss_ft > water.head_loss_ft);
}

#[test]
fn documented_manufacturer_point() {
    let catalog = Catalog::builtin().unwrap();
    let table = catalog.manufacturer_model("fin-tube-30").unwrap();
    let model = catalog.emitter(EmitterKind::Baseboard).unwrap();
    let curve = ManufacturerCurve::new(table, GenericCurve::new(model, catalog.emitter_reference));

    let out = curve.output_per_ft(170.0, 1.0);
    assert_eq!(out.btu_per_ft, 535.0);
    assert!(matches!(out.source, OutputSource::Manufacturer { .. }));
}

#[test]
fn capacity_of_steel_uses_higher_absolute_limit() {
    let catalog = Catalog::builtin().unwrap();
    let pipe = catalog.pipe(PipeMaterial::Steel, NominalSize::One).unwrap();
    let limits = catalog.velocity_limits(PipeMaterial::Steel).unwrap();
    let c = check_capacity(pipe, limits, 50_000.0, 20.0).unwrap();
    let ratio = c.absolute_capacity_btu_hr / c.recommended_capacity_btu_hr;
    assert!((ratio - 2.5).abs() < 1e-9);
}
