//! Operating point must not depend on emitter length while the emitter is
//! adequately sized.

use hs_catalog::{Catalog, EmitterKind, NominalSize, PipeMaterial};
use hs_components::friction::velocity_fps;
use hs_components::{GenericCurve, ManufacturerCurve};
use hs_solver::{EmitterRun, ZoneEmitter, operating_point};

fn sweep(emitter: &ZoneEmitter<'_>, load: f64, shortest_ft: usize) -> Vec<(f64, f64, f64)> {
    let catalog = Catalog::builtin().unwrap();
    let pipe = catalog
        .pipe(PipeMaterial::Copper, NominalSize::ThreeQuarter)
        .unwrap();
    (shortest_ft..=100)
        .step_by(5)
        .map(|len| {
            let run = EmitterRun {
                curve: emitter,
                length_ft: len as f64,
            };
            let op = operating_point(load, 20.0, 180.0, Some(run)).unwrap();
            assert!(!op.emitter_limited(), "limited at {len} ft");
            (
                op.effective_delta_t_f,
                op.flow_gpm,
                velocity_fps(op.flow_gpm, pipe),
            )
        })
        .collect()
}

fn assert_invariant(points: &[(f64, f64, f64)]) {
    let (dt0, q0, v0) = points[0];
    for &(dt, q, v) in points {
        assert!((dt - dt0).abs() < 0.01);
        assert!((q - q0).abs() < 0.01);
        assert!((v - v0).abs() < 0.01);
    }
}

#[test]
fn generic_baseboard_sweep() {
    let catalog = Catalog::builtin().unwrap();
    let model = catalog.emitter(EmitterKind::Baseboard).unwrap();
    let emitter = ZoneEmitter::Generic(GenericCurve::new(model, catalog.emitter_reference));

    let points = sweep(&emitter, 5_000.0, 10);
    assert_invariant(&points);
    assert!((points[0].0 - 20.0).abs() < 1e-12);
    assert!((points[0].1 - 0.5).abs() < 1e-12);
}

#[test]
fn manufacturer_baseboard_sweep() {
    let catalog = Catalog::builtin().unwrap();
    let model = catalog.emitter(EmitterKind::Baseboard).unwrap();
    let table = catalog.manufacturer_model("fin-tube-30").unwrap();
    let emitter = ZoneEmitter::Manufacturer(ManufacturerCurve::new(
        table,
        GenericCurve::new(model, catalog.emitter_reference),
    ));

    // 2 GPM at 20 °F keeps the query inside the table; 40 ft carries 21.8k
    let points = sweep(&emitter, 20_000.0, 40);
    assert_invariant(&points);
}

#[test]
fn only_adequacy_changes_the_result() {
    let catalog = Catalog::builtin().unwrap();
    let model = catalog.emitter(EmitterKind::Baseboard).unwrap();
    let curve = GenericCurve::new(model, catalog.emitter_reference);

    let at = |length_ft| {
        let run = EmitterRun {
            curve: &curve,
            length_ft,
        };
        operating_point(30_000.0, 20.0, 180.0, Some(run)).unwrap()
    };
    let short = at(40.0);
    let long = at(80.0);

    assert!(short.emitter_limited());
    assert!(!long.emitter_limited());
    assert_eq!(short.flow_gpm, long.flow_gpm);
    assert_eq!(long.effective_delta_t_f, 20.0);
}
