use hs_catalog::{EmitterKind, FittingKind, NominalSize, PipeMaterial};
use hs_components::FrictionMethod;
use hs_fluids::{FluidKind, FluidSelection};
use hs_project::schema::*;
use hs_project::{
    LATEST_VERSION, ProjectError, load_json, load_yaml, save_json, save_yaml, validate_project,
};

fn sample_project() -> Project {
    let mut fittings = std::collections::BTreeMap::new();
    fittings.insert(FittingKind::Elbow90, 8);
    fittings.insert(FittingKind::TeeBranch, 2);

    Project {
        version: LATEST_VERSION,
        name: "Two zone house".to_string(),
        systems: vec![SystemDef {
            id: "main".to_string(),
            name: "Main boiler".to_string(),
            heat_load_btu_hr: Some(60_000.0),
            settings: SettingsDef {
                fluid: FluidSelection::new(FluidKind::PropyleneGlycol30),
                method: FrictionMethod::HazenWilliams,
                head_safety_factor_pct: 15.0,
                ..SettingsDef::default()
            },
            zones: vec![
                ZoneDef {
                    id: "first".to_string(),
                    name: "First floor".to_string(),
                    heat_load_btu_hr: None,
                    design_delta_t_f: None,
                    pipe: PipeDef {
                        material: PipeMaterial::Copper,
                        size: NominalSize::ThreeQuarter,
                    },
                    straight_length_ft: 80.0,
                    fittings,
                    emitter: Some(EmitterDef {
                        kind: EmitterKind::Baseboard,
                        length_ft: 60.0,
                        model: Some("fin-tube-30".to_string()),
                    }),
                },
                ZoneDef {
                    id: "basement".to_string(),
                    name: "Basement slab".to_string(),
                    heat_load_btu_hr: Some(15_000.0),
                    design_delta_t_f: Some(10.0),
                    pipe: PipeDef {
                        material: PipeMaterial::Pex,
                        size: NominalSize::Half,
                    },
                    straight_length_ft: 300.0,
                    fittings: Default::default(),
                    emitter: Some(EmitterDef {
                        kind: EmitterKind::RadiantFloor,
                        length_ft: 300.0,
                        model: None,
                    }),
                },
            ],
        }],
    }
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("hs_project_{}_{name}", std::process::id()))
}

#[test]
fn roundtrip_yaml() {
    let project = sample_project();
    validate_project(&project).unwrap();

    let path = temp_path("roundtrip.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json() {
    let project = sample_project();

    let path = temp_path("roundtrip.json");
    save_json(&path, &project).unwrap();
    let loaded = load_json(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(project, loaded);
}

#[test]
fn save_rejects_invalid_project() {
    let mut project = sample_project();
    project.systems[0].zones.clear();

    let path = temp_path("invalid.yaml");
    let err = save_yaml(&path, &project).unwrap_err();
    assert!(matches!(err, ProjectError::Validation(_)));
    assert!(!path.exists());
}

#[test]
fn load_reports_parse_errors() {
    let path = temp_path("broken.yaml");
    std::fs::write(&path, "version: 1\nname: [unclosed").unwrap();
    let err = load_yaml(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, ProjectError::Yaml(_)));
}

#[test]
fn missing_file_is_io_error() {
    let err = load_yaml(&temp_path("does_not_exist.yaml")).unwrap_err();
    assert!(matches!(err, ProjectError::Io(_)));
}
