use clap::{Parser, Subcommand, ValueEnum};
use hs_app::{AppError, AppResult, SystemReport, ZoneResult, project_service};
use hs_catalog::{NominalSize, PipeMaterial};
use hs_components::{FrictionMethod, FrictionOverrides, HeadLossInput, head_loss};
use hs_fluids::{FluidKind, FluidSelection};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hydrosize")]
#[command(about = "Hydronic heating sizing: zone flows, pipe head loss and pump duty", long_about = None)]
struct Cli {
    /// Catalog file (YAML or JSON) replacing the built-in reference data
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project file
        project_path: PathBuf,
    },
    /// List systems in a project
    Systems {
        /// Path to the project file
        project_path: PathBuf,
    },
    /// Size every zone and the pump of one or all systems
    Analyze {
        /// Path to the project file
        project_path: PathBuf,
        /// Only this system
        #[arg(long)]
        system: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List catalog pipe sizes with their flow limits
    Pipes {
        /// Only this material (copper, pex, steel)
        #[arg(long, value_parser = parse_key::<PipeMaterial>)]
        material: Option<PipeMaterial>,
    },
    /// Head loss for one flow through one pipe
    HeadLoss {
        /// Flow [GPM]
        #[arg(long)]
        flow: f64,
        /// Straight length [ft]
        #[arg(long)]
        length: f64,
        #[arg(long, value_parser = parse_key::<PipeMaterial>, default_value = "copper")]
        material: PipeMaterial,
        /// Nominal size, e.g. 3/4 or 1-1/4
        #[arg(long, value_parser = parse_key::<NominalSize>)]
        size: NominalSize,
        #[arg(long, value_parser = parse_key::<FrictionMethod>, default_value = "darcy_weisbach")]
        method: FrictionMethod,
        #[arg(long, value_parser = parse_key::<FluidKind>, default_value = "water")]
        fluid: FluidKind,
        /// Fluid temperature [°F]
        #[arg(long, default_value_t = 140.0)]
        temperature: f64,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Yaml,
}

/// Parse a catalog key the same way project files spell it.
fn parse_key<T: DeserializeOwned>(s: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|_| format!("unknown value '{s}'"))
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog_path = cli.catalog.as_deref();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Systems { project_path } => cmd_systems(&project_path),
        Commands::Analyze {
            project_path,
            system,
            format,
            output,
        } => cmd_analyze(
            &project_path,
            catalog_path,
            system.as_deref(),
            format,
            output.as_deref(),
        ),
        Commands::Pipes { material } => cmd_pipes(catalog_path, material),
        Commands::HeadLoss {
            flow,
            length,
            material,
            size,
            method,
            fluid,
            temperature,
        } => cmd_head_loss(
            catalog_path,
            flow,
            length,
            material,
            size,
            method,
            FluidSelection::new(fluid),
            temperature,
        ),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    let zones: usize = project.systems.iter().map(|s| s.zones.len()).sum();
    println!(
        "✓ Project is valid ({} systems, {} zones)",
        project.systems.len(),
        zones
    );
    Ok(())
}

fn cmd_systems(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let systems = project_service::list_systems(&project);

    if systems.is_empty() {
        println!("No systems found in project");
    } else {
        println!("Systems in project:");
        for sys in systems {
            let load = sys
                .heat_load_btu_hr
                .map_or_else(|| "no system load".to_string(), |l| format!("{l:.0} BTU/hr"));
            println!(
                "  {} - {} ({} zones, {} manual, {})",
                sys.id, sys.name, sys.zone_count, sys.manual_zone_count, load
            );
        }
    }
    Ok(())
}

fn cmd_analyze(
    project_path: &Path,
    catalog_path: Option<&Path>,
    system_id: Option<&str>,
    format: OutputFormat,
    output: Option<&Path>,
) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let catalog = project_service::load_catalog(catalog_path)?;
    let reports = project_service::analyze_project(&project, &catalog, system_id)?;
    info!(
        project = %project.name,
        systems = reports.len(),
        custom_catalog = catalog_path.is_some(),
        "analysis complete"
    );

    let text = match format {
        OutputFormat::Table => reports.iter().map(render_report).collect::<Vec<_>>().join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(&reports)?,
        OutputFormat::Yaml => serde_yaml::to_string(&reports)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, text).map_err(|source| AppError::FileWrite {
                path: path.to_path_buf(),
                source,
            })?;
            println!("✓ Report written to {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn render_report(report: &SystemReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("System {} - {}\n", report.id, report.name));
    out.push_str(&format!(
        "  Fluid: {} at {:.0} °F (SG {:.3}), {}\n",
        report.settings.fluid.kind.display_name(),
        report.fluid.temperature_f,
        report.fluid.specific_gravity(),
        report.settings.method
    ));
    if let Some(load) = report.system_load_btu_hr {
        out.push_str(&format!(
            "  Load: {load:.0} BTU/hr ({:.0} manual, {:.0} distributed)\n",
            report.manual_load_btu_hr, report.distributed_load_btu_hr
        ));
    }
    for warning in &report.warnings {
        out.push_str(&format!("  ! {warning}\n"));
    }

    out.push_str(&format!(
        "\n  {:<12} {:>10} {:>7} {:>8} {:>8} {:>9} {:>7}\n",
        "Zone", "BTU/hr", "ΔT °F", "GPM", "ft/s", "Head ft", "Util %"
    ));
    for zone in &report.zones {
        out.push_str(&render_zone(zone));
    }

    let pump = &report.pump;
    out.push_str(&format!(
        "\n  Pump: {:.2} GPM at {:.2} ft head ({:.3} WHP)",
        pump.total_flow_gpm, pump.required_head_ft, pump.water_horsepower
    ));
    if let Some(zone) = &pump.critical_zone {
        out.push_str(&format!(", critical zone {zone}"));
    }
    out.push('\n');
    out
}

fn render_zone(zone: &ZoneResult) -> String {
    let (Some(op), Some(head), Some(cap)) = (&zone.operating, &zone.head, &zone.capacity) else {
        return format!(
            "  {:<12} invalid: {}\n",
            zone.id,
            zone.error.as_deref().unwrap_or("unknown error")
        );
    };
    let mut line = format!(
        "  {:<12} {:>10.0} {:>7.1} {:>8.2} {:>8.2} {:>9.2} {:>7.0}\n",
        zone.id,
        op.delivered_btu_hr,
        op.effective_delta_t_f,
        op.flow_gpm,
        head.velocity_fps,
        head.head_loss_ft,
        cap.utilization_pct
    );
    if op.emitter_limited() {
        line.push_str(&format!(
            "  {:<12} emitter-limited: {:.0} BTU/hr requested at design ΔT {:.1} °F\n",
            "", op.requested_btu_hr, op.design_delta_t_f
        ));
    }
    if let Some(rec) = &zone.recommended_delta_t {
        line.push_str(&format!(
            "  {:<12} recommended ΔT {:.1} °F\n",
            "", rec.delta_t_f
        ));
    }
    for advisory in &zone.advisories {
        line.push_str(&format!("  {:<12} - {advisory}\n", ""));
    }
    line
}

fn cmd_pipes(catalog_path: Option<&Path>, material: Option<PipeMaterial>) -> AppResult<()> {
    let catalog = project_service::load_catalog(catalog_path)?;
    let materials = match material {
        Some(m) => vec![m],
        None => vec![PipeMaterial::Copper, PipeMaterial::Pex, PipeMaterial::Steel],
    };

    for material in materials {
        let limits = catalog.velocity_limits(material)?;
        println!(
            "{material} (recommended {:.1} ft/s, absolute {:.1} ft/s)",
            limits.recommended_fps, limits.absolute_fps
        );
        for pipe in catalog.pipes_of(material) {
            println!(
                "  {:>6}  ID {:.3} in  {:>6.2} GPM rec  {:>6.2} GPM max",
                pipe.size.to_string(),
                pipe.inner_diameter_in,
                hs_components::max_flow_for_velocity(pipe, limits.recommended_fps),
                hs_components::max_flow_for_velocity(pipe, limits.absolute_fps)
            );
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_head_loss(
    catalog_path: Option<&Path>,
    flow: f64,
    length: f64,
    material: PipeMaterial,
    size: NominalSize,
    method: FrictionMethod,
    fluid: FluidSelection,
    temperature: f64,
) -> AppResult<()> {
    let catalog = project_service::load_catalog(catalog_path)?;
    let pipe = catalog.pipe(material, size)?;
    let properties = fluid.properties(temperature);

    let result = head_loss(&HeadLossInput {
        flow_gpm: flow,
        pipe,
        straight_length_ft: length,
        fitting_length_ft: 0.0,
        fluid: &properties,
        fluid_kind: fluid.kind,
        method,
        overrides: FrictionOverrides::default(),
    })?;

    println!(
        "{flow:.2} GPM through {length:.0} ft of {size}\" {material} ({}, {:.0} °F)",
        fluid.kind.display_name(),
        properties.temperature_f
    );
    println!("  Method:     {}", result.method);
    println!("  Velocity:   {:.2} ft/s", result.velocity_fps);
    println!("  Reynolds:   {:.0}", result.reynolds);
    if let Some(f) = result.friction_factor {
        println!("  Friction f: {f:.4}");
    }
    println!("  Head loss:  {:.2} ft", result.head_loss_ft);
    for advisory in &result.advisories {
        println!("  ! {advisory}");
    }
    Ok(())
}
