use super::CliError;
use super::helpers::*;
use anyhow::Context;
use fdtd_core::common::constants::WAVELENGTH_MULTIPLIER;
use fdtd_core::domain::{ErrorCode, FdtdError};
use fdtd_core::medium::{
    DrudeLorentzParameters, DrudeParameters, FieldSolver, PermittivityModel, TabulatedPermittivity,
};
use fdtd_core::numerics::CartesianVector;
use fdtd_core::pulse::{PulseSource, SOURCE_INDEX};
use fdtd_core::spectrum::{LinearDiscreteCollection, SpectrumUnit, SpectrumUnitKind};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(clap::Args)]
pub(super) struct PulseArgs {
    /// Simulation parameters as camelCase JSON; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of time steps; `numSteps` from the parameters when omitted
    #[arg(long)]
    steps: Option<usize>,

    /// Line index whose power spectrum is written
    #[arg(long, default_value_t = SOURCE_INDEX)]
    probe: usize,

    /// Output file; stdout when omitted
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(super) enum Material {
    /// Drude pole plus interband Lorentz resonance
    Silver,
    /// Free-electron Drude pole only
    SilverDrude,
    /// Interpolated measured table
    SilverTable,
}

impl Material {
    fn model(self) -> Box<dyn PermittivityModel> {
        match self {
            Self::Silver => Box::new(DrudeLorentzParameters::silver()),
            Self::SilverDrude => Box::new(DrudeParameters::silver()),
            Self::SilverTable => Box::new(TabulatedPermittivity::silver_sample()),
        }
    }
}

#[derive(clap::Args)]
pub(super) struct PermittivityArgs {
    #[arg(long, value_enum, default_value_t = Material::Silver)]
    material: Material,

    /// First wavelength, nm
    #[arg(long, default_value_t = 300.0)]
    start: f64,

    /// Last wavelength, nm
    #[arg(long, default_value_t = 700.0)]
    end: f64,

    /// Number of wavelengths, both ends included
    #[arg(long, default_value_t = 9)]
    count: usize,

    /// Output file; stdout when omitted
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct MediumArgs {
    /// Simulation parameters as camelCase JSON; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of time steps; `numSteps` from the parameters when omitted
    #[arg(long)]
    steps: Option<usize>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MediumSummary {
    cells: usize,
    body_cells: usize,
    steps: usize,
    time_step: f64,
    peak_body_field: f64,
    peak_background_field: f64,
}

pub(super) fn run_pulse_command(args: PulseArgs) -> Result<i32, CliError> {
    let parameters = load_parameters(args.config.as_deref())?;
    let steps = args.steps.unwrap_or(parameters.num_steps);
    let mut pulse = parameters.reference_pulse()?;

    if args.probe >= pulse.len() {
        return Err(CliError::Compute(FdtdError::new(
            ErrorCode::ProbeIndex,
            format!(
                "probe index {} is outside the reference line of length {}",
                args.probe,
                pulse.len()
            ),
        )));
    }

    pulse.run(steps);
    info!(steps, probe = args.probe, "reference pulse finished");

    let power = pulse.power_spectrum(args.probe).ok_or_else(|| {
        FdtdError::new(
            ErrorCode::PulseSpectrum,
            format!("no spectrum recorded at index {}", args.probe),
        )
    })?;

    let mut rows = Vec::with_capacity(power.len() + 1);
    rows.push("# wavelength_nm power".to_string());
    rows.extend(power.iter().map(|(unit, value)| {
        format!(
            "{:.4} {}",
            wavelength_nm(unit),
            format_scientific(*value)
        )
    }));
    write_rows(args.output.as_deref(), &rows)?;
    Ok(0)
}

pub(super) fn run_permittivity_command(args: PermittivityArgs) -> Result<i32, CliError> {
    let collection = LinearDiscreteCollection::new(
        args.start / WAVELENGTH_MULTIPLIER,
        args.end / WAVELENGTH_MULTIPLIER,
        args.count,
    )
    .map_err(FdtdError::from)?;
    let model = args.material.model();
    debug!(material = ?args.material, count = args.count, "tabulating permittivity");

    let mut rows = Vec::with_capacity(args.count + 1);
    rows.push("# wavelength_nm eps_re eps_im n k".to_string());
    for value in collection.values() {
        let unit = SpectrumUnit::wavelength(value);
        let eps = model.permittivity(&unit);
        let index = model.refractive_index(&unit);
        rows.push(format!(
            "{:.4} {} {} {} {}",
            wavelength_nm(&unit),
            format_scientific(eps.re),
            format_scientific(eps.im),
            format_scientific(index.re),
            format_scientific(index.im)
        ));
    }
    write_rows(args.output.as_deref(), &rows)?;
    Ok(0)
}

pub(super) fn run_medium_command(args: MediumArgs) -> Result<i32, CliError> {
    let parameters = load_parameters(args.config.as_deref())?;
    let steps = args.steps.unwrap_or(parameters.num_steps);
    let mut grid = parameters.medium_grid(&DrudeLorentzParameters::silver())?;

    let mut peak_body_field: f64 = 0.0;
    let mut peak_background_field: f64 = 0.0;
    for step in 0..steps {
        let drive = CartesianVector::new(parameters.pulse.sample(step), 0.0, 0.0);
        for cell in grid.cells_mut() {
            let magnitude = cell.solve(drive).norm();
            if cell.is_body() {
                peak_body_field = peak_body_field.max(magnitude);
            } else {
                peak_background_field = peak_background_field.max(magnitude);
            }
        }
    }

    let summary = MediumSummary {
        cells: grid.len(),
        body_cells: grid.body_cell_count(),
        steps,
        time_step: parameters.time_step(),
        peak_body_field,
        peak_background_field,
    };
    info!(?summary, "medium grid driven");

    let rows = if args.json {
        vec![serde_json::to_string_pretty(&summary).context("failed to serialize summary")?]
    } else {
        vec![
            format!("cells {}", summary.cells),
            format!("body_cells {}", summary.body_cells),
            format!("steps {}", summary.steps),
            format!("time_step {}", format_scientific(summary.time_step)),
            format!("peak_body_field {}", format_scientific(summary.peak_body_field)),
            format!(
                "peak_background_field {}",
                format_scientific(summary.peak_background_field)
            ),
        ]
    };
    write_rows(None, &rows)?;
    Ok(0)
}

fn wavelength_nm(unit: &SpectrumUnit) -> f64 {
    unit.to_kind(SpectrumUnitKind::Wavelength) * WAVELENGTH_MULTIPLIER
}
