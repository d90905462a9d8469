mod error;
mod output;
mod plot;

use clap::{Parser, Subcommand};
use error::CliResult;
use output::save_with_retry;
use std::path::{Path, PathBuf};
use std::time::Instant;
use ucn_app::{ParameterSet, SourceModel, report, run_all_sweeps};
use ucn_fluids::BoilingCurve;

const DEFAULT_BOILING_DATA: &str = "data/he3_boiling";

#[derive(Parser)]
#[command(name = "ucn")]
#[command(about = "UCN source cryogenics - steady-state cooling model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the source at one parameter set
    Solve {
        /// Parameter table (YAML or JSON); built-in defaults otherwise
        #[arg(long)]
        params: Option<PathBuf>,
        /// Directory holding the He-3 boiling curves
        #[arg(long, default_value = DEFAULT_BOILING_DATA)]
        boiling_data: PathBuf,
        /// Print the result record as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },
    /// Sweep every parameter over its range
    Sweep {
        /// Parameter table (YAML or JSON); built-in defaults otherwise
        #[arg(long)]
        params: Option<PathBuf>,
        /// Directory holding the He-3 boiling curves
        #[arg(long, default_value = DEFAULT_BOILING_DATA)]
        boiling_data: PathBuf,
        /// SVG file for the sweep panels
        #[arg(long, default_value = "sweeps.svg")]
        plot: PathBuf,
        /// CSV file for every sweep point
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Dump the default parameter table as YAML
    Params {
        /// Output file (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render the boiling-curve table as a colour map
    BoilingMap {
        /// Directory holding the He-3 boiling curves
        #[arg(long, default_value = DEFAULT_BOILING_DATA)]
        boiling_data: PathBuf,
        /// SVG output file
        #[arg(short, long, default_value = "boiling_map.svg")]
        output: PathBuf,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            params,
            boiling_data,
            json,
        } => cmd_solve(params.as_deref(), &boiling_data, json),
        Commands::Sweep {
            params,
            boiling_data,
            plot,
            csv,
        } => cmd_sweep(params.as_deref(), &boiling_data, &plot, csv.as_deref()),
        Commands::Params { output } => cmd_params(output.as_deref()),
        Commands::BoilingMap {
            boiling_data,
            output,
        } => cmd_boiling_map(&boiling_data, &output),
    }
}

fn load_params(path: Option<&Path>) -> CliResult<ParameterSet> {
    match path {
        Some(path) => Ok(ParameterSet::load(path)?),
        None => Ok(ParameterSet::default()),
    }
}

fn cmd_solve(params: Option<&Path>, boiling_data: &Path, json: bool) -> CliResult<()> {
    let params = load_params(params)?;
    let boiling = BoilingCurve::load_dir(boiling_data)?;
    let model = SourceModel::with_correlations(&boiling);

    let solved = model.solve(&params)?;
    if json {
        println!("{}", report::to_json(&solved)?);
    } else {
        println!("{}", report::summary(&solved.result));
        for diagnostic in solved.diagnostics.iter() {
            println!("  ! {}", diagnostic.message);
        }
    }
    Ok(())
}

fn cmd_sweep(
    params: Option<&Path>,
    boiling_data: &Path,
    plot_path: &Path,
    csv_path: Option<&Path>,
) -> CliResult<()> {
    let params = load_params(params)?;
    let boiling = BoilingCurve::load_dir(boiling_data)?;
    let model = SourceModel::with_correlations(&boiling);

    let start = Instant::now();
    let sweeps = run_all_sweeps(&model, &params)?;
    println!(
        "Swept {} parameters in {:.1}s",
        sweeps.len(),
        start.elapsed().as_secs_f64()
    );
    for sweep in &sweeps {
        if sweep.failed > 0 {
            println!(
                "  {}: {} of {} points without a solution",
                sweep.parameter,
                sweep.failed,
                sweep.len() + sweep.failed
            );
        }
    }

    let svg = plot::render_sweeps(&sweeps)?;
    save_with_retry(plot_path, svg.as_bytes())?;
    println!("✓ Saved sweep plot to {}", plot_path.display());

    if let Some(path) = csv_path {
        let table = output::sweep_table(&sweeps)?;
        save_with_retry(path, &table)?;
        println!("✓ Exported sweep table to {}", path.display());
    }
    Ok(())
}

fn cmd_params(output: Option<&Path>) -> CliResult<()> {
    let yaml = ParameterSet::default().to_yaml()?;
    if let Some(path) = output {
        save_with_retry(path, yaml.as_bytes())?;
        println!("✓ Wrote parameter table to {}", path.display());
    } else {
        print!("{}", yaml);
    }
    Ok(())
}

fn cmd_boiling_map(boiling_data: &Path, output: &Path) -> CliResult<()> {
    let boiling = BoilingCurve::load_dir(boiling_data)?;
    let svg = plot::render_boiling_map(&boiling)?;
    save_with_retry(output, svg.as_bytes())?;
    println!(
        "✓ Saved boiling map ({} samples) to {}",
        boiling.len(),
        output.display()
    );
    Ok(())
}
