use clap::{Parser, Subcommand};
use cropmix_core::{FarmData, FarmInstance, FarmModel, PrettyOptions, report};
use cropmix_solver::{DEFAULT_SOLVER, find_solver};
use std::env;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const SAMPLE_FARM: &str = include_str!("../data/sample_farm.json");

#[derive(Parser, Debug)]
#[command(author, version, about = "Crop allocation model inspector")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the instantiated model as ASCII
    Show(ShowArgs),
    /// Resolve the path of an installed solver binary
    Locate(LocateArgs),
    /// Run the full report battery against an instance
    Report(ReportArgs),
}

#[derive(Parser, Debug)]
struct ShowArgs {
    /// Farm data JSON file (built-in two-crop sample when omitted)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Disable truncation of long models
    #[arg(long)]
    full: bool,
}

#[derive(Parser, Debug)]
struct LocateArgs {
    /// Solver binary to look for
    #[arg(long, default_value = DEFAULT_SOLVER)]
    solver: String,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// Farm data JSON file (built-in two-crop sample when omitted)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Variable values in vegetable declaration order
    #[arg(long, value_delimiter = ',')]
    values: Vec<f64>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;
    let cli = Cli::parse();
    match cli.command {
        Command::Show(args) => show_command(&args),
        Command::Locate(args) => locate_command(&args),
        Command::Report(args) => report_command(&args),
    }
}

/// Structured logging driven by `CROPMIX_TRACE` (filter, default off) and
/// `CROPMIX_LOG_FORMAT` (`pretty` or `json`), written to stderr so report
/// output on stdout stays clean.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let level = env::var("CROPMIX_TRACE").unwrap_or_else(|_| "off".to_string());
    let filter = if level.eq_ignore_ascii_case("off") {
        EnvFilter::default().add_directive(LevelFilter::OFF.into())
    } else {
        EnvFilter::try_new(&level)?
    };

    let format = env::var("CROPMIX_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let registry = tracing_subscriber::registry().with(filter);
    if format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).json())
            .try_init()?;
    } else if format.eq_ignore_ascii_case("pretty") {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).pretty())
            .try_init()?;
    } else {
        return Err("Invalid CROPMIX_LOG_FORMAT (expected 'json' or 'pretty')".into());
    }
    Ok(())
}

fn load_farm(data: Option<&PathBuf>) -> Result<(FarmData, FarmInstance), Box<dyn std::error::Error>> {
    let data = match data {
        Some(path) => FarmData::from_json_file(path)?,
        None => FarmData::from_json_str(SAMPLE_FARM)?,
    };
    let farm = FarmModel::new().instantiate(&data)?;
    Ok((data, farm))
}

fn show_command(args: &ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_, farm) = load_farm(args.data.as_ref())?;
    let options = if args.full {
        PrettyOptions::full()
    } else {
        PrettyOptions::preview()
    };
    println!("{}", farm.instance().model().format_ascii(options));
    Ok(())
}

fn locate_command(args: &LocateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = env::current_dir()?;
    let path = find_solver(&args.solver, &cwd)?;
    println!("{}", path.display());
    Ok(())
}

fn report_command(args: &ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (data, mut farm) = load_farm(args.data.as_ref())?;

    if !args.values.is_empty() {
        if args.values.len() != data.vegetables.len() {
            return Err(format!(
                "expected {} values (one per vegetable), got {}",
                data.vegetables.len(),
                args.values.len()
            )
            .into());
        }
        for (vegetable, value) in data.vegetables.iter().zip(&args.values) {
            // instantiate registered every vegetable, so the handle exists
            if let Some(id) = farm.planted(vegetable) {
                farm.instance_mut().set_value(id, *value)?;
            }
        }
    }

    let instance = farm.instance();
    report::print_objective_expression(instance)?;
    report::print_objective_value(instance)?;
    println!();
    report::print_variable_values(instance)?;
    println!();
    report::print_slacks(instance)?;
    report::print_duals(instance)?;
    println!();
    report::print_bound_check(instance)?;
    report::print_bounds(instance)?;
    Ok(())
}
