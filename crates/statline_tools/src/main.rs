//! Statline - command-line conversion tools

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use statline_core::convert::ConversionOptions;
use statline_core::export::{ability_line, export, parse_abilities};
use statline_tools::batch::{convert_path, load_options};
use statline_tools::validate::validate_data_directory;
use statline_tools::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "statline")]
#[command(about = "Convert detailed unit records into abstracted statlines")]
struct Cli {
    /// Log every pipeline stage
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a record file or a directory of record files
    Convert {
        /// Record file or directory
        path: PathBuf,
        /// Conversion options file (RON)
        #[arg(long)]
        options: Option<PathBuf>,
        /// Score at the crew's gunnery skill
        #[arg(long)]
        crew_skill: bool,
        /// Score at this skill rating
        #[arg(long)]
        skill: Option<i32>,
        /// Print JSON instead of tab-separated statlines
        #[arg(long)]
        json: bool,
    },
    /// Validate record files
    Validate {
        /// Path to data directory
        #[arg(default_value = "crates/statline_core/data/units")]
        path: PathBuf,
    },
    /// Parse an ability line and print it back in canonical form
    Parse {
        /// Comma-separated ability line
        line: String,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn conversion_options(
    file: Option<&Path>,
    crew_skill: bool,
    skill: Option<i32>,
) -> Result<ConversionOptions> {
    let mut options = match file {
        Some(path) => load_options(path)?,
        None => ConversionOptions::default(),
    };
    options.include_crew_skill |= crew_skill;
    if let Some(skill) = skill {
        options.default_skill = skill;
    }
    Ok(options)
}

fn run_convert(path: &Path, options: ConversionOptions, json: bool) -> Result<bool> {
    let entries = convert_path(path, options)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in &entries {
            match (&entry.element, &entry.error) {
                (Some(element), _) => println!("{}", export(element)),
                (None, Some(error)) => eprintln!("{}: {error}", entry.file.display()),
                (None, None) => {}
            }
        }
    }
    Ok(entries.iter().all(|entry| entry.is_ok()))
}

fn run_validate(path: &Path) -> Result<bool> {
    tracing::info!("Validating record files in: {}", path.display());
    let reports = validate_data_directory(path)?;
    for report in reports.iter().filter(|r| !r.is_valid()) {
        for problem in &report.problems {
            eprintln!("{}: {problem}", report.file.display());
        }
    }
    let valid = reports.iter().all(|r| r.is_valid());
    if valid {
        tracing::info!("Validation passed ({} files)", reports.len());
    }
    Ok(valid)
}

fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Convert {
            path,
            options,
            crew_skill,
            skill,
            json,
        } => {
            let options = conversion_options(options.as_deref(), crew_skill, skill)?;
            run_convert(&path, options, json)
        }
        Commands::Validate { path } => run_validate(&path),
        Commands::Parse { line } => {
            let catalog = parse_abilities(&line)?;
            println!("{}", ability_line(&catalog));
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
