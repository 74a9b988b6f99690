use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sqlscribe_core::Config;
use sqlscribe_engine::{Analysis, Pipeline};

const DEFAULT_CONFIG: &str = "sqlscribe.toml";

/// sqlscribe - SQL transformation documents and dataset dependencies
#[derive(Parser)]
#[command(name = "sqlscribe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: sqlscribe.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export documents, dependency JSON and spreadsheets
    Run {
        /// Transformation export CSV
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Additional table names CSV
        #[arg(short, long)]
        table_names: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also save the run summary as JSON
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Show the dependencies of one dataset
    Deps {
        /// Dataset name (case-insensitive)
        dataset: String,

        /// Show full (transitive) dependencies instead of direct ones
        #[arg(long)]
        full: bool,
    },

    /// Show every dataset that depends on a table or dataset
    Impact {
        /// Table or dataset name (case-insensitive)
        name: String,
    },

    /// Write a default sqlscribe.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Run { input, table_names, output, summary } => {
            let config = load_config(config_path, cli.verbose)?;
            run_command(config, input, table_names, output, summary.as_deref())
        }
        Commands::Deps { dataset, full } => {
            let config = load_config(config_path, cli.verbose)?;
            deps_command(&config, &dataset, full)
        }
        Commands::Impact { name } => {
            let config = load_config(config_path, cli.verbose)?;
            impact_command(&config, &name)
        }
        Commands::Init { force } => {
            init_command(config_path.unwrap_or(Path::new(DEFAULT_CONFIG)), force)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// Load config from an explicit path, ./sqlscribe.toml, or defaults
fn load_config(path: Option<&Path>, verbose: bool) -> Result<Config> {
    let config = if let Some(config_path) = path {
        Config::from_file(config_path)?
    } else if Path::new(DEFAULT_CONFIG).exists() {
        Config::from_file(Path::new(DEFAULT_CONFIG))?
    } else {
        if verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    if verbose {
        eprintln!("{} {}", "Project root:".cyan(), config.project_root.display());
    }

    Ok(config)
}

/// Paths given on the command line are relative to the working directory
fn absolute(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Run command - full export
fn run_command(
    mut config: Config,
    input: Option<PathBuf>,
    table_names: Option<PathBuf>,
    output: Option<PathBuf>,
    summary_path: Option<&Path>,
) -> Result<()> {
    if let Some(path) = input {
        config.input.transformations = absolute(path)?;
    }
    if let Some(path) = table_names {
        config.input.table_names = absolute(path)?;
    }
    if let Some(path) = output {
        config.output.directory = absolute(path)?;
    }

    let output_dir = config.output_dir();
    let summary = Pipeline::new(config).run()?;

    if let Some(path) = summary_path {
        summary.save_to_file(path)?;
        eprintln!("{} {}", "Summary saved to:".green(), path.display());
    }

    println!();
    println!("{}", summary.message().green().bold());
    println!("  {} {}", "Workflows:".bold(), summary.workflows);
    println!("  {} {}", "Datasets:".bold(), summary.datasets);
    println!("  {} {}", "Candidate names:".bold(), summary.universe_size);
    if summary.skipped_rows > 0 {
        println!(
            "  {} {}",
            "Skipped non-SQL rows:".bold(),
            summary.skipped_rows.to_string().yellow()
        );
    }
    println!("  {} {}", "Output:".bold(), output_dir.display());

    Ok(())
}

/// Deps command - direct or full dependencies of one dataset
fn deps_command(config: &Config, dataset: &str, full: bool) -> Result<()> {
    let analysis = Analysis::load(config)?;

    let deps = if full {
        analysis.full_of(dataset)
    } else {
        analysis.direct_of(dataset)
    };
    let deps = deps.ok_or_else(|| {
        anyhow::anyhow!(
            "Dataset '{}' not found. Only datasets with SQL transformations have dependencies.",
            dataset
        )
    })?;

    let kind = if full { "Full" } else { "Direct" };
    let name = dataset.to_uppercase();
    let workflow = analysis.catalog.workflow_of(&name).unwrap_or("UNKNOWN");

    println!("{} {} ({})", "Dataset:".bold(), name.green(), workflow);
    println!("{} {}", format!("{} dependencies:", kind).bold(), deps.len());

    for dep in deps {
        println!("  - {}", dep.yellow());
    }

    Ok(())
}

/// Impact command - every dataset downstream of a name
fn impact_command(config: &Config, name: &str) -> Result<()> {
    let analysis = Analysis::load(config)?;
    let key = name.to_uppercase();

    if !analysis.universe.contains(&key) {
        return Err(anyhow::anyhow!(
            "'{}' is not a known dataset or table name",
            name
        ));
    }

    let downstream = analysis.graph().downstream(&key);

    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "Downstream Impact Analysis".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();

    println!("{} {}", "Name:".bold(), key.green());
    println!("{} {}", "Downstream datasets:".bold(), downstream.len());
    println!();

    if downstream.is_empty() {
        println!("{}", "✓ No downstream dependencies".green());
    } else {
        println!("{}", "Affected datasets (nearest first):".bold());
        println!();

        for (i, dep) in downstream.iter().enumerate() {
            let workflow = analysis.catalog.workflow_of(dep).unwrap_or("UNKNOWN");
            println!("  {}. {} ({})", i + 1, dep.yellow(), workflow);
        }

        println!();
        println!("{}", "⚠ Changes here may break the datasets above!".yellow().bold());
    }

    println!();
    println!("{}", "=".repeat(60).bright_blue());

    Ok(())
}

/// Init command - write a default config file
fn init_command(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(anyhow::anyhow!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        ));
    }

    Config::default().save_to_file(path)?;
    println!("{} {}", "Wrote".green(), path.display());

    Ok(())
}
