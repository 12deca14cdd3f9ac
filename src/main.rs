//! @ai:module:intent CLI for the OSINT report aggregator
//! @ai:module:layer presentation

use anyhow::Result;
use clap::{Parser, Subcommand};
use osint_report::{
    config::{OsintConfig, SourceFilter},
    Pipeline, PipelineOutcome, RunLocator, SearchTarget, ToolKind,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "osint-report")]
#[command(about = "Aggregate social media OSINT tool outputs into JSON and HTML reports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build reports from the tool outputs of a run directory
    Report {
        /// Username the tools were run for
        username: String,

        /// Working directory holding the tool outputs (defaults to the latest run)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only aggregate these tools (comma-separated: sherlock,twitter,social_analyzer)
        #[arg(long)]
        tools: Option<String>,

        /// Skip chart rendering
        #[arg(long)]
        no_charts: bool,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "osint.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("osint_report=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            username,
            dir,
            config,
            tools,
            no_charts,
        } => generate_report(ReportArgs {
            username,
            dir,
            config,
            tools,
            no_charts,
        }),
        Commands::Init { output } => init_config(output),
    }
}

struct ReportArgs {
    username: String,
    dir: Option<PathBuf>,
    config: Option<PathBuf>,
    tools: Option<String>,
    no_charts: bool,
}

/// @ai:intent Run the pipeline for one username and print a summary
/// @ai:effects fs:read, fs:write
fn generate_report(args: ReportArgs) -> Result<()> {
    let target = SearchTarget::new(&args.username)?;
    let mut config = load_or_default_config(args.config)?;

    if args.tools.is_some() {
        config.sources = SourceFilter {
            tools: parse_comma_list(args.tools),
        };
    }
    if args.no_charts {
        config.charts.enabled = false;
    }

    let dir = RunLocator::resolve(args.dir, &config.paths.results_dir, &target);
    tracing::info!("Reading tool outputs from {}", dir.display());

    let outcome = Pipeline::new(&config).run(&target, &dir);
    print_summary(&target, &config.sources, &outcome);

    Ok(())
}

/// @ai:intent Print per-tool status and the artifacts written
/// @ai:effects io
fn print_summary(target: &SearchTarget, filter: &SourceFilter, outcome: &PipelineOutcome) {
    println!();
    println!("{}", "=".repeat(50));
    println!("OSINT Report Summary");
    println!("Username: {}", target);

    for tool in ToolKind::ALL {
        let status = if !filter.matches(tool) {
            "Skipped"
        } else if outcome.report.tools.contains_key(&tool) {
            "Found"
        } else {
            "No results"
        };
        println!("  {:<16} {}", tool.display_name(), status);
    }

    if let Some(presence) = outcome.report.presence() {
        println!(
            "Platforms claimed: {} of {}",
            presence.claimed_count(),
            presence.platforms.len()
        );
    }
    if let Some(timeline) = outcome.report.timeline() {
        println!("Posts collected: {}", timeline.posts.len());
    }

    println!();
    println!("Artifacts written ({}):", outcome.written.len());
    for path in &outcome.written {
        println!("  - {}", path.display());
    }

    if !outcome.warnings.is_empty() {
        println!();
        println!("Warnings ({}):", outcome.warnings.len());
        for warning in &outcome.warnings {
            println!("  - {}", warning);
        }
    }
    println!("{}", "=".repeat(50));
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = OsintConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<OsintConfig> {
    match path {
        Some(p) => OsintConfig::load(&p),
        None => {
            let default_path = PathBuf::from("osint.toml");

            if default_path.exists() {
                OsintConfig::load(&default_path)
            } else {
                Ok(OsintConfig::default())
            }
        }
    }
}

/// @ai:intent Split a comma-separated argument
/// @ai:effects pure
fn parse_comma_list(s: Option<String>) -> Option<Vec<String>> {
    s.map(|v| {
        v.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
}
