use chrono::Utc;
use clap::{ArgAction, Parser};
use eyre::WrapErr;
use rmatch::config::{Config, LoaderKind};
use rmatch::loaders::{CsvLoader, DbLoader};
use rmatch::materialize::{AssignmentRecord, materialize};
use rmatch::model::{ProjectEntry, StudentEntry};
use rmatch::{DeferredAcceptance, checks, display, remap};
use std::path::PathBuf;
use tracing::{Level, info};

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Use this configuration file
    #[arg(short, long, default_value = "rmatch.toml")]
    config: PathBuf,
    /// Do not write back results
    #[arg(short = 'n', long)]
    dry_run: bool,
    /// Do not display the per-project details
    #[arg(short, long)]
    quiet: bool,
    /// Set verbosity level (repeat for more)
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,
}

fn solve(
    config: &Config,
    args: &Args,
    students: &[StudentEntry],
    projects: &[ProjectEntry],
) -> eyre::Result<Vec<AssignmentRecord>> {
    let mut assignments = remap::remap(students, projects).wrap_err("invalid matching input")?;
    let stats = DeferredAcceptance::new(&mut assignments).assign();
    let completed_at = Utc::now();
    checks::ensure_within_capacity(&assignments)?;
    if config.solver.check_stability {
        checks::ensure_stable(&assignments)?;
    }
    checks::warn_unmatched(&assignments);
    if !args.quiet {
        display::display_details(&assignments);
    }
    display::display_stats(&assignments, stats);
    display::display_unmatched(&assignments);
    display::display_spare_capacity(&assignments);
    Ok(materialize(&assignments, completed_at))
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let level = match args.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let config = Config::load(&args.config)?;
    match config.solver.loader {
        LoaderKind::Csv => {
            let loader = CsvLoader::new(config.csv()?.clone());
            let (students, projects) = loader.load()?;
            let records = solve(&config, &args, &students, &projects)?;
            if !args.dry_run {
                loader.save_assignments(&records)?;
                info!(records = records.len(), "assignments saved");
            }
        }
        LoaderKind::Database => {
            let mut loader = DbLoader::new(&config.database()?.url).await?;
            let (students, projects) = loader.load().await?;
            let records = solve(&config, &args, &students, &projects)?;
            if !args.dry_run {
                loader.save_assignments(&records).await?;
                info!(records = records.len(), "assignments saved");
            }
        }
    }
    Ok(())
}
