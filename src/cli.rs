//! CLI definition and dispatch.
//!
//! Stage progress goes to stderr; computed results go to stdout.

use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::file_export_adapter::FileExportAdapter;
use crate::adapters::json_history_adapter::{read_draws, JsonHistoryAdapter};
use crate::domain::error::FourdError;
use crate::domain::frequency::FrequencyTables;
use crate::domain::history::{merge, DEFAULT_RETENTION_DAYS};
use crate::domain::ranker::{parse_digit_filter, rank, CandidateScore, DEFAULT_TOP_PICKS};
use crate::ports::config_port::ConfigPort;
use crate::ports::export_port::ExportPort;
use crate::ports::history_port::HistoryPort;

#[derive(Parser, Debug)]
#[command(name = "fourd", about = "4-digit draw history and frequency analyzer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge incoming draws into history and refresh all exports
    Update {
        #[arg(short, long)]
        config: PathBuf,
        /// Incoming draws JSON (overrides [ingest] incoming_path)
        #[arg(short, long)]
        incoming: Option<PathBuf>,
        /// Retention window in days (overrides [history] retention_days)
        #[arg(long)]
        days: Option<i64>,
        /// Report the merge without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Score and rank candidates from a history file
    Analyze {
        #[arg(long)]
        history: PathBuf,
        /// Digits every pick must contain, comma-separated
        #[arg(long)]
        must: Option<String>,
        /// Digits no pick may contain, comma-separated
        #[arg(long)]
        exclude: Option<String>,
        #[arg(short, long, default_value_t = DEFAULT_TOP_PICKS)]
        limit: usize,
        /// Also write the analytics JSON document here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show draw count and date range of a history file
    Info {
        #[arg(long)]
        history: PathBuf,
    },
    /// Check a config file for problems
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Update {
            config,
            incoming,
            days,
            dry_run,
        } => run_update(&config, incoming.as_deref(), days, dry_run),
        Command::Analyze {
            history,
            must,
            exclude,
            limit,
            output,
        } => run_analyze(
            &history,
            must.as_deref(),
            exclude.as_deref(),
            limit,
            output.as_deref(),
        ),
        Command::Info { history } => run_info(&history),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, FourdError> {
    FileConfigAdapter::from_file(path).map_err(|e| FourdError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn require_string(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<String, FourdError> {
    config
        .get_string(section, key)
        .ok_or_else(|| FourdError::ConfigMissing {
            section: section.into(),
            key: key.into(),
        })
}

pub fn resolve_retention(config: &dyn ConfigPort, override_days: Option<i64>) -> Result<u64, FourdError> {
    let days = override_days
        .unwrap_or_else(|| config.get_int("history", "retention_days", DEFAULT_RETENTION_DAYS as i64));
    u64::try_from(days).map_err(|_| FourdError::ConfigInvalid {
        section: "history".into(),
        key: "retention_days".into(),
        reason: format!("must be >= 0, got {days}"),
    })
}

pub fn resolve_filters(config: &dyn ConfigPort) -> Result<(Vec<char>, Vec<char>), FourdError> {
    let must = parse_digit_filter(
        &config
            .get_string("analysis", "must_contain")
            .unwrap_or_default(),
    )?;
    let exclude = parse_digit_filter(
        &config
            .get_string("analysis", "exclude")
            .unwrap_or_default(),
    )?;
    Ok((must, exclude))
}

fn run_update(
    config_path: &Path,
    incoming_override: Option<&Path>,
    days_override: Option<i64>,
    dry_run: bool,
) -> Result<(), FourdError> {
    eprintln!("Loading config from {}", config_path.display());
    let config = load_config(config_path)?;

    let store = JsonHistoryAdapter::new(require_string(&config, "history", "path")?.into());
    let existing = store.load()?;
    eprintln!(
        "Loaded {} draws from {}",
        existing.len(),
        store.path().display()
    );

    let incoming_path = match incoming_override {
        Some(path) => path.to_path_buf(),
        None => require_string(&config, "ingest", "incoming_path")?.into(),
    };
    let incoming = read_draws(&incoming_path)?;
    eprintln!(
        "Read {} incoming draws from {}",
        incoming.len(),
        incoming_path.display()
    );

    let retention = resolve_retention(&config, days_override)?;
    let today = Local::now().date_naive();
    let merged = merge(&existing, &incoming, retention, today)?;
    eprintln!(
        "History: {} draws retained ({} day window)",
        merged.len(),
        retention
    );

    if dry_run {
        println!(
            "dry run: {} existing + {} incoming -> {} retained",
            existing.len(),
            incoming.len(),
            merged.len()
        );
        return Ok(());
    }

    store.save(&merged)?;

    let tables = FrequencyTables::compute(&merged)?;
    let (must, exclude) = resolve_filters(&config)?;
    let limit = config
        .get_int("analysis", "limit", DEFAULT_TOP_PICKS as i64)
        .max(0) as usize;
    let picks = rank(&tables, &must, &exclude, limit)?;

    let exporter = FileExportAdapter;
    if let Some(path) = config.get_string("export", "analytics_path") {
        exporter.write_analytics(&tables, &picks, Path::new(&path))?;
        eprintln!("Wrote analytics to {path}");
    }
    if let Some(path) = config.get_string("export", "csv_path") {
        exporter.write_history_csv(&merged, Path::new(&path))?;
        eprintln!("Wrote history CSV to {path}");
    }

    print_picks(&picks);
    Ok(())
}

fn run_analyze(
    history_path: &Path,
    must: Option<&str>,
    exclude: Option<&str>,
    limit: usize,
    output: Option<&Path>,
) -> Result<(), FourdError> {
    let store = JsonHistoryAdapter::new(history_path.to_path_buf());
    let history = store.load()?;
    if history.is_empty() {
        return Err(FourdError::NoData {
            reason: format!("{} is empty or missing", history_path.display()),
        });
    }
    eprintln!(
        "Loaded {} draws from {}",
        history.len(),
        history_path.display()
    );

    let tables = FrequencyTables::compute(&history)?;
    let must = parse_digit_filter(must.unwrap_or_default())?;
    let exclude = parse_digit_filter(exclude.unwrap_or_default())?;
    let picks = rank(&tables, &must, &exclude, limit)?;

    print_picks(&picks);
    print_digit_frequency(&tables);

    if let Some(path) = output {
        FileExportAdapter.write_analytics(&tables, &picks, path)?;
        eprintln!("Wrote analytics to {}", path.display());
    }
    Ok(())
}

fn run_info(history_path: &Path) -> Result<(), FourdError> {
    let store = JsonHistoryAdapter::new(history_path.to_path_buf());
    let history = store.load()?;
    if history.is_empty() {
        println!("{}: empty history", history_path.display());
        return Ok(());
    }

    let mut dates = history
        .iter()
        .map(|record| record.parsed_date())
        .collect::<Result<Vec<_>, _>>()?;
    dates.sort();

    let mut operators: Vec<&str> = history.iter().map(|r| r.operator.as_str()).collect();
    operators.sort();
    operators.dedup();

    println!("{}", history_path.display());
    println!("  draws:     {}", history.len());
    println!("  range:     {} to {}", dates[0], dates[dates.len() - 1]);
    println!("  operators: {}", operators.join(", "));
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), FourdError> {
    let config = load_config(config_path)?;
    require_string(&config, "history", "path")?;
    resolve_retention(&config, None)?;
    resolve_filters(&config)?;

    let limit = config.get_int("analysis", "limit", DEFAULT_TOP_PICKS as i64);
    if limit < 0 {
        return Err(FourdError::ConfigInvalid {
            section: "analysis".into(),
            key: "limit".into(),
            reason: format!("must be >= 0, got {limit}"),
        });
    }

    println!("{} OK", config_path.display());
    Ok(())
}

fn print_picks(picks: &[CandidateScore]) {
    println!("Top {} picks:", picks.len());
    for (i, pick) in picks.iter().enumerate() {
        println!("{:>4}. {}  score {}", i + 1, pick.number, pick.score);
    }
}

fn print_digit_frequency(tables: &FrequencyTables) {
    let mut counts: Vec<(usize, u64)> = (0..10)
        .map(|digit| (digit, tables.digit_count(digit)))
        .filter(|(_, count)| *count > 0)
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    println!("Digit frequency:");
    for (digit, count) in counts {
        println!("  {digit}: {count}");
    }
}
