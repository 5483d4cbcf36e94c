//! symtally CLI - source inventory and call-statistics reporter.
//!
//! Consumes front-end event streams (JSON Lines files with resolved
//! declaration and invocation events), folds them through the core
//! registry, and writes the structured report to stdout:
//! - Front-matter block naming the analyzed inputs
//! - Per-unit declaration and call-site detail (unless `--quiet`)
//! - Trailing summary: unused abstract/interface members and/or the
//!   call-count histogram

use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use symtally_core::{
    filter_units, gather_event_files, init_structured_logging, load_all_events, load_config,
    Driver, Emitter, SummaryOptions, SymtallyConfig,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Source inventory and call-statistics reporter")]
pub struct Cli {
    /// Event-stream files or directories produced by a front end
    #[arg(required = true)]
    paths: Vec<String>,

    /// Only report compilation units whose name matches this regex
    #[arg(long)]
    project_pattern: Option<String>,

    /// Suppress per-entry detail; the trailing summary is still emitted
    #[arg(long)]
    quiet: bool,

    /// Include the call-count histogram in the summary
    #[arg(long)]
    callstats: bool,

    /// Omit the unused-interface-method section from the summary
    #[arg(long)]
    no_unused: bool,
}

/// Effective run options after merging flags over symtally.toml.
/// Flags always win; the config file only fills gaps.
struct RunOptions {
    pattern: Option<Regex>,
    quiet: bool,
    summary: SummaryOptions,
}

fn merge_options(cli: &Cli, config: Option<SymtallyConfig>) -> Result<RunOptions> {
    let config = config.unwrap_or_default();
    let summary_cfg = config.summary.unwrap_or_default();

    let pattern_src = cli
        .project_pattern
        .clone()
        .or(config.project_pattern);
    let pattern = pattern_src
        .map(|p| Regex::new(&p).with_context(|| format!("Invalid project pattern: {}", p)))
        .transpose()?;

    let unused = if cli.no_unused {
        false
    } else {
        summary_cfg.unused.unwrap_or(true)
    };

    Ok(RunOptions {
        pattern,
        quiet: cli.quiet || config.quiet.unwrap_or(false),
        summary: SummaryOptions {
            unused,
            callstats: cli.callstats || summary_cfg.callstats.unwrap_or(false),
        },
    })
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] symtally internal error: {}", info);
        eprintln!("[PANIC] The process will exit safely with a nonzero code.");
    }));

    // JSON logs to stderr; stdout carries only the report.
    init_structured_logging();

    let cli = Cli::parse();
    let config = load_config(Path::new(".")).context("Failed to load symtally.toml")?;
    let options = merge_options(&cli, config)?;

    let mut files: Vec<PathBuf> = Vec::new();
    for path in &cli.paths {
        let gathered = gather_event_files(Path::new(path))
            .with_context(|| format!("Failed to gather event files from: {}", path))?;
        files.extend(gathered);
    }
    if files.is_empty() {
        anyhow::bail!("No event-stream files (*.jsonl) found under the given paths");
    }

    let mut events = load_all_events(&files).context("Failed to load event streams")?;
    if let Some(pattern) = &options.pattern {
        events = filter_units(events, pattern);
    }
    tracing::info!(files = files.len(), events = events.len(), "event stream loaded");

    let inputs: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    {
        let emitter = Emitter::new(&mut out).with_quiet(options.quiet);
        let mut driver = Driver::new(emitter);
        driver.start(&inputs).context("Failed to write report")?;
        for event in &events {
            driver.handle(event).context("Failed to write report")?;
        }
        driver
            .finish(&options.summary)
            .context("Failed to write report summary")?;
    }
    out.flush().context("Failed to flush report")?;

    Ok(())
}
