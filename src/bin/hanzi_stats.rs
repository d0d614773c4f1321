// Hanzi-Stats CLI Tool
// Command-line interface for script variant and HSK grade statistics

use anyhow::{Context, Result};
use clap::Parser;
use hanzi_stats::extract::contains_hanzi;
use hanzi_stats::{
    AnalysisConfig, Analyser, Analysis, DataLoader, GradeBand, StatisticsRow, Variant, HSK_GRADES,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Hanzi Stats - Script variant and HSK grade statistics for Chinese text
#[derive(Parser, Debug)]
#[command(name = "hanzi-stats")]
#[command(about = "Classify Chinese text as Simplified or Traditional and report HSK grade statistics", long_about = None)]
#[command(version)]
struct Args {
    /// UTF-8 text files to analyse
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// TOML configuration file (defaults to HANZI_STATS_* environment variables)
    #[arg(short, long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Grade catalog file replacing the bundled catalog
    #[arg(long, value_name = "TSV")]
    catalog: Option<PathBuf>,

    /// Ambiguous mapping file
    #[arg(long, value_name = "TSV")]
    ambiguous: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(short, long)]
    json: bool,

    /// Show catalog information and progress logs
    #[arg(short, long)]
    verbose: bool,
}

/// JSON report for one input file
#[derive(Debug, Serialize)]
struct FileReport<'a> {
    file: String,
    variant: Variant,
    hanzi: u64,
    ambiguous_keys: Vec<char>,
    statistics: &'a [StatisticsRow],
}

impl<'a> FileReport<'a> {
    fn new(path: &Path, analysis: &'a Analysis) -> Self {
        Self {
            file: path.display().to_string(),
            variant: analysis.variant,
            hanzi: analysis.grade_counts.total().occurrences,
            ambiguous_keys: analysis.annotated.ambiguous_keys(),
            statistics: &analysis.statistics,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = resolve_config(&args)?;
    let analyser = Analyser::from_config(&config).context("Failed to load grade catalog")?;

    if args.verbose {
        print_catalog_info(&analyser);
    }

    let texts = args
        .files
        .iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))
        })
        .collect::<Result<Vec<String>>>()?;

    for path in files_without_hanzi(&args.files, &texts) {
        warn!(file = %path.display(), "No Han characters found");
    }

    info!(files = texts.len(), "Analysing");
    let analyses = analyser.analyse_batch(&texts);

    if args.json {
        let reports: Vec<FileReport<'_>> = args
            .files
            .iter()
            .zip(&analyses)
            .map(|(path, analysis)| FileReport::new(path, analysis))
            .collect();
        let json = serde_json::to_string_pretty(&reports).context("Failed to encode JSON")?;
        println!("{}", json);
        return Ok(());
    }

    for (idx, (path, analysis)) in args.files.iter().zip(&analyses).enumerate() {
        if idx > 0 {
            println!();
        }
        println!("{}", path.display());
        println!(
            "Variant: {} ({} hanzi, {} distinct)",
            analysis.variant,
            analysis.grade_counts.total().occurrences,
            analysis.grade_counts.total().unique
        );
        println!();
        print!("{}", format_table(&analysis.statistics));
    }

    Ok(())
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file or environment, then command-line overrides
fn resolve_config(args: &Args) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::from_env().context("Invalid HANZI_STATS_* environment")?,
    };

    if let Some(catalog) = &args.catalog {
        config.catalog_path = Some(catalog.clone());
    }
    if let Some(ambiguous) = &args.ambiguous {
        config.ambiguous_path = Some(ambiguous.clone());
    }
    Ok(config)
}

fn files_without_hanzi<'a>(files: &'a [PathBuf], texts: &[String]) -> Vec<&'a Path> {
    files
        .iter()
        .zip(texts)
        .filter(|(_, text)| !contains_hanzi(text))
        .map(|(path, _)| path.as_path())
        .collect()
}

fn print_catalog_info(analyser: &Analyser) {
    let catalog = analyser.catalog();
    let mut sizes: Vec<(u8, usize)> = catalog.grade_sizes().into_iter().collect();
    sizes.sort_unstable();

    println!("Catalog: {} entries", catalog.len());
    for (grade, size) in sizes {
        println!("  grade {}: {}", grade_label(grade), size);
    }
    let info = DataLoader::info();
    println!("Bundled data: {} bytes", info.total_size);
    println!();
}

fn grade_label(grade: u8) -> String {
    if grade > HSK_GRADES {
        GradeBand::Beyond.to_string()
    } else {
        GradeBand::Hsk(grade).to_string()
    }
}

/// Render statistics rows as an aligned text table
fn format_table(rows: &[StatisticsRow]) -> String {
    let mut out = format!(
        "{:<7} {:>7} {:>8} {:>7} {:>8} {:>9} {:>8} {:>9} {:>8}\n",
        "Grade", "Unique", "%", "Cum", "Cum %", "Count", "%", "Cum", "Cum %"
    );
    for row in rows {
        out.push_str(&format!(
            "{:<7} {:>7} {:>8} {:>7} {:>8} {:>9} {:>8} {:>9} {:>8}\n",
            row.grade.to_string(),
            row.unique,
            format_pct(row.unique_pct),
            row.cumulative_unique,
            format_pct(row.cumulative_unique_pct),
            row.occurrences,
            format_pct(row.occurrences_pct),
            row.cumulative_occurrences,
            format_pct(row.cumulative_occurrences_pct),
        ));
    }
    out
}

fn format_pct(value: f64) -> String {
    format!("{:.2}", value)
}
