//! linkdiff - compare two mostly-hardlinked directory trees.
//!
//! Usage:
//!   linkdiff tree <LEFT> <RIGHT>          Classify shared vs diverged content
//!   linkdiff file <LEFT> <RIGHT> <PATH>   Byte-level diff of one diverged file
//!   linkdiff --help                       Show help

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;

use linkdiff_analyze::{TreeComparison, classify, diff_files, rank_worst_offenders};
use linkdiff_scan::TreeInventory;

mod report;

use report::HexdumpCommand;

#[derive(Parser)]
#[command(
    name = "linkdiff",
    version,
    about = "Compare trees of mostly-hardlinked files",
    long_about = "linkdiff compares two directory trees that are expected to share most \
                  of their content via hardlinks, such as two versions of a runtime \
                  image, and reports how much is still shared versus diverged."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare the contents of two directory trees
    Tree {
        /// Path to the left tree
        left: PathBuf,

        /// Path to the right tree
        right: PathBuf,

        /// List files which are only in left
        #[arg(long)]
        list_unique: bool,

        /// Number of worst offenders to inspect in detail
        #[arg(short = 'n', long, default_value = "25")]
        top: usize,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Compare a specific file in the two trees
    ///
    /// This is very fast if left/PATH and right/PATH are almost identical,
    /// and very slow if not.
    File {
        /// Path to the left tree
        left: PathBuf,

        /// Path to the right tree
        right: PathBuf,

        /// Relative path to a file which exists in both trees
        path: PathBuf,

        /// If at most this many bytes differ, print a hex-dump diff
        #[arg(long, value_name = "T", default_value = "512")]
        diff_threshold: u64,

        /// Refuse to load files larger than this many bytes
        #[arg(long, value_name = "N")]
        max_bytes: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Tree {
            left,
            right,
            list_unique,
            top,
            format,
        } => run_tree(&left, &right, list_unique, top, format),
        Command::File {
            left,
            right,
            path,
            diff_threshold,
            max_bytes,
        } => run_file(&left, &right, &path, diff_threshold, max_bytes),
    }
}

/// Serialized form of the `tree` subcommand's report.
#[derive(Serialize)]
struct TreeReport<'a> {
    left_root: &'a Path,
    right_root: &'a Path,
    common: PartitionSummary,
    left_only: PartitionSummary,
    right_only: PartitionSummary,
    left_paths_missing_in_right: &'a [PathBuf],
    diverged_path_count: usize,
    worst_offenders: Vec<OffenderRow>,
}

#[derive(Serialize)]
struct PartitionSummary {
    identity_count: usize,
    total_bytes: u64,
}

#[derive(Serialize)]
struct OffenderRow {
    path: PathBuf,
    left_bytes: u64,
    right_bytes: u64,
    differing_bytes: u64,
}

/// Inventory both roots, classify, and report the worst diverged paths.
fn run_tree(
    left_root: &Path,
    right_root: &Path,
    list_unique: bool,
    top: usize,
    format: OutputFormat,
) -> Result<()> {
    let left = TreeInventory::build(left_root)
        .wrap_err_with(|| format!("failed to inventory {}", left_root.display()))?;
    let right = TreeInventory::build(right_root)
        .wrap_err_with(|| format!("failed to inventory {}", right_root.display()))?;

    let comparison = classify(&left, &right);
    let offenders = rank_worst_offenders(&left, &right, &comparison.diverged_paths, top);

    // Differing byte counts for the table; any read failure aborts.
    let mut rows = Vec::with_capacity(offenders.len());
    for offender in offenders {
        let diff = diff_files(
            &left.root.join(&offender.path),
            &right.root.join(&offender.path),
            None,
        )
        .wrap_err_with(|| format!("failed to diff {}", offender.path.display()))?;
        rows.push((offender, diff.differing_bytes));
    }

    match format {
        OutputFormat::Text => {
            print_tree_report(left_root, &comparison, list_unique, &rows);
        }
        OutputFormat::Json => {
            let report = TreeReport {
                left_root,
                right_root,
                common: summarize(&comparison.common),
                left_only: summarize(&comparison.left_only),
                right_only: summarize(&comparison.right_only),
                left_paths_missing_in_right: &comparison.left_paths_missing_in_right,
                diverged_path_count: comparison.diverged_paths.len(),
                worst_offenders: rows
                    .into_iter()
                    .map(|(o, differing_bytes)| OffenderRow {
                        path: o.path,
                        left_bytes: o.left_bytes,
                        right_bytes: o.right_bytes,
                        differing_bytes,
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn summarize(partition: &linkdiff_analyze::IdentityPartition) -> PartitionSummary {
    PartitionSummary {
        identity_count: partition.count(),
        total_bytes: partition.total_bytes,
    }
}

fn print_tree_report(
    left_root: &Path,
    comparison: &TreeComparison,
    list_unique: bool,
    rows: &[(linkdiff_analyze::WorstOffender, u64)],
) {
    print_partition("Common:", &comparison.common);
    print_partition("Left:", &comparison.left_only);
    print_partition("Right:", &comparison.right_only);

    println!(
        "Only in {}: {}",
        left_root.display(),
        comparison.left_paths_missing_in_right.len()
    );
    if list_unique {
        let mut unique: Vec<_> = comparison.left_paths_missing_in_right.clone();
        unique.sort();
        for path in unique {
            println!("- {}", path.display());
        }
    }

    println!(
        "Exist but different in both trees: {}",
        comparison.diverged_paths.len()
    );
    println!("Worst offenders:");
    print!("{}", report::format_offender_table(rows));
}

fn print_partition(label: &str, partition: &linkdiff_analyze::IdentityPartition) {
    println!(
        "{:<7} {:>6} files, {:>10} bytes ({})",
        label,
        partition.count(),
        partition.total_bytes,
        format_size(partition.total_bytes)
    );
}

/// Diff one relative path across both trees; show the hex-dump diff for
/// each span when few enough bytes differ.
fn run_file(
    left_root: &Path,
    right_root: &Path,
    path: &Path,
    diff_threshold: u64,
    max_bytes: Option<u64>,
) -> Result<()> {
    let left_path = left_root.join(path);
    let right_path = right_root.join(path);

    let diff = diff_files(&left_path, &right_path, max_bytes)
        .wrap_err_with(|| format!("failed to diff {}", path.display()))?;

    println!(
        "{} bytes ({}%) differ",
        diff.differing_bytes,
        format_percent(diff.percent)
    );

    if diff.differing_bytes <= diff_threshold {
        let renderer = HexdumpCommand::default();
        for span in &diff.spans {
            let rendered = report::render_span_diff(&renderer, &left_path, &right_path, span)
                .wrap_err_with(|| format!("failed to render span {span}"))?;
            print!("{rendered}");
        }
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Render a percentage with four significant digits and at least one
/// decimal place, trailing zeros trimmed: `33.33`, `0.1235`, `100.0`.
fn format_percent(pct: f64) -> String {
    if pct <= 0.0 {
        return "0.0".to_string();
    }
    let magnitude = pct.abs().log10().floor() as i32;
    let decimals = (3 - magnitude).max(1) as usize;
    let mut rendered = format!("{pct:.decimals$}");
    while rendered.ends_with('0') && !rendered.ends_with(".0") {
        rendered.pop();
    }
    rendered
}
