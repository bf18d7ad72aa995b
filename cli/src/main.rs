#![allow(clippy::print_stdout)]
use crate::cli::{Args, Command};
use anyhow::{bail, Context};
use clap::Parser;
use rdf_harvest::extract::{ExtractOptions, ResolverOptions};
use rdf_harvest::ingest::ReaderOptions;
use rdf_harvest::reconcile::{
    dedupe_by_field, filter_by_hosts, merge_sources, read_records, write_records, FilterOptions,
    JsonRecord, MergeOptions,
};
use rdf_harvest::{extract_to_file, HarvestOptions};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

mod cli;

/// How many observed types are printed when a dump contains no restaurants.
const LISTED_TYPES: usize = 20;

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.level_filter());
    match args.command {
        Command::Extract {
            input,
            output,
            debug,
            progress_interval,
            on_cycle,
            max_depth,
        } => {
            let options = HarvestOptions {
                reader: ReaderOptions {
                    log_failures: debug,
                },
                extract: ExtractOptions {
                    progress_interval,
                    resolver: ResolverOptions {
                        cycle_policy: on_cycle.into(),
                        max_depth,
                    },
                },
            };
            extract(&input, &output, &options)
        }
        Command::Dedupe {
            input,
            output_name,
            key,
        } => dedupe(&input, output_name.as_deref(), &key),
        Command::Filter {
            inputs,
            allow_hosts,
            output,
        } => {
            let options = if allow_hosts.is_empty() {
                FilterOptions::default()
            } else {
                FilterOptions {
                    allowed_hosts: allow_hosts
                        .iter()
                        .map(|host| host.trim().to_ascii_lowercase())
                        .collect(),
                }
            };
            let output = output.unwrap_or_else(|| match inputs.first() {
                Some(input) => sibling(input, "filtered.json"),
                None => PathBuf::from("filtered.json"),
            });
            filter(&inputs, &options, &output)
        }
        Command::Merge {
            parsed,
            crawled,
            output_dir,
            target_host,
        } => {
            let mut options = MergeOptions::default();
            if let Some(target_host) = target_host {
                options.target_host = target_host.trim().to_ascii_lowercase();
            }
            let output_dir = output_dir.unwrap_or_else(|| sibling(&parsed, ""));
            merge(&parsed, &crawled, &output_dir, &options)
        }
    }
}

fn init_logging(level: LevelFilter) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn extract(input: &Path, output: &Path, options: &HarvestOptions) -> anyhow::Result<()> {
    let harvest = extract_to_file(input, output, options)
        .with_context(|| format!("Failed to extract records from {}", input.display()))?;
    let stats = harvest.parse;
    let report = harvest.extraction.report;
    println!(
        "Parsed {} statements from {} lines ({} failed, {} skipped)",
        stats.statements, stats.lines, stats.failed, stats.skipped
    );
    println!(
        "Extracted {} records ({} parent, {} standalone, {} item, {} direct)",
        report.total(),
        report.parent,
        report.standalone,
        report.item,
        report.direct
    );
    if report.skipped_entities > 0 {
        println!("Skipped {} unresolvable entities", report.skipped_entities);
    }
    if report.total() == 0 {
        println!("No restaurant entities found. Observed types:");
        for (name, count) in report.observed_types.iter().take(LISTED_TYPES) {
            println!("  {name}: {count}");
        }
    }
    println!("Wrote {}", output.display());
    Ok(())
}

fn dedupe(input: &Path, output_name: Option<&str>, key: &str) -> anyhow::Result<()> {
    let records = read_input(input)?;
    let input_count = records.len();
    let records = dedupe_by_field(records, key);
    let output = match output_name {
        Some(name) => sibling(input, name),
        None => sibling(
            input,
            &format!(
                "{}.deduped.json",
                input.file_stem().unwrap_or_default().to_string_lossy()
            ),
        ),
    };
    write_output(&output, &records)?;
    println!(
        "Kept {} of {input_count} records ({} duplicates by {key}), wrote {}",
        records.len(),
        input_count - records.len(),
        output.display()
    );
    Ok(())
}

fn filter(inputs: &[PathBuf], options: &FilterOptions, output: &Path) -> anyhow::Result<()> {
    let mut records = Vec::new();
    let mut readable = 0;
    for input in inputs {
        match read_records(input) {
            Ok(input_records) => {
                println!("Read {} records from {}", input_records.len(), input.display());
                records.extend(input_records);
                readable += 1;
            }
            Err(error) => println!("Skipping {}: {error}", input.display()),
        }
    }
    if readable == 0 {
        bail!("None of the input files could be read");
    }

    let outcome = filter_by_hosts(records, options);
    write_output(output, &outcome.records)?;
    let stats = outcome.stats;
    println!(
        "Kept {} of {} records ({} flattened, {} on other hosts, {} duplicates), wrote {}",
        stats.kept,
        stats.input,
        stats.flattened,
        stats.rejected,
        stats.duplicates,
        output.display()
    );
    Ok(())
}

fn merge(
    parsed: &Path,
    crawled: &Path,
    output_dir: &Path,
    options: &MergeOptions,
) -> anyhow::Result<()> {
    let parsed = read_input(parsed)?;
    let crawled = read_input(crawled)?;
    let outcome = merge_sources(parsed, crawled, options);

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    for (name, records) in [
        ("merged-overlap.json", &outcome.merged),
        ("crawl-only.json", &outcome.crawl_only),
        ("parsed-only.json", &outcome.parsed_only),
        ("missing-crawl.json", &outcome.missing_crawl),
    ] {
        let path = output_dir.join(name);
        write_output(&path, records)?;
        println!("Wrote {} records to {}", records.len(), path.display());
    }
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<Vec<JsonRecord>> {
    let records =
        read_records(path).with_context(|| format!("Failed to read {}", path.display()))?;
    println!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

fn write_output(path: &Path, records: &[JsonRecord]) -> anyhow::Result<()> {
    write_records(path, records).with_context(|| format!("Failed to write {}", path.display()))
}

/// A file name in the directory of `path`.
fn sibling(path: &Path, name: &str) -> PathBuf {
    path.parent().unwrap_or(Path::new("")).join(name)
}
