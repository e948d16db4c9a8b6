use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use listing_core::engine::{
    self, calibrate_threshold, misspelling_cohort, progress_bar, repeated_phone_cohort, summarize,
    unique_phone_cohort, Cohort,
};
use listing_core::export::{write_cohort, write_field_table, write_frequencies, write_summary};
use listing_core::grouping::GroupSize;
use listing_core::normalize::{normalize, scrub_missing};
use listing_core::profile::{self, combined_cardinality};
use listing_core::rules::CleaningRules;
use listing_core::{loader, logging, wordlist, Field, Record};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

const DEFAULT_DATA: &str = "data_analysis.json";
const DEFAULT_WORD_LIST: &str = "derivedData/misspelledWordsLD.csv";
const DEFAULT_OUT_DIR: &str = "derivedData";
const DEFAULT_LOG: &str = "logs/listing-dedup.log";

#[derive(Parser, Debug)]
#[command(
    name = "listing-dedup",
    version,
    about = "Profile and clean business listings, then score duplicate-name candidates"
)]
struct Cli {
    /// JSON dataset (records or columns orientation)
    #[arg(long, default_value = DEFAULT_DATA)]
    data: PathBuf,

    /// Misspelling word list produced by scrape-misspell
    #[arg(long, default_value = DEFAULT_WORD_LIST)]
    word_list: PathBuf,

    /// Directory receiving every exported CSV
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// JSON file overriding the default cleaning rules
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Minimum number of businesses sharing a phone to pair their names
    #[arg(long, default_value_t = engine::DEFAULT_MIN_GROUP)]
    min_group: usize,

    /// Unique-phone businesses sampled for the control cohort
    #[arg(long, default_value_t = engine::DEFAULT_SAMPLE_SIZE)]
    sample_size: usize,

    /// Seed of the control sample
    #[arg(long, default_value_t = engine::DEFAULT_SEED)]
    seed: u64,

    /// Most frequent values kept per column in review_missing.csv
    #[arg(long, default_value_t = profile::DEFAULT_TOP_VALUES)]
    top_values: usize,

    /// Quantile of misspelling distances used as the duplicate threshold
    #[arg(long, default_value_t = engine::DEFAULT_QUANTILE)]
    quantile: f64,

    /// Write debug logs to logs/listing-dedup.log
    #[arg(long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Explicit log file path (enables file logging)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug, cli.log_file.as_deref(), &PathBuf::from(DEFAULT_LOG));
    if !(0.0..=1.0).contains(&cli.quantile) {
        return Err(anyhow!("--quantile must be within [0, 1], got {}", cli.quantile));
    }
    if cli.min_group < 2 {
        return Err(anyhow!("--min-group must be at least 2, got {}", cli.min_group));
    }
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let started = Instant::now();
    let rules = match &cli.rules {
        Some(path) => CleaningRules::from_json_file(path)
            .with_context(|| format!("Load cleaning rules {:?}", path))?,
        None => CleaningRules::default(),
    };
    // Fail before the long part if the reference list is unusable.
    let words = wordlist::load_word_list(&cli.word_list)
        .with_context(|| format!("Load word list {:?}", &cli.word_list))?;

    let raw = loader::load_records(&cli.data)
        .with_context(|| format!("Load dataset {:?}", &cli.data))?;
    println!("Loaded {} records from {:?}", raw.len(), cli.data);
    if raw.is_empty() {
        println!("Empty dataset, nothing to analyse.");
        return Ok(());
    }

    let out = |name: &str| cli.out_dir.join(name);

    // Explore: frequent values hint at missing-value proxies.
    let review = profile::value_frequencies(&raw, cli.top_values);
    write_frequencies(&out("review_missing.csv"), &review)?;
    write_field_table(&out("fill_rate.csv"), "fillRate", &profile::fill_rate(&raw))?;

    let scrubbed = scrub_missing(&raw, &rules);
    write_field_table(&out("fill_rate_clean.csv"), "fillRate", &profile::fill_rate(&scrubbed))?;

    let cleaned = normalize(&raw, &rules);
    write_field_table(&out("cardinality.csv"), "cardinality", &profile::cardinality(&cleaned))?;
    write_field_table(
        &out("fill_rate_scrubbed.csv"),
        "fillRate",
        &profile::fill_rate(&cleaned),
    )?;
    report_combinations(&cleaned);

    let repeated = {
        let pb = progress_bar(1, "repeated phones");
        repeated_phone_cohort(&cleaned, GroupSize::AtLeast(cli.min_group), &pb)
    };
    let unique = {
        let pb = progress_bar(1, "unique phones");
        unique_phone_cohort(&cleaned, cli.sample_size, cli.seed, &pb)
    };
    let misspellings = misspelling_cohort(&words);

    export_cohort(&out("similarity_repeats.csv"), &repeated)?;
    export_cohort(&out("similarity_unique.csv"), &unique)?;
    export_cohort(&out("similarity_misspellings.csv"), &misspellings)?;

    let threshold = calibrate_threshold(&misspellings, cli.quantile)
        .context("Calibrate threshold from the misspelling list")?;
    let summaries = [
        summarize(&repeated, threshold),
        summarize(&unique, threshold),
        summarize(&misspellings, threshold),
    ];
    write_summary(&out("summary.csv"), threshold, &summaries)?;

    println!(
        "Normalized distance threshold (q={:.2} of misspellings): {:.3}",
        cli.quantile, threshold
    );
    for s in &summaries {
        println!(
            "  {:<20} pairs: {:>8}  mean nLD: {:.3}  mean jaccard: {:.3}  ≤ threshold: {}",
            s.label, s.pairs, s.mean_normalized, s.mean_jaccard, s.within_threshold
        );
    }
    info!("finished in {} ms", started.elapsed().as_millis());
    println!("Done. Results in {:?}", cli.out_dir);
    Ok(())
}

/// Do businesses repeat because of multiple locations, or because several
/// share a central hotline?
fn report_combinations(records: &[Record]) {
    for (other, question) in [
        (Field::Address, "do businesses repeat due to multiple locations?"),
        (Field::Phone, "do phones repeat due to central company hotlines?"),
    ] {
        let combo = combined_cardinality(records, Field::Name, other);
        println!(
            "Unique name + {} strings: {} (unique names: {}) - {}",
            other.column(),
            combo.combined,
            combo.first,
            question
        );
    }
}

fn export_cohort(path: &Path, cohort: &Cohort) -> Result<()> {
    debug!("writing {} {} pairs to {:?}", cohort.pairs.len(), cohort.kind.label(), path);
    write_cohort(path, cohort).with_context(|| format!("Write {:?}", path))
}
