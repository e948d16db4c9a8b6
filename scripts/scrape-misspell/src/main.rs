mod html;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use listing_core::logging;
use listing_core::wordlist::write_word_list;
use log::{debug, info, warn};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_URL: &str = "https://en.oxforddictionaries.com/spelling/common-misspellings";
const DEFAULT_OUT: &str = "derivedData/misspelledWordsLD.csv";
const DEFAULT_LOG: &str = "logs/scrape-misspell.log";

#[derive(Parser, Debug)]
#[command(
    name = "scrape-misspell",
    version,
    about = "Scrape a list of commonly misspelled words and export their Levenshtein distances"
)]
struct Cli {
    /// Page listing correct/misspelled word pairs in table rows
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// Parse a saved copy of the page instead of fetching --url
    #[arg(long)]
    html_file: Option<PathBuf>,

    /// Output CSV path (correct,incorrect,levenshteinDistance)
    #[arg(long, default_value = DEFAULT_OUT)]
    out_csv: PathBuf,

    /// Link prefix stripped from definition hrefs to recover the correct word
    #[arg(long, default_value = html::DEFINITION_PREFIX)]
    definition_prefix: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Write debug logs to logs/scrape-misspell.log
    #[arg(long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Explicit log file path (enables file logging)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug, cli.log_file.as_deref(), &PathBuf::from(DEFAULT_LOG));

    let page = match &cli.html_file {
        Some(path) => {
            info!("reading saved page {:?}", path);
            fs::read_to_string(path).with_context(|| format!("Read HTML file {:?}", path))?
        }
        None => fetch_page(&cli.url, cli.timeout)?,
    };
    debug!("page size: {} bytes", page.len());

    let pairs = html::extract_pairs(&page, &cli.definition_prefix);
    if pairs.is_empty() {
        return Err(anyhow!(
            "No word pairs found; the page layout may have changed ({} bytes scanned)",
            page.len()
        ));
    }
    if pairs.iter().any(|p| p.correct.contains('/')) {
        warn!("some correct words still contain '/'; check --definition-prefix");
    }

    write_word_list(&cli.out_csv, &pairs)
        .with_context(|| format!("Write word list {:?}", &cli.out_csv))?;
    println!("Done. Wrote {} word pairs to {:?}", pairs.len(), cli.out_csv);
    Ok(())
}

fn fetch_page(url: &str, timeout: u64) -> Result<String> {
    info!("fetching {url}");
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout))
        .user_agent("scrape-misspell/0.1")
        .build()
        .context("Build HTTP client")?;
    let resp = client
        .get(url)
        .send()
        .with_context(|| format!("GET {url}"))?
        .error_for_status()
        .with_context(|| format!("GET {url}"))?;
    resp.text().with_context(|| format!("Read body of {url}"))
}
