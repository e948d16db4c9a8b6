//! Duplicate-candidate similarity engine.
//!
//! Three cohorts are scored the same way:
//! - repeated phone: every name pair inside phone groups of at least N
//!   records (duplicate suspects),
//! - unique phone sample: every pair from a seeded sample of businesses whose
//!   phone appears once (control),
//! - misspellings: reference `(correct, incorrect)` word pairs, used to pick
//!   a normalized-distance threshold.

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::error::{ListingError, Result};
use crate::grouping::{group_by, pair_count, pairs, sample, select_groups, GroupSize};
use crate::record::Record;
use crate::similarity::{char_len, edit_distance, jaccard, normalized_distance};
use crate::wordlist::MisspellingPair;

pub const DEFAULT_MIN_GROUP: usize = 3;
pub const DEFAULT_SAMPLE_SIZE: usize = 1000;
pub const DEFAULT_SEED: u64 = 123;
pub const DEFAULT_QUANTILE: f64 = 0.9;

#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePair {
    pub name1: String,
    pub name2: String,
    pub phone: Option<String>,
    pub levenshtein_distance: usize,
    pub max_length: usize,
    pub normalized: f64,
    pub jaccard: f64,
}

pub fn score_pair(name1: &str, name2: &str, phone: Option<&str>) -> CandidatePair {
    let levenshtein_distance = edit_distance(name1, name2);
    let max_length = char_len(name1).max(char_len(name2));
    CandidatePair {
        name1: name1.to_string(),
        name2: name2.to_string(),
        phone: phone.map(str::to_string),
        levenshtein_distance,
        max_length,
        normalized: normalized_distance(levenshtein_distance, max_length),
        jaccard: jaccard(name1, name2),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CohortKind {
    RepeatedPhone,
    UniquePhoneSample,
    Misspelling,
}

impl CohortKind {
    pub fn label(self) -> &'static str {
        match self {
            CohortKind::RepeatedPhone => "repeated_phone",
            CohortKind::UniquePhoneSample => "unique_phone_sample",
            CohortKind::Misspelling => "misspelling",
        }
    }

    /// Headers of the two compared strings in exports.
    pub fn name_columns(self) -> [&'static str; 2] {
        match self {
            CohortKind::Misspelling => ["correct", "incorrect"],
            _ => ["name1", "name2"],
        }
    }

    pub fn has_phone(self) -> bool {
        self == CohortKind::RepeatedPhone
    }
}

#[derive(Debug, Clone)]
pub struct Cohort {
    pub kind: CohortKind,
    pub pairs: Vec<CandidatePair>,
}

/// Progress bar in the house style; hidden when there is nothing to do.
pub fn progress_bar(len: u64, message: &str) -> ProgressBar {
    if len == 0 {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template(
        "[{elapsed_precise}] {bar:40.cyan/blue} {percent:>3}% {pos}/{len} {msg}",
    ) {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb
}

/// Records that can take part in pairing. Nameless records are dropped
/// before group sizes are evaluated.
fn named(records: &[Record]) -> Vec<&Record> {
    let kept: Vec<&Record> = records.iter().filter(|r| r.name.is_some()).collect();
    let dropped = records.len() - kept.len();
    if dropped > 0 {
        debug!("{dropped} records without a name excluded from pairing");
    }
    kept
}

pub fn repeated_phone_cohort(records: &[Record], filter: GroupSize, pb: &ProgressBar) -> Cohort {
    let named = named(records);
    let groups = select_groups(group_by(&named, |r| r.phone.as_deref()), filter);
    info!("{} phone groups selected with {:?}", groups.len(), filter);
    pb.set_length(groups.len() as u64);

    let groups: Vec<(&str, Vec<&&Record>)> = groups.into_iter().collect();
    let per_group: Vec<Vec<CandidatePair>> = groups
        .par_iter()
        .map(|(phone, members)| {
            let names: Vec<&str> = members.iter().filter_map(|r| r.name.as_deref()).collect();
            let scored: Vec<CandidatePair> = pairs(&names)
                .into_iter()
                .map(|(a, b)| score_pair(a, b, Some(*phone)))
                .collect();
            pb.inc(1);
            scored
        })
        .collect();
    pb.finish_with_message("repeated phones done");

    Cohort {
        kind: CohortKind::RepeatedPhone,
        pairs: per_group.into_iter().flatten().collect(),
    }
}

/// Names of businesses whose phone appears exactly once.
pub fn unique_phone_names(records: &[Record]) -> Vec<&str> {
    let named = named(records);
    select_groups(group_by(&named, |r| r.phone.as_deref()), GroupSize::Exactly(1))
        .into_values()
        .flatten()
        .copied()
        .filter_map(|r| r.name.as_deref())
        .collect()
}

pub fn unique_phone_cohort(
    records: &[Record],
    sample_size: usize,
    seed: u64,
    pb: &ProgressBar,
) -> Cohort {
    let population = unique_phone_names(records);
    if population.len() < sample_size {
        warn!(
            "only {} unique-phone businesses available, sample of {} truncated",
            population.len(),
            sample_size
        );
    }
    let sampled = sample(&population, sample_size, seed);
    let candidates = pairs(&sampled);
    info!(
        "unique phone sample: {} names, {} pairs (seed {seed})",
        sampled.len(),
        candidates.len()
    );
    pb.set_length(pair_count(sampled.len()) as u64);

    let scored: Vec<CandidatePair> = candidates
        .par_iter()
        .map(|(a, b)| {
            let pair = score_pair(a, b, None);
            pb.inc(1);
            pair
        })
        .collect();
    pb.finish_with_message("unique phones done");

    Cohort {
        kind: CohortKind::UniquePhoneSample,
        pairs: scored,
    }
}

pub fn misspelling_cohort(words: &[MisspellingPair]) -> Cohort {
    Cohort {
        kind: CohortKind::Misspelling,
        pairs: words
            .iter()
            .map(|w| score_pair(&w.correct, &w.incorrect, None))
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CohortSummary {
    pub label: &'static str,
    pub pairs: usize,
    pub mean_normalized: f64,
    pub median_normalized: f64,
    pub p90_normalized: f64,
    pub mean_jaccard: f64,
    /// Pairs whose normalized distance is at or under the calibrated threshold.
    pub within_threshold: usize,
}

pub fn summarize(cohort: &Cohort, threshold: f64) -> CohortSummary {
    let mut normalized: Vec<f64> = cohort.pairs.iter().map(|p| p.normalized).collect();
    normalized.sort_by(f64::total_cmp);
    let jaccards: Vec<f64> = cohort.pairs.iter().map(|p| p.jaccard).collect();
    CohortSummary {
        label: cohort.kind.label(),
        pairs: cohort.pairs.len(),
        mean_normalized: mean(&normalized),
        median_normalized: quantile(&normalized, 0.5).unwrap_or(0.0),
        p90_normalized: quantile(&normalized, 0.9).unwrap_or(0.0),
        mean_jaccard: mean(&jaccards),
        within_threshold: count_within(cohort, threshold),
    }
}

/// Normalized-distance threshold under which `quantile` of the reference
/// misspellings fall.
pub fn calibrate_threshold(cohort: &Cohort, q: f64) -> Result<f64> {
    let mut normalized: Vec<f64> = cohort.pairs.iter().map(|p| p.normalized).collect();
    normalized.sort_by(f64::total_cmp);
    quantile(&normalized, q).ok_or_else(|| ListingError::EmptyCohort(cohort.kind.label().into()))
}

pub fn count_within(cohort: &Cohort, threshold: f64) -> usize {
    cohort
        .pairs
        .iter()
        .filter(|p| p.normalized <= threshold)
        .count()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Linear-interpolated quantile of already sorted values.
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
