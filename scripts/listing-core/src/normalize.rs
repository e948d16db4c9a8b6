//! Record normalizer: turns raw listings into the canonical record set the
//! similarity stage works on.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::{Field, Record};
use crate::rules::CleaningRules;

static NON_DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").unwrap());

/// Trims every field and replaces missing-value proxies with `None`.
pub fn scrub_missing(records: &[Record], rules: &CleaningRules) -> Vec<Record> {
    records
        .iter()
        .map(|record| {
            let mut out = record.clone();
            out.map_fields(|field, value| scrub_value(field, value, rules));
            out
        })
        .collect()
}

fn scrub_value(field: Field, value: Option<String>, rules: &CleaningRules) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if rules.is_missing(field, trimmed) {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

/// Full cleaning pass. Steps run in a fixed order:
/// scrub, upper-case, phone, state, zip, scrub again.
pub fn normalize(records: &[Record], rules: &CleaningRules) -> Vec<Record> {
    let mut cleaned = scrub_missing(records, rules);
    let mut stats = NormalizeStats::default();
    for record in cleaned.iter_mut() {
        upper_case(record, rules);
        clean_phone(record, rules, &mut stats);
        clean_state(record, rules, &mut stats);
        clean_zip(record, rules, &mut stats);
    }
    debug!(
        "normalize: {} phones scrubbed, {} states scrubbed, {} zips repaired, {} zips scrubbed",
        stats.phones_scrubbed, stats.states_scrubbed, stats.zips_repaired, stats.zips_scrubbed
    );
    scrub_missing(&cleaned, rules)
}

#[derive(Debug, Default)]
struct NormalizeStats {
    phones_scrubbed: usize,
    states_scrubbed: usize,
    zips_repaired: usize,
    zips_scrubbed: usize,
}

fn upper_case(record: &mut Record, rules: &CleaningRules) {
    for &field in &rules.upper_case {
        if let Some(value) = record.get(field) {
            let upper = value.to_uppercase();
            record.set(field, Some(upper));
        }
    }
}

/// Keeps digits only; anything that is not exactly `phone_len` digits is dropped.
pub fn clean_phone_value(raw: &str, phone_len: usize) -> Option<String> {
    let digits = NON_DIGIT_RE.replace_all(raw, "");
    if digits.len() == phone_len {
        Some(digits.into_owned())
    } else {
        None
    }
}

fn clean_phone(record: &mut Record, rules: &CleaningRules, stats: &mut NormalizeStats) {
    if let Some(raw) = record.phone.take() {
        record.phone = clean_phone_value(&raw, rules.phone_len);
        if record.phone.is_none() {
            stats.phones_scrubbed += 1;
        }
    }
}

fn clean_state(record: &mut Record, rules: &CleaningRules, stats: &mut NormalizeStats) {
    if let Some(state) = record.state.take() {
        if state.len() == rules.state_len && rules.is_valid_state(&state) {
            record.state = Some(state);
        } else {
            stats.states_scrubbed += 1;
        }
    }
}

/// Zips that lost their leading zero are repaired for the states that use
/// one; any other zip of the wrong shape is dropped.
pub fn clean_zip_value(raw: &str, state: Option<&str>, rules: &CleaningRules) -> Option<String> {
    let candidate = if raw.len() + 1 == rules.zip_len
        && state.is_some_and(|s| rules.zip_has_zero_prefix(s))
    {
        format!("0{raw}")
    } else {
        raw.to_string()
    };
    if candidate.len() == rules.zip_len && candidate.bytes().all(|b| b.is_ascii_digit()) {
        Some(candidate)
    } else {
        None
    }
}

fn clean_zip(record: &mut Record, rules: &CleaningRules, stats: &mut NormalizeStats) {
    if let Some(raw) = record.zip.take() {
        record.zip = clean_zip_value(&raw, record.state.as_deref(), rules);
        match &record.zip {
            None => stats.zips_scrubbed += 1,
            Some(zip) if zip.len() != raw.len() => stats.zips_repaired += 1,
            Some(_) => {}
        }
    }
}
