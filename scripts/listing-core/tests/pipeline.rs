use std::fs;

use indicatif::ProgressBar;
use listing_core::engine::{
    calibrate_threshold, misspelling_cohort, repeated_phone_cohort, summarize, unique_phone_cohort,
};
use listing_core::export::{write_cohort, write_summary};
use listing_core::grouping::GroupSize;
use listing_core::loader::load_records;
use listing_core::normalize::normalize;
use listing_core::profile::{cardinality, fill_rate};
use listing_core::rules::CleaningRules;
use listing_core::wordlist::{load_word_list, write_word_list, MisspellingPair};
use listing_core::Field;

const DATASET: &str = r#"[
  {"name": "Joe's Pizza",      "phone": "(212) 555-0100", "state": "ny", "zip": "10001", "revenue": "0"},
  {"name": "JOES PIZZA",       "phone": "212.555.0100",   "state": "NY", "zip": "10001"},
  {"name": "Joe's Pizza Inc",  "phone": 2125550100,       "state": "NY", "zip": 10001},
  {"name": null,               "phone": "2125550100",     "state": "NY"},
  {"name": "Harbor Tools",     "phone": "860-555-0199",   "state": "CT", "zip": 6010},
  {"name": "Blue Cafe",        "phone": "3125550111",     "state": "IL", "zip": "60601"},
  {"name": "Green Garage",     "phone": "none",           "state": "ZZ", "zip": "606"},
  {"name": "Red Barn",         "phone": "4155550123",     "state": "CA", "zip": "94105"}
]"#;

#[test]
fn end_to_end_on_small_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data_analysis.json");
    fs::write(&data, DATASET).unwrap();

    let raw = load_records(&data).unwrap();
    assert_eq!(raw.len(), 8);

    let rules = CleaningRules::default();
    let cleaned = normalize(&raw, &rules);
    assert_eq!(cleaned[4].zip.as_deref(), Some("06010"));
    assert_eq!(cleaned[6].phone, None);
    assert_eq!(cleaned[6].state, None);
    assert_eq!(cleaned[0].revenue, None);

    let phone_fill = fill_rate(&cleaned)
        .into_iter()
        .find(|(f, _)| *f == Field::Phone)
        .unwrap()
        .1;
    assert_eq!(phone_fill, 7.0 / 8.0);
    let phones = cardinality(&cleaned)
        .into_iter()
        .find(|(f, _)| *f == Field::Phone)
        .unwrap()
        .1;
    assert_eq!(phones, 4);

    let repeated = repeated_phone_cohort(&cleaned, GroupSize::AtLeast(3), &ProgressBar::hidden());
    assert_eq!(repeated.pairs.len(), 3);
    assert_eq!(repeated.pairs[0].name1, "JOE'S PIZZA");
    assert_eq!(repeated.pairs[0].name2, "JOES PIZZA");
    assert_eq!(repeated.pairs[0].levenshtein_distance, 1);

    let unique = unique_phone_cohort(&cleaned, 1000, 123, &ProgressBar::hidden());
    assert_eq!(unique.pairs.len(), 3);

    let words_path = dir.path().join("derived").join("misspelledWordsLD.csv");
    write_word_list(
        &words_path,
        &[
            MisspellingPair::new("accommodate", "accomodate"),
            MisspellingPair::new("separate", "seperate"),
        ],
    )
    .unwrap();
    let words = misspelling_cohort(&load_word_list(&words_path).unwrap());
    let threshold = calibrate_threshold(&words, 0.9).unwrap();
    assert!(threshold > 0.0 && threshold < 0.2);

    let summaries = [
        summarize(&repeated, threshold),
        summarize(&unique, threshold),
        summarize(&words, threshold),
    ];
    assert_eq!(summaries[0].within_threshold, 1);
    assert_eq!(summaries[1].within_threshold, 0);

    let out = dir.path().join("out");
    write_cohort(&out.join("similarity_repeats.csv"), &repeated).unwrap();
    write_summary(&out.join("summary.csv"), threshold, &summaries).unwrap();
    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert_eq!(summary.lines().count(), 4);
    assert!(summary.lines().nth(1).unwrap().starts_with("repeated_phone,3,"));
}
