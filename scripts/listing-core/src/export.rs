//! CSV exports of profiling tables and scored cohorts.

use std::fs;
use std::path::Path;

use crate::engine::{Cohort, CohortSummary};
use crate::error::{ListingError, Result};
use crate::profile::FrequencyRow;
use crate::record::Field;

fn writer(path: &Path) -> Result<csv::Writer<fs::File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ListingError::io(parent, e))?;
    }
    Ok(csv::WriterBuilder::new()
        .has_headers(true)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_path(path)?)
}

fn finish(mut writer: csv::Writer<fs::File>, path: &Path) -> Result<()> {
    writer.flush().map_err(|e| ListingError::io(path, e))
}

/// Two-column `field,<value_header>` table.
pub fn write_field_table<T: ToString>(
    path: &Path,
    value_header: &str,
    rows: &[(Field, T)],
) -> Result<()> {
    let mut w = writer(path)?;
    w.write_record(["field", value_header])?;
    for (field, value) in rows {
        w.write_record([field.column(), value.to_string().as_str()])?;
    }
    finish(w, path)
}

pub fn write_frequencies(path: &Path, rows: &[FrequencyRow]) -> Result<()> {
    let mut w = writer(path)?;
    w.write_record(["attribute", "level", "frequency"])?;
    for row in rows {
        w.write_record([
            row.field.column(),
            row.value.as_str(),
            row.count.to_string().as_str(),
        ])?;
    }
    finish(w, path)
}

/// `name1,name2,[phone,]levenshteinDistance,maxLength,normalized,jaccard`.
pub fn write_cohort(path: &Path, cohort: &Cohort) -> Result<()> {
    let mut w = writer(path)?;
    let [first, second] = cohort.kind.name_columns();
    let with_phone = cohort.kind.has_phone();
    let mut header = vec![first, second];
    if with_phone {
        header.push("phone");
    }
    header.extend(["levenshteinDistance", "maxLength", "normalized", "jaccard"]);
    w.write_record(&header)?;

    for pair in &cohort.pairs {
        let mut row = vec![pair.name1.clone(), pair.name2.clone()];
        if with_phone {
            row.push(pair.phone.clone().unwrap_or_default());
        }
        row.push(pair.levenshtein_distance.to_string());
        row.push(pair.max_length.to_string());
        row.push(format!("{:.6}", pair.normalized));
        row.push(format!("{:.6}", pair.jaccard));
        w.write_record(&row)?;
    }
    finish(w, path)
}

pub fn write_summary(path: &Path, threshold: f64, summaries: &[CohortSummary]) -> Result<()> {
    let mut w = writer(path)?;
    w.write_record([
        "cohort",
        "pairs",
        "meanNormalized",
        "medianNormalized",
        "p90Normalized",
        "meanJaccard",
        "threshold",
        "withinThreshold",
    ])?;
    for s in summaries {
        w.write_record([
            s.label.to_string(),
            s.pairs.to_string(),
            format!("{:.6}", s.mean_normalized),
            format!("{:.6}", s.median_normalized),
            format!("{:.6}", s.p90_normalized),
            format!("{:.6}", s.mean_jaccard),
            format!("{threshold:.6}"),
            s.within_threshold.to_string(),
        ])?;
    }
    finish(w, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{score_pair, CohortKind};

    #[test]
    fn cohort_headers_follow_kind() {
        let dir = tempfile::tempdir().unwrap();
        let repeated = Cohort {
            kind: CohortKind::RepeatedPhone,
            pairs: vec![score_pair("ACME", "ACME INC", Some("2125550100"))],
        };
        let path = dir.path().join("out").join("repeats.csv");
        write_cohort(&path, &repeated).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("name1,name2,phone,levenshteinDistance,maxLength,normalized,jaccard")
        );
        assert_eq!(
            lines.next(),
            Some("ACME,ACME INC,2125550100,4,8,0.500000,0.500000")
        );

        let words = Cohort {
            kind: CohortKind::Misspelling,
            pairs: vec![score_pair("believe", "beleive", None)],
        };
        let path = dir.path().join("words.csv");
        write_cohort(&path, &words).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("correct,incorrect,levenshteinDistance,maxLength,"));
    }

    #[test]
    fn field_table_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fill.csv");
        write_field_table(&path, "fillRate", &[(Field::Name, 0.5), (Field::Zip, 1.0)]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "field,fillRate\nname,0.5\nzip,1\n");
    }
}
