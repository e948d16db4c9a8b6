//! Column profiling: fill rates, frequent values, cardinality.

use std::collections::{HashMap, HashSet};

use crate::record::{Field, Record};

pub const DEFAULT_TOP_VALUES: usize = 20;

/// Share of non-null cells per field; 0.0 for every field of an empty set.
pub fn fill_rate(records: &[Record]) -> Vec<(Field, f64)> {
    Field::ALL
        .into_iter()
        .map(|field| {
            let filled = records.iter().filter(|r| r.get(field).is_some()).count();
            let rate = if records.is_empty() {
                0.0
            } else {
                filled as f64 / records.len() as f64
            };
            (field, rate)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyRow {
    pub field: Field,
    pub value: String,
    pub count: usize,
}

/// The `top` most frequent values of every field. Missing-value proxies
/// ("0", "none", "N/A", ...) tend to float to the top of these lists.
pub fn value_frequencies(records: &[Record], top: usize) -> Vec<FrequencyRow> {
    let mut rows = Vec::new();
    for field in Field::ALL {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for value in records.iter().filter_map(|r| r.get(field)) {
            *counts.entry(value).or_default() += 1;
        }
        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|(va, ca), (vb, cb)| cb.cmp(ca).then_with(|| va.cmp(vb)));
        rows.extend(ranked.into_iter().take(top).map(|(value, count)| FrequencyRow {
            field,
            value: value.to_string(),
            count,
        }));
    }
    rows
}

/// Distinct non-null values per field.
pub fn cardinality(records: &[Record]) -> Vec<(Field, usize)> {
    Field::ALL
        .into_iter()
        .map(|field| {
            let distinct: HashSet<&str> = records.iter().filter_map(|r| r.get(field)).collect();
            (field, distinct.len())
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinedCardinality {
    pub combined: usize,
    pub first: usize,
}

/// Distinct `a + b` concatenations (both present) next to distinct `a`.
/// When the two are close, `a` alone nearly identifies a row; a large gap
/// means the same name repeats across addresses or phones.
pub fn combined_cardinality(records: &[Record], a: Field, b: Field) -> CombinedCardinality {
    let combined: HashSet<String> = records
        .iter()
        .filter_map(|r| Some(format!("{}{}", r.get(a)?, r.get(b)?)))
        .collect();
    let first: HashSet<&str> = records.iter().filter_map(|r| r.get(a)).collect();
    CombinedCardinality {
        combined: combined.len(),
        first: first.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: Option<&str>, phone: Option<&str>, city: Option<&str>) -> Record {
        Record {
            name: name.map(str::to_string),
            phone: phone.map(str::to_string),
            city: city.map(str::to_string),
            ..Record::default()
        }
    }

    fn lookup<T: Copy>(rows: &[(Field, T)], field: Field) -> T {
        rows.iter().find(|(f, _)| *f == field).map(|(_, v)| *v).unwrap()
    }

    #[test]
    fn fill_rate_counts_non_null() {
        let records = vec![
            rec(Some("A"), None, Some("X")),
            rec(Some("B"), Some("1"), None),
            rec(None, None, None),
            rec(Some("C"), None, None),
        ];
        let rates = fill_rate(&records);
        assert_eq!(lookup(&rates, Field::Name), 0.75);
        assert_eq!(lookup(&rates, Field::Phone), 0.25);
        assert_eq!(lookup(&rates, Field::Zip), 0.0);
        assert!(fill_rate(&[]).iter().all(|(_, r)| *r == 0.0));
    }

    #[test]
    fn frequencies_rank_by_count_then_value() {
        let records = vec![
            rec(Some("B"), None, None),
            rec(Some("A"), None, None),
            rec(Some("B"), None, None),
            rec(Some("C"), None, None),
        ];
        let rows: Vec<_> = value_frequencies(&records, 2)
            .into_iter()
            .filter(|row| row.field == Field::Name)
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].value.as_str(), rows[0].count), ("B", 2));
        assert_eq!((rows[1].value.as_str(), rows[1].count), ("A", 1));
    }

    #[test]
    fn cardinality_ignores_nulls() {
        let records = vec![
            rec(Some("A"), Some("1"), None),
            rec(Some("A"), Some("2"), None),
            rec(None, Some("2"), None),
        ];
        let card = cardinality(&records);
        assert_eq!(lookup(&card, Field::Name), 1);
        assert_eq!(lookup(&card, Field::Phone), 2);
        assert_eq!(lookup(&card, Field::City), 0);

        let combo = combined_cardinality(&records, Field::Name, Field::Phone);
        assert_eq!(combo, CombinedCardinality { combined: 2, first: 1 });
    }
}
