//! Cleaning rules. The defaults describe the US listing export; a JSON file
//! with the same shape can override any subset of them (`--rules`).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ListingError, Result};
use crate::record::Field;

pub const GENERAL_MISSING: &[&str] = &["none", "null", "", "nan"];

pub const VALID_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM",
    "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY", "PR", "VI",
];

/// States whose zip codes start with 0 and lose it when stored as numbers.
pub const ZERO_PREFIX_ZIP_STATES: &[&str] = &["CT", "MA", "ME", "NH", "NJ", "RI", "VT"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningRules {
    /// Tokens treated as missing in every column (compared case-insensitively).
    pub general_missing: Vec<String>,
    pub field_missing: BTreeMap<Field, Vec<String>>,
    pub valid_states: Vec<String>,
    pub zero_prefix_zip_states: Vec<String>,
    pub phone_len: usize,
    pub zip_len: usize,
    pub state_len: usize,
    pub upper_case: Vec<Field>,
}

impl Default for CleaningRules {
    fn default() -> Self {
        let zero = || vec!["0".to_string()];
        Self {
            general_missing: owned(GENERAL_MISSING),
            field_missing: BTreeMap::from([
                (Field::TimeInBusiness, zero()),
                (Field::Phone, zero()),
                (Field::Headcount, zero()),
                (Field::Revenue, zero()),
            ]),
            valid_states: owned(VALID_STATES),
            zero_prefix_zip_states: owned(ZERO_PREFIX_ZIP_STATES),
            phone_len: 10,
            zip_len: 5,
            state_len: 2,
            upper_case: vec![
                Field::Address,
                Field::City,
                Field::State,
                Field::Name,
                Field::Revenue,
                Field::TimeInBusiness,
            ],
        }
    }
}

impl CleaningRules {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| ListingError::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| ListingError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// True when `value` (already trimmed) is a missing-value proxy for `field`.
    pub fn is_missing(&self, field: Field, value: &str) -> bool {
        if self
            .general_missing
            .iter()
            .any(|token| token.eq_ignore_ascii_case(value))
        {
            return true;
        }
        self.field_missing
            .get(&field)
            .is_some_and(|tokens| tokens.iter().any(|token| token == value))
    }

    pub fn is_valid_state(&self, state: &str) -> bool {
        self.valid_states.iter().any(|s| s == state)
    }

    pub fn zip_has_zero_prefix(&self, state: &str) -> bool {
        self.zero_prefix_zip_states.iter().any(|s| s == state)
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
