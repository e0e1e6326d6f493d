//! Numeric-aware filename ordering
//!
//! Filenames are ordered by the integers embedded in them rather than by
//! character code, so `img2.png` sorts before `img10.png`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Which digit runs take part in the sort key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Only the first maximal run of digits
    FirstRun,
    /// Every maximal run of digits, left to right
    #[default]
    FullTuple,
}

/// Sort key made of the digit runs of a filename
///
/// Each run is stored without leading zeros, so runs of any length compare
/// as integers without overflowing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericKey<'a> {
    runs: Vec<&'a str>,
}

impl<'a> NumericKey<'a> {
    /// Digit runs of the key, leading zeros removed
    pub fn runs(&self) -> &[&'a str] {
        &self.runs
    }
}

impl Ord for NumericKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.runs.iter().zip(other.runs.iter()) {
            let ord = compare_digit_runs(a, b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        self.runs.len().cmp(&other.runs.len())
    }
}

impl PartialOrd for NumericKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Extract the numeric sort key of a filename
pub fn numeric_key(name: &str, mode: SortMode) -> NumericKey<'_> {
    let mut runs = Vec::new();
    let bytes = name.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let run = name[start..i].trim_start_matches('0');
        runs.push(run);
        if mode == SortMode::FirstRun {
            break;
        }
    }

    NumericKey { runs }
}

/// Compare two filenames by their numeric keys
///
/// Names with equal keys (including names without any digits) fall back to
/// plain string order, which keeps the ordering total.
pub fn compare_names(a: &str, b: &str, mode: SortMode) -> Ordering {
    numeric_key(a, mode)
        .cmp(&numeric_key(b, mode))
        .then_with(|| a.cmp(b))
}

/// Sort items in place by a filename projected out of each item
pub fn sort_by_name<T, F>(items: &mut [T], mode: SortMode, name_of: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| compare_names(name_of(a), name_of(b), mode));
}
