//! Index assignment and destination filenames

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::scanner::file_scanner::SourceFile;
use crate::scanner::natural_sort::{sort_by_name, SortMode};

pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_LABEL: &str = "sample";

/// How files are ordered and numbered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy")]
pub enum NamingPolicy {
    /// Shuffle everything, then number 1..N in shuffled order
    #[default]
    RandomizedFlat,
    /// Sort, then shuffle indices only within consecutive batches
    Batched { batch_size: usize },
}

impl NamingPolicy {
    pub fn name(&self) -> String {
        match self {
            Self::RandomizedFlat => "randomized".to_string(),
            Self::Batched { batch_size } => format!("batched({batch_size})"),
        }
    }
}

/// A source file paired with its 1-based destination index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub file: SourceFile,
    pub index: usize,
}

/// Pair every file with a unique index in 1..=N
///
/// The returned order is the copy order. Under [`NamingPolicy::Batched`] the
/// files stay in numeric-aware sorted order and each batch draws a random
/// permutation of its own contiguous index block.
pub fn plan_assignments<R: Rng + ?Sized>(
    mut files: Vec<SourceFile>,
    policy: NamingPolicy,
    sort_mode: SortMode,
    rng: &mut R,
) -> Vec<Assignment> {
    match policy {
        NamingPolicy::RandomizedFlat => {
            files.shuffle(rng);
            files
                .into_iter()
                .enumerate()
                .map(|(i, file)| Assignment { file, index: i + 1 })
                .collect()
        }
        NamingPolicy::Batched { batch_size } => {
            sort_by_name(&mut files, sort_mode, |f| f.original_name.as_str());

            let batch_size = batch_size.max(1);
            let mut assignments = Vec::with_capacity(files.len());
            let mut offset = 1;
            let mut remaining = files.into_iter().peekable();

            while remaining.peek().is_some() {
                let batch: Vec<SourceFile> = remaining.by_ref().take(batch_size).collect();
                let mut indices: Vec<usize> = (offset..offset + batch.len()).collect();
                indices.shuffle(rng);
                offset += batch.len();

                assignments.extend(
                    batch
                        .into_iter()
                        .zip(indices)
                        .map(|(file, index)| Assignment { file, index }),
                );
            }

            assignments
        }
    }
}

/// Renders `{YYMMDD}_{label}_{index}{ext}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTemplate {
    date_stamp: String,
    label: String,
}

impl NameTemplate {
    pub fn new(run_date: NaiveDate, label: impl Into<String>) -> Self {
        Self {
            date_stamp: run_date.format("%y%m%d").to_string(),
            label: label.into(),
        }
    }

    pub fn date_stamp(&self) -> &str {
        &self.date_stamp
    }

    /// `extension` includes the leading dot, or is empty
    pub fn render(&self, index: usize, extension: &str) -> String {
        format!("{}_{}_{}{}", self.date_stamp, self.label, index, extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::PathBuf;

    fn files(names: &[&str]) -> Vec<SourceFile> {
        names
            .iter()
            .map(|n| SourceFile::from_path(PathBuf::from("/in").join(n)).unwrap())
            .collect()
    }

    fn sorted_indices(assignments: &[Assignment]) -> Vec<usize> {
        let mut indices: Vec<usize> = assignments.iter().map(|a| a.index).collect();
        indices.sort_unstable();
        indices
    }

    #[test]
    fn test_randomized_uses_each_index_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let names: Vec<String> = (1..=100).map(|i| format!("f{i}.tif")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();

        let plan = plan_assignments(files(&refs), NamingPolicy::RandomizedFlat, SortMode::FullTuple, &mut rng);
        assert_eq!(sorted_indices(&plan), (1..=100).collect::<Vec<_>>());
    }

    #[test]
    fn test_randomized_is_reproducible_with_seed() {
        let input = files(&["a1.png", "a2.png", "a3.png", "a4.png", "a5.png"]);
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            plan_assignments(input.clone(), NamingPolicy::RandomizedFlat, SortMode::FullTuple, &mut rng)
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_batched_indices_stay_within_batch_block() {
        let mut rng = StdRng::seed_from_u64(3);
        let names: Vec<String> = (1..=7).rev().map(|i| format!("img{i}.png")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();

        let plan = plan_assignments(
            files(&refs),
            NamingPolicy::Batched { batch_size: 3 },
            SortMode::FullTuple,
            &mut rng,
        );

        // Copy order is the numeric sort order
        let order: Vec<&str> = plan.iter().map(|a| a.file.original_name.as_str()).collect();
        assert_eq!(
            order,
            vec!["img1.png", "img2.png", "img3.png", "img4.png", "img5.png", "img6.png", "img7.png"]
        );

        let mut first: Vec<usize> = plan[0..3].iter().map(|a| a.index).collect();
        let mut second: Vec<usize> = plan[3..6].iter().map(|a| a.index).collect();
        first.sort_unstable();
        second.sort_unstable();
        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(second, vec![4, 5, 6]);
        assert_eq!(plan[6].index, 7);
    }

    #[test]
    fn test_empty_input_plans_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(plan_assignments(Vec::new(), NamingPolicy::RandomizedFlat, SortMode::FullTuple, &mut rng).is_empty());
        assert!(plan_assignments(
            Vec::new(),
            NamingPolicy::Batched { batch_size: 50 },
            SortMode::FullTuple,
            &mut rng
        )
        .is_empty());
    }

    #[test]
    fn test_template_render() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        let template = NameTemplate::new(date, DEFAULT_LABEL);
        assert_eq!(template.date_stamp(), "240317");
        assert_eq!(template.render(12, ".png"), "240317_sample_12.png");
        assert_eq!(template.render(3, ""), "240317_sample_3");
    }
}
