//! Cohort-wide aggregation of category combinations
//!
//! Every aggregate is a plain map of integer counters. Workers build
//! their own partial aggregate and partials are merged key-wise, so the
//! final result does not depend on row order or partitioning.

use config::{FIELD_SEPARATOR, MISSING_VALUE, SAMPLE};
use cwas_pack::VariantRecord;
use hashbrown::HashMap;

use crate::combine::CategoryKey;
use crate::domain::DomainRegistry;

const CATEGORY_COLUMN: &str = "Category";
const COUNT_COLUMN: &str = "Count";

/// anything a rayon fold can accumulate variants into
pub trait Accumulate: Default + Send {
    /// account one variant holding `combinations`
    fn add_variant(&mut self, record: &VariantRecord, combinations: &[CategoryKey]);

    /// fold another partial aggregate into this one
    fn merge(&mut self, other: Self);

    /// reduce step for rayon
    fn merged(mut self, other: Self) -> Self {
        self.merge(other);
        self
    }
}

/// count mode: category -> number of variants
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    counts: HashMap<CategoryKey, u64>,
}

impl CategoryCounts {
    #[inline(always)]
    pub fn add(&mut self, combinations: &[CategoryKey]) {
        for key in combinations {
            *self.counts.entry(*key).or_insert(0) += 1;
        }
    }

    pub fn get(&self, key: &CategoryKey) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryKey, &u64)> {
        self.counts.iter()
    }

    /// observed keys, in Cartesian order
    pub fn keys(&self) -> Vec<CategoryKey> {
        let mut keys: Vec<CategoryKey> = self.counts.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// `Category\tCount` table in Cartesian order
    pub fn to_rows(&self, registry: &DomainRegistry) -> Vec<String> {
        let mut rows = Vec::with_capacity(self.len() + 1);
        rows.push(format!("{CATEGORY_COLUMN}{FIELD_SEPARATOR}{COUNT_COLUMN}"));

        rows.extend(self.keys().into_iter().map(|key| {
            format!(
                "{}{}{}",
                registry.render(&key),
                FIELD_SEPARATOR,
                self.get(&key)
            )
        }));

        rows
    }
}

impl Accumulate for CategoryCounts {
    fn add_variant(&mut self, _: &VariantRecord, combinations: &[CategoryKey]) {
        self.add(combinations);
    }

    fn merge(&mut self, other: Self) {
        for (key, count) in other.counts {
            *self.counts.entry(key).or_insert(0) += count;
        }
    }
}

/// count mode split by the SAMPLE column
///
/// Rows with an empty SAMPLE cell are counted under `NA`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleCounts {
    samples: HashMap<String, CategoryCounts>,
}

impl SampleCounts {
    #[inline(always)]
    pub fn add(&mut self, sample: &str, combinations: &[CategoryKey]) {
        self.samples.entry_ref(sample).or_default().add(combinations);
    }

    pub fn get(&self, sample: &str) -> Option<&CategoryCounts> {
        self.samples.get(sample)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// sample names, sorted
    pub fn samples(&self) -> Vec<&str> {
        let mut samples: Vec<&str> = self.samples.keys().map(String::as_str).collect();
        samples.sort_unstable();
        samples
    }

    /// union of the keys observed in any sample, in Cartesian order
    pub fn keys(&self) -> Vec<CategoryKey> {
        let mut keys: Vec<CategoryKey> = self
            .samples
            .values()
            .flat_map(|counts| counts.counts.keys().copied())
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// cohort-wide counts
    pub fn total(&self) -> CategoryCounts {
        self.samples
            .values()
            .cloned()
            .fold(CategoryCounts::default(), CategoryCounts::merged)
    }

    /// wide table: one row per sample, one zero-filled column per category
    pub fn to_rows(&self, registry: &DomainRegistry) -> Vec<String> {
        let keys = self.keys();
        let mut rows = Vec::with_capacity(self.len() + 1);

        let mut header = String::from(SAMPLE);
        for key in keys.iter() {
            header.push(FIELD_SEPARATOR);
            header.push_str(&registry.render(key));
        }
        rows.push(header);

        for sample in self.samples() {
            let Some(counts) = self.get(sample) else {
                continue;
            };

            let mut row = String::from(sample);
            for key in keys.iter() {
                row.push(FIELD_SEPARATOR);
                row.push_str(&counts.get(key).to_string());
            }
            rows.push(row);
        }

        rows
    }
}

impl Accumulate for SampleCounts {
    fn add_variant(&mut self, record: &VariantRecord, combinations: &[CategoryKey]) {
        self.add(record.sample.unwrap_or(MISSING_VALUE), combinations);
    }

    fn merge(&mut self, other: Self) {
        for (sample, counts) in other.samples {
            match self.samples.get_mut(&sample) {
                Some(acc) => acc.merge(counts),
                None => {
                    self.samples.insert(sample, counts);
                }
            }
        }
    }
}

/// co-occurrence mode: (category, category) -> variants holding both
///
/// Quadratic in the number of combinations per variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CooccurrenceCounts {
    counts: HashMap<CategoryKey, HashMap<CategoryKey, u64>>,
}

impl CooccurrenceCounts {
    #[inline(always)]
    pub fn add(&mut self, combinations: &[CategoryKey]) {
        for first in combinations {
            let row = self.counts.entry(*first).or_default();
            for second in combinations {
                *row.entry(*second).or_insert(0) += 1;
            }
        }
    }

    pub fn get(&self, first: &CategoryKey, second: &CategoryKey) -> u64 {
        self.counts
            .get(first)
            .and_then(|row| row.get(second))
            .copied()
            .unwrap_or(0)
    }

    /// number of categories with at least one variant
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// observed keys, in Cartesian order
    pub fn keys(&self) -> Vec<CategoryKey> {
        let mut keys: Vec<CategoryKey> = self.counts.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// the diagonal, equal to the count-mode result
    pub fn diagonal(&self) -> CategoryCounts {
        CategoryCounts {
            counts: self
                .counts
                .iter()
                .filter_map(|(key, row)| row.get(key).map(|count| (*key, *count)))
                .collect(),
        }
    }

    /// square, zero-filled matrix over the observed categories
    pub fn to_rows(&self, registry: &DomainRegistry) -> Vec<String> {
        let keys = self.keys();
        let names: Vec<String> = keys.iter().map(|key| registry.render(key)).collect();
        let mut rows = Vec::with_capacity(keys.len() + 1);

        let mut header = String::from(CATEGORY_COLUMN);
        for name in names.iter() {
            header.push(FIELD_SEPARATOR);
            header.push_str(name);
        }
        rows.push(header);

        for (first, name) in keys.iter().zip(names.iter()) {
            let mut row = name.clone();
            for second in keys.iter() {
                row.push(FIELD_SEPARATOR);
                row.push_str(&self.get(first, second).to_string());
            }
            rows.push(row);
        }

        rows
    }
}

impl Accumulate for CooccurrenceCounts {
    fn add_variant(&mut self, _: &VariantRecord, combinations: &[CategoryKey]) {
        self.add(combinations);
    }

    fn merge(&mut self, other: Self) {
        for (first, row) in other.counts {
            let acc = self.counts.entry(first).or_default();
            for (second, count) in row {
                *acc.entry(second).or_insert(0) += count;
            }
        }
    }
}
