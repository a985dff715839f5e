use std::collections::BTreeMap;

use crate::{record::Record, Dataset};

/// A borrowed subset of a [`Dataset`]. Filters consume and return the
/// selection so they chain; the underlying table is never touched.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    rows: Vec<&'a Record>,
}

impl<'a> Selection<'a> {
    pub fn all(dataset: &'a Dataset) -> Self {
        Self {
            rows: dataset.records().iter().collect(),
        }
    }

    pub fn category(self, category: &str) -> Self {
        self.retain(|record| record.category == category)
    }

    pub fn industry(self, industry: &str) -> Self {
        self.retain(|record| record.industries == industry)
    }

    /// Inclusive on both ends; rows without an age are dropped.
    pub fn age_range(self, start: i32, end: i32) -> Self {
        self.retain(|record| record.age().is_some_and(|age| start <= age && age <= end))
    }

    /// Inclusive on both ends; rows without a birth year are dropped.
    pub fn birth_year_range(self, start: i32, end: i32) -> Self {
        self.retain(|record| {
            record
                .birth_year
                .is_some_and(|year| start <= year && year <= end)
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.rows.iter().copied()
    }

    pub fn count_by<K, F>(&self, key: F) -> BTreeMap<K, u64>
    where
        K: Ord,
        F: Fn(&Record) -> K,
    {
        let mut counts = BTreeMap::new();
        for record in self.iter() {
            *counts.entry(key(record)).or_insert(0) += 1;
        }
        counts
    }

    /// Arithmetic mean of `value` per group.
    pub fn mean_by<K, F, V>(&self, key: F, value: V) -> BTreeMap<K, f64>
    where
        K: Ord,
        F: Fn(&Record) -> K,
        V: Fn(&Record) -> f64,
    {
        let mut sums: BTreeMap<K, (f64, u64)> = BTreeMap::new();
        for record in self.iter() {
            let entry = sums.entry(key(record)).or_insert((0.0, 0));
            entry.0 += value(record);
            entry.1 += 1;
        }
        sums.into_iter()
            .map(|(key, (sum, count))| (key, sum / count as f64))
            .collect()
    }

    fn retain<F>(mut self, keep: F) -> Self
    where
        F: Fn(&Record) -> bool,
    {
        self.rows.retain(|record| keep(*record));
        self
    }
}
