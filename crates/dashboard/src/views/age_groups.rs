use std::collections::BTreeSet;

use dataset::{AgeGroup, Dataset};
use shared::{
    domain::{ControlId, ControlSpec, ViewId},
    protocol::{Chart, ChartBody, StackedCount},
};

use super::{
    age_worth::{AGE_BOUNDS, DEFAULT_AGE_RANGE},
    View,
};
use crate::{
    controls::{self, ControlState},
    error::ViewError,
};

pub struct AgeGroupsByIndustry;

impl View for AgeGroupsByIndustry {
    fn id(&self) -> ViewId {
        ViewId::AgeGroupsByIndustry
    }

    fn depends_on(&self) -> &'static [ControlId] {
        &[ControlId::AgeGroupRange]
    }

    fn controls(&self, _dataset: &Dataset) -> Vec<ControlSpec> {
        vec![controls::range_slider(
            ControlId::AgeGroupRange,
            "Age Range",
            AGE_BOUNDS,
            DEFAULT_AGE_RANGE,
        )]
    }

    fn render(&self, dataset: &Dataset, state: &ControlState) -> Result<Chart, ViewError> {
        Ok(compute(dataset, state.range(ControlId::AgeGroupRange)?))
    }
}

/// Long-format (industry, age group, count) rows over the age-filtered subset.
///
/// Every industry present in the subset gets a row for every age group present
/// in the subset, zero-filled. Rows are ordered by age group, then industry.
pub fn age_group_counts(dataset: &Dataset, (start, end): (i32, i32)) -> Vec<StackedCount> {
    let counts = dataset
        .select()
        .age_range(start, end)
        .count_by(|record| (record.industries.clone(), record.age_group()));

    let industries: BTreeSet<&String> = counts.keys().map(|(industry, _)| industry).collect();
    let groups: BTreeSet<AgeGroup> = counts.keys().map(|(_, group)| *group).collect();

    let mut rows = Vec::with_capacity(industries.len() * groups.len());
    for group in &groups {
        for industry in &industries {
            let count = counts
                .get(&((*industry).clone(), *group))
                .copied()
                .unwrap_or(0);
            rows.push(StackedCount {
                category: (*industry).clone(),
                group: group.label().to_string(),
                count,
            });
        }
    }
    rows
}

pub fn compute(dataset: &Dataset, age_range: (i32, i32)) -> Chart {
    Chart {
        title: "Proportion of Young vs. Older Billionaires by Industry".to_string(),
        x_label: "Industry".to_string(),
        y_label: "Count".to_string(),
        body: ChartBody::StackedBar {
            rows: age_group_counts(dataset, age_range),
        },
    }
}
