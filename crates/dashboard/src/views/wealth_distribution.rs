use dataset::Dataset;
use shared::{
    domain::{ControlId, ControlSpec, ViewId},
    protocol::{Chart, ChartBody, HistogramBin},
};

use super::{View, DEFAULT_CATEGORY};
use crate::{
    controls::{self, ControlState},
    error::ViewError,
};

pub const BIN_COUNT: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    pub category: String,
    pub show_all: bool,
}

pub struct WealthDistribution;

impl View for WealthDistribution {
    fn id(&self) -> ViewId {
        ViewId::WealthDistribution
    }

    fn depends_on(&self) -> &'static [ControlId] {
        &[ControlId::WealthCategory, ControlId::WealthShowAll]
    }

    fn controls(&self, dataset: &Dataset) -> Vec<ControlSpec> {
        vec![
            controls::select(
                ControlId::WealthCategory,
                "Select Category",
                dataset.categories(),
                Some(DEFAULT_CATEGORY),
            ),
            controls::checkbox(ControlId::WealthShowAll, "Show All Industries", false),
        ]
    }

    fn render(&self, dataset: &Dataset, state: &ControlState) -> Result<Chart, ViewError> {
        let params = Params {
            category: state.select(ControlId::WealthCategory)?.to_string(),
            show_all: state.checkbox(ControlId::WealthShowAll)?,
        };
        compute(dataset, &params)
    }
}

pub fn compute(dataset: &Dataset, params: &Params) -> Result<Chart, ViewError> {
    let selection = if params.show_all {
        dataset.select()
    } else {
        dataset.select().category(&params.category)
    };
    let worths: Vec<f64> = selection.iter().map(|record| record.worth).collect();
    if worths.is_empty() {
        return Err(ViewError::EmptySelection);
    }

    let scope = if params.show_all {
        "All Industries"
    } else {
        params.category.as_str()
    };
    Ok(Chart {
        title: format!("Distribution of Billionaire Wealth ({scope})"),
        x_label: "Net Worth".to_string(),
        y_label: "Number of Billionaires".to_string(),
        body: ChartBody::Histogram {
            bins: histogram(&worths, BIN_COUNT),
        },
    })
}

/// Equal-width bins over `[min, max]`; the last bin is closed. A degenerate
/// range is widened by half a unit on each side.
pub fn histogram(values: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bin_count as f64;

    let mut counts = vec![0u64; bin_count];
    for value in values {
        let index = (((value - min) / width).floor() as usize).min(bin_count - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(index, count)| HistogramBin {
            start: min + width * index as f64,
            end: if index + 1 == bin_count {
                max
            } else {
                min + width * (index + 1) as f64
            },
            count,
        })
        .collect()
}
