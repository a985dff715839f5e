use dataset::Dataset;
use shared::{
    domain::{ControlId, ControlSpec, ViewId},
    protocol::{Bar, Chart, ChartBody},
};

use super::{View, DEFAULT_CATEGORY};
use crate::{
    controls::{self, ControlState},
    error::ViewError,
};

/// Mean worth per category. The category control only re-triggers the view;
/// the aggregation always spans the whole table.
pub struct AverageWealth;

impl View for AverageWealth {
    fn id(&self) -> ViewId {
        ViewId::AverageWealth
    }

    fn depends_on(&self) -> &'static [ControlId] {
        &[ControlId::AverageCategory]
    }

    fn controls(&self, dataset: &Dataset) -> Vec<ControlSpec> {
        vec![controls::select(
            ControlId::AverageCategory,
            "Select Category",
            dataset.categories(),
            Some(DEFAULT_CATEGORY),
        )]
    }

    fn render(&self, dataset: &Dataset, _state: &ControlState) -> Result<Chart, ViewError> {
        Ok(compute(dataset))
    }
}

pub fn compute(dataset: &Dataset) -> Chart {
    let bars = dataset
        .select()
        .mean_by(|record| record.category.clone(), |record| record.worth)
        .into_iter()
        .map(|(label, value)| Bar { label, value })
        .collect();

    Chart {
        title: "Average Wealth by Category".to_string(),
        x_label: "Category".to_string(),
        y_label: "Average Net Worth".to_string(),
        body: ChartBody::Bar { bars },
    }
}
