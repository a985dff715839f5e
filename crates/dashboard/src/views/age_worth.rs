use dataset::Dataset;
use shared::{
    domain::{ControlId, ControlSpec, ViewId},
    protocol::{Chart, ChartBody, Point},
};

use super::View;
use crate::{
    controls::{self, ControlState},
    error::ViewError,
};

pub const AGE_BOUNDS: (i32, i32) = (0, 100);
pub const DEFAULT_AGE_RANGE: (i32, i32) = (0, 40);

pub struct AgeVsWorth;

impl View for AgeVsWorth {
    fn id(&self) -> ViewId {
        ViewId::AgeVsWorth
    }

    fn depends_on(&self) -> &'static [ControlId] {
        &[ControlId::ScatterAgeRange]
    }

    fn controls(&self, _dataset: &Dataset) -> Vec<ControlSpec> {
        vec![controls::range_slider(
            ControlId::ScatterAgeRange,
            "Age Range",
            AGE_BOUNDS,
            DEFAULT_AGE_RANGE,
        )]
    }

    fn render(&self, dataset: &Dataset, state: &ControlState) -> Result<Chart, ViewError> {
        Ok(compute(dataset, state.range(ControlId::ScatterAgeRange)?))
    }
}

pub fn compute(dataset: &Dataset, (start, end): (i32, i32)) -> Chart {
    let points = dataset
        .select()
        .age_range(start, end)
        .iter()
        .filter_map(|record| {
            record.age().map(|age| Point {
                x: f64::from(age),
                y: record.worth,
            })
        })
        .collect();

    Chart {
        title: "Age vs. Wealth".to_string(),
        x_label: "Age".to_string(),
        y_label: "Net Worth".to_string(),
        body: ChartBody::Scatter {
            points,
            color: "blue".to_string(),
        },
    }
}
