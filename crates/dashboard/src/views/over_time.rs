use dataset::Dataset;
use shared::{
    domain::{ControlId, ControlSpec, ViewId},
    protocol::{Chart, ChartBody, YearCount},
};

use super::{View, ALL_INDUSTRIES};
use crate::{
    controls::{self, ControlState},
    error::ViewError,
};

pub const YEAR_BOUNDS: (i32, i32) = (1910, 2006);
pub const DEFAULT_YEAR_RANGE: (i32, i32) = (1920, 2005);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    pub years: (i32, i32),
    pub industry: String,
}

pub struct BillionairesOverTime;

impl View for BillionairesOverTime {
    fn id(&self) -> ViewId {
        ViewId::BillionairesOverTime
    }

    fn depends_on(&self) -> &'static [ControlId] {
        &[ControlId::TimelineYearRange, ControlId::TimelineIndustry]
    }

    fn controls(&self, dataset: &Dataset) -> Vec<ControlSpec> {
        let mut industries = vec![ALL_INDUSTRIES.to_string()];
        industries.extend(dataset.industries());
        vec![
            controls::range_slider(
                ControlId::TimelineYearRange,
                "Year Range",
                YEAR_BOUNDS,
                DEFAULT_YEAR_RANGE,
            ),
            controls::select(
                ControlId::TimelineIndustry,
                "Select Industry",
                industries,
                Some(ALL_INDUSTRIES),
            ),
        ]
    }

    fn render(&self, dataset: &Dataset, state: &ControlState) -> Result<Chart, ViewError> {
        let params = Params {
            years: state.range(ControlId::TimelineYearRange)?,
            industry: state.select(ControlId::TimelineIndustry)?.to_string(),
        };
        Ok(compute(dataset, &params))
    }
}

/// Billionaires per birth year, ascending by year.
pub fn year_counts(dataset: &Dataset, params: &Params) -> Vec<YearCount> {
    let (start, end) = params.years;
    let mut selection = dataset.select().birth_year_range(start, end);
    if params.industry != ALL_INDUSTRIES {
        selection = selection.industry(&params.industry);
    }

    selection
        .count_by(|record| record.birth_year)
        .into_iter()
        .filter_map(|(year, count)| year.map(|year| YearCount { year, count }))
        .collect()
}

pub fn compute(dataset: &Dataset, params: &Params) -> Chart {
    Chart {
        title: format!("Number of Billionaires Over Time in {}", params.industry),
        x_label: "Year".to_string(),
        y_label: "Number of Billionaires".to_string(),
        body: ChartBody::LineScatter {
            points: year_counts(dataset, params),
        },
    }
}
