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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    pub category: String,
    pub show_all: bool,
}

pub struct CountryDistribution;

impl View for CountryDistribution {
    fn id(&self) -> ViewId {
        ViewId::CountryDistribution
    }

    fn depends_on(&self) -> &'static [ControlId] {
        &[ControlId::CountryCategory, ControlId::CountryShowAll]
    }

    fn controls(&self, dataset: &Dataset) -> Vec<ControlSpec> {
        vec![
            controls::select(
                ControlId::CountryCategory,
                "Select Category",
                dataset.categories(),
                Some(DEFAULT_CATEGORY),
            ),
            controls::checkbox(ControlId::CountryShowAll, "Show All Industries", false),
        ]
    }

    fn render(&self, dataset: &Dataset, state: &ControlState) -> Result<Chart, ViewError> {
        let params = Params {
            category: state.select(ControlId::CountryCategory)?.to_string(),
            show_all: state.checkbox(ControlId::CountryShowAll)?,
        };
        Ok(compute(dataset, &params))
    }
}

/// Billionaire count per country, largest first; ties go alphabetically.
pub fn country_counts(dataset: &Dataset, params: &Params) -> Vec<(String, u64)> {
    let selection = if params.show_all {
        dataset.select()
    } else {
        dataset.select().category(&params.category)
    };

    let mut counts: Vec<(String, u64)> = selection
        .count_by(|record| record.country.clone())
        .into_iter()
        .collect();
    counts.sort_by(|(a_name, a_count), (b_name, b_count)| {
        b_count.cmp(a_count).then_with(|| a_name.cmp(b_name))
    });
    counts
}

pub fn compute(dataset: &Dataset, params: &Params) -> Chart {
    let scope = if params.show_all {
        "All Industries"
    } else {
        params.category.as_str()
    };
    let bars = country_counts(dataset, params)
        .into_iter()
        .map(|(label, count)| Bar {
            label,
            value: count as f64,
        })
        .collect();

    Chart {
        title: format!("Number of Billionaires by Country ({scope})"),
        x_label: "Country".to_string(),
        y_label: "Count of Billionaires".to_string(),
        body: ChartBody::HorizontalBar {
            bars,
            log_scale: true,
        },
    }
}
