use std::str::FromStr;

use dataset::{Dataset, Record, REFERENCE_YEAR};
use shared::{
    domain::{ControlId, ControlSpec, ViewId},
    protocol::{Chart, ChartBody, Point},
};

use super::View;
use crate::{
    controls::{self, ControlState},
    error::ViewError,
};

pub const YEAR_BOUNDS: (i32, i32) = (1910, REFERENCE_YEAR);
pub const DEFAULT_YEAR_RANGE: (i32, i32) = (1920, REFERENCE_YEAR);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    CpiChange,
    TaxRevenue,
}

impl Indicator {
    pub const ALL: [Indicator; 2] = [Indicator::CpiChange, Indicator::TaxRevenue];

    pub fn label(&self) -> &'static str {
        match self {
            Indicator::CpiChange => "CPI Change",
            Indicator::TaxRevenue => "Tax Revenue",
        }
    }

    fn axis_label(&self) -> &'static str {
        match self {
            Indicator::CpiChange => "CPI Change (%)",
            Indicator::TaxRevenue => "Tax Revenue (in billions)",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Indicator::CpiChange => "green",
            Indicator::TaxRevenue => "purple",
        }
    }

    fn value(&self, record: &Record) -> Option<f64> {
        match self {
            Indicator::CpiChange => record.cpi_change,
            Indicator::TaxRevenue => record.tax_revenue,
        }
    }
}

impl FromStr for Indicator {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Indicator::ALL
            .into_iter()
            .find(|indicator| indicator.label() == s)
            .ok_or(ViewError::MissingControl(ControlId::Indicator))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub years: (i32, i32),
    pub indicator: Indicator,
}

pub struct EconomicIndicators;

impl View for EconomicIndicators {
    fn id(&self) -> ViewId {
        ViewId::EconomicIndicators
    }

    fn depends_on(&self) -> &'static [ControlId] {
        &[ControlId::IndicatorYearRange, ControlId::Indicator]
    }

    fn controls(&self, _dataset: &Dataset) -> Vec<ControlSpec> {
        vec![
            controls::range_slider(
                ControlId::IndicatorYearRange,
                "Year Range",
                YEAR_BOUNDS,
                DEFAULT_YEAR_RANGE,
            ),
            controls::select(
                ControlId::Indicator,
                "Select Economic Indicator",
                Indicator::ALL
                    .iter()
                    .map(|indicator| indicator.label().to_string())
                    .collect(),
                None,
            ),
        ]
    }

    fn render(&self, dataset: &Dataset, state: &ControlState) -> Result<Chart, ViewError> {
        let params = Params {
            years: state.range(ControlId::IndicatorYearRange)?,
            indicator: state.select(ControlId::Indicator)?.parse()?,
        };
        Ok(compute(dataset, &params))
    }
}

/// Indicator against worth; rows missing the indicator are skipped.
pub fn compute(dataset: &Dataset, params: &Params) -> Chart {
    let (start, end) = params.years;
    let indicator = params.indicator;
    let points = dataset
        .select()
        .birth_year_range(start, end)
        .iter()
        .filter_map(|record| {
            indicator.value(record).map(|x| Point {
                x,
                y: record.worth,
            })
        })
        .collect();

    Chart {
        title: format!("Net Worth vs {}", indicator.label()),
        x_label: indicator.axis_label().to_string(),
        y_label: "Net Worth (in billions)".to_string(),
        body: ChartBody::Scatter {
            points,
            color: indicator.color().to_string(),
        },
    }
}
