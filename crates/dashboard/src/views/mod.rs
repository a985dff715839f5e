//! The analysis views. Each view owns its controls and a pure `compute`
//! function; the [`View`] trait adapts session control state into that call.

use dataset::Dataset;
use shared::{
    domain::{ControlId, ControlSpec, ViewId},
    protocol::Chart,
};

use crate::{controls::ControlState, error::ViewError};

pub mod age_groups;
pub mod age_worth;
pub mod average_wealth;
pub mod country_distribution;
pub mod economic_indicators;
pub mod over_time;
pub mod wealth_distribution;

pub const ALL_INDUSTRIES: &str = "All Industries";
pub const DEFAULT_CATEGORY: &str = "Technology";

pub trait View: Send + Sync {
    fn id(&self) -> ViewId;

    /// Controls whose changes re-render this view.
    fn depends_on(&self) -> &'static [ControlId];

    /// Declares the controls listed by [`View::depends_on`].
    fn controls(&self, dataset: &Dataset) -> Vec<ControlSpec>;

    fn render(&self, dataset: &Dataset, state: &ControlState) -> Result<Chart, ViewError>;
}

/// Every view, in page order.
pub fn registry() -> Vec<Box<dyn View>> {
    vec![
        Box::new(wealth_distribution::WealthDistribution),
        Box::new(average_wealth::AverageWealth),
        Box::new(country_distribution::CountryDistribution),
        Box::new(age_groups::AgeGroupsByIndustry),
        Box::new(age_worth::AgeVsWorth),
        Box::new(over_time::BillionairesOverTime),
        Box::new(economic_indicators::EconomicIndicators),
    ]
}

#[cfg(test)]
#[path = "../tests/views_tests.rs"]
mod tests;
