use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! wire_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownName;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(UnknownName(other.to_string())),
                }
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown name '{0}'")]
pub struct UnknownName(pub String);

wire_enum!(ViewId {
    WealthDistribution => "wealth_distribution",
    AverageWealth => "average_wealth",
    CountryDistribution => "country_distribution",
    AgeGroupsByIndustry => "age_groups_by_industry",
    AgeVsWorth => "age_vs_worth",
    BillionairesOverTime => "billionaires_over_time",
    EconomicIndicators => "economic_indicators",
});

wire_enum!(ControlId {
    WealthCategory => "wealth_category",
    WealthShowAll => "wealth_show_all",
    AverageCategory => "average_category",
    CountryCategory => "country_category",
    CountryShowAll => "country_show_all",
    ScatterAgeRange => "scatter_age_range",
    AgeGroupRange => "age_group_range",
    TimelineYearRange => "timeline_year_range",
    TimelineIndustry => "timeline_industry",
    IndicatorYearRange => "indicator_year_range",
    Indicator => "indicator",
});

/// Current value of a single control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ControlValue {
    Select(String),
    Checkbox(bool),
    /// Inclusive `(start, end)` pair.
    Range(i32, i32),
}

impl ControlValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ControlValue::Select(_) => "select",
            ControlValue::Checkbox(_) => "checkbox",
            ControlValue::Range(_, _) => "range",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlKind {
    Select { options: Vec<String> },
    Checkbox,
    RangeSlider { start: i32, end: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSpec {
    pub id: ControlId,
    pub label: String,
    pub kind: ControlKind,
    pub default: ControlValue,
}
