use std::fmt;

/// Year that ages are measured against.
pub const REFERENCE_YEAR: i32 = 2023;

/// Ages strictly below this are "young".
pub const YOUNG_AGE_CUTOFF: i32 = 40;

/// Binary age bucket. Variant order matches the lexical order of the labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeGroup {
    Older,
    Young,
}

impl AgeGroup {
    pub fn for_age(age: Option<i32>) -> Self {
        match age {
            Some(age) if age < YOUNG_AGE_CUTOFF => AgeGroup::Young,
            _ => AgeGroup::Older,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Young => "Young (<40)",
            AgeGroup::Older => "Older (>=40)",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One billionaire row. Age-derived attributes are computed, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub worth: f64,
    pub category: String,
    pub industries: String,
    pub country: String,
    pub birth_year: Option<i32>,
    pub cpi_change: Option<f64>,
    pub tax_revenue: Option<f64>,
}

impl Record {
    /// Missing when the birth year is absent or too far out to subtract.
    pub fn age(&self) -> Option<i32> {
        self.birth_year
            .and_then(|year| REFERENCE_YEAR.checked_sub(year))
    }

    /// A missing age is never young.
    pub fn is_young(&self) -> bool {
        self.age().is_some_and(|age| age < YOUNG_AGE_CUTOFF)
    }

    pub fn age_group(&self) -> AgeGroup {
        AgeGroup::for_age(self.age())
    }
}
