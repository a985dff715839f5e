use anyhow::{bail, ensure, Context, Result};
use serde::Deserialize;
use shared::protocol::WorthSummary;
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, info};

mod record;
mod selection;

pub use record::{AgeGroup, Record, REFERENCE_YEAR, YOUNG_AGE_CUTOFF};
pub use selection::Selection;

/// Immutable in-memory billionaire table. Loaded once, shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "personName", default)]
    person_name: String,
    #[serde(rename = "finalWorth")]
    final_worth: String,
    category: String,
    industries: String,
    country: String,
    #[serde(rename = "birthYear")]
    birth_year: String,
    cpi_change_country: String,
    tax_revenue_country_country: String,
}

impl Dataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open dataset '{}'", path.display()))?;
        let dataset = Self::from_reader(file)
            .with_context(|| format!("failed to load dataset '{}'", path.display()))?;
        info!(path = %path.display(), rows = dataset.len(), "dataset loaded");
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<RawRecord>().enumerate() {
            let row_number = index + 1;
            let raw = row.with_context(|| format!("failed to read data row {row_number}"))?;
            let record = convert_row(raw)
                .with_context(|| format!("invalid data row {row_number}"))?;
            records.push(record);
        }

        debug!(rows = records.len(), "parsed dataset rows");
        Ok(Self { records })
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn select(&self) -> Selection<'_> {
        Selection::all(self)
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        distinct(self.records.iter().map(|record| record.category.as_str()))
    }

    /// Distinct industries in order of first appearance.
    pub fn industries(&self) -> Vec<String> {
        distinct(self.records.iter().map(|record| record.industries.as_str()))
    }

    pub fn describe(&self) -> Option<WorthSummary> {
        let mut worths: Vec<f64> = self.records.iter().map(|record| record.worth).collect();
        if worths.is_empty() {
            return None;
        }
        worths.sort_by(f64::total_cmp);

        let count = worths.len();
        let mean = worths.iter().sum::<f64>() / count as f64;
        let std = (count > 1).then(|| {
            let variance = worths
                .iter()
                .map(|worth| (worth - mean).powi(2))
                .sum::<f64>()
                / (count - 1) as f64;
            variance.sqrt()
        });

        Some(WorthSummary {
            count,
            mean,
            std,
            min: worths[0],
            q25: quantile(&worths, 0.25),
            median: quantile(&worths, 0.5),
            q75: quantile(&worths, 0.75),
            max: worths[count - 1],
        })
    }
}

/// Parses a currency-formatted net worth such as `"$1,234.50"`.
pub fn parse_worth(raw: &str) -> Result<f64> {
    let cleaned = strip_symbols(raw, &['$', ',']);
    let worth: f64 = cleaned
        .parse()
        .with_context(|| format!("net worth '{raw}' is not numeric"))?;
    ensure!(worth.is_finite(), "net worth '{raw}' is not finite");
    ensure!(worth >= 0.0, "net worth '{raw}' is negative");
    Ok(worth)
}

fn parse_birth_year(raw: &str) -> Result<Option<i32>> {
    if raw.is_empty() {
        return Ok(None);
    }
    let year = match raw.parse::<i32>() {
        Ok(year) => year,
        Err(_) => {
            let year: f64 = raw
                .parse()
                .with_context(|| format!("birth year '{raw}' is not numeric"))?;
            if year.fract() != 0.0 || year < i32::MIN as f64 || year > i32::MAX as f64 {
                bail!("birth year '{raw}' is not a whole year");
            }
            year as i32
        }
    };
    ensure!(
        0 < year && year <= REFERENCE_YEAR,
        "birth year '{raw}' is outside 1..={REFERENCE_YEAR}"
    );
    Ok(Some(year))
}

fn parse_indicator(raw: &str, column: &str) -> Result<Option<f64>> {
    let cleaned = strip_symbols(raw, &['$', ',', '%']);
    if cleaned.is_empty() {
        return Ok(None);
    }
    let value: f64 = cleaned
        .parse()
        .with_context(|| format!("{column} value '{raw}' is not numeric"))?;
    Ok(value.is_finite().then_some(value))
}

fn convert_row(raw: RawRecord) -> Result<Record> {
    Ok(Record {
        worth: parse_worth(&raw.final_worth).context("column finalWorth")?,
        birth_year: parse_birth_year(&raw.birth_year).context("column birthYear")?,
        cpi_change: parse_indicator(&raw.cpi_change_country, "cpi_change_country")?,
        tax_revenue: parse_indicator(
            &raw.tax_revenue_country_country,
            "tax_revenue_country_country",
        )?,
        name: raw.person_name,
        category: raw.category,
        industries: raw.industries,
        country: raw.country,
    })
}

fn strip_symbols(raw: &str, symbols: &[char]) -> String {
    raw.chars()
        .filter(|c| !symbols.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

/// Linear interpolation between closest ranks over sorted input.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
