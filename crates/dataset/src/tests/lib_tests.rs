use super::*;

const HEADER: &str =
    "personName,finalWorth,category,industries,country,birthYear,cpi_change_country,tax_revenue_country_country";

fn dataset(rows: &[&str]) -> Dataset {
    let mut csv = String::from(HEADER);
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    Dataset::from_reader(csv.as_bytes()).expect("dataset")
}

fn names(selection: Selection<'_>) -> Vec<String> {
    selection.iter().map(|record| record.name.clone()).collect()
}

#[test]
fn parses_currency_formatted_worth() {
    assert_eq!(parse_worth("$1,234.50").expect("worth"), 1234.50);
    assert_eq!(parse_worth("$0").expect("worth"), 0.0);
    assert_eq!(parse_worth(" 211000 ").expect("worth"), 211000.0);
}

#[test]
fn rejects_non_numeric_or_negative_worth() {
    assert!(parse_worth("$abc").is_err());
    assert!(parse_worth("").is_err());
    assert!(parse_worth("$-5").is_err());
    assert!(parse_worth("NaN").is_err());
}

#[test]
fn derives_age_and_young_flag_from_birth_year() {
    let dataset = dataset(&[
        "A,$100,Technology,Technology,United States,1960,7.5,9.6",
        "B,$200,Fashion & Retail,Fashion & Retail,France,1990,1.1,24.2",
        "C,$300,Technology,Technology,China,1983,2.9,9.4",
        "D,$400,Media,Media,India,,7.7,11.2",
    ]);

    for record in dataset.records() {
        match record.birth_year {
            Some(year) => {
                let age = record.age().expect("age");
                assert_eq!(age, REFERENCE_YEAR - year);
                assert_eq!(record.is_young(), age < YOUNG_AGE_CUTOFF);
            }
            None => {
                assert_eq!(record.age(), None);
                assert!(!record.is_young());
                assert_eq!(record.age_group(), AgeGroup::Older);
            }
        }
    }
    assert_eq!(dataset.records()[1].age(), Some(33));
    assert_eq!(dataset.records()[1].age_group(), AgeGroup::Young);
    assert_eq!(dataset.records()[2].age(), Some(40));
    assert_eq!(dataset.records()[2].age_group(), AgeGroup::Older);
}

#[test]
fn non_numeric_worth_aborts_load() {
    let csv = format!("{HEADER}\nA,$100,Tech,Tech,US,1960,1,1\nB,lots,Tech,Tech,US,1960,1,1");
    let err = Dataset::from_reader(csv.as_bytes()).expect_err("should fail");
    let message = format!("{err:#}");
    assert!(message.contains("row 2"), "{message}");
    assert!(message.contains("finalWorth"), "{message}");
}

#[test]
fn missing_required_column_aborts_load() {
    let csv = "finalWorth,category\n$1,Tech";
    assert!(Dataset::from_reader(csv.as_bytes()).is_err());
}

#[test]
fn accepts_float_rendered_birth_year_and_percent_indicators() {
    let dataset = dataset(&["A,\"$1,000\",Tech,Tech,US,1956.0,7.5%,\"$1,200\""]);
    let record = &dataset.records()[0];
    assert_eq!(record.worth, 1000.0);
    assert_eq!(record.birth_year, Some(1956));
    assert_eq!(record.cpi_change, Some(7.5));
    assert_eq!(record.tax_revenue, Some(1200.0));
}

#[test]
fn implausible_birth_year_aborts_load() {
    for year in ["-2147483000", "-2147483000.0", "0", "2024"] {
        let csv = format!("{HEADER}\nA,$1,Tech,Tech,US,1970,1,1\nB,$1,Tech,Tech,US,{year},1,1");
        let err = Dataset::from_reader(csv.as_bytes()).expect_err(year);
        let message = format!("{err:#}");
        assert!(message.contains("row 2"), "{message}");
        assert!(message.contains("birthYear"), "{message}");
    }
}

#[test]
fn age_of_unrepresentable_birth_year_is_missing() {
    let record = Record {
        name: "A".to_string(),
        worth: 1.0,
        category: "Tech".to_string(),
        industries: "Tech".to_string(),
        country: "US".to_string(),
        birth_year: Some(i32::MIN),
        cpi_change: None,
        tax_revenue: None,
    };
    assert_eq!(record.age(), None);
    assert_eq!(record.age_group(), AgeGroup::Older);

    let dataset = Dataset::from_records(vec![record]);
    assert!(dataset.select().age_range(0, 100).is_empty());
}

#[test]
fn missing_indicators_are_propagated() {
    let dataset = dataset(&["A,$1,Tech,Tech,US,1970,,"]);
    let record = &dataset.records()[0];
    assert_eq!(record.cpi_change, None);
    assert_eq!(record.tax_revenue, None);
}

#[test]
fn distinct_values_keep_first_appearance_order() {
    let dataset = dataset(&[
        "A,$1,Technology,Software,US,1970,1,1",
        "B,$1,Finance,Banking,US,1970,1,1",
        "C,$1,Technology,Software,US,1970,1,1",
        "D,$1,Automotive,Cars,US,1970,1,1",
    ]);
    assert_eq!(
        dataset.categories(),
        vec!["Technology", "Finance", "Automotive"]
    );
    assert_eq!(dataset.industries(), vec!["Software", "Banking", "Cars"]);
}

#[test]
fn category_filter_is_idempotent() {
    let dataset = dataset(&[
        "A,$1,Technology,Software,US,1970,1,1",
        "B,$2,Finance,Banking,US,1970,1,1",
        "C,$3,Technology,Software,FR,1980,1,1",
    ]);
    let once: Vec<_> = dataset
        .select()
        .category("Technology")
        .iter()
        .map(|record| record.name.clone())
        .collect();
    let twice: Vec<_> = dataset
        .select()
        .category("Technology")
        .category("Technology")
        .iter()
        .map(|record| record.name.clone())
        .collect();
    assert_eq!(once, vec!["A", "C"]);
    assert_eq!(once, twice);
}

#[test]
fn age_ranges_are_inclusive_and_partition_rows() {
    let dataset = dataset(&[
        "A,$1,T,T,US,1983,1,1",
        "B,$1,T,T,US,1982,1,1",
        "C,$1,T,T,US,1960,1,1",
        "D,$1,T,T,US,2000,1,1",
        "E,$1,T,T,US,,1,1",
    ]);
    let young = names(dataset.select().age_range(0, 40));
    let older = names(dataset.select().age_range(41, 100));
    assert_eq!(young, vec!["A", "D"]);
    assert_eq!(older, vec!["B", "C"]);
    assert!(young.iter().all(|name| !older.contains(name)));
    assert_eq!(young.len() + older.len(), dataset.select().age_range(0, 100).len());
}

#[test]
fn birth_year_range_drops_missing_years() {
    let dataset = dataset(&["A,$1,T,T,US,1950,1,1", "B,$1,T,T,US,,1,1"]);
    assert_eq!(dataset.select().birth_year_range(1900, 2023).len(), 1);
}

#[test]
fn describe_matches_dataframe_semantics() {
    let dataset = dataset(&[
        "A,$1,T,T,US,1950,1,1",
        "B,$2,T,T,US,1950,1,1",
        "C,$3,T,T,US,1950,1,1",
        "D,$4,T,T,US,1950,1,1",
    ]);
    let summary = dataset.describe().expect("summary");
    assert_eq!(summary.count, 4);
    assert_eq!(summary.mean, 2.5);
    assert_eq!(summary.min, 1.0);
    assert_eq!(summary.q25, 1.75);
    assert_eq!(summary.median, 2.5);
    assert_eq!(summary.q75, 3.25);
    assert_eq!(summary.max, 4.0);
    let std = summary.std.expect("std");
    assert!((std - 1.290_994_448_735_805_6).abs() < 1e-12);
}

#[test]
fn describe_handles_tiny_tables() {
    assert!(Dataset::default().describe().is_none());
    let single = dataset(&["A,$7,T,T,US,1950,1,1"]);
    let summary = single.describe().expect("summary");
    assert_eq!(summary.std, None);
    assert_eq!(summary.median, 7.0);
}

#[test]
fn group_helpers_aggregate_in_key_order() {
    let dataset = dataset(&[
        "A,$10,Tech,T,US,1950,1,1",
        "B,$30,Tech,T,FR,1950,1,1",
        "C,$5,Food,T,US,1950,1,1",
    ]);
    let means = dataset.select().mean_by(|r| r.category.clone(), |r| r.worth);
    assert_eq!(
        means.into_iter().collect::<Vec<_>>(),
        vec![("Food".to_string(), 5.0), ("Tech".to_string(), 20.0)]
    );
    let counts = dataset.select().count_by(|r| r.country.clone());
    assert_eq!(counts.get("US"), Some(&2));
    assert_eq!(counts.get("FR"), Some(&1));
}
