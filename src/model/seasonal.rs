// src/model/seasonal.rs

//! Static month-keyed table of expected category-level demand shifts.
//!
//! The data is advisory. A month with no table entry yields an empty
//! outlook rather than an error.

use chrono::Month;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalTrend {
    pub category: String,
    /// Signed change versus a typical month, e.g. +35.0 or -15.0.
    pub percent_change: f64,
}

type MonthEntry = (Month, &'static [(&'static str, f64)]);

// March and September carry no entries.
const SEASONAL_TABLE: &[MonthEntry] = &[
    (Month::January, &[("Electronics", -15.0), ("Produce", 10.0), ("Household", 5.0)]),
    (Month::February, &[("Bakery", 12.0), ("Dairy", 5.0)]),
    (Month::April, &[("Beverages", 10.0), ("Produce", 8.0)]),
    (Month::May, &[("Beverages", 25.0), ("Dairy", -5.0)]),
    (Month::June, &[("Beverages", 35.0), ("Produce", 15.0), ("Bakery", -10.0)]),
    (Month::July, &[("Beverages", 30.0), ("Electronics", 10.0)]),
    (Month::August, &[("Electronics", 20.0), ("Household", 8.0)]),
    (Month::October, &[("Household", 20.0), ("Bakery", 15.0), ("Dairy", 10.0)]),
    (Month::November, &[("Electronics", 35.0), ("Household", 15.0), ("Beverages", 12.0)]),
    (Month::December, &[("Electronics", 30.0), ("Bakery", 25.0), ("Dairy", 18.0), ("Produce", -15.0)]),
];

/// Ordered seasonal trends for `month`, empty if the table has no entry.
pub fn trends_for(month: Month) -> Vec<SeasonalTrend> {
    SEASONAL_TABLE
        .iter()
        .find(|(m, _)| *m == month)
        .map(|(_, entries)| {
            entries
                .iter()
                .map(|(category, percent_change)| SeasonalTrend {
                    category: category.to_string(),
                    percent_change: *percent_change,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Lookup by calendar month number (1 = January). Out-of-range numbers
/// degrade to an empty outlook.
pub fn trends_for_month_number(month: u32) -> Vec<SeasonalTrend> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(trends_for)
        .unwrap_or_default()
}

/// Trends for `month` restricted to the given categories (case-insensitive).
pub fn trends_for_categories<'a, I>(month: Month, categories: I) -> Vec<SeasonalTrend>
where
    I: IntoIterator<Item = &'a str>,
{
    let wanted: Vec<String> = categories.into_iter().map(str::to_lowercase).collect();
    trends_for(month)
        .into_iter()
        .filter(|trend| wanted.contains(&trend.category.to_lowercase()))
        .collect()
}
