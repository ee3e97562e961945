//! Market data boundary
//!
//! FX rates arrive from an external store as `(date, from, to, rate)`
//! records. This module turns them into date-ordered series that the VaR
//! functions can consume, and aligns two series on their common dates so a
//! portfolio and a position always describe the same scenarios.

use crate::error::{HdVarError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single FX rate observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxRate {
    /// Effective date of the quote
    pub effective_date: NaiveDate,

    /// Base currency code (e.g., "USD")
    pub from_currency: String,

    /// Quote currency code (e.g., "CAD")
    pub to_currency: String,

    /// Mid rate
    pub rate: f64,
}

/// Source of FX rate records
pub trait FxRateSource {
    /// Fetch all available FX rate records
    fn fx_rates(&self) -> Result<Vec<FxRate>>;
}

/// FX rates held in memory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryFxRates {
    rates: Vec<FxRate>,
}

impl InMemoryFxRates {
    pub fn new(rates: Vec<FxRate>) -> Self {
        Self { rates }
    }

    /// Load records from a JSON array
    pub fn from_json(json: &str) -> Result<Self> {
        let rates: Vec<FxRate> = serde_json::from_str(json)
            .map_err(|e| HdVarError::MarketData(format!("Failed to parse FX rates: {}", e)))?;
        Ok(Self::new(rates))
    }

    pub fn push(&mut self, rate: FxRate) {
        self.rates.push(rate);
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FxRateSource for InMemoryFxRates {
    fn fx_rates(&self) -> Result<Vec<FxRate>> {
        Ok(self.rates.clone())
    }
}

/// Whether `date` is the last calendar day of a quarter
pub fn is_quarter_end(date: NaiveDate) -> bool {
    if date.month() % 3 != 0 {
        return false;
    }
    match date.succ_opt() {
        Some(next) => next.month() != date.month(),
        // NaiveDate::MAX is Dec 31
        None => true,
    }
}

/// Keep only quarter-end records
pub fn quarter_end_rates(rates: &[FxRate]) -> Vec<FxRate> {
    rates
        .iter()
        .filter(|r| is_quarter_end(r.effective_date))
        .cloned()
        .collect()
}

/// Values indexed by strictly ascending dates
///
/// Serialized as a list of `[date, value]` points; deserialization goes
/// through [`DatedSeries::from_points`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(NaiveDate, f64)>", into = "Vec<(NaiveDate, f64)>")]
pub struct DatedSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl DatedSeries {
    /// Build a series from `(date, value)` points in any order
    ///
    /// Fails on duplicate dates or non-finite values.
    pub fn from_points(mut points: Vec<(NaiveDate, f64)>) -> Result<Self> {
        points.sort_by_key(|(date, _)| *date);

        if let Some(pair) = points.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(HdVarError::MarketData(format!(
                "Duplicate observation for {}",
                pair[0].0
            )));
        }

        if let Some((date, value)) = points.iter().find(|(_, v)| !v.is_finite()) {
            return Err(HdVarError::MarketData(format!(
                "Non-finite value {} on {}",
                value, date
            )));
        }

        let (dates, values) = points.into_iter().unzip();
        Ok(Self { dates, values })
    }

    /// Iterate over `(date, value)` points in date order
    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Period-over-period changes, dated at the end of each period
    pub fn differences(&self) -> DatedSeries {
        let dates = self.dates.iter().skip(1).copied().collect();
        let values = self.values.windows(2).map(|w| w[1] - w[0]).collect();
        DatedSeries { dates, values }
    }

    /// Inner join on date, returning index-aligned values of both series
    pub fn align(&self, other: &DatedSeries) -> (Vec<f64>, Vec<f64>) {
        let mut left = Vec::new();
        let mut right = Vec::new();
        let (mut i, mut j) = (0, 0);

        while i < self.dates.len() && j < other.dates.len() {
            match self.dates[i].cmp(&other.dates[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    left.push(self.values[i]);
                    right.push(other.values[j]);
                    i += 1;
                    j += 1;
                }
            }
        }

        (left, right)
    }
}

impl TryFrom<Vec<(NaiveDate, f64)>> for DatedSeries {
    type Error = HdVarError;

    fn try_from(points: Vec<(NaiveDate, f64)>) -> Result<Self> {
        DatedSeries::from_points(points)
    }
}

impl From<DatedSeries> for Vec<(NaiveDate, f64)> {
    fn from(series: DatedSeries) -> Self {
        series.dates.into_iter().zip(series.values).collect()
    }
}

/// Date-ordered rate series for one currency pair
pub fn rate_series(rates: &[FxRate], from_currency: &str, to_currency: &str) -> Result<DatedSeries> {
    let points: Vec<(NaiveDate, f64)> = rates
        .iter()
        .filter(|r| r.from_currency == from_currency && r.to_currency == to_currency)
        .map(|r| (r.effective_date, r.rate))
        .collect();

    if points.is_empty() {
        return Err(HdVarError::MarketData(format!(
            "No rates for {}/{}",
            from_currency, to_currency
        )));
    }

    DatedSeries::from_points(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rate(d: NaiveDate, from: &str, value: f64) -> FxRate {
        FxRate {
            effective_date: d,
            from_currency: from.to_string(),
            to_currency: "CAD".to_string(),
            rate: value,
        }
    }

    #[test]
    fn test_quarter_end() {
        assert!(is_quarter_end(date(2019, 3, 31)));
        assert!(is_quarter_end(date(2020, 6, 30)));
        assert!(is_quarter_end(date(2020, 12, 31)));
        assert!(!is_quarter_end(date(2020, 6, 29)));
        assert!(!is_quarter_end(date(2020, 1, 31)));
        assert!(!is_quarter_end(date(2020, 2, 29)));
    }

    #[test]
    fn test_quarter_end_filter() {
        let rates = vec![
            rate(date(2020, 3, 31), "USD", 1.41),
            rate(date(2020, 4, 30), "USD", 1.39),
            rate(date(2020, 6, 30), "USD", 1.36),
        ];
        let filtered = quarter_end_rates(&rates);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| is_quarter_end(r.effective_date)));
    }

    #[test]
    fn test_rate_series_sorted_by_date() {
        let rates = vec![
            rate(date(2020, 6, 30), "USD", 1.36),
            rate(date(2020, 3, 31), "USD", 1.41),
            rate(date(2020, 3, 31), "EUR", 1.55),
        ];
        let series = rate_series(&rates, "USD", "CAD").unwrap();
        assert_eq!(series.dates(), &[date(2020, 3, 31), date(2020, 6, 30)]);
        assert_eq!(series.values(), &[1.41, 1.36]);
    }

    #[test]
    fn test_rate_series_missing_pair() {
        let rates = vec![rate(date(2020, 3, 31), "USD", 1.41)];
        assert!(matches!(
            rate_series(&rates, "JPY", "CAD"),
            Err(HdVarError::MarketData(_))
        ));
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let points = vec![(date(2020, 3, 31), 1.0), (date(2020, 3, 31), 2.0)];
        assert!(DatedSeries::from_points(points).is_err());
    }

    #[test]
    fn test_differences() {
        let series = DatedSeries::from_points(vec![
            (date(2020, 3, 31), 1.0),
            (date(2020, 6, 30), 1.5),
            (date(2020, 9, 30), 1.25),
        ])
        .unwrap();
        let diffs = series.differences();
        assert_eq!(diffs.dates(), &[date(2020, 6, 30), date(2020, 9, 30)]);
        assert_eq!(diffs.values(), &[0.5, -0.25]);
    }

    #[test]
    fn test_align_inner_join() {
        let a = DatedSeries::from_points(vec![
            (date(2020, 1, 1), 1.0),
            (date(2020, 1, 2), 2.0),
            (date(2020, 1, 4), 4.0),
        ])
        .unwrap();
        let b = DatedSeries::from_points(vec![
            (date(2020, 1, 2), 20.0),
            (date(2020, 1, 3), 30.0),
            (date(2020, 1, 4), 40.0),
        ])
        .unwrap();

        let (left, right) = a.align(&b);
        assert_eq!(left, vec![2.0, 4.0]);
        assert_eq!(right, vec![20.0, 40.0]);
    }

    #[test]
    fn test_deserialize_round_trip() {
        let series = DatedSeries::from_points(vec![
            (date(2020, 3, 31), 1.41),
            (date(2020, 6, 30), 1.36),
        ])
        .unwrap();

        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(json, r#"[["2020-03-31",1.41],["2020-06-30",1.36]]"#);

        let parsed: DatedSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, series);
    }

    #[test]
    fn test_deserialize_sorts_unordered_points() {
        let json = r#"[["2020-06-30", 1.36], ["2020-03-31", 1.41]]"#;
        let series: DatedSeries = serde_json::from_str(json).unwrap();
        assert_eq!(series.dates(), &[date(2020, 3, 31), date(2020, 6, 30)]);
        assert_eq!(series.values(), &[1.41, 1.36]);
    }

    #[test]
    fn test_deserialize_rejects_invalid_series() {
        // Field-wise layout with more dates than values is not accepted
        let mismatched = r#"{"dates":["2020-03-31","2020-06-30"],"values":[1.0]}"#;
        assert!(serde_json::from_str::<DatedSeries>(mismatched).is_err());

        let duplicated = r#"[["2020-03-31", 1.0], ["2020-03-31", 2.0]]"#;
        let err = serde_json::from_str::<DatedSeries>(duplicated).unwrap_err();
        assert!(err.to_string().contains("Duplicate observation"));
    }

    #[test]
    fn test_deserialized_series_aligns() {
        let parsed: DatedSeries =
            serde_json::from_str(r#"[["2020-03-31", 1.0], ["2020-06-30", 2.0]]"#).unwrap();
        let other = DatedSeries::from_points(vec![
            (date(2020, 3, 31), 10.0),
            (date(2020, 6, 30), 20.0),
        ])
        .unwrap();

        let (left, right) = parsed.align(&other);
        assert_eq!(left, vec![1.0, 2.0]);
        assert_eq!(right, vec![10.0, 20.0]);
        assert_eq!(parsed.points().count(), 2);
    }

    #[test]
    fn test_in_memory_source_from_json() {
        let json = r#"[
            {"effective_date": "2019-03-31", "from_currency": "USD", "to_currency": "CAD", "rate": 1.3363}
        ]"#;
        let source = InMemoryFxRates::from_json(json).unwrap();
        let rates = source.fx_rates().unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].effective_date, date(2019, 3, 31));
    }
}
