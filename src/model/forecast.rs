// src/model/forecast.rs

use chrono::NaiveDate;
use serde::Serialize;

/// One projected day of demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// 0-based offset from the run date.
    pub day_index: u32,
    pub date: NaiveDate,
    pub predicted_units: u32,
    /// Data-quality signal in [0, 100]; independent of `predicted_units`.
    pub confidence_percent: u32,
}

/// Day-ordered projection; its length equals the requested horizon.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ForecastSeries {
    pub points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn new(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total_units(&self) -> u64 {
        self.points.iter().map(|p| p.predicted_units as u64).sum()
    }

    /// Mean confidence rounded to the nearest integer, 0 for an empty series.
    pub fn average_confidence(&self) -> u32 {
        if self.points.is_empty() {
            return 0;
        }
        let sum: u64 = self.points.iter().map(|p| p.confidence_percent as u64).sum();
        (sum as f64 / self.points.len() as f64).round() as u32
    }
}
