// src/io/export.rs

//! CSV export for downstream consumers. Column names and order are fixed.

use serde::Serialize;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::model::forecast::ForecastSeries;
use crate::model::recommendation::{ReplenishmentRecommendation, StockTier};

#[derive(Debug, Serialize)]
struct ForecastRow {
    day: u32,
    date: NaiveDate,
    #[serde(rename = "predictedUnits")]
    predicted_units: u32,
    #[serde(rename = "confidencePercent")]
    confidence_percent: u32,
}

#[derive(Debug, Serialize)]
struct RecommendationRow<'a> {
    sku: &'a str,
    #[serde(rename = "storeId")]
    store_id: &'a str,
    tier: StockTier,
    #[serde(rename = "optimalStock")]
    optimal_stock: u64,
    #[serde(rename = "reorderQuantity")]
    reorder_quantity: u64,
    #[serde(rename = "reorderDate")]
    reorder_date: Option<NaiveDate>,
    /// Empty when no stockout is projected.
    #[serde(rename = "daysUntilStockout")]
    days_until_stockout: Option<u64>,
}

/// Writes one row per forecast point: `day,date,predictedUnits,confidencePercent`.
pub fn write_forecast<W: Write>(writer: W, series: &ForecastSeries) -> EngineResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for point in &series.points {
        wtr.serialize(ForecastRow {
            day: point.day_index,
            date: point.date,
            predicted_units: point.predicted_units,
            confidence_percent: point.confidence_percent,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes one row per recommendation:
/// `sku,storeId,tier,optimalStock,reorderQuantity,reorderDate,daysUntilStockout`.
pub fn write_recommendations<W: Write>(
    writer: W,
    recommendations: &[ReplenishmentRecommendation],
) -> EngineResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for rec in recommendations {
        wtr.serialize(RecommendationRow {
            sku: &rec.sku,
            store_id: &rec.store_id,
            tier: rec.tier,
            optimal_stock: rec.optimal_stock,
            reorder_quantity: rec.reorder_quantity,
            reorder_date: rec.reorder_date,
            days_until_stockout: rec.days_until_stockout,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_forecast_csv(file_path: impl AsRef<Path>, series: &ForecastSeries) -> EngineResult<()> {
    let file = std::fs::File::create(file_path)?;
    write_forecast(file, series)
}

pub fn write_recommendations_csv(
    file_path: impl AsRef<Path>,
    recommendations: &[ReplenishmentRecommendation],
) -> EngineResult<()> {
    let file = std::fs::File::create(file_path)?;
    write_recommendations(file, recommendations)
}
