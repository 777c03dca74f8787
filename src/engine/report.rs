// src/engine/report.rs

use chrono::{Datelike, Month, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::engine::config::EngineConfig;
use crate::engine::forecaster::{validate_horizon, TimeSeriesForecaster};
use crate::error::{EngineError, EngineResult};
use crate::model::forecast::ForecastSeries;
use crate::model::recommendation::{ReplenishmentRecommendation, StockTier};
use crate::model::record::SkuStockRecord;
use crate::model::seasonal::{trends_for_categories, SeasonalTrend};
use crate::strategy::replenishment::ReplenishmentCalculator;
use crate::strategy::traits::SafetyStockPolicy;

/// Tier counts and the quantity still to be ordered.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportTotals {
    pub critical_count: usize,
    pub low_count: usize,
    pub good_count: usize,
    /// Sum over CRITICAL and LOW recommendations only.
    pub total_reorder_quantity: u64,
}

impl ReportTotals {
    fn record(&mut self, rec: &ReplenishmentRecommendation) {
        match rec.tier {
            StockTier::Critical => self.critical_count += 1,
            StockTier::Low => self.low_count += 1,
            StockTier::Good => self.good_count += 1,
        }
        if rec.tier.needs_ordering() {
            self.total_reorder_quantity = self
                .total_reorder_quantity
                .saturating_add(rec.reorder_quantity);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreStatus {
    Good,
    Warning,
    Critical,
}

/// Per-store rollup of SKU health.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSummary {
    pub store_id: String,
    pub status: StoreStatus,
    pub critical_count: usize,
    pub low_count: usize,
    pub good_count: usize,
    pub reorder_quantity: u64,
}

/// A record that failed validation, with its catalog position.
#[derive(Debug)]
pub struct RecordFailure {
    pub index: usize,
    pub sku: String,
    pub store_id: String,
    pub error: EngineError,
}

/// Forecast kept alongside the recommendation it produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkuForecast {
    pub sku: String,
    pub store_id: String,
    pub series: ForecastSeries,
}

#[derive(Debug)]
pub struct ReplenishmentReport {
    pub run_date: NaiveDate,
    pub horizon_days: u32,
    /// Successful records, in catalog order.
    pub recommendations: Vec<ReplenishmentRecommendation>,
    /// Parallel to `recommendations`.
    pub forecasts: Vec<SkuForecast>,
    pub failures: Vec<RecordFailure>,
    pub totals: ReportTotals,
    pub stores: Vec<StoreSummary>,
    pub seasonal_outlook: Vec<SeasonalTrend>,
}

impl ReplenishmentReport {
    pub fn processed(&self) -> usize {
        self.recommendations.len() + self.failures.len()
    }
}

/// Runs forecast, classification and replenishment for every catalog record.
#[derive(Debug)]
pub struct ReplenishmentReportBuilder {
    forecaster: TimeSeriesForecaster,
    calculator: ReplenishmentCalculator,
    policy: Box<dyn SafetyStockPolicy>,
    seed: Option<u64>,
    parallel: bool,
}

type RecordOutcome = EngineResult<(ReplenishmentRecommendation, ForecastSeries)>;

impl ReplenishmentReportBuilder {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            forecaster: TimeSeriesForecaster::new(config.forecast.clone())?,
            calculator: ReplenishmentCalculator::from_config(&config),
            policy: config.safety_stock.policy(),
            seed: config.seed,
            parallel: config.parallel,
        })
    }

    /// Replaces the configured safety-stock policy.
    pub fn with_policy(mut self, policy: Box<dyn SafetyStockPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn build_report(
        &self,
        catalog: &[SkuStockRecord],
        horizon_days: i64,
        today: NaiveDate,
    ) -> EngineResult<ReplenishmentReport> {
        let horizon = validate_horizon(horizon_days)?;
        info!(records = catalog.len(), horizon, %today, "building replenishment report");

        // Indexed collect keeps results in catalog order regardless of scheduling.
        let outcomes: Vec<RecordOutcome> = if self.parallel {
            catalog
                .par_iter()
                .enumerate()
                .map(|(index, record)| self.process_record(index, record, horizon, today))
                .collect()
        } else {
            catalog
                .iter()
                .enumerate()
                .map(|(index, record)| self.process_record(index, record, horizon, today))
                .collect()
        };

        let mut recommendations = Vec::with_capacity(catalog.len());
        let mut forecasts = Vec::with_capacity(catalog.len());
        let mut failures = Vec::new();
        let mut totals = ReportTotals::default();

        for (index, (record, outcome)) in catalog.iter().zip(outcomes).enumerate() {
            match outcome {
                Ok((rec, series)) => {
                    totals.record(&rec);
                    forecasts.push(SkuForecast {
                        sku: rec.sku.clone(),
                        store_id: rec.store_id.clone(),
                        series,
                    });
                    recommendations.push(rec);
                }
                Err(error) => {
                    warn!(index, sku = %record.sku, store = %record.store_id, %error, "skipping record");
                    failures.push(RecordFailure {
                        index,
                        sku: record.sku.clone(),
                        store_id: record.store_id.clone(),
                        error,
                    });
                }
            }
        }

        let stores = summarize_stores(&recommendations);
        let seasonal_outlook = seasonal_outlook(catalog, today);

        info!(
            critical = totals.critical_count,
            low = totals.low_count,
            good = totals.good_count,
            failed = failures.len(),
            reorder_units = totals.total_reorder_quantity,
            "report complete"
        );

        Ok(ReplenishmentReport {
            run_date: today,
            horizon_days: horizon,
            recommendations,
            forecasts,
            failures,
            totals,
            stores,
            seasonal_outlook,
        })
    }

    fn process_record(
        &self,
        index: usize,
        record: &SkuStockRecord,
        horizon: u32,
        today: NaiveDate,
    ) -> RecordOutcome {
        debug!(index, sku = %record.sku, store = %record.store_id, "processing record");
        record.validate()?;

        let series = match self.seed {
            Some(seed) => {
                let mut rng = record_rng(seed, index);
                self.forecaster
                    .forecast(record.daily_demand_estimate, horizon as i64, today, &mut rng)?
            }
            None => self.forecaster.forecast_unseeded(
                record.daily_demand_estimate,
                horizon as i64,
                today,
            )?,
        };

        let rec = self
            .calculator
            .calculate(record, &series, self.policy.as_ref(), today)?;
        Ok((rec, series))
    }
}

impl Default for ReplenishmentReportBuilder {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            forecaster: TimeSeriesForecaster::default(),
            calculator: ReplenishmentCalculator::from_config(&config),
            policy: config.safety_stock.policy(),
            seed: config.seed,
            parallel: config.parallel,
        }
    }
}

/// Random source for one catalog position. Seed and index occupy separate
/// key words, so distinct (seed, index) pairs never share a stream.
fn record_rng(seed: u64, index: usize) -> StdRng {
    let mut key = <StdRng as SeedableRng>::Seed::default();
    key[..8].copy_from_slice(&seed.to_le_bytes());
    key[8..16].copy_from_slice(&(index as u64).to_le_bytes());
    StdRng::from_seed(key)
}

/// Store rollup in order of first appearance.
pub fn summarize_stores(recommendations: &[ReplenishmentRecommendation]) -> Vec<StoreSummary> {
    let mut stores: Vec<StoreSummary> = Vec::new();

    for rec in recommendations {
        let position = match stores.iter().position(|s| s.store_id == rec.store_id) {
            Some(position) => position,
            None => {
                stores.push(StoreSummary {
                    store_id: rec.store_id.clone(),
                    status: StoreStatus::Good,
                    critical_count: 0,
                    low_count: 0,
                    good_count: 0,
                    reorder_quantity: 0,
                });
                stores.len() - 1
            }
        };

        let summary = &mut stores[position];
        match rec.tier {
            StockTier::Critical => summary.critical_count += 1,
            StockTier::Low => summary.low_count += 1,
            StockTier::Good => summary.good_count += 1,
        }
        if rec.tier.needs_ordering() {
            summary.reorder_quantity = summary.reorder_quantity.saturating_add(rec.reorder_quantity);
        }
    }

    for summary in stores.iter_mut() {
        summary.status = if summary.critical_count > 0 {
            StoreStatus::Critical
        } else if summary.low_count > 0 {
            StoreStatus::Warning
        } else {
            StoreStatus::Good
        };
    }

    stores
}

fn seasonal_outlook(catalog: &[SkuStockRecord], today: NaiveDate) -> Vec<SeasonalTrend> {
    match Month::try_from(today.month() as u8) {
        Ok(month) => trends_for_categories(month, catalog.iter().map(|r| r.category.as_str())),
        Err(_) => Vec::new(),
    }
}
