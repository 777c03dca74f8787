// src/strategy/replenishment.rs

//! Replenishment arithmetic for a single SKU at a single store.
//!
//! Given the record, its forecast and a safety-stock policy:
//! - SafetyStock   = ceil(DailyDemand * DaysOfCover)
//! - OptimalStock  = max(0, Current + ForecastTotal - SafetyStock)
//! - ReorderQty    = max(0, round(DailyDemand * LeadTime) + SafetyStock - Current)
//! - DaysToStockout = floor(Current / DailyDemand), none when demand is zero
//! - ReorderDate   = today + max(0, DaysToStockout - LeadTime)

use chrono::{Days, NaiveDate};
use tracing::warn;

use crate::engine::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::model::forecast::ForecastSeries;
use crate::model::recommendation::ReplenishmentRecommendation;
use crate::model::record::SkuStockRecord;
use crate::strategy::classifier::StockClassifier;
use crate::strategy::traits::SafetyStockPolicy;

/// 2^64; every f64 below it converts to `u64` exactly.
const UNIT_LIMIT: f64 = 18_446_744_073_709_551_616.0;

#[derive(Debug, Clone)]
pub struct ReplenishmentCalculator {
    classifier: StockClassifier,
    mismatch_tolerance: f64,
}

impl ReplenishmentCalculator {
    pub fn new(classifier: StockClassifier, mismatch_tolerance: f64) -> Self {
        Self {
            classifier,
            mismatch_tolerance,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            StockClassifier::from_config(&config.classifier),
            config.mismatch_tolerance,
        )
    }

    pub fn calculate(
        &self,
        record: &SkuStockRecord,
        series: &ForecastSeries,
        policy: &dyn SafetyStockPolicy,
        today: NaiveDate,
    ) -> EngineResult<ReplenishmentRecommendation> {
        record.validate()?;

        if series.is_empty() {
            warn!(sku = %record.sku, store = %record.store_id, "no forecast supplied, using zero demand projection");
        }

        let demand = record.daily_demand_estimate;
        let lead_time = record.supplier_lead_time_days;
        let current = record.current_stock as u64;

        // NaN from a misbehaving policy collapses to zero cover.
        let days_of_cover = policy.days_of_cover(record).max(0.0);
        let safety_stock = to_units(record, "safety stock", (demand * days_of_cover).ceil())?;

        let total_forecast_units = series.total_units();
        let optimal_stock = current
            .checked_add(total_forecast_units)
            .ok_or_else(|| overflow(record, "stock plus forecast"))?
            .saturating_sub(safety_stock);

        let lead_time_demand = to_units(record, "lead-time demand", (demand * lead_time).round())?;
        let implied_reorder_point = lead_time_demand
            .checked_add(safety_stock)
            .ok_or_else(|| overflow(record, "implied reorder point"))?;
        let reorder_quantity = implied_reorder_point.saturating_sub(current);

        // `as u64` saturates, so extreme slow movers stay finite.
        let days_until_stockout = if demand == 0.0 {
            None
        } else {
            Some((current as f64 / demand).floor() as u64)
        };

        // A date past the calendar range means no order is due within it.
        let reorder_date = days_until_stockout.and_then(|days| {
            let slack = (days as f64 - lead_time).max(0.0).floor() as u64;
            today.checked_add_days(Days::new(slack))
        });

        let reorder_point = record.reorder_level as u64;
        let threshold_mismatch = self.thresholds_diverge(reorder_point, implied_reorder_point);
        if threshold_mismatch {
            warn!(
                sku = %record.sku,
                store = %record.store_id,
                configured = reorder_point,
                implied = implied_reorder_point,
                "reorder level diverges from lead-time threshold"
            );
        }

        let tier = self
            .classifier
            .classify(record.current_stock, record.reorder_level)?;

        Ok(ReplenishmentRecommendation {
            sku: record.sku.clone(),
            store_id: record.store_id.clone(),
            category: record.category.clone(),
            tier,
            current_stock: current,
            optimal_stock,
            safety_stock,
            reorder_point,
            implied_reorder_point,
            threshold_mismatch,
            reorder_date,
            reorder_quantity,
            days_until_stockout,
            total_forecast_units,
            average_confidence: series.average_confidence(),
        })
    }

    fn thresholds_diverge(&self, configured: u64, implied: u64) -> bool {
        let gap = (configured as f64 - implied as f64).abs();
        gap > self.mismatch_tolerance * implied.max(1) as f64
    }
}

/// Converts a non-negative unit count, rejecting values past `u64`.
fn to_units(record: &SkuStockRecord, what: &str, value: f64) -> EngineResult<u64> {
    if value.is_finite() && value < UNIT_LIMIT {
        Ok(value.max(0.0) as u64)
    } else {
        Err(overflow(record, what))
    }
}

fn overflow(record: &SkuStockRecord, what: &str) -> EngineError {
    EngineError::InvalidRecord {
        sku: record.sku.clone(),
        store_id: record.store_id.clone(),
        reason: format!("{} exceeds the representable unit range", what),
    }
}

impl Default for ReplenishmentCalculator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::model::forecast::ForecastPoint;
    use crate::model::recommendation::StockTier;
    use crate::strategy::implementations::{FixedCoverPolicy, LeadTimeCoverPolicy};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn flat_series(days: u32, units: u32, confidence: u32) -> ForecastSeries {
        ForecastSeries::new(
            (0..days)
                .map(|i| ForecastPoint {
                    day_index: i,
                    date: today() + Duration::days(i as i64),
                    predicted_units: units,
                    confidence_percent: confidence,
                })
                .collect(),
        )
    }

    fn detergent() -> SkuStockRecord {
        SkuStockRecord::new("SKU-003456", "store-003", "Household", 23, 40, 8.0, 7.0)
    }

    #[test]
    fn detergent_scenario() {
        let calc = ReplenishmentCalculator::default();
        let rec = calc
            .calculate(&detergent(), &flat_series(30, 8, 90), &LeadTimeCoverPolicy::default(), today())
            .unwrap();

        // 23 >= 40 * 0.5, so the default ratio lands on LOW, not CRITICAL.
        assert_eq!(rec.tier, StockTier::Low);
        assert_eq!(rec.days_until_stockout, Some(2));
        // days of cover = max(1, round(7 * 0.4)) = 3
        assert_eq!(rec.safety_stock, 24);
        assert_eq!(rec.total_forecast_units, 240);
        assert_eq!(rec.optimal_stock, 23 + 240 - 24);
        // round(8 * 7) + 24 - 23
        assert_eq!(rec.reorder_quantity, 57);
        assert_eq!(rec.reorder_point, 40);
        assert_eq!(rec.implied_reorder_point, 80);
        // |40 - 80| == 0.5 * 80 sits exactly on the tolerance
        assert!(!rec.threshold_mismatch);
        // already inside the lead time, so order today
        assert_eq!(rec.reorder_date, Some(today()));
        assert_eq!(rec.average_confidence, 90);
    }

    #[test]
    fn detergent_is_critical_with_tighter_ratio() {
        let calc = ReplenishmentCalculator::new(StockClassifier::new(0.6), 0.5);
        let rec = calc
            .calculate(&detergent(), &flat_series(30, 8, 90), &LeadTimeCoverPolicy::default(), today())
            .unwrap();
        assert_eq!(rec.tier, StockTier::Critical);
    }

    #[test]
    fn zero_demand_has_no_stockout() {
        let record = SkuStockRecord::new("SKU-004567", "store-001", "Electronics", 50, 25, 0.0, 5.0);
        let rec = ReplenishmentCalculator::default()
            .calculate(&record, &flat_series(7, 0, 88), &LeadTimeCoverPolicy::default(), today())
            .unwrap();

        assert_eq!(rec.days_until_stockout, None);
        assert_eq!(rec.reorder_date, None);
        assert_eq!(rec.safety_stock, 0);
        assert_eq!(rec.reorder_quantity, 0);
        assert_eq!(rec.optimal_stock, 50);
    }

    #[test]
    fn zero_demand_with_fixed_cover_still_orders_nothing() {
        let record = SkuStockRecord::new("SKU-004567", "store-001", "Electronics", 50, 25, 0.0, 5.0);
        let rec = ReplenishmentCalculator::default()
            .calculate(&record, &flat_series(7, 0, 88), &FixedCoverPolicy::new(10.0), today())
            .unwrap();
        // max(0, 0 + safety - 50) with safety = ceil(0 * 10)
        assert_eq!(rec.reorder_quantity, 0);
    }

    #[test]
    fn zero_stock_is_critical_and_stockout_is_today() {
        let record = SkuStockRecord::new("SKU-007890", "store-002", "Produce", 0, 200, 30.0, 2.0);
        let rec = ReplenishmentCalculator::default()
            .calculate(&record, &flat_series(14, 30, 90), &LeadTimeCoverPolicy::default(), today())
            .unwrap();

        assert_eq!(rec.tier, StockTier::Critical);
        assert_eq!(rec.days_until_stockout, Some(0));
        assert_eq!(rec.reorder_date, Some(today()));
        // cover = max(1, round(0.8)) = 1 -> safety 30; 60 + 30 - 0
        assert_eq!(rec.reorder_quantity, 90);
    }

    #[test]
    fn zero_lead_time() {
        let record = SkuStockRecord::new("SKU-005678", "store-001", "Bakery", 30, 20, 10.0, 0.0);
        let rec = ReplenishmentCalculator::default()
            .calculate(&record, &flat_series(7, 10, 90), &LeadTimeCoverPolicy::default(), today())
            .unwrap();

        assert_eq!(rec.safety_stock, 10);
        assert_eq!(rec.reorder_quantity, 0);
        assert_eq!(rec.days_until_stockout, Some(3));
        assert_eq!(rec.reorder_date, Some(today() + Duration::days(3)));
    }

    #[test]
    fn reorder_date_leaves_room_for_lead_time() {
        let record = SkuStockRecord::new("SKU-009012", "store-001", "Beverages", 156, 100, 6.0, 4.5);
        let rec = ReplenishmentCalculator::default()
            .calculate(&record, &flat_series(30, 6, 90), &LeadTimeCoverPolicy::default(), today())
            .unwrap();

        // floor(156 / 6) = 26; floor(26 - 4.5) = 21
        assert_eq!(rec.days_until_stockout, Some(26));
        assert_eq!(rec.reorder_date, Some(today() + Duration::days(21)));
        assert_eq!(rec.tier, StockTier::Good);
    }

    #[test]
    fn optimal_stock_clamps_to_zero() {
        let record = SkuStockRecord::new("SKU-1", "store-001", "Dairy", 2, 10, 20.0, 10.0);
        let rec = ReplenishmentCalculator::default()
            .calculate(&record, &flat_series(3, 0, 90), &LeadTimeCoverPolicy::default(), today())
            .unwrap();
        // safety = 20 * 4 = 80 > 2 + 0
        assert_eq!(rec.optimal_stock, 0);
    }

    #[test]
    fn large_gap_raises_threshold_mismatch() {
        let record = SkuStockRecord::new("SKU-1", "store-001", "Dairy", 100, 10, 10.0, 10.0);
        let rec = ReplenishmentCalculator::default()
            .calculate(&record, &flat_series(3, 10, 90), &LeadTimeCoverPolicy::default(), today())
            .unwrap();
        assert_eq!(rec.implied_reorder_point, 140);
        assert!(rec.threshold_mismatch);
    }

    #[test]
    fn missing_forecast_yields_zero_totals() {
        let rec = ReplenishmentCalculator::default()
            .calculate(&detergent(), &ForecastSeries::default(), &LeadTimeCoverPolicy::default(), today())
            .unwrap();
        assert_eq!(rec.total_forecast_units, 0);
        assert_eq!(rec.average_confidence, 0);
        assert_eq!(rec.optimal_stock, 0);
    }

    #[test]
    fn never_negative_for_valid_inputs() {
        let calc = ReplenishmentCalculator::default();
        let policy = LeadTimeCoverPolicy::default();
        for stock in [0, 1, 5, 50, 500, 1_000_000, 5_000_000_000, i64::MAX] {
            for demand in [0.0, 1e-6, 0.5, 3.0, 40.0, 1e12] {
                for lead_time in [0.0, 1.5, 7.0, 21.0] {
                    let record = SkuStockRecord::new("SKU-1", "store-001", "Dairy", stock, 40, demand, lead_time);
                    let rec = calc.calculate(&record, &flat_series(7, 3, 90), &policy, today()).unwrap();
                    assert!(rec.reorder_date.map_or(true, |d| d >= today()));
                    if demand == 0.0 {
                        assert_eq!(rec.days_until_stockout, None);
                    }
                }
            }
        }
    }

    #[test]
    fn slow_mover_past_calendar_range_has_no_reorder_date() {
        let record = SkuStockRecord::new("SKU-SLOW", "store-001", "Electronics", 1_000_000, 10, 0.01, 5.0);
        let rec = ReplenishmentCalculator::default()
            .calculate(&record, &ForecastSeries::default(), &LeadTimeCoverPolicy::default(), today())
            .unwrap();
        assert_eq!(rec.days_until_stockout, Some(100_000_000));
        assert_eq!(rec.reorder_date, None);
        assert_eq!(rec.tier, StockTier::Good);
    }

    #[test]
    fn stockout_days_beyond_u32_are_kept() {
        let record = SkuStockRecord::new("SKU-BULK", "store-001", "Household", 5_000_000_000, 10, 1.0, 3.0);
        let rec = ReplenishmentCalculator::default()
            .calculate(&record, &flat_series(7, 1, 90), &LeadTimeCoverPolicy::default(), today())
            .unwrap();
        assert_eq!(rec.days_until_stockout, Some(5_000_000_000));
        assert_eq!(rec.reorder_date, None);
    }

    #[test]
    fn demand_past_unit_range_is_invalid_record() {
        let calc = ReplenishmentCalculator::default();
        let policy = LeadTimeCoverPolicy::default();
        for demand in [1e20, 1e300, f64::MAX] {
            let record = SkuStockRecord::new("SKU-HUGE", "store-001", "Dairy", 10, 10, demand, 1.0);
            let err = calc.calculate(&record, &flat_series(3, 1, 90), &policy, today()).unwrap_err();
            match err {
                EngineError::InvalidRecord { sku, .. } => assert_eq!(sku, "SKU-HUGE"),
                other => panic!("expected InvalidRecord, got {:?}", other),
            }
        }
    }

    #[test]
    fn negative_fields_fail_with_invalid_record() {
        let calc = ReplenishmentCalculator::default();
        let policy = LeadTimeCoverPolicy::default();
        let bad = [
            SkuStockRecord { current_stock: -1, ..detergent() },
            SkuStockRecord { reorder_level: -1, ..detergent() },
            SkuStockRecord { daily_demand_estimate: -1.0, ..detergent() },
            SkuStockRecord { supplier_lead_time_days: -1.0, ..detergent() },
        ];
        for record in bad {
            let err = calc.calculate(&record, &flat_series(3, 1, 90), &policy, today()).unwrap_err();
            assert!(matches!(err, EngineError::InvalidRecord { .. }));
        }
    }
}
