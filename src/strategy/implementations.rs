// src/strategy/implementations.rs

use crate::model::record::SkuStockRecord;
use crate::strategy::traits::SafetyStockPolicy;

// =========================================================================
// 1. Lead-Time Cover Policy (default)
// =========================================================================

/// Covers a fraction of the supplier lead time, never less than `min_days`.
///
/// Formula: DaysOfCover = max(MinDays, round(LeadTime * Ratio))
#[derive(Debug, Clone)]
pub struct LeadTimeCoverPolicy {
    ratio: f64,
    min_days: f64,
}

impl LeadTimeCoverPolicy {
    pub fn new(ratio: f64, min_days: f64) -> Self {
        Self { ratio, min_days }
    }
}

impl Default for LeadTimeCoverPolicy {
    fn default() -> Self {
        Self::new(0.4, 1.0)
    }
}

impl SafetyStockPolicy for LeadTimeCoverPolicy {
    fn days_of_cover(&self, record: &SkuStockRecord) -> f64 {
        (record.supplier_lead_time_days * self.ratio)
            .round()
            .max(self.min_days)
    }
}

// =========================================================================
// 2. Fixed Cover Policy (caller override)
// =========================================================================

/// Holds the same number of days of cover for every record.
#[derive(Debug, Clone)]
pub struct FixedCoverPolicy {
    days: f64,
}

impl FixedCoverPolicy {
    pub fn new(days: f64) -> Self {
        Self { days }
    }
}

impl SafetyStockPolicy for FixedCoverPolicy {
    fn days_of_cover(&self, _record: &SkuStockRecord) -> f64 {
        self.days
    }
}
