// src/model/record.rs

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single SKU held at a single store, as supplied by the catalog.
///
/// Counts are signed so that bad catalog rows can be represented and
/// rejected instead of wrapping on ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuStockRecord {
    pub sku: String,
    pub store_id: String,
    pub category: String,
    pub current_stock: i64,
    pub reorder_level: i64,
    /// Expected units sold per day.
    pub daily_demand_estimate: f64,
    /// Days between placing an order and receiving it.
    pub supplier_lead_time_days: f64,
}

impl SkuStockRecord {
    pub fn new(
        sku: impl Into<String>,
        store_id: impl Into<String>,
        category: impl Into<String>,
        current_stock: i64,
        reorder_level: i64,
        daily_demand_estimate: f64,
        supplier_lead_time_days: f64,
    ) -> Self {
        Self {
            sku: sku.into(),
            store_id: store_id.into(),
            category: category.into(),
            current_stock,
            reorder_level,
            daily_demand_estimate,
            supplier_lead_time_days,
        }
    }

    /// Rejects negative or non-finite numeric fields.
    pub fn validate(&self) -> EngineResult<()> {
        if self.current_stock < 0 {
            return Err(self.invalid(format!("current stock is negative ({})", self.current_stock)));
        }
        if self.reorder_level < 0 {
            return Err(self.invalid(format!("reorder level is negative ({})", self.reorder_level)));
        }
        if !self.daily_demand_estimate.is_finite() || self.daily_demand_estimate < 0.0 {
            return Err(self.invalid(format!(
                "daily demand estimate must be a non-negative number ({})",
                self.daily_demand_estimate
            )));
        }
        if !self.supplier_lead_time_days.is_finite() || self.supplier_lead_time_days < 0.0 {
            return Err(self.invalid(format!(
                "supplier lead time must be a non-negative number ({})",
                self.supplier_lead_time_days
            )));
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> EngineError {
        EngineError::InvalidRecord {
            sku: self.sku.clone(),
            store_id: self.store_id.clone(),
            reason,
        }
    }
}
