// src/model/recommendation.rs

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Discrete stock-health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockTier {
    Critical,
    Low,
    Good,
}

impl StockTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockTier::Critical => "CRITICAL",
            StockTier::Low => "LOW",
            StockTier::Good => "GOOD",
        }
    }

    /// Tiers whose reorder quantities count towards "needs ordering" totals.
    pub fn needs_ordering(&self) -> bool {
        matches!(self, StockTier::Critical | StockTier::Low)
    }
}

impl fmt::Display for StockTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Replenishment decision for one SKU at one store.
///
/// Built once per report run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplenishmentRecommendation {
    pub sku: String,
    pub store_id: String,
    pub category: String,
    pub tier: StockTier,
    pub current_stock: u64,
    pub optimal_stock: u64,
    pub safety_stock: u64,
    /// Catalog-configured threshold, passed through unchanged.
    pub reorder_point: u64,
    /// Lead-time demand plus safety stock.
    pub implied_reorder_point: u64,
    /// Set when `reorder_point` and `implied_reorder_point` diverge beyond tolerance.
    pub threshold_mismatch: bool,
    /// `None` when no stockout is projected.
    pub reorder_date: Option<NaiveDate>,
    pub reorder_quantity: u64,
    /// `None` means no stockout is projected (zero demand).
    pub days_until_stockout: Option<u64>,
    pub total_forecast_units: u64,
    pub average_confidence: u32,
}

impl ReplenishmentRecommendation {
    /// One-line, tier-sensitive action message.
    pub fn advice(&self) -> String {
        match self.tier {
            StockTier::Critical if self.current_stock == 0 => format!(
                "Out of stock: order {} units immediately",
                self.reorder_quantity
            ),
            StockTier::Critical => format!(
                "Critical: order {} units now{}",
                self.reorder_quantity,
                self.stockout_suffix()
            ),
            StockTier::Low => match self.reorder_date {
                Some(date) if self.reorder_quantity > 0 => format!(
                    "Low: place an order for {} units by {}{}",
                    self.reorder_quantity,
                    date,
                    self.stockout_suffix()
                ),
                _ => "Low: below reorder level, monitor closely".to_string(),
            },
            StockTier::Good if self.reorder_quantity > 0 => format!(
                "Healthy: plan {} units within lead time",
                self.reorder_quantity
            ),
            StockTier::Good => "Healthy: no action needed".to_string(),
        }
    }

    fn stockout_suffix(&self) -> String {
        match self.days_until_stockout {
            Some(days) => format!(" (stockout in {} days)", days),
            None => String::new(),
        }
    }
}
