// src/strategy/classifier.rs

use crate::engine::config::ClassifierConfig;
use crate::error::{EngineError, EngineResult};
use crate::model::recommendation::StockTier;

/// Maps (current stock, reorder level) to a health tier.
///
/// Rules, first match wins:
/// - stock == 0                        -> CRITICAL
/// - stock <  level * critical_ratio   -> CRITICAL
/// - stock <  level                    -> LOW
/// - otherwise                         -> GOOD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockClassifier {
    critical_ratio: f64,
}

impl StockClassifier {
    pub fn new(critical_ratio: f64) -> Self {
        Self { critical_ratio }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.critical_ratio)
    }

    pub fn critical_ratio(&self) -> f64 {
        self.critical_ratio
    }

    pub fn classify(&self, current_stock: i64, reorder_level: i64) -> EngineResult<StockTier> {
        if reorder_level < 0 {
            return Err(EngineError::InvalidInput(format!(
                "reorder level must be non-negative (got {})",
                reorder_level
            )));
        }
        if current_stock < 0 {
            return Err(EngineError::InvalidInput(format!(
                "current stock must be non-negative (got {})",
                current_stock
            )));
        }

        if current_stock == 0 {
            return Ok(StockTier::Critical);
        }

        let stock = current_stock as f64;
        let level = reorder_level as f64;
        let tier = if stock < level * self.critical_ratio {
            StockTier::Critical
        } else if current_stock < reorder_level {
            StockTier::Low
        } else {
            StockTier::Good
        };
        Ok(tier)
    }
}

impl Default for StockClassifier {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }
}
