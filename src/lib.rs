// src/lib.rs

//! Inventory replenishment decision engine.
//!
//! Given per-SKU, per-store stock levels and a demand estimate, the engine
//! projects demand, classifies stock health and derives safety stock,
//! reorder timing and reorder quantity.

pub mod engine;
pub mod error;
pub mod io;
pub mod model;
pub mod strategy;

pub use engine::config::EngineConfig;
pub use engine::forecaster::TimeSeriesForecaster;
pub use engine::report::{ReplenishmentReport, ReplenishmentReportBuilder};
pub use error::{EngineError, EngineResult};
pub use model::forecast::{ForecastPoint, ForecastSeries};
pub use model::recommendation::{ReplenishmentRecommendation, StockTier};
pub use model::record::SkuStockRecord;
pub use strategy::classifier::StockClassifier;
pub use strategy::replenishment::ReplenishmentCalculator;
