// src/strategy/traits.rs

use std::fmt::Debug;

use crate::model::record::SkuStockRecord;

/// Decides how many days of demand the safety buffer should cover.
///
/// We require `Send` + `Sync` so report runs can share one policy across
/// worker threads.
pub trait SafetyStockPolicy: Debug + Send + Sync {
    /// Days of cover for `record`. Safety stock is
    /// `ceil(daily_demand_estimate * days_of_cover)`.
    fn days_of_cover(&self, record: &SkuStockRecord) -> f64;
}
