// src/io/catalog.rs

use std::io::Read;
use std::path::Path;

use crate::error::EngineResult;
use crate::model::record::SkuStockRecord;

/// Reads catalog rows from CSV with a header row:
/// `sku,store_id,category,current_stock,reorder_level,daily_demand_estimate,supplier_lead_time_days`.
///
/// Rows are returned as-is; negative values are left for the engine to reject
/// per record.
pub fn read_catalog<R: Read>(reader: R) -> EngineResult<Vec<SkuStockRecord>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();
    for row in rdr.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Loads a catalog CSV from disk.
pub fn load_catalog(file_path: impl AsRef<Path>) -> EngineResult<Vec<SkuStockRecord>> {
    let file = std::fs::File::open(file_path)?;
    read_catalog(file)
}

/// Built-in sample catalog across three stores.
pub fn demo_catalog() -> Vec<SkuStockRecord> {
    vec![
        SkuStockRecord::new("SKU-001234", "store-001", "Dairy", 45, 50, 14.0, 2.0),
        SkuStockRecord::new("SKU-005678", "store-001", "Bakery", 78, 75, 11.0, 1.0),
        SkuStockRecord::new("SKU-009012", "store-001", "Beverages", 156, 100, 7.0, 5.0),
        SkuStockRecord::new("SKU-003456", "store-002", "Household", 23, 40, 8.0, 7.0),
        SkuStockRecord::new("SKU-007890", "store-002", "Produce", 0, 200, 32.0, 1.0),
        SkuStockRecord::new("SKU-004567", "store-003", "Electronics", 60, 25, 0.0, 10.0),
        SkuStockRecord::new("SKU-001234", "store-003", "Dairy", 18, 50, 13.0, 2.0),
    ]
}
