//! Master data CSV files.

use crate::error::CsvPopulatorError;
use crate::writer::{write_records, WriteMetrics};
use procurement_core::{Product, Supplier, Warehouse};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Location of the three master data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterFiles {
    dir: PathBuf,
}

/// Per-file metrics of a master data write.
#[derive(Debug, Clone, Default)]
pub struct MasterWriteMetrics {
    pub suppliers: WriteMetrics,
    pub products: WriteMetrics,
    pub warehouses: WriteMetrics,
}

#[derive(Deserialize)]
struct SkuColumn {
    sku_id: String,
}

#[derive(Deserialize)]
struct WarehouseColumn {
    warehouse_id: String,
}

impl MasterFiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn suppliers_path(&self) -> PathBuf {
        self.dir.join("suppliers.csv")
    }

    pub fn products_path(&self) -> PathBuf {
        self.dir.join("products.csv")
    }

    pub fn warehouses_path(&self) -> PathBuf {
        self.dir.join("warehouses.csv")
    }

    /// The `sku_id` column of the products file, in file order.
    pub fn read_sku_ids(&self) -> Result<Vec<String>, CsvPopulatorError> {
        let path = self.products_path();
        read_column::<SkuColumn>(&path).map(|rows| rows.into_iter().map(|r| r.sku_id).collect())
    }

    /// The `warehouse_id` column of the warehouses file, in file order.
    pub fn read_warehouse_ids(&self) -> Result<Vec<String>, CsvPopulatorError> {
        let path = self.warehouses_path();
        read_column::<WarehouseColumn>(&path)
            .map(|rows| rows.into_iter().map(|r| r.warehouse_id).collect())
    }
}

fn read_column<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, CsvPopulatorError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| CsvPopulatorError::csv(path, e))?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|e| CsvPopulatorError::csv(path, e))
}

/// Write all three master files, creating the directory if needed and
/// replacing any previous contents.
pub fn write_master_data(
    files: &MasterFiles,
    suppliers: &[Supplier],
    products: &[Product],
    warehouses: &[Warehouse],
) -> Result<MasterWriteMetrics, CsvPopulatorError> {
    std::fs::create_dir_all(files.dir()).map_err(|e| CsvPopulatorError::io(files.dir(), e))?;

    let metrics = MasterWriteMetrics {
        suppliers: write_records(&files.suppliers_path(), suppliers)?,
        products: write_records(&files.products_path(), products)?,
        warehouses: write_records(&files.warehouses_path(), warehouses)?,
    };

    info!(
        "Master data written to {}: {} suppliers, {} products, {} warehouses",
        files.dir().display(),
        metrics.suppliers.rows_written,
        metrics.products.rows_written,
        metrics.warehouses.rows_written
    );

    Ok(metrics)
}
