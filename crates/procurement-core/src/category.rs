//! Date-partitioned transactional data categories.

use crate::date::PipelineDate;
use crate::error::CoreError;
use std::fmt;
use std::str::FromStr;

/// A category of transactional data written to a date partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataCategory {
    /// Point-of-sale order lines, one JSONL file per terminal.
    Orders,
    /// End-of-day warehouse stock snapshot, one CSV file.
    Stock,
}

impl DataCategory {
    /// All categories, in ingestion order.
    pub const ALL: [DataCategory; 2] = [DataCategory::Orders, DataCategory::Stock];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataCategory::Orders => "orders",
            DataCategory::Stock => "stock",
        }
    }

    /// Heading form used in verification output.
    pub fn title(&self) -> &'static str {
        match self {
            DataCategory::Orders => "Orders",
            DataCategory::Stock => "Stock",
        }
    }

    /// Extension of the files stored in this category's partitions.
    pub fn file_extension(&self) -> &'static str {
        match self {
            DataCategory::Orders => "jsonl",
            DataCategory::Stock => "csv",
        }
    }

    /// Shell glob matching this category's files inside a partition.
    pub fn file_glob(&self) -> String {
        format!("*.{}", self.file_extension())
    }

    /// Partition directory relative to a category root, e.g.
    /// `orders/orders_date=2024-01-15`.
    pub fn partition_dir(&self, date: PipelineDate) -> String {
        let name = self.as_str();
        format!("{name}/{name}_date={date}")
    }
}

impl fmt::Display for DataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orders" => Ok(DataCategory::Orders),
            "stock" => Ok(DataCategory::Stock),
            other => Err(CoreError::UnknownCategory(other.to_string())),
        }
    }
}
