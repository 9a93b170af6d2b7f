//! Named, column-ordered row batches handed to the relational loader.

use crate::model::{Product, Supplier, Warehouse};
use rust_decimal::Decimal;

/// A single column value of a master-data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Int(i32),
    Decimal(Decimal),
}

/// A record type that maps onto one relational master table.
pub trait MasterRecord {
    /// Destination table name.
    const TABLE: &'static str;
    /// Column names, in the order produced by [`MasterRecord::values`].
    const COLUMNS: &'static [&'static str];

    fn values(&self) -> Vec<FieldValue>;
}

impl MasterRecord for Supplier {
    const TABLE: &'static str = "suppliers";
    const COLUMNS: &'static [&'static str] = &[
        "supplier_id",
        "supplier_name",
        "contact_email",
        "lead_time_days",
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(self.supplier_id.clone()),
            FieldValue::Text(self.supplier_name.clone()),
            FieldValue::Text(self.contact_email.clone()),
            FieldValue::Int(self.lead_time_days),
        ]
    }
}

impl MasterRecord for Product {
    const TABLE: &'static str = "products";
    const COLUMNS: &'static [&'static str] = &[
        "sku_id",
        "product_name",
        "category",
        "supplier_id",
        "pack_size",
        "min_order_qty",
        "unit_price",
        "safety_stock",
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(self.sku_id.clone()),
            FieldValue::Text(self.product_name.clone()),
            FieldValue::Text(self.category.as_str().to_string()),
            FieldValue::Text(self.supplier_id.clone()),
            FieldValue::Int(self.pack_size),
            FieldValue::Int(self.min_order_qty),
            FieldValue::Decimal(self.unit_price),
            FieldValue::Int(self.safety_stock),
        ]
    }
}

impl MasterRecord for Warehouse {
    const TABLE: &'static str = "warehouses";
    const COLUMNS: &'static [&'static str] = &["warehouse_id", "warehouse_name", "location"];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(self.warehouse_id.clone()),
            FieldValue::Text(self.warehouse_name.clone()),
            FieldValue::Text(self.location.clone()),
        ]
    }
}

/// An in-memory table: a destination name, its columns and its rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBatch {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<FieldValue>>,
}

impl TableBatch {
    /// Create a batch from raw parts. Rows should hold one value per column;
    /// the loader rejects batches that do not.
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<FieldValue>>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Create a batch destined for `R::TABLE` from a slice of records.
    pub fn from_records<R: MasterRecord>(records: &[R]) -> Self {
        Self {
            name: R::TABLE.to_string(),
            columns: R::COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: records.iter().map(MasterRecord::values).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<FieldValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
