//! Master reference and daily transactional records.

use crate::date::PipelineDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product category. The catalog uses exactly these ten values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Fruits,
    Vegetables,
    Dairy,
    Meat,
    Bakery,
    Beverages,
    Snacks,
    Frozen,
    Canned,
    #[serde(rename = "Personal Care")]
    PersonalCare,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Fruits,
        Category::Vegetables,
        Category::Dairy,
        Category::Meat,
        Category::Bakery,
        Category::Beverages,
        Category::Snacks,
        Category::Frozen,
        Category::Canned,
        Category::PersonalCare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fruits => "Fruits",
            Category::Vegetables => "Vegetables",
            Category::Dairy => "Dairy",
            Category::Meat => "Meat",
            Category::Bakery => "Bakery",
            Category::Beverages => "Beverages",
            Category::Snacks => "Snacks",
            Category::Frozen => "Frozen",
            Category::Canned => "Canned",
            Category::PersonalCare => "Personal Care",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A supplier of products. `supplier_id` has the form `SUP_NNN`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub supplier_id: String,
    pub supplier_name: String,
    pub contact_email: String,
    /// Days between placing and receiving an order, 1-7.
    pub lead_time_days: i32,
}

/// A catalog entry. `sku_id` has the form `SKU_NNNN`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub sku_id: String,
    pub product_name: String,
    pub category: Category,
    /// References [`Supplier::supplier_id`].
    pub supplier_id: String,
    pub pack_size: i32,
    pub min_order_qty: i32,
    /// Price with exactly two decimal places, 0.50-50.00.
    pub unit_price: Decimal,
    pub safety_stock: i32,
}

/// A warehouse. `warehouse_id` has the form `WH_NN`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub warehouse_id: String,
    pub warehouse_name: String,
    pub location: String,
}

/// One line of a point-of-sale order.
///
/// Lines generated for the same logical order share an `order_id` of the form
/// `ORD_<date>_<pos>_<sequence>`. The SKU is serialized as `sku-id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub order_id: String,
    #[serde(rename = "sku-id")]
    pub sku_id: String,
    pub quantity_ordered: i32,
    pub order_date: PipelineDate,
}

/// Stock level of one product in one warehouse at the end of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub warehouse_id: String,
    pub sku_id: String,
    pub available_quantity: i32,
    pub reserved_quantity: i32,
    pub stock_date: PipelineDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_line_uses_dashed_sku_key() {
        let line = OrderLine {
            order_id: "ORD_2024-01-15_001_0000".to_string(),
            sku_id: "SKU_0001".to_string(),
            quantity_ordered: 3,
            order_date: PipelineDate::from_ymd(2024, 1, 15).unwrap(),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["sku-id"], "SKU_0001");
        assert_eq!(json["order_date"], "2024-01-15");
        assert!(json.get("sku_id").is_none());
    }

    #[test]
    fn test_category_serializes_display_name() {
        let json = serde_json::to_string(&Category::PersonalCare).unwrap();
        assert_eq!(json, "\"Personal Care\"");
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }
}
