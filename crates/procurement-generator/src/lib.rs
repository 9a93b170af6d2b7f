//! Synthetic data generator for the procurement pipeline.
//!
//! Three generators cover the two halves of the daily run:
//!
//! ```text
//! MasterDataGenerator ──► Supplier, Product, Warehouse   (replaced every run)
//! OrderGenerator      ──► PosOrders { OrderLine* }       (seeded from the date)
//! StockGenerator      ──► StockRecord                    (warehouse × product)
//! ```
//!
//! All generators are pure: they return batches and leave persistence to the
//! callers.
//!
//! # Example
//!
//! ```rust
//! use procurement_core::PipelineDate;
//! use procurement_generator::{MasterDataGenerator, OrderGenerator};
//!
//! let mut master = MasterDataGenerator::new(7);
//! let suppliers = master.suppliers(10);
//! let products = master.products(100, &suppliers).unwrap();
//! let skus: Vec<String> = products.iter().map(|p| p.sku_id.clone()).collect();
//!
//! let date: PipelineDate = "2024-01-15".parse().unwrap();
//! let orders = OrderGenerator::new(date).generate(2, 10, &skus).unwrap();
//! assert_eq!(orders.len(), 2);
//! ```

pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use generator::{
    GeneratorError, MasterDataGenerator, OrderGenerator, PosOrders, StockGenerator,
};
