//! Batch generators for master and transactional data.

use crate::generators::{choose_value, names, numeric};
use procurement_core::{
    Category, OrderLine, PipelineDate, Product, StockRecord, Supplier, Warehouse,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

const PACK_SIZES: [i32; 4] = [1, 6, 12, 24];
const MIN_ORDER_QUANTITIES: [i32; 3] = [12, 24, 48];

/// Each POS produces `orders_per_pos ± ORDER_COUNT_SPREAD` orders per day.
const ORDER_COUNT_SPREAD: u32 = 10;
const MAX_LINES_PER_ORDER: usize = 5;

/// Mixed into the date seed when stock snapshots are made reproducible, so that
/// stock and orders for the same date do not share a random stream.
const STOCK_SEED_SALT: u64 = 0x5354_4f43_4b00_0000;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GeneratorError {
    /// Products need at least one supplier to reference.
    #[error("A non-empty supplier batch must be provided to generate products")]
    MissingSuppliers,

    /// Orders need at least one SKU to reference.
    #[error("A non-empty SKU list must be provided to generate orders")]
    EmptySkuPool,
}

/// Generates the master reference batches.
///
/// Master data is replaced wholesale on every run, so by default the generator
/// draws from OS entropy; [`MasterDataGenerator::new`] gives a fixed seed for
/// tests and reproducible runs.
pub struct MasterDataGenerator {
    rng: StdRng,
}

impl MasterDataGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Generate `count` suppliers with ids `SUP_001`, `SUP_002`, ...
    pub fn suppliers(&mut self, count: usize) -> Vec<Supplier> {
        let suppliers: Vec<Supplier> = (1..=count)
            .map(|i| Supplier {
                supplier_id: format!("SUP_{i:03}"),
                supplier_name: names::company(&mut self.rng),
                contact_email: names::company_email(&mut self.rng),
                lead_time_days: numeric::int_range(&mut self.rng, 1, 7),
            })
            .collect();
        debug!("Generated {} suppliers", suppliers.len());
        suppliers
    }

    /// Generate `count` products with ids `SKU_0001`, `SKU_0002`, ..., each
    /// referencing a supplier drawn from `suppliers`.
    pub fn products(
        &mut self,
        count: usize,
        suppliers: &[Supplier],
    ) -> Result<Vec<Product>, GeneratorError> {
        if suppliers.is_empty() {
            return Err(GeneratorError::MissingSuppliers);
        }

        let products: Vec<Product> = (1..=count)
            .map(|i| {
                let supplier = &suppliers[self.rng.gen_range(0..suppliers.len())];
                Product {
                    sku_id: format!("SKU_{i:04}"),
                    product_name: names::product_name(&mut self.rng),
                    category: choose_value(&mut self.rng, &Category::ALL),
                    supplier_id: supplier.supplier_id.clone(),
                    pack_size: choose_value(&mut self.rng, &PACK_SIZES),
                    min_order_qty: choose_value(&mut self.rng, &MIN_ORDER_QUANTITIES),
                    unit_price: numeric::price_range(&mut self.rng, 50, 5000),
                    safety_stock: numeric::int_range(&mut self.rng, 10, 100),
                }
            })
            .collect();
        debug!("Generated {} products", products.len());
        Ok(products)
    }

    /// Generate `count` warehouses with ids `WH_01`, `WH_02`, ...
    pub fn warehouses(&mut self, count: usize) -> Vec<Warehouse> {
        (1..=count)
            .map(|i| {
                let name = format!("Warehouse {}", names::city(&mut self.rng));
                let location = format!(
                    "{},{}",
                    names::city(&mut self.rng),
                    names::country(&mut self.rng)
                );
                Warehouse {
                    warehouse_id: format!("WH_{i:02}"),
                    warehouse_name: name,
                    location,
                }
            })
            .collect()
    }
}

/// The order lines produced by one point-of-sale terminal for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct PosOrders {
    /// 1-based terminal number.
    pub pos_number: u32,
    pub lines: Vec<OrderLine>,
}

impl PosOrders {
    /// Terminal label used in status messages, e.g. `POS_007`.
    pub fn label(&self) -> String {
        format!("POS_{:03}", self.pos_number)
    }

    /// Number of distinct logical orders.
    pub fn order_count(&self) -> usize {
        let mut ids: Vec<&str> = self.lines.iter().map(|l| l.order_id.as_str()).collect();
        ids.dedup();
        ids.len()
    }
}

/// Generates a day's point-of-sale orders.
///
/// The RNG is seeded from the date, so generating orders twice for the same
/// date and SKU list yields identical output.
pub struct OrderGenerator {
    date: PipelineDate,
    rng: StdRng,
}

impl OrderGenerator {
    pub fn new(date: PipelineDate) -> Self {
        Self {
            date,
            rng: StdRng::seed_from_u64(date.seed()),
        }
    }

    pub fn date(&self) -> PipelineDate {
        self.date
    }

    /// Generate orders for terminals `1..=num_pos`.
    ///
    /// Each terminal produces between `orders_per_pos - 10` (floored at zero)
    /// and `orders_per_pos + 10` logical orders of 1 to 5 lines each.
    pub fn generate(
        &mut self,
        num_pos: u32,
        orders_per_pos: u32,
        skus: &[String],
    ) -> Result<Vec<PosOrders>, GeneratorError> {
        if skus.is_empty() {
            return Err(GeneratorError::EmptySkuPool);
        }

        let low = orders_per_pos.saturating_sub(ORDER_COUNT_SPREAD);
        let high = orders_per_pos.saturating_add(ORDER_COUNT_SPREAD);

        let mut terminals = Vec::with_capacity(num_pos as usize);
        for pos_number in 1..=num_pos {
            let num_orders = self.rng.gen_range(low..=high);
            let mut lines = Vec::new();
            for order_num in 0..num_orders {
                let order_id = format!("ORD_{}_{pos_number:03}_{order_num:04}", self.date);
                let num_items = self.rng.gen_range(1..=MAX_LINES_PER_ORDER);
                for _ in 0..num_items {
                    lines.push(OrderLine {
                        order_id: order_id.clone(),
                        sku_id: skus[self.rng.gen_range(0..skus.len())].clone(),
                        quantity_ordered: numeric::int_range(&mut self.rng, 1, 10),
                        order_date: self.date,
                    });
                }
            }
            debug!(
                "POS_{:03}: {} orders, {} lines",
                pos_number,
                num_orders,
                lines.len()
            );
            terminals.push(PosOrders { pos_number, lines });
        }
        Ok(terminals)
    }
}

/// Generates end-of-day stock snapshots.
pub struct StockGenerator {
    date: PipelineDate,
    rng: StdRng,
}

impl StockGenerator {
    /// Non-reproducible snapshots: two runs for the same date differ.
    pub fn from_entropy(date: PipelineDate) -> Self {
        Self {
            date,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible snapshots derived from the date.
    pub fn seeded_from_date(date: PipelineDate) -> Self {
        Self {
            date,
            rng: StdRng::seed_from_u64(date.seed() ^ STOCK_SEED_SALT),
        }
    }

    /// One record per (warehouse, sku) pair, warehouses in the outer loop.
    pub fn snapshot(&mut self, warehouse_ids: &[String], sku_ids: &[String]) -> Vec<StockRecord> {
        let mut records = Vec::with_capacity(warehouse_ids.len() * sku_ids.len());
        for warehouse_id in warehouse_ids {
            for sku_id in sku_ids {
                records.push(StockRecord {
                    warehouse_id: warehouse_id.clone(),
                    sku_id: sku_id.clone(),
                    available_quantity: numeric::int_range(&mut self.rng, 0, 500),
                    reserved_quantity: numeric::int_range(&mut self.rng, 0, 50),
                    stock_date: self.date,
                });
            }
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    fn date() -> PipelineDate {
        PipelineDate::from_ymd(2024, 1, 15).unwrap()
    }

    fn sku_ids(products: &[Product]) -> Vec<String> {
        products.iter().map(|p| p.sku_id.clone()).collect()
    }

    #[test]
    fn test_suppliers_unique_and_padded() {
        let mut generator = MasterDataGenerator::new(42);
        for n in [0, 1, 10, 250] {
            let suppliers = generator.suppliers(n);
            assert_eq!(suppliers.len(), n);

            let ids: HashSet<&str> = suppliers.iter().map(|s| s.supplier_id.as_str()).collect();
            assert_eq!(ids.len(), n);

            for supplier in &suppliers {
                let digits = supplier.supplier_id.strip_prefix("SUP_").unwrap();
                assert_eq!(digits.len(), 3);
                assert!(digits.chars().all(|c| c.is_ascii_digit()));
                assert!((1..=7).contains(&supplier.lead_time_days));
            }
        }
    }

    #[test]
    fn test_products_reference_given_suppliers() {
        let mut generator = MasterDataGenerator::new(42);
        let suppliers = generator.suppliers(4);
        let products = generator.products(200, &suppliers).unwrap();

        let supplier_ids: HashSet<&str> =
            suppliers.iter().map(|s| s.supplier_id.as_str()).collect();
        assert_eq!(products.len(), 200);
        for product in &products {
            assert!(supplier_ids.contains(product.supplier_id.as_str()));
            assert!(PACK_SIZES.contains(&product.pack_size));
            assert!(MIN_ORDER_QUANTITIES.contains(&product.min_order_qty));
            assert!((10..=100).contains(&product.safety_stock));
            assert_eq!(product.unit_price.scale(), 2);
        }
        assert_eq!(products[0].sku_id, "SKU_0001");
        assert_eq!(products[199].sku_id, "SKU_0200");
    }

    #[test]
    fn test_products_without_suppliers_fail() {
        let mut generator = MasterDataGenerator::new(42);
        assert_eq!(
            generator.products(10, &[]),
            Err(GeneratorError::MissingSuppliers)
        );
    }

    #[test]
    fn test_warehouse_ids() {
        let mut generator = MasterDataGenerator::new(42);
        let warehouses = generator.warehouses(3);
        let ids: Vec<&str> = warehouses.iter().map(|w| w.warehouse_id.as_str()).collect();
        assert_eq!(ids, vec!["WH_01", "WH_02", "WH_03"]);
        assert!(warehouses[0].warehouse_name.starts_with("Warehouse "));
        assert!(warehouses[0].location.contains(','));
    }

    #[test]
    fn test_master_data_reproducible_for_same_seed() {
        let mut a = MasterDataGenerator::new(9);
        let mut b = MasterDataGenerator::new(9);
        let suppliers = a.suppliers(5);
        assert_eq!(suppliers, b.suppliers(5));
        assert_eq!(a.warehouses(3), b.warehouses(3));
        for supplier in &suppliers {
            assert!(!supplier.supplier_name.is_empty());
            assert!(supplier.contact_email.contains('@'));
        }
    }

    #[test]
    fn test_orders_reproducible_for_same_date() {
        let mut master = MasterDataGenerator::new(1);
        let suppliers = master.suppliers(3);
        let skus = sku_ids(&master.products(20, &suppliers).unwrap());

        let first = OrderGenerator::new(date()).generate(3, 15, &skus).unwrap();
        let second = OrderGenerator::new(date()).generate(3, 15, &skus).unwrap();
        assert_eq!(first, second);

        let other_day = PipelineDate::from_ymd(2024, 1, 16).unwrap();
        let third = OrderGenerator::new(other_day).generate(3, 15, &skus).unwrap();
        assert_ne!(first, third);
    }

    #[test]
    fn test_order_shape() {
        let skus: Vec<String> = (1..=5).map(|i| format!("SKU_{i:04}")).collect();
        let terminals = OrderGenerator::new(date()).generate(2, 10, &skus).unwrap();

        assert_eq!(terminals.len(), 2);
        for terminal in &terminals {
            let mut per_order: HashMap<&str, usize> = HashMap::new();
            for line in &terminal.lines {
                *per_order.entry(line.order_id.as_str()).or_default() += 1;
                assert!(skus.contains(&line.sku_id));
                assert!((1..=10).contains(&line.quantity_ordered));
                assert_eq!(line.order_date, date());
                assert!(line
                    .order_id
                    .starts_with(&format!("ORD_2024-01-15_{:03}_", terminal.pos_number)));
            }
            assert!(per_order.len() <= 20);
            assert_eq!(terminal.order_count(), per_order.len());
            assert!(per_order.values().all(|n| (1..=5).contains(n)));
        }
    }

    #[test]
    fn test_orders_without_skus_fail() {
        let result = OrderGenerator::new(date()).generate(1, 10, &[]);
        assert_eq!(result, Err(GeneratorError::EmptySkuPool));
    }

    #[test]
    fn test_stock_snapshot_is_full_cross_join() {
        let warehouses: Vec<String> = vec!["WH_01".into(), "WH_02".into(), "WH_03".into()];
        let skus: Vec<String> = (1..=7).map(|i| format!("SKU_{i:04}")).collect();

        let records = StockGenerator::from_entropy(date()).snapshot(&warehouses, &skus);

        assert_eq!(records.len(), 21);
        let pairs: HashSet<(&str, &str)> = records
            .iter()
            .map(|r| (r.warehouse_id.as_str(), r.sku_id.as_str()))
            .collect();
        assert_eq!(pairs.len(), 21);
        for record in &records {
            assert!((0..=500).contains(&record.available_quantity));
            assert!((0..=50).contains(&record.reserved_quantity));
            assert_eq!(record.stock_date, date());
        }
    }

    #[test]
    fn test_seeded_stock_is_reproducible() {
        let warehouses: Vec<String> = vec!["WH_01".into()];
        let skus: Vec<String> = (1..=50).map(|i| format!("SKU_{i:04}")).collect();

        let a = StockGenerator::seeded_from_date(date()).snapshot(&warehouses, &skus);
        let b = StockGenerator::seeded_from_date(date()).snapshot(&warehouses, &skus);
        assert_eq!(a, b);
    }
}
