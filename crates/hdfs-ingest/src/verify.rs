//! Classification of a recursive HDFS listing.

use procurement_core::{DataCategory, Status, StatusLog};

/// File entries found under the raw root, split by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    pub orders: Vec<String>,
    pub stock: Vec<String>,
}

impl VerificationReport {
    pub fn files(&self, category: DataCategory) -> &[String] {
        match category {
            DataCategory::Orders => &self.orders,
            DataCategory::Stock => &self.stock,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty() && self.stock.is_empty()
    }

    /// Log the file lines of each of `categories`, warning on an empty one.
    pub fn log_to(&self, categories: &[DataCategory], log: &dyn StatusLog) {
        for &category in categories {
            let files = self.files(category);
            log.log(Status::Info, &format!("=== {} Files ===", category.title()));
            if files.is_empty() {
                log.log(Status::Warn, &format!("No {} found", category.as_str()));
                continue;
            }
            for line in files {
                log.log(Status::Info, line);
            }
        }
        log.log(
            Status::Info,
            &format!(
                "Verification found {} orders files and {} stock files",
                self.orders.len(),
                self.stock.len()
            ),
        );
    }
}

/// Split `hdfs dfs -ls -R` output into orders and stock file entries.
///
/// Only file lines (permission string starting with `-`) are kept;
/// directories are ignored. A line is classified by the `/orders/` or
/// `/stock/` segment in its path.
pub fn classify_listing(output: &str) -> VerificationReport {
    let mut report = VerificationReport::default();
    for line in output.lines().map(str::trim) {
        if !line.starts_with('-') {
            continue;
        }
        if line.contains("/orders/") {
            report.orders.push(line.to_string());
        } else if line.contains("/stock/") {
            report.stock.push(line.to_string());
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use procurement_core::RecordingStatusLog;

    const LISTING: &str = "\
drwxr-xr-x   - root supergroup          0 2024-01-15 10:00 /raw/orders
drwxr-xr-x   - root supergroup          0 2024-01-15 10:00 /raw/orders/orders_date=2024-01-15
-rw-r--r--   3 root supergroup       2048 2024-01-15 10:00 /raw/orders/orders_date=2024-01-15/pos_001.jsonl
-rw-r--r--   3 root supergroup       1980 2024-01-15 10:00 /raw/orders/orders_date=2024-01-15/pos_002.jsonl
drwxr-xr-x   - root supergroup          0 2024-01-15 10:00 /raw/stock
drwxr-xr-x   - root supergroup          0 2024-01-15 10:00 /raw/stock/stock_date=2024-01-15
-rw-r--r--   3 root supergroup      10240 2024-01-15 10:00 /raw/stock/stock_date=2024-01-15/warehouse_snapshot.csv
";

    #[test]
    fn test_classify_listing() {
        let report = classify_listing(LISTING);
        assert_eq!(report.orders.len(), 2);
        assert_eq!(report.stock.len(), 1);
        assert!(report.stock[0].ends_with("warehouse_snapshot.csv"));
    }

    #[test]
    fn test_directories_are_ignored() {
        let report = classify_listing(
            "drwxr-xr-x   - root supergroup 0 2024-01-15 10:00 /raw/orders/orders_date=2024-01-15",
        );
        assert!(report.is_empty());
    }

    #[test]
    fn test_empty_category_warns() {
        let log = RecordingStatusLog::new();
        let report = classify_listing(
            "-rw-r--r--   3 root supergroup 10 2024-01-15 10:00 /raw/stock/stock_date=2024-01-15/warehouse_snapshot.csv",
        );
        report.log_to(&DataCategory::ALL, &log);

        assert_eq!(log.messages(Status::Warn), vec!["No orders found".to_string()]);
        assert!(log
            .messages(Status::Info)
            .contains(&"=== Stock Files ===".to_string()));
        assert!(log
            .messages(Status::Info)
            .contains(&"Verification found 0 orders files and 1 stock files".to_string()));
    }

    #[test]
    fn test_only_requested_categories_are_checked() {
        let log = RecordingStatusLog::new();
        let report = classify_listing(LISTING);
        report.log_to(&[DataCategory::Orders], &log);

        assert!(log.messages(Status::Warn).is_empty());
        let info = log.messages(Status::Info);
        assert!(info.contains(&"=== Orders Files ===".to_string()));
        assert!(!info.contains(&"=== Stock Files ===".to_string()));
    }

    #[test]
    fn test_unrequested_empty_category_does_not_warn() {
        let log = RecordingStatusLog::new();
        let report = classify_listing(
            "-rw-r--r--   3 root supergroup 2048 2024-01-15 10:00 /raw/orders/orders_date=2024-01-15/pos_001.jsonl",
        );
        report.log_to(&[DataCategory::Orders], &log);

        assert!(log.messages(Status::Warn).is_empty());
    }
}
