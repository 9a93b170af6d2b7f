//! In-memory transactional target for tests.

use crate::error::LoadError;
use crate::target::LoadTarget;
use async_trait::async_trait;
use procurement_core::FieldValue;
use std::collections::HashMap;

type Tables = HashMap<String, Vec<Vec<FieldValue>>>;

/// A [`LoadTarget`] holding tables in memory with snapshot transactions.
///
/// `begin` copies the committed state into a working set, `commit` publishes
/// the working set and `rollback` discards it. Tables must be declared up
/// front, like the pre-existing tables of a real database. Inserts into a
/// table registered with [`InMemoryTarget::fail_inserts_into`] fail.
#[derive(Debug, Default)]
pub struct InMemoryTarget {
    committed: Tables,
    working: Option<Tables>,
    /// parent -> tables truncated along with it
    cascades: HashMap<String, Vec<String>>,
    failing_table: Option<String>,
    truncations: Vec<String>,
    commits: usize,
    rollbacks: usize,
}

impl InMemoryTarget {
    /// A target with the given empty tables.
    pub fn with_tables(tables: &[&str]) -> Self {
        Self {
            committed: tables
                .iter()
                .map(|t| (t.to_string(), Vec::new()))
                .collect(),
            ..Self::default()
        }
    }

    /// Truncating `parent` also truncates `child`, like a foreign key with
    /// `TRUNCATE ... CASCADE`.
    pub fn with_cascade(mut self, parent: &str, child: &str) -> Self {
        self.cascades
            .entry(parent.to_string())
            .or_default()
            .push(child.to_string());
        self
    }

    /// Make every insert into `table` fail.
    pub fn fail_inserts_into(&mut self, table: &str) {
        self.failing_table = Some(table.to_string());
    }

    pub fn clear_failure(&mut self) {
        self.failing_table = None;
    }

    /// Committed rows of `table`.
    pub fn committed_rows(&self, table: &str) -> &[Vec<FieldValue>] {
        self.committed.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn committed_count(&self, table: &str) -> usize {
        self.committed_rows(table).len()
    }

    /// Tables truncated so far, in call order (cascaded tables not included).
    pub fn truncations(&self) -> &[String] {
        &self.truncations
    }

    pub fn commits(&self) -> usize {
        self.commits
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks
    }

    pub fn in_transaction(&self) -> bool {
        self.working.is_some()
    }

    fn visible_mut(&mut self) -> &mut Tables {
        match self.working.as_mut() {
            Some(working) => working,
            None => &mut self.committed,
        }
    }

    fn table_mut(&mut self, table: &str) -> Result<&mut Vec<Vec<FieldValue>>, LoadError> {
        self.visible_mut()
            .get_mut(table)
            .ok_or_else(|| LoadError::Target {
                table: table.to_string(),
                message: "relation does not exist".to_string(),
            })
    }
}

#[async_trait]
impl LoadTarget for InMemoryTarget {
    async fn begin(&mut self) -> Result<(), LoadError> {
        if self.working.is_some() {
            return Err(LoadError::Transaction(
                "transaction already in progress".to_string(),
            ));
        }
        self.working = Some(self.committed.clone());
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), LoadError> {
        let working = self
            .working
            .take()
            .ok_or_else(|| LoadError::Transaction("no transaction in progress".to_string()))?;
        self.committed = working;
        self.commits += 1;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), LoadError> {
        self.working = None;
        self.rollbacks += 1;
        Ok(())
    }

    async fn row_count(&mut self, table: &str) -> Result<u64, LoadError> {
        Ok(self.table_mut(table)?.len() as u64)
    }

    async fn truncate_cascade(&mut self, table: &str) -> Result<(), LoadError> {
        self.table_mut(table)?.clear();
        let children = self.cascades.get(table).cloned().unwrap_or_default();
        for child in children {
            self.table_mut(&child)?.clear();
        }
        self.truncations.push(table.to_string());
        Ok(())
    }

    async fn insert_rows(
        &mut self,
        table: &str,
        _columns: &[String],
        rows: &[Vec<FieldValue>],
    ) -> Result<u64, LoadError> {
        if self.failing_table.as_deref() == Some(table) {
            return Err(LoadError::Target {
                table: table.to_string(),
                message: "injected insert failure".to_string(),
            });
        }
        self.table_mut(table)?.extend(rows.iter().cloned());
        Ok(rows.len() as u64)
    }
}
