//! SQL statement builders for the loader.

/// How rows are grouped into INSERT statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertMode {
    /// One INSERT statement per row.
    #[default]
    PerRow,
    /// Multi-row INSERT statements of up to `rows_per_statement` rows.
    Batched { rows_per_statement: usize },
}

impl InsertMode {
    /// `0` selects [`InsertMode::PerRow`].
    pub fn from_batch_size(batch_size: usize) -> Self {
        match batch_size {
            0 | 1 => InsertMode::PerRow,
            n => InsertMode::Batched {
                rows_per_statement: n,
            },
        }
    }

    /// Number of rows bound into each statement.
    pub fn rows_per_statement(&self) -> usize {
        match self {
            InsertMode::PerRow => 1,
            InsertMode::Batched { rows_per_statement } => (*rows_per_statement).max(1),
        }
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `INSERT INTO "t" ("a", "b") VALUES ($1, $2), ($3, $4)` for `row_count` rows.
pub fn build_insert(table: &str, columns: &[String], row_count: usize) -> String {
    let col_count = columns.len();
    let mut param_idx = 1;
    let mut placeholders: Vec<String> = Vec::with_capacity(row_count);

    for _ in 0..row_count {
        let row_placeholders: Vec<String> = (0..col_count)
            .map(|_| {
                let p = format!("${param_idx}");
                param_idx += 1;
                p
            })
            .collect();
        placeholders.push(format!("({})", row_placeholders.join(", ")));
    }

    format!(
        "INSERT INTO {} ({}) VALUES {}",
        quote_ident(table),
        columns
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", "),
        placeholders.join(", ")
    )
}

/// Removes all rows, including rows of tables referencing this one.
pub fn truncate_cascade(table: &str) -> String {
    format!("TRUNCATE TABLE {} CASCADE", quote_ident(table))
}

pub fn count_rows(table: &str) -> String {
    format!("SELECT COUNT(*) FROM {}", quote_ident(table))
}
