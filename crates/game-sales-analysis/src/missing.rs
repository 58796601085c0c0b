use std::fmt;

use serde::Serialize;

use crate::table::Table;

/// Share of missing values per column, highest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingReport {
    pub rows: usize,
    pub columns: Vec<MissingEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingEntry {
    pub column: String,
    pub missing: usize,
    /// Percentage of missing cells, `0.0` for an empty table.
    pub percent: f64,
}

impl MissingReport {
    /// Columns with equal percentages keep their table order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_table(table: &Table) -> Self {
        let rows = table.len();
        let mut columns = table
            .columns()
            .iter()
            .map(|column| {
                let missing = column.data.missing_count();
                let percent = if rows == 0 {
                    0.0
                } else {
                    missing as f64 * 100.0 / rows as f64
                };
                MissingEntry {
                    column: column.name.clone(),
                    missing,
                    percent,
                }
            })
            .collect::<Vec<_>>();
        columns.sort_by(|a, b| b.percent.total_cmp(&a.percent));
        Self { rows, columns }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&MissingEntry> {
        self.columns.iter().find(|e| e.column == column)
    }
}

impl fmt::Display for MissingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .columns
            .iter()
            .map(|e| e.column.len())
            .max()
            .unwrap_or(0)
            .max("column".len());
        writeln!(f, "{:<width$}  percent_space", "column")?;
        for entry in &self.columns {
            writeln!(f, "{:<width$}  {:>13.2}", entry.column, entry.percent)?;
        }
        Ok(())
    }
}
