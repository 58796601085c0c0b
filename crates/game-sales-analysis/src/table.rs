//! Column-oriented table with nullable cells
//!
//! A [`Table`] is a list of uniquely named [`Column`]s of equal length. Each
//! column holds one [`ColumnData`] variant, so every cell of a column has the
//! same type and may be missing (`None`).
//!
//! # Loading
//!
//! [`Table::from_reader`] and [`Table::from_path`] read CSV with a header row.
//! Column types are inferred per column:
//!
//! - A column is [`ColumnData::Float`] when every cell is a number, empty, a
//!   missing-value token (`NA`, `NaN`, `null`, ...) or the placeholder `tbd`.
//!   Placeholders and empty cells become missing.
//! - Any other column is [`ColumnData::Text`], with empty cells and
//!   missing-value tokens as missing.
//!
//! Integer columns are never inferred; they are produced by explicit coercion.
//!
//! # Example
//!
//! ```
//! use game_sales_analysis::table::Table;
//!
//! let csv = "Name,JP_Sales,User_Score\nA,0.5,tbd\nB,,7.9\n";
//! let table = Table::from_reader(csv.as_bytes()).unwrap();
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.floats("JP_Sales").unwrap(), &[Some(0.5), None]);
//! assert_eq!(table.floats("User_Score").unwrap(), &[None, Some(7.9)]);
//! assert_eq!(table.text("Name").unwrap()[1].as_deref(), Some("B"));
//! ```

use std::{collections::HashSet, fs::File, io, path::Path, path::PathBuf};

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

/// Cell values read as missing in any column.
const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Placeholder that marks a not-yet-known number (e.g. a user score "to be determined").
const NUMERIC_PLACEHOLDER: &str = "tbd";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to open {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to read CSV data")]
    Csv { source: csv::Error },
    #[display("CSV data has no header row")]
    EmptyHeader,
    #[display("invalid CSV header")]
    Header { source: SchemaError },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SchemaError {
    #[display("missing column '{name}'")]
    MissingColumn { name: String },
    #[display("column '{name}' holds {actual} values, expected {expected}")]
    WrongType {
        name: String,
        expected: ColumnType,
        actual: ColumnType,
    },
    #[display("duplicate column '{name}'")]
    DuplicateColumn { name: String },
    #[display("column '{name}' has {actual} rows, table has {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ColumnType {
    #[display("text")]
    Text,
    #[display("float")]
    Float,
    #[display("integer")]
    Int,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Text(Vec<Option<String>>),
    Float(Vec<Option<f64>>),
    Int(Vec<Option<i64>>),
}

impl ColumnData {
    /// Infers the column type from raw CSV cells.
    fn infer(cells: Vec<String>) -> Self {
        let numeric = cells
            .iter()
            .map(|cell| parse_numeric_cell(cell))
            .collect::<Option<Vec<_>>>();
        match numeric {
            Some(values) => Self::Float(values),
            None => Self::Text(
                cells
                    .into_iter()
                    .map(|cell| (!is_missing_token(&cell)).then_some(cell))
                    .collect(),
            ),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Text(values) => values.len(),
            Self::Float(values) => values.len(),
            Self::Int(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        match self {
            Self::Text(_) => ColumnType::Text,
            Self::Float(_) => ColumnType::Float,
            Self::Int(_) => ColumnType::Int,
        }
    }

    #[must_use]
    pub fn missing_count(&self) -> usize {
        match self {
            Self::Text(values) => values.iter().filter(|v| v.is_none()).count(),
            Self::Float(values) => values.iter().filter(|v| v.is_none()).count(),
            Self::Int(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }

    /// Converts to a float column, cell by cell.
    ///
    /// Text that does not parse as a number becomes missing, as do non-finite
    /// floats. Missing-value tokens and `tbd` are missing without counting as
    /// dropped. Returns the converted data and the number of dropped cells.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn into_float(self) -> (Self, usize) {
        let mut dropped = 0;
        let values = match self {
            Self::Float(values) => values
                .into_iter()
                .map(|v| {
                    let kept = v.filter(|v| v.is_finite());
                    dropped += usize::from(v.is_some() && kept.is_none());
                    kept
                })
                .collect::<Vec<_>>(),
            Self::Int(values) => values.into_iter().map(|v| v.map(|v| v as f64)).collect(),
            Self::Text(values) => values
                .into_iter()
                .map(|v| {
                    let parsed = v.as_deref().map(parse_numeric_cell)?;
                    dropped += usize::from(parsed.is_none());
                    parsed.flatten()
                })
                .collect(),
        };
        (Self::Float(values), dropped)
    }

    /// Cells as text; numbers are written in their shortest form.
    #[must_use]
    pub fn into_strings(self) -> Vec<Option<String>> {
        match self {
            Self::Text(values) => values,
            Self::Float(values) => values
                .into_iter()
                .map(|v| v.map(|v| v.to_string()))
                .collect(),
            Self::Int(values) => values
                .into_iter()
                .map(|v| v.map(|v| v.to_string()))
                .collect(),
        }
    }

    #[must_use]
    pub fn into_text(self) -> Self {
        Self::Text(self.into_strings())
    }

    fn filter(&self, mask: &[bool]) -> Self {
        fn keep<T: Clone>(values: &[T], mask: &[bool]) -> Vec<T> {
            values
                .iter()
                .zip(mask)
                .filter(|(_, keep)| **keep)
                .map(|(v, _)| v.clone())
                .collect()
        }
        match self {
            Self::Text(values) => Self::Text(keep(values, mask)),
            Self::Float(values) => Self::Float(keep(values, mask)),
            Self::Int(values) => Self::Int(keep(values, mask)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    #[must_use]
    pub fn text<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let values = values.into_iter().map(|v| v.map(Into::into)).collect();
        Self::new(name, ColumnData::Text(values))
    }

    #[must_use]
    pub fn float(name: impl Into<String>, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self::new(name, ColumnData::Float(values.into_iter().collect()))
    }

    #[must_use]
    pub fn int(name: impl Into<String>, values: impl IntoIterator<Item = Option<i64>>) -> Self {
        Self::new(name, ColumnData::Int(values.into_iter().collect()))
    }

    fn wrong_type(&self, expected: ColumnType) -> SchemaError {
        SchemaError::WrongType {
            name: self.name.clone(),
            expected,
            actual: self.data.column_type(),
        }
    }
}

/// Immutable column-oriented table.
///
/// Column names are unique and all columns have the same number of rows.
/// Transformations consume a table and return a new one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self, SchemaError> {
        let rows = columns.first().map_or(0, |c| c.data.len());
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    name: column.name.clone(),
                });
            }
            if column.data.len() != rows {
                return Err(SchemaError::LengthMismatch {
                    name: column.name.clone(),
                    expected: rows,
                    actual: column.data.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Reads CSV data with a header row.
    ///
    /// Ragged rows and invalid UTF-8 fail the load; malformed cells do not.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, LoadError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|source| LoadError::Csv { source })?
            .clone();
        if headers.iter().all(str::is_empty) {
            return Err(LoadError::EmptyHeader);
        }

        let mut cells = vec![Vec::new(); headers.len()];
        let mut record = StringRecord::new();
        while rdr
            .read_record(&mut record)
            .map_err(|source| LoadError::Csv { source })?
        {
            for (column, field) in cells.iter_mut().zip(record.iter()) {
                column.push(field.to_owned());
            }
        }

        let columns = headers
            .iter()
            .zip(cells)
            .map(|(name, cells)| Column::new(name, ColumnData::infer(cells)))
            .collect();
        let table = Self::new(columns).map_err(|source| LoadError::Header { source })?;
        debug!(
            rows = table.len(),
            columns = table.columns.len(),
            "CSV data parsed"
        );
        Ok(table)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_owned(),
            source,
        })?;
        let table = Self::from_reader(io::BufReader::new(file))?;
        info!(path = %path.display(), rows = table.len(), "table loaded");
        Ok(table)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Result<&Column, SchemaError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| SchemaError::MissingColumn {
                name: name.to_owned(),
            })
    }

    pub fn text(&self, name: &str) -> Result<&[Option<String>], SchemaError> {
        let column = self.column(name)?;
        match &column.data {
            ColumnData::Text(values) => Ok(values),
            _ => Err(column.wrong_type(ColumnType::Text)),
        }
    }

    pub fn floats(&self, name: &str) -> Result<&[Option<f64>], SchemaError> {
        let column = self.column(name)?;
        match &column.data {
            ColumnData::Float(values) => Ok(values),
            _ => Err(column.wrong_type(ColumnType::Float)),
        }
    }

    pub fn ints(&self, name: &str) -> Result<&[Option<i64>], SchemaError> {
        let column = self.column(name)?;
        match &column.data {
            ColumnData::Int(values) => Ok(values),
            _ => Err(column.wrong_type(ColumnType::Int)),
        }
    }

    /// Values of a float or integer column as floats.
    #[expect(clippy::cast_precision_loss)]
    pub fn numbers(&self, name: &str) -> Result<Vec<Option<f64>>, SchemaError> {
        let column = self.column(name)?;
        match &column.data {
            ColumnData::Float(values) => Ok(values.clone()),
            ColumnData::Int(values) => Ok(values.iter().map(|v| v.map(|v| v as f64)).collect()),
            ColumnData::Text(_) => Err(column.wrong_type(ColumnType::Float)),
        }
    }

    /// Returns the table with `column` added, replacing a column of the same name.
    pub fn with_column(mut self, column: Column) -> Result<Self, SchemaError> {
        if !self.columns.is_empty() && column.data.len() != self.rows {
            return Err(SchemaError::LengthMismatch {
                name: column.name,
                expected: self.rows,
                actual: column.data.len(),
            });
        }
        if self.columns.is_empty() {
            self.rows = column.data.len();
        }
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
        Ok(self)
    }

    /// Renames every column with `rename`, rejecting names that collide.
    pub fn rename_columns<F>(self, mut rename: F) -> Result<Self, SchemaError>
    where
        F: FnMut(&str) -> String,
    {
        let columns = self
            .columns
            .into_iter()
            .map(|c| Column::new(rename(&c.name), c.data))
            .collect();
        Self::new(columns)
    }

    /// Rows where `mask` is `true`, in their original order.
    ///
    /// # Panics
    ///
    /// Panics if `mask` does not have one entry per row.
    #[must_use]
    pub fn filter(&self, mask: &[bool]) -> Self {
        assert_eq!(mask.len(), self.rows, "mask length must match row count");
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name.clone(), c.data.filter(mask)))
            .collect();
        Self {
            columns,
            rows: mask.iter().filter(|keep| **keep).count(),
        }
    }
}

fn is_missing_token(cell: &str) -> bool {
    MISSING_TOKENS.contains(&cell.trim())
}

/// `Some(None)` for a missing number, `Some(Some(v))` for a number, `None` for text.
///
/// Non-finite spellings (`inf`, `NAN`, ...) are missing numbers.
fn parse_numeric_cell(cell: &str) -> Option<Option<f64>> {
    let cell = cell.trim();
    if is_missing_token(cell) || cell.eq_ignore_ascii_case(NUMERIC_PLACEHOLDER) {
        return Some(None);
    }
    cell.parse::<f64>()
        .ok()
        .map(|value| value.is_finite().then_some(value))
}
