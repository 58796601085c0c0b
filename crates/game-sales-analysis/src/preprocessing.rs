//! Raw sales data to analysis-ready table
//!
//! [`Preprocessor`] loads a CSV file and runs its passes in a fixed order,
//! since each pass relies on the columns produced by the one before:
//!
//! 1. [`lowercase_columns`]: column names to lowercase, then
//!    [`coerce_known_types`]: known columns to their fixed types, cell by cell
//! 2. [`coerce_year`]: `year_of_release` to a nullable integer column
//! 3. [`map_esrb_rating`]: `rating` to the readable `rating_new`
//! 4. [`add_global_sales`]: `global_sales` as the sum of the regional sales
//!
//! Every pass is a plain function from [`Table`] to [`Table`] and can be used
//! on its own.
//!
//! # Example
//!
//! ```
//! use game_sales_analysis::preprocessing::Preprocessor;
//!
//! let csv = "\
//! Name,Platform,Year_of_Release,Genre,NA_Sales,EU_Sales,JP_Sales,Other_Sales,Critic_Score,User_Score,Rating
//! X,PS4,2015,Action,1.0,0.5,0,0.1,,,E
//! ";
//! let preprocessor = Preprocessor::from_reader(csv.as_bytes()).unwrap();
//! let data = preprocessor.data();
//!
//! assert_eq!(data.ints("year_of_release").unwrap(), &[Some(2015)]);
//! assert_eq!(data.text("rating_new").unwrap()[0].as_deref(), Some("everyone"));
//! let global = data.floats("global_sales").unwrap()[0].unwrap();
//! assert!((global - 1.6).abs() < 1e-9);
//! ```

use std::{io, path::Path};

use tracing::{debug, info, warn};

use crate::{
    columns,
    missing::MissingReport,
    rating,
    table::{Column, ColumnData, ColumnType, LoadError, SchemaError, Table},
};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PreprocessError {
    #[display("failed to load sales data")]
    Load(LoadError),
    #[display("sales data does not have the expected columns")]
    Schema(SchemaError),
}

/// Owner of the preprocessed table.
///
/// The table is built once and only handed out by shared reference.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    data: Table,
}

impl Preprocessor {
    /// Loads and preprocesses the CSV file at `path`.
    pub fn initialize(path: impl AsRef<Path>) -> Result<Self, PreprocessError> {
        let raw = Table::from_path(path)?;
        Ok(Self::from_table(raw)?)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, PreprocessError> {
        let raw = Table::from_reader(reader)?;
        Ok(Self::from_table(raw)?)
    }

    /// Preprocesses an already loaded raw table.
    pub fn from_table(raw: Table) -> Result<Self, SchemaError> {
        let data = lowercase_columns(raw)?;
        let data = coerce_known_types(data)?;
        let data = coerce_year(data)?;
        let data = map_esrb_rating(data)?;
        let data = add_global_sales(data)?;
        info!(
            rows = data.len(),
            columns = data.columns().len(),
            "preprocessing finished"
        );
        Ok(Self { data })
    }

    #[must_use]
    pub fn data(&self) -> &Table {
        &self.data
    }

    #[must_use]
    pub fn into_data(self) -> Table {
        self.data
    }

    /// Percentage of missing values per column, highest first.
    #[must_use]
    pub fn missing_report(&self) -> MissingReport {
        MissingReport::from_table(&self.data)
    }
}

pub fn lowercase_columns(table: Table) -> Result<Table, SchemaError> {
    let table = table.rename_columns(str::to_lowercase)?;
    debug!("column names lowercased");
    Ok(table)
}

/// Gives the known columns their fixed types.
///
/// Sales and score columns become floats; a cell that is not a finite number
/// becomes missing. Name, platform, genre and rating become text. Columns that
/// are absent are left for the passes that need them to report.
pub fn coerce_known_types(mut table: Table) -> Result<Table, SchemaError> {
    for name in columns::NUMERIC {
        let Ok(column) = table.column(name) else {
            continue;
        };
        let (data, dropped) = column.data.clone().into_float();
        if dropped > 0 {
            warn!(column = name, dropped, "malformed numbers treated as missing");
        }
        table = table.with_column(Column::new(name, data))?;
    }
    for name in columns::TEXT {
        let Ok(column) = table.column(name) else {
            continue;
        };
        if column.data.column_type() != ColumnType::Text {
            let data = column.data.clone().into_text();
            table = table.with_column(Column::new(name, data))?;
        }
    }
    debug!("known column types applied");
    Ok(table)
}

/// Converts `year_of_release` to integers.
///
/// Values that are not whole numbers (or not numbers at all, in a text
/// column) become missing.
pub fn coerce_year(table: Table) -> Result<Table, SchemaError> {
    let column = table.column(columns::YEAR_OF_RELEASE)?;
    let years = match &column.data {
        ColumnData::Int(_) => return Ok(table),
        ColumnData::Float(values) => values
            .iter()
            .map(|v| v.and_then(whole_year))
            .collect::<Vec<_>>(),
        ColumnData::Text(values) => values
            .iter()
            .map(|v| {
                v.as_deref()
                    .and_then(|text| text.trim().parse::<f64>().ok())
                    .and_then(whole_year)
            })
            .collect::<Vec<_>>(),
    };
    let present = column.data.len() - column.data.missing_count();
    let dropped = present - years.iter().flatten().count();
    if dropped > 0 {
        warn!(dropped, "non-integral release years treated as missing");
    }
    let table = table.with_column(Column::int(columns::YEAR_OF_RELEASE, years))?;
    debug!("release years coerced to integers");
    Ok(table)
}

#[expect(clippy::cast_possible_truncation)]
fn whole_year(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() <= f64::from(i32::MAX)).then_some(value as i64)
}

/// Adds `rating_new` with the readable label of each ESRB code.
///
/// Non-text codes are read as their text form, so a `rating` column without
/// any value maps to "rating pending" throughout.
pub fn map_esrb_rating(table: Table) -> Result<Table, SchemaError> {
    let column = table.column(columns::RATING)?;
    let labels = column
        .data
        .clone()
        .into_strings()
        .iter()
        .map(|code| Some(rating::esrb_label(code.as_deref()).to_owned()))
        .collect::<Vec<_>>();
    let table = table.with_column(Column::new(columns::RATING_NEW, ColumnData::Text(labels)))?;
    debug!("ESRB ratings mapped");
    Ok(table)
}

/// Adds `global_sales`, treating missing regional sales as zero.
pub fn add_global_sales(table: Table) -> Result<Table, SchemaError> {
    let mut totals = vec![0.0; table.len()];
    for name in columns::REGIONAL_SALES {
        for (total, value) in totals.iter_mut().zip(table.numbers(name)?) {
            *total += value.unwrap_or(0.0);
        }
    }
    let table = table.with_column(Column::float(
        columns::GLOBAL_SALES,
        totals.into_iter().map(Some),
    ))?;
    debug!("global sales added");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Name,Platform,Year_of_Release,Genre,NA_Sales,EU_Sales,JP_Sales,Other_Sales,Critic_Score,User_Score,Rating";

    fn preprocess(rows: &[&str]) -> Table {
        let csv = format!("{HEADER}\n{}\n", rows.join("\n"));
        Preprocessor::from_reader(csv.as_bytes())
            .unwrap()
            .into_data()
    }

    #[test]
    fn test_single_row_scenario() {
        let data = preprocess(&["X,PS4,2015,Action,1.0,0.5,0,0.1,,,E"]);
        assert_eq!(data.text("rating_new").unwrap()[0].as_deref(), Some("everyone"));
        let global = data.floats("global_sales").unwrap()[0].unwrap();
        assert!((global - 1.6).abs() < 1e-9, "got {global}");
    }

    #[test]
    fn test_missing_rating_is_pending() {
        let data = preprocess(&[
            "A,PS4,2015,Action,1,0,0,0,,,",
            "B,PS4,2015,Action,1,0,0,0,,,M",
        ]);
        let labels = data.text("rating_new").unwrap();
        assert_eq!(labels[0].as_deref(), Some("rating pending"));
        assert_eq!(labels[1].as_deref(), Some("mature 17+"));
        // source column is kept as it was
        assert_eq!(data.text("rating").unwrap()[0], None);
    }

    #[test]
    fn test_all_missing_ratings() {
        let data = preprocess(&["A,PS4,2015,Action,1,0,0,0,,,", "B,PC,,Action,1,0,0,0,,,"]);
        assert!(
            data.text("rating_new")
                .unwrap()
                .iter()
                .all(|l| l.as_deref() == Some("rating pending"))
        );
    }

    #[test]
    fn test_global_sales_treats_missing_as_zero() {
        let data = preprocess(&[
            "A,PS4,2015,Action,,0.5,,0.25,,,E",
            "B,PS4,2015,Action,,,,,,,E",
        ]);
        assert_eq!(data.floats("global_sales").unwrap(), &[Some(0.75), Some(0.0)]);
        assert_eq!(data.floats("na_sales").unwrap(), &[None, None]);
    }

    #[test]
    fn test_global_sales_is_sum_of_regions() {
        let data = preprocess(&[
            "A,PS4,2015,Action,1.5,0.5,2.25,0.1,80,7.5,T",
            "B,Wii,2006,Sports,41.36,28.96,3.77,8.45,76,8,E",
            "C,PC,,Strategy,0.01,,0.02,,,tbd,",
        ]);
        let global = data.floats("global_sales").unwrap();
        for (i, total) in global.iter().enumerate() {
            let sum = columns::REGIONAL_SALES
                .iter()
                .map(|c| data.floats(c).unwrap()[i].unwrap_or(0.0))
                .sum::<f64>();
            let total = total.unwrap();
            assert!((total - sum).abs() < 1e-9, "row {i}: {total} != {sum}");
            for c in columns::REGIONAL_SALES {
                assert!(total >= data.floats(c).unwrap()[i].unwrap_or(0.0));
            }
        }
    }

    #[test]
    fn test_columns_lowercased_for_any_casing() {
        for header in [HEADER.to_lowercase(), HEADER.to_uppercase(), HEADER.to_string()] {
            let csv = format!("{header}\nX,PS4,2015,Action,1,0,0,0,,,E\n");
            let data = Preprocessor::from_reader(csv.as_bytes())
                .unwrap()
                .into_data();
            assert!(
                data.column_names().all(|n| n == n.to_lowercase()),
                "header {header}"
            );
            assert!(data.column("global_sales").is_ok());
        }
    }

    #[test]
    fn test_colliding_columns_fail() {
        let csv = format!("{HEADER},NAME\nX,PS4,2015,Action,1,0,0,0,,,E,Y\n");
        let err = Preprocessor::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            PreprocessError::Schema(SchemaError::DuplicateColumn { .. })
        ));
    }

    #[test]
    fn test_malformed_sales_cells_become_missing() {
        let data = preprocess(&[
            "A,PS4,2015,Action,1.2x,0.5,0,0.1,80,7.5,E",
            "B,PS4,2015,Action,1.0,NAN,0,inf,80,7.5,E",
            "C,PS4,2015,Action,2.0,0.5,0,0,80,7.5,E",
        ]);
        assert_eq!(
            data.floats("na_sales").unwrap(),
            &[None, Some(1.0), Some(2.0)]
        );
        assert_eq!(
            data.floats("eu_sales").unwrap(),
            &[Some(0.5), None, Some(0.5)]
        );
        let global = data.floats("global_sales").unwrap();
        let expected = [0.6, 1.0, 2.5];
        for (total, expected) in global.iter().zip(expected) {
            let total = total.unwrap();
            assert!((total - expected).abs() < 1e-9, "{total} != {expected}");
        }
    }

    #[test]
    fn test_malformed_scores_become_missing() {
        let data = preprocess(&[
            "A,PS4,2015,Action,1,0,0,0,n.a.,7.5,E",
            "B,PS4,2015,Action,1,0,0,0,85,??,E",
        ]);
        assert_eq!(
            data.floats("critic_score").unwrap(),
            &[None, Some(85.0)]
        );
        assert_eq!(data.floats("user_score").unwrap(), &[Some(7.5), None]);
    }

    #[test]
    fn test_known_text_columns_stay_text() {
        let data = preprocess(&["1942,,2015,,1,0,0,0,,,", "2048,,2016,,1,0,0,0,,,"]);
        assert_eq!(
            data.text("name").unwrap(),
            &[Some("1942".to_string()), Some("2048".to_string())]
        );
        assert_eq!(data.text("platform").unwrap(), &[None, None]);
        assert_eq!(data.text("genre").unwrap(), &[None, None]);
        assert_eq!(data.text("rating").unwrap(), &[None, None]);
    }

    #[test]
    fn test_coerce_known_types_leaves_other_columns() {
        let raw = Table::new(vec![
            Column::text("critic_score", [Some("90"), Some("great")]),
            Column::float("platform", [Some(3.0), None]),
            Column::text("extra", [Some("1"), Some("x")]),
        ])
        .unwrap();
        let table = coerce_known_types(raw).unwrap();
        assert_eq!(
            table.floats("critic_score").unwrap(),
            &[Some(90.0), None]
        );
        assert_eq!(table.text("platform").unwrap(), &[Some("3".to_string()), None]);
        assert_eq!(
            table.text("extra").unwrap(),
            &[Some("1".to_string()), Some("x".to_string())]
        );
        assert!(table.column("na_sales").is_err());
    }

    #[test]
    fn test_year_coercion() {
        let raw = Table::new(vec![Column::float(
            "year_of_release",
            [Some(2015.0), None, Some(2014.5)],
        )])
        .unwrap();
        let table = coerce_year(raw).unwrap();
        assert_eq!(table.ints("year_of_release").unwrap(), &[Some(2015), None, None]);

        let raw = Table::new(vec![Column::text(
            "year_of_release",
            [Some("2001"), Some("unknown"), None],
        )])
        .unwrap();
        let table = coerce_year(raw).unwrap();
        assert_eq!(table.ints("year_of_release").unwrap(), &[Some(2001), None, None]);
    }

    #[test]
    fn test_passes_report_missing_columns() {
        let raw = Table::new(vec![Column::float("na_sales", [Some(1.0)])]).unwrap();
        assert_eq!(
            coerce_year(raw.clone()).unwrap_err(),
            SchemaError::MissingColumn {
                name: "year_of_release".into()
            }
        );
        assert!(matches!(
            map_esrb_rating(raw.clone()).unwrap_err(),
            SchemaError::MissingColumn { .. }
        ));
        assert!(matches!(
            add_global_sales(raw).unwrap_err(),
            SchemaError::MissingColumn { .. }
        ));
    }

    #[test]
    fn test_missing_source_fails_with_load_error() {
        let err = Preprocessor::initialize("/nonexistent/games.csv").unwrap_err();
        assert!(matches!(err, PreprocessError::Load(LoadError::Open { .. })));
    }

    #[test]
    fn test_missing_report_of_preprocessed_data() {
        let csv = format!(
            "{HEADER}\nA,PS4,,Action,1,0,0,0,,,E\nB,PS4,2015,Action,1,0,0,0,90,8,E\n"
        );
        let report = Preprocessor::from_reader(csv.as_bytes())
            .unwrap()
            .missing_report();
        assert_eq!(report.get("year_of_release").unwrap().percent, 50.0);
        assert_eq!(report.get("rating_new").unwrap().percent, 0.0);
        assert_eq!(report.get("global_sales").unwrap().percent, 0.0);
    }
}
