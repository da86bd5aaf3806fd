//! Dataset Loader Module
//! Loads the food order CSV into an immutable in-memory table using Polars.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Column names the engine depends on. Extra columns pass through untouched.
pub const ORDER_ID: &str = "order_id";
pub const CUSTOMER_ID: &str = "customer_id";
pub const COST: &str = "cost_of_the_order";
pub const RATING: &str = "rating";
pub const PREP_TIME: &str = "food_preparation_time";
pub const DELIVERY_TIME: &str = "delivery_time";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    ORDER_ID,
    CUSTOMER_ID,
    COST,
    RATING,
    PREP_TIME,
    DELIVERY_TIME,
];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing required columns: {0}")]
    MissingColumns(String),
}

/// Immutable snapshot of the order table plus column-type metadata.
///
/// Constructed once at startup and passed by reference into every
/// computation. Loading again (the Browse action) builds a new handle;
/// an existing `Dataset` is never mutated.
pub struct Dataset {
    df: DataFrame,
    path: PathBuf,
    numeric_columns: Vec<String>,
    categorical_columns: Vec<String>,
}

impl Dataset {
    /// Load a CSV file and validate the order schema.
    ///
    /// The `rating` column is coerced to Float64 per value; entries that do
    /// not parse (e.g. the literal "Not given") become null rather than
    /// failing the load.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();

        let mut df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| df.column(name).is_err())
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing.join(", ")));
        }

        // Per-value coercion: unparsable ratings turn into nulls.
        let rating = df.column(RATING)?.cast(&DataType::Float64)?;
        df.replace(RATING, rating.as_materialized_series().clone())?;

        let (numeric_columns, categorical_columns) = split_column_kinds(&df);

        log::info!(
            "loaded {} rows, {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );

        Ok(Self {
            df,
            path: path.to_path_buf(),
            numeric_columns,
            categorical_columns,
        })
    }

    /// The loaded table.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn column_count(&self) -> usize {
        self.df.width()
    }

    /// All column names in file order.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Columns with a numeric dtype after load-time coercion.
    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }

    /// Non-numeric (categorical/text) columns.
    pub fn categorical_columns(&self) -> &[String] {
        &self.categorical_columns
    }

    /// First `limit` rows rendered as display strings, in column order.
    pub fn preview(&self, limit: usize) -> Vec<Vec<String>> {
        let rows = self.df.height().min(limit);
        let columns = self.df.get_columns();

        (0..rows)
            .map(|i| {
                columns
                    .iter()
                    .map(|col| match col.get(i) {
                        Ok(v) if v.is_null() => "-".to_string(),
                        Ok(v) => v.to_string().trim_matches('"').to_string(),
                        Err(_) => "-".to_string(),
                    })
                    .collect()
            })
            .collect()
    }
}

fn split_column_kinds(df: &DataFrame) -> (Vec<String>, Vec<String>) {
    let mut numeric = Vec::new();
    let mut categorical = Vec::new();

    for col in df.get_columns() {
        let is_numeric = matches!(
            col.dtype(),
            DataType::Float32
                | DataType::Float64
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        );
        if is_numeric {
            numeric.push(col.name().to_string());
        } else {
            categorical.push(col.name().to_string());
        }
    }

    (numeric, categorical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_and_coerces_rating() {
        let file = write_csv(
            "order_id,customer_id,cost_of_the_order,rating,food_preparation_time,delivery_time\n\
             1,100,12.5,5,20,25\n\
             2,101,30.0,Not given,25,30\n\
             3,102,8.0,4,15,20\n",
        );

        let ds = Dataset::load(file.path()).unwrap();
        assert_eq!(ds.row_count(), 3);

        let rating = ds.frame().column(RATING).unwrap();
        assert_eq!(rating.dtype(), &DataType::Float64);
        assert_eq!(rating.null_count(), 1);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let file = write_csv("order_id,customer_id,cost_of_the_order\n1,100,12.5\n");

        match Dataset::load(file.path()) {
            Err(LoadError::MissingColumns(cols)) => {
                assert!(cols.contains("rating"));
                assert!(cols.contains("delivery_time"));
            }
            Err(other) => panic!("expected MissingColumns, got {other}"),
            Ok(_) => panic!("expected MissingColumns, load succeeded"),
        }
    }

    #[test]
    fn absent_file_is_fatal() {
        assert!(matches!(
            Dataset::load("/nonexistent/food_order.csv"),
            Err(LoadError::Csv(_))
        ));
    }

    #[test]
    fn extra_columns_pass_through() {
        let file = write_csv(
            "order_id,customer_id,restaurant_name,cost_of_the_order,rating,food_preparation_time,delivery_time\n\
             1,100,Blue Ribbon,12.5,5,20,25\n",
        );

        let ds = Dataset::load(file.path()).unwrap();
        assert!(ds.column_names().contains(&"restaurant_name".to_string()));
        assert!(ds
            .categorical_columns()
            .contains(&"restaurant_name".to_string()));
        assert!(ds.numeric_columns().contains(&COST.to_string()));
    }
}
