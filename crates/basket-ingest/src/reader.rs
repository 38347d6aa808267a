//! CSV file reading into Polars DataFrames.

use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Reads a CSV file with a header row into a DataFrame.
///
/// Column types are inferred from the whole file. Empty fields load as null.
/// When `row_cap` is set, rows beyond the cap are discarded silently.
pub fn read_csv_table(path: &Path, row_cap: Option<usize>) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IngestError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_n_rows(row_cap)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        capped = row_cap.is_some_and(|cap| df.height() >= cap),
        "read csv table"
    );

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_table() {
        let file = create_temp_csv("aisle_id,aisle\n1,bakery\n2,frozen\n");
        let df = read_csv_table(file.path(), None).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
        assert_eq!(df.column("aisle_id").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("aisle").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_read_csv_table_empty_fields_are_null() {
        let file = create_temp_csv("product_id,product_name,aisle_id\n1,Bread,\n2,,3\n");
        let df = read_csv_table(file.path(), None).unwrap();

        assert_eq!(df.column("aisle_id").unwrap().null_count(), 1);
        assert_eq!(df.column("product_name").unwrap().null_count(), 1);
    }

    #[test]
    fn test_read_csv_table_row_cap() {
        let file = create_temp_csv("order_id,user_id\n1,10\n2,11\n3,12\n4,13\n");
        let df = read_csv_table(file.path(), Some(2)).unwrap();

        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_read_csv_table_missing_file() {
        let result = read_csv_table(Path::new("/nonexistent/products.csv"), None);

        assert!(matches!(result, Err(IngestError::MissingFile { .. })));
    }

    #[test]
    fn test_read_csv_table_empty_file_is_parse_error() {
        let file = create_temp_csv("");
        let result = read_csv_table(file.path(), None);

        assert!(matches!(result, Err(IngestError::Parse { .. })));
    }
}
