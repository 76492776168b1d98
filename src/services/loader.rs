//! Purchase history and image lookup table loaders.
//!
//! Both tables are CSV with a header row. Required columns are checked up front so a
//! misnamed header fails the load instead of surfacing as an empty dataset later.
//! Columns other than the required ones are ignored.

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    error::DataLoadError,
    models::{ImageEntry, PurchaseRecord},
};

const CUSTOMER_ID: &str = "Customer ID";
const PURCHASE_COLUMNS: [&str; 3] = ["Item Purchased", "Color", "Season"];
const IMAGE_COLUMNS: [&str; 3] = ["Item", "Color", "URL"];

#[derive(Debug, Deserialize)]
struct PurchaseRow {
    #[serde(rename = "Customer ID", default)]
    customer_id: Option<String>,
    #[serde(rename = "Item Purchased")]
    item_purchased: String,
    #[serde(rename = "Color")]
    color: String,
    #[serde(rename = "Season")]
    season: String,
}

/// Load the purchase history table from a file
pub fn load_purchases(path: impl AsRef<Path>) -> Result<Vec<PurchaseRecord>, DataLoadError> {
    let path = path.as_ref();
    let records = read_purchases(open(path)?, path)?;
    tracing::info!(path = %path.display(), rows = records.len(), "Loaded purchase history");
    Ok(records)
}

/// Load the image lookup table from a file
pub fn load_images(path: impl AsRef<Path>) -> Result<Vec<ImageEntry>, DataLoadError> {
    let path = path.as_ref();
    let entries = read_images(open(path)?, path)?;
    tracing::info!(path = %path.display(), rows = entries.len(), "Loaded image lookup table");
    Ok(entries)
}

/// Parse purchase history rows from any reader
///
/// `source` only labels errors. Rows without a `Customer ID` value are keyed by their
/// zero-based position in the table. A blank ID in a table that has the column is logged,
/// since its positional key may collide with another row's explicit ID.
pub fn read_purchases<R: Read>(
    reader: R,
    source: &Path,
) -> Result<Vec<PurchaseRecord>, DataLoadError> {
    let mut csv_reader = csv_reader(reader);
    require_columns(&mut csv_reader, &PURCHASE_COLUMNS, source)?;
    let keyed = csv_reader
        .headers()
        .map_err(|e| parse_error(source, e))?
        .iter()
        .any(|header| header == CUSTOMER_ID);

    let mut records = Vec::new();
    for (position, result) in csv_reader.deserialize::<PurchaseRow>().enumerate() {
        let row = result.map_err(|e| parse_error(source, e))?;
        let customer_id = match row
            .customer_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
        {
            Some(id) => id,
            None => {
                if keyed {
                    tracing::warn!(
                        path = %source.display(),
                        position,
                        "Blank customer ID, keying row by position"
                    );
                }
                position.to_string()
            }
        };

        records.push(PurchaseRecord {
            customer_id,
            item_purchased: row.item_purchased,
            color: row.color,
            season: row.season,
        });
    }

    Ok(records)
}

/// Parse image lookup rows from any reader
pub fn read_images<R: Read>(reader: R, source: &Path) -> Result<Vec<ImageEntry>, DataLoadError> {
    let mut csv_reader = csv_reader(reader);
    require_columns(&mut csv_reader, &IMAGE_COLUMNS, source)?;

    csv_reader
        .deserialize::<ImageEntry>()
        .map(|result| result.map_err(|e| parse_error(source, e)))
        .collect()
}

fn open(path: &Path) -> Result<File, DataLoadError> {
    File::open(path).map_err(|source| DataLoadError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader)
}

fn require_columns<R: Read>(
    csv_reader: &mut csv::Reader<R>,
    required: &[&'static str],
    source: &Path,
) -> Result<(), DataLoadError> {
    let headers = csv_reader.headers().map_err(|e| parse_error(source, e))?;

    for column in required {
        if !headers.iter().any(|header| header == *column) {
            return Err(DataLoadError::MissingColumn {
                path: source.to_path_buf(),
                column: *column,
            });
        }
    }

    Ok(())
}

fn parse_error(source: &Path, error: csv::Error) -> DataLoadError {
    let line = error.position().map(|p| p.line()).unwrap_or(0);
    DataLoadError::Parse {
        path: PathBuf::from(source),
        line,
        source: error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tracing_test::traced_test;

    const PURCHASES_CSV: &str = "\
Customer ID,Age,Item Purchased,Category,Color,Season
1,55,Blouse,Clothing,Gray,Winter
2,19,Sweater,Clothing,Maroon,Winter
3,50,Jeans,Clothing,Maroon,Spring
";

    const IMAGES_CSV: &str = "\
Item,Color,URL
Blouse,Gray,https://img.example/blouse-gray.png
Jeans,Maroon,https://img.example/jeans-maroon.png
";

    fn source() -> &'static Path {
        Path::new("fixture.csv")
    }

    #[test]
    fn test_read_purchases_ignores_extra_columns() {
        let records = read_purchases(PURCHASES_CSV.as_bytes(), source()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], PurchaseRecord::new("1", "Blouse", "Gray", "Winter"));
        assert_eq!(records[2].season, "Spring");
    }

    #[test]
    fn test_row_position_used_without_customer_column() {
        let csv = "Item Purchased,Color,Season\nCoat,Black,Winter\nHat,Blue,Fall\n";
        let records = read_purchases(csv.as_bytes(), source()).unwrap();
        assert_eq!(records[0].customer_id, "0");
        assert_eq!(records[1].customer_id, "1");
    }

    #[test]
    #[traced_test]
    fn test_blank_customer_id_warns() {
        let csv = "Customer ID,Item Purchased,Color,Season\n,Coat,Black,Winter\n0,Hat,Blue,Fall\n";
        let records = read_purchases(csv.as_bytes(), source()).unwrap();

        assert_eq!(records[0].customer_id, "0");
        assert_eq!(records[1].customer_id, "0");
        assert!(logs_contain("Blank customer ID, keying row by position"));
    }

    #[test]
    #[traced_test]
    fn test_positional_keys_do_not_warn() {
        let csv = "Item Purchased,Color,Season\nCoat,Black,Winter\n";
        read_purchases(csv.as_bytes(), source()).unwrap();
        assert!(!logs_contain("Blank customer ID"));
    }

    #[test]
    fn test_missing_purchase_column() {
        let csv = "Item Purchased,Color\nCoat,Black\n";
        let err = read_purchases(csv.as_bytes(), source()).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::MissingColumn { column: "Season", .. }
        ));
    }

    #[test]
    fn test_empty_input_is_missing_columns() {
        let err = read_images("".as_bytes(), source()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn { column: "Item", .. }));
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let csv = "Item,Color,URL\nShirt,Red\n";
        let err = read_images(csv.as_bytes(), source()).unwrap_err();
        assert!(matches!(err, DataLoadError::Parse { .. }));
    }

    #[test]
    fn test_read_images() {
        let entries = read_images(IMAGES_CSV.as_bytes(), source()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[1],
            ImageEntry::new("Jeans", "Maroon", "https://img.example/jeans-maroon.png")
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PURCHASES_CSV.as_bytes()).unwrap();

        let first = load_purchases(file.path()).unwrap();
        let second = load_purchases(file.path()).unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_images(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Open { .. }));
    }
}
