//! Read scraped listings from a JSON file.
//!
//! The scraper writes a JSON array of `{title, price, mileage}` objects;
//! `price` and `mileage` may be strings, numbers, `null`, or absent.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::domain::RawListing;
use crate::error::AppError;

/// Read a listings JSON file.
pub fn read_listings_json(path: &Path) -> Result<Vec<RawListing>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::bad_input(format!("Failed to open listings JSON '{}': {e}", path.display())))?;
    parse_listings_json(BufReader::new(file))
}

/// Parse a listings JSON document from any reader.
pub fn parse_listings_json<R: std::io::Read>(reader: R) -> Result<Vec<RawListing>, AppError> {
    serde_json::from_reader(reader).map_err(|e| AppError::bad_input(format!("Invalid listings JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawField;

    #[test]
    fn parses_scraper_output() {
        let json = br#"[
            {"title": "VW Golf", "price": "CHF 14'900.-", "mileage": "88'000 km"},
            {"title": "VW Golf GTI", "price": "Preis auf Anfrage", "mileage": null}
        ]"#;
        let rows = parse_listings_json(&json[..]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "VW Golf");
        assert_eq!(rows[1].mileage, RawField::Missing);
    }

    #[test]
    fn rejects_non_array_documents() {
        let err = parse_listings_json(&b"{\"title\": 1}"[..]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_file_is_a_usage_error() {
        let err = read_listings_json(Path::new("/nonexistent/listings.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("listings.json"));
    }
}
