//! CSV loader for batch estimate inputs.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Header
//! names are case-sensitive; option codes are not.
//!
//! | Column        | Required | Type    | Notes                                         |
//! |---------------|----------|---------|-----------------------------------------------|
//! | `service`     | yes      | code    | `raw_and_finish`, `turnkey`                   |
//! | `floor_area`  | yes      | decimal | square metres per floor, e.g. `80` or `62.5`  |
//! | `floors`      | yes      | integer | 1 to 20                                       |
//! | `foundation`  | yes      | code    | `strip`, `isolated`, `pile`, `raft`           |
//! | `roof`        | yes      | code    | `concrete`, `metal_sheet`, `tile_on_steel`, `tiled_concrete` |
//! | `basement`    | yes      | code    | `none`, `half_sunken`, `full`                 |
//! | `contingency` | no       | bool    | defaults to `true`                            |
//! | `attic`       | no       | bool    | defaults to `false`                           |
//!
//! ### Example
//!
//! ```csv
//! service,floor_area,floors,foundation,roof,basement,contingency,attic
//! raw_and_finish,80,2,strip,concrete,none,true,false
//! turnkey,100,3,raft,tiled_concrete,full,false,true
//! ```
use std::path::Path;

use estimate_core::{
    BasementType, CatalogOption, EstimateInput, FoundationType, RoofType, ServiceTier,
};
use rust_decimal::Decimal;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    service: String,
    floor_area: Decimal,
    floors: u32,
    foundation: String,
    roof: String,
    basement: String,
    contingency: Option<bool>,
    attic: Option<bool>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read CSV file: {0}")]
    Io(#[from] std::io::Error),

    /// Bad structure, missing required column, type mismatch.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// An option cell held an unknown code. `row` is 1-based, not counting
    /// the header.
    #[error("unrecognised {column} '{value}' on row {row}")]
    InvalidOption {
        column: &'static str,
        value: String,
        row: usize,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn parse_code<T: CatalogOption>(
    column: &'static str,
    value: String,
    row: usize,
) -> Result<T, CsvLoadError> {
    T::parse(&value).ok_or(CsvLoadError::InvalidOption { column, value, row })
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<EstimateInput, CsvLoadError> {
    Ok(EstimateInput {
        service: parse_code::<ServiceTier>("service", row.service, row_number)?,
        floor_area: row.floor_area,
        floors: row.floors,
        foundation: parse_code::<FoundationType>("foundation", row.foundation, row_number)?,
        roof: parse_code::<RoofType>("roof", row.roof, row_number)?,
        basement: parse_code::<BasementType>("basement", row.basement, row_number)?,
        has_contingency: row.contingency.unwrap_or(true),
        has_attic: row.attic.unwrap_or(false),
    })
}

/// Parses CSV text into estimate inputs, in file order.
///
/// Values are not range-checked here; floor area and floor count go
/// through validation before calculation.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if the CSV is structurally invalid or a
///   field cannot be deserialised.
/// * [`CsvLoadError::InvalidOption`] if a row holds an unknown option code.
pub fn load_from_str(input: &str) -> Result<Vec<EstimateInput>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

/// Reads a file from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<EstimateInput>, CsvLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const MINIMAL_CSV: &str = "\
service,floor_area,floors,foundation,roof,basement
raw_and_finish,80,2,strip,concrete,none
";

    const FULL_CSV: &str = "\
service,floor_area,floors,foundation,roof,basement,contingency,attic
turnkey,100.5,3,raft,tiled_concrete,full,false,true
";

    // -----------------------------------------------------------------------
    // Happy paths
    // -----------------------------------------------------------------------

    #[test]
    fn minimal_row_uses_default_toggles() {
        let inputs = load_from_str(MINIMAL_CSV).unwrap();

        assert_eq!(inputs, vec![EstimateInput::default()]);
    }

    #[test]
    fn full_row_maps_every_column() {
        let inputs = load_from_str(FULL_CSV).unwrap();

        assert_eq!(
            inputs,
            vec![EstimateInput {
                service: ServiceTier::Turnkey,
                floor_area: dec!(100.5),
                floors: 3,
                foundation: FoundationType::Raft,
                roof: RoofType::TiledConcrete,
                basement: BasementType::Full,
                has_contingency: false,
                has_attic: true,
            }]
        );
    }

    #[test]
    fn column_order_and_code_case_do_not_matter() {
        let csv = "\
roof,basement,foundation,floors,floor_area,service
METAL_SHEET,Half_Sunken,Pile,1,45,Turnkey
";

        let inputs = load_from_str(csv).unwrap();

        assert_eq!(inputs[0].roof, RoofType::MetalSheet);
        assert_eq!(inputs[0].basement, BasementType::HalfSunken);
        assert_eq!(inputs[0].foundation, FoundationType::Pile);
        assert_eq!(inputs[0].service, ServiceTier::Turnkey);
    }

    #[test]
    fn whitespace_around_values_is_trimmed() {
        let csv = "\
service , floor_area , floors , foundation , roof , basement
 raw_and_finish , 80 , 2 , strip , concrete , none
";

        assert_eq!(load_from_str(csv).unwrap(), vec![EstimateInput::default()]);
    }

    #[test]
    fn header_only_yields_no_rows() {
        let csv = "service,floor_area,floors,foundation,roof,basement\n";

        assert!(load_from_str(csv).unwrap().is_empty());
    }

    #[test]
    fn out_of_range_values_are_left_for_validation() {
        let csv = "\
service,floor_area,floors,foundation,roof,basement
raw_and_finish,0,25,strip,concrete,none
";

        let inputs = load_from_str(csv).unwrap();

        assert_eq!(inputs[0].floor_area, Decimal::ZERO);
        assert_eq!(inputs[0].floors, 25);
    }

    // -----------------------------------------------------------------------
    // Error paths
    // -----------------------------------------------------------------------

    #[test]
    fn unknown_code_reports_column_and_row() {
        let csv = "\
service,floor_area,floors,foundation,roof,basement
raw_and_finish,80,2,strip,concrete,none
raw_and_finish,80,2,slab,concrete,none
";

        let err = load_from_str(csv).unwrap_err();

        assert_eq!(err.to_string(), "unrecognised foundation 'slab' on row 2");
    }

    #[test]
    fn missing_required_column_is_parse_error() {
        let csv = "\
service,floor_area,floors,foundation,roof
raw_and_finish,80,2,strip,concrete
";

        assert!(matches!(load_from_str(csv), Err(CsvLoadError::Parse(_))));
    }

    #[test]
    fn non_numeric_area_is_parse_error() {
        let csv = "\
service,floor_area,floors,foundation,roof,basement
raw_and_finish,big,2,strip,concrete,none
";

        assert!(matches!(load_from_str(csv), Err(CsvLoadError::Parse(_))));
    }

    #[test]
    fn negative_floor_count_is_parse_error() {
        let csv = "\
service,floor_area,floors,foundation,roof,basement
raw_and_finish,80,-1,strip,concrete,none
";

        assert!(matches!(load_from_str(csv), Err(CsvLoadError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_from_file(Path::new("/nonexistent/estimates.csv"));

        assert!(matches!(result, Err(CsvLoadError::Io(_))));
    }
}
