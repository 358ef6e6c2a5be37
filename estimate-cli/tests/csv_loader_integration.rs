//! Loads the on-disk fixture and prices it end to end; the unit tests in
//! csv_loader.rs only use inline strings.

use std::path::{Path, PathBuf};

use estimate_cli::csv_loader;
use estimate_core::calculations::compute;
use estimate_core::{BasementType, FoundationType, LineItemKind, RoofType, ServiceTier};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_estimates.csv")
}

#[test]
fn test_load_fixture_file_succeeds() {
    let inputs =
        csv_loader::load_from_file(&fixture_path()).expect("fixture file should load without error");

    assert_eq!(inputs.len(), 4);
}

#[test]
fn test_fixture_base_house_total() {
    let inputs = csv_loader::load_from_file(&fixture_path()).unwrap();

    let result = compute(&inputs[0]);

    assert_eq!(result.breakdown.foundation, dec!(153600000));
    assert_eq!(result.breakdown.body, dec!(512000000));
    assert_eq!(result.breakdown.roof, dec!(128000000));
    assert_eq!(result.breakdown.contingency, dec!(39680000));
    assert_eq!(result.total_cost, dec!(833280000));
}

#[test]
fn test_fixture_attic_row() {
    let inputs = csv_loader::load_from_file(&fixture_path()).unwrap();

    let result = compute(&inputs[1]);

    assert_eq!(
        result.item(LineItemKind::Attic).map(|item| item.total),
        Some(dec!(128000000))
    );
    assert_eq!(result.breakdown.body, dec!(640000000));
    assert_eq!(result.breakdown.contingency, dec!(46080000));
    assert_eq!(result.total_cost, dec!(967680000));
}

#[test]
fn test_fixture_basement_row() {
    let inputs = csv_loader::load_from_file(&fixture_path()).unwrap();
    assert_eq!(inputs[2].basement, BasementType::HalfSunken);
    assert!(!inputs[2].has_contingency);

    let result = compute(&inputs[2]);

    assert_eq!(
        result.kinds(),
        vec![
            LineItemKind::Foundation,
            LineItemKind::Basement,
            LineItemKind::Body,
            LineItemKind::Roof,
        ]
    );
    assert_eq!(result.breakdown.basement, dec!(384000000));
    assert_eq!(result.total_cost, dec!(1177600000));
}

#[test]
fn test_fixture_turnkey_row() {
    let inputs = csv_loader::load_from_file(&fixture_path()).unwrap();
    let input = &inputs[3];

    assert_eq!(input.service, ServiceTier::Turnkey);
    assert_eq!(input.floor_area, dec!(62.5));
    assert_eq!(input.floors, 1);
    assert_eq!(input.foundation, FoundationType::Isolated);
    assert_eq!(input.roof, RoofType::MetalSheet);

    // (18.75 + 62.5 + 18.75) m² × 5,500,000 = 550,000,000; plus 5%
    assert_eq!(compute(input).total_cost, dec!(577500000));
}

#[test]
fn test_load_nonexistent_file_returns_err() {
    let result = csv_loader::load_from_file(Path::new("/this/path/does/not/exist.csv"));

    assert!(result.is_err());
}
