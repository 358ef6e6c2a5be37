use estimate_core::CatalogOption;
use estimate_core::calculations::format_vnd;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
pub enum ParseDecimalError {
    #[error("invalid decimal '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    /// A comma that is not a thousands separator, such as `45,5`.
    #[error("invalid decimal '{0}': use '.' as the decimal mark, e.g. 45.5")]
    MisplacedComma(String),
}

/// Commas are only accepted as thousands separators: every group after the
/// first has exactly three digits and none follow the decimal point.
fn is_grouped(s: &str) -> bool {
    let whole = match s.split_once('.') {
        Some((_, fraction)) if fraction.contains(',') => return false,
        Some((whole, _)) => whole,
        None => s,
    };
    let whole = whole.strip_prefix('-').unwrap_or(whole);
    let mut groups = whole.split(',');
    let first_ok = groups
        .next()
        .is_some_and(|g| (1..=3).contains(&g.len()) && g.chars().all(|c| c.is_ascii_digit()));
    first_ok && groups.all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()))
}

/// Normalizes input for decimal parsing: trims whitespace and removes
/// thousands separators.
fn normalize_decimal_input(s: &str) -> Result<String, ParseDecimalError> {
    let trimmed = s.trim();
    if !trimmed.contains(',') {
        return Ok(trimmed.to_string());
    }
    if !is_grouped(trimmed) {
        return Err(ParseDecimalError::MisplacedComma(s.to_string()));
    }
    Ok(trimmed.replace(',', ""))
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.5"`). Any other comma,
/// such as a decimal comma in `"45,5"`, is rejected rather than dropped.
/// Empty or whitespace-only input is treated as 0, which validation then
/// rejects as a floor area.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s)?;
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError::Invalid {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a catalog code for a command-line argument, listing the valid
/// codes on failure.
pub fn catalog_arg<T: CatalogOption>(s: &str) -> Result<T, String> {
    T::parse(s).ok_or_else(|| {
        let codes: Vec<_> = T::all().iter().map(|option| option.code()).collect();
        format!("unknown option '{}'; expected one of: {}", s, codes.join(", "))
    })
}

/// Formats an optional amount as dong, using "—" when `None`.
pub fn opt_vnd_display(d: Option<Decimal>) -> String {
    d.map(format_vnd).unwrap_or_else(|| "—".to_string())
}
