use rust_decimal::Decimal;

/// A selectable entry from one of the fixed pricing catalogs.
///
/// Every catalog is a closed enum; the `code` is the stable identifier used
/// on the command line and in CSV files, `value` is the number the
/// calculator consumes (a unit price or an area coefficient).
pub trait CatalogOption: Copy + Sized + 'static {
    /// Every option of the catalog, in display order.
    fn all() -> &'static [Self];

    /// Stable snake_case identifier.
    fn code(&self) -> &'static str;

    /// Human-readable label shown next to the option.
    fn label(&self) -> &'static str;

    /// Short explanation of when to pick this option, if any.
    fn tooltip(&self) -> Option<&'static str> {
        None
    }

    /// Unit price or area coefficient carried by the option.
    fn value(&self) -> Decimal;

    /// Looks an option up by its code (case-insensitive, surrounding
    /// whitespace ignored).
    fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::all()
            .iter()
            .copied()
            .find(|option| option.code().eq_ignore_ascii_case(code))
    }
}
