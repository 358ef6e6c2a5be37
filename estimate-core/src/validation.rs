//! Caller-side checks that run before the calculator.
//!
//! The calculator is defined for every well-formed [`EstimateInput`]; this
//! module is where raw form values are turned into one, or rejected with a
//! message the user can act on.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::{CustomerInfo, EstimateInput};

/// Mobile numbers: ten digits, a leading 0, then a mobile network prefix.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[35789][0-9]{8}$").expect("phone pattern is valid"));

pub const PHONE_DIGITS: usize = 10;
pub const MAX_FLOORS: u32 = 20;
/// Largest accepted footprint of one floor, in m². Keeps every priced amount
/// far inside `Decimal` range for the dearest tier at [`MAX_FLOORS`].
pub const MAX_FLOOR_AREA: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Reasons a quote request is refused before calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a phone number is required to view the quote")]
    MissingPhone,

    #[error("phone number may only contain digits")]
    NonNumericPhone,

    #[error("phone number is too long (more than 10 digits)")]
    PhoneTooLong,

    #[error("phone number is not valid (must have 10 valid digits)")]
    InvalidPhone,

    #[error("floor area must be above 0 and at most 100000 m², got {0}")]
    InvalidFloorArea(Decimal),

    #[error("number of floors must be between 1 and 20, got {0}")]
    InvalidFloorCount(u32),
}

/// Everything the quote form collects, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub input: EstimateInput,
    pub customer: CustomerInfo,
}

impl EstimateRequest {
    pub fn new(
        input: EstimateInput,
        customer: CustomerInfo,
    ) -> Self {
        Self { input, customer }
    }

    /// Checks the contact phone and the building parameters, returning the
    /// input the calculator may run on.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found; the phone is checked
    /// before the building parameters.
    ///
    /// # Example
    ///
    /// ```
    /// use estimate_core::{CustomerInfo, EstimateInput, EstimateRequest, ValidationError};
    ///
    /// let mut request = EstimateRequest::new(EstimateInput::default(), CustomerInfo::default());
    /// assert_eq!(request.validate(), Err(ValidationError::MissingPhone));
    ///
    /// request.customer.phone = "0912345678".to_string();
    /// assert_eq!(request.validate(), Ok(EstimateInput::default()));
    /// ```
    pub fn validate(&self) -> Result<EstimateInput, ValidationError> {
        validate_phone(&self.customer.phone)
            .and_then(|()| validate_building(&self.input))
            .inspect_err(|error| warn!(%error, "rejected quote request"))?;
        Ok(self.input.clone())
    }
}

/// Validates a mobile phone number.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err(ValidationError::MissingPhone);
    }
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NonNumericPhone);
    }
    if phone.len() > PHONE_DIGITS {
        return Err(ValidationError::PhoneTooLong);
    }
    if !PHONE_PATTERN.is_match(phone) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

/// Validates the numeric building parameters.
pub fn validate_building(input: &EstimateInput) -> Result<(), ValidationError> {
    if input.floor_area <= Decimal::ZERO || input.floor_area > MAX_FLOOR_AREA {
        return Err(ValidationError::InvalidFloorArea(input.floor_area));
    }
    if !(1..=MAX_FLOORS).contains(&input.floors) {
        return Err(ValidationError::InvalidFloorCount(input.floors));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::compute;
    use crate::models::{BasementType, FoundationType, RoofType, ServiceTier};

    fn request_with_phone(phone: &str) -> EstimateRequest {
        EstimateRequest {
            customer: CustomerInfo {
                phone: phone.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    // =========================================================================
    // validate_phone tests
    // =========================================================================

    #[test]
    fn accepts_every_mobile_prefix() {
        for phone in ["0312345678", "0512345678", "0712345678", "0812345678", "0912345678"] {
            assert_eq!(validate_phone(phone), Ok(()), "phone {phone}");
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(validate_phone("  0912345678 "), Ok(()));
    }

    #[test]
    fn rejects_empty_phone() {
        assert_eq!(validate_phone(""), Err(ValidationError::MissingPhone));
        assert_eq!(validate_phone("   "), Err(ValidationError::MissingPhone));
    }

    #[test]
    fn rejects_non_digits() {
        assert_eq!(
            validate_phone("091-234-5678"),
            Err(ValidationError::NonNumericPhone)
        );
        assert_eq!(
            validate_phone("+84912345678"),
            Err(ValidationError::NonNumericPhone)
        );
    }

    #[test]
    fn rejects_more_than_ten_digits() {
        assert_eq!(
            validate_phone("09123456789"),
            Err(ValidationError::PhoneTooLong)
        );
    }

    #[test]
    fn rejects_short_numbers() {
        assert_eq!(validate_phone("091234567"), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn rejects_unknown_prefixes() {
        for phone in ["0112345678", "0212345678", "0412345678", "0612345678", "1912345678"] {
            assert_eq!(
                validate_phone(phone),
                Err(ValidationError::InvalidPhone),
                "phone {phone}"
            );
        }
    }

    // =========================================================================
    // validate_building tests
    // =========================================================================

    #[test]
    fn rejects_zero_and_negative_area() {
        for area in [dec!(0), dec!(-10)] {
            let input = EstimateInput {
                floor_area: area,
                ..Default::default()
            };

            assert_eq!(
                validate_building(&input),
                Err(ValidationError::InvalidFloorArea(area))
            );
        }
    }

    #[test]
    fn rejects_area_above_limit() {
        for area in [dec!(100000.01), dec!(10000000000000000000000)] {
            let input = EstimateInput {
                floor_area: area,
                floors: MAX_FLOORS,
                ..Default::default()
            };

            assert_eq!(
                validate_building(&input),
                Err(ValidationError::InvalidFloorArea(area))
            );
        }
    }

    #[test]
    fn largest_accepted_building_prices_without_overflow() {
        let input = EstimateInput {
            service: ServiceTier::Turnkey,
            floor_area: MAX_FLOOR_AREA,
            floors: MAX_FLOORS,
            foundation: FoundationType::Raft,
            roof: RoofType::TiledConcrete,
            basement: BasementType::Full,
            has_contingency: true,
            has_attic: true,
        };

        assert_eq!(validate_building(&input), Ok(()));
        let result = compute(&input);
        let items_total: Decimal = result.items.iter().map(|item| item.total).sum();
        assert_eq!(result.total_cost, items_total);
    }

    #[test]
    fn rejects_floor_count_outside_range() {
        for floors in [0, 21] {
            let input = EstimateInput {
                floors,
                ..Default::default()
            };

            assert_eq!(
                validate_building(&input),
                Err(ValidationError::InvalidFloorCount(floors))
            );
        }
    }

    #[test]
    fn accepts_floor_count_bounds() {
        for floors in [1, 20] {
            let input = EstimateInput {
                floors,
                ..Default::default()
            };

            assert_eq!(validate_building(&input), Ok(()));
        }
    }

    // =========================================================================
    // EstimateRequest::validate tests
    // =========================================================================

    #[test]
    fn phone_is_checked_before_building() {
        let mut request = request_with_phone("");
        request.input.floors = 0;

        assert_eq!(request.validate(), Err(ValidationError::MissingPhone));
    }

    #[test]
    fn valid_request_yields_its_input() {
        let request = request_with_phone("0987654321");

        assert_eq!(request.validate(), Ok(request.input.clone()));
    }

    #[test]
    fn error_messages_are_user_facing() {
        assert_eq!(
            ValidationError::InvalidPhone.to_string(),
            "phone number is not valid (must have 10 valid digits)"
        );
        assert_eq!(
            ValidationError::InvalidFloorCount(25).to_string(),
            "number of floors must be between 1 and 20, got 25"
        );
    }
}
