// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;

use crate::cart::CartLine;
use crate::error::DomainError;
use crate::order::FulfillmentMethod;
use crate::product::{Product, ProductVariant};
use crate::schedule::{CalendarClosure, DeliverySchedule, OneOffDate, PickupLocation};
use crate::zone::DeliveryZone;

/// Upper bound on any configured lead time.
pub const MAX_LEAD_TIME_DAYS: u32 = 365;

fn require_name(value: &str, what: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidName(format!("{what} name cannot be empty")));
    }
    Ok(())
}

const fn require_lead_time(days: u32) -> Result<(), DomainError> {
    if days > MAX_LEAD_TIME_DAYS {
        return Err(DomainError::InvalidLeadTime(days));
    }
    Ok(())
}

/// Validates a delivery schedule's field constraints.
///
/// Weekday and time fields are already typed; this checks the name and
/// lead time.
///
/// # Errors
///
/// Returns an error if the name is empty or the lead time exceeds one year.
pub fn validate_delivery_schedule(schedule: &DeliverySchedule) -> Result<(), DomainError> {
    require_name(&schedule.name, "Schedule")?;
    require_lead_time(schedule.lead_time_days)
}

/// Validates a pickup location.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - No pickup days are set
/// - The lead time exceeds one year
pub fn validate_pickup_location(location: &PickupLocation) -> Result<(), DomainError> {
    require_name(&location.name, "Location")?;
    if location.pickup_days.is_empty() {
        return Err(DomainError::NoPickupDays);
    }
    require_lead_time(location.lead_time_days)
}

/// Validates a delivery zone.
///
/// # Errors
///
/// Returns an error if the name is empty, the ZIP set is empty, or the fee
/// is negative.
pub fn validate_delivery_zone(zone: &DeliveryZone) -> Result<(), DomainError> {
    require_name(&zone.name, "Zone")?;
    if zone.zip_codes.is_empty() {
        return Err(DomainError::EmptyZipCodeSet);
    }
    if zone.fee_cents < 0 {
        return Err(DomainError::InvalidAmount {
            field: String::from("fee_cents"),
            cents: zone.fee_cents,
        });
    }
    Ok(())
}

fn require_non_negative(field: &str, cents: i64) -> Result<(), DomainError> {
    if cents < 0 {
        return Err(DomainError::InvalidAmount {
            field: field.to_string(),
            cents,
        });
    }
    Ok(())
}

/// Validates a catalog product.
///
/// # Errors
///
/// Returns an error if the name is empty, the price or stock is negative,
/// or the lead time exceeds one year.
pub fn validate_product(product: &Product) -> Result<(), DomainError> {
    require_name(&product.name, "Product")?;
    require_non_negative("price_cents", product.price_cents)?;
    require_non_negative("quantity_available", product.quantity_available)?;
    if let Some(days) = product.lead_time_days {
        require_lead_time(days)?;
    }
    Ok(())
}

/// Validates a product variant.
///
/// # Errors
///
/// Returns an error if the name is empty or the price or stock is negative.
pub fn validate_variant(variant: &ProductVariant) -> Result<(), DomainError> {
    require_name(&variant.name, "Variant")?;
    require_non_negative("price_cents", variant.price_cents)?;
    require_non_negative("quantity_available", variant.quantity_available)
}

/// Validates that no other closure exists for `date`.
///
/// # Arguments
///
/// * `date` - The closure date being written
/// * `existing` - All stored closures
/// * `exclude_id` - The closure being updated, if any
///
/// # Errors
///
/// Returns `DomainError::DuplicateClosureDate` on conflict.
pub fn validate_closure_unique(
    date: NaiveDate,
    existing: &[CalendarClosure],
    exclude_id: Option<i64>,
) -> Result<(), DomainError> {
    let conflict: bool = existing
        .iter()
        .any(|c| c.closure_date == date && Some(c.id) != exclude_id);
    if conflict {
        return Err(DomainError::DuplicateClosureDate(date));
    }
    Ok(())
}

/// Validates a one-off date's overrides.
///
/// # Errors
///
/// Returns an error if only one end of the time window is set, the window
/// ends before it starts, or the lead time override exceeds one year.
pub fn validate_one_off(one_off: &OneOffDate) -> Result<(), DomainError> {
    match (one_off.time_window_start, one_off.time_window_end) {
        (Some(start), Some(end)) if end <= start => {
            return Err(DomainError::InvalidTimeWindow {
                reason: String::from("end must be after start"),
            });
        }
        (Some(_), None) | (None, Some(_)) => {
            return Err(DomainError::InvalidTimeWindow {
                reason: String::from("start and end must be set together"),
            });
        }
        _ => {}
    }
    if let Some(days) = one_off.lead_time_days {
        require_lead_time(days)?;
    }
    Ok(())
}

/// Validates that no other one-off date exists for `(date, method)`.
///
/// # Errors
///
/// Returns `DomainError::DuplicateOneOffDate` on conflict.
pub fn validate_one_off_unique(
    date: NaiveDate,
    method: FulfillmentMethod,
    existing: &[OneOffDate],
    exclude_id: Option<i64>,
) -> Result<(), DomainError> {
    let conflict: bool = existing
        .iter()
        .any(|o| o.date == date && o.method == method && Some(o.id) != exclude_id);
    if conflict {
        return Err(DomainError::DuplicateOneOffDate { date, method });
    }
    Ok(())
}

/// Validates customer contact fields.
///
/// # Errors
///
/// Returns `DomainError::InvalidCustomerField` if the name or phone is
/// empty, or the email is not of the form `local@domain`.
pub fn validate_customer(name: &str, email: &str, phone: &str) -> Result<(), DomainError> {
    let invalid = |field: &str, reason: &str| DomainError::InvalidCustomerField {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name", "cannot be empty"));
    }

    let email: &str = email.trim();
    let well_formed: bool = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed || email.contains(char::is_whitespace) {
        return Err(invalid("email", "must look like name@example.com"));
    }

    if phone.trim().is_empty() {
        return Err(invalid("phone", "cannot be empty"));
    }
    Ok(())
}

/// Validates cart shape: non-empty with positive quantities.
///
/// # Errors
///
/// Returns `DomainError::EmptyCart` or `DomainError::InvalidQuantity`.
pub fn validate_cart(lines: &[CartLine]) -> Result<(), DomainError> {
    if lines.is_empty() {
        return Err(DomainError::EmptyCart);
    }
    if let Some(line) = lines.iter().find(|l| l.quantity == 0) {
        return Err(DomainError::InvalidQuantity {
            product_id: line.product_id,
            quantity: line.quantity,
        });
    }
    Ok(())
}
