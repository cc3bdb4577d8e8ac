// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;

use crate::order::FulfillmentMethod;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Weekday index outside `0..=6` (Sunday = 0).
    InvalidWeekday(i32),
    /// Time-of-day string is not a valid `HH:MM` value.
    InvalidTime {
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Failed to parse a `YYYY-MM-DD` date.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Timezone name is not a known IANA zone.
    InvalidTimezone(String),
    /// A local time could not be mapped to an instant in the business timezone.
    UnresolvableLocalTime {
        /// The calendar date.
        date: NaiveDate,
        /// The wall-clock time.
        time: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// ZIP code is not five digits (optionally followed by `-NNNN`).
    InvalidZipCode(String),
    /// A required name field is empty.
    InvalidName(String),
    /// Lead time is out of range.
    InvalidLeadTime(u32),
    /// Money amount is negative.
    InvalidAmount {
        /// The field carrying the amount.
        field: String,
        /// The rejected amount in cents.
        cents: i64,
    },
    /// Pickup location must accept pickup on at least one weekday.
    NoPickupDays,
    /// Delivery zone must contain at least one ZIP code.
    EmptyZipCodeSet,
    /// A time window override is inconsistent.
    InvalidTimeWindow {
        /// Description of the problem.
        reason: String,
    },
    /// A closure already exists for the date.
    DuplicateClosureDate(NaiveDate),
    /// A one-off date already exists for the `(date, method)` pair.
    DuplicateOneOffDate {
        /// The date.
        date: NaiveDate,
        /// The fulfillment method.
        method: FulfillmentMethod,
    },
    /// Unknown fulfillment method string.
    InvalidFulfillmentMethod(String),
    /// Unknown order status string.
    InvalidOrderStatus(String),
    /// Unknown fulfillment status string.
    InvalidFulfillmentStatus(String),
    /// Unknown payment status string.
    InvalidPaymentStatus(String),
    /// The requested status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// A fulfillment status from the other method's track was requested.
    FulfillmentStatusMismatch {
        /// The requested status.
        status: String,
        /// The order's fulfillment method.
        method: FulfillmentMethod,
    },
    /// Cart has no lines.
    EmptyCart,
    /// Cart line quantity must be positive.
    InvalidQuantity {
        /// The product on the offending line.
        product_id: i64,
        /// The requested quantity.
        quantity: u32,
    },
    /// Customer field failed validation.
    InvalidCustomerField {
        /// The field name.
        field: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Tax rate is above 100%.
    InvalidTaxRate(u32),
}

impl std::fmt::Display for DomainError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWeekday(value) => {
                write!(f, "Invalid weekday: {value}. Must be between 0 (Sunday) and 6")
            }
            Self::InvalidTime { value, reason } => {
                write!(f, "Invalid time '{value}': {reason}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidTimezone(name) => write!(f, "Invalid timezone: {name}"),
            Self::UnresolvableLocalTime { date, time } => {
                write!(
                    f,
                    "Could not resolve local time {time} on {date} in the business timezone"
                )
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::InvalidZipCode(zip) => {
                write!(f, "Invalid ZIP code '{zip}': expected 5 digits")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidLeadTime(days) => {
                write!(f, "Invalid lead time: {days} days. Must be at most 365")
            }
            Self::InvalidAmount { field, cents } => {
                write!(f, "Invalid amount for {field}: {cents} cents")
            }
            Self::NoPickupDays => {
                write!(f, "Pickup location must accept pickup on at least one day")
            }
            Self::EmptyZipCodeSet => {
                write!(f, "Delivery zone must contain at least one ZIP code")
            }
            Self::InvalidTimeWindow { reason } => write!(f, "Invalid time window: {reason}"),
            Self::DuplicateClosureDate(date) => {
                write!(f, "A calendar closure already exists for {date}")
            }
            Self::DuplicateOneOffDate { date, method } => {
                write!(f, "A one-off {method} date already exists for {date}")
            }
            Self::InvalidFulfillmentMethod(value) => {
                write!(f, "Invalid fulfillment method: {value}")
            }
            Self::InvalidOrderStatus(value) => write!(f, "Invalid order status: {value}"),
            Self::InvalidFulfillmentStatus(value) => {
                write!(f, "Invalid fulfillment status: {value}")
            }
            Self::InvalidPaymentStatus(value) => write!(f, "Invalid payment status: {value}"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition from '{from}' to '{to}': {reason}")
            }
            Self::FulfillmentStatusMismatch { status, method } => {
                write!(f, "Status '{status}' does not apply to {method} orders")
            }
            Self::EmptyCart => write!(f, "Cart is empty"),
            Self::InvalidQuantity {
                product_id,
                quantity,
            } => {
                write!(
                    f,
                    "Invalid quantity {quantity} for product {product_id}. Must be at least 1"
                )
            }
            Self::InvalidCustomerField { field, reason } => {
                write!(f, "Invalid customer {field}: {reason}")
            }
            Self::InvalidTaxRate(bps) => {
                write!(f, "Invalid tax rate: {bps} basis points. Must be at most 10000")
            }
        }
    }
}

impl std::error::Error for DomainError {}
