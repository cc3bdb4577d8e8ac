// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `fulfillment`: Schedules, pickup locations, zones, closures, one-off dates
//! - `catalog`: Products and variants
//! - `orders`: Orders, order items, merchant fees
//! - `operators`: Operators and sessions
//!
//! Rows are converted into domain types here. Stored values go back
//! through the domain parsers so a hand-edited row cannot smuggle an
//! invalid weekday or time into the resolver.

pub mod catalog;
pub mod fulfillment;
pub mod operators;
pub mod orders;

use bakehouse_domain::DomainError;

use crate::error::PersistenceError;

/// Decodes an `INTEGER` boolean column.
pub const fn flag(value: i32) -> bool {
    value != 0
}

/// Decodes a non-negative count column (lead days, quantities).
pub fn unsigned(column: &str, value: i32) -> Result<u32, PersistenceError> {
    u32::try_from(value).map_err(|_| PersistenceError::InvalidStoredValue {
        column: column.to_string(),
        reason: format!("negative value {value}"),
    })
}

/// Tags a domain parse failure with the column it came from.
pub fn column_error(column: &str) -> impl Fn(DomainError) -> PersistenceError + '_ {
    move |err| PersistenceError::InvalidStoredValue {
        column: column.to_string(),
        reason: err.to_string(),
    }
}
