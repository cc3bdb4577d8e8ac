// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! ## Module Organization
//!
//! - `fulfillment`: Schedule, location, zone, closure and one-off CRUD
//! - `catalog`: Product and variant CRUD
//! - `orders`: Checkout commit and status updates
//! - `operators`: Operator and session mutations

pub mod catalog;
pub mod fulfillment;
pub mod operators;
pub mod orders;

use crate::error::PersistenceError;

/// Encodes a non-negative count for an `INTEGER` column.
pub fn count_column(column: &str, value: u32) -> Result<i32, PersistenceError> {
    i32::try_from(value).map_err(|_| PersistenceError::InvalidStoredValue {
        column: column.to_string(),
        reason: format!("{value} does not fit in an INTEGER column"),
    })
}

/// Maps an update or delete that touched no row to `NotFound`.
pub fn require_row(rows_affected: usize, entity: &str, id: i64) -> Result<(), PersistenceError> {
    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("{entity} {id}")));
    }
    Ok(())
}
