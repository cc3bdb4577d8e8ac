// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A normalized five-digit US ZIP code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZipCode(String);

impl ZipCode {
    /// Parses a ZIP code.
    ///
    /// Leading and trailing whitespace is ignored. `NNNNN` and `NNNNN-NNNN`
    /// are accepted; the ZIP+4 suffix is dropped.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidZipCode` for any other shape.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        let (base, suffix) = match trimmed.split_once('-') {
            Some((base, suffix)) => (base, Some(suffix)),
            None => (trimmed, None),
        };

        let all_digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());

        if !all_digits(base, 5) || suffix.is_some_and(|s| !all_digits(s, 4)) {
            return Err(DomainError::InvalidZipCode(value.to_string()));
        }

        Ok(Self(base.to_string()))
    }

    /// Returns the five-digit code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ZipCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A priced delivery area defined by a set of ZIP codes.
///
/// ZIP sets may overlap between zones; the fee calculator resolves
/// the overlap by priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryZone {
    pub id: i64,
    pub name: String,
    pub zip_codes: BTreeSet<ZipCode>,
    pub fee_cents: i64,
    /// Higher wins.
    pub priority: i32,
    pub is_active: bool,
}

impl DeliveryZone {
    /// Returns true if the zone covers `zip`.
    #[must_use]
    pub fn contains(&self, zip: &ZipCode) -> bool {
        self.zip_codes.contains(zip)
    }
}
