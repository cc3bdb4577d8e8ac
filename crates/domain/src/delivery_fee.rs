// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Zone-based delivery fee lookup.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::order::FulfillmentMethod;
use crate::zone::{DeliveryZone, ZipCode};

/// The zone a quote was priced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedZone {
    pub id: i64,
    pub name: String,
}

/// One matching zone, as shown to admins when diagnosing overlaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneMatch {
    pub zone_id: i64,
    pub name: String,
    pub priority: i32,
    pub fee_cents: i64,
    pub selected: bool,
}

/// Result of a fee lookup.
///
/// `applied_zone == None` means delivery is unavailable for the ZIP code.
/// Callers must not treat that as a free delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub fee_cents: i64,
    pub applied_zone: Option<AppliedZone>,
    pub breakdown: Vec<ZoneMatch>,
}

impl FeeQuote {
    /// A quote for fulfillment that never carries a fee.
    #[must_use]
    pub const fn free() -> Self {
        Self {
            fee_cents: 0,
            applied_zone: None,
            breakdown: Vec::new(),
        }
    }

    /// Returns true if a zone covers the address.
    #[must_use]
    pub const fn is_deliverable(&self) -> bool {
        self.applied_zone.is_some()
    }
}

/// Prices delivery to `zip`.
///
/// Among active zones containing the ZIP code, the highest priority wins;
/// equal priorities go to the lowest zone id.
#[must_use]
pub fn quote_delivery_fee(zones: &[DeliveryZone], zip: &ZipCode) -> FeeQuote {
    let mut matches: Vec<&DeliveryZone> = zones
        .iter()
        .filter(|z| z.is_active && z.contains(zip))
        .collect();
    matches.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.id.cmp(&b.id)));

    let Some(winner) = matches.first() else {
        return FeeQuote::free();
    };

    FeeQuote {
        fee_cents: winner.fee_cents,
        applied_zone: Some(AppliedZone {
            id: winner.id,
            name: winner.name.clone(),
        }),
        breakdown: matches
            .iter()
            .map(|z| ZoneMatch {
                zone_id: z.id,
                name: z.name.clone(),
                priority: z.priority,
                fee_cents: z.fee_cents,
                selected: z.id == winner.id,
            })
            .collect(),
    }
}

/// Prices fulfillment by method. Pickup is always free.
///
/// # Errors
///
/// Returns `DomainError::InvalidZipCode` if a delivery ZIP code is malformed.
pub fn quote_fulfillment_fee(
    method: FulfillmentMethod,
    zones: &[DeliveryZone],
    zip: &str,
) -> Result<FeeQuote, DomainError> {
    match method {
        FulfillmentMethod::Pickup => Ok(FeeQuote::free()),
        FulfillmentMethod::Delivery => {
            let zip: ZipCode = ZipCode::parse(zip)?;
            Ok(quote_delivery_fee(zones, &zip))
        }
    }
}
