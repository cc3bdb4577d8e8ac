// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::order::FulfillmentMethod;

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub quantity_available: i64,
    pub is_active: bool,
    pub available_for_delivery: bool,
    pub available_for_pickup: bool,
    /// Extra preparation days required on top of the schedule's lead time.
    pub lead_time_days: Option<u32>,
}

impl Product {
    /// Returns true if the product can be fulfilled by `method`.
    #[must_use]
    pub const fn allows(&self, method: FulfillmentMethod) -> bool {
        match method {
            FulfillmentMethod::Delivery => self.available_for_delivery,
            FulfillmentMethod::Pickup => self.available_for_pickup,
        }
    }

    /// Returns true if the product is active and allows `method`.
    #[must_use]
    pub const fn is_offerable(&self, method: FulfillmentMethod) -> bool {
        self.is_active && self.allows(method)
    }
}

/// A size or flavor of a product with its own price and stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductVariant {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub price_cents: i64,
    pub quantity_available: i64,
    pub is_active: bool,
}
