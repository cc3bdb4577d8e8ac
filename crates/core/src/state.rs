// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bakehouse_domain::{FulfillmentMethod, FulfillmentStatus, OrderStatus};

/// The status-bearing fields of a stored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderState {
    pub order_id: i64,
    pub order_number: String,
    pub fulfillment_method: FulfillmentMethod,
    pub status: OrderStatus,
    pub fulfillment_status: FulfillmentStatus,
}

impl OrderState {
    /// Summarizes the state for logs.
    #[must_use]
    pub fn to_snapshot(&self) -> String {
        format!(
            "order={},method={},status={},fulfillment={}",
            self.order_number, self.fulfillment_method, self.status, self.fulfillment_status
        )
    }
}

/// The result of a successful transition.
///
/// Transitions either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub before: OrderState,
    pub after: OrderState,
    /// Set when the admin asked for the customer to be told.
    pub notify_customer: bool,
    /// Human-readable description of the change.
    pub description: String,
}

impl TransitionResult {
    /// Returns true if the transition changed nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }
}
