// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bakehouse_domain::{FulfillmentStatus, OrderStatus};

/// An admin's intent to change an order, as data only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the order along its commercial lifecycle.
    UpdateOrderStatus {
        /// The requested status.
        status: OrderStatus,
    },
    /// Record progress of the physical hand-off.
    UpdateFulfillmentStatus {
        /// The requested status.
        status: FulfillmentStatus,
        /// Whether the customer should be told.
        notify_customer: bool,
    },
}

impl Command {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UpdateOrderStatus { .. } => "UpdateOrderStatus",
            Self::UpdateFulfillmentStatus { .. } => "UpdateFulfillmentStatus",
        }
    }
}
