// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order lifecycle states and transition logic.
//!
//! An order carries three independent status fields:
//!
//! - `OrderStatus`: the commercial lifecycle, a strict state machine
//! - `FulfillmentStatus`: advisory progress on the delivery or pickup track
//! - `PaymentStatus`: what the payment provider has reported
//!
//! Fulfillment method is a single field; delivery-only and pickup-only
//! statuses are checked against it.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentMethod {
    /// Delivered to the customer's address.
    Delivery,
    /// Collected by the customer at a pickup location.
    Pickup,
}

impl FulfillmentMethod {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Delivery => "delivery",
            Self::Pickup => "pickup",
        }
    }
}

impl FromStr for FulfillmentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delivery" => Ok(Self::Delivery),
            "pickup" => Ok(Self::Pickup),
            _ => Err(DomainError::InvalidFulfillmentMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for FulfillmentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Commercial lifecycle of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created, awaiting payment confirmation.
    Pending,
    /// Paid (or manually entered) and accepted.
    Confirmed,
    /// Being baked.
    InProduction,
    /// Waiting at the pickup location.
    ReadyForPickup,
    /// With the driver.
    OutForDelivery,
    /// Handed to the customer.
    Completed,
    /// Cancelled by an admin.
    Cancelled,
    /// Payment was declined or abandoned.
    PaymentFailed,
}

impl OrderStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProduction => "in_production",
            Self::ReadyForPickup => "ready_for_pickup",
            Self::OutForDelivery => "out_for_delivery",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::PaymentFailed => "payment_failed",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "in_production" => Ok(Self::InProduction),
            "ready_for_pickup" => Ok(Self::ReadyForPickup),
            "out_for_delivery" => Ok(Self::OutForDelivery),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "payment_failed" => Ok(Self::PaymentFailed),
            _ => Err(DomainError::InvalidOrderStatus(s.to_string())),
        }
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::PaymentFailed)
    }

    /// Returns true if orders in this status belong on production and route lists.
    #[must_use]
    pub const fn is_fulfillable(&self) -> bool {
        !matches!(self, Self::Cancelled | Self::PaymentFailed)
    }

    /// Validates a transition for an order with the given fulfillment method.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is not
    /// part of the lifecycle, or targets a status that belongs to the other
    /// fulfillment method.
    pub fn validate_transition(
        &self,
        new_status: Self,
        method: FulfillmentMethod,
    ) -> Result<(), DomainError> {
        let reject = |reason: &str| DomainError::InvalidStatusTransition {
            from: self.as_str().to_string(),
            to: new_status.as_str().to_string(),
            reason: reason.to_string(),
        };

        if self.is_terminal() {
            return Err(reject("cannot transition from terminal state"));
        }

        let valid: bool = match self {
            Self::Pending => matches!(
                new_status,
                Self::Confirmed | Self::Cancelled | Self::PaymentFailed
            ),
            Self::Confirmed => matches!(new_status, Self::InProduction | Self::Cancelled),
            Self::InProduction => match method {
                FulfillmentMethod::Pickup => new_status == Self::ReadyForPickup,
                FulfillmentMethod::Delivery => new_status == Self::OutForDelivery,
            },
            Self::ReadyForPickup | Self::OutForDelivery => new_status == Self::Completed,
            Self::Completed | Self::Cancelled | Self::PaymentFailed => false,
        };

        if valid {
            Ok(())
        } else if self == &Self::InProduction
            && matches!(new_status, Self::ReadyForPickup | Self::OutForDelivery)
        {
            Err(reject(&format!("not applicable to {method} orders")))
        } else {
            Err(reject("transition not permitted by order lifecycle rules"))
        }
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Advisory progress of the physical hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentStatus {
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    ReadyForPickup,
    PickedUp,
}

impl FulfillmentStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::ReadyForPickup => "ready_for_pickup",
            Self::PickedUp => "picked_up",
        }
    }

    /// Returns true if the status is part of the track for `method`.
    #[must_use]
    pub const fn belongs_to(&self, method: FulfillmentMethod) -> bool {
        match self {
            Self::Pending | Self::Confirmed | Self::Preparing => true,
            Self::OutForDelivery | Self::Delivered => {
                matches!(method, FulfillmentMethod::Delivery)
            }
            Self::ReadyForPickup | Self::PickedUp => matches!(method, FulfillmentMethod::Pickup),
        }
    }

    /// Checks that the status may be set on an order with the given method.
    ///
    /// The track is advisory: any value on the order's own track is accepted,
    /// in any order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::FulfillmentStatusMismatch` for a status from the
    /// other track.
    pub fn validate_for(&self, method: FulfillmentMethod) -> Result<(), DomainError> {
        if self.belongs_to(method) {
            Ok(())
        } else {
            Err(DomainError::FulfillmentStatusMismatch {
                status: self.as_str().to_string(),
                method,
            })
        }
    }
}

impl FromStr for FulfillmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "preparing" => Ok(Self::Preparing),
            "out_for_delivery" => Ok(Self::OutForDelivery),
            "delivered" => Ok(Self::Delivered),
            "ready_for_pickup" => Ok(Self::ReadyForPickup),
            "picked_up" => Ok(Self::PickedUp),
            _ => Err(DomainError::InvalidFulfillmentStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for FulfillmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the payment provider has reported for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
    /// Entered by an admin without going through a provider.
    Manual,
}

impl PaymentStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
            Self::Manual => "manual",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            "manual" => Ok(Self::Manual),
            _ => Err(DomainError::InvalidPaymentStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
