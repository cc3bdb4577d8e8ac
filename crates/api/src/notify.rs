// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Customer and staff notifications.
//!
//! Delivery of messages is best effort: a failed notification is logged and
//! never undoes the order change that triggered it.

use bakehouse_domain::{FulfillmentMethod, FulfillmentStatus};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

/// A message to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Sent to the customer when an order is placed.
    OrderConfirmation {
        order_number: String,
        customer_name: String,
        customer_email: String,
        fulfillment_method: FulfillmentMethod,
        fulfillment_date: NaiveDate,
        total_cents: i64,
    },
    /// Sent to the bakery when an order is placed.
    NewOrderAlert {
        order_number: String,
        customer_name: String,
        total_cents: i64,
    },
    /// Sent to the customer when an admin records fulfillment progress.
    FulfillmentUpdate {
        order_number: String,
        customer_email: String,
        status: FulfillmentStatus,
    },
}

impl Notification {
    /// Short name used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::OrderConfirmation { .. } => "order_confirmation",
            Self::NewOrderAlert { .. } => "new_order_alert",
            Self::FulfillmentUpdate { .. } => "fulfillment_update",
        }
    }
}

/// Why a notification could not be sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to send {kind}: {reason}")]
pub struct NotifyError {
    pub kind: String,
    pub reason: String,
}

/// Outbound message channel, e.g. an email service.
pub trait Notifier: Send + Sync {
    /// Sends one notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the message could not be handed off.
    fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Writes notifications to the log instead of sending them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        info!(kind = notification.kind(), ?notification, "Notification");
        Ok(())
    }
}

/// Sends `notification`, logging and swallowing any failure.
///
/// Returns true if the notifier accepted the message.
pub fn notify_best_effort(notifier: &dyn Notifier, notification: &Notification) -> bool {
    match notifier.send(notification) {
        Ok(()) => true,
        Err(err) => {
            warn!(kind = notification.kind(), error = %err, "Notification failed");
            false
        }
    }
}
