// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use bakehouse::CoreError;
use bakehouse_domain::{DomainError, format_date};
use bakehouse_payments::PaymentError;
use bakehouse_persistence::PersistenceError;
use tracing::error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain, core, persistence and payment errors
/// and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A business rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Not enough stock to fill the cart.
    InsufficientInventory {
        /// A human-readable description of the shortfall.
        message: String,
    },
    /// The card was declined or the processor could not be reached.
    PaymentFailed {
        /// Why the payment failed.
        reason: String,
    },
    /// The order cannot be delivered or picked up as requested.
    NoFulfillmentAvailable {
        /// A human-readable description.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InsufficientInventory { message } => {
                write!(f, "Insufficient inventory: {message}")
            }
            Self::PaymentFailed { reason } => write!(f, "Payment failed: {reason}"),
            Self::NoFulfillmentAvailable { message } => {
                write!(f, "Fulfillment unavailable: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidWeekday(_) => invalid("weekday", message),
        DomainError::InvalidTime { .. } => invalid("time", message),
        DomainError::DateParseError { .. } => invalid("date", message),
        DomainError::InvalidTimezone(_) => invalid("timezone", message),
        DomainError::InvalidZipCode(_) => invalid("zip", message),
        DomainError::InvalidName(_) => invalid("name", message),
        DomainError::InvalidLeadTime(_) => invalid("lead_time_days", message),
        DomainError::InvalidAmount { field, .. } => invalid(&field, message),
        DomainError::NoPickupDays => invalid("pickup_days", message),
        DomainError::EmptyZipCodeSet => invalid("zip_codes", message),
        DomainError::InvalidTimeWindow { .. } => invalid("time_window", message),
        DomainError::InvalidFulfillmentMethod(_) => invalid("fulfillment_method", message),
        DomainError::InvalidOrderStatus(_) => invalid("status", message),
        DomainError::InvalidFulfillmentStatus(_) => invalid("fulfillment_status", message),
        DomainError::InvalidPaymentStatus(_) => invalid("payment_status", message),
        DomainError::EmptyCart => invalid("items", message),
        DomainError::InvalidQuantity { .. } => invalid("quantity", message),
        DomainError::InvalidCustomerField { field, .. } => invalid(&field, message),
        DomainError::InvalidTaxRate(_) => invalid("tax_rate_bps", message),
        DomainError::DuplicateClosureDate(date) => ApiError::DomainRuleViolation {
            rule: String::from("unique_closure_date"),
            message: format!("A closure already exists on {}", format_date(date)),
        },
        DomainError::DuplicateOneOffDate { date, method } => ApiError::DomainRuleViolation {
            rule: String::from("unique_one_off_date"),
            message: format!(
                "A one-off {method} date already exists on {}",
                format_date(date)
            ),
        },
        DomainError::InvalidStatusTransition { .. } => ApiError::DomainRuleViolation {
            rule: String::from("order_status_transition"),
            message,
        },
        DomainError::FulfillmentStatusMismatch { .. } => ApiError::DomainRuleViolation {
            rule: String::from("fulfillment_status_track"),
            message,
        },
        DomainError::UnresolvableLocalTime { .. } | DomainError::DateArithmeticOverflow { .. } => {
            ApiError::Internal { message }
        }
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    let message: String = err.to_string();
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::ProductNotFound(_) | CoreError::VariantNotFound { .. } => {
            ApiError::ResourceNotFound {
                resource_type: String::from("Product"),
                message,
            }
        }
        CoreError::PickupLocationNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Pickup location"),
            message,
        },
        CoreError::InsufficientInventory { .. } => ApiError::InsufficientInventory { message },
        CoreError::ProductNotOffered { .. }
        | CoreError::DateNotOffered { .. }
        | CoreError::NoDeliveryZone(_) => ApiError::NoFulfillmentAvailable { message },
        CoreError::OrderClosed { .. } => ApiError::DomainRuleViolation {
            rule: String::from("order_closed"),
            message,
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Storage failures are logged here and surface as `Internal`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(what) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: format!("{what} does not exist"),
        },
        PersistenceError::UniqueViolation(detail) => ApiError::DomainRuleViolation {
            rule: String::from("unique"),
            message: detail,
        },
        PersistenceError::InsufficientInventory { .. } => ApiError::InsufficientInventory {
            message: err.to_string(),
        },
        other => {
            error!(error = %other, "Persistence failure");
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}

/// Translates a payment provider error into an API error.
#[must_use]
pub fn translate_payment_error(err: PaymentError) -> ApiError {
    match err {
        PaymentError::InvalidAmount(_) | PaymentError::EmptyCheckout => ApiError::InvalidInput {
            field: String::from("payment"),
            message: err.to_string(),
        },
        other => {
            error!(error = %other, "Payment provider failure");
            ApiError::PaymentFailed {
                reason: other.to_string(),
            }
        }
    }
}
