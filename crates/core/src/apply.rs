// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{OrderState, TransitionResult};

/// Applies a command to an order, producing the new order state.
///
/// # Arguments
///
/// * `state` - The current order state (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the before and after states
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The order status transition is not part of the lifecycle
/// - The fulfillment status belongs to the other method's track
/// - The order is cancelled or failed and a fulfillment update is requested
pub fn apply(state: &OrderState, command: Command) -> Result<TransitionResult, CoreError> {
    match command {
        Command::UpdateOrderStatus { status } => {
            state
                .status
                .validate_transition(status, state.fulfillment_method)?;

            let after: OrderState = OrderState {
                status,
                ..state.clone()
            };

            Ok(TransitionResult {
                before: state.clone(),
                after,
                notify_customer: false,
                description: format!(
                    "Order {} moved from {} to {}",
                    state.order_number, state.status, status
                ),
            })
        }
        Command::UpdateFulfillmentStatus {
            status,
            notify_customer,
        } => {
            if !state.status.is_fulfillable() {
                return Err(CoreError::OrderClosed {
                    order_number: state.order_number.clone(),
                    status: state.status.as_str().to_string(),
                });
            }

            status.validate_for(state.fulfillment_method)?;

            let after: OrderState = OrderState {
                fulfillment_status: status,
                ..state.clone()
            };

            Ok(TransitionResult {
                before: state.clone(),
                after,
                notify_customer,
                description: format!(
                    "Order {} {} status set to {}",
                    state.order_number, state.fulfillment_method, status
                ),
            })
        }
    }
}
