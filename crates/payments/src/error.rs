// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Failures talking to a payment provider.
///
/// A card decline is not an error; it is reported as
/// [`crate::PaymentOutcome::Declined`].
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} rejected the request ({status}): {message}")]
    Rejected {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("{provider} returned an unexpected response: {reason}")]
    InvalidResponse {
        provider: &'static str,
        reason: String,
    },

    #[error("charge amount must be positive, got {0} cents")]
    InvalidAmount(i64),

    #[error("checkout needs at least one line")]
    EmptyCheckout,
}

impl PaymentError {
    pub const fn transport(provider: &'static str, source: reqwest::Error) -> Self {
        Self::Transport { provider, source }
    }

    pub fn invalid_response(provider: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider,
            reason: reason.into(),
        }
    }
}
