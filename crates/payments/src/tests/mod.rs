// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod square_tests;
mod stripe_tests;

use crate::CheckoutLine;

pub fn loaf_line() -> CheckoutLine {
    CheckoutLine {
        name: String::from("Sourdough Loaf"),
        unit_amount_cents: 1200,
        quantity: 2,
    }
}
