// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// One line of a customer's cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: i64,
    /// When set, price and stock come from the variant.
    pub variant_id: Option<i64>,
    pub quantity: u32,
}

/// Picks the product whose rules govern cart-wide date offers.
///
/// The first line wins. Products later in the cart do not narrow the
/// offered dates.
#[must_use]
pub fn representative_product(lines: &[CartLine]) -> Option<i64> {
    lines.first().map(|line| line.product_id)
}
