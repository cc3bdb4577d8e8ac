// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order totals, sales tax and processor fees.
//!
//! All amounts are integer cents. Rates are basis points; rounding is
//! half-up on the final cent.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

const BPS_DENOMINATOR: i64 = 10_000;

/// Multiplies `cents` by `bps / 10000`, rounding half up. `None` on overflow.
const fn apply_bps(cents: i64, bps: i64) -> Option<i64> {
    let Some(scaled) = cents.checked_mul(bps) else {
        return None;
    };
    let Some(rounded) = scaled.checked_add(BPS_DENOMINATOR / 2) else {
        return None;
    };
    Some(rounded / BPS_DENOMINATOR)
}

/// Sales tax rate in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate {
    basis_points: u32,
}

impl TaxRate {
    /// Idaho state sales tax.
    pub const DEFAULT_BASIS_POINTS: u32 = 600;

    /// Creates a tax rate.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTaxRate` above 10000 basis points.
    pub const fn new(basis_points: u32) -> Result<Self, DomainError> {
        if basis_points > 10_000 {
            return Err(DomainError::InvalidTaxRate(basis_points));
        }
        Ok(Self { basis_points })
    }

    #[must_use]
    pub const fn basis_points(&self) -> u32 {
        self.basis_points
    }

    /// Tax owed on `taxable_cents`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` if the tax overflows.
    pub fn tax_on(&self, taxable_cents: i64) -> Result<i64, DomainError> {
        apply_bps(taxable_cents, i64::from(self.basis_points)).ok_or_else(|| {
            DomainError::InvalidAmount {
                field: String::from("tax"),
                cents: taxable_cents,
            }
        })
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self {
            basis_points: Self::DEFAULT_BASIS_POINTS,
        }
    }
}

/// Per-transaction processor economics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MerchantFeeRate {
    pub basis_points: u32,
    pub fixed_cents: i64,
}

impl MerchantFeeRate {
    /// 2.9% + 30¢.
    pub const CARD_STANDARD: Self = Self {
        basis_points: 290,
        fixed_cents: 30,
    };

    /// Fee withheld on a charge of `gross_cents`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` if the fee overflows.
    pub fn fee_for(&self, gross_cents: i64) -> Result<i64, DomainError> {
        apply_bps(gross_cents, i64::from(self.basis_points))
            .and_then(|fee| fee.checked_add(self.fixed_cents))
            .ok_or_else(|| DomainError::InvalidAmount {
                field: String::from("merchant_fee"),
                cents: gross_cents,
            })
    }
}

/// One priced cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub unit_price_cents: i64,
    pub quantity: u32,
}

impl PricedLine {
    /// Returns `unit × quantity`, or `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<i64> {
        self.unit_price_cents.checked_mul(i64::from(self.quantity))
    }
}

/// Order totals in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal_cents: i64,
    pub delivery_fee_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
}

/// Computes order totals.
///
/// Tax applies to the subtotal plus the delivery fee.
///
/// # Errors
///
/// Returns `DomainError::InvalidAmount` if any price or the fee is negative
/// or the sum overflows.
pub fn compute_totals(
    lines: &[PricedLine],
    delivery_fee_cents: i64,
    tax_rate: TaxRate,
) -> Result<OrderTotals, DomainError> {
    let overflow = |field: &str, cents: i64| DomainError::InvalidAmount {
        field: field.to_string(),
        cents,
    };

    if delivery_fee_cents < 0 {
        return Err(overflow("delivery_fee", delivery_fee_cents));
    }

    let mut subtotal_cents: i64 = 0;
    for line in lines {
        if line.unit_price_cents < 0 {
            return Err(overflow("unit_price", line.unit_price_cents));
        }
        let line_total: i64 = line
            .line_total()
            .ok_or_else(|| overflow("line_total", line.unit_price_cents))?;
        subtotal_cents = subtotal_cents
            .checked_add(line_total)
            .ok_or_else(|| overflow("subtotal", subtotal_cents))?;
    }

    let taxable: i64 = subtotal_cents
        .checked_add(delivery_fee_cents)
        .ok_or_else(|| overflow("subtotal", subtotal_cents))?;
    let tax_cents: i64 = tax_rate.tax_on(taxable)?;
    let total_cents: i64 = taxable
        .checked_add(tax_cents)
        .ok_or_else(|| overflow("total", taxable))?;

    Ok(OrderTotals {
        subtotal_cents,
        delivery_fee_cents,
        tax_cents,
        total_cents,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rounds_half_up() {
        let rate = TaxRate::new(600).unwrap();
        // 6% of 1025 = 61.5
        assert_eq!(rate.tax_on(1025).unwrap(), 62);
        // 6% of 1008 = 60.48
        assert_eq!(rate.tax_on(1008).unwrap(), 60);
    }

    #[test]
    fn test_totals_tax_includes_delivery_fee() {
        let lines = [
            PricedLine {
                unit_price_cents: 1200,
                quantity: 2,
            },
            PricedLine {
                unit_price_cents: 450,
                quantity: 1,
            },
        ];
        let totals = compute_totals(&lines, 500, TaxRate::default()).unwrap();
        assert_eq!(totals.subtotal_cents, 2850);
        assert_eq!(totals.delivery_fee_cents, 500);
        assert_eq!(totals.tax_cents, 201);
        assert_eq!(totals.total_cents, 3551);
    }

    #[test]
    fn test_tax_rate_bounds() {
        assert!(TaxRate::new(10_000).is_ok());
        assert!(matches!(
            TaxRate::new(10_001),
            Err(DomainError::InvalidTaxRate(10_001))
        ));
    }

    #[test]
    fn test_card_merchant_fee() {
        // 2.9% of 3551 = 102.979 -> 103, plus 30
        assert_eq!(MerchantFeeRate::CARD_STANDARD.fee_for(3551).unwrap(), 133);
    }

    #[test]
    fn test_merchant_fee_overflow_is_error() {
        assert!(MerchantFeeRate::CARD_STANDARD.fee_for(i64::MAX / 100).is_err());
    }

    #[test]
    fn test_huge_cart_tax_overflow_is_error() {
        // Subtotal fits in i64; subtotal × 600 bps does not.
        let lines = vec![
            PricedLine {
                unit_price_cents: 900,
                quantity: u32::MAX,
            };
            4000
        ];
        let result = compute_totals(&lines, 0, TaxRate::default());
        assert!(matches!(
            result,
            Err(DomainError::InvalidAmount { ref field, .. }) if field == "tax"
        ));
    }

    #[test]
    fn test_negative_fee_rejected() {
        assert!(compute_totals(&[], -1, TaxRate::default()).is_err());
    }
}
