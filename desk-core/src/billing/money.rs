//! Money calculation for billings
//!
//! All arithmetic is `Decimal`. Intermediate values stay unrounded; the
//! 2-place half-away-from-zero rounding is applied once when results are
//! written back to the billing.

use rust_decimal::prelude::*;
use shared::models::{Billing, BillingLineItem, PaymentStatus};

use super::error::{BillingError, BillingResult};

/// Monetary precision (2 decimal places)
const DECIMAL_PLACES: u32 = 2;

/// Round a monetary value to 2 decimal places, half away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Percentages must lie in `[0, 100]`
pub fn validate_percent(value: Decimal, field_name: &str) -> BillingResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(BillingError::InvalidAmount(format!(
            "{} must be between 0 and 100, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Amounts must be non-negative
pub fn validate_amount(value: Decimal, field_name: &str) -> BillingResult<()> {
    if value < Decimal::ZERO {
        return Err(BillingError::InvalidAmount(format!(
            "{} must be non-negative, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate every operator-entered input of a billing
pub fn validate_inputs(billing: &Billing) -> BillingResult<()> {
    validate_percent(billing.discount_percent, "discount_percent")?;
    validate_percent(billing.tax_percent, "tax_percent")?;
    validate_amount(billing.paid_amount, "paid_amount")
}

/// `max(service_charge - prior_paid, 0)`
pub fn remaining_balance(service_charge: Decimal, prior_paid: Decimal) -> Decimal {
    round_money((service_charge - prior_paid).max(Decimal::ZERO))
}

/// Sum charges and prior payments over every line item, then run the totals pipeline
pub fn recalculate_aggregate(billing: &mut Billing) {
    let (total, previous) = sum_line_items(billing.line_items.values());
    billing.total_amount = round_money(total);
    billing.previous_paid_amount = round_money(previous);
    recalculate_totals(billing);
}

fn sum_line_items<'a>(items: impl Iterator<Item = &'a BillingLineItem>) -> (Decimal, Decimal) {
    items.fold((Decimal::ZERO, Decimal::ZERO), |(total, previous), item| {
        (
            total + item.service_charge,
            previous + item.prior_paid_amount,
        )
    })
}

/// Recalculate the derived totals from `total_amount`, `previous_paid_amount`
/// and the operator inputs
///
/// Fixed order: discount → taxable → tax → final → remaining.
/// Tax is charged on the discounted base; final and remaining clamp at zero.
pub fn recalculate_totals(billing: &mut Billing) {
    let total = billing.total_amount;
    let discount = total * billing.discount_percent / Decimal::ONE_HUNDRED;
    let taxable = total - discount;
    let tax = taxable * billing.tax_percent / Decimal::ONE_HUNDRED;
    let final_total = (taxable + tax).max(Decimal::ZERO);
    let remaining =
        (final_total - (billing.previous_paid_amount + billing.paid_amount)).max(Decimal::ZERO);

    billing.discount_amount = round_money(discount);
    billing.taxable_amount = round_money(taxable);
    billing.tax_amount = round_money(tax);
    billing.final_total = round_money(final_total);
    billing.remaining_amount = round_money(remaining);

    tracing::debug!(
        total = %billing.total_amount,
        discount = %billing.discount_amount,
        tax = %billing.tax_amount,
        final_total = %billing.final_total,
        remaining = %billing.remaining_amount,
        "Billing totals recalculated"
    );
}

/// Payment status implied by a billing's totals
pub fn payment_status_for(billing: &Billing) -> PaymentStatus {
    if billing.final_total > Decimal::ZERO && billing.remaining_amount.is_zero() {
        PaymentStatus::Paid
    } else if billing.previous_paid_amount + billing.paid_amount > Decimal::ZERO {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Unpaid
    }
}
