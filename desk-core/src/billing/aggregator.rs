//! Pure billing operations
//!
//! Every function takes the current aggregate by reference and returns a new
//! one; the caller's value is never modified, so a rejected operation leaves
//! in-progress work untouched.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{
    Billing, BillingLineItem, BillingLineRef, BillingSubmission, PaymentStatus,
    PersistedBilling, PriorBilling, ServiceOrderLookup,
};

use super::error::{BillingError, BillingResult};
use super::money;

/// Build a line item from a lookup, ignoring prior billings of `editing`
pub fn line_item_from_lookup(lookup: ServiceOrderLookup, editing: Option<&str>) -> BillingLineItem {
    let order = lookup.service_order;
    let prior_billings: Vec<PriorBilling> = lookup
        .previous_billings
        .into_iter()
        .filter(|b| Some(b.id.as_str()) != editing)
        .collect();
    let prior_paid_amount = money::round_money(prior_billings.iter().map(|b| b.paid_amount).sum());

    BillingLineItem {
        remaining_balance: money::remaining_balance(order.service_charge, prior_paid_amount),
        service_order_id: order.id,
        order_id: order.order_id,
        order: order.order,
        customer_id: order.customer_id,
        service_charge: order.service_charge,
        prior_paid_amount,
        prior_billings,
    }
}

/// Add a looked-up order to the billing
///
/// Rejections, in order:
/// 1. the order is already paid and the billing is fresh
/// 2. the order belongs to another customer than the existing line items
///
/// An order already present is kept as-is (insert-if-absent).
pub fn apply_lookup(current: &Billing, lookup: ServiceOrderLookup) -> BillingResult<Billing> {
    let payment_status = lookup.service_order.payment_status;
    let line = line_item_from_lookup(lookup, current.id.as_deref());

    let covered = line.prior_paid_amount > Decimal::ZERO && line.remaining_balance.is_zero();
    if !current.is_edit() && (payment_status == PaymentStatus::Paid || covered) {
        tracing::warn!(order_id = %line.order_id, "Rejected fully paid service order");
        return Err(BillingError::PaymentAlreadyComplete(line.order_id));
    }

    if !current.line_items.is_empty() {
        let expected = current.customer_id.clone().unwrap_or_default();
        if expected != line.customer_id {
            tracing::warn!(
                order_id = %line.order_id,
                expected = %expected,
                found = %line.customer_id,
                "Rejected service order from another customer"
            );
            return Err(BillingError::CustomerMismatch {
                expected,
                found: line.customer_id,
                order_id: line.order_id,
            });
        }
    }

    let mut next = current.clone();
    if next.line_items.is_empty() {
        next.customer_id = Some(line.customer_id.clone());
    }
    let order_id = line.order_id.clone();
    next.line_items
        .entry(line.service_order_id.clone())
        .or_insert(line);
    money::recalculate_aggregate(&mut next);

    tracing::info!(
        order_id = %order_id,
        line_items = next.line_items.len(),
        total = %next.total_amount,
        "Service order added to billing"
    );
    Ok(next)
}

/// Remove a line item; an absent id leaves the aggregate as it was
pub fn remove_order(current: &Billing, service_order_id: &str) -> Billing {
    let mut next = current.clone();
    if next.line_items.remove(service_order_id).is_none() {
        return next;
    }
    if next.line_items.is_empty() {
        next.customer_id = None;
    }
    money::recalculate_aggregate(&mut next);

    tracing::info!(
        service_order_id = %service_order_id,
        line_items = next.line_items.len(),
        "Service order removed from billing"
    );
    next
}

/// Re-run the totals pipeline over the current sums
pub fn recompute_totals(current: &Billing) -> Billing {
    let mut next = current.clone();
    money::recalculate_totals(&mut next);
    next
}

/// Re-derive the sums from the line items, then the totals
pub fn recompute_aggregate(current: &Billing) -> Billing {
    let mut next = current.clone();
    money::recalculate_aggregate(&mut next);
    next
}

pub fn with_discount_percent(current: &Billing, percent: Decimal) -> BillingResult<Billing> {
    money::validate_percent(percent, "discount_percent")?;
    let mut next = current.clone();
    next.discount_percent = percent;
    money::recalculate_totals(&mut next);
    Ok(next)
}

pub fn with_tax_percent(current: &Billing, percent: Decimal) -> BillingResult<Billing> {
    money::validate_percent(percent, "tax_percent")?;
    let mut next = current.clone();
    next.tax_percent = percent;
    money::recalculate_totals(&mut next);
    Ok(next)
}

pub fn with_paid_amount(current: &Billing, amount: Decimal) -> BillingResult<Billing> {
    money::validate_amount(amount, "paid_amount")?;
    let mut next = current.clone();
    next.paid_amount = amount;
    money::recalculate_totals(&mut next);
    Ok(next)
}

pub fn with_date(current: &Billing, date: NaiveDate) -> Billing {
    Billing {
        date,
        ..current.clone()
    }
}

/// Project the billing into the submission payload
///
/// Line items are reduced to `{serviceOrderId, orderId, order}`; totals are
/// recomputed from the line items so a stale aggregate cannot be submitted.
pub fn finalize(current: &Billing) -> BillingResult<BillingSubmission> {
    if current.line_items.is_empty() {
        return Err(BillingError::EmptyLineItems);
    }
    money::validate_inputs(current)?;
    let customer_id = current
        .customer_id
        .clone()
        .ok_or(BillingError::EmptyLineItems)?;

    let billing = recompute_aggregate(current);
    let payment_status = money::payment_status_for(&billing);

    let line_items = billing
        .line_items
        .values()
        .map(|item| BillingLineRef {
            service_order_id: item.service_order_id.clone(),
            order_id: item.order_id.clone(),
            order: item.order.clone(),
        })
        .collect();

    Ok(BillingSubmission {
        id: billing.id.clone(),
        date: billing.date,
        customer_id,
        line_items,
        total_amount: billing.total_amount,
        previous_paid_amount: billing.previous_paid_amount,
        discount_percent: billing.discount_percent,
        discount_amount: billing.discount_amount,
        taxable_amount: billing.taxable_amount,
        tax_percent: billing.tax_percent,
        tax_amount: billing.tax_amount,
        final_total: billing.final_total,
        paid_amount: billing.paid_amount,
        remaining_amount: billing.remaining_amount,
        payment_status,
    })
}

/// Rebuild an editable billing from its stored form
///
/// Line items come from the stored charge and prior-paid figures rather than
/// fresh lookups.
pub fn from_persisted(persisted: PersistedBilling) -> Billing {
    let customer_id = persisted.customer_id;
    let line_items: BTreeMap<String, BillingLineItem> = persisted
        .line_items
        .into_iter()
        .map(|item| {
            let line = BillingLineItem {
                remaining_balance: money::remaining_balance(
                    item.service_charge,
                    item.prior_paid_amount,
                ),
                customer_id: item.customer_id.unwrap_or_else(|| customer_id.clone()),
                service_order_id: item.service_order_id,
                order_id: item.order_id,
                order: item.order,
                service_charge: item.service_charge,
                prior_paid_amount: item.prior_paid_amount,
                prior_billings: Vec::new(),
            };
            (line.service_order_id.clone(), line)
        })
        .collect();

    let mut billing = Billing::new(persisted.date);
    billing.id = Some(persisted.id);
    billing.customer_id = Some(customer_id);
    billing.line_items = line_items;
    billing.discount_percent = persisted.discount_percent;
    billing.tax_percent = persisted.tax_percent;
    billing.paid_amount = persisted.paid_amount;
    money::recalculate_aggregate(&mut billing);
    billing
}

/// Prior billings across all line items, de-duplicated by id, oldest first
pub fn payment_history(current: &Billing) -> Vec<PriorBilling> {
    let mut seen = BTreeMap::new();
    for prior in current.line_items.values().flat_map(|l| &l.prior_billings) {
        seen.entry(prior.id.clone()).or_insert_with(|| prior.clone());
    }
    let mut history: Vec<PriorBilling> = seen.into_values().collect();
    history.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
    history
}
