// Outstanding dues per tenant.
//
// Policy
// - Rent is billed at the start of each period: the current, incomplete month is already due.
// - A month only counts as complete once the move-in day of month has been reached.
// - Only settled payments (completed or approved) reduce the balance.
// - The result is clamped at zero; overpayment is not carried as credit.

use crate::modules::ledger::core::model::{Payment, Property, Tenant};
use crate::shared::core::primitives::{Amount, from_minor_units, round_currency, to_minor_units};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

/// Whole months between `move_in` and `today`, not counting a partial month.
///
/// Negative when `today` is before the move-in month.
pub fn months_elapsed(move_in: NaiveDate, today: NaiveDate) -> i64 {
    let mut months = (i64::from(today.year()) - i64::from(move_in.year())) * 12
        + i64::from(today.month())
        - i64::from(move_in.month());
    if today.day() < move_in.day() {
        months -= 1;
    }
    months
}

/// Rent owed since move-in, including the current period.
pub fn rent_owed_to_date(tenant: &Tenant, today: NaiveDate) -> Amount {
    let Some(move_in) = tenant.move_in_date else {
        return 0.0;
    };
    if today < move_in {
        return 0.0;
    }
    let periods = months_elapsed(move_in, today).max(0) + 1;
    from_minor_units(to_minor_units(tenant.rent) * periods)
}

/// Dues for a tenant given the payments credited to them.
///
/// A tenant without a move-in date owes nothing.
pub fn tenant_dues<'a>(
    tenant: &Tenant,
    payments: impl IntoIterator<Item = &'a Payment>,
    today: NaiveDate,
) -> Amount {
    if tenant.move_in_date.is_none() {
        return 0.0;
    }
    let owed = to_minor_units(rent_owed_to_date(tenant, today));
    let charges: i64 = tenant
        .other_charges
        .iter()
        .map(|c| to_minor_units(c.amount))
        .sum();
    let paid: i64 = payments
        .into_iter()
        .filter(|p| p.status.is_settled())
        .map(|p| to_minor_units(p.amount))
        .sum();
    from_minor_units((owed + charges - paid).max(0))
}

/// Payments credited to a tenant: the property ledger entries plus the tenant's
/// own list, de-duplicated by payment id.
pub fn payments_credited_to<'a>(property: &'a Property, tenant: &'a Tenant) -> Vec<&'a Payment> {
    let mut seen = HashSet::new();
    property
        .payments_for(&tenant.id)
        .chain(tenant.payments.iter())
        .filter(|p| seen.insert(p.id.clone()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDues {
    pub tenant_id: String,
    pub tenant_name: String,
    pub room_id: String,
    pub rent_owed: Amount,
    pub charges: Amount,
    pub paid: Amount,
    pub dues: Amount,
}

/// Dues report for every tenant of a property, in tenant list order.
pub fn property_dues(property: &Property, today: NaiveDate) -> Vec<TenantDues> {
    property
        .tenants
        .iter()
        .map(|tenant| {
            let payments = payments_credited_to(property, tenant);
            let paid: Amount = payments
                .iter()
                .filter(|p| p.status.is_settled())
                .map(|p| p.amount)
                .sum();
            let charges: Amount = tenant.other_charges.iter().map(|c| c.amount).sum();
            TenantDues {
                tenant_id: tenant.id.clone(),
                tenant_name: tenant.name.clone(),
                room_id: tenant.room_id.clone(),
                rent_owed: rent_owed_to_date(tenant, today),
                charges: round_currency(charges),
                paid: round_currency(paid),
                dues: tenant_dues(tenant, payments, today),
            }
        })
        .collect()
}
