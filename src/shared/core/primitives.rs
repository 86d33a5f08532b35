// Shared value helpers for the ledger.
//
// Purpose
// - Keep currency arithmetic and id derivation rules in one place so every calculator agrees.
//
// Notes
// - Amounts are major currency units stored as f64 and rounded to two decimals.
// - Splits are computed in minor units so the parts always add up to the total.

use uuid::Uuid;

pub type Amount = f64;

/// Tolerance used when comparing currency amounts that went through rounding.
pub const CURRENCY_EPSILON: Amount = 0.005;

const LOGIN_ID_PREFIX: &str = "T-";
const LOGIN_ID_LEN: usize = 8;
const LOGIN_ID_FALLBACK: &str = "TENANT";

pub fn round_currency(value: Amount) -> Amount {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}

pub fn to_minor_units(value: Amount) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    (value * 100.0).round() as i64
}

pub fn from_minor_units(cents: i64) -> Amount {
    cents as Amount / 100.0
}

/// Splits `total` into `parts` amounts that differ by at most one cent.
///
/// Remainder cents go to the first parts, so the sum of the result equals the
/// rounded total exactly. Returns an empty vector when `parts` is zero.
pub fn split_evenly(total: Amount, parts: usize) -> Vec<Amount> {
    if parts == 0 {
        return Vec::new();
    }
    let total_cents = to_minor_units(total);
    let count = parts as i64;
    let base = total_cents.div_euclid(count);
    let remainder = total_cents.rem_euclid(count);
    (0..count)
        .map(|index| {
            let extra = if index < remainder { 1 } else { 0 };
            from_minor_units(base + extra)
        })
        .collect()
}

pub fn sum_amounts<'a>(amounts: impl IntoIterator<Item = &'a Amount>) -> Amount {
    from_minor_units(amounts.into_iter().map(|a| to_minor_units(*a)).sum())
}

/// Charge id for a utility reading applied to a tenant.
///
/// Every tenant in the room receives a charge with the same id, which is what
/// makes re-application replace instead of duplicate.
pub fn utility_charge_id(reading_id: &str) -> String {
    format!("util:{reading_id}")
}

/// Payment id produced when an approval is accepted.
pub fn approval_payment_id(approval_id: &str) -> String {
    format!("approval:{approval_id}")
}

/// Deterministic login identifier derived from a tenant id.
///
/// Only the last alphanumeric characters are kept, so two tenant ids can map to the same
/// identifier. Use [`derive_unique_login_id`] when assigning one.
pub fn derive_login_id(tenant_id: &str) -> String {
    let cleaned: Vec<char> = tenant_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if cleaned.is_empty() {
        return format!("{LOGIN_ID_PREFIX}{LOGIN_ID_FALLBACK}");
    }
    let start = cleaned.len().saturating_sub(LOGIN_ID_LEN);
    let tail: String = cleaned[start..].iter().collect();
    format!("{LOGIN_ID_PREFIX}{tail}")
}

/// Derived login identifier with a `-2`, `-3`, ... suffix until `is_taken` no longer matches.
pub fn derive_unique_login_id(tenant_id: &str, is_taken: impl Fn(&str) -> bool) -> String {
    let base = derive_login_id(tenant_id);
    if !is_taken(&base) {
        return base;
    }
    (2u64..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or(base)
}

/// Fresh login identifier from the random tail of a v7 uuid.
pub fn issue_login_id() -> String {
    let simple = Uuid::now_v7().simple().to_string();
    let tail = &simple[simple.len() - LOGIN_ID_LEN..];
    format!("{LOGIN_ID_PREFIX}{}", tail.to_ascii_uppercase())
}
