// Utility apportionment: a metered bill is split equally across the room's occupants.
//
// Responsibilities
// - Refuse to apportion to an empty room instead of producing NaN or infinite shares.
// - Produce one charge per occupant with the id derived from the reading id.

use crate::modules::ledger::core::model::{Charge, Tenant, UtilityReading};
use crate::shared::core::primitives::{Amount, split_evenly, utility_charge_id};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApportionError {
    #[error("no tenants in room {room_id}")]
    NoTenantsInRoom { room_id: String },
}

/// Per-occupant shares of the reading, summing exactly to its total.
pub fn apportion(
    reading: &UtilityReading,
    occupants: usize,
) -> Result<Vec<Amount>, ApportionError> {
    if occupants == 0 {
        return Err(ApportionError::NoTenantsInRoom {
            room_id: reading.room_id.clone(),
        });
    }
    Ok(split_evenly(reading.total_amount, occupants))
}

pub fn charge_description(reading: &UtilityReading) -> String {
    format!(
        "Electricity {} units @ {:.2} ({})",
        reading.units_consumed, reading.rate_per_unit, reading.date
    )
}

/// Upserts the reading's charge on every occupant of its room.
///
/// Tenants outside the room are untouched. Fails without touching anything when
/// the room has no occupants.
pub fn charge_occupants(
    reading: &UtilityReading,
    tenants: &mut [Tenant],
) -> Result<(), ApportionError> {
    let occupants = tenants.iter().filter(|t| t.room_id == reading.room_id).count();
    let shares = apportion(reading, occupants)?;
    let charge_id = utility_charge_id(&reading.id);
    let description = charge_description(reading);
    tenants
        .iter_mut()
        .filter(|t| t.room_id == reading.room_id)
        .zip(shares)
        .for_each(|(tenant, amount)| {
            tenant.upsert_charge(Charge {
                id: charge_id.clone(),
                amount,
                description: description.clone(),
                date: reading.date,
            })
        });
    Ok(())
}

#[cfg(test)]
mod utility_apportionment_tests {
    use super::*;
    use crate::shared::core::primitives::{CURRENCY_EPSILON, sum_amounts};
    use crate::test_support::fixtures::{TenantBuilder, date};
    use rstest::rstest;

    fn reading(total_units: f64, rate: f64) -> UtilityReading {
        UtilityReading::record("e1", "r1", total_units, rate, date(2024, 3, 31))
    }

    #[rstest]
    fn it_should_report_an_empty_room() {
        let result = apportion(&reading(50.0, 10.0), 0);
        assert_eq!(
            result,
            Err(ApportionError::NoTenantsInRoom {
                room_id: "r1".into()
            })
        );
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(6)]
    fn it_should_apportion_the_whole_bill(#[case] occupants: usize) {
        let bill = reading(123.0, 7.77);
        let shares = apportion(&bill, occupants).unwrap();
        assert!((sum_amounts(&shares) - bill.total_amount).abs() < CURRENCY_EPSILON);
    }

    #[rstest]
    fn it_should_charge_each_occupant_once() {
        let bill = reading(50.0, 10.0);
        let mut tenants = vec![
            TenantBuilder::new("a", "r1").build(),
            TenantBuilder::new("b", "r1").build(),
            TenantBuilder::new("c", "r2").build(),
        ];
        charge_occupants(&bill, &mut tenants).unwrap();
        charge_occupants(&bill, &mut tenants).unwrap();

        assert_eq!(tenants[0].other_charges.len(), 1);
        assert_eq!(tenants[0].other_charges[0].id, "util:e1");
        assert_eq!(tenants[0].other_charges[0].amount, 250.0);
        assert_eq!(tenants[1].other_charges[0].amount, 250.0);
        assert!(tenants[2].other_charges.is_empty());
    }

    #[rstest]
    fn it_should_leave_tenants_untouched_when_the_room_is_empty() {
        let bill = reading(50.0, 10.0);
        let mut tenants = vec![TenantBuilder::new("c", "r2").build()];
        assert!(charge_occupants(&bill, &mut tenants).is_err());
        assert!(tenants[0].other_charges.is_empty());
    }
}
