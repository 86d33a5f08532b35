// Rent sharing: a shared room's rent is split equally across its current occupants.
//
// Responsibilities
// - Compute the per-tenant split without ever dividing by zero.
// - Rewrite the rent of every occupant of a shared room after a membership or rent change.

use crate::modules::ledger::core::model::{Room, Tenant};
use crate::shared::core::primitives::{Amount, round_currency, split_evenly};

/// Nominal per-tenant rent. Zero when the room is empty.
pub fn per_tenant_rent(room_rent: Amount, occupants: usize) -> Amount {
    if occupants == 0 {
        return 0.0;
    }
    round_currency(room_rent / occupants as Amount)
}

/// Per-tenant amounts for a shared room, summing exactly to the room rent.
pub fn split_room_rent(room: &Room, occupants: usize) -> Vec<Amount> {
    split_evenly(room.rent, occupants)
}

/// Re-applies the split to every occupant of `room`.
///
/// Occupants keep their list order; earlier occupants absorb remainder cents.
/// Rooms without rent sharing are left untouched.
pub fn rebalance_room(room: &Room, tenants: &mut [Tenant]) {
    if !room.rent_sharing {
        return;
    }
    let occupants = tenants.iter().filter(|t| t.room_id == room.id).count();
    let shares = split_room_rent(room, occupants);
    tenants
        .iter_mut()
        .filter(|t| t.room_id == room.id)
        .zip(shares)
        .for_each(|(tenant, share)| tenant.rent = share);
}

#[cfg(test)]
mod rent_sharing_tests {
    use super::*;
    use crate::shared::core::primitives::{CURRENCY_EPSILON, sum_amounts};
    use crate::test_support::fixtures::{RoomBuilder, TenantBuilder};
    use rstest::rstest;

    #[rstest]
    fn it_should_not_divide_by_zero_for_an_empty_room() {
        assert_eq!(per_tenant_rent(2000.0, 0), 0.0);
        let room = RoomBuilder::new("r1").rent(2000.0).shared().build();
        assert!(split_room_rent(&room, 0).is_empty());
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(7)]
    fn it_should_split_the_whole_rent_across_occupants(#[case] occupants: usize) {
        let room = RoomBuilder::new("r1").rent(2000.0).shared().build();
        let shares = split_room_rent(&room, occupants);
        assert_eq!(shares.len(), occupants);
        assert!((sum_amounts(&shares) - room.rent).abs() < CURRENCY_EPSILON);
        for share in &shares {
            let even = per_tenant_rent(room.rent, occupants);
            assert!((share - even).abs() <= 0.01 + CURRENCY_EPSILON);
        }
    }

    #[rstest]
    fn it_should_only_touch_occupants_of_the_shared_room() {
        let room = RoomBuilder::new("r1").rent(3000.0).shared().build();
        let mut tenants = vec![
            TenantBuilder::new("a", "r1").rent(3000.0).build(),
            TenantBuilder::new("x", "r2").rent(800.0).build(),
            TenantBuilder::new("b", "r1").rent(0.0).build(),
        ];
        rebalance_room(&room, &mut tenants);
        assert_eq!(tenants[0].rent, 1500.0);
        assert_eq!(tenants[1].rent, 800.0);
        assert_eq!(tenants[2].rent, 1500.0);
    }

    #[rstest]
    fn it_should_leave_unshared_rooms_alone() {
        let room = RoomBuilder::new("r1").rent(3000.0).build();
        let mut tenants = vec![
            TenantBuilder::new("a", "r1").rent(1200.0).build(),
            TenantBuilder::new("b", "r1").rent(1300.0).build(),
        ];
        rebalance_room(&room, &mut tenants);
        assert_eq!(tenants[0].rent, 1200.0);
        assert_eq!(tenants[1].rent, 1300.0);
    }
}
