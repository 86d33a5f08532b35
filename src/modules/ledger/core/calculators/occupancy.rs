use crate::modules::ledger::core::model::Property;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomOccupancy {
    pub room_id: String,
    pub room_name: String,
    pub occupants: usize,
    pub capacity: u32,
}

impl RoomOccupancy {
    pub fn vacancies(&self) -> usize {
        (self.capacity as usize).saturating_sub(self.occupants)
    }

    pub fn is_full(&self) -> bool {
        self.vacancies() == 0
    }
}

pub fn room_occupancy(property: &Property) -> Vec<RoomOccupancy> {
    property
        .rooms
        .iter()
        .map(|room| RoomOccupancy {
            room_id: room.id.clone(),
            room_name: room.name.clone(),
            occupants: property.occupant_count(&room.id),
            capacity: room.capacity,
        })
        .collect()
}

#[cfg(test)]
mod occupancy_tests {
    use super::*;
    use crate::test_support::fixtures::{PropertyBuilder, RoomBuilder, TenantBuilder};
    use rstest::rstest;

    #[rstest]
    fn it_should_count_occupants_per_room() {
        let property = PropertyBuilder::new("p1")
            .room(RoomBuilder::new("r1").capacity(2).build())
            .room(RoomBuilder::new("r2").capacity(1).build())
            .tenant(TenantBuilder::new("a", "r1").build())
            .tenant(TenantBuilder::new("b", "r1").build())
            .build();

        let report = room_occupancy(&property);

        assert_eq!(report[0].occupants, 2);
        assert!(report[0].is_full());
        assert_eq!(report[1].occupants, 0);
        assert_eq!(report[1].vacancies(), 1);
    }
}
