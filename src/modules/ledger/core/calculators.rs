// Derived values computed from the record tree. None of these are stored.

pub mod dues;
pub mod occupancy;
pub mod rent_sharing;
pub mod utility_apportionment;
