// Shared builders for unit tests.
//
// Each builder starts from a valid record and exposes setters for the fields tests vary.

use crate::modules::ledger::core::model::{
    Approval, ApprovalStatus, Owner, OwnerProfile, Payment, PaymentCategory, PaymentMethod,
    PaymentStatus, Property, Room, SubscriptionTier, Tenant,
};
use crate::shared::core::primitives::{Amount, derive_login_id};
use chrono::NaiveDate;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub struct OwnerBuilder {
    inner: Owner,
}

#[allow(dead_code)]
impl OwnerBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            inner: Owner::new(
                id,
                OwnerProfile {
                    name: "Asha Rao".to_string(),
                    phone: Some("+91 98450 00001".to_string()),
                    email: None,
                    business_name: None,
                },
            ),
        }
    }

    pub fn profile(mut self, profile: OwnerProfile) -> Self {
        self.inner.profile = profile;
        self
    }

    pub fn tier(mut self, tier: SubscriptionTier) -> Self {
        self.inner.defaults.subscription_tier = tier;
        self
    }

    pub fn property(mut self, property: Property) -> Self {
        self.inner.properties.push(property);
        self
    }

    pub fn active(mut self, property_id: &str) -> Self {
        self.inner.active_property_id = Some(property_id.to_string());
        self
    }

    pub fn build(self) -> Owner {
        self.inner
    }
}

pub struct PropertyBuilder {
    inner: Property,
}

#[allow(dead_code)]
impl PropertyBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            inner: Property::new(id, "Lakeview Residency", "12 MG Road"),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.inner.name = name.to_string();
        self
    }

    pub fn room(mut self, room: Room) -> Self {
        self.inner.rooms.push(room);
        self
    }

    pub fn tenant(mut self, tenant: Tenant) -> Self {
        self.inner.tenants.push(tenant);
        self
    }

    pub fn payment(mut self, payment: Payment) -> Self {
        self.inner.payments.push(payment);
        self
    }

    pub fn build(self) -> Property {
        self.inner
    }
}

pub struct RoomBuilder {
    inner: Room,
}

#[allow(dead_code)]
impl RoomBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            inner: Room {
                id: id.to_string(),
                name: format!("Room {id}"),
                capacity: 1,
                rent: 1000.0,
                rent_sharing: false,
            },
        }
    }

    pub fn capacity(mut self, capacity: u32) -> Self {
        self.inner.capacity = capacity;
        self
    }

    pub fn rent(mut self, rent: Amount) -> Self {
        self.inner.rent = rent;
        self
    }

    pub fn shared(mut self) -> Self {
        self.inner.rent_sharing = true;
        self
    }

    pub fn build(self) -> Room {
        self.inner
    }
}

pub struct TenantBuilder {
    inner: Tenant,
}

#[allow(dead_code)]
impl TenantBuilder {
    pub fn new(id: &str, room_id: &str) -> Self {
        Self {
            inner: Tenant {
                id: id.to_string(),
                name: format!("Tenant {id}"),
                phone: Some("+91 90000 00000".to_string()),
                email: None,
                room_id: room_id.to_string(),
                rent: 1000.0,
                move_in_date: Some(date(2024, 1, 1)),
                login_id: Some(derive_login_id(id)),
                other_charges: Vec::new(),
                payments: Vec::new(),
            },
        }
    }

    pub fn rent(mut self, rent: Amount) -> Self {
        self.inner.rent = rent;
        self
    }

    pub fn move_in(mut self, move_in: NaiveDate) -> Self {
        self.inner.move_in_date = Some(move_in);
        self
    }

    pub fn build(self) -> Tenant {
        self.inner
    }
}

pub struct PaymentBuilder {
    inner: Payment,
}

#[allow(dead_code)]
impl PaymentBuilder {
    pub fn new(id: &str, tenant_id: &str) -> Self {
        Self {
            inner: Payment {
                id: id.to_string(),
                tenant_id: tenant_id.to_string(),
                amount: 1000.0,
                method: PaymentMethod::Upi,
                date: date(2024, 1, 5),
                category: PaymentCategory::Rent,
                status: PaymentStatus::Completed,
                note: None,
            },
        }
    }

    pub fn amount(mut self, amount: Amount) -> Self {
        self.inner.amount = amount;
        self
    }

    pub fn status(mut self, status: PaymentStatus) -> Self {
        self.inner.status = status;
        self
    }

    pub fn build(self) -> Payment {
        self.inner
    }
}

pub struct ApprovalBuilder {
    inner: Approval,
}

#[allow(dead_code)]
impl ApprovalBuilder {
    pub fn new(id: &str, tenant_id: &str) -> Self {
        Self {
            inner: Approval {
                id: id.to_string(),
                tenant_id: tenant_id.to_string(),
                amount: 1000.0,
                date: date(2024, 2, 3),
                proof: "upi-ref-88213".to_string(),
                method: PaymentMethod::Upi,
                status: ApprovalStatus::Processing,
                note: None,
            },
        }
    }

    pub fn amount(mut self, amount: Amount) -> Self {
        self.inner.amount = amount;
        self
    }

    pub fn build(self) -> Approval {
        self.inner
    }
}
