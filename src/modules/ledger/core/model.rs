// Record model for the ledger.
//
// Structure
// - owner.rs: account root, profile and defaults
// - property.rs: flat per-property lists (rooms, tenants, payments, readings, ...)
// - room.rs, tenant.rs, payment.rs, utility_reading.rs, approval.rs: the billing entities
// - records.rs: expenses, notifications and maintenance requests
//
// Ownership is strictly tree shaped. Tenants reference rooms by id only.

pub mod approval;
pub mod owner;
pub mod payment;
pub mod property;
pub mod records;
pub mod room;
pub mod tenant;
pub mod utility_reading;

pub use approval::{Approval, ApprovalStatus};
pub use owner::{
    Owner, OwnerDefaults, OwnerDefaultsPatch, OwnerProfile, ReminderConfig, SubscriptionTier,
};
pub use payment::{Payment, PaymentCategory, PaymentMethod, PaymentStatus};
pub use property::Property;
pub use records::{Expense, MaintenanceRequest, MaintenanceStatus, Notification};
pub use room::Room;
pub use tenant::{Charge, Tenant};
pub use utility_reading::UtilityReading;
