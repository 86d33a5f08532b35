// Composition root for the ledger.
//
// Responsibilities
// - Read config from environment.
// - Build the dues and occupancy report printed by the binary.
// The binary itself lives in main.rs and wires the file store into the use case handlers.

pub mod config;
pub mod report;
