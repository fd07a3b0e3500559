//! State synchronization with the device backend.
//!
//! The command synchronizer and reading submitter wrap the remote operations that
//! change or read device state, and the slot primitive resolves overlapping
//! round-trips deterministically.

pub mod command;
pub mod reading;
pub mod slot;

// Re-export commonly used items
pub use command::CommandSynchronizer;
pub use reading::ReadingSubmitter;
pub use slot::{Settlement, Slot, Ticket, UpdatePolicy};
