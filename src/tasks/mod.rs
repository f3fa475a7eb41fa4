//! Background work spawned next to the HTTP server.
//!
//! Currently only the expired-entry sweep, which keeps the store from holding
//! proxied responses nobody asks for again.

mod cleanup;

pub use cleanup::spawn_cleanup_task;
