//! Domain logic for Cadence: account registration and login, token
//! issuance, event validation, recurrence expansion, conflict detection,
//! calendar-window assembly, and notification dispatch.

pub mod auth;
pub mod error;
pub mod events;
pub mod notify;
