//! Shared domain types, configuration, and store interfaces for the
//! Cadence calendar-event service.

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod store;
pub mod user;
