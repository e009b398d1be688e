//! Cadence calendar API - HTTP layer.

pub mod api;
pub mod error;
pub mod middleware;
pub mod state;
