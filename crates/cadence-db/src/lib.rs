//! PostgreSQL persistence for Cadence: Diesel schema, row models, query
//! composition, connection pooling, and the store trait adapters.

pub mod db;
pub mod error;
pub mod model;
pub mod repo;
