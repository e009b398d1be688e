pub mod connection;
pub mod enums;
pub mod query;
pub mod schema;
