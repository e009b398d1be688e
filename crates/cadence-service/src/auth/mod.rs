pub mod password;
pub mod service;
pub mod token;
