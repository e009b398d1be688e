pub mod overlap;
pub mod recurrence;
pub mod service;
pub mod validate;
pub mod window;
