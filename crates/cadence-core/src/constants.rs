/// Route component constants shared across crates
pub const REGISTER_ROUTE_COMPONENT: &str = "register";
pub const LOGIN_ROUTE_COMPONENT: &str = "login";
pub const EVENTS_ROUTE_COMPONENT: &str = "events";
pub const HEALTHCHECK_ROUTE_COMPONENT: &str = "healthcheck";

/// Number of consecutive calendar dates covered by an event listing.
pub const WINDOW_DAYS: i64 = 30;

/// Hard cap on expanded occurrence instants for a single schedule.
pub const MAX_OCCURRENCES: u16 = 10_000;

/// Maximum accepted event title length, in characters.
pub const TITLE_MAX_CHARS: usize = 100;
