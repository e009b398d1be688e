mod auth;
mod events;
mod healthcheck;

use salvo::Router;

/// ## Summary
/// Constructs the main API router: open registration, login, and
/// healthcheck routes plus the bearer-protected event routes.
#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(auth::routes())
        .push(healthcheck::routes())
        .push(events::routes())
}
