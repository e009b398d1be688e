use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use cadence_core::error::CoreError;
use cadence_core::store::{EventStore, UserStore};
use cadence_service::auth::token::TokenIssuer;
use cadence_service::notify::NotificationSender;

/// Shared resources every handler works against. Stores are trait
/// objects so tests can wire in-memory implementations.
#[derive(Clone)]
pub struct AppState {
    pub events: Arc<dyn EventStore>,
    pub users: Arc<dyn UserStore>,
    pub tokens: TokenIssuer,
    pub notifications: NotificationSender,
}

pub struct AppStateHandler {
    pub state: AppState,
}

#[async_trait]
impl salvo::Handler for AppStateHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        let state: Arc<AppState> = Arc::new(self.state.clone());
        depot.inject(state);
    }
}

/// ## Summary
/// Retrieves the application state from the depot.
///
/// ## Errors
/// Returns an error if the state is not found in the depot.
pub fn get_state_from_depot(depot: &salvo::Depot) -> AppResult<Arc<AppState>> {
    depot
        .obtain::<Arc<AppState>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Application state not found in depot").into())
}
