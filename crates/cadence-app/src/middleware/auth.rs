use salvo::Depot;
use salvo::http::StatusCode;
use salvo::writing::Json;
use serde::Serialize;
use tracing::error;

use crate::error::AppResult;
use crate::state::get_state_from_depot;
use cadence_core::user::User;
use cadence_service::error::ServiceError;

pub mod depot_keys {
    /// Depot key holding the authenticated [`cadence_core::user::User`].
    pub const CURRENT_USER: &str = "current_user";
}

const NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";

#[derive(Debug, Serialize)]
struct AuthErrorResponse {
    detail: &'static str,
}

/// ## Summary
/// Authentication middleware that resolves the bearer token to a user and
/// stores the user in the depot. If authentication fails, a 401
/// Unauthorized response is returned and the rest of the chain is skipped.
///
/// ## Side Effects
/// Inserts the authenticated user into the depot under
/// [`depot_keys::CURRENT_USER`] for downstream handlers to access.
///
/// ## Errors
/// Returns an HTTP 401 Unauthorized response if the Authorization header
/// is missing, the token is not a valid access token, or its subject no
/// longer exists.
pub struct AuthMiddleware;

#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::trace!("Authenticating request");

        let state = match get_state_from_depot(depot) {
            Ok(s) => s,
            Err(e) => {
                error!(error = ?e, "Failed to get application state from depot");
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
                return;
            }
        };

        let Some(token) = bearer_token(req) else {
            reject(res, ctrl);
            return;
        };

        let user_id = match state.tokens.verify_access(token) {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected bearer token");
                reject(res, ctrl);
                return;
            }
        };

        match state.users.find_by_id(user_id).await {
            Ok(Some(user)) => {
                tracing::debug!(user_id = %user.id, "User authenticated successfully");
                depot.insert(depot_keys::CURRENT_USER, user);
            }
            Ok(None) => {
                tracing::debug!(%user_id, "Access token subject no longer exists");
                reject(res, ctrl);
            }
            Err(e) => {
                error!(error = ?e, "Failed to load access token subject");
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
            }
        }
    }
}

fn bearer_token(req: &salvo::Request) -> Option<&str> {
    req.headers()
        .get(salvo::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn reject(res: &mut salvo::Response, ctrl: &mut salvo::FlowCtrl) {
    res.status_code(StatusCode::UNAUTHORIZED);
    res.render(Json(AuthErrorResponse {
        detail: NOT_AUTHENTICATED,
    }));
    ctrl.skip_rest();
}

/// ## Summary
/// Retrieves the authenticated user placed in the depot by [`AuthMiddleware`].
///
/// ## Errors
/// Returns an error if no user was stored, which means the route is missing
/// the authentication hoop.
pub fn get_current_user(depot: &Depot) -> AppResult<User> {
    depot
        .get::<User>(depot_keys::CURRENT_USER)
        .map(Clone::clone)
        .map_err(|_err| ServiceError::NotAuthenticated.into())
}
