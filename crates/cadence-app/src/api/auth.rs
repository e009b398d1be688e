use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::state::get_state_from_depot;
use cadence_core::constants::{LOGIN_ROUTE_COMPONENT, REGISTER_ROUTE_COMPONENT};
use cadence_service::auth::service as accounts;
use cadence_service::error::ServiceError;

pub const REGISTER_FIELDS_REQUIRED: &str = "Username, email, and password are required.";
pub const LOGIN_FIELDS_REQUIRED: &str = "Username and password are required.";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// ## Summary
/// Registration request payload. Missing fields deserialize to empty
/// strings so the presence check can report them uniformly.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// ## Summary
/// Registration response payload
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: RegisteredUser,
}

#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

/// ## Summary
/// Error response payload for account endpoints
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub detail: String,
}

/// ## Summary
/// Login request payload
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// ## Summary
/// POST /register - Register a new user with username, email, and password
///
/// ## Side Effects
/// - Creates a user row with an Argon2 password hash
///
/// ## Errors
/// Returns HTTP 400 if a field is missing or the username/email is taken
/// Returns HTTP 500 if persistence fails
#[handler]
async fn register_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    tracing::debug!("Processing user registration request");

    let register_req: RegisterRequest = match req.parse_json().await {
        Ok(r) => r,
        Err(e) => {
            error!(error = ?e, "Failed to parse registration request");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(DetailResponse {
                detail: "Invalid request body".to_string(),
            }));
            return;
        }
    };

    if register_req.username.is_empty()
        || register_req.email.is_empty()
        || register_req.password.is_empty()
    {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(DetailResponse {
            detail: REGISTER_FIELDS_REQUIRED.to_string(),
        }));
        return;
    }

    let state = match get_state_from_depot(depot) {
        Ok(s) => s,
        Err(e) => {
            error!(error = ?e, "Failed to get application state");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(DetailResponse {
                detail: "Internal server error".to_string(),
            }));
            return;
        }
    };

    match accounts::register(
        state.users.as_ref(),
        &register_req.username,
        &register_req.email,
        &register_req.password,
    )
    .await
    {
        Ok(user) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(RegisterResponse {
                message: "User registered successfully".to_string(),
                user: RegisteredUser {
                    id: user.id,
                    username: user.username,
                    email: user.email,
                },
            }));
        }
        Err(ServiceError::DuplicateAccount(detail)) => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(DetailResponse { detail }));
        }
        Err(e) => {
            error!(error = ?e, "Failed to register user");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(DetailResponse {
                detail: "Internal server error".to_string(),
            }));
        }
    }
}

/// ## Summary
/// POST /login - Verify credentials and mint an access/refresh token pair
///
/// ## Errors
/// Returns HTTP 400 if a field is missing
/// Returns HTTP 401 if the credentials are invalid
/// Returns HTTP 500 if verification fails for another reason
#[handler]
async fn login_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    tracing::debug!("Processing login request");

    let login_req: LoginRequest = match req.parse_json().await {
        Ok(r) => r,
        Err(e) => {
            error!(error = ?e, "Failed to parse login request");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(DetailResponse {
                detail: "Invalid request body".to_string(),
            }));
            return;
        }
    };

    if login_req.username.is_empty() || login_req.password.is_empty() {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(DetailResponse {
            detail: LOGIN_FIELDS_REQUIRED.to_string(),
        }));
        return;
    }

    let state = match get_state_from_depot(depot) {
        Ok(s) => s,
        Err(e) => {
            error!(error = ?e, "Failed to get application state");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(DetailResponse {
                detail: "Internal server error".to_string(),
            }));
            return;
        }
    };

    match accounts::login(
        state.users.as_ref(),
        &state.tokens,
        &login_req.username,
        &login_req.password,
    )
    .await
    {
        Ok(pair) => {
            res.render(Json(pair));
        }
        Err(ServiceError::InvalidCredentials) => {
            res.status_code(StatusCode::UNAUTHORIZED);
            res.render(Json(DetailResponse {
                detail: INVALID_CREDENTIALS.to_string(),
            }));
        }
        Err(e) => {
            error!(error = ?e, "Failed to process login");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(DetailResponse {
                detail: "Internal server error".to_string(),
            }));
        }
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(Router::with_path(REGISTER_ROUTE_COMPONENT).post(register_handler))
        .push(Router::with_path(LOGIN_ROUTE_COMPONENT).post(login_handler))
}
