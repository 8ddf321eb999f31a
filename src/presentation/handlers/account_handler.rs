use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        models::{account::RegisteredAccount, credential::CredentialInput},
        repositories::account_repository::AccountRepository,
        services::{credential_validator::FieldError, password_service::PasswordHasher},
    },
    usecase::register_account_usecase::{RegisterAccountUsecase, RegistrationOutcome},
};

const CREATED_MESSAGE: &str = "Your account has been created successfully!";
const INVALID_INPUT_MESSAGE: &str = "Please check your input and try again.";
const DUPLICATE_MESSAGE: &str =
    "An account with this email already exists. Please log in or use a different email.";
const INTERNAL_FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";

// Request

/// json for signup request
///
/// Missing fields deserialize as empty strings so they come back as
/// "required" field errors instead of a body rejection.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl From<SignupRequest> for CredentialInput {
    fn from(request: SignupRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
            confirm_password: request.confirm_password,
        }
    }
}

// Response

/// json envelope shared by every signup response
#[derive(Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AccountData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorItem>>,
}

impl SignupResponse {
    fn message(message: &str) -> Self {
        Self {
            message: message.to_string(),
            data: None,
            errors: None,
        }
    }
}

/// public account fields; the password hash never leaves the server
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<RegisteredAccount> for AccountData {
    fn from(account: RegisteredAccount) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.as_str().to_string(),
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorItem {
    pub field: String,
    pub message: String,
}

impl From<FieldError> for ErrorItem {
    fn from(error: FieldError) -> Self {
        Self {
            field: error.field.as_str().to_string(),
            message: error.message.to_string(),
        }
    }
}

impl IntoResponse for RegistrationOutcome {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            RegistrationOutcome::Created(account) => (
                StatusCode::CREATED,
                SignupResponse {
                    data: Some(account.into()),
                    ..SignupResponse::message(CREATED_MESSAGE)
                },
            ),
            RegistrationOutcome::InvalidInput(errors) => (
                StatusCode::BAD_REQUEST,
                SignupResponse {
                    errors: Some(errors.into_iter().map(ErrorItem::from).collect()),
                    ..SignupResponse::message(INVALID_INPUT_MESSAGE)
                },
            ),
            RegistrationOutcome::DuplicateAccount => {
                (StatusCode::CONFLICT, SignupResponse::message(DUPLICATE_MESSAGE))
            }
            RegistrationOutcome::InternalFailure => (
                StatusCode::INTERNAL_SERVER_ERROR,
                SignupResponse::message(INTERNAL_FAILURE_MESSAGE),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/* Router Function and Handler Function */

/// Router for the account endpoints, to be nested under `/api/v1/auth`.
pub fn create_account_router<R, P>(register_service: RegisterAccountUsecase<R, P>) -> Router
where
    R: AccountRepository + Clone + 'static,
    P: PasswordHasher,
{
    let state = AppState {
        register_service: Arc::new(register_service),
    };

    Router::new()
        .route("/signup", post(signup::<R, P>))
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState<R: AccountRepository, P: PasswordHasher> {
    pub register_service: Arc<RegisterAccountUsecase<R, P>>,
}

/// handler function for signup
async fn signup<R, P>(
    State(state): State<AppState<R, P>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Response
where
    R: AccountRepository + Clone + 'static,
    P: PasswordHasher,
{
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };

    state
        .register_service
        .register(payload.into())
        .await
        .into_response()
}

fn malformed_body(rejection: JsonRejection) -> Response {
    tracing::info!(error = %rejection.body_text(), "Signup body rejected");

    let body = SignupResponse {
        errors: Some(vec![ErrorItem {
            field: "body".to_string(),
            message: rejection.body_text(),
        }]),
        ..SignupResponse::message(INVALID_INPUT_MESSAGE)
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}
