use crate::domain::{Registration, WaitlistRepository};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use waitlist_intake::domain::{ValidationError, WaitlistEmail};
use waitlist_intake::utils::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum RegisterError {
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for RegisterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for RegisterError {
    fn status_code(&self) -> StatusCode {
        match self {
            RegisterError::ValidationError(_) => StatusCode::BAD_REQUEST,
            RegisterError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(serde::Deserialize)]
pub struct RegisterBody {
    pub email: String,
}

#[derive(serde::Serialize)]
pub struct RegisterResponse {
    pub status: &'static str,
}

#[tracing::instrument(
    name = "Registering a waitlist email",
    skip(body, repo),
    fields(waitlist_email = tracing::field::Empty)
)]
pub async fn register(
    body: web::Json<RegisterBody>,
    repo: web::Data<dyn WaitlistRepository>,
) -> Result<HttpResponse, RegisterError> {
    let email = WaitlistEmail::parse(&body.email)?;
    tracing::Span::current().record("waitlist_email", tracing::field::display(&email));

    let registration = repo
        .register(&email)
        .await
        .context("Failed to store the waitlist entry.")?;

    let response = match registration {
        Registration::Created(entry) => {
            tracing::info!(entry_id = %entry.id, "Added to the waitlist");
            HttpResponse::Created().json(RegisterResponse { status: "created" })
        }
        Registration::AlreadyExists(entry) => {
            tracing::info!(entry_id = %entry.id, "Email already on the waitlist");
            HttpResponse::Ok().json(RegisterResponse {
                status: "already-exists",
            })
        }
    };

    Ok(response)
}
