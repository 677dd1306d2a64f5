use actix_web::{HttpResponse, http::StatusCode};
use derive_more::Display;
use serde_json::json;

/// Application error taxonomy. Core logic returns these; the HTTP layer
/// decides how to present them (status code + `{"error": ...}` body).
#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(fmt = "Invalid email or password")]
    Credentials,

    #[display(fmt = "Too many failed attempts, try again in {} seconds", seconds_remaining)]
    Lockout { seconds_remaining: u32 },

    #[display(fmt = "Time record store is unavailable, please try again")]
    Network,

    #[display(fmt = "{}", _0)]
    InvalidState(String),

    #[display(fmt = "Invalid or expired session")]
    Unauthorized,
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidState(_) => StatusCode::BAD_REQUEST,
            AppError::Credentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Lockout { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Network => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = json!({ "error": self.to_string() });
        if let AppError::Lockout { seconds_remaining } = self {
            body["seconds_remaining"] = json!(seconds_remaining);
        }
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl AppError {
    /// Wrap a store round-trip failure: the cause is logged, never shown.
    pub fn network(err: anyhow::Error) -> Self {
        tracing::error!(error = %err, "Store request failed");
        AppError::Network
    }
}
