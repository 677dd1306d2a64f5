use crate::{
    auth::{auth::AuthUser, session::SessionStore, throttle::ThrottleRegistry, validate},
    error::AppError,
    models::{ForgotPasswordReq, LoginReqDto, LoginResponse, SessionUser},
    store::StoreClient,
};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde_json::json;
use tracing::{debug, info, instrument};

// auth end points

/// Login handler
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed email or short password"),
        (status = 401, description = "Invalid credentials"),
        (status = 429, description = "Locked out after too many failed attempts", body = Object, example = json!({
            "error": "Too many failed attempts, try again in 300 seconds",
            "seconds_remaining": 300
        })),
        (status = 502, description = "Store unreachable")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(body, store, sessions, throttles),
    fields(email = %body.email)
)]
pub async fn login(
    body: web::Json<LoginReqDto>,
    store: web::Data<StoreClient>,
    sessions: web::Data<SessionStore>,
    throttles: web::Data<ThrottleRegistry>,
) -> Result<HttpResponse, AppError> {
    info!("Login request received");

    // 1. Local validation, nothing malformed reaches the store
    validate::validate_credentials(&body.email, &body.password)?;

    // 2. Lockout check, before any store contact
    let throttle = throttles.entry(&body.email).await;
    let state = throttle.state();
    if state.is_locked {
        info!(
            seconds_remaining = state.lockout_seconds_remaining,
            "Login rejected: locked out"
        );
        return Err(AppError::Lockout {
            seconds_remaining: state.lockout_seconds_remaining,
        });
    }

    // 3. Credential match against the store
    debug!("Checking credentials against the store");
    let user = store
        .find_user(&body.email, &body.password)
        .await
        .map_err(AppError::network)?;

    match user {
        Some(user) => {
            throttle.record_attempt(true);

            let session_user = SessionUser::from(user);
            let token = sessions.create(session_user.clone()).await;

            info!(user_id = session_user.id, "Login successful");
            Ok(HttpResponse::Ok().json(LoginResponse {
                token,
                user: session_user,
            }))
        }
        None => {
            let state = throttle.record_attempt(false);
            info!(attempt_count = state.attempt_count, "Invalid credentials");

            if state.is_locked {
                Err(AppError::Lockout {
                    seconds_remaining: state.lockout_seconds_remaining,
                })
            } else {
                Err(AppError::Credentials)
            }
        }
    }
}

/// Account existence check backing the password-reset flow
#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    request_body = ForgotPasswordReq,
    responses(
        (status = 200, description = "Lookup completed", body = Object, example = json!({ "exists": true })),
        (status = 400, description = "Malformed email"),
        (status = 502, description = "Store unreachable")
    ),
    tag = "Auth"
)]
pub async fn forgot_password(
    body: web::Json<ForgotPasswordReq>,
    store: web::Data<StoreClient>,
) -> Result<HttpResponse, AppError> {
    validate::validate_email(&body.email)?;

    let exists = store
        .user_exists(&body.email)
        .await
        .map_err(AppError::network)?;

    Ok(HttpResponse::Ok().json(json!({ "exists": exists })))
}

/// Logout handler. Idempotent: succeeds whether or not the session existed.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Session removed (or never existed)")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout(req: HttpRequest, sessions: web::Data<SessionStore>) -> impl Responder {
    if let Some(token) = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
    {
        sessions.remove(token).await;
    }

    HttpResponse::NoContent().finish()
}

/// Who the current session belongs to. 401 when the session is absent.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Current session user", body = SessionUser),
        (status = 401, description = "No valid session")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn session(auth: AuthUser) -> impl Responder {
    HttpResponse::Ok().json(SessionUser {
        id: auth.user_id,
        username: auth.username,
        email: auth.email,
    })
}
