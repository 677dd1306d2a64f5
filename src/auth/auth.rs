use crate::auth::session::SessionStore;
use crate::error::AppError;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures::future::LocalBoxFuture;

/// The authenticated user behind a request, resolved from the Bearer session
/// token.
pub struct AuthUser {
    pub user_id: u64,
    pub username: String,
    pub email: String,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_owned);

        let sessions = req.app_data::<Data<SessionStore>>().cloned();

        Box::pin(async move {
            let token = token.ok_or(AppError::Unauthorized)?;

            let sessions = sessions.ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("Session store missing")
            })?;

            let user = sessions.get(&token).await.ok_or(AppError::Unauthorized)?;

            Ok(AuthUser {
                user_id: user.id,
                username: user.username,
                email: user.email,
            })
        })
    }
}
