use crate::model::user::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    #[schema(example = "hunter2")]
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ForgotPasswordReq {
    #[schema(example = "jdoe@example.com")]
    pub email: String,
}

/// What a session holds and what `/session` returns. Never carries the
/// password.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "jdoe")]
    pub username: String,
    #[schema(example = "jdoe@example.com")]
    pub email: String,
}

impl From<User> for SessionUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "b47cdd44-0ede-4b0e-8e4c-b2f1dca826fd")]
    pub token: String,
    pub user: SessionUser,
}
