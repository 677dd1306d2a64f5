use crate::api::attendance::{
    ClockOutRequest, TimeRecordListResponse, TimeRecordQuery, TimeRecordResponse,
};
use crate::auth::throttle::ThrottleState;
use crate::model::time_record::{RecordStatus, TimeInterval, TimeRecord};
use crate::models::{ForgotPasswordReq, LoginReqDto, LoginResponse, SessionUser};
use utoipa::Modify;
use utoipa::openapi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DTR Service API",
        version = "1.0.0",
        description = r#"
## Daily Time Record (DTR) Service

This API powers an employee **Daily Time Record** application: log in, clock
in and out, and browse attendance history.

### Key Features
- **Login** with client-side style validation and a failed-attempt lockout
  (three strikes, five-minute countdown)
- **Clock-in / clock-out** tracking with multiple work intervals per day
- **Attendance history**, most recent first, paginated

### Security
Login returns an opaque session token; pass it as a **Bearer** token.
Sessions have no expiry and end on logout.

### Response Format
- JSON-based RESTful responses
- Pagination supported for the records listing

---
Built with **Rust**, **Actix Web**, **Reqwest**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::forgot_password,
        crate::auth::handlers::logout,
        crate::auth::handlers::session,

        crate::api::attendance::clock_in,
        crate::api::attendance::clock_out,
        crate::api::attendance::list_time_records,
    ),
    components(
        schemas(
            LoginReqDto,
            LoginResponse,
            ForgotPasswordReq,
            SessionUser,
            ThrottleState,
            TimeRecord,
            TimeInterval,
            RecordStatus,
            ClockOutRequest,
            TimeRecordQuery,
            TimeRecordResponse,
            TimeRecordListResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login, logout and session APIs"),
        (name = "Attendance", description = "Clock-in/out and attendance history APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .build(),
                ),
            );
        }
    }
}
