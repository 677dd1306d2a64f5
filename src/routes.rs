use crate::{api::attendance, auth::handlers, config::Config};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(web::resource("/login").route(web::post().to(handlers::login)))
            .service(
                web::resource("/forgot-password")
                    .route(web::post().to(handlers::forgot_password)),
            )
            .service(web::resource("/logout").route(web::post().to(handlers::logout))),
    );

    // Session-protected routes (the AuthUser extractor rejects requests
    // without a live session)
    cfg.service(
        web::scope(&config.api_prefix)
            .service(web::resource("/session").route(web::get().to(handlers::session)))
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::post().to(attendance::clock_in))
                            .route(web::put().to(attendance::clock_out)),
                    )
                    // /attendance/records
                    .service(
                        web::resource("/records")
                            .route(web::get().to(attendance::list_time_records)),
                    ),
            ),
    );
}
