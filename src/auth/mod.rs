pub mod auth;
pub mod handlers;
pub mod session;
pub mod throttle;
pub mod validate;
