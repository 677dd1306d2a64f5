use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub store_base_url: String,

    // Login throttle
    pub max_login_attempts: u32,
    pub lockout_secs: u32,

    // Listing / pagination (presentation concern, not a data-model constraint)
    pub page_size: u32,
    pub list_limit: u32,

    pub store_timeout_secs: u64,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            store_base_url: env::var("STORE_BASE_URL").expect("STORE_BASE_URL must be set"),

            max_login_attempts: env::var("MAX_LOGIN_ATTEMPTS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .unwrap(),
            lockout_secs: env::var("LOCKOUT_SECS")
                .unwrap_or_else(|_| "300".to_string()) // default 5 min
                .parse()
                .unwrap(),

            page_size: env::var("PAGE_SIZE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap(),
            list_limit: env::var("LIST_LIMIT")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap(),

            store_timeout_secs: env::var("STORE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),
        }
    }
}
