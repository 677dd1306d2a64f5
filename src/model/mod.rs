pub mod time_record;
pub mod user;
