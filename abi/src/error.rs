use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("invalid calendar date: {0}")]
    InvalidDate(String),

    #[error("invalid stay: check-out {check_out} must be after check-in {check_in}")]
    InvalidStay { check_in: String, check_out: String },

    #[error("invalid amount for {field}: {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("failed to read config file {path}: {reason}")]
    ConfigRead { path: String, reason: String },

    #[error("failed to parse config file {path}: {reason}")]
    ConfigParse { path: String, reason: String },
}
