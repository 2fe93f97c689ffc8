use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("invalid loan {loan}: {message}")]
    Validation {
        loan: String,
        message: String,
    },

    #[error("loan {loan} does not amortize: payment {payment} not above interest {interest}")]
    NonAmortizingLoan {
        loan: String,
        payment: Money,
        interest: Money,
    },

    #[error("term limit exceeded: {limit} terms elapsed with {outstanding} still outstanding")]
    TermLimitExceeded {
        limit: u32,
        outstanding: Money,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
