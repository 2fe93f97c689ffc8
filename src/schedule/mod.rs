pub mod calculator;
pub mod records;
mod rollover;

pub use calculator::ScheduleCalculator;
pub use records::{
    LoanSchedules, LoanSnapshot, LoanSummary, PaymentResult, ScheduleItem, TermSchedule,
};
