pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod loan;
pub mod report;
pub mod schedule;
pub mod types;

// re-export key types
pub use config::{CalculatorConfig, LoanTerms, DEFAULT_MAX_TERMS};
pub use decimal::{Money, Rate};
pub use errors::{Result, ScheduleError};
pub use events::{EventStore, ScheduleEvent};
pub use loan::Loan;
pub use schedule::{
    LoanSchedules, LoanSnapshot, LoanSummary, PaymentResult, ScheduleCalculator, ScheduleItem,
    TermSchedule,
};
pub use types::{IntakePolicy, LoanState, RolloverMode, TerminalPrincipal};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;
