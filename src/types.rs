use serde::{Deserialize, Serialize};

/// loan lifecycle; transitions only move forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanState {
    /// balance outstanding, receiving payments
    Active,
    /// balance retired this run, freed payment not yet released
    Paid,
    /// freed payment already released to the rollover pool
    Archived,
}

impl LoanState {
    /// true for Paid and Archived
    pub fn is_settled(&self) -> bool {
        !matches!(self, LoanState::Active)
    }
}

/// principal recorded on the payment that retires a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TerminalPrincipal {
    /// record zero principal on the payoff period
    #[default]
    Zero,
    /// record the balance that was outstanding before the payoff payment
    Actual,
}

/// lifetime of a freed minimum payment inside the rollover pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RolloverMode {
    /// the pool is replaced every period; freed payments are offered for one period only
    #[default]
    SinglePeriod,
    /// freed payments accumulate and are offered again every period
    Cumulative,
}

/// how loan terms are checked before a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IntakePolicy {
    /// reject invalid and non-amortizing loans before any payment is made
    #[default]
    Strict,
    /// accept loans as supplied
    Lenient,
}
