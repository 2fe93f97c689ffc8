use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::types::{IntakePolicy, RolloverMode, TerminalPrincipal};

/// 100 years of monthly terms
pub const DEFAULT_MAX_TERMS: u32 = 1200;

/// construction parameters for one loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub name: String,
    pub annual_rate: Rate,
    pub balance: Money,
    pub default_monthly_payment: Money,
}

impl LoanTerms {
    pub fn new(
        name: impl Into<String>,
        annual_rate: Rate,
        balance: Money,
        default_monthly_payment: Money,
    ) -> Self {
        Self {
            name: name.into(),
            annual_rate,
            balance,
            default_monthly_payment,
        }
    }

    /// parse a json array of loan terms
    pub fn list_from_json(json: &str) -> Result<Vec<LoanTerms>> {
        serde_json::from_str(json).map_err(|e| ScheduleError::InvalidConfiguration {
            message: format!("loan terms: {}", e),
        })
    }

    /// reject terms that cannot describe a real loan
    pub fn validate(&self) -> Result<()> {
        let fail = |message: &str| {
            Err(ScheduleError::Validation {
                loan: self.name.clone(),
                message: message.to_string(),
            })
        };

        if self.name.trim().is_empty() {
            return fail("name must not be empty");
        }
        if self.annual_rate.is_negative() {
            return fail("annual rate must not be negative");
        }
        if !self.balance.is_positive() {
            return fail("balance must be positive");
        }
        if !self.default_monthly_payment.is_positive() {
            return fail("default monthly payment must be positive");
        }

        Ok(())
    }

    /// the default payment must exceed the first period's interest.
    /// interest only falls as the balance falls, so this holds for every later period too
    pub fn check_amortizing(&self) -> Result<()> {
        let interest = self.balance.monthly_interest(self.annual_rate);
        if self.default_monthly_payment <= interest {
            return Err(ScheduleError::NonAmortizingLoan {
                loan: self.name.clone(),
                payment: self.default_monthly_payment,
                interest,
            });
        }
        Ok(())
    }
}

/// calculator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub intake: IntakePolicy,
    pub terminal_principal: TerminalPrincipal,
    pub rollover_mode: RolloverMode,
    pub max_terms: Option<u32>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            intake: IntakePolicy::Strict,
            terminal_principal: TerminalPrincipal::Zero,
            rollover_mode: RolloverMode::SinglePeriod,
            max_terms: None,
        }
    }
}

impl CalculatorConfig {
    /// accepts input uncritically, matching the original schedule output.
    /// lenient intake cannot prove termination, so the term guard is on
    pub fn reference() -> Self {
        Self {
            intake: IntakePolicy::Lenient,
            max_terms: Some(DEFAULT_MAX_TERMS),
            ..Self::default()
        }
    }

    /// strict intake with freed payments carried forward every period
    pub fn snowball() -> Self {
        Self {
            terminal_principal: TerminalPrincipal::Actual,
            rollover_mode: RolloverMode::Cumulative,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ScheduleError::InvalidConfiguration {
            message: format!("calculator config: {}", e),
        })
    }

    pub fn with_terminal_principal(mut self, terminal_principal: TerminalPrincipal) -> Self {
        self.terminal_principal = terminal_principal;
        self
    }

    pub fn with_rollover_mode(mut self, rollover_mode: RolloverMode) -> Self {
        self.rollover_mode = rollover_mode;
        self
    }

    pub fn with_max_terms(mut self, max_terms: Option<u32>) -> Self {
        self.max_terms = max_terms;
        self
    }
}
