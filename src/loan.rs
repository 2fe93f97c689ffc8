use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::config::LoanTerms;
use crate::decimal::{Money, Rate};
use crate::schedule::{LoanSnapshot, PaymentResult};
use crate::types::{LoanState, TerminalPrincipal};

/// one loan being paid down; balance never rises above its starting value
/// under an amortizing payment and never drops below zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    name: String,
    annual_rate: Rate,
    starting_balance: Money,
    balance: Money,
    default_monthly_payment: Money,
    state: LoanState,
}

impl Loan {
    /// create an active loan at its full starting balance.
    /// a non-positive balance yields a loan that is already settled
    pub fn new(
        name: impl Into<String>,
        annual_rate: Rate,
        balance: Money,
        default_monthly_payment: Money,
    ) -> Self {
        let name = name.into();
        let (balance_now, state) = if balance.is_positive() {
            (balance, LoanState::Active)
        } else {
            warn!(
                "loan {} created with non-positive balance {}, treating as settled",
                name, balance
            );
            (Money::ZERO, LoanState::Archived)
        };

        Self {
            name,
            annual_rate,
            starting_balance: balance,
            balance: balance_now,
            default_monthly_payment,
            state,
        }
    }

    pub fn from_terms(terms: &LoanTerms) -> Self {
        Self::new(
            terms.name.clone(),
            terms.annual_rate,
            terms.balance,
            terms.default_monthly_payment,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annual_rate(&self) -> Rate {
        self.annual_rate
    }

    pub fn starting_balance(&self) -> Money {
        self.starting_balance
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn default_monthly_payment(&self) -> Money {
        self.default_monthly_payment
    }

    pub fn state(&self) -> LoanState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == LoanState::Active
    }

    /// interest accrued on the current balance over one month
    pub fn monthly_interest(&self) -> Money {
        self.balance.monthly_interest(self.annual_rate)
    }

    /// apply one period's payment, recording zero principal on the payoff period
    pub fn make_payment(&mut self, amount: Money) -> PaymentResult {
        self.apply_payment(amount, TerminalPrincipal::Zero)
    }

    /// apply one period's payment.
    ///
    /// interest is simple monthly interest on the current balance; whatever remains
    /// of `amount` reduces principal. A payment that would take the balance to zero
    /// or below retires the loan and moves it to `Paid`. Principal is not guarded
    /// against going negative when `amount` is below the accrued interest.
    pub fn apply_payment(&mut self, amount: Money, terminal: TerminalPrincipal) -> PaymentResult {
        match self.state {
            LoanState::Active => {
                let interest = self.monthly_interest();
                let mut principal = amount - interest;

                if (self.balance - principal).is_positive() {
                    self.balance -= principal;
                } else {
                    principal = match terminal {
                        TerminalPrincipal::Zero => Money::ZERO,
                        TerminalPrincipal::Actual => self.balance,
                    };
                    self.balance = Money::ZERO;
                    self.state = LoanState::Paid;
                }

                trace!(
                    "loan {} paid {} (interest {}, principal {}), balance now {}",
                    self.name, amount, interest, principal, self.balance
                );

                PaymentResult {
                    payment_amount: amount,
                    interest_amount: interest,
                    principal_amount: principal,
                }
            }
            LoanState::Paid | LoanState::Archived => {
                warn!("payment of {} offered to settled loan {}, ignoring", amount, self.name);
                PaymentResult::zero()
            }
        }
    }

    /// release the freed minimum payment exactly once after payoff
    pub fn rollover(&mut self) -> Money {
        match self.state {
            LoanState::Paid => {
                self.state = LoanState::Archived;
                self.default_monthly_payment
            }
            LoanState::Active | LoanState::Archived => Money::ZERO,
        }
    }

    /// read-only view of the loan as it stands now
    pub fn snapshot(&self) -> LoanSnapshot {
        LoanSnapshot {
            name: self.name.clone(),
            annual_rate: self.annual_rate,
            starting_balance: self.starting_balance,
            default_monthly_payment: self.default_monthly_payment,
            state: self.state,
        }
    }
}
