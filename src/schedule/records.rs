use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::events::ScheduleEvent;
use crate::loan::Loan;
use crate::types::LoanState;

/// outcome of one loan's payment for one period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PaymentResult {
    pub payment_amount: Money,
    pub interest_amount: Money,
    pub principal_amount: Money,
}

impl PaymentResult {
    /// row for a loan that made no payment this period
    pub fn zero() -> Self {
        Self::default()
    }
}

/// read-only view of a loan captured when a schedule item is recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSnapshot {
    pub name: String,
    pub annual_rate: Rate,
    pub starting_balance: Money,
    pub default_monthly_payment: Money,
    pub state: LoanState,
}

/// one (loan, term) row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub term: u32,
    /// position of the loan in the input
    pub loan_index: usize,
    pub loan: LoanSnapshot,
    pub payment: PaymentResult,
    /// balance after the payment
    pub balance: Money,
}

/// all loans for one term, in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermSchedule {
    pub term: u32,
    pub items: Vec<ScheduleItem>,
}

impl TermSchedule {
    pub fn total_payment(&self) -> Money {
        self.items
            .iter()
            .map(|i| i.payment.payment_amount)
            .fold(Money::ZERO, |acc, x| acc + x)
    }
}

/// per-loan totals over a whole schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub name: String,
    /// term in which the balance reached zero, none if it started settled
    pub payoff_term: Option<u32>,
    pub total_paid: Money,
    pub total_interest: Money,
    pub total_principal: Money,
}

/// full result of a calculation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSchedules {
    pub loans: Vec<Loan>,
    pub term_schedules: Vec<TermSchedule>,
    pub events: Vec<ScheduleEvent>,
}

impl LoanSchedules {
    pub fn term_count(&self) -> usize {
        self.term_schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.term_schedules.is_empty()
    }

    /// schedule for a 1-based term
    pub fn term(&self, term: u32) -> Option<&TermSchedule> {
        if term == 0 {
            return None;
        }
        self.term_schedules.get((term - 1) as usize)
    }

    /// every row recorded for one loan, in term order
    pub fn items_for(&self, loan_index: usize) -> impl Iterator<Item = &ScheduleItem> + '_ {
        self.term_schedules
            .iter()
            .filter_map(move |t| t.items.get(loan_index))
    }

    /// term whose payment retired the loan
    pub fn payoff_term(&self, loan_index: usize) -> Option<u32> {
        self.items_for(loan_index)
            .find(|i| i.loan.state == LoanState::Paid)
            .map(|i| i.term)
    }

    pub fn total_interest(&self) -> Money {
        self.term_schedules
            .iter()
            .flat_map(|t| t.items.iter())
            .map(|i| i.payment.interest_amount)
            .fold(Money::ZERO, |acc, x| acc + x)
    }

    pub fn total_paid(&self) -> Money {
        self.term_schedules
            .iter()
            .map(|t| t.total_payment())
            .fold(Money::ZERO, |acc, x| acc + x)
    }

    pub fn summaries(&self) -> Vec<LoanSummary> {
        self.loans
            .iter()
            .enumerate()
            .map(|(index, loan)| {
                let mut total_paid = Money::ZERO;
                let mut total_interest = Money::ZERO;
                let mut total_principal = Money::ZERO;
                for item in self.items_for(index) {
                    total_paid += item.payment.payment_amount;
                    total_interest += item.payment.interest_amount;
                    total_principal += item.payment.principal_amount;
                }

                LoanSummary {
                    name: loan.name().to_string(),
                    payoff_term: self.payoff_term(index),
                    total_paid,
                    total_interest,
                    total_principal,
                }
            })
            .collect()
    }
}
