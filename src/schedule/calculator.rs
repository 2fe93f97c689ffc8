use log::{debug, info, warn};

use crate::config::{CalculatorConfig, LoanTerms};
use crate::decimal::Money;
use crate::errors::{Result, ScheduleError};
use crate::events::{EventStore, ScheduleEvent};
use crate::loan::Loan;
use crate::types::{IntakePolicy, LoanState, RolloverMode};

use super::records::{LoanSchedules, PaymentResult, ScheduleItem, TermSchedule};
use super::rollover::RolloverPool;

/// drives the period loop across all loans
pub struct ScheduleCalculator {
    config: CalculatorConfig,
}

impl Default for ScheduleCalculator {
    fn default() -> Self {
        Self::new(CalculatorConfig::default())
    }
}

impl ScheduleCalculator {
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    /// build loans from their terms and calculate their combined schedule
    pub fn calculate(&self, terms: &[LoanTerms]) -> Result<LoanSchedules> {
        let loans = terms.iter().map(Loan::from_terms).collect();
        self.calculate_loans(loans)
    }

    /// run the period loop until every balance is zero.
    ///
    /// loans are processed in input order every term, so the first loan still
    /// carrying a balance claims the whole rollover pool. Payoffs in term t
    /// release their minimum payment into the pool for term t+1.
    pub fn calculate_loans(&self, mut loans: Vec<Loan>) -> Result<LoanSchedules> {
        self.check_intake(&loans)?;

        let mut events = EventStore::new();
        let mut pool = RolloverPool::new(Money::ZERO);
        let mut term_schedules = Vec::new();
        let mut term: u32 = 1;

        while loans.iter().any(|l| l.balance().is_positive()) {
            if let Some(limit) = self.config.max_terms {
                if term > limit {
                    return Err(ScheduleError::TermLimitExceeded {
                        limit,
                        outstanding: outstanding_balance(&loans),
                    });
                }
            }

            debug!("term {}: rollover available {}", term, pool.available_balance());

            let mut items = Vec::with_capacity(loans.len());
            for (loan_index, loan) in loans.iter_mut().enumerate() {
                let payment = if loan.is_active() {
                    let amount = pool.apply_rollover(loan.default_monthly_payment());
                    let bonus = amount - loan.default_monthly_payment();
                    if !bonus.is_zero() {
                        debug!("term {}: loan {} claims rollover {}", term, loan.name(), bonus);
                        events.emit(ScheduleEvent::RolloverClaimed {
                            term,
                            loan: loan.name().to_string(),
                            amount: bonus,
                        });
                    }

                    let result = loan.apply_payment(amount, self.config.terminal_principal);
                    if loan.state() == LoanState::Paid {
                        info!("loan {} paid off in term {}", loan.name(), term);
                        events.emit(ScheduleEvent::LoanPaidOff {
                            term,
                            loan: loan.name().to_string(),
                            final_payment: amount,
                        });
                    }
                    result
                } else {
                    PaymentResult::zero()
                };

                items.push(ScheduleItem {
                    term,
                    loan_index,
                    loan: loan.snapshot(),
                    payment,
                    balance: loan.balance(),
                });
            }
            term_schedules.push(TermSchedule { term, items });

            let freed = loans
                .iter_mut()
                .filter(|l| l.state() == LoanState::Paid)
                .map(|l| l.rollover())
                .fold(Money::ZERO, |acc, x| acc + x);

            if !freed.is_zero() {
                events.emit(ScheduleEvent::RolloverReleased { term, amount: freed });
            }

            match self.config.rollover_mode {
                RolloverMode::SinglePeriod => pool.add_monthly_balance(freed),
                RolloverMode::Cumulative => {
                    if freed.is_zero() {
                        pool.reset_rollover();
                    } else {
                        pool.add_monthly_balance(pool.pending_balance() + freed);
                    }
                }
            }

            term += 1;
        }

        let schedules = LoanSchedules {
            loans,
            term_schedules,
            events: Vec::new(),
        };
        let total_interest = schedules.total_interest();
        info!(
            "schedule complete: {} loans over {} terms, total interest {}",
            schedules.loans.len(),
            schedules.term_count(),
            total_interest.round_dp(2)
        );
        events.emit(ScheduleEvent::ScheduleCompleted {
            terms: term - 1,
            total_interest,
        });

        Ok(LoanSchedules {
            events: events.take_events(),
            ..schedules
        })
    }

    fn check_intake(&self, loans: &[Loan]) -> Result<()> {
        for loan in loans {
            let terms = LoanTerms::new(
                loan.name(),
                loan.annual_rate(),
                loan.starting_balance(),
                loan.default_monthly_payment(),
            );
            let checked = terms.validate().and_then(|()| terms.check_amortizing());

            match self.config.intake {
                IntakePolicy::Strict => checked?,
                IntakePolicy::Lenient => {
                    if let Err(e) = checked {
                        warn!("admitting loan despite failed intake check: {}", e);
                    }
                }
            }
        }
        Ok(())
    }
}

fn outstanding_balance(loans: &[Loan]) -> Money {
    loans
        .iter()
        .map(|l| l.balance())
        .fold(Money::ZERO, |acc, x| acc + x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_TERMS;
    use crate::decimal::Rate;
    use crate::types::TerminalPrincipal;
    use rust_decimal_macros::dec;
    use test_log::test;

    fn zero_rate(name: &str, balance: i64, payment: i64) -> LoanTerms {
        LoanTerms::new(
            name,
            Rate::ZERO,
            Money::from_major(balance),
            Money::from_major(payment),
        )
    }

    fn portfolio() -> Vec<LoanTerms> {
        vec![
            LoanTerms::new(
                "Loan 1",
                Rate::from_decimal(dec!(0.1865)),
                Money::from_decimal(dec!(9700.00)),
                Money::from_decimal(dec!(450.00)),
            ),
            LoanTerms::new(
                "Loan 2",
                Rate::from_decimal(dec!(0.0659)),
                Money::from_decimal(dec!(16726.00)),
                Money::from_decimal(dec!(279.00)),
            ),
            LoanTerms::new(
                "Loan 3",
                Rate::from_decimal(dec!(0.0399)),
                Money::from_decimal(dec!(18174.69)),
                Money::from_decimal(dec!(400.00)),
            ),
        ]
    }

    #[test]
    fn test_single_loan_schedule() {
        let terms = vec![LoanTerms::new(
            "Loan 1",
            Rate::from_decimal(dec!(0.12)),
            Money::from_decimal(dec!(1200.00)),
            Money::from_decimal(dec!(500.00)),
        )];

        let schedules = ScheduleCalculator::default().calculate(&terms).unwrap();
        assert_eq!(schedules.term_count(), 3);

        let first = &schedules.term(1).unwrap().items[0];
        assert_eq!(first.term, 1);
        assert_eq!(first.payment.payment_amount, Money::from_major(500));
        assert_eq!(first.payment.interest_amount, Money::from_major(12));
        assert_eq!(first.payment.principal_amount, Money::from_major(488));
        assert_eq!(first.balance, Money::from_major(712));

        let second = &schedules.term(2).unwrap().items[0];
        assert_eq!(second.payment.interest_amount, Money::from_decimal(dec!(7.12)));
        assert_eq!(second.payment.principal_amount, Money::from_decimal(dec!(492.88)));
        assert_eq!(second.balance, Money::from_decimal(dec!(219.12)));

        let third = &schedules.term(3).unwrap().items[0];
        assert_eq!(third.payment.payment_amount, Money::from_major(500));
        assert_eq!(third.payment.interest_amount.round_dp(2), Money::from_decimal(dec!(2.19)));
        assert_eq!(third.payment.principal_amount, Money::ZERO);
        assert_eq!(third.balance, Money::ZERO);
        assert_eq!(third.loan.state, LoanState::Paid);

        assert_eq!(schedules.loans[0].state(), LoanState::Archived);
        assert_eq!(schedules.payoff_term(0), Some(3));
        assert_eq!(schedules.total_interest(), Money::from_decimal(dec!(21.3112)));
        assert_eq!(
            schedules.events,
            vec![
                ScheduleEvent::LoanPaidOff {
                    term: 3,
                    loan: "Loan 1".to_string(),
                    final_payment: Money::from_major(500),
                },
                ScheduleEvent::RolloverReleased {
                    term: 3,
                    amount: Money::from_major(500),
                },
                ScheduleEvent::ScheduleCompleted {
                    terms: 3,
                    total_interest: Money::from_decimal(dec!(21.3112)),
                },
            ]
        );
    }

    #[test]
    fn test_empty_input_yields_empty_schedule() {
        let schedules = ScheduleCalculator::default().calculate(&[]).unwrap();
        assert!(schedules.is_empty());
        assert!(schedules.loans.is_empty());
        assert_eq!(schedules.total_paid(), Money::ZERO);
    }

    #[test]
    fn test_rollover_reaches_next_term_only() {
        let terms = vec![zero_rate("Short", 1_000, 600), zero_rate("Long", 5_000, 100)];
        let schedules = ScheduleCalculator::default().calculate(&terms).unwrap();

        // short loan pays off in term 2
        assert_eq!(schedules.payoff_term(0), Some(2));
        let term2 = schedules.term(2).unwrap();
        assert_eq!(term2.items[1].payment.payment_amount, Money::from_major(100));

        // freed payment lands in term 3 only
        let term3 = schedules.term(3).unwrap();
        assert_eq!(term3.items[0].payment, PaymentResult::zero());
        assert_eq!(term3.items[1].payment.payment_amount, Money::from_major(700));
        assert_eq!(term3.items[1].balance, Money::from_major(4_100));

        let term4 = schedules.term(4).unwrap();
        assert_eq!(term4.items[1].payment.payment_amount, Money::from_major(100));

        assert_eq!(schedules.term_count(), 44);
        assert_eq!(schedules.payoff_term(1), Some(44));
    }

    #[test]
    fn test_first_remaining_loan_claims_whole_pool() {
        let terms = vec![
            zero_rate("Short", 1_000, 600),
            zero_rate("Middle", 5_000, 100),
            zero_rate("Last", 3_000, 200),
        ];
        let schedules = ScheduleCalculator::default().calculate(&terms).unwrap();

        let term3 = schedules.term(3).unwrap();
        assert_eq!(term3.items[1].payment.payment_amount, Money::from_major(700));
        assert_eq!(term3.items[2].payment.payment_amount, Money::from_major(200));

        assert!(schedules.events.contains(&ScheduleEvent::RolloverClaimed {
            term: 3,
            loan: "Middle".to_string(),
            amount: Money::from_major(600),
        }));
    }

    #[test]
    fn test_cumulative_rollover_keeps_snowballing() {
        let terms = vec![zero_rate("Short", 1_000, 600), zero_rate("Long", 5_000, 100)];
        let calculator = ScheduleCalculator::new(
            CalculatorConfig::default().with_rollover_mode(RolloverMode::Cumulative),
        );
        let schedules = calculator.calculate(&terms).unwrap();

        for term in 3..=8 {
            let item = &schedules.term(term).unwrap().items[1];
            assert_eq!(item.payment.payment_amount, Money::from_major(700));
        }
        assert_eq!(schedules.term_count(), 9);
        assert_eq!(schedules.payoff_term(1), Some(9));
    }

    #[test]
    fn test_settled_loans_keep_zero_rows() {
        let schedules = ScheduleCalculator::default().calculate(&portfolio()).unwrap();

        for index in 0..schedules.loans.len() {
            let mut settled = false;
            for item in schedules.items_for(index) {
                if settled {
                    assert_eq!(item.balance, Money::ZERO);
                    assert_eq!(item.payment, PaymentResult::zero());
                    assert_eq!(item.loan.state, LoanState::Archived);
                }
                assert!(!item.balance.is_negative());
                settled = item.loan.state.is_settled();
            }
            assert!(settled);
        }

        let last = schedules.term_schedules.last().unwrap();
        assert!(last.items.iter().all(|i| i.balance == Money::ZERO));
        assert!(schedules.loans.iter().all(|l| l.state() == LoanState::Archived));
    }

    #[test]
    fn test_balance_ties_out_with_actual_principal() {
        let calculator = ScheduleCalculator::new(
            CalculatorConfig::default().with_terminal_principal(TerminalPrincipal::Actual),
        );
        let schedules = calculator.calculate(&portfolio()).unwrap();

        for (index, loan) in schedules.loans.iter().enumerate() {
            let mut principal_paid = Money::ZERO;
            for item in schedules.items_for(index) {
                principal_paid += item.payment.principal_amount;
                assert_eq!(loan.starting_balance() - principal_paid, item.balance);
            }
        }

        let starting = schedules
            .loans
            .iter()
            .map(|l| l.starting_balance())
            .fold(Money::ZERO, |acc, x| acc + x);
        let principal: Money = schedules
            .summaries()
            .iter()
            .map(|s| s.total_principal)
            .fold(Money::ZERO, |acc, x| acc + x);
        assert_eq!(starting, principal);
    }

    #[test]
    fn test_balance_ties_out_before_payoff_with_zero_principal() {
        let schedules = ScheduleCalculator::default().calculate(&portfolio()).unwrap();

        for (index, loan) in schedules.loans.iter().enumerate() {
            let mut principal_paid = Money::ZERO;
            for item in schedules.items_for(index) {
                principal_paid += item.payment.principal_amount;
                if item.loan.state == LoanState::Active {
                    assert_eq!(loan.starting_balance() - principal_paid, item.balance);
                }
            }
        }
    }

    #[test]
    fn test_summaries() {
        let terms = vec![zero_rate("Short", 1_000, 600), zero_rate("Long", 5_000, 100)];
        let schedules = ScheduleCalculator::new(CalculatorConfig::snowball())
            .calculate(&terms)
            .unwrap();

        let summaries = schedules.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "Short");
        assert_eq!(summaries[0].payoff_term, Some(2));
        assert_eq!(summaries[0].total_paid, Money::from_major(1_200));
        assert_eq!(summaries[0].total_principal, Money::from_major(1_000));
        assert_eq!(summaries[1].total_interest, Money::ZERO);
        assert_eq!(summaries[1].total_principal, Money::from_major(5_000));
    }

    #[test]
    fn test_strict_intake_rejects_invalid_loan() {
        let terms = vec![zero_rate("Good", 1_000, 100), zero_rate("Bad", 0, 100)];
        let result = ScheduleCalculator::default().calculate(&terms);
        assert!(matches!(result, Err(ScheduleError::Validation { loan, .. }) if loan == "Bad"));
    }

    #[test]
    fn test_strict_intake_rejects_non_amortizing_loan() {
        let terms = vec![LoanTerms::new(
            "Stuck",
            Rate::from_percentage(12),
            Money::from_major(1_200),
            Money::from_major(12),
        )];
        let result = ScheduleCalculator::default().calculate(&terms);
        assert!(matches!(result, Err(ScheduleError::NonAmortizingLoan { .. })));
    }

    #[test]
    fn test_strict_intake_runs_past_default_term_limit() {
        // amortizes by one cent in the first month
        let terms = vec![LoanTerms::new(
            "Long",
            Rate::from_percentage(12),
            Money::from_major(1_000_000),
            Money::from_decimal(dec!(10000.01)),
        )];
        let schedules = ScheduleCalculator::default().calculate(&terms).unwrap();

        assert!(schedules.term_count() > DEFAULT_MAX_TERMS as usize);
        assert_eq!(schedules.payoff_term(0), Some(schedules.term_count() as u32));
        assert_eq!(schedules.loans[0].balance(), Money::ZERO);
    }

    #[test]
    fn test_lenient_intake_hits_term_limit() {
        let terms = vec![LoanTerms::new(
            "Stuck",
            Rate::from_percentage(12),
            Money::from_major(1_200),
            Money::from_major(12),
        )];
        let calculator =
            ScheduleCalculator::new(CalculatorConfig::reference().with_max_terms(Some(24)));

        match calculator.calculate(&terms) {
            Err(ScheduleError::TermLimitExceeded { limit, outstanding }) => {
                assert_eq!(limit, 24);
                assert_eq!(outstanding, Money::from_major(1_200));
            }
            other => panic!("expected term limit error, got {:?}", other),
        }
    }

    #[test]
    fn test_lenient_intake_keeps_settled_rows_for_empty_loan() {
        let terms = vec![zero_rate("Empty", 0, 100), zero_rate("Real", 300, 100)];
        let schedules = ScheduleCalculator::new(CalculatorConfig::reference())
            .calculate(&terms)
            .unwrap();

        assert_eq!(schedules.term_count(), 3);
        for item in schedules.items_for(0) {
            assert_eq!(item.payment, PaymentResult::zero());
            assert_eq!(item.balance, Money::ZERO);
        }
        assert_eq!(schedules.payoff_term(0), None);
    }
}
