use crate::decimal::Money;

/// minimum payments freed by paid-off loans, held across one period boundary.
/// the first loan to claim in a period takes the whole available amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RolloverPool {
    pending_balance: Money,
    available_balance: Money,
}

impl RolloverPool {
    pub(crate) fn new(monthly_balance: Money) -> Self {
        Self {
            pending_balance: monthly_balance,
            available_balance: monthly_balance,
        }
    }

    /// add whatever is available to `amount` and empty the pool for the rest of the period
    pub(crate) fn apply_rollover(&mut self, amount: Money) -> Money {
        let claimed = std::mem::replace(&mut self.available_balance, Money::ZERO);
        amount + claimed
    }

    /// replace both balances with the amount freed this period
    pub(crate) fn add_monthly_balance(&mut self, amount: Money) {
        self.pending_balance = amount;
        self.available_balance = amount;
    }

    /// offer the pending amount again
    pub(crate) fn reset_rollover(&mut self) {
        self.available_balance = self.pending_balance;
    }

    pub(crate) fn pending_balance(&self) -> Money {
        self.pending_balance
    }

    pub(crate) fn available_balance(&self) -> Money {
        self.available_balance
    }
}
