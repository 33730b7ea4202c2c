use chrono::{Duration, NaiveDate};

/// Lending policy: how long a loan runs and what a late day costs.
///
/// The defaults are the house rules — a 15-day loan period and a flat fine
/// of 5 units per overdue day, currency-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanPolicy {
    pub loan_period_days: i64,
    pub fine_per_day: u32,
}

impl Default for LoanPolicy {
    fn default() -> Self {
        LoanPolicy {
            loan_period_days: 15,
            fine_per_day: 5,
        }
    }
}

impl LoanPolicy {
    /// Due date for a loan taken out on `date_borrowed`.
    pub fn due_date(&self, date_borrowed: NaiveDate) -> NaiveDate {
        date_borrowed + Duration::days(self.loan_period_days)
    }

    /// Fine for a return on `date_returned` against `date_due`, in whole
    /// calendar days. Zero on or before the due date.
    pub fn fine_for(&self, date_due: NaiveDate, date_returned: NaiveDate) -> u32 {
        let overdue_days = (date_returned - date_due).num_days();
        if overdue_days > 0 {
            overdue_days as u32 * self.fine_per_day
        } else {
            0
        }
    }
}
