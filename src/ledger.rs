use chrono::NaiveDate;

use crate::error::EngineError;
use crate::loan::{Loan, LoanStatus};
use crate::store::RecordStore;

/// The borrow/return history over any record store.
///
/// Append-only at creation; the single in-place mutation is
/// `mark_returned`. Loans are never deleted. Uniqueness of "one active loan
/// per book" is the engine's job (via the catalog's availability flag), not
/// this layer's.
pub struct Ledger<S> {
    store: S,
}

impl<S> Ledger<S> {
    pub fn new(store: S) -> Self {
        Ledger { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: RecordStore<Loan>> Ledger<S> {
    /// Append a new loan. No uniqueness check at this layer.
    pub fn append(&self, loan: Loan) -> Result<(), EngineError> {
        let mut loans = self.store.load_all()?;
        loans.push(loan);
        self.store.replace_all(&loans)?;
        Ok(())
    }

    /// The most recent Borrowed loan for `book_id`, or `None`.
    pub fn find_active_by_book_id(&self, book_id: &str) -> Result<Option<Loan>, EngineError> {
        let loans = self.store.load_all()?;
        Ok(loans
            .into_iter()
            .rev()
            .find(|loan| loan.book_id == book_id && loan.is_active()))
    }

    /// Close the first (in ledger order) Borrowed loan for `book_id`.
    ///
    /// Should several Borrowed loans exist for one id — impossible under
    /// correct engine use — only the first is updated; that tie-break is
    /// deliberate and matches the original behavior.
    pub fn mark_returned(
        &self,
        book_id: &str,
        date_returned: NaiveDate,
        fine: u32,
    ) -> Result<Loan, EngineError> {
        let mut loans = self.store.load_all()?;
        let loan = loans
            .iter_mut()
            .find(|loan| loan.book_id == book_id && loan.is_active())
            .ok_or_else(|| EngineError::NotFound(book_id.to_string()))?;
        loan.status = LoanStatus::Returned;
        loan.date_returned = Some(date_returned);
        loan.fine = fine;
        let updated = loan.clone();
        self.store.replace_all(&loans)?;
        Ok(updated)
    }

    /// Case-insensitive substring match on the loan's title snapshot.
    /// Ledger order preserved; snapshot semantics.
    pub fn search(&self, pattern: &str) -> Result<Vec<Loan>, EngineError> {
        let needle = pattern.to_lowercase();
        let loans = self.store.load_all()?;
        Ok(loans
            .into_iter()
            .filter(|loan| loan.book_title.to_lowercase().contains(&needle))
            .collect())
    }

    /// The full ledger in insertion order.
    pub fn list(&self) -> Result<Vec<Loan>, EngineError> {
        Ok(self.store.load_all()?)
    }
}
