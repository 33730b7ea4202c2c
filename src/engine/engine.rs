use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use super::LoanPolicy;
use crate::book::{Book, BookUpdate};
use crate::catalog::Catalog;
use crate::error::EngineError;
use crate::ledger::Ledger;
use crate::loan::{Loan, LoanStatus};
use crate::store::RecordStore;

/// A borrow request as it arrives from the presentation layer, raw user
/// input included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BorrowRequest {
    pub first_name: String,
    pub last_name: String,
    pub book_id: String,
    pub date_borrowed: NaiveDate,
}

impl BorrowRequest {
    // Fixed field order; the first blank field is the one reported.
    fn validate(&self) -> Result<(), EngineError> {
        if self.first_name.trim().is_empty() {
            return Err(EngineError::Validation {
                field: "first name",
            });
        }
        if self.last_name.trim().is_empty() {
            return Err(EngineError::Validation { field: "last name" });
        }
        if self.book_id.trim().is_empty() {
            return Err(EngineError::Validation { field: "book id" });
        }
        Ok(())
    }
}

/// What a successful return hands back for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnReceipt {
    pub fine: u32,
    pub status: LoanStatus,
    pub date_returned: NaiveDate,
}

/// The workflow state machine over catalog and ledger.
///
/// Every mutating operation holds the engine mutex for its whole
/// load-mutate-store cycle, so two concurrent borrows can never both see an
/// available book. Read-only operations go straight to the stores; the
/// stores' atomic replace guarantees they see a pre- or post-mutation
/// snapshot, never a partial one.
pub struct CirculationEngine<C, L> {
    catalog: Catalog<C>,
    ledger: Ledger<L>,
    policy: LoanPolicy,
    mutation: Mutex<()>,
}

impl<C: RecordStore<Book>, L: RecordStore<Loan>> CirculationEngine<C, L> {
    pub fn new(catalog_store: C, ledger_store: L) -> Self {
        Self::with_policy(catalog_store, ledger_store, LoanPolicy::default())
    }

    pub fn with_policy(catalog_store: C, ledger_store: L, policy: LoanPolicy) -> Self {
        CirculationEngine {
            catalog: Catalog::new(catalog_store),
            ledger: Ledger::new(ledger_store),
            policy,
            mutation: Mutex::new(()),
        }
    }

    pub fn policy(&self) -> LoanPolicy {
        self.policy
    }

    /// The due date this engine would assign to a loan taken out on
    /// `date_borrowed`. Lets a presentation layer prefill its form.
    pub fn due_date(&self, date_borrowed: NaiveDate) -> NaiveDate {
        self.policy.due_date(date_borrowed)
    }

    fn guard(&self, operation: &'static str) -> Result<MutexGuard<'_, ()>, EngineError> {
        self.mutation
            .lock()
            .map_err(|_| EngineError::LockPoisoned(operation))
    }

    /// Borrow a book: validate, resolve, gate on availability, open the
    /// loan, flip the flag. Ledger is persisted before the catalog; both
    /// are durable before this returns.
    pub fn borrow(&self, request: BorrowRequest) -> Result<Loan, EngineError> {
        let _guard = self.guard("borrow")?;
        request.validate()?;

        let book = self
            .catalog
            .find_by_id(&request.book_id)?
            .ok_or_else(|| EngineError::NotFound(request.book_id.clone()))?;
        if !book.available {
            return Err(EngineError::AlreadyBorrowed(book.id));
        }

        let loan = Loan {
            borrower_name: format!(
                "{} {}",
                request.first_name.trim(),
                request.last_name.trim()
            ),
            book_id: book.id.clone(),
            book_title: book.title.clone(),
            date_borrowed: request.date_borrowed,
            date_due: self.policy.due_date(request.date_borrowed),
            status: LoanStatus::Borrowed,
            date_returned: None,
            fine: 0,
        };
        self.ledger.append(loan.clone())?;
        self.catalog.set_availability(&book.id, false)?;
        Ok(loan)
    }

    /// Return a book. `book_ref` resolves by id first, then by exact title
    /// — the selection typically comes from a displayed loan row, which
    /// carries the title snapshot.
    pub fn return_book(
        &self,
        book_ref: &str,
        date_returned: NaiveDate,
    ) -> Result<ReturnReceipt, EngineError> {
        let _guard = self.guard("return")?;

        let book = match self.catalog.find_by_id(book_ref)? {
            Some(book) => book,
            None => self
                .catalog
                .find_by_title(book_ref)?
                .ok_or_else(|| EngineError::NotFound(book_ref.to_string()))?,
        };
        let loan = self
            .ledger
            .find_active_by_book_id(&book.id)?
            .ok_or_else(|| EngineError::NotFound(book.id.clone()))?;

        let fine = self.policy.fine_for(loan.date_due, date_returned);
        self.ledger.mark_returned(&book.id, date_returned, fine)?;
        self.catalog.set_availability(&book.id, true)?;

        Ok(ReturnReceipt {
            fine,
            status: LoanStatus::Returned,
            date_returned,
        })
    }

    /// Add a book to the catalog. `DuplicateId` surfaces verbatim.
    pub fn add_book(&self, book: Book) -> Result<(), EngineError> {
        let _guard = self.guard("add book")?;
        self.catalog.add(book)
    }

    /// Edit a book's mutable fields. `NotFound` if absent.
    pub fn edit_book(&self, id: &str, update: BookUpdate) -> Result<(), EngineError> {
        let _guard = self.guard("edit book")?;
        self.catalog.edit(id, update)
    }

    /// Delete a book. Idempotent no-op on absence.
    pub fn delete_book(&self, id: &str) -> Result<(), EngineError> {
        let _guard = self.guard("delete book")?;
        self.catalog.remove(id)
    }

    /// Case-insensitive title search over the catalog.
    pub fn search_books(&self, pattern: &str) -> Result<Vec<Book>, EngineError> {
        self.catalog.search(pattern)
    }

    /// Single-book lookup for a presentation layer's row-selection prefill.
    pub fn find_book(&self, id: &str) -> Result<Option<Book>, EngineError> {
        self.catalog.find_by_id(id)
    }

    /// The full ledger in insertion order. A loan's stored `status` field
    /// is the source of truth for display — it is monotonic and unaffected
    /// by later borrows of the same book id.
    pub fn list_history(&self) -> Result<Vec<Loan>, EngineError> {
        self.ledger.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn engine() -> CirculationEngine<InMemoryStore<Book>, InMemoryStore<Loan>> {
        CirculationEngine::new(InMemoryStore::new(), InMemoryStore::new())
    }

    fn date(ymd: &str) -> NaiveDate {
        ymd.parse().unwrap()
    }

    fn request(book_id: &str) -> BorrowRequest {
        BorrowRequest {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            book_id: book_id.to_string(),
            date_borrowed: date("2024-01-01"),
        }
    }

    #[test]
    fn validation_reports_the_first_blank_field_in_order() {
        let engine = engine();

        let mut all_blank = request("");
        all_blank.first_name = "  ".to_string();
        all_blank.last_name = String::new();
        assert_eq!(
            engine.borrow(all_blank).unwrap_err(),
            EngineError::Validation { field: "first name" }
        );

        let mut no_last = request("");
        no_last.last_name = String::new();
        assert_eq!(
            engine.borrow(no_last).unwrap_err(),
            EngineError::Validation { field: "last name" }
        );

        assert_eq!(
            engine.borrow(request("")).unwrap_err(),
            EngineError::Validation { field: "book id" }
        );
    }

    #[test]
    fn borrow_concatenates_the_borrower_name() {
        let engine = engine();
        engine
            .add_book(Book::new("B1", "Dune", "Frank Herbert", "Science Fiction"))
            .unwrap();
        let loan = engine.borrow(request("B1")).unwrap();
        assert_eq!(loan.borrower_name, "Jane Doe");
        assert_eq!(loan.book_title, "Dune");
        assert_eq!(loan.date_due, date("2024-01-16"));
    }

    #[test]
    fn borrow_missing_book_is_not_found() {
        let engine = engine();
        assert_eq!(
            engine.borrow(request("B9")).unwrap_err(),
            EngineError::NotFound("B9".to_string())
        );
    }

    #[test]
    fn due_date_prefill_matches_the_policy() {
        let engine = engine();
        assert_eq!(engine.due_date(date("2024-01-01")), date("2024-01-16"));
    }

    #[test]
    fn engine_stays_usable_after_a_failed_call() {
        let engine = engine();
        assert!(engine.borrow(request("B9")).is_err());
        engine
            .add_book(Book::new("B9", "Emma", "Jane Austen", "Romance"))
            .unwrap();
        assert!(engine.borrow(request("B9")).is_ok());
    }
}
