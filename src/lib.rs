mod book;
mod catalog;
mod engine;
mod error;
mod ledger;
mod loan;
mod store;

pub use book::{Book, BookUpdate};
pub use catalog::Catalog;
pub use engine::{BorrowRequest, CirculationEngine, LoanPolicy, ReturnReceipt};
pub use error::EngineError;
pub use ledger::Ledger;
pub use loan::{Loan, LoanStatus};
pub use store::{InMemoryStore, JsonFileStore, RecordStore, StoreError};
