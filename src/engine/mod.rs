//! The circulation engine: catalog + ledger behind one mutual-exclusion
//! boundary, enforcing the lending workflow atomically.

mod engine;
mod policy;

pub use engine::{BorrowRequest, CirculationEngine, ReturnReceipt};
pub use policy::LoanPolicy;
