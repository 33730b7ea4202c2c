use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    #[default]
    Borrowed,
    Returned,
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanStatus::Borrowed => write!(f, "Borrowed"),
            LoanStatus::Returned => write!(f, "Returned"),
        }
    }
}

/// One borrow event in the ledger.
///
/// `book_title` is a snapshot taken at borrow time; later catalog edits or
/// deletes do not touch it. `book_id` is a soft reference — the engine, not
/// the store, checks the book exists. Dates persist as `YYYY-MM-DD`.
///
/// Older persisted records may lack `status` and `fine`; they read as
/// `Borrowed` and `0`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub borrower_name: String,
    pub book_id: String,
    pub book_title: String,
    pub date_borrowed: NaiveDate,
    pub date_due: NaiveDate,
    #[serde(default)]
    pub status: LoanStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_returned: Option<NaiveDate>,
    #[serde(default)]
    pub fine: u32,
}

impl Loan {
    /// A loan is active until it is returned.
    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Borrowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan() -> Loan {
        Loan {
            borrower_name: "Jane Doe".to_string(),
            book_id: "B1".to_string(),
            book_title: "Dune".to_string(),
            date_borrowed: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            date_due: NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            status: LoanStatus::Borrowed,
            date_returned: None,
            fine: 0,
        }
    }

    #[test]
    fn dates_persist_as_ymd_strings() {
        let json = serde_json::to_value(loan()).unwrap();
        assert_eq!(json["dateBorrowed"], "2024-01-01");
        assert_eq!(json["dateDue"], "2024-01-16");
        assert_eq!(json["status"], "Borrowed");
        assert!(json.get("dateReturned").is_none());
    }

    #[test]
    fn missing_status_and_fine_read_as_defaults() {
        let raw = r#"{
            "borrowerName": "Jane Doe",
            "bookId": "B1",
            "bookTitle": "Dune",
            "dateBorrowed": "2024-01-01",
            "dateDue": "2024-01-16"
        }"#;
        let loan: Loan = serde_json::from_str(raw).unwrap();
        assert_eq!(loan.status, LoanStatus::Borrowed);
        assert_eq!(loan.fine, 0);
        assert_eq!(loan.date_returned, None);
        assert!(loan.is_active());
    }

    #[test]
    fn returned_loans_are_not_active() {
        let mut loan = loan();
        loan.status = LoanStatus::Returned;
        assert!(!loan.is_active());
    }
}
