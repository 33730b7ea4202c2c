use serde::{Deserialize, Serialize};

/// A catalog entry. `id` is the immutable primary key; the descriptive
/// fields and the availability flag are editable after creation.
///
/// Older persisted records may lack the `available` field; it reads as
/// `true`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Book {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Book {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            available: true,
        }
    }
}

/// The mutable field set of a catalog edit. `id` is deliberately absent:
/// an edit can never change it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookUpdate {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_books_are_available() {
        let book = Book::new("B1", "Dune", "Frank Herbert", "Science Fiction");
        assert!(book.available);
    }

    #[test]
    fn persisted_fields_are_camel_case() {
        let book = Book::new("B1", "Dune", "Frank Herbert", "Science Fiction");
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["id"], "B1");
        assert_eq!(json["title"], "Dune");
        assert_eq!(json["author"], "Frank Herbert");
        assert_eq!(json["genre"], "Science Fiction");
        assert_eq!(json["available"], true);
    }

    #[test]
    fn missing_available_reads_as_true() {
        let raw = r#"{"id":"B1","title":"Dune","author":"Frank Herbert","genre":"Science Fiction"}"#;
        let book: Book = serde_json::from_str(raw).unwrap();
        assert!(book.available);
    }
}
