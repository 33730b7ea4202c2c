use crate::book::{Book, BookUpdate};
use crate::error::EngineError;
use crate::store::RecordStore;

/// The book inventory over any record store.
///
/// Every mutating operation is a full load-mutate-replace cycle; callers
/// that need atomicity across operations (the engine) serialize them with
/// their own lock.
pub struct Catalog<S> {
    store: S,
}

impl<S> Catalog<S> {
    pub fn new(store: S) -> Self {
        Catalog { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: RecordStore<Book>> Catalog<S> {
    /// Exact match on `id`. Absence is `None`, not an error.
    pub fn find_by_id(&self, id: &str) -> Result<Option<Book>, EngineError> {
        let books = self.store.load_all()?;
        Ok(books.into_iter().find(|book| book.id == id))
    }

    /// Exact match on `title`; the first catalog entry wins when titles
    /// collide.
    pub fn find_by_title(&self, title: &str) -> Result<Option<Book>, EngineError> {
        let books = self.store.load_all()?;
        Ok(books.into_iter().find(|book| book.title == title))
    }

    /// Case-insensitive substring match on `title`. The empty pattern
    /// matches everything; catalog order is preserved. Returns a snapshot —
    /// a fresh call re-reads the store.
    pub fn search(&self, pattern: &str) -> Result<Vec<Book>, EngineError> {
        let needle = pattern.to_lowercase();
        let books = self.store.load_all()?;
        Ok(books
            .into_iter()
            .filter(|book| book.title.to_lowercase().contains(&needle))
            .collect())
    }

    /// Append a book. New entries are always available, whatever flag the
    /// caller passed in.
    pub fn add(&self, book: Book) -> Result<(), EngineError> {
        let mut books = self.store.load_all()?;
        if books.iter().any(|existing| existing.id == book.id) {
            return Err(EngineError::DuplicateId(book.id));
        }
        books.push(Book {
            available: true,
            ..book
        });
        self.store.replace_all(&books)?;
        Ok(())
    }

    /// Replace the mutable fields of an existing book. `id` never changes.
    pub fn edit(&self, id: &str, update: BookUpdate) -> Result<(), EngineError> {
        let mut books = self.store.load_all()?;
        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;
        book.title = update.title;
        book.author = update.author;
        book.genre = update.genre;
        book.available = update.available;
        self.store.replace_all(&books)?;
        Ok(())
    }

    /// Delete a book. A no-op, not an error, when the id is absent.
    /// Existing loans keep their denormalized title snapshot.
    pub fn remove(&self, id: &str) -> Result<(), EngineError> {
        let mut books = self.store.load_all()?;
        let before = books.len();
        books.retain(|book| book.id != id);
        if books.len() != before {
            self.store.replace_all(&books)?;
        }
        Ok(())
    }

    /// Set the availability flag. Idempotent.
    pub fn set_availability(&self, id: &str, available: bool) -> Result<(), EngineError> {
        let mut books = self.store.load_all()?;
        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;
        book.available = available;
        self.store.replace_all(&books)?;
        Ok(())
    }
}
