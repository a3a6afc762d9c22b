use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::prelude::entity::{Book, BookAuthor, BookCopies, BookGenre, BookId, BookTitle};
use kernel::KernelError;

pub use self::book::*;

mod book;

/// Process-lifetime book collection guarded by a single lock.
///
/// Every transaction holds the lock until it is committed or dropped, so
/// operations never interleave.
#[derive(Clone)]
pub struct InMemoryDatabase {
    books: Arc<Mutex<Vec<Book>>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::with_books(seed())
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(Mutex::new(books)),
        }
    }
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<InMemoryTransaction, KernelError> {
        let guard = Arc::clone(&self.books).lock_owned().await;
        let staged = guard.clone();
        Ok(InMemoryTransaction { guard, staged })
    }
}

pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<Vec<Book>>,
    staged: Vec<Book>,
}

impl InMemoryTransaction {
    pub(in crate::database) fn books(&self) -> &Vec<Book> {
        &self.staged
    }

    pub(in crate::database) fn books_mut(&mut self) -> &mut Vec<Book> {
        &mut self.staged
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let Self { mut guard, staged } = self;
        *guard = staged;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

fn seed() -> Vec<Book> {
    [
        (1, "The Great Gatsby", "F. Scott Fitzgerald", "Fiction", 5),
        (2, "To Kill a Mockingbird", "Harper Lee", "Fiction", 3),
        (3, "1984", "George Orwell", "Dystopian Fiction", 7),
    ]
    .into_iter()
    .map(|(id, title, author, genre, copies)| {
        Book::new(
            BookId::new(id),
            BookTitle::new(title),
            BookAuthor::new(author),
            BookGenre::new(genre),
            BookCopies::new(copies),
        )
    })
    .collect()
}
