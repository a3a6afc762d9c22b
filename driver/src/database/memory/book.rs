use error_stack::Report;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con.books().clone())
    }

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.books().iter().find(|book| book.id() == id).cloned())
    }

    async fn count(&self, con: &mut InMemoryTransaction) -> error_stack::Result<i64, KernelError> {
        i64::try_from(con.books().len()).map_err(|error| {
            Report::new(error)
                .change_context(KernelError::Internal)
                .attach_printable("collection length does not fit an id")
        })
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        MemBookInternal::create(con.books_mut(), book);
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        MemBookInternal::update(con.books_mut(), book)
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        MemBookInternal::delete(con.books_mut(), book_id)
    }
}

pub(in crate::database) struct MemBookInternal;

impl MemBookInternal {
    fn position(books: &[Book], id: &BookId) -> Option<usize> {
        books.iter().position(|book| book.id() == id)
    }

    fn missing(id: &BookId) -> Report<KernelError> {
        Report::new(KernelError::NotFound)
            .attach_printable(format!("no book with id {}", i64::from(id.clone())))
    }

    fn create(books: &mut Vec<Book>, book: &Book) {
        tracing::debug!(id = i64::from(book.id().clone()), "append book");
        books.push(book.clone());
    }

    fn update(books: &mut [Book], book: &Book) -> error_stack::Result<(), KernelError> {
        let index = Self::position(books, book.id()).ok_or_else(|| Self::missing(book.id()))?;
        tracing::debug!(id = i64::from(book.id().clone()), index, "replace book");
        books[index] = book.clone();
        Ok(())
    }

    fn delete(books: &mut Vec<Book>, id: &BookId) -> error_stack::Result<(), KernelError> {
        let index = Self::position(books, id).ok_or_else(|| Self::missing(id))?;
        tracing::debug!(id = i64::from(id.clone()), index, "remove book");
        books.remove(index);
        Ok(())
    }
}
