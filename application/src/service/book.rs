use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::event::{Applier, BookEvent};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{Book, BookAuthor, BookCopies, BookGenre, BookId, BookTitle};
use kernel::KernelError;

use crate::transfer::{
    BookDto, CreateBookDto, DeleteBookDto, DeletedBookDto, GetBookDto, UpdateBookDto,
};

/// Strings only count as given when non-empty.
fn filled(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

fn not_found(id: i64) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("book {id} does not exist"))
}

#[async_trait::async_trait]
pub trait GetAllBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let books = self.book_query().find_all(&mut connection).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> GetAllBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(dto.id))?;

        Ok(BookDto::from(book))
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let CreateBookDto {
            title,
            author,
            genre,
            copies_available,
        } = dto;
        let (Some(title), Some(author)) = (filled(title), filled(author)) else {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("title and author must both be non-empty"));
        };

        let mut connection = self.database_connection().transact().await?;

        let count = self.book_query().count(&mut connection).await?;
        let event = BookEvent::Create {
            id: BookId::next(count),
            title: BookTitle::new(title),
            author: BookAuthor::new(author),
            genre: BookGenre::or_unknown(genre),
            copies_available: BookCopies::or_single(copies_available),
        };
        let mut book: Option<Book> = None;
        book.apply(event);
        let book = book.ok_or_else(|| {
            Report::new(KernelError::Internal).attach_printable("create event produced no book")
        })?;

        self.book_modifier().create(&mut connection, &book).await?;
        connection.commit().await?;

        tracing::debug!(id = i64::from(book.id().clone()), "created book");
        Ok(BookDto::from(book))
    }
}

impl<T> CreateBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let found = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(dto.id))?;

        let event = BookEvent::Update {
            id,
            title: filled(dto.title).map(BookTitle::new),
            author: filled(dto.author).map(BookAuthor::new),
            genre: filled(dto.genre).map(BookGenre::new),
            copies_available: dto.copies_available.map(BookCopies::new),
        };
        let mut book = Some(found);
        book.apply(event);
        let book = book.ok_or_else(|| not_found(dto.id))?;

        self.book_modifier().update(&mut connection, &book).await?;
        connection.commit().await?;

        Ok(BookDto::from(book))
    }
}

impl<T> UpdateBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait DeleteBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    async fn delete_book(
        &self,
        dto: DeleteBookDto,
    ) -> error_stack::Result<DeletedBookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        if self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .is_none()
        {
            return Err(not_found(dto.id));
        }

        self.book_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        tracing::debug!(id = dto.id, "deleted book");
        Ok(DeletedBookDto { id: dto.id })
    }
}

impl<T> DeleteBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[cfg(test)]
mod test {
    use driver::database::{InMemoryBookRepository, InMemoryDatabase};
    use kernel::interface::database::DependOnDatabaseConnection;
    use kernel::interface::query::DependOnBookQuery;
    use kernel::interface::update::DependOnBookModifier;
    use kernel::KernelError;

    use crate::service::{
        CreateBookService, DeleteBookService, GetAllBookService, GetBookService,
        UpdateBookService,
    };
    use crate::transfer::{
        BookDto, CreateBookDto, DeleteBookDto, DeletedBookDto, GetBookDto, UpdateBookDto,
    };

    struct Module {
        database: InMemoryDatabase,
    }

    impl Module {
        fn seeded() -> Self {
            Self {
                database: InMemoryDatabase::new(),
            }
        }
    }

    impl DependOnDatabaseConnection for Module {
        type DatabaseConnection = InMemoryDatabase;
        fn database_connection(&self) -> &Self::DatabaseConnection {
            &self.database
        }
    }

    impl DependOnBookQuery for Module {
        type BookQuery = InMemoryBookRepository;
        fn book_query(&self) -> &Self::BookQuery {
            &InMemoryBookRepository
        }
    }

    impl DependOnBookModifier for Module {
        type BookModifier = InMemoryBookRepository;
        fn book_modifier(&self) -> &Self::BookModifier {
            &InMemoryBookRepository
        }
    }

    fn create(title: &str, author: &str) -> CreateBookDto {
        CreateBookDto {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            ..Default::default()
        }
    }

    async fn ids(module: &Module) -> Vec<i64> {
        module
            .get_all_books()
            .await
            .map(|books| books.into_iter().map(|book| book.id).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn lists_seed_in_order() -> error_stack::Result<(), KernelError> {
        let module = Module::seeded();
        let books = module.get_all_books().await?;
        let titles = books.iter().map(|b| b.title.as_str()).collect::<Vec<_>>();
        assert_eq!(
            titles,
            vec!["The Great Gatsby", "To Kill a Mockingbird", "1984"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn created_book_can_be_fetched() -> error_stack::Result<(), KernelError> {
        let module = Module::seeded();
        let created = module
            .create_book(CreateBookDto {
                genre: Some("Dystopian".to_string()),
                copies_available: Some(4),
                ..create("Brave New World", "Aldous Huxley")
            })
            .await?;
        assert_eq!(
            created,
            BookDto {
                id: 4,
                title: "Brave New World".to_string(),
                author: "Aldous Huxley".to_string(),
                genre: "Dystopian".to_string(),
                copies_available: 4,
            }
        );

        let fetched = module.get_book(GetBookDto { id: created.id }).await?;
        assert_eq!(fetched, created);
        Ok(())
    }

    #[tokio::test]
    async fn create_substitutes_falsy_defaults() -> error_stack::Result<(), KernelError> {
        let module = Module::seeded();
        let created = module
            .create_book(CreateBookDto {
                genre: Some(String::new()),
                copies_available: Some(0),
                ..create("X", "Y")
            })
            .await?;
        assert_eq!(created.genre, "Unknown");
        assert_eq!(created.copies_available, 1);

        let created = module.create_book(create("X", "Y")).await?;
        assert_eq!(created.genre, "Unknown");
        assert_eq!(created.copies_available, 1);
        Ok(())
    }

    #[tokio::test]
    async fn create_requires_title_and_author() {
        let module = Module::seeded();
        let attempts = [
            CreateBookDto::default(),
            CreateBookDto {
                title: Some("X".to_string()),
                ..Default::default()
            },
            CreateBookDto {
                author: Some("Y".to_string()),
                ..Default::default()
            },
            create("", "Y"),
            create("X", ""),
        ];
        for attempt in attempts {
            let result = module.create_book(attempt).await;
            assert!(matches!(
                result.as_ref().map_err(|e| e.current_context()),
                Err(KernelError::Validation)
            ));
        }
        assert_eq!(ids(&module).await, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn get_missing_book_is_not_found() {
        let module = Module::seeded();
        let result = module.get_book(GetBookDto { id: 999 }).await;
        assert!(matches!(
            result.as_ref().map_err(|e| e.current_context()),
            Err(KernelError::NotFound)
        ));
    }

    #[tokio::test]
    async fn update_changes_only_given_fields() -> error_stack::Result<(), KernelError> {
        let module = Module::seeded();
        let updated = module
            .update_book(UpdateBookDto {
                id: 1,
                title: Some("The Great Gatsby (Updated)".to_string()),
                author: Some(String::new()),
                ..Default::default()
            })
            .await?;
        assert_eq!(
            updated,
            BookDto {
                id: 1,
                title: "The Great Gatsby (Updated)".to_string(),
                author: "F. Scott Fitzgerald".to_string(),
                genre: "Fiction".to_string(),
                copies_available: 5,
            }
        );
        assert_eq!(module.get_book(GetBookDto { id: 1 }).await?, updated);
        Ok(())
    }

    #[tokio::test]
    async fn update_keeps_zero_copies() -> error_stack::Result<(), KernelError> {
        let module = Module::seeded();
        let updated = module
            .update_book(UpdateBookDto {
                id: 3,
                copies_available: Some(0),
                ..Default::default()
            })
            .await?;
        assert_eq!(updated.copies_available, 0);
        assert_eq!(updated.title, "1984");
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_book_is_not_found() {
        let module = Module::seeded();
        let result = module
            .update_book(UpdateBookDto {
                id: 999,
                title: Some("Ghost Book".to_string()),
                ..Default::default()
            })
            .await;
        assert!(matches!(
            result.as_ref().map_err(|e| e.current_context()),
            Err(KernelError::NotFound)
        ));
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() -> error_stack::Result<(), KernelError> {
        let module = Module::seeded();
        let deleted = module.delete_book(DeleteBookDto { id: 2 }).await?;
        assert_eq!(deleted, DeletedBookDto { id: 2 });
        assert_eq!(ids(&module).await, vec![1, 3]);

        let again = module.delete_book(DeleteBookDto { id: 2 }).await;
        assert!(matches!(
            again.as_ref().map_err(|e| e.current_context()),
            Err(KernelError::NotFound)
        ));
        assert_eq!(ids(&module).await, vec![1, 3]);
        Ok(())
    }

    #[tokio::test]
    async fn id_collides_after_delete() -> error_stack::Result<(), KernelError> {
        let module = Module::seeded();
        module.delete_book(DeleteBookDto { id: 2 }).await?;

        let created = module.create_book(create("X", "Y")).await?;
        assert_eq!(created.id, 3);
        assert_eq!(ids(&module).await, vec![1, 3, 3]);

        let fetched = module.get_book(GetBookDto { id: 3 }).await?;
        assert_eq!(fetched.title, "1984");
        Ok(())
    }
}
