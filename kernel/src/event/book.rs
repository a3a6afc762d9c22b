use crate::entity::{Book, BookAuthor, BookCopies, BookGenre, BookId, BookTitle};
use crate::event::Applier;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum BookEvent {
    Create {
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        genre: BookGenre,
        copies_available: BookCopies,
    },
    /// `None` leaves the stored field untouched.
    Update {
        id: BookId,
        title: Option<BookTitle>,
        author: Option<BookAuthor>,
        genre: Option<BookGenre>,
        copies_available: Option<BookCopies>,
    },
}

impl Applier<BookEvent> for Option<Book> {
    fn apply(&mut self, event: BookEvent) {
        match (self, event) {
            (
                option @ None,
                BookEvent::Create {
                    id,
                    title,
                    author,
                    genre,
                    copies_available,
                },
            ) => {
                *option = Some(Book::new(id, title, author, genre, copies_available));
            }
            (
                Some(book),
                BookEvent::Update {
                    title,
                    author,
                    genre,
                    copies_available,
                    ..
                },
            ) => book.substitute(|book| {
                if let Some(title) = title {
                    *book.title = title;
                }
                if let Some(author) = author {
                    *book.author = author;
                }
                if let Some(genre) = genre {
                    *book.genre = genre;
                }
                if let Some(copies_available) = copies_available {
                    *book.copies_available = copies_available;
                }
            }),
            _ => {}
        }
    }
}
