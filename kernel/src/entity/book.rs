mod author;
mod copies;
mod genre;
mod id;
mod title;

pub use self::{author::*, copies::*, genre::*, id::*, title::*};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    genre: BookGenre,
    copies_available: BookCopies,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        genre: BookGenre,
        copies_available: BookCopies,
    ) -> Self {
        Self {
            id,
            title,
            author,
            genre,
            copies_available,
        }
    }
}
