use kernel::prelude::entity::{Book, DestructBook};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub copies_available: i64,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            genre,
            copies_available,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            copies_available: copies_available.into(),
        }
    }
}

pub struct GetBookDto {
    pub id: i64,
}

// Fields stay optional so that presence is checked by the service, not the parser.
#[derive(Debug, Default)]
pub struct CreateBookDto {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub copies_available: Option<i64>,
}

#[derive(Debug, Default)]
pub struct UpdateBookDto {
    pub id: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub copies_available: Option<i64>,
}

pub struct DeleteBookDto {
    pub id: i64,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DeletedBookDto {
    pub id: i64,
}
