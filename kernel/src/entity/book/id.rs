use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookId(i64);

impl BookId {
    pub fn new(id: impl Into<i64>) -> Self {
        Self(id.into())
    }

    /// Id handed to a book appended to a collection of `len` books.
    ///
    /// Derived from the length alone, so a deletion followed by a creation
    /// can hand out an id that is still in use.
    pub fn next(len: i64) -> Self {
        Self(len + 1)
    }
}
