use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

pub const UNKNOWN_GENRE: &str = "Unknown";

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookGenre(String);

impl BookGenre {
    pub fn new(genre: impl Into<String>) -> Self {
        Self(genre.into())
    }

    /// Falls back to [`UNKNOWN_GENRE`] when the genre is missing or empty.
    pub fn or_unknown(genre: Option<String>) -> Self {
        match genre {
            Some(genre) if !genre.is_empty() => Self(genre),
            _ => Self::new(UNKNOWN_GENRE),
        }
    }
}
