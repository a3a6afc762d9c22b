use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookCopies(i64);

impl BookCopies {
    pub fn new(copies: impl Into<i64>) -> Self {
        Self(copies.into())
    }

    /// Defaults to a single copy when the count is missing or zero.
    ///
    /// Zero counts as missing here, unlike on update where it is kept.
    pub fn or_single(copies: Option<i64>) -> Self {
        match copies {
            Some(copies) if copies != 0 => Self(copies),
            _ => Self(1),
        }
    }
}
