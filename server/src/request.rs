mod body;
mod book;

pub use self::{body::*, book::*};
