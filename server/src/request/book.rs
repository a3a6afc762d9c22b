use crate::controller::{Intake, TryIntake};
use application::transfer::{CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};
use error_stack::Report;
use kernel::KernelError;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    title: Option<String>,
    author: Option<String>,
    genre: Option<String>,
    copies_available: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    title: Option<String>,
    author: Option<String>,
    genre: Option<String>,
    copies_available: Option<i64>,
}

#[derive(Debug)]
pub struct GetBookRequest {
    id: String,
}

impl GetBookRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: String,
}

impl DeleteBookRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

/// Reads the leading integer of a path segment, so `"2abc"` is book 2 and
/// `"0x2"` is read as hexadecimal.
///
/// A segment without leading digits names no book at all.
fn parse_id(raw: &str) -> error_stack::Result<i64, KernelError> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (radix, unsigned) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(rest) => (16, rest),
        None => (10, unsigned),
    };
    let end = unsigned
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(unsigned.len());
    let id = i64::from_str_radix(&unsigned[..end], radix).map_err(|error| {
        Report::new(error)
            .change_context(KernelError::NotFound)
            .attach_printable(format!("`{raw}` is not a book id"))
    })?;
    Ok(if negative { -id } else { id })
}

pub struct BookTransformer;

impl Intake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateBookRequest) -> Self::To {
        CreateBookDto {
            title: input.title,
            author: input.author,
            genre: input.genre,
            copies_available: input.copies_available,
        }
    }
}

impl TryIntake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: GetBookRequest) -> Result<Self::To, Self::Error> {
        Ok(GetBookDto {
            id: parse_id(&input.id)?,
        })
    }
}

impl TryIntake<(String, UpdateBookRequest)> for BookTransformer {
    type To = UpdateBookDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: (String, UpdateBookRequest)) -> Result<Self::To, Self::Error> {
        let (id, input) = input;
        Ok(UpdateBookDto {
            id: parse_id(&id)?,
            title: input.title,
            author: input.author,
            genre: input.genre,
            copies_available: input.copies_available,
        })
    }
}

impl TryIntake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: DeleteBookRequest) -> Result<Self::To, Self::Error> {
        Ok(DeleteBookDto {
            id: parse_id(&input.id)?,
        })
    }
}
