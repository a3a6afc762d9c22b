use crate::controller::Exhaust;
use application::transfer::{BookDto, DeletedBookDto};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    id: i64,
    title: String,
    author: String,
    genre: String,
    copies_available: i64,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        let BookDto {
            id,
            title,
            author,
            genre,
            copies_available,
        } = value;
        Self {
            id,
            title,
            author,
            genre,
            copies_available,
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedBookResponse(BookResponse);

impl IntoResponse for CreatedBookResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::CREATED, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedBookResponse {
    message: String,
}

impl IntoResponse for DeletedBookResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct BookPresenter;

impl Exhaust<BookDto> for BookPresenter {
    type To = BookResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        BookResponse::from(input)
    }
}

impl Exhaust<Vec<BookDto>> for BookPresenter {
    type To = axum::Json<Vec<BookResponse>>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(BookResponse::from)
            .collect::<Vec<_>>();

        axum::Json::from(result)
    }
}

impl Exhaust<DeletedBookDto> for BookPresenter {
    type To = DeletedBookResponse;
    fn emit(&self, input: DeletedBookDto) -> Self::To {
        DeletedBookResponse {
            message: format!("Book with ID {} deleted successfully.", input.id),
        }
    }
}

pub struct CreatedBookPresenter;

impl Exhaust<BookDto> for CreatedBookPresenter {
    type To = CreatedBookResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        CreatedBookResponse(BookResponse::from(input))
    }
}
