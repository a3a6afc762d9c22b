use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    BookTransformer, CreateBookRequest, DeleteBookRequest, GetBookRequest, JsonBody,
    UpdateBookRequest,
};
use crate::response::{BookPresenter, CreatedBookPresenter};
use application::service::{
    CreateBookService, DeleteBookService, GetAllBookService, GetBookService, UpdateBookService,
};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl BookRouter for Router<AppModule> {
    fn route_book(self) -> Self {
        self.route(
            "/api/books",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), BookPresenter)
                    .bypass(|| async move { module.get_all_books().await })
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule>, JsonBody(req): JsonBody<CreateBookRequest>| async move {
                    Controller::new(BookTransformer, CreatedBookPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.create_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/api/books/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<String>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .try_intake(GetBookRequest::new(id))
                        .map_err(ErrorStatus::from)?
                        .handle(|dto| async move { module.get_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .put(
                |State(module): State<AppModule>,
                 Path(id): Path<String>,
                 JsonBody(req): JsonBody<UpdateBookRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .try_intake((id, req))
                        .map_err(ErrorStatus::from)?
                        .handle(|dto| async move { module.update_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>, Path(id): Path<String>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .try_intake(DeleteBookRequest::new(id))
                        .map_err(ErrorStatus::from)?
                        .handle(|dto| async move { module.delete_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
