use crate::handler::AppModule;
use crate::route::BookRouter;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use crate::error::StackTrace;

pub mod config;
mod controller;
mod error;
pub mod handler;
mod request;
mod response;
mod route;

pub fn router(module: AppModule) -> Router {
    Router::new()
        .route_book()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new())
        .with_state(module)
}
