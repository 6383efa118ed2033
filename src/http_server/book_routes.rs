//! Book HTTP Routes
//!
//! CRUD endpoints over the record store. Handlers do no validation beyond
//! decoding the body; absence is reported as 404.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::store::{Book, BookPatch, BookStore, NewBook};

use super::errors::{ApiError, ApiResult};

/// Create book routes
pub fn book_routes(store: Arc<BookStore>) -> Router {
    Router::new()
        .route("/books", get(list_books_handler).post(create_book_handler))
        .route(
            "/books/:id",
            get(get_book_handler)
                .put(update_book_handler)
                .delete(delete_book_handler),
        )
        .with_state(store)
}

async fn list_books_handler(State(store): State<Arc<BookStore>>) -> ApiResult<Json<Vec<Book>>> {
    Ok(Json(store.list()?))
}

async fn get_book_handler(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Book>> {
    store
        .get(&id)?
        .map(Json)
        .ok_or(ApiError::BookNotFound(id))
}

async fn create_book_handler(
    State(store): State<Arc<BookStore>>,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Book>)> {
    let Json(new_book) = payload?;
    let book = store.create(new_book)?;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book_handler(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<String>,
    payload: Result<Json<BookPatch>, JsonRejection>,
) -> ApiResult<Json<Book>> {
    let Json(patch) = payload?;
    store
        .update(&id, patch)?
        .map(Json)
        .ok_or(ApiError::BookNotFound(id))
}

async fn delete_book_handler(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    match store.delete(&id)? {
        Some(_) => Ok(StatusCode::OK),
        None => Err(ApiError::BookNotFound(id)),
    }
}
