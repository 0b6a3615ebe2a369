use super::*;
use std::sync::Arc;

use axum::http::StatusCode;

use crate::state::test_helpers::{MockBackend, book, test_app_state};

#[tokio::test]
async fn list_books_returns_catalog() {
    let mock = MockBackend {
        books: vec![
            book(1, "Direito Civil Brasileiro", Some("Carlos Roberto Gonçalves"), "Direito Civil"),
            book(2, "Curso de Direito Penal", None, "Direito Penal"),
        ],
        ..MockBackend::default()
    };
    let state = test_app_state(Arc::new(mock));

    let Json(books) = list_books(State(state), MaybeToken(None)).await.unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[1].area, "Direito Penal");
}

#[tokio::test]
async fn list_books_maps_outage_to_502() {
    let mock = MockBackend { fail_store: true, ..MockBackend::default() };
    let err = list_books(State(test_app_state(Arc::new(mock))), MaybeToken(None)).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
}
