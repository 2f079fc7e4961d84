//! Defines the HTTP routes for signup and signin.
//!
//! These routes are nested under `/user` by the main router.

use super::handlers::{signin, signup};
use axum::{Router, routing::post};

pub fn user_router() -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
}
