use axum::{
    Router,
    routing::{delete, get},
};

// Import donor-related handlers
use crate::handlers::donor_handler::{clear, index, store};

pub fn donor_routes() -> Router {
    Router::new()
        .route("/api/donors", get(index).post(store))
        .route("/api/donors/clear", delete(clear))
}
