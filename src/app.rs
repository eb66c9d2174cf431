use axum::{Extension, Router};
use sqlx::MySqlPool;

pub fn build_router() -> Router {
    use axum::http::Method;
    use axum::routing::get;
    use tower_http::cors::{AllowOrigin, Any, CorsLayer};

    let mut app = Router::new()
        .merge(crate::routes::donor_routes::donor_routes())
        .route("/health", get(crate::handlers::health_handler::health));

    // CORS is driven by env: ENABLE_CORS=true gives a permissive policy,
    // CORS_ALLOWED_ORIGINS takes "*" or a CSV of origins.
    let cors_allowed = std::env::var("CORS_ALLOWED_ORIGINS").ok();
    let enable_cors = std::env::var("ENABLE_CORS")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    if enable_cors || cors_allowed.is_some() {
        let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];
        let origin = match cors_allowed {
            Some(list) if list.trim() != "*" => {
                use axum::http::header::HeaderValue;
                let origins = list
                    .split(',')
                    .filter_map(|s| HeaderValue::from_str(s.trim()).ok())
                    .collect::<Vec<HeaderValue>>();
                AllowOrigin::list(origins)
            }
            _ => AllowOrigin::any(),
        };
        let cors_layer = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(Any);
        app = app.layer(cors_layer);
    }

    app
}

pub fn create_app(pool: MySqlPool) -> Router {
    build_router().layer(Extension(pool))
}
