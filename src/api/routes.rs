use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::request_id::{
    make_span_with_request_id, propagate_request_id_layer, set_request_id_layer,
};

use super::{handlers, ws, AppState};

/// Creates the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ws", get(ws::preference_channel))
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}

/// Storefront routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/products", get(handlers::get_products))
        .route("/products/:id", get(handlers::get_product))
        .route("/categories", get(handlers::get_categories))
        .route("/categories/:slug", get(handlers::get_category))
        .route("/search", get(handlers::search_products))
        // Recommendations
        .route("/recommendations", get(handlers::get_recommendations))
        // News
        .route("/news", get(handlers::get_news))
        .route("/news/featured", get(handlers::get_featured_news))
        .route("/news/trending", get(handlers::get_trending_news))
        .route("/news/category/:category", get(handlers::get_news_by_category))
}
