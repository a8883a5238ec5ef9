use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{Category, News, Product, Recommendation},
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// List products, optionally narrowed to one category
pub async fn get_products(
    State(state): State<AppState>,
    Query(params): Query<ProductsQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = match params.category.as_deref() {
        Some(category) if !category.is_empty() => {
            state.catalog.products_by_category(category).await?
        }
        _ => state.catalog.all_products().await?,
    };
    Ok(Json(products))
}

/// Fetch a single product by numeric id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let not_found = || AppError::NotFound("Product not found".to_string());

    let id: u32 = id.parse().map_err(|_| not_found())?;
    let product = state.catalog.product_by_id(id).await?.ok_or_else(not_found)?;
    Ok(Json(product))
}

/// List all categories
pub async fn get_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.catalog.all_categories().await?))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Category>> {
    state
        .catalog
        .category_by_slug(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
}

/// Free-text product search
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let query = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Search query is required".to_string()))?;

    let products = state.catalog.search_products(&query).await?;
    tracing::debug!(query = %query, results = products.len(), "Product search");
    Ok(Json(products))
}

/// One-shot recommendations for clients not on the preference channel
pub async fn get_recommendations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Recommendation>>> {
    Ok(Json(state.recommender.recommend(&[]).await?))
}

pub async fn get_news(State(state): State<AppState>) -> AppResult<Json<Vec<News>>> {
    Ok(Json(state.catalog.all_news().await?))
}

pub async fn get_news_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<News>>> {
    Ok(Json(state.catalog.news_by_category(&category).await?))
}

pub async fn get_featured_news(State(state): State<AppState>) -> AppResult<Json<Vec<News>>> {
    Ok(Json(state.catalog.featured_news().await?))
}

pub async fn get_trending_news(State(state): State<AppState>) -> AppResult<Json<Vec<News>>> {
    Ok(Json(state.catalog.trending_news().await?))
}
