/// Catalog access abstraction
///
/// Every consumer of products, categories or news goes through
/// `CatalogAccessor`, so the storefront can be backed by the seeded in-memory
/// catalog or by any other source without touching the HTTP layer or the
/// recommendation channel.
use crate::{
    error::AppResult,
    models::{Category, News, Product},
};

pub mod memory;

pub use memory::MemoryCatalog;

/// Category slug that selects every product or news item
pub const ALL_CATEGORIES: &str = "all";

/// Trait for catalog data sources
///
/// Implementations must be cheap to call repeatedly: the recommendation
/// channel asks for the full product list on every trigger and never caches it.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogAccessor: Send + Sync {
    /// All products in catalog order
    async fn all_products(&self) -> AppResult<Vec<Product>>;

    async fn product_by_id(&self, id: u32) -> AppResult<Option<Product>>;

    /// Products whose category equals `category`; `"all"` returns everything
    async fn products_by_category(&self, category: &str) -> AppResult<Vec<Product>>;

    /// Case-insensitive substring search over name, description and category
    async fn search_products(&self, query: &str) -> AppResult<Vec<Product>>;

    async fn all_categories(&self) -> AppResult<Vec<Category>>;

    async fn category_by_slug(&self, slug: &str) -> AppResult<Option<Category>>;

    async fn all_news(&self) -> AppResult<Vec<News>>;

    /// News items in `category`; `"all"` returns everything
    async fn news_by_category(&self, category: &str) -> AppResult<Vec<News>>;

    async fn featured_news(&self) -> AppResult<Vec<News>>;

    async fn trending_news(&self) -> AppResult<Vec<News>>;

    /// Accessor name for logging and debugging
    fn name(&self) -> &'static str;
}
