use chrono::Utc;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{Category, News, Product},
    services::catalog::{CatalogAccessor, ALL_CATEGORIES},
};

/// Sample storefront data bundled into the binary
const SEED_JSON: &str = include_str!("../../../data/catalog.json");

/// On-disk shape of the seed file; news carries no creation timestamp
#[derive(Debug, Deserialize)]
struct SeedData {
    categories: Vec<Category>,
    products: Vec<Product>,
    news: Vec<SeedNews>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedNews {
    id: u32,
    title: String,
    excerpt: String,
    image_url: String,
    category: String,
    date: String,
    read_time: String,
    #[serde(default)]
    is_trending: bool,
    #[serde(default)]
    featured: bool,
}

/// Read-only in-memory catalog
///
/// Populated once at construction and never mutated, so it can be shared
/// across every request and channel session without locking.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    news: Vec<News>,
}

impl MemoryCatalog {
    /// Creates a catalog over the given records
    pub fn new(products: Vec<Product>, categories: Vec<Category>, news: Vec<News>) -> Self {
        Self {
            products,
            categories,
            news,
        }
    }

    /// Creates a catalog holding the bundled sample storefront
    pub fn seeded() -> AppResult<Self> {
        let seed: SeedData = serde_json::from_str(SEED_JSON)
            .map_err(|e| AppError::Internal(format!("Invalid catalog seed: {}", e)))?;

        let created_at = Utc::now();
        let news = seed
            .news
            .into_iter()
            .map(|item| News {
                id: item.id,
                title: item.title,
                excerpt: item.excerpt,
                image_url: item.image_url,
                category: item.category,
                date: item.date,
                read_time: item.read_time,
                is_trending: item.is_trending,
                featured: item.featured,
                created_at,
            })
            .collect::<Vec<_>>();

        tracing::info!(
            products = seed.products.len(),
            categories = seed.categories.len(),
            news = news.len(),
            "Seeded in-memory catalog"
        );

        Ok(Self::new(seed.products, seed.categories, news))
    }
}

#[async_trait::async_trait]
impl CatalogAccessor for MemoryCatalog {
    async fn all_products(&self) -> AppResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn product_by_id(&self, id: u32) -> AppResult<Option<Product>> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    async fn products_by_category(&self, category: &str) -> AppResult<Vec<Product>> {
        if category == ALL_CATEGORIES {
            return self.all_products().await;
        }

        Ok(self
            .products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }

    async fn search_products(&self, query: &str) -> AppResult<Vec<Product>> {
        let needle = query.to_lowercase();
        Ok(self
            .products
            .iter()
            .filter(|p| p.matches_query(&needle))
            .cloned()
            .collect())
    }

    async fn all_categories(&self) -> AppResult<Vec<Category>> {
        Ok(self.categories.clone())
    }

    async fn category_by_slug(&self, slug: &str) -> AppResult<Option<Category>> {
        Ok(self.categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn all_news(&self) -> AppResult<Vec<News>> {
        Ok(self.news.clone())
    }

    async fn news_by_category(&self, category: &str) -> AppResult<Vec<News>> {
        if category == ALL_CATEGORIES {
            return self.all_news().await;
        }

        Ok(self
            .news
            .iter()
            .filter(|n| n.category == category)
            .cloned()
            .collect())
    }

    async fn featured_news(&self) -> AppResult<Vec<News>> {
        Ok(self.news.iter().filter(|n| n.featured).cloned().collect())
    }

    async fn trending_news(&self) -> AppResult<Vec<News>> {
        Ok(self.news.iter().filter(|n| n.is_trending).cloned().collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
