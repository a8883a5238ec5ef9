use serde::{Deserialize, Serialize};

/// A named colour swatch offered for a product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductColor {
    pub name: String,
    pub hex: String,
}

/// A catalog item as served to the storefront
///
/// Products are seeded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Discount in whole percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_urls: Option<Vec<String>>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_trending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<ProductColor>>,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Creates an in-stock product with only the required fields set
    pub fn new(
        id: u32,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        image_url: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
            original_price: None,
            discount: None,
            image_url: image_url.into(),
            thumbnail_urls: None,
            category: category.into(),
            sub_category: None,
            rating: None,
            review_count: None,
            in_stock: true,
            is_new: false,
            is_trending: false,
            sizes: None,
            colors: None,
        }
    }

    /// Case-insensitive match of `needle` (already lowercased) against name, description and category
    pub fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }
}

/// A browsable product category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub image_url: String,
}
