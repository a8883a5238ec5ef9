use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An editorial news item shown alongside the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: u32,
    pub title: String,
    pub excerpt: String,
    pub image_url: String,
    pub category: String,
    /// Publication date as displayed (YYYY-MM-DD)
    pub date: String,
    pub read_time: String,
    #[serde(default)]
    pub is_trending: bool,
    #[serde(default)]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}
