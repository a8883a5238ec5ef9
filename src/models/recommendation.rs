use serde::{Deserialize, Serialize};

use super::Product;

/// A product decorated with a synthetic relevance score
///
/// Serialized flat: the product fields sit next to `matchPercentage` and
/// `recommendationReason` in the same JSON object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(flatten)]
    pub product: Product,
    /// Always within 80..=99
    pub match_percentage: u8,
    pub recommendation_reason: String,
}
