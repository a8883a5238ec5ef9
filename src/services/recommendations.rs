use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    error::{AppError, AppResult},
    models::{Product, Recommendation},
    services::catalog::CatalogAccessor,
};

/// Maximum number of recommendations returned per request
pub const MAX_RECOMMENDATIONS: usize = 6;

/// Inclusive bounds of the synthetic match percentage
pub const MIN_MATCH_PERCENTAGE: u8 = 80;
pub const MAX_MATCH_PERCENTAGE: u8 = 99;

/// Bonus for products matching a stated preference (or trending, once any preference is stated)
pub const PREFERENCE_BONUS: u8 = 5;

/// Canned explanations attached to every recommendation
pub const RECOMMENDATION_REASONS: [&str; 5] = [
    "Based on your browsing history",
    "Matches your style preferences",
    "Popular with customers like you",
    "Complements your previous purchases",
    "Perfect for your collection",
];

/// Scores and ranks a catalog snapshot against a preference set
///
/// Each product gets a base score drawn uniformly from 80..=99. When the
/// caller stated any preferences, products in a preferred category and all
/// trending products gain a bonus of 5, capped at 99. Trending products are
/// scored and queued ahead of the rest, and the stable descending sort keeps
/// that order between equal scores. At most six results are returned.
///
/// The scores are deliberately random; pass a seeded `rng` for reproducible output.
pub fn recommend<R: Rng>(
    catalog: &[Product],
    preferences: &[String],
    rng: &mut R,
) -> Vec<Recommendation> {
    let (trending, others): (Vec<&Product>, Vec<&Product>) =
        catalog.iter().partition(|p| p.is_trending);

    let scored = trending
        .into_iter()
        .chain(others)
        .map(|product| score_product(product, preferences, rng))
        .collect();

    rank(scored)
}

/// Draws the match percentage and reason for a single product
fn score_product<R: Rng>(product: &Product, preferences: &[String], rng: &mut R) -> Recommendation {
    let mut match_percentage = rng.gen_range(MIN_MATCH_PERCENTAGE..=MAX_MATCH_PERCENTAGE);

    if earns_bonus(product, preferences) {
        match_percentage = (match_percentage + PREFERENCE_BONUS).min(MAX_MATCH_PERCENTAGE);
    }

    let reason = RECOMMENDATION_REASONS
        .choose(rng)
        .copied()
        .unwrap_or(RECOMMENDATION_REASONS[0]);

    Recommendation {
        product: product.clone(),
        match_percentage,
        recommendation_reason: reason.to_string(),
    }
}

/// An empty preference set boosts nothing, trending products included
fn earns_bonus(product: &Product, preferences: &[String]) -> bool {
    !preferences.is_empty()
        && (product.is_trending || preferences.iter().any(|p| *p == product.category))
}

/// Stable sort by descending score, drop repeated product ids, keep the top six
fn rank(mut scored: Vec<Recommendation>) -> Vec<Recommendation> {
    scored.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));

    let mut seen = HashSet::new();
    scored
        .into_iter()
        .filter(|r| seen.insert(r.product.id))
        .take(MAX_RECOMMENDATIONS)
        .collect()
}

/// Recommendation service shared by the HTTP endpoint and the preference channel
///
/// Reads a fresh catalog snapshot on every call and owns the random source
/// used for scoring. The source is seeded from entropy unless a fixed seed is
/// configured.
pub struct Recommender {
    catalog: Arc<dyn CatalogAccessor>,
    rng: Mutex<StdRng>,
}

impl Recommender {
    pub fn new(catalog: Arc<dyn CatalogAccessor>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            catalog,
            rng: Mutex::new(rng),
        }
    }

    /// Generates recommendations for the given preference set
    ///
    /// Catalog failures are returned to the caller unchanged.
    pub async fn recommend(&self, preferences: &[String]) -> AppResult<Vec<Recommendation>> {
        let products = self.catalog.all_products().await.map_err(|e| {
            tracing::warn!(
                error = %e,
                catalog = self.catalog.name(),
                "Catalog retrieval failed while recommending"
            );
            e
        })?;

        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AppError::Internal("Recommendation rng lock poisoned".to_string()))?;

        let recommendations = recommend(&products, preferences, &mut *rng);

        tracing::debug!(
            catalog_size = products.len(),
            preference_count = preferences.len(),
            recommendation_count = recommendations.len(),
            "Generated recommendations"
        );

        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::{MemoryCatalog, MockCatalogAccessor};
    use rand::rngs::mock::StepRng;

    fn product(id: u32, category: &str, trending: bool) -> Product {
        let mut product = Product::new(id, format!("Product {}", id), "", 10.0, "img", category);
        product.is_trending = trending;
        product
    }

    fn sample_catalog(size: u32) -> Vec<Product> {
        let categories = ["tops", "dresses", "outerwear", "men"];
        (1..=size)
            .map(|id| product(id, categories[id as usize % categories.len()], id % 3 == 0))
            .collect()
    }

    fn prefs(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    /// Always yields zero, so every base score is 80 and every reason is the first
    fn zero_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn test_empty_catalog_yields_empty_list() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(recommend(&[], &[], &mut rng).is_empty());
        assert!(recommend(&[], &prefs(&["men"]), &mut rng).is_empty());
    }

    #[test]
    fn test_results_bounded_sorted_and_sized() {
        for size in 0..12u32 {
            let catalog = sample_catalog(size);
            for seed in 0..50 {
                let mut rng = StdRng::seed_from_u64(seed);
                let results = recommend(&catalog, &prefs(&["tops"]), &mut rng);

                assert_eq!(results.len(), MAX_RECOMMENDATIONS.min(catalog.len()));
                assert!(results.iter().all(|r| (MIN_MATCH_PERCENTAGE..=MAX_MATCH_PERCENTAGE)
                    .contains(&r.match_percentage)));
                assert!(results
                    .windows(2)
                    .all(|w| w[0].match_percentage >= w[1].match_percentage));
                assert!(results
                    .iter()
                    .all(|r| RECOMMENDATION_REASONS.contains(&r.recommendation_reason.as_str())));
            }
        }
    }

    #[test]
    fn test_no_duplicate_product_ids() {
        let mut catalog = sample_catalog(4);
        catalog.push(catalog[0].clone());
        catalog.push(catalog[1].clone());

        let mut rng = StdRng::seed_from_u64(9);
        let results = recommend(&catalog, &[], &mut rng);

        let ids: HashSet<u32> = results.iter().map(|r| r.product.id).collect();
        assert_eq!(ids.len(), results.len());
    }

    #[test]
    fn test_empty_preferences_give_no_bonus_even_to_trending() {
        let trending = product(1, "outerwear", true);

        for seed in 0..100 {
            let base: u8 = StdRng::seed_from_u64(seed).gen_range(80..=99);

            let scored = score_product(&trending, &[], &mut StdRng::seed_from_u64(seed));
            assert_eq!(scored.match_percentage, base);
        }
    }

    #[test]
    fn test_bonus_applies_to_matching_category_and_trending_when_preferences_present() {
        let matching = product(1, "outerwear", false);
        let trending = product(2, "tops", true);
        let unrelated = product(3, "shoes", false);
        let preferences = prefs(&["outerwear"]);

        for seed in 0..100 {
            let base: u8 = StdRng::seed_from_u64(seed).gen_range(80..=99);
            let boosted = (base + PREFERENCE_BONUS).min(MAX_MATCH_PERCENTAGE);

            let score = |p: &Product| {
                score_product(p, &preferences, &mut StdRng::seed_from_u64(seed)).match_percentage
            };
            assert_eq!(score(&matching), boosted);
            assert_eq!(score(&trending), boosted);
            assert_eq!(score(&unrelated), base);
        }
    }

    #[test]
    fn test_unmatched_preferences_only_boost_trending() {
        let mut rng = zero_rng();
        let catalog = vec![product(1, "tops", false), product(2, "men", true)];

        let results = recommend(&catalog, &prefs(&["swimwear"]), &mut rng);

        assert_eq!(results[0].product.id, 2);
        assert_eq!(results[0].match_percentage, 85);
        assert_eq!(results[1].match_percentage, 80);
    }

    #[test]
    fn test_ties_keep_trending_first() {
        // Non-trending listed first in the catalog; equal scores must still rank trending ahead
        let catalog = vec![
            product(1, "tops", false),
            product(2, "dresses", false),
            product(3, "outerwear", true),
        ];

        let results = recommend(&catalog, &[], &mut zero_rng());
        let ids: Vec<u32> = results.iter().map(|r| r.product.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(results.iter().all(|r| r.match_percentage == 80));
        assert!(results
            .iter()
            .all(|r| r.recommendation_reason == RECOMMENDATION_REASONS[0]));

        // Both boosted to 85: still a tie, still trending first
        let results = recommend(&catalog, &prefs(&["tops"]), &mut zero_rng());
        let ids: Vec<u32> = results.iter().map(|r| r.product.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(results[2].match_percentage, 80);
    }

    #[test]
    fn test_preferred_trending_product_ranks_higher_more_often() {
        let catalog = vec![product(1, "outerwear", true), product(2, "tops", false)];
        let preferences = prefs(&["outerwear"]);

        let mut first_with = 0;
        let mut first_without = 0;
        for seed in 0..1000 {
            let with = recommend(&catalog, &preferences, &mut StdRng::seed_from_u64(seed));
            let without = recommend(&catalog, &[], &mut StdRng::seed_from_u64(seed));

            // Same seed, same draws: only the bonus differs
            assert_eq!(
                with[0].match_percentage.max(with[1].match_percentage),
                without
                    .iter()
                    .map(|r| if r.product.id == 1 {
                        (r.match_percentage + PREFERENCE_BONUS).min(MAX_MATCH_PERCENTAGE)
                    } else {
                        r.match_percentage
                    })
                    .max()
                    .unwrap()
            );

            if with[0].product.id == 1 {
                first_with += 1;
            }
            if without[0].product.id == 1 {
                first_without += 1;
            }
        }

        assert!(first_with > first_without);
    }

    #[tokio::test]
    async fn test_preferences_never_reduce_matching_share() {
        let products = MemoryCatalog::seeded()
            .unwrap()
            .all_products()
            .await
            .unwrap();
        let preferences = prefs(&["accessories"]);

        let count_matching = |results: &[Recommendation]| {
            results
                .iter()
                .filter(|r| r.product.category == "accessories")
                .count()
        };

        let mut with = 0;
        let mut without = 0;
        for seed in 0..500 {
            with += count_matching(&recommend(&products, &preferences, &mut StdRng::seed_from_u64(seed)));
            without += count_matching(&recommend(&products, &[], &mut StdRng::seed_from_u64(seed)));
        }

        assert!(with > without);
    }

    #[tokio::test]
    async fn test_recommender_is_reproducible_with_seed() {
        let catalog: Arc<dyn CatalogAccessor> = Arc::new(MemoryCatalog::seeded().unwrap());

        let first = Recommender::new(catalog.clone(), Some(42));
        let second = Recommender::new(catalog, Some(42));

        let a = first.recommend(&prefs(&["men"])).await.unwrap();
        let b = second.recommend(&prefs(&["men"])).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), MAX_RECOMMENDATIONS);
    }

    #[tokio::test]
    async fn test_recommender_propagates_catalog_failure() {
        let mut catalog = MockCatalogAccessor::new();
        catalog
            .expect_all_products()
            .returning(|| Err(AppError::Catalog("store offline".to_string())));
        catalog.expect_name().return_const("mock");

        let recommender = Recommender::new(Arc::new(catalog), Some(1));
        let result = recommender.recommend(&[]).await;

        assert!(matches!(result, Err(AppError::Catalog(_))));
    }
}
