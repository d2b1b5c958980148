//! Product reviews (`reviews.json`).

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use lumina_core::ProductId;

/// One customer review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub user: String,
    /// Star rating, 1–5. Out-of-range values are clamped when summarized.
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub comment: String,
}

impl Review {
    /// Reviewer initials for the avatar badge ("Harvey J." → "HJ").
    pub fn initials(&self) -> String {
        self.user
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Aggregated rating figures for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    /// Mean rating, rounded to one decimal place.
    pub average: f64,
    pub total: usize,
    /// Review counts indexed by stars − 1 (so `[0]` is one-star).
    pub star_counts: [usize; 5],
}

impl ReviewSummary {
    pub fn of(reviews: &[Review]) -> Option<ReviewSummary> {
        if reviews.is_empty() {
            return None;
        }
        let mut star_counts = [0usize; 5];
        let mut sum = 0u32;
        for review in reviews {
            let stars = review.rating.clamp(1, 5);
            star_counts[usize::from(stars) - 1] += 1;
            sum += u32::from(stars);
        }
        let average = f64::from(sum) / reviews.len() as f64;
        Some(ReviewSummary {
            average: (average * 10.0).round() / 10.0,
            total: reviews.len(),
            star_counts,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ReviewGroup {
    product_id: ProductId,
    #[serde(default)]
    reviews: Vec<Review>,
}

/// All reviews, grouped by product.
#[derive(Debug, Default)]
pub struct ReviewDirectory {
    by_product: HashMap<ProductId, Vec<Review>>,
}

impl ReviewDirectory {
    /// Load `reviews.json` from the data directory. A missing or malformed
    /// file means "no reviews", not an error; the detail page renders its
    /// empty state either way.
    pub fn load(data_dir: &Path) -> ReviewDirectory {
        let path = data_dir.join("reviews.json");
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return ReviewDirectory::default(),
        };
        match serde_json::from_str::<Vec<ReviewGroup>>(&raw) {
            Ok(groups) => ReviewDirectory {
                by_product: groups
                    .into_iter()
                    .map(|g| (g.product_id, g.reviews))
                    .collect(),
            },
            Err(err) => {
                tracing::warn!("malformed reviews file {path:?}: {err}");
                ReviewDirectory::default()
            }
        }
    }

    pub fn for_product(&self, id: &ProductId) -> &[Review] {
        self.by_product.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn summary_for(&self, id: &ProductId) -> Option<ReviewSummary> {
        ReviewSummary::of(self.for_product(id))
    }
}
