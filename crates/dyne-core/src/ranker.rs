//! Ranking with top-rated fallback
//!
//! Candidates scoring above zero are "matched" and ordered by score. When
//! none do, the whole catalog is ordered by rating instead. Ties are broken
//! by rating (missing lowest) and then by ascending id, so output never
//! depends on store row order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::restaurant::RestaurantRecord;
use crate::scorer::{QueryContext, ScoredCandidate, Scorer};

/// Default number of suggestions returned
pub const DEFAULT_LIMIT: usize = 3;

/// Which policy produced a ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankMode {
    Matched,
    Fallback,
}

/// Outcome of one ranking pass
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub mode: RankMode,
    pub results: Vec<ScoredCandidate>,
}

fn by_rating_desc(a: &RestaurantRecord, b: &RestaurantRecord) -> Ordering {
    let ra = a.rating.unwrap_or(f64::NEG_INFINITY);
    let rb = b.rating.unwrap_or(f64::NEG_INFINITY);
    rb.total_cmp(&ra)
}

fn by_score(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| by_rating_desc(&a.restaurant, &b.restaurant))
        .then_with(|| a.restaurant.id.cmp(&b.restaurant.id))
}

fn by_popularity(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    by_rating_desc(&a.restaurant, &b.restaurant).then_with(|| a.restaurant.id.cmp(&b.restaurant.id))
}

/// Scores and orders restaurants for a query
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    scorer: Scorer,
}

impl Ranker {
    pub fn new(scorer: Scorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Rank `restaurants` against `query`, keeping at most `limit` results
    pub fn rank(
        &self,
        restaurants: &[RestaurantRecord],
        query: &QueryContext,
        limit: usize,
    ) -> Ranking {
        let scored = self.scorer.score_all(restaurants, query);
        let (mut positive, mut rest): (Vec<_>, Vec<_>) =
            scored.into_iter().partition(|c| c.score > 0.0);

        let (mode, mut results) = if positive.is_empty() {
            rest.sort_by(by_popularity);
            (RankMode::Fallback, rest)
        } else {
            positive.sort_by(by_score);
            (RankMode::Matched, positive)
        };
        results.truncate(limit);

        debug!(
            candidates = restaurants.len(),
            returned = results.len(),
            ?mode,
            "Ranked restaurants"
        );

        Ranking { mode, results }
    }
}
