//! Query-to-restaurant match scoring
//!
//! score = token_weight * |distinct query tokens in restaurant text|
//!       + per shared concept (strong_concept_weight or concept_weight)
//!       + rating_weight * rating

use ahash::AHashSet;
use std::collections::BTreeSet;

use crate::concepts::ConceptDictionary;
use crate::restaurant::RestaurantRecord;
use crate::tokenizer::Tokenizer;

/// Scoring weights
#[derive(Debug, Clone)]
pub struct ScoringParams {
    pub token_weight: f64,
    pub concept_weight: f64,
    pub strong_concept_weight: f64,
    pub rating_weight: f64,
    /// Concepts worth `strong_concept_weight` instead of `concept_weight`
    pub strong_concepts: AHashSet<String>,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            token_weight: 2.0,
            concept_weight: 3.0,
            strong_concept_weight: 5.0,
            rating_weight: 0.4,
            strong_concepts: ["biryani", "dessert", "comfort"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Per-request view of the user's message
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub raw: String,
    pub tokens: AHashSet<String>,
    pub concepts: BTreeSet<String>,
}

/// Restaurant paired with its match score (always >= 0)
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub restaurant: RestaurantRecord,
    pub score: f64,
}

/// Scores restaurants against queries
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    tokenizer: Tokenizer,
    dictionary: ConceptDictionary,
    params: ScoringParams,
}

impl Scorer {
    pub fn new(tokenizer: Tokenizer, dictionary: ConceptDictionary, params: ScoringParams) -> Self {
        Self {
            tokenizer,
            dictionary,
            params,
        }
    }

    /// Create a scorer with default tokenizer and weights
    pub fn with_dictionary(dictionary: ConceptDictionary) -> Self {
        Self::new(Tokenizer::default(), dictionary, ScoringParams::default())
    }

    /// Tokenize a message and extract its concepts
    pub fn query(&self, message: &str) -> QueryContext {
        let tokens = self.tokenizer.token_set(message);
        let concepts = self.dictionary.extract(&tokens);
        QueryContext {
            raw: message.to_string(),
            tokens,
            concepts,
        }
    }

    /// Score one restaurant; the restaurant text is projected fresh each call
    pub fn score(&self, restaurant: &RestaurantRecord, query: &QueryContext) -> f64 {
        let rest_tokens = self.tokenizer.token_set(&restaurant.project_text());
        let rest_concepts = self.dictionary.extract(&rest_tokens);

        let overlap = query
            .tokens
            .iter()
            .filter(|t| rest_tokens.contains(*t))
            .count();
        let mut score = overlap as f64 * self.params.token_weight;

        for concept in query.concepts.intersection(&rest_concepts) {
            score += if self.params.strong_concepts.contains(concept) {
                self.params.strong_concept_weight
            } else {
                self.params.concept_weight
            };
        }

        score + restaurant.rating_or_zero() * self.params.rating_weight
    }

    pub fn score_all(
        &self,
        restaurants: &[RestaurantRecord],
        query: &QueryContext,
    ) -> Vec<ScoredCandidate> {
        restaurants
            .iter()
            .map(|r| ScoredCandidate {
                restaurant: r.clone(),
                score: self.score(r, query),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn spice_route() -> RestaurantRecord {
        RestaurantRecord {
            cuisine: Some("Biryani".into()),
            rating: Some(4.0),
            tags: Some("biryani".into()),
            ..RestaurantRecord::new(1, "Spice Route")
        }
    }

    fn krishna_veg() -> RestaurantRecord {
        RestaurantRecord {
            cuisine: Some("South Indian".into()),
            rating: Some(4.2),
            ..RestaurantRecord::new(2, "Krishna Veg")
        }
    }

    #[test]
    fn test_query_context() {
        let scorer = Scorer::default();
        let query = scorer.query("Cheap cheap BIRYANI!!");
        assert_eq!(query.tokens.len(), 2);
        assert!(query.concepts.contains("budget"));
        assert!(query.concepts.contains("biryani"));
        assert_eq!(query.raw, "Cheap cheap BIRYANI!!");
    }

    #[test]
    fn test_cheap_biryani_scores() {
        let scorer = Scorer::default();
        let query = scorer.query("cheap biryani");

        assert!((scorer.score(&spice_route(), &query) - 8.6).abs() < EPS);
        assert!((scorer.score(&krishna_veg(), &query) - 1.68).abs() < EPS);
    }

    #[test]
    fn test_single_name_token() {
        let scorer = Scorer::default();
        let query = scorer.query("route");
        let score = scorer.score(&spice_route(), &query);
        assert!((score - (2.0 + 0.4 * 4.0)).abs() < EPS);
    }

    #[test]
    fn test_duplicate_query_tokens_count_once() {
        let scorer = Scorer::default();
        let once = scorer.score(&spice_route(), &scorer.query("route"));
        let thrice = scorer.score(&spice_route(), &scorer.query("route route ROUTE"));
        assert!((once - thrice).abs() < EPS);
    }

    #[test]
    fn test_regular_concept_weight() {
        let scorer = Scorer::default();
        let r = RestaurantRecord {
            tags: Some("vegetarian".into()),
            ..RestaurantRecord::new(3, "Green Leaf")
        };
        // "veg" token is not in the blob, but both sides trigger the veg concept
        let score = scorer.score(&r, &scorer.query("veg"));
        assert!((score - 3.0).abs() < EPS);
    }

    #[test]
    fn test_strong_concept_weight() {
        let scorer = Scorer::default();
        let r = RestaurantRecord {
            description: Some("best icecream in town".into()),
            ..RestaurantRecord::new(4, "Frozen Bottle")
        };
        // "dessert" token absent from blob; dessert concept shared via "icecream"
        let score = scorer.score(&r, &scorer.query("dessert"));
        assert!((score - 5.0).abs() < EPS);
    }

    #[test]
    fn test_tamil_query_matches_english_blob() {
        let scorer = Scorer::default();
        let score = scorer.score(&spice_route(), &scorer.query("பிரியாணி"));
        assert!((score - (5.0 + 1.6)).abs() < EPS);
    }

    #[test]
    fn test_missing_fields_score_zero() {
        let scorer = Scorer::default();
        let r = RestaurantRecord {
            name: None,
            ..RestaurantRecord::new(5, "")
        };
        assert_eq!(scorer.score(&r, &scorer.query("anything spicy")), 0.0);
        assert_eq!(scorer.score(&r, &scorer.query("")), 0.0);
    }

    #[test]
    fn test_scores_non_negative() {
        let scorer = Scorer::default();
        let restaurants = vec![spice_route(), krishna_veg(), RestaurantRecord::new(6, "")];
        for message in ["", "cheap biryani", "late night party", "???", "இனிப்பு"] {
            let query = scorer.query(message);
            for candidate in scorer.score_all(&restaurants, &query) {
                assert!(candidate.score >= 0.0);
            }
        }
    }

    #[test]
    fn test_bad_stored_rating_never_negative() {
        let scorer = Scorer::default();
        let rows: Vec<RestaurantRecord> = serde_json::from_str(
            r#"[{"id": 1, "name": "X", "rating": -2}, {"id": 2, "name": "Y", "rating": "9"}]"#,
        )
        .unwrap();
        for r in &rows {
            assert_eq!(scorer.score(r, &scorer.query("nothing")), 0.0);
        }
    }

    #[test]
    fn test_custom_params() {
        let params = ScoringParams {
            rating_weight: 0.0,
            ..ScoringParams::default()
        };
        let scorer = Scorer::new(Tokenizer::default(), ConceptDictionary::default(), params);
        assert_eq!(scorer.score(&krishna_veg(), &scorer.query("nothing")), 0.0);
    }
}
