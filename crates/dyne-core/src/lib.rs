//! Dyne Core - concept-based restaurant matching
//!
//! Scores a free-text food request against every restaurant in the catalog
//! using token overlap, shared semantic concepts and rating, then returns the
//! best matches or falls back to top-rated picks.

pub mod assistant;
pub mod concepts;
pub mod dish;
pub mod error;
pub mod ranker;
pub mod restaurant;
pub mod scorer;
pub mod store;
pub mod templates;
pub mod tokenizer;

pub use assistant::{Assistant, AssistantReply, Suggestion, SurprisePick};
pub use concepts::ConceptDictionary;
pub use dish::{DishRecord, NewDish};
pub use error::{AssistantError, DictionaryError, InsertError, StoreError, ValidationError};
pub use ranker::{RankMode, Ranker, Ranking, DEFAULT_LIMIT};
pub use restaurant::{NewRestaurant, RestaurantFilter, RestaurantRecord, RestaurantView};
pub use scorer::{QueryContext, ScoredCandidate, Scorer, ScoringParams};
pub use store::{MemoryStore, RestaurantStore};
pub use templates::Locale;
pub use tokenizer::Tokenizer;
