//! Assistant facade: store fetch, ranking and reply assembly
//!
//! One awaited store read per call, then a synchronous scoring pass. A
//! failed read surfaces as `StoreUnavailable`; an empty catalog surfaces as
//! `EmptyCatalog` rather than an empty suggestion list.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::dish::NewDish;
use crate::error::{AssistantError, InsertError};
use crate::ranker::{RankMode, Ranker, DEFAULT_LIMIT};
use crate::restaurant::{NewRestaurant, RestaurantFilter, RestaurantRecord};
use crate::scorer::ScoredCandidate;
use crate::store::RestaurantStore;
use crate::templates::Locale;

/// One suggested restaurant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub id: u64,
    pub name: String,
    pub area: String,
    pub rating: Option<f64>,
    pub cuisine: String,
    pub reason: String,
}

/// Reply to a free-text query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantReply {
    pub mode: RankMode,
    pub explanation: String,
    pub items: Vec<Suggestion>,
}

/// Random pick for "surprise me"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurprisePick {
    pub id: u64,
    pub name: String,
    pub area: String,
    pub cuisine: String,
    pub rating: Option<f64>,
    pub message: String,
}

/// Turns user messages into ranked suggestions
pub struct Assistant {
    store: Arc<dyn RestaurantStore>,
    ranker: Ranker,
    locale: Locale,
    limit: usize,
}

impl Assistant {
    pub fn new(store: Arc<dyn RestaurantStore>, ranker: Ranker) -> Self {
        Self {
            store,
            ranker,
            locale: Locale::default(),
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    async fn load_catalog(&self) -> Result<Vec<RestaurantRecord>, AssistantError> {
        let restaurants = self.store.fetch_all_restaurants().await.map_err(|e| {
            warn!("Restaurant store fetch failed: {e}");
            AssistantError::StoreUnavailable(e)
        })?;

        if restaurants.is_empty() {
            return Err(AssistantError::EmptyCatalog);
        }
        Ok(restaurants)
    }

    /// Rank the catalog against a free-text message
    pub async fn handle_query(&self, message: &str) -> Result<AssistantReply, AssistantError> {
        let restaurants = self.load_catalog().await?;

        let query = self.ranker.scorer().query(message);
        debug!(tokens = query.tokens.len(), concepts = ?query.concepts, "Parsed query");

        let ranking = self.ranker.rank(&restaurants, &query, self.limit);
        Ok(self.reply(message, ranking.mode, &ranking.results))
    }

    fn reply(&self, message: &str, mode: RankMode, results: &[ScoredCandidate]) -> AssistantReply {
        let explanation = match mode {
            RankMode::Matched => self.locale.matched_explanation(message),
            RankMode::Fallback => self.locale.fallback_explanation(),
        };

        let items = results
            .iter()
            .map(|c| {
                let r = &c.restaurant;
                let reason = match mode {
                    RankMode::Matched => self.locale.matched_reason(r),
                    RankMode::Fallback => self.locale.fallback_reason(r),
                };
                Suggestion {
                    id: r.id,
                    name: r.name().to_string(),
                    area: r.area().to_string(),
                    rating: r.rating,
                    cuisine: r.cuisine().to_string(),
                    reason,
                }
            })
            .collect();

        AssistantReply {
            mode,
            explanation,
            items,
        }
    }

    /// Uniformly random restaurant from the whole catalog
    pub async fn surprise(&self) -> Result<SurprisePick, AssistantError> {
        let restaurants = self.load_catalog().await?;
        debug!(pool = restaurants.len(), "Picking surprise");

        self.pick_surprise(&restaurants, &mut rand::thread_rng())
            .ok_or(AssistantError::EmptyCatalog)
    }

    pub fn pick_surprise<R: Rng + ?Sized>(
        &self,
        restaurants: &[RestaurantRecord],
        rng: &mut R,
    ) -> Option<SurprisePick> {
        restaurants.choose(rng).map(|r| SurprisePick {
            id: r.id,
            name: r.name().to_string(),
            area: r.area().to_string(),
            cuisine: r.cuisine().to_string(),
            rating: r.rating,
            message: self.locale.surprise_message(r),
        })
    }

    /// Catalog listing; an empty catalog is just an empty list here
    pub async fn list_restaurants(
        &self,
        filter: &RestaurantFilter,
    ) -> Result<Vec<RestaurantRecord>, AssistantError> {
        let restaurants = self
            .store
            .fetch_all_restaurants()
            .await
            .map_err(AssistantError::StoreUnavailable)?;
        Ok(filter.apply(restaurants))
    }

    pub async fn find_restaurant(&self, id: u64) -> Result<Option<RestaurantRecord>, AssistantError> {
        let restaurants = self
            .store
            .fetch_all_restaurants()
            .await
            .map_err(AssistantError::StoreUnavailable)?;
        Ok(restaurants.into_iter().find(|r| r.id == id))
    }

    pub async fn add_restaurant(&self, payload: NewRestaurant) -> Result<u64, InsertError> {
        self.store.insert_restaurant(payload).await
    }

    pub async fn add_dish(&self, payload: NewDish) -> Result<u64, InsertError> {
        self.store.insert_dish(payload).await
    }
}
