//! Restaurant store seam
//!
//! The engine reads the whole catalog once per request through
//! [`RestaurantStore`]. Implementations must not hand back partial results:
//! a failed read is an error.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::dish::{next_dish_id, DishRecord, NewDish};
use crate::error::{InsertError, StoreError};
use crate::restaurant::{NewRestaurant, RestaurantRecord};

#[async_trait]
pub trait RestaurantStore: Send + Sync {
    /// Every restaurant currently in the catalog
    async fn fetch_all_restaurants(&self) -> Result<Vec<RestaurantRecord>, StoreError>;

    /// Persist a validated admin payload, returning the new id
    async fn insert_restaurant(&self, payload: NewRestaurant) -> Result<u64, InsertError>;

    /// Persist a dish and its restaurant links, returning the new dish id
    async fn insert_dish(&self, payload: NewDish) -> Result<u64, InsertError>;
}

/// Next id after the current maximum
pub fn next_id(restaurants: &[RestaurantRecord]) -> u64 {
    restaurants.iter().map(|r| r.id).max().unwrap_or(0) + 1
}

/// In-process catalog
#[derive(Debug, Default)]
pub struct MemoryStore {
    restaurants: RwLock<Vec<RestaurantRecord>>,
    dishes: RwLock<Vec<DishRecord>>,
}

impl MemoryStore {
    pub fn new(restaurants: Vec<RestaurantRecord>) -> Self {
        Self {
            restaurants: RwLock::new(restaurants),
            dishes: RwLock::default(),
        }
    }
}

#[async_trait]
impl RestaurantStore for MemoryStore {
    async fn fetch_all_restaurants(&self) -> Result<Vec<RestaurantRecord>, StoreError> {
        Ok(self.restaurants.read().await.clone())
    }

    async fn insert_restaurant(&self, payload: NewRestaurant) -> Result<u64, InsertError> {
        let mut restaurants = self.restaurants.write().await;
        let id = next_id(&restaurants);
        restaurants.push(payload.into_record(id)?);
        Ok(id)
    }

    async fn insert_dish(&self, payload: NewDish) -> Result<u64, InsertError> {
        let restaurants = self.restaurants.read().await;
        let mut dishes = self.dishes.write().await;
        let id = next_dish_id(&dishes);
        dishes.push(payload.into_record(id, &restaurants)?);
        Ok(id)
    }
}
