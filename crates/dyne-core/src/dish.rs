//! Dishes and the restaurants serving them

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::restaurant::{RestaurantRecord, TagsInput};

/// Catalog dish linked to the restaurants that serve it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Comma-delimited
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde(default)]
    pub restaurant_ids: Vec<u64>,
}

/// Admin payload for adding a dish
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDish {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<TagsInput>,
    pub base_price: Option<f64>,
    #[serde(default)]
    pub restaurant_ids: Vec<u64>,
}

impl NewDish {
    /// Validate against the current catalog and produce a dish with `id`.
    ///
    /// A zero price is stored as no price. Every linked restaurant must
    /// exist; duplicate links collapse to one.
    pub fn into_record(
        self,
        id: u64,
        restaurants: &[RestaurantRecord],
    ) -> Result<DishRecord, ValidationError> {
        let name = self
            .name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::MissingDishName)?;

        if self.base_price.is_some_and(|p| p < 0.0) {
            return Err(ValidationError::NegativePrice);
        }

        let mut restaurant_ids = self.restaurant_ids;
        restaurant_ids.sort_unstable();
        restaurant_ids.dedup();
        if let Some(&unknown) = restaurant_ids
            .iter()
            .find(|&&rid| !restaurants.iter().any(|r| r.id == rid))
        {
            return Err(ValidationError::UnknownRestaurant(unknown));
        }

        Ok(DishRecord {
            id,
            name,
            description: self.description.unwrap_or_default(),
            tags: self.tags.map(TagsInput::joined).unwrap_or_default(),
            base_price: self.base_price.filter(|&p| p > 0.0),
            restaurant_ids,
        })
    }
}

/// Next dish id after the current maximum
pub fn next_dish_id(dishes: &[DishRecord]) -> u64 {
    dishes.iter().map(|d| d.id).max().unwrap_or(0) + 1
}
