//! # JSON catalog
//!
//! Restaurants and dishes kept as JSON arrays on disk. The restaurant file is
//! re-read on every fetch so edits show up on the next request without a
//! restart. Inserts are serialized through a mutex and written via a temp
//! file plus rename, so readers never observe a half-written catalog.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dyne_core::{
    dish::next_dish_id, store::next_id, DishRecord, InsertError, NewDish, NewRestaurant,
    RestaurantRecord, RestaurantStore, StoreError,
};
use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::Mutex};
use tracing::{debug, info};

pub struct JsonCatalogStore {
    restaurants_path: PathBuf,
    dishes_path: PathBuf,
    write_lock: Mutex<()>,
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let bytes = fs::read(path).await?;
    let rows: Vec<T> = serde_json::from_slice(&bytes)?;
    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

async fn write_json<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(rows)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

impl JsonCatalogStore {
    pub fn new(restaurants_path: impl Into<PathBuf>, dishes_path: impl Into<PathBuf>) -> Self {
        Self {
            restaurants_path: restaurants_path.into(),
            dishes_path: dishes_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Dishes file; a missing file is an empty list
    async fn read_dishes(&self) -> Result<Vec<DishRecord>, StoreError> {
        match read_json::<DishRecord>(&self.dishes_path).await {
            Err(StoreError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            other => other,
        }
    }
}

#[async_trait]
impl RestaurantStore for JsonCatalogStore {
    async fn fetch_all_restaurants(&self) -> Result<Vec<RestaurantRecord>, StoreError> {
        read_json(&self.restaurants_path).await
    }

    async fn insert_restaurant(&self, payload: NewRestaurant) -> Result<u64, InsertError> {
        let _guard = self.write_lock.lock().await;

        let mut restaurants: Vec<RestaurantRecord> = read_json(&self.restaurants_path).await?;
        let id = next_id(&restaurants);
        let record = payload.into_record(id)?;
        info!("Adding restaurant {} ({})", record.name(), id);

        restaurants.push(record);
        write_json(&self.restaurants_path, &restaurants).await?;
        Ok(id)
    }

    async fn insert_dish(&self, payload: NewDish) -> Result<u64, InsertError> {
        let _guard = self.write_lock.lock().await;

        let restaurants: Vec<RestaurantRecord> = read_json(&self.restaurants_path).await?;
        let mut dishes = self.read_dishes().await?;
        let id = next_dish_id(&dishes);
        let dish = payload.into_record(id, &restaurants)?;
        info!(
            "Adding dish {} ({}) to {} restaurants",
            dish.name,
            id,
            dish.restaurant_ids.len()
        );

        dishes.push(dish);
        write_json(&self.dishes_path, &dishes).await?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyne_core::ValidationError;
    use tempfile::tempdir;

    const CATALOG: &str = r#"[
        {"id": 1, "name": "Spice Route", "area": "RS Puram", "cuisine": "Biryani", "rating": "4.0", "tags": "biryani"},
        {"id": 2, "name": "Krishna Veg", "area": "Gandhipuram", "cuisine": "South Indian", "rating": 4.2}
    ]"#;

    fn store_in(dir: &Path) -> JsonCatalogStore {
        JsonCatalogStore::new(dir.join("restaurants.json"), dir.join("dishes.json"))
    }

    #[tokio::test]
    async fn test_fetch_reads_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("restaurants.json"), CATALOG).unwrap();

        let restaurants = store_in(dir.path()).fetch_all_restaurants().await.unwrap();
        assert_eq!(restaurants.len(), 2);
        assert_eq!(restaurants[0].rating, Some(4.0));
    }

    #[tokio::test]
    async fn test_fetch_sees_fresh_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("restaurants.json");
        std::fs::write(&path, "[]").unwrap();

        let store = store_in(dir.path());
        assert!(store.fetch_all_restaurants().await.unwrap().is_empty());

        std::fs::write(&path, CATALOG).unwrap();
        assert_eq!(store.fetch_all_restaurants().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            store_in(dir.path()).fetch_all_restaurants().await,
            Err(StoreError::Io(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_file_is_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("restaurants.json"), "{\"oops\": true").unwrap();

        assert!(matches!(
            store_in(dir.path()).fetch_all_restaurants().await,
            Err(StoreError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_insert_persists() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("restaurants.json"), CATALOG).unwrap();

        let id = store_in(dir.path())
            .insert_restaurant(NewRestaurant {
                name: Some("Brew Lab".into()),
                cuisine: Some("Cafe".into()),
                area: Some("Saibaba Colony".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(id, 3);

        let restaurants = store_in(dir.path()).fetch_all_restaurants().await.unwrap();
        assert_eq!(restaurants.len(), 3);
        assert_eq!(restaurants[2].name(), "Brew Lab");
        assert_eq!(restaurants[2].avg_cost_for_two, Some(400));
    }

    #[tokio::test]
    async fn test_insert_invalid_leaves_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("restaurants.json");
        std::fs::write(&path, CATALOG).unwrap();

        let result = store_in(dir.path())
            .insert_restaurant(NewRestaurant::default())
            .await;
        assert!(matches!(
            result,
            Err(InsertError::Invalid(ValidationError::MissingRequired))
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), CATALOG);
    }

    #[tokio::test]
    async fn test_insert_dish_creates_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("restaurants.json"), CATALOG).unwrap();
        let store = store_in(dir.path());

        let dish = |name: &str| NewDish {
            name: Some(name.into()),
            restaurant_ids: vec![1, 2],
            ..Default::default()
        };
        assert_eq!(store.insert_dish(dish("Mutton Biryani")).await.unwrap(), 1);
        assert_eq!(store.insert_dish(dish("Veg Biryani")).await.unwrap(), 2);

        let saved: Vec<DishRecord> =
            serde_json::from_slice(&std::fs::read(dir.path().join("dishes.json")).unwrap())
                .unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[1].name, "Veg Biryani");
        assert_eq!(saved[1].restaurant_ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_insert_dish_unknown_restaurant() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("restaurants.json"), CATALOG).unwrap();

        let result = store_in(dir.path())
            .insert_dish(NewDish {
                name: Some("Ghee Roast".into()),
                restaurant_ids: vec![7],
                ..Default::default()
            })
            .await;
        assert!(matches!(
            result,
            Err(InsertError::Invalid(ValidationError::UnknownRestaurant(7)))
        ));
        assert!(!dir.path().join("dishes.json").exists());
    }
}
