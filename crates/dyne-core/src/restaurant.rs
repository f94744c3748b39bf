//! Restaurant catalog records, listing filters and admin payloads

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Read-only projection of a catalog row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRecord {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    /// 0-5 scale; numeric strings are accepted, garbage or out-of-range becomes `None`
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub review_snippet: Option<String>,
    /// Comma-delimited
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub avg_cost_for_two: Option<u32>,
    #[serde(default)]
    pub landmark: Option<String>,
    #[serde(default)]
    pub is_pure_veg: bool,
    #[serde(default)]
    pub opens_at: Option<String>,
    #[serde(default)]
    pub closes_at: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let rating = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(rating.filter(|r| (0.0..=5.0).contains(r)))
}

impl RestaurantRecord {
    /// Minimal record, mostly for tests and fixtures
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            area: None,
            cuisine: None,
            rating: None,
            description: None,
            review_snippet: None,
            tags: None,
            price_level: None,
            avg_cost_for_two: None,
            landmark: None,
            is_pure_veg: false,
            opens_at: None,
            closes_at: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn area(&self) -> &str {
        self.area.as_deref().unwrap_or("")
    }

    pub fn cuisine(&self) -> &str {
        self.cuisine.as_deref().unwrap_or("")
    }

    /// Rating with missing values read as zero
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// Matchable text blob: name, cuisine, area, description, review snippet, tags
    pub fn project_text(&self) -> String {
        [
            self.name.as_deref(),
            self.cuisine.as_deref(),
            self.area.as_deref(),
            self.description.as_deref(),
            self.review_snippet.as_deref(),
            self.tags.as_deref(),
        ]
        .map(|field| field.unwrap_or(""))
        .join(" ")
    }

    /// Tags split on commas, blanks dropped
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Wire shape of a catalog row, with tags as a list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantView {
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub price_level: Option<u8>,
    pub avg_cost_for_two: Option<u32>,
    pub area: Option<String>,
    pub landmark: Option<String>,
    pub rating: Option<f64>,
    pub review_snippet: Option<String>,
    pub tags: Vec<String>,
    pub is_pure_veg: bool,
    pub opens_at: Option<String>,
    pub closes_at: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<RestaurantRecord> for RestaurantView {
    fn from(r: RestaurantRecord) -> Self {
        let tags = r.tag_list();
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
            cuisine: r.cuisine,
            price_level: r.price_level,
            avg_cost_for_two: r.avg_cost_for_two,
            area: r.area,
            landmark: r.landmark,
            rating: r.rating,
            review_snippet: r.review_snippet,
            tags,
            is_pure_veg: r.is_pure_veg,
            opens_at: r.opens_at,
            closes_at: r.closes_at,
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

/// Catalog listing filter; unset fields match everything
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantFilter {
    /// Whole area name, ignoring case
    pub area: Option<String>,
    /// Case-insensitive substring of the cuisine
    pub cuisine: Option<String>,
    pub max_price_level: Option<u8>,
    pub min_rating: Option<f64>,
}

impl RestaurantFilter {
    pub fn matches(&self, r: &RestaurantRecord) -> bool {
        if let Some(area) = &self.area {
            match &r.area {
                Some(a) if a.eq_ignore_ascii_case(area) => {}
                _ => return false,
            }
        }

        if let Some(cuisine) = &self.cuisine {
            let needle = cuisine.to_lowercase();
            if !r.cuisine().to_lowercase().contains(&needle) {
                return false;
            }
        }

        if let Some(max) = self.max_price_level {
            match r.price_level {
                Some(level) if level <= max => {}
                _ => return false,
            }
        }

        if let Some(min) = self.min_rating {
            match r.rating {
                Some(rating) if rating >= min => {}
                _ => return false,
            }
        }

        true
    }

    pub fn apply(&self, restaurants: Vec<RestaurantRecord>) -> Vec<RestaurantRecord> {
        restaurants.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Tags arrive either as a list or as an already joined string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Joined(String),
}

impl TagsInput {
    pub(crate) fn joined(self) -> String {
        match self {
            TagsInput::List(tags) => tags.join(","),
            TagsInput::Joined(tags) => tags,
        }
    }
}

/// Admin payload for adding a restaurant
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRestaurant {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub price_level: Option<u8>,
    pub avg_cost_for_two: Option<u32>,
    pub area: Option<String>,
    pub landmark: Option<String>,
    pub rating: Option<f64>,
    pub tags: Option<TagsInput>,
    #[serde(default)]
    pub is_pure_veg: bool,
    pub opens_at: Option<String>,
    pub closes_at: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

fn required(field: Option<String>) -> Result<String, ValidationError> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ValidationError::MissingRequired)
}

impl NewRestaurant {
    /// Validate and fill catalog defaults, producing a record with `id`
    pub fn into_record(self, id: u64) -> Result<RestaurantRecord, ValidationError> {
        let name = required(self.name)?;
        let cuisine = required(self.cuisine)?;
        let area = required(self.area)?;

        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(ValidationError::RatingOutOfRange);
            }
        }

        Ok(RestaurantRecord {
            id,
            name: Some(name),
            area: Some(area),
            cuisine: Some(cuisine),
            rating: self.rating,
            description: Some(self.description.unwrap_or_default()),
            review_snippet: Some(String::new()),
            tags: Some(self.tags.map(TagsInput::joined).unwrap_or_default()),
            price_level: Some(self.price_level.filter(|&p| p != 0).unwrap_or(2)),
            avg_cost_for_two: Some(self.avg_cost_for_two.filter(|&c| c != 0).unwrap_or(400)),
            landmark: Some(self.landmark.unwrap_or_default()),
            is_pure_veg: self.is_pure_veg,
            opens_at: Some(self.opens_at.unwrap_or_else(|| "11:00:00".to_string())),
            closes_at: Some(self.closes_at.unwrap_or_else(|| "22:30:00".to_string())),
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }
}
