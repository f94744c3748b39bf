use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use dyne_core::{
    AssistantReply, NewDish, NewRestaurant, RestaurantFilter, RestaurantView, SurprisePick,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::{error::AppError, state::AppState};

#[derive(Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub message: Option<String>,
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn restaurants_handler(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<RestaurantFilter>,
) -> Result<Json<Vec<RestaurantView>>, AppError> {
    let restaurants = state.assistant.list_restaurants(&filter).await?;
    debug!("Listing {} restaurants", restaurants.len());
    Ok(Json(restaurants.into_iter().map(RestaurantView::from).collect()))
}

pub async fn restaurant_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<RestaurantView>, AppError> {
    state
        .assistant
        .find_restaurant(id)
        .await?
        .map(|r| Json(r.into()))
        .ok_or(AppError::NotFound)
}

pub async fn query_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<AssistantReply>, AppError> {
    let message = request.message.unwrap_or_default();
    let reply = state.assistant.handle_query(&message).await?;
    info!(mode = ?reply.mode, items = reply.items.len(), "Answered assistant query");
    Ok(Json(reply))
}

pub async fn surprise_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SurprisePick>, AppError> {
    Ok(Json(state.assistant.surprise().await?))
}

pub async fn add_restaurant_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewRestaurant>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let id = state.assistant.add_restaurant(payload).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn add_dish_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewDish>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let id = state.assistant.add_dish(payload).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}
