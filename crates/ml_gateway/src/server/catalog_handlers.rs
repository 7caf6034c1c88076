//! Static catalog endpoints

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::catalog::{Category, HealthStatus, Offer, Product};

use super::AppState;

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::online())
}

pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<Vec<Category>> {
    Json(state.catalog.categories.clone())
}

pub async fn list_products(State(state): State<Arc<AppState>>) -> Json<Vec<Product>> {
    Json(state.catalog.products.clone())
}

pub async fn list_offers(State(state): State<Arc<AppState>>) -> Json<Vec<Offer>> {
    Json(state.catalog.offers.clone())
}
