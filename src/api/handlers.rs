use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{PurchaseQuery, PurchaseRecord, Recommendation},
};

use super::AppState;

const CUSTOMER_NOT_FOUND: &str = "Customer ID not found in the dataset.";

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub season: String,
    pub item_purchased: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    pub customer_id: String,
    pub item_purchased: String,
    pub color: String,
    pub season: String,
}

impl From<&PurchaseRecord> for PurchaseResponse {
    fn from(record: &PurchaseRecord) -> Self {
        Self {
            customer_id: record.customer_id.clone(),
            item_purchased: record.item_purchased.clone(),
            color: record.color.clone(),
            season: record.season.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub item: String,
    pub color: String,
    pub image_url: Option<String>,
    /// "<item> in <color>"
    pub label: String,
    /// Label when an image exists, "Image not available" otherwise
    pub image_caption: String,
    pub is_placeholder: bool,
}

impl From<&Recommendation> for RecommendationResponse {
    fn from(recommendation: &Recommendation) -> Self {
        Self {
            item: recommendation.item.clone(),
            color: recommendation.color.clone(),
            image_url: recommendation.image_url.clone(),
            label: recommendation.label(),
            image_caption: recommendation.image_caption(),
            is_placeholder: recommendation.is_none(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerRecommendationsResponse {
    pub purchase: PurchaseResponse,
    pub recommendations: Vec<RecommendationResponse>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<RecommendationResponse>,
}

#[derive(Debug, Serialize)]
pub struct SeasonSummary {
    pub season: String,
    pub top_items: Vec<String>,
    pub top_colors: Vec<String>,
}

fn to_responses(recommendations: &[Recommendation]) -> Vec<RecommendationResponse> {
    recommendations
        .iter()
        .map(RecommendationResponse::from)
        .collect()
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Purchase information for one customer
pub async fn get_customer(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(customer_id): Path<String>,
) -> AppResult<Json<PurchaseResponse>> {
    match state.catalog.find_customer(&customer_id) {
        Some(record) => Ok(Json(PurchaseResponse::from(record))),
        None => {
            tracing::warn!(request_id = %request_id, customer_id = %customer_id, "Unknown customer");
            Err(AppError::NotFound(CUSTOMER_NOT_FOUND.to_string()))
        }
    }
}

/// Purchase information plus seasonal recommendations for one customer
pub async fn get_customer_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(customer_id): Path<String>,
) -> AppResult<Json<CustomerRecommendationsResponse>> {
    let result = state
        .catalog
        .recommend_for_customer(&customer_id)
        .ok_or_else(|| {
            tracing::warn!(request_id = %request_id, customer_id = %customer_id, "Unknown customer");
            AppError::NotFound(CUSTOMER_NOT_FOUND.to_string())
        })?;

    tracing::info!(
        request_id = %request_id,
        customer_id = %customer_id,
        season = %result.purchase.season,
        count = result.recommendations.len(),
        "Recommendations generated"
    );

    Ok(Json(CustomerRecommendationsResponse {
        purchase: PurchaseResponse::from(&result.purchase),
        recommendations: to_responses(&result.recommendations),
    }))
}

/// Recommendations for a season/item/color context supplied by the caller
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationsResponse>> {
    if request.season.trim().is_empty() {
        return Err(AppError::InvalidInput("season must not be empty".to_string()));
    }
    if request.item_purchased.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "item_purchased must not be empty".to_string(),
        ));
    }

    let query = PurchaseQuery {
        season: request.season,
        item_purchased: request.item_purchased,
        color: request.color,
    };
    let recommendations = state.catalog.recommend(&query);

    tracing::info!(
        request_id = %request_id,
        season = %query.season,
        count = recommendations.len(),
        "Recommendations generated"
    );

    Ok(Json(RecommendationsResponse {
        recommendations: to_responses(&recommendations),
    }))
}

/// Top items and colors for every season in the purchase history
pub async fn get_seasons(State(state): State<AppState>) -> Json<Vec<SeasonSummary>> {
    let catalog = &state.catalog;
    let seasons = catalog
        .top_items()
        .seasons()
        .map(|season| SeasonSummary {
            season: season.to_string(),
            top_items: catalog.top_items().get(season).to_vec(),
            top_colors: catalog.top_colors().get(season).to_vec(),
        })
        .collect();
    Json(seasons)
}
