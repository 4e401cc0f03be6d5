//! Pricing route handlers

use axum::{extract::State, routing::post, Json, Router};
use uuid::Uuid;

use crate::error::Result;
use crate::AppState;

use super::requests::{BreakdownRequest, CollectivePriceRequest, MinPriceRequest};
use super::responses::{
    BreakdownDetail, BreakdownResponse, CollectivePriceResponse, MinPriceResponse, PriceTag,
    ServiceMinPriceResponse,
};
use super::services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/breakdown", post(breakdown))
        .route("/api/pricing/collective", post(collective))
        .route("/api/pricing/min-price", post(min_price))
}

/// Price breakdown of the current selection
async fn breakdown(
    State(state): State<AppState>,
    Json(request): Json<BreakdownRequest>,
) -> Result<Json<BreakdownResponse>> {
    let settings = services::effective_settings(&state.config.pricing, request.commission_rate)?;
    let quote =
        services::quote_booking(&state.cache, &settings, request.service, &request.selection).await?;

    let currency = &state.config.currency;
    Ok(Json(BreakdownResponse {
        quote_id: Uuid::new_v4(),
        service_id: quote.service_id,
        computable: quote.breakdown.is_some(),
        breakdown: quote
            .breakdown
            .as_ref()
            .map(|b| BreakdownDetail::from_breakdown(b, currency)),
    }))
}

/// Collective formula price for a number of animals
async fn collective(
    State(state): State<AppState>,
    Json(request): Json<CollectivePriceRequest>,
) -> Result<Json<CollectivePriceResponse>> {
    let settings = services::effective_settings(&state.config.pricing, request.commission_rate)?;
    let service =
        services::resolve_service(&state.cache, request.service, request.service_id.as_deref()).await?;
    let price = services::quote_collective(&service, &request.formule_id, request.animal_count, &settings)?;

    Ok(Json(CollectivePriceResponse::new(&price, &state.config.currency)))
}

/// "Starting at" prices for service cards and announcer profiles
async fn min_price(
    State(state): State<AppState>,
    Json(request): Json<MinPriceRequest>,
) -> Result<Json<MinPriceResponse>> {
    let rate = state.config.pricing.commission_rate;
    let currency = &state.config.currency;

    let prices = services::min_prices(
        &state.cache,
        request.services,
        &request.service_ids,
        request.announcer_id.as_deref(),
    )
    .await;

    let overall = prices
        .iter()
        .filter_map(|p| p.price)
        .min_by_key(|(amount, _)| *amount)
        .map(|(amount, unit)| PriceTag::new(amount, unit, rate, currency))
        .transpose()?;

    let mut per_service = Vec::with_capacity(prices.len());
    for p in prices {
        per_service.push(ServiceMinPriceResponse {
            starting_at: p
                .price
                .map(|(amount, unit)| PriceTag::new(amount, unit, rate, currency))
                .transpose()?,
            service_id: p.service_id,
        });
    }

    Ok(Json(MinPriceResponse {
        services: per_service,
        starting_at: overall,
    }))
}
