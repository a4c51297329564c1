use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use bank::DisplayRecord;
use serde::{Deserialize, Serialize};
#[cfg(feature = "verbose")]
use tracing::info;

use crate::{error::AppError, state::AppState};

const SUCCESS: &str = "success";

#[derive(Deserialize)]
pub struct SearchParams {
    query: String,
}

#[derive(Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
    pub items_loaded: usize,
}

#[derive(Serialize)]
pub struct ScanResponse {
    pub status: &'static str,
    pub data: DisplayRecord,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub status: &'static str,
    pub count: usize,
    pub results: Vec<DisplayRecord>,
}

#[derive(Serialize)]
pub struct BarcodesResponse {
    pub sample_barcodes: Vec<String>,
    pub total_items: usize,
}

pub async fn home_handler(State(state): State<Arc<AppState>>) -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "NutriRate API is Running",
        items_loaded: state.bank.as_ref().map_or(0, |bank| bank.len()),
    })
}

pub async fn scan_handler(
    State(state): State<Arc<AppState>>,
    Path(barcode): Path<String>,
) -> Result<Json<ScanResponse>, AppError> {
    let data = state
        .bank()?
        .find_by_barcode(&barcode)
        .ok_or(AppError::NotFound)?;

    #[cfg(feature = "verbose")]
    info!("Scan {} matched {} ({})", barcode.trim(), data.name, data.grade);

    Ok(Json(ScanResponse {
        status: SUCCESS,
        data,
    }))
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let results = state.bank()?.search_by_text(&params.query);

    #[cfg(feature = "verbose")]
    info!("Search '{}' returned {} items", params.query, results.len());

    Ok(Json(SearchResponse {
        status: SUCCESS,
        count: results.len(),
        results,
    }))
}

pub async fn barcodes_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BarcodesResponse>, AppError> {
    let bank = state.bank()?;

    Ok(Json(BarcodesResponse {
        sample_barcodes: bank
            .sample_barcodes()
            .into_iter()
            .map(str::to_string)
            .collect(),
        total_items: bank.len(),
    }))
}
