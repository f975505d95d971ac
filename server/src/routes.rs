//! HTTP routes.
//!
//!   GET    /bills         all bills, store order
//!   POST   /bills         create
//!   PATCH  /bills         mark as paid, or sparse field edit
//!   DELETE /bills         delete by id
//!   GET    /bills/board   grouped checklist view
//!   GET    /analytics     spending report
//!   GET    /health

use crate::{
    api_error::{ApiError, ApiJson},
    state::SharedState,
};
use axum::{
    extract::State,
    http::HeaderName,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use billdesk_core::{
    analytics::{self, AnalyticsReport},
    board::{self, BillBoard},
    command::{BillCommand, CreateBillRequest, DeleteBillRequest, UpdateBillRequest},
    ledger::{Bill, LedgerOutcome},
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

/// Set on mark-as-paid responses: `recorded` or `skipped`.
pub const PAYMENT_STATUS_HEADER: &str = "x-payment-status";

pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(PAYMENT_STATUS_HEADER)]);

    Router::new()
        .route(
            "/bills",
            get(list_bills)
                .post(create_bill)
                .patch(update_bill)
                .delete(delete_bill),
        )
        .route("/bills/board", get(bill_board))
        .route("/analytics", get(spending_analytics))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "billdesk" }))
}

pub async fn list_bills(State(state): State<SharedState>) -> Result<Json<Vec<Bill>>, ApiError> {
    let bills = state.with_ledger(|ledger| ledger.list())?;
    Ok(Json(bills))
}

pub async fn create_bill(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<CreateBillRequest>,
) -> Result<Response, ApiError> {
    run(&state, req.into_command()?)
}

pub async fn update_bill(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<UpdateBillRequest>,
) -> Result<Response, ApiError> {
    run(&state, req.into_command()?)
}

pub async fn delete_bill(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<DeleteBillRequest>,
) -> Result<Response, ApiError> {
    run(&state, req.into_command())
}

pub async fn spending_analytics(
    State(state): State<SharedState>,
) -> Result<Json<AnalyticsReport>, ApiError> {
    let report = state.with_store(|store| analytics::report_from_store(store, &state.clock))?;
    Ok(Json(report))
}

pub async fn bill_board(State(state): State<SharedState>) -> Result<Json<BillBoard>, ApiError> {
    let bills = state.with_store(|store| store.all_bills())?;
    Ok(Json(board::build_board(
        &bills,
        state.clock.now(),
        &state.config.logo_base_url,
    )))
}

fn run(state: &SharedState, command: BillCommand) -> Result<Response, ApiError> {
    let outcome = state.with_ledger(|ledger| ledger.execute(command))?;
    Ok(match outcome {
        LedgerOutcome::Saved(bill) => Json(bill).into_response(),
        LedgerOutcome::Paid(paid) => {
            let status = paid.status();
            ([(PAYMENT_STATUS_HEADER, status)], Json(paid.into_bill())).into_response()
        }
        LedgerOutcome::Deleted { .. } => Json(json!({ "success": true })).into_response(),
    })
}
