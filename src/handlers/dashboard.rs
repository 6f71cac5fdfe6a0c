use axum::{extract::State, response::IntoResponse, Json};
use rust_decimal::Decimal;

use crate::dtos::{DashboardResponse, TransactionResponse};
use crate::error::AppError;
use crate::middleware::AuthSession;
use crate::startup::AppState;

/// How many recent transactions the dashboard shows.
const RECENT_ACTIVITY_LIMIT: i64 = 5;

pub async fn dashboard(
    State(state): State<AppState>,
    _session: AuthSession,
) -> Result<impl IntoResponse, AppError> {
    let customers = state.store.list_customers().await?;
    let total_customers = customers.len() as u64;
    let total_balance_due: Decimal = customers.iter().map(|c| c.balance_due).sum();
    let total_cylinders_out: i64 = customers.iter().map(|c| c.cylinders_out).sum();

    let recent = state
        .store
        .recent_transactions(RECENT_ACTIVITY_LIMIT)
        .await?;

    Ok(Json(DashboardResponse {
        total_customers,
        total_balance_due,
        total_cylinders_out,
        recent_transactions: recent.into_iter().map(TransactionResponse::from).collect(),
    }))
}
