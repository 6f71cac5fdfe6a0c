use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::dtos::{
    CreateTransactionRequest, RecentTransactionsParams, RecentTransactionsResponse,
    TransactionCreatedResponse, TransactionListParams, TransactionListResponse,
    TransactionResponse,
};
use crate::error::AppError;
use crate::ledger::{compute_stats, filter_and_paginate};
use crate::middleware::AuthSession;
use crate::models::Transaction;
use crate::services::metrics::TRANSACTIONS_RECORDED;
use crate::startup::AppState;

pub async fn create_transaction(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<String>,
    Json(payload): Json<CreateTransactionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    if let Some(amount) = payload.amount {
        if amount.is_sign_negative() {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Amount cannot be negative"
            )));
        }
    }

    state
        .store
        .get_customer(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Customer not found")))?;

    let transaction = Transaction::new(
        id.clone(),
        payload.kind,
        payload.amount,
        payload.cylinders_issued,
        payload.cylinders_returned,
        payload.notes,
    );
    state.store.insert_transaction(transaction.clone()).await?;
    TRANSACTIONS_RECORDED
        .with_label_values(&[transaction.kind.as_str()])
        .inc();

    // Refresh the customer snapshot from the full history so list, dashboard
    // and inventory views stay consistent with the ledger.
    let history = state.store.transactions_for_customer(&id).await?;
    let stats = compute_stats(&history);
    state
        .store
        .update_customer_snapshot(&id, stats.balance_due, stats.cylinders_out)
        .await?;

    tracing::info!(
        customer_id = %id,
        kind = transaction.kind.as_str(),
        user_id = %session.user_id,
        "Transaction recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(TransactionCreatedResponse {
            transaction: TransactionResponse::from(transaction),
            stats,
        }),
    ))
}

pub async fn list_customer_transactions(
    State(state): State<AppState>,
    _session: AuthSession,
    Path(id): Path<String>,
    Query(params): Query<TransactionListParams>,
) -> Result<impl IntoResponse, AppError> {
    state
        .store
        .get_customer(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Customer not found")))?;

    let requested_page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(20).max(1).min(100);
    let kind = params.kind;

    let transactions = state.store.transactions_for_customer(&id).await?;
    let window = filter_and_paginate(
        transactions,
        |tx| kind.map_or(true, |k| tx.kind == k),
        requested_page,
        page_size,
    );

    Ok(Json(TransactionListResponse {
        transactions: window
            .items
            .into_iter()
            .map(TransactionResponse::from)
            .collect(),
        total: window.total_items,
        page: window.page,
        page_size: window.page_size,
        total_pages: window.total_pages,
    }))
}

pub async fn recent_transactions(
    State(state): State<AppState>,
    _session: AuthSession,
    Query(params): Query<RecentTransactionsParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(5).clamp(1, 50);
    let transactions = state.store.recent_transactions(limit).await?;

    Ok(Json(RecentTransactionsResponse {
        transactions: transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect(),
    }))
}
