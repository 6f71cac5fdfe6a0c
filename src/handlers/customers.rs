use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::dtos::{
    CreateCustomerRequest, CustomerDetailResponse, CustomerListParams, CustomerListResponse,
    CustomerResponse, TransactionResponse,
};
use crate::error::AppError;
use crate::ledger::{compute_stats, filter_and_paginate};
use crate::middleware::AuthSession;
use crate::models::Customer;
use crate::services::metrics::CUSTOMERS_CREATED;
use crate::startup::AppState;

pub async fn create_customer(
    State(state): State<AppState>,
    session: AuthSession,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Name cannot be blank"
        )));
    }

    let customer = Customer::new(
        name,
        payload.phone,
        payload.email,
        payload.address,
        payload.notes,
    );
    state.store.create_customer(customer.clone()).await?;
    CUSTOMERS_CREATED.inc();

    tracing::info!(customer_id = %customer.id, user_id = %session.user_id, "Customer created");

    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

pub async fn list_customers(
    State(state): State<AppState>,
    _session: AuthSession,
    Query(params): Query<CustomerListParams>,
) -> Result<impl IntoResponse, AppError> {
    let requested_page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(20).max(1).min(100);
    let search = params.search.unwrap_or_default();
    let search = search.trim();
    let holding_only = params.holding_only.unwrap_or(false);

    let customers = state.store.list_customers().await?;
    let total_customers = customers.len() as u64;

    let window = filter_and_paginate(
        customers,
        |c| {
            (search.is_empty() || c.matches_search(search))
                && (!holding_only || c.cylinders_out > 0)
        },
        requested_page,
        page_size,
    );

    Ok(Json(CustomerListResponse {
        customers: window
            .items
            .into_iter()
            .map(CustomerResponse::from)
            .collect(),
        total: window.total_items,
        total_customers,
        page: window.page,
        page_size: window.page_size,
        total_pages: window.total_pages,
    }))
}

pub async fn get_customer(
    State(state): State<AppState>,
    _session: AuthSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let customer = state
        .store
        .get_customer(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Customer not found")))?;

    let transactions = state.store.transactions_for_customer(&id).await?;
    let stats = compute_stats(&transactions);

    Ok(Json(CustomerDetailResponse {
        customer: CustomerResponse::from(customer),
        stats,
        transactions: transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect(),
    }))
}
