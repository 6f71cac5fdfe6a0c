use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::dtos::{InventorySummaryResponse, UpdateInventoryRequest};
use crate::error::AppError;
use crate::middleware::AuthSession;
use crate::models::ShopInventory;
use crate::startup::AppState;

pub async fn get_inventory(
    State(state): State<AppState>,
    _session: AuthSession,
) -> Result<impl IntoResponse, AppError> {
    let cylinders_with_customers = cylinders_with_customers(&state).await?;
    let inventory = state.store.get_inventory().await?;

    Ok(Json(summarize(inventory, cylinders_with_customers)))
}

pub async fn update_inventory(
    State(state): State<AppState>,
    session: AuthSession,
    Json(payload): Json<UpdateInventoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    if payload.full_in_shop + payload.empty_in_shop > payload.total_cylinders {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Shop counts exceed the cylinder total"
        )));
    }

    let inventory = ShopInventory::new(
        payload.total_cylinders,
        payload.full_in_shop,
        payload.empty_in_shop,
    );
    state.store.put_inventory(inventory.clone()).await?;

    tracing::info!(user_id = %session.user_id, "Shop inventory updated");

    let cylinders_with_customers = cylinders_with_customers(&state).await?;
    Ok(Json(summarize(Some(inventory), cylinders_with_customers)))
}

async fn cylinders_with_customers(state: &AppState) -> Result<i64, AppError> {
    let customers = state.store.list_customers().await?;
    Ok(customers.iter().map(|c| c.cylinders_out).sum())
}

fn summarize(
    inventory: Option<ShopInventory>,
    cylinders_with_customers: i64,
) -> InventorySummaryResponse {
    match inventory {
        Some(inv) => InventorySummaryResponse {
            total_cylinders: inv.total_cylinders,
            cylinders_with_customers,
            full_in_shop: inv.full_in_shop,
            empty_in_shop: inv.empty_in_shop,
            updated_at: Some(inv.updated_at.to_rfc3339()),
        },
        // No stock-take recorded yet: shop counts read as zero.
        None => InventorySummaryResponse {
            total_cylinders: 0,
            cylinders_with_customers,
            full_in_shop: 0,
            empty_in_shop: 0,
            updated_at: None,
        },
    }
}
