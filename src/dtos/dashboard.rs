use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dtos::transactions::TransactionResponse;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_customers: u64,
    /// Sum of customer balance snapshots.
    pub total_balance_due: Decimal,
    /// Sum of customer cylinder snapshots.
    pub total_cylinders_out: i64,
    pub recent_transactions: Vec<TransactionResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InventorySummaryResponse {
    pub total_cylinders: i64,
    /// Derived live from customer snapshots, never stored.
    pub cylinders_with_customers: i64,
    pub full_in_shop: i64,
    pub empty_in_shop: i64,
    /// Absent until the first stock-take has been recorded.
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateInventoryRequest {
    #[validate(range(min = 0, message = "Counts cannot be negative"))]
    pub total_cylinders: i64,
    #[validate(range(min = 0, message = "Counts cannot be negative"))]
    pub full_in_shop: i64,
    #[validate(range(min = 0, message = "Counts cannot be negative"))]
    pub empty_in_shop: i64,
}
