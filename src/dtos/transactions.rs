use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ledger::CustomerStats;
use crate::models::{Transaction, TransactionKind};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTransactionRequest {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Option<Decimal>,
    #[validate(range(min = 0, message = "Cylinder counts cannot be negative"))]
    pub cylinders_issued: Option<i64>,
    #[validate(range(min = 0, message = "Cylinder counts cannot be negative"))]
    pub cylinders_returned: Option<i64>,
    #[validate(length(max = 1000, message = "Notes are too long"))]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub id: String,
    pub customer_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Option<Decimal>,
    pub cylinders_issued: Option<i64>,
    pub cylinders_returned: Option<i64>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            customer_id: tx.customer_id,
            kind: tx.kind,
            amount: tx.amount,
            cylinders_issued: tx.cylinders_issued,
            cylinders_returned: tx.cylinders_returned,
            notes: tx.notes,
            created_at: tx.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TransactionListParams {
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<TransactionResponse>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

#[derive(Debug, Deserialize)]
pub struct RecentTransactionsParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RecentTransactionsResponse {
    pub transactions: Vec<TransactionResponse>,
}

#[derive(Debug, Serialize)]
pub struct TransactionCreatedResponse {
    pub transaction: TransactionResponse,
    /// Totals after this transaction; also written back to the customer
    /// snapshot before the response is sent.
    pub stats: CustomerStats,
}
