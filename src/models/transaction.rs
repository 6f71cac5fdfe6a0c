use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Cylinders issued and charged to the customer.
    Sale,
    /// Money received from the customer.
    Payment,
    /// Empty cylinders taken back into the shop.
    Return,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Sale => "sale",
            TransactionKind::Payment => "payment",
            TransactionKind::Return => "return",
        }
    }
}

/// Kind names written by releases that predate the closed enum, paired with
/// their replacements. Rewritten in place before the service starts serving.
pub const LEGACY_KINDS: [(&str, TransactionKind); 3] = [
    ("CYLINDER_OUT", TransactionKind::Sale),
    ("CYLINDER_IN", TransactionKind::Return),
    ("PAYMENT", TransactionKind::Payment),
];

/// A single ledger event against a customer account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: String,
    pub customer_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Money moved by this event: the charge on a sale, the amount received
    /// on a payment. Usually absent on returns.
    pub amount: Option<Decimal>,
    pub cylinders_issued: Option<i64>,
    pub cylinders_returned: Option<i64>,
    pub notes: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        customer_id: String,
        kind: TransactionKind,
        amount: Option<Decimal>,
        cylinders_issued: Option<i64>,
        cylinders_returned: Option<i64>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            customer_id,
            kind,
            amount,
            cylinders_issued,
            cylinders_returned,
            notes,
            created_at: Utc::now(),
        }
    }
}
