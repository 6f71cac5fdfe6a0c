use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rental customer, with a cached summary of their transaction history.
///
/// `balance_due` and `cylinders_out` are snapshots: they are recomputed from
/// the full transaction list and written back whenever a transaction is
/// recorded, so list views never have to fold every customer's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub balance_due: Decimal,
    pub cylinders_out: i64,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(
        name: String,
        phone: Option<String>,
        email: Option<String>,
        address: Option<String>,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            phone,
            email,
            address,
            notes,
            balance_due: Decimal::ZERO,
            cylinders_out: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive match against name and email; phone numbers match on
    /// a plain substring so "98" finds "+91 98xxx".
    pub fn matches_search(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q)
            || self
                .email
                .as_ref()
                .map_or(false, |email| email.to_lowercase().contains(&q))
            || self
                .phone
                .as_ref()
                .map_or(false, |phone| phone.contains(query))
    }
}
