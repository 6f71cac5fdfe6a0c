use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Well-known id of the single shop inventory document.
pub const SHOP_INVENTORY_ID: &str = "shop";

/// Shop-side cylinder stock, maintained by hand during stock-taking.
/// Cylinders out with customers are derived from customer snapshots and are
/// never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopInventory {
    #[serde(rename = "_id")]
    pub id: String,
    pub total_cylinders: i64,
    pub full_in_shop: i64,
    pub empty_in_shop: i64,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl ShopInventory {
    pub fn new(total_cylinders: i64, full_in_shop: i64, empty_in_shop: i64) -> Self {
        Self {
            id: SHOP_INVENTORY_ID.to_string(),
            total_cylinders,
            full_in_shop,
            empty_in_shop,
            updated_at: Utc::now(),
        }
    }
}
