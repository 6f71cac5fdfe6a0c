use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::{FindOptions, ReplaceOptions};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

use crate::config::{StoreBackend, TrackerConfig};
use crate::error::AppError;
use crate::models::{Customer, ShopInventory, Transaction, LEGACY_KINDS, SHOP_INVENTORY_ID};
use crate::services::database::MongoDb;

/// Persistence seam for customers, transactions and shop inventory.
///
/// Listings come back newest-first; derived figures are never computed here,
/// only the snapshot fields are written back on request.
#[async_trait]
pub trait TrackerStore: Send + Sync {
    async fn create_customer(&self, customer: Customer) -> Result<(), AppError>;
    async fn list_customers(&self) -> Result<Vec<Customer>, AppError>;
    async fn get_customer(&self, id: &str) -> Result<Option<Customer>, AppError>;
    async fn update_customer_snapshot(
        &self,
        id: &str,
        balance_due: Decimal,
        cylinders_out: i64,
    ) -> Result<(), AppError>;
    async fn insert_transaction(&self, transaction: Transaction) -> Result<(), AppError>;
    async fn transactions_for_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<Transaction>, AppError>;
    async fn recent_transactions(&self, limit: i64) -> Result<Vec<Transaction>, AppError>;
    async fn get_inventory(&self) -> Result<Option<ShopInventory>, AppError>;
    async fn put_inventory(&self, inventory: ShopInventory) -> Result<(), AppError>;
    /// Rewrites transaction kinds written by earlier releases onto the closed
    /// set. Returns how many documents changed.
    async fn migrate_legacy_kinds(&self) -> Result<u64, AppError>;
    async fn health_check(&self) -> Result<(), AppError>;
}

pub struct MongoStore {
    db: MongoDb,
}

impl MongoStore {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TrackerStore for MongoStore {
    async fn create_customer(&self, customer: Customer) -> Result<(), AppError> {
        self.db.customers().insert_one(customer, None).await?;
        Ok(())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();
        let cursor = self.db.customers().find(doc! {}, Some(options)).await?;
        let customers = cursor.try_collect().await?;
        Ok(customers)
    }

    async fn get_customer(&self, id: &str) -> Result<Option<Customer>, AppError> {
        let customer = self
            .db
            .customers()
            .find_one(doc! { "_id": id }, None)
            .await?;
        Ok(customer)
    }

    async fn update_customer_snapshot(
        &self,
        id: &str,
        balance_due: Decimal,
        cylinders_out: i64,
    ) -> Result<(), AppError> {
        let update = doc! {
            "$set": {
                "balance_due": mongodb::bson::to_bson(&balance_due)?,
                "cylinders_out": cylinders_out,
                "updated_at": mongodb::bson::DateTime::now()
            }
        };
        self.db
            .customers()
            .update_one(doc! { "_id": id }, update, None)
            .await?;
        Ok(())
    }

    async fn insert_transaction(&self, transaction: Transaction) -> Result<(), AppError> {
        self.db.transactions().insert_one(transaction, None).await?;
        Ok(())
    }

    async fn transactions_for_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<Transaction>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();
        let cursor = self
            .db
            .transactions()
            .find(doc! { "customer_id": customer_id }, Some(options))
            .await?;
        let transactions = cursor.try_collect().await?;
        Ok(transactions)
    }

    async fn recent_transactions(&self, limit: i64) -> Result<Vec<Transaction>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .build();
        let cursor = self.db.transactions().find(doc! {}, Some(options)).await?;
        let transactions = cursor.try_collect().await?;
        Ok(transactions)
    }

    async fn get_inventory(&self) -> Result<Option<ShopInventory>, AppError> {
        let inventory = self
            .db
            .inventory()
            .find_one(doc! { "_id": SHOP_INVENTORY_ID }, None)
            .await?;
        Ok(inventory)
    }

    async fn put_inventory(&self, inventory: ShopInventory) -> Result<(), AppError> {
        let options = ReplaceOptions::builder().upsert(true).build();
        self.db
            .inventory()
            .replace_one(doc! { "_id": SHOP_INVENTORY_ID }, inventory, Some(options))
            .await?;
        Ok(())
    }

    async fn migrate_legacy_kinds(&self) -> Result<u64, AppError> {
        let mut migrated = 0;
        for (legacy, kind) in LEGACY_KINDS {
            let result = self
                .db
                .transactions()
                .update_many(
                    doc! { "type": legacy },
                    doc! { "$set": { "type": kind.as_str() } },
                    None,
                )
                .await?;
            migrated += result.modified_count;
        }
        Ok(migrated)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.db.health_check().await
    }
}

/// In-memory store for local development and tests.
#[derive(Default)]
pub struct MemoryStore {
    customers: RwLock<HashMap<String, Customer>>,
    transactions: RwLock<Vec<Transaction>>,
    inventory: RwLock<Option<ShopInventory>>,
}

#[async_trait]
impl TrackerStore for MemoryStore {
    async fn create_customer(&self, customer: Customer) -> Result<(), AppError> {
        self.customers
            .write()
            .await
            .insert(customer.id.clone(), customer);
        Ok(())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        let mut customers: Vec<Customer> =
            self.customers.read().await.values().cloned().collect();
        customers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(customers)
    }

    async fn get_customer(&self, id: &str) -> Result<Option<Customer>, AppError> {
        Ok(self.customers.read().await.get(id).cloned())
    }

    async fn update_customer_snapshot(
        &self,
        id: &str,
        balance_due: Decimal,
        cylinders_out: i64,
    ) -> Result<(), AppError> {
        if let Some(customer) = self.customers.write().await.get_mut(id) {
            customer.balance_due = balance_due;
            customer.cylinders_out = cylinders_out;
            customer.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn insert_transaction(&self, transaction: Transaction) -> Result<(), AppError> {
        self.transactions.write().await.push(transaction);
        Ok(())
    }

    async fn transactions_for_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<Transaction>, AppError> {
        let mut transactions: Vec<Transaction> = self
            .transactions
            .read()
            .await
            .iter()
            .filter(|tx| tx.customer_id == customer_id)
            .cloned()
            .collect();
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(transactions)
    }

    async fn recent_transactions(&self, limit: i64) -> Result<Vec<Transaction>, AppError> {
        let mut transactions: Vec<Transaction> = self.transactions.read().await.clone();
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        transactions.truncate(limit.max(0) as usize);
        Ok(transactions)
    }

    async fn get_inventory(&self) -> Result<Option<ShopInventory>, AppError> {
        Ok(self.inventory.read().await.clone())
    }

    async fn put_inventory(&self, inventory: ShopInventory) -> Result<(), AppError> {
        *self.inventory.write().await = Some(inventory);
        Ok(())
    }

    async fn migrate_legacy_kinds(&self) -> Result<u64, AppError> {
        // Nothing in memory predates the closed enum.
        Ok(0)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Builds the configured store backend, running index setup and the legacy
/// kind migration before handing it out.
pub async fn build_store(config: &TrackerConfig) -> Result<Arc<dyn TrackerStore>, AppError> {
    let store: Arc<dyn TrackerStore> = match config.store.backend {
        StoreBackend::Mongo => {
            let uri = config.store.mongodb_uri.as_ref().ok_or_else(|| {
                AppError::ConfigError(anyhow::anyhow!(
                    "MONGODB_URI is required for the mongo backend"
                ))
            })?;
            let db = MongoDb::connect(uri.expose_secret(), &config.store.database).await?;
            db.initialize_indexes().await?;
            Arc::new(MongoStore::new(db))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data will not survive a restart");
            Arc::new(MemoryStore::default())
        }
    };

    let migrated = store.migrate_legacy_kinds().await?;
    if migrated > 0 {
        tracing::info!(migrated, "Rewrote legacy transaction kinds");
    }

    Ok(store)
}
