use crate::error::AppError;
use crate::models::{Customer, ShopInventory, Transaction};
use mongodb::{
    bson::doc, options::IndexOptions, Client as MongoClient, Collection, Database, IndexModel,
};

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for tracker-service");

        // Compound index on (customer_id, created_at) for per-customer history
        let history_index = IndexModel::builder()
            .keys(doc! { "customer_id": 1, "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("customer_history".to_string())
                    .build(),
            )
            .build();

        self.transactions()
            .create_index(history_index, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create customer_history index on transactions: {}",
                    e
                );
                AppError::from(e)
            })?;

        // Index on created_at for the recent-activity feed
        let recent_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("recent_lookup".to_string())
                    .build(),
            )
            .build();

        self.transactions()
            .create_index(recent_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create recent_lookup index on transactions: {}", e);
                AppError::from(e)
            })?;

        // Index on created_at for stable customer listings
        let listing_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("customer_listing".to_string())
                    .build(),
            )
            .build();

        self.customers()
            .create_index(listing_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create customer_listing index on customers: {}", e);
                AppError::from(e)
            })?;

        tracing::info!("Tracker service indexes initialized");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn customers(&self) -> Collection<Customer> {
        self.db.collection("customers")
    }

    pub fn transactions(&self) -> Collection<Transaction> {
        self.db.collection("transactions")
    }

    pub fn inventory(&self) -> Collection<ShopInventory> {
        self.db.collection("inventory")
    }
}
