pub mod customers;
pub mod dashboard;
pub mod health;
pub mod inventory;
pub mod transactions;

pub use customers::{create_customer, get_customer, list_customers};
pub use dashboard::dashboard;
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use inventory::{get_inventory, update_inventory};
pub use transactions::{create_transaction, list_customer_transactions, recent_transactions};
