pub mod customer;
pub mod inventory;
pub mod transaction;

pub use customer::Customer;
pub use inventory::{ShopInventory, SHOP_INVENTORY_ID};
pub use transaction::{Transaction, TransactionKind, LEGACY_KINDS};
