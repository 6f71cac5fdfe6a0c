pub mod customers;
pub mod dashboard;
pub mod transactions;

pub use customers::{
    CreateCustomerRequest, CustomerDetailResponse, CustomerListParams, CustomerListResponse,
    CustomerResponse,
};
pub use dashboard::{DashboardResponse, InventorySummaryResponse, UpdateInventoryRequest};
pub use transactions::{
    CreateTransactionRequest, RecentTransactionsParams, RecentTransactionsResponse,
    TransactionCreatedResponse, TransactionListParams, TransactionListResponse,
    TransactionResponse,
};
