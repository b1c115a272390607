//! Personal finance tracking: an in-memory transaction store plus the
//! aggregations, queries and CSV export a front end renders from it.

pub mod error;
pub mod logging;
pub mod models;
pub mod operations;
pub mod store;

pub use error::{Error, Result};
pub use models::category::{Category, CategoryType};
pub use models::transaction::{Transaction, TransactionInput, TransactionType};
pub use store::transaction_store::TransactionStore;
