pub mod product;
pub mod transaction;

pub use product::Product;
pub use transaction::{NewTransaction, Transaction, TransactionStatus, ANONYMOUS_USER};
