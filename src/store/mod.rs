//! In-memory repositories
//!
//! Each store is a thin keyed map over one entity type, offering save,
//! find-by-key, find-all, and the filter queries the services need. All
//! state lives in one process; mutation through a `find_mut` reference is
//! the persistence step, with last-write-wins semantics per key.

pub mod account_store;
pub mod customer_store;
pub mod loan_store;
pub mod transaction_store;

pub use account_store::AccountStore;
pub use customer_store::CustomerStore;
pub use loan_store::LoanStore;
pub use transaction_store::TransactionStore;
