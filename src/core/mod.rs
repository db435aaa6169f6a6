//! Services and orchestration
//!
//! [`AccountService`] and [`LoanService`] own their stores and enforce the
//! business rules; [`BankEngine`] composes them behind a single operation
//! surface.

pub mod account_service;
pub mod engine;
pub mod ids;
pub mod loan_service;

pub use account_service::AccountService;
pub use engine::{BankEngine, Operation};
pub use ids::SequentialId;
pub use loan_service::LoanService;
