//! Corebank Library
//! # Overview
//!
//! This library provides an in-memory retail bank core: polymorphic
//! accounts, atomic transfers, monthly interest accrual, and an installment
//! loan lifecycle, driven by a CSV operation script.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Customer, Loan, Transaction, errors)
//! - [`store`] - Keyed in-memory stores owning all state
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Operation routing and customer registration
//!   - [`core::account_service`] - Account openings, money movement, interest sweep
//!   - [`core::loan_service`] - Loan lifecycle and repayments
//! - [`io`] - Script parsing and account summary output
//!
//! # Account Variants
//!
//! The engine supports four account variants:
//!
//! - **Savings**: Withdrawals up to the balance; earns monthly interest
//! - **Current**: Overdraft facility; earns no interest
//! - **Fixed Deposit**: Withdraw-locked; accrues until its tenure completes
//! - **Recurring Deposit**: Withdraw-locked; credits a monthly contribution
//!   before each interest accrual
//!
//! # Loan Lifecycle
//!
//! Loans move through `PENDING -> APPROVED -> ACTIVE` and end in
//! `PAID_OFF`, `CLOSED`, or `REJECTED` (from `PENDING`). The EMI is fixed
//! at application time and every payment must meet it.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod store;
pub mod types;

pub use core::{AccountService, BankEngine, LoanService, Operation};
pub use io::{process_script, write_accounts_csv};
pub use types::{
    Account, AccountKind, AccountNumber, BankError, Customer, CustomerId, Loan, LoanId, LoanKind,
    LoanPayment, LoanStatus, Transaction, TransactionId, TransactionType,
};
