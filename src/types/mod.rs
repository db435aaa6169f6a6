//! Types module
//!
//! Core data structures used throughout the engine:
//! - `account`: accounts and the closed set of account variants
//! - `customer`: customers and their owned account lists
//! - `loan`: loans, lifecycle status, payments, and EMI math
//! - `transaction`: immutable transaction facts
//! - `error`: typed failures

pub mod account;
pub mod customer;
pub mod error;
pub mod loan;
pub mod transaction;

pub use account::{Account, AccountKind, AccountNumber, CustomerId};
pub use customer::Customer;
pub use error::BankError;
pub use loan::{monthly_installment, Loan, LoanId, LoanKind, LoanPayment, LoanStatus, PaymentId};
pub use transaction::{Transaction, TransactionId, TransactionType};

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a money amount to cents, half away from zero
///
/// Applied to every interest credit and to the EMI at loan construction;
/// balances themselves otherwise keep full precision.
pub(crate) fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
