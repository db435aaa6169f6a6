//! Error types for the core banking engine
//!
//! This module defines all typed failures that business operations can
//! return. Every error carries the context a caller needs to present a
//! meaningful message without re-querying any state.
//!
//! # Error Categories
//!
//! - **Validation Errors**: non-positive amounts, negative opening balances,
//!   invalid principal or tenure
//! - **Account Errors**: unknown account, withdrawal ceiling exceeded,
//!   withdraw-locked deposit variants
//! - **Loan Errors**: unknown loan, illegal status transition, payment below EMI
//! - **Batch Surface Errors**: I/O failures, malformed script rows

use crate::types::loan::LoanStatus;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the banking engine
///
/// Business-rule failures are returned to the immediate caller and never
/// retried; none of them leaves partially applied state behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// Amount is zero or negative where a positive amount is required
    ///
    /// Applies to deposits, withdrawals, transfers, fees, and loan payments.
    #[error("Invalid amount {amount}: must be positive")]
    InvalidAmount {
        /// The offending amount
        amount: Decimal,
    },

    /// Opening balance for a new account is negative
    #[error("Invalid opening balance {amount}: cannot be negative")]
    InvalidOpeningBalance {
        /// The offending opening balance
        amount: Decimal,
    },

    /// Loan principal is zero or negative
    #[error("Invalid principal {amount}: must be positive")]
    InvalidPrincipal {
        /// The offending principal
        amount: Decimal,
    },

    /// Tenure in months is zero
    #[error("Invalid tenure: {months} months")]
    InvalidTenure {
        /// The offending tenure
        months: u32,
    },

    /// Withdrawal exceeds the variant's ceiling
    ///
    /// For savings accounts `available` is the balance; for current accounts
    /// it includes the overdraft limit.
    #[error("Insufficient funds in account {account}: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Account number
        account: String,
        /// Maximum amount the variant allows to be withdrawn
        available: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// The account variant does not permit withdrawals
    ///
    /// Fixed and recurring deposit accounts are withdraw-locked for their
    /// whole lifetime.
    #[error("Withdrawals are not allowed from {kind} account {account}")]
    WithdrawalNotAllowed {
        /// Account number
        account: String,
        /// Variant name, e.g. "Fixed Deposit"
        kind: String,
    },

    /// No account with the given number exists
    #[error("Account not found: {account}")]
    AccountNotFound {
        /// The unknown account number
        account: String,
    },

    /// An account with the given number already exists
    ///
    /// Account numbers are caller-supplied and must be unique.
    #[error("Account already exists: {account}")]
    DuplicateAccount {
        /// The duplicated account number
        account: String,
    },

    /// No customer with the given id exists
    #[error("Customer not found: {customer}")]
    CustomerNotFound {
        /// The unknown customer id
        customer: String,
    },

    /// No loan with the given id exists
    #[error("Loan not found: {loan}")]
    LoanNotFound {
        /// The unknown loan id
        loan: String,
    },

    /// A loan with the given id already exists
    #[error("Loan already exists: {loan}")]
    DuplicateLoan {
        /// The duplicated loan id
        loan: String,
    },

    /// Operation attempted from a loan status that does not permit it
    #[error("Loan {loan} is {current}, expected {expected}")]
    InvalidLoanState {
        /// Loan id
        loan: String,
        /// Status the loan is currently in
        current: LoanStatus,
        /// Status the operation requires
        expected: LoanStatus,
    },

    /// Loan payment is below the fixed monthly installment
    ///
    /// Partial payments are rejected outright rather than accepted and
    /// tracked.
    #[error("Payment of {paid} on loan {loan} is below the EMI of {emi}")]
    PaymentBelowEmi {
        /// Loan id
        loan: String,
        /// The fixed monthly installment
        emi: Decimal,
        /// Amount actually paid
        paid: Decimal,
    },

    /// I/O error while reading or writing the batch surface
    ///
    /// Fatal for the run (file permissions, disk full, etc.).
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// Malformed CSV row in the operations script
    ///
    /// Recoverable: the row is skipped and processing continues.
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Unknown operation name in the script
    ///
    /// Recoverable: the row is skipped.
    #[error("Unknown operation '{op}'")]
    UnknownOperation {
        /// The unrecognized operation string
        op: String,
    },

    /// A script row is missing a field its operation requires
    ///
    /// Recoverable: the row is skipped.
    #[error("Operation '{op}' requires field '{field}'")]
    MissingField {
        /// The operation name
        op: String,
        /// The missing field name
        field: String,
    },
}

impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for BankError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        BankError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

// Helper constructors for the multi-field variants

impl BankError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        BankError::InvalidAmount { amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &str, available: Decimal, requested: Decimal) -> Self {
        BankError::InsufficientFunds {
            account: account.to_string(),
            available,
            requested,
        }
    }

    /// Create a WithdrawalNotAllowed error
    pub fn withdrawal_not_allowed(account: &str, kind: &str) -> Self {
        BankError::WithdrawalNotAllowed {
            account: account.to_string(),
            kind: kind.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: &str) -> Self {
        BankError::AccountNotFound {
            account: account.to_string(),
        }
    }

    /// Create a LoanNotFound error
    pub fn loan_not_found(loan: &str) -> Self {
        BankError::LoanNotFound {
            loan: loan.to_string(),
        }
    }

    /// Create an InvalidLoanState error
    pub fn invalid_loan_state(loan: &str, current: LoanStatus, expected: LoanStatus) -> Self {
        BankError::InvalidLoanState {
            loan: loan.to_string(),
            current,
            expected,
        }
    }

    /// Create a PaymentBelowEmi error
    pub fn payment_below_emi(loan: &str, emi: Decimal, paid: Decimal) -> Self {
        BankError::PaymentBelowEmi {
            loan: loan.to_string(),
            emi,
            paid,
        }
    }

    /// Create a MissingField error
    pub fn missing_field(op: &str, field: &str) -> Self {
        BankError::MissingField {
            op: op.to_string(),
            field: field.to_string(),
        }
    }
}
