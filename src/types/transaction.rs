//! Transaction facts
//!
//! A `Transaction` is the immutable record of a single balance-affecting
//! event on one account. Facts are appended to the transaction store and
//! never mutated or removed afterwards.

use crate::types::account::AccountNumber;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique transaction identifier
pub type TransactionId = String;

/// The kind of balance-affecting event a transaction records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money added to the account
    Deposit,

    /// Money removed from the account
    Withdrawal,

    /// One leg of a two-account transfer
    ///
    /// A transfer records two linked facts, one per account.
    Transfer,

    /// Monthly interest credited by the accrual sweep
    InterestCredit,

    /// Service charge deducted from the account
    FeeDebit,
}

impl TransactionType {
    /// Human-readable name used in transaction descriptions
    pub fn display_name(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "Deposit",
            TransactionType::Withdrawal => "Withdrawal",
            TransactionType::Transfer => "Transfer",
            TransactionType::InterestCredit => "Interest Credit",
            TransactionType::FeeDebit => "Fee Debit",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Immutable record of a balance-affecting event
///
/// References its account by number only.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Unique transaction id
    pub id: TransactionId,

    /// Number of the account the event applied to
    pub account: AccountNumber,

    /// Amount moved; always positive, direction is given by `kind`
    pub amount: Decimal,

    /// The kind of event
    pub kind: TransactionType,

    /// When the event happened
    pub timestamp: DateTime<Utc>,

    /// Free-text description
    pub description: String,
}

impl Transaction {
    /// One-line rendering for statements and logs
    pub fn details(&self) -> String {
        format!(
            "ID: {} | Type: {} | Amount: EUR {:.2} | Account: {} | Desc: {}",
            self.id, self.kind, self.amount, self.account, self.description
        )
    }
}
