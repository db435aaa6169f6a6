//! Customer model
//!
//! A customer exclusively owns its list of account numbers: numbers are
//! added when accounts are opened and never silently removed. Accounts
//! themselves hold only a non-owning customer id, keeping the reference
//! graph acyclic.

use crate::types::account::{AccountNumber, CustomerId};

/// A bank customer
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    /// Unique customer id
    pub id: CustomerId,

    /// Display name
    pub name: String,

    accounts: Vec<AccountNumber>,
}

impl Customer {
    /// Create a customer with no accounts
    pub fn new(id: impl Into<CustomerId>, name: impl Into<String>) -> Self {
        Customer {
            id: id.into(),
            name: name.into(),
            accounts: Vec::new(),
        }
    }

    /// Record ownership of an account
    ///
    /// Idempotent: recording the same number twice keeps a single entry.
    pub fn add_account(&mut self, number: impl Into<AccountNumber>) {
        let number = number.into();
        if !self.accounts.contains(&number) {
            self.accounts.push(number);
        }
    }

    /// The customer's account numbers (defensive copy)
    pub fn accounts(&self) -> Vec<AccountNumber> {
        self.accounts.clone()
    }
}
