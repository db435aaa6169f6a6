//! Account repository
//!
//! Maintains an in-memory map of account numbers to accounts. Listing is
//! sorted by account number so that output generation is deterministic.

use crate::types::Account;
use std::collections::HashMap;

/// Keyed in-memory store for accounts
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: HashMap<String, Account>,
}

impl AccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an account with this number exists
    pub fn contains(&self, number: &str) -> bool {
        self.accounts.contains_key(number)
    }

    /// Insert an account under its own number
    ///
    /// Last write wins; callers enforce number uniqueness before saving.
    pub fn save(&mut self, account: Account) {
        self.accounts.insert(account.number.clone(), account);
    }

    /// Look up an account by number
    pub fn find(&self, number: &str) -> Option<&Account> {
        self.accounts.get(number)
    }

    /// Look up an account by number for mutation
    pub fn find_mut(&mut self, number: &str) -> Option<&mut Account> {
        self.accounts.get_mut(number)
    }

    /// All accounts, sorted by account number
    pub fn all(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.number.cmp(&b.number));
        accounts
    }

    /// All account numbers, sorted
    ///
    /// Used by the interest sweep, which needs to re-borrow each account
    /// mutably while iterating.
    pub fn numbers(&self) -> Vec<String> {
        let mut numbers: Vec<String> = self.accounts.keys().cloned().collect();
        numbers.sort();
        numbers
    }

    /// All active accounts, sorted by account number
    pub fn active(&self) -> Vec<&Account> {
        self.all().into_iter().filter(|a| a.active).collect()
    }
}
