//! Customer registry
//!
//! Keyed map of customer ids to customers. Registration and authentication
//! live outside the engine; this store only tracks identity and account
//! ownership.

use crate::types::Customer;
use std::collections::HashMap;

/// Keyed in-memory store for customers
#[derive(Debug, Default)]
pub struct CustomerStore {
    customers: HashMap<String, Customer>,
}

impl CustomerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a customer with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.customers.contains_key(id)
    }

    /// Insert a customer under its own id (last write wins)
    pub fn save(&mut self, customer: Customer) {
        self.customers.insert(customer.id.clone(), customer);
    }

    /// Look up a customer by id
    pub fn find(&self, id: &str) -> Option<&Customer> {
        self.customers.get(id)
    }

    /// Look up a customer by id for mutation
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Customer> {
        self.customers.get_mut(id)
    }

    /// All customers, sorted by id
    pub fn all(&self) -> Vec<&Customer> {
        let mut customers: Vec<&Customer> = self.customers.values().collect();
        customers.sort_by(|a, b| a.id.cmp(&b.id));
        customers
    }
}
