//! Transaction fact store
//!
//! Append-only journal of transaction facts with a by-id index. Facts keep
//! their insertion order, which is also the order of events.

use crate::types::Transaction;
use std::collections::HashMap;

/// Append-only in-memory store for transaction facts
#[derive(Debug, Default)]
pub struct TransactionStore {
    journal: Vec<Transaction>,
    index: HashMap<String, usize>,
}

impl TransactionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction fact
    pub fn save(&mut self, transaction: Transaction) {
        self.index
            .insert(transaction.id.clone(), self.journal.len());
        self.journal.push(transaction);
    }

    /// Look up a fact by transaction id
    pub fn find(&self, id: &str) -> Option<&Transaction> {
        self.index.get(id).map(|&pos| &self.journal[pos])
    }

    /// All facts in insertion order
    pub fn all(&self) -> &[Transaction] {
        &self.journal
    }

    /// All facts for one account, in insertion order
    pub fn for_account(&self, number: &str) -> Vec<&Transaction> {
        self.journal.iter().filter(|t| t.account == number).collect()
    }

    /// Number of stored facts
    pub fn len(&self) -> usize {
        self.journal.len()
    }

    /// Whether the journal is empty
    pub fn is_empty(&self) -> bool {
        self.journal.is_empty()
    }
}
