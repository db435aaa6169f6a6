//! Loan repository
//!
//! Keyed map of loan ids to loans, with the status and customer filter
//! queries the loan service exposes.

use crate::types::{Loan, LoanStatus};
use std::collections::HashMap;

/// Keyed in-memory store for loans
#[derive(Debug, Default)]
pub struct LoanStore {
    loans: HashMap<String, Loan>,
}

impl LoanStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a loan with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.loans.contains_key(id)
    }

    /// Insert a loan under its own id
    ///
    /// Last write wins; callers enforce id uniqueness before saving.
    pub fn save(&mut self, loan: Loan) {
        self.loans.insert(loan.id.clone(), loan);
    }

    /// Look up a loan by id
    pub fn find(&self, id: &str) -> Option<&Loan> {
        self.loans.get(id)
    }

    /// Look up a loan by id for mutation
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Loan> {
        self.loans.get_mut(id)
    }

    /// All loans, sorted by id
    pub fn all(&self) -> Vec<&Loan> {
        let mut loans: Vec<&Loan> = self.loans.values().collect();
        loans.sort_by(|a, b| a.id.cmp(&b.id));
        loans
    }

    /// All loans in the given status, sorted by id
    pub fn by_status(&self, status: LoanStatus) -> Vec<&Loan> {
        self.all()
            .into_iter()
            .filter(|l| l.status == status)
            .collect()
    }

    /// All loans of one customer, sorted by id
    pub fn by_customer(&self, customer: &str) -> Vec<&Loan> {
        self.all()
            .into_iter()
            .filter(|l| l.customer == customer)
            .collect()
    }
}
