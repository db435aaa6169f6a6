//! Loan service: applications, lifecycle transitions, and repayments
//!
//! The service owns the loan store and generates payment ids. Disbursement
//! is the one operation that crosses into the account side; it borrows the
//! account service for the duration of the call instead of holding any
//! shared reference to it.

use crate::core::account_service::AccountService;
use crate::core::ids::SequentialId;
use crate::store::LoanStore;
use crate::types::{BankError, Loan, LoanKind, LoanPayment, LoanStatus};
use chrono::Utc;
use rust_decimal::Decimal;

/// Stateful service over loans and their payments
#[derive(Debug)]
pub struct LoanService {
    loans: LoanStore,
    payment_ids: SequentialId,
}

impl LoanService {
    /// Create an empty service
    pub fn new() -> Self {
        LoanService {
            loans: LoanStore::new(),
            payment_ids: SequentialId::new("PAY"),
        }
    }

    /// Record a new loan application in `Pending` status
    ///
    /// # Errors
    ///
    /// - `DuplicateLoan` if the id is already taken
    /// - `InvalidPrincipal` or `InvalidTenure` from loan construction
    pub fn apply(
        &mut self,
        id: &str,
        customer: &str,
        principal: Decimal,
        tenure_months: u32,
        kind: LoanKind,
    ) -> Result<&Loan, BankError> {
        if self.loans.contains(id) {
            return Err(BankError::DuplicateLoan {
                loan: id.to_string(),
            });
        }

        let loan = Loan::new(id, customer, principal, tenure_months, kind)?;
        self.loans.save(loan);
        self.loans
            .find(id)
            .ok_or_else(|| BankError::loan_not_found(id))
    }

    /// Approve a pending application
    ///
    /// # Errors
    ///
    /// - `LoanNotFound` if no such loan exists
    /// - `InvalidLoanState` if the loan is not `Pending`
    pub fn approve(&mut self, id: &str) -> Result<(), BankError> {
        let loan = self
            .loans
            .find_mut(id)
            .ok_or_else(|| BankError::loan_not_found(id))?;
        if loan.status != LoanStatus::Pending {
            return Err(BankError::invalid_loan_state(
                id,
                loan.status,
                LoanStatus::Pending,
            ));
        }
        loan.status = LoanStatus::Approved;
        Ok(())
    }

    /// Reject a pending application, recording the reason
    ///
    /// # Errors
    ///
    /// - `LoanNotFound` if no such loan exists
    /// - `InvalidLoanState` if the loan is not `Pending`
    pub fn reject(&mut self, id: &str, reason: &str) -> Result<(), BankError> {
        let loan = self
            .loans
            .find_mut(id)
            .ok_or_else(|| BankError::loan_not_found(id))?;
        if loan.status != LoanStatus::Pending {
            return Err(BankError::invalid_loan_state(
                id,
                loan.status,
                LoanStatus::Pending,
            ));
        }
        loan.status = LoanStatus::Rejected;
        loan.rejection_reason = Some(reason.to_string());
        Ok(())
    }

    /// Disburse an approved loan into an account, activating the loan
    ///
    /// Credits the account by exactly the principal and stamps the
    /// disbursement date. The loan stays `Approved` if anything fails.
    ///
    /// # Errors
    ///
    /// - `LoanNotFound` if no such loan exists
    /// - `AccountNotFound` if the target account is missing
    /// - `InvalidLoanState` if the loan is not `Approved`
    pub fn disburse(
        &mut self,
        id: &str,
        account_number: &str,
        accounts: &mut AccountService,
    ) -> Result<(), BankError> {
        let loan = self
            .loans
            .find_mut(id)
            .ok_or_else(|| BankError::loan_not_found(id))?;
        if !accounts.contains(account_number) {
            return Err(BankError::account_not_found(account_number));
        }
        if loan.status != LoanStatus::Approved {
            return Err(BankError::invalid_loan_state(
                id,
                loan.status,
                LoanStatus::Approved,
            ));
        }

        accounts.disburse(account_number, loan.principal, id)?;
        loan.status = LoanStatus::Active;
        loan.disbursed_on = Some(Utc::now().date_naive());
        Ok(())
    }

    /// Accept a repayment on an active loan
    ///
    /// Payments below the EMI are rejected outright. A payment that brings
    /// the remaining balance to zero or below moves the loan to `PaidOff`.
    ///
    /// # Returns
    ///
    /// The loan's status after the payment.
    ///
    /// # Errors
    ///
    /// - `LoanNotFound` if no such loan exists
    /// - `InvalidLoanState` if the loan is not `Active`
    /// - `InvalidAmount` if `amount` is not positive
    /// - `PaymentBelowEmi` if `amount` is below the installment
    pub fn make_payment(&mut self, id: &str, amount: Decimal) -> Result<LoanStatus, BankError> {
        let loan = self
            .loans
            .find_mut(id)
            .ok_or_else(|| BankError::loan_not_found(id))?;
        if loan.status != LoanStatus::Active {
            return Err(BankError::invalid_loan_state(
                id,
                loan.status,
                LoanStatus::Active,
            ));
        }
        if amount <= Decimal::ZERO {
            return Err(BankError::invalid_amount(amount));
        }
        if amount < loan.emi {
            return Err(BankError::payment_below_emi(id, loan.emi, amount));
        }

        let today = Utc::now().date_naive();
        let payment = LoanPayment {
            id: self.payment_ids.next(),
            loan: id.to_string(),
            amount,
            month: today.format("%Y-%m").to_string(),
            date: today,
        };
        loan.add_payment(payment);

        if loan.remaining_balance() <= Decimal::ZERO {
            loan.status = LoanStatus::PaidOff;
        }
        Ok(loan.status)
    }

    /// Close an active loan administratively
    ///
    /// # Errors
    ///
    /// - `LoanNotFound` if no such loan exists
    /// - `InvalidLoanState` if the loan is not `Active`
    pub fn close(&mut self, id: &str) -> Result<(), BankError> {
        let loan = self
            .loans
            .find_mut(id)
            .ok_or_else(|| BankError::loan_not_found(id))?;
        if loan.status != LoanStatus::Active {
            return Err(BankError::invalid_loan_state(
                id,
                loan.status,
                LoanStatus::Active,
            ));
        }
        loan.status = LoanStatus::Closed;
        Ok(())
    }

    // ---- Queries and portfolio statistics ----

    /// Look up one loan
    ///
    /// # Errors
    ///
    /// Returns `LoanNotFound` if no such loan exists.
    pub fn loan(&self, id: &str) -> Result<&Loan, BankError> {
        self.loans
            .find(id)
            .ok_or_else(|| BankError::loan_not_found(id))
    }

    /// All loans, ordered by id
    pub fn loans(&self) -> Vec<&Loan> {
        self.loans.all()
    }

    /// All loans in the given status, ordered by id
    pub fn by_status(&self, status: LoanStatus) -> Vec<&Loan> {
        self.loans.by_status(status)
    }

    /// All loans of one customer, ordered by id
    pub fn by_customer(&self, customer: &str) -> Vec<&Loan> {
        self.loans.by_customer(customer)
    }

    /// Sum of remaining balances across active loans
    pub fn total_outstanding(&self) -> Decimal {
        self.loans
            .by_status(LoanStatus::Active)
            .iter()
            .map(|loan| loan.remaining_balance())
            .sum()
    }

    /// Sum of principals across loans that have been disbursed
    pub fn total_disbursed(&self) -> Decimal {
        self.loans
            .all()
            .iter()
            .filter(|loan| loan.disbursed_on.is_some())
            .map(|loan| loan.principal)
            .sum()
    }

    /// Mean principal across all loans, zero for an empty book
    pub fn average_principal(&self) -> Decimal {
        let loans = self.loans.all();
        if loans.is_empty() {
            return Decimal::ZERO;
        }
        let total: Decimal = loans.iter().map(|loan| loan.principal).sum();
        total / Decimal::from(loans.len() as u64)
    }
}

impl Default for LoanService {
    fn default() -> Self {
        Self::new()
    }
}
