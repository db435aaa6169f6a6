//! Bank engine: the single entry point for script operations
//!
//! The engine owns the customer directory, the account service, and the
//! loan service, and routes each [`Operation`] to the right one. Customers
//! are registered implicitly the first time an operation references them,
//! so scripts never need a separate registration step.

use crate::core::account_service::AccountService;
use crate::core::loan_service::LoanService;
use crate::store::CustomerStore;
use crate::types::{Account, BankError, Customer, Loan, LoanKind};
use rust_decimal::Decimal;

/// One operation from the script, fully parsed and typed
///
/// Account and loan ids are caller-supplied; the engine only checks them
/// for existence or uniqueness.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Open a savings account
    OpenSavings {
        customer: String,
        number: String,
        opening_balance: Decimal,
        interest_rate: Decimal,
    },
    /// Open a current account with an overdraft facility
    OpenCurrent {
        customer: String,
        number: String,
        opening_balance: Decimal,
        overdraft_limit: Decimal,
    },
    /// Open a fixed deposit account
    OpenFixedDeposit {
        customer: String,
        number: String,
        amount: Decimal,
        interest_rate: Decimal,
        tenure_months: u32,
    },
    /// Open a recurring deposit account
    OpenRecurringDeposit {
        customer: String,
        number: String,
        initial_balance: Decimal,
        monthly_deposit: Decimal,
        interest_rate: Decimal,
        tenure_months: u32,
    },
    /// Credit funds to an account
    Deposit { number: String, amount: Decimal },
    /// Debit funds from an account
    Withdraw { number: String, amount: Decimal },
    /// Move funds between two accounts atomically
    Transfer {
        from: String,
        to: String,
        amount: Decimal,
    },
    /// Debit a service fee from an account
    ChargeFee {
        number: String,
        amount: Decimal,
        memo: String,
    },
    /// Apply one month of interest to every account
    AccrueInterest,
    /// Record a loan application
    ApplyLoan {
        customer: String,
        loan: String,
        principal: Decimal,
        tenure_months: u32,
        kind: LoanKind,
    },
    /// Approve a pending application
    ApproveLoan { loan: String },
    /// Reject a pending application
    RejectLoan { loan: String, reason: String },
    /// Disburse an approved loan into an account
    DisburseLoan { loan: String, account: String },
    /// Accept a repayment on an active loan
    RepayLoan { loan: String, amount: Decimal },
    /// Close an active loan
    CloseLoan { loan: String },
}

/// Top-level engine holding all bank state for one run
#[derive(Debug)]
pub struct BankEngine {
    customers: CustomerStore,
    accounts: AccountService,
    loans: LoanService,
}

impl BankEngine {
    /// Create an engine with no customers, accounts, or loans
    pub fn new() -> Self {
        BankEngine {
            customers: CustomerStore::new(),
            accounts: AccountService::new(),
            loans: LoanService::new(),
        }
    }

    /// Execute one operation against the bank state
    ///
    /// # Errors
    ///
    /// Propagates the business error of the underlying service. A failed
    /// operation leaves all state unchanged, so the caller can skip the
    /// operation and continue with the next one.
    pub fn apply(&mut self, operation: Operation) -> Result<(), BankError> {
        match operation {
            Operation::OpenSavings {
                customer,
                number,
                opening_balance,
                interest_rate,
            } => {
                self.ensure_customer(&customer);
                self.accounts
                    .open_savings(&number, &customer, opening_balance, interest_rate)?;
                self.link_account(&customer, &number);
                Ok(())
            }
            Operation::OpenCurrent {
                customer,
                number,
                opening_balance,
                overdraft_limit,
            } => {
                self.ensure_customer(&customer);
                self.accounts
                    .open_current(&number, &customer, opening_balance, overdraft_limit)?;
                self.link_account(&customer, &number);
                Ok(())
            }
            Operation::OpenFixedDeposit {
                customer,
                number,
                amount,
                interest_rate,
                tenure_months,
            } => {
                self.ensure_customer(&customer);
                self.accounts.open_fixed_deposit(
                    &number,
                    &customer,
                    amount,
                    interest_rate,
                    tenure_months,
                )?;
                self.link_account(&customer, &number);
                Ok(())
            }
            Operation::OpenRecurringDeposit {
                customer,
                number,
                initial_balance,
                monthly_deposit,
                interest_rate,
                tenure_months,
            } => {
                self.ensure_customer(&customer);
                self.accounts.open_recurring_deposit(
                    &number,
                    &customer,
                    initial_balance,
                    monthly_deposit,
                    interest_rate,
                    tenure_months,
                )?;
                self.link_account(&customer, &number);
                Ok(())
            }
            Operation::Deposit { number, amount } => self.accounts.deposit(&number, amount),
            Operation::Withdraw { number, amount } => self.accounts.withdraw(&number, amount),
            Operation::Transfer { from, to, amount } => self.accounts.transfer(&from, &to, amount),
            Operation::ChargeFee {
                number,
                amount,
                memo,
            } => self.accounts.charge_fee(&number, amount, &memo),
            Operation::AccrueInterest => {
                self.accounts.calculate_monthly_interest();
                Ok(())
            }
            Operation::ApplyLoan {
                customer,
                loan,
                principal,
                tenure_months,
                kind,
            } => {
                self.ensure_customer(&customer);
                self.loans
                    .apply(&loan, &customer, principal, tenure_months, kind)?;
                Ok(())
            }
            Operation::ApproveLoan { loan } => self.loans.approve(&loan),
            Operation::RejectLoan { loan, reason } => self.loans.reject(&loan, &reason),
            Operation::DisburseLoan { loan, account } => {
                self.loans.disburse(&loan, &account, &mut self.accounts)
            }
            Operation::RepayLoan { loan, amount } => {
                self.loans.make_payment(&loan, amount).map(|_| ())
            }
            Operation::CloseLoan { loan } => self.loans.close(&loan),
        }
    }

    /// Register the customer on first reference
    ///
    /// Scripts carry only customer ids, so the id doubles as the name.
    fn ensure_customer(&mut self, id: &str) {
        if !self.customers.contains(id) {
            self.customers.save(Customer::new(id, id));
        }
    }

    fn link_account(&mut self, customer: &str, number: &str) {
        if let Some(customer) = self.customers.find_mut(customer) {
            customer.add_account(number);
        }
    }

    /// All accounts, ordered by number
    pub fn accounts(&self) -> Vec<&Account> {
        self.accounts.accounts()
    }

    /// All customers, ordered by id
    pub fn customers(&self) -> Vec<&Customer> {
        self.customers.all()
    }

    /// All loans, ordered by id
    pub fn loans(&self) -> Vec<&Loan> {
        self.loans.loans()
    }

    /// The account side of the engine
    pub fn account_service(&self) -> &AccountService {
        &self.accounts
    }

    /// The loan side of the engine
    pub fn loan_service(&self) -> &LoanService {
        &self.loans
    }
}

impl Default for BankEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LoanStatus;
    use rust_decimal_macros::dec;

    fn open_savings(engine: &mut BankEngine, customer: &str, number: &str, balance: Decimal) {
        engine
            .apply(Operation::OpenSavings {
                customer: customer.to_string(),
                number: number.to_string(),
                opening_balance: balance,
                interest_rate: dec!(0.04),
            })
            .unwrap();
    }

    #[test]
    fn test_open_auto_registers_customer_and_links_account() {
        let mut engine = BankEngine::new();
        open_savings(&mut engine, "CUST-1", "ACC-1", dec!(100.00));

        let customers = engine.customers();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].id, "CUST-1");
        assert_eq!(customers[0].accounts(), vec!["ACC-1".to_string()]);
    }

    #[test]
    fn test_second_account_reuses_customer() {
        let mut engine = BankEngine::new();
        open_savings(&mut engine, "CUST-1", "ACC-1", dec!(100.00));
        open_savings(&mut engine, "CUST-1", "ACC-2", dec!(200.00));

        assert_eq!(engine.customers().len(), 1);
        assert_eq!(engine.customers()[0].accounts().len(), 2);
    }

    #[test]
    fn test_transfer_routes_through_account_service() {
        let mut engine = BankEngine::new();
        open_savings(&mut engine, "CUST-1", "ACC-1", dec!(500.00));
        open_savings(&mut engine, "CUST-2", "ACC-2", dec!(200.00));

        engine
            .apply(Operation::Transfer {
                from: "ACC-1".to_string(),
                to: "ACC-2".to_string(),
                amount: dec!(100.00),
            })
            .unwrap();

        let accounts = engine.accounts();
        assert_eq!(accounts[0].balance(), dec!(400.00));
        assert_eq!(accounts[1].balance(), dec!(300.00));
    }

    #[test]
    fn test_failed_operation_leaves_state_unchanged() {
        let mut engine = BankEngine::new();
        open_savings(&mut engine, "CUST-1", "ACC-1", dec!(100.00));

        let result = engine.apply(Operation::Withdraw {
            number: "ACC-1".to_string(),
            amount: dec!(100.01),
        });
        assert!(result.is_err());
        assert_eq!(engine.accounts()[0].balance(), dec!(100.00));
    }

    #[test]
    fn test_full_loan_lifecycle_through_the_engine() {
        let mut engine = BankEngine::new();
        open_savings(&mut engine, "CUST-1", "ACC-1", dec!(0));

        engine
            .apply(Operation::ApplyLoan {
                customer: "CUST-1".to_string(),
                loan: "LN-1".to_string(),
                principal: dec!(10000),
                tenure_months: 60,
                kind: LoanKind::Personal,
            })
            .unwrap();
        engine
            .apply(Operation::ApproveLoan {
                loan: "LN-1".to_string(),
            })
            .unwrap();
        engine
            .apply(Operation::DisburseLoan {
                loan: "LN-1".to_string(),
                account: "ACC-1".to_string(),
            })
            .unwrap();

        assert_eq!(engine.accounts()[0].balance(), dec!(10000));
        assert_eq!(engine.loans()[0].status, LoanStatus::Active);

        engine
            .apply(Operation::RepayLoan {
                loan: "LN-1".to_string(),
                amount: dec!(10000.00),
            })
            .unwrap();
        assert_eq!(engine.loans()[0].status, LoanStatus::PaidOff);
    }

    #[test]
    fn test_accrue_interest_sweeps_all_accounts() {
        let mut engine = BankEngine::new();
        open_savings(&mut engine, "CUST-1", "ACC-1", dec!(1000.00));
        engine.apply(Operation::AccrueInterest).unwrap();
        assert_eq!(engine.accounts()[0].balance(), dec!(1003.33));
    }
}
