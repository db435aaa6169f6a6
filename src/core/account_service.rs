//! Account service: openings, money movement, and the interest sweep
//!
//! The service owns the account store and the transaction journal. Every
//! balance-affecting operation validates its inputs before touching any
//! state, mutates the account(s), appends a per-account log entry, and
//! records a transaction fact in the journal. A failed operation leaves
//! every account exactly as it was.

use crate::core::ids::SequentialId;
use crate::store::{AccountStore, TransactionStore};
use crate::types::{Account, AccountKind, BankError, Transaction, TransactionType};
use chrono::Utc;
use rust_decimal::Decimal;

/// Stateful service over accounts and their transaction journal
#[derive(Debug)]
pub struct AccountService {
    accounts: AccountStore,
    journal: TransactionStore,
    transaction_ids: SequentialId,
}

impl AccountService {
    /// Create an empty service
    pub fn new() -> Self {
        AccountService {
            accounts: AccountStore::new(),
            journal: TransactionStore::new(),
            transaction_ids: SequentialId::new("TXN"),
        }
    }

    // ---- Account opening ----

    /// Open a savings account
    ///
    /// # Errors
    ///
    /// - `InvalidOpeningBalance` if `opening_balance` is negative
    /// - `DuplicateAccount` if the number is already taken
    pub fn open_savings(
        &mut self,
        number: &str,
        customer: &str,
        opening_balance: Decimal,
        interest_rate: Decimal,
    ) -> Result<&Account, BankError> {
        self.open(
            number,
            customer,
            opening_balance,
            AccountKind::Savings { interest_rate },
        )
    }

    /// Open a current account with an overdraft facility
    ///
    /// # Errors
    ///
    /// - `InvalidOpeningBalance` if `opening_balance` is negative
    /// - `DuplicateAccount` if the number is already taken
    pub fn open_current(
        &mut self,
        number: &str,
        customer: &str,
        opening_balance: Decimal,
        overdraft_limit: Decimal,
    ) -> Result<&Account, BankError> {
        self.open(
            number,
            customer,
            opening_balance,
            AccountKind::Current { overdraft_limit },
        )
    }

    /// Open a fixed deposit account
    ///
    /// # Errors
    ///
    /// - `InvalidOpeningBalance` if `amount` is negative
    /// - `InvalidTenure` if `tenure_months` is zero
    /// - `DuplicateAccount` if the number is already taken
    pub fn open_fixed_deposit(
        &mut self,
        number: &str,
        customer: &str,
        amount: Decimal,
        interest_rate: Decimal,
        tenure_months: u32,
    ) -> Result<&Account, BankError> {
        if tenure_months == 0 {
            return Err(BankError::InvalidTenure {
                months: tenure_months,
            });
        }
        self.open(
            number,
            customer,
            amount,
            AccountKind::FixedDeposit {
                interest_rate,
                tenure_months,
                months_completed: 0,
            },
        )
    }

    /// Open a recurring deposit account
    ///
    /// # Errors
    ///
    /// - `InvalidOpeningBalance` if `initial_balance` is negative
    /// - `InvalidTenure` if `tenure_months` is zero
    /// - `DuplicateAccount` if the number is already taken
    pub fn open_recurring_deposit(
        &mut self,
        number: &str,
        customer: &str,
        initial_balance: Decimal,
        monthly_deposit: Decimal,
        interest_rate: Decimal,
        tenure_months: u32,
    ) -> Result<&Account, BankError> {
        if tenure_months == 0 {
            return Err(BankError::InvalidTenure {
                months: tenure_months,
            });
        }
        self.open(
            number,
            customer,
            initial_balance,
            AccountKind::RecurringDeposit {
                monthly_deposit,
                interest_rate,
                tenure_months,
                months_completed: 0,
            },
        )
    }

    fn open(
        &mut self,
        number: &str,
        customer: &str,
        opening_balance: Decimal,
        kind: AccountKind,
    ) -> Result<&Account, BankError> {
        if opening_balance < Decimal::ZERO {
            return Err(BankError::InvalidOpeningBalance {
                amount: opening_balance,
            });
        }
        if self.accounts.contains(number) {
            return Err(BankError::DuplicateAccount {
                account: number.to_string(),
            });
        }

        let account = Account::new(
            number,
            customer,
            opening_balance,
            Utc::now().date_naive(),
            kind,
        );
        self.accounts.save(account);
        self.accounts
            .find(number)
            .ok_or_else(|| BankError::account_not_found(number))
    }

    // ---- Money movement ----

    /// Credit funds to an account
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if no such account exists
    /// - `InvalidAmount` if `amount` is not positive
    pub fn deposit(&mut self, number: &str, amount: Decimal) -> Result<(), BankError> {
        let account = self
            .accounts
            .find_mut(number)
            .ok_or_else(|| BankError::account_not_found(number))?;
        account.deposit(amount)?;
        account.record_entry(format!("DEPOSIT - {:.2}", amount));

        self.record(number, amount, TransactionType::Deposit, format!("Deposit of {:.2}", amount));
        Ok(())
    }

    /// Debit funds from an account, subject to its variant's ceiling
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if no such account exists
    /// - `InvalidAmount`, `InsufficientFunds`, or `WithdrawalNotAllowed`
    ///   per the variant's withdrawal policy
    pub fn withdraw(&mut self, number: &str, amount: Decimal) -> Result<(), BankError> {
        let account = self
            .accounts
            .find_mut(number)
            .ok_or_else(|| BankError::account_not_found(number))?;
        account.withdraw(amount)?;
        account.record_entry(format!("WITHDRAWAL - {:.2}", amount));

        self.record(
            number,
            amount,
            TransactionType::Withdrawal,
            format!("Withdrawal of {:.2}", amount),
        );
        Ok(())
    }

    /// Move funds between two accounts atomically
    ///
    /// Validates the amount and both accounts before moving anything, so a
    /// failed transfer leaves both balances untouched. On success exactly
    /// two transfer facts are journaled, one per account.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount` is not positive
    /// - `AccountNotFound` if either account is missing
    /// - the source account's withdrawal errors
    pub fn transfer(&mut self, from: &str, to: &str, amount: Decimal) -> Result<(), BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::invalid_amount(amount));
        }
        if !self.accounts.contains(to) {
            return Err(BankError::account_not_found(to));
        }

        let source = self
            .accounts
            .find_mut(from)
            .ok_or_else(|| BankError::account_not_found(from))?;
        source.withdraw(amount)?;
        source.record_entry(format!("TRANSFER OUT - {:.2} to {}", amount, to));

        // The destination exists and the amount is positive, so this
        // deposit cannot fail once the withdrawal has succeeded.
        let destination = self
            .accounts
            .find_mut(to)
            .ok_or_else(|| BankError::account_not_found(to))?;
        destination.deposit(amount)?;
        destination.record_entry(format!("TRANSFER IN - {:.2} from {}", amount, from));

        self.record(
            from,
            amount,
            TransactionType::Transfer,
            format!("Transfer to account {}", to),
        );
        self.record(
            to,
            amount,
            TransactionType::Transfer,
            format!("Transfer from account {}", from),
        );
        Ok(())
    }

    /// Debit a service fee from an account
    ///
    /// Fees follow the same withdrawal policy as ordinary debits.
    ///
    /// # Errors
    ///
    /// Same as [`AccountService::withdraw`].
    pub fn charge_fee(&mut self, number: &str, amount: Decimal, memo: &str) -> Result<(), BankError> {
        let account = self
            .accounts
            .find_mut(number)
            .ok_or_else(|| BankError::account_not_found(number))?;
        account.withdraw(amount)?;
        account.record_entry(format!("FEE - {:.2} - {}", amount, memo));

        self.record(
            number,
            amount,
            TransactionType::FeeDebit,
            format!("Fee: {}", memo),
        );
        Ok(())
    }

    /// Credit loan principal to an account
    ///
    /// Used by the loan service at disbursement; the principal is positive
    /// by loan construction, so the underlying deposit cannot fail.
    pub(crate) fn disburse(
        &mut self,
        number: &str,
        amount: Decimal,
        loan_id: &str,
    ) -> Result<(), BankError> {
        let account = self
            .accounts
            .find_mut(number)
            .ok_or_else(|| BankError::account_not_found(number))?;
        account.deposit(amount)?;
        account.record_entry(format!("LOAN DISBURSEMENT - {:.2} ({})", amount, loan_id));
        Ok(())
    }

    // ---- Interest sweep ----

    /// Apply one month of interest to every account
    ///
    /// Visits accounts in number order so repeated runs are deterministic.
    /// Accounts that credit a non-zero interest amount get a log entry and
    /// an interest-credit fact; the others are untouched.
    pub fn calculate_monthly_interest(&mut self) {
        for number in self.accounts.numbers() {
            let credited = match self.accounts.find_mut(&number) {
                Some(account) => {
                    let credited = account.accrue_monthly_interest();
                    if credited > Decimal::ZERO {
                        account.record_entry(format!("INTEREST - {:.2}", credited));
                    }
                    credited
                }
                None => continue,
            };

            if credited > Decimal::ZERO {
                self.record(
                    &number,
                    credited,
                    TransactionType::InterestCredit,
                    format!("Monthly interest of {:.2}", credited),
                );
            }
        }
    }

    // ---- Lifecycle and queries ----

    /// Soft-deactivate an account
    ///
    /// The account keeps its balance and history but is reported inactive.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no such account exists.
    pub fn deactivate(&mut self, number: &str) -> Result<(), BankError> {
        let account = self
            .accounts
            .find_mut(number)
            .ok_or_else(|| BankError::account_not_found(number))?;
        account.active = false;
        Ok(())
    }

    /// Whether an account with the given number exists
    pub fn contains(&self, number: &str) -> bool {
        self.accounts.contains(number)
    }

    /// Look up one account
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no such account exists.
    pub fn account(&self, number: &str) -> Result<&Account, BankError> {
        self.accounts
            .find(number)
            .ok_or_else(|| BankError::account_not_found(number))
    }

    /// All accounts, ordered by number
    pub fn accounts(&self) -> Vec<&Account> {
        self.accounts.all()
    }

    /// All active accounts, ordered by number
    pub fn active_accounts(&self) -> Vec<&Account> {
        self.accounts.active()
    }

    /// Journal facts for one account, in order of receipt
    pub fn transactions_for(&self, number: &str) -> Vec<&Transaction> {
        self.journal.for_account(number)
    }

    /// The whole journal, in order of receipt
    pub fn transactions(&self) -> &[Transaction] {
        self.journal.all()
    }

    fn record(&mut self, account: &str, amount: Decimal, kind: TransactionType, description: String) {
        let transaction = Transaction {
            id: self.transaction_ids.next(),
            account: account.to_string(),
            amount,
            kind,
            timestamp: Utc::now(),
            description,
        };
        self.journal.save(transaction);
    }
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new()
    }
}
