//! Account model for the core banking engine
//!
//! This module defines the `Account` structure and the closed set of account
//! variants. The variant determines the withdrawal ceiling and the monthly
//! interest behavior; deposits behave identically for every variant.
//!
//! Balances change only through [`Account::deposit`], [`Account::withdraw`],
//! and [`Account::accrue_monthly_interest`].

use crate::types::error::BankError;
use crate::types::round_to_cents;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

/// Unique account identifier, supplied by the caller at account creation
pub type AccountNumber = String;

/// Unique customer identifier
pub type CustomerId = String;

/// Account variant with its variant-specific fields
///
/// The set is closed: withdrawal and interest policy dispatch over this tag.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountKind {
    /// Standard interest-bearing account; withdrawals up to the balance
    Savings {
        /// Annual interest rate as a fraction (0.04 = 4%)
        interest_rate: Decimal,
    },

    /// Checking account with an overdraft facility; earns no interest
    Current {
        /// Maximum negative balance the account may reach
        overdraft_limit: Decimal,
    },

    /// Term deposit; withdraw-locked, accrues interest until tenure completes
    FixedDeposit {
        /// Annual interest rate as a fraction
        interest_rate: Decimal,
        /// Deposit duration in months
        tenure_months: u32,
        /// Number of monthly accruals already applied
        months_completed: u32,
    },

    /// Term deposit with a fixed monthly contribution; withdraw-locked
    ///
    /// Each monthly accrual credits the contribution first, then applies
    /// interest to the new balance.
    RecurringDeposit {
        /// Contribution credited at the start of each monthly accrual
        monthly_deposit: Decimal,
        /// Annual interest rate as a fraction
        interest_rate: Decimal,
        /// Deposit duration in months
        tenure_months: u32,
        /// Number of monthly accruals already applied
        months_completed: u32,
    },
}

impl AccountKind {
    /// Human-readable variant name, used in details output and errors
    pub fn name(&self) -> &'static str {
        match self {
            AccountKind::Savings { .. } => "Savings",
            AccountKind::Current { .. } => "Current",
            AccountKind::FixedDeposit { .. } => "Fixed Deposit",
            AccountKind::RecurringDeposit { .. } => "Recurring Deposit",
        }
    }
}

/// A customer's account
///
/// Owns its balance and an ordered log of transaction descriptions. The
/// owning customer is a non-owning id reference, never a back-pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Unique account number
    pub number: AccountNumber,

    /// Id of the owning customer
    pub customer: CustomerId,

    /// Date the account was opened
    pub opened_on: NaiveDate,

    /// Soft-deactivation flag; accounts are never deleted in normal flow
    pub active: bool,

    /// Variant tag with variant-specific fields
    pub kind: AccountKind,

    balance: Decimal,
    entries: Vec<String>,
}

impl Account {
    /// Create a new account
    ///
    /// The opening balance is assumed validated by the caller (the account
    /// service rejects negative opening balances before construction).
    pub fn new(
        number: impl Into<AccountNumber>,
        customer: impl Into<CustomerId>,
        opening_balance: Decimal,
        opened_on: NaiveDate,
        kind: AccountKind,
    ) -> Self {
        Account {
            number: number.into(),
            customer: customer.into(),
            opened_on,
            active: true,
            kind,
            balance: opening_balance,
            entries: Vec::new(),
        }
    }

    /// Current balance
    ///
    /// Negative only for current accounts inside their overdraft limit.
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Ordered transaction description log (defensive copy)
    ///
    /// Callers cannot mutate internal state through the returned vector.
    pub fn entries(&self) -> Vec<String> {
        self.entries.clone()
    }

    /// Append a description to the account's transaction log
    pub fn record_entry(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    /// Credit funds to the account
    ///
    /// Identical for every variant.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if `amount` is zero or negative.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::invalid_amount(amount));
        }
        self.balance += amount;
        Ok(())
    }

    /// Debit funds from the account, subject to the variant's ceiling
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount` is zero or negative (checked first,
    ///   for every variant)
    /// - `WithdrawalNotAllowed` for fixed and recurring deposit accounts
    /// - `InsufficientFunds` if `amount` exceeds the balance (savings) or
    ///   the balance plus overdraft limit (current)
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::invalid_amount(amount));
        }

        match &self.kind {
            AccountKind::Savings { .. } => {
                if amount > self.balance {
                    return Err(BankError::insufficient_funds(
                        &self.number,
                        self.balance,
                        amount,
                    ));
                }
            }
            AccountKind::Current { overdraft_limit } => {
                let ceiling = self.balance + overdraft_limit;
                if amount > ceiling {
                    return Err(BankError::insufficient_funds(&self.number, ceiling, amount));
                }
            }
            AccountKind::FixedDeposit { .. } | AccountKind::RecurringDeposit { .. } => {
                // Withdraw-locked for the whole lifetime; no maturity unlock.
                return Err(BankError::withdrawal_not_allowed(
                    &self.number,
                    self.kind.name(),
                ));
            }
        }

        self.balance -= amount;
        Ok(())
    }

    /// Apply one month of interest according to the variant's policy
    ///
    /// Invoked once per simulated month by the account service's sweep.
    /// Interest is rounded to cents before being credited. Term deposits
    /// stop accruing once their tenure completes; recurring deposits credit
    /// the monthly contribution before computing interest.
    ///
    /// # Returns
    ///
    /// The interest amount credited, `Decimal::ZERO` when the variant does
    /// not accrue (current accounts, matured term deposits).
    pub fn accrue_monthly_interest(&mut self) -> Decimal {
        match &mut self.kind {
            AccountKind::Savings { interest_rate } => {
                let interest = round_to_cents(self.balance * *interest_rate / Decimal::from(12));
                self.balance += interest;
                interest
            }
            AccountKind::Current { .. } => Decimal::ZERO,
            AccountKind::FixedDeposit {
                interest_rate,
                tenure_months,
                months_completed,
            } => {
                if months_completed < tenure_months {
                    let interest =
                        round_to_cents(self.balance * *interest_rate / Decimal::from(12));
                    self.balance += interest;
                    *months_completed += 1;
                    interest
                } else {
                    Decimal::ZERO
                }
            }
            AccountKind::RecurringDeposit {
                monthly_deposit,
                interest_rate,
                tenure_months,
                months_completed,
            } => {
                if months_completed < tenure_months {
                    self.balance += *monthly_deposit;
                    let interest =
                        round_to_cents(self.balance * *interest_rate / Decimal::from(12));
                    self.balance += interest;
                    *months_completed += 1;
                    interest
                } else {
                    Decimal::ZERO
                }
            }
        }
    }

    /// One-line account summary including variant-specific extras
    pub fn details(&self) -> String {
        let base = format!(
            "Account: {} | Type: {} | Balance: EUR {:.2} | Status: {}",
            self.number,
            self.kind.name(),
            self.balance,
            if self.active { "Active" } else { "Inactive" }
        );
        match &self.kind {
            AccountKind::Savings { interest_rate } => {
                format!("{} | Interest Rate: {:.2}%", base, interest_rate * Decimal::from(100))
            }
            AccountKind::Current { overdraft_limit } => {
                format!("{} | Overdraft Limit: EUR {:.2}", base, overdraft_limit)
            }
            AccountKind::FixedDeposit {
                interest_rate,
                tenure_months,
                months_completed,
            } => format!(
                "{} | Interest Rate: {:.2}% | Tenure: {} months | Completed: {} months",
                base,
                interest_rate * Decimal::from(100),
                tenure_months,
                months_completed
            ),
            AccountKind::RecurringDeposit {
                monthly_deposit,
                interest_rate,
                tenure_months,
                months_completed,
            } => format!(
                "{} | Monthly Deposit: EUR {:.2} | Interest Rate: {:.2}% | Tenure: {} months | Completed: {} months",
                base,
                monthly_deposit,
                interest_rate * Decimal::from(100),
                tenure_months,
                months_completed
            ),
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.details())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    fn savings(balance: Decimal, rate: Decimal) -> Account {
        Account::new(
            "ACC-1",
            "CUST-1",
            balance,
            date(),
            AccountKind::Savings {
                interest_rate: rate,
            },
        )
    }

    fn current(balance: Decimal, overdraft: Decimal) -> Account {
        Account::new(
            "ACC-2",
            "CUST-1",
            balance,
            date(),
            AccountKind::Current {
                overdraft_limit: overdraft,
            },
        )
    }

    fn fixed_deposit(balance: Decimal, rate: Decimal, tenure: u32) -> Account {
        Account::new(
            "ACC-3",
            "CUST-1",
            balance,
            date(),
            AccountKind::FixedDeposit {
                interest_rate: rate,
                tenure_months: tenure,
                months_completed: 0,
            },
        )
    }

    fn recurring_deposit(
        balance: Decimal,
        monthly: Decimal,
        rate: Decimal,
        tenure: u32,
    ) -> Account {
        Account::new(
            "ACC-4",
            "CUST-1",
            balance,
            date(),
            AccountKind::RecurringDeposit {
                monthly_deposit: monthly,
                interest_rate: rate,
                tenure_months: tenure,
                months_completed: 0,
            },
        )
    }

    #[test]
    fn test_deposit_increases_balance() {
        let mut account = savings(dec!(100.00), dec!(0.04));
        account.deposit(dec!(50.00)).unwrap();
        assert_eq!(account.balance(), dec!(150.00));
    }

    #[rstest]
    #[case::zero(dec!(0))]
    #[case::negative(dec!(-10.00))]
    fn test_deposit_rejects_non_positive_amount(#[case] amount: Decimal) {
        let mut account = savings(dec!(100.00), dec!(0.04));
        let result = account.deposit(amount);
        assert!(matches!(result, Err(BankError::InvalidAmount { .. })));
        assert_eq!(account.balance(), dec!(100.00));
    }

    #[test]
    fn test_deposit_then_withdraw_round_trips() {
        let mut account = savings(dec!(500.00), dec!(0.04));
        account.deposit(dec!(123.45)).unwrap();
        account.withdraw(dec!(123.45)).unwrap();
        assert_eq!(account.balance(), dec!(500.00));
    }

    #[rstest]
    #[case::savings(savings(dec!(100.00), dec!(0.04)))]
    #[case::current(current(dec!(100.00), dec!(50.00)))]
    #[case::fixed(fixed_deposit(dec!(100.00), dec!(0.06), 12))]
    #[case::recurring(recurring_deposit(dec!(100.00), dec!(50.00), dec!(0.12), 12))]
    fn test_withdraw_rejects_non_positive_amount_for_every_variant(#[case] mut account: Account) {
        for amount in [dec!(0), dec!(-1.00)] {
            let result = account.withdraw(amount);
            assert!(matches!(result, Err(BankError::InvalidAmount { .. })));
        }
        assert_eq!(account.balance(), dec!(100.00));
    }

    #[test]
    fn test_savings_withdraw_rejects_amount_above_balance() {
        let mut account = savings(dec!(100.00), dec!(0.04));
        let result = account.withdraw(dec!(100.01));
        assert_eq!(
            result,
            Err(BankError::insufficient_funds(
                "ACC-1",
                dec!(100.00),
                dec!(100.01)
            ))
        );
        assert_eq!(account.balance(), dec!(100.00));
    }

    #[test]
    fn test_current_withdraw_into_overdraft() {
        let mut account = current(dec!(500.00), dec!(200.00));
        account.withdraw(dec!(700.00)).unwrap();
        assert_eq!(account.balance(), dec!(-200.00));
    }

    #[test]
    fn test_current_withdraw_beyond_overdraft_fails() {
        let mut account = current(dec!(500.00), dec!(200.00));
        let result = account.withdraw(dec!(700.01));
        assert_eq!(
            result,
            Err(BankError::insufficient_funds(
                "ACC-2",
                dec!(700.00),
                dec!(700.01)
            ))
        );
        assert_eq!(account.balance(), dec!(500.00));
    }

    #[rstest]
    #[case::fixed(fixed_deposit(dec!(1000.00), dec!(0.06), 12), "Fixed Deposit")]
    #[case::recurring(
        recurring_deposit(dec!(1000.00), dec!(50.00), dec!(0.12), 12),
        "Recurring Deposit"
    )]
    fn test_term_deposits_are_withdraw_locked(#[case] mut account: Account, #[case] kind: &str) {
        for amount in [dec!(0.01), dec!(500.00), dec!(999999.00)] {
            let result = account.withdraw(amount);
            assert_eq!(
                result,
                Err(BankError::withdrawal_not_allowed(&account.number, kind))
            );
        }
        assert_eq!(account.balance(), dec!(1000.00));
    }

    #[test]
    fn test_savings_monthly_interest_rounds_to_cents() {
        let mut account = savings(dec!(1000.00), dec!(0.04));
        let credited = account.accrue_monthly_interest();
        assert_eq!(credited, dec!(3.33));
        assert_eq!(account.balance(), dec!(1003.33));
    }

    #[test]
    fn test_current_accrues_no_interest() {
        let mut account = current(dec!(1000.00), dec!(200.00));
        assert_eq!(account.accrue_monthly_interest(), dec!(0));
        assert_eq!(account.balance(), dec!(1000.00));
    }

    #[test]
    fn test_fixed_deposit_accrues_until_tenure_then_freezes() {
        let mut account = fixed_deposit(dec!(1000.00), dec!(0.06), 2);

        assert_eq!(account.accrue_monthly_interest(), dec!(5.00));
        assert_eq!(account.balance(), dec!(1005.00));

        // 1005.00 * 0.06 / 12 = 5.025 -> 5.03
        assert_eq!(account.accrue_monthly_interest(), dec!(5.03));
        assert_eq!(account.balance(), dec!(1010.03));

        // Tenure reached: accrual freezes, balance stays put.
        assert_eq!(account.accrue_monthly_interest(), dec!(0));
        assert_eq!(account.balance(), dec!(1010.03));
    }

    #[test]
    fn test_recurring_deposit_credits_contribution_before_interest() {
        let mut account = recurring_deposit(dec!(100.00), dec!(50.00), dec!(0.12), 1);

        // (100 + 50) * 0.12 / 12 = 1.50
        assert_eq!(account.accrue_monthly_interest(), dec!(1.50));
        assert_eq!(account.balance(), dec!(151.50));

        // Tenure of one month reached: no further contribution or interest.
        assert_eq!(account.accrue_monthly_interest(), dec!(0));
        assert_eq!(account.balance(), dec!(151.50));
    }

    #[test]
    fn test_entries_returns_defensive_copy() {
        let mut account = savings(dec!(100.00), dec!(0.04));
        account.record_entry("DEPOSIT - 100.00");

        let mut copy = account.entries();
        copy.push("forged entry".to_string());

        assert_eq!(account.entries(), vec!["DEPOSIT - 100.00".to_string()]);
    }

    #[test]
    fn test_details_includes_variant_extras() {
        let account = current(dec!(250.00), dec!(100.00));
        let details = account.details();
        assert!(details.contains("Type: Current"));
        assert!(details.contains("Balance: EUR 250.00"));
        assert!(details.contains("Overdraft Limit: EUR 100.00"));
        assert!(details.contains("Status: Active"));
    }
}
