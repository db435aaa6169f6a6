//! CSV format handling for operation scripts and account output
//!
//! This module centralizes all CSV format concerns:
//! - `CsvRecord` structure for deserialization
//! - Conversion from CSV rows to typed [`Operation`]s
//! - Account summary serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::core::Operation;
use crate::types::{Account, BankError, LoanKind};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the script format with columns:
/// `op,customer,id,to,amount,detail,rate,months`. Every column except `op`
/// is optional; each operation requires its own subset and the conversion
/// rejects rows where a required column is empty.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct CsvRecord {
    pub op: String,
    pub customer: Option<String>,
    pub id: Option<String>,
    pub to: Option<String>,
    pub amount: Option<String>,
    pub detail: Option<String>,
    pub rate: Option<String>,
    pub months: Option<String>,
}

/// Convert a CsvRecord into a typed Operation
///
/// Operation names are matched case-insensitively. Numeric columns are
/// parsed here so the engine only ever sees typed values.
///
/// # Errors
///
/// - `UnknownOperation` for an unrecognized `op` value
/// - `MissingField` when a required column is empty
/// - `Parse` when a numeric column does not parse
pub fn convert_csv_record(record: CsvRecord) -> Result<Operation, BankError> {
    let op = record.op.trim().to_lowercase();

    match op.as_str() {
        "open_savings" => Ok(Operation::OpenSavings {
            customer: require(record.customer, &op, "customer")?,
            number: require(record.id, &op, "id")?,
            opening_balance: parse_decimal(record.amount, &op, "amount")?,
            interest_rate: parse_decimal(record.rate, &op, "rate")?,
        }),
        "open_current" => Ok(Operation::OpenCurrent {
            customer: require(record.customer, &op, "customer")?,
            number: require(record.id, &op, "id")?,
            opening_balance: parse_decimal(record.amount, &op, "amount")?,
            overdraft_limit: parse_decimal(record.detail, &op, "detail")?,
        }),
        "open_fixed_deposit" => Ok(Operation::OpenFixedDeposit {
            customer: require(record.customer, &op, "customer")?,
            number: require(record.id, &op, "id")?,
            amount: parse_decimal(record.amount, &op, "amount")?,
            interest_rate: parse_decimal(record.rate, &op, "rate")?,
            tenure_months: parse_months(record.months, &op)?,
        }),
        "open_recurring_deposit" => Ok(Operation::OpenRecurringDeposit {
            customer: require(record.customer, &op, "customer")?,
            number: require(record.id, &op, "id")?,
            initial_balance: parse_decimal(record.amount, &op, "amount")?,
            monthly_deposit: parse_decimal(record.detail, &op, "detail")?,
            interest_rate: parse_decimal(record.rate, &op, "rate")?,
            tenure_months: parse_months(record.months, &op)?,
        }),
        "deposit" => Ok(Operation::Deposit {
            number: require(record.id, &op, "id")?,
            amount: parse_decimal(record.amount, &op, "amount")?,
        }),
        "withdraw" => Ok(Operation::Withdraw {
            number: require(record.id, &op, "id")?,
            amount: parse_decimal(record.amount, &op, "amount")?,
        }),
        "transfer" => Ok(Operation::Transfer {
            from: require(record.id, &op, "id")?,
            to: require(record.to, &op, "to")?,
            amount: parse_decimal(record.amount, &op, "amount")?,
        }),
        "charge_fee" => Ok(Operation::ChargeFee {
            number: require(record.id, &op, "id")?,
            amount: parse_decimal(record.amount, &op, "amount")?,
            memo: require(record.detail, &op, "detail")?,
        }),
        "accrue_interest" => Ok(Operation::AccrueInterest),
        "apply_loan" => Ok(Operation::ApplyLoan {
            customer: require(record.customer, &op, "customer")?,
            loan: require(record.id, &op, "id")?,
            principal: parse_decimal(record.amount, &op, "amount")?,
            tenure_months: parse_months(record.months, &op)?,
            kind: loan_kind(&require(record.detail, &op, "detail")?)?,
        }),
        "approve_loan" => Ok(Operation::ApproveLoan {
            loan: require(record.id, &op, "id")?,
        }),
        "reject_loan" => Ok(Operation::RejectLoan {
            loan: require(record.id, &op, "id")?,
            reason: require(record.detail, &op, "detail")?,
        }),
        "disburse_loan" => Ok(Operation::DisburseLoan {
            loan: require(record.id, &op, "id")?,
            account: require(record.to, &op, "to")?,
        }),
        "repay_loan" => Ok(Operation::RepayLoan {
            loan: require(record.id, &op, "id")?,
            amount: parse_decimal(record.amount, &op, "amount")?,
        }),
        "close_loan" => Ok(Operation::CloseLoan {
            loan: require(record.id, &op, "id")?,
        }),
        _ => Err(BankError::UnknownOperation { op: record.op }),
    }
}

fn require(value: Option<String>, op: &str, field: &str) -> Result<String, BankError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(BankError::missing_field(op, field)),
    }
}

fn parse_decimal(value: Option<String>, op: &str, field: &str) -> Result<Decimal, BankError> {
    let raw = require(value, op, field)?;
    Decimal::from_str(&raw).map_err(|_| BankError::Parse {
        line: None,
        message: format!("Invalid {} '{}' for operation '{}'", field, raw, op),
    })
}

fn parse_months(value: Option<String>, op: &str) -> Result<u32, BankError> {
    let raw = require(value, op, "months")?;
    raw.parse::<u32>().map_err(|_| BankError::Parse {
        line: None,
        message: format!("Invalid months '{}' for operation '{}'", raw, op),
    })
}

/// Map a loan kind name onto its variant
///
/// Script-applied loans carry no collateral details; the collateral fields
/// stay empty.
fn loan_kind(name: &str) -> Result<LoanKind, BankError> {
    match name.to_lowercase().as_str() {
        "personal" => Ok(LoanKind::Personal),
        "home" => Ok(LoanKind::Home {
            property_address: String::new(),
            property_value: Decimal::ZERO,
        }),
        "auto" => Ok(LoanKind::Auto {
            vehicle_model: String::new(),
            vehicle_value: Decimal::ZERO,
            registration_year: 0,
        }),
        "education" => Ok(LoanKind::Education {
            institution: String::new(),
            course: String::new(),
            course_duration_months: 0,
        }),
        "business" => Ok(LoanKind::Business {
            business_name: String::new(),
            business_type: String::new(),
            annual_turnover: Decimal::ZERO,
            collateral_value: Decimal::ZERO,
        }),
        _ => Err(BankError::Parse {
            line: None,
            message: format!("Invalid loan kind '{}'", name),
        }),
    }
}

/// Write account summaries to CSV format
///
/// Columns: `account,customer,kind,balance,active`, one row per account,
/// sorted by account number for deterministic output. Balances are
/// rendered with two decimal places.
///
/// # Errors
///
/// Returns `Io` if the underlying writer fails.
pub fn write_accounts_csv(accounts: &[&Account], output: &mut dyn Write) -> Result<(), BankError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["account", "customer", "kind", "balance", "active"])
        .map_err(|e| BankError::Io {
            message: format!("Failed to write CSV header: {}", e),
        })?;

    let mut sorted = accounts.to_vec();
    sorted.sort_by(|a, b| a.number.cmp(&b.number));

    for account in sorted {
        writer
            .write_record(&[
                account.number.clone(),
                account.customer.clone(),
                account.kind.name().to_string(),
                format!("{:.2}", account.balance()),
                account.active.to_string(),
            ])
            .map_err(|e| BankError::Io {
                message: format!("Failed to write account record: {}", e),
            })?;
    }

    writer.flush().map_err(|e| BankError::Io {
        message: format!("Failed to flush output: {}", e),
    })?;

    Ok(())
}
