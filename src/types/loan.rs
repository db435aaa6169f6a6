//! Loan model: variants, lifecycle status, payments, and EMI math
//!
//! A loan is created `Pending` and moves through the lifecycle
//! `Pending -> Approved -> Active -> {PaidOff, Default, Closed}`, with
//! `Pending -> Rejected` as the other exit. The EMI (equal monthly
//! installment) is computed once at construction from principal, rate, and
//! tenure, and never changes afterwards.
//!
//! Each loan variant fixes its own annual interest rate; variants may carry
//! collateral fields that do not participate in any computation.

use crate::types::account::CustomerId;
use crate::types::error::BankError;
use crate::types::round_to_cents;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;

/// Unique loan identifier, supplied by the caller at application time
pub type LoanId = String;

/// Unique loan payment identifier
pub type PaymentId = String;

/// Lifecycle status of a loan
///
/// `Rejected`, `PaidOff`, and `Closed` are terminal. `Default` is a defined
/// status with no triggering code path: no overdue-detection sweep exists
/// in this design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanStatus {
    /// Application received, awaiting approval
    Pending,
    /// Approved, awaiting disbursement
    Approved,
    /// Application rejected (terminal)
    Rejected,
    /// Principal disbursed, in repayment
    Active,
    /// Fully repaid (terminal)
    PaidOff,
    /// Payments overdue; never set by any operation
    Default,
    /// Closed administratively or by early settlement (terminal)
    Closed,
}

impl LoanStatus {
    /// Whether no further transitions are possible from this status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LoanStatus::Rejected | LoanStatus::PaidOff | LoanStatus::Closed
        )
    }

    /// Uppercase status name as used in messages
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "PENDING",
            LoanStatus::Approved => "APPROVED",
            LoanStatus::Rejected => "REJECTED",
            LoanStatus::Active => "ACTIVE",
            LoanStatus::PaidOff => "PAID_OFF",
            LoanStatus::Default => "DEFAULT",
            LoanStatus::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable record of one loan repayment
///
/// Appended when a payment is accepted; never mutated or removed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanPayment {
    /// Unique payment id
    pub id: PaymentId,

    /// Id of the loan this payment belongs to
    pub loan: LoanId,

    /// Amount paid; always positive
    pub amount: Decimal,

    /// Payment month as `YYYY-MM`
    pub month: String,

    /// Date the payment was made
    pub date: NaiveDate,
}

/// Loan variant with its collateral fields
///
/// The annual interest rate is a property of the variant, fixed at
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub enum LoanKind {
    /// Unsecured personal loan at 9% annually
    Personal,

    /// Mortgage at 6.5% annually
    Home {
        /// Address of the financed property
        property_address: String,
        /// Appraised property value
        property_value: Decimal,
    },

    /// Vehicle loan at 7.5% annually
    Auto {
        /// Financed vehicle model
        vehicle_model: String,
        /// Appraised vehicle value
        vehicle_value: Decimal,
        /// Year of first registration
        registration_year: u32,
    },

    /// Study loan at 6.5% annually
    Education {
        /// Name of the institution
        institution: String,
        /// Course or program name
        course: String,
        /// Course duration in months
        course_duration_months: u32,
    },

    /// Commercial loan at 8% annually
    Business {
        /// Registered business name
        business_name: String,
        /// Line of business
        business_type: String,
        /// Annual turnover
        annual_turnover: Decimal,
        /// Value of pledged collateral
        collateral_value: Decimal,
    },
}

impl LoanKind {
    /// The annual interest rate this variant fixes at construction
    pub fn annual_rate(&self) -> Decimal {
        match self {
            LoanKind::Personal => dec!(0.09),
            LoanKind::Home { .. } => dec!(0.065),
            LoanKind::Auto { .. } => dec!(0.075),
            LoanKind::Education { .. } => dec!(0.065),
            LoanKind::Business { .. } => dec!(0.08),
        }
    }

    /// Human-readable variant name
    pub fn name(&self) -> &'static str {
        match self {
            LoanKind::Personal => "Personal Loan",
            LoanKind::Home { .. } => "Home Loan",
            LoanKind::Auto { .. } => "Auto Loan",
            LoanKind::Education { .. } => "Education Loan",
            LoanKind::Business { .. } => "Business Loan",
        }
    }
}

/// Compute the fixed monthly installment for a reducing-balance loan
///
/// `EMI = P * r * (1+r)^n / ((1+r)^n - 1)` with `r = annual_rate / 12` and
/// `n = tenure_months`, rounded to cents. The zero-rate case degenerates to
/// `P / n` (the direct formula would divide by zero).
///
/// The caller guarantees `principal > 0` and `tenure_months > 0`.
pub fn monthly_installment(principal: Decimal, annual_rate: Decimal, tenure_months: u32) -> Decimal {
    let monthly_rate = annual_rate / Decimal::from(12);
    if monthly_rate.is_zero() {
        return round_to_cents(principal / Decimal::from(tenure_months));
    }

    let factor = compound(Decimal::ONE + monthly_rate, tenure_months);
    round_to_cents(principal * monthly_rate * factor / (factor - Decimal::ONE))
}

/// `base^exponent` by repeated multiplication
///
/// Tenures are at most a few hundred months, so the loop is cheap and keeps
/// the full 28-digit precision of `Decimal`.
fn compound(base: Decimal, exponent: u32) -> Decimal {
    let mut acc = Decimal::ONE;
    for _ in 0..exponent {
        acc *= base;
    }
    acc
}

/// An installment loan
///
/// The borrowing customer is referenced by id. The payment list is
/// append-only and reachable only through [`Loan::payments`] /
/// [`Loan::add_payment`].
#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    /// Unique loan id
    pub id: LoanId,

    /// Id of the borrowing customer
    pub customer: CustomerId,

    /// Borrowed amount; always positive
    pub principal: Decimal,

    /// Annual interest rate, fixed by the variant at construction
    pub annual_rate: Decimal,

    /// Repayment period in months
    pub tenure_months: u32,

    /// Date the principal was disbursed; `None` until the loan is activated
    pub disbursed_on: Option<NaiveDate>,

    /// Current lifecycle status
    pub status: LoanStatus,

    /// Fixed monthly installment, computed once at construction
    pub emi: Decimal,

    /// Reason recorded when the application was rejected
    pub rejection_reason: Option<String>,

    /// Variant tag with collateral fields
    pub kind: LoanKind,

    payments: Vec<LoanPayment>,
}

impl Loan {
    /// Create a pending loan application
    ///
    /// Computes and fixes the EMI from the principal, the variant's annual
    /// rate, and the tenure.
    ///
    /// # Errors
    ///
    /// - `InvalidPrincipal` if `principal` is zero or negative
    /// - `InvalidTenure` if `tenure_months` is zero
    pub fn new(
        id: impl Into<LoanId>,
        customer: impl Into<CustomerId>,
        principal: Decimal,
        tenure_months: u32,
        kind: LoanKind,
    ) -> Result<Self, BankError> {
        if principal <= Decimal::ZERO {
            return Err(BankError::InvalidPrincipal { amount: principal });
        }
        if tenure_months == 0 {
            return Err(BankError::InvalidTenure {
                months: tenure_months,
            });
        }

        let annual_rate = kind.annual_rate();
        let emi = monthly_installment(principal, annual_rate, tenure_months);

        Ok(Loan {
            id: id.into(),
            customer: customer.into(),
            principal,
            annual_rate,
            tenure_months,
            disbursed_on: None,
            status: LoanStatus::Pending,
            emi,
            rejection_reason: None,
            kind,
            payments: Vec::new(),
        })
    }

    /// Recorded payments, in order of receipt (defensive copy)
    pub fn payments(&self) -> Vec<LoanPayment> {
        self.payments.clone()
    }

    /// Append a payment fact
    pub fn add_payment(&mut self, payment: LoanPayment) {
        self.payments.push(payment);
    }

    /// Principal minus the sum of all payment amounts
    ///
    /// Negative when the loan was overpaid; a non-positive remaining
    /// balance means the loan is fully paid.
    pub fn remaining_balance(&self) -> Decimal {
        let total_paid: Decimal = self.payments.iter().map(|p| p.amount).sum();
        self.principal - total_paid
    }

    /// One-line loan summary
    pub fn details(&self) -> String {
        format!(
            "{} - ID: {} | Principal: EUR {:.2} | Rate: {:.2}% | Tenure: {} months | EMI: EUR {:.2} | Status: {}",
            self.kind.name(),
            self.id,
            self.principal,
            self.annual_rate * Decimal::from(100),
            self.tenure_months,
            self.emi,
            self.status
        )
    }
}

impl fmt::Display for Loan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.details())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn personal(principal: Decimal, tenure: u32) -> Loan {
        Loan::new("LN-1", "CUST-1", principal, tenure, LoanKind::Personal).unwrap()
    }

    fn payment(amount: Decimal) -> LoanPayment {
        LoanPayment {
            id: "PAY-000001".to_string(),
            loan: "LN-1".to_string(),
            amount,
            month: "2026-08".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
        }
    }

    #[rstest]
    #[case::mortgage_30y(dec!(120000), dec!(0.065), 360, dec!(758.48))]
    #[case::personal_5y(dec!(10000), dec!(0.09), 60, dec!(207.58))]
    #[case::auto_4y(dec!(24000), dec!(0.075), 48, dec!(580.29))]
    #[case::business_7y(dec!(50000), dec!(0.08), 84, dec!(779.31))]
    fn test_installment_matches_amortization_formula(
        #[case] principal: Decimal,
        #[case] rate: Decimal,
        #[case] months: u32,
        #[case] expected: Decimal,
    ) {
        assert_eq!(monthly_installment(principal, rate, months), expected);
    }

    #[test]
    fn test_installment_zero_rate_is_principal_over_tenure() {
        assert_eq!(monthly_installment(dec!(120000), dec!(0), 12), dec!(10000.00));
    }

    #[rstest]
    #[case::personal(LoanKind::Personal, dec!(0.09), "Personal Loan")]
    #[case::home(
        LoanKind::Home { property_address: "1 Elm St".into(), property_value: dec!(300000) },
        dec!(0.065),
        "Home Loan"
    )]
    #[case::auto(
        LoanKind::Auto { vehicle_model: "Beetle".into(), vehicle_value: dec!(9000), registration_year: 2019 },
        dec!(0.075),
        "Auto Loan"
    )]
    #[case::education(
        LoanKind::Education { institution: "TU Graz".into(), course: "CS".into(), course_duration_months: 36 },
        dec!(0.065),
        "Education Loan"
    )]
    #[case::business(
        LoanKind::Business { business_name: "Acme".into(), business_type: "Retail".into(), annual_turnover: dec!(800000), collateral_value: dec!(120000) },
        dec!(0.08),
        "Business Loan"
    )]
    fn test_variant_rates_and_names(
        #[case] kind: LoanKind,
        #[case] rate: Decimal,
        #[case] name: &str,
    ) {
        assert_eq!(kind.annual_rate(), rate);
        assert_eq!(kind.name(), name);
    }

    #[test]
    fn test_new_loan_is_pending_with_fixed_emi() {
        let loan = personal(dec!(10000), 60);
        assert_eq!(loan.status, LoanStatus::Pending);
        assert_eq!(loan.emi, dec!(207.58));
        assert_eq!(loan.disbursed_on, None);
        assert!(loan.payments().is_empty());
    }

    #[test]
    fn test_new_loan_rejects_non_positive_principal() {
        let result = Loan::new("LN-1", "CUST-1", dec!(0), 12, LoanKind::Personal);
        assert!(matches!(result, Err(BankError::InvalidPrincipal { .. })));
    }

    #[test]
    fn test_new_loan_rejects_zero_tenure() {
        let result = Loan::new("LN-1", "CUST-1", dec!(5000), 0, LoanKind::Personal);
        assert!(matches!(result, Err(BankError::InvalidTenure { months: 0 })));
    }

    #[test]
    fn test_remaining_balance_subtracts_payments() {
        let mut loan = personal(dec!(1000), 12);
        loan.add_payment(payment(dec!(400.00)));
        loan.add_payment(payment(dec!(300.00)));
        assert_eq!(loan.remaining_balance(), dec!(300.00));
    }

    #[test]
    fn test_remaining_balance_goes_negative_on_overpayment() {
        let mut loan = personal(dec!(1000), 12);
        loan.add_payment(payment(dec!(1200.00)));
        assert_eq!(loan.remaining_balance(), dec!(-200.00));
    }

    #[test]
    fn test_payments_returns_defensive_copy() {
        let mut loan = personal(dec!(1000), 12);
        loan.add_payment(payment(dec!(100.00)));

        let mut copy = loan.payments();
        copy.clear();

        assert_eq!(loan.payments().len(), 1);
    }

    #[rstest]
    #[case::pending(LoanStatus::Pending, false)]
    #[case::approved(LoanStatus::Approved, false)]
    #[case::active(LoanStatus::Active, false)]
    #[case::default_status(LoanStatus::Default, false)]
    #[case::rejected(LoanStatus::Rejected, true)]
    #[case::paid_off(LoanStatus::PaidOff, true)]
    #[case::closed(LoanStatus::Closed, true)]
    fn test_terminal_statuses(#[case] status: LoanStatus, #[case] terminal: bool) {
        assert_eq!(status.is_terminal(), terminal);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(LoanStatus::PaidOff.to_string(), "PAID_OFF");
        assert_eq!(LoanStatus::Pending.to_string(), "PENDING");
    }

    #[test]
    fn test_details_rendering() {
        let loan = personal(dec!(10000), 60);
        let details = loan.details();
        assert!(details.contains("Personal Loan"));
        assert!(details.contains("EMI: EUR 207.58"));
        assert!(details.contains("Status: PENDING"));
    }
}
