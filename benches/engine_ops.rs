//! Benchmark suite for core engine operations
//!
//! Measures the in-memory hot paths with the divan benchmarking framework:
//! money movement through the account service, the monthly interest sweep,
//! and EMI computation.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use corebank::core::AccountService;
use corebank::types::monthly_installment;
use rust_decimal_macros::dec;

fn main() {
    divan::main();
}

fn service_with_accounts(count: u32) -> AccountService {
    let mut service = AccountService::new();
    for i in 0..count {
        service
            .open_savings(&format!("ACC-{:04}", i), "CUST-1", dec!(1000.00), dec!(0.04))
            .expect("opening failed");
    }
    service
}

/// Benchmark a deposit/withdraw pair on a single account
#[divan::bench]
fn deposit_withdraw_pair(bencher: divan::Bencher) {
    bencher
        .with_inputs(|| service_with_accounts(1))
        .bench_values(|mut service| {
            for _ in 0..100 {
                service.deposit("ACC-0000", dec!(10.00)).expect("deposit failed");
                service.withdraw("ACC-0000", dec!(10.00)).expect("withdraw failed");
            }
        });
}

/// Benchmark transfers between two accounts
#[divan::bench]
fn transfer_between_two_accounts(bencher: divan::Bencher) {
    bencher
        .with_inputs(|| service_with_accounts(2))
        .bench_values(|mut service| {
            for _ in 0..100 {
                service
                    .transfer("ACC-0000", "ACC-0001", dec!(1.00))
                    .expect("transfer failed");
            }
        });
}

/// Benchmark one interest sweep over 1,000 savings accounts
#[divan::bench]
fn interest_sweep_1000_accounts(bencher: divan::Bencher) {
    bencher
        .with_inputs(|| service_with_accounts(1000))
        .bench_values(|mut service| {
            service.calculate_monthly_interest();
        });
}

/// Benchmark EMI computation for a 30-year mortgage tenure
#[divan::bench]
fn emi_computation_360_months() -> rust_decimal::Decimal {
    monthly_installment(
        divan::black_box(dec!(120000)),
        divan::black_box(dec!(0.065)),
        divan::black_box(360),
    )
}
