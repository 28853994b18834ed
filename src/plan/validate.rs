use std::collections::HashSet;

use rust_decimal::Decimal;
use thiserror::Error;

use super::model::{Commitment, Installment, Payment};

/// Problems with plan data that the grid computation would otherwise silently absorb.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Plan has no installments")]
    NoInstallments,

    #[error("Installment number {0} appears more than once")]
    DuplicateInstallmentNumber(u32),

    #[error("Installment numbers are not contiguous: expected {expected}, found {found}")]
    InstallmentGap { expected: u32, found: u32 },

    #[error("Commitment '{0}' appears more than once")]
    DuplicateCommitment(String),

    #[error("Commitment '{0}' has a negative committed amount")]
    NegativeCommittedAmount(String),

    #[error("'{0}' has an exchange rate that is not greater than zero")]
    NonPositiveExchangeRate(String),

    #[error("Payment from '{payer}' on installment {installment} is negative")]
    NegativePayment { installment: u32, payer: String },

    #[error("Payment from '{payer}' references unknown installment {installment}")]
    UnknownInstallment { installment: u32, payer: String },
}

fn payer(payment: &Payment) -> String {
    payment
        .unit
        .clone()
        .unwrap_or_else(|| payment.client_id.clone())
}

/// Check plan inputs and report every issue found, in input order.
pub fn collect_issues(
    installments: &[Installment],
    commitments: &[Commitment],
    payments: &[Payment],
) -> Vec<ValidationError> {
    let mut issues = Vec::new();

    if installments.is_empty() {
        issues.push(ValidationError::NoInstallments);
    }

    let mut numbers: Vec<u32> = installments.iter().map(|i| i.number).collect();
    numbers.sort_unstable();
    let mut expected = 1;
    let mut previous = None;
    for &number in &numbers {
        if previous == Some(number) {
            issues.push(ValidationError::DuplicateInstallmentNumber(number));
            continue;
        }
        if number != expected {
            issues.push(ValidationError::InstallmentGap {
                expected,
                found: number,
            });
        }
        previous = Some(number);
        expected = number.saturating_add(1);
    }

    let mut seen = HashSet::new();
    for commitment in commitments {
        if !seen.insert(commitment.id.as_str()) {
            issues.push(ValidationError::DuplicateCommitment(commitment.id.clone()));
        }
        if commitment
            .committed_amount
            .is_some_and(|amount| amount < Decimal::ZERO)
        {
            issues.push(ValidationError::NegativeCommittedAmount(commitment.id.clone()));
        }
        if commitment
            .exchange_rate
            .is_some_and(|rate| rate <= Decimal::ZERO)
        {
            issues.push(ValidationError::NonPositiveExchangeRate(commitment.id.clone()));
        }
    }

    let known: HashSet<u32> = numbers.into_iter().collect();
    for payment in payments {
        let installment = payment.installment_number;
        if payment.amount.is_some_and(|amount| amount < Decimal::ZERO) {
            issues.push(ValidationError::NegativePayment {
                installment,
                payer: payer(payment),
            });
        }
        if payment.exchange_rate.is_some_and(|rate| rate <= Decimal::ZERO) {
            issues.push(ValidationError::NonPositiveExchangeRate(payer(payment)));
        }
        if !known.contains(&installment) {
            issues.push(ValidationError::UnknownInstallment {
                installment,
                payer: payer(payment),
            });
        }
    }

    issues
}

/// Fail on the first issue [`collect_issues`] would report.
pub fn validate(
    installments: &[Installment],
    commitments: &[Commitment],
    payments: &[Payment],
) -> Result<(), ValidationError> {
    match collect_issues(installments, commitments, payments)
        .into_iter()
        .next()
    {
        Some(issue) => Err(issue),
        None => Ok(()),
    }
}
