use rust_decimal::Decimal;
use serde::Serialize;

use super::engine::round_half_up;
use super::model::{Commitment, Grid};

/// Rollup of one commitment's column of the grid
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CommitmentSummary {
    pub unit_id: String,
    pub label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub committed: Decimal,
    /// Total added by re-indexing balances after the first installment
    #[serde(with = "rust_decimal::serde::float")]
    pub indexation: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub paid: Decimal,
    /// Balance after the last installment
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub paid_installments: usize,
    pub currency_symbol: String,
}

/// Summarize each commitment column of a grid built from the same commitments.
///
/// Totals saturate at the `Decimal` bounds like the grid itself.
pub fn summarize(commitments: &[Commitment], grid: &Grid) -> Vec<CommitmentSummary> {
    commitments
        .iter()
        .enumerate()
        .map(|(col, commitment)| {
            let mut indexation = Decimal::ZERO;
            let mut paid = Decimal::ZERO;
            let mut paid_installments = 0;
            let mut previous_balance = None;
            let mut balance = Decimal::ZERO;

            for cell in grid.iter().filter_map(|row| row.get(col)) {
                if let Some(previous) = previous_balance {
                    if cell.installment_number != 1 {
                        indexation = indexation
                            .saturating_add(cell.updated_amount.saturating_sub(previous));
                    }
                }
                paid = paid.saturating_add(cell.payment);
                if cell.is_paid {
                    paid_installments += 1;
                }
                previous_balance = Some(cell.balance);
                balance = cell.balance;
            }

            CommitmentSummary {
                unit_id: commitment.id.clone(),
                label: commitment.label().to_string(),
                committed: round_half_up(commitment.committed_amount.unwrap_or_default()),
                indexation,
                paid,
                balance,
                paid_installments,
                currency_symbol: commitment
                    .currency
                    .as_ref()
                    .map(|c| c.symbol.clone())
                    .unwrap_or_else(|| "$".to_string()),
            }
        })
        .collect()
}
