use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, trace};

use super::matching::{MatchStrategy, PaymentIndex};
use super::model::{Cell, Commitment, CommitmentCurrency, Grid, Installment, Payment};

/// Round to the nearest integer, ties toward positive infinity.
pub fn round_half_up(value: Decimal) -> Decimal {
    if value.scale() == 0 {
        return value;
    }
    value.checked_add(dec!(0.5)).unwrap_or(value).floor()
}

/// Convert a payment into the commitment's currency.
///
/// Payments in the commitment's own currency are taken at face value,
/// anything else is multiplied by the payment's own exchange rate.
/// Arithmetic saturates at `Decimal::MAX`/`Decimal::MIN` instead of overflowing.
fn converted_amount(payment: &Payment, commitment: &Commitment) -> Decimal {
    let amount = payment.amount.unwrap_or_default();
    if payment.currency_id == commitment.currency_id {
        amount
    } else {
        amount.saturating_mul(payment.exchange_rate.unwrap_or(Decimal::ONE))
    }
}

/// Apply an index percentage to a balance, saturating on overflow.
fn indexed(balance: Decimal, index_reference: Decimal) -> Decimal {
    let factor = Decimal::ONE.saturating_add(index_reference / dec!(100));
    balance.saturating_mul(factor)
}

/// One commitment's column while the grid is being built.
struct Column<'c> {
    commitment: &'c Commitment,
    strategy: MatchStrategy,
    currency: CommitmentCurrency,
    previous_balance: Decimal,
}

impl<'c> Column<'c> {
    fn new(commitment: &'c Commitment) -> Self {
        let currency = CommitmentCurrency {
            symbol: commitment
                .currency
                .as_ref()
                .map(|c| c.symbol.clone())
                .unwrap_or_else(|| "$".to_string()),
            exchange_rate: commitment.exchange_rate.unwrap_or(Decimal::ONE),
        };
        Self {
            commitment,
            strategy: MatchStrategy::for_commitment(commitment),
            currency,
            previous_balance: Decimal::ZERO,
        }
    }

    fn advance(&mut self, installment: &Installment, total: u32, index: &PaymentIndex) -> Cell {
        let number = installment.number;

        let total_paid: Decimal = index
            .lookup(&self.strategy, number)
            .iter()
            .map(|p| converted_amount(p, self.commitment))
            .fold(Decimal::ZERO, Decimal::saturating_add);

        let updated_amount = if number == 1 {
            round_half_up(self.commitment.committed_amount.unwrap_or_default())
        } else {
            let index_reference = installment.index_reference.unwrap_or_default();
            round_half_up(indexed(self.previous_balance, index_reference))
        };

        let remaining = (i64::from(total) - i64::from(number) + 1).max(1);
        let installment_value = round_half_up(updated_amount / Decimal::from(remaining));

        let payment = round_half_up(total_paid);
        let balance = updated_amount.saturating_sub(payment);
        self.previous_balance = balance;

        trace!(
            unit = %self.commitment.id,
            installment = number,
            %updated_amount,
            %balance,
            "advanced commitment"
        );

        Cell {
            unit_id: self.commitment.id.clone(),
            installment_number: number,
            updated_amount,
            installment_value,
            payment,
            balance,
            is_paid: total_paid > Decimal::ZERO,
            commitment_currency: self.currency.clone(),
        }
    }
}

/// Build the indexed installment grid.
///
/// Every commitment is amortized independently: installment 1 starts from the
/// committed amount, and each later installment re-indexes the previous
/// balance by that installment's `index_reference` percentage. The running
/// balance is tracked per commitment only, so a gap in installment numbers
/// carries forward whatever balance was computed last.
///
/// Installments are processed in ascending `number` order (stable for ties).
/// Missing numeric fields count as zero, missing exchange rates as one.
/// Amounts that would overflow saturate at `Decimal::MAX`/`Decimal::MIN`,
/// so the computation never panics.
pub fn compute_installment_grid(
    installments: &[Installment],
    commitments: &[Commitment],
    payments: &[Payment],
) -> Grid {
    if installments.is_empty() {
        return Vec::new();
    }

    let mut ordered: Vec<&Installment> = installments.iter().collect();
    ordered.sort_by_key(|i| i.number);

    let total = u32::try_from(ordered.len()).unwrap_or(u32::MAX);
    let index = PaymentIndex::new(payments);
    let mut columns: Vec<Column> = commitments.iter().map(Column::new).collect();

    let grid: Grid = ordered
        .iter()
        .map(|installment| {
            columns
                .iter_mut()
                .map(|column| column.advance(installment, total, &index))
                .collect()
        })
        .collect();

    debug!(
        installments = grid.len(),
        commitments = commitments.len(),
        payments = payments.len(),
        "computed installment grid"
    );

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::model::Currency;
    use chrono::NaiveDate;

    fn installment(number: u32, index: Option<Decimal>) -> Installment {
        Installment {
            id: format!("i{number}"),
            project_id: "p".to_string(),
            organization_id: "o".to_string(),
            date: NaiveDate::from_ymd_opt(2026, number.min(12), 1).unwrap(),
            number,
            index_reference: index,
            created_at: None,
        }
    }

    fn commitment(id: &str, unit: Option<&str>, client: &str, amount: Option<Decimal>) -> Commitment {
        Commitment {
            id: id.to_string(),
            project_id: "p".to_string(),
            client_id: client.to_string(),
            unit: unit.map(str::to_string),
            committed_amount: amount,
            currency_id: None,
            exchange_rate: None,
            currency: None,
        }
    }

    fn payment(unit: Option<&str>, client: &str, number: u32, amount: Decimal) -> Payment {
        Payment {
            project_id: "p".to_string(),
            unit: unit.map(str::to_string),
            client_id: client.to_string(),
            installment_number: number,
            amount: Some(amount),
            currency_id: None,
            exchange_rate: None,
            date: None,
        }
    }

    #[test]
    fn worked_example() {
        let installments = vec![installment(1, Some(dec!(0))), installment(2, Some(dec!(10)))];
        let commitments = vec![commitment("A", Some("U1"), "ana", Some(dec!(1000)))];
        let payments = vec![payment(Some("U1"), "ana", 1, dec!(400))];

        let grid = compute_installment_grid(&installments, &commitments, &payments);

        let first = &grid[0][0];
        assert_eq!(first.unit_id, "A");
        assert_eq!(first.installment_number, 1);
        assert_eq!(first.updated_amount, dec!(1000));
        assert_eq!(first.payment, dec!(400));
        assert_eq!(first.balance, dec!(600));
        assert_eq!(first.installment_value, dec!(500));
        assert!(first.is_paid);

        let second = &grid[1][0];
        assert_eq!(second.updated_amount, dec!(660));
        assert_eq!(second.payment, dec!(0));
        assert_eq!(second.balance, dec!(660));
        assert_eq!(second.installment_value, dec!(660));
        assert!(!second.is_paid);
    }

    #[test]
    fn empty_installments_yield_empty_grid() {
        let commitments = vec![commitment("A", None, "ana", Some(dec!(10)))];
        let payments = vec![payment(None, "ana", 1, dec!(5))];
        assert!(compute_installment_grid(&[], &commitments, &payments).is_empty());
    }

    #[test]
    fn empty_commitments_yield_empty_rows() {
        let installments = vec![installment(1, None), installment(2, None), installment(3, None)];
        let grid = compute_installment_grid(&installments, &[], &[]);
        assert_eq!(grid.len(), 3);
        assert!(grid.iter().all(Vec::is_empty));
    }

    #[test]
    fn grid_shape_and_determinism() {
        let installments: Vec<_> = (1..=5).map(|n| installment(n, Some(dec!(2.5)))).collect();
        let commitments = vec![
            commitment("A", Some("1A"), "ana", Some(dec!(12345.67))),
            commitment("B", None, "bob", Some(dec!(900))),
            commitment("C", Some("3C"), "cat", None),
        ];
        let payments = vec![
            payment(Some("1A"), "ana", 2, dec!(1000)),
            payment(None, "bob", 1, dec!(100)),
            payment(None, "bob", 3, dec!(250.5)),
        ];

        let grid = compute_installment_grid(&installments, &commitments, &payments);
        assert_eq!(grid.len(), 5);
        assert!(grid.iter().all(|row| row.len() == 3));
        assert_eq!(grid, compute_installment_grid(&installments, &commitments, &payments));
    }

    #[test]
    fn first_installment_ignores_payments_and_rounds_commitment() {
        let installments = vec![installment(1, Some(dec!(50)))];
        let commitments = vec![commitment("A", Some("1A"), "ana", Some(dec!(999.5)))];
        let payments = vec![payment(Some("1A"), "ana", 1, dec!(5000))];

        let cell = &compute_installment_grid(&installments, &commitments, &payments)[0][0];
        assert_eq!(cell.updated_amount, dec!(1000));
        assert_eq!(cell.balance, dec!(-4000));
    }

    #[test]
    fn balances_chain_through_index() {
        let installments = vec![
            installment(1, None),
            installment(2, Some(dec!(3.5))),
            installment(3, Some(dec!(-2))),
            installment(4, None),
        ];
        let commitments = vec![commitment("A", Some("1A"), "ana", Some(dec!(100000)))];
        let payments = vec![
            payment(Some("1A"), "ana", 1, dec!(25000)),
            payment(Some("1A"), "ana", 2, dec!(20000.4)),
            payment(Some("1A"), "ana", 3, dec!(10000)),
        ];

        let grid = compute_installment_grid(&installments, &commitments, &payments);
        let column: Vec<&Cell> = grid.iter().map(|row| &row[0]).collect();

        for pair in column.windows(2) {
            let index = installments[pair[1].installment_number as usize - 1]
                .index_reference
                .unwrap_or_default();
            assert_eq!(
                pair[1].updated_amount,
                round_half_up(pair[0].balance * (Decimal::ONE + index / dec!(100)))
            );
        }

        // 100000 - 25000 = 75000; 75000 * 1.035 = 77625; - 20000 = 57625
        assert_eq!(column[1].updated_amount, dec!(77625));
        assert_eq!(column[1].balance, dec!(57625));
        // 57625 * 0.98 = 56472.5 -> 56473; - 10000 = 46473
        assert_eq!(column[2].updated_amount, dec!(56473));
        assert_eq!(column[2].balance, dec!(46473));
        assert_eq!(column[3].updated_amount, dec!(46473));
        assert_eq!(column[3].installment_value, dec!(46473));
    }

    #[test]
    fn balance_is_updated_amount_minus_rounded_payment() {
        let installments = vec![installment(1, None), installment(2, None)];
        let commitments = vec![commitment("A", None, "ana", Some(dec!(1000)))];
        let payments = vec![
            payment(None, "ana", 1, dec!(100.25)),
            payment(None, "ana", 1, dec!(100.25)),
        ];

        let cell = &compute_installment_grid(&installments, &commitments, &payments)[0][0];
        assert_eq!(cell.payment, dec!(201));
        assert_eq!(cell.balance, dec!(799));
    }

    #[test]
    fn tiny_payment_still_marks_paid() {
        let installments = vec![installment(1, None)];
        let commitments = vec![commitment("A", None, "ana", Some(dec!(1000)))];
        let payments = vec![payment(None, "ana", 1, dec!(0.2))];

        let cell = &compute_installment_grid(&installments, &commitments, &payments)[0][0];
        assert_eq!(cell.payment, dec!(0));
        assert!(cell.is_paid);
    }

    #[test]
    fn foreign_currency_payments_are_converted() {
        let installments = vec![installment(1, None)];
        let mut usd = commitment("A", Some("1A"), "ana", Some(dec!(5000)));
        usd.currency_id = Some("usd".to_string());
        usd.exchange_rate = Some(dec!(950));
        usd.currency = Some(Currency {
            symbol: "US$".to_string(),
            exchange_rate: dec!(950),
        });

        let mut same = payment(Some("1A"), "ana", 1, dec!(100));
        same.currency_id = Some("usd".to_string());
        same.exchange_rate = Some(dec!(7));
        let mut foreign = payment(Some("1A"), "ana", 1, dec!(2000));
        foreign.currency_id = Some("eur".to_string());
        foreign.exchange_rate = Some(dec!(1.1));
        let mut unrated = payment(Some("1A"), "ana", 1, dec!(50));
        unrated.currency_id = Some("ars".to_string());

        let grid = compute_installment_grid(&installments, &[usd], &[same, foreign, unrated]);
        let cell = &grid[0][0];
        // 100 (same currency) + 2000 * 1.1 + 50 * 1
        assert_eq!(cell.payment, dec!(2350));
        assert_eq!(cell.commitment_currency.symbol, "US$");
        assert_eq!(cell.commitment_currency.exchange_rate, dec!(950));
    }

    #[test]
    fn commitment_currency_defaults() {
        let installments = vec![installment(1, None)];
        let commitments = vec![commitment("A", None, "ana", None)];

        let cell = &compute_installment_grid(&installments, &commitments, &[])[0][0];
        assert_eq!(cell.commitment_currency.symbol, "$");
        assert_eq!(cell.commitment_currency.exchange_rate, dec!(1));
        assert_eq!(cell.updated_amount, dec!(0));
        assert_eq!(cell.balance, dec!(0));
        assert!(!cell.is_paid);
    }

    #[test]
    fn unlabelled_commitment_matches_by_client() {
        let installments = vec![installment(1, None)];
        let commitments = vec![
            commitment("A", None, "ana", Some(dec!(1000))),
            commitment("B", Some("2B"), "ana", Some(dec!(1000))),
        ];
        let payments = vec![
            payment(Some("2B"), "ana", 1, dec!(300)),
            payment(None, "ana", 1, dec!(200)),
        ];

        let grid = compute_installment_grid(&installments, &commitments, &payments);
        assert_eq!(grid[0][0].payment, dec!(500));
        assert_eq!(grid[0][1].payment, dec!(300));
    }

    #[test]
    fn unsorted_installments_are_processed_by_number() {
        let installments = vec![installment(2, Some(dec!(10))), installment(1, None)];
        let commitments = vec![commitment("A", Some("U1"), "ana", Some(dec!(1000)))];
        let payments = vec![payment(Some("U1"), "ana", 1, dec!(400))];

        let grid = compute_installment_grid(&installments, &commitments, &payments);
        assert_eq!(grid[0][0].installment_number, 1);
        assert_eq!(grid[1][0].installment_number, 2);
        assert_eq!(grid[1][0].updated_amount, dec!(660));
    }

    #[test]
    fn gap_carries_last_balance_forward() {
        let installments = vec![installment(1, None), installment(3, Some(dec!(10)))];
        let commitments = vec![commitment("A", None, "ana", Some(dec!(1000)))];

        let grid = compute_installment_grid(&installments, &commitments, &[]);
        let cell = &grid[1][0];
        assert_eq!(cell.updated_amount, dec!(1100));
        // 2 installments, number 3: remaining clamps to 1
        assert_eq!(cell.installment_value, dec!(1100));
    }

    #[test]
    fn missing_first_installment_starts_from_zero() {
        let installments = vec![installment(2, Some(dec!(10))), installment(3, None)];
        let commitments = vec![commitment("A", None, "ana", Some(dec!(1000)))];
        let payments = vec![payment(None, "ana", 2, dec!(100))];

        let grid = compute_installment_grid(&installments, &commitments, &payments);
        assert_eq!(grid[0][0].updated_amount, dec!(0));
        assert_eq!(grid[0][0].balance, dec!(-100));
        assert_eq!(grid[1][0].updated_amount, dec!(-100));
    }

    #[test]
    fn runaway_index_saturates_instead_of_panicking() {
        let mut installments = vec![installment(1, None)];
        installments.extend((2..=6).map(|n| installment(n, Some(dec!(1000000)))));
        let commitments = vec![commitment("A", None, "ana", Some(dec!(1000000000)))];

        let grid = compute_installment_grid(&installments, &commitments, &[]);
        assert_eq!(grid.len(), 6);
        // 1e9 * 10001^5 is beyond the largest Decimal
        assert_eq!(grid[5][0].updated_amount, Decimal::MAX);
        assert_eq!(grid[5][0].balance, Decimal::MAX);
    }

    #[test]
    fn runaway_negative_index_saturates_at_both_ends() {
        let mut installments = vec![installment(1, None)];
        installments.extend((2..=8).map(|n| installment(n, Some(dec!(-1000000)))));
        let commitments = vec![commitment("A", None, "ana", Some(dec!(1000000000)))];

        let grid = compute_installment_grid(&installments, &commitments, &[]);
        assert_eq!(grid.len(), 8);
        let last = grid[7][0].updated_amount;
        assert!(last == Decimal::MAX || last == Decimal::MIN);
    }

    #[test]
    fn huge_payments_saturate() {
        let installments = vec![installment(1, None), installment(2, None)];
        let commitments = vec![commitment("A", None, "ana", Some(dec!(1000)))];
        let mut foreign = payment(None, "ana", 1, Decimal::MAX);
        foreign.currency_id = Some("usd".to_string());
        foreign.exchange_rate = Some(dec!(2));
        let same = payment(None, "ana", 1, Decimal::MAX);

        let grid = compute_installment_grid(&installments, &commitments, &[foreign, same]);
        let cell = &grid[0][0];
        assert_eq!(cell.payment, Decimal::MAX);
        assert!(cell.is_paid);
        assert_eq!(cell.balance, dec!(1000) - Decimal::MAX);
        assert_eq!(grid[1][0].balance, dec!(1000) - Decimal::MAX);
    }

    #[test]
    fn rounding_ties_go_up() {
        assert_eq!(round_half_up(dec!(2.5)), dec!(3));
        assert_eq!(round_half_up(dec!(-2.5)), dec!(-2));
        assert_eq!(round_half_up(dec!(2.49)), dec!(2));
        assert_eq!(round_half_up(dec!(-2.51)), dec!(-3));
        assert_eq!(round_half_up(Decimal::MAX), Decimal::MAX);
        assert_eq!(round_half_up(Decimal::MIN), Decimal::MIN);
    }
}
