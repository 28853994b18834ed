use std::collections::HashMap;

use super::model::{Commitment, Payment};

/// How a commitment finds its payments: by unit label when it has one,
/// otherwise by the client that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStrategy {
    ByUnit(String),
    ByClient(String),
}

impl MatchStrategy {
    pub fn for_commitment(commitment: &Commitment) -> Self {
        match &commitment.unit {
            Some(unit) => MatchStrategy::ByUnit(unit.clone()),
            None => MatchStrategy::ByClient(commitment.client_id.clone()),
        }
    }

    pub fn matches(&self, payment: &Payment) -> bool {
        match self {
            MatchStrategy::ByUnit(unit) => payment.unit.as_deref() == Some(unit.as_str()),
            MatchStrategy::ByClient(client) => payment.client_id == *client,
        }
    }
}

type Buckets<'a> = HashMap<&'a str, HashMap<u32, Vec<&'a Payment>>>;

/// Payments bucketed by payer and installment number.
///
/// Every payment is filed under its client and, when present, under its unit,
/// so a lookup with either strategy sees exactly the payments a linear scan
/// with [`MatchStrategy::matches`] would, in input order.
#[derive(Debug, Default)]
pub struct PaymentIndex<'a> {
    by_unit: Buckets<'a>,
    by_client: Buckets<'a>,
}

impl<'a> PaymentIndex<'a> {
    pub fn new(payments: &'a [Payment]) -> Self {
        let mut index = Self::default();
        for payment in payments {
            let number = payment.installment_number;
            if let Some(unit) = payment.unit.as_deref() {
                index
                    .by_unit
                    .entry(unit)
                    .or_default()
                    .entry(number)
                    .or_default()
                    .push(payment);
            }
            index
                .by_client
                .entry(payment.client_id.as_str())
                .or_default()
                .entry(number)
                .or_default()
                .push(payment);
        }
        index
    }

    pub fn lookup(&self, strategy: &MatchStrategy, installment_number: u32) -> &[&'a Payment] {
        let (buckets, payer) = match strategy {
            MatchStrategy::ByUnit(unit) => (&self.by_unit, unit.as_str()),
            MatchStrategy::ByClient(client) => (&self.by_client, client.as_str()),
        };
        buckets
            .get(payer)
            .and_then(|by_number| by_number.get(&installment_number))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
