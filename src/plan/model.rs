use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One step of a payment plan. `index_reference` is a percentage (3.5 = 3.5%).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Installment {
    pub id: String,
    pub project_id: String,
    pub organization_id: String,
    pub date: NaiveDate,
    /// 1-based position in the plan
    pub number: u32,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub index_reference: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Currency {
    pub symbol: String,
    pub exchange_rate: Decimal,
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            exchange_rate: dec!(1),
        }
    }
}

/// What a client committed to pay for a functional unit.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Commitment {
    pub id: String,
    pub project_id: String,
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub committed_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub exchange_rate: Option<Decimal>,
    /// Attached from the currency catalog when loaded, never stored
    #[serde(skip)]
    pub currency: Option<Currency>,
}

impl Commitment {
    /// Unit label, falling back to the client id for unlabelled commitments
    pub fn label(&self) -> &str {
        self.unit.as_deref().unwrap_or(&self.client_id)
    }
}

/// A recorded payment against one installment.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Payment {
    #[serde(default)]
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub client_id: String,
    pub installment_number: u32,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub exchange_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CommitmentCurrency {
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub exchange_rate: Decimal,
}

/// One (installment, commitment) position of the computed grid.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Cell {
    /// Id of the commitment this cell belongs to
    pub unit_id: String,
    pub installment_number: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub updated_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub installment_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub payment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub is_paid: bool,
    pub commitment_currency: CommitmentCurrency,
}

/// Rows are installments in ascending number order, columns are commitments in input order.
pub type Grid = Vec<Vec<Cell>>;
