use serde::{Deserialize, Serialize};

use crate::plan::{Commitment, Installment, Payment};

/// Contents of installments.toml
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct InstallmentRecords {
    #[serde(default)]
    pub installments: Vec<Installment>,
}

/// Contents of commitments.toml
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CommitmentRecords {
    #[serde(default)]
    pub commitments: Vec<Commitment>,
}

/// Contents of payments.toml
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct PaymentRecords {
    #[serde(default)]
    pub payments: Vec<Payment>,
}
