mod engine;
mod matching;
mod model;
mod summary;
mod validate;

pub use engine::{compute_installment_grid, round_half_up};
pub use matching::{MatchStrategy, PaymentIndex};
pub use model::{Cell, Commitment, CommitmentCurrency, Currency, Grid, Installment, Payment};
pub use summary::{summarize, CommitmentSummary};
pub use validate::{collect_issues, validate, ValidationError};

/// The three collections a grid is computed from, loaded fresh per calculation.
#[derive(Debug, Clone, Default)]
pub struct PlanInputs {
    pub installments: Vec<Installment>,
    pub commitments: Vec<Commitment>,
    pub payments: Vec<Payment>,
}

impl PlanInputs {
    pub fn grid(&self) -> Grid {
        compute_installment_grid(&self.installments, &self.commitments, &self.payments)
    }

    pub fn summary(&self) -> Vec<CommitmentSummary> {
        summarize(&self.commitments, &self.grid())
    }

    pub fn issues(&self) -> Vec<ValidationError> {
        collect_issues(&self.installments, &self.commitments, &self.payments)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(&self.installments, &self.commitments, &self.payments)
    }

    /// Find a commitment by id or unit label
    pub fn find_commitment(&self, reference: &str) -> Option<(usize, &Commitment)> {
        self.commitments
            .iter()
            .enumerate()
            .find(|(_, c)| c.id == reference)
            .or_else(|| {
                self.commitments
                    .iter()
                    .enumerate()
                    .find(|(_, c)| c.unit.as_deref() == Some(reference))
            })
    }
}
