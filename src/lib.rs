pub mod config;
pub mod error;
pub mod plan;

pub use config::{load_plan_inputs, Organization, Project, Settings};
pub use error::{PlanError, Result};
pub use plan::{
    compute_installment_grid, Cell, Commitment, CommitmentSummary, Currency, Grid, Installment,
    MatchStrategy, Payment, PlanInputs, ValidationError,
};
