mod project;
mod records;
mod settings;

pub use project::Project;
pub use records::{CommitmentRecords, InstallmentRecords, PaymentRecords};
pub use settings::{DisplaySettings, Organization, Settings};

use crate::error::{PlanError, Result};
use crate::plan::{Commitment, Currency, Installment, Payment, PlanInputs};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the data directory path (XDG config dir, or ~/.indexplan/)
pub fn data_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "indexplan") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = std::env::var_os("HOME").map(PathBuf::from).ok_or_else(|| {
        PlanError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".indexplan"))
}

fn read_toml<T: DeserializeOwned>(path: PathBuf) -> Result<T> {
    if !path.exists() {
        return Err(PlanError::DataFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    debug!(path = %path.display(), "loading data file");
    toml::from_str(&content).map_err(|e| PlanError::DataParse { path, source: e })
}

fn write_toml<T: Serialize>(path: PathBuf, value: &T) -> Result<()> {
    let content =
        toml::to_string_pretty(value).map_err(|e| PlanError::DataWrite {
            path: path.clone(),
            source: e,
        })?;
    fs::write(&path, content)?;
    debug!(path = %path.display(), "saved data file");
    Ok(())
}

/// Load config.toml
pub fn load_settings(data_dir: &Path) -> Result<Settings> {
    read_toml(data_dir.join("config.toml"))
}

/// Load currencies.toml as a map of currency id to currency
pub fn load_currencies(data_dir: &Path) -> Result<HashMap<String, Currency>> {
    read_toml(data_dir.join("currencies.toml"))
}

/// Load the installments of one project and organization, ordered by number
pub fn load_installments(
    data_dir: &Path,
    project_id: &str,
    organization_id: &str,
) -> Result<Vec<Installment>> {
    let records: InstallmentRecords = read_toml(data_dir.join("installments.toml"))?;
    let mut installments: Vec<Installment> = records
        .installments
        .into_iter()
        .filter(|i| i.project_id == project_id && i.organization_id == organization_id)
        .collect();
    installments.sort_by_key(|i| i.number);
    Ok(installments)
}

/// Load the commitments of one project with their currency attached
pub fn load_commitments(data_dir: &Path, project_id: &str) -> Result<Vec<Commitment>> {
    let currencies = load_currencies(data_dir)?;
    let records: CommitmentRecords = read_toml(data_dir.join("commitments.toml"))?;
    Ok(records
        .commitments
        .into_iter()
        .filter(|c| c.project_id == project_id)
        .map(|mut c| {
            c.currency = c
                .currency_id
                .as_ref()
                .and_then(|id| currencies.get(id))
                .cloned();
            c
        })
        .collect())
}

fn load_payment_records(data_dir: &Path) -> Result<PaymentRecords> {
    let path = data_dir.join("payments.toml");
    if !path.exists() {
        return Ok(PaymentRecords::default());
    }
    read_toml(path)
}

/// Load the payments of one project (payments.toml is optional)
pub fn load_payments(data_dir: &Path, project_id: &str) -> Result<Vec<Payment>> {
    Ok(load_payment_records(data_dir)?
        .payments
        .into_iter()
        .filter(|p| p.project_id == project_id)
        .collect())
}

/// Append a payment to payments.toml
pub fn save_payment(data_dir: &Path, payment: Payment) -> Result<()> {
    let mut records = load_payment_records(data_dir)?;
    records.payments.push(payment);
    write_toml(data_dir.join("payments.toml"), &records)
}

/// Append an installment to installments.toml
pub fn save_installment(data_dir: &Path, installment: Installment) -> Result<()> {
    let mut records: InstallmentRecords = read_toml(data_dir.join("installments.toml"))?;
    records.installments.push(installment);
    write_toml(data_dir.join("installments.toml"), &records)
}

/// Resolve which project a command works on
pub fn resolve_project(settings: &Settings, requested: Option<&str>) -> Result<String> {
    let project_id = requested
        .map(str::to_string)
        .or_else(|| settings.default_project.clone())
        .ok_or(PlanError::NoProject)?;

    if !settings.projects.contains_key(&project_id) {
        return Err(PlanError::ProjectNotFound(project_id));
    }
    Ok(project_id)
}

/// Load everything a grid needs for one project, fresh from disk
pub fn load_plan_inputs(data_dir: &Path, settings: &Settings, project_id: &str) -> Result<PlanInputs> {
    let inputs = PlanInputs {
        installments: load_installments(data_dir, project_id, &settings.organization.id)?,
        commitments: load_commitments(data_dir, project_id)?,
        payments: load_payments(data_dir, project_id)?,
    };
    debug!(
        project = project_id,
        installments = inputs.installments.len(),
        commitments = inputs.commitments.len(),
        payments = inputs.payments.len(),
        "loaded plan inputs"
    );
    Ok(inputs)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"default_project = "torre-norte"

[organization]
id = "org-demo"
name = "Constructora Demo"

[display]
currency_symbol = "$"

# One table per project. The table name (e.g., [projects.torre-norte]) is
# the project identifier used by --project.
[projects.torre-norte]
name = "Torre Norte"
address = "Av. Siempreviva 742"      # optional
"#;

/// Template content for currencies.toml
pub const CURRENCIES_TEMPLATE: &str = r#"# Currencies referenced by commitments and payments through currency_id.

[ars]
symbol = "$"
exchange_rate = 1

[usd]
symbol = "US$"
exchange_rate = 1000
"#;

/// Template content for installments.toml
pub const INSTALLMENTS_TEMPLATE: &str = r#"# Installments are numbered from 1 without gaps. index_reference is the
# percentage applied to the previous balance (3.5 means 3.5%).
#
# Add more with:
#   indexplan add-installment --date 2026-05-10 --index 3.1

[[installments]]
id = "inst-1"
project_id = "torre-norte"
organization_id = "org-demo"
date = "2026-01-10"
number = 1
index_reference = 0

[[installments]]
id = "inst-2"
project_id = "torre-norte"
organization_id = "org-demo"
date = "2026-02-10"
number = 2
index_reference = 3.5

[[installments]]
id = "inst-3"
project_id = "torre-norte"
organization_id = "org-demo"
date = "2026-03-10"
number = 3
index_reference = 4.2

[[installments]]
id = "inst-4"
project_id = "torre-norte"
organization_id = "org-demo"
date = "2026-04-10"
number = 4
index_reference = 2.8
"#;

/// Template content for commitments.toml
pub const COMMITMENTS_TEMPLATE: &str = r#"# One entry per functional unit sold. Payments match a commitment by unit
# label, or by client_id when the commitment has no unit.

[[commitments]]
id = "c-1a"
project_id = "torre-norte"
client_id = "ana"
unit = "1A"
committed_amount = 1200000
currency_id = "ars"

[[commitments]]
id = "c-2b"
project_id = "torre-norte"
client_id = "bruno"
unit = "2B"
committed_amount = 950000
currency_id = "ars"

[[commitments]]
id = "c-carla"
project_id = "torre-norte"
client_id = "carla"
committed_amount = 30000
currency_id = "usd"
exchange_rate = 1000
"#;

/// Template content for payments.toml
pub const PAYMENTS_TEMPLATE: &str = r#"# Record payments with:
#   indexplan add-payment 150000 --installment 2 --unit 1A

[[payments]]
project_id = "torre-norte"
unit = "1A"
client_id = "ana"
installment_number = 1
amount = 300000
currency_id = "ars"
date = "2026-01-12"

[[payments]]
project_id = "torre-norte"
unit = "2B"
client_id = "bruno"
installment_number = 1
amount = 250000
currency_id = "ars"
date = "2026-01-15"
"#;
