use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tabled::{builder::Builder, settings::Style, Table, Tabled};
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use indexplan::config::{
    data_dir, load_commitments, load_installments, load_plan_inputs, load_settings,
    resolve_project, save_installment, save_payment, Settings, COMMITMENTS_TEMPLATE,
    CONFIG_TEMPLATE, CURRENCIES_TEMPLATE, INSTALLMENTS_TEMPLATE, PAYMENTS_TEMPLATE,
};
use indexplan::error::{PlanError, Result};
use indexplan::plan::{round_half_up, Cell, Installment, Payment};

#[derive(Parser)]
#[command(name = "indexplan")]
#[command(version, about = "Indexed installment plan calculator", long_about = None)]
struct Cli {
    /// Path to data directory (default: ~/.indexplan or XDG config)
    #[arg(short = 'C', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Project identifier (default: default_project from config.toml)
    #[arg(short, long, global = true)]
    project: Option<String>,

    /// Log level, overridden by RUST_LOG when set
    #[arg(long, global = true, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize data directory with template files
    Init,

    /// List configured projects
    Projects,

    /// List the units (client commitments) of a project
    Units,

    /// List the installments of a project
    Installments,

    /// Show the indexed installment grid (installments x units)
    Grid {
        /// Value shown in each cell
        #[arg(short, long, value_enum, default_value_t = GridField::Balance)]
        field: GridField,

        /// Print the full grid as JSON
        #[arg(long)]
        json: bool,

        /// Refuse to compute when the plan data has validation issues
        #[arg(long)]
        strict: bool,
    },

    /// Show the installment schedule of one unit
    Schedule {
        /// Unit label or commitment id (e.g., 1A or c-1a)
        unit: String,

        /// Print the unit's cells as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show totals per unit
    Summary {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check plan data for gaps, duplicates and bad amounts
    Check,

    /// Record a payment against an installment
    AddPayment {
        /// Payment amount
        amount: Decimal,

        /// Installment number the payment applies to
        #[arg(short, long)]
        installment: u32,

        /// Unit label of the payer
        #[arg(short, long, conflicts_with = "client")]
        unit: Option<String>,

        /// Client id of the payer (prefers the client's commitment without a unit)
        #[arg(short, long)]
        client: Option<String>,

        /// Currency id of the payment (default: the commitment's currency)
        #[arg(long)]
        currency: Option<String>,

        /// Exchange rate to the commitment's currency
        #[arg(long)]
        rate: Option<Decimal>,

        /// Payment date (default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Append the next installment to the plan
    AddInstallment {
        /// Installment date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Index reference percentage applied to the previous balance
        #[arg(long)]
        index: Option<Decimal>,
    },

    /// Show data directory and project overview
    Status,
}

#[derive(Clone, Copy, ValueEnum)]
enum GridField {
    Balance,
    Updated,
    Installment,
    Payment,
}

impl GridField {
    fn value(self, cell: &Cell) -> Decimal {
        match self {
            GridField::Balance => cell.balance,
            GridField::Updated => cell.updated_amount,
            GridField::Installment => cell.installment_value,
            GridField::Payment => cell.payment,
        }
    }

    fn title(self) -> &'static str {
        match self {
            GridField::Balance => "balance",
            GridField::Updated => "updated amount",
            GridField::Installment => "installment value",
            GridField::Payment => "payments",
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let dir = match cli.data_dir {
        Some(p) => p,
        None => data_dir()?,
    };
    debug!(data_dir = %dir.display(), "resolved data directory");

    let project = cli.project.as_deref();

    match cli.command {
        Commands::Init => cmd_init(&dir),
        Commands::Projects => cmd_projects(&dir),
        Commands::Units => cmd_units(&dir, project),
        Commands::Installments => cmd_installments(&dir, project),
        Commands::Grid {
            field,
            json,
            strict,
        } => cmd_grid(&dir, project, field, json, strict),
        Commands::Schedule { unit, json } => cmd_schedule(&dir, project, &unit, json),
        Commands::Summary { json } => cmd_summary(&dir, project, json),
        Commands::Check => cmd_check(&dir, project),
        Commands::AddPayment {
            amount,
            installment,
            unit,
            client,
            currency,
            rate,
            date,
        } => cmd_add_payment(
            &dir,
            project,
            NewPayment {
                amount,
                installment,
                unit,
                client,
                currency,
                rate,
                date,
            },
        ),
        Commands::AddInstallment { date, index } => cmd_add_installment(&dir, project, &date, index),
        Commands::Status => cmd_status(&dir, project),
    }
}

/// Load settings and resolve the project, failing early on a missing data directory
fn open_project(dir: &Path, project: Option<&str>) -> Result<(Settings, String)> {
    if !dir.exists() {
        return Err(PlanError::DataDirNotFound(dir.to_path_buf()));
    }
    let settings = load_settings(dir)?;
    let project_id = resolve_project(&settings, project)?;
    Ok((settings, project_id))
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| PlanError::InvalidDate(value.to_string()))
}

/// Initialize data directory with template files
fn cmd_init(dir: &Path) -> Result<()> {
    use std::fs;

    if dir.exists() {
        return Err(PlanError::AlreadyInitialized(dir.to_path_buf()));
    }

    fs::create_dir_all(dir)?;

    fs::write(dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(dir.join("currencies.toml"), CURRENCIES_TEMPLATE)?;
    fs::write(dir.join("installments.toml"), INSTALLMENTS_TEMPLATE)?;
    fs::write(dir.join("commitments.toml"), COMMITMENTS_TEMPLATE)?;
    fs::write(dir.join("payments.toml"), PAYMENTS_TEMPLATE)?;
    info!(data_dir = %dir.display(), "initialized data directory");

    println!("Initialized indexplan data at: {}", dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Describe your organization and projects:  $EDITOR {}/config.toml",
        dir.display()
    );
    println!(
        "  2. Set up the payment plan:                   $EDITOR {}/installments.toml",
        dir.display()
    );
    println!(
        "  3. Add the units sold:                        $EDITOR {}/commitments.toml",
        dir.display()
    );
    println!();
    println!("Then look at the plan:");
    println!("  indexplan grid");

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "INSTALLMENTS")]
    installments: usize,
    #[tabled(rename = "UNITS")]
    units: usize,
}

#[derive(Tabled)]
struct UnitRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "UNIT")]
    unit: String,
    #[tabled(rename = "CLIENT")]
    client: String,
    #[tabled(rename = "COMMITTED")]
    committed: String,
    #[tabled(rename = "CURRENCY")]
    currency: String,
}

#[derive(Tabled)]
struct InstallmentRow {
    #[tabled(rename = "#")]
    number: u32,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "INDEX")]
    index: String,
}

#[derive(Tabled)]
struct ScheduleRow {
    #[tabled(rename = "#")]
    number: u32,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "INDEX")]
    index: String,
    #[tabled(rename = "UPDATED")]
    updated: String,
    #[tabled(rename = "INSTALLMENT")]
    installment: String,
    #[tabled(rename = "PAYMENT")]
    payment: String,
    #[tabled(rename = "BALANCE")]
    balance: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "UNIT")]
    unit: String,
    #[tabled(rename = "COMMITTED")]
    committed: String,
    #[tabled(rename = "INDEXATION")]
    indexation: String,
    #[tabled(rename = "PAID")]
    paid: String,
    #[tabled(rename = "BALANCE")]
    balance: String,
    #[tabled(rename = "PAID INSTALLMENTS")]
    paid_installments: String,
}

fn format_whole_money(value: Decimal, currency_symbol: &str) -> String {
    format!("{}{:>6}", currency_symbol, format_grouped(value))
}

fn format_grouped(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let negative = rounded < Decimal::ZERO;
    let digits = rounded.abs().trunc().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

fn format_index(index: Option<Decimal>) -> String {
    match index {
        Some(value) => format!("{}%", value.normalize()),
        None => "-".to_string(),
    }
}

/// Append labelled summary rows under a rounded table.
///
/// The first `label_columns` columns merge into one label cell, the next
/// column carries the value and any remaining columns are closed off.
fn add_summary_footer(table: &str, label_columns: usize, rows: &[(&str, String)]) -> String {
    let lines: Vec<&str> = table.lines().collect();
    if lines.len() < 4 || label_columns == 0 || rows.is_empty() {
        return table.to_string();
    }

    // Parse the top border to discover column widths
    let Some(inner) = lines[0]
        .strip_prefix('╭')
        .and_then(|s| s.strip_suffix('╮'))
    else {
        return table.to_string();
    };

    let widths: Vec<usize> = inner.split('┬').map(|p| p.chars().count()).collect();
    if widths.len() <= label_columns {
        return table.to_string();
    }

    let label_widths = &widths[..label_columns];
    let value_width = widths[label_columns];
    let rest = &widths[label_columns + 1..];
    let left_width = label_widths.iter().sum::<usize>() + label_columns - 1;

    let dashes = |ws: &[usize]| {
        ws.iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("┴")
    };

    // Strip the original bottom border and start building
    let mut out = lines[..lines.len() - 1].join("\n");
    out.push('\n');

    out.push_str(&format!(
        "├{}┼{}",
        dashes(label_widths),
        "─".repeat(value_width)
    ));
    if rest.is_empty() {
        out.push_str("┤\n");
    } else {
        out.push_str(&format!("┼{}╯\n", dashes(rest)));
    }

    for (idx, (label, value)) in rows.iter().enumerate() {
        out.push_str(&format!(
            "│ {:>left$} │ {:>value$} │\n",
            label,
            value,
            left = left_width - 2,
            value = value_width - 2
        ));
        if idx < rows.len() - 1 {
            out.push_str(&format!(
                "├{}┼{}┤\n",
                "─".repeat(left_width),
                "─".repeat(value_width)
            ));
        }
    }

    out.push_str(&format!(
        "╰{}┴{}╯",
        "─".repeat(left_width),
        "─".repeat(value_width)
    ));

    out
}

/// List configured projects
fn cmd_projects(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(PlanError::DataDirNotFound(dir.to_path_buf()));
    }

    let settings = load_settings(dir)?;

    if settings.projects.is_empty() {
        println!("No projects configured.");
        println!("Add projects to: {}/config.toml", dir.display());
        return Ok(());
    }

    let mut rows = Vec::with_capacity(settings.projects.len());
    for (id, project) in &settings.projects {
        rows.push(ProjectRow {
            id: id.clone(),
            name: project.name.clone(),
            installments: load_installments(dir, id, &settings.organization.id)?.len(),
            units: load_commitments(dir, id)?.len(),
        });
    }

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// List the units of a project
fn cmd_units(dir: &Path, project: Option<&str>) -> Result<()> {
    let (_, project_id) = open_project(dir, project)?;
    let commitments = load_commitments(dir, &project_id)?;

    if commitments.is_empty() {
        println!("No units for project '{project_id}'.");
        println!("Add commitments to: {}/commitments.toml", dir.display());
        return Ok(());
    }

    let rows: Vec<UnitRow> = commitments
        .iter()
        .map(|c| {
            let symbol = c.currency.clone().unwrap_or_default().symbol;
            UnitRow {
                id: c.id.clone(),
                unit: c.unit.clone().unwrap_or_else(|| "-".to_string()),
                client: c.client_id.clone(),
                committed: format_whole_money(c.committed_amount.unwrap_or_default(), &symbol),
                currency: c.currency_id.clone().unwrap_or_else(|| "-".to_string()),
            }
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// List the installments of a project
fn cmd_installments(dir: &Path, project: Option<&str>) -> Result<()> {
    let (settings, project_id) = open_project(dir, project)?;
    let installments = load_installments(dir, &project_id, &settings.organization.id)?;

    if installments.is_empty() {
        println!("No installments for project '{project_id}'.");
        return Ok(());
    }

    let rows: Vec<InstallmentRow> = installments
        .iter()
        .map(|i| InstallmentRow {
            number: i.number,
            date: i.date.to_string(),
            index: format_index(i.index_reference),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Show the installment grid
fn cmd_grid(
    dir: &Path,
    project: Option<&str>,
    field: GridField,
    json: bool,
    strict: bool,
) -> Result<()> {
    let (settings, project_id) = open_project(dir, project)?;
    let inputs = load_plan_inputs(dir, &settings, &project_id)?;

    if strict {
        inputs.validate()?;
    }

    let grid = inputs.grid();

    if json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
        return Ok(());
    }

    if grid.is_empty() {
        println!("No installments for project '{project_id}'.");
        return Ok(());
    }

    let mut builder = Builder::default();
    let mut header = vec!["#".to_string(), "DATE".to_string()];
    header.extend(inputs.commitments.iter().map(|c| c.label().to_string()));
    builder.push_record(header);

    for (installment, row) in inputs.installments.iter().zip(&grid) {
        let mut record = vec![installment.number.to_string(), installment.date.to_string()];
        record.extend(row.iter().map(|cell| {
            let amount = format_whole_money(field.value(cell), &cell.commitment_currency.symbol);
            if cell.is_paid {
                format!("{amount} ✓")
            } else {
                amount
            }
        }));
        builder.push_record(record);
    }

    let table = builder.build().with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!(
        "Showing {} for {} installments x {} units (✓ = payment received)",
        field.title(),
        grid.len(),
        inputs.commitments.len()
    );

    Ok(())
}

/// Show one unit's schedule
fn cmd_schedule(dir: &Path, project: Option<&str>, unit: &str, json: bool) -> Result<()> {
    let (settings, project_id) = open_project(dir, project)?;
    let inputs = load_plan_inputs(dir, &settings, &project_id)?;

    let (col, commitment) = inputs
        .find_commitment(unit)
        .ok_or_else(|| PlanError::UnitNotFound(unit.to_string()))?;

    let grid = inputs.grid();
    let cells: Vec<&Cell> = grid.iter().map(|row| &row[col]).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&cells)?);
        return Ok(());
    }

    println!("Schedule for {} (client {})", commitment.label(), commitment.client_id);

    if cells.is_empty() {
        println!("  No installments for project '{project_id}'.");
        return Ok(());
    }

    let symbol = cells[0].commitment_currency.symbol.clone();
    let rows: Vec<ScheduleRow> = inputs
        .installments
        .iter()
        .zip(&cells)
        .map(|(installment, cell)| ScheduleRow {
            number: cell.installment_number,
            date: installment.date.to_string(),
            index: format_index(installment.index_reference),
            updated: format_whole_money(cell.updated_amount, &symbol),
            installment: format_whole_money(cell.installment_value, &symbol),
            payment: format_whole_money(cell.payment, &symbol),
            balance: format_whole_money(cell.balance, &symbol),
            status: if cell.is_paid { "PAID" } else { "DUE" }.to_string(),
        })
        .collect();

    let summary = inputs.summary();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    let table = match summary.get(col) {
        Some(s) => add_summary_footer(
            &table,
            3,
            &[
                ("COMMITTED", format_whole_money(s.committed, &symbol)),
                ("(+) INDEXATION", format_whole_money(s.indexation, &symbol)),
                ("(-) PAID", format_whole_money(s.paid, &symbol)),
                ("(=) BALANCE", format_whole_money(s.balance, &symbol)),
            ],
        ),
        None => table,
    };
    println!("{table}");

    Ok(())
}

/// Show totals per unit
fn cmd_summary(dir: &Path, project: Option<&str>, json: bool) -> Result<()> {
    let (settings, project_id) = open_project(dir, project)?;
    let inputs = load_plan_inputs(dir, &settings, &project_id)?;
    let summary = inputs.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if summary.is_empty() {
        println!("No units for project '{project_id}'.");
        return Ok(());
    }

    let installments = inputs.installments.len();
    let rows: Vec<SummaryRow> = summary
        .iter()
        .map(|s| SummaryRow {
            unit: s.label.clone(),
            committed: format_whole_money(s.committed, &s.currency_symbol),
            indexation: format_whole_money(s.indexation, &s.currency_symbol),
            paid: format_whole_money(s.paid, &s.currency_symbol),
            balance: format_whole_money(s.balance, &s.currency_symbol),
            paid_installments: format!("{}/{}", s.paid_installments, installments),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Report every validation issue in the project's data
fn cmd_check(dir: &Path, project: Option<&str>) -> Result<()> {
    let (settings, project_id) = open_project(dir, project)?;
    let inputs = load_plan_inputs(dir, &settings, &project_id)?;
    let issues = inputs.issues();

    if issues.is_empty() {
        println!("No issues found in project '{project_id}'.");
        return Ok(());
    }

    println!("Issues in project '{project_id}':");
    for issue in &issues {
        println!("  - {issue}");
    }
    Err(PlanError::ValidationFailed(issues.len()))
}

struct NewPayment {
    amount: Decimal,
    installment: u32,
    unit: Option<String>,
    client: Option<String>,
    currency: Option<String>,
    rate: Option<Decimal>,
    date: Option<String>,
}

/// Record a payment against an installment
fn cmd_add_payment(dir: &Path, project: Option<&str>, new: NewPayment) -> Result<()> {
    let (settings, project_id) = open_project(dir, project)?;

    if new.amount <= Decimal::ZERO {
        return Err(PlanError::InvalidPaymentAmount);
    }
    if new.rate.is_some_and(|r| r <= Decimal::ZERO) {
        return Err(PlanError::InvalidExchangeRate);
    }

    let inputs = load_plan_inputs(dir, &settings, &project_id)?;

    if !inputs.installments.iter().any(|i| i.number == new.installment) {
        return Err(PlanError::InstallmentNotFound(new.installment));
    }

    let commitment = match (&new.unit, &new.client) {
        (Some(unit), _) => inputs
            .commitments
            .iter()
            .find(|c| c.unit.as_deref() == Some(unit.as_str()))
            .ok_or_else(|| PlanError::UnitNotFound(unit.clone()))?,
        (None, Some(client)) => inputs
            .commitments
            .iter()
            .find(|c| c.client_id == *client && c.unit.is_none())
            .or_else(|| inputs.commitments.iter().find(|c| c.client_id == *client))
            .ok_or_else(|| PlanError::ClientNotFound(client.clone()))?,
        (None, None) => return Err(PlanError::MissingPayer),
    };

    let date = match new.date {
        Some(s) => parse_date(&s)?,
        None => chrono::Local::now().date_naive(),
    };

    let payment = Payment {
        project_id: project_id.clone(),
        // A labelled commitment only sees payments carrying its unit
        unit: commitment.unit.clone(),
        client_id: commitment.client_id.clone(),
        installment_number: new.installment,
        amount: Some(new.amount),
        currency_id: new.currency.or_else(|| commitment.currency_id.clone()),
        exchange_rate: new.rate,
        date: Some(date),
    };
    let payer = commitment.label().to_string();
    let commitment_id = commitment.id.clone();

    save_payment(dir, payment)?;
    info!(payer = %payer, installment = new.installment, "recorded payment");

    // Recompute from disk so the reported balance reflects the stored data
    let inputs = load_plan_inputs(dir, &settings, &project_id)?;
    let (col, _) = inputs
        .find_commitment(&commitment_id)
        .ok_or_else(|| PlanError::UnitNotFound(commitment_id.clone()))?;
    let grid = inputs.grid();
    let cell = inputs
        .installments
        .iter()
        .position(|i| i.number == new.installment)
        .and_then(|row| grid.get(row))
        .and_then(|row| row.get(col));

    println!(
        "Recorded {} payment for {} on installment {}",
        format_grouped(new.amount),
        payer,
        new.installment
    );
    if let Some(cell) = cell {
        println!(
            "  Balance after installment {}: {}",
            new.installment,
            format_whole_money(cell.balance, &cell.commitment_currency.symbol)
        );
    }

    Ok(())
}

/// Append the next installment
fn cmd_add_installment(
    dir: &Path,
    project: Option<&str>,
    date: &str,
    index: Option<Decimal>,
) -> Result<()> {
    let (settings, project_id) = open_project(dir, project)?;
    let date = parse_date(date)?;

    let existing = load_installments(dir, &project_id, &settings.organization.id)?;
    let last = existing.iter().map(|i| i.number).max().unwrap_or(0);
    let number = last
        .checked_add(1)
        .ok_or(PlanError::InstallmentNumberOverflow(last))?;

    let installment = Installment {
        id: format!("{project_id}-{number}"),
        project_id: project_id.clone(),
        organization_id: settings.organization.id.clone(),
        date,
        number,
        index_reference: index,
        created_at: Some(Utc::now()),
    };

    save_installment(dir, installment)?;
    info!(project = %project_id, number, "added installment");

    println!(
        "Added installment {} ({}, index {})",
        number,
        date,
        format_index(index)
    );

    Ok(())
}

/// Show data directory and project overview
fn cmd_status(dir: &Path, project: Option<&str>) -> Result<()> {
    let (settings, project_id) = open_project(dir, project)?;
    let inputs = load_plan_inputs(dir, &settings, &project_id)?;

    let project_name = settings
        .projects
        .get(&project_id)
        .map(|p| p.name.clone())
        .unwrap_or_default();

    println!("Plan Status");
    println!("{}", "-".repeat(50));
    println!("Data directory: {}", dir.display());
    println!("Organization:   {}", settings.organization.name);
    println!("Project:        {} ({})", project_name, project_id);
    println!("Installments:   {}", inputs.installments.len());
    println!("Units:          {}", inputs.commitments.len());
    println!("Payments:       {}", inputs.payments.len());

    if let Some(last) = inputs.installments.last() {
        println!("Last due date:  {}", last.date);
    }

    let issues = inputs.issues();
    if !issues.is_empty() {
        println!();
        println!("{} issue(s) found, run 'indexplan check' for details", issues.len());
    }

    let grid = inputs.grid();
    if let Some(last_row) = grid.last() {
        let symbol = &settings.display.currency_symbol;
        let outstanding: Decimal = last_row
            .iter()
            .map(|cell| cell.balance.saturating_mul(cell.commitment_currency.exchange_rate))
            .fold(Decimal::ZERO, Decimal::saturating_add);
        println!();
        println!(
            "Outstanding after last installment: {}",
            format_whole_money(outstanding, symbol)
        );
    }

    Ok(())
}
