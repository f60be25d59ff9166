//! Headless mode execution
//!
//! One-shot subcommands that call the API once (or a few times), print the result and exit.
//! Form input goes through the same validation rules as the dashboard modals.

use super::{SessionData, messages::print_operation_success};
use crate::api::error::ApiError;
use crate::api::{DashboardApi, fallback};
use crate::dashboard::view::{self, format_inr, format_optional_inr};
use crate::forms::patterns::parse_date;
use crate::forms::{FormSnapshot, add_due, credit_assessment, payment};
use crate::models::{
    AssessmentState, DashboardStats, Due, DueStatus, DueUpdate, Identity, NewTransaction, Role,
    Transaction,
};
use crate::pretty::{print_cmd_error, print_cmd_info};
use chrono::{Local, NaiveDate};
use clap::Subcommand;
use std::error::Error;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum HeadlessCommand {
    /// Print the dashboard stats for the signed-in role
    Stats,
    /// List, inspect and change dues
    #[command(subcommand)]
    Dues(DuesCommand),
    /// List or record transactions
    #[command(subcommand)]
    Transactions(TransactionsCommand),
    /// Find retailers to raise dues against
    #[command(subcommand)]
    Retailers(RetailersCommand),
    /// Request a credit assessment or check its status
    #[command(subcommand)]
    CreditAssessment(AssessmentCommand),
}

#[derive(Subcommand, Debug)]
pub enum DuesCommand {
    /// List the dues visible to you
    List,
    /// Show one due
    Show { id: String },
    /// Raise a due against a retailer (suppliers)
    Create {
        /// ID of the retailer who owes the amount
        #[arg(long)]
        retailer: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        description: String,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        purchase_date: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        due_date: String,
    },
    /// Pay a due (retailers)
    Pay {
        id: String,
        /// Defaults to the full amount of the due
        #[arg(long)]
        amount: Option<String>,
        #[arg(long, default_value = "upi", value_parser = payment::PAYMENT_METHODS.to_vec())]
        method: String,
        #[arg(long)]
        reference: Option<String>,
    },
    /// Change the status of a due
    Update {
        id: String,
        #[arg(long, value_enum)]
        status: DueStatus,
    },
    /// Delete a due
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TransactionsCommand {
    /// List transactions
    List {
        /// Only the ten most recent ones
        #[arg(long)]
        history: bool,
    },
    /// Record a transaction, optionally with an invoice file
    Create {
        /// ID of the retailer
        #[arg(long)]
        retailer: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        description: String,
        #[arg(long)]
        invoice_number: Option<String>,
        /// YYYY-MM-DD
        #[arg(long, value_parser = parse_date_arg)]
        due_date: NaiveDate,
        #[arg(long)]
        invoice_file: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum RetailersCommand {
    /// List retailers, or search them by name
    List {
        #[arg(long)]
        query: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AssessmentCommand {
    /// Submit the assessment form from a JSON file of field values
    Request {
        #[arg(long)]
        file: PathBuf,
    },
    /// Show the status of your latest assessment
    Status,
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value.trim()).ok_or_else(|| "use the YYYY-MM-DD format".to_string())
}

/// Prints the user-facing message for `error` and returns it as the command's error.
fn api_failure(error: ApiError, fallback: &str) -> Box<dyn Error> {
    let message = error.display_message(fallback);
    log::warn!("{}: {}", fallback, error);
    print_cmd_error!(message);
    Box::from(message)
}

fn require_role(identity: &Identity, allowed: &[Role], action: &str) -> Result<(), Box<dyn Error>> {
    if allowed.contains(&identity.role) {
        return Ok(());
    }
    let message = format!("Only {} accounts can {}.", allowed[0], action);
    print_cmd_error!(message);
    Err(Box::from(message))
}

/// Runs one headless command for the signed-in user.
pub async fn run_headless_mode(
    session: SessionData,
    command: HeadlessCommand,
) -> Result<(), Box<dyn Error>> {
    let identity = session.require_identity()?;
    run_command(session.api.as_ref(), &identity, command).await
}

async fn run_command(
    api: &dyn DashboardApi,
    identity: &Identity,
    command: HeadlessCommand,
) -> Result<(), Box<dyn Error>> {
    match command {
        HeadlessCommand::Stats => stats(api, identity).await,
        HeadlessCommand::Dues(command) => dues(api, identity, command).await,
        HeadlessCommand::Transactions(command) => transactions(api, identity, command).await,
        HeadlessCommand::Retailers(RetailersCommand::List { query }) => {
            retailers(api, query.as_deref()).await
        }
        HeadlessCommand::CreditAssessment(command) => assessment(api, identity, command).await,
    }
}

async fn stats(api: &dyn DashboardApi, identity: &Identity) -> Result<(), Box<dyn Error>> {
    let stats = api
        .get_dashboard_stats()
        .await
        .map_err(|e| api_failure(e, fallback::LOAD_DASHBOARD))?;
    for (label, value) in stat_lines(&stats, identity.role) {
        println!("{:<20} {}", label, value);
    }
    Ok(())
}

fn stat_lines(stats: &DashboardStats, role: Role) -> Vec<(&'static str, String)> {
    match role {
        Role::Supplier | Role::Admin => vec![
            ("Total outstanding", format_optional_inr(stats.total_outstanding)),
            (
                "Active retailers",
                stats
                    .active_retailers
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
            ),
            ("Monthly sales", format_optional_inr(stats.monthly_sales)),
            ("Overdue amount", format_optional_inr(stats.overdue_amount)),
        ],
        Role::Retailer => {
            let utilization = stats
                .credit_limit
                .and_then(|limit| {
                    view::credit_utilization(limit, stats.available_credit.unwrap_or(0.0))
                })
                .map(|u| u.label())
                .unwrap_or_else(|| "N/A".to_string());
            vec![
                ("Total due", format_optional_inr(stats.total_due)),
                ("Due today", format_optional_inr(stats.due_today)),
                ("Overdue amount", format_optional_inr(stats.overdue_amount)),
                ("Credit limit", format_optional_inr(stats.credit_limit)),
                ("Available credit", format_optional_inr(stats.available_credit)),
                ("Credit utilization", utilization),
                (
                    "Credit score",
                    stats
                        .credit_score
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "N/A".to_string()),
                ),
            ]
        }
    }
}

fn due_line(due: &Due, viewer: Role) -> String {
    let counterparty = match viewer {
        Role::Retailer => due.supplier_display_name(),
        Role::Supplier | Role::Admin => due.retailer_display_name(),
    };
    format!(
        "{:>6}  {:<24} {:>14}  due {}  {:<8} {}",
        due.id,
        counterparty,
        format_inr(due.amount),
        due.due_date,
        due.status.label(),
        due.description
    )
}

fn transaction_line(transaction: &Transaction, viewer: Role) -> String {
    format!(
        "{:>6}  {}  {:<24} {:>14}  {:<9} {}",
        transaction.id,
        transaction.created_on().unwrap_or("----------"),
        transaction.counterparty_name(viewer != Role::Retailer),
        format_inr(transaction.amount),
        transaction.status,
        transaction.description
    )
}

/// Validates `values` with the form's rules and prints every field error.
fn validate(
    rules: &crate::forms::RuleSet,
    values: &FormSnapshot,
) -> Result<FormSnapshot, Box<dyn Error>> {
    match rules.validate(values) {
        Ok(()) => Ok(rules.visible_only(values)),
        Err(errors) => {
            for (field, message) in errors.iter() {
                print_cmd_error!("Invalid input", "  {}: {}", field, message);
            }
            Err(Box::new(errors))
        }
    }
}

async fn dues(
    api: &dyn DashboardApi,
    identity: &Identity,
    command: DuesCommand,
) -> Result<(), Box<dyn Error>> {
    match command {
        DuesCommand::List => {
            let dues = api
                .list_dues()
                .await
                .map_err(|e| api_failure(e, fallback::FETCH_DUES))?;
            if dues.is_empty() {
                print_cmd_info!("No dues found.");
            }
            for due in &dues {
                println!("{}", due_line(due, identity.role));
            }
        }
        DuesCommand::Show { id } => {
            let due = api
                .get_due(&id)
                .await
                .map_err(|e| api_failure(e, fallback::FETCH_DUE))?;
            println!("{}", due_line(&due, identity.role));
            println!("  purchased {}", due.purchase_date);
            if let Some(contact) = due.retailer_contact() {
                println!("  contact   {}", contact);
            }
            let overdue_days = due.days_past_due(Local::now().date_naive());
            if due.is_outstanding() && overdue_days > 0 {
                println!("  {} days overdue", overdue_days);
            }
        }
        DuesCommand::Create {
            retailer,
            amount,
            description,
            purchase_date,
            due_date,
        } => {
            require_role(identity, &[Role::Supplier, Role::Admin], "raise dues")?;
            let purchase_date = purchase_date
                .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());
            let values = FormSnapshot::new()
                .with("retailer", retailer)
                .with("amount", amount)
                .with("description", description)
                .with("purchase_date", purchase_date)
                .with("due_date", due_date);
            let values = validate(&add_due::rules(), &values)?;
            let data = add_due::build(&values)?;
            let due = api
                .create_due(&data)
                .await
                .map_err(|e| api_failure(e, fallback::CREATE_DUE))?;
            print_operation_success(format!(
                "Due {} of {} created",
                due.id,
                format_inr(due.amount)
            ));
        }
        DuesCommand::Pay {
            id,
            amount,
            method,
            reference,
        } => {
            require_role(identity, &[Role::Retailer], "pay dues")?;
            let amount = match amount {
                Some(amount) => amount,
                None => {
                    let due = api
                        .get_due(&id)
                        .await
                        .map_err(|e| api_failure(e, fallback::FETCH_DUE))?;
                    format!("{:.2}", due.amount)
                }
            };
            let mut values = FormSnapshot::new()
                .with("due", id)
                .with("amount", amount)
                .with("payment_method", method);
            if let Some(reference) = reference {
                values.set("reference_id", reference);
            }
            let values = validate(&payment::rules(), &values)?;
            let (due_id, request) = payment::build(&values)?;
            let receipt = api
                .pay_due(&due_id, &request)
                .await
                .map_err(|e| api_failure(e, fallback::MAKE_PAYMENT))?;
            print_operation_success(receipt.summary());
        }
        DuesCommand::Update { id, status } => {
            let update = DueUpdate {
                status: Some(status),
                ..DueUpdate::default()
            };
            let due = api
                .update_due(&id, &update)
                .await
                .map_err(|e| api_failure(e, fallback::UPDATE_DUE))?;
            print_operation_success(format!("Due {} is now {}", due.id, due.status.label()));
        }
        DuesCommand::Delete { id } => {
            api.delete_due(&id)
                .await
                .map_err(|e| api_failure(e, fallback::DELETE_DUE))?;
            print_operation_success(format!("Due {} deleted", id));
        }
    }
    Ok(())
}

async fn transactions(
    api: &dyn DashboardApi,
    identity: &Identity,
    command: TransactionsCommand,
) -> Result<(), Box<dyn Error>> {
    match command {
        TransactionsCommand::List { history } => {
            let result = if history {
                api.transaction_history().await
            } else {
                api.list_transactions().await
            };
            let transactions = result.map_err(|e| api_failure(e, fallback::FETCH_TRANSACTIONS))?;
            if transactions.is_empty() {
                print_cmd_info!("No transactions found.");
            }
            for transaction in &transactions {
                println!("{}", transaction_line(transaction, identity.role));
            }
        }
        TransactionsCommand::Create {
            retailer,
            amount,
            description,
            invoice_number,
            due_date,
            invoice_file,
        } => {
            if !(amount > 0.0) {
                let message = "Amount must be greater than zero";
                print_cmd_error!(message);
                return Err(Box::from(message));
            }
            let data = NewTransaction {
                retailer_id: retailer,
                amount,
                description,
                invoice_number,
                due_date,
                invoice_file,
            };
            let transaction = api
                .create_transaction(&data)
                .await
                .map_err(|e| api_failure(e, fallback::CREATE_TRANSACTION))?;
            print_operation_success(format!(
                "Transaction {} of {} recorded",
                transaction.id,
                format_inr(transaction.amount)
            ));
        }
    }
    Ok(())
}

async fn retailers(api: &dyn DashboardApi, query: Option<&str>) -> Result<(), Box<dyn Error>> {
    let result = match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => api.search_retailers(query).await,
        None => api.list_retailers().await,
    };
    let retailers = result.map_err(|e| api_failure(e, fallback::FETCH_RETAILERS))?;
    if retailers.is_empty() {
        print_cmd_info!("No retailers found.");
    }
    for retailer in &retailers {
        println!(
            "{:>6}  {:<32} {}",
            retailer.id,
            retailer.business_name,
            retailer.phone.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

async fn assessment(
    api: &dyn DashboardApi,
    identity: &Identity,
    command: AssessmentCommand,
) -> Result<(), Box<dyn Error>> {
    match command {
        AssessmentCommand::Status => {
            let status = api
                .credit_assessment_status()
                .await
                .map_err(|e| api_failure(e, fallback::ASSESSMENT_STATUS))?;
            println!("{:<14} {}", "Status", status.status);
            if let Some(score) = status.credit_score {
                println!("{:<14} {}", "Credit score", score);
            }
            if let Some(limit) = status.credit_limit {
                println!("{:<14} {}", "Credit limit", format_inr(limit));
            }
            if let Some(date) = &status.assessment_date {
                println!("{:<14} {}", "Assessed on", date);
            }
            if let Some(message) = &status.message {
                println!("{}", message);
            }
        }
        AssessmentCommand::Request { file } => {
            require_role(identity, &[Role::Retailer], "request a credit assessment")?;
            let raw = std::fs::read(&file)
                .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
            let json: serde_json::Value = serde_json::from_slice(&raw)?;
            let values = FormSnapshot::from_json(&json)?;
            let values = validate(&credit_assessment::rules(), &values)?;
            let data = credit_assessment::build(&values)?;

            let current = api
                .credit_assessment_status()
                .await
                .map_err(|e| api_failure(e, fallback::ASSESSMENT_STATUS))?;
            if current.status == AssessmentState::Pending {
                let message = "A credit assessment is already under review";
                print_cmd_error!(message);
                return Err(Box::from(message));
            }

            api.request_credit_assessment(&data)
                .await
                .map_err(|e| api_failure(e, fallback::SUBMIT_ASSESSMENT))?;
            print_operation_success("Credit assessment submitted");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{self, FakeApi};
    use crate::models::PaymentMethod;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_due(amount: &str, due_date: &str) -> HeadlessCommand {
        HeadlessCommand::Dues(DuesCommand::Create {
            retailer: "7".to_string(),
            amount: amount.to_string(),
            description: "Rice".to_string(),
            purchase_date: Some("2024-03-01".to_string()),
            due_date: due_date.to_string(),
        })
    }

    #[tokio::test]
    async fn create_due_goes_through_form_validation() {
        let api = FakeApi::default();
        let supplier = fake::supplier();

        let err = run_command(&api, &supplier, create_due("0", "2024-03-31"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Amount must be at least 0.01"));
        let err = run_command(&api, &supplier, create_due("10", "2024-02-01"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("before the purchase date"));
        assert_eq!(api.calls("create_due"), 0);

        run_command(&api, &supplier, create_due("1200.50", "2024-03-31"))
            .await
            .unwrap();
        let created = api.created_dues.lock().unwrap();
        assert_eq!(created[0].retailer, "7");
        assert_eq!(created[0].amount, 1200.5);
    }

    #[tokio::test]
    async fn retailers_cannot_raise_dues() {
        let api = FakeApi::default();
        let result = run_command(
            &api,
            &fake::retailer_identity(),
            create_due("10", "2024-03-31"),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(api.calls("create_due"), 0);
    }

    #[tokio::test]
    async fn pay_defaults_to_the_full_amount() {
        let api = FakeApi::default();
        let command = HeadlessCommand::Dues(DuesCommand::Pay {
            id: "1".to_string(),
            amount: None,
            method: "cheque".to_string(),
            reference: Some("CHQ-118".to_string()),
        });
        run_command(&api, &fake::retailer_identity(), command)
            .await
            .unwrap();

        let payments = api.payments.lock().unwrap();
        assert_eq!(payments[0].0, "1");
        assert_eq!(payments[0].1.amount, 500.0);
        assert_eq!(payments[0].1.payment_method, PaymentMethod::Cheque);
        assert_eq!(payments[0].1.reference_id.as_deref(), Some("CHQ-118"));
    }

    #[tokio::test]
    async fn server_error_text_is_returned() {
        let api = FakeApi::default();
        api.fail("list_dues", "Session expired");
        let err = run_command(
            &api,
            &fake::supplier(),
            HeadlessCommand::Dues(DuesCommand::List),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Session expired");

        api.fail("delete_due", "");
        let err = run_command(
            &api,
            &fake::supplier(),
            HeadlessCommand::Dues(DuesCommand::Delete { id: "1".to_string() }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), fallback::DELETE_DUE);
    }

    #[tokio::test]
    async fn update_sets_the_status() {
        let api = FakeApi::default();
        let command = HeadlessCommand::Dues(DuesCommand::Update {
            id: "1".to_string(),
            status: DueStatus::Overdue,
        });
        run_command(&api, &fake::supplier(), command).await.unwrap();
        assert_eq!(api.dues.lock().unwrap()[0].status, DueStatus::Overdue);
    }

    #[tokio::test]
    async fn history_flag_selects_the_endpoint() {
        let api = FakeApi::default();
        let list = |history| HeadlessCommand::Transactions(TransactionsCommand::List { history });
        run_command(&api, &fake::supplier(), list(true)).await.unwrap();
        run_command(&api, &fake::supplier(), list(false)).await.unwrap();
        assert_eq!(api.calls("transaction_history"), 1);
        assert_eq!(api.calls("list_transactions"), 1);
    }

    #[tokio::test]
    async fn query_searches_on_the_server() {
        let api = FakeApi::default();
        let list = |query: Option<&str>| {
            HeadlessCommand::Retailers(RetailersCommand::List {
                query: query.map(str::to_owned),
            })
        };
        run_command(&api, &fake::supplier(), list(Some("sharma")))
            .await
            .unwrap();
        run_command(&api, &fake::supplier(), list(Some("  ")))
            .await
            .unwrap();
        assert_eq!(api.calls("search_retailers"), 1);
        assert_eq!(api.calls("list_retailers"), 1);
    }

    #[tokio::test]
    async fn assessment_request_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "businessType": "retail_store",
                "yearsInBusiness": 6,
                "annualTurnover": 2400000,
                "employeeCount": 4,
                "shopOwnership": "owned",
                "monthlyRent": 15000,
                "bankAccountNumber": "123456789012",
                "ifscCode": "HDFC0001234",
                "bankName": "HDFC Bank",
                "bankBranch": "Andheri",
                "existingLoans": false
            }}"#
        )
        .unwrap();

        let api = FakeApi::default();
        let request = || {
            HeadlessCommand::CreditAssessment(AssessmentCommand::Request {
                file: file.path().to_path_buf(),
            })
        };
        run_command(&api, &fake::retailer_identity(), request())
            .await
            .unwrap();
        let sent = api.assessments.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].years_in_business, 6);
        // Rent is hidden for owned shops, so it is not sent.
        assert_eq!(sent[0].monthly_rent, None);

        // The first request is now under review.
        assert!(
            run_command(&api, &fake::retailer_identity(), request())
                .await
                .is_err()
        );
        assert_eq!(api.calls("request_credit_assessment"), 1);
    }

    #[test]
    fn retailer_stats_include_utilization() {
        let stats = DashboardStats {
            credit_limit: Some(10000.0),
            available_credit: Some(8000.0),
            ..DashboardStats::default()
        };
        let lines = stat_lines(&stats, Role::Retailer);
        assert!(lines.contains(&("Credit utilization", "20.0%".to_string())));
        assert!(lines.contains(&("Credit limit", "₹10,000.00".to_string())));
    }

    #[test]
    fn date_arguments_are_checked() {
        assert!(parse_date_arg("2024-03-31").is_ok());
        assert!(parse_date_arg("31/03/2024").is_err());
    }
}
