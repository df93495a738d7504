//! Finance front-end - command line entry point
//!
//! Loads one page from the REST API and prints it, or registers a payment.
//!
//! # Usage
//!
//! ```text
//! finance_frontend accounts|categories|subcategories|transactions [FILTER]
//! finance_frontend health
//! finance_frontend pay TRANSACTION_ID
//! finance_frontend delete accounts|categories|subcategories|transactions ID
//! ```
//!
//! # Startup Flow
//!
//! 1. Initialize logging
//! 2. Load configuration from environment variables
//! 3. Build the application context (HTTP client, gateways)
//! 4. Run the requested command against a fresh page

use std::sync::Arc;

use anyhow::{Context, bail};
use tracing_subscriber::EnvFilter;

use finance_frontend::controller::{LogNotifier, ResourceController, TerminalConfirm};
use finance_frontend::models::{Resource, TransactionKind};
use finance_frontend::{AppContext, Config};

const USAGE: &str = "usage: finance_frontend <accounts|categories|subcategories|transactions> [FILTER]\n       \
                     finance_frontend health\n       \
                     finance_frontend pay <TRANSACTION_ID>\n       \
                     finance_frontend delete <page> <ID>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let app = AppContext::new(config, Arc::new(LogNotifier), Arc::new(TerminalConfirm))?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("transactions");
    let argument = args.get(1).map(String::as_str);

    match command {
        "accounts" => {
            let page = app.account_page();
            page.load_all().await?;
            for account in page.filter(argument.unwrap_or("")).await {
                println!("{:>5}  {:<30} {:>12}", account.id, account.description, account.balance);
            }
        }
        "categories" => {
            let page = app.category_page();
            page.load_all().await?;
            for category in page.filter(argument.unwrap_or("")).await {
                println!("{:>5}  {:<30} {}", category.id, category.name, category.description);
            }
        }
        "subcategories" => {
            let page = app.subcategory_page();
            page.load_all().await?;
            let references = page.references().await;
            for sub in page.filter(argument.unwrap_or("")).await {
                println!(
                    "{:>5}  {:<30} {:<20} {}",
                    sub.id,
                    sub.name,
                    references.category_name(sub.category_id),
                    sub.description
                );
            }
        }
        "transactions" => {
            let page = app.transaction_page();
            page.load_all().await?;
            let references = page.references().await;
            for tx in page.filter(argument.unwrap_or("")).await {
                let sign = match tx.kind {
                    TransactionKind::Income => "+",
                    TransactionKind::Expense => "-",
                };
                println!(
                    "{:>5}  {:<24} {}{:>11}  {:<16} {:<16} {}",
                    tx.id,
                    tx.name,
                    sign,
                    tx.amount,
                    references.category_name(tx.category_id),
                    references.account_name(tx.account_id),
                    if tx.is_paid() { "paid" } else { "pending" }
                );
            }
            let totals = page.totals().await;
            println!(
                "income {}  expenses {}  balance {}",
                totals.income, totals.expenses, totals.balance
            );
        }
        "health" => {
            let page = app.transaction_page();
            page.load_all().await?;
            let report = page.health().await;
            println!(
                "{} ({:.1}): {}",
                report.status.label(),
                report.total_score,
                report.status.advice()
            );
            for (category, amount) in page.expenses_by_category().await {
                println!("  {:<24} {:>12}", category, amount.round_dp(2));
            }
        }
        "pay" => {
            let id: i64 = argument
                .context("missing transaction id")?
                .parse()
                .context("transaction id must be a number")?;
            let page = app.transaction_page();
            page.load_all().await?;
            let transaction = page
                .items()
                .await
                .into_iter()
                .find(|tx| tx.id == id)
                .with_context(|| format!("transaction {} not found", id))?;

            let today = chrono::Local::now().date_naive();
            let draft = page.open_payment(&transaction, today).await?;
            tracing::info!(id, amount = %draft.paid_amount, "registering payment");
            page.confirm_payment().await?;
        }
        "delete" => {
            let id: i64 = args
                .get(2)
                .context("missing id")?
                .parse()
                .context("id must be a number")?;
            match argument {
                Some("accounts") => delete(&app.account_page(), id).await?,
                Some("categories") => delete(&app.category_page(), id).await?,
                Some("subcategories") => delete(&app.subcategory_page(), id).await?,
                Some("transactions") => delete(&*app.transaction_page(), id).await?,
                _ => bail!(USAGE),
            }
        }
        _ => bail!(USAGE),
    }

    Ok(())
}

/// Load the page so the deletion reloads a populated list, then delete with confirmation.
async fn delete<R: Resource>(page: &ResourceController<R>, id: i64) -> anyhow::Result<()> {
    page.load_all().await?;
    let outcome = page.remove(id).await?;
    tracing::info!(id, ?outcome, "delete finished");
    Ok(())
}
