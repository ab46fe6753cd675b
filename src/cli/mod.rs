//! CLI layer - the order desk as `decor-orders` subcommands.
//!
//! Parsing lives here; [`commands`] holds the handlers, which only see an
//! [`OrderBackend`](crate::api::OrderBackend).

/// Backend-agnostic command handlers
pub mod commands;

use crate::{
    api::ApiClient,
    config::{AppConfig, Credentials, YASH_HOME_DECORS},
    core::InvoiceDocument,
    errors::Result,
    export::{DirectoryDownloads, FilePreviewFactory, PdfExporter, PrintOutcome, PrintSink},
};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use commands::OrderInput;
use std::path::PathBuf;
use tracing::{error, info};

/// Parsed command line.
#[derive(Debug, Parser)]
#[command(name = "decor-orders", version, about = "Order desk for a home-furnishings shop")]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Order desk subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List customers, optionally filtered by name or email prefix
    Customers {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one customer's record
    Customer {
        id: String,
    },
    /// List product categories and their form fields
    Categories,
    /// Capture an order and submit it
    Order {
        customer_id: String,
        /// Category name, e.g. "Blinds"
        category: String,
        /// Form values as field=value
        #[arg(value_parser = parse_key_value)]
        fields: Vec<(String, String)>,
        /// Image for the category's image column
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Assemble a customer's invoice
    Invoice {
        customer_id: String,
        /// Send the invoice to the printer
        #[arg(long)]
        print: bool,
        /// Download the invoice as PDF
        #[arg(long)]
        pdf: bool,
        /// Issue date (YYYY-MM-DD), today if omitted
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Runs one parsed command against the configured backend.
///
/// # Errors
/// Propagates handler and export errors; they are also logged.
pub async fn run(cli: Cli, config: &AppConfig, credentials: Option<Credentials>) -> Result<()> {
    let client = ApiClient::new(&config.api, credentials)?;

    match cli.command {
        Command::Customers { search } => {
            print!("{}", commands::list_customers(&client, search.as_deref()).await?);
        }
        Command::Customer { id } => {
            print!("{}", commands::show_customer(&client, &id).await?);
        }
        Command::Categories => print!("{}", commands::list_categories()),
        Command::Order {
            customer_id,
            category,
            fields,
            image,
        } => {
            let order = commands::place_order(
                &client,
                &customer_id,
                &category,
                OrderInput { fields, image },
            )
            .await?;
            println!("✅ {} order saved for {}", order.category, order.customer_name);
        }
        Command::Invoice {
            customer_id,
            print,
            pdf,
            date,
        } => {
            let issued_on = date.unwrap_or_else(|| Local::now().date_naive());
            let document =
                commands::build_invoice(&client, &customer_id, &YASH_HOME_DECORS, issued_on)
                    .await?;
            deliver(&document, config, &client, print, pdf).await?;
        }
    }

    Ok(())
}

async fn deliver(
    document: &InvoiceDocument,
    config: &AppConfig,
    client: &ApiClient,
    print: bool,
    pdf: bool,
) -> Result<()> {
    if !print && !pdf {
        print!("{}", document.to_html()?);
        return Ok(());
    }

    if print {
        let factory = FilePreviewFactory::new(
            &config.export.output_dir,
            config.export.print_command.clone(),
        );
        let preview = factory.preview_path();
        let sink = PrintSink::new(factory, config.export.render_timeout());
        match sink.print(document).await? {
            PrintOutcome::Printed => println!("🖨️ Invoice sent to print ({})", preview.display()),
            PrintOutcome::Failed => println!(
                "❌ Printing failed; the preview is at {}",
                preview.display()
            ),
        }
    }

    if pdf {
        let exporter = PdfExporter::new(
            client.clone(),
            DirectoryDownloads::new(&config.export.output_dir),
        );
        let path = exporter
            .export(document)
            .await
            .inspect_err(|e| error!("PDF export failed: {}", e))?;
        info!("Saved {}", path.display());
        println!("📄 Invoice saved to {}", path.display());
    }

    Ok(())
}
