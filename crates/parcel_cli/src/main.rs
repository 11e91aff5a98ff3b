//! Command-line front end for the parcel store.
//!
//! # Responsibility
//! - Map subcommands onto single `ParcelStore` calls.
//! - Treat store construction failure as a fatal startup error.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use parcel_core::db::open_db;
use parcel_core::{
    ClientId, LoggingConfig, MutationOutcome, Parcel, ParcelNumber, ParcelStatus, ParcelStore,
    SqliteParcelStore,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "parcel", version, about = "Track parcels through delivery")]
struct Cli {
    /// SQLite database file; created on first use.
    #[arg(long, env = "PARCEL_DB_PATH", default_value = "tracker.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register a new parcel and print its number.
    Add {
        #[arg(long)]
        client: ClientId,
        #[arg(long)]
        address: String,
        /// Defaults to the current UTC time (RFC 3339).
        #[arg(long)]
        created_at: Option<String>,
    },
    /// Print one parcel as JSON.
    Get { number: ParcelNumber },
    /// Print all parcels of a client as JSON.
    List {
        #[arg(long)]
        client: ClientId,
    },
    /// Overwrite a parcel's status.
    SetStatus {
        number: ParcelNumber,
        status: ParcelStatus,
    },
    /// Change the address of a registered parcel.
    SetAddress { number: ParcelNumber, address: String },
    /// Delete a registered parcel.
    Delete { number: ParcelNumber },
    /// Walk a sample client through the full parcel lifecycle.
    Demo {
        #[arg(long, default_value_t = 1)]
        client: ClientId,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::from_env()
        .init()
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
    let store = SqliteParcelStore::try_new(&conn).context("failed to initialize parcel store")?;

    run(&store, cli.command)
}

fn run(store: &impl ParcelStore, command: Command) -> Result<()> {
    match command {
        Command::Add {
            client,
            address,
            created_at,
        } => {
            let created_at = created_at.unwrap_or_else(now_rfc3339);
            let number = store.add(&Parcel::registered(client, address, created_at))?;
            println!("{number}");
        }
        Command::Get { number } => {
            let parcel = store.get(number)?;
            println!("{}", serde_json::to_string_pretty(&parcel)?);
        }
        Command::List { client } => {
            let parcels = store.get_by_client(client)?;
            println!("{}", serde_json::to_string_pretty(&parcels)?);
        }
        Command::SetStatus { number, status } => {
            report(store.set_status(number, status.as_str())?, "status changed");
        }
        Command::SetAddress { number, address } => {
            report(store.set_address(number, &address)?, "address changed");
        }
        Command::Delete { number } => {
            report(store.delete(number)?, "deleted");
        }
        Command::Demo { client } => demo(store, client)?,
    }

    Ok(())
}

fn report(outcome: MutationOutcome, applied_message: &str) {
    if outcome.is_applied() {
        println!("{applied_message}");
    } else {
        println!("no change: parcel is missing or no longer registered");
    }
}

fn demo(store: &impl ParcelStore, client: ClientId) -> Result<()> {
    let parcel = Parcel::registered(client, "Pskov, d. Pushkina, 72", now_rfc3339());

    let number = store.add(&parcel).context("failed to add parcel")?;
    info!("event=demo_add module=cli status=ok number={number} client={client}");
    println!(
        "registered parcel #{number} for client {client} at {} ({})",
        parcel.address, parcel.created_at
    );

    let new_address = "Saratov, d. Verkhnaya, 25";
    store.set_address(number, new_address)?;
    println!("parcel #{number}: address changed to {new_address}");

    store.set_status(number, ParcelStatus::Sent.as_str())?;
    println!("parcel #{number}: status changed to {}", ParcelStatus::Sent);

    let refused = store.set_address(number, "Moscow, d. Tverskaya, 1")?;
    let current = store.get(number)?;
    println!(
        "parcel #{number}: address change after dispatch {}; address is still {}",
        if refused.is_applied() {
            "applied"
        } else {
            "refused"
        },
        current.address
    );

    let second = store.add(&Parcel::registered(
        client,
        "Kazan, d. Baumana, 10",
        now_rfc3339(),
    ))?;
    println!("registered parcel #{second}");

    store.delete(second)?;
    println!("parcel #{second}: deleted");

    let remaining = store.get_by_client(client)?;
    println!("client {client} parcels:");
    for parcel in &remaining {
        println!(
            "  #{} {} {} {}",
            parcel.number, parcel.status, parcel.address, parcel.created_at
        );
    }

    Ok(())
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
