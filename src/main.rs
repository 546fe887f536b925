// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use powerdns_api::{
    api::{CryptokeySpec, KeyType, ObjectType, SearchQuery, ZoneKind},
    client::{PowerDnsClient, ZoneSetup, ZoneSetupOutcome},
    config::ClientConfig,
    constants::DEFAULT_SEARCH_MAX,
    records::Record,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Command line client for the PowerDNS HTTP API.
///
/// The server is configured with `PDNS_API_ENDPOINT` and `PDNS_API_KEY`, or
/// with a YAML file passed via `--config`.
#[derive(Debug, Parser)]
#[command(name = "pdnsctl", version, about)]
struct Cli {
    /// YAML file with `endpoint`, `api_key` and optional `timeout_secs`
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all zones
    Zones,
    /// Zone lifecycle
    #[command(subcommand)]
    Zone(ZoneCommand),
    /// Record set changes
    #[command(subcommand)]
    Records(RecordsCommand),
    /// Search the server
    Search {
        query: String,
        #[arg(long, default_value_t = DEFAULT_SEARCH_MAX)]
        max: u32,
        /// all, zone, record or comment
        #[arg(long, default_value = "record", value_parser = parse_object_type)]
        object_type: ObjectType,
    },
    /// DNSSEC keys
    #[command(subcommand)]
    Keys(KeysCommand),
}

#[derive(Debug, Subcommand)]
enum ZoneCommand {
    /// Show a zone with its record sets
    Get { zone: String },
    /// Create a zone
    Create {
        zone: String,
        /// Native, Master or Slave
        #[arg(long, default_value = "Native", value_parser = parse_zone_kind)]
        kind: ZoneKind,
    },
    /// Delete a zone
    Delete { zone: String },
    /// Create a zone with SOA, NS and a DNSSEC key
    Setup {
        zone: String,
        /// Nameserver, repeat for several; the first is the SOA primary
        #[arg(long = "nameserver", required = true)]
        nameservers: Vec<String>,
        #[arg(long)]
        hostmaster: String,
    },
}

#[derive(Debug, Args)]
struct RecordArgs {
    name: String,
    /// Record values
    content: Vec<String>,
    #[arg(long = "type", short = 't')]
    record_type: Option<String>,
    #[arg(long)]
    ttl: Option<u32>,
}

impl From<RecordArgs> for Record {
    fn from(args: RecordArgs) -> Self {
        Record {
            name: args.name,
            record_type: args.record_type,
            ttl: args.ttl,
            content: args.content,
        }
    }
}

#[derive(Debug, Subcommand)]
enum RecordsCommand {
    /// Replace a record set
    Set(RecordArgs),
    /// Add values to a record set
    Append(RecordArgs),
    /// Delete a record set
    Delete {
        name: String,
        #[arg(long = "type", short = 't')]
        record_type: Option<String>,
    },
    /// Find record sets containing a value
    Find {
        value: String,
        #[arg(long, conflicts_with = "global", required_unless_present = "global")]
        zone: Option<String>,
        /// Search every zone on the server
        #[arg(long)]
        global: bool,
    },
    /// Replace a value in every record set containing it
    Replace {
        find: String,
        replace: String,
        #[arg(long, conflicts_with = "global", required_unless_present = "global")]
        zone: Option<String>,
        /// Replace in every zone on the server
        #[arg(long)]
        global: bool,
    },
}

#[derive(Debug, Subcommand)]
enum KeysCommand {
    /// List the keys of a zone
    List { zone: String },
    /// Create a key
    Create {
        zone: String,
        /// ksk, zsk or csk
        #[arg(long, default_value = "ksk", value_parser = parse_key_type)]
        keytype: KeyType,
        /// Create the key inactive
        #[arg(long)]
        inactive: bool,
        #[arg(long)]
        algorithm: Option<String>,
        /// Include the private key in the output
        #[arg(long)]
        show_private: bool,
    },
    /// Delete a key
    Delete { zone: String, id: u64 },
}

fn parse_object_type(raw: &str) -> Result<ObjectType, String> {
    serde_json::from_value(serde_json::Value::String(raw.to_lowercase()))
        .map_err(|_| format!("unknown object type '{raw}'"))
}

fn parse_key_type(raw: &str) -> Result<KeyType, String> {
    serde_json::from_value(serde_json::Value::String(raw.to_lowercase()))
        .map_err(|_| format!("unknown key type '{raw}'"))
}

fn parse_zone_kind(raw: &str) -> Result<ZoneKind, String> {
    match raw.to_lowercase().as_str() {
        "native" => Ok(ZoneKind::Native),
        "master" => Ok(ZoneKind::Master),
        "slave" => Ok(ZoneKind::Slave),
        _ => Err(format!("unknown zone kind '{raw}'")),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_logging() {
    // Respects RUST_LOG environment variable if set, otherwise defaults to INFO level
    // Example: RUST_LOG=debug pdnsctl zones
    //
    // Respects RUST_LOG_FORMAT environment variable for output format
    // Example: RUST_LOG_FORMAT=json pdnsctl zones
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    // Logs go to stderr so stdout stays machine readable
    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact()
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ClientConfig::from_file(path),
        None => ClientConfig::from_env(),
    }
    .context("Failed to load PowerDNS client configuration")?;
    debug!(config = ?config, "Configuration loaded");

    let client = PowerDnsClient::from_config(&config)?;

    match cli.command {
        Command::Zones => print_json(&client.get_zones().await?)?,
        Command::Zone(ZoneCommand::Get { zone }) => {
            match client.get_zone_with_meta(&zone).await? {
                Some(found) => print_json(&found)?,
                None => anyhow::bail!("Zone '{zone}' not found"),
            }
        }
        Command::Zone(ZoneCommand::Create { zone, kind }) => {
            print_json(&client.create_zone(&zone, kind).await?)?;
        }
        Command::Zone(ZoneCommand::Delete { zone }) => client.delete_zone(&zone).await?,
        Command::Zone(ZoneCommand::Setup {
            zone,
            nameservers,
            hostmaster,
        }) => {
            let setup = ZoneSetup {
                domain: zone,
                nameservers,
                hostmaster_email: hostmaster,
            };
            match client.create_and_setup_zone(&setup).await? {
                ZoneSetupOutcome::KeyCreated(key) => print_json(&key)?,
                ZoneSetupOutcome::KeyExists => println!("Zone ready, existing cryptokey kept"),
            }
        }
        Command::Records(RecordsCommand::Set(args)) => {
            print_json(&client.set_records(&[args.into()]).await?)?;
        }
        Command::Records(RecordsCommand::Append(args)) => {
            print_json(&client.append_record(&args.into()).await?)?;
        }
        Command::Records(RecordsCommand::Delete { name, record_type }) => {
            let record = Record {
                name,
                record_type,
                ..Record::default()
            };
            client.delete_records(&[record]).await?;
        }
        Command::Records(RecordsCommand::Find {
            value,
            zone,
            global,
        }) => {
            let found = match zone {
                Some(zone) if !global => client.find_records(&value, &zone).await?,
                _ => client.find_records_global(&value).await?,
            };
            print_json(&found)?;
        }
        Command::Records(RecordsCommand::Replace {
            find,
            replace,
            zone,
            global,
        }) => {
            let changed = match zone {
                Some(zone) if !global => client.replace_records(&find, &replace, &zone).await?,
                _ => client.replace_records_global(&find, &replace).await?,
            };
            println!("{changed}");
        }
        Command::Search {
            query,
            max,
            object_type,
        } => {
            let query = SearchQuery::new(query)
                .with_max(max)
                .with_object_type(object_type);
            print_json(&client.search(&query).await?.unwrap_or_default())?;
        }
        Command::Keys(KeysCommand::List { zone }) => {
            print_json(&client.get_cryptokeys(&zone).await?)?;
        }
        Command::Keys(KeysCommand::Create {
            zone,
            keytype,
            inactive,
            algorithm,
            show_private,
        }) => {
            let spec = CryptokeySpec {
                keytype,
                active: !inactive,
                algorithm,
                ..CryptokeySpec::default()
            };
            print_json(&client.create_cryptokey(&zone, &spec, show_private).await?)?;
        }
        Command::Keys(KeysCommand::Delete { zone, id }) => {
            client.delete_cryptokey(&zone, id).await?;
        }
    }

    Ok(())
}
