// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory command-line front end
//!
//! Resolves identifiers and runs filtered searches against a JSON inventory
//! snapshot. Results go to stdout as JSON; logs go to stderr.
//!
//! Run with: cargo run --bin inventory -- --snapshot inventory.json host web01
//!
//! Ambiguous names prompt on the terminal unless `--non-interactive` is set,
//! in which case they fail.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use dcim_inventory::config::InventoryConfig;
use dcim_inventory::query::{find_dns, find_kv, find_servers, Query};
use dcim_inventory::resolve::{Chooser, FailOnAmbiguity, InteractiveChooser, Locator};
use dcim_inventory::service::{
    classify_node, new_group, new_user, zone_records, GroupRequest, UserRequest,
};
use dcim_inventory::store::MemoryStore;
use dcim_inventory::IdentifierParser;

#[derive(Parser)]
#[command(name = "inventory")]
#[command(about = "Resolve and search datacenter inventory names", long_about = None)]
#[command(version)]
struct Cli {
    /// Inventory configuration (TOML); built-in defaults when omitted
    #[arg(long, env = "INVENTORY_CONFIG")]
    config: Option<PathBuf>,

    /// Inventory snapshot (JSON); empty inventory when omitted
    #[arg(long, env = "INVENTORY_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Fail on ambiguity instead of prompting
    #[arg(long)]
    non_interactive: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decompose an identifier
    Parse {
        identifier: String,
        /// Identifier names a location only (realm.site_id)
        #[arg(long)]
        location: bool,
    },
    /// Locate one host
    Host { identifier: String },
    /// Locate one user
    User { identifier: String },
    /// Locate one group
    Group { identifier: String },
    /// Search servers, e.g. `servers tag=web virtual=1`
    Servers {
        #[arg(value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },
    /// Search key/value entries
    Kv {
        #[arg(value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },
    /// Search DNS records
    Dns {
        #[arg(value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },
    /// Classes and parameters for one host
    Classify { identifier: String },
    /// Records of one realm.site_id zone
    Zone {
        location: String,
        /// Print zone-file text instead of JSON
        #[arg(long)]
        text: bool,
    },
    /// Build a new user record
    NewUser {
        identifier: String,
        #[arg(long)]
        uid: Option<u32>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        ssh_key: Option<String>,
    },
    /// Build a new group record
    NewGroup {
        identifier: String,
        #[arg(long)]
        gid: Option<u32>,
        #[arg(long)]
        description: Option<String>,
    },
}

/// `key=value`; a bare key (e.g. `all`, `virtual`) gets an empty value
fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(format!("'{}' has an empty key", raw)),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Ok((raw.to_string(), String::new())),
    }
}

fn to_query(filters: Vec<(String, String)>) -> Query {
    filters.into_iter().collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Environment filter with an `info` floor
fn log_filter(base: EnvFilter) -> EnvFilter {
    base.add_directive(tracing::Level::INFO.into())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(EnvFilter::from_default_env()))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => InventoryConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => InventoryConfig::default(),
    };
    let store = match &cli.snapshot {
        Some(path) => MemoryStore::from_json_file(path)
            .with_context(|| format!("Failed to load snapshot from {}", path.display()))?,
        None => MemoryStore::new(),
    };
    let chooser: &dyn Chooser = if cli.non_interactive {
        &FailOnAmbiguity
    } else {
        &InteractiveChooser
    };
    debug!(realms = ?config.realms, sites = ?config.site_ids, "Configuration ready");

    let locator = Locator::new(&config, &store, chooser);

    match cli.command {
        Command::Parse {
            identifier,
            location,
        } => {
            let name = IdentifierParser::new(&config, chooser).parse(&identifier, !location)?;
            print_json(&name)?;
        }
        Command::Host { identifier } => print_json(&locator.locate_host(&identifier)?)?,
        Command::User { identifier } => print_json(&locator.locate_user(&identifier)?)?,
        Command::Group { identifier } => print_json(&locator.locate_group(&identifier)?)?,
        Command::Servers { filters } => {
            let servers = find_servers(&store, &to_query(filters))?;
            info!("{} server(s) matched", servers.len());
            print_json(&servers)?;
        }
        Command::Kv { filters } => print_json(&find_kv(&store, &to_query(filters))?)?,
        Command::Dns { filters } => print_json(&find_dns(&store, &to_query(filters))?)?,
        Command::Classify { identifier } => print_json(&classify_node(&locator, &identifier)?)?,
        Command::Zone { location, text } => {
            let at = IdentifierParser::new(&config, chooser).parse(&location, false)?;
            let records = zone_records(&store, &config, &at.realm, &at.site_id)?;
            if text {
                println!("; zone {}", at);
                for record in &records {
                    println!("{}", record.to_zone_line());
                }
            } else {
                print_json(&records)?;
            }
        }
        Command::NewUser {
            identifier,
            uid,
            first_name,
            last_name,
            ssh_key,
        } => {
            let request = UserRequest {
                uid,
                first_name,
                last_name,
                ssh_public_key: ssh_key,
                ..UserRequest::default()
            };
            print_json(&new_user(&config, &store, chooser, &identifier, request)?)?;
        }
        Command::NewGroup {
            identifier,
            gid,
            description,
        } => {
            let request = GroupRequest { gid, description };
            print_json(&new_group(&config, &store, chooser, &identifier, request)?)?;
        }
    }

    Ok(())
}
