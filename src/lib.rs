// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # powerdns-api - Client for the PowerDNS HTTP management API
//!
//! This library wraps the PowerDNS authoritative server API: zone lifecycle,
//! record-set changes, DNSSEC key management and search.
//!
//! ## Overview
//!
//! Callers describe DNS data as flat lists of [`records::Record`]s. The
//! library turns them into provider-correct change-sets:
//!
//! - names are made absolute ([`names`])
//! - records are grouped by owning zone ([`partition`])
//! - each group becomes `REPLACE` or `DELETE` record sets ([`records`])
//! - one PATCH per zone is sent through the [`api::PdnsApi`] interface
//!
//! ## Modules
//!
//! - [`client`] - High-level operations (set, append, find/replace, bootstrap)
//! - [`api`] - Request interface and its HTTP implementation
//! - [`records`] - Record model and record-set builders
//! - [`partition`] - Zone grouping of record batches
//! - [`names`] - Domain name canonicalization
//! - [`config`] - Endpoint and credential configuration
//! - [`errors`] - Error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use powerdns_api::client::PowerDnsClient;
//! use powerdns_api::config::ClientConfig;
//! use powerdns_api::records::Record;
//!
//! # async fn example() -> powerdns_api::errors::Result<()> {
//! let config = ClientConfig::new("http://127.0.0.1:8081/api/v1/servers/localhost", "secret")?;
//! let client = PowerDnsClient::from_config(&config)?;
//!
//! client
//!     .set_records(&[Record::new("example.com", ["1.1.1.1", "8.8.8.8"]).with_ttl(300)])
//!     .await?;
//!
//! for rrset in client.get_zone("example.com").await? {
//!     println!("{} {} {:?}", rrset.name, rrset.rtype, rrset.contents().collect::<Vec<_>>());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod constants;
pub mod errors;
pub mod names;
pub mod partition;
pub mod records;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod partition_tests;
#[cfg(test)]
mod records_tests;
