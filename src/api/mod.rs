// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Access to the PowerDNS HTTP API.
//!
//! [`PdnsApi`] is the narrow request interface the composite operations in
//! [`crate::client`] depend on. Each method is a single HTTP round trip; no
//! retries are performed at this layer. [`HttpApi`] implements it with
//! `reqwest`, and tests substitute in-memory fakes.
//!
//! Zone arguments are zone identifiers as the server knows them
//! (`example.com`); callers are expected to have reduced record names to
//! their zone already.

pub mod http;
pub mod types;

pub use http::HttpApi;
pub use types::{
    Cryptokey, CryptokeySpec, KeyType, ObjectType, SearchHit, SearchQuery, Zone, ZoneKind,
    ZoneSummary,
};

use async_trait::async_trait;

use crate::errors::Result;
use crate::records::RRSet;

/// Requests the client issues against a PowerDNS server.
#[async_trait]
pub trait PdnsApi: Send + Sync {
    /// List every zone hosted by the server.
    async fn list_zones(&self) -> Result<Vec<ZoneSummary>>;

    /// Create a zone. `name` must be absolute.
    ///
    /// Returns the first record set of the new zone, if the server sent any.
    async fn create_zone(&self, name: &str, kind: ZoneKind) -> Result<Option<RRSet>>;

    /// Fetch a zone with its record sets; `None` if the zone does not exist.
    async fn get_zone_meta(&self, zone: &str) -> Result<Option<Zone>>;

    /// Delete a zone and all of its data.
    async fn delete_zone(&self, zone: &str) -> Result<()>;

    /// Apply record-set changes to a zone.
    async fn patch_record_sets(&self, zone: &str, rrsets: &[RRSet]) -> Result<()>;

    /// Free-text search; `None` when the query is empty.
    async fn search(&self, query: &SearchQuery) -> Result<Option<Vec<SearchHit>>>;

    /// Create (or import) a DNSSEC key.
    ///
    /// The private key is stripped from the result unless `return_private`.
    async fn create_cryptokey(
        &self,
        zone: &str,
        spec: &CryptokeySpec,
        return_private: bool,
    ) -> Result<Cryptokey>;

    /// List the DNSSEC keys of a zone.
    async fn list_cryptokeys(&self, zone: &str) -> Result<Vec<Cryptokey>>;

    /// Delete a DNSSEC key.
    async fn delete_cryptokey(&self, zone: &str, id: u64) -> Result<()>;
}
