// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! High-level PowerDNS operations.
//!
//! [`PowerDnsClient`] combines name canonicalization, zone partitioning and
//! record-set construction with the requests of a [`PdnsApi`]:
//!
//! - Zone lifecycle (list, create, fetch, delete)
//! - Replacing and deleting record sets, across zones in one call
//! - Appending values to an existing record set
//! - Finding and replacing record content in one zone or on the whole server
//! - Bootstrapping a zone with SOA, NS and a DNSSEC key
//!
//! Every operation is a short sequence of requests. A failed request aborts
//! the remaining steps and nothing already applied is rolled back.
//!
//! # Example
//!
//! ```rust,no_run
//! use powerdns_api::client::PowerDnsClient;
//! use powerdns_api::config::ClientConfig;
//! use powerdns_api::records::Record;
//!
//! # async fn example() -> powerdns_api::errors::Result<()> {
//! let client = PowerDnsClient::from_config(&ClientConfig::from_env()?)?;
//!
//! client
//!     .set_records(&[
//!         Record::new("example.com", ["1.1.1.1"]).with_ttl(300),
//!         Record::new("www.example.org", ["1.1.1.1", "2.2.2.2"]),
//!     ])
//!     .await?;
//!
//! let changed = client.replace_records("1.1.1.1", "9.9.9.9", "example.com").await?;
//! # Ok(())
//! # }
//! ```

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::{
    Cryptokey, CryptokeySpec, HttpApi, PdnsApi, SearchHit, SearchQuery, Zone, ZoneKind,
    ZoneSummary,
};
use crate::config::ClientConfig;
use crate::constants::{
    BOOTSTRAP_SOA_EXPIRE_SECS, BOOTSTRAP_SOA_MINIMUM_SECS, BOOTSTRAP_SOA_REFRESH_SECS,
    BOOTSTRAP_SOA_RETRY_SECS, BOOTSTRAP_SOA_SERIAL, BOOTSTRAP_TTL_SECS, LABEL_SEPARATOR,
    PTR_RECORD_TYPE,
};
use crate::errors::{PdnsError, Result, ZoneFailure};
use crate::names::{absolute_name, registrable_domain};
use crate::partition::{partition, ZoneGroup};
use crate::records::{build_delete_sets, build_replace_sets, RRSet, Record};

/// Input of [`PowerDnsClient::create_and_setup_zone`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSetup {
    /// Zone to create, e.g. `example.com`
    pub domain: String,
    /// Authoritative nameservers; the first one becomes the SOA primary
    pub nameservers: Vec<String>,
    /// Hostmaster address, e.g. `hostmaster@example.com`
    pub hostmaster_email: String,
}

/// What [`PowerDnsClient::create_and_setup_zone`] did about DNSSEC.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ZoneSetupOutcome {
    /// The zone had no key; this one was created
    KeyCreated(Cryptokey),
    /// The zone already had at least one key
    KeyExists,
}

/// Client for the PowerDNS HTTP API.
#[derive(Debug, Clone)]
pub struct PowerDnsClient<A = HttpApi> {
    api: A,
}

impl PowerDnsClient<HttpApi> {
    /// Create a client talking HTTP to the configured server.
    ///
    /// # Errors
    ///
    /// Returns [`PdnsError::Config`] if the configuration is unusable.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(HttpApi::new(config)?))
    }
}

impl<A: PdnsApi> PowerDnsClient<A> {
    /// Create a client over any [`PdnsApi`] implementation.
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// The underlying request interface.
    pub fn api(&self) -> &A {
        &self.api
    }

    // ===== Zone management =====

    /// List every zone on the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_zones(&self) -> Result<Vec<ZoneSummary>> {
        self.api.list_zones().await
    }

    /// Create the zone owning `name`.
    ///
    /// `www.example.com` creates `example.com.`. Returns the first record set
    /// of the new zone (normally its SOA).
    ///
    /// # Errors
    ///
    /// Returns [`PdnsError::InvalidArgument`] for names without a registrable
    /// domain, or the server's error (HTTP 409 if the zone exists).
    pub async fn create_zone(&self, name: &str, kind: ZoneKind) -> Result<Option<RRSet>> {
        let zone = absolute_name(&registrable_domain(name)?);
        self.api.create_zone(&zone, kind).await
    }

    /// Fetch the zone owning `name` with its metadata; `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the request fails.
    pub async fn get_zone_with_meta(&self, name: &str) -> Result<Option<Zone>> {
        self.api.get_zone_meta(&registrable_domain(name)?).await
    }

    /// Record sets of the zone owning `name`; empty if the zone does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the request fails.
    pub async fn get_zone(&self, name: &str) -> Result<Vec<RRSet>> {
        Ok(self
            .get_zone_with_meta(name)
            .await?
            .map(|zone| zone.rrsets)
            .unwrap_or_default())
    }

    /// Delete the zone owning `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the request fails.
    pub async fn delete_zone(&self, name: &str) -> Result<()> {
        self.api.delete_zone(&registrable_domain(name)?).await
    }

    // ===== Record sets =====

    /// Replace the record sets of `records` in a single zone with one PATCH.
    ///
    /// The zone is `zone` if given, otherwise the registrable domain of the
    /// first record. Records outside that zone are rejected by the server.
    ///
    /// # Errors
    ///
    /// Returns [`PdnsError::InvalidArgument`] for an empty batch or an
    /// unzoneable name, and the server's error if the PATCH fails.
    pub async fn set_homogeneous_records(
        &self,
        records: &[Record],
        zone: Option<&str>,
    ) -> Result<()> {
        let first = records
            .first()
            .ok_or_else(|| PdnsError::invalid("records must not be empty"))?;
        let zone = match zone {
            Some(zone) => zone.trim_end_matches(LABEL_SEPARATOR).to_string(),
            None => registrable_domain(&first.name)?,
        };

        self.api
            .patch_record_sets(&zone, &build_replace_sets(records))
            .await
    }

    /// Replace the record sets of `records`, which may span several zones.
    ///
    /// Records are grouped by zone and one PATCH per zone is sent
    /// concurrently. Returns the zones that were updated, in first-seen order.
    ///
    /// # Errors
    ///
    /// - [`PdnsError::InvalidArgument`] before any request if a name has no zone
    /// - the server's error when the batch targets a single zone
    /// - [`PdnsError::PartialFailure`] listing failed and updated zones otherwise
    pub async fn set_records(&self, records: &[Record]) -> Result<Vec<String>> {
        self.submit_groups(partition(records)?).await
    }

    /// Send one concurrent PATCH of `REPLACE` sets per zone group.
    async fn submit_groups(&self, groups: Vec<ZoneGroup>) -> Result<Vec<String>> {
        let submissions: Vec<(String, Vec<RRSet>)> = groups
            .into_iter()
            .map(|group| {
                let rrsets = build_replace_sets(&group.records);
                (group.zone, rrsets)
            })
            .collect();

        debug!(zones = submissions.len(), "Submitting record sets");

        let results = join_all(
            submissions
                .iter()
                .map(|(zone, rrsets)| self.api.patch_record_sets(zone, rrsets)),
        )
        .await;

        let mut succeeded = Vec::new();
        let mut failed = Vec::new();
        for ((zone, _), result) in submissions.into_iter().zip(results) {
            match result {
                Ok(()) => succeeded.push(zone),
                Err(error) => failed.push(ZoneFailure {
                    zone,
                    error: Box::new(error),
                }),
            }
        }

        if failed.is_empty() {
            return Ok(succeeded);
        }
        if succeeded.is_empty() && failed.len() == 1 {
            return Err(*failed.remove(0).error);
        }

        warn!(
            succeeded = ?succeeded,
            failed = ?failed.iter().map(|f| f.zone.as_str()).collect::<Vec<_>>(),
            "Record update failed for some zones"
        );
        Err(PdnsError::PartialFailure { succeeded, failed })
    }

    /// Delete the record sets identified by name and type of `records`.
    ///
    /// All records must belong to one zone; only one PATCH is sent.
    ///
    /// # Errors
    ///
    /// Returns [`PdnsError::InvalidArgument`] for an empty or multi-zone
    /// batch, and the server's error if the PATCH fails.
    pub async fn delete_records(&self, records: &[Record]) -> Result<()> {
        let first = records
            .first()
            .ok_or_else(|| PdnsError::invalid("records must not be empty"))?;
        let zone = registrable_domain(&first.name)?;

        for record in &records[1..] {
            let other = registrable_domain(&record.name)?;
            if other != zone {
                return Err(PdnsError::invalid(format!(
                    "records span zones '{zone}' and '{other}'; delete each zone separately"
                )));
            }
        }

        self.api
            .patch_record_sets(&zone, &build_delete_sets(records))
            .await
    }

    /// Add the values of `record` to its record set, keeping existing ones.
    ///
    /// The zone owning the record is fetched and the values of the set with
    /// the same name and type (both compared case-insensitively) are appended
    /// after the caller's, skipping values already present. When the zone has
    /// no such set, a server-side text search for the name is used instead:
    /// that match is fuzzy, every non-PTR hit is merged and no de-duplication
    /// happens.
    ///
    /// Returns the merged record that was submitted.
    ///
    /// # Errors
    ///
    /// Returns [`PdnsError::InvalidArgument`] if the name is invalid or its
    /// zone does not exist, and the server's error if any request fails.
    pub async fn append_record(&self, record: &Record) -> Result<Record> {
        let zone = registrable_domain(&record.name)?;
        let name = absolute_name(&record.name);
        let mut merged = record.clone();

        let Some(existing) = self.api.get_zone_meta(&zone).await? else {
            return Err(PdnsError::invalid(format!(
                "cannot append to '{name}': zone '{zone}' does not exist"
            )));
        };

        let rtype = record.effective_type();
        let current = existing.rrsets.iter().find(|set| {
            set.name.eq_ignore_ascii_case(&name) && set.rtype.eq_ignore_ascii_case(rtype)
        });

        match current {
            Some(set) => {
                for content in set.contents() {
                    if !merged.content.iter().any(|c| c == content) {
                        merged.content.push(content.to_string());
                    }
                }
            }
            None => {
                debug!(zone = %zone, name = %name, "No matching record set, merging search results");
                let hits = self.api.search(&SearchQuery::new(&record.name)).await?;
                merged
                    .content
                    .extend(hits.into_iter().flatten().filter_map(mergeable_content));
            }
        }

        self.submit_groups(vec![ZoneGroup {
            zone,
            records: vec![merged.clone()],
        }])
        .await?;
        info!(name = %name, values = merged.content.len(), "Appended record values");
        Ok(merged)
    }

    // ===== Find / replace =====

    /// Record sets of the zone owning `zone` containing the value `find`.
    ///
    /// A set is returned once per matching value.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the request fails.
    pub async fn find_records(&self, find: &str, zone: &str) -> Result<Vec<RRSet>> {
        Ok(matching_sets(&self.get_zone(zone).await?, find))
    }

    /// [`find_records`](Self::find_records) over every zone on the server.
    ///
    /// # Errors
    ///
    /// Returns an error if any request fails.
    pub async fn find_records_global(&self, find: &str) -> Result<Vec<RRSet>> {
        let mut found = Vec::new();
        for (_, rrsets) in self.all_zone_rrsets().await? {
            found.extend(matching_sets(&rrsets, find));
        }
        Ok(found)
    }

    /// Replace the value `find` by `replace` in the zone owning `zone`.
    ///
    /// Changed sets are resubmitted to the zone they were read from, keeping
    /// their ttl. A set the server returned without ttl is resubmitted with
    /// the default of 3600 seconds.
    ///
    /// Returns the number of record sets changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or any request fails.
    pub async fn replace_records(&self, find: &str, replace: &str, zone: &str) -> Result<usize> {
        let zone = registrable_domain(zone)?;
        let rrsets = self.get_zone(&zone).await?;
        let records = replacement_records(&rrsets, find, replace);
        self.submit_replacements(vec![ZoneGroup { zone, records }])
            .await
    }

    /// [`replace_records`](Self::replace_records) over every zone on the server.
    ///
    /// # Errors
    ///
    /// Returns an error if any request fails.
    pub async fn replace_records_global(&self, find: &str, replace: &str) -> Result<usize> {
        let mut groups = Vec::new();
        for (zone, rrsets) in self.all_zone_rrsets().await? {
            let records = replacement_records(&rrsets, find, replace);
            groups.push(ZoneGroup { zone, records });
        }
        self.submit_replacements(groups).await
    }

    async fn submit_replacements(&self, groups: Vec<ZoneGroup>) -> Result<usize> {
        let groups: Vec<ZoneGroup> = groups
            .into_iter()
            .filter(|group| !group.records.is_empty())
            .collect();
        let changed = groups.iter().map(|group| group.records.len()).sum();
        if !groups.is_empty() {
            self.submit_groups(groups).await?;
        }
        info!(rrsets = changed, "Replaced record content");
        Ok(changed)
    }

    /// Zone ids and record sets of every zone, fetched one zone at a time.
    async fn all_zone_rrsets(&self) -> Result<Vec<(String, Vec<RRSet>)>> {
        let mut all = Vec::new();
        for summary in self.api.list_zones().await? {
            let id = if summary.id.is_empty() {
                &summary.name
            } else {
                &summary.id
            };
            let id = id.trim_end_matches(LABEL_SEPARATOR);
            if let Some(zone) = self.api.get_zone_meta(id).await? {
                all.push((id.to_string(), zone.rrsets));
            }
        }
        Ok(all)
    }

    // ===== Search and DNSSEC =====

    /// Free-text search; `None` for an empty query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn search(&self, query: &SearchQuery) -> Result<Option<Vec<SearchHit>>> {
        self.api.search(query).await
    }

    /// Create a DNSSEC key for the zone owning `zone`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the request fails.
    pub async fn create_cryptokey(
        &self,
        zone: &str,
        spec: &CryptokeySpec,
        return_private: bool,
    ) -> Result<Cryptokey> {
        self.api
            .create_cryptokey(&registrable_domain(zone)?, spec, return_private)
            .await
    }

    /// DNSSEC keys of the zone owning `zone`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the request fails.
    pub async fn get_cryptokeys(&self, zone: &str) -> Result<Vec<Cryptokey>> {
        self.api.list_cryptokeys(&registrable_domain(zone)?).await
    }

    /// Delete a DNSSEC key of the zone owning `zone`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the request fails.
    pub async fn delete_cryptokey(&self, zone: &str, id: u64) -> Result<()> {
        self.api
            .delete_cryptokey(&registrable_domain(zone)?, id)
            .await
    }

    // ===== Bootstrap =====

    /// Create a zone with SOA and NS records and a DNSSEC key.
    ///
    /// Safe to re-run: an existing zone is reused and a key is only created
    /// when the zone has none.
    ///
    /// # Errors
    ///
    /// Returns [`PdnsError::InvalidArgument`] before any request if the setup
    /// is incomplete, otherwise the first failing request's error.
    pub async fn create_and_setup_zone(&self, setup: &ZoneSetup) -> Result<ZoneSetupOutcome> {
        if setup.domain.trim().is_empty() {
            return Err(PdnsError::invalid("no domain specified"));
        }
        let Some(primary_ns) = setup.nameservers.first() else {
            return Err(PdnsError::invalid("the zone needs at least one nameserver"));
        };
        if setup.hostmaster_email.trim().is_empty() {
            return Err(PdnsError::invalid("no hostmaster email provided"));
        }
        let zone = registrable_domain(&setup.domain)?;

        match self.create_zone(&zone, ZoneKind::Native).await {
            Ok(_) => info!(zone = %zone, "Zone created"),
            Err(e) if e.is_conflict() => warn!(zone = %zone, "Zone already exists, skipping creation"),
            Err(e) => return Err(e),
        }

        let soa = Record::new(&zone, [soa_content(primary_ns, &setup.hostmaster_email)])
            .with_type("SOA")
            .with_ttl(BOOTSTRAP_TTL_SECS);
        let ns = Record::new(&zone, setup.nameservers.iter().map(|n| absolute_name(n)))
            .with_type("NS")
            .with_ttl(BOOTSTRAP_TTL_SECS);
        self.set_records(&[soa, ns]).await?;

        if !self.api.list_cryptokeys(&zone).await?.is_empty() {
            info!(zone = %zone, "Cryptokey exists, skipping creation");
            return Ok(ZoneSetupOutcome::KeyExists);
        }

        let key = self
            .api
            .create_cryptokey(&zone, &CryptokeySpec::default(), false)
            .await?;
        Ok(ZoneSetupOutcome::KeyCreated(key))
    }
}

/// SOA content for a bootstrapped zone.
///
/// The first `@` of the hostmaster address becomes a label separator.
#[must_use]
pub fn soa_content(primary_ns: &str, hostmaster_email: &str) -> String {
    format!(
        "{} {} {BOOTSTRAP_SOA_SERIAL} {BOOTSTRAP_SOA_REFRESH_SECS} {BOOTSTRAP_SOA_RETRY_SECS} \
         {BOOTSTRAP_SOA_EXPIRE_SECS} {BOOTSTRAP_SOA_MINIMUM_SECS}",
        absolute_name(primary_ns),
        absolute_name(&hostmaster_email.replacen('@', ".", 1)),
    )
}

/// Record sets containing `find`, once per matching value.
#[must_use]
pub fn matching_sets(rrsets: &[RRSet], find: &str) -> Vec<RRSet> {
    rrsets
        .iter()
        .flat_map(|set| {
            set.contents()
                .filter(|content| *content == find)
                .map(move |_| set.clone())
        })
        .collect()
}

/// Replacement records for every set containing `find`.
///
/// Matching values become `replace`; others keep their value and position.
/// Name, type and ttl are taken from the set, so a set without ttl falls
/// back to the record default when it is submitted.
#[must_use]
pub fn replacement_records(rrsets: &[RRSet], find: &str, replace: &str) -> Vec<Record> {
    rrsets
        .iter()
        .filter(|set| set.contents().any(|content| content == find))
        .map(|set| Record {
            name: set.name.clone(),
            record_type: Some(set.rtype.clone()),
            ttl: set.ttl,
            content: set
                .contents()
                .map(|content| if content == find { replace } else { content })
                .map(str::to_string)
                .collect(),
        })
        .collect()
}

fn mergeable_content(hit: SearchHit) -> Option<String> {
    if hit.rtype.as_deref() == Some(PTR_RECORD_TYPE) {
        return None;
    }
    hit.content
}
