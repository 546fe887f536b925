// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Grouping of record batches by owning zone.
//!
//! A batch handed to [`crate::client::PowerDnsClient::set_records`] may span
//! several zones, while every PATCH targets exactly one. Records are grouped
//! by the registrable domain of their absolute name; zones appear in
//! first-seen order and records keep their input order within a zone.

use serde_json::Value;

use crate::errors::Result;
use crate::names::registrable_domain;
use crate::records::{records_from_value, Record};

/// Records that share one target zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoneGroup {
    /// Zone the group is submitted to, without trailing dot (e.g. `example.com`)
    pub zone: String,
    /// Records in input order, never empty
    pub records: Vec<Record>,
}

/// Group `records` by zone.
///
/// Batches are human-sized, so buckets are found with a linear scan.
///
/// # Errors
///
/// Returns [`crate::errors::PdnsError::InvalidArgument`] if a record name
/// has no registrable domain.
pub fn partition(records: &[Record]) -> Result<Vec<ZoneGroup>> {
    let mut groups: Vec<ZoneGroup> = Vec::new();

    for record in records {
        let zone = registrable_domain(&record.name)?;
        match groups.iter_mut().find(|group| group.zone == zone) {
            Some(group) => group.records.push(record.clone()),
            None => groups.push(ZoneGroup {
                zone,
                records: vec![record.clone()],
            }),
        }
    }

    Ok(groups)
}

/// Group an untyped JSON array of records by zone.
///
/// # Errors
///
/// Fails with "records must be of type array" if `value` is not an array,
/// and otherwise as [`partition`] does.
pub fn partition_value(value: &Value) -> Result<Vec<ZoneGroup>> {
    partition(&records_from_value(value)?)
}
