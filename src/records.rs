// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Record model and record-set construction.
//!
//! Callers describe DNS data with the simplified [`Record`] shape (name, type,
//! ttl and a list of content values). PowerDNS manages data as record sets
//! ([`RRSet`]): all records sharing a `(name, type)` pair, changed atomically
//! through a PATCH carrying a `changetype`.
//!
//! # Example
//!
//! ```rust
//! use powerdns_api::records::{build_replace_sets, ChangeType, Record};
//!
//! let record = Record::new("a.example.com", ["1.1.1.1", "2.2.2.2"]);
//! let sets = build_replace_sets(&[record]);
//!
//! assert_eq!(sets.len(), 1);
//! assert_eq!(sets[0].name, "a.example.com.");
//! assert_eq!(sets[0].rtype, "A");
//! assert_eq!(sets[0].ttl, Some(3600));
//! assert_eq!(sets[0].changetype, Some(ChangeType::Replace));
//! assert_eq!(sets[0].records.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{DEFAULT_RECORD_TTL_SECS, DEFAULT_RECORD_TYPE};
use crate::errors::{PdnsError, Result};
use crate::names::absolute_name;

/// A caller-supplied record: one name and type with any number of values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Owner name, relative or absolute
    pub name: String,
    /// Record type; `A` when absent
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    /// Time to live in seconds; 3600 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Record values, one per resulting record
    #[serde(default)]
    pub content: Vec<String>,
}

impl Record {
    /// Create a record with default type and ttl.
    pub fn new<I, S>(name: impl Into<String>, content: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            record_type: None,
            ttl: None,
            content: content.into_iter().map(Into::into).collect(),
        }
    }

    /// Set the record type.
    #[must_use]
    pub fn with_type(mut self, record_type: impl Into<String>) -> Self {
        self.record_type = Some(record_type.into());
        self
    }

    /// Set the ttl.
    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Record type with the default applied.
    #[must_use]
    pub fn effective_type(&self) -> &str {
        self.record_type.as_deref().unwrap_or(DEFAULT_RECORD_TYPE)
    }

    /// TTL with the default applied.
    #[must_use]
    pub fn effective_ttl(&self) -> u32 {
        self.ttl.unwrap_or(DEFAULT_RECORD_TTL_SECS)
    }
}

/// How a PATCH treats a record set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeType {
    /// Replace every record of the set with the supplied ones
    Replace,
    /// Remove the set entirely
    Delete,
}

/// A single record inside an [`RRSet`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub content: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub rtype: Option<String>,
}

/// A PowerDNS record set, as sent in a PATCH or returned with a zone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RRSet {
    /// Absolute owner name
    pub name: String,
    /// Record type
    #[serde(rename = "type")]
    pub rtype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Present on outgoing changes only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changetype: Option<ChangeType>,
    #[serde(default)]
    pub records: Vec<RecordEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Value>,
}

impl RRSet {
    /// Content values of the set, in server order.
    pub fn contents(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.content.as_str())
    }
}

/// Build `REPLACE` record sets, one per input record.
///
/// Type and ttl defaults are resolved and the name is made absolute. The
/// provider expects name, type and ttl on every entry as well as on the set.
#[must_use]
pub fn build_replace_sets(records: &[Record]) -> Vec<RRSet> {
    records
        .iter()
        .map(|record| {
            let name = absolute_name(&record.name);
            let rtype = record.effective_type().to_string();
            let ttl = record.effective_ttl();

            let entries = record
                .content
                .iter()
                .map(|content| RecordEntry {
                    content: content.clone(),
                    disabled: false,
                    ttl: Some(ttl),
                    name: Some(name.clone()),
                    rtype: Some(rtype.clone()),
                })
                .collect();

            RRSet {
                name,
                rtype,
                ttl: Some(ttl),
                changetype: Some(ChangeType::Replace),
                records: entries,
                comments: Vec::new(),
            }
        })
        .collect()
}

/// Build `DELETE` record sets. Only name and type identify the target.
#[must_use]
pub fn build_delete_sets(records: &[Record]) -> Vec<RRSet> {
    records
        .iter()
        .map(|record| RRSet {
            name: absolute_name(&record.name),
            rtype: record.effective_type().to_string(),
            ttl: None,
            changetype: Some(ChangeType::Delete),
            records: Vec::new(),
            comments: Vec::new(),
        })
        .collect()
}

/// Decode an untyped JSON array of records.
///
/// # Errors
///
/// Returns [`PdnsError::InvalidArgument`] if `value` is not an array or an
/// element does not have the record shape.
pub fn records_from_value(value: &Value) -> Result<Vec<Record>> {
    let items = value
        .as_array()
        .ok_or_else(|| PdnsError::invalid("records must be of type array"))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            Record::deserialize(item)
                .map_err(|e| PdnsError::invalid(format!("record {index} is malformed: {e}")))
        })
        .collect()
}
