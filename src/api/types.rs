// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Wire types of the PowerDNS HTTP API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::DEFAULT_SEARCH_MAX;
use crate::records::RRSet;

/// Zone kind requested on creation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneKind {
    /// Data replicated by the database backend
    #[default]
    Native,
    /// Primary zone, notifies and serves AXFR
    Master,
    /// Secondary zone, transferred from masters
    Slave,
}

/// A zone as returned by `GET /zones`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneSummary {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// `Native`, `Master`, `Slave`, or a kind newer servers add
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<u32>,
    #[serde(default)]
    pub dnssec: bool,
    /// Fields this client does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A zone with its record sets, as returned by `GET /zones/{zone}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// `Native`, `Master`, `Slave`, or a kind newer servers add
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<u32>,
    #[serde(default)]
    pub dnssec: bool,
    #[serde(default)]
    pub rrsets: Vec<RRSet>,
    /// Fields this client does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /zones`.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct CreateZoneRequest<'a> {
    pub name: &'a str,
    pub kind: ZoneKind,
}

/// Body of `PATCH /zones/{zone}`.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct PatchZoneRequest<'a> {
    pub rrsets: &'a [RRSet],
}

/// Kind of object a search is restricted to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    All,
    Zone,
    #[default]
    Record,
    Comment,
}

impl ObjectType {
    /// Value of the `object_type` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Zone => "zone",
            Self::Record => "record",
            Self::Comment => "comment",
        }
    }
}

/// Parameters of `GET /search-data`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    /// Text to search for; `*` and `?` are wildcards on the server side
    pub query: String,
    /// Maximum number of hits, 10 by default
    pub max: u32,
    /// Object kind, `record` by default
    pub object_type: ObjectType,
}

impl SearchQuery {
    /// A record search with default limits.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max: DEFAULT_SEARCH_MAX,
            object_type: ObjectType::default(),
        }
    }

    #[must_use]
    pub fn with_max(mut self, max: u32) -> Self {
        self.max = max;
        self
    }

    #[must_use]
    pub fn with_object_type(mut self, object_type: ObjectType) -> Self {
        self.object_type = object_type;
        self
    }
}

/// One result of a search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub object_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub zone_id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub rtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub disabled: bool,
}

/// DNSSEC key role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    /// Key signing key
    #[default]
    Ksk,
    /// Zone signing key
    Zsk,
    /// Combined signing key
    Csk,
}

/// Body of `POST /zones/{zone}/cryptokeys`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptokeySpec {
    pub keytype: KeyType,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    /// Algorithm mnemonic, e.g. `ECDSAP256SHA256`; server default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bits: Option<u32>,
    /// Import an existing key (ISC format) instead of generating one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privatekey: Option<String>,
}

impl Default for CryptokeySpec {
    fn default() -> Self {
        Self {
            keytype: KeyType::Ksk,
            active: true,
            published: None,
            algorithm: None,
            bits: None,
            privatekey: None,
        }
    }
}

/// A DNSSEC key of a zone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cryptokey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub keytype: KeyType,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub dnskey: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ds: Vec<String>,
    /// Private key in ISC format; only kept when explicitly requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privatekey: Option<String>,
    #[serde(default)]
    pub algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bits: Option<u32>,
}
