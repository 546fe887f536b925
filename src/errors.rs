// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the PowerDNS API client.
//!
//! This module provides a single error enum covering:
//! - Malformed caller input, detected before any request is sent
//! - Non-success HTTP responses from the PowerDNS API
//! - Connection failures and unparsable response bodies
//! - Multi-zone submissions where only some zones were updated
//! - Invalid client configuration

use thiserror::Error;

use crate::constants::PDNS_UNKNOWN_ZONE_MESSAGE;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, PdnsError>;

/// A zone whose record-set submission failed during a multi-zone update.
#[derive(Debug)]
pub struct ZoneFailure {
    /// The zone the PATCH was sent to
    pub zone: String,
    /// The error returned for that zone
    pub error: Box<PdnsError>,
}

/// Errors that can occur while talking to the PowerDNS HTTP API.
#[derive(Error, Debug)]
pub enum PdnsError {
    /// Malformed caller input (wrong shape, missing field, unusable name).
    ///
    /// Always raised before any network call is made.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The API answered with a non-success HTTP status.
    #[error("{method} {url} failed with HTTP {status}: {message}")]
    Transport {
        /// HTTP method of the failed request
        method: String,
        /// Full request URL
        url: String,
        /// HTTP status code returned by the server
        status: u16,
        /// Response body (PowerDNS returns `{"error": "..."}`)
        message: String,
    },

    /// The request never produced a response (DNS failure, refused, timeout).
    #[error("HTTP request to {url} failed: {source}")]
    Connection {
        /// Full request URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// A success response carried a body that could not be decoded.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// Full request URL
        url: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Some zone submissions of a multi-zone update failed.
    ///
    /// No rollback is attempted; zones listed in `succeeded` were updated.
    #[error(
        "record update failed for {} of {} zone(s); first failure in '{}': {}",
        .failed.len(),
        .failed.len() + .succeeded.len(),
        .failed.first().map_or("", |f| f.zone.as_str()),
        .failed.first().map_or(String::new(), |f| f.error.to_string())
    )]
    PartialFailure {
        /// Zones whose PATCH succeeded
        succeeded: Vec<String>,
        /// Zones whose PATCH failed, in submission order
        failed: Vec<ZoneFailure>,
    },

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PdnsError {
    /// Shorthand for [`PdnsError::InvalidArgument`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// HTTP status of a [`PdnsError::Transport`] error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server reported a conflict (HTTP 409), e.g. an existing zone.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }

    /// Whether the server reported that the addressed zone does not exist.
    ///
    /// PowerDNS answers 404 on recent versions and 422 with
    /// "Could not find domain" on older ones.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport {
                status: 404, ..
            } => true,
            Self::Transport {
                status: 422,
                message,
                ..
            } => message.contains(PDNS_UNKNOWN_ZONE_MESSAGE),
            _ => false,
        }
    }

    /// The first failed zone of a [`PdnsError::PartialFailure`].
    #[must_use]
    pub fn first_failure(&self) -> Option<&ZoneFailure> {
        match self {
            Self::PartialFailure { failed, .. } => failed.first(),
            _ => None,
        }
    }
}
