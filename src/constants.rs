// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the PowerDNS API client.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// HTTP API Constants
// ============================================================================

/// Header carrying the PowerDNS API key on every request
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Environment variable holding the API endpoint
/// (e.g. `http://127.0.0.1:8081/api/v1/servers/localhost`)
pub const ENV_API_ENDPOINT: &str = "PDNS_API_ENDPOINT";

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "PDNS_API_KEY";

/// Environment variable holding an optional request timeout in seconds
pub const ENV_API_TIMEOUT_SECS: &str = "PDNS_API_TIMEOUT_SECS";

/// Error text PowerDNS returns (HTTP 422) when a zone is unknown
pub const PDNS_UNKNOWN_ZONE_MESSAGE: &str = "Could not find domain";

// ============================================================================
// Record Defaults
// ============================================================================

/// Record type used when a record does not name one
pub const DEFAULT_RECORD_TYPE: &str = "A";

/// TTL used when a record does not carry one (1 hour)
pub const DEFAULT_RECORD_TTL_SECS: u32 = 3600;

/// Record type excluded when merging search results into an appended record
pub const PTR_RECORD_TYPE: &str = "PTR";

/// Separator between DNS labels
pub const LABEL_SEPARATOR: char = '.';

/// Maximum length of a single DNS label
pub const MAX_LABEL_LEN: usize = 63;

// ============================================================================
// Search Defaults
// ============================================================================

/// Default maximum number of search hits
pub const DEFAULT_SEARCH_MAX: u32 = 10;

// ============================================================================
// Zone Bootstrap Constants
// ============================================================================

/// TTL of the SOA and NS record sets written during zone bootstrap
pub const BOOTSTRAP_TTL_SECS: u32 = 3600;

/// SOA serial written during zone bootstrap
pub const BOOTSTRAP_SOA_SERIAL: u32 = 2_020_111_501;

/// SOA refresh interval (3 hours)
pub const BOOTSTRAP_SOA_REFRESH_SECS: u32 = 10800;

/// SOA retry interval (1 hour)
pub const BOOTSTRAP_SOA_RETRY_SECS: u32 = 3600;

/// SOA expire time (7 days)
pub const BOOTSTRAP_SOA_EXPIRE_SECS: u32 = 604_800;

/// SOA minimum / negative caching TTL (1 hour)
pub const BOOTSTRAP_SOA_MINIMUM_SECS: u32 = 3600;
