// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Domain name canonicalization.
//!
//! PowerDNS addresses every name in absolute form, i.e. with a trailing dot.
//! Zones are addressed by their registrable domain: the last two labels of a
//! name (`www.example.com.` lives in `example.com`).

use serde_json::Value;

use crate::constants::{LABEL_SEPARATOR, MAX_LABEL_LEN};
use crate::errors::{PdnsError, Result};

/// Return `name` in absolute form, appending the trailing dot if missing.
///
/// Idempotent: `absolute_name(&absolute_name(x)) == absolute_name(x)`.
///
/// # Examples
///
/// ```rust
/// use powerdns_api::names::absolute_name;
///
/// assert_eq!(absolute_name("example.com"), "example.com.");
/// assert_eq!(absolute_name("example.com."), "example.com.");
/// ```
#[must_use]
pub fn absolute_name(name: &str) -> String {
    if name.ends_with(LABEL_SEPARATOR) {
        name.to_string()
    } else {
        format!("{name}{LABEL_SEPARATOR}")
    }
}

/// Canonicalize an untyped JSON value holding a name.
///
/// # Errors
///
/// Returns [`PdnsError::InvalidArgument`] if `value` is not a string.
pub fn absolute_name_value(value: &Value) -> Result<String> {
    value
        .as_str()
        .map(absolute_name)
        .ok_or_else(|| PdnsError::invalid("name must be of type string"))
}

/// Extract the registrable domain (the last two labels) of a name.
///
/// The result is lowercase and carries no trailing dot:
/// `"*.www.Example.com"` yields `"example.com"`.
///
/// # Errors
///
/// Returns [`PdnsError::InvalidArgument`] if the name has fewer than two
/// labels or one of the last two labels is not 1-63 characters of
/// `[A-Za-z0-9-]`.
pub fn registrable_domain(name: &str) -> Result<String> {
    let canonical = absolute_name(name);
    let trimmed = canonical.trim_end_matches(LABEL_SEPARATOR);
    let mut labels = trimmed.rsplit(LABEL_SEPARATOR);

    let (Some(tld), Some(sld)) = (labels.next(), labels.next()) else {
        return Err(PdnsError::invalid(format!(
            "'{name}' has no registrable domain (need at least two labels)"
        )));
    };

    for label in [sld, tld] {
        if !is_valid_label(label) {
            return Err(PdnsError::invalid(format!(
                "'{name}' has an invalid label '{label}'"
            )));
        }
    }

    Ok(format!("{sld}{LABEL_SEPARATOR}{tld}").to_ascii_lowercase())
}

fn is_valid_label(label: &str) -> bool {
    (1..=MAX_LABEL_LEN).contains(&label.len())
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}
