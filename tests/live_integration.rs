// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Integration tests against a running PowerDNS server.
//!
//! The server is taken from `PDNS_API_ENDPOINT` and `PDNS_API_KEY`, e.g.
//! `http://127.0.0.1:8081/api/v1/servers/localhost`. Every test works on a
//! freshly named zone and deletes it afterwards.
//!
//! Run with: cargo test --test live_integration -- --ignored

use powerdns_api::api::ZoneKind;
use powerdns_api::client::{PowerDnsClient, ZoneSetup, ZoneSetupOutcome};
use powerdns_api::config::ClientConfig;
use powerdns_api::records::Record;
use std::time::{SystemTime, UNIX_EPOCH};

// ============================================================================
// Helper Functions
// ============================================================================

/// Client for the configured server, or `None` to skip the test
fn get_client_or_skip() -> Option<PowerDnsClient> {
    match ClientConfig::from_env().and_then(|config| PowerDnsClient::from_config(&config)) {
        Ok(client) => Some(client),
        Err(e) => {
            eprintln!("⊘ Skipping integration test: no PowerDNS server configured: {e}");
            None
        }
    }
}

/// A zone name no other test run uses
fn unique_zone(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{prefix}{:x}{:x}.test", nanos % 0xffff_ffff, std::process::id())
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires a running PowerDNS server"]
async fn test_zone_lifecycle() {
    let Some(client) = get_client_or_skip() else {
        return;
    };
    let zone = unique_zone("life");

    client.create_zone(&zone, ZoneKind::Native).await.unwrap();
    client
        .set_homogeneous_records(&[Record::new(&zone, ["1.1.1.1"]).with_ttl(300)], None)
        .await
        .unwrap();

    let rrsets = client.get_zone(&zone).await.unwrap();
    let a = rrsets
        .iter()
        .find(|set| set.rtype == "A")
        .expect("A record set");
    assert_eq!(a.ttl, Some(300));
    assert_eq!(a.contents().collect::<Vec<_>>(), ["1.1.1.1"]);

    client.delete_zone(&zone).await.unwrap();
    assert!(client.get_zone(&zone).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires a running PowerDNS server"]
async fn test_records_across_zones() {
    let Some(client) = get_client_or_skip() else {
        return;
    };
    let first = unique_zone("multia");
    let second = unique_zone("multib");
    for zone in [&first, &second] {
        client.create_zone(zone, ZoneKind::Native).await.unwrap();
    }

    let updated = client
        .set_records(&[
            Record::new(format!("www.{first}"), ["10.0.0.1"]),
            Record::new(format!("www.{second}"), ["10.0.0.2"]),
        ])
        .await
        .unwrap();
    assert_eq!(updated.len(), 2);

    let appended = client
        .append_record(&Record::new(format!("www.{first}"), ["10.0.0.3"]))
        .await
        .unwrap();
    assert_eq!(appended.content, ["10.0.0.3", "10.0.0.1"]);

    let changed = client
        .replace_records("10.0.0.1", "10.0.0.9", &first)
        .await
        .unwrap();
    assert_eq!(changed, 1);

    client
        .delete_records(&[Record::new(format!("www.{second}"), Vec::<String>::new())])
        .await
        .unwrap();
    let remaining = client.get_zone(&second).await.unwrap();
    assert!(remaining.iter().all(|set| set.rtype != "A"));

    for zone in [&first, &second] {
        client.delete_zone(zone).await.unwrap();
    }
}

#[tokio::test]
#[ignore = "requires a running PowerDNS server"]
async fn test_create_and_setup_zone_is_idempotent() {
    let Some(client) = get_client_or_skip() else {
        return;
    };
    let zone = unique_zone("setup");
    let setup = ZoneSetup {
        domain: zone.clone(),
        nameservers: vec![format!("ns1.{zone}"), format!("ns2.{zone}")],
        hostmaster_email: format!("hostmaster@{zone}"),
    };

    let outcome = client.create_and_setup_zone(&setup).await.unwrap();
    assert!(matches!(outcome, ZoneSetupOutcome::KeyCreated(_)));

    let outcome = client.create_and_setup_zone(&setup).await.unwrap();
    assert_eq!(outcome, ZoneSetupOutcome::KeyExists);

    let rrsets = client.get_zone(&zone).await.unwrap();
    let ns = rrsets.iter().find(|set| set.rtype == "NS").expect("NS set");
    assert_eq!(ns.records.len(), 2);

    client.delete_zone(&zone).await.unwrap();
}
