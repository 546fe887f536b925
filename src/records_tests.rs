// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for the record model and record-set builders.

#[cfg(test)]
mod tests {
    use crate::errors::PdnsError;
    use crate::records::{
        build_delete_sets, build_replace_sets, records_from_value, ChangeType, RRSet, Record,
    };
    use serde_json::json;

    #[test]
    fn test_replace_set_applies_defaults() {
        let sets = build_replace_sets(&[Record::new("a.example.com", ["1.1.1.1", "2.2.2.2"])]);

        assert_eq!(sets.len(), 1);
        let set = &sets[0];
        assert_eq!(set.name, "a.example.com.");
        assert_eq!(set.rtype, "A");
        assert_eq!(set.ttl, Some(3600));
        assert_eq!(set.changetype, Some(ChangeType::Replace));
        assert_eq!(set.records.len(), 2);

        for (entry, expected) in set.records.iter().zip(["1.1.1.1", "2.2.2.2"]) {
            assert_eq!(entry.content, expected);
            assert!(!entry.disabled);
            assert_eq!(entry.ttl, Some(3600));
            assert_eq!(entry.name.as_deref(), Some("a.example.com."));
            assert_eq!(entry.rtype.as_deref(), Some("A"));
        }
    }

    #[test]
    fn test_replace_set_keeps_explicit_type_and_ttl() {
        let record = Record::new("example.com.", ["\"v=spf1 -all\""])
            .with_type("TXT")
            .with_ttl(300);

        let sets = build_replace_sets(&[record]);

        assert_eq!(sets[0].name, "example.com.");
        assert_eq!(sets[0].rtype, "TXT");
        assert_eq!(sets[0].ttl, Some(300));
        assert_eq!(sets[0].records[0].ttl, Some(300));
    }

    #[test]
    fn test_one_set_per_record_in_order() {
        let sets = build_replace_sets(&[
            Record::new("example.com", ["1.1.1.1"]),
            Record::new("example.com", ["ns1.example.net."]).with_type("NS"),
        ]);

        let keys: Vec<(&str, &str)> = sets
            .iter()
            .map(|s| (s.name.as_str(), s.rtype.as_str()))
            .collect();
        assert_eq!(keys, [("example.com.", "A"), ("example.com.", "NS")]);
    }

    #[test]
    fn test_replace_wire_format() {
        let sets = build_replace_sets(&[Record::new("example.com", ["1.1.1.1"]).with_ttl(300)]);

        assert_eq!(
            serde_json::to_value(&sets).unwrap(),
            json!([{
                "name": "example.com.",
                "type": "A",
                "ttl": 300,
                "changetype": "REPLACE",
                "records": [{
                    "content": "1.1.1.1",
                    "disabled": false,
                    "ttl": 300,
                    "name": "example.com.",
                    "type": "A"
                }]
            }])
        );
    }

    #[test]
    fn test_delete_sets_carry_no_entries() {
        let sets = build_delete_sets(&[
            Record::new("www.example.com", ["ignored"]).with_ttl(60),
            Record::new("example.com", Vec::<String>::new()).with_type("MX"),
        ]);

        assert_eq!(sets.len(), 2);
        assert!(sets.iter().all(|s| s.records.is_empty()));
        assert!(sets.iter().all(|s| s.ttl.is_none()));
        assert!(sets
            .iter()
            .all(|s| s.changetype == Some(ChangeType::Delete)));
        assert_eq!(
            serde_json::to_value(&sets[1]).unwrap(),
            json!({"name": "example.com.", "type": "MX", "changetype": "DELETE", "records": []})
        );
    }

    #[test]
    fn test_zone_rrset_deserializes_without_change_fields() {
        let set: RRSet = serde_json::from_value(json!({
            "name": "example.com.",
            "type": "A",
            "ttl": 300,
            "records": [{"content": "1.1.1.1", "disabled": false}],
            "comments": []
        }))
        .unwrap();

        assert_eq!(set.changetype, None);
        assert_eq!(set.contents().collect::<Vec<_>>(), ["1.1.1.1"]);
    }

    #[test]
    fn test_records_from_value_applies_no_defaults_eagerly() {
        let records = records_from_value(&json!([{"name": "example.com", "content": ["1.1.1.1"]}]))
            .unwrap();

        assert_eq!(records[0].record_type, None);
        assert_eq!(records[0].effective_type(), "A");
        assert_eq!(records[0].effective_ttl(), 3600);
    }

    #[test]
    fn test_records_from_value_rejects_non_arrays_and_bad_elements() {
        let err = records_from_value(&json!("example.com")).unwrap_err();
        assert!(matches!(err, PdnsError::InvalidArgument(ref m) if m == "records must be of type array"));

        let err = records_from_value(&json!([{"name": 1}])).unwrap_err();
        assert!(err.to_string().contains("record 0 is malformed"));
    }
}
