// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for zone partitioning.

#[cfg(test)]
mod tests {
    use crate::errors::PdnsError;
    use crate::partition::{partition, partition_value, ZoneGroup};
    use crate::records::Record;
    use serde_json::json;

    fn a_record(name: &str) -> Record {
        Record::new(name, ["1.1.1.1", "8.8.8.8"])
            .with_type("A")
            .with_ttl(300)
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert_eq!(partition(&[]).unwrap(), Vec::<ZoneGroup>::new());
    }

    #[test]
    fn test_distinct_zones_are_separated_in_input_order() {
        let org = a_record("example.org");
        let com = a_record("*.example.com");

        let groups = partition(&[org.clone(), com.clone()]).unwrap();

        assert_eq!(
            groups,
            vec![
                ZoneGroup {
                    zone: "example.org".into(),
                    records: vec![org],
                },
                ZoneGroup {
                    zone: "example.com".into(),
                    records: vec![com],
                },
            ]
        );
    }

    #[test]
    fn test_subdomains_share_their_zone() {
        let records = vec![
            a_record("www.example.com"),
            a_record("example.org"),
            a_record("mail.example.com."),
            a_record("example.com"),
        ];

        let groups = partition(&records).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].zone, "example.com");
        let names: Vec<&str> = groups[0].records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["www.example.com", "mail.example.com.", "example.com"]);
        assert_eq!(groups[1].zone, "example.org");
        assert_eq!(groups[1].records, vec![records[1].clone()]);
    }

    #[test]
    fn test_zone_names_differing_in_case_share_a_group() {
        let records = vec![a_record("www.Example.com"), a_record("mail.example.COM.")];

        let groups = partition(&records).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].zone, "example.com");
        assert_eq!(groups[0].records, records);
    }

    #[test]
    fn test_unzoneable_name_is_rejected() {
        let err = partition(&[a_record("example.com"), a_record("localhost")]).unwrap_err();
        assert!(matches!(err, PdnsError::InvalidArgument(_)));
    }

    #[test]
    fn test_value_not_an_array_is_rejected() {
        let err = partition_value(&json!(1)).unwrap_err();
        assert!(err.to_string().contains("records must be of type array"));
        assert!(partition_value(&json!({"name": "example.com"})).is_err());
    }

    #[test]
    fn test_value_array_is_partitioned() {
        let groups = partition_value(&json!([
            {"name": "example.org", "type": "A", "ttl": 300, "content": ["1.1.1.1", "8.8.8.8"]},
            {"name": "*.example.com", "type": "A", "ttl": 300, "content": ["1.1.1.1", "8.8.8.8"]}
        ]))
        .unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].records, vec![a_record("example.org")]);
        assert_eq!(groups[1].records, vec![a_record("*.example.com")]);
    }
}
