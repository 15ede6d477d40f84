//! Tests for the settings payload builder.

use serde_json::Value;

use super::payload::{EXCLUDE_IP_KEY, PayloadBuilder, REBALANCE_ENABLE_KEY};
use super::{ExclusionSet, ValidationError};

fn rendered(entries: &[&str]) -> Value {
    let set = ExclusionSet::from_entries(entries.iter().copied());
    let payload = PayloadBuilder::new().render(&set).unwrap();
    serde_json::from_str(payload.as_str()).unwrap()
}

mod rendering {
    use super::*;

    #[test]
    fn joins_set_with_commas() {
        let doc = rendered(&["10.0.0.1", "10.0.0.2", "10.0.0.3"]);

        assert_eq!(
            doc["persistent"][EXCLUDE_IP_KEY],
            "10.0.0.1,10.0.0.2,10.0.0.3"
        );
    }

    #[test]
    fn always_enables_rebalance() {
        let doc = rendered(&["10.0.0.1"]);

        assert_eq!(doc["persistent"][REBALANCE_ENABLE_KEY], "all");
    }

    #[test]
    fn empty_set_clears_exclusion() {
        let doc = rendered(&[]);

        assert_eq!(doc["persistent"][EXCLUDE_IP_KEY], "");
        assert_eq!(doc["persistent"][REBALANCE_ENABLE_KEY], "all");
    }

    #[test]
    fn only_persistent_section_is_written() {
        let doc = rendered(&["::1"]);
        let object = doc.as_object().unwrap();

        assert_eq!(object.len(), 1);
        assert!(object.contains_key("persistent"));
        assert_eq!(doc["persistent"].as_object().unwrap().len(), 2);
    }

    #[test]
    fn ipv6_entries_are_not_escaped() {
        let doc = rendered(&["fe80::1", "10.0.0.1"]);

        assert_eq!(doc["persistent"][EXCLUDE_IP_KEY], "fe80::1,10.0.0.1");
    }

    #[test]
    fn quote_in_entry_stays_inside_the_string() {
        // Entries read back from the cluster are not validated as IPs.
        let doc = rendered(&[r#"10.0.0.1","x":"y"#]);

        assert_eq!(doc["persistent"][EXCLUDE_IP_KEY], r#"10.0.0.1","x":"y"#);
        assert_eq!(doc["persistent"].as_object().unwrap().len(), 2);
    }

    #[test]
    fn into_bytes_matches_text() {
        let set = ExclusionSet::from_entries(["10.0.0.1"]);
        let payload = PayloadBuilder::default().render(&set).unwrap();
        let text = payload.as_str().to_string();

        assert_eq!(payload.into_bytes(), text.into_bytes());
    }
}

mod self_check {
    use super::*;

    #[test]
    fn malformed_template_output_is_rejected() {
        let builder = PayloadBuilder::with_template(r#"{"persistent": {"#);

        let result = builder.render(&ExclusionSet::from_entries(["10.0.0.1"]));

        assert!(matches!(result, Err(ValidationError::Malformed(_))));
    }

    #[test]
    fn missing_exclusion_key_is_rejected() {
        let builder = PayloadBuilder::with_template(
            r#"{"persistent": {"cluster.routing.rebalance.enable": "all"}}"#,
        );

        let result = builder.render(&ExclusionSet::from_entries(["10.0.0.1"]));

        assert!(matches!(
            result,
            Err(ValidationError::Mismatch {
                key: EXCLUDE_IP_KEY
            })
        ));
    }

    #[test]
    fn wrong_rebalance_value_is_rejected() {
        let builder = PayloadBuilder::with_template(
            r#"{"persistent": {"cluster.routing.rebalance.enable": "none", "cluster.routing.allocation.exclude._ip": "{{ips}}"}}"#,
        );

        let result = builder.render(&ExclusionSet::from_entries(["10.0.0.1"]));

        assert!(matches!(
            result,
            Err(ValidationError::Mismatch {
                key: REBALANCE_ENABLE_KEY
            })
        ));
    }

    #[test]
    fn missing_persistent_section_is_rejected() {
        let builder = PayloadBuilder::with_template(r#"{"transient": {}}"#);

        let result = builder.render(&ExclusionSet::new());

        assert!(matches!(
            result,
            Err(ValidationError::Mismatch { key: "persistent" })
        ));
    }

    #[test]
    fn unclosed_template_expression_is_a_render_error() {
        let builder = PayloadBuilder::with_template(r#"{"persistent": "{{ips"}"#);

        let result = builder.render(&ExclusionSet::new());

        assert!(matches!(result, Err(ValidationError::Render(_))));
    }
}
