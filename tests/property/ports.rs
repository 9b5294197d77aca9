use podcheck::check;
use proptest::prelude::*;

/// A valid manifest with a single port entry on line 13.
fn with_container_port(port: &str) -> String {
    format!(
        r#"apiVersion: v1
kind: Pod
metadata:
  name: web
spec:
  containers:
    - name: web
      image: registry.bigbrother.io/web:1.0
      resources:
        requests:
          cpu: 1
      ports:
        - containerPort: {}
"#,
        port
    )
}

fn messages(input: &str) -> Vec<String> {
    let ctx = check(input, "pod.yaml").unwrap();
    ctx.diagnostics().iter().map(|d| ctx.render(d)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn ports_in_range_are_accepted(port in 1i64..=65535) {
        prop_assert!(messages(&with_container_port(&port.to_string())).is_empty());
    }

    #[test]
    fn quoted_ports_in_range_are_accepted(port in 1i64..=65535) {
        let quoted = format!("\"{}\"", port);
        prop_assert!(messages(&with_container_port(&quoted)).is_empty());
    }

    #[test]
    fn ports_above_range_are_rejected(port in 65536i64..10_000_000) {
        prop_assert_eq!(
            messages(&with_container_port(&port.to_string())),
            vec!["pod.yaml:13 containerPort value out of range".to_string()]
        );
    }

    #[test]
    fn non_positive_ports_are_rejected(port in -100_000i64..=0) {
        prop_assert_eq!(
            messages(&with_container_port(&port.to_string())),
            vec!["pod.yaml:13 containerPort value out of range".to_string()]
        );
    }

    #[test]
    fn non_numeric_ports_are_not_ints(word in "[a-z]{1,8}") {
        prop_assert_eq!(
            messages(&with_container_port(&word)),
            vec!["pod.yaml:13 containerPort must be int".to_string()]
        );
    }
}
