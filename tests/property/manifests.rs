use podcheck::{check, parse, validate::validate_document};
use proptest::prelude::*;

/// A container entry, three lines long. `valid` picks a good or bad name.
fn container(index: usize, valid: bool) -> String {
    let name = if valid {
        format!("app_{}", index)
    } else {
        format!("App-{}", index)
    };
    format!(
        "    - name: {}\n      image: registry.bigbrother.io/app:{}\n      resources: {{}}\n",
        name, index
    )
}

fn manifest(flags: &[bool]) -> String {
    let mut out = String::from("apiVersion: v1\nkind: Pod\nmetadata:\n  name: web\nspec:\n  containers:\n");
    for (i, valid) in flags.iter().enumerate() {
        out.push_str(&container(i, *valid));
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    // One diagnostic per bad container, in container order, at its name line.
    #[test]
    fn every_bad_container_is_reported(flags in prop::collection::vec(any::<bool>(), 1..12)) {
        let ctx = check(&manifest(&flags), "pod.yaml").unwrap();
        let expected: Vec<(Option<usize>, String)> = flags
            .iter()
            .enumerate()
            .filter(|(_, valid)| !**valid)
            .map(|(i, _)| {
                (
                    Some(7 + 3 * i),
                    format!("containers.name has invalid format 'App-{}'", i),
                )
            })
            .collect();
        let actual: Vec<(Option<usize>, String)> = ctx
            .diagnostics()
            .iter()
            .map(|d| (d.line, d.message.clone()))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn validation_is_deterministic(flags in prop::collection::vec(any::<bool>(), 1..8)) {
        let doc = parse(&manifest(&flags)).unwrap();
        let first = validate_document(&doc, "pod.yaml").into_diagnostics();
        let second = validate_document(&doc, "pod.yaml").into_diagnostics();
        prop_assert_eq!(first, second);
    }
}
